//! Session-backed identity provider.
//!
//! Tokens and authorization codes are opaque random strings; storage keeps
//! only their SHA-256 hashes, so a leaked table cannot be replayed.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use notemark_core::{Error, IdentityProvider, Profile, Result, Session};

/// Length of generated tokens and authorization codes.
pub const TOKEN_LENGTH: usize = 43;

/// Session lifetime.
pub const SESSION_LIFETIME_HOURS: i64 = 24;

/// Authorization codes expire quickly; they are one-time bootstrap secrets.
pub const AUTH_CODE_LIFETIME_MINUTES: i64 = 10;

/// PostgreSQL implementation of IdentityProvider.
pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn generate_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Issue a one-time authorization code for a user.
    ///
    /// Not part of the [`IdentityProvider`] contract; used by the sign-in
    /// flow that hands codes to the browser redirect.
    pub async fn create_authorization_code(&self, user_id: Uuid) -> Result<String> {
        let code = Self::generate_token();
        let expires_at = Utc::now() + Duration::minutes(AUTH_CODE_LIFETIME_MINUTES);

        sqlx::query("INSERT INTO auth_codes (code_hash, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(Self::hash_token(&code))
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(code)
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn get_current_user(&self, token: &str) -> Result<Option<Profile>> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.email, p.display_name, p.avatar_url, p.created_at
            FROM sessions s
            JOIN profiles p ON p.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > now()
            "#,
        )
        .bind(Self::hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Profile {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                display_name: row.try_get("display_name")?,
                avatar_url: row.try_get("avatar_url")?,
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<Session> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT user_id, used, expires_at FROM auth_codes WHERE code_hash = $1 FOR UPDATE",
        )
        .bind(Self::hash_token(code))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid authorization code".to_string()))?;

        let used: bool = row.try_get("used")?;
        let expires_at: DateTime<Utc> = row.try_get("expires_at")?;
        if used {
            return Err(Error::Unauthorized(
                "Authorization code already used".to_string(),
            ));
        }
        if expires_at < Utc::now() {
            return Err(Error::Unauthorized("Authorization code expired".to_string()));
        }
        let user_id: Uuid = row.try_get("user_id")?;

        sqlx::query("UPDATE auth_codes SET used = true WHERE code_hash = $1")
            .bind(Self::hash_token(code))
            .execute(&mut *tx)
            .await?;

        let token = Self::generate_token();
        let session_expires_at = Utc::now() + Duration::hours(SESSION_LIFETIME_HOURS);

        sqlx::query("INSERT INTO sessions (token_hash, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(Self::hash_token(&token))
            .bind(user_id)
            .bind(session_expires_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Session {
            token,
            user_id,
            expires_at: session_expires_at,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let a = PgIdentityProvider::hash_token("token");
        let b = PgIdentityProvider::hash_token("token");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_tokens_are_unique_and_sized() {
        let a = PgIdentityProvider::generate_token();
        let b = PgIdentityProvider::generate_token();
        assert_eq!(a.len(), TOKEN_LENGTH);
        assert_ne!(a, b);
    }
}
