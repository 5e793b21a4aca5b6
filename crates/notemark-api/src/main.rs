//! notemark-api server binary.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notemark_api::{app, rate_limiter, AppState};
use notemark_core::EventBus;
use notemark_db::Database;
use notemark_inference::{EnhanceService, GeminiBackend};

/// Default bind address.
const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Default enhancement rate limit (requests per minute; 0 disables).
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notemark_api=info,notemark_db=info,notemark_inference=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = Database::connect(&database_url).await?;
    db.migrate().await?;
    info!("Database connected and migrated");

    let backend = GeminiBackend::from_env().context("Failed to initialize Gemini backend")?;
    let enhance = EnhanceService::new(Arc::new(backend));

    let per_minute = std::env::var("NOTEMARK_RATE_LIMIT_PER_MINUTE")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE);

    let state = AppState {
        notes: db.notes.clone(),
        workspaces: db.workspaces.clone(),
        categories: db.categories.clone(),
        versions: db.versions.clone(),
        identity: db.identity.clone(),
        enhance,
        event_bus: EventBus::default(),
        rate_limiter: rate_limiter(per_minute),
    };

    let bind = std::env::var("NOTEMARK_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("Listening on {}", bind);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
