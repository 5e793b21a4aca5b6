//! Request handlers, grouped by surface.

pub mod ai;
pub mod auth;
pub mod events;
pub mod notes;
pub mod workspaces;
