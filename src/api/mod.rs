//! Public API service HTTP surface
//!
//! Authenticated stock lookups, per-user history, aggregate stats, and
//! user/token management.

pub mod client;
mod auth;
mod handlers;
mod types;

pub use auth::CurrentUser;
pub use handlers::router;
