//! Unifolhas storefront: catalog browsing, session carts, checkout into an
//! append-only sales ledger, favorites and sales reporting over SQLite.

pub mod api;
pub mod config;
pub mod database;
pub mod domain;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod services;

pub use api::{create_api_router, AppState};
pub use config::AppConfig;
pub use error::StoreError;
