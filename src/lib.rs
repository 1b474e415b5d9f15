//! pressgate - a gateway service in front of a headless WordPress GraphQL API
//!
//! Exposes a paginated post listing, a single-post JSON endpoint, and a
//! server-rendered post page, all backed by one outbound GraphQL call per
//! request with a hard per-request deadline and no shared state.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::AppError;
pub use services::{CmsService, GraphQLGateway, GraphQLRequest};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub cms: CmsService,
}
