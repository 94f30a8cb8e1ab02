//! snaphunt-qm library interface for testing
//!
//! Exposes public APIs for integration testing

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use snaphunt_common::Catalogue;

use crate::services::Matcher;
use crate::types::VisionProvider;

/// Application state shared across handlers
///
/// Everything in here is read-only after startup; concurrent requests share
/// it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The location matcher (catalogue + provider client)
    pub matcher: Arc<Matcher>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalogue: Arc<Catalogue>, provider: Arc<dyn VisionProvider>) -> Self {
        Self {
            matcher: Arc::new(Matcher::new(catalogue, provider)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::match_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
