//! # Drone Dispatch API
//!
//! REST transport for the medication-delivery dispatch controller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Axum HTTP Server              │
//! │   (routing, JSON codec, response envelope)  │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │             FleetRegistry                   │
//! │   (serial number → drone, registry lock)    │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │           Drone / Medication core           │
//! │  (validation, loading state machine, views) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The transport stays thin: handlers decode, delegate to the core, and
//! serialize. Every business rule lives in `dispatch-domain`.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use dispatch_fleet::FleetRegistry;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use response::Envelope;

/// Shared state for the handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FleetRegistry>,
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the axum router over a fleet registry.
pub fn build_router(registry: Arc<FleetRegistry>) -> Router {
    let state = AppState { registry };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/drone/register", post(handlers::register_drone))
        .route("/drone/load", post(handlers::load_medications))
        .route("/drone/medications", get(handlers::get_medications))
        .route("/drone/battery", get(handlers::get_battery))
        .route("/drone/all/availables", get(handlers::list_available))
        .route("/drone/all", get(handlers::list_all))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
