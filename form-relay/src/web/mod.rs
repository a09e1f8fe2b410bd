//! Web server module for the contact endpoint.
//!
//! This module provides the router that:
//! - Accepts contact form posts as JSON or URL-encoded data
//! - Validates the required fields
//! - Relays a summary to the owner by SMS
//! - Always answers with a JSON status
//!
//! With CORS enabled every response carries a static set of CORS headers
//! and `OPTIONS` preflight requests are answered directly.

pub mod error;
pub mod handlers;

use axum::{
    http::{header, HeaderValue},
    routing::{any, get},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub use error::{ContactError, ErrorResponse};
pub use handlers::{contact, health, AppState, ContactResponse, HealthResponse};

/// Path the contact form posts to.
pub const CONTACT_PATH: &str = "/api/contact";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route(CONTACT_PATH, any(contact));

    let router = if state.config.cors_enabled {
        router
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("POST, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ))
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
