//! Contact endpoint handlers.
//!
//! The contact handler is a single linear pass:
//! 1. Check the method (and answer preflight when CORS is enabled)
//! 2. Decode and validate the submission
//! 3. Relay it by SMS, once
//! 4. Return 200 whatever the SMS outcome was

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::contact::{compose_sms, parse_body, Submission};
use crate::sms::{deliver, Delivery, SmsProvider};
use crate::web::ContactError;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sms: Arc<dyn SmsProvider>,
}

impl AppState {
    pub fn new(config: Config, sms: Arc<dyn SmsProvider>) -> Self {
        Self {
            config: Arc::new(config),
            sms,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Contact Form
// =============================================================================

/// Contact response.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    pub sms: bool,
    /// `None` omits the field, `Some(None)` serializes as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Option<String>>,
}

impl ContactResponse {
    fn from_delivery(delivery: &Delivery, report_error: bool) -> Self {
        Self {
            ok: true,
            sms: delivery.sent(),
            error: report_error.then(|| delivery.error().map(str::to_string)),
        }
    }
}

/// Contact form endpoint.
///
/// Provider problems are reported in the body, never as an error status.
pub async fn contact(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ContactError> {
    let cors = state.config.cors_enabled;

    if cors && method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if method != Method::POST {
        return Err(ContactError::MethodNotAllowed {
            allow: if cors { "POST, OPTIONS" } else { "POST" },
        });
    }

    // obs-text bytes must not hide an `application/json` media type.
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    let bytes = to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(ContactError::UnreadableBody)?;

    let fields = parse_body(&content_type, &bytes)?;
    let submission = Submission::from_fields(&fields)?;

    let delivery = match state.config.twilio.settings() {
        Ok(settings) => {
            let text = compose_sms(&state.config.sms_title, &submission);
            deliver(state.sms.as_ref(), &settings, &text).await
        }
        Err(missing) => {
            warn!(missing = ?missing.missing, "sms_not_configured");
            Delivery::Skipped(missing.to_string())
        }
    };

    info!(
        sms_sent = delivery.sent(),
        sms_error = ?delivery.error(),
        "contact_relayed"
    );

    Ok(Json(ContactResponse::from_delivery(&delivery, cors)).into_response())
}
