//! Request-level failures and their HTTP mapping.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::contact::{BodyError, MissingFields};

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Reasons a contact request is rejected before any SMS is attempted.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("Invalid body")]
    UnreadableBody(#[source] axum::Error),

    #[error("Invalid body")]
    InvalidBody(#[from] BodyError),

    #[error(transparent)]
    MissingFields(#[from] MissingFields),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ContactError::UnreadableBody(_)
            | ContactError::InvalidBody(_)
            | ContactError::MissingFields(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ContactError::MethodNotAllowed { allow } => {
                warn!(allow = %allow, "contact_method_not_allowed");
            }
            ContactError::UnreadableBody(e) => {
                warn!(error = %e, "contact_body_unreadable");
            }
            ContactError::InvalidBody(e) => {
                warn!(error = %e, "contact_body_parse_failed");
            }
            ContactError::MissingFields(e) => {
                warn!(missing = ?e.fields, "contact_missing_fields");
            }
        }

        let mut response = (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response();

        if let ContactError::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }

        response
    }
}
