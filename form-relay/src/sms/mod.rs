//! Outbound SMS notification.
//!
//! The handler only ever talks to [`SmsProvider`] through [`deliver`], which
//! turns every outcome into a [`Delivery`] so a provider failure can never
//! become an HTTP error.

pub mod twilio;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::SmsSettings;

pub use twilio::TwilioClient;

/// Fallback text when the provider failed without saying why.
pub const UNKNOWN_PROVIDER_ERROR: &str = "Unknown Twilio error";

/// Provider acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageReceipt {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Errors raised by an SMS provider.
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
    },
}

impl SmsError {
    /// Human readable reason, never empty.
    pub fn reason(&self) -> String {
        let reason = self.to_string();
        if reason.trim().is_empty() {
            UNKNOWN_PROVIDER_ERROR.to_string()
        } else {
            reason
        }
    }
}

/// Something that can send one SMS.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    async fn send(&self, settings: &SmsSettings<'_>, body: &str)
        -> Result<MessageReceipt, SmsError>;
}

/// Outcome of one attempt to notify the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent { sid: String },
    /// Sending was not attempted because configuration is incomplete.
    Skipped(String),
    Failed(String),
}

impl Delivery {
    pub fn sent(&self) -> bool {
        matches!(self, Delivery::Sent { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Delivery::Sent { .. } => None,
            Delivery::Skipped(reason) | Delivery::Failed(reason) => Some(reason),
        }
    }
}

/// Send `body` once and record the outcome.
pub async fn deliver(
    provider: &dyn SmsProvider,
    settings: &SmsSettings<'_>,
    body: &str,
) -> Delivery {
    info!(
        to = %settings.to,
        body_chars = body.chars().count(),
        "sms_send_starting"
    );

    match provider.send(settings, body).await {
        Ok(receipt) => {
            info!(
                sid = %receipt.sid,
                status = ?receipt.status,
                "sms_sent"
            );
            Delivery::Sent { sid: receipt.sid }
        }
        Err(e) => {
            let reason = e.reason();
            match &e {
                SmsError::Api { status, code, .. } => {
                    error!(status = status, code = ?code, error = %reason, "sms_send_failed");
                }
                SmsError::Transport(inner) => {
                    error!(
                        is_timeout = inner.is_timeout(),
                        is_connect = inner.is_connect(),
                        error = %reason,
                        "sms_send_failed"
                    );
                }
            }
            Delivery::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(fn() -> Result<MessageReceipt, SmsError>);

    #[async_trait]
    impl SmsProvider for FixedProvider {
        async fn send(
            &self,
            _settings: &SmsSettings<'_>,
            _body: &str,
        ) -> Result<MessageReceipt, SmsError> {
            (self.0)()
        }
    }

    fn settings() -> SmsSettings<'static> {
        SmsSettings {
            account_sid: "AC123",
            auth_token: "secret",
            from: "+15550001111",
            to: "+15552223333",
        }
    }

    #[tokio::test]
    async fn test_deliver_success() {
        let provider = FixedProvider(|| {
            Ok(MessageReceipt {
                sid: "SM1".to_string(),
                status: Some("queued".to_string()),
            })
        });

        let delivery = deliver(&provider, &settings(), "hello").await;

        assert_eq!(delivery, Delivery::Sent { sid: "SM1".to_string() });
        assert!(delivery.sent());
        assert_eq!(delivery.error(), None);
    }

    #[tokio::test]
    async fn test_deliver_api_failure() {
        let provider = FixedProvider(|| {
            Err(SmsError::Api {
                status: 400,
                code: Some(21211),
                message: "Invalid 'To' Phone Number".to_string(),
            })
        });

        let delivery = deliver(&provider, &settings(), "hello").await;

        assert!(!delivery.sent());
        assert_eq!(delivery.error(), Some("Invalid 'To' Phone Number"));
    }

    #[tokio::test]
    async fn test_deliver_failure_without_message_uses_fallback() {
        let provider = FixedProvider(|| {
            Err(SmsError::Api {
                status: 500,
                code: None,
                message: String::new(),
            })
        });

        let delivery = deliver(&provider, &settings(), "hello").await;

        assert_eq!(delivery, Delivery::Failed(UNKNOWN_PROVIDER_ERROR.to_string()));
    }

    #[test]
    fn test_skipped_reports_reason() {
        let delivery = Delivery::Skipped("Missing Twilio env vars: OWNER_PHONE".to_string());
        assert!(!delivery.sent());
        assert_eq!(delivery.error(), Some("Missing Twilio env vars: OWNER_PHONE"));
    }
}
