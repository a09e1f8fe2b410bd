//! Twilio Programmable Messaging client.
//!
//! Reference: https://www.twilio.com/docs/messaging/api/message-resource#create-a-message-resource

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use super::{MessageReceipt, SmsError, SmsProvider};
use crate::config::{Config, SmsSettings};

/// Error document Twilio returns with non-2xx responses.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    message: Option<String>,
}

/// Sends messages through the Twilio REST API.
///
/// Credentials are passed per call, so one client serves any account.
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    api_base: String,
}

impl TwilioClient {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.twilio_api_base.clone(),
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            account_sid
        )
    }
}

#[async_trait]
impl SmsProvider for TwilioClient {
    async fn send(
        &self,
        settings: &SmsSettings<'_>,
        body: &str,
    ) -> Result<MessageReceipt, SmsError> {
        let response = self
            .http
            .post(self.messages_url(settings.account_sid))
            .basic_auth(settings.account_sid, Some(settings.auth_token))
            .form(&[("From", settings.from), ("To", settings.to), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<MessageReceipt>().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let parsed = match serde_json::from_str::<TwilioErrorBody>(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    status = status.as_u16(),
                    error = %e,
                    body_preview = %text.chars().take(200).collect::<String>(),
                    "twilio_error_body_unparsable"
                );
                TwilioErrorBody {
                    code: None,
                    message: None,
                }
            }
        };

        Err(SmsError::Api {
            status: status.as_u16(),
            code: parsed.code,
            message: parsed.message.unwrap_or_default(),
        })
    }
}
