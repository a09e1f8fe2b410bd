//! Shared helpers for router tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use formrelay::config::{Config, SmsSettings, TwilioConfig};
use formrelay::sms::{MessageReceipt, SmsError, SmsProvider};
use formrelay::{router, AppState};

/// A message the mock provider was asked to send.
#[derive(Debug, Clone)]
pub struct SentSms {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// Records every send and answers with a canned result.
pub struct RecordingProvider {
    pub sent: Mutex<Vec<SentSms>>,
    fail_with: Option<String>,
}

impl RecordingProvider {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsProvider for RecordingProvider {
    async fn send(
        &self,
        settings: &SmsSettings<'_>,
        body: &str,
    ) -> Result<MessageReceipt, SmsError> {
        self.sent.lock().unwrap().push(SentSms {
            from: settings.from.to_string(),
            to: settings.to.to_string(),
            body: body.to_string(),
        });

        match &self.fail_with {
            Some(message) => Err(SmsError::Api {
                status: 400,
                code: Some(21608),
                message: message.clone(),
            }),
            None => Ok(MessageReceipt {
                sid: "SM00000000000000000000000000000001".to_string(),
                status: Some("queued".to_string()),
            }),
        }
    }
}

pub fn twilio_config() -> TwilioConfig {
    TwilioConfig {
        account_sid: Some("AC123".to_string()),
        auth_token: Some("secret".to_string()),
        from: Some("+15550001111".to_string()),
        owner_phone: Some("+15552223333".to_string()),
    }
}

pub fn test_config(cors_enabled: bool) -> Config {
    Config {
        cors_enabled,
        sms_title: "New Quote".to_string(),
        twilio: twilio_config(),
        ..Config::default()
    }
}

pub async fn send(
    config: Config,
    provider: Arc<RecordingProvider>,
    request: Request<Body>,
) -> Response<Body> {
    let app = router(AppState::new(config, provider));
    app.oneshot(request).await.unwrap()
}

pub fn post(content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/api/contact");
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    builder.body(body.into()).unwrap()
}

pub fn post_json(json: serde_json::Value) -> Request<Body> {
    post(Some("application/json"), json.to_string())
}

pub fn post_form(form: &'static str) -> Request<Body> {
    post(Some("application/x-www-form-urlencoded"), form)
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
