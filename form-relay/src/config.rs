//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup into [`Config`] and handed to the web
//! layer, so handlers never touch the process environment themselves.

use std::env;
use std::fmt;

use thiserror::Error;
use tracing::warn;

/// Default title line for the outbound SMS.
pub const DEFAULT_SMS_TITLE: &str = "📩 New TruSentry Quote";

/// Default Twilio REST API origin.
pub const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Serve CORS headers and answer OPTIONS preflight requests
    pub cors_enabled: bool,

    /// First line of every relayed SMS
    pub sms_title: String,

    /// Twilio REST API origin (overridable for testing against a mock)
    pub twilio_api_base: String,

    /// HTTP request timeout for the provider call in milliseconds
    pub request_timeout_ms: u64,

    /// Largest request body the contact endpoint will read
    pub max_body_bytes: usize,

    /// Twilio credentials and phone numbers
    pub twilio: TwilioConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            cors_enabled: parse_bool("CORS_ENABLED", true),

            sms_title: env::var("SMS_TITLE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SMS_TITLE.to_string()),

            twilio_api_base: env::var("TWILIO_API_BASE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE.to_string()),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),

            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64 * 1024),

            twilio: TwilioConfig {
                account_sid: env::var("TWILIO_ACCOUNT_SID").ok(),
                auth_token: env::var("TWILIO_AUTH_TOKEN").ok(),
                from: env::var("TWILIO_FROM").ok(),
                owner_phone: env::var("OWNER_PHONE").ok(),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            cors_enabled: true,
            sms_title: DEFAULT_SMS_TITLE.to_string(),
            twilio_api_base: DEFAULT_TWILIO_API_BASE.to_string(),
            request_timeout_ms: 10_000,
            max_body_bytes: 64 * 1024,
            twilio: TwilioConfig::default(),
        }
    }
}

/// The four values needed to send an SMS. Any of them may be absent.
#[derive(Clone, Default)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sender number, must belong to the Twilio account
    pub from: Option<String>,
    /// Recipient of every relayed submission
    pub owner_phone: Option<String>,
}

// Hand-written so the auth token never ends up in logs.
impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("owner_phone", &self.owner_phone)
            .finish()
    }
}

/// Borrowed view of a complete [`TwilioConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SmsSettings<'a> {
    pub account_sid: &'a str,
    pub auth_token: &'a str,
    pub from: &'a str,
    pub to: &'a str,
}

/// One or more Twilio variables were not set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing Twilio env vars: {}", .missing.join(", "))]
pub struct MissingSmsConfig {
    pub missing: Vec<&'static str>,
}

impl TwilioConfig {
    /// Names of the variables that are unset or blank.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("TWILIO_ACCOUNT_SID", &self.account_sid),
            ("TWILIO_AUTH_TOKEN", &self.auth_token),
            ("TWILIO_FROM", &self.from),
            ("OWNER_PHONE", &self.owner_phone),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Borrow all four values at once, or report which ones are missing.
    pub fn settings(&self) -> Result<SmsSettings<'_>, MissingSmsConfig> {
        match (
            present(&self.account_sid),
            present(&self.auth_token),
            present(&self.from),
            present(&self.owner_phone),
        ) {
            (Some(account_sid), Some(auth_token), Some(from), Some(to)) => Ok(SmsSettings {
                account_sid,
                auth_token,
                from,
                to,
            }),
            _ => Err(MissingSmsConfig {
                missing: self.missing(),
            }),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Parse a boolean flag, accepting the usual spellings.
fn parse_bool(name: &str, default: bool) -> bool {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match parse_bool_value(&raw) {
        Some(value) => value,
        None => {
            warn!(env_var = name, value = %raw, "Invalid boolean value, using default");
            default
        }
    }
}

fn parse_bool_value(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> TwilioConfig {
        TwilioConfig {
            account_sid: Some("AC123".to_string()),
            auth_token: Some("secret".to_string()),
            from: Some("+15550001111".to_string()),
            owner_phone: Some("+15552223333".to_string()),
        }
    }

    #[test]
    fn test_settings_complete() {
        let twilio = complete();
        let settings = twilio.settings().unwrap();
        assert_eq!(settings.account_sid, "AC123");
        assert_eq!(settings.from, "+15550001111");
        assert_eq!(settings.to, "+15552223333");
        assert!(twilio.is_complete());
    }

    #[test]
    fn test_settings_missing_lists_names() {
        let twilio = TwilioConfig {
            from: None,
            owner_phone: Some("   ".to_string()),
            ..complete()
        };

        let err = twilio.settings().unwrap_err();
        assert_eq!(err.missing, vec!["TWILIO_FROM", "OWNER_PHONE"]);
        assert_eq!(
            err.to_string(),
            "Missing Twilio env vars: TWILIO_FROM, OWNER_PHONE"
        );
    }

    #[test]
    fn test_default_twilio_config_is_incomplete() {
        assert_eq!(TwilioConfig::default().missing().len(), 4);
    }

    #[test]
    fn test_debug_redacts_auth_token() {
        let rendered = format!("{:?}", complete());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_parse_bool_value() {
        assert_eq!(parse_bool_value("TRUE"), Some(true));
        assert_eq!(parse_bool_value(" off "), Some(false));
        assert_eq!(parse_bool_value("0"), Some(false));
        assert_eq!(parse_bool_value("maybe"), None);
    }

    #[test]
    fn test_parse_bool_default() {
        assert!(parse_bool("NONEXISTENT_BOOL_VAR", true));
        assert!(!parse_bool("NONEXISTENT_BOOL_VAR", false));
    }
}
