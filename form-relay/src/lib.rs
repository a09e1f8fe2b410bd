//! Form Relay - contact form to SMS relay.
//!
//! This library provides the modules behind the `form-relay-web` binary:
//! - `contact`: body decoding, field extraction, validation, SMS text
//! - `sms`: provider seam and the Twilio client
//! - `web`: axum router and handlers
//!
//! ## Architecture
//!
//! ```text
//! Web form → POST /api/contact → Submission → Twilio → owner's phone
//! ```

pub mod config;
pub mod contact;
pub mod sms;
pub mod web;

// Re-export commonly used types
pub use config::{Config, SmsSettings, TwilioConfig};
pub use contact::Submission;
pub use sms::{Delivery, SmsProvider, TwilioClient};
pub use web::{router, AppState};
