//! Webhook Notification
//!
//! Renders job-lifecycle events into incoming-webhook payloads and delivers
//! them to a Mattermost (or Slack-compatible) endpoint.

pub mod client;
pub mod http_client;
pub mod renderer;
pub mod service;
pub mod types;

pub use client::{HttpTransport, WebhookTransport};
pub use renderer::MessageRenderer;
pub use service::Notifier;
pub use types::*;
