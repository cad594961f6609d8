//! Mattermost Notifier
//!
//! Sends job-lifecycle notifications (`start`, `success`, `failure`) from an
//! orchestration host to a Mattermost incoming webhook. It includes:
//! - The message renderer (bundled tera template, one color per trigger)
//! - The webhook client (form-encoded POST over a blocking HTTP client)
//! - The notifier that ties them together and classifies the response
//!
//! Failures are returned, never logged: the host decides how to surface them.
//! Progress is emitted as `tracing` debug events for hosts that install a
//! subscriber.

pub mod config;
pub mod services;

pub use config::PluginConfig;
pub use services::webhook::{
    HttpTransport, MessageRenderer, NotificationRequest, Notifier, RenderModel, WebhookResponse,
    WebhookTestResult, WebhookTransport,
};

// Re-export core types so hosts only need this crate
pub use mattermost_notifier_core::{
    MessageColor, NotifyError, NotifyResult, ProxyConfig, ProxyProtocol, Trigger, TriggerStyle,
};
