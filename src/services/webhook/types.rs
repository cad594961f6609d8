//! Webhook Core Types
//!
//! Data carried through one notification: the host's request, the model the
//! template is expanded against, and what came back from the endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use mattermost_notifier_core::Trigger;

/// Sender label shown on every message.
pub const MESSAGE_FROM_NAME: &str = "rundeck";

/// Response body the webhook returns when it accepted the message.
pub const SUCCESS_RESPONSE: &str = "ok";

/// One job-lifecycle event as handed over by the orchestration host.
///
/// `execution_data` and `config` are opaque to the notifier and only read by
/// the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub trigger: String,
    #[serde(default)]
    pub execution_data: Map<String, Value>,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl NotificationRequest {
    pub fn new(
        trigger: impl Into<String>,
        execution_data: Map<String, Value>,
        config: Map<String, Value>,
    ) -> Self {
        Self {
            trigger: trigger.into(),
            execution_data,
            config,
        }
    }
}

/// Variables visible to the message template.
///
/// Field names are the names the template uses.
#[derive(Debug, Clone, Serialize)]
pub struct RenderModel<'a> {
    pub trigger: Trigger,
    pub color: &'static str,
    #[serde(rename = "executionData")]
    pub execution_data: &'a Map<String, Value>,
    pub config: &'a Map<String, Value>,
    pub username: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<&'a str>,
}

impl<'a> RenderModel<'a> {
    /// Build the model for a recognized trigger.
    ///
    /// An empty `icon_url` is treated the same as an absent one.
    pub fn new(
        trigger: Trigger,
        execution_data: &'a Map<String, Value>,
        config: &'a Map<String, Value>,
        icon_url: Option<&'a str>,
    ) -> Self {
        Self {
            trigger,
            color: trigger.style().color.code(),
            execution_data,
            config,
            username: MESSAGE_FROM_NAME,
            icon_url: icon_url.filter(|url| !url.is_empty()),
        }
    }
}

/// Raw answer from the webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    /// Whether the endpoint acknowledged the message.
    ///
    /// Only the body decides; the status code is kept for diagnostics.
    pub fn is_accepted(&self) -> bool {
        self.body == SUCCESS_RESPONSE
    }
}

/// Result of sending a test notification through a configured webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookTestResult {
    pub success: bool,
    pub latency_ms: Option<u32>,
    pub error: Option<String>,
}
