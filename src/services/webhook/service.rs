//! Webhook Notifier
//!
//! Top-level notification operation: validate the trigger, render the
//! payload, deliver it, and classify the endpoint's answer.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Map, Value};

use mattermost_notifier_core::{NotifyError, NotifyResult, Trigger};

use super::client::{self, HttpTransport, WebhookTransport};
use super::renderer::MessageRenderer;
use super::types::*;
use crate::config::PluginConfig;

/// Sends job-lifecycle notifications to one incoming webhook.
///
/// Holds only read-only state after construction, so one instance can serve
/// concurrent callers. Nothing is retried: every failure is returned.
pub struct Notifier {
    config: PluginConfig,
    renderer: Arc<MessageRenderer>,
    transport: Box<dyn WebhookTransport>,
}

impl Notifier {
    /// Create a notifier delivering over HTTP.
    ///
    /// The webhook URL is checked on each delivery rather than here, so a
    /// misconfigured URL surfaces as `InvalidUrl` from `notify`.
    pub fn new(config: PluginConfig) -> NotifyResult<Self> {
        let transport = HttpTransport::new(config.proxy.as_ref(), config.timeout())?;
        Ok(Self::with_transport(
            config,
            MessageRenderer::shared()?,
            Box::new(transport),
        ))
    }

    /// Create a notifier with an explicit renderer and transport.
    pub fn with_transport(
        config: PluginConfig,
        renderer: Arc<MessageRenderer>,
        transport: Box<dyn WebhookTransport>,
    ) -> Self {
        Self {
            config,
            renderer,
            transport,
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Send a notification for a job-lifecycle event.
    ///
    /// Returns `Ok(true)` when the webhook answered `ok`. Unknown triggers are
    /// rejected before anything is rendered or sent.
    pub fn notify(
        &self,
        trigger: &str,
        execution_data: &Map<String, Value>,
        config: &Map<String, Value>,
    ) -> NotifyResult<bool> {
        let trigger: Trigger = trigger.parse()?;
        let payload = self
            .renderer
            .render_trigger(trigger, execution_data, config, &self.config)?;

        let started = Instant::now();
        let response = client::deliver(self.transport.as_ref(), &self.config.webhook_url, &payload)?;
        tracing::debug!(
            "Webhook delivery for {} trigger returned HTTP {} in {}ms",
            trigger,
            response.status,
            started.elapsed().as_millis()
        );

        classify(response, payload)
    }

    /// Send a notification described by a host request.
    pub fn notify_request(&self, request: &NotificationRequest) -> NotifyResult<bool> {
        self.notify(&request.trigger, &request.execution_data, &request.config)
    }

    /// Send a sample `success` notification and report how it went.
    ///
    /// Never fails; problems are reported in the result.
    pub fn send_test(&self) -> WebhookTestResult {
        let execution_data = test_execution_data();
        let start = Instant::now();
        let outcome = self.notify(Trigger::Success.as_str(), &execution_data, &Map::new());
        let latency_ms = Some(start.elapsed().as_millis() as u32);

        match outcome {
            Ok(success) => WebhookTestResult {
                success,
                latency_ms,
                error: None,
            },
            Err(e) => WebhookTestResult {
                success: false,
                latency_ms,
                error: Some(e.to_string()),
            },
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("icon_url", &self.config.icon_url())
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

/// Only a literal `ok` body counts as delivered.
fn classify(response: WebhookResponse, payload: String) -> NotifyResult<bool> {
    if response.is_accepted() {
        return Ok(true);
    }
    Err(NotifyError::DeliveryRejected {
        status: response.status,
        body: response.body,
        payload,
    })
}

fn test_execution_data() -> Map<String, Value> {
    let data = json!({
        "id": 0,
        "href": "",
        "project": "notifier-test",
        "user": MESSAGE_FROM_NAME,
        "job": {
            "name": "Test notification",
            "href": "",
        },
    });
    match data {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
