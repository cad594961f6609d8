//! Webhook Client
//!
//! Posts a rendered payload to an incoming-webhook URL as a form field and
//! hands back whatever the endpoint answered. Classifying that answer is the
//! caller's job.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use mattermost_notifier_core::{NotifyError, NotifyResult, ProxyConfig};

use super::http_client::build_http_client;
use super::types::WebhookResponse;

/// Content type of the request body. The endpoint reads the `payload` field.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Form field carrying the rendered message.
const PAYLOAD_FIELD: &str = "payload";

/// Transport seam between the notifier and the network.
///
/// `HttpTransport` is the real implementation; tests substitute their own.
pub trait WebhookTransport: Send + Sync {
    /// POST a form-encoded body and return the status and full response body.
    ///
    /// Non-2xx responses are not errors here; their bodies are returned like
    /// any other so the caller can report them.
    fn post_form(&self, url: &Url, body: String) -> NotifyResult<WebhookResponse>;
}

/// Webhook transport over a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(proxy: Option<&ProxyConfig>, timeout: Option<Duration>) -> NotifyResult<Self> {
        Ok(Self {
            client: build_http_client(proxy, timeout)?,
        })
    }
}

impl WebhookTransport for HttpTransport {
    fn post_form(&self, url: &Url, body: String) -> NotifyResult<WebhookResponse> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            // The URL path is the webhook secret; keep it out of messages.
            .map_err(|e| NotifyError::connection(describe(&e.without_url())))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .map_err(|e| NotifyError::ResponseRead(describe(&e.without_url())))?;

        Ok(WebhookResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Parse and check a webhook URL. Only `http` and `https` are accepted.
pub fn parse_webhook_url(raw: &str) -> NotifyResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| NotifyError::invalid_url(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(NotifyError::invalid_url(format!(
                "unsupported scheme '{}', expected http or https",
                other
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(NotifyError::invalid_url("URL has no host"));
    }
    Ok(url)
}

/// Encode the payload as the `payload` form field.
pub fn encode_form_body(payload: &str) -> String {
    format!("{}={}", PAYLOAD_FIELD, urlencoding::encode(payload))
}

/// Deliver a rendered payload to `webhook_url` through `transport`.
///
/// The URL is validated before the transport is touched.
pub fn deliver(
    transport: &dyn WebhookTransport,
    webhook_url: &str,
    payload: &str,
) -> NotifyResult<WebhookResponse> {
    let url = parse_webhook_url(webhook_url)?;
    transport.post_form(&url, encode_form_body(payload))
}

fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
