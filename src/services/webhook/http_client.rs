//! HTTP Client Factory
//!
//! Builds the blocking reqwest client used for webhook delivery.

use std::time::Duration;

use mattermost_notifier_core::{NotifyError, NotifyResult, ProxyConfig};

/// Build a blocking `reqwest` client with the resolved proxy configuration.
///
/// - `Some(proxy)` -> route every request through the proxy
/// - `None` -> explicitly disable proxying (`no_proxy`), ignoring env vars
///
/// `timeout` of `None` means the call may block for as long as the endpoint
/// takes; callers wanting a deadline configure one.
pub fn build_http_client(
    proxy: Option<&ProxyConfig>,
    timeout: Option<Duration>,
) -> NotifyResult<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder().timeout(timeout);
    match proxy {
        Some(cfg) => {
            let mut p = reqwest::Proxy::all(cfg.url())
                .map_err(|e| NotifyError::config(format!("Invalid proxy URL: {}", e)))?;
            if let Some((user, password)) = cfg.credentials() {
                p = p.basic_auth(user, password);
            }
            builder = builder.proxy(p);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    builder
        .build()
        .map_err(|e| NotifyError::config(format!("Failed to build HTTP client: {}", e)))
}
