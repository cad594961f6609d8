//! Plugin Configuration
//!
//! Setup-time settings for the notifier, supplied by the orchestration host
//! either as its plugin property map or as JSON.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mattermost_notifier_core::{NotifyError, NotifyResult, ProxyConfig};

use crate::services::webhook::client::parse_webhook_url;

/// Property key for the incoming-webhook URL (required).
pub const WEBHOOK_URL_PROPERTY: &str = "webhook_url";
/// Property key for the sender avatar URL (optional).
pub const ICON_URL_PROPERTY: &str = "icon_url";
/// Property key for the request timeout in seconds (optional).
pub const TIMEOUT_PROPERTY: &str = "timeout_secs";

/// Notifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Incoming-webhook URL. Its path is the only credential.
    pub webhook_url: String,
    /// Avatar shown next to messages; empty means "not set"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl PluginConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            icon_url: None,
            proxy: None,
            timeout_secs: None,
        }
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Icon URL, only when configured and non-empty.
    pub fn icon_url(&self) -> Option<&str> {
        self.icon_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.webhook_url.trim().is_empty() {
            return Err(format!("{} is required", WEBHOOK_URL_PROPERTY));
        }
        parse_webhook_url(&self.webhook_url).map_err(|e| e.to_string())?;

        if let Some(icon_url) = self.icon_url() {
            url::Url::parse(icon_url)
                .map_err(|e| format!("Invalid {}: {}", ICON_URL_PROPERTY, e))?;
        }

        if let Some(proxy) = &self.proxy {
            proxy.validate()?;
        }

        if self.timeout_secs == Some(0) {
            return Err(format!("{} must be at least 1 second", TIMEOUT_PROPERTY));
        }

        Ok(())
    }

    /// Build a configuration from the host's plugin property map.
    ///
    /// Blank optional properties are treated as unset.
    pub fn from_properties(properties: &HashMap<String, String>) -> NotifyResult<Self> {
        let property = |key: &str| {
            properties
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let webhook_url = property(WEBHOOK_URL_PROPERTY).ok_or_else(|| {
            NotifyError::config(format!("{} is required", WEBHOOK_URL_PROPERTY))
        })?;

        let timeout_secs = property(TIMEOUT_PROPERTY)
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    NotifyError::config(format!("Invalid {}: {} ({})", TIMEOUT_PROPERTY, raw, e))
                })
            })
            .transpose()?;

        let config = Self {
            webhook_url: webhook_url.to_string(),
            icon_url: property(ICON_URL_PROPERTY).map(str::to_string),
            proxy: None,
            timeout_secs,
        };
        config.validate().map_err(NotifyError::config)?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> NotifyResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| NotifyError::config(format!("Invalid configuration JSON: {}", e)))?;
        config.validate().map_err(NotifyError::config)?;
        Ok(config)
    }
}
