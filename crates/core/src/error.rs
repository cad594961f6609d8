//! Notifier Error Types
//!
//! Every failure the notifier can produce. Errors are returned to the caller
//! rather than logged here: the host decides how to surface them.

use thiserror::Error;

/// Error type for a single notification attempt.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The trigger name is not one of `start`, `success` or `failure`
    #[error("Unknown trigger type: [{0}].")]
    UnknownTrigger(String),

    /// The named message template could not be located or compiled
    #[error("Error loading notification message template: [{0}].")]
    TemplateLoad(String),

    /// Expanding the template against the render model failed
    #[error("Error merging notification message template: [{0}].")]
    TemplateRender(String),

    /// The configured webhook URL is not a valid HTTP/HTTPS URL
    #[error("Webhook URL is malformed: [{0}].")]
    InvalidUrl(String),

    /// The POST could not be sent (DNS, connect, TLS, write, timeout)
    #[error("Error sending data to webhook URL: [{0}].")]
    Connection(String),

    /// The response arrived but its body could not be read
    #[error("Error reading webhook response: [{0}].")]
    ResponseRead(String),

    /// The endpoint answered with something other than `ok`
    #[error("Unknown status returned from webhook (HTTP {status}): [{body}].\n{payload}")]
    DeliveryRejected {
        status: u16,
        body: String,
        payload: String,
    },

    /// Setup-time configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for notifier errors
pub type NotifyResult<T> = Result<T, NotifyError>;

impl NotifyError {
    /// Create an unknown trigger error
    pub fn unknown_trigger(trigger: impl Into<String>) -> Self {
        Self::UnknownTrigger(trigger.into())
    }

    /// Create a template load error
    pub fn template_load(msg: impl Into<String>) -> Self {
        Self::TemplateLoad(msg.into())
    }

    /// Create a template render error
    pub fn template_render(msg: impl Into<String>) -> Self {
        Self::TemplateRender(msg.into())
    }

    /// Create an invalid URL error
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from the network rather than from input or setup.
    ///
    /// Hosts that wrap the notifier in their own retry loop can use this;
    /// the notifier itself never retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::ResponseRead(_))
    }
}

/// Convert NotifyError to a string
impl From<NotifyError> for String {
    fn from(err: NotifyError) -> String {
        err.to_string()
    }
}
