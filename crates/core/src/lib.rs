//! Mattermost Notifier Core
//!
//! Foundational types for the notifier workspace. This crate has no
//! dependencies on HTTP, templating or any other I/O-level code.
//!
//! ## Module Organization
//!
//! - `error` - Error taxonomy (`NotifyError`, `NotifyResult`)
//! - `trigger` - Recognized job-lifecycle triggers and their message styles
//! - `proxy` - Proxy configuration data types used by the HTTP client factory

pub mod error;
pub mod proxy;
pub mod trigger;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{NotifyError, NotifyResult};

// ── Trigger Styles ─────────────────────────────────────────────────────
pub use trigger::{MessageColor, Trigger, TriggerStyle, MESSAGE_TEMPLATE};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
