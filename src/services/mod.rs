//! Services
//!
//! Notification delivery services.

pub mod webhook;

pub use webhook::{MessageRenderer, Notifier};
