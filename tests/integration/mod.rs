//! Integration Tests Module
//!
//! End-to-end tests for the notifier against a mock webhook endpoint.

// Delivery and outcome classification over real HTTP
mod notify_test;

// Rendered payload shape through the public API
mod payload_test;
