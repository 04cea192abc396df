//! Webhook delivery: card serialization and the HTTP POST path.

pub mod client;

pub use client::{DeliveryError, DeliveryReceipt, WebhookClient};
