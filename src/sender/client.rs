use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder, Proxy};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::card::MessageCard;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Failed to encode card: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Webhook returned HTTP {status}")]
    DeliveryFailed { status: u16 },
}

/// Outcome of one successful card delivery.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub status_code: u16,
    pub latency: Duration,
    pub bytes_sent: usize,
}

/// HTTP client bound to one webhook endpoint.
///
/// The underlying connection pool is acquired once per sink instance and
/// reused for every POST; it is released when the sink shuts down.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    endpoint: Url,
}

impl WebhookClient {
    /// Build the client, routing through `proxy` when one is configured.
    /// A blank or whitespace-only proxy value counts as absent.
    ///
    /// Timeout semantics are the transport's defaults; no extra layer is
    /// imposed here.
    pub fn new(endpoint: &str, proxy: Option<&str>) -> Result<Self, DeliveryError> {
        let endpoint: Url = endpoint.parse().map_err(|e| {
            DeliveryError::InvalidConfiguration(format!("invalid webhook URL '{endpoint}': {e}"))
        })?;

        let mut builder = ClientBuilder::new()
            .user_agent(concat!("teams-card-sink/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy) = proxy.map(str::trim).filter(|p| !p.is_empty()) {
            let parsed = Proxy::all(proxy).map_err(|e| {
                DeliveryError::InvalidConfiguration(format!("invalid proxy URL '{proxy}': {e}"))
            })?;
            builder = builder.proxy(parsed);
        }

        let client = builder.build().map_err(|e| {
            DeliveryError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// POST one card as a UTF-8 JSON body.
    ///
    /// A non-success status is a hard failure carrying the received code;
    /// retry policy belongs to the caller.
    pub async fn post_card(&self, card: &MessageCard) -> Result<DeliveryReceipt, DeliveryError> {
        let body = serde_json::to_vec(card)?;
        let bytes_sent = body.len();

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .await?;
        let latency = start.elapsed();

        let status = response.status();
        if status.is_success() {
            debug!(
                status = status.as_u16(),
                bytes_sent,
                latency_ms = latency.as_millis() as u64,
                "delivered card"
            );
            Ok(DeliveryReceipt {
                status_code: status.as_u16(),
                latency,
                bytes_sent,
            })
        } else {
            warn!(status = status.as_u16(), "webhook rejected card");
            Err(DeliveryError::DeliveryFailed {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint_is_rejected_at_construction() {
        let result = WebhookClient::new("not a url", None);
        assert!(matches!(
            result,
            Err(DeliveryError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_proxy_is_rejected_at_construction() {
        let result = WebhookClient::new("https://example.com/hook", Some("::bad::"));
        assert!(matches!(
            result,
            Err(DeliveryError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_whitespace_proxy_counts_as_absent() {
        let client = WebhookClient::new("https://example.com/hook", Some("   "));
        assert!(client.is_ok());
    }
}
