//! Batch-processing entry point wiring aggregate → render → deliver.

pub mod options;
pub mod worker;

pub use options::{ConfigError, SinkOptions};
pub use worker::SinkHandle;

use thiserror::Error;
use tracing::{debug, info};

use crate::aggregate::EventAggregator;
use crate::card::CardRenderer;
use crate::domain::LogEvent;
use crate::sender::{DeliveryError, WebhookClient};

/// Top-level error type for the sink pipeline.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Sink worker is no longer running")]
    WorkerStopped,
}

/// What one `process_batch` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub events_seen: usize,
    pub groups: usize,
    pub cards_delivered: usize,
}

/// Forwards batches of log events to a webhook endpoint as notification
/// cards.
///
/// The sink itself has no scheduler: an external harness (or the worker
/// spawned via [`CardSink::spawn`]) decides when a batch is due and calls
/// [`CardSink::process_batch`].
#[derive(Debug)]
pub struct CardSink {
    options: SinkOptions,
    aggregator: EventAggregator,
    renderer: CardRenderer,
    client: WebhookClient,
}

impl CardSink {
    /// Validate the options and acquire the connection resources. The
    /// HTTP client lives as long as the sink.
    pub fn new(mut options: SinkOptions) -> Result<Self, SinkError> {
        options.post_process();
        options.validate()?;

        let client = WebhookClient::new(&options.webhook_url, options.proxy_url.as_deref())?;
        let aggregator = EventAggregator::new(options.minimum_level);
        let renderer = CardRenderer::new(
            options.title.clone(),
            options.omit_properties_section,
            options.formatter.clone(),
        );

        Ok(Self {
            options,
            aggregator,
            renderer,
            client,
        })
    }

    pub fn options(&self) -> &SinkOptions {
        &self.options
    }

    /// Process one batch: aggregate, render, then deliver one card per
    /// distinct group, sequentially in aggregation order.
    ///
    /// The first delivery failure aborts the remainder of the batch and
    /// surfaces to the caller, which owns retry/drop policy. Already-sent
    /// cards stay sent.
    pub async fn process_batch(&self, events: Vec<LogEvent>) -> Result<BatchReport, SinkError> {
        let events_seen = events.len();
        let groups = self.aggregator.aggregate(events);
        let group_count = groups.len();

        let mut cards_delivered = 0;
        for aggregated in &groups {
            let card = self.renderer.render(aggregated);
            let receipt = self.client.post_card(&card).await?;
            cards_delivered += 1;
            debug!(
                group_key = aggregated.event().group_key(),
                status = receipt.status_code,
                "card delivered"
            );
        }

        info!(events_seen, groups = group_count, cards_delivered, "batch processed");
        Ok(BatchReport {
            events_seen,
            groups: group_count,
            cards_delivered,
        })
    }

    /// Hand the sink to a background worker that batches incoming events
    /// by size and flush period.
    pub fn spawn(self) -> SinkHandle {
        worker::spawn(self)
    }
}
