use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::LogEvent;

use super::{CardSink, SinkError};

/// Handle to a running sink worker.
///
/// Producers hand events to [`SinkHandle::emit`] without blocking; the
/// worker flushes them when the batch size limit or the flush period is
/// reached. [`SinkHandle::shutdown`] flushes what is queued and releases
/// the sink's connection resources.
#[derive(Debug)]
pub struct SinkHandle {
    event_tx: mpsc::UnboundedSender<LogEvent>,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl SinkHandle {
    /// Queue one event. Never blocks the producer.
    pub fn emit(&self, event: LogEvent) -> Result<(), SinkError> {
        self.event_tx
            .send(event)
            .map_err(|_| SinkError::WorkerStopped)
    }

    /// Stop the worker gracefully: final flush, then teardown.
    pub async fn shutdown(self) -> Result<(), SinkError> {
        info!("Initiating sink shutdown");
        self.cancel.cancel();
        drop(self.event_tx);
        self.join.await.map_err(|_| SinkError::WorkerStopped)?;
        info!("Sink shutdown completed");
        Ok(())
    }
}

pub(super) fn spawn(sink: CardSink) -> SinkHandle {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let join = tokio::spawn(run_flush_loop(sink, event_rx, cancel.clone()));

    SinkHandle {
        event_tx,
        cancel,
        join,
    }
}

/// Main worker loop: queue → flush on size, period, or shutdown.
///
/// Batches never overlap: a new flush starts only after the previous
/// `process_batch` returned.
async fn run_flush_loop(
    sink: CardSink,
    mut event_rx: mpsc::UnboundedReceiver<LogEvent>,
    cancel: CancellationToken,
) {
    let batch_size = sink.options().batch_size;
    let flush_interval = sink.options().flush_interval;

    info!(batch_size, ?flush_interval, "Sink worker started");

    let mut ticker = tokio::time::interval(flush_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut pending: Vec<LogEvent> = Vec::with_capacity(batch_size);

    loop {
        tokio::select! {
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(event) => {
                        pending.push(event);
                        if pending.len() >= batch_size {
                            flush(&sink, &mut pending).await;
                        }
                    }
                    // All producers dropped their handles.
                    None => {
                        flush(&sink, &mut pending).await;
                        break;
                    }
                }
            }

            _ = ticker.tick() => {
                flush(&sink, &mut pending).await;
            }

            _ = cancel.cancelled() => {
                // Drain whatever producers managed to queue before the
                // cancellation, then flush once.
                while let Ok(event) = event_rx.try_recv() {
                    pending.push(event);
                }
                flush(&sink, &mut pending).await;
                break;
            }
        }
    }

    info!("Sink worker stopped");
}

/// Flush the accumulated events as one batch.
///
/// This harness does not retry: a failed batch is self-logged and
/// dropped, keeping the queue bounded.
async fn flush(sink: &CardSink, pending: &mut Vec<LogEvent>) {
    if pending.is_empty() {
        return;
    }

    let batch_id = Uuid::new_v4();
    let events = std::mem::take(pending);
    let event_count = events.len();

    match sink.process_batch(events).await {
        Ok(report) => {
            info!(
                %batch_id,
                events = report.events_seen,
                cards = report.cards_delivered,
                "Flushed batch"
            );
        }
        Err(e) => {
            error!(%batch_id, events = event_count, "Failed to deliver batch, dropping it: {e}");
        }
    };
}
