//! Awaitable, cancellable content generation.
//!
//! A session holds at most one in-flight generation. A new request aborts
//! the previous one, so only the most recent request can ever deliver
//! content; a completion that lost the race reports itself as superseded.

use crate::generator::{ContentGenerator, GeneratedContent};
use insights_core::{ContentChannel, Customer, InsightsError, InsightsResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    abort: AbortHandle,
}

#[derive(Debug)]
pub struct GenerationSession {
    generator: Arc<ContentGenerator>,
    latest: Arc<AtomicU64>,
    inflight: Mutex<Option<InFlight>>,
}

impl GenerationSession {
    pub fn new(generator: Arc<ContentGenerator>) -> Self {
        Self {
            generator,
            latest: Arc::new(AtomicU64::new(0)),
            inflight: Mutex::new(None),
        }
    }

    /// Start generating content, superseding whatever is still running.
    /// Must be called from within a tokio runtime.
    pub fn request(&self, customer: &Customer, channel: ContentChannel) -> PendingGeneration {
        self.request_then(customer, channel, |_, _| {})
    }

    /// Like [`request`](Self::request), but `on_ready` runs inside the
    /// generation task with the ticket and content as soon as rendering
    /// finishes, whether or not anyone is still waiting on the result.
    /// It does not run for an aborted generation.
    pub fn request_then<F>(
        &self,
        customer: &Customer,
        channel: ContentChannel,
        on_ready: F,
    ) -> PendingGeneration
    where
        F: FnOnce(u64, &GeneratedContent) + Send + 'static,
    {
        let generator = self.generator.clone();
        let customer = customer.clone();
        let customer_id = customer.id;

        // Ticket allocation and replacement happen under one lock so ticket
        // order always matches supersession order.
        let mut inflight = self.inflight.lock();
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = tokio::spawn(async move {
            let content = generator.generate(&customer, channel).await;
            on_ready(ticket, &content);
            content
        });
        let previous = inflight.replace(InFlight {
            ticket,
            abort: handle.abort_handle(),
        });
        drop(inflight);

        if let Some(previous) = previous {
            if !previous.abort.is_finished() {
                previous.abort.abort();
                metrics::counter!("content.superseded").increment(1);
                debug!(
                    superseded = previous.ticket,
                    ticket,
                    "Superseded in-flight generation"
                );
            }
        }

        debug!(ticket, customer_id, channel = channel.as_str(), "Generation requested");

        PendingGeneration {
            ticket,
            handle,
            latest: self.latest.clone(),
        }
    }

    /// Abort the in-flight generation, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        match self.inflight.lock().take() {
            Some(inflight) if !inflight.abort.is_finished() => {
                inflight.abort.abort();
                debug!(ticket = inflight.ticket, "Generation cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inflight
            .lock()
            .as_ref()
            .is_some_and(|inflight| !inflight.abort.is_finished())
    }

    /// Ticket of the most recent request; 0 before the first one.
    pub fn latest_ticket(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Handle to one requested generation.
pub struct PendingGeneration {
    ticket: u64,
    handle: JoinHandle<GeneratedContent>,
    latest: Arc<AtomicU64>,
}

impl PendingGeneration {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::SeqCst) > self.ticket
    }

    /// Wait for the content. Fails with `GenerationSuperseded` when a newer
    /// request replaced this one, or `GenerationCancelled` when it was
    /// cancelled outright.
    pub async fn wait(mut self) -> InsightsResult<GeneratedContent> {
        let joined = (&mut self.handle).await;
        match joined {
            Ok(_) if self.is_superseded() => Err(InsightsError::GenerationSuperseded),
            Ok(content) => {
                metrics::counter!("content.generated", "channel" => content.channel.as_str())
                    .increment(1);
                Ok(content)
            }
            Err(e) if e.is_cancelled() => {
                if self.is_superseded() {
                    Err(InsightsError::GenerationSuperseded)
                } else {
                    Err(InsightsError::GenerationCancelled)
                }
            }
            Err(e) => Err(InsightsError::Internal(anyhow::anyhow!(
                "generation task failed: {e}"
            ))),
        }
    }
}
