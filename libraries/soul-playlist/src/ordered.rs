//! Ordered resolver
//!
//! Adapts an async [`TrackSource`] to the [`Resolver`] contract. Lookups run
//! concurrently on a tokio runtime, but results under the same order key are
//! delivered strictly in submission order.

use crate::config::LoaderConfig;
use crate::resolver::{ResolveOutcome, Resolver, ResultHandler};
use crate::types::PlayableTrack;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::warn;

/// Message reported for a lookup that ran past the configured timeout
pub const TIMEOUT_MESSAGE: &str = "resolution timed out";

/// Async lookup backend (network fetch, search, local library...)
#[async_trait]
pub trait TrackSource: Send + Sync + 'static {
    type Track: PlayableTrack;

    async fn lookup(&self, reference: &str) -> ResolveOutcome<Self::Track>;
}

/// FIFO-per-key resolver over a [`TrackSource`]
pub struct OrderedResolver<S> {
    source: Arc<S>,
    runtime: Handle,
    timeout: Option<Duration>,
    // Delivery signal of the most recent submission for each key
    tails: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl<S: TrackSource> OrderedResolver<S> {
    /// Create a resolver with no lookup timeout
    pub fn new(source: S, runtime: Handle) -> Self {
        Self {
            source: Arc::new(source),
            runtime,
            timeout: None,
            tails: Mutex::new(HashMap::new()),
        }
    }

    /// Create a resolver using the configured lookup timeout
    pub fn from_config(source: S, runtime: Handle, config: &LoaderConfig) -> Self {
        Self::new(source, runtime).with_timeout(config.resolve_timeout())
    }

    /// Report lookups that take longer than `timeout` as failed
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Number of keys that still have undelivered results
    pub fn pending_keys(&self) -> usize {
        let mut tails = self.tails.lock().unwrap_or_else(PoisonError::into_inner);
        prune_delivered(&mut tails);
        tails.len()
    }
}

impl<S: TrackSource> Resolver<S::Track> for OrderedResolver<S> {
    fn submit(&self, order_key: &str, reference: &str, handler: ResultHandler<S::Track>) {
        let (delivered_tx, delivered_rx) = oneshot::channel();
        let previous = {
            let mut tails = self.tails.lock().unwrap_or_else(PoisonError::into_inner);
            prune_delivered(&mut tails);
            tails.insert(order_key.to_string(), delivered_rx)
        };

        let source = Arc::clone(&self.source);
        let reference = reference.to_string();
        let timeout = self.timeout;

        self.runtime.spawn(async move {
            let outcome = match timeout {
                Some(limit) => match tokio::time::timeout(limit, source.lookup(&reference)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!("Lookup of {} timed out after {:?}", reference, limit);
                        ResolveOutcome::Failed(TIMEOUT_MESSAGE.to_string())
                    }
                },
                None => source.lookup(&reference).await,
            };

            // A dropped sender (panicking handler) still releases the next item
            if let Some(previous) = previous {
                let _ = previous.await;
            }

            handler(outcome);
            let _ = delivered_tx.send(());
        });
    }
}

fn prune_delivered(tails: &mut HashMap<String, oneshot::Receiver<()>>) {
    tails.retain(|_, tail| matches!(tail.try_recv(), Err(oneshot::error::TryRecvError::Empty)));
}
