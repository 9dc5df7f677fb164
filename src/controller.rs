use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::FetchError;
use crate::models::{FetchState, Quotation};
use crate::transport::QuoteTransport;

/// Automatic retries after the initial attempt, so at most 4 requests per cycle.
const MAX_RETRIES: u32 = 3;

/// Fixed wait between failed attempts. No backoff, no jitter.
const RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Owns the fetch lifecycle: triggers the initial load, applies the bounded
/// retry policy, and exposes the resulting [`FetchState`] to a presentation
/// layer through a watch channel.
///
/// Each call to [`start`](Self::start) or [`refresh`](Self::refresh) opens a
/// new cycle identified by a generation token. Every state write made by a
/// cycle carries its token and is discarded once a newer cycle has begun, so
/// a stale delayed retry can never overwrite fresher state. The superseded
/// cycle's task is also aborted so its timer stops ticking.
pub struct QuoteFetchController<T: QuoteTransport> {
    inner: Arc<Inner<T>>,
    cycle: Mutex<Option<JoinHandle<()>>>,
}

struct Inner<T> {
    transport: T,
    endpoint: String,
    generation: AtomicU64,
    state: watch::Sender<FetchState>,
}

impl<T: QuoteTransport> QuoteFetchController<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        let (state, _) = watch::channel(FetchState::loading());

        Self {
            inner: Arc::new(Inner {
                transport,
                endpoint: endpoint.into(),
                generation: AtomicU64::new(0),
                state,
            }),
            cycle: Mutex::new(None),
        }
    }

    /// Kick off the initial fetch cycle. Call once after construction.
    pub fn start(&self) {
        info!("Starting initial quotation fetch");
        self.begin_cycle();
    }

    /// User-invoked re-trigger: opens a fresh cycle with the attempt counter
    /// back at zero, superseding any pending retry from a previous cycle.
    pub fn refresh(&self) {
        info!("Fetching a new quotation");
        self.begin_cycle();
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState {
        self.inner.state.borrow().clone()
    }

    /// Receiver for the presentation layer to observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.inner.state.subscribe()
    }

    fn begin_cycle(&self) {
        // Token allocation happens under the cycle lock so two racing
        // refreshes cannot abort each other's task out of order.
        let mut cycle = self.cycle.lock().expect("cycle handle lock poisoned");
        let token = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = cycle.take() {
            previous.abort();
        }

        self.inner.publish(token, FetchState::loading());
        *cycle = Some(tokio::spawn(self.inner.clone().run_cycle(token)));
    }
}

impl<T: QuoteTransport> Drop for QuoteFetchController<T> {
    // Teardown must not leave a retry timer that applies a result later.
    fn drop(&mut self) {
        if let Ok(mut cycle) = self.cycle.lock()
            && let Some(handle) = cycle.take()
        {
            handle.abort();
        }
    }
}

impl<T: QuoteTransport> Inner<T> {
    async fn run_cycle(self: Arc<Self>, token: u64) {
        for attempt in 0..=MAX_RETRIES {
            if !self.is_current(token) {
                return;
            }
            let attempts_made = attempt + 1;
            self.record_attempt(token, attempts_made);

            match self.fetch_once().await {
                Ok(quotation) => {
                    info!("Quotation received from {}", quotation.author);
                    self.publish(token, FetchState::ready(quotation, attempts_made));
                    return;
                }
                Err(err) if attempt < MAX_RETRIES => {
                    warn!(
                        "Attempt {} failed ({}), retrying in {}ms",
                        attempts_made,
                        err,
                        RETRY_DELAY.as_millis()
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => {
                    error!("Giving up after {} attempts: {}", attempts_made, err);
                    self.publish(
                        token,
                        FetchState::failed("Failed to fetch quote. Please try again.", attempts_made),
                    );
                }
            }
        }
    }

    /// One GET plus the status and shape checks; never touches shared state.
    async fn fetch_once(&self) -> Result<Quotation, FetchError> {
        let response = self.transport.fetch(&self.endpoint).await?;

        if !(200..300).contains(&response.status) {
            return Err(FetchError::Status(response.status));
        }

        let quotation: Quotation = serde_json::from_str(&response.body)?;
        if quotation.text.is_empty() || quotation.author.is_empty() {
            return Err(FetchError::MalformedResponse(
                "quotation text or author is empty".to_string(),
            ));
        }

        Ok(quotation)
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Replace the state wholesale, unless a newer cycle has begun. The token
    /// check runs under the watch lock so a stale cycle cannot interleave
    /// with a newer cycle's write.
    fn publish(&self, token: u64, state: FetchState) {
        self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) == token {
                *current = state;
                true
            } else {
                false
            }
        });
    }

    /// Bump the attempt counter without leaving `Loading`; intermediate
    /// attempts never surface as failures.
    fn record_attempt(&self, token: u64, attempts_made: u32) {
        self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) == token {
                *current = current.clone().with_attempt_count(attempts_made);
                true
            } else {
                false
            }
        });
    }
}
