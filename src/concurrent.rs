use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::classify::{classify, Verdict};
use crate::config::RunConfig;
use crate::probe::{probe, ProbeRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Dispatching,
    Draining,
    Done,
}

/// Counters for one dispatch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// |urls| x |payloads|
    pub planned: usize,
    pub dispatched: usize,
    /// Pairs never launched, because of early exit or cancellation.
    pub skipped: usize,
    pub completed: usize,
    pub vulnerable: usize,
    pub errors: usize,
    /// Tasks that panicked and produced no verdict.
    pub panicked: usize,
}

#[derive(Default)]
struct Counters {
    completed: AtomicUsize,
    vulnerable: AtomicUsize,
    errors: AtomicUsize,
}

/// Fans out one probe task per (URL, payload) pair and forwards every verdict
/// to a channel.
pub struct Dispatcher {
    client: Client,
    config: Arc<RunConfig>,
    limit: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
}

impl Dispatcher {
    pub fn new(client: Client, config: Arc<RunConfig>) -> Self {
        let limit = config.concurrency.map(|n| Arc::new(Semaphore::new(n)));
        Self { client, config, limit, cancel: CancellationToken::new() }
    }

    /// Token that stops further launches when cancelled. Probes already in
    /// flight are never aborted.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Probe the full cross product in URL-major, payload-minor launch order.
    /// Verdicts arrive on `tx` in completion order. Returns once every launched
    /// task has finished; `tx` is dropped by then, so the receiver sees the
    /// channel close right after the last verdict.
    pub async fn run(&self, urls: &[String], payloads: &[String], tx: mpsc::Sender<Verdict>) -> DispatchSummary {
        let mut state = DispatchState::Idle;
        let planned = urls.len() * payloads.len();
        let counters = Arc::new(Counters::default());
        let cookie: Option<Arc<str>> = self.config.cookie.as_deref().map(Arc::from);
        let payloads: Vec<Arc<str>> = payloads.iter().map(|p| Arc::from(p.as_str())).collect();

        let mut tasks = FuturesUnordered::new();
        let mut dispatched = 0usize;

        state = self.transition(state, DispatchState::Dispatching, planned, dispatched);

        'urls: for (url_index, url) in urls.iter().enumerate() {
            let url: Arc<str> = Arc::from(url.as_str());
            let found = Arc::new(AtomicBool::new(false));

            for (payload_index, payload) in payloads.iter().enumerate() {
                let permit = match self.acquire().await {
                    Some(p) => p,
                    None => {
                        tracing::warn!(dispatched, "dispatch cancelled, waiting for in-flight probes");
                        break 'urls;
                    }
                };

                if self.config.early_exit && found.load(Ordering::Acquire) {
                    tracing::debug!(url = %url, skipped = payloads.len() - payload_index, "early exit, remaining payloads skipped");
                    continue 'urls;
                }

                let request = ProbeRequest {
                    url_index,
                    payload_index,
                    url: url.clone(),
                    payload: payload.clone(),
                    cookie: cookie.clone(),
                };
                tracing::debug!(url_index, payload_index, "launching probe");

                let client = self.client.clone();
                let config = self.config.clone();
                let found = found.clone();
                let counters = counters.clone();
                let tx = tx.clone();

                tasks.push(tokio::spawn(async move {
                    let outcome = probe(&client, &request, config.send_cookie).await;
                    let verdict = classify(&outcome, &config);

                    if verdict.vulnerable {
                        found.store(true, Ordering::Release);
                        counters.vulnerable.fetch_add(1, Ordering::Relaxed);
                    }
                    if verdict.is_error() {
                        counters.errors.fetch_add(1, Ordering::Relaxed);
                    }
                    counters.completed.fetch_add(1, Ordering::Relaxed);

                    // Receiver gone means nobody is listening any more; the verdict is dropped.
                    let _ = tx.send(verdict).await;
                    drop(permit); // Release semaphore
                }));
                dispatched += 1;
            }
        }
        drop(tx);

        state = self.transition(state, DispatchState::Draining, planned, dispatched);

        let mut panicked = 0usize;
        while let Some(joined) = tasks.next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "probe task failed");
                panicked += 1;
            }
        }

        let summary = DispatchSummary {
            planned,
            dispatched,
            skipped: planned - dispatched,
            completed: counters.completed.load(Ordering::Relaxed),
            vulnerable: counters.vulnerable.load(Ordering::Relaxed),
            errors: counters.errors.load(Ordering::Relaxed),
            panicked,
        };
        self.transition(state, DispatchState::Done, planned, dispatched);
        summary
    }

    /// Run and collect every verdict in completion order.
    pub async fn run_collect(&self, urls: &[String], payloads: &[String]) -> (DispatchSummary, Vec<Verdict>) {
        let (tx, mut rx) = mpsc::channel::<Verdict>(1024);
        let collector = async move {
            let mut out = Vec::new();
            while let Some(v) = rx.recv().await {
                out.push(v);
            }
            out
        };
        tokio::join!(self.run(urls, payloads, tx), collector)
    }

    /// `Some(None)` when unbounded, `None` when cancelled.
    async fn acquire(&self) -> Option<Option<OwnedSemaphorePermit>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        match &self.limit {
            None => Some(None),
            Some(sem) => tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                permit = sem.clone().acquire_owned() => permit.ok().map(Some),
            },
        }
    }

    fn transition(&self, from: DispatchState, to: DispatchState, planned: usize, dispatched: usize) -> DispatchState {
        tracing::info!(?from, ?to, planned, dispatched, "dispatcher state");
        to
    }
}
