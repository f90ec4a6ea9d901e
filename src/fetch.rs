use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use instant::Instant;
use log::{debug, info};

use crate::error::LoadError;
use crate::graph::MappingGraph;
use crate::payload::TerminologyData;
use crate::source::MappingSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Graph,
    Stats,
}

/// Result of one background fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    Graph(MappingGraph),
    Stats(TerminologyData),
    Failed { kind: FetchKind, reason: LoadError },
}

/// Runs the graph and statistics fetches in the background.
///
/// Results are collected with [`Fetcher::poll`]. Once the fetcher is cancelled
/// or dropped, results that arrive later are discarded.
pub struct Fetcher {
    results: Receiver<FetchOutcome>,
    cancelled: Arc<AtomicBool>,
    done: bool,
}

impl Fetcher {
    pub fn start(source: Arc<dyn MappingSource>) -> Self {
        let (tx, rx) = unbounded();
        let cancelled = Arc::new(AtomicBool::new(false));

        info!("fetching mappings from {}", source.describe());
        for kind in [FetchKind::Graph, FetchKind::Stats] {
            spawn_job(kind, source.clone(), tx.clone(), cancelled.clone());
        }

        Self {
            results: rx,
            cancelled,
            done: false,
        }
    }

    /// Drains the results that arrived since the last call.
    pub fn poll(&mut self) -> Vec<FetchOutcome> {
        let mut res = Vec::new();
        if self.is_cancelled() {
            return res;
        }
        loop {
            match self.results.try_recv() {
                Ok(outcome) => res.push(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.done = true;
                    break;
                }
            }
        }
        res
    }

    /// All jobs have finished and their results were polled.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_job(kind: FetchKind, source: &dyn MappingSource) -> FetchOutcome {
    let start = Instant::now();
    let outcome = match kind {
        FetchKind::Graph => source.fetch_graph().map(FetchOutcome::Graph),
        FetchKind::Stats => source.fetch_stats().map(FetchOutcome::Stats),
    };
    debug!(
        "{kind:?} fetch finished in {:.1}ms",
        start.elapsed().as_secs_f32() * 1000.
    );
    outcome.unwrap_or_else(|reason| FetchOutcome::Failed { kind, reason })
}

fn deliver(
    kind: FetchKind,
    outcome: FetchOutcome,
    tx: &Sender<FetchOutcome>,
    cancelled: &AtomicBool,
) {
    if cancelled.load(Ordering::Acquire) {
        debug!("{kind:?} fetch resolved after cancellation, discarding");
        return;
    }
    if tx.send(outcome).is_err() {
        debug!("{kind:?} fetch resolved after the receiver was dropped");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_job(
    kind: FetchKind,
    source: Arc<dyn MappingSource>,
    tx: Sender<FetchOutcome>,
    cancelled: Arc<AtomicBool>,
) {
    let fallback = tx.clone();
    let spawned = std::thread::Builder::new()
        .name(format!("fetch-{kind:?}").to_lowercase())
        .spawn(move || {
            let outcome = run_job(kind, source.as_ref());
            deliver(kind, outcome, &tx, &cancelled);
        });
    if let Err(e) = spawned {
        log::warn!("failed to spawn {kind:?} fetch: {e}");
        let _ = fallback.send(FetchOutcome::Failed {
            kind,
            reason: LoadError::Cancelled,
        });
    }
}

// No threads on the web, the job runs to completion right away.
#[cfg(target_arch = "wasm32")]
fn spawn_job(
    kind: FetchKind,
    source: Arc<dyn MappingSource>,
    tx: Sender<FetchOutcome>,
    cancelled: Arc<AtomicBool>,
) {
    let outcome = run_job(kind, source.as_ref());
    deliver(kind, outcome, &tx, &cancelled);
}
