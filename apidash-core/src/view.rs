use chrono::Utc;

use crate::backend::ApiBackend;
use crate::model::{FetchState, Snapshot};

/// The status view: one fetch lifecycle over two endpoints.
///
/// On activation the caller runs `load()` once; afterwards the only way
/// to start a new cycle is `retry()`, which the UI offers while the
/// state is `Error`. `load()` borrows the view mutably, so two cycles
/// can never overlap and the last-write-wins race of overlapping
/// cycles cannot occur.
#[derive(Debug)]
pub struct StatusView<B: ApiBackend> {
    backend: B,
    state: FetchState,
}

impl<B: ApiBackend> StatusView<B> {
    /// A fresh view is already in `Loading`: activation is expected to
    /// run `load()` immediately.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: FetchState::Loading,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Retry is only offered while the last cycle failed.
    pub fn can_retry(&self) -> bool {
        matches!(self.state, FetchState::Error(_))
    }

    /// Run one fetch cycle. Clears any prior error, issues both
    /// requests concurrently, waits for both to settle, then installs
    /// the outcome exactly once. Failure of either endpoint fails the
    /// whole cycle; data from the other endpoint is discarded.
    pub async fn load(&mut self) {
        self.state = FetchState::Loading;

        self.state = match run_cycle(&self.backend).await {
            Ok(snapshot) => FetchState::Ready(snapshot),
            Err(err) => FetchState::Error(format!("{err:#}")),
        };
    }

    /// Re-run the full cycle, with no memory of prior attempts.
    pub async fn retry(&mut self) {
        self.load().await;
    }
}

/// Both requests are issued before either is awaited; the cycle
/// resolves only once both have settled.
async fn run_cycle<B: ApiBackend>(backend: &B) -> anyhow::Result<Snapshot> {
    let (info, days) = tokio::join!(backend.fetch_info(), backend.fetch_forecast());

    let info = info?;
    let days = days?;

    Ok(Snapshot {
        info,
        days,
        fetched_at: Utc::now(),
    })
}
