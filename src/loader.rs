//! Manifest loading with liveness-checked commits.
//!
//! [`PoemsLoader`] owns a single `watch` cell holding the [`LoadState`].
//! Each call to [`PoemsLoader::load`] spawns one fetch task carrying a
//! [`LoadToken`]. The task writes its result into the cell only if its token
//! is still live; starting another load, calling
//! [`PoemsLoader::teardown`] or dropping the loader revokes it. The check and
//! the revocation both happen under the cell's write lock, so a result either
//! lands before teardown or not at all. The HTTP request itself is left to
//! finish on its own.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;

use crate::client::ManifestClient;
use crate::manifest::{ManifestDocument, ManifestError, UNKNOWN_ERROR};
use crate::views::PoemsView;

/// Snapshot of the loader's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState {
    /// Last successfully loaded manifest
    pub data: Option<Arc<ManifestDocument>>,
    /// Message from the last failed load
    pub error: Option<String>,
    /// Whether a load is in flight
    pub loading: bool,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
        }
    }
}

impl LoadState {
    /// Apply the outcome of one load attempt
    fn apply(&mut self, result: Result<ManifestDocument, String>, keep_stale_on_error: bool) {
        match result {
            Ok(document) => {
                self.data = Some(Arc::new(document));
                self.error = None;
            }
            Err(message) => {
                if !keep_stale_on_error {
                    self.data = None;
                }
                self.error = Some(message);
            }
        }
        self.loading = false;
    }
}

/// Liveness flag shared between the loader and one load task
#[derive(Debug, Clone)]
struct LoadToken(Arc<AtomicBool>);

impl LoadToken {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Loads the poems manifest and publishes the resulting state
pub struct PoemsLoader {
    client: ManifestClient,
    state: Arc<watch::Sender<LoadState>>,
    current: Option<LoadToken>,
    keep_stale_on_error: bool,
    generation: u64,
}

impl PoemsLoader {
    /// Create a loader without starting a load
    pub fn new(client: ManifestClient, keep_stale_on_error: bool) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            client,
            state: Arc::new(state),
            current: None,
            keep_stale_on_error,
            generation: 0,
        }
    }

    /// Create a loader and start the first load. Must be called inside a tokio runtime.
    pub fn activate(client: ManifestClient, keep_stale_on_error: bool) -> Self {
        let mut loader = Self::new(client, keep_stale_on_error);
        loader.load();
        loader
    }

    pub fn client(&self) -> &ManifestClient {
        &self.client
    }

    /// Start a new load, invalidating any load still in flight
    pub fn load(&mut self) {
        self.revoke_current();

        let token = LoadToken::new();
        self.current = Some(token.clone());
        self.generation += 1;
        let generation = self.generation;

        self.state.send_modify(|s| s.loading = true);
        tracing::debug!("Starting manifest load #{}", generation);

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let keep_stale = self.keep_stale_on_error;

        tokio::spawn(run_load(
            async move { client.fetch_manifest().await },
            token,
            state,
            keep_stale,
            generation,
        ));
    }

    /// Stop accepting results from the load in flight, if any
    pub fn teardown(&mut self) {
        if self.current.is_some() {
            tracing::debug!("Tearing down manifest load #{}", self.generation);
        }
        self.revoke_current();
    }

    fn revoke_current(&mut self) {
        if let Some(token) = self.current.take() {
            // Revoke under the write lock so a concurrent commit can't straddle it
            self.state.send_if_modified(|_| {
                token.revoke();
                false
            });
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Current state
    pub fn snapshot(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Current state with derived views computed
    pub fn view(&self) -> PoemsView {
        PoemsView::from_state(&self.state.borrow())
    }

    /// Wait until no load is in flight and return the state at that point
    pub async fn settled(&self) -> LoadState {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| !s.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }
}

/// Await one fetch and commit its outcome if `token` is still live
async fn run_load<F>(
    fetch: F,
    token: LoadToken,
    state: Arc<watch::Sender<LoadState>>,
    keep_stale: bool,
    generation: u64,
) where
    F: Future<Output = Result<ManifestDocument, ManifestError>>,
{
    let result = match AssertUnwindSafe(fetch).catch_unwind().await {
        Ok(Ok(document)) => Ok(document),
        Ok(Err(e)) => {
            tracing::error!("Failed to load poems: {}", e);
            Err(e.user_message())
        }
        Err(_) => {
            tracing::error!("Manifest load #{} panicked", generation);
            Err(UNKNOWN_ERROR.to_string())
        }
    };

    let committed = state.send_if_modified(|s| {
        if !token.is_live() {
            return false;
        }
        s.apply(result, keep_stale);
        true
    });

    if !committed {
        tracing::debug!("Discarded stale result of manifest load #{}", generation);
    }
}

impl Drop for PoemsLoader {
    fn drop(&mut self) {
        self.teardown();
    }
}
