//! Dashboard Poller
//!
//! Fetches the dashboard once with a visible loading state, then refreshes
//! silently on a fixed interval until stopped. Stopping cancels the timer
//! task; there is no separate cancellation of an in-flight request.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::AdminApi;
use crate::dashboard::{DashboardState, RefreshKind, RefreshOutcome};
use crate::session::TokenStore;

/// Periodic dashboard refresher
pub struct DashboardPoller {
    api: Arc<dyn AdminApi>,
    tokens: Arc<dyn TokenStore>,
    interval: Duration,
    state: Arc<RwLock<DashboardState>>,
}

/// Handle to a running poller; stopping (or dropping) it cancels the timer
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancel the refresh loop
    pub fn stop(self) {
        self.task.abort();
    }

    /// Wait for the loop to end on its own (after a `Break` from the callback)
    pub async fn join(&mut self) {
        let _ = (&mut self.task).await;
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl DashboardPoller {
    pub fn new(api: Arc<dyn AdminApi>, tokens: Arc<dyn TokenStore>, interval: Duration) -> Self {
        Self {
            api,
            tokens,
            interval,
            state: Arc::new(RwLock::new(DashboardState::new())),
        }
    }

    /// Shared view state
    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        Arc::clone(&self.state)
    }

    /// Run a single refresh and apply its result
    pub async fn refresh(&self, kind: RefreshKind) -> RefreshOutcome {
        self.state.write().await.begin_refresh(kind);

        let result = self.api.dashboard().await;

        let mut state = self.state.write().await;
        let outcome = state.apply_refresh(kind, result, self.tokens.as_ref());
        tracing::debug!(?kind, ?outcome, "Dashboard refreshed");
        outcome
    }

    /// Start the refresh loop.
    ///
    /// `on_update` runs after every refresh with the new state; returning
    /// `ControlFlow::Break` ends the loop.
    pub fn spawn<F>(self: Arc<Self>, mut on_update: F) -> PollerHandle
    where
        F: FnMut(&DashboardState, RefreshOutcome) -> ControlFlow<()> + Send + 'static,
    {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Starting dashboard auto-refresh"
        );

        let task = tokio::spawn(async move {
            let outcome = self.refresh(RefreshKind::Initial).await;
            if on_update(&*self.state.read().await, outcome).is_break() {
                return;
            }

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let outcome = self.refresh(RefreshKind::Auto).await;
                if on_update(&*self.state.read().await, outcome).is_break() {
                    tracing::info!("Dashboard auto-refresh stopped");
                    return;
                }
            }
        });

        PollerHandle { task }
    }
}
