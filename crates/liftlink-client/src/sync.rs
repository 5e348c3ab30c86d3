//! The state synchronizer.
//!
//! [`Synchronizer`] owns the render model and keeps it reconciled with
//! the authoritative server: periodic polls and explicit refreshes both
//! funnel through [`poll_once`](Synchronizer::poll_once), which replaces
//! the model wholesale on success and leaves it untouched on failure —
//! a transient outage never blanks the display.
//!
//! At most one fetch is in flight. The poll loop is a plain
//! `tokio::select!` over the interval ticker and the refresh signal, and
//! it does not look at either again until the current poll has resolved;
//! ticks that fire mid-fetch are skipped rather than queued.

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::{watch, Mutex as AsyncMutex, Notify};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::http::ManifestApi;
use crate::overrides::{OverrideField, OverrideFlags};
use crate::quick::QuickRegistry;
use crate::session::SessionState;

/// Fixed poll period.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Poll-driven owner of one session's render model and override flags.
pub struct Synchronizer {
    api: ManifestApi,
    quick: AsyncMutex<QuickRegistry>,
    flags: Mutex<OverrideFlags>,
    // The render model lives inside the watch channel: `send_modify`
    // mutates and notifies subscribers in one step.
    tx: watch::Sender<SessionState>,
    refresh: Notify,
}

impl Synchronizer {
    /// Build a synchronizer around an API client and a quick registry.
    pub fn new(api: ManifestApi, quick: QuickRegistry, initial_next_id: u32) -> Self {
        let mut initial = SessionState::new(initial_next_id);
        initial.quick = quick.list().to_vec();
        let (tx, _) = watch::channel(initial);
        Self {
            api,
            quick: AsyncMutex::new(quick),
            flags: Mutex::new(OverrideFlags::new()),
            tx,
            refresh: Notify::new(),
        }
    }

    /// The underlying HTTP client.
    pub fn api(&self) -> &ManifestApi {
        &self.api
    }

    pub(crate) fn quick(&self) -> &AsyncMutex<QuickRegistry> {
        &self.quick
    }

    /// Watch the render model; a new value is published after every
    /// successful poll and every local mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Snapshot of the current render model.
    pub fn session(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Mutate the render model and notify subscribers.
    pub(crate) fn mutate(&self, op: impl FnOnce(&mut SessionState)) {
        self.tx.send_modify(op);
    }

    /// Ask the poll loop for an immediate fetch. Coalesces with an
    /// in-flight poll: the signal is consumed once the current fetch
    /// resolves.
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    // ------------------------------------------------------------------
    // Override flags
    // ------------------------------------------------------------------

    /// Record direct operator input into an auto-computed field.
    pub fn mark_override(&self, field: OverrideField) {
        self.flags
            .lock()
            .expect("override flags lock poisoned")
            .mark(field);
    }

    /// Whether `field` is currently operator-controlled.
    pub fn is_overridden(&self, field: OverrideField) -> bool {
        self.flags
            .lock()
            .expect("override flags lock poisoned")
            .is_overridden(field)
    }

    /// Copy of the current flags, for the aggregator.
    pub fn override_flags(&self) -> OverrideFlags {
        *self.flags.lock().expect("override flags lock poisoned")
    }

    /// Return all fields to auto-tracking (post-submission).
    pub fn reset_overrides(&self) {
        self.flags
            .lock()
            .expect("override flags lock poisoned")
            .reset();
    }

    // ------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------

    /// One fetch-and-merge cycle.
    ///
    /// On success the whole model is replaced from the snapshot: the
    /// quick registry reconciles first (remote deployment), then lifts
    /// are re-sorted and the next-id suggestion recomputed unless the
    /// operator is mid-edit of that field. On failure the previous model
    /// stays; the caller decides whether the error is worth surfacing.
    pub async fn poll_once(&self) -> Result<(), ClientError> {
        let snapshot = self.api.fetch_state().await?;
        debug!(
            messages = snapshot.messages.len(),
            lifts = snapshot.lifts.len(),
            "state poll succeeded"
        );

        let quick_list = {
            let mut quick = self.quick.lock().await;
            if let Some(server_list) = snapshot.quick.as_deref() {
                quick.reconcile(server_list);
            }
            quick.list().to_vec()
        };

        let keep_next_id = self.is_overridden(OverrideField::LiftId);
        self.tx.send_modify(|state| {
            state.apply_snapshot(snapshot, keep_next_id);
            state.quick = quick_list;
        });
        Ok(())
    }

    /// The recurring poll task. Runs until the owning task is aborted;
    /// the first tick fires immediately.
    pub(crate) async fn run(&self) {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                () = self.refresh.notified() => {}
            }
            if let Err(e) = self.poll_once().await {
                warn!(error = %e, "state poll failed, keeping previous model");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_sync() -> Synchronizer {
        let api = ManifestApi::new("http://127.0.0.1:1").unwrap();
        let quick = QuickRegistry::remote(api.clone());
        Synchronizer::new(api, quick, 1)
    }

    #[tokio::test]
    async fn failed_poll_keeps_previous_model() {
        let sync = unreachable_sync();
        sync.mutate(|state| state.push_outbound("still here"));
        let before = sync.session();

        let err = sync.poll_once().await;
        assert!(err.is_err());
        assert_eq!(sync.session(), before);
    }

    #[tokio::test]
    async fn override_flags_roundtrip() {
        let sync = unreachable_sync();
        assert!(!sync.is_overridden(OverrideField::CanopyTotal));
        sync.mark_override(OverrideField::CanopyTotal);
        assert!(sync.is_overridden(OverrideField::CanopyTotal));
        assert!(sync
            .override_flags()
            .is_overridden(OverrideField::CanopyTotal));
        sync.reset_overrides();
        assert!(!sync.is_overridden(OverrideField::CanopyTotal));
    }

    #[tokio::test]
    async fn mutations_reach_subscribers() {
        let sync = unreachable_sync();
        let mut rx = sync.subscribe();
        sync.mutate(|state| state.push_outbound("Ready"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().messages.len(), 1);
    }
}
