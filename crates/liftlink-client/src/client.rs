//! High-level client for the manifest server.
//!
//! [`ManifestClient`] ties the pieces together on behalf of a single
//! operator session: it owns the synchronizer, drives the poll task's
//! start/stop lifecycle, and exposes the command surface frontends call
//! (send message, submit lift, manage quick messages).
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use liftlink_client::{ManifestClient, QuickVariant};
//!
//! # async fn run() -> Result<(), liftlink_client::ClientError> {
//! let client = ManifestClient::new("http://localhost:8000", QuickVariant::Local)?;
//! client.start_polling();
//!
//! let mut updates = client.subscribe();
//! client.send_message("Ready for lift").await?;
//! updates.changed().await.ok();
//! println!("{} message(s)", updates.borrow().messages.len());
//!
//! client.stop_polling();
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex};

use liftlink_models::{Lift, LiftRow, LiftTotals, ModelError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::aggregate;
use crate::error::ClientError;
use crate::http::ManifestApi;
use crate::overrides::OverrideField;
use crate::persistence;
use crate::quick::QuickRegistry;
use crate::session::SessionState;
use crate::sync::Synchronizer;

/// Which quick-message deployment the client runs against.
///
/// Picked once at construction; the two variants are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickVariant {
    /// Quick messages live in a local persisted file.
    Local,
    /// Quick messages live on the server (`/api/quick` endpoints).
    ServerBacked,
}

/// A lift record as entered by the operator, before aggregation.
///
/// `jumper_total` / `canopy_total` carry whatever the operator typed into
/// the total fields; they only take effect when the matching override
/// flag is set.
#[derive(Debug, Clone, Default)]
pub struct LiftDraft {
    /// Explicit lift id, if the operator typed one.
    pub id: Option<u32>,
    /// Rows as entered, zero-jumper rows included.
    pub rows: Vec<LiftRow>,
    /// Operator-typed jumper total, if any.
    pub jumper_total: Option<u32>,
    /// Operator-typed canopy total, if any.
    pub canopy_total: Option<u32>,
}

/// One operator session against a manifest server.
pub struct ManifestClient {
    sync: Arc<Synchronizer>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl ManifestClient {
    // ------------------------------------------------------------------
    // Construction & lifecycle
    // ------------------------------------------------------------------

    /// Build a client for the server at `base_url`.
    ///
    /// The next-lift-id suggestion is seeded from the local cache until
    /// the first poll replaces it with the authoritative value.
    pub fn new(base_url: &str, quick: QuickVariant) -> Result<Self, ClientError> {
        let api = ManifestApi::new(base_url)?;
        let registry = match quick {
            QuickVariant::Local => QuickRegistry::local(),
            QuickVariant::ServerBacked => QuickRegistry::remote(api.clone()),
        };
        let initial_next_id =
            persistence::load_last_lift_id().map_or(1, |id| id.saturating_add(1));
        let sync = Arc::new(Synchronizer::new(api, registry, initial_next_id));
        Ok(Self {
            sync,
            poll_task: Mutex::new(None),
        })
    }

    /// Start the recurring poll task. The first poll fires immediately;
    /// calling this while a task is already running is a no-op.
    pub fn start_polling(&self) {
        let mut task = self.poll_task.lock().expect("poll task lock poisoned");
        if task.is_some() {
            return;
        }
        let sync = Arc::clone(&self.sync);
        *task = Some(tokio::spawn(async move { sync.run().await }));
    }

    /// Cancel the recurring poll task. Safe to call when none is running.
    pub fn stop_polling(&self) {
        if let Some(handle) = self
            .poll_task
            .lock()
            .expect("poll task lock poisoned")
            .take()
        {
            handle.abort();
        }
    }

    /// Whether the poll task is currently running.
    pub fn is_polling(&self) -> bool {
        self.poll_task
            .lock()
            .expect("poll task lock poisoned")
            .is_some()
    }

    // ------------------------------------------------------------------
    // Render model access
    // ------------------------------------------------------------------

    /// Watch the render model for changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sync.subscribe()
    }

    /// Snapshot of the current render model.
    pub fn session(&self) -> SessionState {
        self.sync.session()
    }

    /// Ask the poll loop for an immediate fetch (non-blocking).
    pub fn request_refresh(&self) {
        self.sync.request_refresh();
    }

    /// Fetch and merge right now, propagating the failure if any.
    pub async fn refresh_now(&self) -> Result<(), ClientError> {
        self.sync.poll_once().await
    }

    // ------------------------------------------------------------------
    // Override tracking & live totals
    // ------------------------------------------------------------------

    /// Record direct operator input into an auto-computed field.
    pub fn mark_override(&self, field: OverrideField) {
        self.sync.mark_override(field);
    }

    /// Whether `field` is currently operator-controlled.
    pub fn is_overridden(&self, field: OverrideField) -> bool {
        self.sync.is_overridden(field)
    }

    /// Totals to display for the rows as currently entered, respecting
    /// the session's override flags. Call on every row edit.
    pub fn live_totals(
        &self,
        rows: &[LiftRow],
        explicit_jumpers: Option<u32>,
        explicit_canopies: Option<u32>,
    ) -> LiftTotals {
        aggregate::compute_totals(
            rows,
            &self.sync.override_flags(),
            explicit_jumpers,
            explicit_canopies,
        )
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Send a chat message to the pilot.
    ///
    /// Empty text is rejected before any network call. On success the
    /// message is echoed into the local model immediately and a refresh
    /// is requested so the server's copy replaces the echo.
    pub async fn send_message(&self, text: &str) -> Result<(), ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ModelError::EmptyMessage.into());
        }
        self.sync.api().send_message(text).await?;
        info!(text, "message sent");
        self.sync.mutate(|state| state.push_outbound(text));
        self.sync.request_refresh();
        Ok(())
    }

    /// Mark all inbound messages as read on the server.
    pub async fn mark_messages_read(&self) -> Result<(), ClientError> {
        self.sync.api().mark_messages_read().await
    }

    /// Validate, aggregate and submit a lift.
    ///
    /// The submission is awaited to completion *before* the follow-up
    /// refresh, so the server sees the lift before the poll that is
    /// expected to reflect it. A successful submission resets the
    /// override flags (a fresh record starts) and caches the used id;
    /// a failed follow-up refresh is logged but does not fail the
    /// submission. Note the poll that lands next may still predate the
    /// lift server-side; the one after will reflect it.
    pub async fn submit_lift(&self, draft: &LiftDraft) -> Result<Lift, ClientError> {
        let totals = self.live_totals(&draft.rows, draft.jumper_total, draft.canopy_total);
        let existing = self.sync.session().lifts;
        let lift = aggregate::build_submission(draft.id, &draft.rows, totals, &existing)?;

        self.sync.api().submit_lift(&lift.to_submission()).await?;
        info!(
            id = lift.id,
            jumpers = lift.totals.jumpers,
            canopies = lift.totals.canopies,
            "lift submitted"
        );

        persistence::save_last_lift_id(lift.id);
        self.sync.reset_overrides();
        self.sync
            .mutate(|state| state.next_lift_id = lift.id + 1);

        if let Err(e) = self.sync.poll_once().await {
            warn!(error = %e, "post-submission refresh failed");
        }
        Ok(lift)
    }

    /// Append a quick-message template (no-op for empty text).
    pub async fn add_quick(&self, text: &str) {
        let list = {
            let mut quick = self.sync.quick().lock().await;
            quick.add(text).await;
            quick.list().to_vec()
        };
        self.sync.mutate(|state| state.quick = list);
    }

    /// Remove the first quick-message template matching `text`.
    pub async fn remove_quick(&self, text: &str) {
        let list = {
            let mut quick = self.sync.quick().lock().await;
            quick.remove(text).await;
            quick.list().to_vec()
        };
        self.sync.mutate(|state| state.quick = list);
    }

    /// Current quick-message templates.
    pub fn quick_messages(&self) -> Vec<String> {
        self.sync.session().quick
    }
}

impl Drop for ManifestClient {
    fn drop(&mut self) {
        // Session teardown must not leak the recurring timer.
        self.stop_polling();
    }
}
