//! The quick-message template registry.
//!
//! Two interchangeable deployments exist behind one `list`/`add`/`remove`
//! contract, chosen at construction and never hybridized:
//!
//! * **Local** — the registry is the sole source of truth; the list is
//!   written through to a config-dir JSON file on every change and
//!   survives restarts.
//! * **Remote** — the server owns the list. `add`/`remove` are
//!   fire-and-forget POSTs; the local copy is updated optimistically for
//!   immediate display and replaced wholesale by the `quick` field of the
//!   next poll. An optimistic entry the server disagrees with does not
//!   survive reconciliation.
//!
//! Removal is by value and takes the *first* matching entry only, so the
//! indices of remaining duplicates stay stable.

use tracing::{debug, warn};

use crate::http::ManifestApi;
use crate::persistence;

/// Seed templates for a local registry with no persisted list yet.
pub const DEFAULT_QUICK_MESSAGES: [&str; 3] = ["Ready for lift", "5 min delay", "Refueling"];

enum Backend {
    Local,
    Remote(ManifestApi),
}

/// Ordered, duplicate-tolerant list of reusable message templates.
pub struct QuickRegistry {
    backend: Backend,
    entries: Vec<String>,
}

impl QuickRegistry {
    /// Local-only registry, loaded from the persisted file or seeded with
    /// [`DEFAULT_QUICK_MESSAGES`].
    pub fn local() -> Self {
        let entries = persistence::load_quick_messages().unwrap_or_else(|| {
            DEFAULT_QUICK_MESSAGES
                .iter()
                .map(ToString::to_string)
                .collect()
        });
        Self {
            backend: Backend::Local,
            entries,
        }
    }

    /// Server-backed registry. Starts empty; the first poll fills it.
    pub fn remote(api: ManifestApi) -> Self {
        Self {
            backend: Backend::Remote(api),
            entries: Vec::new(),
        }
    }

    /// Whether this registry is reconciled from poll payloads.
    pub fn is_remote(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// Current known templates, in order.
    pub fn list(&self) -> &[String] {
        &self.entries
    }

    /// Append a template. Empty or whitespace-only text is a no-op.
    ///
    /// The entry shows up immediately; in the remote deployment the server
    /// call may still fail or race a poll, in which case the next
    /// reconciliation decides whether it stays.
    pub async fn add(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring empty quick message");
            return;
        }
        self.entries.push(text.to_string());

        match &self.backend {
            Backend::Local => persistence::save_quick_messages(&self.entries),
            Backend::Remote(api) => {
                if let Err(e) = api.add_quick(text).await {
                    warn!(error = %e, text, "quick add not confirmed, awaiting next poll");
                }
            }
        }
    }

    /// Remove the first entry matching `text`. Unknown text is a no-op.
    pub async fn remove(&mut self, text: &str) {
        let Some(idx) = self.entries.iter().position(|e| e == text) else {
            return;
        };
        self.entries.remove(idx);

        match &self.backend {
            Backend::Local => persistence::save_quick_messages(&self.entries),
            Backend::Remote(api) => {
                if let Err(e) = api.remove_quick(text).await {
                    warn!(error = %e, text, "quick remove not confirmed, awaiting next poll");
                }
            }
        }
    }

    /// Adopt the server's list (remote deployment only). Called with the
    /// `quick` field of each successful poll; the server copy wins over
    /// any unconfirmed optimistic edit.
    pub fn reconcile(&mut self, server_list: &[String]) {
        if self.is_remote() {
            self.entries = server_list.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A remote registry pointed at a closed port: the optimistic local
    // edit applies, the confirmation call fails and is logged.
    fn unreachable_remote() -> QuickRegistry {
        QuickRegistry::remote(ManifestApi::new("http://127.0.0.1:1").unwrap())
    }

    #[tokio::test]
    async fn add_then_list_then_remove() {
        let mut registry = unreachable_remote();
        registry.add("Ready").await;
        assert_eq!(registry.list(), ["Ready"]);
        registry.remove("Ready").await;
        assert!(registry.list().is_empty());
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let mut registry = unreachable_remote();
        registry.add("").await;
        registry.add("   ").await;
        assert!(registry.list().is_empty());
    }

    #[tokio::test]
    async fn add_trims_whitespace() {
        let mut registry = unreachable_remote();
        registry.add("  5 min delay ").await;
        assert_eq!(registry.list(), ["5 min delay"]);
    }

    #[tokio::test]
    async fn remove_takes_first_match_only() {
        let mut registry = unreachable_remote();
        registry.add("Refueling").await;
        registry.add("Ready").await;
        registry.add("Refueling").await;
        registry.remove("Refueling").await;
        assert_eq!(registry.list(), ["Ready", "Refueling"]);
    }

    #[tokio::test]
    async fn remove_unknown_text_is_noop() {
        let mut registry = unreachable_remote();
        registry.add("Ready").await;
        registry.remove("Missing").await;
        assert_eq!(registry.list(), ["Ready"]);
    }

    #[tokio::test]
    async fn reconcile_drops_unconfirmed_entries() {
        let mut registry = unreachable_remote();
        registry.add("Never made it").await;
        registry.reconcile(&["Ready".to_string(), "Refueling".to_string()]);
        assert_eq!(registry.list(), ["Ready", "Refueling"]);
    }
}
