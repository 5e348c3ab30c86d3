//! # Liftlink Client
//!
//! State reconciliation core for the liftlink drop-zone manifest tool.
//!
//! The manifest server is authoritative and polled periodically; this
//! crate keeps a local render model in step with it without discarding
//! in-flight operator edits. It provides:
//!
//! * [`ManifestClient`] — one operator session: commands (send message,
//!   submit lift, quick-message edits) plus the poll task lifecycle.
//! * [`Synchronizer`] — the poll-and-merge loop behind the client, with
//!   at most one fetch in flight.
//! * [`OverrideFlags`] — remembers which auto-computed totals the
//!   operator has taken over by hand.
//! * [`aggregate`] — pure derived-value computation: totals, row
//!   filtering, next-id suggestion.
//! * [`QuickRegistry`] — local-persisted or server-backed quick-message
//!   templates behind one contract.
//! * [`ManifestApi`] — thin typed wrapper over the server's HTTP
//!   endpoints.
//! * [`ClientError`] — unified error type for all fallible operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use liftlink_client::{LiftDraft, ManifestClient, QuickVariant};
//! use liftlink_models::LiftRow;
//!
//! # async fn run() -> Result<(), liftlink_client::ClientError> {
//! let client = ManifestClient::new("http://localhost:8000", QuickVariant::Local)?;
//! client.start_polling();
//!
//! let lift = client
//!     .submit_lift(&LiftDraft {
//!         rows: vec![LiftRow::with_jumpers(4000, 10)],
//!         ..LiftDraft::default()
//!     })
//!     .await?;
//! println!("submitted {}", lift.display_name());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod client;
pub mod error;
pub mod http;
pub mod overrides;
pub mod persistence;
pub mod quick;
pub mod session;
pub mod sync;

pub use client::{LiftDraft, ManifestClient, QuickVariant};
pub use error::ClientError;
pub use http::{ManifestApi, REQUEST_TIMEOUT};
pub use overrides::{OverrideField, OverrideFlags};
pub use quick::{QuickRegistry, DEFAULT_QUICK_MESSAGES};
pub use session::SessionState;
pub use sync::{Synchronizer, POLL_INTERVAL};
