#![deny(missing_docs)]

//! # Liftlink Models
//!
//! Core data types for the liftlink drop-zone manifest client.
//!
//! The manifest server is authoritative: the client learns everything it
//! renders from the `GET /api/state` snapshot ([`StateSnapshot`]) and only
//! ever pushes new facts (chat messages, lift submissions) to it.
//!
//! ## Type overview
//!
//! ```text
//! StateSnapshot
//! ├── club              display label (optional)
//! ├── messages: Vec<Message>       chat with the pilot, server order
//! ├── lifts: Vec<Lift>             submitted aircraft loads
//! │   ├── rows: Vec<LiftRow>       jumpers per altitude band
//! │   └── totals: LiftTotals      jumper / canopy counts
//! └── quick: Option<Vec<String>>  quick-message templates (server-backed)
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | Chat messages exchanged with the pilot |
//! | [`lift`] | Lift records, rows, totals, submission body |
//! | [`snapshot`] | The authoritative `/api/state` payload |
//! | [`error`] | Validation errors (`ModelError`) |
//!
//! All payload types deserialize defensively: fields the server omits
//! fall back to empty sequences or `None` instead of failing the render.

pub mod error;
pub mod lift;
pub mod message;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `liftlink_models::Lift` directly.
pub use error::*;
pub use lift::*;
pub use message::*;
pub use snapshot::*;
