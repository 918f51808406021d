//! Session: one world, one actor, one editor, driven tick by tick.
//!
//! # Invariants
//! - Each tick runs exactly one physics step followed by one settling pass.
//! - `advance` never runs more than `max_ticks_per_advance` ticks per call.
//! - Edits never fill a cell the actor occupies.

pub mod config;
pub mod session;

pub use config::SessionConfig;
pub use session::{Session, SessionError, SessionSummary};
