//! Input boundary: the frame driver samples devices into `InputState` and
//! `Action`s; the core never sees raw device events.
//!
//! # Invariants
//! - Horizontal intent is always one of -1, 0, +1.
//! - Actions address world cells, never screen pixels.

pub mod action;
pub mod state;

pub use action::Action;
pub use state::InputState;
