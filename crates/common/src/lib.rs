//! Shared types for the tileworld engine: block ids and the static block catalog.
//!
//! # Invariants
//! - `BlockId::AIR` is the only empty block and is never stored.
//! - The catalog is static data; lookups of unknown ids degrade, never panic.

pub mod catalog;
pub mod types;

pub use catalog::BlockInfo;
pub use types::BlockId;
