//! Actor physics: gravity, jumping and sub-stepped swept movement against the tile grid.
//!
//! # Invariants
//! - The resolver reads blocks through `BlockQuery` and never writes them.
//! - Every sub-step moves at most `1 / substeps_per_cell` of a cell per axis.
//! - Actor position and velocity stay finite; anything else is a hard error.

pub mod actor;
pub mod collision;
pub mod config;
pub mod resolver;

pub use actor::Actor;
pub use collision::{BlockQuery, rect_collides, support_beneath};
pub use config::PhysicsConfig;
pub use resolver::{MotionError, Resolver, Sweep, sweep};
