//! Block authoring: break and place cells, hotbar inventory, undo/redo.
//!
//! # Invariants
//! - Every edit is reversible through its inverse command.
//! - Edits reach the world only through `World::set_block`.
//! - Breaking adds the block to the inventory; placing consumes it unless creative.

pub mod editor;
pub mod inventory;

pub use editor::{EditCommand, EditError, Editor};
pub use inventory::{DEFAULT_HOTBAR, Inventory};
