use tileworld_common::BlockId;
use tileworld_kernel::World;

use crate::inventory::Inventory;

/// A block edit that can be applied to the world and reversed.
///
/// Each command carries the block it moves so it can undo itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Clear a cell holding `block`. Undo = place it back.
    Break {
        column: i32,
        row: i32,
        block: BlockId,
    },
    /// Put `block` into an empty cell. Undo = break it.
    Place {
        column: i32,
        row: i32,
        block: BlockId,
    },
}

impl EditCommand {
    /// Produce the inverse command (for undo).
    pub fn inverse(&self) -> Self {
        match *self {
            Self::Break { column, row, block } => Self::Place { column, row, block },
            Self::Place { column, row, block } => Self::Break { column, row, block },
        }
    }

    pub fn cell(&self) -> (i32, i32) {
        match *self {
            Self::Break { column, row, .. } | Self::Place { column, row, .. } => (column, row),
        }
    }

    pub fn block(&self) -> BlockId {
        match *self {
            Self::Break { block, .. } | Self::Place { block, .. } => block,
        }
    }

    /// Whether applying this command fills its cell.
    pub fn fills(&self) -> bool {
        matches!(self, Self::Place { .. })
    }
}

/// Errors from edit operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("nothing to break at ({column}, {row})")]
    NothingToBreak { column: i32, row: i32 },
    #[error("cell ({column}, {row}) already holds {block}")]
    Occupied {
        column: i32,
        row: i32,
        block: BlockId,
    },
    #[error("no {0} left in the inventory")]
    OutOfStock(BlockId),
    #[error("hotbar slot {slot} out of range (hotbar has {len} slots)")]
    InvalidSlot { slot: usize, len: usize },
}

/// Block editor with an inventory and undo/redo stacks.
///
/// Every edit is reversible via `undo()` and re-applicable via `redo()`.
/// A fresh edit clears the redo stack.
#[derive(Debug, Default)]
pub struct Editor {
    inventory: Inventory,
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
}

impl Editor {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Clear a cell and pocket its block.
    pub fn break_block(
        &mut self,
        world: &mut World,
        column: i32,
        row: i32,
    ) -> Result<BlockId, EditError> {
        let block = world.get_block(column, row);
        let cmd = EditCommand::Break { column, row, block };
        apply_command(world, &mut self.inventory, &cmd)?;
        self.record(cmd);
        Ok(block)
    }

    /// Place the selected hotbar block into an empty cell.
    pub fn place_block(
        &mut self,
        world: &mut World,
        column: i32,
        row: i32,
    ) -> Result<BlockId, EditError> {
        let block = self.inventory.selected_block();
        let cmd = EditCommand::Place { column, row, block };
        apply_command(world, &mut self.inventory, &cmd)?;
        self.record(cmd);
        Ok(block)
    }

    pub fn select(&mut self, slot: usize) -> Result<BlockId, EditError> {
        self.inventory.select(slot)
    }

    /// Undo the last edit. Returns `Ok(false)` when there is nothing to undo.
    ///
    /// If the world changed under the edit (the cell was refilled or emptied
    /// by something else) the command stays on the stack and the error is returned.
    pub fn undo(&mut self, world: &mut World) -> Result<bool, EditError> {
        let Some(cmd) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = apply_command(world, &mut self.inventory, &cmd.inverse()) {
            self.undo_stack.push(cmd);
            return Err(err);
        }
        self.redo_stack.push(cmd);
        Ok(true)
    }

    /// Redo the last undone edit. Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, world: &mut World) -> Result<bool, EditError> {
        let Some(cmd) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = apply_command(world, &mut self.inventory, &cmd) {
            self.redo_stack.push(cmd);
            return Err(err);
        }
        self.undo_stack.push(cmd);
        Ok(true)
    }

    /// The command `undo()` would apply next.
    pub fn next_undo(&self) -> Option<EditCommand> {
        self.undo_stack.last().map(EditCommand::inverse)
    }

    /// The command `redo()` would apply next.
    pub fn next_redo(&self) -> Option<EditCommand> {
        self.redo_stack.last().copied()
    }

    /// Number of operations on the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of operations on the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn record(&mut self, cmd: EditCommand) {
        tracing::debug!(?cmd, "edit");
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
    }
}

fn apply_command(
    world: &mut World,
    inventory: &mut Inventory,
    cmd: &EditCommand,
) -> Result<(), EditError> {
    match *cmd {
        EditCommand::Break { column, row, block } => {
            let current = world.get_block(column, row);
            if current.is_air() || current != block {
                return Err(EditError::NothingToBreak { column, row });
            }
            world.set_block(column, row, BlockId::AIR);
            inventory.add(block);
        }
        EditCommand::Place { column, row, block } => {
            let current = world.get_block(column, row);
            if !current.is_air() {
                return Err(EditError::Occupied {
                    column,
                    row,
                    block: current,
                });
            }
            inventory.take(block)?;
            world.set_block(column, row, block);
        }
    }
    Ok(())
}
