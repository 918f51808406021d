use std::collections::BTreeMap;

use tileworld_common::BlockId;

use crate::editor::EditError;

/// Hotbar of a fresh inventory: grass, stone, dirt on keys 1-3.
pub const DEFAULT_HOTBAR: [BlockId; 3] = [BlockId::GRASS, BlockId::STONE, BlockId::DIRT];

/// Hotbar selection and per-block counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<BlockId>,
    selected: usize,
    counts: BTreeMap<BlockId, u32>,
    creative: bool,
}

impl Inventory {
    /// An inventory with the given hotbar and nothing in stock.
    ///
    /// An empty hotbar falls back to `DEFAULT_HOTBAR`.
    pub fn new(slots: Vec<BlockId>, creative: bool) -> Self {
        let slots = if slots.is_empty() {
            DEFAULT_HOTBAR.to_vec()
        } else {
            slots
        };
        Self {
            slots,
            selected: 0,
            counts: BTreeMap::new(),
            creative,
        }
    }

    pub fn creative() -> Self {
        Self::new(DEFAULT_HOTBAR.to_vec(), true)
    }

    pub fn survival() -> Self {
        Self::new(DEFAULT_HOTBAR.to_vec(), false)
    }

    pub fn slots(&self) -> &[BlockId] {
        &self.slots
    }

    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    pub fn selected_block(&self) -> BlockId {
        self.slots[self.selected]
    }

    pub fn select(&mut self, slot: usize) -> Result<BlockId, EditError> {
        let Some(&block) = self.slots.get(slot) else {
            return Err(EditError::InvalidSlot {
                slot,
                len: self.slots.len(),
            });
        };
        self.selected = slot;
        Ok(block)
    }

    pub fn is_creative(&self) -> bool {
        self.creative
    }

    pub fn set_creative(&mut self, creative: bool) {
        self.creative = creative;
    }

    pub fn count(&self, block: BlockId) -> u32 {
        self.counts.get(&block).copied().unwrap_or(0)
    }

    /// Blocks in stock, in id order.
    pub fn stock(&self) -> impl Iterator<Item = (BlockId, u32)> + '_ {
        self.counts.iter().map(|(&block, &n)| (block, n))
    }

    pub fn add(&mut self, block: BlockId) {
        if block.is_air() {
            return;
        }
        *self.counts.entry(block).or_insert(0) += 1;
    }

    /// Consume one `block`. Creative mode never runs out.
    pub fn take(&mut self, block: BlockId) -> Result<(), EditError> {
        if self.creative {
            return Ok(());
        }
        match self.counts.get_mut(&block) {
            Some(n) if *n > 1 => *n -= 1,
            Some(_) => {
                self.counts.remove(&block);
            }
            None => return Err(EditError::OutOfStock(block)),
        }
        Ok(())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::creative()
    }
}
