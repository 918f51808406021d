use serde::{Deserialize, Serialize};

/// A discrete edit or selection request produced by the input layer.
///
/// Movement is continuous and travels in `InputState`; everything that
/// happens once per press travels here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Clear the block at a cell.
    Break { column: i32, row: i32 },
    /// Place the selected block at a cell.
    Place { column: i32, row: i32 },
    /// Select a hotbar slot.
    SelectSlot(usize),
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

impl Action {
    /// The cell this action targets, if any.
    pub fn target(&self) -> Option<(i32, i32)> {
        match *self {
            Self::Break { column, row } | Self::Place { column, row } => Some((column, row)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_actions_have_targets() {
        assert_eq!(Action::Break { column: 3, row: 1 }.target(), Some((3, 1)));
        assert_eq!(Action::Place { column: 0, row: 7 }.target(), Some((0, 7)));
    }

    #[test]
    fn selection_and_history_have_no_target() {
        assert_eq!(Action::SelectSlot(2).target(), None);
        assert_eq!(Action::Undo.target(), None);
        assert_eq!(Action::Redo.target(), None);
        assert_eq!(Action::Noop.target(), None);
    }
}
