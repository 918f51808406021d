/// Input sampled once per tick for the actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    horizontal: i8,
    /// Jump was pressed this tick.
    pub jump: bool,
}

impl InputState {
    /// Build from a raw horizontal intent; anything non-zero is reduced to its sign.
    pub fn new(horizontal: i8, jump: bool) -> Self {
        Self {
            horizontal: horizontal.signum(),
            jump,
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }

    /// Combine two held keys the way a keyboard mapping does: both or neither cancel.
    pub fn from_keys(left: bool, right: bool, jump: bool) -> Self {
        Self::new(i8::from(right) - i8::from(left), jump)
    }

    /// Horizontal intent: -1 (left), 0, or +1 (right).
    pub fn horizontal(&self) -> i8 {
        self.horizontal
    }
}
