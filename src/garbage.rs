use crate::board::Board;
use crate::character::{CharacterId, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarbageCan {
    locked: bool,
}

impl GarbageCan {
    pub fn new(locked: bool) -> Self {
        GarbageCan { locked }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Cans are stationary.
pub(crate) fn step(_board: &mut Board, _id: CharacterId, _direction: Direction) -> bool {
    false
}

/// Players lock cans by bumping them; raccoons unlock them the same way.
pub(crate) fn set_locked(board: &mut Board, id: CharacterId, locked: bool) {
    board
        .character_mut(id)
        .as_garbage_can_mut()
        .expect("character is not a garbage can")
        .locked = locked;
}
