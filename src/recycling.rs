use tracing::debug;

use crate::board::{Board, Tile};
use crate::character::{CharacterId, Direction};

/// A bin never moves on its own; it is pushed by the player or another bin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecyclingBin;

/// Push a bin one tile. A bin in the way is pushed first, so a whole row of
/// bins moves together or not at all.
pub(crate) fn step(board: &mut Board, id: CharacterId, direction: Direction) -> bool {
    let from = board.character(id).position();
    let target = from.step(direction);
    let moved = match board.tile(target) {
        Tile::Empty => true,
        Tile::RecyclingBin(next) => step(board, next, direction),
        _ => false,
    };

    if moved {
        board.relocate(id, target);
        debug!(from = %from, to = %target, "bin pushed");
    }
    moved
}
