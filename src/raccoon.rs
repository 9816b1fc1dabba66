use tracing::debug;

use crate::board::{Board, Tile};
use crate::character::{CharacterId, Direction};
use crate::{garbage, smart};

/// How a raccoon picks its direction when it gets a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Tries directions in a random order until one works.
    Random,
    /// Heads for the nearest open can in line of sight, else moves randomly.
    Smart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raccoon {
    inside_can: bool,
    strategy: Strategy,
}

impl Raccoon {
    pub fn new(strategy: Strategy) -> Self {
        Raccoon {
            inside_can: false,
            strategy,
        }
    }

    /// True iff this raccoon shares its tile with an open can.
    pub fn inside_can(&self) -> bool {
        self.inside_can
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub(crate) fn set_inside_can(&mut self, inside_can: bool) {
        self.inside_can = inside_can;
    }
}

fn state(board: &Board, id: CharacterId) -> Raccoon {
    *board
        .character(id)
        .as_raccoon()
        .expect("character is not a raccoon")
}

/// Empty tiles and cans without a raccoon are the only tiles a raccoon can act on.
fn is_open(tile: Tile) -> bool {
    matches!(tile, Tile::Empty | Tile::OpenCan(_) | Tile::LockedCan(_))
}

/// A raccoon is trapped when it is not in a can and every neighbouring tile
/// is off the board or holds a player, bin, or another raccoon.
pub(crate) fn check_trapped(board: &Board, id: CharacterId) -> bool {
    if state(board, id).inside_can {
        return false;
    }
    let pos = board.character(id).position();
    pos.neighbours()
        .into_iter()
        .all(|neighbour| !is_open(board.tile(neighbour)))
}

/// Move one tile. Bumping a locked can unlocks it without moving; stepping
/// onto an open can puts the raccoon inside it for good.
pub(crate) fn step(board: &mut Board, id: CharacterId, direction: Direction) -> bool {
    if state(board, id).inside_can || check_trapped(board, id) {
        return false;
    }

    let target = board.character(id).position().step(direction);
    match board.tile(target) {
        Tile::Empty => {
            board.relocate(id, target);
            true
        }
        Tile::OpenCan(_) => {
            board.relocate(id, target);
            if let Some(raccoon) = board.character_mut(id).as_raccoon_mut() {
                raccoon.set_inside_can(true);
            }
            debug!(at = %target, "raccoon climbed into a can");
            true
        }
        Tile::LockedCan(can) => {
            garbage::set_locked(board, can, false);
            debug!(at = %target, "raccoon unlocked a can");
            true
        }
        Tile::OffBoard
        | Tile::Player(_)
        | Tile::Raccoon(_)
        | Tile::RecyclingBin(_)
        | Tile::RaccoonInCan { .. } => false,
    }
}

pub(crate) fn take_turn(board: &mut Board, id: CharacterId) {
    let raccoon = state(board, id);
    if raccoon.inside_can || check_trapped(board, id) {
        return;
    }
    match raccoon.strategy {
        Strategy::Random => wander(board, id),
        Strategy::Smart => smart::take_turn(board, id),
    }
}

/// Try shuffled directions until a move succeeds. Callers must have checked
/// that the raccoon is not trapped, otherwise this never returns.
pub(crate) fn wander(board: &mut Board, id: CharacterId) {
    loop {
        for direction in board.shuffled_directions() {
            if step(board, id, direction) {
                return;
            }
        }
    }
}
