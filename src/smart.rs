//! Turn logic for smart raccoons.
//!
//! A smart raccoon looks along its row and column for the closest open,
//! empty garbage can it can see. Only raccoons, bins, and other cans block
//! line of sight; the player does not. It steps toward the closest can it
//! sees, preferring the probe order left, up, right, down on ties. With no
//! can in sight it moves like an ordinary raccoon.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::board::{Board, Tile};
use crate::character::{ALL_DIRECTIONS, CharacterId, Direction, Position};
use crate::raccoon;

/// Distance to the open can visible from `from` looking in `direction`, if any.
pub fn line_of_sight(board: &Board, from: Position, direction: Direction) -> Option<i32> {
    let mut distance = 1;
    loop {
        match board.tile(from.offset(direction, distance)) {
            Tile::Empty | Tile::Player(_) => distance += 1,
            Tile::OpenCan(_) => return Some(distance),
            Tile::OffBoard
            | Tile::Raccoon(_)
            | Tile::RecyclingBin(_)
            | Tile::LockedCan(_)
            | Tile::RaccoonInCan { .. } => return None,
        }
    }
}

/// The direction a smart raccoon at `from` would head in, if it sees a can.
pub fn choose_direction(board: &Board, from: Position) -> Option<Direction> {
    let sightings: ArrayVec<(Direction, i32), 4> = ALL_DIRECTIONS
        .into_iter()
        .filter_map(|dir| line_of_sight(board, from, dir).map(|distance| (dir, distance)))
        .collect();

    // Closest on each axis, 0 when nothing is visible along it.
    let closest = |horizontal: bool| {
        sightings
            .iter()
            .filter(|(dir, _)| dir.is_horizontal() == horizontal)
            .map(|&(_, distance)| distance)
            .min()
            .unwrap_or(0)
    };
    let (x, y) = (closest(true), closest(false));

    let target = match (x, y) {
        (0, 0) => return None,
        (x, 0) => x,
        (0, y) => y,
        (x, y) => x.min(y),
    };
    trace!(at = %from, x, y, target, "smart raccoon scanned for cans");

    // Probe order decides ties both within and across axes.
    sightings
        .iter()
        .find(|&&(_, distance)| distance == target)
        .map(|&(dir, _)| dir)
}

pub(crate) fn take_turn(board: &mut Board, id: CharacterId) {
    let from = board.character(id).position();
    match choose_direction(board, from) {
        // A player standing next to the raccoon can still block the step;
        // the turn is spent either way.
        Some(direction) => {
            raccoon::step(board, id, direction);
        }
        None => raccoon::wander(board, id),
    }
}
