use std::fmt;

use crate::garbage::GarbageCan;
use crate::player::Player;
use crate::raccoon::{Raccoon, Strategy};
use crate::recycling::RecyclingBin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

/// Every direction, in the fixed probe order used for tie-breaks.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Up,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Parse a single-letter direction symbol (`U`, `D`, `L`, `R`, either case).
    pub fn from_symbol(ch: char) -> Option<Direction> {
        match ch.to_ascii_uppercase() {
            'L' => Some(Direction::Left),
            'U' => Some(Direction::Up),
            'R' => Some(Direction::Right),
            'D' => Some(Direction::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "Left"),
            Direction::Up => write!(f, "Up"),
            Direction::Right => write!(f, "Right"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// A tile coordinate. Positions may lie off the board; the board decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn step(self, dir: Direction) -> Position {
        self.offset(dir, 1)
    }

    pub fn offset(self, dir: Direction, distance: i32) -> Position {
        let (dx, dy) = dir.delta();
        Position {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }

    pub fn neighbours(self) -> [Position; 4] {
        ALL_DIRECTIONS.map(|dir| self.step(dir))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position { x, y }
    }
}

/// Handle to a character, stable for the lifetime of the board that issued it.
/// Ids are handed out in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacterId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Player(Player),
    Raccoon(Raccoon),
    RecyclingBin(RecyclingBin),
    GarbageCan(GarbageCan),
}

/// Anything that occupies a tile: a position plus the variant-specific state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub(crate) position: Position,
    pub(crate) kind: Kind,
}

impl Character {
    pub fn player(x: i32, y: i32) -> Self {
        Self::new(x, y, Kind::Player(Player::new()))
    }

    pub fn raccoon(x: i32, y: i32) -> Self {
        Self::new(x, y, Kind::Raccoon(Raccoon::new(Strategy::Random)))
    }

    pub fn smart_raccoon(x: i32, y: i32) -> Self {
        Self::new(x, y, Kind::Raccoon(Raccoon::new(Strategy::Smart)))
    }

    pub fn recycling_bin(x: i32, y: i32) -> Self {
        Self::new(x, y, Kind::RecyclingBin(RecyclingBin))
    }

    pub fn garbage_can(x: i32, y: i32, locked: bool) -> Self {
        Self::new(x, y, Kind::GarbageCan(GarbageCan::new(locked)))
    }

    fn new(x: i32, y: i32, kind: Kind) -> Self {
        Character {
            position: Position::new(x, y),
            kind,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The single-letter symbol for this character in the grid format.
    pub fn glyph(&self) -> char {
        match &self.kind {
            Kind::Player(_) => 'P',
            Kind::Raccoon(raccoon) if raccoon.inside_can() => '@',
            Kind::Raccoon(raccoon) => match raccoon.strategy() {
                Strategy::Random => 'R',
                Strategy::Smart => 'S',
            },
            Kind::RecyclingBin(_) => 'B',
            Kind::GarbageCan(can) if can.is_locked() => 'C',
            Kind::GarbageCan(_) => 'O',
        }
    }

    /// Players and raccoons take turns; bins and cans only react.
    pub fn takes_turns(&self) -> bool {
        matches!(self.kind, Kind::Player(_) | Kind::Raccoon(_))
    }

    pub fn is_raccoon(&self) -> bool {
        matches!(self.kind, Kind::Raccoon(_))
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            Kind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_raccoon(&self) -> Option<&Raccoon> {
        match &self.kind {
            Kind::Raccoon(raccoon) => Some(raccoon),
            _ => None,
        }
    }

    pub fn as_garbage_can(&self) -> Option<&GarbageCan> {
        match &self.kind {
            Kind::GarbageCan(can) => Some(can),
            _ => None,
        }
    }

    pub(crate) fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            Kind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub(crate) fn as_raccoon_mut(&mut self) -> Option<&mut Raccoon> {
        match &mut self.kind {
            Kind::Raccoon(raccoon) => Some(raccoon),
            _ => None,
        }
    }

    pub(crate) fn as_garbage_can_mut(&mut self) -> Option<&mut GarbageCan> {
        match &mut self.kind {
            Kind::GarbageCan(can) => Some(can),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::Down.delta(), (0, 1));
    }

    #[test]
    fn test_probe_order() {
        assert_eq!(
            ALL_DIRECTIONS,
            [
                Direction::Left,
                Direction::Up,
                Direction::Right,
                Direction::Down
            ]
        );
    }

    #[test]
    fn test_from_symbol() {
        assert_eq!(Direction::from_symbol('U'), Some(Direction::Up));
        assert_eq!(Direction::from_symbol('d'), Some(Direction::Down));
        assert_eq!(Direction::from_symbol('L'), Some(Direction::Left));
        assert_eq!(Direction::from_symbol('r'), Some(Direction::Right));
        assert_eq!(Direction::from_symbol('x'), None);
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(3, 3);
        assert_eq!(pos.step(Direction::Left), Position::new(2, 3));
        assert_eq!(pos.offset(Direction::Down, 2), Position::new(3, 5));
        assert_eq!(
            pos.neighbours(),
            [
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 3),
                Position::new(3, 4)
            ]
        );
        assert_eq!(pos.to_string(), "(3, 3)");
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(Character::player(0, 0).glyph(), 'P');
        assert_eq!(Character::raccoon(0, 0).glyph(), 'R');
        assert_eq!(Character::smart_raccoon(0, 0).glyph(), 'S');
        assert_eq!(Character::recycling_bin(0, 0).glyph(), 'B');
        assert_eq!(Character::garbage_can(0, 0, true).glyph(), 'C');
        assert_eq!(Character::garbage_can(0, 0, false).glyph(), 'O');
    }

    #[test]
    fn test_capabilities() {
        assert!(Character::player(0, 0).takes_turns());
        assert!(Character::raccoon(0, 0).takes_turns());
        assert!(Character::smart_raccoon(0, 0).takes_turns());
        assert!(!Character::recycling_bin(0, 0).takes_turns());
        assert!(!Character::garbage_can(0, 0, false).takes_turns());
        assert!(Character::smart_raccoon(0, 0).is_raccoon());
        assert!(!Character::player(0, 0).is_raccoon());
    }
}
