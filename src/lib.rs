//! Object model for Raccoon Raiders, a turn-based grid game.
//!
//! A [`Board`] owns every character. The player moves on recorded input,
//! pushing recycling bins and locking garbage cans; raccoons wander (or, for
//! smart raccoons, head for visible open cans) every
//! [`RACCOON_TURN_FREQUENCY`] turns. The game ends once every raccoon is
//! trapped or inside a can, scoring ten per trapped raccoon plus the size of
//! the largest cluster of adjacent bins.

pub mod board;
pub mod character;
pub mod error;
pub mod garbage;
pub mod levels;
pub mod player;
pub mod raccoon;
pub mod recycling;
pub mod score;
pub mod script;
pub mod smart;

pub use board::{Board, BoardOptions, RACCOON_TURN_FREQUENCY, Tile};
pub use character::{ALL_DIRECTIONS, Character, CharacterId, Direction, Kind, Position};
pub use error::BoardError;
pub use levels::Levels;
pub use script::{Outcome, Script};
