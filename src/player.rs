use tracing::debug;

use crate::board::{Board, Tile};
use crate::character::{CharacterId, Direction};
use crate::{garbage, recycling};

/// The user-controlled character. Holds at most one pending input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pending: Option<Direction>,
}

impl Player {
    pub fn new() -> Self {
        Player { pending: None }
    }

    /// The direction the next turn will use, if any.
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }
}

fn state_mut(board: &mut Board, id: CharacterId) -> &mut Player {
    board
        .character_mut(id)
        .as_player_mut()
        .expect("character is not a player")
}

/// Record the latest input, replacing any that has not been used yet.
pub(crate) fn record_event(board: &mut Board, id: CharacterId, direction: Direction) {
    state_mut(board, id).pending = Some(direction);
}

/// Use the pending input, if there is one. It is cleared whether or not the
/// move succeeds.
pub(crate) fn take_turn(board: &mut Board, id: CharacterId) {
    if let Some(direction) = state_mut(board, id).pending.take() {
        step(board, id, direction);
    }
}

/// Move the player one tile. Bumping an empty open can locks it without
/// moving, and bins are pushed (possibly as a chain) ahead of the player.
pub(crate) fn step(board: &mut Board, id: CharacterId, direction: Direction) -> bool {
    let target = board.character(id).position().step(direction);
    match board.tile(target) {
        Tile::OffBoard
        | Tile::Raccoon(_)
        | Tile::LockedCan(_)
        | Tile::RaccoonInCan { .. }
        | Tile::Player(_) => false,
        Tile::OpenCan(can) => {
            garbage::set_locked(board, can, true);
            debug!(at = %target, "player locked a can");
            true
        }
        Tile::RecyclingBin(bin) => {
            if recycling::step(board, bin, direction) {
                board.relocate(id, target);
                true
            } else {
                false
            }
        }
        Tile::Empty => {
            board.relocate(id, target);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardOptions;
    use crate::character::Position;

    use super::*;

    fn board(grid: &str) -> Board {
        Board::from_grid_with_options(
            grid,
            BoardOptions {
                seed: Some(1),
                ..BoardOptions::default()
            },
        )
        .unwrap()
    }

    fn player_pos(board: &Board) -> Position {
        board.character(board.player().unwrap()).position()
    }

    #[test]
    fn test_move_into_empty() {
        let mut board = board("P--\n---");
        let id = board.player().unwrap();
        assert!(board.move_character(id, Direction::Right));
        assert_eq!(player_pos(&board), Position::new(1, 0));
        assert!(board.move_character(id, Direction::Down));
        assert_eq!(board.to_string(), "---\n-P-");
    }

    #[test]
    fn test_move_off_board() {
        let mut board = board("P-\n--");
        let id = board.player().unwrap();
        assert!(!board.move_character(id, Direction::Left));
        assert!(!board.move_character(id, Direction::Up));
        assert_eq!(player_pos(&board), Position::new(0, 0));
    }

    #[test]
    fn test_blocked_by_raccoon() {
        let mut board = board("PR-\nS--");
        let id = board.player().unwrap();
        assert!(!board.move_character(id, Direction::Right));
        assert!(!board.move_character(id, Direction::Down));
        assert_eq!(board.to_string(), "PR-\nS--");
    }

    #[test]
    fn test_lock_open_can() {
        let mut board = board("PO-");
        let id = board.player().unwrap();
        assert!(board.move_character(id, Direction::Right));
        assert_eq!(player_pos(&board), Position::new(0, 0));
        assert_eq!(board.to_string(), "PC-");
    }

    #[test]
    fn test_bump_locked_can() {
        let mut board = board("PC-");
        let id = board.player().unwrap();
        assert!(!board.move_character(id, Direction::Right));
        assert_eq!(board.to_string(), "PC-");
    }

    #[test]
    fn test_bump_occupied_can() {
        let mut board = board("P@-");
        let id = board.player().unwrap();
        assert!(!board.move_character(id, Direction::Right));
        assert_eq!(board.to_string(), "P@-");
    }

    #[test]
    fn test_push_bin() {
        let mut board = board("PB-");
        let id = board.player().unwrap();
        assert!(board.move_character(id, Direction::Right));
        assert_eq!(board.to_string(), "-PB");
    }

    #[test]
    fn test_push_bin_chain() {
        let mut board = board("PBB-");
        let id = board.player().unwrap();
        assert!(board.move_character(id, Direction::Right));
        assert_eq!(board.to_string(), "-PBB");

        // Chain now reaches the edge
        assert!(!board.move_character(id, Direction::Right));
        assert_eq!(board.to_string(), "-PBB");
    }

    #[test]
    fn test_push_bin_blocked() {
        let mut board = board("PBR\nBC-\nB--");
        let id = board.player().unwrap();
        assert!(!board.move_character(id, Direction::Right));
        assert!(!board.move_character(id, Direction::Down));
        assert_eq!(board.to_string(), "PBR\nBC-\nB--");
    }

    #[test]
    fn test_push_bin_vertically() {
        let mut board = board("P\nB\nB\n-");
        let id = board.player().unwrap();
        assert!(board.move_character(id, Direction::Down));
        assert_eq!(board.to_string(), "-\nP\nB\nB");
    }

    #[test]
    fn test_take_turn_consumes_input() {
        let mut board = board("P--");
        let id = board.player().unwrap();

        board.take_turn(id);
        assert_eq!(player_pos(&board), Position::new(0, 0));

        board.handle_event(Direction::Right);
        assert_eq!(
            board.character(id).as_player().unwrap().pending(),
            Some(Direction::Right)
        );
        board.take_turn(id);
        assert_eq!(player_pos(&board), Position::new(1, 0));
        assert_eq!(board.character(id).as_player().unwrap().pending(), None);

        board.take_turn(id);
        assert_eq!(player_pos(&board), Position::new(1, 0));
    }

    #[test]
    fn test_failed_move_still_clears_input() {
        let mut board = board("P--");
        let id = board.player().unwrap();
        board.handle_event(Direction::Up);
        board.take_turn(id);
        assert_eq!(board.character(id).as_player().unwrap().pending(), None);
    }

    #[test]
    fn test_latest_input_wins() {
        let mut board = board("-P-");
        let id = board.player().unwrap();
        board.handle_event(Direction::Left);
        board.handle_event(Direction::Right);
        board.take_turn(id);
        assert_eq!(player_pos(&board), Position::new(2, 0));
    }
}
