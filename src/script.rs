use std::str::FromStr;

use crate::board::Board;
use crate::character::Direction;
use crate::error::BoardError;

/// One recorded input per tick: `U`, `D`, `L`, `R` for a direction and `.`
/// for no input. Whitespace is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Option<Direction>>,
}

impl Script {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Option<Direction>] {
        &self.steps
    }
}

impl FromStr for Script {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        for (offset, ch) in s.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            if ch == '.' {
                steps.push(None);
                continue;
            }
            match Direction::from_symbol(ch) {
                Some(dir) => steps.push(Some(dir)),
                None => return Err(BoardError::UnknownScriptSymbol { ch, offset }),
            }
        }
        Ok(Script { steps })
    }
}

/// Summary of a replayed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub ended: bool,
    pub turns: u32,
    pub score: Option<usize>,
}

/// Feed `script` to `board` one tick at a time, then keep ticking without
/// input until the game ends or `max_ticks` ticks have run in total.
/// `on_tick` sees the board after every tick.
pub fn replay<F>(board: &mut Board, script: &Script, max_ticks: u32, mut on_tick: F) -> Outcome
where
    F: FnMut(&Board),
{
    let mut steps = script.steps().iter();
    let mut ticks = 0;
    while ticks < max_ticks && !board.ended() {
        if let Some(Some(direction)) = steps.next() {
            board.handle_event(*direction);
        }
        board.advance_turn();
        ticks += 1;
        on_tick(board);
    }

    Outcome {
        ended: board.ended(),
        turns: board.turns(),
        score: board.score(),
    }
}
