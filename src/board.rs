use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::character::{ALL_DIRECTIONS, Character, CharacterId, Direction, Kind, Position};
use crate::error::BoardError;
use crate::{garbage, player, raccoon, recycling, score};

/// Raccoons get a turn every this many board turns.
pub const RACCOON_TURN_FREQUENCY: u32 = 20;

/// At most a raccoon and the open can it sits in share a tile.
pub type Occupants = ArrayVec<CharacterId, 2>;

/// What a mover sees when it looks at a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    OffBoard,
    Empty,
    Player(CharacterId),
    Raccoon(CharacterId),
    RecyclingBin(CharacterId),
    OpenCan(CharacterId),
    LockedCan(CharacterId),
    RaccoonInCan {
        raccoon: CharacterId,
        can: CharacterId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOptions {
    pub raccoon_turn_frequency: u32,
    /// Seed for direction shuffling; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        BoardOptions {
            raccoon_turn_frequency: RACCOON_TURN_FREQUENCY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    turns: u32,
    ended: bool,
    score: Option<usize>,
    raccoon_turn_frequency: u32,
    // Registration order; ids index into this.
    characters: Vec<Character>,
    // Occupancy index, row-major, kept in sync with character positions.
    cells: Vec<Occupants>,
    player: Option<CharacterId>,
    rng: ChaCha8Rng,
}

impl Board {
    /// An empty board with the default raccoon frequency and an entropy-seeded RNG.
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        Self::with_options(width, height, BoardOptions::default())
    }

    pub fn with_seed(width: i32, height: i32, seed: u64) -> Result<Self, BoardError> {
        Self::with_options(
            width,
            height,
            BoardOptions {
                seed: Some(seed),
                ..BoardOptions::default()
            },
        )
    }

    pub fn with_options(width: i32, height: i32, options: BoardOptions) -> Result<Self, BoardError> {
        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::build(width, height, options.raccoon_turn_frequency, rng)
    }

    fn build(
        width: i32,
        height: i32,
        raccoon_turn_frequency: u32,
        rng: ChaCha8Rng,
    ) -> Result<Self, BoardError> {
        let cells = match width.checked_mul(height) {
            Some(cells) if width > 0 && height > 0 => cells as usize,
            _ => return Err(BoardError::InvalidDimensions { width, height }),
        };
        if raccoon_turn_frequency == 0 {
            return Err(BoardError::InvalidFrequency(raccoon_turn_frequency));
        }

        Ok(Board {
            width,
            height,
            turns: 0,
            ended: false,
            score: None,
            raccoon_turn_frequency,
            characters: Vec::new(),
            cells: vec![Occupants::new(); cells],
            player: None,
            rng,
        })
    }

    /// Decode a board from the grid format:
    ///
    /// - `R` = Raccoon
    /// - `S` = Smart raccoon
    /// - `P` = Player
    /// - `C` = Locked (closed) garbage can
    /// - `O` = Unlocked (open) garbage can
    /// - `B` = Recycling bin
    /// - `@` = Raccoon inside an open garbage can
    /// - `-` = Empty tile
    ///
    /// Rows are separated by newlines and must all have the same length.
    pub fn from_grid(text: &str) -> Result<Self, BoardError> {
        Self::from_grid_with_options(text, BoardOptions::default())
    }

    pub fn from_grid_with_options(text: &str, options: BoardOptions) -> Result<Self, BoardError> {
        let (width, height) = Self::grid_dimensions(text)?;
        let mut board = Self::with_options(width, height, options)?;
        board.populate(text)?;
        Ok(board)
    }

    /// Reset this board to the state described by `text`. The turn counter
    /// and end flag are cleared; the frequency and RNG stream carry over.
    pub fn setup_from_grid(&mut self, text: &str) -> Result<(), BoardError> {
        let (width, height) = Self::grid_dimensions(text)?;
        let mut board = Self::build(width, height, self.raccoon_turn_frequency, self.rng.clone())?;
        board.populate(text)?;
        *self = board;
        Ok(())
    }

    fn grid_dimensions(text: &str) -> Result<(i32, i32), BoardError> {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        if lines.is_empty() || width == 0 {
            return Err(BoardError::EmptyGrid);
        }

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        Ok((width as i32, lines.len() as i32))
    }

    fn populate(&mut self, text: &str) -> Result<(), BoardError> {
        for (y, line) in text.lines().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let (cx, cy) = (x as i32, y as i32);
                match ch {
                    '-' => {}
                    'R' => {
                        self.place(Character::raccoon(cx, cy))?;
                    }
                    'S' => {
                        self.place(Character::smart_raccoon(cx, cy))?;
                    }
                    'P' => {
                        self.place(Character::player(cx, cy))?;
                    }
                    'O' => {
                        self.place(Character::garbage_can(cx, cy, false))?;
                    }
                    'C' => {
                        self.place(Character::garbage_can(cx, cy, true))?;
                    }
                    'B' => {
                        self.place(Character::recycling_bin(cx, cy))?;
                    }
                    '@' => {
                        // The can must be on the tile before the raccoon climbs in.
                        self.place(Character::garbage_can(cx, cy, false))?;
                        self.place(Character::raccoon(cx, cy))?;
                    }
                    _ => return Err(BoardError::UnknownGlyph { ch, x, y }),
                }
            }
        }
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// The score returned by the most recent end-of-game check.
    pub fn score(&self) -> Option<usize> {
        self.score
    }

    pub fn raccoon_turn_frequency(&self) -> u32 {
        self.raccoon_turn_frequency
    }

    pub fn on_board(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    fn cell_index(&self, pos: Position) -> Option<usize> {
        if self.on_board(pos.x, pos.y) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    /// Register a character at its current coordinates.
    ///
    /// The tile must be empty, except that a raccoon may be placed onto a
    /// tile holding only an unlocked can, in which case it starts inside it.
    pub fn place(&mut self, mut character: Character) -> Result<CharacterId, BoardError> {
        let pos = character.position();
        let idx = self.cell_index(pos).ok_or(BoardError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        })?;

        let is_player = matches!(character.kind(), Kind::Player(_));
        if is_player && self.player.is_some() {
            return Err(BoardError::DuplicatePlayer);
        }

        let tile = self.tile(pos);
        let inside_can = match (tile, character.is_raccoon()) {
            (Tile::Empty, _) => false,
            (Tile::OpenCan(_), true) => true,
            _ => return Err(BoardError::TileOccupied { x: pos.x, y: pos.y }),
        };
        if let Some(raccoon) = character.as_raccoon_mut() {
            raccoon.set_inside_can(inside_can);
        }

        let id = CharacterId(self.characters.len());
        self.characters.push(character);
        self.cells[idx].push(id);
        if is_player {
            self.player = Some(id);
        }
        Ok(id)
    }

    /// The characters on tile (x, y), empty when off the board. A can
    /// always precedes the raccoon inside it.
    pub fn at(&self, x: i32, y: i32) -> &[CharacterId] {
        match self.cell_index(Position::new(x, y)) {
            Some(idx) => self.cells[idx].as_slice(),
            None => &[],
        }
    }

    /// Classify the tile at `pos` for movement decisions.
    pub fn tile(&self, pos: Position) -> Tile {
        let Some(idx) = self.cell_index(pos) else {
            return Tile::OffBoard;
        };
        let occupants = &self.cells[idx];
        match occupants.as_slice() {
            [] => Tile::Empty,
            [id] => match self.character(*id).kind() {
                Kind::Player(_) => Tile::Player(*id),
                Kind::Raccoon(_) => Tile::Raccoon(*id),
                Kind::RecyclingBin(_) => Tile::RecyclingBin(*id),
                Kind::GarbageCan(can) if can.is_locked() => Tile::LockedCan(*id),
                Kind::GarbageCan(_) => Tile::OpenCan(*id),
            },
            [can, raccoon] => Tile::RaccoonInCan {
                raccoon: *raccoon,
                can: *can,
            },
            _ => unreachable!(),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this board. The same holds for every
    /// method taking a `CharacterId`.
    pub fn character(&self, id: CharacterId) -> &Character {
        &self.characters[id.0]
    }

    pub(crate) fn character_mut(&mut self, id: CharacterId) -> &mut Character {
        &mut self.characters[id.0]
    }

    /// All characters in registration order.
    pub fn characters(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
        self.characters
            .iter()
            .enumerate()
            .map(|(idx, c)| (CharacterId(idx), c))
    }

    pub fn raccoons(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.characters()
            .filter(|(_, c)| c.is_raccoon())
            .map(|(id, _)| id)
    }

    pub fn player(&self) -> Option<CharacterId> {
        self.player
    }

    /// Move a character to `to`, keeping the occupancy index in step.
    /// Callers have already checked that the move is legal.
    pub(crate) fn relocate(&mut self, id: CharacterId, to: Position) {
        let from = self.character(id).position();
        let (Some(from_idx), Some(to_idx)) = (self.cell_index(from), self.cell_index(to)) else {
            panic!("Cannot move character from {} to {}: off board", from, to);
        };
        self.cells[from_idx].retain(|other| *other != id);
        assert!(
            !self.cells[to_idx].is_full(),
            "Cannot move character to {}: tile full",
            to
        );
        self.cells[to_idx].push(id);
        self.character_mut(id).position = to;
    }

    pub(crate) fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = ALL_DIRECTIONS;
        directions.shuffle(&mut self.rng);
        directions
    }

    /// Record a user input for the player's next turn.
    pub fn handle_event(&mut self, direction: Direction) {
        if let Some(id) = self.player {
            player::record_event(self, id, direction);
        }
    }

    /// Attempt to move any character one tile; each variant applies its own rules.
    pub fn move_character(&mut self, id: CharacterId, direction: Direction) -> bool {
        match self.character(id).kind() {
            Kind::Player(_) => player::step(self, id, direction),
            Kind::Raccoon(_) => raccoon::step(self, id, direction),
            Kind::RecyclingBin(_) => recycling::step(self, id, direction),
            Kind::GarbageCan(_) => garbage::step(self, id, direction),
        }
    }

    /// Give one character its turn. Bins and cans have none.
    pub fn take_turn(&mut self, id: CharacterId) {
        match self.character(id).kind() {
            Kind::Player(_) => player::take_turn(self, id),
            Kind::Raccoon(_) => raccoon::take_turn(self, id),
            Kind::RecyclingBin(_) | Kind::GarbageCan(_) => {}
        }
    }

    /// Whether the character is a raccoon with nowhere to go.
    pub fn check_trapped(&self, id: CharacterId) -> bool {
        self.character(id).is_raccoon() && raccoon::check_trapped(self, id)
    }

    /// Run one tick: the player moves, the counter advances, raccoons move
    /// on every `raccoon_turn_frequency`-th turn, then the end is checked.
    pub fn advance_turn(&mut self) -> Option<usize> {
        if let Some(id) = self.player {
            self.take_turn(id);
        }
        self.turns += 1;

        if self.turns % self.raccoon_turn_frequency == 0 {
            debug!(turn = self.turns, "raccoons take their turns");
            let player = self.player;
            let movers: Vec<CharacterId> = self
                .characters()
                .filter(|(id, c)| c.takes_turns() && Some(*id) != player)
                .map(|(id, _)| id)
                .collect();
            for id in movers {
                self.take_turn(id);
            }
        }

        self.check_game_end()
    }

    /// The game ends once every raccoon is trapped or inside a can. Returns
    /// `10 * trapped + adjacent_bin_score()` when it has, `None` otherwise.
    pub fn check_game_end(&mut self) -> Option<usize> {
        let mut trapped = 0;
        let mut contained = 0;
        let mut total = 0;
        for id in self.raccoons() {
            total += 1;
            if self.check_trapped(id) {
                trapped += 1;
            } else if self.character(id).as_raccoon().is_some_and(|r| r.inside_can()) {
                contained += 1;
            }
        }

        self.score = if trapped + contained == total {
            let score = trapped * 10 + self.adjacent_bin_score();
            if !self.ended {
                info!(turns = self.turns, trapped, contained, score, "game over");
            }
            self.ended = true;
            Some(score)
        } else {
            None
        };
        self.score
    }

    /// Size of the largest 4-connected cluster of recycling bins.
    pub fn adjacent_bin_score(&self) -> usize {
        let bins = self
            .characters
            .iter()
            .filter(|c| matches!(c.kind(), Kind::RecyclingBin(_)))
            .map(|c| c.position());
        score::largest_cluster(self.width, self.height, bins)
    }

    fn glyph_at(&self, pos: Position) -> char {
        match self.tile(pos) {
            Tile::OffBoard | Tile::Empty => '-',
            Tile::RaccoonInCan { .. } => '@',
            Tile::Player(id)
            | Tile::Raccoon(id)
            | Tile::RecyclingBin(id)
            | Tile::OpenCan(id)
            | Tile::LockedCan(id) => self.character(id).glyph(),
        }
    }

    /// The board as rows of glyphs, top row first.
    pub fn to_grid(&self) -> Vec<Vec<char>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.glyph_at(Position::new(x, y)))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                write!(f, "{}", self.glyph_at(Position::new(x, y)))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_grid(s)
    }
}

/// Two boards are equal when they have the same size and every tile holds
/// characters with the same glyphs. Registration order, turns, RNG state and
/// the player's unused input are ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        self.cells.iter().zip(other.cells.iter()).all(|(mine, theirs)| {
            let glyphs = |board: &Board, ids: &Occupants| {
                let mut glyphs: ArrayVec<char, 2> =
                    ids.iter().map(|id| board.character(*id).glyph()).collect();
                glyphs.sort_unstable();
                glyphs
            };
            glyphs(self, mine) == glyphs(other, theirs)
        })
    }
}
