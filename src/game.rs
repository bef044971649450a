use crate::board::{Board, Cell, Position};
use crate::notation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    fn cell(&self) -> Cell {
        match self {
            Player::White => Cell::White,
            Player::Black => Cell::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// Whole-game status. The `*Won` states are terminal: no move can be
/// applied once one is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    WhiteToMove,
    BlackToMove,
    WhiteWon,
    BlackWon,
}

impl Status {
    pub fn is_over(&self) -> bool {
        matches!(self, Status::WhiteWon | Status::BlackWon)
    }

    /// The side to move, or `None` once the game is over.
    pub fn turn(&self) -> Option<Player> {
        match self {
            Status::WhiteToMove => Some(Player::White),
            Status::BlackToMove => Some(Player::Black),
            Status::WhiteWon | Status::BlackWon => None,
        }
    }

    fn won_by(player: Player) -> Status {
        match player {
            Player::White => Status::WhiteWon,
            Player::Black => Status::BlackWon,
        }
    }

    fn to_move(player: Player) -> Status {
        match player {
            Player::White => Status::WhiteToMove,
            Player::Black => Status::BlackToMove,
        }
    }
}

/// One full turn: slide a piece from `from` to `to`, then fire an arrow
/// from `to` at `arrow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub arrow: Position,
}

impl Move {
    pub fn new(from: Position, to: Position, arrow: Position) -> Self {
        Move { from, to, arrow }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} / {}", self.from, self.to, self.arrow)
    }
}

/// A configured cell, either as raw grid indices or as a cell name like
/// `"A4"`. Normalized to a [`Position`] once, at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Index(usize, usize),
    Cell(String),
}

impl From<(usize, usize)> for Coord {
    fn from((col, row): (usize, usize)) -> Self {
        Coord::Index(col, row)
    }
}

impl From<&str> for Coord {
    fn from(text: &str) -> Self {
        Coord::Cell(text.to_string())
    }
}

impl From<String> for Coord {
    fn from(text: String) -> Self {
        Coord::Cell(text)
    }
}

/// Board dimensions and initial piece placement. Missing fields fall back
/// to the classic 10×10 setup when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub white_pieces: Vec<Coord>,
    pub black_pieces: Vec<Coord>,
}

impl Default for GameConfig {
    fn default() -> Self {
        // Classic setup: White on A4, D1, G1, J4; Black mirrored above.
        GameConfig {
            width: 10,
            height: 10,
            white_pieces: vec![
                Coord::Index(0, 6),
                Coord::Index(3, 9),
                Coord::Index(6, 9),
                Coord::Index(9, 6),
            ],
            black_pieces: vec![
                Coord::Index(0, 3),
                Coord::Index(3, 0),
                Coord::Index(6, 0),
                Coord::Index(9, 3),
            ],
        }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cell `{0}` cannot be resolved to a board cell")]
    MalformedCoordinate(String),
    #[error("move `{0}` cannot be resolved to a from:to:arrow triple")]
    MalformedMove(String),
    #[error("no piece of the side to move at {0}")]
    NoPieceAtOrigin(String),
    #[error("illegal move {0}")]
    IllegalMove(String),
    #[error("game already over")]
    GameAlreadyOver,
    #[error("history replay failed at move {index} (`{mv}`): {source}")]
    InvalidHistory {
        index: usize,
        mv: String,
        #[source]
        source: Box<GameError>,
    },
}

/// A complete game: board, piece lists, move history and turn status.
///
/// The piece lists mirror the board by construction. Each list keeps its
/// configured order; a moved piece's entry is replaced in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    width: usize,
    height: usize,
    initial_white: Vec<Position>,
    initial_black: Vec<Position>,
    board: Board,
    white_pieces: Vec<Position>,
    black_pieces: Vec<Position>,
    history: Vec<String>,
    status: Status,
}

impl Game {
    /// New game with the classic 10×10 setup.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default()).expect("default configuration is valid")
    }

    /// New game with a custom board. Fails when a configured cell does not
    /// resolve to a square on the board.
    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        let initial_white = resolve_pieces(&config.white_pieces, config.width, config.height)?;
        let initial_black = resolve_pieces(&config.black_pieces, config.width, config.height)?;

        let mut game = Game {
            width: config.width,
            height: config.height,
            initial_white,
            initial_black,
            board: Board::new(config.width, config.height),
            white_pieces: Vec::new(),
            black_pieces: Vec::new(),
            history: Vec::new(),
            status: Status::WhiteToMove,
        };
        game.clear();

        Ok(game)
    }

    /// Construct by replaying a comma-joined move history. The whole
    /// construction fails on the first move that does not replay.
    pub fn from_history(history: &str, config: GameConfig) -> Result<Self, GameError> {
        let mut game = Self::with_config(config)?;
        game.load(history)?;
        Ok(game)
    }

    /// Construct by replaying an ordered list of move texts.
    pub fn from_moves<S: AsRef<str>>(moves: &[S], config: GameConfig) -> Result<Self, GameError> {
        let mut game = Self::with_config(config)?;
        game.load_moves(moves)?;
        Ok(game)
    }

    /// Reset to the configured starting position: board re-placed, history
    /// emptied, White to move.
    pub fn clear(&mut self) {
        self.board = Board::new(self.width, self.height);

        self.white_pieces = self.initial_white.clone();
        for &piece in &self.white_pieces {
            self.board.set(piece.col, piece.row, Cell::White);
        }

        self.black_pieces = self.initial_black.clone();
        for &piece in &self.black_pieces {
            self.board.set(piece.col, piece.row, Cell::Black);
        }

        self.history.clear();
        self.status = Status::WhiteToMove;
    }

    /// Clear, then replay a comma-joined history. On failure the game is
    /// left mid-replay; construction via [`Game::from_history`] discards it.
    pub fn load(&mut self, history: &str) -> Result<(), GameError> {
        let moves: Vec<&str> = if history.is_empty() {
            Vec::new()
        } else {
            history.split(',').collect()
        };
        self.load_moves(&moves)
    }

    /// Clear, then replay an ordered list of move texts.
    pub fn load_moves<S: AsRef<str>>(&mut self, moves: &[S]) -> Result<(), GameError> {
        self.clear();

        for (index, mv) in moves.iter().enumerate() {
            let mv = mv.as_ref();
            self.apply(mv).map_err(|err| GameError::InvalidHistory {
                index,
                mv: mv.to_string(),
                source: Box::new(err),
            })?;
        }

        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// The side to move, or `None` once the game is over.
    pub fn turn(&self) -> Option<Player> {
        self.status.turn()
    }

    /// Applied moves in canonical `from:to:arrow` text, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn white_pieces(&self) -> &[Position] {
        &self.white_pieces
    }

    pub fn black_pieces(&self) -> &[Position] {
        &self.black_pieces
    }

    /// Contents of a named cell.
    pub fn cell(&self, text: &str) -> Result<Cell, GameError> {
        let pos = notation::decode(text, self.width, self.height)?;
        Ok(self.board.rows()[pos.row][pos.col])
    }

    /// Name of a cell on this board.
    pub fn cell_name(&self, pos: Position) -> String {
        notation::encode(pos, self.height)
    }

    /// Canonical text of a move on this board.
    pub fn format_move(&self, mv: &Move) -> String {
        notation::format_move(mv.from, mv.to, mv.arrow, self.height)
    }

    /// Whether the slide and the arrow shot both have line of sight. The
    /// arrow check treats the vacated origin as empty, so an arrow may land
    /// on the square the piece just left.
    pub fn is_legal(&self, from: Position, to: Position, arrow: Position) -> bool {
        self.board.has_line_of_sight(from, to, None)
            && self.board.has_line_of_sight(to, arrow, Some(from))
    }

    /// Text-form legality check. Errors only on unparsable input.
    pub fn is_legal_text(&self, text: &str) -> Result<bool, GameError> {
        let (from, to, arrow) = notation::parse_move(text, self.width, self.height)?;
        Ok(self.is_legal(from, to, arrow))
    }

    /// Every legal move for the side to move, or `None` once the game is
    /// over. An empty list means the side to move has no move left, which
    /// can only be the starting state of a hand-built position; in a played
    /// game the final move already flips the status to a win.
    pub fn legal_moves(&self) -> Option<Vec<Move>> {
        let player = self.status.turn()?;
        let pieces = match player {
            Player::White => &self.white_pieces,
            Player::Black => &self.black_pieces,
        };

        let mut moves = Vec::new();
        for &piece in pieces {
            for dest in self.board.reachable_cells(piece, None) {
                for arrow in self.board.reachable_cells(dest, Some(piece)) {
                    moves.push(Move::new(piece, dest, arrow));
                }
            }
        }

        Some(moves)
    }

    /// [`Game::legal_moves`] in canonical text form.
    pub fn legal_move_texts(&self) -> Option<Vec<String>> {
        self.legal_moves()
            .map(|moves| moves.iter().map(|mv| self.format_move(mv)).collect())
    }

    /// Apply a move given in `from:to:arrow` text.
    pub fn apply(&mut self, text: &str) -> Result<(), GameError> {
        let (from, to, arrow) = notation::parse_move(text, self.width, self.height)?;
        self.apply_move(Move::new(from, to, arrow))
    }

    /// Validate and apply one move, then recompute the game status. Nothing
    /// is mutated on failure.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        let Move { from, to, arrow } = mv;

        let player = match self.status.turn() {
            Some(player) => player,
            None => return Err(GameError::GameAlreadyOver),
        };

        if self.board.get(from.col as i32, from.row as i32) != Some(player.cell()) {
            return Err(GameError::NoPieceAtOrigin(self.cell_name(from)));
        }

        if !self.is_legal(from, to, arrow) {
            return Err(GameError::IllegalMove(self.format_move(&mv)));
        }

        // Slide, vacate, shoot. The arrow may land on the vacated origin.
        self.board.set(to.col, to.row, player.cell());
        self.board.set(from.col, from.row, Cell::Empty);
        self.board.set(arrow.col, arrow.row, Cell::Arrow);

        let pieces = match player {
            Player::White => &mut self.white_pieces,
            Player::Black => &mut self.black_pieces,
        };
        for piece in pieces.iter_mut() {
            if *piece == from {
                *piece = to;
            }
        }

        // The mover wins the moment every opposing piece is immobilized.
        let opponent = player.opponent();
        let opponent_pieces = match opponent {
            Player::White => &self.white_pieces,
            Player::Black => &self.black_pieces,
        };
        let all_surrounded = opponent_pieces
            .iter()
            .all(|&piece| self.board.is_surrounded(piece));

        self.status = if all_surrounded {
            Status::won_by(player)
        } else {
            Status::to_move(opponent)
        };

        self.history.push(self.format_move(&mv));

        Ok(())
    }

    /// Text rendering of the board: `W`/`B` pieces, `O` arrows, `.` empty.
    pub fn ascii(&self) -> String {
        let bar = format!("+{}+", "-".repeat(self.width * 2 + 1));

        let mut out = String::new();
        out.push_str(&bar);
        out.push('\n');
        for row in self.board.rows() {
            out.push('|');
            for &cell in row {
                out.push(' ');
                out.push(match cell {
                    Cell::Empty => '.',
                    Cell::White => 'W',
                    Cell::Black => 'B',
                    Cell::Arrow => 'O',
                });
            }
            out.push_str(" |\n");
        }
        out.push_str(&bar);

        out
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_pieces(
    pieces: &[Coord],
    width: usize,
    height: usize,
) -> Result<Vec<Position>, GameError> {
    pieces
        .iter()
        .map(|coord| match coord {
            Coord::Cell(text) => notation::decode(text, width, height),
            Coord::Index(col, row) => {
                if *col < width && *row < height {
                    Ok(Position::new(*col, *row))
                } else {
                    Err(GameError::MalformedCoordinate(format!("({col}, {row})")))
                }
            }
        })
        .collect()
}
