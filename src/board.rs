use serde::{Deserialize, Serialize};
use std::fmt;

/// The 8 queen-line unit directions: orthogonals first, then diagonals.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Contents of a single board square. An `Arrow` is permanent once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    White,
    Black,
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Position { col, row }
    }

    fn matches(&self, col: i32, row: i32) -> bool {
        self.col as i32 == col && self.row as i32 == row
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A `width × height` grid of cells. Row 0 is the top rank of the printed
/// board; the notation layer maps that to bottom-up rank numbers.
///
/// This layer performs no legality checks: `set` writes unconditionally and
/// callers keep the grid consistent with their piece bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at the given indices, or `None` outside the grid. Signed
    /// arguments so ray walks can step past the edge and stop there.
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            None
        } else {
            Some(self.cells[row as usize][col as usize])
        }
    }

    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Off-board counts as not empty, so rays and adjacency scans never
    /// walk out of the grid.
    pub fn is_empty(&self, col: i32, row: i32) -> bool {
        self.get(col, row) == Some(Cell::Empty)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    fn passable(&self, col: i32, row: i32, ignore: Option<Position>) -> bool {
        ignore.is_some_and(|p| p.matches(col, row)) || self.is_empty(col, row)
    }

    /// Every cell a queen-line slider at `from` can reach: walk each of the
    /// 8 directions, collecting cells until the first blocked one or the
    /// board edge. `ignore` names a single occupied cell treated as empty,
    /// used for the mover's vacated origin while picking arrow targets.
    pub fn reachable_cells(&self, from: Position, ignore: Option<Position>) -> Vec<Position> {
        let mut cells = Vec::new();

        for &(dc, dr) in &DIRECTIONS {
            let mut col = from.col as i32 + dc;
            let mut row = from.row as i32 + dr;

            while self.passable(col, row, ignore) {
                cells.push(Position::new(col as usize, row as usize));
                col += dc;
                row += dr;
            }
        }

        cells
    }

    /// Whether `to` is reachable from `from` along a clear queen line. The
    /// walk starts one step out from `from` and must land on `to` itself,
    /// so `from == to` is never in sight. `to` has to be empty or the
    /// `ignore` cell, like every cell on the way.
    pub fn has_line_of_sight(
        &self,
        from: Position,
        to: Position,
        ignore: Option<Position>,
    ) -> bool {
        let dcol = to.col as i32 - from.col as i32;
        let drow = to.row as i32 - from.row as i32;

        if dcol == 0 && drow == 0 {
            return false;
        }

        // Not on a shared rank, file or diagonal
        if dcol != 0 && drow != 0 && dcol.abs() != drow.abs() {
            return false;
        }

        let (dc, dr) = (dcol.signum(), drow.signum());
        let mut col = from.col as i32 + dc;
        let mut row = from.row as i32 + dr;

        while self.passable(col, row, ignore) {
            if to.matches(col, row) {
                return true;
            }
            col += dc;
            row += dr;
        }

        false
    }

    /// A piece is immobilized when all 8 neighbours are occupied, the board
    /// edge counting as occupied.
    pub fn is_surrounded(&self, pos: Position) -> bool {
        DIRECTIONS
            .iter()
            .all(|&(dc, dr)| !self.is_empty(pos.col as i32 + dc, pos.row as i32 + dr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(usize, usize, Cell)]) -> Board {
        let mut board = Board::new(5, 5);
        for &(col, row, cell) in cells {
            board.set(col, row, cell);
        }
        board
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let board = Board::new(5, 5);

        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(5, 0), None);
        assert_eq!(board.get(0, 5), None);
        assert_eq!(board.get(2, 2), Some(Cell::Empty));
    }

    #[test]
    fn test_off_board_is_never_empty() {
        let board = Board::new(5, 5);

        assert!(!board.is_empty(-1, -1));
        assert!(!board.is_empty(5, 2));
        assert!(board.is_empty(0, 0));
    }

    #[test]
    fn test_reachable_cells_open_board() {
        let board = Board::new(5, 5);

        let cells = board.reachable_cells(Position::new(2, 2), None);

        // Queen in the middle of an empty 5x5: 4 cells per rank/file axis
        // pair and 4 per diagonal pair.
        assert_eq!(cells.len(), 16);
        assert!(cells.contains(&Position::new(2, 0)));
        assert!(cells.contains(&Position::new(0, 0)));
        assert!(cells.contains(&Position::new(4, 4)));
        assert!(cells.contains(&Position::new(0, 4)));
        assert!(!cells.contains(&Position::new(2, 2)));
    }

    #[test]
    fn test_reachable_cells_stop_at_blocker() {
        let board = board_with(&[(2, 0, Cell::Arrow)]);

        let cells = board.reachable_cells(Position::new(2, 4), None);

        // Walking up column 2 stops below the arrow, excluding it.
        assert!(cells.contains(&Position::new(2, 1)));
        assert!(!cells.contains(&Position::new(2, 0)));
    }

    #[test]
    fn test_reachable_cells_pass_through_ignored() {
        let blocker = Position::new(2, 2);
        let board = board_with(&[(2, 2, Cell::White)]);

        let without = board.reachable_cells(Position::new(2, 4), None);
        let with = board.reachable_cells(Position::new(2, 4), Some(blocker));

        assert!(!without.contains(&blocker));
        assert!(!without.contains(&Position::new(2, 1)));
        // The ignored cell itself is reachable, and so is everything beyond.
        assert!(with.contains(&blocker));
        assert!(with.contains(&Position::new(2, 0)));
    }

    #[test]
    fn test_reachable_cells_are_empty_and_collinear() {
        let board = board_with(&[
            (1, 1, Cell::Arrow),
            (3, 2, Cell::Black),
            (0, 4, Cell::White),
        ]);
        let from = Position::new(2, 2);

        for cell in board.reachable_cells(from, None) {
            assert!(board.is_empty(cell.col as i32, cell.row as i32));

            let dcol = cell.col as i32 - from.col as i32;
            let drow = cell.row as i32 - from.row as i32;
            assert!(dcol == 0 || drow == 0 || dcol.abs() == drow.abs());
        }
    }

    #[test]
    fn test_line_of_sight_straight_and_diagonal() {
        let board = Board::new(5, 5);

        assert!(board.has_line_of_sight(Position::new(0, 0), Position::new(4, 0), None));
        assert!(board.has_line_of_sight(Position::new(0, 0), Position::new(0, 4), None));
        assert!(board.has_line_of_sight(Position::new(0, 0), Position::new(4, 4), None));
        assert!(board.has_line_of_sight(Position::new(4, 0), Position::new(0, 4), None));
    }

    #[test]
    fn test_line_of_sight_rejects_non_collinear() {
        let board = Board::new(5, 5);

        assert!(!board.has_line_of_sight(Position::new(0, 0), Position::new(1, 2), None));
        assert!(!board.has_line_of_sight(Position::new(2, 3), Position::new(4, 2), None));
    }

    #[test]
    fn test_line_of_sight_rejects_same_cell() {
        let board = Board::new(5, 5);

        assert!(!board.has_line_of_sight(Position::new(2, 2), Position::new(2, 2), None));
    }

    #[test]
    fn test_line_of_sight_blocked() {
        let board = board_with(&[(2, 2, Cell::Arrow)]);

        assert!(!board.has_line_of_sight(Position::new(0, 2), Position::new(4, 2), None));
        assert!(!board.has_line_of_sight(Position::new(0, 0), Position::new(4, 4), None));
    }

    #[test]
    fn test_line_of_sight_through_ignored_cell() {
        let blocker = Position::new(2, 2);
        let board = board_with(&[(2, 2, Cell::White)]);

        assert!(!board.has_line_of_sight(Position::new(0, 2), Position::new(4, 2), None));
        assert!(board.has_line_of_sight(Position::new(0, 2), Position::new(4, 2), Some(blocker)));
        // The ignored cell is also a valid endpoint.
        assert!(board.has_line_of_sight(Position::new(0, 2), blocker, Some(blocker)));
    }

    #[test]
    fn test_line_of_sight_target_must_be_clear() {
        let board = board_with(&[(4, 2, Cell::Black)]);

        assert!(!board.has_line_of_sight(Position::new(0, 2), Position::new(4, 2), None));
    }

    #[test]
    fn test_line_of_sight_symmetry_between_empty_cells() {
        let board = board_with(&[(2, 2, Cell::Arrow), (1, 3, Cell::White)]);
        let ignore = Some(Position::new(1, 3));

        let pairs = [
            (Position::new(0, 0), Position::new(4, 0)),
            (Position::new(0, 2), Position::new(4, 2)),
            (Position::new(0, 4), Position::new(4, 0)),
            (Position::new(3, 1), Position::new(1, 3)),
        ];

        for (a, b) in pairs {
            assert_eq!(
                board.has_line_of_sight(a, b, ignore),
                board.has_line_of_sight(b, a, ignore),
                "sight between {a} and {b} should be symmetric"
            );
        }
    }

    #[test]
    fn test_surrounded_in_corner() {
        let board = board_with(&[
            (1, 0, Cell::Arrow),
            (0, 1, Cell::Black),
            (1, 1, Cell::Arrow),
        ]);

        assert!(board.is_surrounded(Position::new(0, 0)));
    }

    #[test]
    fn test_not_surrounded_with_open_neighbour() {
        let board = board_with(&[(1, 0, Cell::Arrow), (0, 1, Cell::Black)]);

        assert!(!board.is_surrounded(Position::new(0, 0)));
    }
}
