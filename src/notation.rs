//! Cell and move notation.
//!
//! Columns use spreadsheet-style letters (`A..Z`, then `AA..`), 0-indexed
//! from the left edge. Rows are numbered from 1 at the bottom of the board
//! upward, independent of the grid's internal top-down row indices, so the
//! bottom-left cell of any board is `A1`. A move is three cells joined by
//! `:`, e.g. `A4:A3:A2` for slide-from, slide-to and arrow target.

use crate::board::Position;
use crate::game::GameError;

/// Spreadsheet-style name for a 0-indexed column: 0 is `A`, 25 is `Z`,
/// 26 is `AA`.
pub fn column_name(col: usize) -> String {
    let mut name = String::new();
    let mut col = col as i64;

    loop {
        name.insert(0, char::from(b'A' + (col % 26) as u8));
        col = col / 26 - 1;
        if col < 0 {
            break;
        }
    }

    name
}

/// Inverse of [`column_name`]. `None` for anything but uppercase letters.
pub fn column_index(text: &str) -> Option<usize> {
    if text.is_empty() {
        return None;
    }

    let mut value: usize = 0;
    for ch in text.chars() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        value = value
            .checked_mul(26)?
            .checked_add(ch as usize - 'A' as usize + 1)?;
    }

    Some(value - 1)
}

/// Textual name of a cell on a board of the given height.
pub fn encode(pos: Position, height: usize) -> String {
    format!("{}{}", column_name(pos.col), height - pos.row)
}

/// Resolve a cell name to grid indices on a `width × height` board.
pub fn decode(text: &str, width: usize, height: usize) -> Result<Position, GameError> {
    let malformed = || GameError::MalformedCoordinate(text.to_string());

    let split = text.find(|c: char| !c.is_ascii_uppercase()).ok_or_else(malformed)?;
    let (letters, digits) = text.split_at(split);

    let col = column_index(letters).ok_or_else(malformed)?;
    let rank: usize = digits.parse().map_err(|_| malformed())?;

    if col >= width || rank < 1 || rank > height {
        return Err(malformed());
    }

    Ok(Position::new(col, height - rank))
}

/// Split a `from:to:arrow` move into its three cells.
pub fn parse_move(
    text: &str,
    width: usize,
    height: usize,
) -> Result<(Position, Position, Position), GameError> {
    let cells: Vec<&str> = text.split(':').collect();

    if cells.len() != 3 {
        return Err(GameError::MalformedMove(text.to_string()));
    }

    Ok((
        decode(cells[0], width, height)?,
        decode(cells[1], width, height)?,
        decode(cells[2], width, height)?,
    ))
}

/// Canonical text of a move on a board of the given height.
pub fn format_move(from: Position, to: Position, arrow: Position, height: usize) -> String {
    format!(
        "{}:{}:{}",
        encode(from, height),
        encode(to, height),
        encode(arrow, height)
    )
}
