//! Move notation: one row letter `a`-`h` and one column digit `1`-`8`,
//! in either order, anywhere in the text.

use crate::error::MoveError;
use crate::types::Position;

/// Parses text such as `"d3"`, `"3d"` or `"(d, 3)"` into a position.
///
/// Fails unless exactly one row letter and exactly one column digit occur.
/// Whether the position fits the board is checked later by the board.
pub fn parse_move(text: &str) -> Result<Position, MoveError> {
    let invalid = || MoveError::InvalidNotation(text.to_string());

    let row = single_match(text, b'a'..=b'h').ok_or_else(invalid)?;
    let col = single_match(text, b'1'..=b'8').ok_or_else(invalid)?;

    Ok(Position::new(row - b'a', col - b'1'))
}

fn single_match(text: &str, range: std::ops::RangeInclusive<u8>) -> Option<u8> {
    let mut found = text.bytes().filter(|b| range.contains(b));
    match (found.next(), found.next()) {
        (Some(b), None) => Some(b),
        _ => None,
    }
}
