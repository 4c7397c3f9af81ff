//! Conversions between algebraic coordinates and mailbox square indices.
//!
//! The mapping `index = A1 + file - 10 * rank` is an exact bijection over the
//! playable squares and is reused by the FEN codec and the UCI layer.

use crate::game_state::chess_rules::A1;
use crate::game_state::chess_types::Square;

/// Convert a coordinate string (for example: "e4") to a board index.
pub fn parse_coordinates(coordinate: &str) -> Result<Square, String> {
    let bytes = coordinate.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("invalid coordinate: {coordinate}"));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("invalid file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("invalid rank: {}", rank as char));
    }

    let file = i32::from(file - b'a');
    let rank = i32::from(rank - b'1');
    Ok((A1 as i32 + file - 10 * rank) as Square)
}

/// Convert a board index back to a coordinate string (for example: "e4").
pub fn render_coordinates(index: Square) -> Result<String, String> {
    let delta = index as i32 - A1 as i32;
    let file = delta.rem_euclid(10);
    let rank = -delta.div_euclid(10);
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return Err(format!("index {index} is not a playable square"));
    }

    let file_char = char::from(b'a' + file as u8);
    let rank_char = char::from(b'1' + rank as u8);
    Ok(format!("{file_char}{rank_char}"))
}
