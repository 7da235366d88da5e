use kaizo_core::logic::board::{Coord, BOARD_SIZE};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected a move like C3D4, got {0:?}")]
    Length(String),
    #[error("file must be a letter from A to G, got {0:?}")]
    File(char),
    #[error("rank must be a digit from 1 to 7, got {0:?}")]
    Rank(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { from: Coord, to: Coord },
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(Command::Quit);
    }
    let (from, to) = parse_move(trimmed)?;
    Ok(Command::Move { from, to })
}

/// Parses `C3D4`-style notation. Case and inner spaces are ignored.
pub fn parse_move(text: &str) -> Result<(Coord, Coord), InputError> {
    let chars: Vec<char> = text.chars().filter(|ch| !ch.is_whitespace()).collect();
    let [from_file, from_rank, to_file, to_rank] = chars[..] else {
        return Err(InputError::Length(text.to_owned()));
    };
    Ok((
        parse_square(from_file, from_rank)?,
        parse_square(to_file, to_rank)?,
    ))
}

pub fn parse_square(file: char, rank: char) -> Result<Coord, InputError> {
    let col = match file.to_ascii_uppercase() {
        letter @ 'A'..='G' => letter as usize - 'A' as usize,
        _ => return Err(InputError::File(file)),
    };
    let row = match rank.to_digit(10) {
        Some(digit @ 1..=7) => BOARD_SIZE - digit as usize,
        _ => return Err(InputError::Rank(rank)),
    };
    Coord::new(row, col).ok_or(InputError::Rank(rank))
}
