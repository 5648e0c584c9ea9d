// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, dictionary, error, matrix};

/// A tile put down this turn. A blank carries the letter it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedTile {
    pub row: i8,
    pub col: i8,
    pub letter: alphabet::Tile,
    pub is_blank: bool,
    pub turn: u8,
}

impl PlacedTile {
    #[inline(always)]
    pub fn cell(&self) -> u8 {
        if self.is_blank {
            self.letter.idx() | 0x80
        } else {
            self.letter.idx()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub positions: Vec<(i8, i8)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub violation: error::RuleViolation,
    pub words_formed: Vec<Word>,
}

impl From<error::RuleViolation> for Rejection {
    fn from(violation: error::RuleViolation) -> Self {
        Self {
            violation,
            words_formed: Vec::new(),
        }
    }
}

/// The board with this turn's tiles put down.
pub fn overlay(board: &board::Board, placed_tiles: &[PlacedTile]) -> board::Board {
    let mut scratch = board.clone();
    for tile in placed_tiles {
        scratch.set(tile.row, tile.col, tile.cell());
    }
    scratch
}

/// Puts the letters of word down from (row, col), stepping over occupied
/// squares. Lowercase letters are blanks.
pub fn lay_out_word(
    board: &board::Board,
    row: i8,
    col: i8,
    down: bool,
    word: &str,
    turn: u8,
) -> Result<Vec<PlacedTile>, error::InputError> {
    let dim = board.dim();
    let (lane, mut idx) = if down { (col, row) } else { (row, col) };
    let mut placed_tiles = Vec::with_capacity(word.len());
    for ch in word.chars() {
        let letter = alphabet::Tile::from_letter(ch.to_ascii_uppercase())
            .ok_or_else(|| error::InputError::InvalidTile(ch.to_string()))?;
        let (row, col) = loop {
            let (r, c) = matrix::Dim::row_col_in_lane(down, lane, idx);
            if !dim.contains(r, c) {
                return Err(error::InputError::TileOffBoard {
                    row: r as i64,
                    col: c as i64,
                });
            }
            if !board.is_occupied(r, c) {
                break (r, c);
            }
            idx += 1;
        };
        placed_tiles.push(PlacedTile {
            row,
            col,
            letter,
            is_blank: ch.is_ascii_lowercase(),
            turn,
        });
        idx += 1;
    }
    Ok(placed_tiles)
}

// across when every tile shares a row, otherwise down.
fn is_down(placed_tiles: &[PlacedTile]) -> bool {
    placed_tiles.iter().any(|t| t.row != placed_tiles[0].row)
}

fn word_along(
    board: &board::Board,
    down: bool,
    lane: i8,
    lo: i8,
    hi: i8,
) -> Option<Word> {
    let mut text = String::new();
    let mut positions = Vec::new();
    for idx in lo..=hi {
        let (row, col) = matrix::Dim::row_col_in_lane(down, lane, idx);
        if let Some(c) = board.letter_at(row, col) {
            text.push(c);
            positions.push((row, col));
        }
    }
    if positions.len() > 1 {
        Some(Word { text, positions })
    } else {
        None
    }
}

// widest occupied run through [lo, hi] along a lane.
fn extend_run(board: &board::Board, strider: &matrix::Strider, mut lo: i8, mut hi: i8) -> (i8, i8) {
    let tiles = board.tiles();
    while lo > 0 && tiles[strider.at(lo - 1)] != 0 {
        lo -= 1;
    }
    while hi + 1 < strider.len() && tiles[strider.at(hi + 1)] != 0 {
        hi += 1;
    }
    (lo, hi)
}

/// Every word of two or more letters that the placed tiles complete: the
/// main word along their shared line, then one cross word per tile.
/// Tiles must share a row or a column.
pub fn extract_words(board: &board::Board, placed_tiles: &[PlacedTile]) -> Vec<Word> {
    let mut words = Vec::new();
    if placed_tiles.is_empty() {
        return words;
    }
    let scratch = overlay(board, placed_tiles);
    let dim = scratch.dim();
    let down = is_down(placed_tiles);
    let lane_and_idx = |t: &PlacedTile| if down { (t.col, t.row) } else { (t.row, t.col) };

    let lane = lane_and_idx(&placed_tiles[0]).0;
    let min_idx = placed_tiles.iter().map(|t| lane_and_idx(t).1).min().unwrap_or(0);
    let max_idx = placed_tiles.iter().map(|t| lane_and_idx(t).1).max().unwrap_or(0);
    let (lo, hi) = extend_run(&scratch, &dim.lane(down, lane), min_idx, max_idx);
    words.extend(word_along(&scratch, down, lane, lo, hi));

    for tile in placed_tiles {
        let (tile_lane, tile_idx) = lane_and_idx(tile);
        let perpendicular_strider = dim.lane(!down, tile_idx);
        let (lo, hi) = extend_run(&scratch, &perpendicular_strider, tile_lane, tile_lane);
        if lo != hi {
            words.extend(word_along(&scratch, !down, tile_idx, lo, hi));
        }
    }
    words
}

/// Checks geometry, then connectivity, then (unless debugging) that every
/// formed word is in the dictionary. Returns the formed words if legal.
pub fn validate_placement(
    board: &board::Board,
    placed_tiles: &[PlacedTile],
    dictionary: &dictionary::Dictionary,
    debug_mode: bool,
) -> Result<Vec<Word>, Rejection> {
    let Some(first) = placed_tiles.first() else {
        return Err(error::RuleViolation::NoTilesPlaced.into());
    };
    let dim = board.dim();

    for (i, tile) in placed_tiles.iter().enumerate() {
        if !dim.contains(tile.row, tile.col) {
            return Err(error::RuleViolation::OutOfBounds {
                row: tile.row,
                col: tile.col,
            }
            .into());
        }
        if placed_tiles[..i]
            .iter()
            .any(|t| t.row == tile.row && t.col == tile.col)
        {
            return Err(error::RuleViolation::SquareTakenTwice {
                row: tile.row,
                col: tile.col,
            }
            .into());
        }
        if board.is_occupied(tile.row, tile.col) {
            return Err(error::RuleViolation::SquareOccupied {
                row: tile.row,
                col: tile.col,
            }
            .into());
        }
    }

    let same_row = placed_tiles.iter().all(|t| t.row == first.row);
    let same_col = placed_tiles.iter().all(|t| t.col == first.col);
    if !same_row && !same_col {
        return Err(error::RuleViolation::NotInLine.into());
    }

    let down = !same_row;
    let (lane, idxs) = if down {
        (first.col, placed_tiles.iter().map(|t| t.row).collect::<Vec<_>>())
    } else {
        (first.row, placed_tiles.iter().map(|t| t.col).collect::<Vec<_>>())
    };
    let min_idx = idxs.iter().copied().min().unwrap_or(0);
    let max_idx = idxs.iter().copied().max().unwrap_or(0);
    for idx in min_idx..=max_idx {
        let (row, col) = matrix::Dim::row_col_in_lane(down, lane, idx);
        if !idxs.contains(&idx) && !board.is_occupied(row, col) {
            return Err(error::RuleViolation::HasGaps.into());
        }
    }

    if board.has_tiles() {
        let connected = placed_tiles.iter().any(|t| {
            [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .iter()
                .any(|(dr, dc)| board.is_occupied(t.row + dr, t.col + dc))
        });
        if !connected {
            return Err(error::RuleViolation::NotConnected.into());
        }
    }

    let words_formed = extract_words(board, placed_tiles);

    if !debug_mode {
        let invalid_words = words_formed
            .iter()
            .filter(|word| !dictionary.contains(&word.text))
            .map(|word| word.text.clone())
            .collect::<Vec<_>>();
        if !invalid_words.is_empty() {
            return Err(Rejection {
                violation: error::RuleViolation::InvalidWords(invalid_words),
                words_formed,
            });
        }
    }

    Ok(words_formed)
}
