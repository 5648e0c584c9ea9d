// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error, matrix};

// cells: 0 empty, 1..=26 for A..=Z, 0x80 set if the tile is a blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dim: matrix::Dim,
    tiles: Box<[u8]>,
}

impl Board {
    pub fn new(dim: matrix::Dim) -> Self {
        Self {
            dim,
            tiles: vec![0u8; dim.num_cells()].into_boxed_slice(),
        }
    }

    /// Empty cells are `None`, `""` or `" "`. Letters are case-insensitive.
    pub fn from_rows(
        dim: matrix::Dim,
        rows: &[Vec<Option<String>>],
    ) -> Result<Self, error::InputError> {
        if rows.len() != dim.rows as usize
            || rows.iter().any(|row| row.len() != dim.cols as usize)
        {
            return Err(error::InputError::BadBoardShape {
                rows: rows.len(),
                cols: rows.iter().map(|row| row.len()).max().unwrap_or(0),
            });
        }
        let mut board = Self::new(dim);
        for (row_num, row) in (0i8..).zip(rows.iter()) {
            for (col_num, cell) in (0i8..).zip(row.iter()) {
                let Some(s) = cell.as_deref() else {
                    continue;
                };
                let s = s.trim();
                if s.is_empty() {
                    continue;
                }
                let tile = letter_cell(s).ok_or_else(|| error::InputError::InvalidTile(s.into()))?;
                board.set(row_num, col_num, tile);
            }
        }
        Ok(board)
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    #[inline(always)]
    pub fn at(&self, row: i8, col: i8) -> u8 {
        self.tiles[self.dim.at_row_col(row, col)]
    }

    // off-board counts as empty.
    #[inline(always)]
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        self.dim.contains(row, col) && self.at(row, col) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, row: i8, col: i8, cell: u8) {
        self.tiles[self.dim.at_row_col(row, col)] = cell;
    }

    pub fn has_tiles(&self) -> bool {
        self.tiles.iter().any(|&tile| tile != 0)
    }

    /// Flags an occupied cell as holding a blank. Ignores empty or off-board
    /// cells.
    pub fn mark_blank(&mut self, row: i8, col: i8) {
        if self.is_occupied(row, col) {
            self.tiles[self.dim.at_row_col(row, col)] |= 0x80;
        }
    }

    pub fn letter_at(&self, row: i8, col: i8) -> Option<char> {
        if self.dim.contains(row, col) {
            alphabet::cell_label(self.at(row, col) & 0x7f)
        } else {
            None
        }
    }

    /// Lays the word across the star row, centered on the star column.
    /// Letters that would fall off the board are dropped.
    pub fn place_starting_word(&mut self, board_layout: &board_layout::BoardLayout, word: &str) {
        let row = board_layout.star_row();
        let start_col = board_layout.star_col() as isize - (word.chars().count() / 2) as isize;
        for (col, c) in (start_col..).zip(word.chars()) {
            if let (Ok(col), Some(tile)) = (i8::try_from(col), alphabet::Tile::from_letter(c)) {
                if self.dim.contains(row, col) {
                    self.set(row, col, tile.idx());
                }
            }
        }
    }
}

fn letter_cell(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            alphabet::Tile::from_letter(c.to_ascii_uppercase()).map(|tile| tile.idx())
        }
        _ => None,
    }
}
