// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, game_config, placement};

pub struct PlayScorer {
    // true for squares covered this turn, indexed like the board.
    is_new: Vec<bool>,
}

impl PlayScorer {
    pub fn new() -> Self {
        Self { is_new: Vec::new() }
    }

    /// Scores the words a legal placement formed. Premiums count only under
    /// tiles placed this turn. Blanks score nothing whenever they were played;
    /// earlier blanks are either flagged on the board or listed separately.
    pub fn compute_score(
        &mut self,
        game_config: &game_config::GameConfig,
        board: &board::Board,
        placed_tiles: &[placement::PlacedTile],
        words: &[placement::Word],
        existing_blank_positions: &[(i8, i8)],
    ) -> i16 {
        let alphabet = game_config.alphabet();
        let board_layout = game_config.board_layout();
        let dim = board.dim();

        let mut scratch = placement::overlay(board, placed_tiles);
        for &(row, col) in existing_blank_positions {
            scratch.mark_blank(row, col);
        }
        self.is_new.clear();
        self.is_new.resize(dim.num_cells(), false);
        for tile in placed_tiles {
            self.is_new[dim.at_row_col(tile.row, tile.col)] = true;
        }

        let mut recounted_score = 0i16;
        for word in words {
            let mut word_multiplier = 1;
            let mut word_score = 0i16;
            for &(row, col) in &word.positions {
                let face_value_tile_score = alphabet.cell_score(scratch.at(row, col));
                let tile_multiplier = if self.is_new[dim.at_row_col(row, col)] {
                    let premium = board_layout.premium_at(row, col);
                    word_multiplier *= premium.word_multiplier as i16;
                    premium.letter_multiplier
                } else {
                    1
                };
                word_score += face_value_tile_score as i16 * tile_multiplier as i16;
            }
            recounted_score += word_score * word_multiplier;
        }
        recounted_score + game_config.num_played_bonus(placed_tiles.len())
    }
}

impl Default for PlayScorer {
    fn default() -> Self {
        Self::new()
    }
}
