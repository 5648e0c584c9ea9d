// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, error, game_config, placement, play_scorer};

/// A game in progress: the board after the starting word and every turn
/// played so far.
pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig,
    pub board: board::Board,
    pub scores: Vec<i16>,
    pub turn: u8,
    play_scorer: play_scorer::PlayScorer,
}

impl Clone for GameState<'_> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            game_config: self.game_config,
            board: self.board.clone(),
            scores: self.scores.clone(),
            turn: self.turn,
            play_scorer: play_scorer::PlayScorer::new(),
        }
    }
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig, starting_word: &str) -> Self {
        let board_layout = game_config.board_layout();
        let mut board = board::Board::new(board_layout.dim());
        board.place_starting_word(board_layout, starting_word);
        Self {
            game_config,
            board,
            scores: Vec::with_capacity(game_config.num_turns() as usize),
            turn: 1,
            play_scorer: play_scorer::PlayScorer::new(),
        }
    }

    #[inline(always)]
    pub fn is_over(&self) -> bool {
        self.turn > self.game_config.num_turns()
    }

    #[inline(always)]
    pub fn total(&self) -> i32 {
        self.scores.iter().map(|&score| score as i32).sum()
    }

    /// Scores this turn's tiles against the board as it stands, then puts
    /// them down and moves to the next turn. No tiles scores zero. Legality is
    /// not rechecked here beyond what keeps the board consistent.
    pub fn play(
        &mut self,
        placed_tiles: &[placement::PlacedTile],
    ) -> Result<i16, error::InputError> {
        let dim = self.board.dim();
        for (i, tile) in placed_tiles.iter().enumerate() {
            if !dim.contains(tile.row, tile.col) {
                return Err(error::InputError::TileOffBoard {
                    row: tile.row as i64,
                    col: tile.col as i64,
                });
            }
            if self.board.is_occupied(tile.row, tile.col)
                || placed_tiles[..i]
                    .iter()
                    .any(|t| t.row == tile.row && t.col == tile.col)
            {
                return Err(error::InputError::SquareReused {
                    row: tile.row,
                    col: tile.col,
                });
            }
        }

        let score = if placed_tiles.is_empty() {
            0
        } else {
            let words = placement::extract_words(&self.board, placed_tiles);
            self.play_scorer
                .compute_score(self.game_config, &self.board, placed_tiles, &words, &[])
        };
        // blanks keep their flag so later turns score them as zero.
        for tile in placed_tiles {
            self.board.set(tile.row, tile.col, tile.cell());
        }
        self.scores.push(score);
        self.turn += 1;
        Ok(score)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TurnScores {
    pub scores: Vec<i16>,
    pub total: i32,
}

/// Replays a finished game from the starting word, one turn at a time in turn
/// order, scoring each turn against the board left by the turns before it.
pub fn reconstruct_scores(
    game_config: &game_config::GameConfig,
    starting_word: &str,
    tiles: &[placement::PlacedTile],
) -> Result<TurnScores, error::InputError> {
    if let Some(tile) = tiles
        .iter()
        .find(|tile| !game_config.is_valid_turn(tile.turn as i64))
    {
        return Err(error::InputError::TurnOutOfRange(tile.turn as i64));
    }
    let mut game_state = GameState::new(game_config, starting_word);
    let mut turn_tiles = Vec::new();
    while !game_state.is_over() {
        turn_tiles.clear();
        turn_tiles.extend(tiles.iter().filter(|tile| tile.turn == game_state.turn));
        let score = game_state.play(&turn_tiles)?;
        tracing::debug!(
            turn = game_state.turn - 1,
            tiles = turn_tiles.len(),
            score,
            "rescored turn"
        );
    }
    Ok(TurnScores {
        total: game_state.total(),
        scores: game_state.scores,
    })
}
