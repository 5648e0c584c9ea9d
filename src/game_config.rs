// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout};

pub struct StaticGameConfig {
    alphabet: &'static alphabet::Alphabet,
    board_layout: &'static board_layout::BoardLayout,
    rack_size: i8,
    num_turns: u8,
    num_played_bonus: i16,
    words_per_day: usize,
    fallback_starting_word: &'static str,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &'static alphabet::Alphabet {
        match self {
            GameConfig::Static(x) => x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &'static board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_turns(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_turns,
        }
    }

    // no game ever draws more than this.
    #[inline(always)]
    pub fn tiles_per_day(&self) -> usize {
        self.rack_size() as usize * self.num_turns() as usize
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: usize) -> i16 {
        match self {
            GameConfig::Static(x) => {
                if num_played == x.rack_size as usize {
                    x.num_played_bonus
                } else {
                    0
                }
            }
        }
    }

    #[inline(always)]
    pub fn words_per_day(&self) -> usize {
        match self {
            GameConfig::Static(x) => x.words_per_day,
        }
    }

    #[inline(always)]
    pub fn fallback_starting_word(&self) -> &'static str {
        match self {
            GameConfig::Static(x) => x.fallback_starting_word,
        }
    }

    // 1-based.
    #[inline(always)]
    pub fn is_valid_turn(&self, turn: i64) -> bool {
        (1..=self.num_turns() as i64).contains(&turn)
    }
}

pub fn make_daily_game_config() -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        alphabet: &alphabet::ENGLISH_ALPHABET,
        board_layout: &board_layout::DAILY_BOARD_LAYOUT,
        rack_size: 7,
        num_turns: 5,
        num_played_bonus: 50,
        words_per_day: 10,
        fallback_starting_word: "SAILING",
    })
}
