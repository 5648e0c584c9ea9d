// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod api;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod dictionary;
pub mod display;
pub mod game_config;
pub mod game_state;
pub mod matrix;
pub mod placement;
pub mod play_scorer;
pub mod rack;
pub mod seeded_random;
pub mod starting_word;
