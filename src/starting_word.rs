// Copyright (C) 2020-2026 Andy Kurnia.

use super::{dictionary, error, game_config, seeded_random};
use std::collections::BTreeMap;

/// Candidate starting words keyed by "MM-DD". Keys iterate in sorted order.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct DailyWords(BTreeMap<String, Vec<String>>);

impl DailyWords {
    pub fn from_json_str(game_config: &game_config::GameConfig, s: &str) -> error::Returns<Self> {
        let daily_words = serde_json::from_str::<DailyWords>(s)?;
        if daily_words.0.is_empty() {
            return_error!("daily word table is empty".into());
        }
        for (key, words) in &daily_words.0 {
            if words.len() != game_config.words_per_day() {
                tracing::warn!(
                    key = key.as_str(),
                    found = words.len(),
                    expected = game_config.words_per_day(),
                    "daily word table entry has the wrong number of words"
                );
            }
        }
        Ok(daily_words)
    }

    pub fn from_file(game_config: &game_config::GameConfig, path: &str) -> error::Returns<Self> {
        Self::from_json_str(game_config, &std::fs::read_to_string(path)?)
    }

    /// None means the fixed fallback word will be used for every seed.
    pub fn load(game_config: &game_config::GameConfig, path: Option<&str>) -> Option<Self> {
        let path = path?;
        match Self::from_file(game_config, path) {
            Ok(daily_words) => {
                tracing::info!(path, days = daily_words.0.len(), "loaded daily words");
                Some(daily_words)
            }
            Err(err) => {
                tracing::warn!(
                    "{}",
                    error::ResourceUnavailable::DailyWords(format!("{}: {}", path, err))
                );
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(|words| words.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for DailyWords {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        DailyWords(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSource {
    Date,
    Hash,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartingWord {
    pub word: String,
    pub source: WordSource,
}

/// In the dictionary, spellable from one tile set, and fits across the board.
pub fn is_valid_starting_word(
    game_config: &game_config::GameConfig,
    dictionary: &dictionary::Dictionary,
    word: &str,
) -> bool {
    let len = word.chars().count();
    len >= 2
        && len <= game_config.board_layout().dim().cols as usize
        && game_config.alphabet().can_spell(word)
        && dictionary.contains(word)
}

// YYYYMMDD with a plausible month and day.
fn parse_date_seed(seed: &str) -> Option<(u32, String)> {
    if seed.len() != 8 || !seed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = seed[..4].parse::<u32>().ok()?;
    let month = seed[4..6].parse::<u32>().ok()?;
    let day = seed[6..].parse::<u32>().ok()?;
    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some((year, format!("{:02}-{:02}", month, day)))
    } else {
        None
    }
}

fn select_by_date(
    game_config: &game_config::GameConfig,
    daily_words: &DailyWords,
    seed: &str,
) -> Option<String> {
    let (year, key) = parse_date_seed(seed)?;
    let words = daily_words.get(&key)?;
    if words.is_empty() {
        return None;
    }
    // legacy links map year to slot; shorter entries wrap.
    let idx = (year as usize % game_config.words_per_day()) % words.len();
    Some(words[idx].to_ascii_uppercase())
}

fn select_by_hash(daily_words: &DailyWords, seed: &str) -> Option<String> {
    if daily_words.is_empty() {
        return None;
    }
    let h = seeded_random::seed_to_int(seed);
    let num_keys = daily_words.len() as u128;
    let words = daily_words.0.values().nth((h % num_keys) as usize)?;
    if words.is_empty() {
        return None;
    }
    let idx = ((h / num_keys) % words.len() as u128) as usize;
    Some(words[idx].to_ascii_uppercase())
}

pub fn select_starting_word(
    game_config: &game_config::GameConfig,
    dictionary: &dictionary::Dictionary,
    daily_words: Option<&DailyWords>,
    seed: &str,
) -> StartingWord {
    if let Some(daily_words) = daily_words {
        let valid = |word: &String| is_valid_starting_word(game_config, dictionary, word);
        if let Some(word) = select_by_date(game_config, daily_words, seed).filter(valid) {
            tracing::debug!(seed, word = word.as_str(), "starting word by date");
            return StartingWord {
                word,
                source: WordSource::Date,
            };
        }
        if let Some(word) = select_by_hash(daily_words, seed).filter(valid) {
            tracing::debug!(seed, word = word.as_str(), "starting word by hash");
            return StartingWord {
                word,
                source: WordSource::Hash,
            };
        }
    }
    tracing::debug!(seed, "starting word fallback");
    StartingWord {
        word: game_config.fallback_starting_word().into(),
        source: WordSource::Fallback,
    }
}
