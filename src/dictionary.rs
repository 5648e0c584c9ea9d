// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;
use std::collections::HashSet;

/// Read-only word list. `AcceptAll` stands in when no usable list exists.
#[derive(Clone, Debug)]
pub enum Dictionary {
    Words(HashSet<String>),
    AcceptAll,
}

fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl Dictionary {
    /// One word per line.
    pub fn from_word_list(giant_string: &str) -> Self {
        Dictionary::Words(
            giant_string
                .lines()
                .map(normalize)
                .filter(|word| !word.is_empty())
                .collect(),
        )
    }

    pub fn from_file(path: &str) -> error::Returns<Self> {
        let giant_string = std::fs::read_to_string(path)?;
        let dictionary = Self::from_word_list(&giant_string);
        if dictionary.len() == 0 {
            return_error!(format!("{} has no words", path));
        }
        Ok(dictionary)
    }

    /// Falls back to accepting every word if the list cannot be read.
    pub fn load_or_accept_all(path: Option<&str>) -> Self {
        let Some(path) = path else {
            tracing::warn!(
                "{}",
                error::ResourceUnavailable::Dictionary("no word list given".into())
            );
            return Dictionary::AcceptAll;
        };
        match Self::from_file(path) {
            Ok(dictionary) => {
                tracing::info!(path, words = dictionary.len(), "loaded dictionary");
                dictionary
            }
            Err(err) => {
                tracing::warn!(
                    "{}",
                    error::ResourceUnavailable::Dictionary(format!("{}: {}", path, err))
                );
                Dictionary::AcceptAll
            }
        }
    }

    // case-insensitive, spaces ignored.
    pub fn contains(&self, word: &str) -> bool {
        match self {
            Dictionary::Words(words) => words.contains(&normalize(word)),
            Dictionary::AcceptAll => true,
        }
    }

    fn len(&self) -> usize {
        match self {
            Dictionary::Words(words) => words.len(),
            Dictionary::AcceptAll => 0,
        }
    }
}
