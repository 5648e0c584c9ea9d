// Copyright (C) 2020-2026 Andy Kurnia.

// tile numbering: 0 is the blank, 1..=26 are A..=Z.
// board cells use the same numbers, 0 for empty, with 0x80 set on a blank
// that has been given a letter.

pub struct TileKind {
    label: char,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet {
    kinds: &'static [TileKind],
    num_tiles: u16,
}

pub enum Alphabet {
    Static(StaticAlphabet),
}

impl Alphabet {
    #[inline(always)]
    fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.kinds.len() as u8,
        }
    }

    #[inline(always)]
    fn get(&self, idx: u8) -> &'static TileKind {
        match self {
            Alphabet::Static(x) => &x.kinds[idx as usize],
        }
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        match self {
            Alphabet::Static(x) => x.num_tiles,
        }
    }

    #[inline(always)]
    pub fn freq(&self, tile: Tile) -> u8 {
        self.get(tile.0).freq
    }

    #[inline(always)]
    pub fn score(&self, tile: Tile) -> i8 {
        self.get(tile.0).score
    }

    // blank-as-letter cells score nothing.
    #[inline(always)]
    pub fn cell_score(&self, cell: u8) -> i8 {
        if cell & 0x80 != 0 || cell == 0 {
            0
        } else {
            self.get(cell).score
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.len()).map(Tile)
    }

    // whether the word can be spelled from one full set without blanks.
    pub fn can_spell(&self, word: &str) -> bool {
        let mut tally = vec![0u8; self.len() as usize];
        for c in word.chars() {
            let Some(tile) = Tile::from_letter(c) else {
                return false;
            };
            tally[tile.0 as usize] += 1;
            if tally[tile.0 as usize] > self.freq(tile) {
                return false;
            }
        }
        true
    }
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    kinds: &[
        TileKind { label: '_', freq: 2, score: 0 },
        TileKind { label: 'A', freq: 9, score: 1 },
        TileKind { label: 'B', freq: 2, score: 3 },
        TileKind { label: 'C', freq: 2, score: 3 },
        TileKind { label: 'D', freq: 4, score: 2 },
        TileKind { label: 'E', freq: 12, score: 1 },
        TileKind { label: 'F', freq: 2, score: 4 },
        TileKind { label: 'G', freq: 3, score: 2 },
        TileKind { label: 'H', freq: 2, score: 4 },
        TileKind { label: 'I', freq: 9, score: 1 },
        TileKind { label: 'J', freq: 1, score: 8 },
        TileKind { label: 'K', freq: 1, score: 5 },
        TileKind { label: 'L', freq: 4, score: 1 },
        TileKind { label: 'M', freq: 2, score: 3 },
        TileKind { label: 'N', freq: 6, score: 1 },
        TileKind { label: 'O', freq: 8, score: 1 },
        TileKind { label: 'P', freq: 2, score: 3 },
        TileKind { label: 'Q', freq: 1, score: 10 },
        TileKind { label: 'R', freq: 6, score: 1 },
        TileKind { label: 'S', freq: 4, score: 1 },
        TileKind { label: 'T', freq: 6, score: 1 },
        TileKind { label: 'U', freq: 4, score: 1 },
        TileKind { label: 'V', freq: 2, score: 4 },
        TileKind { label: 'W', freq: 2, score: 4 },
        TileKind { label: 'X', freq: 1, score: 8 },
        TileKind { label: 'Y', freq: 2, score: 4 },
        TileKind { label: 'Z', freq: 1, score: 10 },
    ],
    num_tiles: 100,
});

/// One of the 27 tile symbols. Only constructible through validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u8);

impl Tile {
    pub const BLANK: Tile = Tile(0);

    /// `A`..=`Z` or `_`.
    pub fn from_label(c: char) -> Option<Tile> {
        if c == '_' {
            Some(Tile::BLANK)
        } else {
            Tile::from_letter(c)
        }
    }

    pub fn from_letter(c: char) -> Option<Tile> {
        if c.is_ascii_uppercase() {
            Some(Tile((c as u8) & 0x1f))
        } else {
            None
        }
    }

    /// Accepts exactly one symbol.
    pub fn parse(s: &str) -> Option<Tile> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Tile::from_label(c),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_blank(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn idx(self) -> u8 {
        self.0
    }

    pub fn label(self) -> char {
        match &ENGLISH_ALPHABET {
            Alphabet::Static(x) => x.kinds[self.0 as usize].label,
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl serde::Serialize for Tile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.label().encode_utf8(&mut buf))
    }
}

impl<'de> serde::Deserialize<'de> for Tile {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Tile::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid tile {:?}", s)))
    }
}

/// Label of a board cell, lowercase for a blank. None if empty.
pub fn cell_label(cell: u8) -> Option<char> {
    let c = cell & 0x7f;
    if c == 0 || c > 26 {
        None
    } else if cell & 0x80 == 0 {
        Some((b'@' + c) as char)
    } else {
        Some((b'`' + c) as char)
    }
}

/// Converts a caller-supplied list, or returns None if any entry is not a
/// tile symbol.
pub fn parse_tiles<S: AsRef<str>>(values: &[S]) -> Option<Vec<Tile>> {
    values.iter().map(|s| Tile::parse(s.as_ref())).collect()
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.label()).collect()
}
