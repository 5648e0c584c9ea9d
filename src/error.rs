// Copyright (C) 2020-2026 Andy Kurnia.

pub struct MyError {
    s: String,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(s: String) -> MyError {
    MyError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

/// Malformed request. Processing stops; reported as a response field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    MissingSeed,
    MissingTiles,
    MissingWords,
    TurnOutOfRange(i64),
    InvalidTile(String),
    BadBoardShape { rows: usize, cols: usize },
    TileMissingField { idx: usize, field: &'static str },
    TileOffBoard { row: i64, col: i64 },
    SquareReused { row: i8, col: i8 },
    NothingToExchange,
    ExchangeTileNotInRack(char),
    InvalidJson(String),
}

impl std::error::Error for InputError {}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::MissingSeed => write!(f, "Missing seed parameter"),
            InputError::MissingTiles => write!(f, "Missing tiles parameter"),
            InputError::MissingWords => write!(f, "No words provided"),
            InputError::TurnOutOfRange(turn) => {
                write!(f, "Invalid turn {} (must be 1-5)", turn)
            }
            InputError::InvalidTile(s) => write!(f, "Invalid tile {:?}", s),
            InputError::BadBoardShape { rows, cols } => {
                write!(f, "Board must be 9x9, found {} rows and {} cols", rows, cols)
            }
            InputError::TileMissingField { idx, field } => {
                write!(f, "Tile {} missing required field: {}", idx, field)
            }
            InputError::TileOffBoard { row, col } => {
                write!(f, "Tile at ({}, {}) is off the board", row, col)
            }
            InputError::SquareReused { row, col } => {
                write!(f, "Square ({}, {}) was played more than once", row, col)
            }
            InputError::NothingToExchange => write!(f, "No tiles selected for exchange"),
            InputError::ExchangeTileNotInRack(c) => {
                write!(f, "Cannot exchange {}, it is not on the rack", c)
            }
            InputError::InvalidJson(s) => write!(f, "Error reading request: {}", s),
        }
    }
}

/// Illegal placement. Never fatal; the player may try another placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    NoTilesPlaced,
    OutOfBounds { row: i8, col: i8 },
    SquareTakenTwice { row: i8, col: i8 },
    SquareOccupied { row: i8, col: i8 },
    NotInLine,
    HasGaps,
    NotConnected,
    InvalidWords(Vec<String>),
}

impl std::error::Error for RuleViolation {}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleViolation::NoTilesPlaced => write!(f, "No tiles placed"),
            RuleViolation::OutOfBounds { row, col } => {
                write!(f, "Tile at ({}, {}) is off the board", row, col)
            }
            RuleViolation::SquareTakenTwice { row, col } => {
                write!(f, "Two tiles placed on ({}, {})", row, col)
            }
            RuleViolation::SquareOccupied { row, col } => {
                write!(f, "Square ({}, {}) is already occupied", row, col)
            }
            RuleViolation::NotInLine => write!(f, "Tiles must be placed in a straight line"),
            RuleViolation::HasGaps => {
                write!(f, "Tiles must form a continuous word without gaps")
            }
            RuleViolation::NotConnected => write!(f, "Word must connect to existing tiles"),
            RuleViolation::InvalidWords(words) => {
                write!(f, "Invalid word(s): {}", words.join(", "))
            }
        }
    }
}

/// Untrustworthy caller-supplied state. Recovered by recomputing from the
/// seed and turn alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateInconsistency {
    TileNotInRack { turn: u8, tile: char },
    CorruptTiles,
    ImplausibleDrawCount { tiles_drawn: i64, turn: u8 },
    DroppedInvalidTiles(usize),
    ExchangeNotReplayed { exchange_count: u32 },
}

impl std::error::Error for StateInconsistency {}

impl std::fmt::Display for StateInconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateInconsistency::TileNotInRack { turn, tile } => {
                write!(f, "Letter {} not in rack for turn {}", tile, turn)
            }
            StateInconsistency::CorruptTiles => {
                write!(f, "Rack contained invalid tiles, recalculated from scratch")
            }
            StateInconsistency::ImplausibleDrawCount { tiles_drawn, turn } => write!(
                f,
                "Draw counter {} is implausible for turn {}, recalculated",
                tiles_drawn, turn
            ),
            StateInconsistency::DroppedInvalidTiles(n) => {
                write!(f, "Ignored {} invalid shop tile(s)", n)
            }
            StateInconsistency::ExchangeNotReplayed { exchange_count } => write!(
                f,
                "Exchange {} does not fit the play history, ignored",
                exchange_count
            ),
        }
    }
}

/// A collaborator resource could not be used. The core degrades instead of
/// failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUnavailable {
    Dictionary(String),
    DailyWords(String),
}

impl std::error::Error for ResourceUnavailable {}

impl std::fmt::Display for ResourceUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceUnavailable::Dictionary(s) => {
                write!(f, "Dictionary unavailable, accepting all words: {}", s)
            }
            ResourceUnavailable::DailyWords(s) => {
                write!(f, "Daily word table unavailable, using fallback word: {}", s)
            }
        }
    }
}

/// A value computed after some caller-supplied state was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovered<T> {
    pub value: T,
    pub inconsistencies: Vec<StateInconsistency>,
}

impl<T> Recovered<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            inconsistencies: Vec::new(),
        }
    }

    pub fn note(&mut self, inconsistency: StateInconsistency) {
        tracing::warn!("{}", inconsistency);
        self.inconsistencies.push(inconsistency);
    }
}
