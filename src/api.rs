// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet, bag, board, dictionary, error, game_config, game_state, placement, play_scorer,
    rack, starting_word,
};
use alphabet::Tile;
use std::collections::BTreeMap;

/// Read-only resources shared by every request.
pub struct Context {
    pub game_config: game_config::GameConfig,
    pub dictionary: dictionary::Dictionary,
    pub daily_words: Option<starting_word::DailyWords>,
}

impl Context {
    /// Missing or unreadable files degrade instead of failing.
    pub fn load(dictionary_path: Option<&str>, daily_words_path: Option<&str>) -> Self {
        let game_config = game_config::make_daily_game_config();
        let dictionary = dictionary::Dictionary::load_or_accept_all(dictionary_path);
        let daily_words = starting_word::DailyWords::load(&game_config, daily_words_path);
        Self {
            game_config,
            dictionary,
            daily_words,
        }
    }

    pub fn starting_word(&self, seed: &str) -> starting_word::StartingWord {
        starting_word::select_starting_word(
            &self.game_config,
            &self.dictionary,
            self.daily_words.as_ref(),
            seed,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Endpoint {
    Letters,
    Rack,
    Validate,
    Scores,
    CheckWords,
    StartingWord,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Draw,
    Exchange,
}

// rack and shop lists may hold anything; they are checked tile by tile.
#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub struct LettersRequest {
    pub seed: String,
    pub turn: Option<i64>,
    pub rack_tiles: Vec<serde_json::Value>,
    pub tiles_drawn: i64,
    pub purchased_tiles: Vec<serde_json::Value>,
    pub removed_tiles: Vec<serde_json::Value>,
    pub exchange_history: Vec<bag::ExchangeRecord>,
    pub action: Action,
    pub tiles_to_exchange: Vec<serde_json::Value>,
    pub exchange_count: Option<u32>,
}

#[derive(Debug, serde::Serialize)]
pub struct LettersResponse {
    pub seed: String,
    pub turn: u8,
    pub tiles: Vec<Tile>,
    pub tiles_drawn: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_tiles: Option<Vec<Tile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchanged: Option<bag::ExchangeRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recovered: Vec<String>,
}

// history[t - 1] lists the tiles played on turn t.
#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub struct RackRequest {
    pub seed: String,
    pub turn: Option<i64>,
    pub history: Vec<Vec<serde_json::Value>>,
    pub purchased_tiles: Vec<serde_json::Value>,
    pub removed_tiles: Vec<serde_json::Value>,
    pub exchange_history: Vec<bag::ExchangeRecord>,
}

#[derive(Debug, serde::Serialize)]
pub struct RackResponse {
    pub seed: String,
    pub turn: u8,
    pub rack: Vec<Tile>,
    pub tiles_drawn: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recovered: Vec<String>,
}

#[derive(Default, serde::Deserialize)]
pub struct WireTile {
    pub row: Option<i64>,
    pub col: Option<i64>,
    pub letter: Option<String>,
    #[serde(default, alias = "isBlank")]
    pub is_blank: bool,
    pub turn: Option<i64>,
}

#[derive(serde::Deserialize)]
pub struct WirePosition {
    pub row: i64,
    pub col: i64,
}

// board: rows of letters, with null or "" for empty squares.
#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub struct ValidateRequest {
    pub board: Vec<Vec<Option<String>>>,
    pub placed_tiles: Vec<WireTile>,
    pub blank_positions: Vec<WirePosition>,
    pub debug_mode: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
    pub words_formed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i16>,
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub struct ScoresRequest {
    pub seed: String,
    pub tiles: Vec<WireTile>,
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub struct CheckWordsRequest {
    pub words: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckWordsResponse {
    pub results: BTreeMap<String, bool>,
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub struct StartingWordRequest {
    pub seed: String,
}

#[derive(Debug, serde::Serialize)]
pub struct StartingWordResponse {
    pub seed: String,
    pub starting_word: String,
    pub source: starting_word::WordSource,
}

fn require_seed(seed: &str) -> Result<(), error::InputError> {
    if seed.is_empty() {
        Err(error::InputError::MissingSeed)
    } else {
        Ok(())
    }
}

fn parse_turn(game_config: &game_config::GameConfig, turn: i64) -> Result<u8, error::InputError> {
    if game_config.is_valid_turn(turn) {
        Ok(turn as u8)
    } else {
        Err(error::InputError::TurnOutOfRange(turn))
    }
}

fn value_strings(values: &[serde_json::Value]) -> Vec<String> {
    values
        .iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

// keeps the valid tiles and notes how many were dropped.
fn filter_tiles(
    values: &[serde_json::Value],
    recovered: &mut error::Recovered<()>,
) -> Vec<Tile> {
    let tiles = value_strings(values)
        .iter()
        .filter_map(|s| Tile::parse(s))
        .collect::<Vec<_>>();
    if tiles.len() < values.len() {
        recovered.note(error::StateInconsistency::DroppedInvalidTiles(
            values.len() - tiles.len(),
        ));
    }
    tiles
}

fn strict_tiles(values: &[serde_json::Value]) -> Result<Vec<Tile>, error::InputError> {
    value_strings(values)
        .into_iter()
        .map(|s| Tile::parse(&s).ok_or(error::InputError::InvalidTile(s)))
        .collect()
}

fn to_i8(v: i64) -> Option<i8> {
    i8::try_from(v).ok()
}

fn to_placed_tile(
    game_config: &game_config::GameConfig,
    idx: usize,
    wire: &WireTile,
    default_turn: Option<u8>,
) -> Result<placement::PlacedTile, error::InputError> {
    let missing = |field| error::InputError::TileMissingField { idx, field };
    let row = wire.row.ok_or_else(|| missing("row"))?;
    let col = wire.col.ok_or_else(|| missing("col"))?;
    let letter = wire.letter.as_deref().ok_or_else(|| missing("letter"))?;
    let turn = match (wire.turn, default_turn) {
        (Some(turn), _) => parse_turn(game_config, turn)?,
        (None, Some(turn)) => turn,
        (None, None) => return Err(missing("turn")),
    };
    let (Some(row_i8), Some(col_i8)) = (to_i8(row), to_i8(col)) else {
        return Err(error::InputError::TileOffBoard { row, col });
    };
    // a blank arrives as the letter it stands for.
    let tile = Tile::parse(&letter.trim().to_ascii_uppercase())
        .filter(|tile| !tile.is_blank())
        .ok_or_else(|| error::InputError::InvalidTile(letter.into()))?;
    Ok(placement::PlacedTile {
        row: row_i8,
        col: col_i8,
        letter: tile,
        is_blank: wire.is_blank,
        turn,
    })
}

fn to_placed_tiles(
    game_config: &game_config::GameConfig,
    wire: &[WireTile],
    default_turn: Option<u8>,
) -> Result<Vec<placement::PlacedTile>, error::InputError> {
    wire.iter()
        .enumerate()
        .map(|(idx, tile)| to_placed_tile(game_config, idx, tile, default_turn))
        .collect()
}

fn num_exchanged(exchange_history: &[bag::ExchangeRecord]) -> usize {
    exchange_history.iter().map(|record| record.tiles.len()).sum()
}

fn reasons(inconsistencies: &[error::StateInconsistency]) -> Vec<String> {
    inconsistencies.iter().map(|x| x.to_string()).collect()
}

pub fn letters(ctx: &Context, req: &LettersRequest) -> Result<LettersResponse, error::InputError> {
    require_seed(&req.seed)?;
    let game_config = &ctx.game_config;
    let turn = parse_turn(game_config, req.turn.unwrap_or(1))?;
    let starting_word = ctx.starting_word(&req.seed).word;

    let mut recovered = error::Recovered::clean(());
    let purchased_tiles = filter_tiles(&req.purchased_tiles, &mut recovered);
    let removed_tiles = filter_tiles(&req.removed_tiles, &mut recovered);
    let source = rack::TileSource {
        seed: &req.seed,
        starting_word: &starting_word,
        purchased_tiles: &purchased_tiles,
        removed_tiles: &removed_tiles,
        exchange_history: &req.exchange_history,
    };
    let mut bag = source.bag(game_config);

    let hand = rack::draw_tiles(
        game_config,
        &bag,
        turn,
        &value_strings(&req.rack_tiles),
        req.tiles_drawn,
        num_exchanged(&req.exchange_history),
    );
    recovered.inconsistencies.extend(hand.inconsistencies);
    let mut hand = hand.value;

    let (new_tiles, exchanged) = match req.action {
        Action::Draw => (None, None),
        Action::Exchange => {
            let tiles_to_exchange = strict_tiles(&req.tiles_to_exchange)?;
            let exchange_count = req
                .exchange_count
                .unwrap_or(req.exchange_history.len() as u32);
            let exchanged = rack::exchange(
                &mut bag,
                source.int_seed(),
                exchange_count,
                &hand,
                &tiles_to_exchange,
            )?;
            hand = exchanged.hand;
            (Some(exchanged.new_tiles), Some(exchanged.record))
        }
    };

    Ok(LettersResponse {
        seed: req.seed.clone(),
        turn,
        tiles: hand.tiles,
        tiles_drawn: hand.tiles_drawn,
        starting_word: (turn == 1).then_some(starting_word),
        new_tiles,
        exchanged,
        recovered: reasons(&recovered.inconsistencies),
    })
}

pub fn get_rack(ctx: &Context, req: &RackRequest) -> Result<RackResponse, error::InputError> {
    require_seed(&req.seed)?;
    let game_config = &ctx.game_config;
    let turn = parse_turn(game_config, req.turn.unwrap_or(1))?;
    let starting_word = ctx.starting_word(&req.seed).word;

    let mut recovered = error::Recovered::clean(());
    let purchased_tiles = filter_tiles(&req.purchased_tiles, &mut recovered);
    let removed_tiles = filter_tiles(&req.removed_tiles, &mut recovered);
    let history = match req
        .history
        .iter()
        .map(|played| alphabet::parse_tiles(&value_strings(played)))
        .collect::<Option<Vec<_>>>()
    {
        Some(history) => history,
        None => {
            // start over from the seed alone.
            recovered.note(error::StateInconsistency::CorruptTiles);
            Vec::new()
        }
    };
    // exchanges are made again during the replay, not up front.
    let source = rack::TileSource {
        seed: &req.seed,
        starting_word: &starting_word,
        purchased_tiles: &purchased_tiles,
        removed_tiles: &removed_tiles,
        exchange_history: &[],
    };
    let hand = rack::rack_for_turn(
        game_config,
        &source.bag(game_config),
        source.int_seed(),
        turn,
        &history,
        &req.exchange_history,
    );
    recovered.inconsistencies.extend(hand.inconsistencies);
    Ok(RackResponse {
        seed: req.seed.clone(),
        turn,
        rack: hand.value.tiles,
        tiles_drawn: hand.value.tiles_drawn,
        recovered: reasons(&recovered.inconsistencies),
    })
}

pub fn validate(
    ctx: &Context,
    req: &ValidateRequest,
) -> Result<ValidateResponse, error::InputError> {
    let game_config = &ctx.game_config;
    let mut board = board::Board::from_rows(game_config.board_layout().dim(), &req.board)?;
    let placed_tiles = to_placed_tiles(game_config, &req.placed_tiles, Some(1))?;
    let blank_positions = req
        .blank_positions
        .iter()
        .filter_map(|pos| Some((to_i8(pos.row)?, to_i8(pos.col)?)))
        .collect::<Vec<_>>();
    for &(row, col) in &blank_positions {
        board.mark_blank(row, col);
    }

    match placement::validate_placement(&board, &placed_tiles, &ctx.dictionary, req.debug_mode) {
        Ok(words) => {
            let score = play_scorer::PlayScorer::new().compute_score(
                game_config,
                &board,
                &placed_tiles,
                &words,
                &blank_positions,
            );
            Ok(ValidateResponse {
                valid: true,
                message: "Valid placement".into(),
                words_formed: words.into_iter().map(|word| word.text).collect(),
                score: Some(score),
            })
        }
        Err(rejection) => {
            tracing::debug!(reason = %rejection.violation, "placement rejected");
            Ok(ValidateResponse {
                valid: false,
                message: rejection.violation.to_string(),
                words_formed: rejection
                    .words_formed
                    .into_iter()
                    .map(|word| word.text)
                    .collect(),
                score: None,
            })
        }
    }
}

pub fn scores(
    ctx: &Context,
    req: &ScoresRequest,
) -> Result<game_state::TurnScores, error::InputError> {
    if req.tiles.is_empty() {
        return Err(error::InputError::MissingTiles);
    }
    require_seed(&req.seed)?;
    let game_config = &ctx.game_config;
    let tiles = to_placed_tiles(game_config, &req.tiles, None)?;
    let starting_word = ctx.starting_word(&req.seed).word;
    game_state::reconstruct_scores(game_config, &starting_word, &tiles)
}

pub fn check_words(
    ctx: &Context,
    req: &CheckWordsRequest,
) -> Result<CheckWordsResponse, error::InputError> {
    if req.words.is_empty() {
        return Err(error::InputError::MissingWords);
    }
    Ok(CheckWordsResponse {
        results: req
            .words
            .iter()
            .map(|word| (word.clone(), ctx.dictionary.contains(word)))
            .collect(),
    })
}

pub fn get_starting_word(
    ctx: &Context,
    req: &StartingWordRequest,
) -> Result<StartingWordResponse, error::InputError> {
    require_seed(&req.seed)?;
    let picked = ctx.starting_word(&req.seed);
    Ok(StartingWordResponse {
        seed: req.seed.clone(),
        starting_word: picked.word,
        source: picked.source,
    })
}

fn respond<Req, Resp, F>(ctx: &Context, request: &str, handler: F) -> serde_json::Value
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(&Context, &Req) -> Result<Resp, error::InputError>,
{
    let result = serde_json::from_str::<Req>(request)
        .map_err(|err| error::InputError::InvalidJson(err.to_string()))
        .and_then(|req| handler(ctx, &req));
    match result {
        Ok(resp) => serde_json::to_value(resp)
            .unwrap_or_else(|err| serde_json::json!({ "error": err.to_string() })),
        Err(err) => {
            tracing::info!(%err, "request refused");
            serde_json::json!({ "error": err.to_string() })
        }
    }
}

/// Runs one request. Failures come back as `{"error": message}`.
pub fn handle(ctx: &Context, endpoint: Endpoint, request: &str) -> serde_json::Value {
    tracing::debug!(?endpoint, "handling request");
    match endpoint {
        Endpoint::Letters => respond(ctx, request, letters),
        Endpoint::Rack => respond(ctx, request, get_rack),
        Endpoint::Validate => respond(ctx, request, validate),
        Endpoint::Scores => respond(ctx, request, scores),
        Endpoint::CheckWords => respond(ctx, request, check_words),
        Endpoint::StartingWord => respond(ctx, request, get_starting_word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context {
            game_config: game_config::make_daily_game_config(),
            dictionary: dictionary::Dictionary::from_word_list("SAILING\nCAT\nCATS\nAT\nTO\n"),
            daily_words: None,
        }
    }

    #[test]
    fn input_errors_become_error_fields() {
        let ctx = ctx();
        assert_eq!(
            handle(&ctx, Endpoint::Letters, r#"{"turn": 1}"#),
            serde_json::json!({ "error": "Missing seed parameter" })
        );
        assert_eq!(
            handle(&ctx, Endpoint::Rack, r#"{"seed": "x", "turn": 6}"#),
            serde_json::json!({ "error": "Invalid turn 6 (must be 1-5)" })
        );
        let resp = handle(&ctx, Endpoint::Validate, "{not json");
        assert!(resp["error"].as_str().unwrap().starts_with("Error reading request"));
        assert_eq!(
            handle(&ctx, Endpoint::Scores, r#"{"seed": "x", "tiles": [{"row": 1, "col": 2}]}"#),
            serde_json::json!({ "error": "Tile 0 missing required field: letter" })
        );
        assert_eq!(
            handle(&ctx, Endpoint::CheckWords, r#"{"words": []}"#),
            serde_json::json!({ "error": "No words provided" })
        );
    }

    #[test]
    fn first_turn_letters_include_starting_word() {
        let ctx = ctx();
        let resp = letters(
            &ctx,
            &LettersRequest {
                seed: "20250101".into(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(resp.starting_word.as_deref(), Some("SAILING"));
        assert_eq!(resp.tiles.len(), 7);
        assert_eq!(resp.tiles_drawn, 7);
        assert!(resp.recovered.is_empty());
    }

    #[test]
    fn bad_shop_tiles_are_dropped() {
        let ctx = ctx();
        let req = LettersRequest {
            seed: "shop".into(),
            purchased_tiles: vec!["Q".into(), "q".into(), serde_json::Value::Null],
            ..Default::default()
        };
        let resp = letters(&ctx, &req).unwrap();
        assert_eq!(resp.recovered, vec!["Ignored 2 invalid shop tile(s)".to_string()]);
    }

    #[test]
    fn validate_reports_words_and_score() {
        let ctx = ctx();
        let mut board = vec![vec![None::<String>; 9]; 9];
        for (col, c) in [(3, "C"), (4, "A"), (5, "T")] {
            board[4][col] = Some(c.into());
        }
        let req = ValidateRequest {
            board,
            placed_tiles: vec![WireTile {
                row: Some(4),
                col: Some(6),
                letter: Some("s".into()),
                ..Default::default()
            }],
            blank_positions: vec![WirePosition { row: 4, col: 3 }],
            debug_mode: false,
        };
        let resp = validate(&ctx, &req).unwrap();
        assert!(resp.valid);
        assert_eq!(resp.words_formed, vec!["CATS".to_string()]);
        // the C is an earlier blank
        assert_eq!(resp.score, Some(3));
    }
}
