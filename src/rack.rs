// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, bag, error, game_config, seeded_random};
use alphabet::Tile;

/// Everything the draw order of one game depends on.
#[derive(Clone, Copy)]
pub struct TileSource<'a> {
    pub seed: &'a str,
    pub starting_word: &'a str,
    pub purchased_tiles: &'a [Tile],
    pub removed_tiles: &'a [Tile],
    pub exchange_history: &'a [bag::ExchangeRecord],
}

impl TileSource<'_> {
    pub fn bag(&self, game_config: &game_config::GameConfig) -> bag::Bag {
        let mut bag = bag::Bag::build(
            game_config,
            self.seed,
            self.starting_word,
            self.purchased_tiles,
            self.removed_tiles,
        );
        if !self.exchange_history.is_empty() {
            bag.replay_exchanges(self.int_seed(), self.exchange_history);
        }
        bag
    }

    #[inline(always)]
    pub fn int_seed(&self) -> u128 {
        seeded_random::seed_to_int(self.seed)
    }
}

/// A rack together with how far into the bag the game has drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hand {
    pub tiles: Vec<Tile>,
    pub tiles_drawn: usize,
}

fn use_tiles(rack: &mut Vec<Tile>, tile: Tile) -> bool {
    match rack.iter().position(|&t| t == tile) {
        Some(pos) => {
            rack.remove(pos);
            true
        }
        None => false,
    }
}

/// Replays the game from an empty rack. `bag` is the draw order before any
/// exchange. history[t - 1] holds the tiles played on turn t. Each recorded
/// exchange is made again once the draw cursor reaches its `at_drawn`. A
/// history tile missing from the rack, or an exchange that no longer fits, is
/// skipped and reported.
pub fn rack_for_turn(
    game_config: &game_config::GameConfig,
    bag: &bag::Bag,
    int_seed: u128,
    turn: u8,
    history: &[Vec<Tile>],
    exchanges: &[bag::ExchangeRecord],
) -> error::Recovered<Hand> {
    let rack_size = game_config.rack_size() as usize;
    let mut bag = bag.clone();
    let mut exchanged = 0;
    let mut pending = exchanges.iter().peekable();
    let mut ret = error::Recovered::clean(Hand {
        tiles: Vec::with_capacity(rack_size),
        tiles_drawn: 0,
    });
    for t in 1..=turn {
        let limit = bag.draw_limit(game_config, exchanged);
        let hand = &mut ret.value;
        bag.replenish(&mut hand.tiles_drawn, &mut hand.tiles, rack_size, limit);
        loop {
            let cursor = ret.value.tiles_drawn;
            let Some(record) = pending.next_if(|record| record.at_drawn <= cursor) else {
                break;
            };
            let done = if record.at_drawn == cursor {
                exchange(
                    &mut bag,
                    int_seed,
                    record.exchange_count,
                    &ret.value,
                    &record.tiles,
                )
                .ok()
            } else {
                None
            };
            match done {
                Some(done) => {
                    exchanged += record.tiles.len();
                    ret.value = done.hand;
                }
                None => ret.note(error::StateInconsistency::ExchangeNotReplayed {
                    exchange_count: record.exchange_count,
                }),
            }
        }
        if t == turn {
            break;
        }
        let hand = &mut ret.value;
        let mut missing = Vec::new();
        if let Some(played) = history.get(t as usize - 1) {
            for &tile in played {
                if !use_tiles(&mut hand.tiles, tile) {
                    missing.push(tile);
                }
            }
        }
        for tile in missing {
            ret.note(error::StateInconsistency::TileNotInRack {
                turn: t,
                tile: tile.label(),
            });
        }
    }
    ret
}

/// Continues from a rack and draw counter kept by the caller. Untrustworthy
/// values are replaced by what turn alone implies. `exchanged` counts tiles
/// swapped out so far, each of which moved the counter one further.
pub fn draw_tiles<S: AsRef<str>>(
    game_config: &game_config::GameConfig,
    bag: &bag::Bag,
    turn: u8,
    rack_tiles: &[S],
    tiles_drawn: i64,
    exchanged: usize,
) -> error::Recovered<Hand> {
    let rack_size = game_config.rack_size() as usize;
    let mut ret = error::Recovered::clean(Hand {
        tiles: Vec::with_capacity(rack_size),
        tiles_drawn: 0,
    });
    let limit = bag.draw_limit(game_config, exchanged);
    if turn <= 1 && rack_tiles.is_empty() {
        let hand = &mut ret.value;
        bag.replenish(&mut hand.tiles_drawn, &mut hand.tiles, rack_size, limit);
        return ret;
    }

    let assumed_drawn = rack_size as i64 * (turn as i64 - 1);
    let max_drawn = rack_size as i64 * turn as i64 + exchanged as i64;
    let mut tiles_drawn = tiles_drawn;
    match alphabet::parse_tiles(rack_tiles) {
        Some(tiles) if tiles.len() <= rack_size => {
            ret.value.tiles = tiles;
        }
        _ => {
            ret.note(error::StateInconsistency::CorruptTiles);
            tiles_drawn = assumed_drawn;
        }
    }
    if tiles_drawn < rack_size as i64 || tiles_drawn > max_drawn {
        // on turn 1 a discarded rack leaves the counter here already.
        if tiles_drawn != assumed_drawn {
            ret.note(error::StateInconsistency::ImplausibleDrawCount {
                tiles_drawn,
                turn,
            });
        }
        tiles_drawn = assumed_drawn;
    }

    let hand = &mut ret.value;
    hand.tiles_drawn = tiles_drawn as usize;
    bag.replenish(&mut hand.tiles_drawn, &mut hand.tiles, rack_size, limit);
    ret
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchanged {
    pub new_tiles: Vec<Tile>,
    pub hand: Hand,
    pub record: bag::ExchangeRecord,
}

/// Swaps rack tiles for new ones from the bag. The bag is left in its
/// post-exchange order.
pub fn exchange(
    bag: &mut bag::Bag,
    int_seed: u128,
    exchange_count: u32,
    hand: &Hand,
    tiles_to_exchange: &[Tile],
) -> Result<Exchanged, error::InputError> {
    if tiles_to_exchange.is_empty() {
        return Err(error::InputError::NothingToExchange);
    }
    let mut rack = hand.tiles.clone();
    for &tile in tiles_to_exchange {
        if !use_tiles(&mut rack, tile) {
            return Err(error::InputError::ExchangeTileNotInRack(tile.label()));
        }
    }
    let mut tiles_drawn = hand.tiles_drawn;
    let record = bag::ExchangeRecord {
        tiles: tiles_to_exchange.to_vec(),
        at_drawn: tiles_drawn,
        exchange_count,
    };
    let new_tiles = bag.exchange(int_seed, exchange_count, &mut tiles_drawn, tiles_to_exchange);
    rack.extend_from_slice(&new_tiles);
    Ok(Exchanged {
        new_tiles,
        hand: Hand {
            tiles: rack,
            tiles_drawn,
        },
        record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn tiles(s: &str) -> Vec<Tile> {
        s.chars().map(|c| Tile::from_label(c).unwrap()).collect()
    }

    fn source(seed: &str) -> TileSource<'_> {
        TileSource {
            seed,
            starting_word: "SAILING",
            purchased_tiles: &[],
            removed_tiles: &[],
            exchange_history: &[],
        }
    }

    #[test]
    fn first_turn_is_first_seven() {
        let game_config = game_config::make_daily_game_config();
        let bag = source("20250314").bag(&game_config);
        let hand = rack_for_turn(&game_config, &bag, 0, 1, &[], &[]);
        assert!(hand.inconsistencies.is_empty());
        assert_eq!(hand.value.tiles, &bag.0[..7]);
        assert_eq!(hand.value.tiles_drawn, 7);
    }

    #[test]
    fn later_turns_refill_in_bag_order() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        let history = vec![tiles("AC"), tiles("BHI")];
        let hand = rack_for_turn(&game_config, &bag, 0, 3, &history, &[]);
        assert!(hand.inconsistencies.is_empty());
        assert_eq!(hand.value.tiles, tiles("DEFGJKL"));
        assert_eq!(hand.value.tiles_drawn, 12);
    }

    #[test]
    fn history_mismatch_is_reported_not_fatal() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        let hand = rack_for_turn(&game_config, &bag, 0, 2, &[tiles("AZ")], &[]);
        assert_eq!(
            hand.inconsistencies,
            vec![error::StateInconsistency::TileNotInRack { turn: 1, tile: 'Z' }]
        );
        assert_eq!(hand.value.tiles, tiles("BCDEFGH"));
    }

    #[test]
    fn short_bag_draws_fewer() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHI"));
        let hand = rack_for_turn(&game_config, &bag, 0, 2, &[tiles("ABCD")], &[]);
        assert_eq!(hand.value.tiles, tiles("EFGHI"));
        assert_eq!(hand.value.tiles_drawn, 9);
    }

    #[test]
    fn replay_makes_recorded_exchanges() {
        let game_config = game_config::make_daily_game_config();
        let src = source("exchange-game");
        let fresh = src.bag(&game_config);

        // live game: swap two tiles on turn 1, play three, draw for turn 2
        let mut live = fresh.clone();
        let hand = rack_for_turn(&game_config, &fresh, src.int_seed(), 1, &[], &[]).value;
        let giving = hand.tiles[..2].to_vec();
        let swapped = exchange(&mut live, src.int_seed(), 0, &hand, &giving).unwrap();
        let played = swapped.hand.tiles[2..5].to_vec();
        let mut expected = swapped.hand.clone();
        for &tile in &played {
            use_tiles(&mut expected.tiles, tile);
        }
        let limit = live.draw_limit(&game_config, 2);
        live.replenish(&mut expected.tiles_drawn, &mut expected.tiles, 7, limit);
        assert_eq!(expected.tiles_drawn, 12);

        let replayed = rack_for_turn(
            &game_config,
            &fresh,
            src.int_seed(),
            2,
            &[played],
            &[swapped.record.clone()],
        );
        assert!(replayed.inconsistencies.is_empty());
        assert_eq!(replayed.value, expected);

        // turn 1 itself shows the rack after the swap
        let replayed = rack_for_turn(
            &game_config,
            &fresh,
            src.int_seed(),
            1,
            &[],
            &[swapped.record.clone()],
        );
        assert_eq!(replayed.value, swapped.hand);
    }

    #[test]
    fn exchange_off_the_draw_path_is_reported() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        let record = bag::ExchangeRecord {
            tiles: tiles("A"),
            at_drawn: 3,
            exchange_count: 0,
        };
        let hand = rack_for_turn(&game_config, &bag, 0, 1, &[], &[record]);
        assert_eq!(
            hand.inconsistencies,
            vec![error::StateInconsistency::ExchangeNotReplayed { exchange_count: 0 }]
        );
        assert_eq!(hand.value.tiles, tiles("ABCDEFG"));
        let record = bag::ExchangeRecord {
            tiles: tiles("Z"),
            at_drawn: 7,
            exchange_count: 0,
        };
        let hand = rack_for_turn(&game_config, &bag, 0, 1, &[], &[record]);
        assert_eq!(hand.inconsistencies.len(), 1);
        assert_eq!(hand.value.tiles_drawn, 7);
    }

    #[test]
    fn draw_tiles_stops_at_the_end_of_the_day() {
        let game_config = game_config::make_daily_game_config();
        let bag = source("x").bag(&game_config);
        let hand = draw_tiles::<&str>(&game_config, &bag, 5, &[], 35, 0);
        assert!(hand.inconsistencies.is_empty());
        assert!(hand.value.tiles.is_empty());
        assert_eq!(hand.value.tiles_drawn, 35);
        let hand = draw_tiles(&game_config, &bag, 5, &["A", "B", "C"], 33, 0);
        assert_eq!(hand.value.tiles.len(), 5);
        assert_eq!(hand.value.tiles_drawn, 35);
    }

    quickcheck! {
        fn rack_for_turn_is_deterministic(seed: String, turn: u8) -> bool {
            let game_config = game_config::make_daily_game_config();
            let turn = turn % 5 + 1;
            let src = source(&seed);
            let a = rack_for_turn(&game_config, &src.bag(&game_config), src.int_seed(), turn, &[], &[]);
            let b = rack_for_turn(&game_config, &src.bag(&game_config), src.int_seed(), turn, &[], &[]);
            a == b
        }
    }

    #[test]
    fn draw_tiles_continues_from_counter() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        let hand = draw_tiles(&game_config, &bag, 2, &["A", "B", "_"], 9, 0);
        assert!(hand.inconsistencies.is_empty());
        assert_eq!(hand.value.tiles, tiles("AB_JKLM"));
        assert_eq!(hand.value.tiles_drawn, 13);
    }

    #[test]
    fn draw_tiles_recovers_from_corrupt_rack() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        let hand = draw_tiles(&game_config, &bag, 3, &["A", "null"], 16, 0);
        assert_eq!(
            hand.inconsistencies,
            vec![error::StateInconsistency::CorruptTiles]
        );
        assert_eq!(hand.value.tiles, tiles("OPQRSTU"));
        assert_eq!(hand.value.tiles_drawn, 21);
    }

    #[test]
    fn draw_tiles_recovers_from_bad_counter() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        let hand = draw_tiles(&game_config, &bag, 2, &["Z"], 0, 0);
        assert_eq!(
            hand.inconsistencies,
            vec![error::StateInconsistency::ImplausibleDrawCount {
                tiles_drawn: 0,
                turn: 2
            }]
        );
        assert_eq!(hand.value.tiles, tiles("ZHIJKLM"));
        let hand = draw_tiles(&game_config, &bag, 2, &["Z"], 15, 0);
        assert!(!hand.inconsistencies.is_empty());
        assert_eq!(hand.value.tiles_drawn, 13);
    }

    #[test]
    fn draw_tiles_allows_for_exchanges() {
        let game_config = game_config::make_daily_game_config();
        let bag = bag::Bag(tiles("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        // turn 1 rack after swapping two tiles
        let rack = ["A", "B", "C", "D", "E", "H", "I"];
        let hand = draw_tiles(&game_config, &bag, 1, &rack, 9, 2);
        assert!(hand.inconsistencies.is_empty());
        assert_eq!(hand.value.tiles, tiles("ABCDEHI"));
        assert_eq!(hand.value.tiles_drawn, 9);
        let hand = draw_tiles(&game_config, &bag, 2, &["A"], 16, 2);
        assert!(hand.inconsistencies.is_empty());
        assert_eq!(hand.value.tiles, tiles("AQRSTUV"));
        let hand = draw_tiles(&game_config, &bag, 2, &["A"], 16, 0);
        assert!(!hand.inconsistencies.is_empty());
    }

    #[test]
    fn exchange_replaces_from_remainder() {
        let mut bag = bag::Bag(tiles("ABCDEFGXYZ"));
        let hand = Hand {
            tiles: tiles("AQQBCDE"),
            tiles_drawn: 7,
        };
        let exchanged = exchange(&mut bag, 99, 0, &hand, &tiles("QQ")).unwrap();
        assert_eq!(exchanged.new_tiles, tiles("XY"));
        assert_eq!(exchanged.hand.tiles, tiles("ABCDEXY"));
        assert_eq!(exchanged.hand.tiles_drawn, 9);
        assert_eq!(exchanged.record.at_drawn, 7);
        let mut rest = bag.0[9..].to_vec();
        rest.sort();
        assert_eq!(rest, tiles("QQZ"));
    }

    #[test]
    fn exchange_rejects_tiles_not_held() {
        let mut bag = bag::Bag(tiles("ABCDEFGXYZ"));
        let hand = Hand {
            tiles: tiles("AQBCDEF"),
            tiles_drawn: 7,
        };
        assert_eq!(
            exchange(&mut bag, 1, 0, &hand, &tiles("QQ")),
            Err(error::InputError::ExchangeTileNotInRack('Q'))
        );
        assert_eq!(
            exchange(&mut bag, 1, 0, &hand, &[]),
            Err(error::InputError::NothingToExchange)
        );
        assert_eq!(bag.0, tiles("ABCDEFGXYZ"));
    }

    #[test]
    fn exchanges_use_independent_shuffles() {
        let game_config = game_config::make_daily_game_config();
        let src = source("exchange");
        let fresh = src.bag(&game_config);
        let hand = rack_for_turn(&game_config, &fresh, src.int_seed(), 1, &[], &[]).value;
        let giving = hand.tiles[..3].to_vec();

        let mut first = fresh.clone();
        let a = exchange(&mut first, src.int_seed(), 0, &hand, &giving).unwrap();
        let mut second = fresh.clone();
        let b = exchange(&mut second, src.int_seed(), 1, &hand, &giving).unwrap();
        assert_eq!(a.new_tiles, b.new_tiles);
        assert_ne!(first.0[10..], second.0[10..]);
    }
}
