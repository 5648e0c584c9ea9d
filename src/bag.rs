// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, game_config, seeded_random};
use alphabet::Tile;

/// Full draw order for one seed's game. Draws never mutate it; callers keep
/// a cursor instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bag(pub Vec<Tile>);

/// One past exchange, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExchangeRecord {
    pub tiles: Vec<Tile>,
    // draw cursor when the exchange was made
    pub at_drawn: usize,
    pub exchange_count: u32,
}

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for tile in alphabet.tiles() {
            for _ in 0..alphabet.freq(tile) {
                bag.push(tile);
            }
        }
        Bag(bag)
    }

    /// Standard set plus purchases, minus removals, minus one of each letter
    /// of the starting word, shuffled once for the whole game.
    pub fn build(
        game_config: &game_config::GameConfig,
        seed: &str,
        starting_word: &str,
        purchased_tiles: &[Tile],
        removed_tiles: &[Tile],
    ) -> Bag {
        let mut bag = Bag::new(game_config.alphabet());
        bag.0.extend_from_slice(purchased_tiles);
        for &tile in removed_tiles {
            bag.remove_one(tile);
        }
        for tile in starting_word.chars().filter_map(Tile::from_letter) {
            bag.remove_one(tile);
        }
        seeded_random::shuffle(&mut bag.0, seeded_random::seed_to_int(seed));
        tracing::debug!(seed, starting_word, len = bag.0.len(), "built bag");
        bag
    }

    // first occurrence only. false if absent.
    pub fn remove_one(&mut self, tile: Tile) -> bool {
        match self.0.iter().position(|&t| t == tile) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    /// The part of the draw order a game can reach without exchanges.
    pub fn day_tiles(&self, game_config: &game_config::GameConfig) -> &[Tile] {
        &self.0[..self.0.len().min(game_config.tiles_per_day())]
    }

    /// How far plain draws may reach: the day's tiles plus one more for each
    /// tile exchanged so far.
    pub fn draw_limit(&self, game_config: &game_config::GameConfig, exchanged: usize) -> usize {
        self.0.len().min(game_config.tiles_per_day() + exchanged)
    }

    /// Fills the rack up to rack_size from the cursor without reading at or
    /// past limit. Returns how many were drawn.
    pub fn replenish(
        &self,
        cursor: &mut usize,
        rack: &mut Vec<Tile>,
        rack_size: usize,
        limit: usize,
    ) -> usize {
        let wanted = rack_size.saturating_sub(rack.len());
        let drawn = wanted.min(limit.min(self.0.len()).saturating_sub(*cursor));
        if drawn == 0 {
            return 0;
        }
        rack.extend_from_slice(&self.0[*cursor..*cursor + drawn]);
        *cursor += drawn;
        drawn
    }

    /// Draws replacements for the given tiles from the undrawn part, then
    /// returns the given tiles to it and reshuffles it. The cursor moves past
    /// the replacements, which are returned.
    pub fn exchange(
        &mut self,
        int_seed: u128,
        exchange_count: u32,
        cursor: &mut usize,
        tiles: &[Tile],
    ) -> Vec<Tile> {
        let start = (*cursor).min(self.0.len());
        let drawn = tiles.len().min(self.0.len() - start);
        let new_tiles = self.0[start..start + drawn].to_vec();
        *cursor = start + drawn;
        self.0.extend_from_slice(tiles);
        let reshuffle_seed = int_seed.wrapping_add(exchange_count as u128 + 1);
        seeded_random::shuffle(&mut self.0[*cursor..], reshuffle_seed);
        tracing::debug!(
            exchange_count,
            returned = tiles.len(),
            drawn,
            cursor = *cursor,
            "exchanged tiles"
        );
        new_tiles
    }

    /// Reapplies past exchanges so later draws see the reshuffled bag.
    pub fn replay_exchanges(&mut self, int_seed: u128, history: &[ExchangeRecord]) {
        for record in history {
            let mut cursor = record.at_drawn;
            self.exchange(int_seed, record.exchange_count, &mut cursor, &record.tiles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn tiles(s: &str) -> Vec<Tile> {
        s.chars().map(|c| Tile::from_label(c).unwrap()).collect()
    }

    fn count(bag: &Bag, c: char) -> usize {
        let tile = Tile::from_label(c).unwrap();
        bag.0.iter().filter(|&&t| t == tile).count()
    }

    #[test]
    fn standard_bag() {
        let bag = Bag::new(&alphabet::ENGLISH_ALPHABET);
        assert_eq!(bag.0.len(), 100);
        assert_eq!(count(&bag, 'E'), 12);
        assert_eq!(count(&bag, '_'), 2);
        assert_eq!(count(&bag, 'Z'), 1);
    }

    #[test]
    fn build_removes_starting_word_and_shop_tiles() {
        let game_config = game_config::make_daily_game_config();
        let bag = Bag::build(&game_config, "20250101", "SAILING", &tiles("QQ_"), &tiles("ZZ"));
        // 100 + 3 purchased - 1 Z present - 7 letters of SAILING
        assert_eq!(bag.0.len(), 95);
        assert_eq!(count(&bag, 'Q'), 3);
        assert_eq!(count(&bag, 'Z'), 0);
        assert_eq!(count(&bag, '_'), 3);
        assert_eq!(count(&bag, 'I'), 7);
        assert_eq!(count(&bag, 'S'), 3);
        assert_eq!(bag.day_tiles(&game_config).len(), 35);
    }

    #[test]
    fn build_is_reproducible() {
        let game_config = game_config::make_daily_game_config();
        let a = Bag::build(&game_config, "hello", "CAT", &[], &[]);
        let b = Bag::build(&game_config, "hello", "CAT", &[], &[]);
        let c = Bag::build(&game_config, "hello!", "CAT", &[], &[]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    quickcheck! {
        fn bag_conservation(seed: String, purchased: Vec<u8>, removed: Vec<u8>) -> bool {
            let game_config = game_config::make_daily_game_config();
            let as_tiles = |v: &[u8]| v.iter().map(|&b| Tile::from_label((b'A' + b % 26) as char).unwrap()).collect::<Vec<_>>();
            let purchased = as_tiles(&purchased);
            let removed = as_tiles(&removed);
            let starting_word = "JAZZY";

            let mut expected = Bag::new(game_config.alphabet());
            expected.0.extend_from_slice(&purchased);
            let mut removed_present = 0;
            for &tile in &removed {
                removed_present += expected.remove_one(tile) as usize;
            }
            let mut word_present = 0;
            for tile in starting_word.chars().filter_map(Tile::from_letter) {
                word_present += expected.remove_one(tile) as usize;
            }
            let bag = Bag::build(&game_config, &seed, starting_word, &purchased, &removed);
            bag.0.len() == 100 + purchased.len() - removed_present - word_present
        }
    }

    #[test]
    fn replenish_stops_at_the_end() {
        let bag = Bag(tiles("ABCDEFGHIJ"));
        let mut rack = tiles("XY");
        let mut cursor = 0;
        assert_eq!(bag.replenish(&mut cursor, &mut rack, 7, 100), 5);
        assert_eq!(rack, tiles("XYABCDE"));
        rack.clear();
        assert_eq!(bag.replenish(&mut cursor, &mut rack, 7, 100), 5);
        assert_eq!(rack, tiles("FGHIJ"));
        assert_eq!(bag.replenish(&mut cursor, &mut rack, 7, 100), 0);
        assert_eq!(cursor, 10);
        cursor = 12;
        assert_eq!(bag.replenish(&mut cursor, &mut rack, 9, 100), 0);
        assert_eq!(cursor, 12);
    }

    #[test]
    fn plain_draws_stay_within_the_day() {
        let game_config = game_config::make_daily_game_config();
        let bag = Bag::build(&game_config, "x", "SAILING", &[], &[]);
        let limit = bag.draw_limit(&game_config, 0);
        assert_eq!(limit, 35);
        let mut rack = Vec::new();
        let mut cursor = 32;
        assert_eq!(bag.replenish(&mut cursor, &mut rack, 7, limit), 3);
        assert_eq!(rack, &bag.0[32..35]);
        rack.clear();
        assert_eq!(bag.replenish(&mut cursor, &mut rack, 7, limit), 0);
        assert_eq!(cursor, 35);
        // two exchanged tiles push the end back by two
        let limit = bag.draw_limit(&game_config, 2);
        assert_eq!(bag.replenish(&mut cursor, &mut rack, 7, limit), 2);
        assert_eq!(rack, &bag.0[35..37]);
    }

    #[test]
    fn exchange_draws_before_returning() {
        let mut bag = Bag(tiles("ABCXYZ"));
        let mut cursor = 3;
        let new_tiles = bag.exchange(12345, 0, &mut cursor, &tiles("QQ"));
        assert_eq!(new_tiles, tiles("XY"));
        assert_eq!(cursor, 5);
        assert_eq!(&bag.0[..5], &tiles("ABCXY")[..]);
        let mut rest = bag.0[5..].to_vec();
        rest.sort();
        assert_eq!(rest, tiles("QQZ"));
    }

    #[test]
    fn exchange_more_than_remaining() {
        let mut bag = Bag(tiles("ABCX"));
        let mut cursor = 3;
        let new_tiles = bag.exchange(1, 0, &mut cursor, &tiles("QRS"));
        assert_eq!(new_tiles, tiles("X"));
        assert_eq!(cursor, 4);
        assert_eq!(bag.0.len(), 7);
    }

    #[test]
    fn replay_matches_live_exchange() {
        let game_config = game_config::make_daily_game_config();
        let int_seed = seeded_random::seed_to_int("replay");
        let fresh = Bag::build(&game_config, "replay", "SAILING", &[], &[]);

        let mut live = fresh.clone();
        let mut cursor = 7;
        let returned = live.0[2..5].to_vec();
        live.exchange(int_seed, 0, &mut cursor, &returned);
        let returned2 = live.0[7..9].to_vec();
        live.exchange(int_seed, 1, &mut cursor, &returned2);

        let mut replayed = fresh.clone();
        replayed.replay_exchanges(
            int_seed,
            &[
                ExchangeRecord {
                    tiles: returned,
                    at_drawn: 7,
                    exchange_count: 0,
                },
                ExchangeRecord {
                    tiles: returned2,
                    at_drawn: 10,
                    exchange_count: 1,
                },
            ],
        );
        assert_eq!(live, replayed);
    }
}
