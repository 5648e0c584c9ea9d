// Copyright (C) 2020-2026 Andy Kurnia.

use clap::{Parser, ValueEnum};
use rogueletters::{alphabet, api, bag, display, error, game_state, placement, rack, seeded_random};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Word list, one word per line. Without it every word is accepted
    #[arg(short, long)]
    dictionary: Option<String>,

    /// JSON table of starting words keyed by "MM-DD"
    #[arg(long)]
    daily_words: Option<String>,

    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

static HELP: &str = "\
new SEED              start a game
board                 show the board
rack                  show the rack
play ROW COL a|d WORD place WORD from (ROW, COL), skipping filled squares;
                      lowercase letters are blanks
exchange TILES        swap tiles (use _ for a blank)
word SEED             show the starting word
bag SEED              show the day's draw order
ENDPOINT JSON         run a request, e.g. check-words '{\"words\":[\"CAT\"]}'
source FILE           run commands from a file
exit";

// one game in progress.
struct Session<'a> {
    seed: String,
    game_state: game_state::GameState<'a>,
    bag: bag::Bag,
    hand: rack::Hand,
    exchange_count: u32,
    tiles_exchanged: usize,
}

impl<'a> Session<'a> {
    fn new(ctx: &'a api::Context, seed: &str) -> Self {
        let game_config = &ctx.game_config;
        let starting_word = ctx.starting_word(seed).word;
        let bag = rack::TileSource {
            seed,
            starting_word: &starting_word,
            purchased_tiles: &[],
            removed_tiles: &[],
            exchange_history: &[],
        }
        .bag(game_config);
        let int_seed = seeded_random::seed_to_int(seed);
        let hand = rack::rack_for_turn(game_config, &bag, int_seed, 1, &[], &[]).value;
        Self {
            seed: seed.into(),
            game_state: game_state::GameState::new(game_config, &starting_word),
            bag,
            hand,
            exchange_count: 0,
            tiles_exchanged: 0,
        }
    }

    fn show(&self) {
        let game_config = self.game_state.game_config;
        display::print_board(game_config.board_layout(), &self.game_state.board);
        if self.game_state.is_over() {
            println!("game over, total {}", self.game_state.total());
        } else {
            println!(
                "turn {}, score {}, rack {}",
                self.game_state.turn,
                self.game_state.total(),
                alphabet::tiles_to_string(&self.hand.tiles)
            );
        }
    }

    fn play(&mut self, ctx: &api::Context, row: i8, col: i8, down: bool, word: &str) {
        if self.game_state.is_over() {
            println!("game is over");
            return;
        }
        let placed_tiles = match placement::lay_out_word(
            &self.game_state.board,
            row,
            col,
            down,
            word,
            self.game_state.turn,
        ) {
            Ok(placed_tiles) => placed_tiles,
            Err(err) => {
                println!("{}", err);
                return;
            }
        };
        let mut rack_left = self.hand.tiles.clone();
        for tile in &placed_tiles {
            let needed = if tile.is_blank {
                alphabet::Tile::BLANK
            } else {
                tile.letter
            };
            match rack_left.iter().position(|&t| t == needed) {
                Some(pos) => {
                    rack_left.remove(pos);
                }
                None => {
                    println!("rack has no {}", needed);
                    return;
                }
            }
        }
        let words = match placement::validate_placement(
            &self.game_state.board,
            &placed_tiles,
            &ctx.dictionary,
            false,
        ) {
            Ok(words) => words,
            Err(rejection) => {
                println!("{}", rejection.violation);
                return;
            }
        };
        match self.game_state.play(&placed_tiles) {
            Ok(score) => {
                let texts = words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>();
                println!("{} for {}", texts.join(", "), score);
                self.hand.tiles = rack_left;
                let rack_size = ctx.game_config.rack_size() as usize;
                let limit = self.bag.draw_limit(&ctx.game_config, self.tiles_exchanged);
                self.bag.replenish(
                    &mut self.hand.tiles_drawn,
                    &mut self.hand.tiles,
                    rack_size,
                    limit,
                );
                self.show();
            }
            Err(err) => println!("{}", err),
        }
    }

    fn exchange(&mut self, tiles: &str) {
        let Some(tiles) = tiles
            .chars()
            .map(alphabet::Tile::from_label)
            .collect::<Option<Vec<_>>>()
        else {
            println!("bad tiles {:?}", tiles);
            return;
        };
        match rack::exchange(
            &mut self.bag,
            seeded_random::seed_to_int(&self.seed),
            self.exchange_count,
            &self.hand,
            &tiles,
        ) {
            Ok(exchanged) => {
                println!("drew {}", alphabet::tiles_to_string(&exchanged.new_tiles));
                self.tiles_exchanged += tiles.len();
                self.hand = exchanged.hand;
                self.exchange_count += 1;
                self.show();
            }
            Err(err) => println!("{}", err),
        }
    }
}

fn run_command<'a>(
    ctx: &'a api::Context,
    session: &mut Option<Session<'a>>,
    strings: &[String],
) {
    let arg = |i: usize| strings.get(i).map(|s| s.as_str());
    match (strings[0].as_str(), arg(1)) {
        ("help", _) => println!("{}", HELP),
        ("new", Some(seed)) => {
            let new_session = Session::new(ctx, seed);
            new_session.show();
            *session = Some(new_session);
        }
        ("word", Some(seed)) => {
            let picked = ctx.starting_word(seed);
            println!("{} ({:?})", picked.word, picked.source);
        }
        ("bag", Some(seed)) => {
            let starting_word = ctx.starting_word(seed).word;
            let bag = bag::Bag::build(&ctx.game_config, seed, &starting_word, &[], &[]);
            println!("{}", alphabet::tiles_to_string(bag.day_tiles(&ctx.game_config)));
        }
        ("board" | "rack" | "play" | "exchange", _) if session.is_none() => {
            println!("no game, use new SEED");
        }
        ("board" | "rack", _) => {
            if let Some(session) = session {
                session.show();
            }
        }
        ("play", _) => {
            let parsed = (
                arg(1).and_then(|s| s.parse::<i8>().ok()),
                arg(2).and_then(|s| s.parse::<i8>().ok()),
                arg(3),
                arg(4),
            );
            match (parsed, session.as_mut()) {
                ((Some(row), Some(col), Some(dir @ ("a" | "d")), Some(word)), Some(session)) => {
                    session.play(ctx, row, col, dir == "d", word);
                }
                _ => println!("usage: play ROW COL a|d WORD"),
            }
        }
        ("exchange", Some(tiles)) => {
            if let Some(session) = session {
                session.exchange(tiles);
            }
        }
        (name, Some(request)) => match api::Endpoint::from_str(name, true) {
            Ok(endpoint) => println!("{}", api::handle(ctx, endpoint, request)),
            Err(_) => println!("invalid input, help for help"),
        },
        _ => println!("invalid input, help for help"),
    }
}

fn main() -> error::Returns<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let ctx = api::Context::load(args.dictionary.as_deref(), args.daily_words.as_deref());

    let mut rl = rustyline::DefaultEditor::new()?;
    let mut session = None;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if strings.is_empty() {
                        continue;
                    }
                    match strings[0].as_str() {
                        "exit" => {
                            break;
                        }
                        "source" => {
                            if strings.len() > 1 {
                                match std::fs::read_to_string(&strings[1]) {
                                    Ok(whole_file) => {
                                        let v = cmd_stack.len();
                                        for (line_num, line) in whole_file.lines().enumerate() {
                                            cmd_stack.push((
                                                line.to_string(),
                                                Some((strings[1].clone(), line_num + 1)),
                                            ));
                                        }
                                        cmd_stack[v..].reverse();
                                    }
                                    Err(err) => {
                                        println!("cannot open file: {:?}", err);
                                    }
                                }
                            } else {
                                println!("need another arg");
                            }
                        }
                        _ => run_command(&ctx, &mut session, &strings),
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
