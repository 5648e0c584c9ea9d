// Copyright (C) 2020-2026 Andy Kurnia.

use clap::Parser;
use rogueletters::{api, error};
use std::io::Read;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// answers one request. stdout carries only the response; logs go to stderr.
#[derive(Parser)]
struct Args {
    /// Which request to answer
    #[arg(value_enum)]
    endpoint: api::Endpoint,

    /// Word list, one word per line. Without it every word is accepted
    #[arg(short, long)]
    dictionary: Option<String>,

    /// JSON table of starting words keyed by "MM-DD"
    #[arg(long)]
    daily_words: Option<String>,

    /// Request JSON. Read from stdin if absent
    #[arg(short, long)]
    request: Option<String>,

    #[arg(short, long, default_value = "warn")]
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

fn main() -> error::Returns<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let ctx = api::Context::load(args.dictionary.as_deref(), args.daily_words.as_deref());
    let request = match args.request {
        Some(request) => request,
        None => {
            let mut request = String::new();
            std::io::stdin().read_to_string(&mut request)?;
            request
        }
    };
    let response = api::handle(&ctx, args.endpoint, &request);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
