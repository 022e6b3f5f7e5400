//! # Corner
//!
//! Monthly points reports over an exported ledger.

use std::env::args;

use anyhow::{bail, Context, Result};
use corner_points::config::Config;
use corner_points::db::{Ledger, Snapshot};
use corner_points::graphql::{build_schema, schema_builder};
use corner_points::models::report::{MonthReport, PlayerMonth};
use corner_points::util::{init_logging, month_number};
use serde::Serialize;

const USAGE: &str = "Usage: corner <report YEAR MONTH | player NAME YEAR MONTH | pending | query GRAPHQL | print-schema>";

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let args = args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(String::as_str).collect::<Vec<_>>();

    run(&args)
}

fn run(args: &[&str]) -> Result<()> {
    match args {
        ["print-schema"] => {
            println!("{}", schema_builder().finish().sdl());
            Ok(())
        }
        ["report", year, month] => {
            let (year, month) = parse_month(year, month)?;
            let (config, ledger) = load()?;
            let report = MonthReport::compute(&ledger, month, year, config.minimum_value)?;
            print_json(&report)
        }
        ["player", name, year, month] => {
            let (year, month) = parse_month(year, month)?;
            let (config, ledger) = load()?;
            let player = ledger
                .roster()
                .player_named(name)
                .with_context(|| format!("No player named {}", name))?;
            let month = PlayerMonth::compute(&ledger, player, month, year, config.minimum_value)?;
            print_json(&month)
        }
        ["pending"] => {
            let (_config, ledger) = load()?;
            print_json(&ledger.pending_events()?)
        }
        ["query", query] => {
            let (config, ledger) = load()?;
            let schema = build_schema(ledger, Some(config));
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Couldn't start the async runtime")?;
            let response = runtime.block_on(schema.execute(*query));
            print_json(&response)
        }
        [] => bail!("No command provided. {}", USAGE),
        [other, ..] => bail!("Unexpected command `{}`. {}", other, USAGE),
    }
}

fn load() -> Result<(Config, Snapshot)> {
    let config = Config::from_env().context("Invalid configuration")?;
    let ledger = Snapshot::load(&config.data_file)
        .with_context(|| format!("Couldn't load the ledger at {}", config.data_file.display()))?;

    Ok((config, ledger))
}

fn parse_month(year: &str, month: &str) -> Result<(i32, u8)> {
    let year = year
        .parse::<i32>()
        .with_context(|| format!("`{}` is not a year", year))?;
    let month = month
        .parse::<i64>()
        .with_context(|| format!("`{}` is not a month", month))?;

    Ok((year, month_number(month)?))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);

    Ok(())
}
