//! # HLC CLI
//!
//! Command-line utilities for generating, merging and inspecting HLC timestamps.

use anyhow::{Context, Result};
use hlc_core::{Clock, Timestamp};
use std::cmp::Ordering;
use std::env;
use tracing_subscriber::EnvFilter;

mod config;

use config::CliConfig;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "now" => {
            let config = CliConfig::from_env()?;
            let ts = Timestamp::now(config.resolve_node_id()?);
            println!("{ts}");
        }
        "tick" => {
            let count = match args.get(2) {
                Some(n) => n.parse::<u32>().context("Invalid tick count")?,
                None => 1,
            };
            let mut clock = build_clock()?;
            for _ in 0..count {
                println!("{}", clock.tick());
            }
            let state = serde_json::to_string(&clock.state())?;
            println!("state: {state}");
        }
        "merge" => {
            let Some(encoded) = args.get(2) else {
                usage("merge <remote>")
            };
            let remote = Timestamp::decode(encoded).context("Failed to decode remote timestamp")?;
            let mut clock = build_clock()?;
            let merged = clock.update(&remote);
            tracing::debug!(%remote, %merged, "Merged remote timestamp");
            println!("{merged}");
        }
        "decode" => {
            let Some(encoded) = args.get(2) else {
                usage("decode <encoded>")
            };
            let ts = Timestamp::decode(encoded).context("Failed to decode")?;
            println!("{}", serde_json::to_string_pretty(&ts.to_record())?);
            if let Some(datetime) = ts.to_datetime() {
                println!("time: {}", datetime.to_rfc3339());
            }
        }
        "encode" => {
            let Some(json) = args.get(2) else {
                usage("encode <json>")
            };
            let record: serde_json::Value =
                serde_json::from_str(json).context("Invalid JSON")?;
            let ts = Timestamp::from_record(&record).context("Invalid timestamp record")?;
            println!("{ts}");
        }
        "compare" => {
            let (Some(a), Some(b)) = (args.get(2), args.get(3)) else {
                usage("compare <a> <b>")
            };
            let a = Timestamp::decode(a).context("Failed to decode first timestamp")?;
            let b = Timestamp::decode(b).context("Failed to decode second timestamp")?;
            let verdict = match a.cmp(&b) {
                Ordering::Less => "before",
                Ordering::Equal => "equal",
                Ordering::Greater => "after",
            };
            println!("{verdict}");
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Create the local clock, restoring `HLC_STATE` when present.
fn build_clock() -> Result<Clock> {
    let config = CliConfig::from_env()?;
    let node_id = config.resolve_node_id()?;

    Ok(match config.state {
        Some(state) => {
            tracing::debug!(
                %node_id,
                physical_time = state.physical_time,
                "Restoring clock state"
            );
            Clock::from_state(state)
        }
        None => Clock::new(node_id),
    })
}

fn usage(command: &str) -> ! {
    eprintln!("Usage: hlc {command}");
    std::process::exit(1);
}

fn print_help() {
    println!(
        r#"HLC CLI

USAGE:
    hlc <COMMAND> [OPTIONS]

COMMANDS:
    now                 Print a timestamp at the current wall-clock time
    tick [count]        Stamp <count> local events (default 1) and print the clock state
    merge <remote>      Merge a remote timestamp and print the receive timestamp
    decode <encoded>    Print a timestamp as a JSON record
    encode <json>       Print a JSON record in string form
    compare <a> <b>     Print whether <a> is before, equal to, or after <b>
    help                Show this help message

ENVIRONMENT:
    HLC_NODE_ID         Node identifier (random when unset)
    HLC_STATE           Clock state JSON to restore, as printed by `tick`
    RUST_LOG            Log filter (default: warn)

EXAMPLES:
    hlc decode "1700000000000:0:device-A"
    hlc encode '{{"physical_time":1700000000000,"logical_time":0,"node_id":"device-A"}}'
    hlc compare "1000:1:A" "1000:1:B"
"#
    );
}
