use chrono::Datelike;
use clap::Parser;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use lunacid_core::options::LunacidOptions;
use lunacid_core::{run, GenerationOutput, GenerationSettings, Result};

#[derive(Debug, Parser)]
#[command(name = "Lunacid-CLI", version, about = "Lunacid multiworld generator")]
struct Args {
    /// JSON option bundle for the player.
    #[arg(long)]
    options: PathBuf,

    #[arg(long)]
    seed: u64,

    /// Calendar month to generate for; defaults to the current one.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    #[arg(long, default_value_t = 1)]
    player: u32,

    #[arg(long, default_value = "Player")]
    player_name: String,

    /// Write slot data here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON object of entrance pairings from an external entrance shuffle.
    #[arg(long)]
    entrances: Option<PathBuf>,

    /// Print every generated item with its classification to stderr.
    #[arg(long, default_value_t = false)]
    list_pool: bool,

    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn print_summary(output: &GenerationOutput) {
    eprintln!("Locations: {}", output.locations);
    eprintln!("Shuffled items: {}", output.pool.len());
    for placement in &output.locked {
        eprintln!("Locked: {} -> {}", placement.location, placement.item.name);
    }
    for event in &output.events {
        eprintln!("Event: {} ({}) in {}", event.location, event.event, event.region);
    }
    if let Some(plan) = &output.prefill {
        eprintln!(
            "Alchemy pre-fill: {} materials over {} drop locations",
            plan.items.len(),
            plan.locations.len()
        );
    }
}

/// Slot data goes to `out`; everything else goes to `diag` so `out` stays
/// valid JSON.
fn emit(output: &GenerationOutput, list_pool: bool, out: &mut dyn Write, diag: &mut dyn Write) -> Result<()> {
    if list_pool {
        for item in &output.pool {
            writeln!(diag, "{}\t{}", item.name, item.classification)?;
        }
    }
    let json = serde_json::to_string_pretty(&output.slot_data)?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn generate(args: Args) -> Result<()> {
    let src = fs::read_to_string(&args.options)?;
    let options = LunacidOptions::from_json_str(&src)?;
    let month = args.month.unwrap_or_else(|| chrono::Local::now().month());
    let entrances: BTreeMap<String, String> = match &args.entrances {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => BTreeMap::new(),
    };

    let output = run(GenerationSettings {
        seed: args.seed,
        month,
        player: args.player,
        player_name: args.player_name,
        options,
        entrances,
    })?;

    print_summary(&output);
    let mut diag = io::stderr().lock();
    match args.output {
        Some(path) => emit(&output, args.list_pool, &mut fs::File::create(path)?, &mut diag),
        None => emit(&output, args.list_pool, &mut io::stdout().lock(), &mut diag),
    }
}

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(err) = generate(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> GenerationOutput {
        run(GenerationSettings {
            seed: 5,
            month: 6,
            player: 1,
            player_name: "Demi".to_string(),
            options: LunacidOptions::default(),
            entrances: BTreeMap::new(),
        })
        .unwrap()
    }

    #[test]
    fn listed_pool_stays_out_of_slot_data_stream() {
        let output = output();
        let mut out = Vec::new();
        let mut diag = Vec::new();
        emit(&output, true, &mut out, &mut diag).unwrap();

        let slot_data: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(slot_data["ut_seed"], 5);
        let listing = String::from_utf8(diag).unwrap();
        assert_eq!(listing.lines().count(), output.pool.len());
    }

    #[test]
    fn pool_listing_is_opt_in() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        emit(&output(), false, &mut out, &mut diag).unwrap();
        assert!(diag.is_empty());
        assert!(!out.is_empty());
    }

    #[test]
    fn list_pool_parses_without_output() {
        let args = Args::try_parse_from(["Lunacid-CLI", "--options", "o.json", "--seed", "3", "--list-pool"]).unwrap();
        assert!(args.list_pool);
        assert!(args.output.is_none());
    }
}
