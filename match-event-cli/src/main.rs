//! Match Events CLI Application
//!
//! This is the command-line interface for the match event decoder.
//! It uses the match-event-decoder library and adds:
//! - TOML configuration (extractor tags, report windows, action categories)
//! - Match summaries and filtered event listings
//! - Player lists
//! - Per-player text reports, generated in parallel across players

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use match_event_decoder::{
    player_list, summary, team_involvement, Event, Extractor, PlayerPerformance,
};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod events;
mod report;

use config::AppConfig;

/// Match Events - Decode and analyze match annotation exports
#[derive(Parser, Debug)]
#[command(name = "match-events")]
#[command(about = "Decode and analyze sports-analytics XML annotation exports", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print match summary statistics
    Summary {
        /// XML export to read
        file: PathBuf,
    },

    /// List events, optionally filtered
    Events {
        /// XML export to read
        file: PathBuf,

        /// Only events with this action
        #[arg(long)]
        action: Option<String>,

        /// Only events whose team contains this text
        #[arg(long)]
        team: Option<String>,

        /// Only events from this half
        #[arg(long)]
        half: Option<String>,

        /// Maximum number of events to print
        #[arg(long, value_name = "COUNT")]
        limit: Option<usize>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },

    /// List players found in the export
    Players {
        /// XML export to read
        file: PathBuf,

        /// Only players whose team contains this text
        #[arg(long)]
        team: Option<String>,
    },

    /// Generate per-player performance reports
    Report {
        /// XML export to read
        file: PathBuf,

        /// Player name (can be repeated, default: every player)
        #[arg(short, long = "player", value_name = "NAME")]
        players: Vec<String>,

        /// Directory to write reports into (default: stdout)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Match Events CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", match_event_decoder::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    match &args.command {
        Command::Summary { file } => summary_mode(file, &config),
        Command::Events {
            file,
            action,
            team,
            half,
            limit,
            json,
        } => {
            let filter = events::EventFilter {
                action: action.clone(),
                team: team.clone(),
                half: half.clone(),
                limit: *limit,
            };
            events_mode(file, &config, &filter, *json)
        }
        Command::Players { file, team } => players_mode(file, &config, team.as_deref()),
        Command::Report {
            file,
            players,
            output_dir,
        } => report_mode(file, &config, players, output_dir.as_deref()),
    }
}

/// Load and extract an export with the configured tags
fn load_events(path: &Path, config: &AppConfig) -> Result<Vec<Event>> {
    let extractor = Extractor::with_config(config.extractor.clone());
    let events = extractor
        .extract_file(path)
        .with_context(|| format!("Failed to extract events from {:?}", path))?;

    log::info!("Loaded {} events from {:?}", events.len(), path);
    Ok(events)
}

fn summary_mode(file: &Path, config: &AppConfig) -> Result<()> {
    let events = load_events(file, config)?;
    let stats = summary(&events);

    print!("{}", report::render_summary(&stats, config.report.top_actions));
    Ok(())
}

fn events_mode(
    file: &Path,
    config: &AppConfig,
    filter: &events::EventFilter,
    json: bool,
) -> Result<()> {
    let all = load_events(file, config)?;
    let selected = filter.apply(&all);
    log::debug!("{} of {} events selected", selected.len(), all.len());

    if json {
        println!("{}", events::render_json(&selected)?);
    } else {
        print!("{}", events::render_lines(&selected));
    }
    Ok(())
}

fn players_mode(file: &Path, config: &AppConfig, team: Option<&str>) -> Result<()> {
    let events = load_events(file, config)?;
    let players = player_list(&events, team);

    if players.is_empty() {
        println!("No players found");
        return Ok(());
    }

    println!("Available players:");
    for (i, player) in players.iter().enumerate() {
        println!("{:2}. {}", i + 1, player);
    }
    Ok(())
}

fn report_mode(
    file: &Path,
    config: &AppConfig,
    requested: &[String],
    output_dir: Option<&Path>,
) -> Result<()> {
    let events = load_events(file, config)?;
    let available = player_list(&events, None);

    let players: Vec<String> = if requested.is_empty() {
        available.clone()
    } else {
        for name in requested {
            if !available.contains(name) {
                anyhow::bail!(
                    "Player '{}' not found. Available players: {}",
                    name,
                    available.join(", ")
                );
            }
        }
        requested.to_vec()
    };

    log::info!("Generating {} player report(s)", players.len());
    let generated_at = chrono::Local::now();

    // Reports are independent: share the immutable events across threads
    let reports: Vec<(String, String)> = players
        .par_iter()
        .map(|name| {
            let perf = PlayerPerformance::compute(&events, name, &config.actions);
            let involvement = team_involvement(
                &events,
                name,
                config.report.window_seconds,
                config.report.match_duration_floor,
            );
            let text = report::render_player_report(&perf, involvement.as_ref(), generated_at);
            (name.clone(), text)
        })
        .collect();

    match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
            for (name, text) in &reports {
                let path = dir.join(report::report_file_name(name));
                fs::write(&path, text)
                    .with_context(|| format!("Failed to write report: {:?}", path))?;
                println!("Player report saved as: {}", path.display());
            }
        }
        None => {
            for (_, text) in &reports {
                println!("{}", text);
            }
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
