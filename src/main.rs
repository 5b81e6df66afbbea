//! Fencing Drill - terminal runner
//!
//! Runs one drill and prints its events as they happen, as text or as JSON
//! lines. Ctrl-C cancels the drill; it still ends with "halte".

use fencing_drill::core::config::DrillSettings;
use fencing_drill::core::error::Result;
use fencing_drill::core::types::{Difficulty, Weapon};
use fencing_drill::sequencer::{
    generate_for_mode, DrillEvent, DurationConfig, FixedPairConfig, IntervalConfig, ModeConfig,
    PatternConfig, Progress, Sequencer,
};
use fencing_drill::DrillLibrary;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

/// Fencing footwork drill runner
#[derive(Parser, Debug)]
#[command(name = "fencing-drill")]
#[command(about = "Stream timed fencing footwork commands")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    /// Weapon: foil, epee or sabre
    #[arg(long, global = true, default_value = "foil")]
    weapon: Weapon,

    /// Random seed for deterministic runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print events as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the generated command list without timing
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Alternate the two commands of a drill pair
    Pair {
        #[arg(long, default_value = "marche_rompe")]
        pair: String,
        #[arg(long, default_value_t = 10)]
        reps: u32,
        #[arg(long, default_value_t = 60)]
        tempo: u32,
    },
    /// Repeat a preset combination (A, B or C)
    Pattern {
        #[arg(long, default_value = "A")]
        pattern: String,
        #[arg(long, default_value_t = 5)]
        reps: u32,
        #[arg(long, default_value_t = 60)]
        tempo: u32,
    },
    /// Random phrases for a fixed time
    Duration {
        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        difficulty: String,
        #[arg(long, default_value_t = 60)]
        seconds: u64,
        #[arg(long, default_value_t = 1000)]
        min_ms: u64,
        #[arg(long, default_value_t = 3000)]
        max_ms: u64,
    },
    /// Work/rest sets
    Interval {
        #[arg(long, default_value_t = 30)]
        work: u64,
        #[arg(long, default_value_t = 15)]
        rest: u64,
        #[arg(long, default_value_t = 5)]
        sets: u32,
        #[arg(long, default_value_t = 90)]
        tempo: u32,
    },
    /// Run a mode described in a TOML file (`mode = "pattern"` etc.)
    File { path: PathBuf },
}

impl Mode {
    fn into_config(self, weapon: Weapon) -> Result<ModeConfig> {
        let config = match self {
            Mode::Pair { pair, reps, tempo } => ModeConfig::FixedPair(FixedPairConfig {
                pair_id: pair,
                repetitions: reps,
                tempo_bpm: tempo,
                weapon,
            }),
            Mode::Pattern { pattern, reps, tempo } => ModeConfig::Pattern(PatternConfig {
                pattern_id: pattern,
                repetitions: reps,
                tempo_bpm: tempo,
                weapon,
            }),
            Mode::Duration { difficulty, seconds, min_ms, max_ms } => {
                ModeConfig::Duration(DurationConfig {
                    difficulty: Difficulty::from_tag(&difficulty),
                    duration_seconds: seconds,
                    min_interval_ms: min_ms,
                    max_interval_ms: max_ms,
                    weapon,
                })
            }
            Mode::Interval { work, rest, sets, tempo } => ModeConfig::Interval(IntervalConfig {
                work_seconds: work,
                rest_seconds: rest,
                sets,
                tempo_bpm: tempo,
                weapon,
            }),
            Mode::File { path } => ModeConfig::from_toml_file(&path)?,
        };
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => DrillSettings::from_toml_file(path)?,
        None => DrillSettings::default(),
    }
    .with_env_overrides()?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    // RUST_LOG wins over the settings file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let library = Arc::new(DrillLibrary::standard()?);
    let config = cli.mode.into_config(cli.weapon)?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!("Seed {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    if cli.dry_run {
        let commands = generate_for_mode(&config, &library, &mut rng)?;
        if cli.json {
            println!("{}", serde_json::to_string(&commands)?);
        } else {
            for (i, cmd) in commands.iter().enumerate() {
                let text = library.catalog.get(*cmd)?;
                println!("{:>4}  {:<14} {}", i + 1, text.french, text.japanese);
            }
        }
        return Ok(());
    }

    let sequencer = Sequencer::new(library, config).with_settings(settings);
    let rt = Runtime::new()?;
    rt.block_on(stream(sequencer, rng, cli.json))
}

async fn stream(sequencer: Sequencer, rng: ChaCha8Rng, json: bool) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(32);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let task = tokio::spawn(async move { sequencer.run(tx, cancel_rx, rng).await });

    let mut cancelled = false;
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => print_event(&event, json)?,
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !cancelled => {
                tracing::info!("Interrupted, stopping drill");
                let _ = cancel_tx.send(true);
                cancelled = true;
            }
        }
    }

    let summary = task.await.map_err(io::Error::from)??;
    if !json {
        println!(
            "{} commands, {}",
            summary.commands_emitted,
            if summary.completed { "completed" } else { "stopped" }
        );
    }
    Ok(())
}

fn print_event(event: &DrillEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match event {
        DrillEvent::Ready { command } | DrillEvent::Halt { command } => {
            println!(">> {} / {}", command.fr, command.jp);
        }
        DrillEvent::Command { command, progress } => {
            println!("{:<14} {:<18} {}", command.fr, command.jp, describe(progress));
        }
        DrillEvent::Rest { set, total_sets, seconds } => {
            println!("-- rest {}s after set {}/{}", seconds, set, total_sets);
        }
        DrillEvent::Countdown { remaining, .. } => println!("   {}", remaining),
        DrillEvent::End { completed } => {
            println!("== end{}", if *completed { "" } else { " (cancelled)" });
        }
    }
    Ok(())
}

fn describe(progress: &Progress) -> String {
    let mut parts = Vec::new();
    if let (Some(rep), Some(total)) = (progress.rep, progress.total_reps) {
        parts.push(format!("{}/{}", rep, total));
    }
    if let (Some(set), Some(total)) = (progress.set, progress.total_sets) {
        parts.push(format!("set {}/{}", set, total));
    }
    if let Some(remaining) = &progress.remaining {
        parts.push(remaining.clone());
    }
    parts.join("  ")
}
