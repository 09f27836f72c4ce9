use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use pallet_template_core::{generate, BoxDims, EngineConfig, PalletDims};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "pallet-template",
    about = "Generate stable two-layer pallet palletization templates",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, global = true, help_heading = "Logging")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate ranked templates for a pallet and box size
    Generate(GenerateArgs),
}

#[derive(Parser, Debug, Clone)]
struct GenerateArgs {
    /// Pallet length
    #[arg(long, help_heading = "Pallet")]
    pallet_l: u32,
    /// Pallet width
    #[arg(long, help_heading = "Pallet")]
    pallet_w: u32,

    /// Box length
    #[arg(long, help_heading = "Box")]
    box_l: u32,
    /// Box width
    #[arg(long, help_heading = "Box")]
    box_w: u32,
    /// Box height (carried through to the output, unused by the solver)
    #[arg(long, default_value_t = 0, help_heading = "Box")]
    box_h: u32,

    /// Number of distinct templates to search for
    #[arg(long, default_value_t = 1, help_heading = "Search")]
    num_solutions: usize,
    /// Parallel solver workers
    #[arg(long, default_value_t = 4, help_heading = "Search")]
    workers: u32,
    /// RNG seed, for reproducible output
    #[arg(long, help_heading = "Search")]
    seed: Option<u64>,
    /// Base layer time budget in milliseconds
    #[arg(long, default_value_t = 10_000, help_heading = "Search")]
    base_time_limit_ms: u64,
    /// Upper layer time budget per attempt, in milliseconds
    #[arg(long, default_value_t = 5_000, help_heading = "Search")]
    upper_time_limit_ms: u64,
    /// Multiplier on num_solutions bounding diversification attempts
    #[arg(long, default_value_t = 5, help_heading = "Search")]
    diversification_attempts_factor: usize,

    /// Write the resulting bundle to this file instead of stdout
    #[arg(long, help_heading = "Output")]
    out: Option<PathBuf>,
    /// Pretty-print the output JSON
    #[arg(long, default_value_t = false, help_heading = "Output")]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Generate(args) => run_generate(args),
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let pallet = PalletDims::new(args.pallet_l, args.pallet_w);
    let box_dims = BoxDims::new(args.box_l, args.box_w, args.box_h);
    let cfg = EngineConfig::builder()
        .num_solutions(args.num_solutions)
        .workers(args.workers)
        .seed(args.seed)
        .base_time_limit(Duration::from_millis(args.base_time_limit_ms))
        .upper_time_limit(Duration::from_millis(args.upper_time_limit_ms))
        .diversification_attempts_factor(args.diversification_attempts_factor)
        .build();

    info!(?pallet, ?box_dims, "generating templates");
    let bundle = generate(pallet, box_dims, &cfg).context("template generation failed")?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&bundle)?
    } else {
        serde_json::to_string(&bundle)?
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing output to {}", path.display()))?;
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
