//! Page replacement simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Run:** Replay one reference string with one algorithm and print the report.
//! 2. **Compare:** Replay it with every algorithm and rank them, or pit one
//!    algorithm against its prediction-enhanced variant.
//! 3. **Bench:** Run the built-in workloads with and without prediction.

use std::error::Error;
use std::{fs, process};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pagesim_core::config::{Algorithm, SimConfig};
use pagesim_core::sim::report::{RankingTable, Summary};
use pagesim_core::sim::{compare_all, compare_ml, rank};
use pagesim_core::workloads::{self, parse_reference_string, workload_stats};
use pagesim_core::{Page, SimError, Simulator};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    author,
    version,
    about = "Virtual-memory page replacement simulator",
    long_about = "Replay page reference strings against FIFO, LRU, LFU, Optimal and Clock replacement,\nwith an optional TLB, working-set analysis and predictive prefetching.\n\nExamples:\n  pagesim run --refs 7,0,1,2,0,3,0,4,2,3,0,3,2 --algorithm fifo --no-tlb\n  pagesim compare --workload \"Web Browsing\" --frames 4\n  pagesim bench --algorithm lru"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one algorithm and print its report.
    Run {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        sim: SimArgs,

        /// Print the result bundle as JSON instead of the text report.
        #[arg(long)]
        json: bool,

        /// Write the output to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Rank every algorithm on one reference string.
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        sim: SimArgs,

        /// Compare the selected algorithm with and without prediction instead.
        #[arg(long)]
        ml: bool,

        /// Print the runs as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run every built-in workload with and without prediction.
    Bench {
        #[command(flatten)]
        sim: SimArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Comma-separated reference string, e.g. "7,0,1,2".
    #[arg(short, long, conflicts_with = "workload")]
    refs: Option<String>,

    /// Name of a built-in workload (see `pagesim bench`).
    #[arg(short, long)]
    workload: Option<String>,
}

#[derive(Args, Debug)]
struct SimArgs {
    /// JSON configuration file; flags below override it.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of physical frames.
    #[arg(short, long)]
    frames: Option<usize>,

    /// Replacement algorithm (fifo, lru, lfu, optimal, clock).
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// TLB capacity.
    #[arg(long)]
    tlb_size: Option<usize>,

    /// Disable the TLB.
    #[arg(long)]
    no_tlb: bool,

    /// Enable predictive prefetching.
    #[arg(long)]
    ml: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Run {
            input,
            sim,
            json,
            output,
        } => cmd_run(&input, &sim, json, output.as_deref()),
        Commands::Compare {
            input,
            sim,
            ml,
            json,
        } => cmd_compare(&input, &sim, ml, json),
        Commands::Bench { sim } => cmd_bench(&sim),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file (if any) and applies the flag overrides.
fn build_config(args: &SimArgs) -> CliResult<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json(&fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.frames = frames;
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(capacity) = args.tlb_size {
        config.tlb.capacity = capacity;
    }
    if args.no_tlb {
        config.tlb.enabled = false;
    }
    if args.ml {
        config.predictor.enabled = true;
    }
    config.validate()?;
    Ok(config)
}

/// Resolves the reference string from `--refs` or `--workload`.
fn load_reference(input: &InputArgs) -> CliResult<Vec<Page>> {
    match (&input.refs, &input.workload) {
        (Some(text), _) => Ok(parse_reference_string(text)?),
        (None, Some(name)) => workloads::find(name)
            .map(|w| w.pages)
            .ok_or_else(|| format!("unknown workload '{name}'").into()),
        (None, None) => Err(SimError::EmptyReferenceString.into()),
    }
}

fn emit(text: &str, output: Option<&str>) -> CliResult<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(path, "output written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_run(input: &InputArgs, args: &SimArgs, json: bool, output: Option<&str>) -> CliResult<()> {
    let config = build_config(args)?;
    let reference = load_reference(input)?;
    let result = Simulator::new(&config, reference)?.run();

    let text = if json {
        let mut text = result.to_json()?;
        text.push('\n');
        text
    } else {
        Summary(&result).to_string()
    };
    emit(&text, output)
}

fn cmd_compare(input: &InputArgs, args: &SimArgs, ml: bool, json: bool) -> CliResult<()> {
    let config = build_config(args)?;
    let reference = load_reference(input)?;

    if ml {
        let cmp = compare_ml(&config, &reference)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&cmp)?);
            return Ok(());
        }
        println!("Base:     {} ({} faults)", cmp.base.algorithm, cmp.base.page_faults);
        println!(
            "Enhanced: {} ({} faults)",
            cmp.enhanced.algorithm, cmp.enhanced.page_faults
        );
        println!(
            "Fault reduction: {} ({:.1}%)",
            cmp.fault_reduction, cmp.improvement_pct
        );
        return Ok(());
    }

    let results = compare_all(&config, &reference)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    print!("{}", RankingTable(&rank(&results)));
    Ok(())
}

fn cmd_bench(args: &SimArgs) -> CliResult<()> {
    let config = build_config(args)?;
    println!(
        "{} with {} frames, base vs. prediction-enhanced",
        config.algorithm, config.frames
    );
    println!();
    println!(
        "{:<18}{:<17}{:>6}{:>8}{:>8}{:>9}{:>10}",
        "Workload", "Category", "Refs", "Base", "ML", "Delta", "Accuracy"
    );
    println!("{}", "-".repeat(76));

    for workload in workloads::all() {
        let stats = workload_stats(&workload.pages);
        let cmp = compare_ml(&config, &workload.pages)?;
        let accuracy = cmp
            .enhanced
            .prediction_stats
            .as_ref()
            .map_or(0.0, |s| s.accuracy);
        println!(
            "{:<18}{:<17}{:>6}{:>8}{:>8}{:>8.1}%{:>9.1}%",
            workload.name,
            workload.category,
            stats.length,
            cmp.base.page_faults,
            cmp.enhanced.page_faults,
            cmp.improvement_pct,
            accuracy
        );
    }
    Ok(())
}
