use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use dealsim_core::{Deal, DealGenerator, Deals};
use dealsim_dds::BridgeSolver;
use dealsim_runner::{ParallelConfig, SimulationRequest, SimulationRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dealsim")]
#[command(about = "Monte Carlo bridge simulator with double-dummy evaluation", long_about = None)]
struct Args {
    /// JSON request file (reads stdin when omitted)
    #[arg(short = 'r', long = "request")]
    request: Option<PathBuf>,

    /// Master seed, overriding the request's
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(short = 't', long = "threads", default_value = "0")]
    threads: usize,

    /// Attempt seeds per parallel batch
    #[arg(long = "batch-size", default_value = "256")]
    batch_size: usize,

    /// Print the generated deals instead of running strategies
    #[arg(long = "deals-only")]
    deals_only: bool,

    /// Deal output format for --deals-only
    #[arg(short = 'f', long = "format", value_enum, default_value = "oneline")]
    format: DealFormat,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DealFormat {
    /// `n AKQT3.J6.KJ42.95 e ...`
    Oneline,
    /// PBN deal string, `N:... ... ... ...`
    Pbn,
    /// One JSON object per line
    Json,
}

fn format_deal(deal: &Deal, format: DealFormat) -> Result<String, serde_json::Error> {
    match format {
        DealFormat::Oneline => Ok(deal.to_string()),
        DealFormat::Pbn => Ok(deal.to_pbn()),
        DealFormat::Json => serde_json::to_string(deal),
    }
}

/// Print accepted deals as they are produced
fn write_deals<W: Write>(deals: &mut Deals<'_>, format: DealFormat, out: &mut W) -> io::Result<usize> {
    let mut written = 0;
    for deal in deals.by_ref() {
        writeln!(out, "{}", format_deal(&deal, format)?)?;
        written += 1;
    }
    Ok(written)
}

fn read_request(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let text = read_request(args.request.as_ref()).unwrap_or_else(|e| fail(e));
    let request = SimulationRequest::from_json(&text).unwrap_or_else(|e| fail(e));
    let mut simulation = request.build().unwrap_or_else(|e| fail(e));
    if let Some(seed) = args.seed {
        simulation.config.seed = Some(seed);
    }

    if args.deals_only {
        let mut generator = DealGenerator::new(simulation.config);
        let mut deals = generator.deals(simulation.trials);
        let written =
            write_deals(&mut deals, args.format, &mut io::stdout().lock()).unwrap_or_else(|e| fail(e));
        if deals.is_exhausted() {
            eprintln!(
                "Attempt budget exhausted: {} of {} deals after {} attempts",
                written,
                deals.requested(),
                deals.attempts()
            );
        } else {
            info!(attempts = deals.attempts(), "deals generated");
        }
        return;
    }

    if simulation.comparison.strategies().is_empty() {
        fail("request has no strategies (use --deals-only to just generate deals)");
    }

    let comparison = &simulation.comparison;
    let runner = SimulationRunner::new(BridgeSolver::new());
    let report = runner.run_parallel(
        |deal, solver| comparison.evaluate(deal, solver),
        simulation.trials,
        simulation.config.clone(),
        &ParallelConfig {
            num_threads: args.threads,
            batch_size: args.batch_size,
        },
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}
