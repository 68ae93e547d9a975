//! Startup survival simulator CLI.
//!
//! Run Monte Carlo simulations of a venture's capability profile through
//! the Seed → Unicorn stage sequence.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- --profile stats.json       # Profile from the analysis step
//!   cargo run --bin simulate -- --team 80 --needs 65 -n 5000
//!   cargo run --bin simulate -- --profile stats.json --seed 42   # Reproducible run

use anyhow::{Context, Result};
use startup_hell::profile::{parse_score, Capability, CapabilityProfile};
use startup_hell::{run_simulation_with, SimConfig, SimReport, StageModel};
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

struct CliArgs {
    config: SimConfig,
    profile: CapabilityProfile,
    model: StageModel,
    write_json: bool,
    verbosity: u8,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args)?;
    init_tracing(cli.verbosity);

    if cli.verbosity > 0 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              STARTUP HELL SIMULATOR                           ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", cli.config.iterations);
        println!("  Parallel:       {}", cli.config.parallel);
        if let Some(seed) = cli.config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let result = run_simulation_with(&cli.profile, &cli.model, &cli.config)?;
    let report = SimReport::new(&cli.profile, &cli.model, result)?;

    if cli.verbosity > 0 {
        println!("{}", report.to_text());
    } else {
        println!(
            "survival={:.1}% bottleneck={} seed={}",
            report.result.survival_rate, report.result.bottleneck_stage, report.result.seed
        );
    }

    if cli.write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        fs::write(&filename, report.to_json())
            .with_context(|| format!("failed to write JSON report to {filename}"))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "error",
        1 => "warn",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut runs: Option<i64> = None;
    let mut seed = None;
    let mut parallel = false;
    let mut profile_path: Option<String> = None;
    let mut model_path: Option<String> = None;
    let mut overrides: Vec<(Capability, String)> = Vec::new();
    let mut write_json = false;
    let mut verbosity = 1;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = move || value_after(args, i);
        match flag {
            "-n" | "--runs" => {
                let v = value()?;
                runs = Some(v.parse::<i64>().with_context(|| format!("invalid --runs '{v}'"))?);
                i += 1;
            }
            "-s" | "--seed" => {
                let v = value()?;
                seed = Some(v.parse::<u64>().with_context(|| format!("invalid --seed '{v}'"))?);
                i += 1;
            }
            "--profile" => {
                profile_path = Some(value()?);
                i += 1;
            }
            "--model" => {
                model_path = Some(value()?);
                i += 1;
            }
            "--product" | "--team" | "--strategy" | "--marketing" | "--needs" => {
                let capability = match flag {
                    "--product" => Capability::Product,
                    "--team" => Capability::Team,
                    "--strategy" => Capability::Strategy,
                    "--marketing" => Capability::Marketing,
                    _ => Capability::ConsumerNeeds,
                };
                overrides.push((capability, value()?));
                i += 1;
            }
            "--parallel" => parallel = true,
            "--json" => write_json = true,
            "-v" | "--verbose" => verbosity = 2,
            "-q" | "--quiet" => verbosity = 0,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {other} (see --help)"),
        }
        i += 1;
    }

    let mut config = match runs {
        Some(n) => SimConfig::try_with_iterations(n)?,
        None => SimConfig::default(),
    };
    config.seed = seed;
    config.parallel = parallel;

    let mut profile = match profile_path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read profile {path}"))?;
            CapabilityProfile::from_json(&text)
                .with_context(|| format!("failed to parse profile {path}"))?
        }
        None => CapabilityProfile::default(),
    };
    for (capability, raw) in overrides {
        profile = profile.with_score(capability, i64::from(parse_score(&raw)));
    }

    let model = match model_path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read stage model {path}"))?;
            StageModel::from_json(&text)
                .with_context(|| format!("failed to load stage model {path}"))?
        }
        None => StageModel::canonical(),
    };

    Ok(CliArgs {
        config,
        profile,
        model,
        write_json,
        verbosity,
    })
}

fn value_after(args: &[String], i: usize) -> Result<String> {
    args.get(i + 1)
        .cloned()
        .with_context(|| format!("{} requires a value", args[i]))
}

fn print_help() {
    println!("Startup Hell Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of rollouts (default: 1200)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --profile <FILE>    Capability profile JSON (missing scores count as 0)");
    println!("    --product <V>       Override the product score");
    println!("    --team <V>          Override the team score");
    println!("    --strategy <V>      Override the strategy score");
    println!("    --marketing <V>     Override the marketing score");
    println!("    --needs <V>         Override the consumer needs score");
    println!("    --model <FILE>      Stage model JSON (weights + difficulty per stage)");
    println!("    --parallel          Spread rollouts across all cores");
    println!("    --json              Save JSON report");
    println!("    -v, --verbose       Debug logging");
    println!("    -q, --quiet         One-line summary only");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate -- --profile stats.json");
    println!("    cargo run --bin simulate -- --team 80 --needs 65 -n 5000");
    println!("    cargo run --bin simulate -- --profile stats.json --seed 42 --json");
}
