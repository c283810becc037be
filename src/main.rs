//! fcc-advisor - FCC Product-Quality Prediction & Optimum-Value Advisor
//!
//! Loads two pre-trained regressor artifacts, evaluates operating
//! conditions against them, and reports blended predictions, limit
//! violations, and the economic optimum value.
//!
//! # Usage
//!
//! ```bash
//! # One-shot evaluation with the configured defaults
//! fcc-advisor
//!
//! # What-if evaluation with overrides
//! fcc-advisor --set reaction_temp_c=502 --set feed_mass_flow_tph=430
//!
//! # Overrides from a TOML file, JSON report for scripting
//! fcc-advisor --input case.toml --json
//!
//! # Interactive session
//! fcc-advisor --interactive
//! ```
//!
//! # Environment Variables
//!
//! - `FCC_ADVISOR_CONFIG`: Path to the advisor TOML config
//! - `RUST_LOG`: Logging level (default: info)

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use fcc_advisor::config::AdvisorConfig;
use fcc_advisor::display;
use fcc_advisor::pipeline::{PredictionPipeline, SessionState};
use fcc_advisor::types::{feature_index, FeatureVector, PredictionReport};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "fcc-advisor")]
#[command(about = "FCC product-quality prediction and optimum-value advisor")]
#[command(version)]
struct CliArgs {
    /// Path to the advisor config file (TOML)
    #[arg(long, env = "FCC_ADVISOR_CONFIG")]
    config: Option<PathBuf>,

    /// TOML file of feature overrides (key = value pairs)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Inline feature override, repeatable (e.g. --set reaction_temp_c=502)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Emit the report as JSON instead of the text rendering
    #[arg(long)]
    json: bool,

    /// Print the input features with their current defaults and exit
    #[arg(long)]
    list_features: bool,

    /// Interactive what-if session on stdin
    #[arg(long, short = 'i')]
    interactive: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => AdvisorConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AdvisorConfig::load(),
    };

    if args.list_features {
        print!("{}", display::render_feature_table(&config.defaults));
        return Ok(());
    }

    // Model load failures are fatal: no prediction is possible without both
    // artifacts.
    let pipeline =
        PredictionPipeline::from_config(&config).context("failed to initialize the advisor")?;

    let mut inputs = config.defaults.clone();
    if let Some(path) = &args.input {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        let overrides: BTreeMap<String, f64> =
            toml::from_str(&raw).context("input file must contain `feature = number` pairs")?;
        inputs.extend(overrides);
    }
    for entry in &args.set {
        let (key, value) = parse_set(entry)?;
        inputs.insert(key, value);
    }

    if args.interactive {
        run_interactive(&pipeline, &config, inputs, args.json)
    } else {
        let features = FeatureVector::from_values(&inputs)?;
        let report = pipeline.run(&features)?;
        emit(&report, args.json)?;
        Ok(())
    }
}

/// Parse one `--set KEY=VALUE` override.
fn parse_set(entry: &str) -> Result<(String, f64)> {
    let Some((key, raw_value)) = entry.split_once('=') else {
        bail!("--set expects KEY=VALUE, got '{entry}'");
    };
    let key = key.trim();
    if feature_index(key).is_none() {
        bail!("unknown feature '{key}' (use --list-features for the full list)");
    }
    let value: f64 = raw_value
        .trim()
        .parse()
        .with_context(|| format!("value for '{key}' is not a number: '{raw_value}'"))?;
    Ok((key.to_string(), value))
}

fn emit(report: &PredictionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", display::render_report(report));
    }
    Ok(())
}

// ============================================================================
// Interactive Session
// ============================================================================

const INTERACTIVE_HELP: &str = "\
Commands:
  set <feature> <value>   override one input
  unset <feature>         revert one input to its configured default
  show                    print the current inputs
  run                     run the prediction pipeline
  last                    redisplay the previous report
  help                    this text
  quit                    exit
";

/// Line-oriented what-if loop. Each `run` is one full pipeline cycle; the
/// previous report stays available through `last`.
fn run_interactive(
    pipeline: &PredictionPipeline,
    config: &AdvisorConfig,
    mut inputs: BTreeMap<String, f64>,
    json: bool,
) -> Result<()> {
    println!("fcc-advisor interactive session ('help' for commands)");
    let mut session = SessionState::new();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "set" => match (parts.next(), parts.next()) {
                (Some(key), Some(raw_value)) => {
                    if feature_index(key).is_none() {
                        println!("unknown feature '{key}'");
                        continue;
                    }
                    match raw_value.parse::<f64>() {
                        Ok(value) => {
                            inputs.insert(key.to_string(), value);
                            println!("{key} = {value}");
                        }
                        Err(_) => println!("not a number: '{raw_value}'"),
                    }
                }
                _ => println!("usage: set <feature> <value>"),
            },
            "unset" => match parts.next() {
                Some(key) => match config.defaults.get(key) {
                    Some(default) => {
                        inputs.insert(key.to_string(), *default);
                        println!("{key} = {default} (default)");
                    }
                    None => println!("unknown feature '{key}'"),
                },
                None => println!("usage: unset <feature>"),
            },
            "show" => print!("{}", display::render_feature_table(&inputs)),
            "run" => match FeatureVector::from_values(&inputs) {
                Ok(features) => match pipeline.run(&features) {
                    Ok(report) => {
                        emit(&report, json)?;
                        session.record(report);
                    }
                    Err(e) => println!("prediction failed: {e}"),
                },
                Err(e) => println!("invalid inputs: {e}"),
            },
            "last" => match session.last() {
                Some(report) => emit(report, json)?,
                None => println!("no report yet - use 'run' first"),
            },
            "help" => print!("{INTERACTIVE_HELP}"),
            "quit" | "exit" => break,
            other => println!("unknown command '{other}' ('help' for commands)"),
        }
    }

    info!(runs = session.runs(), "Interactive session ended");
    Ok(())
}
