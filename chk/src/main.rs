//! # chk
//!
//! Runs the checked-error scenarios and reports whether each one behaved
//! as required.
//!
//! Scenario output (the lines an operation prints) goes to stdout. Logs
//! go to stderr so that `--summary` leaves stdout as plain JSON.
//!
//! Scenario selection, in order of precedence:
//! - positional `SCENARIO` arguments,
//! - `[demo] scenarios` from `--config`,
//! - every scenario.

use chk::config::{DemoConfig, LogLevel};
use chk::console::{Console, Stdout};
use chk::scenario::{self, Report, Scenario};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// chk — checked-error propagation scenarios
#[derive(Parser, Debug)]
#[command(name = "chk")]
#[command(author = "The chk developers")]
#[command(version)]
#[command(about = "Runs checked-error propagation scenarios and checks their outcomes")]
struct Args {
    /// Scenarios to run: raise, compute, forward, handle, nothing,
    /// call_safely, safe_scope.
    #[arg(value_name = "SCENARIO")]
    scenarios: Vec<Scenario>,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run each scenario this many times (overrides the config file).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    repeat: Option<u32>,

    /// Print every report as JSON instead of the scenario output.
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => DemoConfig::load_validated(path),
        None => Ok(DemoConfig::default()),
    };
    let log_level = config
        .as_ref()
        .map_or(LogLevel::default(), |c| c.shared.log_level);
    setup_tracing(&args, log_level);

    info!("chk v{} starting...", env!("CARGO_PKG_VERSION"));

    let outcome = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, &config));

    match outcome {
        Ok(true) => info!("All scenarios behaved as expected"),
        Ok(false) => {
            error!("One or more scenarios did not behave as expected");
            process::exit(1);
        }
        Err(e) => {
            error!("FATAL: {e}");
            process::exit(1);
        }
    }
}

fn run(args: &Args, config: &DemoConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let scenarios = if args.scenarios.is_empty() {
        config.demo.scenarios.clone()
    } else {
        args.scenarios.clone()
    };
    let repeat = args.repeat.unwrap_or(config.demo.repeat);

    info!(
        "Service '{}': {} scenario(s), {} run(s) each",
        config.shared.service_name,
        scenarios.len(),
        repeat
    );

    let mut console = Stdout;
    // Reports are only kept for the summary; plain runs stream.
    let mut reports: Vec<Report> = Vec::new();
    let mut all_expected = true;

    for scenario in scenarios {
        for attempt in 1..=repeat {
            let report = scenario::run(scenario);

            if !args.summary {
                for line in &report.lines {
                    console.emit(line);
                }
            }

            if report.is_expected() {
                info!("{} [{}/{}]: {:?}", scenario, attempt, repeat, report.outcome);
            } else {
                warn!(
                    "{} [{}/{}]: unexpected {:?}, lines {:?}",
                    scenario, attempt, repeat, report.outcome, report.lines
                );
                all_expected = false;
            }

            if args.summary {
                reports.push(report);
            }
        }
    }

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(all_expected)
}

fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_metadata_is_the_projects_own() {
        let command = Args::command();
        command.clone().debug_assert();
        assert_eq!(command.get_author(), Some("The chk developers"));
        assert_eq!(env!("CARGO_PKG_AUTHORS"), "The chk developers");
        assert_eq!(env!("CARGO_PKG_LICENSE"), "AGPL-3.0-only");
    }
}
