//! Rollcall - attendance tracking for students and staff.
//!
//! Seeds a demonstration roster, simulates attendance over the school-day
//! window, then either prints a report or opens an interactive menu.

mod args;
mod demo;
mod menu;

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rollcall_core::{Config, Registry, ReportingEngine};

use args::{parse_args, Args, Command, USAGE};
use menu::Session;

/// Directory for an optional rolling log file
const LOG_DIR_ENV_VAR: &str = "ROLLCALL_LOG_DIR";

/// File name prefix for the rolling log
const LOG_FILE_PREFIX: &str = "rollcall.log";

/// Initialize the tracing subscriber for logging.
/// The returned guard must live until exit so the file writer flushes.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV_VAR) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

/// Simulate attendance, then print a single report to `out`.
/// Simulation progress goes to `progress`.
fn run_once<R: Rng, W: Write, P: Write>(
    args: &Args,
    config: &Config,
    engine: &ReportingEngine,
    registry: &mut Registry,
    rng: &mut R,
    out: &mut W,
    progress: &mut P,
) -> Result<()> {
    demo::simulate_attendance(registry, rng, progress)?;

    match args.command {
        Command::Report => {
            let report = engine.comprehensive_report(registry);
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                write!(out, "{}", report)?;
            }
        }
        Command::Issues { threshold } => {
            let threshold = threshold.unwrap_or(config.issue_threshold_pct);
            let issues = engine.attendance_issues(registry, threshold);
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&issues)?)?;
            } else {
                write!(out, "{}", issues)?;
            }
        }
        Command::Interactive | Command::Help => {}
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = parse_args(std::env::args().skip(1))?;
    if args.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let _guard = init_tracing();
    info!("Rollcall starting");

    let config = Config::load().context("Failed to load configuration")?;
    let today = Local::now().date_naive();
    let mut registry = Registry::new(config.clone());
    demo::seed_roster(&mut registry)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = ReportingEngine::new(today);

    if args.command == Command::Interactive {
        demo::simulate_attendance(&mut registry, &mut rng, &mut io::stdout())?;
        let mut session = Session {
            registry,
            engine,
            issue_threshold_pct: config.issue_threshold_pct,
            today,
        };
        let stdin = io::stdin();
        session.run(stdin.lock(), &mut io::stdout())?;
    } else {
        // JSON output must be the only thing on stdout
        let mut progress: Box<dyn Write> = if args.json {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        run_once(
            &args,
            &config,
            &engine,
            &mut registry,
            &mut rng,
            &mut io::stdout(),
            &mut progress,
        )?;
    }

    info!("Rollcall shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rollcall_core::calendar::school_days_from;

    struct Run {
        out: String,
        progress: String,
    }

    fn run(argv: &[&str]) -> Run {
        let args = parse_args(argv).unwrap();
        let config = Config::default();
        let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let mut registry =
            Registry::with_school_days(config.clone(), school_days_from(today, 10));
        demo::seed_roster(&mut registry).unwrap();
        let engine = ReportingEngine::new(today);

        let mut out = Vec::new();
        let mut progress = Vec::new();
        run_once(
            &args,
            &config,
            &engine,
            &mut registry,
            &mut StdRng::seed_from_u64(1),
            &mut out,
            &mut progress,
        )
        .unwrap();
        Run {
            out: String::from_utf8(out).unwrap(),
            progress: String::from_utf8(progress).unwrap(),
        }
    }

    #[test]
    fn test_report_json_is_the_only_output() {
        let result = run(&["report", "--json"]);
        assert!(!result.out.contains("Marking attendance"));
        let json: serde_json::Value = serde_json::from_str(&result.out).unwrap();
        assert_eq!(json["profiles"].as_array().map(|p| p.len()), Some(6));
        assert_eq!(json["statistics"]["persons"], 6);
        assert!(result.progress.contains("Marking attendance for"));
    }

    #[test]
    fn test_issues_json_is_the_only_output() {
        let result = run(&["issues", "100", "--json"]);
        assert!(!result.out.contains("Marking attendance"));
        let json: serde_json::Value = serde_json::from_str(&result.out).unwrap();
        assert_eq!(json["threshold_pct"], 100.0);
        // Nobody attends every day once S002 drops out
        assert!(!json["issues"].as_array().unwrap().is_empty());
        assert!(result.progress.contains("Marking attendance for"));
    }

    #[test]
    fn test_text_report_goes_to_out() {
        let result = run(&["report"]);
        assert!(result.out.contains("COMPREHENSIVE ATTENDANCE REPORT"));
        assert!(result.out.contains("SYSTEM STATISTICS"));
        assert_eq!(result.progress.matches("Marking attendance for").count(), 10);
    }
}
