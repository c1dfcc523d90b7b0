//! Command-line argument handling.

use anyhow::{bail, Context, Result};

use rollcall_core::validate_threshold;

pub const USAGE: &str = "\
Usage: rollcall [COMMAND] [OPTIONS]

Commands:
  (none)              Seed demo data and open the interactive menu
  report              Print the comprehensive attendance report
  issues [THRESHOLD]  List people below THRESHOLD percent attendance

Options:
  --json              Print reports as JSON
  --seed N            Seed the attendance simulation for repeatable output
  -h, --help          Show this help";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Interactive,
    Report,
    Issues { threshold: Option<f64> },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
    pub json: bool,
    pub seed: Option<u64>,
}

pub fn parse_args<I, S>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut command = Command::Interactive;
    let mut json = false;
    let mut seed = None;

    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => command = Command::Help,
            "--json" => json = true,
            "--seed" => {
                let value = iter.next().context("--seed requires a value")?;
                seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid seed: {}", value))?,
                );
            }
            "report" => command = Command::Report,
            "issues" => {
                let threshold = iter
                    .next_if(|next| !next.starts_with("--"))
                    .map(|value| parse_threshold(value))
                    .transpose()?;
                command = Command::Issues { threshold };
            }
            other => bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }

    Ok(Args { command, json, seed })
}

pub fn parse_threshold(value: &str) -> Result<f64> {
    let threshold: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid threshold: {}", value))?;
    validate_threshold(threshold)?;
    Ok(threshold)
}
