//! Workspace tasks: options schema generation and preset/scenario checks.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use scroll_reveal::options::RevealOptions;
use scroll_reveal::scenario::Scenario;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "scroll-reveal workspace tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the options JSON schema
    Schema {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Load every preset in a directory and report failures
    CheckPresets {
        /// Preset directory
        #[arg(default_value = "presets")]
        dir: PathBuf,
    },

    /// Parse every scenario in a directory and report failures
    CheckScenarios {
        /// Scenario directory
        #[arg(default_value = "demos")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Schema { out } => schema(out.as_deref()),
        Command::CheckPresets { dir } => check_presets(&dir),
        Command::CheckScenarios { dir } => check_scenarios(&dir),
    }
}

fn schema(out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&RevealOptions::json_schema())?;
    match out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn check_presets(dir: &Path) -> Result<()> {
    let names = RevealOptions::list_presets(dir);
    if names.is_empty() {
        bail!("no presets found in {}", dir.display());
    }
    let mut failed = 0;
    for name in &names {
        let path = dir.join(format!("{name}.toml"));
        match RevealOptions::load(&path) {
            Ok(_) => println!("ok    {name}"),
            Err(e) => {
                failed += 1;
                eprintln!("FAIL  {name}: {e}");
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} presets failed", names.len());
    }
    Ok(())
}

fn check_scenarios(dir: &Path) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?;
    let mut checked = 0;
    let mut failed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "toml") {
            continue;
        }
        checked += 1;
        match Scenario::load(&path) {
            Ok(scenario) => println!(
                "ok    {} ({} steps)",
                path.display(),
                scenario.steps.len()
            ),
            Err(e) => {
                failed += 1;
                eprintln!("FAIL  {}: {e}", path.display());
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {checked} scenarios failed");
    }
    Ok(())
}
