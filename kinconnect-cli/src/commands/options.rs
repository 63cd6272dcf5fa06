//! Options command - print an option set or its candidate set
//!
//! Filtering uses the same rule as the TUI dropdowns (case-insensitive
//! substring, original order), so this doubles as a quick check of what a
//! given query would show.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kinconnect_core::{KinConfig, OptionKind};
use tracing::debug;

#[derive(Parser, Debug)]
pub struct OptionsArgs {
    /// Which option set to print
    #[arg(value_enum)]
    pub kind: OptionSetArg,

    /// Only print options containing this text (case-insensitive)
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Print a JSON array instead of one option per line
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSetArg {
    Conditions,
    Allergies,
}

impl From<OptionSetArg> for OptionKind {
    fn from(arg: OptionSetArg) -> Self {
        match arg {
            OptionSetArg::Conditions => OptionKind::MedicalConditions,
            OptionSetArg::Allergies => OptionKind::Allergies,
        }
    }
}

pub fn run_options(args: OptionsArgs, config: &KinConfig) -> Result<()> {
    let set = config.options.option_set(args.kind.into());
    let query = args.filter.as_deref().unwrap_or("");
    let candidates = set.candidates(query);

    debug!(
        kind = %set.kind(),
        query,
        matches = candidates.len(),
        total = set.len(),
        "filtered option set"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&candidates)
            .context("Failed to serialize options to JSON")?;
        println!("{}", json);
    } else {
        for candidate in candidates {
            println!("{}", candidate);
        }
    }

    Ok(())
}
