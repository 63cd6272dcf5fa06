//! kinconnect CLI - KinConnect care-coordination front-end for the terminal
//!
//! Entry point for the `kinconnect` binary, which provides:
//! - The interactive TUI (`tui` subcommand): dropdown test harness, patient
//!   invitation page, home menu and dashboard
//! - Option-set inspection and filtering (`options` subcommand)
//! - Configuration helpers (`config` subcommand)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kinconnect_core::KinConfig;
use tracing::debug;

mod commands;
mod tracing_setup;
mod tui;

use tui::Route;

#[derive(Parser, Debug)]
#[command(
    name = "kinconnect",
    author,
    version,
    about = "KinConnect care-coordination pages in your terminal",
    long_about = "Pick medical conditions and allergies with searchable dropdowns, \
                  invite patients, and inspect the built-in option sets."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ~/.kinconnect/config.toml)
    #[arg(long, global = true, env = "KINCONNECT_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive terminal UI
    Tui(TuiArgs),
    /// List an option set, or filter it the way the dropdowns do
    Options(commands::options::OptionsArgs),
    /// Inspect or create the kinconnect configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct TuiArgs {
    /// Page to open first (e.g. /, /dashboard, /test-dropdowns, /invite-patient)
    #[arg(long, default_value = "/", value_parser = parse_route)]
    page: Route,
}

fn parse_route(s: &str) -> Result<Route, String> {
    s.parse()
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(KinConfig::config_path);

    let log_file = matches!(cli.command, Commands::Tui(_)).then(KinConfig::log_path);
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        log_file,
    })
    .ok();

    debug!(config = %config_path.display(), "starting kinconnect");

    match cli.command {
        Commands::Tui(args) => {
            let config = load_config(&config_path)?;
            tui::run(&config, args.page)?
        }
        Commands::Options(args) => {
            let config = load_config(&config_path)?;
            commands::options::run_options(args, &config)?
        }
        Commands::Config(args) => commands::config::run_config(args, &config_path)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn load_config(path: &std::path::Path) -> Result<KinConfig> {
    KinConfig::load_from(path).with_context(|| format!("Failed to load config from {:?}", path))
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
