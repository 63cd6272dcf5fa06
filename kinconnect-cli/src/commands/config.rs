use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinconnect_core::KinConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file populated with the defaults
    Init(InitArgs),
    /// Show the effective configuration as TOML
    Show,
    /// Check that the config file parses and is usable
    Validate,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, config_path: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, config_path),
        ConfigCommands::Show => run_show(config_path),
        ConfigCommands::Validate => run_validate(config_path),
        ConfigCommands::Path => run_path(config_path),
    }
}

fn run_init(args: InitArgs, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create {:?}", parent))?;
    }

    let content = KinConfig::default().to_toml_string()?;
    std::fs::write(config_path, content)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("Created config at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", config_path.display());
    println!("  2. Add [options] medical_conditions / allergies to replace the built-in lists");
    println!("  3. Run: kinconnect config validate");

    Ok(())
}

fn run_show(config_path: &Path) -> Result<()> {
    let config = KinConfig::load_from(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<()> {
    let config = KinConfig::load_from(config_path)
        .context(format!("Invalid config at {:?}", config_path))?;

    if config_path.exists() {
        println!("Config loaded from {}", config_path.display());
    } else {
        println!("No config at {}, defaults apply", config_path.display());
    }
    println!(
        "  medical conditions: {}",
        config.options.option_set(kinconnect_core::OptionKind::MedicalConditions).len()
    );
    println!(
        "  allergies: {}",
        config.options.option_set(kinconnect_core::OptionKind::Allergies).len()
    );
    println!("Configuration valid");

    Ok(())
}

fn run_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}
