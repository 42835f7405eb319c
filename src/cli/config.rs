//! CLI handler for inspecting configuration.

use anyhow::{Context, Result};

use crate::cli::args::{ConfigCliArgs, ConfigCommand};
use crate::config::Config;

pub fn handle_config_command(args: ConfigCliArgs, config: &Config) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
            println!("{}", content);
        }
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }

    Ok(())
}
