//! Config command implementation - print or write the example configuration

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;

pub fn execute(config: &Config, example: bool, output: Option<PathBuf>) -> Result<()> {
    match (output, example) {
        (Some(path), true) => {
            Config::default().save_to_file(&path)?;
            log::info!("Example configuration written to: {}", path.display());
        }
        (Some(path), false) => {
            config.save_to_file(&path)?;
            log::info!("Configuration written to: {}", path.display());
        }
        (None, true) => print!("{}", Config::example_toml()?),
        (None, false) => print!("{}", toml::to_string_pretty(config)?),
    }

    Ok(())
}
