use std::path::Path;

use anyhow::Result;
use pplan_config::Config;

use crate::cli::ConfigCommands;

pub fn handle(cmd: ConfigCommands, config: &Config, explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);

    match cmd {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(&path)?;
            println!("✓ Wrote default config to {}", path.display());
        }
    }

    Ok(())
}
