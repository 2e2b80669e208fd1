//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            if path.exists() {
                println!("{}", formatter.info(&format!("{}", path.display())));
            } else {
                println!(
                    "{}",
                    formatter.warning(&format!("{} not found, showing defaults", path.display()))
                );
            }
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init {
            proxy_url,
            place_id,
            force,
        } => {
            init(path, proxy_url, place_id, force)?;
            println!(
                "{}",
                formatter.success(&format!("Configuration written to {}", path.display()))
            );
        }
    }

    Ok(())
}

fn init(
    path: &Path,
    proxy_url: Option<String>,
    place_id: Option<String>,
    force: bool,
) -> Result<Config> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut config = Config::default();
    if let Some(url) = proxy_url {
        config.proxy_url = url;
    }
    config.place_id = place_id;
    config.save_to(path)?;
    Ok(config)
}
