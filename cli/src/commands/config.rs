//! Config commands

use crate::config::{Config, KEYS};
use crate::ConfigCommands;

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            config.set(&key, value)?;
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            println!("{}: {}", key, config.get(&key)?.unwrap_or("(not set)"));
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            for key in KEYS {
                println!("{}: {}", key, config.get(key)?.unwrap_or("(not set)"));
            }
        }
    }
    Ok(())
}
