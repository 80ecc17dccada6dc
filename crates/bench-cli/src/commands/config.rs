use bench_config::BenchConfig;
use bench_logger as logger;
use clap::Subcommand;
use colored::Colorize;

use crate::errors::BenchError;
use crate::GlobalOpts;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print every configured value
    Show,
    /// Print the config file location
    Path,
    /// Print one value
    Get { key: String },
    /// Set one value and save the file
    Set { key: String, value: String },
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> Result<(), BenchError> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = BenchConfig::load()?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Path => {
            let path = BenchConfig::path()?;
            logger::debug(&format!("Config path resolved to: {}", path.display()));
            println!("{}", path.display());
        }
        ConfigAction::Get { key } => {
            let config = BenchConfig::load()?;
            match config.get(&key) {
                Some(value) => println!("{}", value),
                None => logger::warn(&format!("{} is not set", key)),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = BenchConfig::load()?;
            config.set(&key, value.clone())?;
            let path = config.save()?;
            logger::success(&format!("Set {} = {}", key, value));
            logger::debug(&format!("Saved config to {}", path.display()));
        }
    }
    Ok(())
}
