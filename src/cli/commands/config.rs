//! Config command handler

use crate::args::ConfigSubcommand;
use degree_planner::config::{Config, ConfigError};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let outcome = match subcommand {
        None => {
            show(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            show(config, key.as_deref());
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => config
            .set(&key, &value)
            .and_then(|()| config.save())
            .map(|()| println!("✓ Set {key} = {value}")),
        Some(ConfigSubcommand::Unset { key }) => config
            .unset(&key, defaults)
            .and_then(|()| config.save())
            .map(|()| println!("✓ Reset {key} to default")),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(e) = outcome {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn show(config: &Config, key: Option<&str>) {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        },
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
}

fn reset() -> Result<(), ConfigError> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        Config::reset()?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
