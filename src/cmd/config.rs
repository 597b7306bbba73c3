//! Configuration view and validation commands: `roadmap config`.

use anyhow::Result;
use std::path::PathBuf;

use roadmap::board_config::{BoardSection, BoardToml, CONFIG_FILE};
use roadmap::config::Config;
use roadmap::ui::icons::{CHECK, WARN};

use super::super::{Cli, ConfigCommands};

fn print_section(section: &BoardSection) {
    println!("[board]");
    if let Some(data_file) = &section.data_file {
        println!("  data_file = \"{}\"", data_file);
    }
    println!("  language = \"{}\"", section.language);
    println!("  suggestion_limit = {}", section.suggestion_limit);
    println!("  description_limit = {}", section.description_limit);
    println!("  unplanned_title = \"{}\"", section.unplanned_title);
    println!();
}

pub fn cmd_config(cli: &Cli, project_dir: PathBuf, command: Option<ConfigCommands>) -> Result<()> {
    let config = Config::new(project_dir, cli.verbose, cli.data_file.clone(), cli.lang)?;
    let board = config.board_config();
    let config_path = board.config_file();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Roadmap Configuration");
            println!("=====================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No {} found at {}", CONFIG_FILE, config_path.display());
                println!("Using default configuration:");
            }
            println!();
            print_section(&board.toml.board);

            println!("Effective values (with env/CLI overrides):");
            println!("  language = \"{}\"", config.language());
            match board.configured_data_file() {
                Some(path) => println!("  data_file = \"{}\"", path.display()),
                None => println!("  data_file = (discovered at runtime)"),
            }
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No {} found. Using defaults (valid).", CONFIG_FILE);
                return Ok(());
            }

            let warnings = board.validate();
            if warnings.is_empty() {
                println!("{}Configuration is valid.", CHECK);
            } else {
                println!("{}Configuration warnings:", WARN);
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("{} already exists at {}", CONFIG_FILE, config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            config.ensure_directories()?;
            BoardToml::default().save(&config_path)?;

            println!("{}Created {} at {}", CHECK, CONFIG_FILE, config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [board] data_file, language");
            println!("  - [board] suggestion_limit, description_limit, unplanned_title");
            println!();
        }
    }

    Ok(())
}
