// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! CLI tool for Sector Console (sector)

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use colored::Colorize;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use sectorlib::batch;
#[cfg(feature = "cli")]
use sectorlib::config::{Overrides, DEFAULT_CONFIG_FILE};
#[cfg(feature = "cli")]
use sectorlib::{
    CategorySource, Config, Console, ConsoleSettings, PanelActions, Result, SectorClient, SectorError, ShapeCache,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "sector")]
#[command(about = "Sector Console: browse and control a Sector Alarm installation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (TOML, or JSON by extension)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Account email
    #[arg(short, long, global = true)]
    email: Option<String>,

    /// Account password
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Panel identifier
    #[arg(short = 'i', long, global = true)]
    panel_id: Option<String>,

    /// Panel code used to unlock and disarm
    #[arg(short = 'c', long, global = true)]
    panel_code: Option<String>,

    /// Shape cache file
    #[arg(long, global = true)]
    cache: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,
    /// Fetch the items with the given ids from every category
    Fetch {
        /// Comma-separated component ids
        #[arg(long, value_delimiter = ',', required = true)]
        id: Vec<String>,
        /// Hide serial numbers and ids in the output
        #[arg(long)]
        mask: bool,
    },
    /// Fetch and print every category
    Dump {
        /// Hide serial numbers and ids in the output
        #[arg(long)]
        mask: bool,
    },
    /// Inspect or rebuild the shape cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Lock a door
    Lock {
        /// Lock serial number
        serial: String,
    },
    /// Unlock a door (needs the panel code)
    Unlock {
        /// Lock serial number
        serial: String,
    },
    /// Arm the alarm system
    Arm,
    /// Disarm the alarm system (needs the panel code)
    Disarm,
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum CacheAction {
    /// Fetch every category and rewrite the cache
    Rebuild,
    /// Show category, section and item counts
    Stats,
    /// Print the cached skeletons
    Show {
        /// Only this category
        category: Option<String>,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum ConfigAction {
    /// Print a sample configuration file
    Sample,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {}", "[ERROR]".red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Menu);
    if let Commands::Config { action: ConfigAction::Sample } = command {
        print!("{}", Config::sample_toml());
        return Ok(());
    }

    let mut config = Config::load(&cli.config)?;
    config.apply(Overrides {
        email: cli.email,
        password: cli.password,
        panel_id: cli.panel_id,
        panel_code: cli.panel_code,
        cache_path: cli.cache,
    });

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_filter()))
        .init();
    log::debug!("{:?}", config);

    config.validate()?;
    let mut client = SectorClient::new(&config)?;
    client.login()?;

    match command {
        Commands::Menu => {
            let cache = ShapeCache::load(&config.cache_path, &mut client)?;
            let stdin = std::io::stdin();
            let mut console = Console::new(
                client,
                cache,
                ConsoleSettings::from_config(&config),
                stdin.lock(),
                std::io::stdout(),
            );
            console.run()
        }
        Commands::Fetch { id, mask } => {
            let names = client.categories();
            let lookup = batch::lookup_ids(&mut client, &names, &id)?;
            for found in lookup.found {
                let item = if mask { batch::mask_sensitive(&found.item) } else { found.item };
                println!("{}", format!("[{}]", found.category).cyan().bold());
                println!("{}", serde_json::to_string_pretty(&item)?);
            }
            for id in lookup.missing {
                eprintln!("{} ID '{}' not found", "[WARN]".yellow(), id);
            }
            Ok(())
        }
        Commands::Dump { mask } => {
            let names = client.categories();
            let all = serde_json::Value::Object(batch::fetch_all(&mut client, &names)?);
            let all = if mask { batch::mask_sensitive(&all) } else { all };
            println!("{}", serde_json::to_string_pretty(&all)?);
            Ok(())
        }
        Commands::Cache { action } => cache_command(action, &config, &mut client),
        Commands::Lock { serial } => {
            client.lock(&serial)?;
            println!("{}", "Door locked successfully.".green());
            Ok(())
        }
        Commands::Unlock { serial } => {
            client.unlock(&serial, required_panel_code(&config)?)?;
            println!("{}", "Door unlocked successfully.".green());
            Ok(())
        }
        Commands::Arm => {
            client.arm()?;
            println!("{}", "System armed successfully.".green());
            Ok(())
        }
        Commands::Disarm => {
            client.disarm(required_panel_code(&config)?)?;
            println!("{}", "System disarmed successfully.".green());
            Ok(())
        }
        Commands::Config { .. } => Ok(()),
    }
}

#[cfg(feature = "cli")]
fn cache_command(action: CacheAction, config: &Config, client: &mut SectorClient) -> Result<()> {
    match action {
        CacheAction::Rebuild => {
            let mut cache = ShapeCache::new(&config.cache_path);
            let failed = cache.rebuild(client)?;
            println!(
                "{} {} categories written to {}",
                "Cache rebuilt:".green().bold(),
                cache.len(),
                cache.path().display()
            );
            if !failed.is_empty() {
                eprintln!("{} skipped {}", "[WARN]".yellow(), failed.join(", "));
            }
        }
        CacheAction::Stats => {
            let stats = ShapeCache::load(&config.cache_path, client)?.statistics();
            println!("{}", "Cache Statistics:".cyan().bold());
            println!("Total Categories: {}", stats.categories);
            println!("Total Sections: {}", stats.sections);
            println!("Total Items: {}", stats.items);
        }
        CacheAction::Show { category } => {
            let cache = ShapeCache::load(&config.cache_path, client)?;
            let shown = match category {
                Some(name) => cache
                    .get(&name)
                    .cloned()
                    .ok_or(SectorError::UnknownCategory(name))?,
                None => serde_json::Value::Object(cache.entries().clone()),
            };
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn required_panel_code(config: &Config) -> Result<&str> {
    config.panel_code().ok_or_else(|| {
        SectorError::Configuration("a panel code is required: set panel_code or pass --panel-code".into())
    })
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(1);
}
