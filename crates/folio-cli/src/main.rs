mod check;
mod config;
mod diag;
mod pin;
mod sanitize;
mod submit;
mod timeline;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use folio_motion::contact::SIMULATED_DELAY;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about = "Validate portfolio content and preview its motion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate a site file
    Check {
        /// Site file (defaults to the configured site, then ./site.toml)
        path: Option<PathBuf>,
    },
    /// Sample the loading sequence frame by frame
    Timeline {
        /// Frames per second to sample at
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Show horizontal gallery pin geometry
    Pin {
        /// Number of project cards
        #[arg(long, default_value_t = 6)]
        cards: usize,
        /// Progress through the pin, 0 to 1 (omit to list every snap point)
        #[arg(long)]
        progress: Option<f64>,
        /// Viewport width in pixels
        #[arg(long, default_value_t = pin::DEFAULT_VIEWPORT_WIDTH)]
        viewport_width: f64,
    },
    /// Run the contact form against a simulated mail backend
    Submit {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Simulated delivery delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Set a configuration value
    Set {
        /// The key to set (site)
        key: String,
        /// The value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// The key to get (site)
        key: String,
    },
    /// Show the config file path
    Path,
    /// Clear a configuration value
    Clear {
        /// The key to clear (site)
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    diag::set_verbose(cli.verbose);

    match cli.command {
        Commands::Check { path } => check::run(path),
        Commands::Timeline { fps, json } => timeline::run(fps, json),
        Commands::Pin {
            cards,
            progress,
            viewport_width,
        } => pin::run(cards, progress, viewport_width),
        Commands::Submit {
            name,
            email,
            message,
            delay_ms,
        } => {
            let delay = delay_ms.map(Duration::from_millis).unwrap_or(SIMULATED_DELAY);
            submit::run(name, email, message, delay).await
        }
        Commands::Config { action } => handle_config(action),
    }
}

fn handle_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "site" => {
                    config.set_site(value.clone());
                    config.save()?;
                    println!("{}", format!("Site file set to: {}", value).green());
                }
                _ => bail!("Unknown config key: {}. Available keys: site", key),
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match key.as_str() {
                "site" => match config.get_site() {
                    Some(site) => println!("site: {}", site),
                    None => println!("{}", "site: not set".dimmed()),
                },
                _ => bail!("Unknown config key: {}. Available keys: site", key),
            }
        }
        ConfigAction::Path => {
            if let Some(path) = Config::path() {
                println!("{}", path.display());
            } else {
                bail!("Could not determine config path");
            }
        }
        ConfigAction::Clear { key } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "site" => {
                    config.clear_site();
                    config.save()?;
                    println!("{}", "Site file cleared (using ./site.toml).".green());
                }
                _ => bail!("Unknown config key: {}. Available keys: site", key),
            }
        }
    }
    Ok(())
}
