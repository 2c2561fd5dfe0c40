use std::path::PathBuf;

use clap::{Parser, Subcommand};
use firealarm_core::Config;

mod commands;
mod console;
mod error;
mod logging;
mod router;
mod telegram;

use error::BotError;

#[derive(Parser)]
#[command(name = "firealarm-bot", version, about = "Fire-alarm drill floor tracker bot")]
struct Cli {
    /// Config file (default: ~/.config/firealarm/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the Telegram bot until Ctrl-C
    Run,
    /// Answer commands typed on stdin
    Console {
        /// User id reported for every line
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        user_id: i64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<(), BotError> {
    let path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match cli.command {
        Commands::Config { action } => commands::config::run(action, &path),
        Commands::Run => {
            let config = Config::load_from(&path)?;
            logging::init(&config.logging);
            commands::run::run(&config).await
        }
        Commands::Console { user_id } => {
            let config = Config::load_from(&path)?;
            logging::init(&config.logging);
            commands::console::run(&config, user_id).await
        }
    }
}
