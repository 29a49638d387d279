mod config;

use clap::{Parser, Subcommand};
use config::{Config, ConfigError, LOG_ENV};
use sb_serve::AppState;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skillbridge", version, about = "Learnings and applied skills over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Create the Learning and AppliedSkill tables, then exit.
    Migrate {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the OpenAPI document.
    Openapi,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialize tracing: {0}")]
    Tracing(String),
    #[error("failed to prepare database {path}: {message}")]
    Database { path: String, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("skillbridge: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve { config } => {
            let config = Config::load(config.as_deref())?;
            init_tracing(&config.log.filter)?;
            let addr = config.server.socket_addr()?;
            prepare_database(&config.database.path, config.database.auto_migrate)?;
            let state = AppState {
                db_path: config.database.path,
                capabilities: config.features,
                auth: config.auth,
            };
            info!(
                db_path = %state.db_path,
                auth = ?state.auth.mode,
                applied_mutations = state.capabilities.applied_mutations,
                "starting skillbridge"
            );
            sb_serve::serve(state, addr).await?;
        }
        Command::Migrate { config } => {
            let config = Config::load(config.as_deref())?;
            init_tracing(&config.log.filter)?;
            prepare_database(&config.database.path, true)?;
            info!(db_path = %config.database.path, "tables ready");
        }
        Command::Openapi => {
            println!("{}", sb_serve::openapi::generate_spec());
        }
    }
    Ok(())
}

fn init_tracing(default_filter: &str) -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| CliError::Tracing(err.to_string()))
}

fn prepare_database(path: &str, migrate: bool) -> Result<(), CliError> {
    let parent = Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent)?;
    }
    if migrate {
        sb_db::schema::open_and_migrate(path).map_err(|err| CliError::Database {
            path: path.to_string(),
            message: err.to_string(),
        })?;
    }
    Ok(())
}
