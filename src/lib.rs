mod cli;
mod utils;

pub mod auth;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod events;
pub mod gestures;
pub mod protocol;
pub mod settings;
pub mod store;
pub mod ui;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use auth::{AuthContext, IdentityFile};
use cli::{Cli, Commands};
use db::Database;
use events::EventBus;
use protocol::commands::{simulate, SimulateOptions};
use settings::SettingsStore;

pub use error::HandwashError;

pub(crate) struct AppState {
    pub(crate) db: Database,
    pub(crate) auth: AuthContext,
    pub(crate) settings: SettingsStore,
    pub(crate) events: EventBus,
}

impl AppState {
    fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let db = Database::new(data_dir.join("handwash.sqlite3"))?;
        let auth = AuthContext::from_identity(IdentityFile::new(data_dir.join("identity.json")));
        let settings = SettingsStore::new(data_dir.join("settings.json"))?;

        Ok(Self {
            db,
            auth,
            settings,
            events: EventBus::new(),
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("handwash-monitor"))
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(async move {
        let state = AppState::open(&data_dir)?;
        log::debug!("Using data directory {}", data_dir.display());

        match cli.command {
            Commands::Login { email } => auth::commands::login(&state, &email).await?,
            Commands::Logout => auth::commands::logout(&state)?,
            Commands::Status => auth::commands::status(&state).await?,
            Commands::Dashboard => dashboard::commands::show_dashboard(&state).await,
            Commands::Simulate {
                fast,
                no_haptics,
                seed,
            } => {
                simulate(
                    &state,
                    SimulateOptions {
                        fast,
                        no_haptics,
                        seed,
                    },
                )
                .await?
            }
            Commands::Settings { overrides } => {
                let config = state.settings.configure(&overrides)?;
                println!("Detection window: {} ms", config.detection_window_ms);
                println!("Settle delay:     {} ms", config.settle_delay_ms);
                println!("Completion delay: {} ms", config.completion_delay_ms);
                println!(
                    "Haptics:          {}",
                    if config.haptics_enabled { "on" } else { "off" }
                );
            }
        }

        Ok(())
    })
}
