use anyhow::Result;

pub mod cli;
pub mod commands;
pub mod services;
pub mod settings;
pub mod ux;

use cli::{Cli, Commands};
use settings::{AppConfig, FileSettingsStore, JsonFileSettingsStore, SettingsStore};

pub struct AppCtx {
    pub settings_store: Box<dyn SettingsStore>,
}

impl AppCtx {
    /// Stored settings merged over the built-in defaults.
    pub fn load_config(&self) -> Result<AppConfig> {
        self.settings_store.load()?.resolve()
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let settings_store: Box<dyn SettingsStore> = match cli.settings {
        Some(path) => Box::new(JsonFileSettingsStore::new(path)),
        None => Box::new(FileSettingsStore::new()?),
    };
    let ctx = AppCtx { settings_store };

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::handle(&ctx),
        Commands::Generate(args) => commands::generate::handle(args, &ctx),
        Commands::Config(args) => commands::config::handle(args, &ctx),
    }
}
