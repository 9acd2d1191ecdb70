use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_i18n::i18n;

i18n!("locales", fallback = "en");

mod app;
mod config;
mod coordinates;
mod event;
mod logging;
mod meteor;
mod projection;
mod shared_state;
mod tui;
mod utils;
mod widgets;
mod zodiac;

use app::App;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Set the application's locale based on the system locale
    let locale = sys_locale::get_locale().unwrap_or_else(|| String::from("en-US"));
    rust_i18n::set_locale(&locale);

    let log_path = logging::init()?;
    tracing::info!(%locale, log = %log_path.display(), "starting");

    let config = load_config()?;
    App::with_config(config)?.run().await
}

fn config_path() -> Result<PathBuf> {
    let home = std::env::home_dir().context("failed to locate home directory")?;
    Ok(home.join(".config/stargazer/config.toml"))
}

fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}
