use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "STARGAZER_LOG";
const DEFAULT_FILTER: &str = "stargazer=info";

/// Initializes logging to a file, since the terminal belongs to the UI.
///
/// Returns the path of the log file.
pub fn init() -> Result<PathBuf> {
    let dir = std::env::temp_dir().join("stargazer");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join("stargazer.log");
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(path)
}
