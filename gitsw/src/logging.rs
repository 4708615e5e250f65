use gitsw_core::paths;
use log::LevelFilter;
use std::{path::PathBuf, str::FromStr};

const LOG_FILE_NAME: &str = "gitsw.log";

/// Environment variable holding a log level such as `debug`.
pub const LOG_ENV_VAR: &str = "GITSW_LOG";

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

pub fn default_log_file() -> PathBuf {
    paths::cache_dir().join(LOG_FILE_NAME)
}

/// `-v` flags win over the environment; an unparsable variable is ignored.
pub fn resolve_level(verbose: u8, env_level: Option<&str>) -> LevelFilter {
    match verbose {
        0 => env_level
            .and_then(|level| LevelFilter::from_str(level.trim()).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn setup_logging(level: LevelFilter) -> anyhow::Result<()> {
    let log_file = default_log_file();
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("gitsw logging initialised (level={level})");
    Ok(())
}
