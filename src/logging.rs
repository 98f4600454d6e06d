use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_DIR_ENV: &str = "PLANLINE_LOG_DIR";
pub const LOG_FILE_NAME: &str = "planline.log";

/// Directory for the rolling log: explicit override, then the
/// environment, then a folder under the system temp dir.
pub fn log_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    std::env::var(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("planline"))
}

/// Logs go to a daily file; the terminal belongs to the UI. Keep the guard
/// alive until exit or buffered lines are lost.
pub fn init(override_dir: Option<&Path>) -> Result<WorkerGuard> {
    let dir = log_dir(override_dir);
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env().add_directive("planline=info".parse()?))
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!(err))?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let dir = Path::new("/tmp/planline-logs");
        assert_eq!(log_dir(Some(dir)), dir.to_path_buf());
    }
}
