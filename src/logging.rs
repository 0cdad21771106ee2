use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` wins; otherwise `-v` raises the level.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append a timestamped line to the error log.
pub fn log_error(log_path: &Path, message: &str) {
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match fs::OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "[{}] {}", timestamp, message);
        }
        Err(e) => warn!("Cannot open error log {}: {}", log_path.display(), e),
    }
}
