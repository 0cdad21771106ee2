//! Command line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{timeout_from_secs, Config};

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    timeout_from_secs(secs)
}

/// Check Korean spelling against a correction dictionary
#[derive(Parser, Debug, Clone)]
#[command(name = "hangul-spellcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Config file (defaults to ~/.config/hangul-spellcheck/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// ML4K project API key
    #[arg(long, env = "ML4K_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Classification API base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// TOML dictionary with a [corrections] table
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// Check this text once instead of prompting
    #[arg(short, long)]
    pub text: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Command line values override the file and environment.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout = timeout;
        }
        if let Some(dictionary) = &self.dictionary {
            config.dictionary_path = Some(dictionary.clone());
        }
        config
    }
}
