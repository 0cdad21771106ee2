use anyhow::Context;
use clap::Parser;
use tracing::info;

use hangul_spellcheck::cli::Args;
use hangul_spellcheck::config::Config;
use hangul_spellcheck::logging;
use hangul_spellcheck::session::{self, SessionOptions};
use hangul_spellcheck::spell_check::{Corrector, Ml4kClassifier, SpellChecker};
use hangul_spellcheck::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?
            .with_env(),
        None => Config::load().context("loading default config")?,
    };
    let config = args.apply(config);

    let map = config.load_corrections()?;
    info!("Using {} corrections", map.len());

    let classifier = Ml4kClassifier::new(
        &config.api_endpoint,
        config.require_api_key()?,
        config.request_timeout,
    )
    .map_err(AppError::from)?;
    let checker = SpellChecker::new(Corrector::new(map), classifier);

    let options = SessionOptions {
        json: args.json,
        error_log: config.log_file.clone(),
    };
    let mut stdout = std::io::stdout();

    if let Some(text) = &args.text {
        session::check_and_report(&checker, text, &options, &mut stdout).await?;
        return Ok(());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session::run_session(&checker, stdin, &mut stdout, &options).await?;
    Ok(())
}
