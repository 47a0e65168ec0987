use std::fs::File;
use std::io::{BufReader, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use punch_cli::{Cli, Config, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never interleave with command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut session = Session::new(config);
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), &mut writer, false)?;
        }
        None => {
            let stdin = std::io::stdin();
            let prompt = stdin.is_terminal();
            session.run(stdin.lock(), &mut writer, prompt)?;
        }
    }

    tracing::debug!(
        employees = session.registry().len(),
        events = session.ledger().len(),
        "session ended"
    );
    Ok(())
}
