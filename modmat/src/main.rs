use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use modmat::{OutputFormat, Session, SessionConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Modular matrix calculator driven by single-letter commands on stdin")]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Number of matrices to reserve room for up front
    #[arg(long, default_value_t = 10)]
    capacity: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = SessionConfig::default()
        .with_output_format(cli.format)
        .with_initial_capacity(cli.capacity);

    let stdout = io::stdout();
    let mut session = Session::new(BufWriter::new(stdout.lock()), config);

    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open command file {}", path.display()))?;
            session.run(BufReader::new(file))
        }
        None => session.run(io::stdin().lock()),
    }
    .context("session aborted")?;

    session.into_inner().flush()?;
    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        "done"
    );
    Ok(())
}
