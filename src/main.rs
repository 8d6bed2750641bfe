mod api;
mod cli;
mod config;
mod error;
mod output;
mod pairs;
mod reconcile;
mod render;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::{build_batch, DiffClient, PairSpec};
use crate::cli::Cli;
use crate::output::Formatter;
use crate::reconcile::Reconciler;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "multidiff=debug"
    } else {
        "multidiff=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Load config, apply CLI overrides
    let config = config::load_config();
    let server_url = cli.server.unwrap_or(config.server_url);
    let mode = cli.output.unwrap_or(config.output);
    let column_width = cli.width.unwrap_or(config.column_width);
    let fetch_content = !cli.no_fetch && config.fetch_content;

    let file_pairs = match cli.file.as_deref() {
        Some(path) => pairs::load_pairs_file(path)?,
        None => Vec::new(),
    };
    let pairs = pairs::resolve_pairs(
        pairs::from_flag_values(&cli.pairs),
        file_pairs,
        &config.default_pairs,
    );
    let client = DiffClient::new(&server_url, config.timeout)?;
    let fetch_limit = fetch_content.then_some(config.max_concurrent_fetches);
    let formatter = Formatter::new(mode, column_width);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    compare(&client, pairs, fetch_limit, &formatter, &mut out).await?;
    out.flush()?;
    Ok(())
}

/// Send the batch, fill in missing contents (when `fetch_limit` is set) and
/// write the formatted result.
async fn compare<W: Write>(
    client: &DiffClient,
    pairs: Vec<PairSpec>,
    fetch_limit: Option<usize>,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let request = build_batch(pairs);
    let mut batch = client
        .multi_diff(&request)
        .await
        .context("error making request")?;

    if let Some(limit) = fetch_limit {
        let report = Reconciler::new(client, limit).reconcile(&mut batch).await;
        tracing::debug!(
            fetched = report.fetched,
            failed = report.failed,
            "content fetch finished"
        );
    }

    formatter.write(out, &batch).context("writing output")?;
    Ok(())
}

#[tokio::main]
async fn main() {
    color_eyre::install().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("multidiff: {e:#}");
        std::process::exit(1);
    }
}
