//! Binary entry point: parse flags, start file logging, point the form at the
//! scorer, and drive the Ratatui event loop until the user exits.
use std::sync::Arc;

use bank_ranker::{init_logging, run_app, App, Cli, HttpScorer, RowSequence};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_file, config.verbose)?;

    let scorer = HttpScorer::new(&config.scorer_url)?;
    info!(endpoint = scorer.endpoint(), rows = config.initial_rows, "starting bank ranker");

    let mut app = App::new(RowSequence::with_rows(config.initial_rows), Arc::new(scorer));
    run_app(&mut app)
}
