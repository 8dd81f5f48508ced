//! Core library surface for the Bank Ranker TUI.
//!
//! The form model, the scorer client, and the submit cycle are usable without
//! a terminal; `ui` wires them to Ratatui for the binary.
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod results;
pub mod rows;
pub mod scorer;
pub mod submission;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use collector::collect;
pub use config::{Cli, Config};
pub use error::RankerError;
pub use logging::init_logging;
pub use models::{BankField, BankMetrics, RankedBank, Ratio};
pub use results::ResultsView;
pub use rows::RowSequence;
pub use scorer::{HttpScorer, Scorer};
pub use submission::{SubmissionController, SubmitState};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
