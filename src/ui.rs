//! Ratatui front-end: the bank form on the left, the ranking on the right,
//! and a footer with status and key hints.

mod app;
mod forms;
mod terminal;

pub use app::App;
pub use terminal::run_app;
