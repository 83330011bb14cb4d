//! Terminal front end: session loop, effect execution and presentation.
mod app;
mod effects;
mod terminal;

pub use app::{error_exit_code, run_app};
