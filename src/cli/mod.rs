#[allow(clippy::module_inception)]
mod cli;
mod log_level;

pub use cli::{Cli, Command};
pub use log_level::LogLevel;
