use std::sync::Arc;

mod ioutil;
mod error;
mod config;
mod metric;
mod jhu;
mod merge;
mod timeseries;
mod aggregate;
mod chart;
mod dashboard;

pub use ioutil::{magic_open, open_source};
pub use error::*;
pub use config::*;
pub use metric::*;
pub use jhu::*;
pub use merge::*;
pub use timeseries::*;
pub use aggregate::*;
pub use chart::*;
pub use dashboard::*;


/// Install the `env_logger` backend, defaulting to `info` when `RUST_LOG`
/// is unset.
pub fn init_logging() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Whether standard output is attached to a terminal.
pub fn stdout_is_tty() -> bool {
	isatty::stdout_isatty()
}

/// Load the merged table from the environment-configured source and wrap
/// it in a dashboard handler.
pub fn env_dashboard() -> Result<Dashboard, Error> {
	let config = SourceConfig::from_env();
	let table = UnifiedTable::load(&config)?;
	Ok(Dashboard::new(Arc::new(table)))
}
