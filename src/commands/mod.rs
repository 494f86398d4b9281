// Command handlers module
pub mod account;
pub mod config;
pub mod emergency;
pub mod history;
pub mod home;
pub mod live;
pub mod pair;
pub mod version;

use anyhow::{Context, Result};

use crate::core::{Config, ReadingFetcher};

// Re-exports for cleaner imports
pub use history::execute as history;
pub use home::execute as home;
pub use live::execute as live;
pub use pair::execute as pair;
pub use version::execute as version;

/// Runtime for the commands that talk to the sensor API
pub(crate) fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("pulse-worker")
        .build()
        .context("Failed to start async runtime")
}

pub(crate) fn fetcher_for(config: &Config) -> Result<ReadingFetcher> {
    ReadingFetcher::from_config(config).context("Failed to create sensor client")
}
