//! Sensor data access.
//!
//! Fetches readings from the Pulse Vital API, puts them in window order,
//! and derives what the views display: connectivity, per-metric statistics,
//! and downsampled chart series. Polling is driven by [`PollingScheduler`].

mod aggregate;
mod connectivity;
mod downsample;
mod fetcher;
mod normalize;
mod reading;
mod scheduler;

pub use aggregate::{aggregate, series, summarize, trend_delta, Aggregate, AggregateSnapshot};
pub use connectivity::{classify, last_updated_ago, ConnectivityStatus, STALENESS_THRESHOLD_MINUTES};
pub use downsample::downsample;
pub use fetcher::{parse_readings, ReadingFetcher, ReadingSource, DEFAULT_LIMIT};
pub use normalize::{is_normalized, normalize};
pub use reading::{parse_timestamp, Metric, SensorReading};
pub use scheduler::{poll_once, PollState, PollingScheduler, SchedulerConfig, LIVE_INTERVAL};
