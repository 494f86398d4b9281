// Integration tests for the polling scheduler (virtual clock)

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pulse_vital::core::sensor::{
    ConnectivityStatus, PollingScheduler, ReadingSource, SchedulerConfig, SensorReading,
};
use pulse_vital::{PulseError, Result};

use super::common::reading;

/// Source that takes `delay` per fetch and counts calls
struct SlowSource {
    delay: Duration,
    fail: bool,
    calls: Arc<AtomicU64>,
    completed: Arc<AtomicU64>,
}

impl SlowSource {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail: false,
            calls: Arc::new(AtomicU64::new(0)),
            completed: Arc::new(AtomicU64::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Duration::ZERO)
        }
    }
}

impl ReadingSource for SlowSource {
    fn fetch_latest(&self, _limit: u32) -> impl Future<Output = Result<Vec<SensorReading>>> + Send {
        let delay = self.delay;
        let fail = self.fail;
        let calls = Arc::clone(&self.calls);
        let completed = Arc::clone(&self.completed);

        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            completed.fetch_add(1, Ordering::SeqCst);
            if fail {
                return Err(PulseError::server(503));
            }
            Ok(vec![reading(
                &n.to_string(),
                &Utc::now().to_rfc3339(),
                Some(80.0),
            )])
        }
    }
}

fn every(secs: u64) -> SchedulerConfig {
    SchedulerConfig {
        interval: Duration::from_secs(secs),
        limit: 20,
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_drops_overlapping_ticks() {
    let source = SlowSource::new(Duration::from_secs(7));
    let calls = Arc::clone(&source.calls);
    let completed = Arc::clone(&source.completed);
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();

    scheduler.start();
    // ticks at 0,3,6,9,12,15; fetches run 0..7 and 9..16
    tokio::time::sleep(Duration::from_secs(17)).await;
    scheduler.stop();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(calls.load(Ordering::SeqCst), completed.load(Ordering::SeqCst));
    assert_eq!(scheduler.ticks_skipped(), 4);
    assert_eq!(scheduler.state().cycle, 2);
}

#[tokio::test(start_paused = true)]
async fn test_fast_fetch_runs_every_tick() {
    let source = SlowSource::new(Duration::ZERO);
    let calls = Arc::clone(&source.calls);
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(10)).await;
    scheduler.stop();

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(scheduler.ticks_skipped(), 0);

    let state = scheduler.state();
    assert_eq!(state.cycle, 4);
    assert_eq!(state.status, ConnectivityStatus::Connected);
    assert_eq!(state.latest().unwrap().id, "4");
}

#[tokio::test(start_paused = true)]
async fn test_result_after_stop_is_discarded() {
    let source = SlowSource::new(Duration::from_secs(5));
    let completed = Arc::clone(&source.completed);
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();
    let updates = scheduler.subscribe();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(1)).await;
    scheduler.stop();
    assert!(!scheduler.is_active());

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert!(!updates.has_changed().unwrap());
    let state = scheduler.state();
    assert_eq!(state.status, ConnectivityStatus::Loading);
    assert_eq!(state.cycle, 0);
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop() {
    let source = SlowSource::new(Duration::ZERO);
    let calls = Arc::clone(&source.calls);
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(1)).await;
    scheduler.stop();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    scheduler.start();
    assert!(scheduler.is_active());
    tokio::time::sleep(Duration::from_secs(1)).await;
    scheduler.stop();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(scheduler.state().cycle, 2);
}

#[tokio::test(start_paused = true)]
async fn test_failure_degrades_without_retry() {
    let source = SlowSource::failing();
    let calls = Arc::clone(&source.calls);
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(7)).await;
    scheduler.stop();

    // one fetch per tick (0, 3, 6), nothing in between
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    let state = scheduler.state();
    assert_eq!(state.status, ConnectivityStatus::NoSignal);
    assert!(state.error.unwrap().contains("503"));
    assert!(state.readings.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_manual_refresh_skipped_while_in_flight() {
    let source = SlowSource::new(Duration::from_secs(5));
    let calls = Arc::clone(&source.calls);
    let scheduler = PollingScheduler::new(source, every(60)).unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(scheduler.refresh().await.is_none());

    tokio::time::sleep(Duration::from_secs(5)).await;
    scheduler.stop();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_refresh_does_not_block_polling() {
    let source = SlowSource::new(Duration::from_secs(5));
    let calls = Arc::clone(&source.calls);
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();

    let cancelled = tokio::time::timeout(Duration::from_secs(1), scheduler.refresh()).await;
    assert!(cancelled.is_err());

    // same generation: a second manual refresh must get the slot
    assert!(scheduler.refresh().await.is_some());
    assert_eq!(scheduler.state().cycle, 1);

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(30)).await;
    scheduler.stop();

    assert!(calls.load(Ordering::SeqCst) >= 4);
    let state = scheduler.state();
    assert!(state.cycle >= 2);
    assert_eq!(state.status, ConnectivityStatus::Connected);
}

#[tokio::test(start_paused = true)]
async fn test_restart_fetches_immediately_despite_stale_cycle() {
    let source = SlowSource::new(Duration::from_secs(5));
    let calls = Arc::clone(&source.calls);
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(1)).await;
    scheduler.stop();
    scheduler.start();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // old cycle (0..5) still running, new session fetched at t=1
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // t=6.1: old result discarded, new one applied, tick at t=4 skipped
    tokio::time::sleep(Duration::from_secs(5)).await;
    let state = scheduler.state();
    assert_eq!(state.cycle, 1);
    assert_eq!(state.latest().unwrap().id, "2");
    assert_eq!(scheduler.ticks_skipped(), 1);
    scheduler.stop();
}

/// Panics on its first fetch, then returns one reading per call
struct PanicOnceSource {
    calls: Arc<AtomicU64>,
}

impl ReadingSource for PanicOnceSource {
    fn fetch_latest(&self, _limit: u32) -> impl Future<Output = Result<Vec<SensorReading>>> + Send {
        let calls = Arc::clone(&self.calls);
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 1 {
                panic!("sensor source blew up");
            }
            Ok(vec![reading(&n.to_string(), &Utc::now().to_rfc3339(), Some(72.0))])
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_panicking_cycle_releases_slot() {
    let calls = Arc::new(AtomicU64::new(0));
    let source = PanicOnceSource {
        calls: Arc::clone(&calls),
    };
    let scheduler = PollingScheduler::new(source, every(3)).unwrap();

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(7)).await;
    scheduler.stop();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(scheduler.ticks_skipped(), 0);
    assert_eq!(scheduler.state().cycle, 2);
}
