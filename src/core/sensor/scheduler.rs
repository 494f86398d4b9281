//! Periodic polling of a [`ReadingSource`].
//!
//! The scheduler knows nothing about screens or terminals. Whoever owns it
//! calls [`PollingScheduler::start`] when the view becomes visible and
//! [`PollingScheduler::stop`] when it goes away. Consumers read results from
//! a `watch` channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::aggregate::{summarize, AggregateSnapshot};
use super::connectivity::ConnectivityStatus;
use super::fetcher::{ReadingSource, DEFAULT_LIMIT};
use super::normalize::normalize;
use super::reading::SensorReading;
use crate::error::{PulseError, Result};

/// Refresh interval of the live view
pub const LIVE_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub interval: Duration,
    pub limit: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: LIVE_INTERVAL,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Result of the most recent completed poll cycle
#[derive(Debug, Clone, Default)]
pub struct PollState {
    pub status: ConnectivityStatus,
    pub snapshot: AggregateSnapshot,
    /// Full normalized window the snapshot was computed from
    pub readings: Arc<Vec<SensorReading>>,
    /// Message of the failure that produced this state, if any
    pub error: Option<String>,
    /// Number of cycles applied so far
    pub cycle: u64,
}

impl PollState {
    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.first()
    }
}

/// Counters exposed for logging and tests
#[derive(Debug, Default)]
struct Counters {
    started: AtomicU64,
    completed: AtomicU64,
    skipped: AtomicU64,
}

#[derive(Debug, Default)]
struct Shared {
    /// Generation of the cycle in flight, 0 when none is
    in_flight: AtomicU64,
    active: AtomicBool,
    /// Bumped on every start/stop; results from an older generation are dropped
    generation: AtomicU64,
    applied: AtomicU64,
    counters: Counters,
}

impl Shared {
    /// Claim the in-flight slot for `generation`.
    ///
    /// A cycle left over from an older generation does not block a newer one.
    fn try_acquire(self: &Arc<Self>, generation: u64) -> Option<CycleGuard> {
        let mut current = self.in_flight.load(Ordering::SeqCst);
        loop {
            if current >= generation {
                return None;
            }
            match self.in_flight.compare_exchange(
                current,
                generation,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    return Some(CycleGuard {
                        shared: Arc::clone(self),
                        generation,
                    })
                }
                Err(actual) => current = actual,
            }
        }
    }
}

/// Holds the in-flight slot until dropped
struct CycleGuard {
    shared: Arc<Shared>,
    generation: u64,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        // a newer generation may already own the slot
        let _ = self.shared.in_flight.compare_exchange(
            self.generation,
            0,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }
}

/// Fetch once and derive the presentation state.
///
/// Failures are folded into a `NoSignal` state carrying the error message.
pub async fn poll_once<S: ReadingSource>(source: &S, limit: u32) -> PollState {
    match source.fetch_latest(limit).await {
        Ok(readings) => {
            let readings = normalize(readings);
            let snapshot = summarize(&readings, Utc::now());
            PollState {
                status: snapshot.connectivity,
                snapshot,
                readings: Arc::new(readings),
                error: None,
                cycle: 0,
            }
        }
        Err(e) => {
            log::warn!("Poll failed: {}", e);
            PollState {
                status: ConnectivityStatus::NoSignal,
                snapshot: AggregateSnapshot {
                    connectivity: ConnectivityStatus::NoSignal,
                    ..Default::default()
                },
                readings: Arc::new(Vec::new()),
                error: Some(e.to_string()),
                cycle: 0,
            }
        }
    }
}

/// Idle/Active poller with a drop-if-busy guard
pub struct PollingScheduler<S: ReadingSource> {
    source: Arc<S>,
    config: SchedulerConfig,
    shared: Arc<Shared>,
    state_tx: watch::Sender<PollState>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<S: ReadingSource> PollingScheduler<S> {
    /// Fails when the interval or the limit is zero
    pub fn new(source: S, config: SchedulerConfig) -> Result<Self> {
        if config.interval.is_zero() {
            return Err(PulseError::invalid_argument(
                "polling interval must be greater than zero",
            ));
        }
        if config.limit == 0 {
            return Err(PulseError::invalid_argument(
                "limit must be a positive integer",
            ));
        }

        let (state_tx, _) = watch::channel(PollState::default());
        Ok(Self {
            source: Arc::new(source),
            config,
            shared: Arc::new(Shared {
                // generation 0 is the "nothing in flight" marker
                generation: AtomicU64::new(1),
                ..Default::default()
            }),
            state_tx,
            timer: Mutex::new(None),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state_tx.subscribe()
    }

    /// Latest published state
    pub fn state(&self) -> PollState {
        self.state_tx.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }

    /// Number of fetches issued
    pub fn fetches_started(&self) -> u64 {
        self.shared.counters.started.load(Ordering::SeqCst)
    }

    /// Number of fetches that finished, whether or not their result was applied
    pub fn fetches_completed(&self) -> u64 {
        self.shared.counters.completed.load(Ordering::SeqCst)
    }

    /// Ticks dropped because a cycle was still in flight
    pub fn ticks_skipped(&self) -> u64 {
        self.shared.counters.skipped.load(Ordering::SeqCst)
    }

    /// Go Active: fetch immediately, then on every interval tick.
    ///
    /// Must be called from within a tokio runtime. Calling it while already
    /// active does nothing. A cycle still running from before the last
    /// `stop` does not delay the first fetch.
    pub fn start(&self) {
        let mut timer = self.timer.lock();
        if timer.is_some() {
            return;
        }

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.active.store(true, Ordering::SeqCst);
        log::debug!(
            "Polling started (every {:?}, limit {})",
            self.config.interval,
            self.config.limit
        );

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.shared);
        let state_tx = self.state_tx.clone();
        let config = self.config.clone();

        *timer = Some(tokio::spawn(async move {
            let mut ticker = interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                // first tick completes immediately
                ticker.tick().await;
                Self::tick(&source, &shared, &state_tx, config.limit, generation);
            }
        }));
    }

    /// Go Idle. A cycle already in flight finishes but its result is discarded.
    pub fn stop(&self) {
        let handle = self.timer.lock().take();
        if let Some(handle) = handle {
            self.shared.active.store(false, Ordering::SeqCst);
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            handle.abort();
            log::debug!("Polling stopped");
        }
    }

    /// Run one cycle now, outside the timer.
    ///
    /// Returns `None` without fetching when another cycle is in flight.
    /// Dropping the returned future before it completes frees the slot.
    pub async fn refresh(&self) -> Option<PollState> {
        let generation = self.shared.generation.load(Ordering::SeqCst);
        let guard = self.shared.try_acquire(generation)?;
        Self::run_cycle(
            Arc::clone(&self.source),
            self.state_tx.clone(),
            self.config.limit,
            guard,
        )
        .await;
        Some(self.state())
    }

    fn tick(
        source: &Arc<S>,
        shared: &Arc<Shared>,
        state_tx: &watch::Sender<PollState>,
        limit: u32,
        generation: u64,
    ) {
        let Some(guard) = shared.try_acquire(generation) else {
            shared.counters.skipped.fetch_add(1, Ordering::SeqCst);
            log::debug!("Previous poll still in flight, skipping tick");
            return;
        };

        tokio::spawn(Self::run_cycle(
            Arc::clone(source),
            state_tx.clone(),
            limit,
            guard,
        ));
    }

    async fn run_cycle(
        source: Arc<S>,
        state_tx: watch::Sender<PollState>,
        limit: u32,
        guard: CycleGuard,
    ) {
        let shared = &guard.shared;
        shared.counters.started.fetch_add(1, Ordering::SeqCst);
        let mut state = poll_once(source.as_ref(), limit).await;
        shared.counters.completed.fetch_add(1, Ordering::SeqCst);

        if shared.generation.load(Ordering::SeqCst) == guard.generation {
            state.cycle = shared.applied.fetch_add(1, Ordering::SeqCst) + 1;
            log::debug!(
                "Poll cycle {}: {} readings, {}",
                state.cycle,
                state.readings.len(),
                state.status.label()
            );
            state_tx.send_replace(state);
        } else {
            log::debug!("Discarding poll result from a stopped scheduler");
        }
    }
}

impl<S: ReadingSource> Drop for PollingScheduler<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
