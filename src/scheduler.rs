use crate::registry::SignalRegistry;
use crate::signal::SignalSeed;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Nominal time between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drives a shared [`SignalRegistry`] at a fixed cadence.
///
/// The scheduler is `Idle` until a non-empty signal set is installed, and
/// returns to `Idle` when the registry empties, when it is stopped, or on
/// drop. Ticks are strictly serialized: one worker thread per scheduler,
/// and installing a new signal set joins the old worker before spawning a
/// new one, so two tick loops never overlap.
pub struct TickScheduler {
    /// The registry being driven.
    registry: Arc<Mutex<SignalRegistry>>,
    /// Time between ticks.
    interval: Duration,
    /// The running worker, if any.
    worker: Option<Worker>,
}

struct Worker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl TickScheduler {
    /// Creates an idle scheduler driving the given registry once per second.
    pub fn new(registry: Arc<Mutex<SignalRegistry>>) -> Self {
        Self::with_interval(registry, TICK_INTERVAL)
    }

    /// Creates an idle scheduler with a non-standard cadence.
    pub fn with_interval(registry: Arc<Mutex<SignalRegistry>>, interval: Duration) -> Self {
        Self {
            registry,
            interval,
            worker: None,
        }
    }

    /// Gets a handle to the registry this scheduler drives.
    pub fn registry(&self) -> Arc<Mutex<SignalRegistry>> {
        Arc::clone(&self.registry)
    }

    /// Replaces the registry's signal set and restarts the cadence.
    ///
    /// The previous cadence is fully stopped first, so signals from the old
    /// set never mutate again once this returns.
    pub fn install(&mut self, seeds: Vec<SignalSeed>) {
        self.stop_worker();
        lock(&self.registry).replace_all(seeds);
        self.start();
    }

    /// Starts ticking. Stays idle if the registry is empty.
    pub fn start(&mut self) {
        self.stop_worker();
        if lock(&self.registry).is_empty() {
            debug!("scheduler staying idle: registry is empty");
            return;
        }
        let stop = Arc::new(AtomicBool::new(false));
        let registry = Arc::clone(&self.registry);
        let interval = self.interval;
        let worker_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || run(&registry, interval, &worker_stop));
        self.worker = Some(Worker { stop, handle });
        debug!("scheduler running at {:?} cadence", self.interval);
    }

    /// Stops the cadence. No tick fires after this returns.
    pub fn stop(&mut self) {
        self.stop_worker();
    }

    /// Stops the cadence and clears the registry.
    pub fn shutdown(&mut self) {
        self.stop_worker();
        lock(&self.registry).clear();
    }

    /// Whether a tick loop is currently live.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .map_or(false, |worker| !worker.handle.is_finished())
    }

    fn stop_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Relaxed);
            worker.handle.thread().unpark();
            let _ = worker.handle.join();
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

/// The tick loop. Exits when stopped or when the registry empties.
fn run(registry: &Mutex<SignalRegistry>, interval: Duration, stop: &AtomicBool) {
    let mut deadline = Instant::now() + interval;
    loop {
        while !stop.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::park_timeout(deadline - now);
        }
        if stop.load(Ordering::Relaxed) {
            break;
        }
        {
            let mut registry = lock(registry);
            if registry.is_empty() {
                debug!("registry emptied, tick loop exiting");
                break;
            }
            registry.tick();
        }
        // A slow tick pushes the next deadline forward; missed ticks are
        // coalesced rather than run back-to-back.
        deadline += interval;
        let now = Instant::now();
        if deadline < now {
            deadline = now + interval;
        }
    }
}

/// Locks the registry, recovering from a poisoned mutex. A panicking
/// render adapter must not take the whole simulation down with it.
fn lock(registry: &Mutex<SignalRegistry>) -> std::sync::MutexGuard<'_, SignalRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
