use crate::adapter::RenderAdapter;
use crate::signal::{Signal, SignalSeed, SignalView};
use crate::{SignalId, SignalSet};
use log::{debug, info};

/// Owns the authoritative set of simulated signals and mediates all reads
/// and writes of their state.
///
/// Signals are keyed by versioned [`SignalId`]s, so an ID is never reused
/// even after the set has been replaced. Snapshots are produced in
/// insertion order.
#[derive(Default)]
pub struct SignalRegistry {
    /// The signals, keyed by ID.
    signals: SignalSet,
    /// Insertion order of the current set, for stable snapshots.
    order: Vec<SignalId>,
    /// The render adapter subscribed to snapshot updates.
    listener: Option<Box<dyn RenderAdapter + Send>>,
}

impl SignalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Subscribes a render adapter, which immediately receives the current
    /// snapshot and then a fresh one on every change and tick.
    pub fn set_listener(&mut self, listener: Box<dyn RenderAdapter + Send>) {
        self.listener = Some(listener);
        self.publish();
    }

    /// Detaches the render adapter without touching its markers.
    pub fn take_listener(&mut self) -> Option<Box<dyn RenderAdapter + Send>> {
        self.listener.take()
    }

    /// Discards the previous signal set and installs a new one.
    ///
    /// IDs of discarded signals are never reissued. The listener receives
    /// the snapshot of the new set.
    pub fn replace_all(&mut self, seeds: Vec<SignalSeed>) {
        self.signals.clear();
        self.order.clear();
        for seed in seeds {
            let id = self.signals.insert_with_key(|id| Signal::new(id, seed));
            self.order.push(id);
        }
        info!("installed {} signals", self.order.len());
        self.publish();
    }

    /// Advances every signal by one second.
    ///
    /// Each signal's transition depends only on its own prior state. The
    /// whole set is updated before the listener sees anything, so a
    /// snapshot never reflects a partially ticked set. A tick on an empty
    /// registry is a no-op.
    pub fn tick(&mut self) {
        if self.order.is_empty() {
            return;
        }
        for id in &self.order {
            self.signals[*id].step();
        }
        self.publish();
    }

    /// Takes an immutable point-in-time copy of all signals,
    /// in insertion order.
    pub fn snapshot(&self) -> Vec<SignalView> {
        self.order.iter().map(|id| self.signals[*id].view()).collect()
    }

    /// Empties the registry and tells the listener to remove its markers.
    /// Idempotent.
    pub fn clear(&mut self) {
        if !self.order.is_empty() {
            debug!("clearing {} signals", self.order.len());
            self.signals.clear();
            self.order.clear();
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.clear();
        }
    }

    /// The number of signals currently held.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no signals.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns an iterator over all the signals, in insertion order.
    pub fn iter_signals(&self) -> impl Iterator<Item = &Signal> {
        self.order.iter().map(|id| &self.signals[*id])
    }

    /// Gets a reference to the signal with the given ID.
    pub fn get_signal(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(id)
    }

    /// Pushes the current snapshot to the listener, if one is attached.
    fn publish(&mut self) {
        if self.listener.is_some() {
            let snapshot = self.snapshot();
            if let Some(listener) = self.listener.as_mut() {
                listener.render(&snapshot);
            }
        }
    }
}
