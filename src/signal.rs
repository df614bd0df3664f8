use crate::phase::{self, Phase, PhaseState};
use crate::SignalId;
use cgmath::Vector2;
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new coordinate pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns this point displaced by the given `(lng, lat)` offset in degrees.
    pub fn offset(self, delta: Vector2<f64>) -> Self {
        Self {
            lat: self.lat + delta.y,
            lng: self.lng + delta.x,
        }
    }
}

/// The raw material for a signal, produced by the factory
/// before the registry has assigned an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSeed {
    /// Where the signal stands.
    pub position: LatLng,
    /// Display name.
    pub label: String,
    /// The phase state the signal starts in.
    pub state: PhaseState,
}

/// A simulated traffic signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    id: SignalId,
    position: LatLng,
    label: String,
    state: PhaseState,
}

impl Signal {
    pub(crate) fn new(id: SignalId, seed: SignalSeed) -> Self {
        Self {
            id,
            position: seed.position,
            label: seed.label,
            state: seed.state,
        }
    }

    /// Advances the signal's phase state by one second.
    pub(crate) fn step(&mut self) {
        self.state = phase::advance(self.state);
    }

    /// Gets the signal's unique ID.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Gets the signal's position.
    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Gets the signal's display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Gets the signal's current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Gets the seconds remaining in the current phase.
    pub fn countdown(&self) -> u32 {
        self.state.countdown
    }

    /// Whether pedestrians currently have right of way at this signal.
    pub fn pedestrian_walk(&self) -> bool {
        self.state.pedestrian_walk()
    }

    /// Gets the full cycles completed since the last walk phase.
    pub fn completed_cycles(&self) -> u32 {
        self.state.completed_cycles
    }

    /// Gets the signal's full phase state.
    pub fn state(&self) -> PhaseState {
        self.state
    }

    /// Takes a point-in-time copy of the signal for render adapters.
    pub fn view(&self) -> SignalView {
        SignalView {
            id: self.id,
            position: self.position,
            label: self.label.clone(),
            phase: self.state.phase,
            countdown: self.state.countdown,
            pedestrian_walk: self.state.pedestrian_walk(),
        }
    }
}

/// A point-in-time copy of a signal's state, handed to render adapters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalView {
    pub id: SignalId,
    pub position: LatLng,
    pub label: String,
    pub phase: Phase,
    pub countdown: u32,
    pub pedestrian_walk: bool,
}
