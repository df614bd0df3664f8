pub use adapter::{resolve_anchor, LocationProvider, RenderAdapter, FALLBACK_ANCHOR};
pub use cgmath;
pub use factory::{demo_signals, from_candidates, staggered_state, FactoryError, DEMO_SIGNAL_COUNT};
pub use phase::{advance, Phase, PhaseState, WALK_PERIOD};
pub use registry::SignalRegistry;
pub use scheduler::{TickScheduler, TICK_INTERVAL};
pub use signal::{LatLng, Signal, SignalSeed, SignalView};
use slotmap::{new_key_type, SlotMap};

mod adapter;
mod factory;
mod phase;
mod registry;
mod scheduler;
mod signal;

new_key_type! {
    /// Unique ID of a [Signal].
    pub struct SignalId;
}

type SignalSet = SlotMap<SignalId, Signal>;
