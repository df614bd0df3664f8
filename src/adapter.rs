//! Boundary contracts for the collaborators that surround the simulator.

use crate::signal::{LatLng, SignalView};
use log::debug;

/// The anchor used when no location provider responds.
pub const FALLBACK_ANCHOR: LatLng = LatLng::new(28.7041, 77.1025);

/// Consumes signal snapshots and maintains the corresponding visual markers.
///
/// The simulator pushes a fresh snapshot on every registry change and every
/// tick, and never depends on what the adapter does with it.
pub trait RenderAdapter {
    /// Receives the latest snapshot of all signals.
    fn render(&mut self, signals: &[SignalView]);

    /// Removes all visual elements. Called when the registry is cleared.
    fn clear(&mut self);
}

/// Supplies the anchor location used to seed demo signals.
pub trait LocationProvider {
    /// The current anchor, if one is available.
    fn anchor(&self) -> Option<LatLng>;
}

/// Resolves the seeding anchor, falling back to [`FALLBACK_ANCHOR`]
/// when the provider has nothing.
pub fn resolve_anchor(provider: &dyn LocationProvider) -> LatLng {
    match provider.anchor() {
        Some(anchor) => anchor,
        None => {
            debug!(
                "no anchor available, using fallback ({}, {})",
                FALLBACK_ANCHOR.lat, FALLBACK_ANCHOR.lng
            );
            FALLBACK_ANCHOR
        }
    }
}
