//! Seeds the initial signal set, either from a fixed demo layout around an
//! anchor or by adapting loosely-typed discovery candidates.

use crate::phase::{Phase, PhaseState};
use crate::signal::{LatLng, SignalSeed};
use log::debug;
use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

/// Number of signals in the demo layout.
pub const DEMO_SIGNAL_COUNT: usize = 4;

/// Initial phases are assigned round-robin from this sequence so that a
/// seeded set never starts with every signal in the same phase.
const STAGGER: [Phase; 3] = [Phase::Red, Phase::Green, Phase::Yellow];

/// Per-index displacement of each demo signal from the anchor, in degrees.
static DEMO_OFFSETS: Lazy<[cgmath::Vector2<f64>; DEMO_SIGNAL_COUNT]> = Lazy::new(|| {
    [
        cgmath::Vector2::new(0.0012, 0.0008),
        cgmath::Vector2::new(-0.0011, 0.0009),
        cgmath::Vector2::new(0.0010, -0.0012),
        cgmath::Vector2::new(-0.0009, -0.0010),
    ]
});

/// An error produced while adapting discovery candidates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryError {
    /// No candidate had a usable coordinate. Retryable by the caller.
    #[error("no signals could be produced from the discovery candidates")]
    NoSignals,
}

/// Produces the fixed demo layout: [`DEMO_SIGNAL_COUNT`] signals at small
/// deterministic offsets from the anchor. Calling this twice with the same
/// anchor yields identical seeds.
pub fn demo_signals(anchor: LatLng) -> Vec<SignalSeed> {
    DEMO_OFFSETS
        .iter()
        .enumerate()
        .map(|(index, offset)| SignalSeed {
            position: anchor.offset(*offset),
            label: format!("Signal {}", index + 1),
            state: staggered_state(index),
        })
        .collect()
}

/// Adapts externally discovered candidates into signal seeds.
///
/// Each candidate is a loosely-typed JSON record; its best-available
/// coordinate fields are resolved by [`resolve_position`] and candidates
/// without one are dropped. Phases and countdowns are staggered by the
/// surviving index, exactly as in the demo layout.
pub fn from_candidates(candidates: &[Value]) -> Result<Vec<SignalSeed>, FactoryError> {
    let mut seeds: Vec<SignalSeed> = Vec::new();
    for candidate in candidates {
        let Some(position) = resolve_position(candidate) else {
            debug!("dropping discovery candidate without a usable coordinate");
            continue;
        };
        let index = seeds.len();
        seeds.push(SignalSeed {
            position,
            label: candidate_label(candidate, index),
            state: staggered_state(index),
        });
    }
    if seeds.is_empty() {
        Err(FactoryError::NoSignals)
    } else {
        Ok(seeds)
    }
}

/// Computes the deterministic initial phase state for the signal at `index`.
///
/// The countdown is a pseudo-offset clamped into
/// `[max(5, duration / 5), duration]` so that no signal starts on the verge
/// of a transition and different signals start at different points in
/// their cycle.
pub fn staggered_state(index: usize) -> PhaseState {
    let phase = STAGGER[index % STAGGER.len()];
    let duration = phase.duration();
    let min_time = (duration / 5).max(5);
    let seed = (index as u32 * 7 + 13) % (duration - min_time + 1);
    PhaseState {
        phase,
        countdown: min_time + seed,
        completed_cycles: 0,
    }
}

/// Resolves a candidate's coordinates from its best-available fields:
/// top-level `lat`/`lng`, a nested `location`, a `geometry.location`
/// (place-API shape), or a `center`.
fn resolve_position(candidate: &Value) -> Option<LatLng> {
    point_from(candidate)
        .or_else(|| candidate.get("location").and_then(point_from))
        .or_else(|| {
            candidate
                .get("geometry")
                .and_then(|geometry| geometry.get("location"))
                .and_then(point_from)
        })
        .or_else(|| candidate.get("center").and_then(point_from))
}

fn point_from(value: &Value) -> Option<LatLng> {
    let lat = number_field(value, &["lat", "latitude"])?;
    let lng = number_field(value, &["lng", "lon", "longitude"])?;
    Some(LatLng::new(lat, lng))
}

/// Reads the first of the named fields as a number, accepting either a
/// JSON number or a numeric string.
fn number_field(value: &Value, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| value.get(name))
        .and_then(|field| {
            field
                .as_f64()
                .or_else(|| field.as_str().and_then(|s| s.parse().ok()))
        })
}

fn candidate_label(candidate: &Value, index: usize) -> String {
    candidate
        .get("name")
        .or_else(|| candidate.get("label"))
        .or_else(|| candidate.get("tags").and_then(|tags| tags.get("name")))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Signal {}", index + 1))
}
