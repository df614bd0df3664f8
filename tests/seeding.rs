//! Tests of the signal factory: demo layout and candidate adaptation.

use assert_approx_eq::assert_approx_eq;
use serde_json::json;
use signal_sim::{
    demo_signals, from_candidates, resolve_anchor, FactoryError, LatLng, LocationProvider, Phase,
    FALLBACK_ANCHOR,
};

struct FixedLocation(Option<LatLng>);

impl LocationProvider for FixedLocation {
    fn anchor(&self) -> Option<LatLng> {
        self.0
    }
}

/// A missing location falls back to the fixed anchor.
#[test]
fn anchor_falls_back_when_location_is_absent() {
    let here = LatLng::new(12.97, 77.59);
    assert_eq!(resolve_anchor(&FixedLocation(Some(here))), here);
    assert_eq!(resolve_anchor(&FixedLocation(None)), FALLBACK_ANCHOR);
}

/// Demo seeding is fully deterministic: the same anchor yields
/// identical seeds every time.
#[test]
fn demo_layout_is_deterministic() {
    let anchor = LatLng::new(28.7041, 77.1025);
    assert_eq!(demo_signals(anchor), demo_signals(anchor));
}

/// The demo layout at the fallback anchor has the documented stagger:
/// phases follow `[Red, Green, Yellow]` round-robin and countdowns come
/// from the fixed pseudo-offset formula.
#[test]
fn demo_layout_stagger() {
    let seeds = demo_signals(FALLBACK_ANCHOR);
    assert_eq!(seeds.len(), 4);

    let phases: Vec<Phase> = seeds.iter().map(|s| s.state.phase).collect();
    assert_eq!(phases, [Phase::Red, Phase::Green, Phase::Yellow, Phase::Red]);

    // min_time + ((index * 7 + 13) % (duration - min_time + 1))
    let countdowns: Vec<u32> = seeds.iter().map(|s| s.state.countdown).collect();
    assert_eq!(countdowns, [22, 26, 6, 43]);

    for seed in &seeds {
        assert!(seed.state.countdown > 0);
        assert!(seed.state.countdown <= seed.state.phase.duration());
        assert_eq!(seed.state.completed_cycles, 0);
    }
}

/// Demo positions are small per-index displacements of the anchor, and
/// every signal sits at a distinct position.
#[test]
fn demo_positions_surround_the_anchor() {
    let seeds = demo_signals(FALLBACK_ANCHOR);
    for (i, seed) in seeds.iter().enumerate() {
        assert_approx_eq!(seed.position.lat, FALLBACK_ANCHOR.lat, 0.01);
        assert_approx_eq!(seed.position.lng, FALLBACK_ANCHOR.lng, 0.01);
        for other in &seeds[i + 1..] {
            assert!(
                seed.position.lat != other.position.lat
                    || seed.position.lng != other.position.lng
            );
        }
    }
}

/// Each supported coordinate shape resolves: top-level fields, alternate
/// field names, numeric strings, nested `location`, `geometry.location`,
/// and `center`.
#[test]
fn candidates_resolve_all_coordinate_shapes() {
    let candidates = vec![
        json!({ "lat": 28.70, "lng": 77.10, "name": "Main St" }),
        json!({ "latitude": 28.71, "longitude": 77.11 }),
        json!({ "lat": "28.72", "lon": "77.12" }),
        json!({ "location": { "lat": 28.73, "lng": 77.13 } }),
        json!({ "geometry": { "location": { "lat": 28.74, "lng": 77.14 } }, "name": "Market" }),
        json!({ "center": { "lat": 28.75, "lon": 77.15 }, "tags": { "name": "Crossing" } }),
    ];
    let seeds = from_candidates(&candidates).unwrap();
    assert_eq!(seeds.len(), 6);

    assert_approx_eq!(seeds[0].position.lat, 28.70);
    assert_approx_eq!(seeds[2].position.lng, 77.12);
    assert_approx_eq!(seeds[4].position.lat, 28.74);
    assert_approx_eq!(seeds[5].position.lng, 77.15);

    assert_eq!(seeds[0].label, "Main St");
    assert_eq!(seeds[1].label, "Signal 2");
    assert_eq!(seeds[4].label, "Market");
    assert_eq!(seeds[5].label, "Crossing");
}

/// Candidates without a usable coordinate are dropped; the survivors are
/// staggered by their surviving index, not their input index.
#[test]
fn unresolvable_candidates_are_dropped() {
    let candidates = vec![
        json!({ "name": "no coordinates here" }),
        json!({ "lat": "not a number", "lng": 77.10 }),
        json!({ "lat": 28.70, "lng": 77.10 }),
        json!({ "lat": 28.71, "lng": 77.11 }),
    ];
    let seeds = from_candidates(&candidates).unwrap();
    assert_eq!(seeds.len(), 2);
    assert_eq!(seeds[0].state.phase, Phase::Red);
    assert_eq!(seeds[1].state.phase, Phase::Green);
}

/// An all-bad batch reports "no signals produced" instead of silently
/// installing an empty set.
#[test]
fn all_bad_candidates_is_an_error() {
    let candidates = vec![json!({ "name": "nothing" }), json!({})];
    assert_eq!(from_candidates(&candidates), Err(FactoryError::NoSignals));
    assert_eq!(from_candidates(&[]), Err(FactoryError::NoSignals));
}
