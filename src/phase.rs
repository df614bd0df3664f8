use serde::{Deserialize, Serialize};

/// The display state of a simulated traffic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Red,
    Yellow,
    Green,
    Walk,
}

/// The number of full red-green-yellow cycles between pedestrian walk phases.
pub const WALK_PERIOD: u32 = 2;

impl Phase {
    /// The fixed duration of this phase in seconds.
    pub const fn duration(self) -> u32 {
        match self {
            Phase::Red => 45,
            Phase::Green => 30,
            Phase::Yellow => 6,
            Phase::Walk => 20,
        }
    }
}

/// The portion of a signal's state that the phase clock advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseState {
    /// The current phase.
    pub phase: Phase,
    /// Seconds remaining in the current phase.
    pub countdown: u32,
    /// Full cycles completed since the last walk phase.
    pub completed_cycles: u32,
}

impl PhaseState {
    /// Creates a state at the very start of the given phase.
    pub const fn starting(phase: Phase) -> Self {
        Self {
            phase,
            countdown: phase.duration(),
            completed_cycles: 0,
        }
    }

    /// Whether pedestrians currently have right of way.
    pub const fn pedestrian_walk(self) -> bool {
        matches!(self.phase, Phase::Walk)
    }
}

/// Advances a signal's phase state by one second.
///
/// Pure and total: every phase has a defined successor and the countdown
/// never goes below zero. A transition fires on the tick that would bring
/// the countdown to zero, entering the next phase at its full duration.
/// The walk phase is inserted after every [`WALK_PERIOD`]th yellow phase.
pub fn advance(state: PhaseState) -> PhaseState {
    if state.countdown > 1 {
        return PhaseState {
            countdown: state.countdown - 1,
            ..state
        };
    }
    let (phase, completed_cycles) = match state.phase {
        Phase::Red => (Phase::Green, state.completed_cycles),
        Phase::Green => (Phase::Yellow, state.completed_cycles),
        Phase::Yellow => {
            let cycles = state.completed_cycles + 1;
            if cycles >= WALK_PERIOD {
                (Phase::Walk, 0)
            } else {
                (Phase::Red, cycles)
            }
        }
        Phase::Walk => (Phase::Red, state.completed_cycles),
    };
    PhaseState {
        phase,
        countdown: phase.duration(),
        completed_cycles,
    }
}
