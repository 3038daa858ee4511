//! The fixed five-phase animation cycle.

/// One discrete step of the wave animation cycle.
///
/// The cycle is closed and unconditional: every phase has exactly one
/// successor and the sequence repeats forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Choose a new primary light and base color.
    SetNewPrimary,
    /// All lights are fading toward the new primary color.
    TransitionToNewPrimary,
    /// Pick the target for the upward half of the wave.
    WaveInit,
    /// The secondary light is rising toward the wave target.
    WaveUp,
    /// The secondary light is falling back down.
    WaveDown,
}

impl Phase {
    /// The phase that follows this one in the fixed cycle.
    pub fn next(self) -> Phase {
        match self {
            Phase::SetNewPrimary => Phase::TransitionToNewPrimary,
            Phase::TransitionToNewPrimary => Phase::WaveInit,
            Phase::WaveInit => Phase::WaveUp,
            Phase::WaveUp => Phase::WaveDown,
            Phase::WaveDown => Phase::SetNewPrimary,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::SetNewPrimary
    }
}

/// Cyclic sequencer over [`Phase`], plus the two LED indices the animation
/// currently emphasizes.
///
/// The machine only ever advances the phase; the indices are plain
/// caller-owned state. They are stored but never validated against an actual
/// LED count, which the machine does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseStateMachine {
    phase: Phase,

    /// Index of the light currently driving the animation.
    pub primary_light_index: u8,

    /// Index of the light carrying the wave, generally across from the
    /// primary.
    pub secondary_light_index: u8,
}

impl PhaseStateMachine {
    /// Creates a machine at [`Phase::SetNewPrimary`] with both indices zero.
    pub fn new() -> Self {
        Self {
            phase: Phase::SetNewPrimary,
            primary_light_index: 0,
            secondary_light_index: 0,
        }
    }

    /// Returns the current phase. Pure read, no side effects.
    pub fn get_state(&self) -> Phase {
        self.phase
    }

    /// Advances the phase to the next value in the fixed cycle.
    ///
    /// Exactly one phase advance per call; the light indices are untouched.
    /// The enumeration is closed, so every phase has a successor and there is
    /// no dead state to guard against.
    pub fn transition(&mut self) {
        self.phase = self.phase.next();
    }
}
