//! Core types for the wave animation.

use crate::color::Color;

/// State for a single LED: the color it shows now and the color it is
/// heading toward.
///
/// Both fields are plain state; [`Color`] itself guards the RGB/HSL
/// consistency invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Light {
    /// The color currently shown on the LED.
    pub current: Color,

    /// The color the light is transitioning toward.
    pub target: Color,
}

impl Light {
    /// Creates a light with current and target both black.
    pub const fn new() -> Self {
        Self {
            current: Color::new(),
            target: Color::new(),
        }
    }

    /// True once the light has reached its target color (RGB equality).
    pub fn at_target(&self) -> bool {
        self.current == self.target
    }

    /// Moves the current color toward the target by at most `max_step` per
    /// RGB channel.
    pub fn step_toward_target(&mut self, max_step: u8) {
        let target = self.target;
        self.current.step_toward(&target, max_step);
    }
}

/// Engine construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaveError {
    /// Fewer than two lights requested.
    TooFewLights,

    /// Requested light count exceeds the engine capacity.
    CapacityExceeded,
}

impl core::fmt::Display for WaveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WaveError::TooFewLights => {
                write!(f, "wave animation needs a primary and a secondary light")
            }
            WaveError::CapacityExceeded => {
                write!(f, "light count exceeds engine capacity")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WaveError {}
