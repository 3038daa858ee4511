#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Color`**: a color held in both 8-bit RGB and HSL form, kept in sync by its mutators
//! - **`Phase`** / **`PhaseStateMachine`**: the fixed five-phase animation cycle
//! - **`Light`**: the current and target color for one LED
//! - **`WaveEngine`**: advances the whole animation one tick at a time
//! - **`LedStrip`**: trait to implement for your LED hardware
//! - **`RandomSource`**: trait to implement for your platform's entropy
//!
//! The hardware seam speaks `Srgb<f32>` (0.0-1.0 range). When implementing
//! [`LedStrip`] for your hardware, convert these values to your device's
//! native format (e.g., 8-bit integers, PWM duty cycles).

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod color;
pub mod engine;
pub mod phase;
pub mod random;
pub mod types;

pub use color::Color;
pub use engine::{DEFAULT_MAX_STEP, LedStrip, WaveEngine};
pub use phase::{Phase, PhaseStateMachine};
pub use random::RandomSource;
pub use types::{Light, WaveError};

/// A fully off (black) color.
pub const COLOR_OFF: Color = Color::new();
