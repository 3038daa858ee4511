//! Entropy abstraction for the animation's random choices.

/// Trait for supplying the random picks the wave animation makes.
///
/// The engine asks for a new primary light and a new base hue at the start of
/// each cycle. Implement this over whatever entropy your platform has (a
/// hardware RNG peripheral, a PRNG seeded at boot, an ADC noise read).
/// Distribution quality is the implementer's concern; the animation only
/// needs variety.
pub trait RandomSource {
    /// Returns a value in `0..=max`.
    fn next_bounded(&mut self, max: u16) -> u16;
}
