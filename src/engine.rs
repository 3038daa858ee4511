//! Tick-driven wave animation engine.
//!
//! Provides [`WaveEngine`], which owns the per-LED light states and the phase
//! machine, advances the whole animation one step per [`tick`](WaveEngine::tick),
//! and pushes colors to the hardware through the [`LedStrip`] trait.

use heapless::Vec;
use palette::Srgb;

use crate::color::Color;
use crate::phase::{Phase, PhaseStateMachine};
use crate::random::RandomSource;
use crate::types::{Light, WaveError};

/// Trait for abstracting addressable LED hardware.
///
/// Implement this for your strip (SPI, PWM, bit-banged, etc.) to let the
/// engine drive it.
pub trait LedStrip {
    /// Sets the LED at `index` to the specified RGB color.
    ///
    /// Color components are in the range 0.0-1.0. Implementations should
    /// convert these to their hardware's native format (e.g., 8-bit RGB
    /// values, PWM duty cycles). Handle any hardware errors internally - this
    /// method cannot fail.
    fn set_color(&mut self, index: usize, color: Srgb);
}

/// Largest change a single RGB channel may make in one tick, unless
/// reconfigured with [`WaveEngine::set_max_step`].
pub const DEFAULT_MAX_STEP: u8 = 5;

/// Saturation of every color the wave picks, in percent.
const WAVE_SATURATION: f32 = 100.0;

/// Lightness of every color the wave picks, in percent.
const WAVE_LIGHTNESS: f32 = 50.0;

/// How far, in degrees, the wave swings the secondary hue away from the
/// primary hue.
const WAVE_HUE_SWING: u16 = 90;

/// Drives a set of LEDs through the cyclic wave animation.
///
/// Each cycle picks a random primary light and base hue, fades every light to
/// the base color, then oscillates the light across from the primary (the
/// secondary) 90 degrees up and back down the hue circle while the remaining
/// lights hold the color halfway between the two.
///
/// The engine is clocked entirely from outside: call
/// [`tick`](WaveEngine::tick) from your main loop at whatever cadence suits
/// the hardware. Nothing blocks and nothing is timed internally, so the tick
/// rate together with the per-tick step limit sets the animation speed.
///
/// # Type Parameters
/// * `R` - Entropy source implementation type
/// * `N` - Maximum number of lights the engine can hold
pub struct WaveEngine<R: RandomSource, const N: usize> {
    lights: Vec<Light, N>,
    machine: PhaseStateMachine,
    rng: R,
    max_step: u8,
}

impl<R: RandomSource, const N: usize> WaveEngine<R, N> {
    /// Creates an engine with `count` lights, all black, at the start of the
    /// animation cycle.
    ///
    /// # Errors
    /// * `TooFewLights` - `count` is less than two (the wave needs a primary
    ///   and a secondary)
    /// * `CapacityExceeded` - `count` is larger than the capacity `N`
    pub fn new(count: usize, rng: R) -> Result<Self, WaveError> {
        if count < 2 {
            return Err(WaveError::TooFewLights);
        }

        let mut lights = Vec::new();
        for _ in 0..count {
            lights
                .push(Light::new())
                .map_err(|_| WaveError::CapacityExceeded)?;
        }

        Ok(Self {
            lights,
            machine: PhaseStateMachine::new(),
            rng,
            max_step: DEFAULT_MAX_STEP,
        })
    }

    /// Advances the animation by one step and renders every light.
    ///
    /// This is the main-loop body: exactly one phase handler runs, the phase
    /// machine advances when its handler says so, and the current color of
    /// every light is pushed to `strip`.
    pub fn tick<S: LedStrip>(&mut self, strip: &mut S) {
        match self.machine.get_state() {
            Phase::SetNewPrimary => {
                self.set_new_primary();
                self.machine.transition();
            }
            Phase::TransitionToNewPrimary => {
                self.smooth_transition();
                if self.all_lights_at_target() {
                    self.machine.transition();
                }
            }
            Phase::WaveInit => {
                self.wave_init();
                self.machine.transition();
            }
            Phase::WaveUp => self.wave_up(),
            Phase::WaveDown => self.wave_down(),
        }

        self.render(strip);
    }

    /// Returns the current animation phase.
    pub fn get_state(&self) -> Phase {
        self.machine.get_state()
    }

    /// Index of the light currently driving the animation.
    pub fn primary_light_index(&self) -> u8 {
        self.machine.primary_light_index
    }

    /// Index of the light carrying the wave.
    pub fn secondary_light_index(&self) -> u8 {
        self.machine.secondary_light_index
    }

    /// Returns the light at `index`, if it exists.
    pub fn light(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    /// Returns all lights in strip order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Returns the number of lights the engine drives.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Returns the per-tick channel step limit.
    pub fn max_step(&self) -> u8 {
        self.max_step
    }

    /// Sets the per-tick channel step limit.
    ///
    /// Larger values make every transition faster; zero freezes all
    /// transitions (the animation will stall waiting for targets).
    pub fn set_max_step(&mut self, max_step: u8) {
        self.max_step = max_step;
    }

    /// Picks a new primary light, its diagonal secondary, and a new base hue,
    /// then targets every light at the base color.
    fn set_new_primary(&mut self) {
        let count = self.lights.len();
        let primary = self.rng.next_bounded(count as u16 - 1) as usize;
        let secondary = (primary + count / 2) % count;

        self.machine.primary_light_index = primary as u8;
        self.machine.secondary_light_index = secondary as u8;

        let hue = self.rng.next_bounded(360);

        #[cfg(feature = "defmt")]
        defmt::info!("new primary: light {} hue {}", primary, hue);

        for light in &mut self.lights {
            light.target.set_hsl(hue, WAVE_SATURATION, WAVE_LIGHTNESS);
        }
    }

    /// Steps every light toward its target, honoring the per-tick limit.
    fn smooth_transition(&mut self) {
        let max_step = self.max_step;
        for light in &mut self.lights {
            light.step_toward_target(max_step);
        }
    }

    /// Targets the secondary light 90 degrees up the hue circle from the
    /// primary's current hue.
    fn wave_init(&mut self) {
        let primary = self.machine.primary_light_index as usize;
        let secondary = self.machine.secondary_light_index as usize;

        let primary_hue = self.lights[primary].current.hue();
        let target_hue = (primary_hue + WAVE_HUE_SWING) % 360;
        self.lights[secondary]
            .target
            .set_hsl(target_hue, WAVE_SATURATION, WAVE_LIGHTNESS);

        #[cfg(feature = "defmt")]
        defmt::debug!("wave up: primary hue {} target hue {}", primary_hue, target_hue);
    }

    /// Runs the upward half of the wave; once the top is reached, retargets
    /// the secondary 90 degrees below the primary and advances the phase.
    fn wave_up(&mut self) {
        if self.all_lights_at_target() {
            let primary = self.machine.primary_light_index as usize;
            let secondary = self.machine.secondary_light_index as usize;

            let primary_hue = self.lights[primary].current.hue();
            let target_hue = (primary_hue + 360 - WAVE_HUE_SWING) % 360;
            self.lights[secondary]
                .target
                .set_hsl(target_hue, WAVE_SATURATION, WAVE_LIGHTNESS);
            self.machine.transition();

            #[cfg(feature = "defmt")]
            defmt::debug!("wave down: primary hue {} target hue {}", primary_hue, target_hue);
        }

        self.wave_transition();
    }

    /// Runs the downward half of the wave; once the bottom is reached the
    /// cycle is complete and the phase advances.
    fn wave_down(&mut self) {
        if self.all_lights_at_target() {
            self.machine.transition();

            #[cfg(feature = "defmt")]
            defmt::debug!("wave complete, picking a new primary");
            return;
        }

        self.wave_transition();
    }

    /// One wave step: the secondary moves toward its target while every
    /// bystander light holds the color halfway between primary and secondary.
    fn wave_transition(&mut self) {
        let primary = self.machine.primary_light_index as usize;
        let secondary = self.machine.secondary_light_index as usize;

        self.lights[secondary].step_toward_target(self.max_step);

        let halfway = Color::midpoint(
            &self.lights[primary].current,
            &self.lights[secondary].current,
        );
        for (index, light) in self.lights.iter_mut().enumerate() {
            if index == primary || index == secondary {
                continue;
            }
            light.current.copy_from(&halfway);
            light.target.copy_from(&halfway);
        }
    }

    fn all_lights_at_target(&self) -> bool {
        self.lights.iter().all(Light::at_target)
    }

    fn render<S: LedStrip>(&self, strip: &mut S) {
        for (index, light) in self.lights.iter().enumerate() {
            strip.set_color(index, light.current.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;

    /// Entropy source that replays a fixed script, clamped to the requested
    /// bound.
    struct ScriptedRandom {
        values: &'static [u16],
        pos: usize,
    }

    impl ScriptedRandom {
        fn new(values: &'static [u16]) -> Self {
            Self { values, pos: 0 }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_bounded(&mut self, max: u16) -> u16 {
            let value = self.values[self.pos % self.values.len()];
            self.pos += 1;
            value.min(max)
        }
    }

    /// Mock strip that records the last color of each LED and counts writes.
    struct MockStrip {
        colors: [Srgb; 8],
        writes: usize,
    }

    impl MockStrip {
        fn new() -> Self {
            Self {
                colors: [Srgb::new(0.0, 0.0, 0.0); 8],
                writes: 0,
            }
        }
    }

    impl LedStrip for MockStrip {
        fn set_color(&mut self, index: usize, color: Srgb) {
            self.colors[index] = color;
            self.writes += 1;
        }
    }

    fn colors_equal(a: Srgb, b: Srgb) -> bool {
        const EPSILON: f32 = 0.001;
        (a.red - b.red).abs() < EPSILON
            && (a.green - b.green).abs() < EPSILON
            && (a.blue - b.blue).abs() < EPSILON
    }

    #[test]
    fn new_rejects_fewer_than_two_lights() {
        let result = WaveEngine::<_, 4>::new(1, ScriptedRandom::new(&[0]));
        assert!(matches!(result, Err(WaveError::TooFewLights)));

        let result = WaveEngine::<_, 4>::new(0, ScriptedRandom::new(&[0]));
        assert!(matches!(result, Err(WaveError::TooFewLights)));
    }

    #[test]
    fn new_rejects_count_over_capacity() {
        let result = WaveEngine::<_, 2>::new(3, ScriptedRandom::new(&[0]));
        assert!(matches!(result, Err(WaveError::CapacityExceeded)));
    }

    #[test]
    fn first_tick_selects_primary_secondary_and_targets() {
        let mut strip = MockStrip::new();
        let mut engine =
            WaveEngine::<_, 4>::new(4, ScriptedRandom::new(&[2, 120])).unwrap();

        engine.tick(&mut strip);

        assert_eq!(engine.primary_light_index(), 2);
        // Secondary sits diagonally across: (2 + 4/2) % 4.
        assert_eq!(engine.secondary_light_index(), 0);
        assert_eq!(engine.get_state(), Phase::TransitionToNewPrimary);

        let green = Color::from_hsl(120, 100.0, 50.0);
        for index in 0..4 {
            let light = engine.light(index).unwrap();
            assert_eq!(light.target, green);
            // Currents have not moved yet; the fade starts on the next tick.
            assert_eq!(light.current, Color::new());
        }

        assert_eq!(strip.writes, 4);
        for index in 0..4 {
            assert!(colors_equal(strip.colors[index], Srgb::new(0.0, 0.0, 0.0)));
        }
    }

    #[test]
    fn fade_moves_at_most_max_step_per_channel_per_tick() {
        let mut strip = MockStrip::new();
        let mut engine =
            WaveEngine::<_, 4>::new(4, ScriptedRandom::new(&[2, 120])).unwrap();

        engine.tick(&mut strip);
        engine.tick(&mut strip);

        // Target is (0, 255, 0); one tick of fading moves green by the step
        // limit only.
        for index in 0..4 {
            let current = engine.light(index).unwrap().current;
            assert_eq!(
                (current.red(), current.green(), current.blue()),
                (0, DEFAULT_MAX_STEP, 0)
            );
        }
    }

    #[test]
    fn bystanders_hold_the_midpoint_during_wave() {
        let mut strip = MockStrip::new();
        let mut engine =
            WaveEngine::<_, 4>::new(4, ScriptedRandom::new(&[0, 0])).unwrap();

        // Run into the upward wave: primary 0, secondary 2, everything red.
        for _ in 0..200 {
            engine.tick(&mut strip);
            if engine.get_state() == Phase::WaveUp {
                break;
            }
        }
        assert_eq!(engine.get_state(), Phase::WaveUp);

        engine.tick(&mut strip);

        let primary = engine.light(0).unwrap().current;
        let secondary = engine.light(2).unwrap().current;
        let halfway = Color::midpoint(&primary, &secondary);
        assert_eq!(engine.light(1).unwrap().current, halfway);
        assert_eq!(engine.light(3).unwrap().current, halfway);
        // Bystanders are parked: current and target agree.
        assert!(engine.light(1).unwrap().at_target());
    }

    #[test]
    fn full_cycle_returns_to_set_new_primary() {
        let mut strip = MockStrip::new();
        let mut engine =
            WaveEngine::<_, 4>::new(4, ScriptedRandom::new(&[2, 120])).unwrap();

        engine.tick(&mut strip);
        assert_eq!(engine.get_state(), Phase::TransitionToNewPrimary);

        let mut seen_wave_down = false;
        let mut completed = false;
        for _ in 0..500 {
            engine.tick(&mut strip);
            if engine.get_state() == Phase::WaveDown {
                seen_wave_down = true;
            }
            if engine.get_state() == Phase::SetNewPrimary {
                completed = true;
                break;
            }
        }

        assert!(seen_wave_down);
        assert!(completed, "animation cycle did not close");
    }

    #[test]
    fn wave_swings_secondary_hue_ninety_degrees() {
        let mut strip = MockStrip::new();
        let mut engine =
            WaveEngine::<_, 4>::new(4, ScriptedRandom::new(&[0, 120])).unwrap();

        for _ in 0..200 {
            engine.tick(&mut strip);
            if engine.get_state() == Phase::WaveUp {
                break;
            }
        }

        // Base hue 120; the upward target is 210 degrees.
        let secondary = engine.secondary_light_index() as usize;
        assert_eq!(engine.light(secondary).unwrap().target.hue(), 210);

        for _ in 0..200 {
            engine.tick(&mut strip);
            if engine.get_state() == Phase::WaveDown {
                break;
            }
        }

        // On the way down the target swings to 120 - 90 = 30 degrees.
        assert_eq!(engine.light(secondary).unwrap().target.hue(), 30);
    }

    #[test]
    fn every_tick_renders_the_whole_strip() {
        let mut strip = MockStrip::new();
        let mut engine =
            WaveEngine::<_, 4>::new(4, ScriptedRandom::new(&[1, 240])).unwrap();

        for _ in 0..3 {
            engine.tick(&mut strip);
        }

        assert_eq!(strip.writes, 4 * 3);
        for index in 0..4 {
            let expected: Srgb = engine.light(index).unwrap().current.into();
            assert!(colors_equal(strip.colors[index], expected));
        }
    }

    #[test]
    fn two_light_wave_has_no_bystanders() {
        let mut strip = MockStrip::new();
        let mut engine =
            WaveEngine::<_, 2>::new(2, ScriptedRandom::new(&[0, 0])).unwrap();

        // Primary 0, secondary (0 + 1) % 2 = 1; the cycle must still close.
        engine.tick(&mut strip);
        assert_eq!(engine.secondary_light_index(), 1);

        let mut completed = false;
        for _ in 0..500 {
            engine.tick(&mut strip);
            if engine.get_state() == Phase::SetNewPrimary {
                completed = true;
                break;
            }
        }
        assert!(completed);
    }
}
