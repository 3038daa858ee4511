//! Shared test infrastructure for rgb-wave integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use palette::Srgb;
use rgb_wave::{LedStrip, RandomSource};

// ============================================================================
// Scripted Entropy Source
// ============================================================================

/// Entropy source that replays a fixed script, clamped to the requested bound
pub struct ScriptedRandom {
    values: Vec<u16>,
    pos: usize,
}

impl ScriptedRandom {
    pub fn new(values: &[u16]) -> Self {
        Self {
            values: values.to_vec(),
            pos: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_bounded(&mut self, max: u16) -> u16 {
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value.min(max)
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// Mock strip that records the last color per LED and counts writes
pub struct MockStrip {
    pub colors: Vec<Srgb>,
    pub writes: usize,
}

impl MockStrip {
    pub fn new(count: usize) -> Self {
        Self {
            colors: vec![Srgb::new(0.0, 0.0, 0.0); count],
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

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
