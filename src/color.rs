//! Dual-representation RGB/HSL color value.
//!
//! Provides [`Color`], which holds a color in both 8-bit RGB and HSL form and
//! keeps the two in sync: every RGB mutation refreshes the HSL components, and
//! [`Color::set_hsl`] derives RGB from the supplied HSL values. HSL is the
//! natural space for hue-based LED animations; RGB is what the hardware eats.

use libm::{fabsf, roundf};
use palette::Srgb;

/// A color held in both RGB and HSL form.
///
/// RGB channels are 8-bit. Hue is in degrees `[0, 359]`; saturation and
/// lightness are percentages `[0, 100]` with one-tenth precision.
///
/// Whichever representation a mutator supplies is authoritative for that call
/// and the other representation is derived from it. Because each direction
/// rounds independently through the 8-bit channels, setting a color from HSL
/// and reading the refreshed HSL back may differ from the input by up to one
/// hue degree or one tenth of a percent. That divergence is inherent to the
/// quantization, not drift, and it never exceeds 1/255 per RGB channel.
///
/// Equality compares the RGB triple only; the cached HSL components are
/// excluded.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    hue: u16,
    saturation: f32,
    lightness: f32,
}

impl Color {
    /// Creates a black color (all channels zero, hue 0).
    pub const fn new() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 0,
            hue: 0,
            saturation: 0.0,
            lightness: 0.0,
        }
    }

    /// Creates a color from an RGB triple, deriving the HSL components.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let mut color = Self::new();
        color.set_rgb(red, green, blue);
        color
    }

    /// Creates a color from HSL components, deriving the RGB triple.
    ///
    /// See [`set_hsl`](Self::set_hsl) for the accepted ranges.
    pub fn from_hsl(hue: u16, saturation: f32, lightness: f32) -> Self {
        let mut color = Self::new();
        color.set_hsl(hue, saturation, lightness);
        color
    }

    /// Red channel.
    pub fn red(&self) -> u8 {
        self.red
    }

    /// Green channel.
    pub fn green(&self) -> u8 {
        self.green
    }

    /// Blue channel.
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// Hue in degrees `[0, 359]`.
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Saturation as a percentage `[0, 100]`, one-tenth precision.
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Lightness as a percentage `[0, 100]`, one-tenth precision.
    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    /// Sets the RGB triple and refreshes the HSL components from it.
    pub fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.red = red;
        self.green = green;
        self.blue = blue;
        self.refresh_hsl();
    }

    /// Copies `other`'s RGB triple into this color and refreshes HSL.
    pub fn copy_from(&mut self, other: &Color) {
        self.set_rgb(other.red, other.green, other.blue);
    }

    /// Sets the color from HSL components and derives the RGB triple.
    ///
    /// Hue is accepted as any value and wrapped modulo 360 if it is 360 or
    /// larger. Saturation and lightness are percentages in `[0, 100]` by
    /// caller contract; out-of-range values are not validated and produce
    /// whatever the conversion formula yields. The supplied components are
    /// stored verbatim as the HSL fields.
    pub fn set_hsl(&mut self, hue: u16, saturation: f32, lightness: f32) {
        let hue = if hue >= 360 { hue % 360 } else { hue };

        self.hue = hue;
        self.saturation = saturation;
        self.lightness = lightness;

        let s = saturation / 100.0;
        let l = lightness / 100.0;

        let c = (1.0 - fabsf(2.0 * l - 1.0)) * s;
        let x = c * (1.0 - fabsf((hue as f32 / 60.0) % 2.0 - 1.0));
        let m = l - c / 2.0;

        let (r, g, b) = match hue / 60 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        self.red = roundf((r + m) * 255.0) as u8;
        self.green = roundf((g + m) * 255.0) as u8;
        self.blue = roundf((b + m) * 255.0) as u8;
    }

    /// Recomputes hue, saturation and lightness from the current RGB triple.
    fn refresh_hsl(&mut self) {
        let r = self.red as f32 / 255.0;
        let g = self.green as f32 / 255.0;
        let b = self.blue as f32 / 255.0;

        let cmin = r.min(g).min(b);
        let cmax = r.max(g).max(b);
        let delta = cmax - cmin;

        let h = if delta == 0.0 {
            0.0
        } else if cmax == r {
            ((g - b) / delta) % 6.0
        } else if cmax == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let mut h = roundf(h * 60.0) as i32;
        if h < 0 {
            h += 360;
        }

        let l = (cmax + cmin) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - fabsf(2.0 * l - 1.0))
        };

        self.hue = h as u16;
        self.saturation = roundf(s * 1000.0) / 10.0;
        self.lightness = roundf(l * 1000.0) / 10.0;
    }

    /// True if all three RGB channels are equal.
    pub fn is_monochrome(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }

    /// Moves this color toward `target` by at most `max_step` per channel,
    /// then refreshes HSL.
    ///
    /// Each RGB channel moves the full remaining distance if it is within
    /// `max_step`, otherwise exactly `max_step` in the right direction.
    pub fn step_toward(&mut self, target: &Color, max_step: u8) {
        if *self == *target {
            return;
        }

        self.set_rgb(
            step_channel(self.red, target.red, max_step),
            step_channel(self.green, target.green, max_step),
            step_channel(self.blue, target.blue, max_step),
        );
    }

    /// Returns the color halfway between `a` and `b`, channel by channel.
    pub fn midpoint(a: &Color, b: &Color) -> Color {
        Color::from_rgb(
            mid_channel(a.red, b.red),
            mid_channel(a.green, b.green),
            mid_channel(a.blue, b.blue),
        )
    }
}

fn step_channel(current: u8, target: u8, max_step: u8) -> u8 {
    let step = current.abs_diff(target).min(max_step);
    if target > current {
        current + step
    } else {
        current - step
    }
}

fn mid_channel(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16 + 1) / 2) as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.red == other.red && self.green == other.green && self.blue == other.blue
    }
}

impl Eq for Color {}

impl From<Srgb> for Color {
    fn from(srgb: Srgb) -> Self {
        let rgb: Srgb<u8> = srgb.into_format();
        Color::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

impl From<Color> for Srgb {
    fn from(color: Color) -> Self {
        Srgb::<u8>::new(color.red, color.green, color.blue).into_format()
    }
}
