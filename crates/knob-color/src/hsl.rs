use crate::ColorError;
use crate::rgb::parse_rgb;
use palette::Srgb;
use std::fmt;

/// Lightness is reported on a 0..=10 scale: the percentage divided by ten.
pub const LIGHTNESS_DIVISOR: f64 = 10.0;
pub const MAX_LIGHTNESS: f64 = 100.0 / LIGHTNESS_DIVISOR;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    /// Degrees in `[0, 360)`, rounded to an integer.
    pub hue: f64,
    /// Percentage, one decimal.
    pub saturation: f64,
    /// `0..=10`, one decimal.
    pub lightness: f64,
}

impl HslColor {
    /// Works on the integer channels so that exact halves round up.
    pub fn from_rgb(rgb: Srgb<u8>) -> Self {
        let (r, g, b) = rgb.into_components();
        let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let sum = max + min;

        let hue = if delta == 0 {
            0
        } else {
            // sixty times the sector offset, over delta
            let numerator = if max == r {
                60 * (g - b)
            } else if max == g {
                60 * (b - r) + 120 * delta
            } else {
                60 * (r - g) + 240 * delta
            };
            round_ratio(numerator, delta).rem_euclid(360)
        };

        // delta / (1 - |2l - 1|) with l = sum / 510
        let saturation = if delta == 0 {
            0
        } else {
            round_ratio(1000 * delta, 255 - (sum - 255).abs())
        };

        Self {
            hue: f64::from(hue),
            saturation: f64::from(saturation) / 10.0,
            // sum / 510 as a percentage over LIGHTNESS_DIVISOR, in tenths
            lightness: f64::from(round_ratio(10 * sum, 51)) / 10.0,
        }
    }

    /// Same hue and saturation at another lightness, clamped to the lightness scale.
    pub fn with_lightness(self, lightness: f64) -> Self {
        Self {
            lightness: round_tenth(lightness.clamp(0.0, MAX_LIGHTNESS)),
            ..self
        }
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({},{}%,{}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Converts an `"R,G,B"` string to HSL.
pub fn rgb_to_hsl(rgb: &str) -> Result<HslColor, ColorError> {
    parse_rgb(rgb).map(HslColor::from_rgb)
}

/// `numerator / denominator` rounded to the nearest integer, halves up.
fn round_ratio(numerator: i32, denominator: i32) -> i32 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
