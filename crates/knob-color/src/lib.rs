//! Color helpers for deriving knob shades.
//!
//! Colors arrive as CSS strings. Hex (`#rgb`, `#rrggbb`) and comma separated
//! RGB triples are converted to HSL; anything else is left to the caller.

pub mod hsl;
pub mod rgb;

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub use hsl::{HslColor, rgb_to_hsl};
pub use rgb::{hex_to_rgb, parse_hex, parse_rgb};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected 3 color channels, found {0}")]
    ChannelCount(usize),
    #[error("invalid color channel '{0}'")]
    InvalidChannel(String),
}

static RGB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}), (\d{1,3}), (\d{1,3})").expect("rgb pattern is valid")
});

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#[0-9a-f]{3,6}$").expect("hex pattern is valid"));

/// Resolves a track color to HSL.
///
/// Accepts an `"R, G, B"` triple anywhere in the string (so `rgb(80, 158, 236)`
/// works) or a `#` hex color. Returns `None` when no HSL can be derived, which
/// callers treat as "use the color as-is".
pub fn get_knob_color(color: &str) -> Option<HslColor> {
    if let Some(caps) = RGB_PATTERN.captures(color) {
        return rgb_to_hsl(&format!("{},{},{}", &caps[1], &caps[2], &caps[3])).ok();
    }

    if HEX_PATTERN.is_match(color) {
        return rgb_to_hsl(&hex_to_rgb(color)).ok();
    }

    None
}
