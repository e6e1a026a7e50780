use crate::ColorError;
use palette::Srgb;
use std::str::FromStr;

/// Parses `#rgb` or `#rrggbb`. The leading `#` is required.
pub fn parse_hex(color: &str) -> Option<Srgb<u8>> {
    let digits = color.strip_prefix('#')?;
    let well_formed =
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());

    well_formed.then(|| Srgb::<u8>::from_str(digits).ok()).flatten()
}

/// Converts a hex color into an `"R,G,B"` string.
///
/// Input that is not a hex color is returned unchanged.
pub fn hex_to_rgb(color: &str) -> String {
    parse_hex(color).map_or_else(
        || color.to_string(),
        |rgb| {
            let (r, g, b) = rgb.into_components();
            format!("{r},{g},{b}")
        },
    )
}

/// Parses a comma separated `"R,G,B"` triple. Whitespace around channels is ignored.
pub fn parse_rgb(rgb: &str) -> Result<Srgb<u8>, ColorError> {
    let channels = rgb
        .split(',')
        .map(str::trim)
        .map(|c| {
            c.parse::<u8>()
                .map_err(|_| ColorError::InvalidChannel(c.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match channels[..] {
        [r, g, b] => Ok(Srgb::new(r, g, b)),
        _ => Err(ColorError::ChannelCount(channels.len())),
    }
}
