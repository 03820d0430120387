// Color input parsing: #RRGGBB, #RGB, rgb(), hsl().

use doohickey_core::{ConvertError, Rgb};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::space::{hsl_to_rgb, Hsl};

static HEX6_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").unwrap());

static HEX3_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{3})$").unwrap());

static RGB_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)").unwrap()
});

static HSL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"hsl\(\s*(\d{1,3})\s*,\s*(\d{1,3})%?\s*,\s*(\d{1,3})%?\s*\)").unwrap()
});

fn hex_byte(pair: &str) -> Result<u8, ConvertError> {
    u8::from_str_radix(pair, 16).map_err(|_| ConvertError::InvalidColor(pair.to_string()))
}

/// Parse exactly six hex digits, with or without a leading `#`.
pub fn parse_hex(input: &str) -> Result<Rgb, ConvertError> {
    let caps = HEX6_PATTERN
        .captures(input.trim())
        .ok_or_else(|| ConvertError::InvalidColor(input.to_string()))?;
    let digits = &caps[1];
    Ok(Rgb::new(
        hex_byte(&digits[0..2])?,
        hex_byte(&digits[2..4])?,
        hex_byte(&digits[4..6])?,
    ))
}

/// Parse any supported notation. Tried in order: six-digit hex, three-digit
/// hex (each digit doubled), `rgb(r, g, b)` with components clamped to 255,
/// `hsl(h, s%, l%)`.
pub fn parse_color(input: &str) -> Result<Rgb, ConvertError> {
    let input = input.trim();

    if HEX6_PATTERN.is_match(input) {
        return parse_hex(input);
    }

    if let Some(caps) = HEX3_PATTERN.captures(input) {
        let expanded: String = caps[1].chars().flat_map(|c| [c, c]).collect();
        return parse_hex(&expanded);
    }

    if let Some(caps) = RGB_PATTERN.captures(input) {
        let channel = |idx: usize| -> u8 {
            caps[idx].parse::<u16>().map_or(255, |v| v.min(255) as u8)
        };
        return Ok(Rgb::new(channel(1), channel(2), channel(3)));
    }

    if let Some(caps) = HSL_PATTERN.captures(input) {
        let component = |idx: usize| -> f64 { caps[idx].parse::<u16>().unwrap_or(0) as f64 };
        let hsl = Hsl {
            h: component(1),
            s: (component(2) / 100.0).min(1.0),
            l: (component(3) / 100.0).min(1.0),
        };
        return Ok(hsl_to_rgb(hsl));
    }

    log::debug!("unrecognized color input {:?}", input);
    Err(ConvertError::InvalidColor(input.to_string()))
}
