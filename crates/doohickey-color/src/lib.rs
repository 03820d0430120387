// doohickey-color: color parsing, space conversions, WCAG contrast, harmonies

pub mod contrast;
pub mod formats;
pub mod palette;
pub mod parse;
pub mod space;

pub use contrast::{contrast_ratio, relative_luminance, ContrastReport};
pub use formats::{ColorConversion, ColorFormats, ColorNotation};
pub use palette::{export, export_css, export_scss, palette, ExportFormat, Harmony};
pub use parse::{parse_color, parse_hex};
pub use space::{
    hsl_to_rgb, hsv_to_rgb, rgb_to_cmyk, rgb_to_hsl, rgb_to_hsv, rgb_to_hwb, Cmyk, Hsl, Hsv, Hwb,
};

use doohickey_core::{ConvertError, Rgb};

/// Parse `input` and render it in every notation.
pub fn convert_color(input: &str) -> Result<ColorFormats, ConvertError> {
    parse_color(input).map(ColorFormats::from_rgb)
}

/// Parse both colors and rate their contrast.
pub fn check_contrast(foreground: &str, background: &str) -> Result<ContrastReport, ConvertError> {
    let fg: Rgb = parse_color(foreground)?;
    let bg: Rgb = parse_color(background)?;
    Ok(ContrastReport::new(fg, bg))
}
