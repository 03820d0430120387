// CSS-style string renderings of one color in every supported notation.

use doohickey_core::{Convert, ConvertError, Rgb};
use serde::Serialize;

use crate::parse::parse_color;
use crate::space::{rgb_to_cmyk, rgb_to_hsl, rgb_to_hsv, rgb_to_hwb};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorFormats {
    pub hex: String,
    pub rgb: String,
    pub rgb_percent: String,
    pub hsl: String,
    pub hsv: String,
    pub hwb: String,
    pub cmyk: String,
}

impl ColorFormats {
    pub fn from_rgb(color: Rgb) -> Self {
        let Rgb { r, g, b } = color;
        let pct = |c: u8| (c as f64 / 2.55).round() as u8;
        let (h, s, l) = rgb_to_hsl(color).rounded();
        let (hv, sv, v) = rgb_to_hsv(color).rounded();
        let hwb = rgb_to_hwb(color);
        let cmyk = rgb_to_cmyk(color);

        Self {
            hex: color.to_hex(),
            rgb: format!("rgb({r}, {g}, {b})"),
            rgb_percent: format!("rgb({}%, {}%, {}%)", pct(r), pct(g), pct(b)),
            hsl: format!("hsl({h}, {s}%, {l}%)"),
            hsv: format!("hsv({hv}, {sv}%, {v}%)"),
            hwb: format!("hwb({} {}% {}%)", hwb.h, hwb.w, hwb.b),
            cmyk: format!("cmyk({}%, {}%, {}%, {}%)", cmyk.c, cmyk.m, cmyk.y, cmyk.k),
        }
    }

    /// `(label, value)` rows in display order.
    pub fn rows(&self) -> [(&'static str, &str); 7] {
        [
            ("HEX", self.hex.as_str()),
            ("RGB", self.rgb.as_str()),
            ("RGB %", self.rgb_percent.as_str()),
            ("HSL", self.hsl.as_str()),
            ("HSV", self.hsv.as_str()),
            ("HWB", self.hwb.as_str()),
            ("CMYK", self.cmyk.as_str()),
        ]
    }
}

/// Output notation for [`ColorConversion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorNotation {
    Hex,
    Rgb,
    RgbPercent,
    Hsl,
    Hsv,
    Hwb,
    Cmyk,
}

/// Parse any supported input and render it in one notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConversion(pub ColorNotation);

impl Convert for ColorConversion {
    fn convert(&self, input: &str) -> Result<String, ConvertError> {
        let formats = ColorFormats::from_rgb(parse_color(input)?);
        Ok(match self.0 {
            ColorNotation::Hex => formats.hex,
            ColorNotation::Rgb => formats.rgb,
            ColorNotation::RgbPercent => formats.rgb_percent,
            ColorNotation::Hsl => formats.hsl,
            ColorNotation::Hsv => formats.hsv,
            ColorNotation::Hwb => formats.hwb,
            ColorNotation::Cmyk => formats.cmyk,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_blue_in_every_notation() {
        let formats = ColorFormats::from_rgb(Rgb::new(0x00, 0x73, 0xaa));
        assert_eq!(formats.hex, "#0073AA");
        assert_eq!(formats.rgb, "rgb(0, 115, 170)");
        assert_eq!(formats.rgb_percent, "rgb(0%, 45%, 67%)");
        assert_eq!(formats.hsl, "hsl(199, 100%, 33%)");
        assert_eq!(formats.hsv, "hsv(199, 100%, 67%)");
        assert_eq!(formats.hwb, "hwb(199 0% 33%)");
        assert_eq!(formats.cmyk, "cmyk(100%, 32%, 0%, 33%)");
    }

    #[test]
    fn rows_follow_display_order() {
        let formats = ColorFormats::from_rgb(Rgb::WHITE);
        let labels: Vec<&str> = formats.rows().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["HEX", "RGB", "RGB %", "HSL", "HSV", "HWB", "CMYK"]);
        assert_eq!(formats.rows()[0].1, "#FFFFFF");
    }

    #[test]
    fn single_notation_conversion() {
        let to_hsl = ColorConversion(ColorNotation::Hsl);
        assert_eq!(to_hsl.convert_inline("#ff0000"), "hsl(0, 100%, 50%)");
        assert_eq!(
            ColorConversion(ColorNotation::Hex).convert_inline("rgb(0, 115, 170)"),
            "#0073AA"
        );
        assert_eq!(to_hsl.convert_inline("nope"), "Error: Invalid color: nope");
    }
}
