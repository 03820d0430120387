// Harmony palettes by HSL hue rotation, plus CSS / SCSS export.

use std::fmt;

use doohickey_core::Rgb;
use serde::{Deserialize, Serialize};

use crate::space::{hsl_to_rgb, rgb_to_hsl, Hsl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    #[default]
    Complementary,
    Analogous,
    Triadic,
    SplitComplementary,
    Tetradic,
    Square,
    Monochromatic,
}

impl Harmony {
    pub const ALL: [Harmony; 7] = [
        Harmony::Complementary,
        Harmony::Analogous,
        Harmony::Triadic,
        Harmony::SplitComplementary,
        Harmony::Tetradic,
        Harmony::Square,
        Harmony::Monochromatic,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Harmony::Complementary => "complementary",
            Harmony::Analogous => "analogous",
            Harmony::Triadic => "triadic",
            Harmony::SplitComplementary => "split-complementary",
            Harmony::Tetradic => "tetradic",
            Harmony::Square => "square",
            Harmony::Monochromatic => "monochromatic",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Harmony> {
        let slug = slug.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|h| h.slug() == slug)
    }

    /// Hue offsets in degrees. Monochromatic keeps the hue and varies
    /// lightness instead, so it has a single zero offset here.
    fn hue_offsets(&self) -> &'static [f64] {
        match self {
            Harmony::Complementary => &[0.0, 180.0],
            Harmony::Analogous => &[0.0, 30.0, 330.0],
            Harmony::Triadic => &[0.0, 120.0, 240.0],
            Harmony::SplitComplementary => &[0.0, 150.0, 210.0],
            Harmony::Tetradic => &[0.0, 60.0, 180.0, 240.0],
            Harmony::Square => &[0.0, 90.0, 180.0, 270.0],
            Harmony::Monochromatic => &[0.0],
        }
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

const MONO_STEPS: [f64; 4] = [-0.30, -0.15, 0.15, 0.30];
const MONO_MIN_L: f64 = 0.05;
const MONO_MAX_L: f64 = 0.95;

/// Colors for `harmony`, always starting with `base` unchanged.
pub fn palette(base: Rgb, harmony: Harmony) -> Vec<Rgb> {
    let hsl = rgb_to_hsl(base);
    let mut colors = vec![base];

    if harmony == Harmony::Monochromatic {
        colors.extend(MONO_STEPS.iter().map(|delta| {
            hsl_to_rgb(Hsl {
                l: (hsl.l + delta).clamp(MONO_MIN_L, MONO_MAX_L),
                ..hsl
            })
        }));
    } else {
        colors.extend(harmony.hue_offsets().iter().skip(1).map(|offset| {
            hsl_to_rgb(Hsl {
                h: (hsl.h + offset).rem_euclid(360.0),
                ..hsl
            })
        }));
    }

    log::debug!("palette {} from {}: {} colors", harmony, base, colors.len());
    colors
}

// ──────────────────────────────────────────────
// Export
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Css,
    Scss,
}

impl ExportFormat {
    pub fn from_slug(slug: &str) -> Option<ExportFormat> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "css" => Some(ExportFormat::Css),
            "scss" => Some(ExportFormat::Scss),
            _ => None,
        }
    }
}

/// `:root { --color-N: #HEX; }` with one property per line.
pub fn export_css(colors: &[Rgb]) -> String {
    let mut out = String::from(":root {\n");
    for (i, color) in colors.iter().enumerate() {
        out.push_str(&format!("  --color-{}: {};\n", i + 1, color.to_hex()));
    }
    out.push('}');
    out
}

/// `$color-N: #HEX;` lines.
pub fn export_scss(colors: &[Rgb]) -> String {
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| format!("$color-{}: {};", i + 1, color.to_hex()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export(colors: &[Rgb], format: ExportFormat) -> String {
    match format {
        ExportFormat::Css => export_css(colors),
        ExportFormat::Scss => export_scss(colors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn every_harmony_starts_with_base() {
        let base = Rgb::new(0x00, 0x73, 0xaa);
        let expected_len = [2, 3, 3, 3, 4, 4, 5];
        for (harmony, len) in Harmony::ALL.iter().zip(expected_len) {
            let colors = palette(base, *harmony);
            assert_eq!(colors.len(), len, "{harmony}");
            assert_eq!(colors[0], base, "{harmony}");
        }
    }

    #[test]
    fn complementary_of_red_is_cyan() {
        assert_eq!(
            palette(RED, Harmony::Complementary),
            vec![RED, Rgb::new(0, 255, 255)]
        );
    }

    #[test]
    fn triadic_of_red() {
        assert_eq!(
            palette(RED, Harmony::Triadic),
            vec![RED, Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]
        );
    }

    #[test]
    fn square_includes_complement() {
        let colors = palette(RED, Harmony::Square);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[2], Rgb::new(0, 255, 255));
    }

    #[test]
    fn monochromatic_keeps_hue_and_orders_lightness() {
        let colors = palette(RED, Harmony::Monochromatic);
        assert_eq!(colors[1], Rgb::new(102, 0, 0));
        let lightness: Vec<f64> = colors[1..].iter().map(|c| rgb_to_hsl(*c).l).collect();
        assert!(lightness.windows(2).all(|w| w[0] < w[1]));
        for color in &colors[1..] {
            assert_eq!(rgb_to_hsl(*color).rounded().0, 0);
        }
    }

    #[test]
    fn monochromatic_clamps_near_white() {
        let colors = palette(Rgb::WHITE, Harmony::Monochromatic);
        let top = rgb_to_hsl(*colors.last().unwrap()).l;
        assert!(top <= MONO_MAX_L + 0.01);
    }

    #[test]
    fn slugs_parse() {
        for harmony in Harmony::ALL {
            assert_eq!(Harmony::from_slug(harmony.slug()), Some(harmony));
        }
        assert_eq!(Harmony::from_slug("Split-Complementary"), Some(Harmony::SplitComplementary));
        assert_eq!(Harmony::from_slug("pentadic"), None);
    }

    #[test]
    fn css_and_scss_export() {
        let colors = [RED, Rgb::new(0, 255, 255)];
        assert_eq!(
            export_css(&colors),
            ":root {\n  --color-1: #FF0000;\n  --color-2: #00FFFF;\n}"
        );
        assert_eq!(
            export(&colors, ExportFormat::Scss),
            "$color-1: #FF0000;\n$color-2: #00FFFF;"
        );
        assert_eq!(ExportFormat::from_slug("SCSS"), Some(ExportFormat::Scss));
    }
}
