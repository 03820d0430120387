// WCAG 2.1 relative luminance and contrast ratio.

use doohickey_core::Rgb;
use serde::Serialize;

/// Minimum ratio for AA normal text and AAA large text.
pub const AA_NORMAL: f64 = 4.5;
/// Minimum ratio for AA large text and UI components.
pub const AA_LARGE: f64 = 3.0;
pub const AAA_NORMAL: f64 = 7.0;
pub const AAA_LARGE: f64 = 4.5;

fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

pub fn relative_luminance(color: Rgb) -> f64 {
    let [r, g, b] = color.unit().map(linearize);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// `(L_lighter + 0.05) / (L_darker + 0.05)`, symmetric in its arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastReport {
    pub foreground: Rgb,
    pub background: Rgb,
    pub ratio: f64,
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
    pub ui_components: bool,
}

impl ContrastReport {
    pub fn new(foreground: Rgb, background: Rgb) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground,
            background,
            ratio,
            aa_normal: ratio >= AA_NORMAL,
            aa_large: ratio >= AA_LARGE,
            aaa_normal: ratio >= AAA_NORMAL,
            aaa_large: ratio >= AAA_LARGE,
            ui_components: ratio >= AA_LARGE,
        }
    }

    /// Ratio with two decimals, e.g. `"4.54"`.
    pub fn ratio_label(&self) -> String {
        format!("{:.2}", self.ratio)
    }

    /// The same check with the colors exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.background, self.foreground)
    }
}
