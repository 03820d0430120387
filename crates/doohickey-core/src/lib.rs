use std::fmt;

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Colors
// ──────────────────────────────────────────────

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels scaled to 0.0..=1.0.
    pub fn unit(&self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }

    /// Build from 0.0..=1.0 channels, rounding to the nearest 8-bit value.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ──────────────────────────────────────────────
// Tool registry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolCategory {
    Color,
    Text,
    Markup,
}

impl ToolCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::Color => "Color",
            ToolCategory::Text => "Text",
            ToolCategory::Markup => "Markup",
        }
    }
}

/// Every tool the suite ships. Dispatch on this enum is exhaustive, so a new
/// tool cannot be registered without a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    ColorConverter,
    ContrastChecker,
    PaletteGenerator,
    DiffChecker,
    EncoderDecoder,
    StringUtilities,
    HtmlToMarkdown,
    MarkdownPreview,
}

impl ToolId {
    /// Registry order (sidebar order).
    pub const ALL: [ToolId; 8] = [
        ToolId::ColorConverter,
        ToolId::ContrastChecker,
        ToolId::PaletteGenerator,
        ToolId::DiffChecker,
        ToolId::EncoderDecoder,
        ToolId::StringUtilities,
        ToolId::HtmlToMarkdown,
        ToolId::MarkdownPreview,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ToolId::ColorConverter => "color-converter",
            ToolId::ContrastChecker => "contrast-checker",
            ToolId::PaletteGenerator => "palette",
            ToolId::DiffChecker => "diff-checker",
            ToolId::EncoderDecoder => "encoder-decoder",
            ToolId::StringUtilities => "string-utilities",
            ToolId::HtmlToMarkdown => "html-to-markdown",
            ToolId::MarkdownPreview => "markdown-preview",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolId::ColorConverter => "Color Converter",
            ToolId::ContrastChecker => "Contrast Checker",
            ToolId::PaletteGenerator => "Palette Generator",
            ToolId::DiffChecker => "Diff Checker",
            ToolId::EncoderDecoder => "Encoder / Decoder",
            ToolId::StringUtilities => "String Utilities",
            ToolId::HtmlToMarkdown => "HTML to Markdown",
            ToolId::MarkdownPreview => "Markdown Preview",
        }
    }

    pub fn category(&self) -> ToolCategory {
        match self {
            ToolId::ColorConverter | ToolId::ContrastChecker | ToolId::PaletteGenerator => {
                ToolCategory::Color
            }
            ToolId::DiffChecker | ToolId::EncoderDecoder | ToolId::StringUtilities => {
                ToolCategory::Text
            }
            ToolId::HtmlToMarkdown | ToolId::MarkdownPreview => ToolCategory::Markup,
        }
    }

    pub fn requires_pro(&self) -> bool {
        matches!(self, ToolId::DiffChecker | ToolId::PaletteGenerator)
    }

    pub fn from_slug(slug: &str) -> Option<ToolId> {
        Self::ALL.iter().copied().find(|tool| tool.slug() == slug)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ──────────────────────────────────────────────
// Capabilities
// ──────────────────────────────────────────────

/// Which tools are unlocked. Built once at startup and passed down by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub pro: bool,
}

impl Capabilities {
    pub const fn free() -> Self {
        Self { pro: false }
    }

    pub const fn pro() -> Self {
        Self { pro: true }
    }

    pub fn allows(&self, tool: ToolId) -> bool {
        self.pro || !tool.requires_pro()
    }

    /// Tools visible in the registry, paired with their lock state.
    pub fn registry(&self) -> Vec<(ToolId, bool)> {
        ToolId::ALL
            .iter()
            .map(|tool| (*tool, self.allows(*tool)))
            .collect()
    }
}

// ──────────────────────────────────────────────
// Converter errors
// ──────────────────────────────────────────────

/// Prefix marking a converter failure rendered inline.
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid Base64 string")]
    InvalidBase64,
    #[error("Invalid URL-encoded string")]
    InvalidUrlEncoding,
    #[error("Invalid UTF-8 hex string")]
    InvalidUtf8Hex,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ConvertError {
    /// The `Error: ...` string shown in place of converter output.
    pub fn sentinel(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }
}

/// Fold a converter result into the string the UI renders.
pub fn render_result(result: Result<String, ConvertError>) -> String {
    match result {
        Ok(output) => output,
        Err(err) => err.sentinel(),
    }
}

pub fn is_error_sentinel(output: &str) -> bool {
    output.starts_with(ERROR_PREFIX)
}

// ──────────────────────────────────────────────
// Trait: Convert
// ──────────────────────────────────────────────

/// A pure string-to-string converter. Implementors never panic on user input;
/// failures come back as `ConvertError`.
pub trait Convert {
    fn convert(&self, input: &str) -> Result<String, ConvertError>;

    /// Output with failures rendered as an inline sentinel.
    fn convert_inline(&self, input: &str) -> String {
        render_result(self.convert(input))
    }
}
