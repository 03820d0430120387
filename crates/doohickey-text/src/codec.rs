// Encoders / decoders: Base64, URL component, HTML entities, UTF-8 hex.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use doohickey_core::{Convert, ConvertError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static ENTITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

static PERCENT_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%([0-9a-fA-F]{2})?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Codec {
    Base64,
    Url,
    Html,
    Utf8Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Encode,
    Decode,
}

impl Codec {
    pub const ALL: [Codec; 4] = [Codec::Base64, Codec::Url, Codec::Html, Codec::Utf8Hex];

    pub fn slug(&self) -> &'static str {
        match self {
            Codec::Base64 => "base64",
            Codec::Url => "url",
            Codec::Html => "html",
            Codec::Utf8Hex => "utf8",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Codec::Base64 => "Base64",
            Codec::Url => "URL",
            Codec::Html => "HTML Entities",
            Codec::Utf8Hex => "UTF-8 Hex",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Codec> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "base64" | "b64" => Some(Codec::Base64),
            "url" | "uri" => Some(Codec::Url),
            "html" | "entities" => Some(Codec::Html),
            "utf8" | "utf-8" | "hex" => Some(Codec::Utf8Hex),
            _ => None,
        }
    }

    pub fn encode(&self, input: &str) -> String {
        match self {
            Codec::Base64 => BASE64.encode(input.as_bytes()),
            Codec::Url => url_encode(input),
            Codec::Html => html_encode(input),
            Codec::Utf8Hex => utf8_hex_encode(input),
        }
    }

    pub fn decode(&self, input: &str) -> Result<String, ConvertError> {
        match self {
            Codec::Base64 => base64_decode(input),
            Codec::Url => url_decode(input),
            Codec::Html => Ok(html_decode(input)),
            Codec::Utf8Hex => utf8_hex_decode(input),
        }
    }

    pub fn apply(&self, direction: Direction, input: &str) -> Result<String, ConvertError> {
        match direction {
            Direction::Encode => Ok(self.encode(input)),
            Direction::Decode => self.decode(input),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One codec in one direction, usable wherever a `Convert` is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConversion {
    pub codec: Codec,
    pub direction: Direction,
}

impl Convert for CodecConversion {
    fn convert(&self, input: &str) -> Result<String, ConvertError> {
        self.codec.apply(self.direction, input)
    }
}

// ──────────────────────────────────────────────
// Base64
// ──────────────────────────────────────────────

fn base64_decode(input: &str) -> Result<String, ConvertError> {
    let bytes = BASE64
        .decode(input.trim())
        .map_err(|_| ConvertError::InvalidBase64)?;
    String::from_utf8(bytes).map_err(|_| ConvertError::InvalidBase64)
}

// ──────────────────────────────────────────────
// URL component
// ──────────────────────────────────────────────

/// Characters `urlencoding` escapes but component encoding leaves alone.
const COMPONENT_SAFE: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

fn url_encode(input: &str) -> String {
    let encoded = urlencoding::encode(input).into_owned();
    COMPONENT_SAFE
        .iter()
        .fold(encoded, |acc, (escape, ch)| acc.replace(escape, ch))
}

/// Every `%` must start a two-digit hex escape and the bytes must be UTF-8.
fn url_decode(input: &str) -> Result<String, ConvertError> {
    let input = input.trim();
    if PERCENT_ESCAPE
        .captures_iter(input)
        .any(|caps| caps.get(1).is_none())
    {
        return Err(ConvertError::InvalidUrlEncoding);
    }
    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ConvertError::InvalidUrlEncoding)
}

// ──────────────────────────────────────────────
// HTML entities
// ──────────────────────────────────────────────

fn html_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn numeric_entity(digits: &str, radix: u32) -> char {
    u32::from_str_radix(digits, radix)
        .ok()
        .filter(|code| *code != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn decode_entity(caps: &Captures<'_>) -> String {
    let body = &caps[1];
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return numeric_entity(hex, 16).to_string();
    }
    if let Some(dec) = body.strip_prefix('#') {
        return numeric_entity(dec, 10).to_string();
    }
    match body {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "nbsp" => "\u{00A0}".to_string(),
        // Unknown names stay as written.
        _ => caps[0].to_string(),
    }
}

fn html_decode(input: &str) -> String {
    ENTITY_PATTERN.replace_all(input, decode_entity).into_owned()
}

// ──────────────────────────────────────────────
// UTF-8 hex
// ──────────────────────────────────────────────

fn utf8_hex_encode(input: &str) -> String {
    input.bytes().map(|b| format!("\\x{b:02x}")).collect()
}

/// `\x` markers and whitespace are ignored. Invalid UTF-8 sequences decode
/// to U+FFFD.
fn utf8_hex_decode(input: &str) -> Result<String, ConvertError> {
    let hex: String = input
        .replace("\\x", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if hex.len() % 2 != 0 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConvertError::InvalidUtf8Hex);
    }

    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| ConvertError::InvalidUtf8Hex)?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 5] = [
        "Hello, World!",
        "",
        "a&b <c> \"d\" 'e'",
        "naïve café ✓ 日本",
        "line one\nline two\ttab",
    ];

    #[test]
    fn every_codec_round_trips() {
        for codec in Codec::ALL {
            for sample in SAMPLES {
                let encoded = codec.encode(sample);
                assert_eq!(codec.decode(&encoded).as_deref(), Ok(sample), "{codec}: {sample:?}");
            }
        }
    }

    #[test]
    fn base64_known_values() {
        assert_eq!(Codec::Base64.encode("Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(Codec::Base64.decode("  SGk=\n").as_deref(), Ok("Hi"));
    }

    #[test]
    fn base64_rejects_garbage() {
        let conv = CodecConversion {
            codec: Codec::Base64,
            direction: Direction::Decode,
        };
        assert_eq!(conv.convert_inline("not base64!"), "Error: Invalid Base64 string");
        // Valid base64, but not UTF-8.
        assert_eq!(Codec::Base64.decode("/w=="), Err(ConvertError::InvalidBase64));
    }

    #[test]
    fn url_matches_component_encoding() {
        assert_eq!(Codec::Url.encode("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(Codec::Url.encode("it's (fine)*!~-_."), "it's%20(fine)*!~-_.");
    }

    #[test]
    fn url_decode_errors() {
        assert_eq!(Codec::Url.decode("100%"), Err(ConvertError::InvalidUrlEncoding));
        assert_eq!(Codec::Url.decode("%zz"), Err(ConvertError::InvalidUrlEncoding));
        assert_eq!(Codec::Url.decode("%C3"), Err(ConvertError::InvalidUrlEncoding));
        assert_eq!(Codec::Url.decode("a+b").as_deref(), Ok("a+b"));
    }

    #[test]
    fn html_encode_and_decode() {
        assert_eq!(
            Codec::Html.encode(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(
            Codec::Html.decode("&#65;&#x42;&#X43; &apos;&nbsp;&copy;").as_deref(),
            Ok("ABC '\u{00A0}&copy;")
        );
        assert_eq!(Codec::Html.decode("&#0;").as_deref(), Ok("\u{FFFD}"));
    }

    #[test]
    fn utf8_hex_format() {
        assert_eq!(Codec::Utf8Hex.encode("Aé"), "\\x41\\xc3\\xa9");
        assert_eq!(Codec::Utf8Hex.decode("\\x41 \\xC3\\xA9\n").as_deref(), Ok("Aé"));
        assert_eq!(Codec::Utf8Hex.decode("41c3a9").as_deref(), Ok("Aé"));
    }

    #[test]
    fn utf8_hex_rejects_malformed_digits() {
        assert_eq!(Codec::Utf8Hex.decode("\\x4"), Err(ConvertError::InvalidUtf8Hex));
        assert_eq!(Codec::Utf8Hex.decode("zz"), Err(ConvertError::InvalidUtf8Hex));
        assert_eq!(Codec::Utf8Hex.decode("ff").as_deref(), Ok("\u{FFFD}"));
    }

    #[test]
    fn slugs() {
        for codec in Codec::ALL {
            assert_eq!(Codec::from_slug(codec.slug()), Some(codec));
        }
        assert_eq!(Codec::from_slug("B64"), Some(Codec::Base64));
        assert_eq!(Codec::from_slug("rot13"), None);
    }
}
