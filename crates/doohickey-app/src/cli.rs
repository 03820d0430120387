// Command-line surface.

use clap::{Args, Parser, Subcommand};

use doohickey_color::{ExportFormat, Harmony};
use doohickey_core::ToolId;
use doohickey_text::{Codec, Transform};

#[derive(Debug, Parser)]
#[command(
    name = "doohickey",
    version,
    about = "Developer utilities: line diff, color tools, markup and text converters"
)]
pub struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Line diff of two texts (Pro).
    Diff(DiffArgs),

    /// Show a color in HEX, RGB, RGB %, HSL, HSV, HWB and CMYK.
    Color {
        /// `#RRGGBB`, `#RGB`, `rgb(r, g, b)` or `hsl(h, s%, l%)`.
        input: String,
        #[arg(long)]
        json: bool,
    },

    /// WCAG contrast ratio and AA/AAA ratings.
    Contrast {
        foreground: String,
        background: String,
        #[arg(long)]
        json: bool,
    },

    /// Harmony palette from a base color (Pro).
    Palette {
        base: String,
        #[arg(long, value_parser = parse_harmony)]
        harmony: Option<Harmony>,
        /// Print CSS custom properties or SCSS variables.
        #[arg(long, value_parser = parse_export)]
        export: Option<ExportFormat>,
    },

    /// Convert HTML to Markdown.
    #[command(name = "html2md")]
    HtmlToMarkdown {
        /// File to read. `-` or nothing reads stdin.
        file: Option<String>,
    },

    /// Convert Markdown to HTML.
    #[command(name = "md2html")]
    MarkdownToHtml {
        /// File to read. `-` or nothing reads stdin.
        file: Option<String>,
        /// Render with a full CommonMark parser instead of the simple converter.
        #[arg(long)]
        commonmark: bool,
    },

    /// Encode text (base64, url, html, utf8).
    Encode {
        #[arg(value_parser = parse_codec)]
        codec: Codec,
        /// Text to encode. Reads stdin when omitted.
        input: Option<String>,
    },

    /// Decode text (base64, url, html, utf8).
    Decode {
        #[arg(value_parser = parse_codec)]
        codec: Codec,
        /// Text to decode. Reads stdin when omitted.
        input: Option<String>,
    },

    /// Apply a string transform, or `replace` with --find/--with.
    Text(TextArgs),

    /// Character, word, line and sentence counts.
    Stats {
        /// Text to count. Reads stdin when omitted.
        input: Option<String>,
    },

    /// List every tool and whether it is unlocked, or show one tool by slug.
    Tools {
        #[arg(value_parser = parse_tool)]
        tool: Option<ToolId>,
    },

    /// Show or change the Pro flag.
    Pro {
        #[command(subcommand)]
        action: ProAction,
    },
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Original file (`-` for stdin).
    pub old: String,
    /// Modified file (`-` for stdin).
    pub new: String,
    /// Print ops and stats as JSON.
    #[arg(long, conflicts_with_all = ["side_by_side", "stats_only"])]
    pub json: bool,
    /// Two columns: original on the left, modified on the right.
    #[arg(long, conflicts_with = "stats_only")]
    pub side_by_side: bool,
    /// Only print the added/removed/unchanged counts.
    #[arg(long)]
    pub stats_only: bool,
    /// Re-run whenever either file changes.
    #[arg(long)]
    pub watch: bool,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Transform name (upper, lower, title, sentence, camel, pascal, snake,
    /// kebab, reverse, trim, remove-duplicates, sort-lines) or `replace`.
    #[arg(value_parser = parse_text_action)]
    pub action: TextAction,
    /// Text to transform. Reads stdin when omitted.
    pub input: Option<String>,
    /// Literal text to find (`replace` only).
    #[arg(long)]
    pub find: Option<String>,
    /// Replacement text (`replace` only).
    #[arg(long = "with", default_value = "")]
    pub replacement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    Transform(Transform),
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ProAction {
    Status,
    Enable,
    Disable,
}

fn parse_harmony(s: &str) -> Result<Harmony, String> {
    Harmony::from_slug(s).ok_or_else(|| {
        let known: Vec<&str> = Harmony::ALL.iter().map(|h| h.slug()).collect();
        format!("unknown harmony '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_export(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_slug(s).ok_or_else(|| format!("unknown export format '{s}' (css or scss)"))
}

fn parse_tool(s: &str) -> Result<ToolId, String> {
    ToolId::from_slug(s).ok_or_else(|| {
        let known: Vec<&str> = ToolId::ALL.iter().map(|t| t.slug()).collect();
        format!("unknown tool '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_codec(s: &str) -> Result<Codec, String> {
    Codec::from_slug(s).ok_or_else(|| {
        let known: Vec<&str> = Codec::ALL.iter().map(|c| c.slug()).collect();
        format!("unknown codec '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_text_action(s: &str) -> Result<TextAction, String> {
    if s.eq_ignore_ascii_case("replace") {
        return Ok(TextAction::Replace);
    }
    Transform::from_slug(s)
        .map(TextAction::Transform)
        .ok_or_else(|| format!("unknown transform '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_diff_flags() {
        let cli = Cli::try_parse_from(["doohickey", "diff", "a.txt", "-", "--side-by-side"]).unwrap();
        match cli.command {
            Command::Diff(args) => {
                assert_eq!(args.old, "a.txt");
                assert_eq!(args.new, "-");
                assert!(args.side_by_side);
                assert!(!args.json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn json_conflicts_with_side_by_side() {
        let res = Cli::try_parse_from(["doohickey", "diff", "a", "b", "--json", "--side-by-side"]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_enum_arguments() {
        let cli = Cli::try_parse_from(["doohickey", "palette", "#f00", "--harmony", "square", "--export", "scss"])
            .unwrap();
        match cli.command {
            Command::Palette { harmony, export, .. } => {
                assert_eq!(harmony, Some(Harmony::Square));
                assert_eq!(export, Some(ExportFormat::Scss));
            }
            other => panic!("unexpected {other:?}"),
        }

        let cli = Cli::try_parse_from(["doohickey", "--no-color", "decode", "utf8", "\\x41"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Decode { codec: Codec::Utf8Hex, .. }));

        assert!(Cli::try_parse_from(["doohickey", "encode", "rot13", "x"]).is_err());

        let cli = Cli::try_parse_from(["doohickey", "tools", "diff-checker"]).unwrap();
        assert!(matches!(cli.command, Command::Tools { tool: Some(ToolId::DiffChecker) }));
        assert!(Cli::try_parse_from(["doohickey", "tools", "qrcode"]).is_err());
    }

    #[test]
    fn parses_text_replace() {
        let cli = Cli::try_parse_from(["doohickey", "text", "replace", "a-b", "--find", "-", "--with", "+"])
            .unwrap();
        match cli.command {
            Command::Text(args) => {
                assert_eq!(args.action, TextAction::Replace);
                assert_eq!(args.input.as_deref(), Some("a-b"));
                assert_eq!(args.find.as_deref(), Some("-"));
                assert_eq!(args.replacement, "+");
            }
            other => panic!("unexpected {other:?}"),
        }

        let cli = Cli::try_parse_from(["doohickey", "text", "snake", "fooBar"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Text(TextArgs { action: TextAction::Transform(Transform::Snake), .. })
        ));
    }
}
