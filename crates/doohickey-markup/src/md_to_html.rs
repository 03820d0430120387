// Markdown → HTML: the regex pipeline used by the preview tool, plus a
// CommonMark rendering through pulldown-cmark.

use doohickey_core::{Convert, ConvertError};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::pipeline::Pipeline;

static PIPELINE: Lazy<Pipeline> =
    Lazy::new(|| build_pipeline().expect("markdown-to-html patterns compile"));

/// Lines that are complete blocks by themselves.
static SINGLE_LINE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<(h[1-6]|hr)\b").unwrap());

static BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(pre|ul|ol|table|blockquote|div)\b").unwrap());

static BLOCK_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</(pre|ul|ol|table|blockquote|div)>$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownFlavor {
    /// The fixed regex pipeline.
    #[default]
    Simple,
    CommonMark,
}

fn cells(row: &str) -> impl Iterator<Item = &str> {
    row.split('|').map(str::trim).filter(|cell| !cell.is_empty())
}

fn table(caps: &Captures<'_>) -> String {
    let mut out = String::from("<table><thead><tr>");
    for cell in cells(&caps[1]) {
        out.push_str(&format!("<th>{cell}</th>"));
    }
    out.push_str("</tr></thead><tbody>");
    for row in caps[3].trim().split('\n') {
        out.push_str("<tr>");
        for cell in cells(row) {
            out.push_str(&format!("<td>{cell}</td>"));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Wrap bare text lines in `<p>`. Lines inside a multi-line block element
/// pass through untouched until the line that closes it.
fn paragraphs(text: &str) -> String {
    let mut in_block = false;
    let mut lines = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if SINGLE_LINE_BLOCK.is_match(trimmed) {
            lines.push(trimmed.to_string());
        } else if BLOCK_OPEN.is_match(trimmed) {
            in_block = !BLOCK_CLOSE.is_match(trimmed);
            lines.push(trimmed.to_string());
        } else if in_block {
            if BLOCK_CLOSE.is_match(trimmed) {
                in_block = false;
            }
            lines.push(trimmed.to_string());
        } else if trimmed.is_empty() {
            lines.push(String::new());
        } else if !trimmed.starts_with('<') {
            lines.push(format!("<p>{trimmed}</p>"));
        } else {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

pub fn build_pipeline() -> Result<Pipeline, regex::Error> {
    let mut p = Pipeline::new("markdown-to-html");

    p.replace(
        "fenced-code",
        r"```(\w*)\n([\s\S]*?)```",
        "<pre><code>$2</code></pre>",
    )?
    .replace("inline-code", r"`([^`]+)`", "<code>$1</code>")?;

    for level in (1..=6).rev() {
        p.replace(
            format!("h{level}"),
            &format!(r"(?m)^#{{{level}}}\s+(.+)$"),
            &format!("<h{level}>$1</h{level}>"),
        )?;
    }

    p.replace("hr-dashes", r"(?m)^---+$", "<hr>")?
        .replace("hr-stars", r"(?m)^\*\*\*+$", "<hr>")?
        .replace("bold-italic", r"\*\*\*(.+?)\*\*\*", "<strong><em>$1</em></strong>")?
        .replace("bold", r"\*\*(.+?)\*\*", "<strong>$1</strong>")?
        .replace("italic", r"\*(.+?)\*", "<em>$1</em>")?
        .replace("strikethrough", r"~~(.+?)~~", "<del>$1</del>")?
        .replace("image", r"!\[([^\]]*)\]\(([^)]+)\)", r#"<img src="$2" alt="$1">"#)?
        .replace("link", r"\[([^\]]+)\]\(([^)]+)\)", r#"<a href="$2">$1</a>"#)?
        .replace("blockquote", r"(?m)^>\s+(.+)$", "<blockquote>$1</blockquote>")?
        .replace("blockquote-merge", r"</blockquote>\n<blockquote>", "\n")?
        .replace("list-item", r"(?m)^[-*]\s+(.+)$", "<li>$1</li>")?
        .replace("list", r"(<li>.*</li>\n?)+", "<ul>$0</ul>")?
        .replace_with(
            "table",
            r"(?m)^(\|.+\|)\n(\|[-: |]+\|)\n((?:\|.+\|\n?)+)",
            table,
        )?;

    p.map("paragraphs", paragraphs);
    p.replace("collapse-newlines", r"\n{3,}", "\n\n")?;
    p.map("trim", |text| text.trim().to_string());

    Ok(p)
}

pub fn pipeline() -> &'static Pipeline {
    &PIPELINE
}

/// Blank input yields an empty string.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }
    PIPELINE.run(markdown)
}

/// Full CommonMark with the GitHub table and strikethrough extensions.
pub fn commonmark_to_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

pub fn render(markdown: &str, flavor: MarkdownFlavor) -> String {
    match flavor {
        MarkdownFlavor::Simple => markdown_to_html(markdown),
        MarkdownFlavor::CommonMark => commonmark_to_html(markdown),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownToHtml {
    pub flavor: MarkdownFlavor,
}

impl Convert for MarkdownToHtml {
    fn convert(&self, input: &str) -> Result<String, ConvertError> {
        Ok(render(input, self.flavor))
    }
}
