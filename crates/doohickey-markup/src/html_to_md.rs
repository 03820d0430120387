// HTML → Markdown as an ordered regex pipeline.

use doohickey_core::{Convert, ConvertError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::pipeline::Pipeline;

static ROW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<tr[^>]*>([\s\S]*?)</tr>").unwrap());

static CELL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<t[dh][^>]*>([\s\S]*?)</t[dh]>").unwrap());

static PIPELINE: Lazy<Pipeline> =
    Lazy::new(|| build_pipeline().expect("html-to-markdown patterns compile"));

/// Entity decoding order matters: `&amp;` first, so `&amp;lt;` becomes `<`.
const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

fn blockquote(caps: &Captures<'_>) -> String {
    let body = caps[1]
        .trim()
        .split('\n')
        .map(|line| format!("> {}", line.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    body + "\n"
}

/// First row becomes the header, followed by a `---` separator row.
fn table(caps: &Captures<'_>) -> String {
    let rows: Vec<Vec<&str>> = ROW_PATTERN
        .captures_iter(&caps[1])
        .map(|row| {
            CELL_PATTERN
                .captures_iter(row.get(1).map_or("", |m| m.as_str()))
                .map(|cell| cell.get(1).map_or("", |m| m.as_str().trim()))
                .collect()
        })
        .collect();

    let Some(header) = rows.first() else {
        return String::new();
    };

    let mut out = String::from("\n");
    out.push_str(&format!("| {} |\n", header.join(" | ")));
    out.push_str(&format!("| {} |\n", vec!["---"; header.len()].join(" | ")));
    for row in &rows[1..] {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}

fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, ch)| acc.replace(entity, ch))
}

pub fn build_pipeline() -> Result<Pipeline, regex::Error> {
    let mut p = Pipeline::new("html-to-markdown");

    for level in (1..=6).rev() {
        let hashes = "#".repeat(level);
        p.replace_with(
            format!("h{level}"),
            &format!(r"(?i)<h{level}[^>]*>(.*?)</h{level}>"),
            move |caps| format!("\n{} {}\n", hashes, caps[1].trim()),
        )?;
    }

    for tag in ["strong", "b"] {
        p.replace(tag, &format!(r"(?i)<{tag}>(.*?)</{tag}>"), "**$1**")?;
    }
    for tag in ["em", "i"] {
        p.replace(tag, &format!(r"(?i)<{tag}>(.*?)</{tag}>"), "*$1*")?;
    }
    for tag in ["del", "s", "strike"] {
        p.replace(tag, &format!(r"(?i)<{tag}>(.*?)</{tag}>"), "~~$1~~")?;
    }

    p.replace("inline-code", r"(?i)<code>(.*?)</code>", "`$1`")?
        .replace(
            "pre-code",
            r"(?i)<pre[^>]*><code[^>]*>([\s\S]*?)</code></pre>",
            "\n```\n$1\n```\n",
        )?
        .replace("pre", r"(?i)<pre[^>]*>([\s\S]*?)</pre>", "\n```\n$1\n```\n")?
        .replace("link", r#"(?i)<a[^>]+href="([^"]*)"[^>]*>(.*?)</a>"#, "[$2]($1)")?
        .replace(
            "image-alt",
            r#"(?i)<img[^>]+src="([^"]*)"[^>]*alt="([^"]*)"[^>]*/?>"#,
            "![$2]($1)",
        )?
        .replace("image", r#"(?i)<img[^>]+src="([^"]*)"[^>]*/?>"#, "![]($1)")?
        .replace("list-item", r"(?i)<li[^>]*>(.*?)</li>", "- $1\n")?
        .replace("list", r"(?i)</?[ou]l[^>]*>", "\n")?
        .replace_with(
            "blockquote",
            r"(?i)<blockquote[^>]*>([\s\S]*?)</blockquote>",
            blockquote,
        )?
        .replace("hr", r"(?i)<hr\s*/?>", "\n---\n")?
        .replace("br", r"(?i)<br\s*/?>", "\n")?
        .replace("paragraph", r"(?i)<p[^>]*>(.*?)</p>", "$1\n\n")?
        .replace_with("table", r"(?i)<table[^>]*>([\s\S]*?)</table>", table)?
        .replace("strip-tags", r"<[^>]+>", "")?;

    p.map("entities", decode_entities);
    p.replace("collapse-newlines", r"\n{3,}", "\n\n")?;
    p.map("trim", |text| text.trim().to_string());

    Ok(p)
}

pub fn pipeline() -> &'static Pipeline {
    &PIPELINE
}

/// Blank input yields an empty string.
pub fn html_to_markdown(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    PIPELINE.run(html)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlToMarkdown;

impl Convert for HtmlToMarkdown {
    fn convert(&self, input: &str) -> Result<String, ConvertError> {
        Ok(html_to_markdown(input))
    }
}
