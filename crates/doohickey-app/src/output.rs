// Terminal rendering of tool results. Every function returns a String so the
// caller decides where it goes.

use crossterm::style::{Color, Stylize};

use doohickey_color::{ColorFormats, ContrastReport};
use doohickey_core::{is_error_sentinel, Capabilities, Rgb, ToolId};
use doohickey_diff::{gutter_lines, side_by_side, DiffStats, EditOp};
use doohickey_text::TextStats;

const SIDE_BY_SIDE_MAX_WIDTH: usize = 60;

/// Applies crossterm styles, or passes text through when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dim().to_string()
        } else {
            text.to_string()
        }
    }

    /// A `■` swatch in the color itself.
    pub fn swatch(&self, color: Rgb) -> String {
        if self.enabled {
            "■■"
                .with(Color::Rgb {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                })
                .to_string()
        } else {
            String::new()
        }
    }

    fn marker_color(marker: char) -> Option<Color> {
        match marker {
            '+' => Some(Color::Green),
            '-' => Some(Color::Red),
            _ => None,
        }
    }

    fn paint_marked(&self, marker: char, text: &str) -> String {
        match Self::marker_color(marker) {
            Some(color) => self.paint(text, color),
            None => text.to_string(),
        }
    }
}

fn line_no(n: Option<usize>) -> String {
    n.map_or_else(|| "    ".to_string(), |n| format!("{n:>4}"))
}

/// Converter output, or the sentinel line in red.
pub fn converter_line(styler: &Styler, output: &str) -> String {
    if is_error_sentinel(output) {
        styler.paint(output, Color::Red)
    } else {
        output.to_string()
    }
}

// ──────────────────────────────────────────────
// Diff
// ──────────────────────────────────────────────

pub fn diff_summary(styler: &Styler, stats: &DiffStats) -> String {
    if !stats.has_changes() {
        return styler.dim(&format!("No differences ({} lines)", stats.unchanged));
    }
    format!(
        "{} {} {}",
        styler.paint(&format!("+{}", stats.added), Color::Green),
        styler.paint(&format!("-{}", stats.removed), Color::Red),
        styler.dim(&format!("={}", stats.unchanged)),
    )
}

/// One row per op: marker, original line number, modified line number, text.
pub fn diff_gutter(styler: &Styler, ops: &[EditOp]) -> String {
    gutter_lines(ops)
        .iter()
        .map(|line| {
            let numbers = styler.dim(&format!("{} {}", line_no(line.line_a), line_no(line.line_b)));
            let body = format!("{} {}", line.marker, line.text);
            format!("{numbers} │ {}", styler.paint_marked(line.marker, &body))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn side_cell(op: Option<&EditOp>, number: fn(&EditOp) -> Option<usize>) -> (char, String, String) {
    match op {
        Some(op) => (op.marker(), line_no(number(op)), op.text().to_string()),
        None => (' ', line_no(None), String::new()),
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        format!("{text}{}", " ".repeat(width - count))
    }
}

pub fn diff_side_by_side(styler: &Styler, ops: &[EditOp]) -> String {
    let rows = side_by_side(ops);
    let width = rows
        .iter()
        .filter_map(|row| row.left.map(|op| op.text().chars().count()))
        .max()
        .unwrap_or(0)
        .clamp(1, SIDE_BY_SIDE_MAX_WIDTH);

    rows.iter()
        .map(|row| {
            let (lm, ln, lt) = side_cell(row.left, EditOp::line_a);
            let (rm, rn, rt) = side_cell(row.right, EditOp::line_b);
            // Equal rows show no marker on either side.
            let left = format!("{} {}", if lm == '+' { ' ' } else { lm }, fit(&lt, width));
            let right = format!("{} {}", if rm == '-' { ' ' } else { rm }, rt);
            format!(
                "{} {} │ {} {}",
                styler.dim(&ln),
                styler.paint_marked(lm, &left),
                styler.dim(&rn),
                styler.paint_marked(rm, &right),
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ──────────────────────────────────────────────
// Color
// ──────────────────────────────────────────────

pub fn color_table(styler: &Styler, color: Rgb, formats: &ColorFormats) -> String {
    let mut out = Vec::new();
    let swatch = styler.swatch(color);
    if !swatch.is_empty() {
        out.push(swatch);
    }
    for (label, value) in formats.rows() {
        out.push(format!("{}  {value}", styler.bold(&format!("{label:<5}"))));
    }
    out.join("\n")
}

fn verdict(styler: &Styler, pass: bool) -> String {
    if pass {
        styler.paint("Pass", Color::Green)
    } else {
        styler.paint("Fail", Color::Red)
    }
}

pub fn contrast_report(styler: &Styler, report: &ContrastReport) -> String {
    let rows = [
        ("AA normal text", report.aa_normal),
        ("AA large text", report.aa_large),
        ("AAA normal text", report.aaa_normal),
        ("AAA large text", report.aaa_large),
        ("UI components", report.ui_components),
    ];
    let mut out = vec![format!(
        "{} on {}  {}",
        report.foreground,
        report.background,
        styler.bold(&format!("{}:1", report.ratio_label()))
    )];
    for (label, pass) in rows {
        out.push(format!("{label:<16} {}", verdict(styler, pass)));
    }
    out.join("\n")
}

pub fn palette_list(styler: &Styler, colors: &[Rgb]) -> String {
    colors
        .iter()
        .map(|color| {
            let swatch = styler.swatch(*color);
            if swatch.is_empty() {
                color.to_hex()
            } else {
                format!("{swatch} {}", color.to_hex())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ──────────────────────────────────────────────
// Text
// ──────────────────────────────────────────────

pub fn text_stats(styler: &Styler, stats: &TextStats) -> String {
    [
        ("Characters", stats.chars),
        ("Words", stats.words),
        ("Lines", stats.lines),
        ("Sentences", stats.sentences),
    ]
    .iter()
    .map(|(label, value)| format!("{} {value}", styler.bold(&format!("{label:<11}"))))
    .collect::<Vec<_>>()
    .join("\n")
}

// ──────────────────────────────────────────────
// Registry
// ──────────────────────────────────────────────

pub fn tool_list(styler: &Styler, caps: &Capabilities) -> String {
    let mut out = Vec::new();
    let mut category = None;
    for (tool, unlocked) in caps.registry() {
        if category != Some(tool.category()) {
            category = Some(tool.category());
            out.push(styler.bold(tool.category().label()));
        }
        out.push(format!("  {:<20} {}", tool.label(), badge(styler, tool, unlocked)));
    }
    out.join("\n")
}

pub fn tool_detail(styler: &Styler, caps: &Capabilities, tool: ToolId) -> String {
    let status = if caps.allows(tool) {
        styler.paint("unlocked", Color::Green)
    } else {
        styler.paint("locked (requires Pro)", Color::DarkGrey)
    };
    format!(
        "{} ({})\n  category  {}\n  status    {status}",
        styler.bold(tool.label()),
        tool.slug(),
        tool.category().label()
    )
}

fn badge(styler: &Styler, tool: ToolId, unlocked: bool) -> String {
    match (tool.requires_pro(), unlocked) {
        (false, _) => String::new(),
        (true, true) => styler.paint("PRO", Color::Yellow),
        (true, false) => styler.paint("PRO (locked)", Color::DarkGrey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doohickey_diff::diff;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_gutter_has_line_numbers() {
        let result = diff("keep\nold", "keep\nnew");
        assert_eq!(
            diff_gutter(&Styler::plain(), result.ops()),
            "   1    1 │   keep\n   2      │ - old\n        2 │ + new"
        );
    }

    #[test]
    fn plain_side_by_side_pairs_rows() {
        let result = diff("a\nbb\nc", "a\nxx\nc");
        assert_eq!(
            diff_side_by_side(&Styler::plain(), result.ops()),
            "   1   a  │    1   a\n   2 - bb │    2 + xx\n   3   c  │    3   c"
        );
    }

    #[test]
    fn summary_reports_counts() {
        let stats = diff("a\nb", "a\nc").stats();
        assert_eq!(diff_summary(&Styler::plain(), &stats), "+1 -1 =1");
        let same = diff("a", "a").stats();
        assert_eq!(diff_summary(&Styler::plain(), &same), "No differences (1 lines)");
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let styler = Styler::new(true);
        assert!(styler.paint("x", Color::Red).contains('\u{1b}'));
        assert_eq!(Styler::plain().paint("x", Color::Red), "x");
        assert_eq!(Styler::plain().swatch(Rgb::WHITE), "");
    }

    #[test]
    fn contrast_report_lists_every_rating() {
        let report = ContrastReport::new(Rgb::BLACK, Rgb::WHITE);
        let text = contrast_report(&Styler::plain(), &report);
        assert!(text.starts_with("#000000 on #FFFFFF  21.00:1"));
        assert_eq!(text.lines().count(), 6);
        assert!(text.lines().skip(1).all(|line| line.ends_with("Pass")));
    }

    #[test]
    fn color_table_rows() {
        let formats = ColorFormats::from_rgb(Rgb::WHITE);
        let table = color_table(&Styler::plain(), Rgb::WHITE, &formats);
        assert_eq!(table.lines().next(), Some("HEX    #FFFFFF"));
        assert_eq!(table.lines().count(), 7);
    }

    #[test]
    fn tool_list_marks_locked_tools() {
        let text = tool_list(&Styler::plain(), &Capabilities::free());
        assert!(text.contains("Diff Checker         PRO (locked)"));
        assert!(text.lines().any(|line| line == "Color"));
        let text = tool_list(&Styler::plain(), &Capabilities::pro());
        assert!(!text.contains("locked"));
    }

    #[test]
    fn tool_detail_shows_lock_state() {
        assert_eq!(
            tool_detail(&Styler::plain(), &Capabilities::free(), ToolId::DiffChecker),
            "Diff Checker (diff-checker)\n  category  Text\n  status    locked (requires Pro)"
        );
        assert!(tool_detail(&Styler::plain(), &Capabilities::pro(), ToolId::DiffChecker)
            .ends_with("status    unlocked"));
    }

    #[test]
    fn stats_block() {
        let stats = TextStats::of("one two");
        assert_eq!(
            text_stats(&Styler::plain(), &stats),
            "Characters  7\nWords       2\nLines       1\nSentences   1"
        );
    }
}
