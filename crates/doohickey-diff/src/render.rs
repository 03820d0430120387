// Display models for a diff: gutter lines and side-by-side rows.

use serde::Serialize;

use crate::ops::EditOp;

/// Shown in place of an empty line so it does not collapse visually.
pub const EMPTY_LINE_PLACEHOLDER: &str = "\u{00A0}";

/// One rendered row of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GutterLine<'a> {
    pub marker: char,
    pub line_a: Option<usize>,
    pub line_b: Option<usize>,
    pub text: &'a str,
}

impl GutterLine<'_> {
    /// `"<marker> <text>"`.
    pub fn to_plain(&self) -> String {
        format!("{} {}", self.marker, self.text)
    }
}

fn display_text(text: &str) -> &str {
    if text.is_empty() {
        EMPTY_LINE_PLACEHOLDER
    } else {
        text
    }
}

pub fn gutter_lines(ops: &[EditOp]) -> Vec<GutterLine<'_>> {
    ops.iter()
        .map(|op| GutterLine {
            marker: op.marker(),
            line_a: op.line_a(),
            line_b: op.line_b(),
            text: display_text(op.text()),
        })
        .collect()
}

/// A paired row for side-by-side display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBySideRow<'a> {
    pub left: Option<&'a EditOp>,
    pub right: Option<&'a EditOp>,
}

/// Pair ops for side-by-side rendering.
/// Equal ops appear on both sides. A run of removals is paired row by row with
/// the run of additions that directly follows it.
pub fn side_by_side(ops: &[EditOp]) -> Vec<SideBySideRow<'_>> {
    let mut result = Vec::new();
    let mut i = 0;
    while i < ops.len() {
        match &ops[i] {
            EditOp::Equal { .. } => {
                result.push(SideBySideRow {
                    left: Some(&ops[i]),
                    right: Some(&ops[i]),
                });
                i += 1;
            }
            EditOp::Remove { .. } => {
                let mut removed = Vec::new();
                while i < ops.len() && matches!(&ops[i], EditOp::Remove { .. }) {
                    removed.push(&ops[i]);
                    i += 1;
                }
                let mut added = Vec::new();
                while i < ops.len() && matches!(&ops[i], EditOp::Add { .. }) {
                    added.push(&ops[i]);
                    i += 1;
                }
                let max_len = removed.len().max(added.len());
                for j in 0..max_len {
                    result.push(SideBySideRow {
                        left: removed.get(j).copied(),
                        right: added.get(j).copied(),
                    });
                }
            }
            EditOp::Add { .. } => {
                result.push(SideBySideRow {
                    left: None,
                    right: Some(&ops[i]),
                });
                i += 1;
            }
        }
    }
    result
}

/// Plain-text unified rendering, one gutter line per op.
pub fn render_unified(ops: &[EditOp]) -> String {
    gutter_lines(ops)
        .iter()
        .map(GutterLine::to_plain)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff;

    #[test]
    fn gutter_markers_and_placeholder() {
        let result = diff("a\n\nb", "a\n\nc");
        let lines = gutter_lines(result.ops());
        let markers: Vec<char> = lines.iter().map(|l| l.marker).collect();
        assert_eq!(markers, vec![' ', ' ', '-', '+']);
        assert_eq!(lines[1].text, EMPTY_LINE_PLACEHOLDER);
        assert_eq!(lines[1].line_a, Some(2));
        assert_eq!(lines[1].line_b, Some(2));
        assert_eq!(lines[2].line_b, None);
        assert_eq!(lines[3].line_a, None);
    }

    #[test]
    fn unified_text() {
        let result = diff("keep\nold", "keep\nnew");
        assert_eq!(render_unified(result.ops()), "  keep\n- old\n+ new");
    }

    #[test]
    fn side_by_side_pairs_replacements() {
        let result = diff("a\nb\nc\nd", "a\nx\ny\nz\nd");
        let rows = side_by_side(result.ops());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].left.map(EditOp::text), Some("a"));
        assert_eq!(rows[0].right.map(EditOp::text), Some("a"));
        assert_eq!(rows[1].left.map(EditOp::text), Some("b"));
        assert_eq!(rows[1].right.map(EditOp::text), Some("x"));
        assert_eq!(rows[2].left.map(EditOp::text), Some("c"));
        assert_eq!(rows[2].right.map(EditOp::text), Some("y"));
        assert_eq!(rows[3].left, None);
        assert_eq!(rows[3].right.map(EditOp::text), Some("z"));
        assert_eq!(rows[4].left.map(EditOp::text), Some("d"));
    }

    #[test]
    fn side_by_side_lone_addition() {
        let result = diff("", "new");
        let rows = side_by_side(result.ops());
        // "" vs "new": one Remove of the empty line, one Add
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].left.map(EditOp::text), Some(""));
        assert_eq!(rows[0].right.map(EditOp::text), Some("new"));
    }
}
