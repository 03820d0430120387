// Edit operations, backtracking and summary counts.

use serde::Serialize;

use crate::lcs::{LcsTable, LineSequence};

/// One line of diff output. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
    /// Line present in both texts.
    Equal {
        line_a: usize,
        line_b: usize,
        text: String,
    },
    /// Line only in the new text.
    Add { line_b: usize, text: String },
    /// Line only in the original text.
    Remove { line_a: usize, text: String },
}

impl EditOp {
    pub fn text(&self) -> &str {
        match self {
            EditOp::Equal { text, .. } | EditOp::Add { text, .. } | EditOp::Remove { text, .. } => {
                text.as_str()
            }
        }
    }

    /// Gutter marker: `' '`, `'+'` or `'-'`.
    pub fn marker(&self) -> char {
        match self {
            EditOp::Equal { .. } => ' ',
            EditOp::Add { .. } => '+',
            EditOp::Remove { .. } => '-',
        }
    }

    pub fn line_a(&self) -> Option<usize> {
        match self {
            EditOp::Equal { line_a, .. } | EditOp::Remove { line_a, .. } => Some(*line_a),
            EditOp::Add { .. } => None,
        }
    }

    pub fn line_b(&self) -> Option<usize> {
        match self {
            EditOp::Equal { line_b, .. } | EditOp::Add { line_b, .. } => Some(*line_b),
            EditOp::Remove { .. } => None,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, EditOp::Equal { .. })
    }
}

/// Walk the table from `(m, n)` back to the origin.
///
/// On a tie (`cell(i, j-1) >= cell(i-1, j)`) the walk emits `Add` first, so in
/// the final top-to-bottom order a removal sorts before the insertion that
/// replaces it.
pub fn backtrack(a: &LineSequence<'_>, b: &LineSequence<'_>, table: &LcsTable) -> DiffResult {
    let mut ops = Vec::with_capacity(a.len() + b.len());
    let mut i = a.len();
    let mut j = b.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            ops.push(EditOp::Equal {
                line_a: i,
                line_b: j,
                text: a[i - 1].to_string(),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.cell(i, j - 1) >= table.cell(i - 1, j)) {
            ops.push(EditOp::Add {
                line_b: j,
                text: b[j - 1].to_string(),
            });
            j -= 1;
        } else {
            ops.push(EditOp::Remove {
                line_a: i,
                text: a[i - 1].to_string(),
            });
            i -= 1;
        }
    }

    ops.reverse();
    DiffResult { ops }
}

/// Ordered edit script. Dropping `Add` ops reproduces the original lines and
/// dropping `Remove` ops reproduces the new lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DiffResult {
    ops: Vec<EditOp>,
}

impl DiffResult {
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats::from_ops(&self.ops)
    }

    /// True when every op is `Equal`.
    pub fn is_unchanged(&self) -> bool {
        self.ops.iter().all(EditOp::is_equal)
    }

    /// Lines of the original text, in order.
    pub fn original_lines(&self) -> impl Iterator<Item = &str> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Add { .. }))
            .map(EditOp::text)
    }

    /// Lines of the modified text, in order.
    pub fn modified_lines(&self) -> impl Iterator<Item = &str> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Remove { .. }))
            .map(EditOp::text)
    }
}

impl<'r> IntoIterator for &'r DiffResult {
    type Item = &'r EditOp;
    type IntoIter = std::slice::Iter<'r, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Derived counts for summary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn from_ops(ops: &[EditOp]) -> Self {
        let mut stats = Self::default();
        for op in ops {
            match op {
                EditOp::Equal { .. } => stats.unchanged += 1,
                EditOp::Add { .. } => stats.added += 1,
                EditOp::Remove { .. } => stats.removed += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.unchanged
    }

    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}
