// Line splitting and the longest-common-subsequence table.

use std::ops::Index;

/// The lines of one input text, split on `\n` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSequence<'a> {
    lines: Vec<&'a str>,
}

impl<'a> LineSequence<'a> {
    /// Split `text` on `\n`. `\r` is kept as line content and an empty text
    /// yields one empty line.
    pub fn split(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.lines
    }
}

impl<'a> From<Vec<&'a str>> for LineSequence<'a> {
    fn from(lines: Vec<&'a str>) -> Self {
        Self { lines }
    }
}

impl<'a> Index<usize> for LineSequence<'a> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        self.lines[index]
    }
}

/// `cell(i, j)` is the LCS length of the first `i` lines of A and the first
/// `j` lines of B. Row 0 and column 0 are all zero.
///
/// Time and memory are O(m·n); callers own any input-size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    pub fn build(a: &LineSequence<'_>, b: &LineSequence<'_>) -> Self {
        let m = a.len();
        let n = b.len();
        let rows = m + 1;
        let cols = n + 1;
        log::debug!("building LCS table {}x{}", rows, cols);

        let mut cells = vec![0u32; rows * cols];
        for i in 1..=m {
            for j in 1..=n {
                cells[i * cols + j] = if a[i - 1] == b[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
            }
        }

        Self { rows, cols, cells }
    }

    /// Number of rows, `m + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `n + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    /// LCS length of the full sequences.
    pub fn lcs_len(&self) -> u32 {
        self.cell(self.rows - 1, self.cols - 1)
    }
}
