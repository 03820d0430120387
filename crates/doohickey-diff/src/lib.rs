// doohickey-diff: line-level diff using LCS (Longest Common Subsequence).
//
// split -> LcsTable::build -> backtrack -> DiffResult (+ DiffStats, render models)

pub mod lcs;
pub mod ops;
pub mod render;

mod tests;

pub use lcs::{LcsTable, LineSequence};
pub use ops::{backtrack, DiffResult, DiffStats, EditOp};
pub use render::{gutter_lines, render_unified, side_by_side, GutterLine, SideBySideRow};

/// Compute a line diff between an original and a modified text.
/// Every call builds and drops its own table; nothing is cached.
pub fn diff(original: &str, modified: &str) -> DiffResult {
    let a = LineSequence::split(original);
    let b = LineSequence::split(modified);
    let table = LcsTable::build(&a, &b);
    backtrack(&a, &b, &table)
}

/// LCS length of the two texts' lines, computed without backtracking.
pub fn lcs_length(original: &str, modified: &str) -> u32 {
    let a = LineSequence::split(original);
    let b = LineSequence::split(modified);
    LcsTable::build(&a, &b).lcs_len()
}

/// Counts for a list of ops.
pub fn stats(ops: &[EditOp]) -> DiffStats {
    DiffStats::from_ops(ops)
}
