#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::{diff, lcs_length, stats, DiffStats, EditOp};

    fn eq(line_a: usize, line_b: usize, text: &str) -> EditOp {
        EditOp::Equal {
            line_a,
            line_b,
            text: text.to_string(),
        }
    }

    fn add(line_b: usize, text: &str) -> EditOp {
        EditOp::Add {
            line_b,
            text: text.to_string(),
        }
    }

    fn remove(line_a: usize, text: &str) -> EditOp {
        EditOp::Remove {
            line_a,
            text: text.to_string(),
        }
    }

    /// Top-down memoized LCS over suffixes, independent of LcsTable.
    fn reference_lcs(a: &[&str], b: &[&str]) -> usize {
        fn go<'s>(
            a: &[&'s str],
            b: &[&'s str],
            i: usize,
            j: usize,
            memo: &mut HashMap<(usize, usize), usize>,
        ) -> usize {
            if i == a.len() || j == b.len() {
                return 0;
            }
            if let Some(&v) = memo.get(&(i, j)) {
                return v;
            }
            let v = if a[i] == b[j] {
                1 + go(a, b, i + 1, j + 1, memo)
            } else {
                go(a, b, i + 1, j, memo).max(go(a, b, i, j + 1, memo))
            };
            memo.insert((i, j), v);
            v
        }
        go(a, b, 0, 0, &mut HashMap::new())
    }

    fn random_text(rng: &mut StdRng) -> String {
        const ALPHABET: [&str; 5] = ["a", "b", "c", "", "  d"];
        let len = rng.gen_range(0..12);
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_pairs() -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = vec![
            ("".into(), "".into()),
            ("".into(), "x\ny".into()),
            ("x\ny".into(), "".into()),
            ("x\ny".into(), "y\nx".into()),
            ("line1\nline2\nline3".into(), "line1\nlineX\nline3".into()),
            ("a\r\nb".into(), "a\nb".into()),
            ("same\nsame\nsame".into(), "same".into()),
            ("\n\n".into(), "\n".into()),
        ];
        let mut rng = StdRng::seed_from_u64(0x00dd_c0de);
        for _ in 0..200 {
            pairs.push((random_text(&mut rng), random_text(&mut rng)));
        }
        pairs
    }

    // ──────────────────────────────────────────
    // Properties over many inputs
    // ──────────────────────────────────────────

    #[test]
    fn test_reconstructs_both_inputs() {
        for (a, b) in sample_pairs() {
            let result = diff(&a, &b);
            let original: Vec<&str> = result.original_lines().collect();
            let modified: Vec<&str> = result.modified_lines().collect();
            assert_eq!(original, a.split('\n').collect::<Vec<_>>(), "A = {a:?}, B = {b:?}");
            assert_eq!(modified, b.split('\n').collect::<Vec<_>>(), "A = {a:?}, B = {b:?}");
        }
    }

    #[test]
    fn test_equal_count_is_lcs_length() {
        for (a, b) in sample_pairs() {
            let a_lines: Vec<&str> = a.split('\n').collect();
            let b_lines: Vec<&str> = b.split('\n').collect();
            let expected = reference_lcs(&a_lines, &b_lines);
            let result = diff(&a, &b);
            let equals = result.iter().filter(|op| op.is_equal()).count();
            assert_eq!(equals, expected, "A = {a:?}, B = {b:?}");
            assert_eq!(lcs_length(&a, &b) as usize, expected);
        }
    }

    #[test]
    fn test_line_numbers_are_one_based_and_increasing() {
        for (a, b) in sample_pairs() {
            let result = diff(&a, &b);
            let line_a: Vec<usize> = result.iter().filter_map(EditOp::line_a).collect();
            let line_b: Vec<usize> = result.iter().filter_map(EditOp::line_b).collect();
            assert_eq!(line_a, (1..=a.split('\n').count()).collect::<Vec<_>>());
            assert_eq!(line_b, (1..=b.split('\n').count()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_stats_are_consistent() {
        for (a, b) in sample_pairs() {
            let result = diff(&a, &b);
            let s = result.stats();
            assert_eq!(s.total(), result.len());
            let count = |f: fn(&EditOp) -> bool| result.iter().filter(|op| f(op)).count();
            assert_eq!(s.added, count(|op| matches!(op, EditOp::Add { .. })));
            assert_eq!(s.removed, count(|op| matches!(op, EditOp::Remove { .. })));
            assert_eq!(s.unchanged, count(|op| matches!(op, EditOp::Equal { .. })));
            assert_eq!(stats(result.ops()), s);
        }
    }

    #[test]
    fn test_op_count_is_bounded_by_line_counts() {
        for (a, b) in sample_pairs() {
            let m = a.split('\n').count();
            let n = b.split('\n').count();
            assert!(diff(&a, &b).len() <= m + n);
        }
    }

    // ──────────────────────────────────────────
    // Identical and empty inputs
    // ──────────────────────────────────────────

    #[test]
    fn test_identical_inputs_are_all_equal() {
        let text = "fn main() {\n    println!(\"hi\");\n\n}";
        let result = diff(text, text);
        assert!(result.is_unchanged());
        let expected: Vec<EditOp> = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| eq(i + 1, i + 1, line))
            .collect();
        assert_eq!(result.ops(), expected.as_slice());
    }

    #[test]
    fn test_both_empty_is_single_empty_equal() {
        let result = diff("", "");
        assert_eq!(result.ops(), &[eq(1, 1, "")]);
        assert_eq!(
            result.stats(),
            DiffStats {
                added: 0,
                removed: 0,
                unchanged: 1
            }
        );
    }

    #[test]
    fn test_empty_original_is_all_additions_of_new_lines() {
        // The empty original still splits to one empty line, which is removed.
        let result = diff("", "one\ntwo");
        assert_eq!(
            result.ops(),
            &[remove(1, ""), add(1, "one"), add(2, "two")]
        );
        let additions: Vec<&EditOp> = result
            .iter()
            .filter(|op| matches!(op, EditOp::Add { .. }))
            .collect();
        assert_eq!(additions, vec![&add(1, "one"), &add(2, "two")]);
    }

    #[test]
    fn test_empty_modified_is_all_removals() {
        let result = diff("one\ntwo", "");
        assert_eq!(
            result.ops(),
            &[remove(1, "one"), remove(2, "two"), add(1, "")]
        );
    }

    #[test]
    fn test_empty_line_in_both_matches() {
        let result = diff("x\n", "x\n");
        assert_eq!(result.ops(), &[eq(1, 1, "x"), eq(2, 2, "")]);
    }

    // ──────────────────────────────────────────
    // Tie-break
    // ──────────────────────────────────────────

    #[test]
    fn test_swap_follows_add_first_backtracking() {
        let result = diff("x\ny", "y\nx");
        assert_eq!(
            result.ops(),
            &[remove(1, "x"), eq(2, 1, "y"), add(2, "x")]
        );
    }

    #[test]
    fn test_single_line_replacement_removes_before_adding() {
        let result = diff("line1\nline2\nline3", "line1\nlineX\nline3");
        assert_eq!(
            result.ops(),
            &[
                eq(1, 1, "line1"),
                remove(2, "line2"),
                add(2, "lineX"),
                eq(3, 3, "line3"),
            ]
        );
        let s = result.stats();
        assert_eq!((s.added, s.removed, s.unchanged), (1, 1, 2));
        assert_eq!(lcs_length("line1\nline2\nline3", "line1\nlineX\nline3"), 2);
    }

    #[test]
    fn test_block_replacement_groups_removals_then_additions() {
        let result = diff("a\nb\nc", "x\ny\nz");
        assert_eq!(
            result.ops(),
            &[
                remove(1, "a"),
                remove(2, "b"),
                remove(3, "c"),
                add(1, "x"),
                add(2, "y"),
                add(3, "z"),
            ]
        );
    }

    #[test]
    fn test_carriage_returns_are_content() {
        let result = diff("a\r\nb", "a\nb");
        assert_eq!(
            result.ops(),
            &[remove(1, "a\r"), add(1, "a"), eq(2, 2, "b")]
        );
    }

    // ──────────────────────────────────────────
    // Serialization
    // ──────────────────────────────────────────

    #[test]
    fn test_json_shape_is_tagged() {
        let result = diff("a", "b");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"op": "remove", "line_a": 1, "text": "a"},
                {"op": "add", "line_b": 1, "text": "b"},
            ])
        );
        let stats = serde_json::to_value(result.stats()).unwrap();
        assert_eq!(
            stats,
            serde_json::json!({"added": 1, "removed": 1, "unchanged": 0})
        );
    }
}
