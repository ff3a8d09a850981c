//! Token-level diff between the original clause and the suggested
//! template, as a sequence of opcodes over half-open token ranges.

use lexgraph_core::{DiffOp, DiffTag};

/// Compute opcodes transforming token sequence `a` into `b`.
///
/// Longest-common-subsequence matching; adjacent operations of the same
/// tag are coalesced, so the result reads like `equal / replace / insert /
/// delete` spans.
pub fn token_ops(a: &str, b: &str) -> Vec<DiffOp> {
    let at: Vec<&str> = a.split_whitespace().collect();
    let bt: Vec<&str> = b.split_whitespace().collect();
    let (n, m) = (at.len(), bt.len());

    if n == 0 && m == 0 {
        return Vec::new();
    }

    // LCS length table.
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if at[i] == bt[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops: Vec<DiffOp> = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let mut push = |tag: DiffTag, a_lo: usize, a_hi: usize, b_lo: usize, b_hi: usize| {
        if let Some(last) = ops.last_mut() {
            if last.tag == tag && last.a_hi == a_lo && last.b_hi == b_lo {
                last.a_hi = a_hi;
                last.b_hi = b_hi;
                return;
            }
        }
        ops.push(DiffOp { tag, a_lo, a_hi, b_lo, b_hi });
    };

    while i < n && j < m {
        if at[i] == bt[j] {
            push(DiffTag::Equal, i, i + 1, j, j + 1);
            i += 1;
            j += 1;
        } else {
            // Walk the mismatch region in both sequences at once so the
            // coalescer folds it into a single replace span.
            let a_start = i;
            let b_start = j;
            while i < n && j < m && at[i] != bt[j] {
                if lcs[i + 1][j] >= lcs[i][j + 1] {
                    i += 1;
                } else {
                    j += 1;
                }
            }
            if i > a_start && j > b_start {
                push(DiffTag::Replace, a_start, i, b_start, j);
            } else if i > a_start {
                push(DiffTag::Delete, a_start, i, b_start, j);
            } else {
                push(DiffTag::Insert, a_start, i, b_start, j);
            }
        }
    }
    if i < n {
        push(DiffTag::Delete, i, n, j, j);
    }
    if j < m {
        push(DiffTag::Insert, i, i, j, m);
    }
    ops
}
