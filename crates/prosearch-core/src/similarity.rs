//! Gestalt pattern matching (Ratcliff/Obershelp)
//!
//! The ratio between two strings is built from their longest common
//! contiguous run: once that run is found, the same search is repeated on
//! the text to its left and to its right, and the lengths of all runs found
//! this way are summed. With `M` matched characters the ratio is
//! `2M / (len(a) + len(b))`.
//!
//! Comparison is case-insensitive and counts characters, not bytes.

use std::cmp::Ordering;
use std::collections::HashMap;

/// A run of `size` equal characters starting at `a_start` in the first
/// sequence and `b_start` in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Similarity ratio of two strings in `[0.0, 1.0]`
///
/// Both strings are lowercased first. Two empty strings score `0.0`.
///
/// The pair is matched in a canonical order (shorter first, equal lengths
/// ordered lexicographically) so the result does not depend on argument
/// order.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = lowercase_chars(a);
    let b = lowercase_chars(b);

    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    let (first, second) = canonical_order(&a, &b);
    let matched: usize = Matcher::new(first, second)
        .matching_blocks()
        .iter()
        .map(|m| m.size)
        .sum();

    2.0 * matched as f64 / total as f64
}

/// Matched runs between two strings, in argument order
///
/// Positions are character offsets into the lowercased inputs. Blocks are
/// sorted by position and never overlap.
pub fn matching_blocks(a: &str, b: &str) -> Vec<Match> {
    let a = lowercase_chars(a);
    let b = lowercase_chars(b);
    Matcher::new(&a, &b).matching_blocks()
}

fn lowercase_chars(s: &str) -> Vec<char> {
    // Per-char lowercasing loses context-dependent forms like final sigma
    s.to_lowercase().chars().collect()
}

fn canonical_order<'s>(a: &'s [char], b: &'s [char]) -> (&'s [char], &'s [char]) {
    match a.len().cmp(&b.len()).then_with(|| a.cmp(b)) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}

/// Longest-match search over a fixed pair of sequences.
///
/// `b` is indexed once (character -> ascending positions) so each search
/// only visits positions where the characters actually agree.
struct Matcher<'s> {
    a: &'s [char],
    b: &'s [char],
    b_index: HashMap<char, Vec<usize>>,
}

impl<'s> Matcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b_index.entry(c).or_default().push(j);
        }
        Self { a, b, b_index }
    }

    /// Longest common run within `a[alo..ahi]` and `b[blo..bhi]`
    ///
    /// Among runs of maximal length, returns the one starting earliest in
    /// `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut best = Match {
            a_start: alo,
            b_start: blo,
            size: 0,
        };

        // run length ending at b[j], for the previous row of a
        let mut run_ending: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_ending.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best.size {
                        best = Match {
                            a_start: i + 1 - k,
                            b_start: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            run_ending = next;
        }

        best
    }

    fn matching_blocks(&self) -> Vec<Match> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }

            let a_end = m.a_start + m.size;
            let b_end = m.b_start + m.size;
            if alo < m.a_start && blo < m.b_start {
                pending.push((alo, m.a_start, blo, m.b_start));
            }
            if a_end < ahi && b_end < bhi {
                pending.push((a_end, ahi, b_end, bhi));
            }
            blocks.push(m);
        }

        blocks.sort_by_key(|m| (m.a_start, m.b_start));
        blocks
    }
}
