//! Sequence similarity ratio for fuzzy title matching.
//!
//! Ratcliff/Obershelp "gestalt" matching: find the longest common block,
//! recurse on the unmatched pieces to its left and right, and score
//! `2 * matched / (len(a) + len(b))`. Operates on Unicode scalar values.
//! There is no junk heuristic, so the result depends only on the two inputs.

/// Similarity of `a` and `b` in `[0.0, 1.0]`. Two empty strings score 1.0.
///
/// Not strictly symmetric: when several longest blocks tie, the one that
/// starts earliest in `a` wins, which can change how the remainder splits.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total size of all matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`. Among blocks of maximal size, the one starting
/// earliest in `a` wins, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let width = bhi - blo;
    // run[k] = length of the common run ending at a[i-1], b[blo+k-1]
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            if a[i] == b[j] {
                curr[k] = prev[k - 1] + 1;
                if curr[k] > best_size {
                    best_size = curr[k];
                    best_i = i + 1 - best_size;
                    best_j = j + 1 - best_size;
                }
            } else {
                curr[k] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
#[path = "tests/similarity_tests.rs"]
mod tests;
