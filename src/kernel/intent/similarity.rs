/// Gestalt (Ratcliff/Obershelp) similarity in [0, 1].
///
/// `2 * M / (|a| + |b|)`, where `M` counts the characters of the longest common
/// block plus, recursively, the blocks to its left and right. Identical strings
/// score 1.0, two empty strings too.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, k) = longest_block(a, b);
    if k == 0 {
        return 0;
    }
    k + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + k..], &b[j + k..])
}

/// Longest common contiguous block as (start in a, start in b, length).
/// Ties go to the block that ends first in `a`, then first in `b`.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // run[j + 1]: length of the common run ending at a[i], b[j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut run = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        for j in 0..b.len() {
            run[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            let k = run[j + 1];
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut run);
    }

    best
}
