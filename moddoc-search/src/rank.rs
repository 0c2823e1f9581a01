//! Fuzzy/substring text ranking for user queries.
//!
//! A candidate matches when its case-folded name contains the query, when
//! the normalized edit-distance similarity of name and query exceeds
//! [`SIMILARITY_THRESHOLD`], or when its docstring contains the query.
//! Docstrings get no fuzzy fallback; names are short and benefit from typo
//! tolerance, prose does not.

use crate::library::Node;

/// Similarity above this threshold counts as a fuzzy name match.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Classic Levenshtein edit distance over characters, unit costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // DP table of size (len(b)+1) x (len(a)+1)
    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            let substitution = if a[j - 1] == b[i - 1] { 0 } else { 1 };
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + substitution);
        }
    }

    table[b.len()][a.len()]
}

/// Normalized similarity: `1 - distance / max(len(a), len(b))`, in [0, 1].
pub fn similarity(a: &str, b: &str) -> f64 {
    let max = a.chars().count().max(b.chars().count());
    if max == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max as f64
}

/// Whether a candidate node matches the (already case-folded) query.
pub fn matches_query(node: Node<'_>, query: &str) -> bool {
    if let Some(name) = node.name() {
        let name = name.to_lowercase();
        if name.contains(query) || similarity(&name, query) > SIMILARITY_THRESHOLD {
            return true;
        }
    }

    // substring only, no fuzzy fallback for docstrings
    let doc = node.doc();
    !doc.is_empty() && doc.to_lowercase().contains(query)
}
