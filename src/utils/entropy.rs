/// Shannon entropy for secret-rule gating
///
/// Rule-table rules may carry an `entropy` threshold; a candidate match
/// is only reported when its entropy meets it. High entropy indicates
/// cryptographic material rather than prose or identifiers.
use std::collections::HashMap;

/// Compute the Shannon entropy of a string: H(X) = -Σ(p(x) * log2(p(x)))
///
/// Typical values:
/// - "aaaaaaa" → ~0.0
/// - "abcdefg" → ~2.8
/// - random Base64 → ~5.0+
///
/// # Examples
/// ```
/// use pi_sentinel::utils::entropy::shannon_entropy;
///
/// assert!(shannon_entropy("aaaaaaa") < 1.0);
/// assert!(shannon_entropy("aK9$mP3zQ!vX2") > 3.5);
/// ```
pub fn shannon_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut frequencies: HashMap<char, usize> = HashMap::new();
    for c in text.chars() {
        *frequencies.entry(c).or_insert(0) += 1;
    }

    let len = text.chars().count() as f64;

    frequencies
        .values()
        .map(|&count| {
            let probability = count as f64 / len;
            -probability * probability.log2()
        })
        .sum()
}

/// Whether a string's entropy meets a threshold
pub fn is_high_entropy(text: &str, threshold: f64) -> bool {
    shannon_entropy(text) >= threshold
}
