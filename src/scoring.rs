//! Probabilistic scoring model for full-text matches.
//!
//! All scores live in `[0, 1]`: 0 means no relevance, 1 maximal relevance.
//! Every combinator maps inputs in that range back into it. The functions are
//! total; callers supply non-negative lengths and counts.
//!
//! ```
//! use ftmark::scoring;
//!
//! let a = scoring::word(3, 12.0);
//! let b = scoring::word(5, 12.0);
//! let both = scoring::and(a, b);
//! assert!(both >= a.max(b) && both <= 1.0);
//! ```

/// Logarithmic factor of the word score, `e - 1`, so a full match scores 1.
pub const WORD_LOG_FACTOR: f64 = std::f64::consts::E - 1.0;

/// Attenuation applied per structural step.
pub const STEP_FACTOR: f64 = 0.8;

/// Score of a word match when no index score is available.
///
/// `min(1, ln(1 + (e - 1) * matched / total))`. Saturates at 1 once the match
/// covers the whole text; an empty text scores 0.
pub fn word(matched_len: usize, total_len: f64) -> f64 {
    if total_len <= 0.0 {
        return 0.0;
    }
    (1.0 + WORD_LOG_FACTOR * matched_len as f64 / total_len)
        .ln()
        .min(1.0)
}

/// Combines two scores as a probabilistic union.
pub fn and(a: f64, b: f64) -> f64 {
    1.0 - (1.0 - a) * (1.0 - b)
}

/// Same as [`and`]; disjunctions accumulate evidence the same way.
pub fn or(a: f64, b: f64) -> f64 {
    and(a, b)
}

/// Inverts a score for negated full-text selections.
pub fn not(score: f64) -> f64 {
    1.0 - score
}

/// Average over a binding sequence, 0 for an empty one.
pub fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Score of a text node matched without index support.
///
/// `max(matched / index_size, ln(token_len * matched + 1) / ln(text_len + 1))`,
/// clamped to `[0, 1]`. Terms with a zero denominator contribute 0.
pub fn text_node(matched_positions: usize, index_size: usize, token_len: usize, text_len: usize) -> f64 {
    let ratio = if index_size == 0 {
        0.0
    } else {
        matched_positions as f64 / index_size as f64
    };
    let coverage = if text_len == 0 {
        0.0
    } else {
        (token_len as f64 * matched_positions as f64 + 1.0).ln() / (text_len as f64 + 1.0).ln()
    };
    ratio.max(coverage).clamp(0.0, 1.0)
}

/// Attenuates a score for one structural step.
pub fn step(score: f64) -> f64 {
    score * STEP_FACTOR
}

/// Applies [`step`] `steps` times.
pub fn decay(score: f64, steps: usize) -> f64 {
    (0..steps).fold(score, |s, _| step(s))
}

/// Folds a sequence of scores with [`and`]; 0 for an empty sequence.
pub fn combine_all<I>(scores: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    scores.into_iter().fold(0.0, and)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    const SAMPLES: [f64; 7] = [0.0, 0.05, 0.25, 0.5, 0.75, 0.99, 1.0];

    #[test]
    fn test_word_bounds_and_monotonicity() {
        let total = 20.0;
        let mut previous = word(0, total);
        assert_eq!(previous, 0.0);

        for matched in 1..=40 {
            let score = word(matched, total);
            assert!((0.0..=1.0).contains(&score));
            assert!(score >= previous, "not monotone at {matched}");
            previous = score;
        }
        assert!((word(20, total) - 1.0).abs() < EPS);
        assert_eq!(word(40, total), 1.0);
    }

    #[test]
    fn test_word_empty_text() {
        assert_eq!(word(0, 0.0), 0.0);
        assert_eq!(word(5, 0.0), 0.0);
    }

    #[test]
    fn test_and_or_laws() {
        for a in SAMPLES {
            assert!((and(a, 0.0) - a).abs() < EPS);
            assert!((and(a, 1.0) - 1.0).abs() < EPS);
            assert!((not(not(a)) - a).abs() < EPS);

            for b in SAMPLES {
                assert!((and(a, b) - and(b, a)).abs() < EPS);
                assert!((or(a, b) - and(a, b)).abs() < EPS);
                assert!((0.0..=1.0).contains(&and(a, b)));

                for c in SAMPLES {
                    assert!((and(and(a, b), c) - and(a, and(b, c))).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn test_average() {
        assert_eq!(average(1.5, 3), 0.5);
        assert_eq!(average(0.0, 0), 0.0);
    }

    #[test]
    fn test_text_node() {
        // all index entries matched
        assert_eq!(text_node(4, 4, 3, 100), 1.0);

        let score = text_node(1, 10, 4, 100);
        let expected = (5.0f64).ln() / (101.0f64).ln();
        assert!((score - expected).abs() < EPS);
        assert!(score > 0.1);

        assert_eq!(text_node(0, 0, 0, 0), 0.0);
        assert!((0.0..=1.0).contains(&text_node(50, 1, 1000, 3)));
    }

    #[test]
    fn test_text_node_large_counts() {
        let score = text_node(usize::MAX, usize::MAX, usize::MAX, usize::MAX);
        assert_eq!(score, 1.0);
        assert!((0.0..=1.0).contains(&text_node(usize::MAX / 2, 0, 3, 10)));
    }

    #[test]
    fn test_step_decay_converges() {
        let mut score = 1.0;
        let mut steps = 0;
        while score > 1e-6 {
            let next = step(score);
            assert!(next < score);
            score = next;
            steps += 1;
            assert!(steps < 100);
        }
        assert!((decay(1.0, steps) - score).abs() < EPS);
        assert_eq!(step(0.0), 0.0);
    }

    #[test]
    fn test_combine_all() {
        assert_eq!(combine_all(Vec::new()), 0.0);
        assert!((combine_all([0.5, 0.5]) - 0.75).abs() < EPS);
        assert!((combine_all([0.2, 1.0, 0.3]) - 1.0).abs() < EPS);
    }
}
