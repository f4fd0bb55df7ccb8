use crate::core::alignment::{AlignedPair, AlignmentStats, GAP};

/// Convert usize to f64 for percentage calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Computes alignment statistics from an explicit aligned pair
pub trait PairScorer {
    fn score(&self, pair: &AlignedPair) -> AlignmentStats;
}

/// Column-by-column classification with a unit-cost edit distance as score.
///
/// The score is the number of non-matching columns. It is replaced by the
/// aligner's own score before output, so only the counts and identity matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnScorer;

impl PairScorer for ColumnScorer {
    fn score(&self, pair: &AlignedPair) -> AlignmentStats {
        debug_assert_eq!(pair.query.len(), pair.target.len());

        let mut stats = AlignmentStats::default();

        for (&q, &t) in pair.query.iter().zip(&pair.target) {
            match (q == GAP, t == GAP) {
                (false, false) if q.eq_ignore_ascii_case(&t) => stats.matches += 1,
                (false, false) => stats.mismatches += 1,
                (false, true) => stats.insertions += 1,
                (true, false) => stats.deletions += 1,
                (true, true) => {}
            }
        }

        let edits = stats.mismatches + stats.insertions + stats.deletions;
        stats.score = i64::try_from(edits).unwrap_or(i64::MAX);
        stats.percent_identity = percent_identity(stats.matches, stats.columns());
        stats
    }
}

/// `100 * matches / columns`, or 0 for an empty alignment
pub fn percent_identity(matches: usize, columns: usize) -> f64 {
    if columns == 0 {
        return 0.0;
    }
    100.0 * count_to_f64(matches) / count_to_f64(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(query: &str, target: &str) -> AlignedPair {
        AlignedPair {
            query: query.as_bytes().to_vec(),
            target: target.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_identical_pair() {
        let stats = ColumnScorer.score(&pair("ACGTACGT", "ACGTACGT"));
        assert_eq!(stats.matches, 8);
        assert_eq!(stats.mismatches, 0);
        assert_eq!(stats.insertions, 0);
        assert_eq!(stats.deletions, 0);
        assert_eq!(stats.score, 0);
        assert!((stats.percent_identity - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classifies_columns() {
        // match x3, mismatch, insertion x2, deletion, match
        let stats = ColumnScorer.score(&pair("ACGTAA-T", "ACGA--GT"));
        assert_eq!(stats.matches, 4);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.insertions, 2);
        assert_eq!(stats.deletions, 1);
        assert_eq!(stats.columns(), 8);
        assert_eq!(stats.score, 4);
        assert!((stats.percent_identity - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive_match() {
        let stats = ColumnScorer.score(&pair("acgt", "ACGT"));
        assert_eq!(stats.matches, 4);
    }

    #[test]
    fn test_empty_pair() {
        let stats = ColumnScorer.score(&AlignedPair::default());
        assert_eq!(stats.columns(), 0);
        assert!(stats.percent_identity.abs() < f64::EPSILON);
    }

    #[test]
    fn test_identity_bounds() {
        for (q, t) in [("A", "C"), ("AC", "A-"), ("-A", "GA"), ("AAAA", "AAAT")] {
            let identity = ColumnScorer.score(&pair(q, t)).percent_identity;
            assert!((0.0..=100.0).contains(&identity), "{q}/{t}: {identity}");
        }
    }
}
