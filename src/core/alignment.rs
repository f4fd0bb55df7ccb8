use crate::core::types::Orientation;

/// Gap character in aligned sequences
pub const GAP: u8 = b'-';

/// Explicit gapped query and target strings of one alignment.
///
/// Both strings always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedPair {
    pub query: Vec<u8>,
    pub target: Vec<u8>,
}

impl AlignedPair {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            query: Vec::with_capacity(capacity),
            target: Vec::with_capacity(capacity),
        }
    }

    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn push_aligned(&mut self, query: &[u8], target: &[u8]) {
        debug_assert_eq!(query.len(), target.len());
        self.query.extend(query.iter().map(u8::to_ascii_uppercase));
        self.target.extend(target.iter().map(u8::to_ascii_uppercase));
    }

    /// Query bases against gaps in the target
    pub fn push_insertion(&mut self, query: &[u8]) {
        self.query.extend(query.iter().map(u8::to_ascii_uppercase));
        self.target.extend(std::iter::repeat(GAP).take(query.len()));
    }

    /// Target bases against gaps in the query
    pub fn push_deletion(&mut self, target: &[u8]) {
        self.query.extend(std::iter::repeat(GAP).take(target.len()));
        self.target.extend(target.iter().map(u8::to_ascii_uppercase));
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub score: i64,
    /// Percentage in `[0, 100]`
    pub percent_identity: f64,
}

impl AlignmentStats {
    pub fn columns(&self) -> usize {
        self.matches + self.mismatches + self.insertions + self.deletions
    }
}

/// One alignment in M4 terms: names, spans, strands and statistics.
///
/// Spans are 0-based and half-open.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentCandidate {
    pub query_name: String,
    pub target_name: String,
    pub orientation: Orientation,

    pub query_start: usize,
    pub query_end: usize,
    pub query_length: usize,

    pub target_start: usize,
    pub target_end: usize,
    pub target_length: usize,

    pub aligned: AlignedPair,
    pub stats: AlignmentStats,
    pub mapping_quality: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_pair_keeps_equal_lengths() {
        let mut pair = AlignedPair::default();
        pair.push_aligned(b"acgt", b"ACGA");
        pair.push_insertion(b"TT");
        pair.push_deletion(b"G");

        assert_eq!(pair.query, b"ACGTTT-".to_vec());
        assert_eq!(pair.target, b"ACGA--G".to_vec());
        assert_eq!(pair.len(), 7);
        assert_eq!(pair.query.len(), pair.target.len());
    }
}
