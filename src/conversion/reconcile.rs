use crate::core::alignment::AlignmentCandidate;
use crate::core::record::SourceAlignmentRecord;

/// Carry the fields SAM holds authoritatively over onto the candidate.
///
/// - score: always the aligner's `AS` score
/// - mapping quality: always the record's `MAPQ`
/// - query length: the `XQ` length when present and non-zero, since SAM only
///   holds the (possibly clipped) aligned read
pub fn reconcile(
    mut candidate: AlignmentCandidate,
    record: &SourceAlignmentRecord,
) -> AlignmentCandidate {
    candidate.stats.score = record.alignment_score;
    candidate.mapping_quality = record.mapping_quality;

    if let Some(length) = record.original_query_length.filter(|&n| n != 0) {
        candidate.query_length = length;
    }

    candidate
}
