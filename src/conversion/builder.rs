use thiserror::Error;

use crate::core::alignment::{AlignedPair, AlignmentCandidate, AlignmentStats};
use crate::core::cigar::OpKind;
use crate::core::record::SourceAlignmentRecord;
use crate::core::reference::ReferenceSequence;
use crate::core::types::Orientation;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Record has no alignment start")]
    MissingAlignmentStart,

    #[error("Record has no sequence")]
    MissingSequence,

    #[error("Record has no CIGAR")]
    EmptyCigar,

    #[error("CIGAR operation '{0}' cannot be expanded into a single alignment")]
    UnsupportedOperation(char),

    #[error("CIGAR reaches reference position {end}, past the reference end ({length})")]
    ReferenceOutOfBounds { end: usize, length: usize },

    #[error("CIGAR needs {consumed} query bases but the sequence has only {length}")]
    QueryOutOfBounds { consumed: usize, length: usize },

    #[error("CIGAR consumes {consumed} query bases but the sequence has {length}")]
    QueryLengthMismatch { consumed: usize, length: usize },
}

/// The result of walking a CIGAR against its reference.
///
/// All positions are 0-based and half-open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub pair: AlignedPair,

    /// Clipped bases (soft and hard) before the first aligned base
    pub query_start: usize,
    /// Bases of the query that take part in the alignment
    pub query_aligned: usize,
    /// Clipped bases plus aligned bases
    pub query_length: usize,

    pub target_start: usize,
    /// Reference bases consumed by the alignment
    pub target_aligned: usize,
}

/// Turns a record's CIGAR into explicit gapped sequences
pub trait CigarExpander {
    /// # Errors
    ///
    /// Returns a `BuildError` if the CIGAR does not fit the record's sequence
    /// or the reference.
    fn expand(
        &self,
        record: &SourceAlignmentRecord,
        reference: &[u8],
    ) -> Result<Expansion, BuildError>;
}

/// Walks the CIGAR one operation at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct CigarWalker;

impl CigarExpander for CigarWalker {
    fn expand(
        &self,
        record: &SourceAlignmentRecord,
        reference: &[u8],
    ) -> Result<Expansion, BuildError> {
        let start = record
            .alignment_start
            .and_then(|pos| pos.checked_sub(1))
            .ok_or(BuildError::MissingAlignmentStart)?;
        if record.cigar.is_empty() {
            return Err(BuildError::EmptyCigar);
        }
        let sequence = record.sequence.as_slice();
        if sequence.is_empty() {
            return Err(BuildError::MissingSequence);
        }

        let query_slice = |from: usize, len: usize| {
            from.checked_add(len)
                .and_then(|end| sequence.get(from..end))
                .ok_or(BuildError::QueryOutOfBounds {
                    consumed: from.saturating_add(len),
                    length: sequence.len(),
                })
        };
        let target_slice = |from: usize, len: usize| {
            from.checked_add(len)
                .and_then(|end| reference.get(from..end))
                .ok_or(BuildError::ReferenceOutOfBounds {
                    end: from.saturating_add(len),
                    length: reference.len(),
                })
        };

        let mut pair = AlignedPair::with_capacity(sequence.len());
        let mut leading_clip: usize = 0;
        let mut trailing_clip: usize = 0;
        let mut query_aligned: usize = 0;
        let mut seen_aligned = false;
        let mut q = 0;
        let mut t = start;

        // Every slice below is in bounds, so `q + len` and `t + len` cannot overflow
        for op in record.cigar.ops() {
            let len = op.len;
            match op.kind {
                OpKind::SoftClip | OpKind::HardClip => {
                    if seen_aligned {
                        trailing_clip = trailing_clip.saturating_add(len);
                    } else {
                        leading_clip = leading_clip.saturating_add(len);
                    }
                    if op.kind == OpKind::SoftClip {
                        query_slice(q, len)?;
                        q += len;
                    }
                }
                OpKind::Match | OpKind::SequenceMatch | OpKind::SequenceMismatch => {
                    seen_aligned = true;
                    pair.push_aligned(query_slice(q, len)?, target_slice(t, len)?);
                    q += len;
                    t += len;
                    query_aligned += len;
                }
                OpKind::Insertion => {
                    seen_aligned = true;
                    pair.push_insertion(query_slice(q, len)?);
                    q += len;
                    query_aligned += len;
                }
                OpKind::Deletion => {
                    seen_aligned = true;
                    pair.push_deletion(target_slice(t, len)?);
                    t += len;
                }
                OpKind::Skip | OpKind::Pad => {
                    return Err(BuildError::UnsupportedOperation(op.kind.as_char()));
                }
            }
        }

        if q != sequence.len() {
            return Err(BuildError::QueryLengthMismatch {
                consumed: q,
                length: sequence.len(),
            });
        }

        Ok(Expansion {
            pair,
            query_start: leading_clip,
            query_aligned,
            query_length: leading_clip
                .saturating_add(query_aligned)
                .saturating_add(trailing_clip),
            target_start: start,
            target_aligned: t - start,
        })
    }
}

/// Builds [`AlignmentCandidate`]s with the reference kept on the forward strand.
///
/// The SEQ of a reverse-strand record is already the reverse complement of
/// the read, so the expanded query is reported as-is on the reverse strand,
/// with query coordinates counted along that strand.
#[derive(Debug, Clone, Default)]
pub struct CandidateBuilder<E = CigarWalker> {
    expander: E,
}

impl CandidateBuilder<CigarWalker> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: CigarExpander> CandidateBuilder<E> {
    pub fn with_expander(expander: E) -> Self {
        Self { expander }
    }

    /// Build the candidate for one admitted record; statistics are left empty.
    ///
    /// # Errors
    ///
    /// Returns a `BuildError` if the CIGAR cannot be expanded.
    pub fn build(
        &self,
        record: &SourceAlignmentRecord,
        reference: &ReferenceSequence,
        target_name: &str,
    ) -> Result<AlignmentCandidate, BuildError> {
        let expansion = self.expander.expand(record, &reference.sequence)?;
        debug_assert_eq!(expansion.pair.query.len(), expansion.pair.target.len());

        Ok(AlignmentCandidate {
            query_name: record.query_name.clone(),
            target_name: target_name.to_string(),
            orientation: Orientation::keep_reference_forward(record.is_reverse_complemented()),
            query_start: expansion.query_start,
            query_end: expansion.query_start + expansion.query_aligned,
            query_length: expansion.query_length,
            target_start: expansion.target_start,
            target_end: expansion.target_start + expansion.target_aligned,
            target_length: reference.len(),
            aligned: expansion.pair,
            stats: AlignmentStats::default(),
            mapping_quality: record.mapping_quality,
        })
    }
}
