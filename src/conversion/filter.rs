use serde::Serialize;

use crate::catalog::store::{CatalogError, ReferenceCatalog};
use crate::core::record::SourceAlignmentRecord;
use crate::core::reference::ReferenceSequence;
use crate::core::types::ReferenceNaming;

/// Why a record cannot be written as an M4 line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// RNAME is `*` or the unmapped flag is set
    Unmapped,
    /// The CIGAR contains a padding (`P`) operation
    Padding,
    /// The CIGAR splits into more than one aligned segment
    MultipleSegments,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmapped => write!(f, "record is unmapped"),
            Self::Padding => write!(f, "'P' in its cigar string is not supported"),
            Self::MultipleSegments => write!(f, "alignment has multiple segments"),
        }
    }
}

#[derive(Debug)]
pub enum Admission<'c> {
    Accept {
        reference: &'c ReferenceSequence,
        /// Name written to the M4 target column
        target_name: &'c str,
    },
    Skip(SkipReason),
}

/// Decide whether a record can be converted.
///
/// Checks run in order: unmapped, reference resolution, padding, segments.
///
/// # Errors
///
/// Returns `CatalogError::UnresolvedReference` if the record names a
/// reference the catalog does not know. This means the SAM header and the
/// FASTA disagree, so it is not a per-record skip.
pub fn admit<'c>(
    record: &SourceAlignmentRecord,
    catalog: &'c ReferenceCatalog,
) -> Result<Admission<'c>, CatalogError> {
    let Some(short_name) = record.reference_name.as_deref() else {
        return Ok(Admission::Skip(SkipReason::Unmapped));
    };
    if record.is_unmapped() {
        return Ok(Admission::Skip(SkipReason::Unmapped));
    }

    let resolved = catalog.resolve(short_name)?;
    let Some(index) = catalog.index_of(resolved) else {
        return Err(CatalogError::UnresolvedReference(short_name.to_string()));
    };
    let reference = &catalog.references[index];

    if record.cigar.has_padding() {
        return Ok(Admission::Skip(SkipReason::Padding));
    }

    if record.cigar.segment_count() > 1 {
        return Ok(Admission::Skip(SkipReason::MultipleSegments));
    }

    let target_name = match catalog.naming() {
        ReferenceNaming::Full => reference.title.as_str(),
        ReferenceNaming::Short => reference.short_name.as_str(),
    };

    Ok(Admission::Accept {
        reference,
        target_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::{CatalogSequence, HeaderReference};
    use noodles::sam::alignment::record::Flags;

    fn catalog(naming: ReferenceNaming) -> ReferenceCatalog {
        ReferenceCatalog::build(
            vec![CatalogSequence::new("chr1 full title", "ACGTACGTACGTACGTACGT")],
            vec![HeaderReference::new("chr1", 20)],
            naming,
        )
        .unwrap()
    }

    fn record(reference: Option<&str>, cigar: &str) -> SourceAlignmentRecord {
        SourceAlignmentRecord {
            query_name: "read".to_string(),
            reference_name: reference.map(str::to_string),
            alignment_start: Some(1),
            cigar: cigar.parse().unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_accept_resolves_full_title() {
        let catalog = catalog(ReferenceNaming::Full);
        match admit(&record(Some("chr1"), "10M"), &catalog).unwrap() {
            Admission::Accept {
                reference,
                target_name,
            } => {
                assert_eq!(target_name, "chr1 full title");
                assert_eq!(reference.short_name, "chr1");
            }
            Admission::Skip(reason) => panic!("Unexpected skip: {reason}"),
        }
    }

    #[test]
    fn test_accept_short_name() {
        let catalog = catalog(ReferenceNaming::Short);
        match admit(&record(Some("chr1"), "10M"), &catalog).unwrap() {
            Admission::Accept { target_name, .. } => assert_eq!(target_name, "chr1"),
            Admission::Skip(reason) => panic!("Unexpected skip: {reason}"),
        }
    }

    #[test]
    fn test_skip_unmapped_sentinel() {
        let catalog = catalog(ReferenceNaming::Full);
        assert!(matches!(
            admit(&record(None, "*"), &catalog).unwrap(),
            Admission::Skip(SkipReason::Unmapped)
        ));
    }

    #[test]
    fn test_skip_unmapped_flag() {
        let catalog = catalog(ReferenceNaming::Full);
        let mut unmapped = record(Some("chr1"), "10M");
        unmapped.flags = Flags::UNMAPPED;
        assert!(matches!(
            admit(&unmapped, &catalog).unwrap(),
            Admission::Skip(SkipReason::Unmapped)
        ));
    }

    #[test]
    fn test_skip_padding() {
        let catalog = catalog(ReferenceNaming::Full);
        assert!(matches!(
            admit(&record(Some("chr1"), "10M2P5M"), &catalog).unwrap(),
            Admission::Skip(SkipReason::Padding)
        ));
    }

    #[test]
    fn test_skip_multiple_segments() {
        let catalog = catalog(ReferenceNaming::Full);
        assert!(matches!(
            admit(&record(Some("chr1"), "5M5N5M"), &catalog).unwrap(),
            Admission::Skip(SkipReason::MultipleSegments)
        ));
    }

    #[test]
    fn test_unresolved_reference_is_fatal() {
        let catalog = catalog(ReferenceNaming::Full);
        assert!(matches!(
            admit(&record(Some("chr7"), "10M"), &catalog),
            Err(CatalogError::UnresolvedReference(ref name)) if name == "chr7"
        ));
    }

    #[test]
    fn test_unknown_short_name_is_fatal() {
        let catalog = catalog(ReferenceNaming::Short);
        assert!(matches!(
            admit(&record(Some("chr7"), "10M"), &catalog),
            Err(CatalogError::UnresolvedReference(_))
        ));
    }

    #[test]
    fn test_unresolved_checked_before_padding() {
        let catalog = catalog(ReferenceNaming::Full);
        assert!(admit(&record(Some("chr7"), "10M2P5M"), &catalog).is_err());
    }
}
