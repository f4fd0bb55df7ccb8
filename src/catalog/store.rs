use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::reference::{CatalogSequence, HeaderReference, ReferenceSequence};
use crate::core::types::ReferenceNaming;

use super::names::ReferenceNameMap;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(
        "The reference FASTA has {fasta} sequences but the SAM header declares {header} references"
    )]
    CountMismatch { fasta: usize, header: usize },

    #[error("Reference '{0}' from the FASTA is not declared in the SAM header")]
    UnmatchedReference(String),

    #[error("Found more than one reference '{name}' in the SAM header ('{first}' and '{second}')")]
    DuplicateShortName {
        name: String,
        first: String,
        second: String,
    },

    #[error("Reference name '{0}' would refer to more than one sequence")]
    AmbiguousReferenceName(String),

    #[error("Could not find '{0}' in the reference repository")]
    UnresolvedReference(String),
}

/// The reconciled set of reference sequences, in FASTA order
#[derive(Debug)]
pub struct ReferenceCatalog {
    /// All references, in FASTA order
    pub references: Vec<ReferenceSequence>,

    naming: ReferenceNaming,

    /// Short name -> full title; empty when short names are used
    names: ReferenceNameMap,

    /// Index: resolved name -> index in references vec
    name_to_index: HashMap<String, usize>,
}

impl ReferenceCatalog {
    /// Reconcile the FASTA sequences with the SAM header references.
    ///
    /// The header references are reordered to follow the FASTA. With
    /// [`ReferenceNaming::Full`] each header name is bound to the title of the
    /// FASTA sequence at the same position.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CountMismatch` if the two lists differ in length,
    /// `CatalogError::UnmatchedReference` if a FASTA sequence has no header
    /// reference, `CatalogError::DuplicateShortName` if a header name would
    /// be bound twice, or `CatalogError::AmbiguousReferenceName` if two
    /// sequences would be written under the same name.
    pub fn build(
        sequences: Vec<CatalogSequence>,
        header: Vec<HeaderReference>,
        naming: ReferenceNaming,
    ) -> Result<Self, CatalogError> {
        if sequences.len() != header.len() {
            return Err(CatalogError::CountMismatch {
                fasta: sequences.len(),
                header: header.len(),
            });
        }

        let ordered = rearrange_header(&sequences, header)?;

        let mut names = ReferenceNameMap::new();
        let mut name_to_index = HashMap::with_capacity(sequences.len());
        let mut references = Vec::with_capacity(sequences.len());

        for (index, (sequence, header_ref)) in sequences.into_iter().zip(ordered).enumerate() {
            if header_ref.length != sequence.sequence.len() {
                warn!(
                    reference = %header_ref.name,
                    header_length = header_ref.length,
                    fasta_length = sequence.sequence.len(),
                    "SAM header and FASTA disagree on reference length"
                );
            }

            let resolved = match naming {
                ReferenceNaming::Full => {
                    names.insert(header_ref.name.clone(), sequence.title.clone())?;
                    sequence.title.clone()
                }
                ReferenceNaming::Short => header_ref.name.clone(),
            };

            match name_to_index.entry(resolved) {
                Entry::Occupied(entry) => {
                    return Err(CatalogError::AmbiguousReferenceName(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }

            references.push(ReferenceSequence {
                short_name: header_ref.name,
                title: sequence.title,
                sequence: sequence.sequence,
                index,
            });
        }

        debug!(references = references.len(), "Built reference catalog");

        Ok(Self {
            references,
            naming,
            names,
            name_to_index,
        })
    }

    /// Map a SAM reference name to the name written to M4.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnresolvedReference` if the name is unknown.
    pub fn resolve<'a>(&'a self, short_name: &'a str) -> Result<&'a str, CatalogError> {
        match self.naming {
            ReferenceNaming::Full => self
                .names
                .get(short_name)
                .ok_or_else(|| CatalogError::UnresolvedReference(short_name.to_string())),
            ReferenceNaming::Short => Ok(short_name),
        }
    }

    /// Look up a reference by its resolved name
    pub fn get(&self, resolved_name: &str) -> Option<&ReferenceSequence> {
        self.name_to_index
            .get(resolved_name)
            .map(|&idx| &self.references[idx])
    }

    pub fn index_of(&self, resolved_name: &str) -> Option<usize> {
        self.name_to_index.get(resolved_name).copied()
    }

    pub fn naming(&self) -> ReferenceNaming {
        self.naming
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// Reorder header references so that position `i` describes FASTA sequence `i`.
///
/// A header reference matches a FASTA sequence by the title's first word, or
/// failing that by the whole title. Repeated header names are consumed in
/// header order.
fn rearrange_header(
    sequences: &[CatalogSequence],
    header: Vec<HeaderReference>,
) -> Result<Vec<HeaderReference>, CatalogError> {
    let mut by_name: HashMap<String, VecDeque<HeaderReference>> = HashMap::new();
    for header_ref in header {
        by_name
            .entry(header_ref.name.clone())
            .or_default()
            .push_back(header_ref);
    }

    sequences
        .iter()
        .map(|sequence| {
            [sequence.short_name(), sequence.title.as_str()]
                .into_iter()
                .find_map(|name| by_name.get_mut(name).and_then(VecDeque::pop_front))
                .ok_or_else(|| CatalogError::UnmatchedReference(sequence.title.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fasta(titles: &[&str]) -> Vec<CatalogSequence> {
        titles
            .iter()
            .map(|title| CatalogSequence::new(*title, "ACGTACGT"))
            .collect()
    }

    fn header(names: &[&str]) -> Vec<HeaderReference> {
        names.iter().map(|name| HeaderReference::new(*name, 8)).collect()
    }

    #[test]
    fn test_build_full_names() {
        let catalog = ReferenceCatalog::build(
            fasta(&["chr1 first chromosome", "chr2 second chromosome"]),
            header(&["chr1", "chr2"]),
            ReferenceNaming::Full,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve("chr2").unwrap(), "chr2 second chromosome");

        let reference = catalog.get("chr2 second chromosome").unwrap();
        assert_eq!(reference.short_name, "chr2");
        assert_eq!(reference.index, 1);
        assert_eq!(catalog.index_of("chr1 first chromosome"), Some(0));
    }

    #[test]
    fn test_length_disagreement_keeps_fasta_sequence() {
        let catalog = ReferenceCatalog::build(
            fasta(&["chr1"]),
            vec![HeaderReference::new("chr1", 1000)],
            ReferenceNaming::Full,
        )
        .unwrap();

        assert_eq!(catalog.get("chr1").unwrap().len(), 8);
    }

    #[test]
    fn test_build_reorders_header_to_fasta_order() {
        let catalog = ReferenceCatalog::build(
            fasta(&["chrB b", "chrA a", "chrC c"]),
            header(&["chrA", "chrC", "chrB"]),
            ReferenceNaming::Full,
        )
        .unwrap();

        let short_names: Vec<_> = catalog
            .references
            .iter()
            .map(|r| r.short_name.as_str())
            .collect();
        assert_eq!(short_names, vec!["chrB", "chrA", "chrC"]);
        assert_eq!(catalog.resolve("chrA").unwrap(), "chrA a");
        assert_eq!(catalog.resolve("chrC").unwrap(), "chrC c");
    }

    #[test]
    fn test_build_short_names() {
        let catalog = ReferenceCatalog::build(
            fasta(&["chr1 first chromosome"]),
            header(&["chr1"]),
            ReferenceNaming::Short,
        )
        .unwrap();

        assert_eq!(catalog.resolve("chr1").unwrap(), "chr1");
        // Short names pass through without lookup
        assert_eq!(catalog.resolve("anything").unwrap(), "anything");
        assert!(catalog.get("chr1").is_some());
        assert!(catalog.get("chr1 first chromosome").is_none());
    }

    #[test]
    fn test_count_mismatch_is_fatal() {
        let result = ReferenceCatalog::build(
            fasta(&["chr1", "chr2", "chr3"]),
            header(&["chr1", "chr2"]),
            ReferenceNaming::Full,
        );

        assert!(matches!(
            result,
            Err(CatalogError::CountMismatch {
                fasta: 3,
                header: 2
            })
        ));
    }

    #[test]
    fn test_duplicate_short_name_is_fatal() {
        let result = ReferenceCatalog::build(
            fasta(&["chrA alpha", "chrA beta"]),
            header(&["chrA", "chrA"]),
            ReferenceNaming::Full,
        );

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateShortName { ref name, .. }) if name == "chrA"
        ));
    }

    #[test]
    fn test_repeated_short_name_is_fatal_without_full_names() {
        let result = ReferenceCatalog::build(
            fasta(&["chrA alpha", "chrA beta"]),
            header(&["chrA", "chrA"]),
            ReferenceNaming::Short,
        );

        assert!(matches!(
            result,
            Err(CatalogError::AmbiguousReferenceName(ref name)) if name == "chrA"
        ));
    }

    #[test]
    fn test_repeated_title_is_fatal() {
        // The second sequence falls back to the header entry named by its full title
        let result = ReferenceCatalog::build(
            fasta(&["chr1 x", "chr1 x"]),
            header(&["chr1", "chr1 x"]),
            ReferenceNaming::Full,
        );

        assert!(matches!(
            result,
            Err(CatalogError::AmbiguousReferenceName(ref name)) if name == "chr1 x"
        ));
    }

    #[test]
    fn test_unmatched_reference_is_fatal() {
        let result = ReferenceCatalog::build(
            fasta(&["chr1", "chrX"]),
            header(&["chr1", "chr2"]),
            ReferenceNaming::Full,
        );

        assert!(matches!(
            result,
            Err(CatalogError::UnmatchedReference(ref title)) if title == "chrX"
        ));
    }

    #[test]
    fn test_header_may_use_full_title() {
        let catalog = ReferenceCatalog::build(
            fasta(&["ref1 with description"]),
            header(&["ref1 with description"]),
            ReferenceNaming::Full,
        )
        .unwrap();

        assert_eq!(
            catalog.resolve("ref1 with description").unwrap(),
            "ref1 with description"
        );
    }

    #[test]
    fn test_unresolved_reference() {
        let catalog = ReferenceCatalog::build(
            fasta(&["chr1"]),
            header(&["chr1"]),
            ReferenceNaming::Full,
        )
        .unwrap();

        assert!(matches!(
            catalog.resolve("chr9"),
            Err(CatalogError::UnresolvedReference(ref name)) if name == "chr9"
        ));
    }
}
