use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::store::CatalogError;

/// Binds SAM header names to full FASTA titles.
///
/// Each short name is bound at most once; a second binding is rejected
/// instead of overwriting the first.
#[derive(Debug, Default, Clone)]
pub struct ReferenceNameMap {
    short_to_full: HashMap<String, String>,
}

impl ReferenceNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `short` to `full`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateShortName` if `short` is already bound.
    pub fn insert(
        &mut self,
        short: impl Into<String>,
        full: impl Into<String>,
    ) -> Result<(), CatalogError> {
        match self.short_to_full.entry(short.into()) {
            Entry::Occupied(existing) => Err(CatalogError::DuplicateShortName {
                name: existing.key().clone(),
                first: existing.get().clone(),
                second: full.into(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(full.into());
                Ok(())
            }
        }
    }

    pub fn get(&self, short: &str) -> Option<&str> {
        self.short_to_full.get(short).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.short_to_full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_to_full.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut names = ReferenceNameMap::new();
        names.insert("chr1", "chr1 Homo sapiens chromosome 1").unwrap();
        names.insert("chr2", "chr2 Homo sapiens chromosome 2").unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names.get("chr1"), Some("chr1 Homo sapiens chromosome 1"));
        assert_eq!(names.get("chr3"), None);
    }

    #[test]
    fn test_duplicate_short_name_rejected() {
        let mut names = ReferenceNameMap::new();
        names.insert("chrA", "chrA first").unwrap();

        let err = names.insert("chrA", "chrA second").unwrap_err();
        match err {
            CatalogError::DuplicateShortName {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "chrA");
                assert_eq!(first, "chrA first");
                assert_eq!(second, "chrA second");
            }
            other => panic!("Unexpected error: {other:?}"),
        }

        // The first binding survives
        assert_eq!(names.get("chrA"), Some("chrA first"));
    }
}
