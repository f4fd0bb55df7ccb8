//! Reference catalog: the reconciled view of the SAM header and the FASTA.
//!
//! A SAM header names each reference by its `SN` tag, usually the first word
//! of the FASTA definition line. M4 output reports the full FASTA title
//! instead, so the catalog binds every header name to exactly one title.
//!
//! ## Example
//!
//! ```rust
//! use sam2m4::catalog::store::ReferenceCatalog;
//! use sam2m4::core::reference::{CatalogSequence, HeaderReference};
//! use sam2m4::core::types::ReferenceNaming;
//!
//! let fasta = vec![CatalogSequence::new("chr1 Homo sapiens chromosome 1", "ACGT")];
//! let header = vec![HeaderReference::new("chr1", 4)];
//!
//! let catalog = ReferenceCatalog::build(fasta, header, ReferenceNaming::Full).unwrap();
//! assert_eq!(catalog.resolve("chr1").unwrap(), "chr1 Homo sapiens chromosome 1");
//! ```

pub mod names;
pub mod store;
