//! # sam2m4
//!
//! A library for converting SAM/BAM pairwise alignments into BLASR's M4 format.
//!
//! M4 is a one-line-per-alignment summary used by long-read tooling. SAM holds
//! most of what M4 needs, but not in the same shape: M4 reports full reference
//! titles, identity over all alignment columns, and the length of the original
//! (unclipped) read. `sam2m4` rebuilds every alignment from its CIGAR and the
//! reference to recover those fields.
//!
//! ## Features
//!
//! - **Name resolution**: Binds SAM header names to full FASTA titles, failing on conflicts
//! - **Alignment reconstruction**: Expands CIGARs into gapped query/target strings
//! - **Identity**: Counts matches, mismatches, insertions and deletions
//! - **Faithful fields**: Keeps the aligner's score and mapping quality; restores the query length from `XQ`
//! - **Filtering**: Skips unmapped, padded and split alignments with a warning
//!
//! ## Example
//!
//! ```rust,no_run
//! use sam2m4::{AlignmentReader, Converter, M4Writer, ReferenceCatalog, ReferenceNaming};
//! use sam2m4::parsing::fasta::read_reference_fasta;
//! use std::path::Path;
//!
//! let sequences = read_reference_fasta(Path::new("reference.fasta")).unwrap();
//! let reader = AlignmentReader::from_path(Path::new("aligned.sam")).unwrap();
//!
//! let catalog =
//!     ReferenceCatalog::build(sequences, reader.header_references(), ReferenceNaming::Full)
//!         .unwrap();
//!
//! let mut writer = M4Writer::new(std::io::stdout());
//! writer.write_header().unwrap();
//! let summary = Converter::new(&catalog).run(reader, &mut writer).unwrap();
//! eprintln!("{} of {} records converted", summary.converted, summary.records_read);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference catalog and short-to-full name binding
//! - [`core`]: Core data types for records, references and alignments
//! - [`conversion`]: The per-record conversion pipeline
//! - [`output`]: M4 writer
//! - [`parsing`]: SAM/BAM and FASTA readers
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod conversion;
pub mod core;
pub mod output;
pub mod parsing;

// Re-export commonly used types for convenience
pub use catalog::store::ReferenceCatalog;
pub use conversion::pipeline::Converter;
pub use conversion::ConversionSummary;
pub use core::alignment::AlignmentCandidate;
pub use core::record::SourceAlignmentRecord;
pub use core::types::*;
pub use output::m4::M4Writer;
pub use parsing::sam::AlignmentReader;
