//! The SAM to M4 conversion pipeline.
//!
//! Every record passes through the same stages, one record at a time:
//!
//! 1. [`filter`]: skip records M4 cannot express; fail on unknown references
//! 2. [`builder`]: expand the CIGAR into gapped query/target strings and spans
//! 3. [`stats`]: count matches, mismatches, insertions and deletions
//! 4. [`reconcile`]: restore the aligner's score, mapping quality and query length
//! 5. [`crate::output::m4`]: write the line
//!
//! [`pipeline::Converter`] ties the stages together. CIGAR expansion and
//! scoring sit behind the [`builder::CigarExpander`] and [`stats::PairScorer`]
//! traits so either can be swapped out.
//!
//! ## Example
//!
//! ```rust
//! use sam2m4::catalog::store::ReferenceCatalog;
//! use sam2m4::conversion::pipeline::Converter;
//! use sam2m4::core::reference::{CatalogSequence, HeaderReference};
//! use sam2m4::core::types::ReferenceNaming;
//! use sam2m4::output::m4::M4Writer;
//! use sam2m4::parsing::sam::AlignmentReader;
//! use std::io::Cursor;
//!
//! let sam = "@SQ\tSN:chr1\tLN:8\nread1\t0\tchr1\t1\t60\t8M\t*\t0\t0\tACGTACGT\t*\tAS:i:-40\n";
//! let reader = AlignmentReader::from_sam_reader(Cursor::new(sam.as_bytes().to_vec())).unwrap();
//!
//! let catalog = ReferenceCatalog::build(
//!     vec![CatalogSequence::new("chr1 first", "ACGTACGT")],
//!     reader.header_references(),
//!     ReferenceNaming::Full,
//! )
//! .unwrap();
//!
//! let mut writer = M4Writer::new(Vec::new());
//! let summary = Converter::new(&catalog).run(reader, &mut writer).unwrap();
//! assert_eq!(summary.converted, 1);
//!
//! let output = String::from_utf8(writer.finish().unwrap()).unwrap();
//! assert_eq!(output, "read1 chr1 first -40 100 0 0 8 8 0 0 8 8 60\n");
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::catalog::store::CatalogError;
use crate::parsing::sam::ParseError;

pub mod builder;
pub mod filter;
pub mod pipeline;
pub mod reconcile;
pub mod stats;

use builder::BuildError;
use filter::SkipReason;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to convert record '{query}': {source}")]
    Build { query: String, source: BuildError },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to write M4 output: {0}")]
    Io(#[from] std::io::Error),
}

/// Record counts for one conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub records_read: usize,
    pub converted: usize,
    pub skipped_unmapped: usize,
    pub skipped_padding: usize,
    pub skipped_multiple_segments: usize,
}

impl ConversionSummary {
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Unmapped => self.skipped_unmapped += 1,
            SkipReason::Padding => self.skipped_padding += 1,
            SkipReason::MultipleSegments => self.skipped_multiple_segments += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_unmapped + self.skipped_padding + self.skipped_multiple_segments
    }
}
