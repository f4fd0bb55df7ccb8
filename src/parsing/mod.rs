//! Readers for the two conversion inputs.
//!
//! - **SAM/BAM files**: the `@SQ` references of the header and a stream of
//!   alignment records, detached from noodles into
//!   [`SourceAlignmentRecord`](crate::core::record::SourceAlignmentRecord)s
//! - **FASTA files**: every reference sequence with its full title
//!
//! ## Example
//!
//! ```rust,no_run
//! use sam2m4::parsing::fasta::read_reference_fasta;
//! use sam2m4::parsing::sam::AlignmentReader;
//! use std::path::Path;
//!
//! let sequences = read_reference_fasta(Path::new("reference.fasta")).unwrap();
//! let reader = AlignmentReader::from_path(Path::new("aligned.sam")).unwrap();
//! let header = reader.header_references();
//!
//! for record in reader {
//!     let record = record.unwrap();
//!     println!("{} {}", record.query_name, record.cigar);
//! }
//! ```
//!
//! ## Tags
//!
//! Besides the mandatory SAM fields, these optional tags are read:
//!
//! | Tag | Description |
//! |-----|-------------|
//! | AS  | Alignment score from the aligner |
//! | XQ  | Length of the original, unclipped query (BLASR) |

pub mod fasta;
pub mod sam;
