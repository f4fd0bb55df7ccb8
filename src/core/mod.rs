//! Core data types for SAM to M4 conversion.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Cigar`](cigar::Cigar): An owned CIGAR, parsed from text or converted from noodles
//! - [`SourceAlignmentRecord`](record::SourceAlignmentRecord): One SAM/BAM record, detached from its reader
//! - [`HeaderReference`](reference::HeaderReference), [`CatalogSequence`](reference::CatalogSequence):
//!   The two views of a reference, from the SAM header and from the FASTA
//! - [`ReferenceSequence`](reference::ReferenceSequence): A reference after both views are reconciled
//! - [`AlignmentCandidate`](alignment::AlignmentCandidate): One alignment in M4 terms
//! - [`Strand`](types::Strand), [`Orientation`](types::Orientation): Strand bookkeeping
//!
//! ## Coordinates
//!
//! SAM positions are 1-based; every span on an [`AlignmentCandidate`](alignment::AlignmentCandidate)
//! is 0-based and half-open, as M4 expects.

pub mod alignment;
pub mod cigar;
pub mod record;
pub mod reference;
pub mod types;
