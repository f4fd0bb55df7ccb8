//! Command-line interface for sam2m4.
//!
//! This module implements the CLI using clap.
//!
//! ## Usage
//!
//! ```text
//! # Convert to a file, with the M4 header line
//! sam2m4 aligned.sam reference.fasta aligned.m4 --header
//!
//! # Write to stdout, keeping the reference names from the SAM header
//! sam2m4 aligned.bam reference.fasta.gz --use-short-ref-name
//!
//! # Also write a JSON summary of what was converted and skipped
//! sam2m4 aligned.sam reference.fasta aligned.m4 --summary summary.json
//! ```

use clap::Parser;

pub mod convert;

#[derive(Parser)]
#[command(name = "sam2m4")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Convert SAM/BAM alignments to BLASR M4 format")]
#[command(
    long_about = "sam2m4 converts pairwise alignments from SAM or BAM into BLASR's M4 format.\n\nFor every mapped record it:\n- Resolves the SAM reference name to the full FASTA title\n- Rebuilds the alignment from the CIGAR and the reference sequence\n- Recomputes identity, keeping the aligner's own score and mapping quality\n- Restores the original query length from the XQ tag when present\n\nRecords that M4 cannot express (unmapped, padded, or split alignments) are skipped with a warning."
)]
pub struct Cli {
    #[command(flatten)]
    pub convert: convert::ConvertArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
