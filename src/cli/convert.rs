use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::catalog::store::ReferenceCatalog;
use crate::conversion::pipeline::Converter;
use crate::conversion::ConversionSummary;
use crate::core::types::ReferenceNaming;
use crate::output::m4::M4Writer;
use crate::parsing::fasta::{is_fasta_file, read_reference_fasta};
use crate::parsing::sam::AlignmentReader;

#[derive(Args)]
pub struct ConvertArgs {
    /// Input SAM or BAM file, as produced by blasr
    #[arg(value_name = "IN_SAM")]
    pub input: PathBuf,

    /// Reference FASTA used to generate the input (may be gzip/bgzip compressed)
    #[arg(value_name = "REFERENCE_FASTA")]
    pub reference: PathBuf,

    /// Output in M4 format. Use '-' or omit for stdout
    #[arg(value_name = "OUT_M4")]
    pub output: Option<PathBuf>,

    /// Print the M4 header line
    #[arg(long)]
    pub header: bool,

    /// Use the reference names from the SAM header instead of the full
    /// names from the reference FASTA
    #[arg(long)]
    pub use_short_ref_name: bool,

    /// Write a JSON summary of converted and skipped records
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn naming(&self) -> ReferenceNaming {
        if self.use_short_ref_name {
            ReferenceNaming::Short
        } else {
            ReferenceNaming::Full
        }
    }

    /// The output path, or `None` for stdout
    pub fn output_path(&self) -> Option<&Path> {
        self.output
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}

/// Execute the conversion
///
/// # Errors
///
/// Returns an error if an input cannot be read, the SAM header and FASTA
/// cannot be reconciled, a record cannot be converted, or the output cannot
/// be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ConvertArgs, verbose: bool) -> anyhow::Result<()> {
    if !is_fasta_file(&args.reference) {
        warn!(
            path = %args.reference.display(),
            "Reference does not have a FASTA extension, reading it as FASTA anyway"
        );
    }

    let sequences = read_reference_fasta(&args.reference).with_context(|| {
        format!(
            "Failed to read reference FASTA {}",
            args.reference.display()
        )
    })?;

    let reader = AlignmentReader::from_path(&args.input)
        .with_context(|| format!("Failed to open alignments {}", args.input.display()))?;

    // Everything that can fail on setup fails here, before any record is read
    let catalog = ReferenceCatalog::build(sequences, reader.header_references(), args.naming())?;

    info!(references = catalog.len(), "Loaded reference catalog");

    let output: Box<dyn Write> = match args.output_path() {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut writer = M4Writer::new(output);
    if args.header {
        writer.write_header()?;
    }

    let summary = Converter::new(&catalog).run(reader, &mut writer)?;
    writer.finish()?;

    info!(
        read = summary.records_read,
        converted = summary.converted,
        skipped = summary.skipped(),
        "Converted alignments"
    );

    if verbose {
        eprintln!(
            "Converted {} of {} records ({} unmapped, {} padded, {} multi-segment skipped)",
            summary.converted,
            summary.records_read,
            summary.skipped_unmapped,
            summary.skipped_padding,
            summary.skipped_multiple_segments,
        );
    }

    if let Some(path) = &args.summary {
        write_summary(path, &summary)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
    }

    Ok(())
}

fn write_summary(path: &Path, summary: &ConversionSummary) -> anyhow::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, summary)?;
    writeln!(file)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from([
            "sam2m4",
            "in.sam",
            "ref.fasta",
            "out.m4",
            "--header",
            "--use-short-ref-name",
        ]);

        assert_eq!(cli.convert.input, PathBuf::from("in.sam"));
        assert_eq!(cli.convert.reference, PathBuf::from("ref.fasta"));
        assert_eq!(cli.convert.output_path(), Some(Path::new("out.m4")));
        assert!(cli.convert.header);
        assert_eq!(cli.convert.naming(), ReferenceNaming::Short);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_stdout_defaults() {
        let cli = Cli::parse_from(["sam2m4", "in.sam", "ref.fasta"]);
        assert_eq!(cli.convert.output_path(), None);
        assert_eq!(cli.convert.naming(), ReferenceNaming::Full);
        assert!(!cli.convert.header);

        let cli = Cli::parse_from(["sam2m4", "in.sam", "ref.fasta", "-"]);
        assert_eq!(cli.convert.output_path(), None);
    }
}
