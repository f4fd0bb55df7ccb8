//! Reader for reference FASTA files using noodles.
//!
//! Loads every sequence into memory, keeping the full definition line as the
//! title. Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::reference::CatalogSequence;
use crate::parsing::sam::ParseError;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read every sequence of a FASTA file, in file order.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no sequences are found.
pub fn read_reference_fasta(path: &Path) -> Result<Vec<CatalogSequence>, ParseError> {
    let file = std::fs::File::open(path)?;

    let sequences = if is_gzipped(path) {
        // bgzip output is a series of gzip members
        let reader = BufReader::new(MultiGzDecoder::new(file));
        read_sequences(&mut fasta::io::Reader::new(reader))?
    } else {
        let reader = BufReader::new(file);
        read_sequences(&mut fasta::io::Reader::new(reader))?
    };

    debug!(
        path = %path.display(),
        sequences = sequences.len(),
        "Loaded reference FASTA"
    );

    Ok(sequences)
}

/// Read every sequence from a noodles FASTA reader
///
/// # Errors
///
/// Returns `ParseError::Noodles` if parsing fails or `ParseError::InvalidFormat`
/// if no sequences are found.
pub fn read_sequences<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<CatalogSequence>, ParseError> {
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name());
        let title = match record.description() {
            Some(description) => format!("{name} {}", String::from_utf8_lossy(description)),
            None => name.to_string(),
        };

        sequences.push(CatalogSequence::new(
            title,
            record.sequence().as_ref().to_vec(),
        ));
    }

    if sequences.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("test.fasta")));
        assert!(is_fasta_file(Path::new("test.fna")));
        assert!(is_fasta_file(Path::new("test.fa.gz")));
        assert!(is_fasta_file(Path::new("test.fna.bgz")));
        assert!(is_fasta_file(Path::new("/path/to/Reference.FA")));

        assert!(!is_fasta_file(Path::new("test.bam")));
        assert!(!is_fasta_file(Path::new("test.sam")));
    }

    #[test]
    fn test_read_reference_fasta() {
        let fasta_content = b">chr1 description text\nACGTACGT\nACGT\n>chr2\nggGG\n";

        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(fasta_content).unwrap();
        temp.flush().unwrap();

        let sequences = read_reference_fasta(temp.path()).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].title, "chr1 description text");
        assert_eq!(sequences[0].short_name(), "chr1");
        assert_eq!(sequences[0].sequence, b"ACGTACGTACGT".to_vec());
        assert_eq!(sequences[1].title, "chr2");
        assert_eq!(sequences[1].sequence, b"ggGG".to_vec());
    }

    #[test]
    fn test_read_gzipped_fasta() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">ref1\nACGT\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        temp.write_all(&compressed).unwrap();
        temp.flush().unwrap();

        let sequences = read_reference_fasta(temp.path()).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].title, "ref1");
        assert_eq!(sequences[0].sequence, b"ACGT".to_vec());
    }

    #[test]
    fn test_read_empty_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        assert!(read_reference_fasta(temp.path()).is_err());
    }
}
