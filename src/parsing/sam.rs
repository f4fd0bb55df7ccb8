use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::RecordBuf;
use noodles::{bam, sam};
use thiserror::Error;
use tracing::debug;

use crate::core::cigar::{Cigar, CigarOp};
use crate::core::record::{SourceAlignmentRecord, MISSING_MAPPING_QUALITY};
use crate::core::reference::HeaderReference;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Original (unclipped) query length, written by BLASR
const ORIGINAL_QUERY_LENGTH: [u8; 2] = *b"XQ";

/// Anything that yields `RecordBuf`s given the header, SAM or BAM alike
trait RecordBufRead {
    fn read_record_buf(&mut self, header: &sam::Header, record: &mut RecordBuf)
        -> io::Result<usize>;
}

impl<R: BufRead> RecordBufRead for sam::io::Reader<R> {
    fn read_record_buf(
        &mut self,
        header: &sam::Header,
        record: &mut RecordBuf,
    ) -> io::Result<usize> {
        sam::io::Reader::read_record_buf(self, header, record)
    }
}

impl<R: Read> RecordBufRead for bam::io::Reader<R> {
    fn read_record_buf(
        &mut self,
        header: &sam::Header,
        record: &mut RecordBuf,
    ) -> io::Result<usize> {
        bam::io::Reader::read_record_buf(self, header, record)
    }
}

/// Streams [`SourceAlignmentRecord`]s out of a SAM or BAM file.
///
/// The header is read on construction; records are read one at a time as
/// the reader is iterated.
pub struct AlignmentReader {
    header: sam::Header,
    inner: Box<dyn RecordBufRead>,
    buf: RecordBuf,
}

impl AlignmentReader {
    /// Open a SAM or BAM file, chosen by extension (`.bam` is BAM, anything
    /// else is read as SAM).
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened or
    /// `ParseError::Noodles` if the header cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("bam") => Self::open_bam(path),
            _ => Self::open_sam(path),
        }
    }

    fn open_sam(path: &Path) -> Result<Self, ParseError> {
        let reader = File::open(path).map(BufReader::new)?;
        Self::from_sam_reader(reader)
    }

    fn open_bam(path: &Path) -> Result<Self, ParseError> {
        let mut reader = File::open(path).map(bam::io::Reader::new)?;

        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(e.to_string()))?;

        debug!(path = %path.display(), "Opened BAM input");

        Ok(Self {
            header,
            inner: Box::new(reader),
            buf: RecordBuf::default(),
        })
    }

    /// Read SAM text from any buffered reader
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Noodles` if the header cannot be parsed.
    pub fn from_sam_reader<R: BufRead + 'static>(inner: R) -> Result<Self, ParseError> {
        let mut reader = sam::io::Reader::new(inner);

        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(e.to_string()))?;

        Ok(Self {
            header,
            inner: Box::new(reader),
            buf: RecordBuf::default(),
        })
    }

    /// The `@SQ` references, in header order
    pub fn header_references(&self) -> Vec<HeaderReference> {
        self.header
            .reference_sequences()
            .iter()
            .map(|(name, map)| HeaderReference::new(name.to_string(), map.length().get()))
            .collect()
    }

    fn read_next(&mut self) -> Result<Option<SourceAlignmentRecord>, ParseError> {
        match self.inner.read_record_buf(&self.header, &mut self.buf)? {
            0 => Ok(None),
            _ => to_source_record(&self.header, &self.buf).map(Some),
        }
    }
}

impl Iterator for AlignmentReader {
    type Item = Result<SourceAlignmentRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Detach a noodles record from its header
fn to_source_record(
    header: &sam::Header,
    record: &RecordBuf,
) -> Result<SourceAlignmentRecord, ParseError> {
    let query_name = record
        .name()
        .map_or_else(|| "*".to_string(), |name| name.to_string());

    let reference_name = match record.reference_sequence_id() {
        Some(id) => {
            let (name, _) = header.reference_sequences().get_index(id).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Record '{query_name}' refers to reference #{id}, which is not in the header"
                ))
            })?;
            Some(name.to_string())
        }
        None => None,
    };

    let cigar: Cigar = record.cigar().as_ref().iter().map(CigarOp::from).collect();

    let data = record.data();
    let alignment_score = data
        .get(&Tag::ALIGNMENT_SCORE)
        .and_then(int_value)
        .unwrap_or(0);
    let original_query_length = data
        .get(&Tag::from(ORIGINAL_QUERY_LENGTH))
        .and_then(int_value)
        .and_then(|n| usize::try_from(n).ok());

    Ok(SourceAlignmentRecord {
        query_name,
        reference_name,
        flags: record.flags(),
        alignment_start: record.alignment_start().map(usize::from),
        cigar,
        sequence: record.sequence().as_ref().to_vec(),
        alignment_score,
        mapping_quality: record
            .mapping_quality()
            .map_or(MISSING_MAPPING_QUALITY, u8::from),
        original_query_length,
    })
}

fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Int8(n) => Some(i64::from(*n)),
        Value::UInt8(n) => Some(i64::from(*n)),
        Value::Int16(n) => Some(i64::from(*n)),
        Value::UInt16(n) => Some(i64::from(*n)),
        Value::Int32(n) => Some(i64::from(*n)),
        Value::UInt32(n) => Some(i64::from(*n)),
        #[allow(clippy::cast_possible_truncation)] // Scores are small
        Value::Float(n) => Some(n.round() as i64),
        _ => None,
    }
}
