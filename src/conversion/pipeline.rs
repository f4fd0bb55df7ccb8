use std::io::Write;

use tracing::{debug, warn};

use crate::catalog::store::ReferenceCatalog;
use crate::core::alignment::AlignmentCandidate;
use crate::core::record::SourceAlignmentRecord;
use crate::output::m4::M4Writer;
use crate::parsing::sam::ParseError;

use super::builder::{CandidateBuilder, CigarExpander, CigarWalker};
use super::filter::{admit, Admission, SkipReason};
use super::reconcile::reconcile;
use super::stats::{ColumnScorer, PairScorer};
use super::{ConversionSummary, ConvertError};

/// What became of one input record
#[derive(Debug)]
pub enum Outcome {
    Converted(AlignmentCandidate),
    Skipped(SkipReason),
}

/// Converts records against a fixed reference catalog
pub struct Converter<'c, E = CigarWalker, S = ColumnScorer> {
    catalog: &'c ReferenceCatalog,
    builder: CandidateBuilder<E>,
    scorer: S,
}

impl<'c> Converter<'c> {
    pub fn new(catalog: &'c ReferenceCatalog) -> Self {
        Self::with_capabilities(catalog, CigarWalker, ColumnScorer)
    }
}

impl<'c, E: CigarExpander, S: PairScorer> Converter<'c, E, S> {
    pub fn with_capabilities(catalog: &'c ReferenceCatalog, expander: E, scorer: S) -> Self {
        Self {
            catalog,
            builder: CandidateBuilder::with_expander(expander),
            scorer,
        }
    }

    /// Filter, build, score and reconcile a single record.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Catalog` if the record's reference cannot be
    /// resolved, or `ConvertError::Build` if its CIGAR cannot be expanded.
    pub fn convert(&self, record: &SourceAlignmentRecord) -> Result<Outcome, ConvertError> {
        let (reference, target_name) = match admit(record, self.catalog)? {
            Admission::Accept {
                reference,
                target_name,
            } => (reference, target_name),
            Admission::Skip(reason) => {
                warn!(
                    query = %record.query_name,
                    cigar = %record.cigar,
                    "Skipping record: {reason}"
                );
                return Ok(Outcome::Skipped(reason));
            }
        };

        let mut candidate = self
            .builder
            .build(record, reference, target_name)
            .map_err(|source| ConvertError::Build {
                query: record.query_name.clone(),
                source,
            })?;

        candidate.stats = self.scorer.score(&candidate.aligned);

        Ok(Outcome::Converted(reconcile(candidate, record)))
    }

    /// Convert every record and write the results.
    ///
    /// Stops at the first fatal error; records already written stay written.
    ///
    /// # Errors
    ///
    /// Returns the first read, conversion or write error.
    pub fn run<I, W>(
        &self,
        records: I,
        writer: &mut M4Writer<W>,
    ) -> Result<ConversionSummary, ConvertError>
    where
        I: IntoIterator<Item = Result<SourceAlignmentRecord, ParseError>>,
        W: Write,
    {
        let mut summary = ConversionSummary::default();

        for result in records {
            let record = result?;
            summary.records_read += 1;

            match self.convert(&record)? {
                Outcome::Converted(candidate) => {
                    writer.write_record(candidate)?;
                    summary.converted += 1;
                }
                Outcome::Skipped(reason) => summary.record_skip(reason),
            }
        }

        debug!(
            read = summary.records_read,
            converted = summary.converted,
            skipped = summary.skipped(),
            "Conversion finished"
        );

        Ok(summary)
    }
}
