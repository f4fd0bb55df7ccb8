use std::io::{self, Write};

use crate::core::alignment::AlignmentCandidate;

/// Column names, written once before any record when requested
pub const M4_HEADER: &str =
    "qName tName score percentSimilarity qStrand qStart qEnd qLength tStrand tStart tEnd tLength mapQV";

/// Writes [`AlignmentCandidate`]s as space-separated M4 lines
pub struct M4Writer<W: Write> {
    inner: W,
    header_written: bool,
    records_written: usize,
}

impl<W: Write> M4Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            header_written: false,
            records_written: 0,
        }
    }

    /// Write the header line. Later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if records were already written, or
    /// any error from the underlying writer.
    pub fn write_header(&mut self) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        if self.records_written > 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "M4 header must precede all records",
            ));
        }

        writeln!(self.inner, "{M4_HEADER}")?;
        self.header_written = true;
        Ok(())
    }

    /// Write one record. The candidate, including its aligned sequences, is
    /// dropped once written.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_record(&mut self, candidate: AlignmentCandidate) -> io::Result<()> {
        writeln!(
            self.inner,
            "{} {} {} {} {} {} {} {} {} {} {} {} {}",
            candidate.query_name,
            candidate.target_name,
            candidate.stats.score,
            format_similarity(candidate.stats.percent_identity),
            candidate.orientation.query,
            candidate.query_start,
            candidate.query_end,
            candidate.query_length,
            candidate.orientation.target,
            candidate.target_start,
            candidate.target_end,
            candidate.target_length,
            candidate.mapping_quality,
        )?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and return the underlying writer
    ///
    /// # Errors
    ///
    /// Returns any error from flushing.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Format a percentage the way a default C++ output stream prints a double
/// (`%g` with six significant digits): fixed notation for decimal exponents
/// in `-4..6`, scientific otherwise, trailing zeros removed either way.
pub fn format_similarity(value: f64) -> String {
    const SIGNIFICANT_DIGITS: i32 = 6;

    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // The exponent after rounding to six significant digits
    let scientific = format!("{value:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..SIGNIFICANT_DIGITS).contains(&exponent) {
        #[allow(clippy::cast_sign_loss)] // exponent < SIGNIFICANT_DIGITS
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
