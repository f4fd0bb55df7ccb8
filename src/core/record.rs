use noodles::sam::alignment::record::Flags;

use crate::core::cigar::Cigar;

/// SAM `MAPQ` value meaning "mapping quality is not available"
pub const MISSING_MAPPING_QUALITY: u8 = 255;

/// One alignment record from the SAM/BAM input, detached from its reader
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAlignmentRecord {
    pub query_name: String,

    /// Reference name from RNAME; `None` when RNAME is `*`
    pub reference_name: Option<String>,

    pub flags: Flags,

    /// 1-based leftmost reference position
    pub alignment_start: Option<usize>,

    pub cigar: Cigar,

    /// SEQ as stored in the record; empty when SEQ is `*`
    pub sequence: Vec<u8>,

    /// Aligner score from the `AS` tag
    pub alignment_score: i64,

    pub mapping_quality: u8,

    /// Length of the original, unclipped query from the `XQ` tag
    pub original_query_length: Option<usize>,
}

impl SourceAlignmentRecord {
    pub fn is_reverse_complemented(&self) -> bool {
        self.flags.is_reverse_complemented()
    }

    pub fn is_unmapped(&self) -> bool {
        self.reference_name.is_none() || self.flags.is_unmapped()
    }
}

impl Default for SourceAlignmentRecord {
    fn default() -> Self {
        Self {
            query_name: String::new(),
            reference_name: None,
            flags: Flags::empty(),
            alignment_start: None,
            cigar: Cigar::default(),
            sequence: Vec::new(),
            alignment_score: 0,
            mapping_quality: MISSING_MAPPING_QUALITY,
            original_query_length: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_detection() {
        let mut record = SourceAlignmentRecord {
            reference_name: Some("chr1".to_string()),
            ..Default::default()
        };
        assert!(!record.is_unmapped());

        record.flags = Flags::UNMAPPED;
        assert!(record.is_unmapped());

        record.flags = Flags::empty();
        record.reference_name = None;
        assert!(record.is_unmapped());
    }

    #[test]
    fn test_reverse_complemented() {
        let record = SourceAlignmentRecord {
            flags: Flags::REVERSE_COMPLEMENTED,
            ..Default::default()
        };
        assert!(record.is_reverse_complemented());
    }
}
