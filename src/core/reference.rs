/// A reference sequence as declared by an `@SQ` line of the alignment header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderReference {
    /// Sequence name (SN tag in SAM)
    pub name: String,

    /// Sequence length (LN tag in SAM)
    pub length: usize,
}

impl HeaderReference {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// A reference sequence as loaded from the FASTA file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSequence {
    /// The complete definition line, without the leading `>`
    pub title: String,

    pub sequence: Vec<u8>,
}

impl CatalogSequence {
    pub fn new(title: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            sequence: sequence.into(),
        }
    }

    /// The first whitespace-delimited word of the title, which is what
    /// aligners write to the SN tag
    pub fn short_name(&self) -> &str {
        self.title.split_whitespace().next().unwrap_or("")
    }
}

/// A reference sequence after the SAM header and FASTA have been reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    /// Name from the SAM header
    pub short_name: String,

    /// Title from the FASTA
    pub title: String,

    pub sequence: Vec<u8>,

    /// Position in FASTA order
    pub index: usize,
}

impl ReferenceSequence {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
