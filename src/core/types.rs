use serde::Serialize;

/// Strand of one side of a pairwise alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    /// M4 encodes strands as `0` (forward) and `1` (reverse)
    pub fn as_m4(self) -> u8 {
        match self {
            Strand::Forward => 0,
            Strand::Reverse => 1,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_m4())
    }
}

/// Query and target strands of one alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Orientation {
    pub query: Strand,
    pub target: Strand,
}

impl Orientation {
    /// The reference is always reported on the forward strand; a
    /// reverse-complemented record puts the query on the reverse strand.
    pub fn keep_reference_forward(reverse_complemented: bool) -> Self {
        let query = if reverse_complemented {
            Strand::Reverse
        } else {
            Strand::Forward
        };

        Self {
            query,
            target: Strand::Forward,
        }
    }
}

/// Which reference identifier is written to the target name column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceNaming {
    /// Full FASTA titles, resolved from the SAM header names
    #[default]
    Full,
    /// SAM header names, written verbatim
    Short,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_reference_forward() {
        let forward = Orientation::keep_reference_forward(false);
        assert_eq!(forward.query, Strand::Forward);
        assert_eq!(forward.target, Strand::Forward);

        let reverse = Orientation::keep_reference_forward(true);
        assert_eq!(reverse.query, Strand::Reverse);
        assert_eq!(reverse.target, Strand::Forward);
    }

    #[test]
    fn test_strand_m4_encoding() {
        assert_eq!(Strand::Forward.to_string(), "0");
        assert_eq!(Strand::Reverse.to_string(), "1");
    }
}
