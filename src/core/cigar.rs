use std::fmt;
use std::str::FromStr;

use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::cigar::Op;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CigarError {
    #[error("Invalid CIGAR operator '{0}'")]
    InvalidOperator(char),

    #[error("CIGAR operator '{0}' has no length")]
    MissingLength(char),

    #[error("CIGAR ends with a dangling length")]
    DanglingLength,

    #[error("CIGAR operation length overflows")]
    LengthOverflow,
}

/// A single CIGAR operation kind, using the SAM operator names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// `M`: alignment match (can be a sequence match or mismatch)
    Match,
    /// `I`: insertion to the reference
    Insertion,
    /// `D`: deletion from the reference
    Deletion,
    /// `N`: skipped region from the reference
    Skip,
    /// `S`: soft clip (clipped bases present in SEQ)
    SoftClip,
    /// `H`: hard clip (clipped bases not present in SEQ)
    HardClip,
    /// `P`: padding (silent deletion from padded reference)
    Pad,
    /// `=`: sequence match
    SequenceMatch,
    /// `X`: sequence mismatch
    SequenceMismatch,
}

impl OpKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(OpKind::Match),
            'I' => Some(OpKind::Insertion),
            'D' => Some(OpKind::Deletion),
            'N' => Some(OpKind::Skip),
            'S' => Some(OpKind::SoftClip),
            'H' => Some(OpKind::HardClip),
            'P' => Some(OpKind::Pad),
            '=' => Some(OpKind::SequenceMatch),
            'X' => Some(OpKind::SequenceMismatch),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OpKind::Match => 'M',
            OpKind::Insertion => 'I',
            OpKind::Deletion => 'D',
            OpKind::Skip => 'N',
            OpKind::SoftClip => 'S',
            OpKind::HardClip => 'H',
            OpKind::Pad => 'P',
            OpKind::SequenceMatch => '=',
            OpKind::SequenceMismatch => 'X',
        }
    }

    pub fn is_clip(self) -> bool {
        matches!(self, OpKind::SoftClip | OpKind::HardClip)
    }
}

impl From<Kind> for OpKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Match => OpKind::Match,
            Kind::Insertion => OpKind::Insertion,
            Kind::Deletion => OpKind::Deletion,
            Kind::Skip => OpKind::Skip,
            Kind::SoftClip => OpKind::SoftClip,
            Kind::HardClip => OpKind::HardClip,
            Kind::Pad => OpKind::Pad,
            Kind::SequenceMatch => OpKind::SequenceMatch,
            Kind::SequenceMismatch => OpKind::SequenceMismatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    pub kind: OpKind,
    pub len: usize,
}

impl CigarOp {
    pub fn new(kind: OpKind, len: usize) -> Self {
        Self { kind, len }
    }
}

impl From<&Op> for CigarOp {
    fn from(op: &Op) -> Self {
        Self::new(op.kind().into(), op.len())
    }
}

/// An owned CIGAR, independent of the reader it came from.
///
/// An empty CIGAR corresponds to `*` in SAM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar(Vec<CigarOp>);

impl Cigar {
    pub fn new(ops: Vec<CigarOp>) -> Self {
        Self(ops)
    }

    pub fn ops(&self) -> &[CigarOp] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_padding(&self) -> bool {
        self.0.iter().any(|op| op.kind == OpKind::Pad)
    }

    /// Number of contiguous alignment segments this CIGAR describes.
    ///
    /// A reference skip (`N`) between aligned operations starts a new segment.
    /// A CIGAR with no aligned operations has zero segments.
    pub fn segment_count(&self) -> usize {
        let mut segments = 0;
        let mut in_segment = false;

        for op in &self.0 {
            match op.kind {
                OpKind::Skip => in_segment = false,
                OpKind::Pad => {}
                kind if kind.is_clip() => {}
                _ => {
                    if !in_segment {
                        segments += 1;
                        in_segment = true;
                    }
                }
            }
        }

        segments
    }
}

impl FromIterator<CigarOp> for Cigar {
    fn from_iter<I: IntoIterator<Item = CigarOp>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for Cigar {
    type Err = CigarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::default());
        }

        let mut ops = Vec::new();
        let mut len: Option<usize> = None;

        for c in s.chars() {
            if let Some(digit) = c.to_digit(10) {
                let next = len
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or(CigarError::LengthOverflow)?;
                len = Some(next);
            } else {
                let kind = OpKind::from_char(c).ok_or(CigarError::InvalidOperator(c))?;
                let n = len.take().ok_or(CigarError::MissingLength(c))?;
                ops.push(CigarOp::new(kind, n));
            }
        }

        if len.is_some() {
            return Err(CigarError::DanglingLength);
        }

        Ok(Self(ops))
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("*");
        }
        for op in &self.0 {
            write!(f, "{}{}", op.len, op.kind.as_char())?;
        }
        Ok(())
    }
}
