/// `Op` represents a single operation in a pairwise alignment.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Op {
    /// Represents a gap in the first sequence (v)
    GapFirst,
    /// Represents a gap in the second sequence (^)
    GapSecond,
    /// Represents a match between the sequences (=)
    Match,
    /// Represents a mismatch between the sequences (X)
    Mismatch,
}

impl Op {
    /// Returns the symbol representation of the operation.
    pub fn symbol(&self) -> char {
        match self {
            Op::GapFirst => 'v',
            Op::GapSecond => '^',
            Op::Match => '=',
            Op::Mismatch => 'X',
        }
    }

    /// Number of symbols consumed by the operation in the first and the second sequence.
    pub fn consumes(&self) -> (usize, usize) {
        match self {
            Op::GapFirst => (0, 1),
            Op::GapSecond => (1, 0),
            Op::Match | Op::Mismatch => (1, 1),
        }
    }
}
