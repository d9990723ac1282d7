#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

/// Orientation of a read relative to the reference coding sequence.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Orientation {
    /// The read runs along the reference strand as-is.
    #[default]
    Forward,
    /// The read matches the reverse complement of the reference strand.
    ReverseComplement,
}

impl Orientation {
    /// Translate an index in the oriented sequence of length `len` back to the original sequence.
    /// Forward orientation is the identity; reverse complement mirrors the index.
    pub fn to_original(&self, index: usize, len: usize) -> Option<usize> {
        match self {
            Orientation::Forward => (index < len).then_some(index),
            Orientation::ReverseComplement => len.checked_sub(index + 1),
        }
    }
}
