use derive_getters::Dissolve;
use derive_more::Constructor;

use super::orientation::Orientation;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

/// A struct that holds data for each read orientation.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Dissolve, Constructor)]
pub struct PerOrientation<T> {
    pub forward: T,
    pub reverse_complement: T,
}

impl<T> PerOrientation<T> {
    /// Orientation whose value is the largest according to `key`. Forward wins ties.
    pub fn best_by_key<K: PartialOrd>(&self, mut key: impl FnMut(&T) -> K) -> Orientation {
        if key(&self.forward) >= key(&self.reverse_complement) {
            Orientation::Forward
        } else {
            Orientation::ReverseComplement
        }
    }
}
