use std::ops::Range;

use derive_getters::{Dissolve, Getters};

use super::map::PositionMap;
use super::step::Step;

/// Best local alignment between the first (reference) and the second (query) sequence.
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct LocalAlignment<S> {
    score: S,
    /// Aligned region of the first sequence
    seq1: Range<usize>,
    /// Aligned region of the second sequence
    seq2: Range<usize>,
    steps: Vec<Step>,
    /// Reference -> query positions, populated by matches and mismatches only
    map: PositionMap,
}

impl<S> LocalAlignment<S> {
    pub(crate) fn new(
        score: S,
        seq1: Range<usize>,
        seq2: Range<usize>,
        steps: Vec<Step>,
        map: PositionMap,
    ) -> Self {
        Self {
            score,
            seq1,
            seq2,
            steps,
            map,
        }
    }

    /// True if nothing was aligned, i.e. the best local score is zero.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total number of alignment columns.
    pub fn len(&self) -> usize {
        self.steps.iter().map(|x| *x.len() as usize).sum()
    }

    /// Returns the RLE representation of the alignment.
    pub fn rle(&self) -> String {
        Step::rle_string(self.steps.iter())
    }
}
