use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use eyre::{eyre, Result};

use tracecall_alignment_rs::pairwise::{sw, LocalAlignment};
use tracecall_core_rs::loc::{Orientation, PerOrientation};
use tracecall_core_rs::seq;

/// Trimmed read aligned to the reference in its best-scoring orientation.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve)]
pub struct OrientedRead {
    orientation: Orientation,
    alignment: LocalAlignment<i32>,
    /// Trimmed region of the read, in original base call coordinates
    window: Range<usize>,
}

impl OrientedRead {
    /// Align the trimmed read and its reverse complement against the reference. Forward wins ties.
    pub fn resolve(
        engine: &mut sw::Engine<i32>,
        reference: &[u8],
        bases: &[u8],
        window: Range<usize>,
    ) -> Result<Self> {
        let query = bases
            .get(window.clone())
            .ok_or_else(|| eyre!("Trim window {:?} exceeds {} base calls", window, bases.len()))?
            .iter()
            .map(|x| x.to_ascii_uppercase())
            .collect::<Vec<_>>();

        let alignments = PerOrientation::new(
            engine.align(reference, &query)?,
            engine.align(reference, &seq::reverse_complement(&query))?,
        );
        let orientation = alignments.best_by_key(|x| *x.score());
        let (forward, reverse_complement) = alignments.dissolve();
        let alignment = match orientation {
            Orientation::Forward => forward,
            Orientation::ReverseComplement => reverse_complement,
        };

        Ok(Self {
            orientation,
            alignment,
            window,
        })
    }

    pub fn score(&self) -> i32 {
        *self.alignment.score()
    }

    /// Original base call index of a query position of the winning alignment.
    pub fn read_index(&self, query: usize) -> Option<usize> {
        self.orientation
            .to_original(query, self.window.len())
            .map(|x| self.window.start + x)
    }

    /// Original base call index aligned to the 0-based reference position, if any.
    pub fn lookup(&self, reference: usize) -> Lookup {
        match self.alignment.map().get(reference) {
            None => Lookup::Unmapped,
            Some(query) => match self.read_index(query) {
                Some(index) => Lookup::Read(index),
                None => Lookup::OutOfRange,
            },
        }
    }

    /// Every mapped reference position, in increasing order, with its original base call index.
    pub fn mapped(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.alignment
            .map()
            .iter()
            .map(|(reference, query)| (reference, self.read_index(query)))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lookup {
    Unmapped,
    OutOfRange,
    Read(usize),
}
