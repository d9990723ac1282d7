use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{eyre, Report, Result};

use tracecall_core_rs::loc::Orientation;
use tracecall_core_rs::seq;
use tracecall_core_rs::trace::Chromatogram;

use crate::config::{PeakConfig, SiteConfig};
use crate::orient::{Lookup, OrientedRead};
use crate::peaks::PeakSummary;

pub const NO_CALL: &str = "NoCall";

/// Diploid genotype on the reference strand. Called alleles are kept sorted.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Genotype {
    Called(u8, u8),
    NoCall,
}

impl Genotype {
    pub fn new(first: u8, second: u8) -> Self {
        if first <= second {
            Genotype::Called(first, second)
        } else {
            Genotype::Called(second, first)
        }
    }

    pub fn homozygous(base: u8) -> Self {
        Genotype::Called(base, base)
    }

    pub fn is_called(&self) -> bool {
        matches!(self, Genotype::Called(..))
    }

    pub fn contains(&self, base: u8) -> bool {
        matches!(self, Genotype::Called(a, b) if *a == base || *b == base)
    }

    pub fn is_homozygous_for(&self, base: u8) -> bool {
        *self == Genotype::homozygous(base)
    }
}

impl Display for Genotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Genotype::Called(a, b) => write!(f, "{}/{}", *a as char, *b as char),
            Genotype::NoCall => write!(f, "{}", NO_CALL),
        }
    }
}

impl FromStr for Genotype {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self> {
        if s == NO_CALL {
            return Ok(Genotype::NoCall);
        }
        match s.as_bytes() {
            [a, b'/', b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => Ok(
                Genotype::new(a.to_ascii_uppercase(), b.to_ascii_uppercase()),
            ),
            _ => Err(eyre!("Invalid genotype: {:?}", s)),
        }
    }
}

/// Why a site could not be called.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NoCallReason {
    Unmapped,
    OutOfRange,
    LowQuality,
    LowSignal,
}

impl Display for NoCallReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NoCallReason::Unmapped => "Reference position not mapped",
            NoCallReason::OutOfRange => "Index out of range",
            NoCallReason::LowQuality => "Low quality at site",
            NoCallReason::LowSignal => "Low signal at site",
        };
        write!(f, "{}", text)
    }
}

/// Genotype at a 1-based coding sequence position with an optional explanatory note.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters, Dissolve)]
pub struct SiteCall {
    position: usize,
    genotype: Genotype,
    note: Option<String>,
}

impl SiteCall {
    pub fn called(position: usize, genotype: Genotype) -> Self {
        Self {
            position,
            genotype,
            note: None,
        }
    }

    pub fn no_call(position: usize, note: impl Into<String>) -> Self {
        Self {
            position,
            genotype: Genotype::NoCall,
            note: Some(note.into()),
        }
    }

    /// Genotype the site at the 1-based coding sequence `position`.
    /// Sites that cannot be resolved are reported as [Genotype::NoCall] with a note.
    pub fn call(
        config: &SiteConfig,
        peaks: &PeakConfig,
        chromatogram: &Chromatogram,
        read: &OrientedRead,
        position: usize,
    ) -> Self {
        let lookup = match position.checked_sub(1) {
            Some(reference) => read.lookup(reference),
            None => Lookup::Unmapped,
        };
        let index = match lookup {
            Lookup::Read(index) if index < chromatogram.len() => index,
            Lookup::Unmapped => return Self::no_call(position, NoCallReason::Unmapped.to_string()),
            _ => return Self::no_call(position, NoCallReason::OutOfRange.to_string()),
        };

        if chromatogram.qualities()[index] < config.min_quality {
            return Self::no_call(position, NoCallReason::LowQuality.to_string());
        }
        let peak = match PeakSummary::at(chromatogram, index, peaks.window) {
            Some(peak) if *peak.sum() >= config.min_signal => peak,
            Some(_) => return Self::no_call(position, NoCallReason::LowSignal.to_string()),
            None => return Self::no_call(position, NoCallReason::OutOfRange.to_string()),
        };

        let first = *peak.top_base();
        let second = if config.heterozygous.matches(&peak) {
            *peak.second_base()
        } else {
            first
        };

        // Report alleles on the reference strand
        let genotype = match read.orientation() {
            Orientation::Forward => Genotype::new(first, second),
            Orientation::ReverseComplement => {
                Genotype::new(seq::complement(first), seq::complement(second))
            }
        };
        Self::called(position, genotype)
    }
}
