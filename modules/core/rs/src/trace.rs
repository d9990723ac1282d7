#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

/// A decoded Sanger chromatogram: base calls with per-base quality and peak position, plus the
/// four fluorescence channels in the instrument's channel order.
///
/// Guarantees:
/// - `bases`, `qualities` and `peak_locations` have the same length.
/// - `traces[i]` is the intensity array of the channel `channel_order[i]`. Trace arrays are
///   independent of each other and of the number of bases.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Chromatogram {
    bases: Vec<u8>,
    qualities: Vec<u8>,
    peak_locations: Vec<i16>,
    channel_order: [u8; 4],
    traces: [Vec<i16>; 4],
}

impl Chromatogram {
    pub fn new(
        bases: Vec<u8>,
        qualities: Vec<u8>,
        peak_locations: Vec<i16>,
        channel_order: [u8; 4],
        traces: [Vec<i16>; 4],
    ) -> Result<Self> {
        ensure!(
            bases.len() == qualities.len() && bases.len() == peak_locations.len(),
            "Inconsistent chromatogram lengths: {} bases, {} qualities, {} peak locations",
            bases.len(),
            qualities.len(),
            peak_locations.len()
        );
        Ok(Self {
            bases,
            qualities,
            peak_locations,
            channel_order,
            traces,
        })
    }

    /// Number of base calls.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Intensity trace of the given channel letter, if it is part of the channel order.
    pub fn trace(&self, base: u8) -> Option<&[i16]> {
        self.channel_order
            .iter()
            .position(|x| *x == base)
            .map(|ind| self.traces[ind].as_slice())
    }

    /// Maximum intensity of the channel within `[center - window, center + window]`.
    /// Absent channels and windows outside of the trace contribute 0.
    pub fn max_in_window(&self, base: u8, center: i32, window: i32) -> i32 {
        let trace = match self.trace(base) {
            Some(trace) if !trace.is_empty() => trace,
            _ => return 0,
        };

        let lo = (center - window).max(0);
        let hi = (center + window).min(trace.len() as i32 - 1);
        if hi < lo {
            return 0;
        }
        trace[lo as usize..=hi as usize]
            .iter()
            .fold(0, |acc, x| acc.max(*x as i32))
    }
}
