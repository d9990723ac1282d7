#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};

use tracecall_core_rs::seq::NUCLEOTIDES;
use tracecall_core_rs::trace::Chromatogram;

/// Ranking of the four channel intensities around a single base call.
///
/// Ties between channels are resolved in the A, C, G, T order.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Debug, Getters, Dissolve)]
pub struct PeakSummary {
    top_base: u8,
    second_base: u8,
    top: i32,
    second: i32,
    sum: i32,
    /// top / sum
    purity: f64,
    /// second / sum
    secondary_fraction: f64,
    /// second / top
    secondary_over_top: f64,
}

impl PeakSummary {
    /// Summarize windowed maxima given in the A, C, G, T order.
    pub fn from_intensities(intensities: [i32; 4]) -> Self {
        let mut ranked = NUCLEOTIDES.into_iter().zip(intensities).collect::<Vec<_>>();
        // Stable sort keeps the nucleotide order for equal intensities
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let (top_base, top) = ranked[0];
        let (second_base, second) = ranked[1];
        let sum = intensities.iter().sum::<i32>();

        let ratio = |num: i32, denom: i32| {
            if denom > 0 {
                num as f64 / denom as f64
            } else {
                0.0
            }
        };

        Self {
            top_base,
            second_base,
            top,
            second,
            sum,
            purity: ratio(top, sum),
            secondary_fraction: ratio(second, sum),
            secondary_over_top: ratio(second, top),
        }
    }

    /// Summarize the base call at `index` using the maximum intensity of each channel within
    /// `window` pixels of the reported peak location. `None` if the index is out of range.
    pub fn at(chromatogram: &Chromatogram, index: usize, window: i32) -> Option<Self> {
        let center = *chromatogram.peak_locations().get(index)? as i32;
        let intensities = NUCLEOTIDES.map(|base| chromatogram.max_in_window(base, center, window));
        Some(Self::from_intensities(intensities))
    }
}
