use std::fmt::Display;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};

use tracecall_core_rs::num::median;
use tracecall_core_rs::trace::Chromatogram;

use crate::config::{PeakConfig, QcConfig};
use crate::orient::OrientedRead;
use crate::peaks::PeakSummary;

/// Why a read was rejected before site calling.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DirtyReason {
    LowAlignmentScore,
    InsufficientHighQuality,
    LowQuality,
    StrongSecondary,
    PersistentSecondary,
    LongSecondaryRun,
    ClusteredSecondary,
    LowPurity,
}

impl DirtyReason {
    /// True for reasons that point to more than one template in the reaction.
    pub fn is_mixed_template(&self) -> bool {
        matches!(
            self,
            DirtyReason::StrongSecondary
                | DirtyReason::PersistentSecondary
                | DirtyReason::LongSecondaryRun
                | DirtyReason::ClusteredSecondary
                | DirtyReason::LowPurity
        )
    }

    fn describe(&self) -> &'static str {
        match self {
            DirtyReason::LowAlignmentScore => {
                "Low alignment score - reference mismatch or very poor sequencing"
            }
            DirtyReason::InsufficientHighQuality => "insufficient high-quality aligned region",
            DirtyReason::LowQuality => "low base-call quality across read",
            DirtyReason::StrongSecondary => "strong secondary peaks across read",
            DirtyReason::PersistentSecondary => "persistent secondary peaks",
            DirtyReason::LongSecondaryRun => "long run of secondary peaks",
            DirtyReason::ClusteredSecondary => "clustered secondary peaks",
            DirtyReason::LowPurity => "low peak purity",
        }
    }
}

impl Display for DirtyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_mixed_template() {
            write!(
                f,
                "DIRTY / MIXED TEMPLATE - repeat PCR/sequencing ({})",
                self.describe()
            )
        } else {
            write!(f, "{}", self.describe())
        }
    }
}

/// Read-level statistics over the aligned region and the resulting clean/dirty verdict.
///
/// `total` counts aligned positions inside the read; `high_quality` counts those that also pass
/// the quality and signal gates. Fractions are relative to `high_quality`. `median_quality` is
/// taken over every base call of the untrimmed read.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Debug, Default, Getters, Dissolve)]
pub struct ReadQcSummary {
    dirty: bool,
    reason: Option<DirtyReason>,
    total: usize,
    high_quality: usize,
    median_quality: f64,
    median_purity: f64,
    low_purity_fraction: f64,
    moderate_fraction: f64,
    strong_fraction: f64,
    strong: usize,
    max_moderate_run: usize,
    max_moderate_in_window: usize,
    max_strong_in_window: usize,
}

impl ReadQcSummary {
    /// Summary of a read rejected before the classifier could run.
    pub fn rejected(reason: DirtyReason) -> Self {
        Self {
            dirty: true,
            reason: Some(reason),
            ..Default::default()
        }
    }

    /// Classify the base calls observed at aligned reference positions, given in increasing
    /// reference order. `None` marks a position whose base call falls outside the read.
    /// `qualities` are the quality values of the whole read.
    pub fn classify(
        config: &QcConfig,
        qualities: &[u8],
        observations: impl IntoIterator<Item = Option<(u8, PeakSummary)>>,
    ) -> Self {
        let mut purities = Vec::new();
        let mut moderate_flags = Vec::new();
        let mut strong_flags = Vec::new();
        let (mut low_purity, mut run) = (0, 0);

        let mut summary = Self::default();
        for (quality, peak) in observations.into_iter().flatten() {
            summary.total += 1;

            if quality < config.min_quality || *peak.sum() < config.min_signal {
                run = 0;
                continue;
            }

            summary.high_quality += 1;
            purities.push(*peak.purity());
            if *peak.purity() < config.low_purity {
                low_purity += 1;
            }

            let moderate = config.moderate.matches(&peak);
            let strong = config.strong.matches(&peak);
            if moderate {
                run += 1;
                summary.max_moderate_run = summary.max_moderate_run.max(run);
            } else {
                run = 0;
            }
            summary.strong += strong as usize;
            moderate_flags.push(moderate);
            strong_flags.push(strong);
        }

        let fraction = |count: usize| {
            if summary.high_quality == 0 {
                0.0
            } else {
                count as f64 / summary.high_quality as f64
            }
        };
        let moderate = moderate_flags.iter().filter(|x| **x).count();
        summary.low_purity_fraction = fraction(low_purity);
        summary.moderate_fraction = fraction(moderate);
        summary.strong_fraction = fraction(summary.strong);
        let mut qualities = qualities.iter().map(|x| *x as f64).collect::<Vec<_>>();
        summary.median_quality = median(&mut qualities);
        summary.median_purity = median(&mut purities);
        summary.max_moderate_in_window = max_in_window(&moderate_flags, config.window);
        summary.max_strong_in_window = max_in_window(&strong_flags, config.window);

        summary.reason = summary.verdict(config);
        summary.dirty = summary.reason.is_some();
        summary
    }

    /// Classify the aligned region of the read.
    pub fn assess(
        config: &QcConfig,
        peaks: &PeakConfig,
        chromatogram: &Chromatogram,
        read: &OrientedRead,
    ) -> Self {
        let observations = read.mapped().map(|(_, index)| {
            let index = index?;
            let quality = *chromatogram.qualities().get(index)?;
            let peak = PeakSummary::at(chromatogram, index, peaks.window)?;
            Some((quality, peak))
        });
        Self::classify(config, chromatogram.qualities(), observations)
    }

    /// Secondary signal confined to a few positions, as produced by genuine heterozygous sites.
    pub fn looks_localized(&self, config: &QcConfig) -> bool {
        let bounds = &config.localized;
        self.strong <= bounds.max_strong
            && self.max_moderate_run <= bounds.max_run
            && self.strong_fraction <= bounds.max_strong_fraction
            && self.max_moderate_in_window <= bounds.max_moderate_in_window
    }

    // Rules are ordered, the first one that fires wins
    fn verdict(&self, config: &QcConfig) -> Option<DirtyReason> {
        let systemic = !self.looks_localized(config);

        if self.high_quality < config.min_high_quality {
            Some(DirtyReason::InsufficientHighQuality)
        } else if self.median_quality < config.min_median_quality {
            Some(DirtyReason::LowQuality)
        } else if systemic && self.strong_fraction > config.max_strong_fraction {
            Some(DirtyReason::StrongSecondary)
        } else if systemic
            && self.moderate_fraction > config.max_moderate_fraction
            && self.median_purity < config.min_moderate_purity
        {
            Some(DirtyReason::PersistentSecondary)
        } else if systemic && self.max_moderate_run >= config.max_run {
            Some(DirtyReason::LongSecondaryRun)
        } else if systemic
            && (self.max_strong_in_window >= config.max_strong_in_window
                || self.max_moderate_in_window >= config.max_moderate_in_window)
        {
            Some(DirtyReason::ClusteredSecondary)
        } else if self.low_purity_fraction > config.max_low_purity_fraction
            || self.median_purity < config.min_median_purity
        {
            Some(DirtyReason::LowPurity)
        } else {
            None
        }
    }
}

/// Largest number of set flags inside any `window` consecutive flags.
/// Sequences shorter than the window are counted as a whole.
fn max_in_window(flags: &[bool], window: usize) -> usize {
    if flags.len() <= window {
        return flags.iter().filter(|x| **x).count();
    }

    let mut current = flags[..window].iter().filter(|x| **x).count();
    let mut best = current;
    for ind in window..flags.len() {
        current += flags[ind] as usize;
        current -= flags[ind - window] as usize;
        best = best.max(current);
    }
    best
}
