use derive_getters::Dissolve;
use derive_more::Constructor;
use eyre::{ensure, Result};

use tracecall_alignment_rs::pairwise::scoring::Linear;

use crate::alleles::Panel;
use crate::peaks::PeakSummary;

/// Quality trimming of read ends.
pub mod trim {
    pub const MIN_QUALITY: u8 = 15;
    pub const MIN_LENGTH: usize = 150;
}

/// Best-orientation alignment score required to trust the read at all.
pub mod align {
    pub const MIN_SCORE: i32 = 600;
}

pub mod peaks {
    /// Half-width of the pixel window around the reported peak location.
    pub const WINDOW: i32 = 2;
    /// Minimum four-channel signal sum for a usable position.
    pub const MIN_SIGNAL: i32 = 200;
}

pub mod qc {
    pub const MIN_QUALITY: u8 = 20;
    pub const LOW_PURITY: f64 = 0.55;

    pub const MODERATE_SECONDARY_FRACTION: f64 = 0.12;
    pub const MODERATE_SECONDARY_OVER_TOP: f64 = 0.20;
    pub const STRONG_SECONDARY_FRACTION: f64 = 0.22;
    pub const STRONG_SECONDARY_OVER_TOP: f64 = 0.33;

    pub const MIN_HIGH_QUALITY: usize = 200;
    pub const MIN_MEDIAN_QUALITY: f64 = 20.0;
    pub const MAX_STRONG_FRACTION: f64 = 0.08;
    pub const MAX_MODERATE_FRACTION: f64 = 0.18;
    pub const MIN_MODERATE_PURITY: f64 = 0.70;
    pub const MAX_RUN: usize = 12;
    pub const WINDOW: usize = 25;
    pub const MAX_STRONG_IN_WINDOW: usize = 6;
    pub const MAX_MODERATE_IN_WINDOW: usize = 12;
    pub const MAX_LOW_PURITY_FRACTION: f64 = 0.25;
    pub const MIN_MEDIAN_PURITY: f64 = 0.60;

    /// Upper bounds for secondary signal concentrated around a few genuine heterozygous sites.
    pub mod localized {
        pub const MAX_STRONG: usize = 6;
        pub const MAX_RUN: usize = 3;
        pub const MAX_STRONG_FRACTION: f64 = 0.03;
        pub const MAX_MODERATE_IN_WINDOW: usize = 5;
    }
}

pub mod sites {
    /// 1-based coding sequence coordinates genotyped by default.
    pub const POSITIONS: [usize; 8] = [212, 274, 355, 376, 636, 637, 644, 834];
    pub const MIN_QUALITY: u8 = 15;
    pub const HET_SECONDARY_FRACTION: f64 = 0.22;
    pub const HET_SECONDARY_OVER_TOP: f64 = 0.33;
}

pub mod reference {
    /// Length of the coding sequence extracted from longer references.
    pub const ORF_LENGTH: usize = 945;
    /// References of this length that start with a start codon are used as-is.
    pub const CDS_LENGTH: std::ops::RangeInclusive<usize> = 900..=1100;
    pub const MIN_LENGTH: usize = 200;
    pub const START_CODON: &[u8; 3] = b"ATG";
    pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TAA", b"TAG", b"TGA"];
}

pub mod batch {
    /// Worker threads requested by default: all available cores.
    pub const THREADS: isize = -1;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Constructor, Dissolve)]
pub struct TrimConfig {
    pub min_quality: u8,
    pub min_length: usize,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self::new(trim::MIN_QUALITY, trim::MIN_LENGTH)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Constructor, Dissolve)]
pub struct AlignmentGate {
    pub min_score: i32,
}

impl AlignmentGate {
    pub fn passes(&self, score: i32) -> bool {
        score >= self.min_score
    }
}

impl Default for AlignmentGate {
    fn default() -> Self {
        Self::new(align::MIN_SCORE)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Constructor, Dissolve)]
pub struct PeakConfig {
    pub window: i32,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self::new(peaks::WINDOW)
    }
}

/// A pair of gates on the secondary peak: both must be reached.
#[derive(Clone, Copy, PartialEq, Debug, Constructor, Dissolve)]
pub struct SecondaryGate {
    pub fraction: f64,
    pub over_top: f64,
}

impl SecondaryGate {
    pub fn matches(&self, peak: &PeakSummary) -> bool {
        *peak.secondary_fraction() >= self.fraction && *peak.secondary_over_top() >= self.over_top
    }
}

/// Bounds under which secondary signal is treated as localized rather than read-wide.
#[derive(Clone, Copy, PartialEq, Debug, Constructor, Dissolve)]
pub struct LocalizedConfig {
    pub max_strong: usize,
    pub max_run: usize,
    pub max_strong_fraction: f64,
    pub max_moderate_in_window: usize,
}

impl Default for LocalizedConfig {
    fn default() -> Self {
        Self::new(
            qc::localized::MAX_STRONG,
            qc::localized::MAX_RUN,
            qc::localized::MAX_STRONG_FRACTION,
            qc::localized::MAX_MODERATE_IN_WINDOW,
        )
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Dissolve)]
pub struct QcConfig {
    // Per-position gates
    pub min_quality: u8,
    pub min_signal: i32,
    pub low_purity: f64,
    pub moderate: SecondaryGate,
    pub strong: SecondaryGate,
    // Read-level verdict
    pub min_high_quality: usize,
    pub min_median_quality: f64,
    pub max_strong_fraction: f64,
    pub max_moderate_fraction: f64,
    pub min_moderate_purity: f64,
    pub max_run: usize,
    pub window: usize,
    pub max_strong_in_window: usize,
    pub max_moderate_in_window: usize,
    pub max_low_purity_fraction: f64,
    pub min_median_purity: f64,
    pub localized: LocalizedConfig,
}

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            min_quality: qc::MIN_QUALITY,
            min_signal: peaks::MIN_SIGNAL,
            low_purity: qc::LOW_PURITY,
            moderate: SecondaryGate::new(
                qc::MODERATE_SECONDARY_FRACTION,
                qc::MODERATE_SECONDARY_OVER_TOP,
            ),
            strong: SecondaryGate::new(
                qc::STRONG_SECONDARY_FRACTION,
                qc::STRONG_SECONDARY_OVER_TOP,
            ),
            min_high_quality: qc::MIN_HIGH_QUALITY,
            min_median_quality: qc::MIN_MEDIAN_QUALITY,
            max_strong_fraction: qc::MAX_STRONG_FRACTION,
            max_moderate_fraction: qc::MAX_MODERATE_FRACTION,
            min_moderate_purity: qc::MIN_MODERATE_PURITY,
            max_run: qc::MAX_RUN,
            window: qc::WINDOW,
            max_strong_in_window: qc::MAX_STRONG_IN_WINDOW,
            max_moderate_in_window: qc::MAX_MODERATE_IN_WINDOW,
            max_low_purity_fraction: qc::MAX_LOW_PURITY_FRACTION,
            min_median_purity: qc::MIN_MEDIAN_PURITY,
            localized: LocalizedConfig::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Constructor, Dissolve)]
pub struct SiteConfig {
    pub min_quality: u8,
    pub min_signal: i32,
    pub heterozygous: SecondaryGate,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(
            sites::MIN_QUALITY,
            peaks::MIN_SIGNAL,
            SecondaryGate::new(sites::HET_SECONDARY_FRACTION, sites::HET_SECONDARY_OVER_TOP),
        )
    }
}

/// Complete calling policy for a sample.
#[derive(Clone, PartialEq, Debug, Default, Dissolve)]
pub struct Config {
    trim: TrimConfig,
    gate: AlignmentGate,
    scoring: Linear<i32>,
    peaks: PeakConfig,
    qc: QcConfig,
    sites: SiteConfig,
    panel: Panel,
}

impl Config {
    pub fn trim(&self) -> &TrimConfig {
        &self.trim
    }

    pub fn gate(&self) -> &AlignmentGate {
        &self.gate
    }

    pub fn scoring(&self) -> &Linear<i32> {
        &self.scoring
    }

    pub fn peaks(&self) -> &PeakConfig {
        &self.peaks
    }

    pub fn qc(&self) -> &QcConfig {
        &self.qc
    }

    pub fn sites(&self) -> &SiteConfig {
        &self.sites
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn set_trim(&mut self, trim: TrimConfig) -> &mut Self {
        self.trim = trim;
        self
    }

    pub fn set_gate(&mut self, gate: AlignmentGate) -> &mut Self {
        self.gate = gate;
        self
    }

    pub fn set_scoring(&mut self, scoring: Linear<i32>) -> Result<&mut Self> {
        ensure!(
            scoring.matched > 0,
            "Match score must be positive for a local alignment, got {}",
            scoring.matched
        );
        self.scoring = scoring;
        Ok(self)
    }

    pub fn set_peaks(&mut self, peaks: PeakConfig) -> Result<&mut Self> {
        ensure!(
            peaks.window >= 0,
            "Peak window must be non-negative, got {}",
            peaks.window
        );
        self.peaks = peaks;
        Ok(self)
    }

    pub fn set_qc(&mut self, qc: QcConfig) -> &mut Self {
        self.qc = qc;
        self
    }

    pub fn set_sites(&mut self, sites: SiteConfig) -> &mut Self {
        self.sites = sites;
        self
    }

    pub fn set_panel(&mut self, panel: Panel) -> &mut Self {
        self.panel = panel;
        self
    }
}
