use derive_more::Constructor;
use eyre::Result;
use itertools::Itertools;
use thiserror::Error;

use tracecall_alignment_rs::pairwise::sw;
use tracecall_core_rs::trace::Chromatogram;

use crate::alleles::DIRTY;
use crate::config::Config;
use crate::orient::OrientedRead;
use crate::qc::{DirtyReason, ReadQcSummary};
use crate::reference::Reference;
use crate::result::{Sample, SampleCallResult};
use crate::sites::{SiteCall, NO_CALL};
use crate::trim;

/// Site note for reads that did not reach the alignment score gate.
pub const ALIGNMENT_FAILED: &str = "Alignment failed";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("Read too short after quality trimming: {length} bases, at least {minimum} required")]
    ShortRead { length: usize, minimum: usize },
}

/// Calls a single chromatogram against the reference under a fixed policy.
#[derive(Clone, Copy, Debug, Constructor)]
pub struct Caller<'a> {
    config: &'a Config,
    reference: &'a Reference,
}

impl<'a> Caller<'a> {
    pub fn config(&self) -> &'a Config {
        self.config
    }

    pub fn reference(&self) -> &'a Reference {
        self.reference
    }

    /// Trim, orient, QC and genotype the read. Reads that fail the alignment gate or the QC
    /// classifier still produce a complete result, only reads that are too short are an error.
    ///
    /// The engine is rebuilt first if its scoring differs from the configured one.
    pub fn call(
        &self,
        engine: &mut sw::Engine<i32>,
        sample: Sample,
        chromatogram: &Chromatogram,
    ) -> Result<SampleCallResult> {
        let config = self.config;
        if engine.scoring() != config.scoring() {
            *engine = sw::Engine::new(*config.scoring());
        }

        let window = trim::window(chromatogram.qualities(), config.trim().min_quality);
        if window.len() < config.trim().min_length {
            return Err(CallError::ShortRead {
                length: window.len(),
                minimum: config.trim().min_length,
            }
            .into());
        }
        log::debug!(
            "{}: trimmed {} base calls to {}..{}",
            sample.name(),
            chromatogram.len(),
            window.start,
            window.end
        );

        let cds = self.reference.cds();
        let read = OrientedRead::resolve(engine, cds, chromatogram.bases(), window)?;
        let (orientation, score) = (*read.orientation(), read.score());
        let panel = config.panel();
        log::debug!(
            "{}: best alignment {:?} with score {}",
            sample.name(),
            orientation,
            score
        );

        if !config.gate().passes(score) {
            let sites = panel
                .sites()
                .iter()
                .map(|x| SiteCall::no_call(*x, ALIGNMENT_FAILED))
                .collect_vec();
            let reason = DirtyReason::LowAlignmentScore;
            return Ok(SampleCallResult::new(
                sample,
                orientation,
                score,
                true,
                Some(reason),
                sites,
                panel.label_all(NO_CALL),
                ReadQcSummary::rejected(reason),
            ));
        }

        let qc = ReadQcSummary::assess(config.qc(), config.peaks(), chromatogram, &read);
        if let Some(reason) = *qc.reason() {
            log::debug!("{}: {}", sample.name(), reason);
            let sites = panel
                .sites()
                .iter()
                .map(|x| SiteCall::no_call(*x, DIRTY))
                .collect_vec();
            return Ok(SampleCallResult::new(
                sample,
                orientation,
                score,
                true,
                Some(reason),
                sites,
                panel.label_all(DIRTY),
                qc,
            ));
        }

        let sites = panel
            .sites()
            .iter()
            .map(|x| SiteCall::call(config.sites(), config.peaks(), chromatogram, &read, *x))
            .collect_vec();
        let alleles = panel.interpret(&sites);
        Ok(SampleCallResult::new(
            sample,
            orientation,
            score,
            false,
            None,
            sites,
            alleles,
            qc,
        ))
    }
}
