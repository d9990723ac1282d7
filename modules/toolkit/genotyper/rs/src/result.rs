use std::path::Path;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use tracecall_core_rs::loc::Orientation;

use crate::alleles::AlleleCall;
use crate::qc::{DirtyReason, ReadQcSummary};
use crate::sites::SiteCall;

/// Identity of a processed trace: the file name and the full source path.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Constructor, Getters, Dissolve)]
pub struct Sample {
    name: String,
    source: String,
}

impl Sample {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, path.display().to_string())
    }
}

/// Verdict for a single trace. Every field is populated, including rejected reads.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Debug, Constructor, Getters, Dissolve)]
pub struct SampleCallResult {
    sample: Sample,
    orientation: Orientation,
    score: i32,
    dirty: bool,
    reason: Option<DirtyReason>,
    sites: Vec<SiteCall>,
    alleles: Vec<AlleleCall>,
    qc: ReadQcSummary,
}

impl SampleCallResult {
    /// Call at the 1-based coding sequence position, if it is part of the panel.
    pub fn site(&self, position: usize) -> Option<&SiteCall> {
        self.sites.iter().find(|x| *x.position() == position)
    }

    /// Label of the allele rule with the given name.
    pub fn allele(&self, name: &str) -> Option<&str> {
        self.alleles
            .iter()
            .find(|x| x.name() == name)
            .map(|x| x.label().as_str())
    }

    /// Human readable reason, empty for clean reads.
    pub fn reason_text(&self) -> String {
        self.reason.map(|x| x.to_string()).unwrap_or_default()
    }
}
