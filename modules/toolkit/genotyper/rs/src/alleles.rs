#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use crate::config;
use crate::sites::{Genotype, SiteCall, NO_CALL};

/// Label reported for every allele rule of a rejected read.
pub const DIRTY: &str = "DIRTY";

/// Maps the genotype at a single site to a status label, depending on the presence of a
/// designated variant base.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters, Dissolve)]
pub struct AlleleRule {
    name: String,
    /// 1-based coding sequence position
    position: usize,
    variant: u8,
    homozygous: String,
    heterozygous: String,
    absent: String,
}

impl AlleleRule {
    pub fn new(
        name: impl Into<String>,
        position: usize,
        variant: u8,
        homozygous: impl Into<String>,
        heterozygous: impl Into<String>,
        absent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            variant: variant.to_ascii_uppercase(),
            homozygous: homozygous.into(),
            heterozygous: heterozygous.into(),
            absent: absent.into(),
        }
    }

    /// `A` at c.274: E/E, E/other or Not-E.
    pub fn e_status() -> Self {
        Self::new("E status", 274, b'A', "E/E", "E/other", "Not-E")
    }

    /// `C` at c.644 on either allele suppresses.
    pub fn suppression() -> Self {
        Self::new("Suppression", 644, b'C', "Suppressed", "Suppressed", "Not suppressed")
    }

    pub fn interpret(&self, genotype: &Genotype) -> &str {
        if !genotype.is_called() {
            NO_CALL
        } else if genotype.is_homozygous_for(self.variant) {
            &self.homozygous
        } else if genotype.contains(self.variant) {
            &self.heterozygous
        } else {
            &self.absent
        }
    }
}

/// Interpreted label of an allele rule for one sample.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters, Dissolve)]
pub struct AlleleCall {
    name: String,
    label: String,
}

impl AlleleCall {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Sites genotyped for every sample and the allele rules interpreted from them.
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Panel {
    sites: Vec<usize>,
    rules: Vec<AlleleRule>,
}

impl Panel {
    pub fn new(sites: Vec<usize>, rules: Vec<AlleleRule>) -> Result<Self> {
        ensure!(!sites.is_empty(), "Panel must include at least one site");
        ensure!(
            sites.iter().all(|x| *x > 0),
            "Site positions are 1-based, got {:?}",
            sites
        );
        for rule in &rules {
            ensure!(
                sites.contains(&rule.position),
                "Allele rule '{}' refers to position {} that is not part of the panel",
                rule.name,
                rule.position
            );
        }
        Ok(Self { sites, rules })
    }

    /// Interpret every rule from the genotypes of the called sites.
    pub fn interpret(&self, calls: &[SiteCall]) -> Vec<AlleleCall> {
        self.rules
            .iter()
            .map(|rule| {
                let genotype = calls
                    .iter()
                    .find(|x| *x.position() == rule.position)
                    .map_or(Genotype::NoCall, |x| *x.genotype());
                AlleleCall::new(rule.name.as_str(), rule.interpret(&genotype))
            })
            .collect()
    }

    /// The same label for every rule, used when sites were not called.
    pub fn label_all(&self, label: &str) -> Vec<AlleleCall> {
        self.rules
            .iter()
            .map(|rule| AlleleCall::new(rule.name.as_str(), label))
            .collect()
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            sites: config::sites::POSITIONS.to_vec(),
            rules: vec![AlleleRule::e_status(), AlleleRule::suppression()],
        }
    }
}
