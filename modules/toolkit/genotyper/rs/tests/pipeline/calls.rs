use eyre::Result;

use tracecall_alignment_rs::pairwise::scoring::Linear;
use tracecall_alignment_rs::pairwise::sw;
use tracecall_core_rs::loc::Orientation;
use tracecall_core_rs::trace::Chromatogram;
use tracecall_genotyper_rs::alleles::DIRTY;
use tracecall_genotyper_rs::caller::ALIGNMENT_FAILED;
use tracecall_genotyper_rs::config::{sites, Config};
use tracecall_genotyper_rs::qc::DirtyReason;
use tracecall_genotyper_rs::sites::{Genotype, SiteCall, NO_CALL};
use tracecall_genotyper_rs::{CallError, Caller, Reference, Sample, SampleCallResult};

use crate::fixtures::{self, COVERED, FLANK};

fn call(reference: &Reference, chromatogram: &Chromatogram) -> Result<SampleCallResult> {
    let config = Config::default();
    let mut engine = sw::Engine::default();
    let sample = Sample::new("read".into(), "read.ab1".into());
    Caller::new(&config, reference).call(&mut engine, sample, chromatogram)
}

/// Heterozygous A/G at c.274 on top of an otherwise clean read.
fn heterozygous(reference: &Reference, orientation: Orientation) -> Result<Chromatogram> {
    let bases = fixtures::strand(reference, COVERED, orientation);
    let site = match orientation {
        Orientation::Forward => 273 - COVERED.start,
        Orientation::ReverseComplement => COVERED.end - 1 - 273,
    };
    let secondary = match orientation {
        Orientation::Forward => b'G',
        Orientation::ReverseComplement => b'C',
    };
    fixtures::chromatogram(&bases, |ind, _| (ind == site).then_some(secondary))
}

fn assert_clean_calls(reference: &Reference, result: &SampleCallResult) {
    assert!(!*result.dirty());
    assert_eq!(*result.reason(), None);
    assert_eq!(result.reason_text(), "");
    assert_eq!(*result.score(), 600);

    let positions = result.sites().iter().map(|x| *x.position()).collect::<Vec<_>>();
    assert_eq!(positions, sites::POSITIONS);

    for position in [212, 355, 376] {
        let expected = Genotype::homozygous(reference.cds()[position - 1]);
        assert_eq!(result.site(position), Some(&SiteCall::called(position, expected)));
    }
    assert_eq!(
        result.site(274),
        Some(&SiteCall::called(274, Genotype::new(b'A', b'G')))
    );
    for position in [636, 637, 644, 834] {
        assert_eq!(
            result.site(position),
            Some(&SiteCall::no_call(position, "Reference position not mapped"))
        );
    }

    assert_eq!(result.allele("E status"), Some("E/other"));
    assert_eq!(result.allele("Suppression"), Some(NO_CALL));
}

#[test]
fn test_forward_read() -> Result<()> {
    let reference = fixtures::reference()?;
    let result = call(&reference, &heterozygous(&reference, Orientation::Forward)?)?;

    assert_eq!(*result.orientation(), Orientation::Forward);
    assert_clean_calls(&reference, &result);
    assert_eq!(*result.qc().total(), 300);
    assert_eq!(*result.qc().high_quality(), 300);
    assert_eq!(*result.qc().strong(), 1);
    assert_eq!(result.sample().name(), "read");
    Ok(())
}

#[test]
fn test_reverse_complement_read() -> Result<()> {
    let reference = fixtures::reference()?;
    let forward = call(&reference, &heterozygous(&reference, Orientation::Forward)?)?;
    let reverse = call(&reference, &heterozygous(&reference, Orientation::ReverseComplement)?)?;

    assert_eq!(*reverse.orientation(), Orientation::ReverseComplement);
    assert_clean_calls(&reference, &reverse);
    assert_eq!(reverse.sites(), forward.sites());
    assert_eq!(reverse.alleles(), forward.alleles());
    Ok(())
}

#[test]
fn test_mixed_template_read() -> Result<()> {
    let reference = fixtures::reference()?;
    let bases = fixtures::strand(&reference, COVERED, Orientation::Forward);
    let chromatogram = fixtures::chromatogram(&bases, |_, base| Some(fixtures::other(base)))?;

    let result = call(&reference, &chromatogram)?;
    assert!(*result.dirty());
    assert_eq!(*result.reason(), Some(DirtyReason::StrongSecondary));
    assert!(result.reason_text().starts_with("DIRTY / MIXED TEMPLATE"));
    assert_eq!(*result.score(), 600);
    assert_eq!(*result.qc().strong(), 300);

    for site in result.sites() {
        assert_eq!(*site.genotype(), Genotype::NoCall);
        assert_eq!(site.note().as_deref(), Some(DIRTY));
    }
    assert!(result.alleles().iter().all(|x| x.label() == DIRTY));
    Ok(())
}

#[test]
fn test_trimmed_length_threshold() -> Result<()> {
    let reference = fixtures::reference()?;

    let bases = fixtures::strand(&reference, 150..299, Orientation::Forward);
    let err = call(&reference, &fixtures::chromatogram(&bases, |_, _| None)?)
        .expect_err("149 trimmed bases must be rejected");
    assert_eq!(
        err.downcast_ref::<CallError>(),
        Some(&CallError::ShortRead {
            length: 149,
            minimum: 150
        })
    );

    // Long enough to be aligned, but too short to reach the score gate
    let bases = fixtures::strand(&reference, 150..300, Orientation::Forward);
    let result = call(&reference, &fixtures::chromatogram(&bases, |_, _| None)?)?;
    assert_eq!(*result.score(), 300);
    assert_eq!(*result.reason(), Some(DirtyReason::LowAlignmentScore));
    Ok(())
}

#[test]
fn test_alignment_score_gate() -> Result<()> {
    let reference = fixtures::reference()?;

    // 300 matches around a single mismatch score 599, one short of the gate
    let mut bases = fixtures::strand(&reference, 150..451, Orientation::Forward);
    bases[150] = fixtures::other(bases[150]);
    let result = call(&reference, &fixtures::chromatogram(&bases, |_, _| None)?)?;

    assert_eq!(*result.score(), 599);
    assert!(*result.dirty());
    assert_eq!(*result.reason(), Some(DirtyReason::LowAlignmentScore));
    assert_eq!(
        result.reason_text(),
        "Low alignment score - reference mismatch or very poor sequencing"
    );
    assert_eq!(result.sites().len(), sites::POSITIONS.len());
    for site in result.sites() {
        assert_eq!(*site.genotype(), Genotype::NoCall);
        assert_eq!(site.note().as_deref(), Some(ALIGNMENT_FAILED));
    }
    assert!(result.alleles().iter().all(|x| x.label() == NO_CALL));
    assert!(*result.qc().dirty());
    Ok(())
}

#[test]
fn test_low_quality_tail_outside_the_alignment() -> Result<()> {
    let reference = fixtures::reference()?;
    let mut bases = fixtures::strand(&reference, COVERED, Orientation::Forward);
    bases.resize(bases.len() + 400, b'N');

    // The tail passes trimming but matches nothing in the reference
    let (calls, mut qualities, locations, order, traces) =
        fixtures::chromatogram(&bases, |_, _| None)?.dissolve();
    qualities[FLANK + 300..FLANK + 700].fill(16);
    let chromatogram = Chromatogram::new(calls, qualities, locations, order, traces)?;

    let result = call(&reference, &chromatogram)?;
    assert_eq!(*result.score(), 600);
    assert_eq!((*result.qc().total(), *result.qc().high_quality()), (300, 300));
    assert_eq!(*result.qc().median_quality(), 16.0);
    assert!(*result.dirty());
    assert_eq!(*result.reason(), Some(DirtyReason::LowQuality));
    assert_eq!(result.reason_text(), "low base-call quality across read");
    assert!(result.alleles().iter().all(|x| x.label() == DIRTY));
    Ok(())
}

#[test]
fn test_engine_follows_configured_scoring() -> Result<()> {
    let reference = fixtures::reference()?;
    let chromatogram = heterozygous(&reference, Orientation::Forward)?;

    let mut config = Config::default();
    config.set_scoring(Linear::new(3, -1, -2))?;
    let caller = Caller::new(&config, &reference);

    // A default engine is rebuilt with the configured scoring before aligning
    let mut engine = sw::Engine::default();
    let sample = Sample::new("read".into(), "read.ab1".into());
    let result = caller.call(&mut engine, sample, &chromatogram)?;
    assert_eq!(*engine.scoring(), Linear::new(3, -1, -2));
    assert_eq!(*result.score(), 900);
    assert!(!*result.dirty());

    let result = call(&reference, &chromatogram)?;
    assert_eq!(*result.score(), 600);
    Ok(())
}
