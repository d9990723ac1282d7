use eyre::Result;

use tracecall_core_rs::loc::Orientation;
use tracecall_genotyper_rs::config::Config;
use tracecall_genotyper_rs::{Genotyper, Reference};
use tracecall_io_rs::abif::{FormatError, Tag, Writer};

use crate::fixtures::{self, COVERED};

#[test]
fn test_batch_keeps_input_order_and_isolates_failures() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let reference = fixtures::reference()?;

    let forward = fixtures::strand(&reference, COVERED, Orientation::Forward);
    let forward = fixtures::chromatogram(&forward, |_, _| None)?;
    let reverse = fixtures::strand(&reference, COVERED, Orientation::ReverseComplement);
    let reverse = fixtures::chromatogram(&reverse, |_, _| None)?;

    let mut paths = vec![
        fixtures::write_trace(dir.path(), "A01_forward.ab1", &forward)?,
        fixtures::write(
            dir.path(),
            "A02_truncated.ab1",
            &Writer::from_chromatogram(&forward)
                .without(Tag::BASECALLS)
                .finish(),
        )?,
        fixtures::write_trace(dir.path(), "A03_reverse.ab1", &reverse)?,
    ];
    paths.push(dir.path().join("A04_missing.ab1"));

    let mut genotyper = Genotyper::with_threads(2, Config::default())?;
    let results = genotyper.run(&reference, &paths);
    assert_eq!(results.len(), 4);

    let first = results[0].as_ref().map_err(|e| eyre::eyre!("{:?}", e))?;
    assert_eq!(first.sample().name(), "A01_forward.ab1");
    assert_eq!(*first.orientation(), Orientation::Forward);
    assert!(!*first.dirty());

    let err = results[1].as_ref().expect_err("PBAS1 is missing");
    assert_eq!(
        err.downcast_ref::<FormatError>(),
        Some(&FormatError::MissingTag {
            tag: "PBAS1".to_string()
        })
    );
    assert!(format!("{:?}", err).contains("A02_truncated.ab1"));

    let third = results[2].as_ref().map_err(|e| eyre::eyre!("{:?}", e))?;
    assert_eq!(third.sample().name(), "A03_reverse.ab1");
    assert_eq!(*third.orientation(), Orientation::ReverseComplement);
    assert_eq!(third.sites(), first.sites());

    assert!(results[3].is_err());
    Ok(())
}

#[test]
fn test_batch_is_idempotent() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let reference = fixtures::reference()?;

    let mut paths = Vec::new();
    for (ind, start) in [100, 150, 200, 250, 300, 350].into_iter().enumerate() {
        let bases = fixtures::strand(&reference, start..start + 320, Orientation::Forward);
        // A few isolated secondary peaks stay below the mixed-template rules
        let chromatogram = fixtures::chromatogram(&bases, |call, base| {
            (call % 97 == 50).then(|| fixtures::other(base))
        })?;
        paths.push(fixtures::write_trace(dir.path(), &format!("{}.ab1", ind), &chromatogram)?);
    }

    let mut genotyper = Genotyper::with_threads(-1, Config::default())?;
    let first = genotyper
        .run(&reference, &paths)
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    let second = genotyper
        .run(&reference, &paths)
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(first, second);

    let names = first.iter().map(|x| x.sample().name().as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["0.ab1", "1.ab1", "2.ab1", "3.ab1", "4.ab1", "5.ab1"]);
    assert!(first.iter().all(|x| *x.score() == 640 && !*x.dirty()));
    Ok(())
}

#[test]
fn test_reference_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let reference = fixtures::reference()?;

    let mut fasta = b">synthetic\n".to_vec();
    for line in reference.cds().chunks(70) {
        fasta.extend_from_slice(line);
        fasta.push(b'\n');
    }
    let path = fixtures::write(dir.path(), "reference.fa", &fasta)?;

    let loaded = Reference::from_path(&path)?;
    assert_eq!(loaded.cds(), reference.cds());
    assert_eq!(loaded.header(), "synthetic");
    assert_eq!(loaded.source(), &path.display().to_string());
    Ok(())
}
