use std::ops::Range;
use std::path::{Path, PathBuf};

use eyre::Result;

use tracecall_core_rs::loc::Orientation;
use tracecall_core_rs::seq;
use tracecall_core_rs::trace::Chromatogram;
use tracecall_genotyper_rs::Reference;
use tracecall_io_rs::abif::Writer;

/// Low-quality base calls added on both sides of every synthetic read.
pub const FLANK: usize = 10;
/// Reference positions covered by the default read: panel sites 212, 274, 355 and 376.
pub const COVERED: Range<usize> = 150..450;

const CHANNEL_ORDER: [u8; 4] = *b"GATC";
const SPACING: usize = 10;
const TOP: i16 = 1000;
const SECONDARY: i16 = 400;

/// 945 bp coding sequence with an `A` at c.274.
pub fn reference() -> Result<Reference> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let body = (0..939).map(|_| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        b"ACGT"[((state >> 33) % 4) as usize]
    });

    let mut cds = b"ATG".to_vec();
    cds.extend(body);
    cds.extend_from_slice(b"TAA");
    cds[273] = b'A';
    Reference::new("synthetic", &cds, "memory")
}

/// Read-strand bases for a region of the reference.
pub fn strand(reference: &Reference, region: Range<usize>, orientation: Orientation) -> Vec<u8> {
    let bases = &reference.cds()[region];
    match orientation {
        Orientation::Forward => bases.to_vec(),
        Orientation::ReverseComplement => seq::reverse_complement(bases),
    }
}

/// Any base other than the given one.
pub fn other(base: u8) -> u8 {
    match base {
        b'A' => b'C',
        b'C' => b'G',
        b'G' => b'T',
        _ => b'A',
    }
}

/// Chromatogram with a single clean peak per base call and optional secondary peaks.
/// `secondary` receives the index of the base call among `bases` and the called base.
pub fn chromatogram(
    bases: &[u8],
    secondary: impl Fn(usize, u8) -> Option<u8>,
) -> Result<Chromatogram> {
    let total = bases.len() + 2 * FLANK;
    let mut calls = vec![b'N'; FLANK];
    calls.extend_from_slice(bases);
    calls.resize(total, b'N');

    let mut qualities = vec![8; total];
    qualities[FLANK..FLANK + bases.len()].fill(40);

    let locations = (0..total)
        .map(|x| (SPACING * x + SPACING / 2) as i16)
        .collect::<Vec<_>>();

    let mut traces: [Vec<i16>; 4] = Default::default();
    for trace in traces.iter_mut() {
        trace.resize(SPACING * total, 0);
    }
    let channel = |base: u8| CHANNEL_ORDER.iter().position(|x| *x == base);
    for (ind, base) in bases.iter().enumerate() {
        let location = locations[FLANK + ind] as usize;
        if let Some(ch) = channel(*base) {
            traces[ch][location] = TOP;
        }
        if let Some(ch) = secondary(ind, *base).and_then(channel) {
            traces[ch][location] = SECONDARY;
        }
    }

    Chromatogram::new(calls, qualities, locations, CHANNEL_ORDER, traces)
}

pub fn write(dir: &Path, name: &str, content: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

pub fn write_trace(dir: &Path, name: &str, chromatogram: &Chromatogram) -> Result<PathBuf> {
    write(dir, name, &Writer::from_chromatogram(chromatogram).finish())
}
