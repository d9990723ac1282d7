//! Nucleotide helpers shared by the reference loader, the aligner and the genotype caller.

/// The four nucleotides in their canonical order.
pub const NUCLEOTIDES: [u8; 4] = *b"ACGT";

/// Complement of a single nucleotide. Anything that is not A/C/G/T becomes N.
#[inline(always)]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => b'N',
    }
}

/// Reverse complement of the sequence.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|x| complement(*x)).collect()
}

/// Upper-case the sequence and drop everything except A/C/G/T/N.
pub fn normalize(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .map(|x| x.to_ascii_uppercase())
        .filter(|x| matches!(x, b'A' | b'C' | b'G' | b'T' | b'N'))
        .collect()
}
