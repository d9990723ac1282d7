use std::io::{Cursor, Read};
use std::path::Path;

use derive_getters::{Dissolve, Getters};
use eyre::{Result, WrapErr};
use thiserror::Error;

use tracecall_core_rs::seq;
use tracecall_io_rs::{compression, fasta, ReadRecord};

use crate::config::reference::{CDS_LENGTH, MIN_LENGTH, ORF_LENGTH, START_CODON, STOP_CODONS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Reference sequence is empty")]
    Empty,
    #[error("Reference contains {records} FASTA records, provide a single reference record")]
    MultipleRecords { records: usize },
    #[error("Reference sequence is too short: {length} bases, at least {minimum} required")]
    TooShort { length: usize, minimum: usize },
    #[error("Could not locate a {length} bp open reading frame starting with a start codon")]
    OrfNotFound { length: usize },
}

/// Reference coding sequence shared read-only by every sample of a batch.
///
/// The sequence is restricted to A/C/G/T/N and either is a coding sequence on its own (starts with
/// a start codon, 900-1100 bases) or is the first 945-base open reading frame of a longer input.
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Reference {
    header: String,
    cds: Vec<u8>,
    source: String,
}

impl Reference {
    /// Build the reference from a raw sequence. Characters other than A/C/G/T/N are dropped.
    pub fn new(header: impl Into<String>, raw: &[u8], source: impl Into<String>) -> Result<Self> {
        let sequence = seq::normalize(raw);
        if sequence.is_empty() {
            return Err(ReferenceError::Empty.into());
        }
        if sequence.len() < MIN_LENGTH {
            return Err(ReferenceError::TooShort {
                length: sequence.len(),
                minimum: MIN_LENGTH,
            }
            .into());
        }

        let cds = if sequence.starts_with(START_CODON) && CDS_LENGTH.contains(&sequence.len()) {
            sequence
        } else {
            let orf = find_orf(&sequence, ORF_LENGTH)
                .ok_or(ReferenceError::OrfNotFound { length: ORF_LENGTH })?;
            log::warn!(
                "Reference is not a coding sequence ({} bp), using the open reading frame at {}..{}",
                sequence.len(),
                orf,
                orf + ORF_LENGTH
            );
            sequence[orf..orf + ORF_LENGTH].to_vec()
        };

        Ok(Self {
            header: header.into(),
            cds,
            source: source.into(),
        })
    }

    /// Parse a single-record FASTA or a plain sequence. FASTA is recognised by its leading `>`.
    pub fn parse(content: &[u8], source: impl Into<String>) -> Result<Self> {
        let is_fasta = content
            .iter()
            .find(|x| !x.is_ascii_whitespace())
            .is_some_and(|x| *x == b'>');
        if !is_fasta {
            return Self::new("", content, source);
        }

        let mut records = Vec::new();
        fasta::Reader::new(Cursor::new(content))?.read_to_end(&mut records)?;
        match records.len() {
            0 => Err(ReferenceError::Empty.into()),
            1 => {
                let (id, sequence) = records.remove(0).dissolve();
                Self::new(id, &sequence, source)
            }
            records => Err(ReferenceError::MultipleRecords { records }.into()),
        }
    }

    /// Load the reference from a FASTA or plain text file, possibly gzip-compressed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut content = Vec::new();
        compression::open(path)?
            .read_to_end(&mut content)
            .wrap_err_with(|| format!("Failed to read the reference: {}", path.display()))?;

        let reference = Self::parse(&content, path.display().to_string())
            .wrap_err_with(|| format!("Invalid reference: {}", path.display()))?;
        log::info!(
            "Loaded reference '{}' ({} bp) from {}",
            reference.header,
            reference.cds.len(),
            path.display()
        );
        Ok(reference)
    }

    pub fn len(&self) -> usize {
        self.cds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cds.is_empty()
    }
}

/// Start of the first `length`-base window that begins with a start codon and ends with a stop
/// codon. Frames are scanned in order 0, 1, 2, and start positions increase within a frame.
pub fn find_orf(sequence: &[u8], length: usize) -> Option<usize> {
    if length < 2 * START_CODON.len() || sequence.len() < length {
        return None;
    }
    (0..3).find_map(|frame| {
        (frame..=sequence.len() - length)
            .step_by(3)
            .find(|&start| {
                let window = &sequence[start..start + length];
                window.starts_with(START_CODON)
                    && STOP_CODONS.iter().any(|stop| window.ends_with(*stop))
            })
    })
}
