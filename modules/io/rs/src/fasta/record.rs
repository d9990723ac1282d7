#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Into;
use eyre::{ensure, Result};

/// A single FASTA record with the following guarantees:
/// - The ID can't contain any newline characters (CR or LF). Surrounding whitespace is trimmed.
/// - The sequence is non-empty and contains no whitespace.
///
/// The sequence is stored as-is: letters are not case folded and non-nucleotide symbols are kept,
/// it is up to the consumer to normalize them.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Dissolve, Getters, Into)]
pub struct Record {
    id: String,
    seq: Vec<u8>,
}

impl TryFrom<(&str, &str)> for Record {
    type Error = eyre::Report;

    fn try_from(value: (&str, &str)) -> Result<Self> {
        Self::new(value.0.to_string(), value.1.as_bytes().to_vec())
    }
}

impl Record {
    /// Creates a new FASTA record with the given ID and sequence.
    pub fn new(id: String, seq: Vec<u8>) -> Result<Self> {
        let id = id.trim().to_string();
        Self::validate(&id, &seq)?;
        Ok(Self { id, seq })
    }

    pub fn validate(id: &str, seq: &[u8]) -> Result<()> {
        ensure!(
            !id.contains(&['\n', '\r'] as &[char]),
            "Newline characters are not allowed in the FASTA ID: {id}"
        );
        ensure!(!seq.is_empty(), "FASTA sequence cannot be empty");
        if let Some(i) = seq.iter().position(|x| x.is_ascii_whitespace()) {
            return Err(eyre::eyre!("Whitespace inside the FASTA sequence at index {i}"));
        }
        Ok(())
    }

    /// Mutable access to the raw fields used by the reader to refill the record in place.
    pub(crate) fn fields(&mut self) -> (&mut String, &mut Vec<u8>) {
        (&mut self.id, &mut self.seq)
    }
}
