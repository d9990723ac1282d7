use thiserror::Error;

/// Structural corruption of an ABIF container. Any of these is fatal to the input file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Not an ABIF container (expected magic 'ABIF', found {found:?})")]
    BadMagic { found: Vec<u8> },

    #[error("ABIF container is too small: {size} bytes, at least {minimum} are required")]
    Truncated { size: usize, minimum: usize },

    #[error("Invalid ABIF directory: {count} entries at offset {offset} in a {size}-byte container")]
    InvalidDirectory {
        offset: usize,
        count: usize,
        size: usize,
    },

    #[error("Missing ABIF tag {tag}")]
    MissingTag { tag: String },

    #[error("Invalid data offset for ABIF tag {tag}")]
    InvalidOffset { tag: String },

    #[error("ABIF tag {tag} holds {size} bytes, which is not a whole number of 16-bit values")]
    OddShortArray { tag: String, size: usize },

    #[error(
        "Inconsistent PBAS/PCON/PLOC lengths: {bases} bases, {qualities} qualities, {peaks} peak locations"
    )]
    InconsistentLengths {
        bases: usize,
        qualities: usize,
        peaks: usize,
    },
}
