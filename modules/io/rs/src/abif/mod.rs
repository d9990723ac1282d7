//! Reader for the ABIF container written by capillary Sanger instruments (`.ab1` files).
//!
//! Only the tags needed to rebuild a [Chromatogram](tracecall_core_rs::trace::Chromatogram) are
//! decoded: base calls (`PBAS1`), per-base quality (`PCON1`), peak locations (`PLOC1`), the
//! channel order (`FWO_1`) and the four analysed traces (`DATA9`..`DATA12`).

pub use entry::{DirectoryEntry, ElementType, Tag};
pub use error::FormatError;
pub use reader::{decode, read};
pub use writer::Writer;

mod entry;
mod error;
mod reader;
mod writer;

/// Magic bytes at the start of every ABIF container.
pub const MAGIC: &[u8; 4] = b"ABIF";
/// Offset of the root directory entry (after the magic and the 2-byte version).
pub const ROOT_ENTRY_OFFSET: usize = 6;
/// Size of a single directory entry.
pub const ENTRY_SIZE: usize = 28;
