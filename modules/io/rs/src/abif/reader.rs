use std::borrow::Cow;
use std::path::Path;

use eyre::{Result, WrapErr};

use tracecall_core_rs::trace::Chromatogram;

use super::entry::{DirectoryEntry, Tag};
use super::error::FormatError;
use super::{ENTRY_SIZE, MAGIC, ROOT_ENTRY_OFFSET};

/// Channel order assumed when the `FWO_1` tag does not hold exactly four letters.
pub const DEFAULT_CHANNEL_ORDER: [u8; 4] = *b"GATC";

/// Read and decode the ABIF container at the given path.
pub fn read(path: impl AsRef<Path>) -> Result<Chromatogram> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .wrap_err_with(|| format!("Failed to read ABIF file: {}", path.display()))?;
    let chromatogram = decode(&bytes)?;
    log::debug!(
        "Decoded {} base calls from {}",
        chromatogram.len(),
        path.display()
    );
    Ok(chromatogram)
}

/// Decode an in-memory ABIF container. Structural problems are reported as [FormatError].
pub fn decode(bytes: &[u8]) -> Result<Chromatogram> {
    let directory = Directory::parse(bytes)?;

    let bases = directory.payload(Tag::BASECALLS)?.into_owned();
    let qualities = directory.payload(Tag::QUALITIES)?.into_owned();
    let peak_locations = shorts(Tag::PEAK_LOCATIONS, &directory.payload(Tag::PEAK_LOCATIONS)?)?;
    let channel_order = channel_order(&directory.payload(Tag::CHANNEL_ORDER)?);

    let mut traces: [Vec<i16>; 4] = Default::default();
    for (trace, tag) in traces.iter_mut().zip(Tag::TRACES) {
        *trace = shorts(tag, &directory.payload(tag)?)?;
    }

    if bases.len() != qualities.len() || bases.len() != peak_locations.len() {
        return Err(FormatError::InconsistentLengths {
            bases: bases.len(),
            qualities: qualities.len(),
            peaks: peak_locations.len(),
        }
        .into());
    }

    Chromatogram::new(bases, qualities, peak_locations, channel_order, traces)
}

struct Directory<'a> {
    bytes: &'a [u8],
    entries: Vec<DirectoryEntry>,
}

impl<'a> Directory<'a> {
    fn parse(bytes: &'a [u8]) -> Result<Self, FormatError> {
        if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
            return Err(FormatError::BadMagic {
                found: bytes.iter().take(MAGIC.len()).copied().collect(),
            });
        }

        let minimum = ROOT_ENTRY_OFFSET + ENTRY_SIZE;
        if bytes.len() < minimum {
            return Err(FormatError::Truncated {
                size: bytes.len(),
                minimum,
            });
        }

        // The root entry points to a flat array of directory entries
        let root = DirectoryEntry::parse(bytes, ROOT_ENTRY_OFFSET)?;
        let (offset, count) = (*root.data_offset() as usize, *root.elements() as usize);
        let fits = count
            .checked_mul(ENTRY_SIZE)
            .and_then(|x| x.checked_add(offset))
            .is_some_and(|end| end <= bytes.len());
        if offset == 0 || !fits {
            return Err(FormatError::InvalidDirectory {
                offset,
                count,
                size: bytes.len(),
            });
        }

        let entries = (0..count)
            .map(|ind| DirectoryEntry::parse(bytes, offset + ind * ENTRY_SIZE))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bytes, entries })
    }

    fn payload(&self, tag: Tag) -> Result<Cow<'a, [u8]>, FormatError> {
        self.entries
            .iter()
            .find(|x| *x.tag() == tag)
            .ok_or_else(|| FormatError::MissingTag {
                tag: tag.to_string(),
            })?
            .payload(self.bytes)
    }
}

fn shorts(tag: Tag, raw: &[u8]) -> Result<Vec<i16>, FormatError> {
    if raw.len() % 2 != 0 {
        return Err(FormatError::OddShortArray {
            tag: tag.to_string(),
            size: raw.len(),
        });
    }
    Ok(raw
        .chunks_exact(2)
        .map(|x| i16::from_be_bytes([x[0], x[1]]))
        .collect())
}

fn channel_order(raw: &[u8]) -> [u8; 4] {
    let trimmed = String::from_utf8_lossy(raw);
    let trimmed = trimmed.trim_matches(|x: char| x.is_whitespace() || x == '\0');
    match <[u8; 4]>::try_from(trimmed.as_bytes()) {
        Ok(order) => order,
        Err(_) => {
            log::warn!(
                "Unexpected channel order {:?}, falling back to {}",
                trimmed,
                String::from_utf8_lossy(&DEFAULT_CHANNEL_ORDER)
            );
            DEFAULT_CHANNEL_ORDER
        }
    }
}
