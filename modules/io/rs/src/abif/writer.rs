use tracecall_core_rs::trace::Chromatogram;

use super::entry::{DirectoryEntry, ElementType, Tag};
use super::{ENTRY_SIZE, MAGIC, ROOT_ENTRY_OFFSET};

const VERSION: u16 = 101;
const HEADER_SIZE: usize = 128;

/// Minimal ABIF encoder. It writes only the entries it was given, which is enough to produce
/// synthetic chromatograms and fixtures for malformed containers.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    entries: Vec<(Tag, ElementType, u16, u32, Vec<u8>)>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer pre-populated with every tag needed to decode the chromatogram back.
    pub fn from_chromatogram(chromatogram: &Chromatogram) -> Self {
        let mut writer = Self::new()
            .push_chars(Tag::BASECALLS, chromatogram.bases().clone())
            .push_chars(Tag::QUALITIES, chromatogram.qualities().clone())
            .push_shorts(Tag::PEAK_LOCATIONS, chromatogram.peak_locations())
            .push_chars(Tag::CHANNEL_ORDER, chromatogram.channel_order().to_vec());
        for (tag, trace) in Tag::TRACES.into_iter().zip(chromatogram.traces()) {
            writer = writer.push_shorts(tag, trace);
        }
        writer
    }

    pub fn push_chars(mut self, tag: Tag, data: Vec<u8>) -> Self {
        let elements = data.len() as u32;
        self.entries.push((tag, ElementType::Char, 1, elements, data));
        self
    }

    pub fn push_bytes(mut self, tag: Tag, data: Vec<u8>) -> Self {
        let elements = data.len() as u32;
        self.entries.push((tag, ElementType::Byte, 1, elements, data));
        self
    }

    pub fn push_shorts(mut self, tag: Tag, data: &[i16]) -> Self {
        let bytes = data.iter().flat_map(|x| x.to_be_bytes()).collect();
        self.entries.push((tag, ElementType::Short, 2, data.len() as u32, bytes));
        self
    }

    /// Drop every entry with the given tag.
    pub fn without(mut self, tag: Tag) -> Self {
        self.entries.retain(|x| x.0 != tag);
        self
    }

    /// Serialize the container: header with the root entry, payloads, then the directory.
    pub fn finish(self) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes[..MAGIC.len()].copy_from_slice(MAGIC);
        bytes[MAGIC.len()..ROOT_ENTRY_OFFSET].copy_from_slice(&VERSION.to_be_bytes());

        let mut directory = Vec::with_capacity(self.entries.len());
        for (tag, etype, esize, elements, data) in self.entries {
            let size = data.len() as u32;
            let offset = if data.len() <= 4 {
                let mut inline = [0u8; 4];
                inline[..data.len()].copy_from_slice(&data);
                u32::from_be_bytes(inline)
            } else {
                let offset = bytes.len() as u32;
                bytes.extend_from_slice(&data);
                offset
            };
            directory.push(DirectoryEntry::new(tag, etype, esize, elements, size, offset, 0));
        }

        let count = directory.len() as u32;
        let root = DirectoryEntry::new(
            Tag::new(*b"tdir", 1),
            ElementType::Directory,
            ENTRY_SIZE as u16,
            count,
            count * ENTRY_SIZE as u32,
            bytes.len() as u32,
            0,
        );
        bytes[ROOT_ENTRY_OFFSET..ROOT_ENTRY_OFFSET + ENTRY_SIZE].copy_from_slice(&root.to_bytes());

        for entry in directory {
            bytes.extend_from_slice(&entry.to_bytes());
        }
        bytes
    }
}
