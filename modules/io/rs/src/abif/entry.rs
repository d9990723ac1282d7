use std::borrow::Cow;
use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use super::error::FormatError;
use super::ENTRY_SIZE;

/// Tag name + numeric qualifier identifying a directory entry, e.g. `DATA9`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Tag {
    pub name: [u8; 4],
    pub number: u32,
}

impl Tag {
    pub const fn new(name: [u8; 4], number: u32) -> Self {
        Self { name, number }
    }

    pub const BASECALLS: Tag = Tag::new(*b"PBAS", 1);
    pub const QUALITIES: Tag = Tag::new(*b"PCON", 1);
    pub const PEAK_LOCATIONS: Tag = Tag::new(*b"PLOC", 1);
    pub const CHANNEL_ORDER: Tag = Tag::new(*b"FWO_", 1);
    /// Analysed traces, positionally matched to the channel order.
    pub const TRACES: [Tag; 4] = [
        Tag::new(*b"DATA", 9),
        Tag::new(*b"DATA", 10),
        Tag::new(*b"DATA", 11),
        Tag::new(*b"DATA", 12),
    ];
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", String::from_utf8_lossy(&self.name), self.number)
    }
}

/// Element type codes of the ABIF format.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ElementType {
    Byte,
    Char,
    Word,
    Short,
    Long,
    Float,
    Double,
    PString,
    CString,
    Directory,
    Other(u16),
}

impl ElementType {
    pub fn code(&self) -> u16 {
        match self {
            ElementType::Byte => 1,
            ElementType::Char => 2,
            ElementType::Word => 3,
            ElementType::Short => 4,
            ElementType::Long => 5,
            ElementType::Float => 7,
            ElementType::Double => 8,
            ElementType::PString => 12,
            ElementType::CString => 13,
            ElementType::Directory => 1023,
            ElementType::Other(code) => *code,
        }
    }
}

impl From<u16> for ElementType {
    fn from(value: u16) -> Self {
        match value {
            1 => ElementType::Byte,
            2 => ElementType::Char,
            3 => ElementType::Word,
            4 => ElementType::Short,
            5 => ElementType::Long,
            7 => ElementType::Float,
            8 => ElementType::Double,
            12 => ElementType::PString,
            13 => ElementType::CString,
            1023 => ElementType::Directory,
            code => ElementType::Other(code),
        }
    }
}

/// A single 28-byte directory record. All fields are stored big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Getters, Dissolve, Constructor)]
pub struct DirectoryEntry {
    tag: Tag,
    element_type: ElementType,
    element_size: u16,
    elements: u32,
    data_size: u32,
    data_offset: u32,
    handle: u32,
}

impl DirectoryEntry {
    /// Decode the entry starting at `offset`.
    pub fn parse(bytes: &[u8], offset: usize) -> Result<Self, FormatError> {
        let record = offset
            .checked_add(ENTRY_SIZE)
            .and_then(|end| bytes.get(offset..end))
            .ok_or(FormatError::Truncated {
                size: bytes.len(),
                minimum: offset.saturating_add(ENTRY_SIZE),
            })?;

        let u16_at = |at: usize| u16::from_be_bytes([record[at], record[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_be_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
        };

        Ok(Self {
            tag: Tag::new([record[0], record[1], record[2], record[3]], u32_at(4)),
            element_type: ElementType::from(u16_at(8)),
            element_size: u16_at(10),
            elements: u32_at(12),
            data_size: u32_at(16),
            data_offset: u32_at(20),
            handle: u32_at(24),
        })
    }

    /// Encode the entry into its 28-byte representation.
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut record = [0u8; ENTRY_SIZE];
        record[0..4].copy_from_slice(&self.tag.name);
        record[4..8].copy_from_slice(&self.tag.number.to_be_bytes());
        record[8..10].copy_from_slice(&self.element_type.code().to_be_bytes());
        record[10..12].copy_from_slice(&self.element_size.to_be_bytes());
        record[12..16].copy_from_slice(&self.elements.to_be_bytes());
        record[16..20].copy_from_slice(&self.data_size.to_be_bytes());
        record[20..24].copy_from_slice(&self.data_offset.to_be_bytes());
        record[24..28].copy_from_slice(&self.handle.to_be_bytes());
        record
    }

    /// Raw payload of the entry. Payloads of at most 4 bytes are stored inline in the offset field.
    pub fn payload<'a>(&self, container: &'a [u8]) -> Result<Cow<'a, [u8]>, FormatError> {
        let size = self.data_size as usize;
        if size <= 4 {
            let inline = self.data_offset.to_be_bytes();
            return Ok(Cow::Owned(inline[..size].to_vec()));
        }

        let start = self.data_offset as usize;
        start
            .checked_add(size)
            .and_then(|end| container.get(start..end))
            .map(Cow::Borrowed)
            .ok_or_else(|| FormatError::InvalidOffset {
                tag: self.tag.to_string(),
            })
    }
}
