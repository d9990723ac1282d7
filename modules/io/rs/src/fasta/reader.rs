use std::io::BufRead;

use derive_getters::Dissolve;
use eyre::{ensure, Result};

use super::record::Record;
use crate::traits::ReadRecord;

/// A FASTA reader that reads a single record at a time. Ignores:
/// - Carriage return characters at the end of all lines (to support Windows line endings)
/// - Blank lines and whitespace inside sequence lines
///
/// Returns an error if there are:
/// - Errors while reading from the underlying reader
/// - Extra characters before the first record
/// - Records without sequence lines
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Dissolve)]
pub struct Reader<R> {
    reader: R,
}

impl<R: BufRead> Reader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        // Leading blank lines are tolerated, anything else must be a record header
        skip_blank(&mut reader)?;
        let buffer = reader.fill_buf()?;
        ensure!(
            buffer.first().map(|x| *x == b'>').unwrap_or(true),
            "Expected '>' at the start of the FASTA file"
        );
        Ok(Self { reader })
    }

    fn read_parts(&mut self, record: &mut Record) -> Result<bool> {
        // Ensure that the next symbol is '>' and consume it
        let buffer = self.reader.fill_buf()?;
        if buffer.is_empty() {
            return Ok(false);
        }
        ensure!(
            buffer.first().map(|x| *x == b'>').unwrap_or(false),
            "Expected '>' at the start of the FASTA record"
        );
        self.reader.consume(1);

        let (id, seq) = record.fields();

        // Read the ID line
        id.clear();
        self.reader.read_line(id)?;
        while id.ends_with('\n') || id.ends_with('\r') {
            id.pop();
        }
        *id = id.trim().to_string();

        // Read the sequence lines
        seq.clear();
        loop {
            let buffer = self.reader.fill_buf()?;
            if buffer.is_empty() || buffer[0] == b'>' {
                break;
            }

            let (line, consume) = match memchr::memchr(b'\n', buffer) {
                Some(pos) => (&buffer[..pos], pos + 1),
                None => (buffer, buffer.len()),
            };
            seq.extend(line.iter().filter(|x| !x.is_ascii_whitespace()));
            self.reader.consume(consume);
        }
        Record::validate(id, seq)?;

        Ok(true)
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    /// Parse the next FASTA record into the given [Record] buffer.
    /// Returns false if there are no more records to read.
    ///
    /// On error the buffer is left in an unspecified state, but can be reused for the next read.
    fn read_record(&mut self, buf: &mut Self::Record) -> Result<bool> {
        self.read_parts(buf)
    }

    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize> {
        let mut total = 0;
        loop {
            let mut record = Record::default();
            if !self.read_record(&mut record)? {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }
}

fn skip_blank(reader: &mut impl BufRead) -> Result<()> {
    loop {
        let buffer = reader.fill_buf()?;
        let blank = buffer
            .iter()
            .take_while(|x| x.is_ascii_whitespace())
            .count();
        if blank == 0 {
            return Ok(());
        }
        reader.consume(blank);
    }
}
