//! Transparent decompression of plain-text inputs. The container is detected from the file
//! signature rather than from the extension.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use eyre::{Result, WrapErr};

/// Supported containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Container {
    #[default]
    None,
    Gzip,
}

impl Container {
    /// Infer the container from the leading bytes of the stream.
    pub fn infer(head: &[u8]) -> Self {
        if infer::archive::is_gz(head) {
            Container::Gzip
        } else {
            Container::None
        }
    }
}

pub enum Decoder<R: Read + Send + 'static> {
    Raw(R),
    Gzip(flate2::read::MultiGzDecoder<R>),
}

impl<R: Read + Send + 'static> Decoder<R> {
    pub fn new(inner: R, container: Container) -> Self {
        match container {
            Container::None => Decoder::Raw(inner),
            Container::Gzip => Decoder::Gzip(flate2::read::MultiGzDecoder::new(inner)),
        }
    }

    pub fn boxed(self) -> Box<dyn Read + Send + 'static> {
        match self {
            Decoder::Raw(stream) => Box::new(stream),
            Decoder::Gzip(stream) => Box::new(stream),
        }
    }
}

/// Open the file for buffered reading, decompressing it on the fly if needed.
pub fn open(path: impl AsRef<Path>) -> Result<Box<dyn BufRead + Send + 'static>> {
    let path = path.as_ref();
    let file = File::open(path).wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let container = Container::infer(reader.fill_buf()?);
    Ok(match container {
        Container::None => Box::new(reader),
        Container::Gzip => Box::new(BufReader::new(Decoder::new(reader, container).boxed())),
    })
}
