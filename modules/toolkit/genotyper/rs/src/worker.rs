use std::path::Path;

use eyre::Result;

use tracecall_alignment_rs::pairwise::sw;
use tracecall_io_rs::abif;

use crate::caller::Caller;
use crate::result::{Sample, SampleCallResult};

/// Per-thread state. The alignment buffers are reused across all traces handled by the thread.
#[derive(Clone, Debug, Default)]
pub struct Worker {
    engine: sw::Engine<i32>,
}

impl Worker {
    pub fn process(&mut self, caller: &Caller, path: &Path) -> Result<SampleCallResult> {
        let chromatogram = abif::read(path)?;
        caller.call(&mut self.engine, Sample::from_path(path), &chromatogram)
    }
}
