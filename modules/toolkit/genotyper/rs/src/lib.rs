pub use caller::{CallError, Caller};
pub use genotyper::Genotyper;
pub use reference::{Reference, ReferenceError};
pub use result::{Sample, SampleCallResult};

pub mod alleles;
pub mod caller;
pub mod config;
pub mod genotyper;
pub mod orient;
pub mod peaks;
pub mod qc;
pub mod reference;
pub mod result;
pub mod sites;
pub mod trim;
mod worker;
