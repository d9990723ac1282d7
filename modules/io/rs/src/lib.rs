pub mod abif;
pub mod compression;
pub mod fasta;
mod traits;

pub use traits::ReadRecord;
