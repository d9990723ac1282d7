pub use alignment::{LocalAlignment, Op, PositionMap, Step};

pub mod alignment;
pub mod scoring;
pub mod sw;
