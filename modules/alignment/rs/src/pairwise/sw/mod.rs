pub use engine::Engine;
pub use tracemat::{Trace, TraceMatrix};

mod engine;
mod tracemat;
