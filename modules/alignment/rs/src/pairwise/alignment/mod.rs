pub use local::LocalAlignment;
pub use map::PositionMap;
pub use op::Op;
pub use step::Step;

mod local;
mod map;
mod op;
mod step;
