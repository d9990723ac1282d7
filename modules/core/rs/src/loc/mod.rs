pub use orientation::Orientation;
pub use per_orientation::PerOrientation;

mod orientation;
mod per_orientation;
