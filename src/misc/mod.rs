pub mod floating_point;
pub mod orientation;

pub use floating_point::*;
pub use orientation::*;
