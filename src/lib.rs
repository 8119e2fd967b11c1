pub mod closest_parameter;
pub mod intersection;
pub mod misc;
pub mod parametrisation;
pub mod surface;
pub mod trim;

pub mod prelude {
    pub use crate::closest_parameter::*;
    pub use crate::intersection::*;
    pub use crate::misc::*;
    pub use crate::parametrisation::*;
    pub use crate::surface::*;
    pub use crate::trim::*;
}
