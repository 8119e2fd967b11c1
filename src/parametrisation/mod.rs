pub mod intersection_parametrisation;
pub mod surface_parametrisation;

pub use intersection_parametrisation::*;
pub use surface_parametrisation::*;
