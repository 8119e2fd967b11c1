pub mod intersection_newton;
pub mod intersection_problem;
pub mod polygon_intersection;
pub mod surface_intersection;
pub mod trace;
pub mod tracing_options;

pub use intersection_newton::*;
pub use intersection_problem::*;
pub use polygon_intersection::*;
pub use surface_intersection::*;
pub use trace::*;
pub use tracing_options::*;

#[cfg(test)]
mod tests;
