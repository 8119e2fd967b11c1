pub mod baked_trimmer;
pub mod ray_crossing;
pub mod trim_classifier;
pub mod trimming_area;

pub use baked_trimmer::*;
pub use ray_crossing::*;
pub use trim_classifier::*;
pub use trimming_area::*;

use crate::misc::FloatingPoint;

/// Which part of a surface's domain is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrimMode {
    /// Nothing is trimmed.
    #[default]
    Disabled,
    /// Keep the points inside the trimming areas.
    Inside,
    /// Keep the points outside the trimming areas.
    Outside,
}

impl TrimMode {
    /// Turn an inside/outside verdict into a kept verdict.
    pub fn resolve(&self, inside: bool) -> bool {
        match self {
            TrimMode::Disabled => true,
            TrimMode::Inside => inside,
            TrimMode::Outside => !inside,
        }
    }
}

/// Decide whether a point of a surface's parameter domain is kept.
pub trait SurfaceTrimmer<T: FloatingPoint> {
    fn trim_mode(&self) -> TrimMode;
    fn set_trim_mode(&mut self, mode: TrimMode);

    /// `true` if the point `(u, v)` of the effective domain is kept.
    fn verify_parametrisation(&self, u: T, v: T) -> bool;
}
