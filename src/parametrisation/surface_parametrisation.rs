use std::ops::{Add, Sub};

use nalgebra::Point2;

use crate::misc::FloatingPoint;

/// Which axes of a surface domain wrap around instead of being clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Periodicity {
    pub u: bool,
    pub v: bool,
}

impl Periodicity {
    pub fn new(u: bool, v: bool) -> Self {
        Self { u, v }
    }

    /// Both axes bounded.
    pub fn bounded() -> Self {
        Self::default()
    }
}

/// Reduce a value of a periodic axis into `[0, 1)`.
fn wrap<T: FloatingPoint>(value: T, periodic: bool) -> T {
    if periodic {
        value - value.floor()
    } else {
        value
    }
}

/// Signed difference of two axis values, reduced to `[-0.5, 0.5]` on a periodic axis.
fn wrapped_difference<T: FloatingPoint>(a: T, b: T, periodic: bool) -> T {
    let d = a - b;
    if periodic {
        d - d.round()
    } else {
        d
    }
}

fn in_unit_range<T: FloatingPoint>(value: T, periodic: bool) -> bool {
    value.is_finite() && (periodic || (value >= T::zero() && value <= T::one()))
}

/// A (u, v) coordinate on a surface's parameter domain.
/// Values on periodic axes are kept unbounded so that consecutive samples stay continuous.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parametrisation<T: FloatingPoint> {
    u: T,
    v: T,
    periodicity: Periodicity,
}

impl<T: FloatingPoint> Parametrisation<T> {
    pub fn new(u: T, v: T, periodicity: Periodicity) -> Self {
        Self { u, v, periodicity }
    }

    /// A parametrisation on a surface with both axes bounded.
    pub fn bounded(u: T, v: T) -> Self {
        Self::new(u, v, Periodicity::bounded())
    }

    pub fn u(&self) -> T {
        self.u
    }

    pub fn v(&self) -> T {
        self.v
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Check the bounded axes lie in `[0, 1]`. Periodic axes accept any finite value.
    pub fn is_valid(&self) -> bool {
        in_unit_range(self.u, self.periodicity.u) && in_unit_range(self.v, self.periodicity.v)
    }

    /// Coordinates as seen by the surface, periodic axes reduced into `[0, 1)`.
    pub fn effective(&self) -> Point2<T> {
        Point2::new(
            wrap(self.u, self.periodicity.u),
            wrap(self.v, self.periodicity.v),
        )
    }

    /// The same point with periodic axes reduced into `[0, 1)`.
    pub fn normalized(&self) -> Self {
        let e = self.effective();
        Self::new(e.x, e.y, self.periodicity)
    }

    /// Integer period index of each axis (always 0 on a valid bounded axis below 1).
    pub fn wrap_box(&self) -> (i64, i64) {
        (
            self.u.floor().to_i64().unwrap_or(0),
            self.v.floor().to_i64().unwrap_or(0),
        )
    }

    /// Max-norm distance on the unbounded values.
    pub fn distance(&self, other: &Self) -> T {
        (self.u - other.u).abs().max((self.v - other.v).abs())
    }

    /// Max-norm distance where periodic axes are compared modulo 1.
    pub fn wrapped_distance(&self, other: &Self) -> T {
        let du = wrapped_difference(self.u, other.u, self.periodicity.u);
        let dv = wrapped_difference(self.v, other.v, self.periodicity.v);
        du.abs().max(dv.abs())
    }

    /// Shift periodic axes by whole periods so the value is as close as possible to `target`.
    pub fn aligned_to(&self, target: &Self) -> Self {
        let shift = |value: T, to: T, periodic: bool| {
            if periodic {
                value - (value - to).round()
            } else {
                value
            }
        };
        Self::new(
            shift(self.u, target.u, self.periodicity.u),
            shift(self.v, target.v, self.periodicity.v),
            self.periodicity,
        )
    }
}

impl<T: FloatingPoint> Add for Parametrisation<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.u + rhs.u, self.v + rhs.v, self.periodicity)
    }
}

impl<T: FloatingPoint> Sub for Parametrisation<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.u - rhs.u, self.v - rhs.v, self.periodicity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validity_only_checks_bounded_axes() {
        let periodic_u = Periodicity::new(true, false);
        assert!(Parametrisation::new(1.75, 0.5, periodic_u).is_valid());
        assert!(Parametrisation::new(-3.2, 1.0, periodic_u).is_valid());
        assert!(!Parametrisation::new(0.5, 1.01, periodic_u).is_valid());
        assert!(!Parametrisation::bounded(-0.01, 0.5).is_valid());
        assert!(!Parametrisation::new(f64::NAN, 0.5, periodic_u).is_valid());
    }

    #[test]
    fn test_effective_coordinates() {
        let p = Parametrisation::new(1.25, -0.25, Periodicity::new(true, true));
        let e = p.effective();
        assert_relative_eq!(e.x, 0.25);
        assert_relative_eq!(e.y, 0.75);
        assert_eq!(p.wrap_box(), (1, -1));
    }

    #[test]
    fn test_distances() {
        let periodic = Periodicity::new(true, false);
        let a = Parametrisation::new(0.98, 0.5, periodic);
        let b = Parametrisation::new(0.01, 0.52, periodic);
        assert_relative_eq!(a.distance(&b), 0.97, epsilon = 1e-12);
        assert_relative_eq!(a.wrapped_distance(&b), 0.03, epsilon = 1e-12);

        let aligned = b.aligned_to(&a);
        assert_relative_eq!(aligned.u(), 1.01, epsilon = 1e-12);
        assert_relative_eq!(aligned.v(), 0.52);
    }

    #[test]
    fn test_arithmetic_on_unbounded_values() {
        let periodic = Periodicity::new(false, true);
        let a = Parametrisation::new(0.5, 0.9, periodic);
        let b = Parametrisation::new(0.25, 0.3, periodic);
        let sum = a + b;
        assert_relative_eq!(sum.v(), 1.2, epsilon = 1e-12);
        assert!(sum.is_valid());
        let diff = b - a;
        assert_relative_eq!(diff.u(), -0.25);
        assert!(!diff.is_valid());
    }
}
