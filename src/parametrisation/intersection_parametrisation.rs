use std::ops::{Add, Sub};

use nalgebra::Vector4;

use crate::misc::FloatingPoint;

use super::{Parametrisation, Periodicity};

/// Selects one of the two surfaces of an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionSide {
    A,
    B,
}

/// A sample of an intersection curve in the joint 4-parameter domain:
/// (u1, v1) on surface A and (u2, v2) on surface B.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionParametrisation<T: FloatingPoint> {
    a: Parametrisation<T>,
    b: Parametrisation<T>,
}

impl<T: FloatingPoint> IntersectionParametrisation<T> {
    pub fn new(a: Parametrisation<T>, b: Parametrisation<T>) -> Self {
        Self { a, b }
    }

    /// Build from a flat `[u1, v1, u2, v2]` slice.
    /// ```
    /// use surfsect::prelude::*;
    /// let periodicity = (Periodicity::bounded(), Periodicity::new(true, false));
    /// let p = IntersectionParametrisation::try_from_slice(&[0.1, 0.2, 1.3, 0.4], periodicity).unwrap();
    /// assert_eq!(p.b().u(), 1.3);
    /// assert!(IntersectionParametrisation::try_from_slice(&[0.1, 0.2, 0.3], periodicity).is_err());
    /// ```
    pub fn try_from_slice(
        values: &[T],
        periodicity: (Periodicity, Periodicity),
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            values.len() == 4,
            "Joint parametrisation requires 4 values, got {}",
            values.len()
        );
        Ok(Self::new(
            Parametrisation::new(values[0], values[1], periodicity.0),
            Parametrisation::new(values[2], values[3], periodicity.1),
        ))
    }

    pub fn a(&self) -> &Parametrisation<T> {
        &self.a
    }

    pub fn b(&self) -> &Parametrisation<T> {
        &self.b
    }

    pub fn side(&self, side: IntersectionSide) -> &Parametrisation<T> {
        match side {
            IntersectionSide::A => &self.a,
            IntersectionSide::B => &self.b,
        }
    }

    pub fn periodicity(&self) -> (Periodicity, Periodicity) {
        (self.a.periodicity(), self.b.periodicity())
    }

    /// Flatten into `[u1, v1, u2, v2]`.
    pub fn to_vector(&self) -> Vector4<T> {
        Vector4::new(self.a.u(), self.a.v(), self.b.u(), self.b.v())
    }

    /// Replace the coordinates by `[u1, v1, u2, v2]`, keeping the periodicity.
    pub fn with_vector(&self, x: &Vector4<T>) -> Self {
        Self::new(
            Parametrisation::new(x[0], x[1], self.a.periodicity()),
            Parametrisation::new(x[2], x[3], self.b.periodicity()),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.a.is_valid() && self.b.is_valid()
    }

    /// Max-norm distance over all four unbounded coordinates.
    pub fn distance(&self, other: &Self) -> T {
        self.a.distance(&other.a).max(self.b.distance(&other.b))
    }

    /// Max-norm distance with periodic axes compared modulo 1.
    pub fn wrapped_distance(&self, other: &Self) -> T {
        self.a
            .wrapped_distance(&other.a)
            .max(self.b.wrapped_distance(&other.b))
    }

    pub fn aligned_to(&self, target: &Self) -> Self {
        Self::new(self.a.aligned_to(&target.a), self.b.aligned_to(&target.b))
    }
}

impl<T: FloatingPoint> Add for IntersectionParametrisation<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.a + rhs.a, self.b + rhs.b)
    }
}

impl<T: FloatingPoint> Sub for IntersectionParametrisation<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.a - rhs.a, self.b - rhs.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_conversion() {
        let periodicity = (Periodicity::bounded(), Periodicity::new(true, false));
        let p = IntersectionParametrisation::try_from_slice(&[0.1, 0.2, 1.3, 0.4], periodicity)
            .unwrap();
        assert_eq!(p.to_vector(), Vector4::new(0.1, 0.2, 1.3, 0.4));

        let q = p.with_vector(&Vector4::new(0.5, 0.6, -0.2, 0.8));
        assert_eq!(q.periodicity(), periodicity);
        assert!(q.is_valid());
        assert_eq!(q.side(IntersectionSide::B).u(), -0.2);
    }

    #[test]
    fn test_invalid_length() {
        let periodicity = (Periodicity::bounded(), Periodicity::bounded());
        assert!(IntersectionParametrisation::<f64>::try_from_slice(&[], periodicity).is_err());
        assert!(
            IntersectionParametrisation::try_from_slice(&[0., 0., 0., 0., 0.], periodicity)
                .is_err()
        );
    }

    #[test]
    fn test_component_wise_arithmetic() {
        let periodicity = (Periodicity::bounded(), Periodicity::bounded());
        let p = IntersectionParametrisation::try_from_slice(&[0.5, 0.5, 0.5, 0.5], periodicity)
            .unwrap();
        let d = IntersectionParametrisation::try_from_slice(&[0.25, 0., 0., -0.5], periodicity)
            .unwrap();
        let sum = p + d;
        assert_eq!(sum.to_vector(), Vector4::new(0.75, 0.5, 0.5, 0.0));
        assert_eq!((sum - d).to_vector(), p.to_vector());
        assert_eq!(sum.distance(&p), 0.5);
    }
}
