use nalgebra::Point2;
use robust::{orient2d, Coord};

use super::FloatingPoint;

/// Side of a point relative to a directed line.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    pub fn is_collinear(&self) -> bool {
        matches!(self, Orientation::Collinear)
    }
}

fn coord<T: FloatingPoint>(p: &Point2<T>) -> Coord<f64> {
    Coord {
        x: p.x.to_f64().unwrap_or(f64::NAN),
        y: p.y.to_f64().unwrap_or(f64::NAN),
    }
}

/// Robust orientation of `r` relative to the directed line `p -> q`.
/// The sign of the cross product `(q - p) x (r - p)` evaluated with adaptive precision.
pub fn orientation<T: FloatingPoint>(p: &Point2<T>, q: &Point2<T>, r: &Point2<T>) -> Orientation {
    let det = orient2d(coord(p), coord(q), coord(r));
    if det < 0. {
        Orientation::Clockwise
    } else if det > 0. {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_of_ray() {
        let o = Point2::new(0.25, 0.5);
        let e = Point2::new(2.25, 0.5);
        assert_eq!(
            orientation(&o, &e, &Point2::new(0.7, 0.9)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(&o, &e, &Point2::new(0.7, 0.1)),
            Orientation::Clockwise
        );
        assert!(orientation(&o, &e, &Point2::new(3.0, 0.5)).is_collinear());
    }
}
