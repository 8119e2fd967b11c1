use std::cmp::Ordering;

use itertools::Itertools;
use nalgebra::Point2;

use crate::{
    intersection::PolygonIntersection,
    misc::FloatingPoint,
    parametrisation::{IntersectionSide, Parametrisation},
};

/// A closed boundary polygon in the (effective) parameter domain of one surface.
/// The last vertex connects back to the first one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrimmingArea<T: FloatingPoint> {
    vertices: Vec<Point2<T>>,
}

/// Where a segment between two samples crosses a periodic seam.
struct SeamCrossing<T: FloatingPoint> {
    /// interpolation parameter along the segment
    t: T,
    /// point on the seam as the segment leaves the unit square
    exit: Point2<T>,
    /// the same point mirrored onto the opposite edge
    entry: Point2<T>,
}

impl<T: FloatingPoint> TrimmingArea<T> {
    pub fn new(vertices: Vec<Point2<T>>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point2<T>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Project one side of a traced intersection into that surface's parameter domain.
    ///
    /// Open curves ending within `snap_threshold` of a bounded edge get an extra vertex on the edge.
    /// Steps across a periodic seam are split into an exit vertex on the seam and
    /// its mirrored entry vertex on the opposite edge.
    /// ```
    /// use surfsect::prelude::*;
    /// let periodicity = (Periodicity::bounded(), Periodicity::bounded());
    /// let polygon: PolygonIntersection<f64> = [(0.02, 0.5), (0.5, 0.52), (0.97, 0.5)]
    ///     .into_iter()
    ///     .map(|(u, v)| {
    ///         IntersectionParametrisation::try_from_slice(&[u, v, 0.5, 0.5], periodicity).unwrap()
    ///     })
    ///     .collect();
    /// let area = TrimmingArea::try_from_polygon(&polygon, IntersectionSide::A, 0.05).unwrap();
    /// assert_eq!(area.len(), 5);
    /// assert_eq!(area.vertices()[0].x, 0.0);
    /// assert_eq!(area.vertices()[4].x, 1.0);
    /// ```
    pub fn try_from_polygon(
        polygon: &PolygonIntersection<T>,
        side: IntersectionSide,
        snap_threshold: T,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !polygon.is_empty(),
            "Cannot build a trimming area from an empty intersection polygon"
        );

        let params = polygon.iter().map(|s| *s.side(side)).collect_vec();

        let mut vertices = Vec::with_capacity(params.len() + 2);
        vertices.push(params[0].effective());
        for (p, q) in params.iter().tuple_windows() {
            for crossing in seam_crossings(p, q) {
                vertices.push(crossing.exit);
                vertices.push(crossing.entry);
            }
            vertices.push(q.effective());
        }

        if !polygon.is_looped() {
            let (first, last) = (&params[0], &params[params.len() - 1]);
            if let Some(snapped) = snap_to_edge(first, snap_threshold) {
                vertices.insert(0, snapped);
            }
            if let Some(snapped) = snap_to_edge(last, snap_threshold) {
                vertices.push(snapped);
            }
        }

        Ok(Self::new(vertices))
    }
}

/// A copy of `p` moved exactly onto the nearby bounded domain edges, if any is within `threshold`.
fn snap_to_edge<T: FloatingPoint>(p: &Parametrisation<T>, threshold: T) -> Option<Point2<T>> {
    let periodicity = p.periodicity();
    let snap = |value: T, periodic: bool| -> Option<T> {
        if periodic {
            None
        } else if value < threshold {
            Some(T::zero())
        } else if value > T::one() - threshold {
            Some(T::one())
        } else {
            None
        }
    };

    let e = p.effective();
    match (snap(e.x, periodicity.u), snap(e.y, periodicity.v)) {
        (None, None) => None,
        (u, v) => Some(Point2::new(u.unwrap_or(e.x), v.unwrap_or(e.y))),
    }
}

/// Seam crossings of the segment `p -> q` on its periodic axes, ordered along the segment.
fn seam_crossings<T: FloatingPoint>(
    p: &Parametrisation<T>,
    q: &Parametrisation<T>,
) -> Vec<SeamCrossing<T>> {
    let periodicity = p.periodicity();
    let (pu, pv) = p.wrap_box();
    let (qu, qv) = q.wrap_box();

    // effective coordinate of the other axis at parameter t, wrapped if that axis is periodic
    let along = |t: T, a: T, b: T, periodic: bool| {
        let value = a + (b - a) * t;
        if periodic {
            value - value.floor()
        } else {
            value
        }
    };

    let mut crossings = vec![];

    if periodicity.u && pu != qu {
        let seam = T::from_i64(pu.max(qu)).unwrap_or(T::zero());
        let t = (seam - p.u()) / (q.u() - p.u());
        let v = along(t, p.v(), q.v(), periodicity.v);
        let exit_u = if qu > pu { T::one() } else { T::zero() };
        crossings.push(SeamCrossing {
            t,
            exit: Point2::new(exit_u, v),
            entry: Point2::new(T::one() - exit_u, v),
        });
    }

    if periodicity.v && pv != qv {
        let seam = T::from_i64(pv.max(qv)).unwrap_or(T::zero());
        let t = (seam - p.v()) / (q.v() - p.v());
        let u = along(t, p.u(), q.u(), periodicity.u);
        let exit_v = if qv > pv { T::one() } else { T::zero() };
        crossings.push(SeamCrossing {
            t,
            exit: Point2::new(u, exit_v),
            entry: Point2::new(u, T::one() - exit_v),
        });
    }

    // degenerate segments exactly on a seam are left unordered
    crossings.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal));
    crossings
}
