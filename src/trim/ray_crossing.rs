use itertools::Itertools;
use nalgebra::Point2;

use crate::misc::{orientation, FloatingPoint, Orientation};

/// How a polygon edge meets the horizontal query ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayCrossing {
    /// The edge does not touch the ray.
    None,
    /// The edge crosses the ray strictly between its end points.
    Interior,
    /// The edge starts on the ray and leaves it towards the given side.
    Start(Orientation),
    /// The edge arrives on the ray from the given side.
    End(Orientation),
    /// The edge lies on the ray.
    Whole,
}

/// Horizontal ray from `origin` towards `+u`, long enough to leave the unit square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<T: FloatingPoint> {
    origin: Point2<T>,
    end: Point2<T>,
}

impl<T: FloatingPoint> Ray<T> {
    pub fn new(origin: Point2<T>) -> Self {
        let end = Point2::new(origin.x + T::constant(2.0), origin.y);
        Self { origin, end }
    }

    pub fn origin(&self) -> &Point2<T> {
        &self.origin
    }

    /// Check a point known to lie on the ray's line is within the ray's extent.
    fn spans(&self, p: &Point2<T>) -> bool {
        self.origin.x <= p.x && p.x <= self.end.x
    }

    /// Classify the edge `p -> q` against the ray using exact orientation predicates.
    pub fn classify(&self, p: &Point2<T>, q: &Point2<T>) -> RayCrossing {
        let sp = orientation(&self.origin, &self.end, p);
        let sq = orientation(&self.origin, &self.end, q);

        match (sp.is_collinear(), sq.is_collinear()) {
            (true, true) => {
                if self.spans(p) || self.spans(q) {
                    RayCrossing::Whole
                } else {
                    RayCrossing::None
                }
            }
            (true, false) => {
                if self.spans(p) {
                    RayCrossing::Start(sq)
                } else {
                    RayCrossing::None
                }
            }
            (false, true) => {
                if self.spans(q) {
                    RayCrossing::End(sp)
                } else {
                    RayCrossing::None
                }
            }
            (false, false) => {
                if sp == sq {
                    return RayCrossing::None;
                }
                // origin and end on the same side of the edge means the edge passes outside the ray
                let so = orientation(p, q, &self.origin);
                let se = orientation(p, q, &self.end);
                if so == se && !so.is_collinear() {
                    RayCrossing::None
                } else {
                    RayCrossing::Interior
                }
            }
        }
    }

    /// Number of times the closed polygon `vertices` crosses the ray.
    ///
    /// A run of edges touching the ray counts as one crossing only when the polygon
    /// arrives from one side and leaves towards the other, so grazing vertices and
    /// edges lying on the ray do not flip the parity.
    pub fn crossings(&self, vertices: &[Point2<T>]) -> usize {
        if vertices.len() < 2 {
            return 0;
        }

        let mut count = 0;
        // side the polygon came from before touching the ray
        let mut entered: Option<Orientation> = None;
        // side of the first departure whose arrival wraps around the end of the list
        let mut opening: Option<Orientation> = None;
        let mut seen_arrival = false;

        for (p, q) in vertices.iter().circular_tuple_windows() {
            match self.classify(p, q) {
                RayCrossing::None | RayCrossing::Whole => {}
                RayCrossing::Interior => count += 1,
                RayCrossing::End(side) => {
                    entered = Some(side);
                    seen_arrival = true;
                }
                RayCrossing::Start(side) => match entered.take() {
                    Some(from) => {
                        if from != side {
                            count += 1;
                        }
                    }
                    None => {
                        if !seen_arrival && opening.is_none() {
                            opening = Some(side);
                        }
                    }
                },
            }
        }

        if let (Some(from), Some(to)) = (entered, opening) {
            if from != to {
                count += 1;
            }
        }

        count
    }
}
