use nalgebra::Point2;

use crate::{
    intersection::{PolygonIntersection, TracingOptions},
    misc::FloatingPoint,
    parametrisation::IntersectionSide,
};

use super::{Ray, SurfaceTrimmer, TrimMode, TrimmingArea};

/// Classify parameter points against a set of trimming areas by ray casting.
/// ```
/// use nalgebra::Point2;
/// use surfsect::prelude::*;
/// let mut classifier = TrimClassifier::new(TrimMode::Inside);
/// classifier.add_area(TrimmingArea::new(vec![
///     Point2::new(0.25, 0.25),
///     Point2::new(0.75, 0.25),
///     Point2::new(0.75, 0.75),
///     Point2::new(0.25, 0.75),
/// ]));
/// assert!(classifier.verify_parametrisation(0.5, 0.5));
/// assert!(!classifier.verify_parametrisation(0.1, 0.5));
/// classifier.set_trim_mode(TrimMode::Outside);
/// assert!(classifier.verify_parametrisation(0.1, 0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrimClassifier<T: FloatingPoint> {
    areas: Vec<TrimmingArea<T>>,
    mode: TrimMode,
}

impl<T: FloatingPoint> TrimClassifier<T> {
    pub fn new(mode: TrimMode) -> Self {
        Self {
            areas: vec![],
            mode,
        }
    }

    pub fn areas(&self) -> &[TrimmingArea<T>] {
        &self.areas
    }

    pub fn add_area(&mut self, area: TrimmingArea<T>) {
        self.areas.push(area);
    }

    /// Project one side of a traced intersection and add it as a trimming area.
    pub fn add_polygon(
        &mut self,
        polygon: &PolygonIntersection<T>,
        side: IntersectionSide,
        options: &TracingOptions<T>,
    ) -> anyhow::Result<()> {
        let area = TrimmingArea::try_from_polygon(polygon, side, options.snap_threshold)?;
        self.add_area(area);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.areas.clear();
    }

    /// Cast the query ray from `(u, v)` against every area.
    /// Returns whether the point is inside any area and the total number of crossings.
    pub(crate) fn cast(&self, u: T, v: T) -> (bool, usize) {
        let ray = Ray::new(Point2::new(u, v));
        self.areas
            .iter()
            .fold((false, 0), |(inside, total), area| {
                let crossings = ray.crossings(area.vertices());
                (inside || crossings % 2 == 1, total + crossings)
            })
    }

    /// Check whether `(u, v)` lies inside any trimming area, regardless of the trim mode.
    pub fn is_inside(&self, u: T, v: T) -> bool {
        self.cast(u, v).0
    }
}

impl<T: FloatingPoint> SurfaceTrimmer<T> for TrimClassifier<T> {
    fn trim_mode(&self) -> TrimMode {
        self.mode
    }

    fn set_trim_mode(&mut self, mode: TrimMode) {
        self.mode = mode;
    }

    fn verify_parametrisation(&self, u: T, v: T) -> bool {
        match self.mode {
            TrimMode::Disabled => true,
            mode => mode.resolve(self.is_inside(u, v)),
        }
    }
}
