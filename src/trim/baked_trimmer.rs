use std::marker::PhantomData;

use crate::misc::FloatingPoint;

use super::{SurfaceTrimmer, TrimClassifier, TrimMode};

/// A trim classifier evaluated once on a regular grid over the unit domain.
/// Queries look up the cell containing the point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBakedTrimmer<T>"))]
pub struct BakedTrimmer<T: FloatingPoint> {
    resolution_u: usize,
    resolution_v: usize,
    /// inside verdicts, row-major with `resolution_u` cells per row
    cells: Vec<bool>,
    mode: TrimMode,
    _marker: PhantomData<T>,
}

impl<T: FloatingPoint> BakedTrimmer<T> {
    /// Evaluate `classifier` at the center of each of `resolution_u x resolution_v` cells.
    /// The baked trimmer starts with the classifier's trim mode.
    /// ```
    /// use nalgebra::Point2;
    /// use surfsect::prelude::*;
    /// let mut classifier = TrimClassifier::new(TrimMode::Outside);
    /// classifier.add_area(TrimmingArea::new(vec![
    ///     Point2::new(0.25, 0.25),
    ///     Point2::new(0.75, 0.25),
    ///     Point2::new(0.75, 0.75),
    ///     Point2::new(0.25, 0.75),
    /// ]));
    /// let baked = BakedTrimmer::try_bake(&classifier, 16, 16).unwrap();
    /// assert!(!baked.verify_parametrisation(0.5, 0.5));
    /// assert!(baked.verify_parametrisation(0.9, 0.1));
    /// ```
    pub fn try_bake(
        classifier: &TrimClassifier<T>,
        resolution_u: usize,
        resolution_v: usize,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            resolution_u > 0 && resolution_v > 0,
            "Bake resolution must be positive, got {}x{}",
            resolution_u,
            resolution_v
        );

        let half = T::constant(0.5);
        let (su, sv) = (
            T::from_usize(resolution_u).unwrap_or(T::one()),
            T::from_usize(resolution_v).unwrap_or(T::one()),
        );

        let mut cells = vec![false; resolution_u * resolution_v];
        let mut evaluated = 0;
        for (j, row) in cells.chunks_mut(resolution_u).enumerate() {
            let v = (T::from_usize(j).unwrap_or(T::zero()) + half) / sv;
            for (i, cell) in row.iter_mut().enumerate() {
                let u = (T::from_usize(i).unwrap_or(T::zero()) + half) / su;
                let (inside, crossings) = classifier.cast(u, v);
                evaluated += 1;
                *cell = inside;
                // rays further along +u are covered by this one, the remaining cells stay outside
                if crossings == 0 {
                    break;
                }
            }
        }

        log::debug!(
            "baked {}x{} trim cells, {} evaluated",
            resolution_u,
            resolution_v,
            evaluated
        );

        Ok(Self {
            resolution_u,
            resolution_v,
            cells,
            mode: classifier.trim_mode(),
            _marker: PhantomData,
        })
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.resolution_u, self.resolution_v)
    }

    /// Inside verdict of the cell `(i, j)`, regardless of the trim mode.
    pub fn cell(&self, i: usize, j: usize) -> Option<bool> {
        (i < self.resolution_u && j < self.resolution_v)
            .then(|| self.cells[j * self.resolution_u + i])
    }

    /// Index of the cell containing `x` on an axis of `resolution` cells, clamped into the grid.
    fn index(x: T, resolution: usize) -> usize {
        let scaled = x * T::from_usize(resolution).unwrap_or(T::one());
        let index = scaled.floor().to_isize().unwrap_or(0).max(0) as usize;
        index.min(resolution - 1)
    }
}

/// Unchecked serialized form, validated before it becomes a [`BakedTrimmer`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBakedTrimmer<T: FloatingPoint> {
    resolution_u: usize,
    resolution_v: usize,
    cells: Vec<bool>,
    mode: TrimMode,
    _marker: PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T: FloatingPoint> TryFrom<RawBakedTrimmer<T>> for BakedTrimmer<T> {
    type Error = anyhow::Error;

    fn try_from(raw: RawBakedTrimmer<T>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            raw.resolution_u > 0 && raw.resolution_v > 0,
            "Bake resolution must be positive, got {}x{}",
            raw.resolution_u,
            raw.resolution_v
        );
        let expected = raw.resolution_u.checked_mul(raw.resolution_v);
        anyhow::ensure!(
            expected == Some(raw.cells.len()),
            "Expected {}x{} baked cells, got {}",
            raw.resolution_u,
            raw.resolution_v,
            raw.cells.len()
        );
        Ok(Self {
            resolution_u: raw.resolution_u,
            resolution_v: raw.resolution_v,
            cells: raw.cells,
            mode: raw.mode,
            _marker: raw._marker,
        })
    }
}

impl<T: FloatingPoint> SurfaceTrimmer<T> for BakedTrimmer<T> {
    fn trim_mode(&self) -> TrimMode {
        self.mode
    }

    fn set_trim_mode(&mut self, mode: TrimMode) {
        self.mode = mode;
    }

    fn verify_parametrisation(&self, u: T, v: T) -> bool {
        if self.mode == TrimMode::Disabled {
            return true;
        }
        let i = Self::index(u, self.resolution_u);
        let j = Self::index(v, self.resolution_v);
        self.mode.resolve(self.cells[j * self.resolution_u + i])
    }
}
