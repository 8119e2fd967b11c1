use nalgebra::Point3;

use crate::{
    misc::FloatingPoint,
    parametrisation::{IntersectionParametrisation, IntersectionSide},
    surface::ParametricSurface,
};

/// Number of most recent samples ignored when looking for a loop closure.
const RECENT_SAMPLES: usize = 3;

/// A loop must be longer than this many `equality_epsilon`s in parameter space.
const LOOP_WALK_FACTOR: f64 = 2.0;

/// An intersection curve sampled in the joint parameter domain of two surfaces.
/// When `looped`, the last sample repeats the first one (up to whole periods on periodic axes).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonIntersection<T: FloatingPoint> {
    samples: Vec<IntersectionParametrisation<T>>,
    looped: bool,
}

impl<T: FloatingPoint> PolygonIntersection<T> {
    pub fn new() -> Self {
        Self {
            samples: vec![],
            looped: false,
        }
    }

    pub fn samples(&self) -> &[IntersectionParametrisation<T>] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<IntersectionParametrisation<T>> {
        self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IntersectionParametrisation<T>> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn first(&self) -> Option<&IntersectionParametrisation<T>> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&IntersectionParametrisation<T>> {
        self.samples.last()
    }

    pub(crate) fn push(&mut self, sample: IntersectionParametrisation<T>) {
        self.samples.push(sample);
    }

    /// Evaluate one side of every sample on its surface.
    pub fn points(
        &self,
        surface: &dyn ParametricSurface<T>,
        side: IntersectionSide,
    ) -> Vec<Point3<T>> {
        self.samples
            .iter()
            .map(|s| surface.evaluate(s.side(side)))
            .collect()
    }

    /// Check whether the tracer is stuck:
    /// `candidate` is closer than `minimum_step` to the last or the one before last sample.
    pub(crate) fn is_stalled(
        &self,
        candidate: &IntersectionParametrisation<T>,
        minimum_step: T,
    ) -> bool {
        self.samples
            .iter()
            .rev()
            .take(2)
            .any(|s| s.distance(candidate) < minimum_step)
    }

    /// Index of an earlier sample that `candidate` closes a loop onto.
    /// The most recent samples are skipped so the sample just added is not matched.
    /// A match also needs the walk from that sample to `candidate` to exceed
    /// `LOOP_WALK_FACTOR * epsilon`, so densely packed samples near a domain edge never close.
    pub(crate) fn find_closure(
        &self,
        candidate: &IntersectionParametrisation<T>,
        epsilon: T,
    ) -> Option<usize> {
        let n = self.samples.len().saturating_sub(RECENT_SAMPLES);
        if n == 0 {
            return None;
        }

        // walked[i]: parameter path length from sample i through the candidate
        let mut walked = vec![T::zero(); self.samples.len()];
        let last = self.samples.len() - 1;
        walked[last] = self.samples[last].wrapped_distance(candidate);
        for i in (0..last).rev() {
            walked[i] = walked[i + 1] + self.samples[i].wrapped_distance(&self.samples[i + 1]);
        }

        let minimum_walk = epsilon * T::constant(LOOP_WALK_FACTOR);
        (0..n).find(|&i| {
            walked[i] > minimum_walk && self.samples[i].wrapped_distance(candidate) < epsilon
        })
    }

    /// Close the loop onto the sample at `index`:
    /// samples before `index` are dropped and a copy of it is appended,
    /// shifted by whole periods to stay continuous with `candidate`.
    pub(crate) fn close_at(&mut self, index: usize, candidate: &IntersectionParametrisation<T>) {
        self.samples.drain(..index);
        let closing = self.samples[0].aligned_to(candidate);
        self.samples.push(closing);
        self.looped = true;
    }

    /// Reverse the sampling order.
    pub fn reversed(mut self) -> Self {
        self.samples.reverse();
        self
    }

    /// Join two polygons traced in opposite directions from the same seed.
    /// `backward` is reversed and `forward` appended without repeating the shared seed.
    /// ```
    /// use surfsect::prelude::*;
    /// let periodicity = (Periodicity::bounded(), Periodicity::bounded());
    /// let sample = |t: f64| IntersectionParametrisation::try_from_slice(&[t, t, t, t], periodicity).unwrap();
    /// let backward: PolygonIntersection<f64> = [0.5, 0.4, 0.3].into_iter().map(sample).collect();
    /// let forward: PolygonIntersection<f64> = [0.5, 0.6].into_iter().map(sample).collect();
    /// let joined = PolygonIntersection::try_join(backward, forward).unwrap();
    /// let us: Vec<f64> = joined.iter().map(|s| s.a().u()).collect();
    /// assert_eq!(us, vec![0.3, 0.4, 0.5, 0.6]);
    /// ```
    pub fn try_join(backward: Self, forward: Self) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !backward.is_empty() && !forward.is_empty(),
            "Cannot join an empty intersection polygon"
        );
        Ok(Self::join(backward, forward))
    }

    pub(crate) fn join(backward: Self, forward: Self) -> Self {
        let mut samples = backward.reversed().samples;
        samples.extend(forward.samples.into_iter().skip(1));
        Self {
            samples,
            looped: false,
        }
    }
}

impl<T: FloatingPoint> FromIterator<IntersectionParametrisation<T>> for PolygonIntersection<T> {
    fn from_iter<I: IntoIterator<Item = IntersectionParametrisation<T>>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
            looped: false,
        }
    }
}

impl<'a, T: FloatingPoint> IntoIterator for &'a PolygonIntersection<T> {
    type Item = &'a IntersectionParametrisation<T>;
    type IntoIter = std::slice::Iter<'a, IntersectionParametrisation<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
