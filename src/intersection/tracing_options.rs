use crate::misc::FloatingPoint;

/// Hyperparameters for the intersection solver, the marching tracer and the trimming projection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracingOptions<T: FloatingPoint> {
    /// Maximum number of iterations for a single Newton solve.
    pub maximum_newton_iterations: u64,
    /// Newton converges once the max-norm of a step falls below this length.
    /// Also the distance under which consecutive samples are considered stuck.
    pub minimum_step_length: T,
    /// Signed 3D distance between consecutive samples of the traced curve.
    pub tracking_distance: T,
    /// Open curve ends closer than this to a domain edge are snapped onto the edge.
    pub snap_threshold: T,
    /// Parameter distance under which two samples are considered identical (loop closure).
    pub equality_epsilon: T,
    /// Maximum number of samples traced in one direction.
    pub maximum_samples: usize,
}

impl<T: FloatingPoint> Default for TracingOptions<T> {
    fn default() -> Self {
        Self {
            maximum_newton_iterations: 300,
            minimum_step_length: T::constant(1e-4),
            tracking_distance: T::constant(0.05),
            snap_threshold: T::constant(0.05),
            equality_epsilon: T::constant(0.01),
            maximum_samples: 10_000,
        }
    }
}

impl<T: FloatingPoint> TracingOptions<T> {
    pub fn with_maximum_newton_iterations(mut self, iterations: u64) -> Self {
        self.maximum_newton_iterations = iterations;
        self
    }

    pub fn with_minimum_step_length(mut self, length: T) -> Self {
        self.minimum_step_length = length;
        self
    }

    pub fn with_tracking_distance(mut self, distance: T) -> Self {
        self.tracking_distance = distance;
        self
    }

    pub fn with_snap_threshold(mut self, threshold: T) -> Self {
        self.snap_threshold = threshold;
        self
    }

    pub fn with_equality_epsilon(mut self, epsilon: T) -> Self {
        self.equality_epsilon = epsilon;
        self
    }

    pub fn with_maximum_samples(mut self, samples: usize) -> Self {
        self.maximum_samples = samples;
        self
    }
}
