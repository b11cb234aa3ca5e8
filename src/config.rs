//! Configuration for a web simulation.

use crate::error::WebError;
use crate::float::Float;
use crate::vec::Vec;

/// Order of the resolve and integrate phases inside a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum StepOrder {
    /// Resolve, integrate, publish geometry. Published geometry lags the
    /// constraint correction by one integration.
    #[default]
    ResolveFirst,
    /// Integrate, resolve, publish geometry. Published geometry reflects the
    /// settled positions of the frame just computed.
    IntegrateFirst,
}

/// Random flutter force applied along the depth axis.
///
/// Each particle, each step, with chance `probability`, receives a force drawn
/// uniformly from `[-magnitude / 2, magnitude / 2]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ForceJitter<F: Float> {
    pub probability: f64,
    pub magnitude: F,
}

impl<F: Float> ForceJitter<F> {
    pub fn new(probability: f64, magnitude: F) -> Self {
        ForceJitter { probability, magnitude }
    }

    /// A light breeze: 10% of particles per step, force up to
    /// ±250 along depth.
    pub fn breeze() -> Self {
        ForceJitter { probability: 0.1, magnitude: F::from_f32(500.0) }
    }
}

/// Configuration for a [`crate::Web`].
///
/// # Builder Pattern
/// ```
/// use gossamer::config::{WebConfig, StepOrder};
/// use gossamer::vec::Vec3;
///
/// let config: WebConfig<Vec3<f32>> = WebConfig::new()
///     .with_iterations(3)
///     .with_damping(0.99)
///     .with_capture_radius(1.5)
///     .with_step_order(StepOrder::IntegrateFirst)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct WebConfig<V: Vec> {
    /// Resolve passes per step. Default: 1, a single Gauss-Seidel sweep.
    pub iterations: usize,
    /// Fraction of the previous step's motion kept [0, 1]. 1.0 = no damping.
    /// Default: 0.99.
    pub damping: V::Scalar,
    /// Constant force on every particle. Default: zero.
    pub force: V,
    /// Optional random depth-axis flutter. Default: none.
    pub force_jitter: Option<ForceJitter<V::Scalar>>,
    /// Distance below which an unensnared particle binds to its neighbours.
    /// Default: none (no ensnaring).
    pub capture_radius: Option<V::Scalar>,
    /// Default: [`StepOrder::ResolveFirst`].
    pub step_order: StepOrder,
    /// Seed for anchor jitter and force flutter. Default: 0.
    pub seed: u64,
    /// Report particles whose position magnitude exceeds this. Default: none.
    pub divergence_limit: Option<V::Scalar>,
}

impl<V: Vec> WebConfig<V> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WebConfig {
            iterations: 1,
            damping: V::Scalar::from_f32(0.99),
            force: V::zero(),
            force_jitter: None,
            capture_radius: None,
            step_order: StepOrder::ResolveFirst,
            seed: 0,
            divergence_limit: None,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_damping(mut self, damping: V::Scalar) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_force(mut self, force: V) -> Self {
        self.force = force;
        self
    }

    pub fn with_force_jitter(mut self, jitter: ForceJitter<V::Scalar>) -> Self {
        self.force_jitter = Some(jitter);
        self
    }

    pub fn with_capture_radius(mut self, radius: V::Scalar) -> Self {
        self.capture_radius = Some(radius);
        self
    }

    pub fn with_step_order(mut self, order: StepOrder) -> Self {
        self.step_order = order;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_divergence_limit(mut self, limit: V::Scalar) -> Self {
        self.divergence_limit = Some(limit);
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), WebError> {
        if self.iterations == 0 {
            return Err(WebError::InvalidIterations);
        }
        let zero = V::Scalar::zero();
        if !self.damping.is_finite() || self.damping < zero || self.damping > V::Scalar::one() {
            return Err(WebError::InvalidDamping);
        }
        if let Some(radius) = self.capture_radius {
            if !radius.is_finite() || radius <= zero {
                return Err(WebError::InvalidCaptureRadius);
            }
        }
        if let Some(jitter) = &self.force_jitter {
            if !(0.0..=1.0).contains(&jitter.probability) || !jitter.magnitude.is_finite() {
                return Err(WebError::InvalidJitter);
            }
        }
        Ok(())
    }
}

impl<V: Vec> Default for WebConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}
