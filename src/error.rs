//! Error types for web construction and stimulus handling.

use thiserror::Error;

/// Errors raised when building a web, configuring it, or targeting a stimulus.
///
/// Every variant is raised before anything is mutated, so a failed call leaves
/// the web as it was. Coincident distance endpoints during a step are not an
/// error; see [`crate::constraint::Resolution::Degenerate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WebError {
    /// A constraint referenced a particle that does not exist.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },

    /// A distance constraint linked a particle to itself.
    #[error("distance constraint links particle {index} to itself")]
    SelfLink { index: usize },

    /// Rest length must be finite and non-negative.
    #[error("rest length must be finite and non-negative")]
    InvalidRestLength,

    /// A stimulus or call referenced a constraint that does not exist.
    #[error("constraint index {index} out of bounds (count: {count})")]
    ConstraintOutOfBounds { index: usize, count: usize },

    /// Only position constraints can be shaken.
    #[error("constraint {index} is not a position constraint")]
    NotAnchor { index: usize },

    /// Damping must be in [0, 1].
    #[error("damping must be in [0, 1]")]
    InvalidDamping,

    /// At least one resolve pass per step is required.
    #[error("iterations must be at least 1")]
    InvalidIterations,

    /// Capture radius must be positive and finite.
    #[error("capture radius must be positive and finite")]
    InvalidCaptureRadius,

    /// Force jitter probability must be in [0, 1] and magnitude finite.
    #[error("force jitter needs a probability in [0, 1] and a finite magnitude")]
    InvalidJitter,

    /// Shake amplitude must be finite and non-negative.
    #[error("shake amplitude must be finite and non-negative")]
    InvalidAmplitude,
}
