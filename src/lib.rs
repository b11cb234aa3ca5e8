//! Verlet constraint webs that grow and shake.
//!
//! `gossamer` simulates a web of point masses held together by position
//! (anchor) and distance (strand) constraints. Each frame advances the web
//! with position-based Verlet integration and Gauss-Seidel constraint
//! relaxation.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity, configurable damping
//! - **Constraints**: hard anchors and soft strands, resolved in insertion order
//! - **Ensnaring**: loose particles that drift within a capture radius are
//!   bound into the web with zero-length strands
//! - **Shaking**: anchors jitter in their mounting plane for a bounded time when
//!   an external stimulus arrives
//! - **Deterministic**: seeded randomness, simulated-time timers
//! - **Observable**: `StepObserver` hooks and `GeometrySink` segment output
//! - **`no_std` compatible**: disable the default `std` feature
//!
//! ```
//! use gossamer::{Web, WebConfig, Topology, ClothConfig, ClothAnchors, Vec3};
//!
//! let cloth = Topology::cloth(
//!     Vec3::new(0.0f32, 0.0, 0.0),
//!     &ClothConfig::classic().with_anchors(ClothAnchors::Border),
//! );
//! let mut web = Web::from_topology(&cloth, WebConfig::new().with_iterations(3)).unwrap();
//! for _ in 0..60 {
//!     web.step(1.0 / 60.0);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod perturbation;
pub mod binder;
pub mod stimulus;
pub mod geometry;
pub mod topology;
pub mod web;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, MountPlane, Vec2, Vec3};
pub use particle::{Particle, ParticleHandle};
pub use constraint::{
    Constraint, ConstraintHandle, ConstraintSpec, DistanceConstraint, PositionConstraint, Resolution,
};
pub use perturbation::{ShakeState, TimedPerturbation};
pub use binder::{LinkSet, ProximityBinder};
pub use stimulus::Stimulus;
#[cfg(feature = "std")]
pub use stimulus::StimulusSender;
pub use geometry::{GeometrySink, NullSink, SegmentBuffer};
pub use topology::{ClothAnchors, ClothConfig, Link, Topology};
pub use web::{StepReport, Web};
pub use observer::{NoOpStepObserver, StepObserver};
pub use config::{ForceJitter, StepOrder, WebConfig};
pub use error::WebError;
