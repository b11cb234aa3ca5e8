//! Web constraints: position (anchor) and distance (strand).
//!
//! Constraints act on positions directly, not through forces. A position
//! constraint is hard and snaps its particle onto the target every resolve. A
//! distance constraint is soft: each resolve applies one Gauss-Seidel
//! correction, so it is exact only in isolation or after repeated passes.

use crate::float::Float;
use crate::geometry::GeometrySink;
use crate::particle::{Particle, ParticleHandle};
use crate::perturbation::TimedPerturbation;
use crate::vec::Vec;

/// Index of a constraint inside a [`crate::Web`]; also its resolve order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(usize);

impl ConstraintHandle {
    pub fn from_index(index: usize) -> Self {
        ConstraintHandle(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Outcome of a single resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// Distance endpoints coincide; the correction was skipped.
    Degenerate,
}

/// Description of a constraint to add, validated by the web before insertion.
#[derive(Clone, Debug)]
pub enum ConstraintSpec<V: Vec> {
    Position { particle: ParticleHandle, target: V },
    Distance { a: ParticleHandle, b: ParticleHandle, rest_length: V::Scalar },
}

/// A constraint that can be applied to the web's particles.
#[derive(Clone, Debug)]
pub enum Constraint<V: Vec> {
    Position(PositionConstraint<V>),
    Distance(DistanceConstraint<V>),
}

#[derive(Clone, Debug)]
pub struct PositionConstraint<V: Vec> {
    pub particle: usize,
    pub target: V,
    pub perturbation: Option<TimedPerturbation<V>>,
}

#[derive(Clone, Debug)]
pub struct DistanceConstraint<V: Vec> {
    pub a: usize,
    pub b: usize,
    pub rest_length: V::Scalar,
}

impl<V: Vec> Constraint<V> {
    pub fn resolve(&self, particles: &mut [Particle<V>]) -> Resolution {
        match self {
            Constraint::Position(c) => c.resolve(particles),
            Constraint::Distance(c) => c.resolve(particles),
        }
    }

    /// Publish renderable geometry. Only distance constraints have any.
    pub fn update_geometry<G: GeometrySink<V>>(
        &self,
        handle: ConstraintHandle,
        particles: &[Particle<V>],
        sink: &mut G,
    ) {
        match self {
            Constraint::Position(_) => {}
            Constraint::Distance(c) => c.update_geometry(handle, particles, sink),
        }
    }

    pub fn as_position(&self) -> Option<&PositionConstraint<V>> {
        match self {
            Constraint::Position(c) => Some(c),
            Constraint::Distance(_) => None,
        }
    }

    pub fn as_distance(&self) -> Option<&DistanceConstraint<V>> {
        match self {
            Constraint::Position(_) => None,
            Constraint::Distance(c) => Some(c),
        }
    }
}

impl<V: Vec> PositionConstraint<V> {
    pub fn new(particle: usize, target: V) -> Self {
        PositionConstraint { particle, target, perturbation: None }
    }

    pub fn resolve(&self, particles: &mut [Particle<V>]) -> Resolution {
        particles[self.particle].pos = self.target;
        Resolution::Applied
    }

    pub fn is_shaking(&self) -> bool {
        self.perturbation.as_ref().is_some_and(|p| p.is_shaking())
    }
}

impl<V: Vec> DistanceConstraint<V> {
    pub fn new(a: usize, b: usize, rest_length: V::Scalar) -> Self {
        DistanceConstraint { a, b, rest_length }
    }

    /// Rest length taken from the particles' current separation.
    pub fn between(a: usize, b: usize, particles: &[Particle<V>]) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        DistanceConstraint { a, b, rest_length }
    }

    /// One relaxation step: each endpoint moves half of the remaining error
    /// along the line between them.
    pub fn resolve(&self, particles: &mut [Particle<V>]) -> Resolution {
        let delta = particles[self.a].pos - particles[self.b].pos;
        let dist = delta.length();
        if !dist.is_finite() || dist.is_near_zero(V::Scalar::from_f32(1e-12)) {
            return Resolution::Degenerate;
        }

        let norm_error = (self.rest_length - dist) / dist;
        let correction = delta.scale(V::Scalar::half() * norm_error);

        particles[self.a].pos = particles[self.a].pos + correction;
        particles[self.b].pos = particles[self.b].pos - correction;
        Resolution::Applied
    }

    pub fn update_geometry<G: GeometrySink<V>>(
        &self,
        handle: ConstraintHandle,
        particles: &[Particle<V>],
        sink: &mut G,
    ) {
        sink.segment(handle, particles[self.a].pos, particles[self.b].pos);
    }

    /// `|a - b| - rest_length`; positive when stretched.
    pub fn error(&self, particles: &[Particle<V>]) -> V::Scalar {
        particles[self.a].pos.distance(particles[self.b].pos) - self.rest_length
    }

    pub fn links(&self, i: usize, j: usize) -> bool {
        (self.a == i && self.b == j) || (self.a == j && self.b == i)
    }
}
