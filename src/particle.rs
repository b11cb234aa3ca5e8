//! Verlet particles with position-based dynamics.

use crate::float::Float;
use crate::vec::Vec;

/// Index of a particle inside a [`crate::Web`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleHandle(usize);

impl ParticleHandle {
    pub fn from_index(index: usize) -> Self {
        ParticleHandle(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A Verlet particle: position-based dynamics with implicit velocity.
///
/// Velocity is never stored; it is the difference between `pos` and
/// `prev_pos`. Moving `pos` without touching `prev_pos` (as constraints do)
/// therefore imparts velocity on the next integration.
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    ensnared: bool,
}

impl<V: Vec> Particle<V> {
    pub fn new(pos: V) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            ensnared: false,
        }
    }

    /// Advance one step:
    /// `next = pos + damping * (pos - prev_pos) + (force / 2) * dt²`.
    ///
    /// Large `dt` or `force` can diverge; keeping the step bounded is up to the
    /// caller.
    pub fn integrate(&mut self, dt: V::Scalar, force: V, damping: V::Scalar) {
        let inertia = self.displacement().scale(damping);
        let next = self.pos + inertia + force.scale(V::Scalar::half() * dt * dt);
        self.prev_pos = self.pos;
        self.pos = next;
    }

    /// Movement over the last step (`pos - prev_pos`).
    pub fn displacement(&self) -> V {
        self.pos - self.prev_pos
    }

    /// Move without imparting velocity.
    pub fn teleport(&mut self, pos: V) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    pub fn is_ensnared(&self) -> bool {
        self.ensnared
    }

    /// One-way: an ensnared particle is never freed.
    pub fn ensnare(&mut self) {
        self.ensnared = true;
    }
}
