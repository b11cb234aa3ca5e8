//! Ensnaring: growing the web when loose particles drift close to others.
//!
//! Every particle that is not yet ensnared scans the whole web after
//! integration. Each neighbour closer than the capture radius gets a staged
//! zero-length distance constraint. Staged constraints are spliced onto the
//! web only after the sweep finishes, so a sweep never sees its own output.
//! The first scan with any neighbour in range ensnares the particle for good,
//! whether or not it created a new link.

use crate::constraint::DistanceConstraint;
use crate::float::Float;
use crate::particle::{Particle, ParticleHandle};
use crate::vec::Vec;
use alloc::collections::BTreeSet;
use alloc::vec::Vec as AllocVec;

/// Unordered particle pairs already joined by a distance constraint.
#[derive(Clone, Debug, Default)]
pub struct LinkSet {
    pairs: BTreeSet<(usize, usize)>,
}

impl LinkSet {
    pub fn new() -> Self {
        LinkSet { pairs: BTreeSet::new() }
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Returns `false` if the pair was already linked.
    pub fn insert(&mut self, a: usize, b: usize) -> bool {
        self.pairs.insert(Self::key(a, b))
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A particle that became ensnared during a sweep. `links` is zero when every
/// neighbour in range was already linked to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ensnarement {
    pub particle: ParticleHandle,
    pub links: usize,
}

/// Result of one sweep: constraints to splice, in creation order, and the
/// particles it ensnared.
#[derive(Debug)]
pub struct Sweep<V: Vec> {
    pub staged: AllocVec<DistanceConstraint<V>>,
    pub ensnared: AllocVec<Ensnarement>,
}

/// Naive all-pairs proximity binder.
///
/// A sweep costs O(n) per unensnared particle. That is fine for webs of tens to
/// low hundreds of particles; larger webs want a spatial index here.
#[derive(Copy, Clone, Debug)]
pub struct ProximityBinder<F: Float> {
    radius: F,
}

impl<F: Float> ProximityBinder<F> {
    pub fn new(radius: F) -> Self {
        ProximityBinder { radius }
    }

    pub fn radius(&self) -> F {
        self.radius
    }

    /// Scan for neighbours of `index` within the capture radius and stage a
    /// zero-length link to each one not already linked. Staged pairs are added
    /// to `links` immediately.
    ///
    /// Any neighbour in range ensnares the particle, even if every pair was
    /// already linked. Returns the number of links staged, or `None` if no
    /// neighbour was in range.
    pub fn try_bind<V: Vec<Scalar = F>>(
        &self,
        index: usize,
        particles: &mut [Particle<V>],
        links: &mut LinkSet,
        staged: &mut AllocVec<DistanceConstraint<V>>,
    ) -> Option<usize> {
        let radius_sq = self.radius * self.radius;
        let origin = particles[index].pos;
        let mut in_range = false;
        let mut count = 0;

        for (other, p) in particles.iter().enumerate() {
            if other == index || origin.distance_sq(p.pos) >= radius_sq {
                continue;
            }
            in_range = true;
            if links.insert(index, other) {
                staged.push(DistanceConstraint::new(index, other, F::zero()));
                count += 1;
            }
        }

        if !in_range {
            return None;
        }
        particles[index].ensnare();
        Some(count)
    }

    /// Run `try_bind` for every particle not yet ensnared, in index order.
    pub fn sweep<V: Vec<Scalar = F>>(
        &self,
        particles: &mut [Particle<V>],
        links: &mut LinkSet,
    ) -> Sweep<V> {
        let mut sweep = Sweep { staged: AllocVec::new(), ensnared: AllocVec::new() };

        for index in 0..particles.len() {
            if particles[index].is_ensnared() {
                continue;
            }
            if let Some(count) = self.try_bind(index, particles, links, &mut sweep.staged) {
                sweep.ensnared.push(Ensnarement {
                    particle: ParticleHandle::from_index(index),
                    links: count,
                });
            }
        }
        sweep
    }
}
