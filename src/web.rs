//! The simulated web: particles, constraints, and the per-frame step.

use crate::binder::{LinkSet, ProximityBinder};
use crate::config::{ForceJitter, StepOrder, WebConfig};
use crate::constraint::{
    Constraint, ConstraintHandle, ConstraintSpec, DistanceConstraint, PositionConstraint,
    Resolution,
};
use crate::error::WebError;
use crate::float::Float;
use crate::geometry::{GeometrySink, NullSink};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::{Particle, ParticleHandle};
use crate::perturbation::{ShakeState, TimedPerturbation};
use crate::stimulus::Stimulus;
use crate::topology::Topology;
use crate::vec::{MountPlane, Vec};
use alloc::collections::VecDeque;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

#[cfg(feature = "std")]
use crate::stimulus::StimulusSender;
#[cfg(feature = "std")]
use std::sync::mpsc;

/// What happened during one [`Web::step`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Distance corrections skipped because the endpoints coincided.
    pub degenerate: usize,
    /// Particles that became ensnared.
    pub ensnared: usize,
    /// Distance constraints added by ensnaring.
    pub links_added: usize,
    /// Stimuli that started or restarted a shake.
    pub stimuli_applied: usize,
    /// Stimuli dropped because their target was invalid.
    pub stimuli_rejected: usize,
    /// Shakes that timed out and restored their anchor.
    pub shakes_expired: usize,
    /// Particles past the divergence limit or no longer finite.
    pub diverged: usize,
}

/// A web of Verlet particles held together by position and distance
/// constraints.
///
/// Constraints are append-only and resolved in insertion order. Particles are
/// integrated and scanned for ensnaring in insertion order.
pub struct Web<V: Vec> {
    particles: AllocVec<Particle<V>>,
    constraints: AllocVec<Constraint<V>>,
    links: LinkSet,
    config: WebConfig<V>,
    binder: Option<ProximityBinder<V::Scalar>>,
    rng: SmallRng,
    pending: VecDeque<Stimulus>,
    #[cfg(feature = "std")]
    inbox: Option<(StimulusSender, mpsc::Receiver<Stimulus>)>,
}

impl<V: MountPlane> Web<V> {
    pub fn new(config: WebConfig<V>) -> Result<Self, WebError> {
        config.validate()?;
        Ok(Web {
            particles: AllocVec::new(),
            constraints: AllocVec::new(),
            links: LinkSet::new(),
            binder: config.capture_radius.map(ProximityBinder::new),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            pending: VecDeque::new(),
            #[cfg(feature = "std")]
            inbox: None,
        })
    }

    /// Build a web from a topology. Links become distance constraints in
    /// order, followed by one position constraint per anchor, so anchors are
    /// resolved last and always win.
    ///
    /// The whole topology is validated first; nothing is built on error.
    pub fn from_topology(topology: &Topology<V>, config: WebConfig<V>) -> Result<Self, WebError> {
        topology.validate()?;
        let mut web = Web::new(config)?;

        web.particles.extend(topology.points.iter().map(|&p| Particle::new(p)));
        for link in &topology.links {
            web.push_distance(DistanceConstraint::new(link.a, link.b, link.rest_length));
        }
        for &anchor in &topology.anchors {
            let target = web.particles[anchor].pos;
            web.constraints.push(Constraint::Position(PositionConstraint::new(anchor, target)));
        }

        debug!(
            particles = web.particles.len(),
            constraints = web.constraints.len(),
            anchors = topology.anchors.len(),
            "web built from topology"
        );
        Ok(web)
    }

    pub fn add_particle(&mut self, pos: V) -> ParticleHandle {
        self.particles.push(Particle::new(pos));
        ParticleHandle::from_index(self.particles.len() - 1)
    }

    /// Validate and append a constraint. On error the web is unchanged.
    pub fn add_constraint(&mut self, spec: ConstraintSpec<V>) -> Result<ConstraintHandle, WebError> {
        match spec {
            ConstraintSpec::Position { particle, target } => {
                self.check_particle(particle)?;
                self.constraints.push(Constraint::Position(PositionConstraint::new(
                    particle.index(),
                    target,
                )));
            }
            ConstraintSpec::Distance { a, b, rest_length } => {
                self.check_particle(a)?;
                self.check_particle(b)?;
                if a == b {
                    return Err(WebError::SelfLink { index: a.index() });
                }
                if !rest_length.is_finite() || rest_length < V::Scalar::zero() {
                    return Err(WebError::InvalidRestLength);
                }
                self.push_distance(DistanceConstraint::new(a.index(), b.index(), rest_length));
            }
        }
        Ok(ConstraintHandle::from_index(self.constraints.len() - 1))
    }

    /// Pin `particle` to `target`.
    pub fn add_position(&mut self, particle: ParticleHandle, target: V) -> Result<ConstraintHandle, WebError> {
        self.add_constraint(ConstraintSpec::Position { particle, target })
    }

    pub fn add_distance(
        &mut self,
        a: ParticleHandle,
        b: ParticleHandle,
        rest_length: V::Scalar,
    ) -> Result<ConstraintHandle, WebError> {
        self.add_constraint(ConstraintSpec::Distance { a, b, rest_length })
    }

    /// Link two particles at their current separation.
    pub fn add_distance_taut(&mut self, a: ParticleHandle, b: ParticleHandle) -> Result<ConstraintHandle, WebError> {
        self.check_particle(a)?;
        self.check_particle(b)?;
        let rest_length = self.particles[a.index()].pos.distance(self.particles[b.index()].pos);
        self.add_distance(a, b, rest_length)
    }

    /// Mark a particle as already part of the web so it never scans for
    /// neighbours.
    pub fn ensnare(&mut self, particle: ParticleHandle) -> Result<(), WebError> {
        self.check_particle(particle)?;
        self.particles[particle.index()].ensnare();
        Ok(())
    }

    /// Give a position constraint an idle perturbation anchored at its current
    /// target. Does nothing if one is already attached.
    pub fn attach_perturbation(&mut self, constraint: ConstraintHandle) -> Result<(), WebError> {
        let anchor = self.anchor_mut(constraint)?;
        if anchor.perturbation.is_none() {
            anchor.perturbation = Some(TimedPerturbation::new(anchor.target));
        }
        Ok(())
    }

    /// Shake an anchor for `duration` simulated seconds. Attaches a
    /// perturbation if needed; restarts the timer if already shaking.
    ///
    /// The new target takes effect at the next step.
    pub fn trigger(
        &mut self,
        constraint: ConstraintHandle,
        amplitude: V::Scalar,
        duration: V::Scalar,
    ) -> Result<(), WebError> {
        if !amplitude.is_finite() || amplitude < V::Scalar::zero() {
            return Err(WebError::InvalidAmplitude);
        }
        self.attach_perturbation(constraint)?;
        let anchor = self.anchor_mut(constraint)?;
        if let Some(shake) = anchor.perturbation.as_mut() {
            shake.trigger(amplitude, duration);
        }
        debug!(
            constraint = constraint.index(),
            amplitude = ?amplitude,
            duration = ?duration,
            "shake triggered"
        );
        Ok(())
    }

    /// Move an anchor's rest position. An idle anchor's target follows
    /// immediately; a shaking anchor jitters around the new position.
    pub fn set_anchor(&mut self, constraint: ConstraintHandle, pos: V) -> Result<(), WebError> {
        let anchor = self.anchor_mut(constraint)?;
        match anchor.perturbation.as_mut() {
            Some(shake) => {
                shake.set_anchor(pos);
                if !shake.is_shaking() {
                    anchor.target = pos;
                }
            }
            None => anchor.target = pos,
        }
        Ok(())
    }

    /// Queue a stimulus for the next step.
    pub fn enqueue(&mut self, stimulus: Stimulus) {
        self.pending.push_back(stimulus);
    }

    /// A sender other threads can use to deliver stimuli. Events are picked
    /// up at the start of the next step, after anything already enqueued.
    #[cfg(feature = "std")]
    pub fn stimulus_sender(&mut self) -> StimulusSender {
        let (sender, _) = self.inbox.get_or_insert_with(|| {
            let (tx, rx) = mpsc::channel();
            (StimulusSender::new(tx), rx)
        });
        sender.clone()
    }

    /// Advance one frame without observation.
    pub fn step(&mut self, dt: V::Scalar) -> StepReport {
        self.step_with(dt, &mut NoOpStepObserver, &mut NullSink)
    }

    /// Advance one frame.
    ///
    /// Stimuli are applied and shaking targets re-jittered first. Then,
    /// depending on [`StepOrder`], constraints are resolved `iterations`
    /// times before or after integration; ensnaring always follows
    /// integration. Geometry is published last, then shake timers spend `dt`.
    pub fn step_with<O: StepObserver, G: GeometrySink<V>>(
        &mut self,
        dt: V::Scalar,
        observer: &mut O,
        sink: &mut G,
    ) -> StepReport {
        let mut report = StepReport::default();

        self.drain_stimuli(observer, &mut report);
        self.refresh_targets();

        match self.config.step_order {
            StepOrder::ResolveFirst => {
                self.resolve(observer, &mut report);
                self.integrate(dt, observer);
                self.bind(observer, &mut report);
            }
            StepOrder::IntegrateFirst => {
                self.integrate(dt, observer);
                self.bind(observer, &mut report);
                self.resolve(observer, &mut report);
            }
        }

        for (i, c) in self.constraints.iter().enumerate() {
            c.update_geometry(ConstraintHandle::from_index(i), &self.particles, sink);
        }

        self.advance_shakes(dt, observer, &mut report);
        self.check_divergence(&mut report);

        observer.on_step_complete();
        report
    }

    fn drain_stimuli<O: StepObserver>(&mut self, observer: &mut O, report: &mut StepReport) {
        self.drain_inbox();

        while let Some(stimulus) = self.pending.pop_front() {
            let Stimulus::Perturb { target_index, amplitude, duration_ms } = stimulus;
            let handle = ConstraintHandle::from_index(target_index);
            let result = self.trigger(
                handle,
                V::Scalar::from_f64(amplitude),
                V::Scalar::from_f64(duration_ms / 1000.0),
            );
            match result {
                Ok(()) => {
                    report.stimuli_applied += 1;
                    observer.on_shake(handle, ShakeState::Shaking);
                }
                Err(err) => {
                    report.stimuli_rejected += 1;
                    warn!(target_index, %err, "stimulus rejected");
                }
            }
        }
    }

    #[cfg(feature = "std")]
    fn drain_inbox(&mut self) {
        if let Some((_, rx)) = &self.inbox {
            while let Ok(stimulus) = rx.try_recv() {
                self.pending.push_back(stimulus);
            }
        }
    }

    #[cfg(not(feature = "std"))]
    fn drain_inbox(&mut self) {}

    fn refresh_targets(&mut self) {
        for c in self.constraints.iter_mut() {
            if let Constraint::Position(anchor) = c {
                if let Some(shake) = &anchor.perturbation {
                    if shake.is_shaking() {
                        anchor.target = shake.target(&mut self.rng);
                    }
                }
            }
        }
    }

    fn resolve<O: StepObserver>(&mut self, observer: &mut O, report: &mut StepReport) {
        for pass in 0..self.config.iterations {
            for (i, c) in self.constraints.iter().enumerate() {
                if c.resolve(&mut self.particles) == Resolution::Degenerate {
                    report.degenerate += 1;
                    observer.on_degenerate(ConstraintHandle::from_index(i));
                    trace!(constraint = i, "coincident endpoints, correction skipped");
                }
            }
            observer.on_resolve_pass(pass);
        }
    }

    fn integrate<O: StepObserver>(&mut self, dt: V::Scalar, observer: &mut O) {
        let damping = self.config.damping;
        for p in self.particles.iter_mut() {
            let force = self.config.force
                + flutter::<V, _>(&mut self.rng, self.config.force_jitter.as_ref());
            p.integrate(dt, force, damping);
        }
        observer.on_integrate();
    }

    fn bind<O: StepObserver>(&mut self, observer: &mut O, report: &mut StepReport) {
        let Some(binder) = self.binder else {
            return;
        };
        let sweep = binder.sweep(&mut self.particles, &mut self.links);

        report.links_added += sweep.staged.len();
        report.ensnared += sweep.ensnared.len();
        self.constraints.extend(sweep.staged.into_iter().map(Constraint::Distance));

        for e in sweep.ensnared {
            debug!(particle = e.particle.index(), links = e.links, "particle ensnared");
            observer.on_ensnared(e.particle, e.links);
        }
    }

    fn advance_shakes<O: StepObserver>(&mut self, dt: V::Scalar, observer: &mut O, report: &mut StepReport) {
        for (i, c) in self.constraints.iter_mut().enumerate() {
            let Constraint::Position(anchor) = c else {
                continue;
            };
            let Some(shake) = anchor.perturbation.as_mut() else {
                continue;
            };
            if shake.advance(dt) {
                anchor.target = shake.anchor();
                report.shakes_expired += 1;
                debug!(constraint = i, "shake expired, anchor restored");
                observer.on_shake(ConstraintHandle::from_index(i), shake.state());
            }
        }
    }

    fn check_divergence(&self, report: &mut StepReport) {
        let Some(limit) = self.config.divergence_limit else {
            return;
        };
        let limit_sq = limit * limit;
        report.diverged = self
            .particles
            .iter()
            .filter(|p| !p.pos.is_finite() || p.pos.length_sq() > limit_sq)
            .count();
        if report.diverged > 0 {
            warn!(count = report.diverged, limit = ?limit, "particles diverging");
        }
    }

    fn push_distance(&mut self, c: DistanceConstraint<V>) {
        self.links.insert(c.a, c.b);
        self.constraints.push(Constraint::Distance(c));
    }

    fn check_particle(&self, particle: ParticleHandle) -> Result<(), WebError> {
        let count = self.particles.len();
        if particle.index() >= count {
            return Err(WebError::ParticleOutOfBounds { index: particle.index(), count });
        }
        Ok(())
    }

    fn anchor_mut(&mut self, constraint: ConstraintHandle) -> Result<&mut PositionConstraint<V>, WebError> {
        let count = self.constraints.len();
        match self.constraints.get_mut(constraint.index()) {
            Some(Constraint::Position(anchor)) => Ok(anchor),
            Some(Constraint::Distance(_)) => Err(WebError::NotAnchor { index: constraint.index() }),
            None => Err(WebError::ConstraintOutOfBounds { index: constraint.index(), count }),
        }
    }

    pub fn particle(&self, handle: ParticleHandle) -> &Particle<V> { &self.particles[handle.index()] }
    pub fn particle_mut(&mut self, handle: ParticleHandle) -> &mut Particle<V> { &mut self.particles[handle.index()] }
    pub fn constraint(&self, handle: ConstraintHandle) -> &Constraint<V> { &self.constraints[handle.index()] }
    pub fn particles(&self) -> &[Particle<V>] { &self.particles }
    pub fn constraints(&self) -> &[Constraint<V>] { &self.constraints }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn config(&self) -> &WebConfig<V> { &self.config }

    pub fn positions(&self) -> AllocVec<V> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// `true` if `constraint` is an anchor that is currently shaking.
    pub fn is_shaking(&self, constraint: ConstraintHandle) -> bool {
        match self.constraints.get(constraint.index()) {
            Some(Constraint::Position(anchor)) => anchor.is_shaking(),
            _ => false,
        }
    }

    /// Current target of an anchor, if `constraint` is one.
    pub fn anchor_target(&self, constraint: ConstraintHandle) -> Option<V> {
        self.constraints.get(constraint.index())?.as_position().map(|a| a.target)
    }
}

/// Depth-axis flutter force for one particle, if configured and drawn.
fn flutter<V: MountPlane, R: Rng>(rng: &mut R, jitter: Option<&ForceJitter<V::Scalar>>) -> V {
    let Some(jitter) = jitter else {
        return V::zero();
    };
    if !rng.gen_bool(jitter.probability) {
        return V::zero();
    }
    let unit = V::Scalar::from_f32(rng.gen::<f32>() - 0.5);
    V::along_depth(jitter.magnitude * unit)
}
