//! Step observer trait for monitoring a web as it simulates.

use crate::constraint::ConstraintHandle;
use crate::particle::ParticleHandle;
use crate::perturbation::ShakeState;

/// Trait for observing simulation steps.
///
/// Implement this to debug, visualize, or profile a web. All methods have
/// default no-op implementations.
pub trait StepObserver {
    /// Called after each full resolve pass over the constraints.
    fn on_resolve_pass(&mut self, _pass: usize) {}

    /// Called after all particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called when a distance constraint skipped its correction because its
    /// endpoints coincide.
    fn on_degenerate(&mut self, _constraint: ConstraintHandle) {}

    /// Called when a particle became ensnared, with the number of new links.
    fn on_ensnared(&mut self, _particle: ParticleHandle, _links: usize) {}

    /// Called when an anchor's perturbation changes state: `Shaking` when a
    /// shake starts or restarts, `Idle` when it times out and the anchor is
    /// restored.
    fn on_shake(&mut self, _constraint: ConstraintHandle, _state: ShakeState) {}

    /// Called when a step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
