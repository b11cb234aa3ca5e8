//! Timed anchor shaking.
//!
//! A [`TimedPerturbation`] sits on a position constraint and, while active,
//! displaces the constraint's target by a fresh random offset every step. The
//! undisturbed target is kept as the anchor so the effect can be reversed
//! exactly when the timer runs out.

use crate::float::Float;
use crate::vec::{MountPlane, Vec};
use rand::Rng;

/// State of a perturbation timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShakeState {
    Idle,
    Shaking,
}

/// Fraction of a step by which a timer may fall short of its duration and
/// still expire. Absorbs rounding in the summed step lengths.
const EXPIRY_SLACK: f64 = 1e-3;

/// Bounded-duration jitter of an anchor inside its mounting plane.
///
/// Elapsed time is summed in f64 regardless of the scalar type, so a shake of
/// duration `D` ends on the first step at which the summed `dt` reaches `D`.
#[derive(Clone, Debug)]
pub struct TimedPerturbation<V: Vec> {
    anchor: V,
    amplitude: V::Scalar,
    duration: f64,
    elapsed: f64,
    active: bool,
}

impl<V: Vec> TimedPerturbation<V> {
    /// An idle perturbation resting at `anchor`.
    pub fn new(anchor: V) -> Self {
        TimedPerturbation {
            anchor,
            amplitude: V::Scalar::zero(),
            duration: 0.0,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Start shaking, or restart with the new amplitude and duration if already
    /// shaking. Overlapping triggers are not queued.
    ///
    /// `duration` is in simulated seconds. A non-positive duration still runs
    /// for one step.
    pub fn trigger(&mut self, amplitude: V::Scalar, duration: V::Scalar) {
        self.amplitude = amplitude;
        self.duration = duration.to_f64();
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Spend `dt` of the timer. Returns `true` exactly once, on the call that
    /// ends the shake.
    pub fn advance(&mut self, dt: V::Scalar) -> bool {
        if !self.active {
            return false;
        }
        let dt = dt.to_f64();
        self.elapsed += dt;
        if self.elapsed + libm::fabs(dt) * EXPIRY_SLACK < self.duration {
            return false;
        }
        self.active = false;
        self.amplitude = V::Scalar::zero();
        self.duration = 0.0;
        self.elapsed = 0.0;
        true
    }

    pub fn state(&self) -> ShakeState {
        if self.active { ShakeState::Shaking } else { ShakeState::Idle }
    }

    pub fn is_shaking(&self) -> bool {
        self.active
    }

    pub fn anchor(&self) -> V {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: V) {
        self.anchor = anchor;
    }

    pub fn amplitude(&self) -> V::Scalar {
        self.amplitude
    }

    /// Simulated seconds left; zero when idle.
    pub fn remaining(&self) -> V::Scalar {
        V::Scalar::from_f64((self.duration - self.elapsed).max(0.0))
    }
}

impl<V: MountPlane> TimedPerturbation<V> {
    /// Target for this step: a fresh in-plane offset of at most `amplitude` per
    /// axis while shaking, otherwise the anchor itself.
    pub fn target<R: Rng>(&self, rng: &mut R) -> V {
        if !self.active {
            return self.anchor;
        }
        let x = self.sample(rng);
        let y = self.sample(rng);
        self.anchor + V::in_plane(x, y)
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> V::Scalar {
        let unit = V::Scalar::from_f32(rng.gen_range(-1.0f32..=1.0));
        unit * self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn idle_target_is_anchor() {
        let mut rng = SmallRng::seed_from_u64(1);
        let shake = TimedPerturbation::new(Vec3::new(1.0f32, 2.0, 3.0));
        assert_eq!(shake.target(&mut rng), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(shake.state(), ShakeState::Idle);
    }

    #[test]
    fn jitter_bounded_and_planar() {
        let mut rng = SmallRng::seed_from_u64(7);
        let anchor = Vec3::new(10.0f32, -4.0, 2.5);
        let mut shake = TimedPerturbation::new(anchor);
        shake.trigger(0.5, 1.0);
        for _ in 0..500 {
            let t = shake.target(&mut rng);
            assert!((t.x - anchor.x).abs() <= 0.5, "x jitter {} too large", t.x - anchor.x);
            assert!((t.y - anchor.y).abs() <= 0.5, "y jitter {} too large", t.y - anchor.y);
            assert_eq!(t.z, anchor.z, "depth axis must stay fixed");
        }
    }

    #[test]
    fn expires_exactly_once() {
        let mut shake = TimedPerturbation::new(Vec3::new(0.0f32, 0.0, 0.0));
        shake.trigger(1.0, 0.5);
        assert!(!shake.advance(0.25));
        assert!(shake.is_shaking());
        assert!(shake.advance(0.25));
        assert!(!shake.advance(0.25));
        assert!(!shake.is_shaking());
    }

    #[test]
    fn retrigger_restarts_timer() {
        let mut shake = TimedPerturbation::new(Vec3::new(0.0f32, 0.0, 0.0));
        shake.trigger(1.0, 0.5);
        assert!(!shake.advance(0.25));
        shake.trigger(2.0, 0.5);
        assert_eq!(shake.amplitude(), 2.0);
        assert!(!shake.advance(0.25));
        assert!(shake.advance(0.25));
    }

    #[test]
    fn zero_duration_lasts_one_advance() {
        let mut shake = TimedPerturbation::new(Vec3::new(0.0f64, 0.0, 0.0));
        shake.trigger(1.0, 0.0);
        assert!(shake.is_shaking());
        assert!(shake.advance(1.0 / 60.0));
    }

    fn shaking_steps<V: Vec>(dt: V::Scalar, duration: V::Scalar, anchor: V) -> usize {
        let mut shake = TimedPerturbation::new(anchor);
        shake.trigger(V::Scalar::one(), duration);
        let mut shaking = 0;
        for _ in 0..200 {
            shake.advance(dt);
            if shake.is_shaking() {
                shaking += 1;
            }
        }
        shaking
    }

    #[test]
    fn expires_when_summed_steps_reach_duration() {
        // ten steps of 0.1 sum to just under 1.0 in f64
        let origin64 = Vec3::new(0.0f64, 0.0, 0.0);
        let origin32 = Vec3::new(0.0f32, 0.0, 0.0);
        assert_eq!(shaking_steps(0.1, 1.0, origin64), 9);
        assert_eq!(shaking_steps(0.1, 1.0, origin32), 9);
        assert_eq!(shaking_steps(1.0 / 60.0, 1.0, origin64), 59);
        assert_eq!(shaking_steps(1.0 / 60.0, 1.0, origin32), 59);
        assert_eq!(shaking_steps(1.0 / 60.0, 0.5, origin32), 29);
    }

    #[test]
    fn remaining_counts_down() {
        let mut shake = TimedPerturbation::new(Vec3::new(0.0f64, 0.0, 0.0));
        shake.trigger(1.0, 1.0);
        shake.advance(0.25);
        assert_eq!(shake.remaining(), 0.75);
        assert_eq!(shake.state(), ShakeState::Shaking);
        shake.advance(0.75);
        assert_eq!(shake.remaining(), 0.0);
        assert_eq!(shake.state(), ShakeState::Idle);
    }
}
