use gossamer::{ConstraintHandle, ShakeState, StepObserver, Stimulus, Vec3, Web, WebConfig, WebError};
use gossamer::vec::Vec as _;

fn anchored_web() -> (Web<Vec3<f32>>, ConstraintHandle) {
    let mut web = Web::new(WebConfig::new().with_seed(9)).unwrap();
    let p = web.add_particle(Vec3::new(1.0, 2.0, 3.0));
    let anchor = web.add_position(p, Vec3::new(1.0, 2.0, 3.0)).unwrap();
    (web, anchor)
}

struct Transitions(Vec<(ConstraintHandle, ShakeState)>);

impl StepObserver for Transitions {
    fn on_shake(&mut self, c: ConstraintHandle, state: ShakeState) {
        self.0.push((c, state));
    }
}

#[test]
fn shakes_for_exactly_the_duration() {
    let (mut web, anchor) = anchored_web();
    let home = Vec3::new(1.0, 2.0, 3.0);
    web.trigger(anchor, 0.5, 1.0).unwrap();

    // elapsed 0.25, 0.5, 0.75 < 1.0
    for _ in 0..3 {
        let report = web.step(0.25);
        assert_eq!(report.shakes_expired, 0);
        assert!(web.is_shaking(anchor));
        let target = web.anchor_target(anchor).unwrap();
        assert!((target.x - home.x).abs() <= 0.5);
        assert!((target.y - home.y).abs() <= 0.5);
        assert_eq!(target.z, home.z);
        assert_eq!(web.particles()[0].pos.z, home.z);
    }

    // elapsed 1.0
    let report = web.step(0.25);
    assert_eq!(report.shakes_expired, 1);
    assert!(!web.is_shaking(anchor));
    assert_eq!(web.anchor_target(anchor), Some(home));

    for _ in 0..5 {
        assert_eq!(web.step(0.25).shakes_expired, 0);
        assert_eq!(web.anchor_target(anchor), Some(home));
    }
}

#[test]
fn shaking_moves_the_pinned_particle() {
    let (mut web, anchor) = anchored_web();
    web.trigger(anchor, 2.0, 10.0).unwrap();
    let mut moved = false;
    for _ in 0..10 {
        web.step(1.0 / 60.0);
        moved |= web.particles()[0].pos != Vec3::new(1.0, 2.0, 3.0);
    }
    assert!(moved);
}

#[test]
fn retrigger_restarts_instead_of_queueing() {
    let (mut web, anchor) = anchored_web();
    web.trigger(anchor, 1.0, 0.5).unwrap();
    web.step(0.25);
    web.trigger(anchor, 3.0, 0.5).unwrap();
    assert_eq!(web.step(0.25).shakes_expired, 0);
    assert!(web.is_shaking(anchor));
    assert_eq!(web.step(0.25).shakes_expired, 1);
    assert!(!web.is_shaking(anchor));
}

#[test]
fn queued_stimulus_applies_at_next_step() {
    let (mut web, anchor) = anchored_web();
    web.enqueue(Stimulus::perturb(anchor.index(), 1.0, 500.0));
    assert!(!web.is_shaking(anchor), "stimuli wait for the step");

    let report = web.step(0.25);
    assert_eq!(report.stimuli_applied, 1);
    assert!(web.is_shaking(anchor));

    let report = web.step(0.25);
    assert_eq!(report.shakes_expired, 1);
    assert_eq!(web.anchor_target(anchor), Some(Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn invalid_stimuli_are_dropped() {
    let (mut web, anchor) = anchored_web();
    let q = web.add_particle(Vec3::zero());
    let strand = web
        .add_distance(gossamer::ParticleHandle::from_index(0), q, 1.0)
        .unwrap();

    web.enqueue(Stimulus::perturb(strand.index(), 1.0, 100.0));
    web.enqueue(Stimulus::perturb(42, 1.0, 100.0));
    web.enqueue(Stimulus::perturb(anchor.index(), -1.0, 100.0));
    web.enqueue(Stimulus::perturb(anchor.index(), 1.0, 100.0));
    let report = web.step(1.0 / 60.0);
    assert_eq!(report.stimuli_rejected, 3);
    assert_eq!(report.stimuli_applied, 1);
}

#[test]
fn direct_trigger_validates_amplitude() {
    let (mut web, anchor) = anchored_web();
    assert_eq!(web.trigger(anchor, f32::NAN, 1.0), Err(WebError::InvalidAmplitude));
    assert!(!web.is_shaking(anchor));
}

#[test]
fn moving_idle_anchor_moves_target() {
    let (mut web, anchor) = anchored_web();
    web.attach_perturbation(anchor).unwrap();
    web.set_anchor(anchor, Vec3::new(0.0, 0.0, 3.0)).unwrap();
    assert_eq!(web.anchor_target(anchor), Some(Vec3::new(0.0, 0.0, 3.0)));

    web.trigger(anchor, 0.1, 0.1).unwrap();
    web.step(0.1);
    assert_eq!(web.anchor_target(anchor), Some(Vec3::new(0.0, 0.0, 3.0)));
}

#[test]
fn stimuli_cross_threads() {
    let (mut web, anchor) = anchored_web();
    let sender = web.stimulus_sender();
    let index = anchor.index();
    std::thread::spawn(move || {
        assert!(sender.send(Stimulus::perturb(index, 1.0, 1000.0)));
    })
    .join()
    .unwrap();

    let mut seen = Transitions(Vec::new());
    let report = web.step_with(1.0 / 60.0, &mut seen, &mut gossamer::NullSink);
    assert_eq!(report.stimuli_applied, 1);
    assert_eq!(seen.0, [(anchor, ShakeState::Shaking)]);
    assert!(web.is_shaking(anchor));
}

#[test]
fn sender_reports_dropped_web() {
    let (mut web, _) = anchored_web();
    let sender = web.stimulus_sender();
    drop(web);
    assert!(!sender.send(Stimulus::perturb(0, 1.0, 1.0)));
}

#[test]
fn tenth_of_a_second_steps_end_on_time() {
    let mut web: Web<Vec3<f64>> = Web::new(WebConfig::new()).unwrap();
    let p = web.add_particle(Vec3::new(0.0, 0.0, 0.0));
    let anchor = web.add_position(p, Vec3::new(0.0, 0.0, 0.0)).unwrap();
    web.trigger(anchor, 1.0, 1.0).unwrap();

    let mut shaking = 0;
    let mut seen = Transitions(Vec::new());
    for _ in 0..20 {
        web.step_with(0.1, &mut seen, &mut gossamer::NullSink);
        if web.is_shaking(anchor) {
            shaking += 1;
        }
    }
    // the tenth step brings elapsed time to 1.0
    assert_eq!(shaking, 9);
    assert_eq!(seen.0, [(anchor, ShakeState::Idle)]);
    assert_eq!(web.anchor_target(anchor), Some(Vec3::new(0.0, 0.0, 0.0)));
}

#[test]
fn sixtieth_of_a_second_steps_end_on_time() {
    let (mut web, anchor) = anchored_web();
    web.trigger(anchor, 1.0, 1.0).unwrap();
    let shaking = (0..120)
        .filter(|_| {
            web.step(1.0 / 60.0);
            web.is_shaking(anchor)
        })
        .count();
    assert_eq!(shaking, 59);
    assert_eq!(web.anchor_target(anchor), Some(Vec3::new(1.0, 2.0, 3.0)));
}
