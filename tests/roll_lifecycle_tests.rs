//! Tests for the drag → throw → settle → score sequence

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dragroll::dice3d::lifecycle::{
    PhysicsBody, PointerSample, RollLifecycle, RollPhase, ScoreSink,
};
use dragroll::dice3d::types::{DieFace, DieFaces, ScoreBoard, ThrowSettings};

const DT: f32 = 1.0 / 60.0;
const PLANE: f32 = 1.2;

#[derive(Debug, Clone)]
struct FakeBody {
    position: Vec3,
    velocity: Vec3,
    spin: Vec3,
    rotation: Quat,
    gravity: bool,
    /// Another body in the way: positions past this x are pushed back.
    blocked_past_x: Option<f32>,
}

impl FakeBody {
    fn resting_at(x: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, 0.5, z),
            velocity: Vec3::ZERO,
            spin: Vec3::new(0.0, 3.0, 0.0),
            rotation: Quat::IDENTITY,
            gravity: true,
            blocked_past_x: None,
        }
    }

    /// Pretend physics brought the die to rest.
    fn land(&mut self, rotation: Quat) {
        self.position.y = 0.5;
        self.velocity = Vec3::ZERO;
        self.rotation = rotation;
    }
}

impl PhysicsBody for FakeBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, mut position: Vec3) {
        if let Some(limit) = self.blocked_past_x {
            position.x = position.x.min(limit);
        }
        self.position = position;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn stop_spinning(&mut self) {
        self.spin = Vec3::ZERO;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity = enabled;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Pending,
    Result(i32),
    Discarded,
}

#[derive(Debug, Default)]
struct RecordingSink {
    events: Vec<Event>,
}

impl ScoreSink for RecordingSink {
    fn start_pending_roll(&mut self) {
        self.events.push(Event::Pending);
    }

    fn submit_result(&mut self, value: i32) {
        self.events.push(Event::Result(value));
    }

    fn discard_roll(&mut self) {
        self.events.push(Event::Discarded);
    }
}

fn cube_faces() -> DieFaces {
    DieFaces::new(vec![
        DieFace::new(Vec3::X, 1, 0.3),
        DieFace::new(Vec3::NEG_X, 6, 0.3),
        DieFace::new(Vec3::Y, 4, 0.3),
        DieFace::new(Vec3::NEG_Y, 3, 0.3),
        DieFace::new(Vec3::Z, 2, 0.3),
        DieFace::new(Vec3::NEG_Z, 5, 0.3),
    ])
}

fn held(target: Vec3) -> PointerSample {
    PointerSample { held: true, target }
}

fn released(target: Vec3) -> PointerSample {
    PointerSample {
        held: false,
        target,
    }
}

/// Drag the die along +x, `step` units per frame, for `frames` frames.
fn drag_along_x(
    lifecycle: &mut RollLifecycle,
    body: &mut FakeBody,
    faces: &DieFaces,
    sink: &mut impl ScoreSink,
    rng: &mut StdRng,
    step: f32,
    frames: usize,
) -> Vec3 {
    let mut target = Vec3::new(0.0, PLANE, 0.0);
    for _ in 0..frames {
        target.x += step;
        let phase = lifecycle.advance(DT, held(target), body, faces, sink, rng);
        assert_eq!(phase, RollPhase::Dragging);
    }
    target
}

#[test]
fn test_slow_release_puts_die_back_down() {
    let settings = ThrowSettings {
        min_throw_velocity: 0.02,
        ..Default::default()
    };
    let floor = settings.roll_finish_height;
    let tolerance = settings.landing_tolerance;
    let mut lifecycle = RollLifecycle::new(settings);
    let mut body = FakeBody::resting_at(0.0, 0.0);
    let mut sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(7);
    let faces = cube_faces();

    assert!(lifecycle.begin_drag(&mut body));
    assert!(!body.gravity);
    assert_eq!(body.spin, Vec3::ZERO);

    // Hold the pointer still over the table.
    let target = Vec3::new(0.0, PLANE, 0.0);
    for _ in 0..30 {
        lifecycle.advance(DT, held(target), &mut body, &faces, &mut sink, &mut rng);
    }
    assert!(body.position.y > floor + tolerance);
    assert_eq!(lifecycle.derived_velocity(), Vec3::ZERO);

    let phase = lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);
    assert_eq!(phase, RollPhase::Abandoned);
    assert_eq!(sink.events, vec![Event::Discarded]);

    let mut frames = 0;
    while lifecycle.phase() == RollPhase::Abandoned {
        assert!(!body.gravity, "gravity must stay off while lowering");
        lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);
        frames += 1;
        assert!(frames < 200, "die never landed");
    }

    assert_eq!(lifecycle.phase(), RollPhase::Idle);
    assert!(body.gravity);
    assert_eq!(body.velocity, Vec3::ZERO);
    assert!(body.position.y <= floor + tolerance);
    assert_eq!(sink.events, vec![Event::Discarded]);
}

#[test]
fn test_throw_and_settle_reports_top_face() {
    let mut lifecycle = RollLifecycle::default();
    let mut body = FakeBody::resting_at(0.0, 0.0);
    let mut sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(1);
    let faces = cube_faces();

    assert!(lifecycle.begin_drag(&mut body));
    let target = drag_along_x(&mut lifecycle, &mut body, &faces, &mut sink, &mut rng, 0.05, 12);
    let derived = lifecycle.derived_velocity();
    assert!(derived.x > 0.5);
    assert!(derived.y.abs() < 1e-6 && derived.z.abs() < 1e-6);

    let phase = lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);
    assert_eq!(phase, RollPhase::Thrown);
    assert!(body.gravity);
    assert_eq!(body.velocity, derived);
    assert_eq!(sink.events, vec![Event::Pending]);

    // Still flying.
    let phase = lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);
    assert_eq!(phase, RollPhase::Airborne);
    assert!(!lifecycle.can_start(&body));

    body.land(Quat::IDENTITY);
    let phase = lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);
    assert_eq!(phase, RollPhase::Settled { value: Some(4) });
    assert_eq!(sink.events, vec![Event::Pending, Event::Result(4)]);

    let phase = lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);
    assert_eq!(phase, RollPhase::Idle);
    assert!(lifecycle.can_start(&body));
}

#[test]
fn test_throw_multiplier_scales_release_velocity() {
    let mut lifecycle = RollLifecycle::new(ThrowSettings {
        throw_velocity_multiplier: 2.0,
        ..Default::default()
    });
    let mut body = FakeBody::resting_at(0.0, 0.0);
    let mut sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(1);
    let faces = cube_faces();

    lifecycle.begin_drag(&mut body);
    let target = drag_along_x(&mut lifecycle, &mut body, &faces, &mut sink, &mut rng, 0.05, 12);
    let derived = lifecycle.derived_velocity();
    lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);

    assert!((body.velocity - derived * 2.0).length() < 1e-5);
}

#[test]
fn test_results_accumulate_on_score_board() {
    let mut board = ScoreBoard::default();
    let mut rng = StdRng::seed_from_u64(3);
    let faces = cube_faces();

    for (rotation, expected_sum) in [
        (Quat::IDENTITY, 4),
        (Quat::from_rotation_z(std::f32::consts::FRAC_PI_2), 5),
    ] {
        let mut lifecycle = RollLifecycle::default();
        let mut body = FakeBody::resting_at(0.0, 0.0);
        lifecycle.begin_drag(&mut body);
        let target =
            drag_along_x(&mut lifecycle, &mut body, &faces, &mut board, &mut rng, 0.05, 12);
        lifecycle.advance(DT, released(target), &mut body, &faces, &mut board, &mut rng);
        assert_eq!(board.current.text(), "Roll: ...");

        body.land(rotation);
        lifecycle.advance(DT, released(target), &mut body, &faces, &mut board, &mut rng);
        assert_eq!(board.sum(), expected_sum);
    }

    assert_eq!(board.current.text(), "Roll: 1");
    assert_eq!(board.total.text(), "Sum: 5");
    assert_eq!(board.rolls(), 2);
}

#[test]
fn test_auto_roll_centers_then_throws() {
    let center = Vec3::new(0.0, PLANE, 0.0);
    let run = |seed: u64| {
        let mut lifecycle = RollLifecycle::default();
        let mut body = FakeBody::resting_at(1.0, -1.0);
        let mut sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let faces = cube_faces();

        assert!(lifecycle.begin_auto_roll(center, &mut body));
        assert_eq!(lifecycle.phase(), RollPhase::Centering);
        assert!(!body.gravity);

        let mut frames = 0;
        while lifecycle.phase() == RollPhase::Centering {
            assert!(sink.events.is_empty());
            lifecycle.advance(DT, released(Vec3::ZERO), &mut body, &faces, &mut sink, &mut rng);
            frames += 1;
            assert!(frames < 500, "never reached the center");
        }

        assert_eq!(lifecycle.phase(), RollPhase::Thrown);
        assert!(body.position.distance(center) <= 0.02);
        assert!(body.gravity);
        assert_eq!(sink.events, vec![Event::Pending]);
        body.velocity
    };

    let velocity = run(42);
    assert_eq!(velocity.y, 0.0);
    assert!(velocity.length() >= 3.0 - 1e-4 && velocity.length() < 5.0 + 1e-4);
    assert_eq!(run(42), velocity);
}

#[test]
fn test_blocked_auto_roll_throws_after_timeout() {
    let settings = ThrowSettings {
        max_centering_time: 0.5,
        ..Default::default()
    };
    let mut lifecycle = RollLifecycle::new(settings);
    let mut body = FakeBody::resting_at(-1.0, 0.0);
    body.blocked_past_x = Some(-0.3);
    let mut sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(11);
    let faces = cube_faces();
    let center = Vec3::new(0.0, PLANE, 0.0);

    assert!(lifecycle.begin_auto_roll(center, &mut body));

    let mut frames = 0;
    while lifecycle.phase() == RollPhase::Centering {
        lifecycle.advance(DT, released(Vec3::ZERO), &mut body, &faces, &mut sink, &mut rng);
        frames += 1;
        assert!(frames <= 31, "centering never gave up");
    }

    // 0.5s at 60 fps, give or take float rounding.
    assert!(frames >= 29);
    assert_eq!(lifecycle.phase(), RollPhase::Thrown);
    assert!(body.position.distance(center) > 0.25);
    assert!(body.gravity);
    assert!(body.velocity.length() >= 3.0 - 1e-4);
    assert_eq!(sink.events, vec![Event::Pending]);

    // The throw runs to completion and the die is usable again.
    body.land(Quat::IDENTITY);
    lifecycle.advance(DT, released(Vec3::ZERO), &mut body, &faces, &mut sink, &mut rng);
    lifecycle.advance(DT, released(Vec3::ZERO), &mut body, &faces, &mut sink, &mut rng);
    assert_eq!(lifecycle.phase(), RollPhase::Idle);
    assert!(lifecycle.begin_drag(&mut body));
}

#[test]
fn test_cannot_grab_die_in_the_air() {
    let mut lifecycle = RollLifecycle::default();
    let mut sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(0);

    let mut falling = FakeBody::resting_at(0.0, 0.0);
    falling.velocity = Vec3::new(0.0, -2.0, 0.0);
    assert!(!lifecycle.begin_drag(&mut falling));
    assert!(falling.gravity);

    let mut high = FakeBody::resting_at(0.0, 0.0);
    high.position.y = 3.0;
    assert!(!lifecycle.begin_drag(&mut high));
    assert!(!lifecycle.begin_auto_roll(Vec3::ZERO, &mut high));

    let faces = cube_faces();
    let phase = lifecycle.advance(DT, held(Vec3::ZERO), &mut high, &faces, &mut sink, &mut rng);
    assert_eq!(phase, RollPhase::Idle);
    assert!(sink.events.is_empty());
}

#[test]
fn test_no_new_sequence_while_busy() {
    let mut lifecycle = RollLifecycle::default();
    let mut body = FakeBody::resting_at(0.0, 0.0);

    assert!(lifecycle.begin_drag(&mut body));
    assert!(!lifecycle.begin_drag(&mut body));
    assert!(!lifecycle.begin_auto_roll(Vec3::ZERO, &mut body));
    assert_eq!(lifecycle.phase(), RollPhase::Dragging);
}

#[test]
fn test_die_without_faces_discards_result() {
    let mut lifecycle = RollLifecycle::default();
    let mut body = FakeBody::resting_at(0.0, 0.0);
    let mut sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(5);
    let faces = DieFaces::default();

    lifecycle.begin_drag(&mut body);
    let target = drag_along_x(&mut lifecycle, &mut body, &faces, &mut sink, &mut rng, 0.05, 12);
    lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);

    body.land(Quat::IDENTITY);
    let phase = lifecycle.advance(DT, released(target), &mut body, &faces, &mut sink, &mut rng);
    assert_eq!(phase, RollPhase::Settled { value: None });
    assert_eq!(sink.events, vec![Event::Pending, Event::Discarded]);
}

#[test]
fn test_zero_length_frame_is_harmless() {
    let mut lifecycle = RollLifecycle::default();
    let mut body = FakeBody::resting_at(0.0, 0.0);
    let mut sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(9);
    let faces = cube_faces();

    lifecycle.begin_drag(&mut body);
    for x in [1.0, 2.0] {
        let pointer = held(Vec3::new(x, PLANE, 0.0));
        lifecycle.advance(0.0, pointer, &mut body, &faces, &mut sink, &mut rng);
    }

    assert!(lifecycle.derived_velocity().is_finite());
    assert!(body.position.is_finite());
    assert_eq!(body.position, Vec3::new(0.0, 0.5, 0.0));
}
