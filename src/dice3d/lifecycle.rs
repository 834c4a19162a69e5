//! Roll lifecycle
//!
//! The drag → throw → settle → score sequence of a single die, expressed as
//! an explicit state machine that is advanced once per frame. The machine
//! never steps physics itself: it reads and writes the body through
//! [`PhysicsBody`] and reports outcomes through [`ScoreSink`].
//!
//! ```text
//! Idle ─begin_drag─▶ Dragging ─release, fast─▶ Thrown ─▶ Airborne ─▶ Settled ─▶ Idle
//!   │                   └─release, slow─▶ Abandoned ──────────────────────▶ Idle
//!   └─begin_auto_roll─▶ Centering ─arrived or timed out─▶ Thrown
//! ```

use bevy::log::{debug, info, warn};
use bevy::prelude::*;
use rand::Rng;

use crate::dice3d::types::{DieFaces, ThrowSettings};

/// Rigid body state the lifecycle reads and writes. Integration between
/// frames is done by the physics engine.
pub trait PhysicsBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    /// Zero the angular velocity.
    fn stop_spinning(&mut self);
    fn rotation(&self) -> Quat;
    fn set_gravity_enabled(&mut self, enabled: bool);
}

/// Receives roll outcomes.
pub trait ScoreSink {
    /// A throw is in flight; its value is not known yet.
    fn start_pending_roll(&mut self);
    fn submit_result(&mut self, value: i32);
    /// The drag ended without a throw.
    fn discard_roll(&mut self);
}

/// Pointer state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Whether the drag button is still held.
    pub held: bool,
    /// Where the pointer maps to on the play plane.
    pub target: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollPhase {
    #[default]
    Idle,
    /// Following the pointer.
    Dragging,
    /// Automatic roll moving to the table center.
    Centering,
    /// Impulse applied this frame; physics has not run yet.
    Thrown,
    Airborne,
    /// Released too slowly: lowering back onto the table.
    Abandoned,
    /// Reported for one frame after the die came to rest.
    Settled { value: Option<i32> },
}

impl RollPhase {
    /// Whether a sequence is running (a new one cannot start).
    pub fn is_busy(&self) -> bool {
        !matches!(self, RollPhase::Idle | RollPhase::Settled { .. })
    }
}

/// Interpolation factor for a frame, clamped so a long frame never
/// overshoots the target.
pub fn lerp_factor(speed: f32, dt: f32) -> f32 {
    (speed * dt).clamp(0.0, 1.0)
}

/// Lifecycle state of one die.
#[derive(Component, Debug, Clone)]
pub struct RollLifecycle {
    settings: ThrowSettings,
    phase: RollPhase,
    derived_velocity: Vec3,
    previous_target: Option<Vec3>,
    auto_target: Vec3,
    centering_time: f32,
}

impl RollLifecycle {
    pub fn new(settings: ThrowSettings) -> Self {
        Self {
            settings,
            phase: RollPhase::Idle,
            derived_velocity: Vec3::ZERO,
            previous_target: None,
            auto_target: Vec3::ZERO,
            centering_time: 0.0,
        }
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    /// Smoothed velocity derived from the drag so far.
    pub fn derived_velocity(&self) -> Vec3 {
        self.derived_velocity
    }

    pub fn is_in_air(&self, body: &impl PhysicsBody) -> bool {
        body.velocity().length() > self.settings.roll_finish_velocity
            || body.position().y > self.settings.roll_finish_height
    }

    /// Whether a drag or automatic roll may start now.
    pub fn can_start(&self, body: &impl PhysicsBody) -> bool {
        !self.phase.is_busy() && !self.is_in_air(body)
    }

    /// Pointer went down on the die. Returns whether dragging started.
    pub fn begin_drag(&mut self, body: &mut impl PhysicsBody) -> bool {
        if !self.can_start(&*body) {
            return false;
        }
        self.start_dragging(body);
        self.phase = RollPhase::Dragging;
        debug!("Drag started at {:?}", body.position());
        true
    }

    /// Start an automatic roll towards `center`. Returns whether it started.
    pub fn begin_auto_roll(&mut self, center: Vec3, body: &mut impl PhysicsBody) -> bool {
        if !self.can_start(&*body) {
            return false;
        }
        self.start_dragging(body);
        self.auto_target = center;
        self.centering_time = 0.0;
        self.phase = RollPhase::Centering;
        debug!("Automatic roll heading to {:?}", center);
        true
    }

    /// Advance the machine by one frame of `dt` seconds.
    pub fn advance<B: PhysicsBody, S: ScoreSink, R: Rng>(
        &mut self,
        dt: f32,
        pointer: PointerSample,
        body: &mut B,
        faces: &DieFaces,
        sink: &mut S,
        rng: &mut R,
    ) -> RollPhase {
        match self.phase {
            RollPhase::Idle => {}
            RollPhase::Settled { .. } => self.phase = RollPhase::Idle,
            RollPhase::Dragging => {
                if pointer.held {
                    self.follow(pointer.target, dt, body);
                    self.track_velocity(pointer.target, dt);
                } else {
                    self.release(body, sink);
                }
            }
            RollPhase::Centering => {
                let target = self.auto_target;
                self.follow(target, dt, body);
                self.centering_time += dt.max(0.0);

                let arrived = body.position().distance(target) <= self.settings.arrival_distance;
                let timed_out = self.centering_time >= self.settings.max_centering_time;
                if arrived || timed_out {
                    if !arrived {
                        debug!(
                            "Centering gave up {:.2} from {:?}; throwing from here",
                            body.position().distance(target),
                            target
                        );
                    }
                    self.start_rolling(body, sink);
                    let velocity = self.random_throw_velocity(rng);
                    body.set_velocity(velocity);
                    self.phase = RollPhase::Thrown;
                    info!("Automatic throw at {:.2} m/s", velocity.length());
                }
            }
            RollPhase::Thrown => {
                self.phase = RollPhase::Airborne;
                if !self.is_in_air(&*body) {
                    self.settle(&*body, faces, sink);
                }
            }
            RollPhase::Airborne => {
                if !self.is_in_air(&*body) {
                    self.settle(&*body, faces, sink);
                }
            }
            RollPhase::Abandoned => self.lower(dt, body),
        }

        self.phase
    }

    fn start_dragging(&mut self, body: &mut impl PhysicsBody) {
        body.set_gravity_enabled(false);
        body.set_velocity(Vec3::ZERO);
        body.stop_spinning();
        self.derived_velocity = Vec3::ZERO;
        self.previous_target = None;
    }

    fn start_rolling(&mut self, body: &mut impl PhysicsBody, sink: &mut impl ScoreSink) {
        body.set_gravity_enabled(true);
        sink.start_pending_roll();
    }

    fn follow(&self, target: Vec3, dt: f32, body: &mut impl PhysicsBody) {
        let t = lerp_factor(self.settings.follow_lerp_speed, dt);
        body.set_position(body.position().lerp(target, t));
    }

    fn track_velocity(&mut self, target: Vec3, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        // The first sample only seeds the previous target.
        let previous = self.previous_target.unwrap_or(target);
        let instant = (target - previous)
            * self.settings.drag_velocity_scale
            * self.settings.manual_velocity_increase
            / dt;
        let t = lerp_factor(self.settings.velocity_change_speed, dt);
        self.derived_velocity = self.derived_velocity.lerp(instant, t);
        self.previous_target = Some(target);
    }

    fn release(&mut self, body: &mut impl PhysicsBody, sink: &mut impl ScoreSink) {
        let speed = self.derived_velocity.length();
        if speed > self.settings.min_throw_velocity {
            self.start_rolling(body, sink);
            body.set_velocity(self.derived_velocity * self.settings.throw_velocity_multiplier);
            self.phase = RollPhase::Thrown;
            info!("Die thrown at {:.2} m/s", speed * self.settings.throw_velocity_multiplier);
        } else {
            sink.discard_roll();
            self.phase = RollPhase::Abandoned;
            debug!(
                "Drag released at {:.3} (minimum {:.3}); putting die down",
                speed, self.settings.min_throw_velocity
            );
        }
    }

    fn lower(&mut self, dt: f32, body: &mut impl PhysicsBody) {
        let position = body.position();
        let floor = self.settings.roll_finish_height;

        if position.y > floor + self.settings.landing_tolerance {
            let landing = Vec3::new(position.x, floor, position.z);
            let t = lerp_factor(self.settings.follow_lerp_speed, dt);
            body.set_position(position.lerp(landing, t));
            return;
        }

        body.set_velocity(Vec3::ZERO);
        body.set_gravity_enabled(true);
        self.phase = RollPhase::Idle;
        debug!("Die put down at {:?}", position);
    }

    fn settle(&mut self, body: &impl PhysicsBody, faces: &DieFaces, sink: &mut impl ScoreSink) {
        match faces.closest_to_up(body.rotation()) {
            Some(face) => {
                sink.submit_result(face.value);
                self.phase = RollPhase::Settled {
                    value: Some(face.value),
                };
                info!("Rolled {}", face.value);
            }
            None => {
                sink.discard_roll();
                self.phase = RollPhase::Settled { value: None };
                warn!("Die settled but has no faces; roll discarded");
            }
        }
    }

    fn random_throw_velocity(&self, rng: &mut impl Rng) -> Vec3 {
        let direction = Vec3::new(rng.gen_range(-1.0..=1.0), 0.0, rng.gen_range(-1.0..=1.0))
            .try_normalize()
            .unwrap_or(Vec3::X);

        let (low, high) = self.settings.auto_throw_range();
        let speed = if high > low {
            rng.gen_range(low..high)
        } else {
            low
        };

        direction * speed * self.settings.throw_velocity_multiplier
    }
}

impl Default for RollLifecycle {
    fn default() -> Self {
        Self::new(ThrowSettings::default())
    }
}
