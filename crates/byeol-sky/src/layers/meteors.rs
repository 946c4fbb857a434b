//! Shooting stars: stochastic spawning, the fade envelope, and removal.
//!
//! A meteor has exactly two phases. It fades in fast until fully opaque,
//! the flag flips once, then it fades out slowly until it is culled or
//! leaves the surface. Per the observed meteor convention the fade-in
//! rate is several times the fade-out rate.

use byeol_core::MeteorTuning;

/// A short-lived meteor streak.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Head position in cell space.
    pub x: f32,
    pub y: f32,
    /// Velocity in cells per frame, fixed at spawn.
    pub vx: f32,
    pub vy: f32,
    /// Trail length in cells, fixed at spawn.
    pub trail: f32,
    /// Streak thickness, fixed at spawn.
    pub thickness: f32,
    /// Current opacity.
    pub opacity: f32,
    /// True until opacity first reaches 1.
    pub fading_in: bool,
}

impl Meteor {
    /// Tail position, opposite the velocity direction.
    pub fn tail(&self) -> (f32, f32) {
        let speed = (self.vx * self.vx + self.vy * self.vy)
            .sqrt()
            .max(f32::EPSILON);
        (
            self.x - self.vx / speed * self.trail,
            self.y - self.vy / speed * self.trail,
        )
    }
}

/// Spawn one meteor in the upper portion of the surface, heading down
/// and to the left on a near-diagonal.
pub fn spawn(width: u16, height: u16, tuning: &MeteorTuning, rng: &mut fastrand::Rng) -> Meteor {
    let angle = tuning.angle_base + rng.f32() * tuning.angle_jitter;
    let speed = tuning.speed.0 + rng.f32() * tuning.speed.1;
    Meteor {
        x: rng.f32() * width as f32 * 1.5,
        y: rng.f32() * height as f32 * 0.3,
        vx: -angle.cos() * speed,
        vy: angle.sin() * speed,
        trail: tuning.trail.0 + rng.f32() * tuning.trail.1,
        thickness: tuning.thickness.0 + rng.f32() * tuning.thickness.1,
        opacity: 0.0,
        fading_in: true,
    }
}

/// Per-frame Bernoulli spawn draw.
pub fn maybe_spawn(
    meteors: &mut Vec<Meteor>,
    width: u16,
    height: u16,
    tuning: &MeteorTuning,
    rng: &mut fastrand::Rng,
) {
    if rng.f32() < tuning.spawn_chance {
        meteors.push(spawn(width, height, tuning, rng));
    }
}

/// Advance one meteor's fade envelope by one frame. The flag flips
/// exactly once, when opacity first reaches 1 (clamped to exactly 1 at
/// the transition).
pub fn advance_fade(meteor: &mut Meteor, tuning: &MeteorTuning) {
    if meteor.fading_in {
        meteor.opacity += tuning.fade_in;
        if meteor.opacity >= 1.0 {
            meteor.opacity = 1.0;
            meteor.fading_in = false;
        }
    } else {
        meteor.opacity -= tuning.fade_out;
    }
}

/// Removal predicate: fully faded, exited left, or exited below.
pub fn should_remove(meteor: &Meteor, height: u16) -> bool {
    meteor.opacity <= 0.0
        || meteor.x < -meteor.trail
        || meteor.y > height as f32 + meteor.trail
}

/// Fade every live meteor, then drop the ones satisfying the removal
/// predicate. Runs once per frame, before drawing and integration.
pub fn fade_and_cull(meteors: &mut Vec<Meteor>, height: u16, tuning: &MeteorTuning) {
    for meteor in meteors.iter_mut() {
        advance_fade(meteor, tuning);
    }
    meteors.retain(|m| !should_remove(m, height));
}

/// Integrate positions. Runs after the current frame's removal check and
/// draw, so a meteor is always drawn at the position the check saw.
pub fn integrate(meteors: &mut [Meteor]) {
    for meteor in meteors {
        meteor.x += meteor.vx;
        meteor.y += meteor.vy;
    }
}
