//! Starfield population: generation, drift, and wraparound.

use byeol_core::{ColorClass, FieldTuning};

/// A persistent star in the field.
///
/// Every attribute except position is drawn once at generation time and
/// never changes; the rendered look varies only through the stateless
/// twinkle signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Position in cell space.
    pub x: f32,
    pub y: f32,
    /// Radius from the three-tier mixture; drives brightness and the
    /// glow tier.
    pub radius: f32,
    /// Opacity floor.
    pub base_alpha: f32,
    /// Twinkle frequency scalar.
    pub twinkle_speed: f32,
    /// Twinkle phase offset.
    pub twinkle_phase: f32,
    /// Per-frame upward drift.
    pub drift: f32,
    /// Spectral color class.
    pub color: ColorClass,
}

/// Population size for a surface: one star per `cells_per_star` of area.
pub fn population_size(width: u16, height: u16, cells_per_star: f32) -> usize {
    (width as f32 * height as f32 / cells_per_star).floor() as usize
}

/// Generate a fresh population for the surface, replacing any previous
/// one wholesale. A zero-area surface yields an empty population.
pub fn init_field(
    width: u16,
    height: u16,
    tuning: &FieldTuning,
    rng: &mut fastrand::Rng,
) -> Vec<Star> {
    let count = population_size(width, height, tuning.cells_per_star);
    (0..count)
        .map(|_| Star {
            x: rng.f32() * width as f32,
            y: rng.f32() * height as f32,
            radius: sample_radius(tuning, rng),
            base_alpha: sample_band(tuning.base_alpha, rng),
            twinkle_speed: sample_band(tuning.twinkle_speed, rng),
            twinkle_phase: rng.f32() * std::f32::consts::TAU,
            drift: sample_band(tuning.drift, rng),
            color: pick_color_class(rng),
        })
        .collect()
}

/// Sample `base + u * span` from a (base, span) band.
fn sample_band(band: (f32, f32), rng: &mut fastrand::Rng) -> f32 {
    band.0 + rng.f32() * band.1
}

/// Radius mixture: most stars tiny, a few medium, rare large ones.
fn sample_radius(tuning: &FieldTuning, rng: &mut fastrand::Rng) -> f32 {
    let tier = rng.f32();
    if tier < 0.9 {
        sample_band(tuning.radius_small, rng)
    } else if tier < 0.97 {
        sample_band(tuning.radius_medium, rng)
    } else {
        sample_band(tuning.radius_large, rng)
    }
}

/// Weighted spectral-class draw: mostly white and blue-white, some
/// yellow, rare orange and red.
pub fn pick_color_class(rng: &mut fastrand::Rng) -> ColorClass {
    let roll = rng.f32();
    if roll < 0.1 {
        ColorClass::BlueWhite
    } else if roll < 0.4 {
        ColorClass::White
    } else if roll < 0.7 {
        ColorClass::YellowWhite
    } else if roll < 0.9 {
        ColorClass::LightOrange
    } else {
        ColorClass::RedOrange
    }
}

/// Advance the gentle upward drift. Stars never die; one that crosses
/// the top margin wraps to below the bottom edge at a fresh horizontal
/// position.
pub fn update(
    stars: &mut [Star],
    frames: f32,
    width: u16,
    height: u16,
    tuning: &FieldTuning,
    rng: &mut fastrand::Rng,
) {
    for star in stars {
        star.y -= star.drift * frames;
        if star.y < -tuning.wrap_margin {
            star.y = height as f32 + tuning.wrap_margin;
            star.x = rng.f32() * width as f32;
        }
    }
}
