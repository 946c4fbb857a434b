//! Core types for the byeol night-sky app.
//!
//! Scene and speed presets cycled from the key handlers, the spectral
//! color classes stars are drawn from, and the tuning-constant bundles
//! that make the renderer variants presets of a single engine.

use serde::{Deserialize, Serialize};

/// Which sky scene is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// Dense twinkling starfield with shooting stars.
    Starfield,
    /// The Felis constellation figure on a dark sky.
    Felis,
    /// The Taurus constellation figure on a dark sky.
    Taurus,
    /// Starfield with both constellation figures layered above it.
    #[default]
    Home,
}

impl SceneKind {
    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            SceneKind::Starfield => SceneKind::Felis,
            SceneKind::Felis => SceneKind::Taurus,
            SceneKind::Taurus => SceneKind::Home,
            SceneKind::Home => SceneKind::Starfield,
        }
    }

    /// Human-readable name for the status footer.
    pub fn title(self) -> &'static str {
        match self {
            SceneKind::Starfield => "starfield",
            SceneKind::Felis => "felis",
            SceneKind::Taurus => "taurus",
            SceneKind::Home => "home",
        }
    }
}

/// Animation speed preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed preset.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Multiplier applied to the animation clock.
    pub fn time_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// Human-readable name for the status footer.
    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Spectral color class of a field star.
///
/// The weighted draw in the field generator approximates the real
/// distribution of stellar spectral types: mostly white and blue-white,
/// some yellow, rare orange and red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    /// B type, light blue.
    BlueWhite,
    /// A/F type, pure white.
    White,
    /// G type, yellow-white.
    YellowWhite,
    /// K type, light orange.
    LightOrange,
    /// M type, red-orange.
    RedOrange,
}

impl ColorClass {
    /// RGB components of this class.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorClass::BlueWhite => (200, 220, 255),
            ColorClass::White => (255, 255, 255),
            ColorClass::YellowWhite => (255, 245, 230),
            ColorClass::LightOrange => (255, 220, 180),
            ColorClass::RedOrange => (255, 200, 150),
        }
    }
}

/// Tuning constants for the starfield population.
///
/// Radii follow a three-tier mixture: most stars tiny, a few medium,
/// rare large ones. The bands are (base, span) pairs sampled as
/// `base + u * span`.
#[derive(Debug, Clone, Copy)]
pub struct FieldTuning {
    /// Surface area (in cells) per star; population size is
    /// `floor(width * height / cells_per_star)`.
    pub cells_per_star: f32,
    /// Radius band for the ~90% tier.
    pub radius_small: (f32, f32),
    /// Radius band for the ~7% tier.
    pub radius_medium: (f32, f32),
    /// Radius band for the ~3% tier.
    pub radius_large: (f32, f32),
    /// Base-alpha band (opacity floor drawn once per star).
    pub base_alpha: (f32, f32),
    /// Twinkle frequency band.
    pub twinkle_speed: (f32, f32),
    /// Per-frame upward drift band.
    pub drift: (f32, f32),
    /// Off-surface margin before a star wraps to the opposite edge.
    pub wrap_margin: f32,
    /// Radius above which a star gets the wide glow halo.
    pub glow_large: f32,
    /// Radius above which a star gets the narrow glow halo.
    pub glow_small: f32,
}

impl FieldTuning {
    /// The night-sky preset shared by the starfield scenes.
    pub const fn night_sky() -> Self {
        Self {
            cells_per_star: 14.0,
            radius_small: (0.15, 0.6),
            radius_medium: (0.6, 1.2),
            radius_large: (0.8, 2.0),
            base_alpha: (0.2, 0.5),
            twinkle_speed: (0.005, 0.02),
            drift: (0.002, 0.02),
            wrap_margin: 2.0,
            glow_large: 1.2,
            glow_small: 0.6,
        }
    }
}

/// Tuning constants for shooting stars.
#[derive(Debug, Clone, Copy)]
pub struct MeteorTuning {
    /// Bernoulli spawn probability per frame.
    pub spawn_chance: f32,
    /// Per-frame opacity increment while fading in.
    pub fade_in: f32,
    /// Per-frame opacity decrement while fading out.
    pub fade_out: f32,
    /// Speed band in cells per frame.
    pub speed: (f32, f32),
    /// Trail length band in cells.
    pub trail: (f32, f32),
    /// Streak thickness band.
    pub thickness: (f32, f32),
    /// Base descent angle in radians (down and to the left).
    pub angle_base: f32,
    /// Jitter added to the descent angle.
    pub angle_jitter: f32,
}

impl MeteorTuning {
    /// The night-sky preset shared by the starfield scenes.
    pub const fn night_sky() -> Self {
        Self {
            spawn_chance: 0.005,
            fade_in: 0.08,
            fade_out: 0.015,
            speed: (0.8, 0.8),
            trail: (8.0, 8.0),
            thickness: (0.3, 1.2),
            angle_base: std::f32::consts::FRAC_PI_4,
            angle_jitter: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_cycle_covers_all() {
        let mut scene = SceneKind::Starfield;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(scene);
            scene = scene.next();
        }
        assert_eq!(scene, SceneKind::Starfield);
        assert!(seen.contains(&SceneKind::Felis));
        assert!(seen.contains(&SceneKind::Taurus));
        assert!(seen.contains(&SceneKind::Home));
    }

    #[test]
    fn test_speed_cycle_and_scale() {
        assert_eq!(AnimationSpeed::Slow.next(), AnimationSpeed::Medium);
        assert_eq!(AnimationSpeed::Fast.next(), AnimationSpeed::Slow);
        assert!(AnimationSpeed::Slow.time_scale() < AnimationSpeed::Medium.time_scale());
        assert!(AnimationSpeed::Medium.time_scale() < AnimationSpeed::Fast.time_scale());
    }

    #[test]
    fn test_scene_serde_round_trip() {
        let toml = "scene = \"home\"";
        #[derive(Deserialize)]
        struct Probe {
            scene: SceneKind,
        }
        let probe: Probe = toml::from_str(toml).unwrap();
        assert_eq!(probe.scene, SceneKind::Home);
    }

    #[test]
    fn test_color_class_rgb() {
        assert_eq!(ColorClass::BlueWhite.rgb(), (200, 220, 255));
        assert_eq!(ColorClass::White.rgb(), (255, 255, 255));
        assert_eq!(ColorClass::RedOrange.rgb(), (255, 200, 150));
    }

    #[test]
    fn test_night_sky_tuning_sanity() {
        let field = FieldTuning::night_sky();
        assert!(field.cells_per_star > 0.0);
        assert!(field.glow_small < field.glow_large);

        let meteors = MeteorTuning::night_sky();
        assert!(meteors.fade_in > meteors.fade_out);
        assert!(meteors.spawn_chance > 0.0 && meteors.spawn_chance < 1.0);
    }
}
