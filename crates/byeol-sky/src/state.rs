//! Sky state: resize handling, per-frame advancement, frame painting.

use byeol_core::{AnimationSpeed, FieldTuning, MeteorTuning, SceneKind};
use ratatui::{Frame, widgets::Paragraph};

use crate::canvas::SkyCanvas;
use crate::color::Rgb;
use crate::layers::constellation::{FELIS, Shape, TAURUS};
use crate::layers::field::{self, Star};
use crate::layers::meteors::{self, Meteor};
use crate::layers::twinkle;

/// Night sky gradient, deep space black-blue down to twilight purple.
const NIGHT_STOPS: [(f32, Rgb); 4] = [
    (0.0, Rgb::new(0.004, 0.004, 0.043)),
    (0.3, Rgb::new(0.016, 0.012, 0.086)),
    (0.7, Rgb::new(0.031, 0.024, 0.161)),
    (1.0, Rgb::new(0.067, 0.043, 0.212)),
];

/// Flat sky behind a lone constellation figure.
const FIGURE_BG: Rgb = Rgb::new(0.004, 0.004, 0.043);

/// Faint blue-white of connection strokes.
const LINE_COLOR: Rgb = Rgb::new(0.784, 0.863, 1.0);
const LINE_ENERGY: f32 = 0.12;

/// Meteor trail tint and head color.
const TRAIL_COLOR: Rgb = Rgb::new(0.784, 0.863, 1.0);
const HEAD_COLOR: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// Constellation point colors.
const POINT_COLOR: Rgb = Rgb::new(1.0, 1.0, 1.0);
const HIGHLIGHT_COLOR: Rgb = Rgb::new(1.0, 0.78, 0.65);

/// Mutable sky state, owned exclusively by the app's frame loop.
///
/// Holds the persistent star population, the live meteor set, and the
/// seedable random source behind every stochastic draw. Scene switches
/// and resizes regenerate wholesale; nothing is shared across frames
/// except through this struct.
#[derive(Debug)]
pub struct SkyState {
    /// Persistent starfield population.
    stars: Vec<Star>,
    /// Live shooting stars.
    meteors: Vec<Meteor>,
    /// Field tuning preset.
    field_tuning: FieldTuning,
    /// Meteor tuning preset.
    meteor_tuning: MeteorTuning,
    /// Last known surface width.
    last_width: u16,
    /// Last known surface height.
    last_height: u16,
    /// Animation clock reading at the previous frame, in milliseconds.
    last_update_ms: u64,
    /// Seedable random source for every stochastic draw.
    rng: fastrand::Rng,
}

impl SkyState {
    /// Create sky state with a reproducible random source.
    pub fn new(seed: u64) -> Self {
        Self {
            stars: Vec::new(),
            meteors: Vec::new(),
            field_tuning: FieldTuning::night_sky(),
            meteor_tuning: MeteorTuning::night_sky(),
            last_width: 0,
            last_height: 0,
            last_update_ms: 0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Reset the random source and force regeneration on the next frame.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
        self.stars.clear();
        self.meteors.clear();
        self.last_width = 0;
        self.last_height = 0;
    }

    /// Number of stars in the current population.
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Number of live shooting stars.
    pub fn meteor_count(&self) -> usize {
        self.meteors.len()
    }

    /// Render the scene into the frame.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        scene: SceneKind,
        elapsed_ms: u64,
        speed: AnimationSpeed,
        meteors_enabled: bool,
    ) {
        let area = frame.area();
        let canvas = self.paint(
            area.width,
            area.height,
            scene,
            elapsed_ms,
            speed,
            meteors_enabled,
        );
        if canvas.is_empty() {
            return;
        }
        frame.render_widget(Paragraph::new(canvas.to_lines()), area);
    }

    /// Paint one frame into a fresh canvas.
    ///
    /// Stateful layers (drift, meteor fades) advance once per call with
    /// a positive clock delta; a frozen clock repaints without advancing,
    /// which is how pause works. A zero-area surface is a no-op.
    pub fn paint(
        &mut self,
        width: u16,
        height: u16,
        scene: SceneKind,
        elapsed_ms: u64,
        speed: AnimationSpeed,
        meteors_enabled: bool,
    ) -> SkyCanvas {
        let mut canvas = SkyCanvas::new(width, height);
        if canvas.is_empty() {
            return canvas;
        }

        let has_field = matches!(scene, SceneKind::Starfield | SceneKind::Home);

        // Regenerate the population wholesale when the surface changes.
        // Fixed figures only recompute placement, never points.
        let resized = width != self.last_width || height != self.last_height;
        if has_field && (resized || self.stars.is_empty()) {
            self.stars = field::init_field(width, height, &self.field_tuning, &mut self.rng);
            self.meteors.clear();
        }
        if resized {
            self.last_width = width;
            self.last_height = height;
        }

        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;
        let advancing = delta_ms > 0;

        let t = elapsed_ms as f32 / 1000.0 * speed.time_scale();

        match scene {
            SceneKind::Starfield => {
                canvas.fill_vertical_gradient(&NIGHT_STOPS);
                self.paint_field(&mut canvas, t, advancing, speed);
                self.paint_meteors(&mut canvas, meteors_enabled, advancing);
            }
            SceneKind::Felis => {
                canvas.fill(FIGURE_BG);
                paint_figure(&mut canvas, &FELIS, t);
            }
            SceneKind::Taurus => {
                canvas.fill(FIGURE_BG);
                paint_figure(&mut canvas, &TAURUS, t);
            }
            SceneKind::Home => {
                canvas.fill_vertical_gradient(&NIGHT_STOPS);
                self.paint_field(&mut canvas, t, advancing, speed);
                self.paint_meteors(&mut canvas, meteors_enabled, advancing);
                paint_figure(&mut canvas, &FELIS, t);
                paint_figure(&mut canvas, &TAURUS, t);
            }
        }

        canvas
    }

    /// Drift and draw the persistent star population.
    fn paint_field(&mut self, canvas: &mut SkyCanvas, t: f32, advancing: bool, speed: AnimationSpeed) {
        if advancing {
            field::update(
                &mut self.stars,
                speed.time_scale(),
                canvas.width(),
                canvas.height(),
                &self.field_tuning,
                &mut self.rng,
            );
        }
        for star in &self.stars {
            let alpha = twinkle::star_alpha(star, t);
            let color = Rgb::from_u8(star.color.rgb());
            // Bigger stars burn brighter and get the wider halo.
            let energy = alpha * (0.35 + star.radius * 0.55);
            canvas.deposit(star.x, star.y, color, energy);
            if star.radius > self.field_tuning.glow_large {
                canvas.deposit_halo(star.x, star.y, color, alpha * 0.35, 2);
            } else if star.radius > self.field_tuning.glow_small {
                canvas.deposit_halo(star.x, star.y, color, alpha * 0.2, 1);
            } else {
                // Even tiny stars get a faint halo.
                canvas.deposit_halo(star.x, star.y, color, alpha * 0.05, 1);
            }
        }
    }

    /// Spawn, fade, draw, then integrate the shooting stars. Integration
    /// runs last so each meteor is drawn at the position the removal
    /// check saw.
    fn paint_meteors(&mut self, canvas: &mut SkyCanvas, enabled: bool, advancing: bool) {
        if advancing {
            if enabled {
                meteors::maybe_spawn(
                    &mut self.meteors,
                    canvas.width(),
                    canvas.height(),
                    &self.meteor_tuning,
                    &mut self.rng,
                );
            }
            meteors::fade_and_cull(&mut self.meteors, canvas.height(), &self.meteor_tuning);
        }
        for meteor in &self.meteors {
            let head = (meteor.x, meteor.y);
            let trail_energy = meteor.opacity * (0.5 + meteor.thickness * 0.4);
            canvas.stroke_fading(head, meteor.tail(), TRAIL_COLOR, trail_energy);
            canvas.deposit(meteor.x, meteor.y, HEAD_COLOR, meteor.opacity * 1.2);
            canvas.deposit_halo(
                meteor.x,
                meteor.y,
                TRAIL_COLOR,
                meteor.opacity * meteor.thickness * 0.3,
                1,
            );
        }
        if advancing {
            meteors::integrate(&mut self.meteors);
        }
    }
}

/// Paint one constellation figure: dotted connection strokes first, then
/// the twinkling point stars above them.
fn paint_figure(canvas: &mut SkyCanvas, shape: &Shape, t: f32) {
    for (from, to) in shape.segments(canvas.width(), canvas.height(), t) {
        canvas.stroke_dotted(from, to, LINE_COLOR, LINE_ENERGY);
    }
    let placement = shape.placement(canvas.width(), canvas.height());
    for i in 0..shape.points.len() {
        let (x, y) = shape.point_at(i, &placement, t);
        let tw = twinkle::point_twinkle(i, t);
        if shape.highlight == Some(i) {
            canvas.deposit(x, y, HIGHLIGHT_COLOR, 0.9 + tw * 0.6);
            canvas.deposit_halo(x, y, HIGHLIGHT_COLOR, 0.4 + tw * 0.4, 1);
        } else {
            canvas.deposit(x, y, POINT_COLOR, 0.5 + tw * 0.5);
            canvas.deposit_halo(x, y, POINT_COLOR, 0.25 + tw * 0.25, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::field::population_size;

    #[test]
    fn test_population_follows_size_law() {
        let mut sky = SkyState::new(1);
        sky.paint(80, 24, SceneKind::Starfield, 0, AnimationSpeed::Medium, true);
        let expected = population_size(80, 24, FieldTuning::night_sky().cells_per_star);
        assert_eq!(sky.star_count(), expected);
    }

    #[test]
    fn test_resize_regenerates_population() {
        let mut sky = SkyState::new(2);
        sky.paint(40, 20, SceneKind::Starfield, 0, AnimationSpeed::Medium, true);
        let before = sky.stars.clone();
        sky.paint(50, 20, SceneKind::Starfield, 16, AnimationSpeed::Medium, true);
        let expected = population_size(50, 20, FieldTuning::night_sky().cells_per_star);
        assert_eq!(sky.star_count(), expected);
        // The whole population is replaced, not diffed.
        assert_ne!(before, sky.stars);
    }

    #[test]
    fn test_resize_clears_live_meteors() {
        let mut sky = SkyState::new(3);
        sky.paint(40, 20, SceneKind::Starfield, 0, AnimationSpeed::Medium, true);
        sky.meteors.push(Meteor {
            x: 20.0,
            y: 5.0,
            vx: -0.7,
            vy: 0.7,
            trail: 10.0,
            thickness: 0.8,
            opacity: 0.5,
            fading_in: false,
        });
        sky.paint(60, 20, SceneKind::Starfield, 16, AnimationSpeed::Medium, true);
        assert_eq!(sky.meteor_count(), 0);
    }

    #[test]
    fn test_zero_area_surface_is_a_noop() {
        let mut sky = SkyState::new(4);
        let canvas = sky.paint(0, 24, SceneKind::Home, 0, AnimationSpeed::Medium, true);
        assert!(canvas.is_empty());
        assert_eq!(sky.star_count(), 0);
    }

    #[test]
    fn test_constellation_scene_keeps_no_population() {
        let mut sky = SkyState::new(5);
        sky.paint(80, 24, SceneKind::Felis, 0, AnimationSpeed::Medium, true);
        assert_eq!(sky.star_count(), 0);
        assert_eq!(sky.meteor_count(), 0);
    }

    #[test]
    fn test_frozen_clock_does_not_advance_drift() {
        let mut sky = SkyState::new(6);
        sky.paint(40, 20, SceneKind::Starfield, 100, AnimationSpeed::Medium, false);
        let before: Vec<f32> = sky.stars.iter().map(|s| s.y).collect();
        // Same clock reading again: repaint without advancing.
        sky.paint(40, 20, SceneKind::Starfield, 100, AnimationSpeed::Medium, false);
        let frozen: Vec<f32> = sky.stars.iter().map(|s| s.y).collect();
        assert_eq!(before, frozen);
        // Clock moves: drift advances.
        sky.paint(40, 20, SceneKind::Starfield, 133, AnimationSpeed::Medium, false);
        let moved: Vec<f32> = sky.stars.iter().map(|s| s.y).collect();
        assert_ne!(before, moved);
    }

    #[test]
    fn test_meteor_lifecycle_through_frames() {
        let mut sky = SkyState::new(7);
        sky.paint(80, 24, SceneKind::Starfield, 0, AnimationSpeed::Medium, false);
        sky.meteors.push(Meteor {
            x: 40.0,
            y: 5.0,
            vx: -0.7,
            vy: 0.7,
            trail: 10.0,
            thickness: 0.8,
            opacity: 0.0,
            fading_in: true,
        });
        // Thirteen advancing frames bring the meteor to full opacity.
        for frame in 1..=13u64 {
            sky.paint(
                80,
                24,
                SceneKind::Starfield,
                frame * 16,
                AnimationSpeed::Medium,
                false,
            );
        }
        assert_eq!(sky.meteor_count(), 1);
        assert_eq!(sky.meteors[0].opacity, 1.0);
        assert!(!sky.meteors[0].fading_in);
    }

    #[test]
    fn test_reseed_forces_regeneration() {
        let mut sky = SkyState::new(8);
        sky.paint(40, 20, SceneKind::Starfield, 0, AnimationSpeed::Medium, true);
        let before = sky.stars.clone();
        sky.reseed(8);
        sky.paint(40, 20, SceneKind::Starfield, 16, AnimationSpeed::Medium, true);
        // Same seed from a fresh source reproduces the same field.
        assert_eq!(before, sky.stars);
        sky.reseed(9);
        sky.paint(40, 20, SceneKind::Starfield, 32, AnimationSpeed::Medium, true);
        assert_ne!(before, sky.stars);
    }

    #[test]
    fn test_identical_seeds_paint_identical_fields() {
        let mut a = SkyState::new(99);
        let mut b = SkyState::new(99);
        a.paint(60, 30, SceneKind::Home, 0, AnimationSpeed::Medium, true);
        b.paint(60, 30, SceneKind::Home, 0, AnimationSpeed::Medium, true);
        assert_eq!(a.stars, b.stars);
    }

    #[test]
    fn test_home_scene_paints_figures_over_field() {
        let mut sky = SkyState::new(10);
        let canvas = sky.paint(200, 50, SceneKind::Home, 0, AnimationSpeed::Medium, false);
        // Every Taurus point cell carries light, wherever it landed.
        let placement = TAURUS.placement(200, 50);
        let (x, y) = TAURUS.point_at(4, &placement, 0.0);
        assert!(canvas.energy_at(x.round() as u16, y.round() as u16) > 0.0);
    }
}
