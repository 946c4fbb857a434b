//! Color math for the sky painter.

use ratatui::style::Color;

/// Linear RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit components.
    pub fn from_u8(rgb: (u8, u8, u8)) -> Self {
        Self::new(
            rgb.0 as f32 / 255.0,
            rgb.1 as f32 / 255.0,
            rgb.2 as f32 / 255.0,
        )
    }

    /// Componentwise scale.
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Componentwise sum, unclamped (clamping happens on conversion).
    pub fn plus(self, other: Rgb) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    /// Linear interpolation toward `other`.
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        Self::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }

    /// Convert to a terminal color, clamping each component.
    pub fn to_color(self) -> Color {
        Color::Rgb(
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}

/// Linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample a vertical gradient at `t` in [0, 1].
///
/// `stops` are (position, color) pairs sorted by position; `t` outside
/// the stop range clamps to the nearest stop.
pub fn gradient_at(stops: &[(f32, Rgb)], t: f32) -> Rgb {
    let Some(first) = stops.first() else {
        return Rgb::BLACK;
    };
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let span = (p1 - p0).max(f32::EPSILON);
            return c0.lerp(c1, (t - p0) / span);
        }
    }
    stops[stops.len() - 1].1
}
