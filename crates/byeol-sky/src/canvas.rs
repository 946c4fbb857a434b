//! Off-screen cell canvas the sky layers paint into.
//!
//! A frame is painted back to front into a fresh grid: background fill,
//! constellation strokes, star glyphs with glow halos, meteor streaks.
//! Flushing maps each cell's accumulated light to a glyph from the star
//! ramp and emits one styled span per cell. Because the grid is rebuilt
//! every frame, no paint state can leak between frames.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::chars::STAR_RAMP;
use crate::color::{Rgb, gradient_at};

/// Energy below which a cell renders as empty sky.
const GLYPH_FLOOR: f32 = 0.05;

/// Dotted-stroke pattern: cells lit per period.
const DASH_ON: usize = 2;
/// Dotted-stroke pattern period in cells.
const DASH_PERIOD: usize = 5;

/// One terminal cell: sky color plus accumulated starlight.
#[derive(Debug, Clone, Copy)]
struct Cell {
    /// Background sky color.
    bg: Rgb,
    /// Light sum, weighted by deposit energy.
    light: Rgb,
    /// Total deposited energy.
    energy: f32,
}

impl Cell {
    fn dark() -> Self {
        Self {
            bg: Rgb::BLACK,
            light: Rgb::BLACK,
            energy: 0.0,
        }
    }
}

/// Cell-grid paint surface, rebuilt from scratch every frame.
#[derive(Debug)]
pub struct SkyCanvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl SkyCanvas {
    /// Create a dark canvas of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::dark(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// A zero-area canvas accepts paint calls but renders nothing.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells.get_mut(idx)
    }

    fn cell_at(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Deposited energy at a cell, for inspection.
    pub fn energy_at(&self, x: u16, y: u16) -> f32 {
        self.cell_at(x, y).map(|c| c.energy).unwrap_or(0.0)
    }

    /// Background color at a cell, for inspection.
    pub fn background_at(&self, x: u16, y: u16) -> Option<Rgb> {
        self.cell_at(x, y).map(|c| c.bg)
    }

    /// Flat background fill.
    pub fn fill(&mut self, color: Rgb) {
        for cell in &mut self.cells {
            cell.bg = color;
        }
    }

    /// Vertical gradient background fill, top row at t = 0.
    pub fn fill_vertical_gradient(&mut self, stops: &[(f32, Rgb)]) {
        let denom = (self.height.max(1) as f32 - 1.0).max(1.0);
        for y in 0..self.height {
            let color = gradient_at(stops, y as f32 / denom);
            for x in 0..self.width {
                let idx = y as usize * self.width as usize + x as usize;
                self.cells[idx].bg = color;
            }
        }
    }

    /// Deposit light at a point. Out-of-bounds positions and non-positive
    /// energy are ignored.
    pub fn deposit(&mut self, x: f32, y: f32, color: Rgb, energy: f32) {
        if energy <= 0.0 || !x.is_finite() || !y.is_finite() {
            return;
        }
        if let Some(cell) = self.cell_mut(x.round() as i32, y.round() as i32) {
            cell.light = cell.light.plus(color.scaled(energy));
            cell.energy += energy;
        }
    }

    /// Deposit a glow halo around a point, falling off with distance.
    /// The center cell is left to the caller.
    pub fn deposit_halo(&mut self, x: f32, y: f32, color: Rgb, energy: f32, radius: i32) {
        if energy <= 0.0 {
            return;
        }
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let d2 = (dx * dx + dy * dy) as f32;
                self.deposit(x + dx as f32, y + dy as f32, color, energy / (1.0 + d2));
            }
        }
    }

    /// Stroke a dotted line between two points.
    pub fn stroke_dotted(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, energy: f32) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let dist = (dx * dx + dy * dy).sqrt();
        let steps = dist.ceil().max(1.0) as usize;
        for s in 0..=steps {
            if s % DASH_PERIOD >= DASH_ON {
                continue;
            }
            let t = s as f32 / steps as f32;
            self.deposit(from.0 + dx * t, from.1 + dy * t, color, energy);
        }
    }

    /// Stroke a streak fading from full energy at the head to nothing at
    /// the tail.
    pub fn stroke_fading(&mut self, head: (f32, f32), tail: (f32, f32), color: Rgb, energy: f32) {
        let dx = tail.0 - head.0;
        let dy = tail.1 - head.1;
        let dist = (dx * dx + dy * dy).sqrt();
        let steps = dist.ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let fade = (1.0 - t).powf(1.5);
            self.deposit(head.0 + dx * t, head.1 + dy * t, color, energy * fade);
        }
    }

    /// Flush the canvas to one styled line per row.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.height)
            .map(|y| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let cell = self.cells[y as usize * self.width as usize + x as usize];
                        self.render_cell(cell)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// Render a single cell as a styled span.
    fn render_cell(&self, cell: Cell) -> Span<'static> {
        let bg = cell.bg.to_color();
        if cell.energy < GLYPH_FLOOR {
            return Span::styled(" ", Style::new().bg(bg));
        }

        // Average deposited color, dimmed toward the sky for faint light.
        let avg = cell.light.scaled(1.0 / cell.energy);
        let brightness = cell.energy.clamp(0.25, 1.0);
        let fg = cell.bg.lerp(avg, brightness);

        let glyph = glyph_for(cell.energy);
        Span::styled(glyph.to_string(), Style::new().fg(fg.to_color()).bg(bg))
    }
}

/// Pick a star-ramp glyph for an energy level.
fn glyph_for(energy: f32) -> char {
    let idx = if energy < 0.15 {
        0
    } else if energy < 0.3 {
        1
    } else if energy < 0.55 {
        2
    } else if energy < 0.9 {
        3
    } else if energy < 1.4 {
        4
    } else {
        5
    };
    STAR_RAMP[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_canvas_is_inert() {
        let mut canvas = SkyCanvas::new(0, 24);
        assert!(canvas.is_empty());
        canvas.fill(Rgb::new(0.1, 0.1, 0.1));
        canvas.deposit(1.0, 1.0, Rgb::new(1.0, 1.0, 1.0), 1.0);
        canvas.stroke_dotted((0.0, 0.0), (5.0, 5.0), Rgb::new(1.0, 1.0, 1.0), 0.5);
        assert!(canvas.to_lines().iter().all(|l| l.spans.is_empty()));
    }

    #[test]
    fn test_out_of_bounds_deposit_ignored() {
        let mut canvas = SkyCanvas::new(10, 10);
        canvas.deposit(-3.0, 5.0, Rgb::new(1.0, 1.0, 1.0), 1.0);
        canvas.deposit(5.0, 40.0, Rgb::new(1.0, 1.0, 1.0), 1.0);
        canvas.deposit(f32::NAN, 1.0, Rgb::new(1.0, 1.0, 1.0), 1.0);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(canvas.energy_at(x, y), 0.0);
            }
        }
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut canvas = SkyCanvas::new(10, 10);
        canvas.deposit(4.0, 4.0, Rgb::new(1.0, 1.0, 1.0), 0.4);
        canvas.deposit(4.2, 3.8, Rgb::new(1.0, 1.0, 1.0), 0.4);
        assert!((canvas.energy_at(4, 4) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_halo_spares_center() {
        let mut canvas = SkyCanvas::new(10, 10);
        canvas.deposit_halo(5.0, 5.0, Rgb::new(1.0, 1.0, 1.0), 1.0, 1);
        assert_eq!(canvas.energy_at(5, 5), 0.0);
        assert!(canvas.energy_at(4, 5) > 0.0);
        assert!(canvas.energy_at(5, 4) > 0.0);
        // Diagonal neighbors are dimmer than orthogonal ones.
        assert!(canvas.energy_at(4, 4) < canvas.energy_at(4, 5));
    }

    #[test]
    fn test_gradient_fill_endpoints() {
        let mut canvas = SkyCanvas::new(4, 5);
        let stops = [
            (0.0, Rgb::new(0.0, 0.0, 0.1)),
            (1.0, Rgb::new(0.1, 0.0, 0.3)),
        ];
        canvas.fill_vertical_gradient(&stops);
        assert_eq!(canvas.background_at(0, 0), Some(Rgb::new(0.0, 0.0, 0.1)));
        assert_eq!(canvas.background_at(3, 4), Some(Rgb::new(0.1, 0.0, 0.3)));
    }

    #[test]
    fn test_dotted_stroke_lights_a_subset() {
        let mut canvas = SkyCanvas::new(30, 5);
        canvas.stroke_dotted((0.0, 2.0), (29.0, 2.0), Rgb::new(1.0, 1.0, 1.0), 0.2);
        let lit = (0..30).filter(|&x| canvas.energy_at(x, 2) > 0.0).count();
        assert!(lit > 0);
        // Dashes leave gaps: well under the full row is lit.
        assert!(lit < 30);
    }

    #[test]
    fn test_fading_stroke_dims_toward_tail() {
        let mut canvas = SkyCanvas::new(30, 5);
        canvas.stroke_fading((25.0, 2.0), (5.0, 2.0), Rgb::new(1.0, 1.0, 1.0), 1.0);
        assert!(canvas.energy_at(25, 2) > canvas.energy_at(15, 2));
        assert!(canvas.energy_at(15, 2) > canvas.energy_at(6, 2));
    }

    #[test]
    fn test_to_lines_shape() {
        let canvas = SkyCanvas::new(7, 3);
        let lines = canvas.to_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.spans.len() == 7));
    }
}
