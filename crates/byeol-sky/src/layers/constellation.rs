//! Fixed constellation figures and their per-frame placement.
//!
//! A figure is a compile-time constant: normalized point positions plus
//! the index pairs joined by connection lines. Only the pixel-space
//! placement (offset and scale) and the per-point wobble vary with the
//! surface and the clock; the topology never changes.

use crate::layers::twinkle;

/// Terminal cells are about twice as tall as wide; the figure's square
/// normalized space is stretched horizontally to compensate.
const CELL_ASPECT: f32 = 2.0;

/// Width above which a figure anchors off-center instead of centering.
const WIDE_SURFACE: f32 = 120.0;

/// Wobble amplitude in cells, aspect-corrected.
const WOBBLE_X: f32 = 1.6;
const WOBBLE_Y: f32 = 0.8;

/// A constellation figure.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub name: &'static str,
    /// Normalized point positions, fractions of the figure's bounding box.
    pub points: &'static [(f32, f32)],
    /// Index pairs joined by connection lines.
    pub connections: &'static [(usize, usize)],
    /// Fraction of the shorter surface dimension the figure spans.
    pub size_factor: f32,
    /// Horizontal anchor (fraction of width) on wide surfaces.
    pub wide_anchor: f32,
    /// Point rendered larger and warmer, if any.
    pub highlight: Option<usize>,
}

/// Pixel-space placement of a figure on the current surface.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Shape {
    /// Placement for the current surface. Wide surfaces shift the figure
    /// to its anchor column; narrow ones center it.
    pub fn placement(&self, width: u16, height: u16) -> Placement {
        let w = width as f32;
        let h = height as f32;
        let scale_y = h.min(w / CELL_ASPECT) * self.size_factor;
        let scale_x = scale_y * CELL_ASPECT;
        let offset_y = (h - scale_y) / 2.0;
        let offset_x = if w > WIDE_SURFACE {
            w * self.wide_anchor
        } else {
            (w - scale_x) / 2.0
        };
        Placement {
            offset_x,
            offset_y,
            scale_x,
            scale_y,
        }
    }

    /// Rendered position of point `i` at time `t`: base placement plus
    /// the per-point float offset.
    pub fn point_at(&self, i: usize, placement: &Placement, t: f32) -> (f32, f32) {
        let (nx, ny) = self.points[i];
        let (wx, wy) = twinkle::point_wobble(i, t, WOBBLE_X, WOBBLE_Y);
        (
            placement.offset_x + nx * placement.scale_x + wx,
            placement.offset_y + ny * placement.scale_y + wy,
        )
    }

    /// The wobbled connection segments for the current frame: always
    /// exactly `connections.len()` of them.
    pub fn segments(&self, width: u16, height: u16, t: f32) -> Vec<((f32, f32), (f32, f32))> {
        let placement = self.placement(width, height);
        self.connections
            .iter()
            .map(|&(a, b)| {
                (
                    self.point_at(a, &placement, t),
                    self.point_at(b, &placement, t),
                )
            })
            .collect()
    }
}

/// The Felis (cat) figure: nine stars, eight connections.
pub const FELIS: Shape = Shape {
    name: "Felis",
    points: &[
        (0.85, 0.4),  // nose
        (0.75, 0.3),  // ear base
        (0.65, 0.4),  // shoulder
        (0.65, 0.5),  // chest
        (0.4, 0.5),   // mid back
        (0.35, 0.6),  // hip
        (0.15, 0.75), // tail tip
        (0.25, 0.45), // spine
        (0.8, 0.6),   // front paw
    ],
    connections: &[
        (0, 1),
        (1, 2),
        (2, 3),
        (2, 4),
        (3, 8),
        (4, 5),
        (4, 7),
        (5, 6),
    ],
    size_factor: 0.6,
    wide_anchor: 0.6,
    highlight: None,
};

/// The Taurus figure: twelve stars, eleven connections, Aldebaran
/// (index 4) rendered larger and warmer.
pub const TAURUS: Shape = Shape {
    name: "Taurus",
    points: &[
        (0.15, 0.25), // upper horn tip
        (0.40, 0.38),
        (0.52, 0.50),
        (0.08, 0.40), // lower horn tip
        (0.48, 0.53), // Aldebaran
        (0.55, 0.55),
        (0.65, 0.62),
        (0.55, 0.70),
        (0.62, 0.78),
        (0.85, 0.58),
        (0.88, 0.65),
        (0.92, 0.70),
    ],
    connections: &[
        (0, 1),
        (1, 2),
        (3, 4),
        (4, 5),
        (2, 5),
        (5, 6),
        (6, 7),
        (7, 8),
        (6, 9),
        (9, 10),
        (10, 11),
    ],
    size_factor: 0.7,
    wide_anchor: 0.1,
    highlight: Some(4),
};
