//! Glyph constants for the sky painter.

/// Star glyphs ordered from faint to bright.
pub const STAR_RAMP: &[char] = &['·', '.', '+', '*', '✧', '✦'];
