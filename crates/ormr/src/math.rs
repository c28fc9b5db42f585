//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) vector types so users don't need
//! to depend on it directly. [`Rect`] is a pixel-space rectangle used both for
//! sprite source regions and for computed destination quads.

pub use glam::Vec2;

/// An axis-aligned rectangle in pixel space.
///
/// Used for sprite-sheet source regions (which sub-image of a texture to
/// sample) and for destination quads handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Width and height as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Whether this rectangle overlaps `other` (touching edges count as
    /// overlapping).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Rotate `v` by `degrees` around the origin.
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}
