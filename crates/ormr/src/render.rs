//! Renderer, camera, and asset-handle contracts.
//!
//! The core never talks to a graphics API or decodes image data. It draws
//! through the [`Renderer`] trait and refers to textures through opaque
//! [`TextureHandle`]s issued by whatever loaded them. The draw pass in
//! [`view`](crate::view) is the sole caller of [`Renderer::draw_sprite`].

use crate::math::{Rect, Vec2};

/// Opaque handle into a texture atlas owned by the embedding.
///
/// Copyable so it can live in components without lifetimes or refcounts. The
/// core never dereferences it; only the renderer knows what it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// A sub-region of a texture: the unit of drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// Source region within the texture, in pixels.
    pub source: Rect,
}

impl Sprite {
    pub fn new(texture: TextureHandle, source: Rect) -> Self {
        Self { texture, source }
    }
}

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Issues draw calls on behalf of the draw pass. Implemented by the
/// embedding (a GPU backend, a test recorder, a console logger).
pub trait Renderer {
    /// Draw `source` out of `texture` into `dest` (both in pixels), pivoting
    /// rotation around `origin` (offset from `dest`'s top-left corner).
    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation_degrees: f32,
        tint: Color,
    );
}

/// A world-space camera rectangle used for culling.
///
/// Anything whose destination quad falls entirely outside the camera's
/// bounds is skipped by the draw pass. Viewport-to-screen math lives in the
/// embedding, not here.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub center: Vec2,
    /// Width and height of the visible region, in world units.
    pub extent: Vec2,
}

impl Camera {
    pub fn new(center: Vec2, extent: Vec2) -> Self {
        Self { center, extent }
    }

    /// The visible region as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.extent.x / 2.0,
            self.center.y - self.extent.y / 2.0,
            self.extent.x,
            self.extent.y,
        )
    }
}
