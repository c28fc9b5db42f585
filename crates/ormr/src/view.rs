//! # View — Layered Sprite Presentation
//!
//! A [`View`] is what an entity looks like: a sprite plus per-instance
//! scale/origin/rotation/tint overrides. Views are stored in a
//! [`LayeredStore`](crate::ecs::layered::LayeredStore) keyed by
//! [`ViewKey`] (visibility flag + [`Layer`]), so the draw pass walks exactly
//! the visible entries of one layer at a time: no per-entity visibility
//! checks, and toggling visibility is a cheap
//! [`reclassify`](crate::ecs::layered::LayeredStore::reclassify) instead of
//! a flag scan.
//!
//! [`draw_views`] runs once per real frame, after the fixed updates, walking
//! layers back to front and culling against the camera bounds before every
//! draw call.

use crate::ecs::layered::PartitionKey;
use crate::ecs::world::World;
use crate::math::{Rect, Vec2};
use crate::render::{Camera, Color, Renderer, Sprite};

/// Draw-order tier. Earlier variants draw first (further back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    BackgroundFar,
    BackgroundNear,
    Playfield,
    ForegroundNear,
    ForegroundFar,
}

impl Layer {
    /// Every layer, in draw order.
    pub const ALL: [Layer; 5] = [
        Layer::BackgroundFar,
        Layer::BackgroundNear,
        Layer::Playfield,
        Layer::ForegroundNear,
        Layer::ForegroundFar,
    ];

    fn index(self) -> usize {
        match self {
            Layer::BackgroundFar => 0,
            Layer::BackgroundNear => 1,
            Layer::Playfield => 2,
            Layer::ForegroundNear => 3,
            Layer::ForegroundFar => 4,
        }
    }
}

/// The secondary storage key for views: one partition per (visibility,
/// layer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewKey {
    pub visible: bool,
    pub layer: Layer,
}

impl ViewKey {
    pub fn visible(layer: Layer) -> Self {
        Self { visible: true, layer }
    }

    pub fn hidden(layer: Layer) -> Self {
        Self { visible: false, layer }
    }
}

impl PartitionKey for ViewKey {
    const COUNT: usize = Layer::ALL.len() * 2;

    fn partition(self) -> usize {
        self.layer.index() * 2 + self.visible as usize
    }
}

/// How an entity is drawn. Pair with a Transform for placement; entities
/// without one are skipped by the draw pass.
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub sprite: Sprite,
    /// Per-instance scale, multiplied with the transform's scale.
    pub scale: Vec2,
    /// Pivot for rotation and placement, in source pixels from the sprite's
    /// top-left corner.
    pub origin: Vec2,
    /// Extra rotation in degrees on top of the transform's.
    pub rotation: f32,
    pub tint: Color,
}

impl View {
    pub fn new(sprite: Sprite) -> Self {
        Self {
            sprite,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
            rotation: 0.0,
            tint: Color::WHITE,
        }
    }

    /// Set the per-instance scale.
    pub fn scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vec2::new(x, y);
        self
    }

    /// Set the pivot in source pixels.
    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    /// Set the per-instance rotation in degrees.
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the tint color.
    pub fn tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// Draw every visible view, back to front by layer, culled against the
/// camera.
///
/// Placement uses the transform's resolved pose; parent-relative entities
/// whose chain has never resolved have nowhere to be drawn and are skipped.
/// Culling tests the axis-aligned destination quad, which is conservative
/// for rotated sprites.
pub fn draw_views(world: &World, camera: &Camera, renderer: &mut dyn Renderer) {
    let bounds = camera.bounds();

    for layer in Layer::ALL {
        for (entity, view) in world.views.iter(ViewKey::visible(layer)) {
            let Some(transform) = world.transforms.get(entity) else {
                continue;
            };
            let Some(pose) = transform.resolved() else {
                continue;
            };

            let scale = pose.scale * view.scale;
            let size = view.sprite.source.size() * scale;
            let origin = view.origin * scale;
            let top_left = pose.position - origin;
            let dest = Rect::new(top_left.x, top_left.y, size.x, size.y);

            if !dest.overlaps(&bounds) {
                continue;
            }

            renderer.draw_sprite(
                view.sprite.texture,
                view.sprite.source,
                dest,
                origin,
                pose.rotation + view.rotation,
                view.tint,
            );
        }
    }
}
