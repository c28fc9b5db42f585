//! # Animation — Sprite-Sheet Playback
//!
//! A [`SpriteSheet`] is an immutable sequence of frames, each pairing a
//! [`Sprite`] with a duration. Sheets come from the asset provider and are
//! shared via `Arc`; the core never loads or decodes image data. An
//! [`Animation`] component tracks playback position through one sheet and
//! pushes the current frame's sprite into the entity's [`View`](crate::view::View).
//!
//! ## Catch-up
//!
//! Frame advancement is a while-loop, not a single conditional: when one
//! tick's delta spans several frame durations (a frame drop, a long load),
//! every spanned frame is consumed and the remainder carries into the new
//! current frame. A single `if` would lag the animation behind wall time.

use std::sync::Arc;

use crate::ecs::world::World;
use crate::math::Rect;
use crate::render::{Sprite, TextureHandle};

/// One frame of a sprite sheet.
#[derive(Debug, Clone, Copy)]
pub struct SpriteFrame {
    pub sprite: Sprite,
    /// How long this frame stays on screen, in seconds.
    pub duration: f32,
}

/// An immutable sequence of frames. Build once, share via `Arc`.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub frames: Vec<SpriteFrame>,
}

impl SpriteSheet {
    pub fn new(frames: Vec<SpriteFrame>) -> Self {
        Self { frames }
    }

    /// A horizontal strip of `count` equally-sized, equally-timed frames
    /// starting at the texture's left edge.
    pub fn strip(
        texture: TextureHandle,
        frame_width: f32,
        frame_height: f32,
        count: u32,
        frame_time: f32,
    ) -> Self {
        let frames = (0..count)
            .map(|i| SpriteFrame {
                sprite: Sprite::new(
                    texture,
                    Rect::new(i as f32 * frame_width, 0.0, frame_width, frame_height),
                ),
                duration: frame_time,
            })
            .collect();
        Self { frames }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Component: playback state for one sprite sheet.
///
/// Mutated solely by [`update_animations`]; other systems read `frame` and
/// `finished` at most.
#[derive(Debug, Clone)]
pub struct Animation {
    pub sheet: Arc<SpriteSheet>,
    /// Index of the current frame.
    pub frame: usize,
    /// Time spent in the current frame so far.
    pub elapsed: f32,
    /// Wrap to frame 0 after the last frame. Non-looping animations clamp
    /// on the last frame and set `finished`.
    pub looping: bool,
    /// Playback speed multiplier (1.0 = normal).
    pub speed: f32,
    pub finished: bool,
}

impl Animation {
    /// A looping animation at normal speed.
    pub fn new(sheet: Arc<SpriteSheet>) -> Self {
        Self {
            sheet,
            frame: 0,
            elapsed: 0.0,
            looping: true,
            speed: 1.0,
            finished: false,
        }
    }

    /// Play through once, then clamp on the last frame.
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    /// Set the playback speed multiplier.
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Advance every animation by `dt` and push changed frames into views.
///
/// Entities without a View still animate (the frame index advances); the
/// push is simply skipped. Frames with non-positive durations stop the
/// catch-up loop rather than spinning.
pub fn update_animations(world: &mut World, dt: f32) {
    let World {
        animations, views, ..
    } = world;

    for (entity, anim) in animations.iter_mut() {
        if anim.finished || anim.sheet.frames.is_empty() {
            continue;
        }

        anim.elapsed += dt * anim.speed;
        let started_at = anim.frame;

        loop {
            let duration = anim.sheet.frames[anim.frame].duration;
            if duration <= 0.0 || anim.elapsed < duration {
                break;
            }
            anim.elapsed -= duration;
            if anim.frame + 1 < anim.sheet.frames.len() {
                anim.frame += 1;
            } else if anim.looping {
                anim.frame = 0;
            } else {
                anim.finished = true;
                break;
            }
        }

        if anim.frame != started_at {
            if let Some(view) = views.get_mut(entity) {
                view.sprite = anim.sheet.frames[anim.frame].sprite;
            }
        }
    }
}
