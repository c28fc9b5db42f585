//! Convenience re-exports — `use ormr::prelude::*` for the common items.

pub use crate::animation::{Animation, SpriteFrame, SpriteSheet, update_animations};
pub use crate::dispatch::WorkerPool;
pub use crate::ecs::{Entity, LayeredStore, PartitionKey, SparseStore, World};
pub use crate::game::Game;
pub use crate::math::{Rect, Vec2};
pub use crate::movement::{Direction, Movement, update_movement};
pub use crate::render::{Camera, Color, Renderer, Sprite, TextureHandle};
pub use crate::time::{FixedTimestep, Time};
pub use crate::timer::{FirePolicy, Repeat, Step, Timer, TimerScheduler};
pub use crate::transform::{Pose, Transform, resolve_transforms};
pub use crate::view::{Layer, View, ViewKey, draw_views};
