//! # Game — The Frame Driver
//!
//! [`Game`] wires the pieces into the per-frame control flow:
//!
//! ```text
//! frame(dt, renderer)
//!   │
//!   ├─ accumulate dt into the fixed timestep
//!   ├─ for each drained fixed step:
//!   │    1. timers        (world.timers.tick)
//!   │    2. movement      (update_movement)
//!   │    3. animation     (update_animations)
//!   │    4. transforms    (resolve_transforms, fanned out over the pool)
//!   └─ draw once          (draw_views, culled against the camera)
//! ```
//!
//! The phases run strictly in that order and never overlap; movement must
//! precede transform resolution so freshly moved locals propagate down
//! parent chains within the same step. The embedding owns the real loop and
//! clock; it calls [`frame`](Game::frame) once per real frame with the
//! elapsed seconds.

use crate::animation::update_animations;
use crate::dispatch::WorkerPool;
use crate::ecs::world::World;
use crate::math::Vec2;
use crate::movement::update_movement;
use crate::render::{Camera, Renderer};
use crate::time::{FixedTimestep, Time};
use crate::transform::resolve_transforms;
use crate::view::draw_views;

/// The assembled runtime: world, camera, clocks, and worker pool.
pub struct Game {
    pub world: World,
    pub camera: Camera,
    time: Time,
    fixed: FixedTimestep,
    pool: WorkerPool,
}

impl Game {
    /// A runtime with a 1/60 s fixed step, four workers, and a 1280x720
    /// camera centered on the origin.
    pub fn new() -> Self {
        Self {
            world: World::new(),
            camera: Camera::new(Vec2::ZERO, Vec2::new(1280.0, 720.0)),
            time: Time::new(),
            fixed: FixedTimestep::new(1.0 / 60.0),
            pool: WorkerPool::default(),
        }
    }

    /// Set the fixed-step length in seconds.
    pub fn with_fixed_step(mut self, step: f32) -> Self {
        self.fixed = FixedTimestep::new(step);
        self
    }

    /// Set the worker count for parallel dispatch.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.pool = WorkerPool::new(workers);
        self
    }

    /// Set the camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Frame statistics (delta, elapsed, frame count).
    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Run one real frame: drain the fixed updates the accumulated time
    /// allows, then draw.
    pub fn frame(&mut self, dt: f32, renderer: &mut dyn Renderer) {
        self.time.advance(dt);

        let steps = self.fixed.advance(dt);
        let step = self.fixed.step();
        for _ in 0..steps {
            self.world.timers.tick(step);
            update_movement(&mut self.world, step);
            update_animations(&mut self.world, step);
            resolve_transforms(&mut self.world, &self.pool);
        }

        draw_views(&self.world, &self.camera, renderer);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
