//! # Ormr — A 2D Game Runtime Core
//!
//! The simulation heart of a small real-time 2D game: sparse component
//! storage over opaque entities, parent-relative transforms resolved each
//! fixed tick, resumable timers, and a fixed-chunk worker pool for bulk
//! per-entity work. Rendering, asset loading, input, and the window loop are
//! the embedding's job; the core draws through the
//! [`Renderer`](render::Renderer) trait and consumes a delta time the
//! embedding measures.
//!
//! Start with `use ormr::prelude::*`, build a [`Game`](game::Game), and call
//! [`frame`](game::Game::frame) once per real frame.

pub mod animation;
pub mod dispatch;
pub mod ecs;
pub mod game;
pub mod math;
pub mod movement;
pub mod prelude;
pub mod render;
pub mod time;
pub mod timer;
pub mod transform;
pub mod view;
