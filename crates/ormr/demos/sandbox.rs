//! Headless solar-system demo.
//!
//! Planets orbit a spinning sun via parent-relative transforms; a moon
//! orbits a planet two levels deep. A console renderer logs a draw summary
//! every second, and a sliced timer rolls a "heatmap" over the whole scene a
//! few entities per tick without stalling any frame.
//!
//! Run with: `RUST_LOG=info cargo run -p ormr --example sandbox`

use ormr::prelude::*;

/// Logs draw-call counts instead of rendering.
#[derive(Default)]
struct ConsoleRenderer {
    draws: u32,
}

impl Renderer for ConsoleRenderer {
    fn draw_sprite(
        &mut self,
        _texture: TextureHandle,
        _source: Rect,
        _dest: Rect,
        _origin: Vec2,
        _rotation_degrees: f32,
        _tint: Color,
    ) {
        self.draws += 1;
    }
}

fn sprite(texture: u32, size: f32) -> Sprite {
    Sprite::new(TextureHandle(texture), Rect::new(0.0, 0.0, size, size))
}

fn main() {
    env_logger::init();

    let mut game = Game::new().with_camera(Camera::new(Vec2::ZERO, Vec2::new(1000.0, 1000.0)));

    // Sun at the center, slowly spinning.
    let sun = game.world.spawn();
    game.world.transforms.set(sun, Transform::local(Pose::IDENTITY));
    game.world.movements.set(sun, Movement::spin(10.0));
    game.world.views.set(
        sun,
        ViewKey::visible(Layer::BackgroundNear),
        View::new(sprite(0, 60.0)).origin(30.0, 30.0).tint(Color::rgb(1.0, 0.9, 0.2)),
    );

    // Planets parented to the sun; their orbit is the sun's spin plus their
    // own, applied to the local frame.
    let mut planets = Vec::new();
    for (i, &(distance, spin, size)) in [
        (120.0, 40.0, 20.0),
        (220.0, 25.0, 28.0),
        (340.0, 15.0, 24.0),
    ]
    .iter()
    .enumerate()
    {
        let planet = game.world.spawn();
        game.world
            .transforms
            .set(planet, Transform::child_of(sun, Pose::from_xy(distance, 0.0)));
        game.world.movements.set(planet, Movement::spin(spin));
        game.world.views.set(
            planet,
            ViewKey::visible(Layer::Playfield),
            View::new(sprite(1 + i as u32, size)).origin(size / 2.0, size / 2.0),
        );
        planets.push(planet);
    }

    // A moon around the first planet: a three-level chain.
    let moon = game.world.spawn();
    game.world
        .transforms
        .set(moon, Transform::child_of(planets[0], Pose::from_xy(40.0, 0.0)));
    game.world.views.set(
        moon,
        ViewKey::visible(Layer::ForegroundNear),
        View::new(sprite(9, 8.0)).origin(4.0, 4.0).tint(Color::rgb(0.8, 0.8, 0.8)),
    );

    // An animated comet streaking across the playfield.
    let comet = game.world.spawn();
    let flicker = std::sync::Arc::new(SpriteSheet::strip(TextureHandle(10), 16.0, 16.0, 4, 0.15));
    game.world
        .transforms
        .set(comet, Transform::local(Pose::from_xy(-480.0, -300.0)));
    game.world
        .movements
        .set(comet, Movement::heading(Vec2::new(90.0, 55.0)));
    game.world.animations.set(comet, Animation::new(flicker.clone()));
    game.world.views.set(
        comet,
        ViewKey::visible(Layer::ForegroundFar),
        View::new(flicker.frames[0].sprite),
    );

    // Blink the moon every 1.5 seconds, forever. The timer carries the next
    // state to apply; the frame loop applies it below.
    let blink = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    {
        let blink = blink.clone();
        game.world.timers.add(Timer::new(1.5, true, move |on, _| {
            *on = !*on;
            blink.store(*on, std::sync::atomic::Ordering::Relaxed);
            Step::Continue
        }));
    }

    // Slice a big pass over a synthetic dataset: 25 entries per fire, done
    // when the cursor reaches the end.
    game.world.timers.add(
        Timer::new(
            0.05,
            (0usize, vec![0.0f32; 500]),
            |(cursor, heat), _| {
                let end = (*cursor + 25).min(heat.len());
                for h in &mut heat[*cursor..end] {
                    *h += 1.0;
                }
                *cursor = end;
                if *cursor == heat.len() {
                    log::info!("heatmap pass complete");
                    Step::Done
                } else {
                    Step::Continue
                }
            },
        )
        .catch_up(),
    );

    // Ten simulated seconds at 60 fps.
    let mut renderer = ConsoleRenderer::default();
    let dt = 1.0 / 60.0;
    for frame in 0..600 {
        game.world.set_visible(moon, blink.load(std::sync::atomic::Ordering::Relaxed));
        game.frame(dt, &mut renderer);

        if frame % 60 == 59 {
            let moon_pose = game.world.transforms.get(moon).and_then(|t| t.resolved());
            log::info!(
                "t={:.1}s draws={} timers={} moon at {:?}",
                game.time().elapsed_secs(),
                renderer.draws,
                game.world.timers.len(),
                moon_pose.map(|p| (p.position.x.round(), p.position.y.round())),
            );
            renderer.draws = 0;
        }
    }
}
