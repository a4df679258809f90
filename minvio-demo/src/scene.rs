//! The bouncing-ball scene.

use minvio_display::{distinct_color, keycodes, Color, DisplaySurface, KeyStates, Presenter};
use tracing::debug;

/// Saturation used for ball colors.
const BALL_SATURATION: f64 = 0.7;

/// Golden angle in radians, for spreading start directions.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

const BACKGROUND: Color = Color::rgb(24, 24, 32);

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: Color,
}

/// What the player did this frame, read from the input latch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub toggle_pause: bool,
    pub faster: bool,
    pub slower: bool,
    pub spawn_at: Option<(i32, i32)>,
}

impl Controls {
    /// Keys count on the frame they go down; a click counts on the frame the
    /// left button goes down.
    pub fn read(
        now: &KeyStates,
        before: &KeyStates,
        mouse: (i32, i32),
        left_down: bool,
        left_was_down: bool,
    ) -> Self {
        let pressed = |code: usize| now[code] && !before[code];
        Self {
            toggle_pause: pressed(keycodes::KEY_SPACE),
            faster: pressed(keycodes::KEY_UP),
            slower: pressed(keycodes::KEY_DOWN),
            spawn_at: (left_down && !left_was_down).then_some(mouse),
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    balls: Vec<Ball>,
    width: f64,
    height: f64,
    speed: f64,
    paused: bool,
}

impl Scene {
    /// `count` balls spread around the middle of a `width`×`height` area.
    pub fn new(count: u32, width: u32, height: u32) -> Self {
        let mut scene = Self {
            balls: Vec::with_capacity(count as usize),
            width: f64::from(width),
            height: f64::from(height),
            speed: 1.0,
            paused: false,
        };
        for i in 0..count {
            let angle = f64::from(i) * GOLDEN_ANGLE;
            let x = scene.width / 2.0 + angle.cos() * scene.width / 4.0;
            let y = scene.height / 2.0 + angle.sin() * scene.height / 4.0;
            scene.spawn(x, y);
        }
        scene
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Add a ball at `(x, y)` with the next distinct color.
    pub fn spawn(&mut self, x: f64, y: f64) {
        let i = self.balls.len() as u32;
        let angle = f64::from(i) * GOLDEN_ANGLE;
        let speed = 60.0 + 15.0 * f64::from(i % 5);
        let radius = 6.0 + 3.0 * f64::from(i % 4);
        self.balls.push(Ball {
            x: x.clamp(radius, (self.width - radius).max(radius)),
            y: y.clamp(radius, (self.height - radius).max(radius)),
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            radius,
            color: distinct_color(i, BALL_SATURATION),
        });
    }

    pub fn apply(&mut self, controls: Controls) {
        if controls.toggle_pause {
            self.paused = !self.paused;
            debug!("Paused: {}", self.paused);
        }
        if controls.faster {
            self.speed = (self.speed * 1.25).min(8.0);
        }
        if controls.slower {
            self.speed = (self.speed / 1.25).max(0.125);
        }
        if let Some((x, y)) = controls.spawn_at {
            self.spawn(f64::from(x), f64::from(y));
            debug!("Spawned ball {} at ({}, {})", self.balls.len(), x, y);
        }
    }

    /// Advance every ball by `dt` seconds, bouncing off the edges.
    pub fn step(&mut self, dt: f64) {
        if self.paused {
            return;
        }
        let dt = dt * self.speed;
        for ball in &mut self.balls {
            ball.x += ball.vx * dt;
            ball.y += ball.vy * dt;
            bounce(&mut ball.x, &mut ball.vx, ball.radius, self.width);
            bounce(&mut ball.y, &mut ball.vy, ball.radius, self.height);
        }
    }

    /// Draw the frame: balls, a frame border, and the status lines.
    pub fn draw<P: Presenter>(&self, display: &mut DisplaySurface<P>, frame_ms: u64) {
        display.clear(BACKGROUND);

        let (mx, my) = (display.mouse_x(), display.mouse_y());
        let buttons = [
            ('L', display.mouse_button_left()),
            ('M', display.mouse_button_middle()),
            ('R', display.mouse_button_right()),
        ];
        let (width, height) = (display.width() as i32, display.height() as i32);

        let mut canvas = display.canvas();
        for ball in &self.balls {
            canvas.set_color(ball.color);
            canvas.fill_circle(ball.x, ball.y, ball.radius);
            canvas.set_color(Color::WHITE);
            canvas.circle(ball.x, ball.y, ball.radius);
            if self.paused {
                canvas.set_color(Color::LIGHT_GRAY);
                canvas.line_f(ball.x, ball.y, ball.x + ball.vx / 4.0, ball.y + ball.vy / 4.0, 2.0);
            }
        }

        canvas.set_color(Color::GRAY);
        canvas.rect(0, 0, width - 1, height - 1);

        // Pointer marker.
        canvas.set_color(Color::YELLOW.with_alpha(192));
        canvas.fill_polygon(&[mx, mx + 10, mx + 4], &[my, my + 4, my + 10]);

        let line_height = canvas.text_metrics("").height() as i32;
        let ascent = canvas.text_metrics("").ascent as i32;
        canvas.set_color(Color::WHITE);
        let fps = if frame_ms > 0 { 1000 / frame_ms } else { 0 };
        canvas.text(
            &format!("balls {}  x{:.2}  {} fps", self.balls.len(), self.speed, fps),
            6,
            4 + ascent,
        );

        let held: String = buttons
            .iter()
            .map(|&(name, down)| if down { name } else { '-' })
            .collect();
        canvas.text(&format!("mouse {mx},{my} [{held}]"), 6, height - line_height + ascent - 4);

        if self.paused {
            let label = "PAUSED";
            let metrics = canvas.text_metrics(label);
            canvas.set_color(Color::ORANGE);
            canvas.text(
                label,
                (width - metrics.width as i32) / 2,
                (height + metrics.ascent as i32) / 2,
            );
        }
    }
}

/// Keep a coordinate within `[radius, extent - radius]`, reflecting the
/// velocity when it hits an edge.
fn bounce(pos: &mut f64, vel: &mut f64, radius: f64, extent: f64) {
    if *pos - radius < 0.0 {
        *pos = radius;
        *vel = vel.abs();
    } else if *pos + radius > extent {
        *pos = (extent - radius).max(radius);
        *vel = -vel.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minvio_display::{InputLatch, PixelBuffer};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_balls_stay_inside() {
        let mut scene = Scene::new(12, 200, 120);
        for _ in 0..1000 {
            scene.step(1.0 / 30.0);
        }
        for ball in scene.balls() {
            assert!(ball.x >= ball.radius && ball.x <= 200.0 - ball.radius);
            assert!(ball.y >= ball.radius && ball.y <= 120.0 - ball.radius);
        }
    }

    #[test]
    fn test_bounce_reflects_velocity() {
        let (mut pos, mut vel) = (2.0, -10.0);
        bounce(&mut pos, &mut vel, 5.0, 100.0);
        assert_eq!((pos, vel), (5.0, 10.0));

        let (mut pos, mut vel) = (99.0, 10.0);
        bounce(&mut pos, &mut vel, 5.0, 100.0);
        assert_eq!((pos, vel), (95.0, -10.0));
    }

    #[test]
    fn test_pause_freezes_balls() {
        let mut scene = Scene::new(3, 100, 100);
        scene.apply(Controls {
            toggle_pause: true,
            ..Controls::default()
        });
        let before = scene.balls().to_vec();
        scene.step(1.0);
        assert_eq!(scene.balls(), &before[..]);
    }

    #[test]
    fn test_controls_only_fire_on_press() {
        let latch = InputLatch::new();
        latch.key_down(keycodes::KEY_SPACE);
        let (now, before) = (latch.current_keys(), latch.previous_keys());

        let first = Controls::read(&now, &before, (5, 6), true, false);
        assert!(first.toggle_pause);
        assert_eq!(first.spawn_at, Some((5, 6)));

        let held = Controls::read(&now, &now, (5, 6), true, true);
        assert_eq!(held, Controls::default());
    }

    #[test]
    fn test_spawn_uses_distinct_colors() {
        let mut scene = Scene::new(0, 50, 50);
        scene.apply(Controls {
            spawn_at: Some((500, -3)),
            ..Controls::default()
        });
        scene.spawn(10.0, 10.0);
        let balls = scene.balls();
        assert_eq!(balls.len(), 2);
        assert_ne!(balls[0].color, balls[1].color);
        // Clamped into the area.
        assert_eq!((balls[0].x, balls[0].y), (44.0, 6.0));
    }

    #[test]
    fn test_speed_limits() {
        let mut scene = Scene::new(0, 10, 10);
        for _ in 0..50 {
            scene.apply(Controls {
                faster: true,
                ..Controls::default()
            });
        }
        assert_eq!(scene.speed(), 8.0);
    }

    #[test]
    fn test_draw_renders_balls() {
        let scene = Scene::new(1, 120, 80);
        let mut display = DisplaySurface::headless(120, 80);
        scene.draw(&mut display, 33);

        let ball = &scene.balls()[0];
        let center = display.draw_buffer().color_at(ball.x as i32, ball.y as i32);
        assert_eq!(center, ball.color);
        assert_eq!(display.color_at(60, 40), BACKGROUND);
    }
}
