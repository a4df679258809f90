//! The display facade: buffers, drawing state, input and pacing in one place.

use std::sync::Arc;
use std::time::Instant;

use image::RgbaImage;
use minvio_common::Color;
use minvio_input::{InputLatch, KeyStates, BUTTON_LEFT, BUTTON_MIDDLE, BUTTON_RIGHT};
use minvio_pixelbuffer::{PixelBuffer, Raster};
use tracing::{debug, trace};

use crate::{
    canvas::{Canvas, DrawState},
    font::{Font, TextMetrics},
    timer::{frame_interval, FrameTimer},
    BufferId, BufferPair, DisplayConfig, DisplayResult, Headless, Presenter, WindowPresenter,
};

/// Rolling frame-rate measurement, logged once per second.
#[derive(Debug)]
struct FrameStats {
    total: u64,
    since_update: u64,
    last_update: Instant,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            total: 0,
            since_update: 0,
            last_update: Instant::now(),
        }
    }

    fn record(&mut self) {
        self.total += 1;
        self.since_update += 1;

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        if elapsed.as_secs() >= 1 {
            let fps = self.since_update as f64 / elapsed.as_secs_f64();
            debug!("Presenting at {:.1} FPS", fps);
            self.since_update = 0;
            self.last_update = now;
        }
    }
}

/// A fixed-size, double-buffered drawing surface.
///
/// All drawing goes to the active buffer. [`refresh`](Self::refresh) hands
/// that buffer to the presenter and makes the other one active; buffers are
/// not cleared in between.
///
/// ```
/// use minvio_display::{Color, DisplaySurface};
///
/// let mut display = DisplaySurface::headless(64, 48);
/// display.clear(Color::WHITE);
/// display.set_draw_color(Color::RED);
/// display.canvas().fill_circle(32.0, 24.0, 10.0);
/// display.refresh().unwrap();
///
/// let frame = display.presenter().last_frame().unwrap();
/// assert_eq!(frame.width(), 64);
/// ```
pub struct DisplaySurface<P: Presenter = WindowPresenter> {
    presenter: P,
    buffers: BufferPair,
    state: DrawState,
    input: Arc<InputLatch>,
    timer: FrameTimer,
    stats: FrameStats,
    target_fps: Option<u32>,
}

impl DisplaySurface<WindowPresenter> {
    /// Open a window described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the window cannot
    /// be created.
    pub fn open(config: DisplayConfig) -> DisplayResult<Self> {
        config.validate()?;
        let input = Arc::new(InputLatch::new());
        let presenter = WindowPresenter::new(&config, Arc::clone(&input))?;
        Ok(Self::assemble(&config, presenter, input))
    }
}

impl DisplaySurface<Headless> {
    /// A surface that presents into memory instead of a window.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::with_presenter(width, height, Headless::new())
    }
}

impl<P: Presenter> DisplaySurface<P> {
    /// A `width`×`height` surface presenting through `presenter`, with
    /// default settings otherwise.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is 0.
    pub fn with_presenter(width: u32, height: u32, presenter: P) -> Self {
        assert!(width > 0 && height > 0, "surface size must be non-zero, got {width}x{height}");
        let config = DisplayConfig {
            width,
            height,
            ..DisplayConfig::default()
        };
        Self::assemble(&config, presenter, Arc::new(InputLatch::new()))
    }

    /// A surface sized and styled by `config`, presenting through `presenter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(config: &DisplayConfig, presenter: P) -> DisplayResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, presenter, Arc::new(InputLatch::new())))
    }

    fn assemble(config: &DisplayConfig, mut presenter: P, input: Arc<InputLatch>) -> Self {
        presenter.set_title(&config.title);
        let state = DrawState {
            font: config.font_size.map(Font::sized).unwrap_or_default(),
            ..DrawState::default()
        };
        debug!(
            "Display surface {}x{} ready, drawing into buffer {:?}",
            config.width,
            config.height,
            BufferId::A
        );
        Self {
            presenter,
            buffers: BufferPair::new(config.width, config.height),
            state,
            input,
            timer: FrameTimer::with_poll_interval(config.poll_interval()),
            stats: FrameStats::new(),
            target_fps: config.target_fps,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffers.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.buffers.dimensions().1
    }

    pub fn set_title(&mut self, title: &str) {
        self.presenter.set_title(title);
    }

    /// Hide the window. Drawing and refreshing keep working; frames are no
    /// longer shown.
    pub fn close(&mut self) {
        self.presenter.close();
    }

    /// False once the display was closed by the program or the user.
    pub fn is_open(&self) -> bool {
        self.presenter.is_open()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Frame rate from the configuration, if one was set.
    pub fn target_fps(&self) -> Option<u32> {
        self.target_fps
    }

    /// Frames presented so far.
    pub fn frame_count(&self) -> u64 {
        self.stats.total
    }

    /// Present the active buffer and start drawing into the other one.
    ///
    /// # Errors
    ///
    /// Returns an error if the presenter fails; the buffers are not flipped
    /// in that case.
    pub fn refresh(&mut self) -> DisplayResult<()> {
        self.presenter.present(self.buffers.active_buffer())?;
        let next = self.buffers.flip();
        self.stats.record();
        trace!("Frame {} presented, drawing into buffer {:?}", self.stats.total, next);
        Ok(())
    }

    /// Wait until a full frame interval at `fps` has passed since the last
    /// paced refresh, then [`refresh`](Self::refresh). Returns immediately
    /// if the interval already elapsed.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the presenter fails.
    pub fn refresh_paced(&mut self, fps: u32) -> DisplayResult<()> {
        let interval = frame_interval(fps);
        let waited = self.timer.wait_until(interval);
        trace!("Waited {:?} for a {:?} frame interval", waited, interval);
        let result = self.refresh();
        self.timer.reset();
        result
    }

    /// Which buffer drawing currently targets.
    pub fn active_buffer(&self) -> BufferId {
        self.buffers.active()
    }

    /// Drawing handle over the active buffer.
    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(self.buffers.active_buffer_mut(), &mut self.state)
    }

    /// Fill the active buffer with `color`, leaving the draw color unchanged.
    pub fn clear(&mut self, color: Color) {
        self.canvas().clear(color);
    }

    /// Set the draw color used by every later drawing call, returning the
    /// previous one.
    pub fn set_draw_color(&mut self, color: Color) -> Color {
        std::mem::replace(&mut self.state.color, color)
    }

    pub fn draw_color(&self) -> Color {
        self.state.color
    }

    /// Returns the previous font.
    pub fn set_font(&mut self, font: Font) -> Font {
        std::mem::replace(&mut self.state.font, font)
    }

    /// Switch to the regular face closest to `px` pixels tall.
    pub fn set_font_size(&mut self, px: u32) -> Font {
        self.set_font(Font::sized(px))
    }

    pub fn font(&self) -> Font {
        self.state.font
    }

    pub fn text_metrics(&self, text: &str) -> TextMetrics {
        self.state.font.metrics(text)
    }

    /// The buffer being drawn into.
    pub fn draw_buffer(&self) -> &Raster {
        self.buffers.active_buffer()
    }

    /// Color of a pixel in the active buffer.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the surface.
    pub fn color_at(&self, x: i32, y: i32) -> Color {
        self.draw_buffer().color_at(x, y)
    }

    /// Packed `0xAARRGGBB` value of a pixel in the active buffer.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the surface.
    pub fn rgb_at(&self, x: i32, y: i32) -> u32 {
        self.draw_buffer().pixel(x, y)
    }

    pub fn blit(&mut self, image: &RgbaImage, x: i32, y: i32) {
        self.canvas().blit(image, x, y);
    }

    pub fn blit_scaled(&mut self, image: &RgbaImage, x: i32, y: i32, width: u32, height: u32) {
        self.canvas().blit_scaled(image, x, y, width, height);
    }

    /// The input latch this surface reads from.
    pub fn input(&self) -> &Arc<InputLatch> {
        &self.input
    }

    /// Snapshot of which keys are down now.
    pub fn key_state(&self) -> KeyStates {
        self.input.current_keys()
    }

    /// Snapshot taken at the last [`tick_input`](Self::tick_input).
    pub fn key_state_previous(&self) -> KeyStates {
        self.input.previous_keys()
    }

    /// Copy the current key states into the previous snapshot. Call once per
    /// frame.
    pub fn tick_input(&self) {
        self.input.tick();
    }

    pub fn mouse_x(&self) -> i32 {
        self.input.mouse_position().0
    }

    pub fn mouse_y(&self) -> i32 {
        self.input.mouse_position().1
    }

    pub fn mouse_button_left(&self) -> bool {
        self.input.mouse_button(usize::from(BUTTON_LEFT))
    }

    pub fn mouse_button_middle(&self) -> bool {
        self.input.mouse_button(usize::from(BUTTON_MIDDLE))
    }

    pub fn mouse_button_right(&self) -> bool {
        self.input.mouse_button(usize::from(BUTTON_RIGHT))
    }

    /// Move the elapsed-time baseline to now.
    pub fn start_timer(&mut self) {
        self.timer.reset();
    }

    /// Milliseconds since the baseline. The baseline is also moved by every
    /// paced refresh.
    pub fn elapsed_millis(&self) -> u64 {
        self.timer.elapsed_millis()
    }
}
