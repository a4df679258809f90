//! # minvio-display: a minimal immediate-mode display
//!
//! A fixed-size window you draw into pixel by pixel, one frame at a time.
//!
//! ## Features
//!
//! - **Double buffering**: draw into one buffer while the other is on screen
//! - **Drawing API**: points, lines, rectangles, anti-aliased circles and polygons, text and images
//! - **Frame pacing**: [`DisplaySurface::refresh_paced`] holds a steady frame rate
//! - **Input latch**: per-frame keyboard snapshots plus mouse position and buttons
//! - **Headless mode**: render into memory for tests and batch output
//!
//! ## Example
//!
//! ```rust,no_run
//! use minvio_display::{keycodes, Color, DisplayConfig, DisplaySurface};
//!
//! # fn main() -> minvio_display::DisplayResult<()> {
//! let config = DisplayConfig::builder().size(320, 240).title("hello").build()?;
//! let mut display = DisplaySurface::open(config)?;
//!
//! while display.is_open() && !display.key_state()[keycodes::KEY_ESCAPE] {
//!     display.clear(Color::BLACK);
//!     display.set_draw_color(Color::WHITE);
//!     display.canvas().text("Hello", 10, 30);
//!     display.refresh_paced(30)?;
//!     display.tick_input();
//! }
//! # Ok(())
//! # }
//! ```

mod buffers;
mod canvas;
mod config;
mod error;
mod font;
mod presenter;
mod surface;
mod timer;
mod window;

pub use buffers::{BufferId, BufferPair};
pub use canvas::{Canvas, DrawState};
pub use config::{DisplayConfig, DisplayConfigBuilder};
pub use error::{DisplayError, DisplayResult};
pub use font::{Font, TextMetrics};
pub use presenter::{Headless, Presenter};
pub use surface::DisplaySurface;
pub use timer::{frame_interval, FrameTimer, DEFAULT_POLL_INTERVAL};
pub use window::WindowPresenter;

// Re-export the types that appear in this crate's public API
pub use minvio_common::{distinct_color, Color, Rect};
pub use minvio_input::{keycodes, InputLatch, KeyStates, KEY_SLOTS};
pub use minvio_pixelbuffer::{PixelBuffer, Raster};
