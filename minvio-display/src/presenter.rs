//! Where finished frames go.

use std::path::Path;

use minvio_pixelbuffer::Raster;
use tracing::debug;

use crate::DisplayResult;

/// Receives each finished frame.
///
/// [`WindowPresenter`](crate::WindowPresenter) puts frames on screen;
/// [`Headless`] keeps them in memory.
pub trait Presenter {
    /// Show `frame`. Called once per refresh with the buffer that was just
    /// drawn.
    fn present(&mut self, frame: &Raster) -> DisplayResult<()>;

    fn set_title(&mut self, _title: &str) {}

    /// Stop showing frames. Later presents are accepted and ignored.
    fn close(&mut self) {}

    fn is_open(&self) -> bool {
        true
    }
}

/// Presenter with no window: counts frames and keeps the latest one.
#[derive(Debug)]
pub struct Headless {
    title: String,
    open: bool,
    frames: u64,
    last: Option<Raster>,
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}

impl Headless {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            open: true,
            frames: 0,
            last: None,
        }
    }

    /// Frames accepted while open.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Raster> {
        self.last.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Write the most recent frame to `path`, in the format its extension
    /// names. Does nothing if no frame has been presented.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save_last_frame(&self, path: impl AsRef<Path>) -> DisplayResult<()> {
        let Some(frame) = &self.last else {
            return Ok(());
        };
        let path = path.as_ref();
        frame.to_rgba_image().save(path)?;
        debug!("Saved {}x{} frame to {}", frame.width(), frame.height(), path.display());
        Ok(())
    }
}

impl Presenter for Headless {
    fn present(&mut self, frame: &Raster) -> DisplayResult<()> {
        if !self.open {
            return Ok(());
        }
        self.frames += 1;
        match &mut self.last {
            Some(last) => last.clone_from(frame),
            None => self.last = Some(frame.clone()),
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minvio_common::Color;
    use minvio_pixelbuffer::{MutablePixelBuffer, PixelBuffer};

    #[test]
    fn test_headless_keeps_last_frame() {
        let mut headless = Headless::new();
        assert!(headless.last_frame().is_none());

        let mut frame = Raster::new(3, 3);
        headless.present(&frame).unwrap();
        frame.set_pixel(1, 1, Color::RED.to_argb());
        headless.present(&frame).unwrap();

        assert_eq!(headless.frames_presented(), 2);
        assert_eq!(headless.last_frame().unwrap().pixel(1, 1), Color::RED.to_argb());
    }

    #[test]
    fn test_headless_close_ignores_frames() {
        let mut headless = Headless::new();
        headless.set_title("t");
        headless.close();
        headless.present(&Raster::new(1, 1)).unwrap();
        assert!(!headless.is_open());
        assert_eq!(headless.frames_presented(), 0);
        assert_eq!(headless.title(), "t");
    }

    #[test]
    fn test_save_without_frame_is_noop() {
        let path = std::env::temp_dir().join("minvio-headless-none.png");
        Headless::new().save_last_frame(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_save_last_frame_png() {
        let mut headless = Headless::new();
        let mut frame = Raster::new(4, 2);
        frame.set_pixel(3, 1, Color::GREEN.to_argb());
        headless.present(&frame).unwrap();

        let path = std::env::temp_dir().join(format!("minvio-headless-{}.png", std::process::id()));
        headless.save_last_frame(&path).unwrap();
        let image = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.get_pixel(3, 1).0, [0, 255, 0, 255]);
    }
}
