//! On-screen presentation using winit for the window and pixels (wgpu) for
//! uploading frames.
//!
//! The window is fixed-size and owned by the thread that opened it. Pending
//! window events are drained into the input latch on every present, so input
//! and presentation advance together without a separate event thread.

use std::sync::Arc;

use anyhow::Context;
use minvio_input::{InputDispatcher, InputLatch};
use minvio_pixelbuffer::Raster;
use pixels::{Pixels, SurfaceTexture};
use tracing::{debug, info, trace, warn};
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
};

use crate::{DisplayConfig, DisplayResult, Presenter};

/// Presents frames in a native window.
pub struct WindowPresenter {
    // Declared before `window` so the surface is dropped first.
    pixels: Pixels,
    window: Window,
    event_loop: EventLoop<()>,
    dispatcher: InputDispatcher,
    surface_size: (u32, u32),
    open: bool,
}

impl WindowPresenter {
    /// Open a `config.width`×`config.height` window whose input feeds
    /// `latch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window or its GPU surface cannot be created.
    pub fn new(config: &DisplayConfig, latch: Arc<InputLatch>) -> DisplayResult<Self> {
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false)
            .build(&event_loop)?;

        if config.centered {
            center_on_monitor(&window);
        }

        let inner = window.inner_size();
        debug!(
            "Creating window surface {}x{} for a {}x{} frame",
            inner.width, inner.height, config.width, config.height
        );

        let surface_texture = SurfaceTexture::new(inner.width, inner.height, &window);
        let pixels = Pixels::new(config.width, config.height, surface_texture)?;

        // Cursor positions arrive in physical pixels; map them back onto the
        // surface when the window is scaled for HiDPI.
        let scale_x = f64::from(inner.width) / f64::from(config.width);
        let scale_y = f64::from(inner.height) / f64::from(config.height);
        let mut dispatcher = InputDispatcher::new(latch);
        dispatcher.set_coord_mapper(move |x, y| ((x / scale_x) as i32, (y / scale_y) as i32));

        info!("Opened {}x{} window \"{}\"", config.width, config.height, config.title);

        Ok(Self {
            pixels,
            window,
            event_loop,
            dispatcher,
            surface_size: (config.width, config.height),
            open: true,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Drain pending window events into the input latch without blocking.
    fn pump_events(&mut self) {
        let Self {
            event_loop,
            dispatcher,
            window,
            open,
            ..
        } = self;
        let window_id = window.id();

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { window_id: id, event } if id == window_id => match event {
                    WindowEvent::CloseRequested => {
                        if *open {
                            info!("Window close requested");
                        }
                        *open = false;
                    }
                    WindowEvent::Focused(focused) => trace!("Window focus changed: {}", focused),
                    other => {
                        dispatcher.handle_window_event(&other);
                    }
                },
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });

        if !*open {
            window.set_visible(false);
        }
    }
}

fn center_on_monitor(window: &Window) {
    let Some(monitor) = window.current_monitor() else {
        warn!("No monitor reported, leaving window at its default position");
        return;
    };
    let screen = monitor.size();
    let origin = monitor.position();
    let outer = window.outer_size();
    let position = PhysicalPosition::new(
        origin.x + (screen.width as i32 - outer.width as i32) / 2,
        origin.y + (screen.height as i32 - outer.height as i32) / 2,
    );
    trace!("Centering window at {:?}", position);
    window.set_outer_position(position);
}

impl Presenter for WindowPresenter {
    fn present(&mut self, frame: &Raster) -> DisplayResult<()> {
        self.pump_events();
        if !self.open {
            return Ok(());
        }

        if (frame.width(), frame.height()) != self.surface_size {
            return Err(anyhow::anyhow!(
                "frame is {}x{} but the window surface is {}x{}",
                frame.width(),
                frame.height(),
                self.surface_size.0,
                self.surface_size.1
            )
            .into());
        }

        frame.write_opaque_rgba8(self.pixels.frame_mut());
        self.pixels
            .render()
            .context("Failed to present pixels frame")?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn close(&mut self) {
        if self.open {
            debug!("Closing window");
        }
        self.open = false;
        self.window.set_visible(false);
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
