//! Pixel buffer types for minvio.
//!
//! This crate provides the in-memory raster that every frame is drawn into:
//!
//! - [`PixelBuffer`] / [`MutablePixelBuffer`]: read and write access traits
//! - [`Raster`]: a width×height buffer of packed `0xAARRGGBB` pixels that is
//!   also an embedded-graphics `DrawTarget`
//! - [`blend`]: source-over compositing of a [`Color`](minvio_common::Color)
//!   onto a packed pixel

mod buffer;
mod draw_target;
mod raster;

pub use buffer::{blend, MutablePixelBuffer, PixelBuffer};
pub use raster::Raster;
