//! Bouncing-ball demo for the minvio display: command-line arguments and the
//! scene it draws.

pub mod args;
pub mod scene;
