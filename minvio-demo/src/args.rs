use clap::{ArgAction, Parser};
use minvio_display::DisplayConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minvio-demo")]
#[command(about = "Bouncing balls on a minimal immediate-mode display")]
#[command(version)]
pub struct Args {
    /// Surface width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Target frame rate
    #[arg(long, env = "MINVIO_FPS")]
    pub fps: Option<u32>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,

    /// Number of balls to start with
    #[arg(short, long, default_value_t = 8)]
    pub balls: u32,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Render into memory instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Save the last frame as a PNG (headless only)
    #[arg(short, long, requires = "headless")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut DisplayConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fps) = self.fps {
            config.target_fps = Some(fps);
        }
        if let Some(title) = &self.title {
            config.title.clone_from(title);
        }
    }
}
