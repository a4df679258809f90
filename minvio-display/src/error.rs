use thiserror::Error;

/// Errors that can occur while opening or presenting a display.
///
/// Misuse of the drawing API (reading pixels outside the surface, key codes
/// outside the latch) panics instead; these variants cover failures of the
/// environment.
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Failed to initialize pixels surface: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Rendering failed: {0}")]
    RenderFailed(#[from] anyhow::Error),
}

/// Common result type for display operations
pub type DisplayResult<T> = Result<T, DisplayError>;
