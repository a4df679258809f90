use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minvio_demo::args::Args;
use minvio_demo::scene::{Controls, Scene};
use minvio_display::{keycodes, DisplayConfig, DisplaySurface, Headless, Presenter};
use tracing::{debug, info};

/// Frame rate when neither the config nor the command line sets one.
const DEFAULT_FPS: u32 = 30;

/// Frames rendered by a headless run without `--frames`.
const DEFAULT_HEADLESS_FRAMES: u64 = 120;

fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "minvio_demo={log_level},minvio_display={log_level},minvio_input={log_level}"
                )
                .into()
            }),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "minvio")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn load_config(args: &Args) -> Result<DisplayConfig> {
    let path = args.config.clone().or_else(|| {
        default_config_path().filter(|path| {
            let found = path.exists();
            if !found {
                debug!("No config file at {}", path.display());
            }
            found
        })
    });

    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            DisplayConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => DisplayConfig::default(),
    };

    args.apply_to(&mut config);
    config.validate().context("Invalid display configuration")?;
    Ok(config)
}

/// Run the scene until the display closes, Escape is pressed, or the frame
/// limit is reached.
fn run<P: Presenter>(display: &mut DisplaySurface<P>, args: &Args, paced: bool) -> Result<()> {
    let fps = display.target_fps().unwrap_or(DEFAULT_FPS);
    let mut scene = Scene::new(args.balls, display.width(), display.height());
    let mut left_was_down = false;
    let mut frame_ms = 0;

    info!("Running at {} fps with {} balls", fps, args.balls);
    display.start_timer();

    while display.is_open() {
        let now = display.key_state();
        if now[keycodes::KEY_ESCAPE] {
            info!("Escape pressed, exiting");
            break;
        }

        let left_down = display.mouse_button_left();
        let controls = Controls::read(
            &now,
            &display.key_state_previous(),
            (display.mouse_x(), display.mouse_y()),
            left_down,
            left_was_down,
        );
        left_was_down = left_down;
        display.tick_input();

        scene.apply(controls);
        scene.step(1.0 / f64::from(fps));
        scene.draw(display, frame_ms);

        frame_ms = display.elapsed_millis();
        if paced {
            display.refresh_paced(fps)?;
        } else {
            display.refresh()?;
            display.start_timer();
        }

        if args.frames.is_some_and(|limit| display.frame_count() >= limit) {
            debug!("Frame limit reached");
            break;
        }
    }

    let frames = display.frame_count();
    info!("Presented {} frames", frames);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging first
    init_logging(args.verbose);

    info!("Starting minvio-demo {}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    if args.headless {
        let mut display = DisplaySurface::with_config(&config, Headless::new())
            .context("Failed to create headless display")?;
        let args = Args {
            frames: Some(args.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES)),
            ..args
        };
        run(&mut display, &args, false)?;

        if let Some(output) = &args.output {
            display
                .presenter()
                .save_last_frame(output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote last frame to {}", output.display());
        }
    } else {
        let mut display = DisplaySurface::open(config).context("Failed to open display")?;
        run(&mut display, &args, true)?;
        display.close();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_stops_at_frame_limit() {
        let args = Args::parse_from(["minvio-demo", "--headless", "--frames", "3", "-b", "2"]);
        let mut display = DisplaySurface::headless(80, 60);
        run(&mut display, &args, false).unwrap();

        assert_eq!(display.frame_count(), 3);
        assert_eq!(display.presenter().frames_presented(), 3);
    }

    #[test]
    fn test_run_exits_on_escape() {
        let args = Args::parse_from(["minvio-demo", "--headless", "--frames", "50"]);
        let mut display = DisplaySurface::headless(80, 60);
        display.input().key_down(keycodes::KEY_ESCAPE);
        run(&mut display, &args, false).unwrap();

        assert_eq!(display.frame_count(), 0);
    }
}
