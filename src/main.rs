use std::path::PathBuf;
use std::time::Duration;
use anyhow::{bail, Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

mod texture_loader;
mod view;

use carousel::constants::*;
use carousel::{load_sorted_image_paths, Carousel, CarouselConfig, InputEvent, Slide};
use carousel::{SurfaceState, VirtualClock};
use crate::texture_loader::load_texture_with_exif_rotation;
use crate::view::{InputPoller, Layout};

#[derive(Parser, Debug)]
#[command(version, about = "Auto-advancing image carousel")]
struct Args {
    /// Directory holding the slide images
    image_directory: PathBuf,

    /// Delay between automatic advances (milliseconds)
    #[arg(long, default_value_t = AUTOPLAY_DELAY.as_millis() as u64)]
    autoplay_ms: u64,

    /// Length of the transition window (milliseconds)
    #[arg(long, default_value_t = TRANSITION_DURATION.as_millis() as u64)]
    transition_ms: u64,

    /// Minimum horizontal drag that counts as a swipe (pixels)
    #[arg(long, default_value_t = SWIPE_THRESHOLD)]
    swipe_threshold: f32,

    /// Start with autoplay off
    #[arg(long)]
    paused: bool,

    #[arg(long, default_value_t = RENDER_WIDTH)]
    width: i32,

    #[arg(long, default_value_t = RENDER_HEIGHT)]
    height: i32,
}

impl Args {
    fn config(&self) -> CarouselConfig {
        CarouselConfig {
            transition: Duration::from_millis(self.transition_ms),
            autoplay_delay: Duration::from_millis(self.autoplay_ms),
            swipe_threshold: self.swipe_threshold,
            autoplay: !self.paused,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = args.config();
    config.validate()?;

    let image_paths = load_sorted_image_paths(&args.image_directory)
        .with_context(|| format!("Error loading images from {:?}", args.image_directory))?;

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Preload every slide before the first frame ---
    let mut textures: Vec<Texture2D> = Vec::new();
    let mut loaded_paths: Vec<PathBuf> = Vec::new();
    for path in image_paths {
        match load_texture_with_exif_rotation(&mut rl, &thread, &path) {
            Ok(texture) => {
                textures.push(texture);
                loaded_paths.push(path);
            }
            Err(e) => warn!(path = ?path, error = %e, "skipping slide"),
        }
    }
    if textures.is_empty() {
        bail!("No slides were loaded from {:?}", args.image_directory);
    }
    info!(slides = textures.len(), "slides loaded");

    let slides = Slide::from_paths(loaded_paths);
    let surface = SurfaceState::new(slides.len());
    let mut carousel = Carousel::new(slides, config, surface, VirtualClock::new())?;

    let mut layout = Layout::for_window(&rl, carousel.slide_count());
    let mut poller = InputPoller::default();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time().max(0.0);
        carousel.advance(Duration::from_secs_f32(dt));

        for event in poller.poll(&mut rl, &layout) {
            if event == InputEvent::Resize {
                layout = Layout::for_window(&rl, carousel.slide_count());
            }
            let response = carousel.handle_input(event);
            trace!(?event, ?response, "input");
        }

        let mut d = rl.begin_drawing(&thread);
        view::draw(&mut d, &layout, &textures, carousel.surface(), carousel.transition_progress());
    }

    Ok(())
}
