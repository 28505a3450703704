//! Auto-advancing image carousel.
//!
//! [`Carousel`] is the controller: slide index, transition lock, autoplay.
//! It draws through a [`RenderSurface`] and waits through a [`Scheduler`],
//! both handed in by the host, so the same controller runs in the raylib
//! viewer and under a hand-driven [`VirtualClock`] in tests.

pub mod carousel;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod slide;
pub mod state;
pub mod surface;

pub use carousel::{progress_percent, Carousel};
pub use clock::{Scheduler, TimerId, TimerKind, VirtualClock};
pub use config::CarouselConfig;
pub use error::{CarouselError, Result};
pub use input::{classify_swipe, Control, InputEvent, InputResponse, Key, SwipeDirection};
pub use slide::{load_sorted_image_paths, Slide};
pub use state::{CarouselState, SlideMark};
pub use surface::{RenderSurface, SurfaceState};
