use std::time::Duration;

pub const TRANSITION_DURATION: Duration = Duration::from_millis(800); // Navigation lock while slides settle
pub const AUTOPLAY_DELAY: Duration = Duration::from_millis(5000);     // Interval between automatic advances
pub const SWIPE_THRESHOLD: f32 = 50.0;                                // Minimum horizontal travel for a swipe (px)

pub const RENDER_WIDTH: i32 = 1280;  // Default window width
pub const RENDER_HEIGHT: i32 = 720;  // Default window height
pub const FPS: u32 = 60;             // Target frames per second
