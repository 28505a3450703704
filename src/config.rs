use std::time::Duration;
use crate::constants::*;
use crate::error::{CarouselError, Result};

/// Timing and gesture parameters for a [`Carousel`](crate::Carousel).
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub transition: Duration,
    pub autoplay_delay: Duration,
    pub swipe_threshold: f32,
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition: TRANSITION_DURATION,
            autoplay_delay: AUTOPLAY_DELAY,
            swipe_threshold: SWIPE_THRESHOLD,
            autoplay: true,
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<()> {
        if self.transition.is_zero() {
            return Err(CarouselError::InvalidConfig("transition duration must be non-zero"));
        }
        if self.autoplay_delay.is_zero() {
            return Err(CarouselError::InvalidConfig("autoplay delay must be non-zero"));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(CarouselError::InvalidConfig(
                "swipe threshold must be a finite, non-negative distance",
            ));
        }
        Ok(())
    }
}
