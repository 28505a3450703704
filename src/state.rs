#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CarouselState {
    Idle,          // Accepting navigation
    Transitioning, // Slides settling, navigation ignored
}

/// Transitional markup carried by a single slide.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum SlideMark {
    #[default]
    Hidden,
    Active,
    Prev,
}
