/// On-screen controls that can be clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
    Indicator(usize),
    AutoplayToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Other,
}

/// Discrete events delivered by the input surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click(Control),
    KeyDown(Key),
    TouchStart { x: f32 },
    TouchEnd { x: f32 },
    PointerEnter,
    PointerLeave,
    Resize,
}

/// What the host should do with the native event after the carousel saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    Ignored,
    Handled,
    /// Handled, and the host's default action (page scroll) must be suppressed.
    HandledPreventDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Next,
    Prev,
}

/// Classifies a horizontal gesture.
///
/// Travel must strictly exceed `threshold`. Moving left (start right of end)
/// advances, moving right goes back.
pub fn classify_swipe(start_x: f32, end_x: f32, threshold: f32) -> Option<SwipeDirection> {
    let diff = start_x - end_x;
    if !diff.is_finite() || diff.abs() <= threshold {
        return None;
    }
    if diff > 0.0 {
        Some(SwipeDirection::Next)
    } else {
        Some(SwipeDirection::Prev)
    }
}
