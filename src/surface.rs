use std::path::{Path, PathBuf};
use crate::state::SlideMark;

/// Whatever displays the carousel.
///
/// The controller only publishes state flags; drawing them is up to the
/// implementation.
pub trait RenderSurface {
    fn set_background(&mut self, slide: usize, image: &Path);
    fn mark_slide(&mut self, slide: usize, mark: SlideMark);
    fn highlight_indicator(&mut self, indicator: usize, active: bool);
    /// Progress in percent, 0..=100.
    fn set_progress(&mut self, percent: u8);
    fn show_autoplay(&mut self, playing: bool);
}

/// Retained copy of everything published to a surface.
///
/// The viewer draws from it every frame and the tests assert against it.
/// Out-of-range slide or indicator numbers are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub backgrounds: Vec<Option<PathBuf>>,
    pub marks: Vec<SlideMark>,
    pub indicators: Vec<bool>,
    pub progress: u8,
    pub playing: bool,
}

impl SurfaceState {
    pub fn new(slide_count: usize) -> Self {
        Self {
            backgrounds: vec![None; slide_count],
            marks: vec![SlideMark::Hidden; slide_count],
            indicators: vec![false; slide_count],
            progress: 0,
            playing: false,
        }
    }

    pub fn active_slide(&self) -> Option<usize> {
        self.marks.iter().position(|m| *m == SlideMark::Active)
    }

    pub fn prev_slide(&self) -> Option<usize> {
        self.marks.iter().position(|m| *m == SlideMark::Prev)
    }

    pub fn active_indicator(&self) -> Option<usize> {
        self.indicators.iter().position(|on| *on)
    }
}

impl RenderSurface for SurfaceState {
    fn set_background(&mut self, slide: usize, image: &Path) {
        if let Some(bg) = self.backgrounds.get_mut(slide) {
            *bg = Some(image.to_path_buf());
        }
    }

    fn mark_slide(&mut self, slide: usize, mark: SlideMark) {
        if let Some(m) = self.marks.get_mut(slide) {
            *m = mark;
        }
    }

    fn highlight_indicator(&mut self, indicator: usize, active: bool) {
        if let Some(i) = self.indicators.get_mut(indicator) {
            *i = active;
        }
    }

    fn set_progress(&mut self, percent: u8) {
        self.progress = percent.min(100);
    }

    fn show_autoplay(&mut self, playing: bool) {
        self.playing = playing;
    }
}
