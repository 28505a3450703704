use std::time::Duration;
use tracing::{debug, trace};

use crate::clock::{Scheduler, TimerId, TimerKind};
use crate::config::CarouselConfig;
use crate::error::{CarouselError, Result};
use crate::input::{classify_swipe, Control, InputEvent, InputResponse, Key, SwipeDirection};
use crate::slide::Slide;
use crate::state::{CarouselState, SlideMark};
use crate::surface::RenderSurface;

/// Progress bar fill for `index` out of `count` slides, rounded to a whole percent.
pub fn progress_percent(index: usize, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let percent = 100.0 * (index + 1) as f64 / count as f64;
    percent.round().clamp(0.0, 100.0) as u8
}

/// Slide carousel controller.
///
/// Owns the slide index, the transition lock and both timers. All drawing
/// goes through the injected [`RenderSurface`] and all waiting through the
/// injected [`Scheduler`]; the host calls [`Carousel::advance`] to let time
/// pass and [`Carousel::handle_input`] to deliver input.
#[derive(Debug)]
pub struct Carousel<S: RenderSurface, T: Scheduler> {
    slides: Vec<Slide>,
    config: CarouselConfig,
    surface: S,
    timers: T,

    current: usize,
    state: CarouselState,
    transition_started: Duration,
    transition_timer: Option<TimerId>,

    autoplay: bool,
    hover_paused: bool,
    autoplay_timer: Option<TimerId>,

    touch_start_x: Option<f32>,
}

impl<S: RenderSurface, T: Scheduler> Carousel<S, T> {
    pub fn new(slides: Vec<Slide>, config: CarouselConfig, surface: S, timers: T) -> Result<Self> {
        config.validate()?;
        if slides.is_empty() {
            return Err(CarouselError::EmptyDeck);
        }

        let autoplay = config.autoplay;
        let mut carousel = Self {
            slides,
            config,
            surface,
            timers,
            current: 0,
            state: CarouselState::Idle,
            transition_started: Duration::ZERO,
            transition_timer: None,
            autoplay,
            hover_paused: false,
            autoplay_timer: None,
            touch_start_x: None,
        };

        for (i, slide) in carousel.slides.iter().enumerate() {
            if let Some(bg) = &slide.background {
                carousel.surface.set_background(i, bg);
            }
        }
        carousel.refresh();
        carousel.start_autoplay();

        debug!(slides = carousel.slides.len(), autoplay, "carousel ready");
        Ok(carousel)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == CarouselState::Transitioning
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_hover_paused(&self) -> bool {
        self.hover_paused
    }

    /// True while an autoplay timer is outstanding.
    pub fn autoplay_armed(&self) -> bool {
        self.autoplay_timer.is_some()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Fraction of the transition window already elapsed, `None` when idle.
    pub fn transition_progress(&self) -> Option<f32> {
        if !self.is_animating() {
            return None;
        }
        let elapsed = self.timers.now().saturating_sub(self.transition_started);
        Some((elapsed.as_secs_f32() / self.config.transition.as_secs_f32()).min(1.0))
    }

    /// Starts a transition to `target`. Returns false when the request was
    /// ignored: a transition is in flight, `target` is already shown or does
    /// not exist.
    pub fn go_to_slide(&mut self, target: usize) -> bool {
        if self.is_animating() || target == self.current || target >= self.slides.len() {
            trace!(to = target, current = self.current, state = ?self.state, "navigation ignored");
            return false;
        }

        let from = self.current;
        self.state = CarouselState::Transitioning;

        self.surface.mark_slide(from, SlideMark::Prev);
        self.surface.mark_slide(target, SlideMark::Active);
        self.surface.highlight_indicator(from, false);
        self.surface.highlight_indicator(target, true);

        self.transition_started = self.timers.now();
        if let Some(stale) = self.transition_timer.take() {
            self.timers.cancel(stale);
        }
        self.transition_timer = Some(
            self.timers.schedule_once(TimerKind::TransitionEnd, self.config.transition),
        );

        self.current = target;
        self.surface.set_progress(progress_percent(target, self.slides.len()));

        // Manual and automatic navigation both restart the autoplay countdown
        if self.autoplay {
            self.start_autoplay();
        }

        debug!(from, to = target, "slide transition started");
        true
    }

    pub fn next_slide(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        self.go_to_slide((self.current + 1) % self.slides.len())
    }

    pub fn prev_slide(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        let n = self.slides.len();
        self.go_to_slide((self.current + n - 1) % n)
    }

    pub fn toggle_autoplay(&mut self) {
        self.autoplay = !self.autoplay;
        self.surface.show_autoplay(self.autoplay);
        if self.autoplay {
            self.start_autoplay();
        } else {
            self.clear_autoplay();
        }
        debug!(autoplay = self.autoplay, "autoplay toggled");
    }

    /// Hover pause: stops the countdown but keeps autoplay enabled.
    pub fn pause_autoplay(&mut self) {
        self.hover_paused = true;
        self.clear_autoplay();
    }

    /// Ends a hover pause, restarting the countdown if autoplay is still on.
    pub fn resume_autoplay(&mut self) {
        self.hover_paused = false;
        if self.autoplay {
            self.start_autoplay();
        }
    }

    /// Maps a completed horizontal gesture to navigation.
    pub fn handle_swipe(&mut self, start_x: f32, end_x: f32) -> bool {
        match classify_swipe(start_x, end_x, self.config.swipe_threshold) {
            Some(SwipeDirection::Next) => self.next_slide(),
            Some(SwipeDirection::Prev) => self.prev_slide(),
            None => {
                trace!(start_x, end_x, "swipe below threshold");
                false
            }
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputResponse {
        match event {
            InputEvent::Click(control) => {
                match control {
                    Control::Prev => {
                        self.prev_slide();
                    }
                    Control::Next => {
                        self.next_slide();
                    }
                    Control::Indicator(i) => {
                        self.go_to_slide(i);
                    }
                    Control::AutoplayToggle => self.toggle_autoplay(),
                }
                InputResponse::Handled
            }
            InputEvent::KeyDown(key) => match key {
                Key::ArrowLeft => {
                    self.prev_slide();
                    InputResponse::Handled
                }
                Key::ArrowRight => {
                    self.next_slide();
                    InputResponse::Handled
                }
                Key::Space => {
                    self.toggle_autoplay();
                    InputResponse::HandledPreventDefault
                }
                Key::Other => InputResponse::Ignored,
            },
            InputEvent::TouchStart { x } => {
                self.touch_start_x = Some(x);
                InputResponse::Handled
            }
            InputEvent::TouchEnd { x } => match self.touch_start_x.take() {
                Some(start_x) => {
                    self.handle_swipe(start_x, x);
                    InputResponse::Handled
                }
                None => InputResponse::Ignored,
            },
            InputEvent::PointerEnter => {
                self.pause_autoplay();
                InputResponse::Handled
            }
            InputEvent::PointerLeave => {
                self.resume_autoplay();
                InputResponse::Handled
            }
            InputEvent::Resize => {
                self.refresh();
                InputResponse::Handled
            }
        }
    }

    /// Lets `elapsed` pass, running every timer that comes due in deadline order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some((id, kind)) = self.timers.fire_next(until) {
            self.on_timer(id, kind);
        }
        self.timers.advance_to(until);
    }

    /// Publishes the current index, progress and autoplay icon again.
    pub fn refresh(&mut self) {
        for i in 0..self.slides.len() {
            let mark = if i == self.current { SlideMark::Active } else { SlideMark::Hidden };
            // Keep the outgoing slide visible until the transition settles
            if self.is_animating() && mark == SlideMark::Hidden {
                continue;
            }
            self.surface.mark_slide(i, mark);
            self.surface.highlight_indicator(i, i == self.current);
        }
        self.surface.set_progress(progress_percent(self.current, self.slides.len()));
        self.surface.show_autoplay(self.autoplay);
    }

    fn on_timer(&mut self, id: TimerId, kind: TimerKind) {
        match kind {
            TimerKind::TransitionEnd if self.transition_timer == Some(id) => {
                self.transition_timer = None;
                self.finish_transition();
            }
            TimerKind::Autoplay if self.autoplay_timer == Some(id) => {
                trace!(current = self.current, "autoplay tick");
                self.next_slide();
            }
            _ => trace!(?kind, "stale timer ignored"),
        }
    }

    fn finish_transition(&mut self) {
        for i in 0..self.slides.len() {
            if i != self.current {
                self.surface.mark_slide(i, SlideMark::Hidden);
            }
        }
        self.state = CarouselState::Idle;
        debug!(current = self.current, "slide transition finished");
    }

    /// Replaces any outstanding autoplay timer. Nothing is armed while autoplay
    /// is off or a hover pause is active.
    fn start_autoplay(&mut self) {
        self.clear_autoplay();
        if self.autoplay && !self.hover_paused {
            self.autoplay_timer = Some(
                self.timers.schedule_repeating(TimerKind::Autoplay, self.config.autoplay_delay),
            );
        }
    }

    fn clear_autoplay(&mut self) {
        if let Some(id) = self.autoplay_timer.take() {
            self.timers.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use crate::surface::SurfaceState;

    type TestCarousel = Carousel<SurfaceState, VirtualClock>;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn carousel_with(n: usize, config: CarouselConfig) -> TestCarousel {
        let slides = (0..n).map(|i| Slide::new(format!("slide-{i}.jpg"))).collect();
        Carousel::new(slides, config, SurfaceState::new(n), VirtualClock::new()).unwrap()
    }

    fn carousel(n: usize) -> TestCarousel {
        carousel_with(n, CarouselConfig::default())
    }

    fn settle(c: &mut TestCarousel) {
        c.advance(c.config().transition);
    }

    #[test]
    fn empty_deck_is_rejected() {
        let err = Carousel::new(
            Vec::new(),
            CarouselConfig::default(),
            SurfaceState::new(0),
            VirtualClock::new(),
        );
        assert!(matches!(err, Err(CarouselError::EmptyDeck)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CarouselConfig { transition: Duration::ZERO, ..Default::default() };
        let err =
            Carousel::new(vec![Slide::blank()], config, SurfaceState::new(1), VirtualClock::new());
        assert!(matches!(err, Err(CarouselError::InvalidConfig(_))));
    }

    #[test]
    fn initial_render() {
        let c = carousel(4);
        let s = c.surface();
        assert_eq!(c.slide_count(), 4);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.state(), CarouselState::Idle);
        assert_eq!(s.active_slide(), Some(0));
        assert_eq!(s.active_indicator(), Some(0));
        assert_eq!(s.progress, 25);
        assert!(s.playing);
        assert!(c.autoplay_armed());
        assert_eq!(s.backgrounds[2].as_deref(), Some(std::path::Path::new("slide-2.jpg")));
    }

    #[test]
    fn blank_slides_publish_no_background() {
        let slides = vec![Slide::blank(), Slide::new("a.png")];
        let config = CarouselConfig::default();
        let c = Carousel::new(slides, config, SurfaceState::new(2), VirtualClock::new()).unwrap();
        assert_eq!(c.surface().backgrounds[0], None);
        assert!(c.surface().backgrounds[1].is_some());
    }

    #[test]
    fn starts_paused_when_configured() {
        let c = carousel_with(3, CarouselConfig { autoplay: false, ..Default::default() });
        assert!(!c.is_autoplay());
        assert!(!c.autoplay_armed());
        assert!(!c.surface().playing);
        assert_eq!(c.timers().pending(), 0);
    }

    #[test]
    fn go_to_slide_marks_prev_and_active() {
        let mut c = carousel(5);
        assert!(c.go_to_slide(3));

        let s = c.surface();
        assert_eq!(c.current_index(), 3);
        assert!(c.is_animating());
        assert_eq!(s.marks[0], SlideMark::Prev);
        assert_eq!(s.marks[3], SlideMark::Active);
        assert_eq!(s.active_indicator(), Some(3));
        assert_eq!(s.progress, 80);
    }

    #[test]
    fn transition_completes_after_window() {
        let mut c = carousel(3);
        c.go_to_slide(1);

        c.advance(ms(799));
        assert!(c.is_animating());
        assert_eq!(c.surface().prev_slide(), Some(0));

        c.advance(ms(1));
        assert!(!c.is_animating());
        assert_eq!(c.surface().prev_slide(), None);
        assert_eq!(c.surface().active_slide(), Some(1));
        assert_eq!(c.transition_progress(), None);
    }

    #[test]
    fn transition_progress_tracks_clock() {
        let mut c = carousel(3);
        c.go_to_slide(2);
        assert_eq!(c.transition_progress(), Some(0.0));
        c.advance(ms(400));
        let p = c.transition_progress().unwrap();
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn going_to_current_slide_is_noop() {
        let mut c = carousel(3);
        let before = c.surface().clone();
        let pending = c.timers().pending();
        assert!(!c.go_to_slide(0));
        assert_eq!(c.surface(), &before);
        assert_eq!(c.state(), CarouselState::Idle);
        assert_eq!(c.timers().pending(), pending);
    }

    #[test]
    fn out_of_range_target_is_noop() {
        let mut c = carousel(3);
        assert!(!c.go_to_slide(3));
        assert_eq!(c.current_index(), 0);
        assert!(!c.is_animating());
    }

    #[test]
    fn navigation_locked_while_transitioning() {
        let mut c = carousel(4);
        assert!(c.next_slide());
        assert!(!c.next_slide());
        assert!(!c.prev_slide());
        assert!(!c.go_to_slide(3));
        assert_eq!(c.current_index(), 1);

        settle(&mut c);
        assert!(c.go_to_slide(3));
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let mut c = carousel(3);
        assert!(c.prev_slide());
        assert_eq!(c.current_index(), 2);
        settle(&mut c);
        assert!(c.next_slide());
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.surface().progress, 33);
    }

    #[test]
    fn single_slide_never_moves() {
        let mut c = carousel(1);
        assert!(!c.next_slide());
        assert!(!c.prev_slide());
        c.advance(ms(20_000));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.surface().progress, 100);
    }

    #[test]
    fn autoplay_advances_every_delay() {
        let mut c = carousel(3);
        c.advance(ms(4999));
        assert_eq!(c.current_index(), 0);
        c.advance(ms(1));
        assert_eq!(c.current_index(), 1);
        c.advance(ms(5000));
        assert_eq!(c.current_index(), 2);
        c.advance(ms(5000));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.timers().pending_of(TimerKind::Autoplay), 1);
    }

    #[test]
    fn manual_navigation_restarts_autoplay_countdown() {
        let mut c = carousel(4);
        c.advance(ms(4000));
        c.next_slide();
        assert_eq!(c.current_index(), 1);

        // Old countdown would have fired at 5000ms
        c.advance(ms(4999));
        assert_eq!(c.current_index(), 1);
        c.advance(ms(1));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn toggle_twice_restores_timer_state() {
        let mut c = carousel(3);
        assert!(c.autoplay_armed());

        c.toggle_autoplay();
        assert!(!c.is_autoplay());
        assert!(!c.autoplay_armed());
        assert!(!c.surface().playing);
        assert_eq!(c.timers().pending_of(TimerKind::Autoplay), 0);

        c.toggle_autoplay();
        assert!(c.is_autoplay());
        assert!(c.autoplay_armed());
        assert!(c.surface().playing);
        assert_eq!(c.timers().pending_of(TimerKind::Autoplay), 1);
    }

    #[test]
    fn autoplay_off_stops_advancing() {
        let mut c = carousel(3);
        c.toggle_autoplay();
        c.advance(ms(60_000));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn hover_pauses_without_disabling() {
        let mut c = carousel(3);
        c.handle_input(InputEvent::PointerEnter);
        assert!(c.is_autoplay());
        assert!(!c.autoplay_armed());
        c.advance(ms(20_000));
        assert_eq!(c.current_index(), 0);

        c.handle_input(InputEvent::PointerLeave);
        assert!(c.autoplay_armed());
        c.advance(ms(5000));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn hover_leave_keeps_disabled_autoplay_off() {
        let mut c = carousel(3);
        c.handle_input(InputEvent::PointerEnter);
        c.toggle_autoplay();
        c.handle_input(InputEvent::PointerLeave);
        assert!(!c.autoplay_armed());
    }

    #[test]
    fn navigation_during_hover_does_not_rearm() {
        let mut c = carousel(3);
        c.handle_input(InputEvent::PointerEnter);
        c.next_slide();
        assert!(!c.autoplay_armed());

        c.toggle_autoplay();
        c.toggle_autoplay();
        assert!(c.is_autoplay());
        assert!(!c.autoplay_armed());
    }

    #[test]
    fn keyboard_mapping() {
        let mut c = carousel(3);
        assert_eq!(c.handle_input(InputEvent::KeyDown(Key::ArrowLeft)), InputResponse::Handled);
        assert_eq!(c.current_index(), 2);
        settle(&mut c);
        assert_eq!(c.handle_input(InputEvent::KeyDown(Key::ArrowRight)), InputResponse::Handled);
        assert_eq!(c.current_index(), 0);

        assert_eq!(
            c.handle_input(InputEvent::KeyDown(Key::Space)),
            InputResponse::HandledPreventDefault
        );
        assert!(!c.is_autoplay());
        assert_eq!(c.handle_input(InputEvent::KeyDown(Key::Other)), InputResponse::Ignored);
    }

    #[test]
    fn clicks_map_to_controls() {
        let mut c = carousel(4);
        c.handle_input(InputEvent::Click(Control::Indicator(2)));
        assert_eq!(c.current_index(), 2);
        settle(&mut c);
        c.handle_input(InputEvent::Click(Control::Next));
        assert_eq!(c.current_index(), 3);
        settle(&mut c);
        c.handle_input(InputEvent::Click(Control::Prev));
        assert_eq!(c.current_index(), 2);
        c.handle_input(InputEvent::Click(Control::AutoplayToggle));
        assert!(!c.is_autoplay());
    }

    #[test]
    fn swipe_threshold_is_strict() {
        let mut c = carousel(3);
        assert!(!c.handle_swipe(200.0, 151.0));
        assert!(!c.handle_swipe(200.0, 150.0));
        assert!(c.handle_swipe(200.0, 149.0));
        assert_eq!(c.current_index(), 1);
        settle(&mut c);
        assert!(c.handle_swipe(100.0, 151.0));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn touch_events_form_a_swipe() {
        let mut c = carousel(3);
        c.handle_input(InputEvent::TouchStart { x: 300.0 });
        c.handle_input(InputEvent::TouchEnd { x: 100.0 });
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut c = carousel(3);
        assert_eq!(c.handle_input(InputEvent::TouchEnd { x: 0.0 }), InputResponse::Ignored);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn resize_republishes_state() {
        let mut c = carousel(4);
        c.go_to_slide(1);
        settle(&mut c);
        c.handle_input(InputEvent::Resize);
        let s = c.surface();
        assert_eq!(s.progress, 50);
        assert_eq!(s.active_slide(), Some(1));
        assert_eq!(s.active_indicator(), Some(1));
    }

    #[test]
    fn resize_mid_transition_keeps_outgoing_slide() {
        let mut c = carousel(4);
        c.go_to_slide(2);
        c.handle_input(InputEvent::Resize);
        assert_eq!(c.surface().prev_slide(), Some(0));
        assert!(c.is_animating());
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        assert_eq!(progress_percent(0, 3), 33);
        assert_eq!(progress_percent(1, 3), 67);
        assert_eq!(progress_percent(2, 3), 100);
        assert_eq!(progress_percent(0, 8), 13);
        assert_eq!(progress_percent(0, 0), 0);
    }
}
