use raylib::prelude::*;
use carousel::{Control, InputEvent, Key, SurfaceState};

const BUTTON_SIZE: f32 = 56.0;
const INDICATOR_RADIUS: f32 = 7.0;
const INDICATOR_GAP: f32 = 28.0;
const PROGRESS_HEIGHT: f32 = 4.0;
const MARGIN: f32 = 24.0;

/// Screen rectangles of the carousel controls for the current window size.
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub prev: Rectangle,
    pub next: Rectangle,
    pub toggle: Rectangle,
    pub indicators: Vec<Rectangle>,
    pub progress: Rectangle,
}

impl Layout {
    pub fn new(width: f32, height: f32, slide_count: usize) -> Layout {
        let mid_y = (height - BUTTON_SIZE) * 0.5;
        let dots_width = INDICATOR_GAP * slide_count.saturating_sub(1) as f32;
        let dots_x = (width - dots_width) * 0.5;
        let dots_y = height - MARGIN - INDICATOR_RADIUS;

        let indicators = (0..slide_count)
            .map(|i| {
                let cx = dots_x + INDICATOR_GAP * i as f32;
                // Hit box is a little larger than the dot
                let r = INDICATOR_RADIUS * 1.8;
                Rectangle::new(cx - r, dots_y - r, r * 2.0, r * 2.0)
            })
            .collect();

        Layout {
            width,
            height,
            prev: Rectangle::new(MARGIN, mid_y, BUTTON_SIZE, BUTTON_SIZE),
            next: Rectangle::new(width - MARGIN - BUTTON_SIZE, mid_y, BUTTON_SIZE, BUTTON_SIZE),
            toggle: Rectangle::new(
                width - MARGIN - BUTTON_SIZE,
                height - MARGIN - BUTTON_SIZE,
                BUTTON_SIZE,
                BUTTON_SIZE,
            ),
            indicators,
            progress: Rectangle::new(0.0, height - PROGRESS_HEIGHT, width, PROGRESS_HEIGHT),
        }
    }

    pub fn for_window(rl: &RaylibHandle, slide_count: usize) -> Layout {
        Layout::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32, slide_count)
    }

    pub fn hit_test(&self, point: Vector2) -> Option<Control> {
        if self.prev.check_collision_point_rec(point) {
            return Some(Control::Prev);
        }
        if self.next.check_collision_point_rec(point) {
            return Some(Control::Next);
        }
        if self.toggle.check_collision_point_rec(point) {
            return Some(Control::AutoplayToggle);
        }
        self.indicators
            .iter()
            .position(|rec| rec.check_collision_point_rec(point))
            .map(Control::Indicator)
    }
}

/// Turns raylib's polled input into carousel events.
///
/// A left press outside the controls acts as a touch: the release closes the swipe.
#[derive(Default)]
pub struct InputPoller {
    hovered: bool,
    dragging: bool,
}

impl InputPoller {
    pub fn poll(&mut self, rl: &mut RaylibHandle, layout: &Layout) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let on_screen = rl.is_cursor_on_screen();
        if on_screen != self.hovered {
            self.hovered = on_screen;
            let event = if on_screen { InputEvent::PointerEnter } else { InputEvent::PointerLeave };
            events.push(event);
        }

        if rl.is_window_resized() {
            events.push(InputEvent::Resize);
        }

        while let Some(key) = rl.get_key_pressed() {
            let key = match key {
                KeyboardKey::KEY_LEFT => Key::ArrowLeft,
                KeyboardKey::KEY_RIGHT => Key::ArrowRight,
                KeyboardKey::KEY_SPACE => Key::Space,
                _ => Key::Other,
            };
            events.push(InputEvent::KeyDown(key));
        }

        let mouse = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            match layout.hit_test(mouse) {
                Some(control) => events.push(InputEvent::Click(control)),
                None => {
                    self.dragging = true;
                    events.push(InputEvent::TouchStart { x: mouse.x });
                }
            }
        }
        if self.dragging && rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            self.dragging = false;
            events.push(InputEvent::TouchEnd { x: mouse.x });
        }

        events
    }
}

// Source rectangle that crops the texture to fill the target aspect ratio
fn cover_source(texture: &Texture2D, width: f32, height: f32) -> Rectangle {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (width / tex_width).max(height / tex_height);
    let src_width = width / scale;
    let src_height = height / scale;
    Rectangle::new(
        (tex_width - src_width) * 0.5,
        (tex_height - src_height) * 0.5,
        src_width,
        src_height,
    )
}

fn draw_slide(d: &mut RaylibDrawHandle, texture: &Texture2D, layout: &Layout, opacity: f32) {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    d.draw_texture_pro(
        texture,
        cover_source(texture, layout.width, layout.height),
        Rectangle::new(0.0, 0.0, layout.width, layout.height),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::new(255, 255, 255, alpha),
    );
}

/// Draws the published surface state.
///
/// The outgoing slide stays underneath while the incoming one fades in over
/// the transition window.
pub fn draw(
    d: &mut RaylibDrawHandle,
    layout: &Layout,
    textures: &[Texture2D],
    surface: &SurfaceState,
    transition: Option<f32>,
) {
    d.clear_background(Color::BLACK);

    if let Some(texture) = surface.prev_slide().and_then(|i| textures.get(i)) {
        draw_slide(d, texture, layout, 1.0);
    }
    if let Some(texture) = surface.active_slide().and_then(|i| textures.get(i)) {
        draw_slide(d, texture, layout, transition.unwrap_or(1.0));
    }

    let button = Color::new(0, 0, 0, 110);
    for (rec, label) in [(layout.prev, "<"), (layout.next, ">")] {
        d.draw_rectangle_rec(rec, button);
        d.draw_text(
            label,
            (rec.x + rec.width * 0.38) as i32,
            (rec.y + rec.height * 0.25) as i32,
            30,
            Color::WHITE,
        );
    }

    d.draw_rectangle_rec(layout.toggle, button);
    let icon = if surface.playing { "||" } else { ">" };
    d.draw_text(
        icon,
        (layout.toggle.x + layout.toggle.width * 0.36) as i32,
        (layout.toggle.y + layout.toggle.height * 0.25) as i32,
        30,
        Color::WHITE,
    );

    for (rec, active) in layout.indicators.iter().zip(surface.indicators.iter()) {
        let center = Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5);
        let color = if *active { Color::WHITE } else { Color::new(255, 255, 255, 90) };
        d.draw_circle_v(center, INDICATOR_RADIUS, color);
    }

    let fill = layout.progress.width * surface.progress as f32 / 100.0;
    d.draw_rectangle_rec(layout.progress, Color::new(255, 255, 255, 40));
    d.draw_rectangle_rec(
        Rectangle::new(layout.progress.x, layout.progress.y, fill, layout.progress.height),
        Color::WHITE,
    );
}
