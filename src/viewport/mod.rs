use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowResized;

mod observer;
mod scroll;

pub use observer::SectionObserver;
pub use scroll::ScrollState;

use crate::choreography::SectionActivated;

/// Logical pixels scrolled per wheel line or arrow-key press.
const LINE_HEIGHT: f32 = 40.0;
/// Share of the viewport scrolled by page keys.
const PAGE_STEP: f32 = 0.9;

/// Scroll the virtual page from mouse wheel and keyboard input.
pub fn scroll_input_system(
    mut wheel: MessageReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    mut scroll: ResMut<ScrollState>,
) {
    let mut delta = 0.0;
    for event in wheel.read() {
        // Wheel up reports positive y; the page moves toward the top.
        delta -= match event.unit {
            MouseScrollUnit::Line => event.y * LINE_HEIGHT,
            MouseScrollUnit::Pixel => event.y,
        };
    }

    let page = scroll.viewport_height() * PAGE_STEP;
    if keys.just_pressed(KeyCode::ArrowDown) {
        delta += LINE_HEIGHT;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        delta -= LINE_HEIGHT;
    }
    if keys.just_pressed(KeyCode::PageDown) || keys.just_pressed(KeyCode::Space) {
        delta += page;
    }
    if keys.just_pressed(KeyCode::PageUp) {
        delta -= page;
    }

    if keys.just_pressed(KeyCode::Home) {
        scroll.scroll_to(0.0);
    } else if keys.just_pressed(KeyCode::End) {
        let end = scroll.max_offset();
        scroll.scroll_to(end);
    } else if delta != 0.0 {
        scroll.scroll_by(delta);
    }
}

/// Track the window height so sections stay one viewport tall.
pub fn viewport_resize_system(
    mut resized: MessageReader<WindowResized>,
    mut scroll: ResMut<ScrollState>,
) {
    if let Some(last) = resized.read().last() {
        scroll.set_viewport_height(last.height);
    }
}

/// Emit a section trigger whenever a section crosses into view.
pub fn section_observer_system(
    scroll: Res<ScrollState>,
    mut observer: ResMut<SectionObserver>,
    mut activations: MessageWriter<SectionActivated>,
) {
    if scroll.is_changed() {
        debug!(
            "scroll at {:.0}px ({:.3} of page, {:.2} rad)",
            scroll.offset(),
            scroll.fraction(),
            scroll.rotation()
        );
    }
    for section in observer.observe(&scroll) {
        activations.write(SectionActivated::new(section));
    }
}
