use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::choreography::SectionId;

/// Virtual page scrolled behind the scene: one viewport-tall section per id.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScrollState {
    /// Distance scrolled from the top of the page, in logical pixels.
    offset: f32,
    /// Height of the visible viewport, in logical pixels.
    viewport_height: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl ScrollState {
    /// Viewport height assumed before the window reports its size.
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

    pub fn new(viewport_height: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height: viewport_height.max(0.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Total page height; every section is one viewport tall.
    pub fn page_height(&self) -> f32 {
        self.viewport_height * SectionId::ALL.len() as f32
    }

    /// Largest reachable scroll offset.
    pub fn max_offset(&self) -> f32 {
        (self.page_height() - self.viewport_height).max(0.0)
    }

    /// Scroll position normalized to `[0, 1]`, zero when nothing can scroll.
    pub fn fraction(&self) -> f32 {
        let max = self.max_offset();
        if max > 0.0 { self.offset / max } else { 0.0 }
    }

    /// Scroll fraction expressed as one full turn over the page.
    pub fn rotation(&self) -> f32 {
        self.fraction() * TAU
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.offset + delta);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Resize the viewport, keeping the same relative scroll position.
    pub fn set_viewport_height(&mut self, height: f32) {
        let fraction = self.fraction();
        self.viewport_height = height.max(0.0);
        self.offset = fraction * self.max_offset();
    }

    /// Share of the viewport-tall section at `index` currently on screen.
    pub fn section_visibility(&self, index: usize) -> f32 {
        let height = self.viewport_height;
        if height <= 0.0 {
            return 0.0;
        }
        let top = index as f32 * height;
        let bottom = top + height;
        let visible = bottom.min(self.offset + height) - top.max(self.offset);
        (visible / height).clamp(0.0, 1.0)
    }
}
