use bevy::prelude::*;

use crate::choreography::SectionId;
use crate::viewport::ScrollState;

/// Reports sections as they cross into view, like a page intersection observer.
#[derive(Resource, Debug, Default)]
pub struct SectionObserver {
    /// Whether each section (in page order) is currently past the threshold.
    intersecting: [bool; SectionId::ALL.len()],
}

impl SectionObserver {
    /// Share of a section that must be visible for it to count as in view.
    pub const THRESHOLD: f32 = 0.6;

    /// Update intersection state and return sections that just came into view.
    pub fn observe(&mut self, scroll: &ScrollState) -> Vec<SectionId> {
        let mut entered = Vec::new();
        for (index, section) in SectionId::ALL.into_iter().enumerate() {
            let now = scroll.section_visibility(index) >= Self::THRESHOLD;
            if now && !self.intersecting[index] {
                entered.push(section);
            }
            self.intersecting[index] = now;
        }
        entered
    }
}
