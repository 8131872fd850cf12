use bevy::prelude::*;

mod controller;
mod easing;
mod section;
mod systems;
mod tracking;
mod tween;

pub use controller::{CameraChoreographer, CameraPose};
pub use section::SectionId;
pub use systems::{apply_camera_pose_system, camera_choreography_system};

/// A page section became the focused one.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct SectionActivated {
    /// Element id of the section, as written on the page.
    pub id: String,
}

impl SectionActivated {
    pub fn new(section: SectionId) -> Self {
        Self {
            id: section.as_str().to_owned(),
        }
    }
}

/// Marker for the camera whose transform mirrors the choreographer pose.
#[derive(Component)]
pub struct ChoreographedCamera;
