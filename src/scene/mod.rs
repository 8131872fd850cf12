use bevy::prelude::*;

mod effects;
mod motion;
mod overlay;
mod setup;

pub use effects::{
    CmeMaterial, EarthMaterial, SoftGlowMaterial, advance_shader_time_system,
    shader_resolution_system,
};
pub use motion::body_rotation_system;
pub use overlay::{heading_flicker_system, section_heading_system};
pub use setup::setup_scene;

/// Named renderable bodies the camera can be sent to.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    Sun,
    Earth,
    /// Cloud shell around the earth; rotates, never targeted.
    Clouds,
    /// Child of the [`MoonOrbit`] pivot.
    Moon,
}

/// Pivot at the earth's center whose yaw carries the moon around its orbit.
#[derive(Component)]
pub struct MoonOrbit;

/// World positions of the targetable bodies for one frame.
///
/// A `None` entry means the body is not in the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyPositions {
    pub sun: Option<Vec3>,
    pub earth: Option<Vec3>,
    pub moon: Option<Vec3>,
}

impl BodyPositions {
    /// Gather positions from body transforms.
    ///
    /// The moon's transform is local to its orbit pivot, so it is composed with
    /// `orbit` here instead of waiting for transform propagation.
    pub fn collect<'a>(
        bodies: impl IntoIterator<Item = (&'a CelestialBody, &'a Transform)>,
        orbit: Option<&Transform>,
    ) -> Self {
        let mut positions = Self::default();
        for (body, transform) in bodies {
            match body {
                CelestialBody::Sun => positions.sun = Some(transform.translation),
                CelestialBody::Earth => positions.earth = Some(transform.translation),
                CelestialBody::Moon => {
                    let local = transform.translation;
                    positions.moon =
                        Some(orbit.map_or(local, |pivot| pivot.transform_point(local)));
                }
                CelestialBody::Clouds => {}
            }
        }
        positions
    }

    /// Position of `body`, if present. Clouds are never a target.
    pub fn get(&self, body: CelestialBody) -> Option<Vec3> {
        match body {
            CelestialBody::Sun => self.sun,
            CelestialBody::Earth => self.earth,
            CelestialBody::Moon => self.moon,
            CelestialBody::Clouds => None,
        }
    }
}
