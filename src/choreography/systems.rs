use bevy::prelude::*;

use crate::choreography::tracking::WORLD_UP;
use crate::choreography::{CameraChoreographer, ChoreographedCamera, SectionActivated};
use crate::scene::{BodyPositions, CelestialBody, MoonOrbit};

/// Handle section triggers, then advance tweens and continuous tracking.
pub fn camera_choreography_system(
    time: Res<Time>,
    mut activations: MessageReader<SectionActivated>,
    mut choreographer: ResMut<CameraChoreographer>,
    body_query: Query<(&CelestialBody, &Transform), Without<MoonOrbit>>,
    orbit_query: Query<&Transform, With<MoonOrbit>>,
) {
    let bodies = BodyPositions::collect(&body_query, orbit_query.single().ok());
    for activation in activations.read() {
        choreographer.on_section_activated(&activation.id, &bodies);
    }
    let was_animating = choreographer.is_animating();
    choreographer.advance(time.delta_secs(), time.elapsed_secs(), &bodies);
    if was_animating && !choreographer.is_animating() {
        debug!("camera settled in {:?}", choreographer.mode());
    }
}

/// Write the live pose onto the camera every frame.
pub fn apply_camera_pose_system(
    choreographer: Res<CameraChoreographer>,
    mut camera_query: Query<&mut Transform, With<ChoreographedCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let pose = choreographer.pose();
    *transform = Transform::from_translation(pose.position).looking_at(pose.look_at, WORLD_UP);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::choreography::tracking::moon_skills_camera;
    use crate::choreography::{CameraPose, SectionId};
    use crate::scene::body_rotation_system;

    const SUN: Vec3 = Vec3::new(-100.0, 0.0, -400.0);
    const EARTH: Vec3 = Vec3::new(7.0, -3.0, -5.0);

    /// Headless app running rotation, choreography and camera systems in frame order.
    struct Backdrop {
        app: App,
        orbit: Entity,
        moon: Entity,
        camera: Entity,
    }

    impl Backdrop {
        fn new() -> Self {
            let mut app = App::new();
            app.add_plugins(MinimalPlugins)
                .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
                .add_message::<SectionActivated>()
                .insert_resource(CameraChoreographer::new(CameraPose {
                    position: Vec3::new(0.0, 0.0, 5.0),
                    look_at: SUN,
                }))
                .add_systems(
                    Update,
                    (
                        body_rotation_system,
                        camera_choreography_system,
                        apply_camera_pose_system,
                    )
                        .chain(),
                );

            let world = app.world_mut();
            world.spawn((CelestialBody::Sun, Transform::from_translation(SUN)));
            world.spawn((CelestialBody::Earth, Transform::from_translation(EARTH)));
            let orbit = world
                .spawn((MoonOrbit, Transform::from_translation(EARTH)))
                .id();
            let moon = world
                .spawn((CelestialBody::Moon, Transform::from_xyz(6.0, 0.0, 0.0)))
                .id();
            let camera = world.spawn((ChoreographedCamera, Transform::default())).id();

            Self {
                app,
                orbit,
                moon,
                camera,
            }
        }

        fn trigger(&mut self, section: SectionId) {
            self.app
                .world_mut()
                .write_message(SectionActivated::new(section));
        }

        fn run(&mut self, frames: usize) {
            for _ in 0..frames {
                self.app.update();
            }
        }

        fn transform(&self, entity: Entity) -> Transform {
            *self
                .app
                .world()
                .get::<Transform>(entity)
                .expect("entity has a transform")
        }

        fn moon_world(&self) -> Vec3 {
            let orbit = self.transform(self.orbit);
            orbit.transform_point(self.transform(self.moon).translation)
        }
    }

    /// Skills view keeps its side-and-up spot beside the moon while it orbits.
    #[test]
    fn skills_camera_follows_orbiting_moon() {
        let mut backdrop = Backdrop::new();
        let start_moon = backdrop.moon_world();
        backdrop.trigger(SectionId::Skills);
        backdrop.run(24);

        let moon = backdrop.moon_world();
        assert!((moon - start_moon).length() > 1.0, "moon did not orbit");

        let camera = backdrop.transform(backdrop.camera);
        let expected = moon_skills_camera(EARTH, moon);
        assert!(
            (camera.translation - expected).length() < 1e-3,
            "camera {} expected {expected}",
            camera.translation
        );
        let to_earth = (EARTH - camera.translation).normalize();
        assert!(camera.forward().dot(to_earth) > 0.9999);
    }

    /// The camera transform is rewritten from the live pose every frame.
    #[test]
    fn camera_pose_is_reapplied_every_frame() {
        let mut backdrop = Backdrop::new();
        backdrop.trigger(SectionId::Hero);
        backdrop.run(12);
        let settled = backdrop.transform(backdrop.camera);
        assert!((settled.translation - (EARTH + Vec3::new(0.0, 0.0, 10.0))).length() < 1e-4);

        let camera = backdrop.camera;
        *backdrop
            .app
            .world_mut()
            .get_mut::<Transform>(camera)
            .expect("camera has a transform") = Transform::IDENTITY;
        backdrop.run(1);

        let restored = backdrop.transform(camera);
        assert!((restored.translation - settled.translation).length() < 1e-4);
        let to_earth = (EARTH - restored.translation).normalize();
        assert!(restored.forward().dot(to_earth) > 0.9999);
    }
}
