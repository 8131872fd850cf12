use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::scene::{CelestialBody, MoonOrbit};
use crate::{
    CLOUD_SPIN_SPEED, EARTH_INITIAL_YAW, EARTH_SPIN_SPEED, EARTH_TILT, MOON_REVOLUTION_SPEED,
};

/// Earth yaw after `seconds`.
pub fn earth_spin(seconds: f32) -> f32 {
    EARTH_INITIAL_YAW + seconds * EARTH_SPIN_SPEED
}

/// Cloud shell yaw after `seconds`; slightly ahead of the earth.
pub fn cloud_spin(seconds: f32) -> f32 {
    EARTH_INITIAL_YAW + seconds * CLOUD_SPIN_SPEED
}

/// Yaw of the moon's orbit pivot after `seconds`.
pub fn orbit_angle(seconds: f32) -> f32 {
    seconds * MOON_REVOLUTION_SPEED
}

/// Moon self-spin that cancels its revolution so one face stays toward earth.
pub fn tidal_lock_spin(orbit_angle: f32) -> f32 {
    -orbit_angle - FRAC_PI_2
}

/// Spin earth and clouds, revolve the moon, and keep it tidally locked.
pub fn body_rotation_system(
    time: Res<Time>,
    mut body_query: Query<(&CelestialBody, &mut Transform), Without<MoonOrbit>>,
    mut orbit_query: Query<&mut Transform, With<MoonOrbit>>,
) {
    let seconds = time.elapsed_secs();
    let orbit = orbit_angle(seconds);
    if let Ok(mut orbit_transform) = orbit_query.single_mut() {
        orbit_transform.rotation = Quat::from_rotation_y(orbit);
    }

    for (body, mut transform) in &mut body_query {
        let yaw = match body {
            CelestialBody::Earth => earth_spin(seconds),
            CelestialBody::Clouds => cloud_spin(seconds),
            CelestialBody::Moon => tidal_lock_spin(orbit),
            CelestialBody::Sun => continue,
        };
        transform.rotation = match body {
            CelestialBody::Moon => Quat::from_rotation_y(yaw),
            _ => Quat::from_euler(EulerRot::YXZ, yaw, 0.0, EARTH_TILT),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    /// Spin always equals minus the orbit angle minus a quarter turn.
    #[test]
    fn tidal_lock_cancels_revolution() {
        for step in 0..1000 {
            let angle = step as f32 * 0.037 - 10.0;
            assert_eq!(tidal_lock_spin(angle), -angle - FRAC_PI_2);
        }
    }

    /// Clouds drift ahead of the earth's surface.
    #[test]
    fn clouds_outpace_earth() {
        assert!(cloud_spin(100.0) > earth_spin(100.0));
        assert_eq!(earth_spin(0.0), cloud_spin(0.0));
    }

    /// The moon's facing relative to earth is the same every frame.
    #[test]
    fn moon_keeps_one_face_toward_earth() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
            .add_systems(Update, body_rotation_system);

        let orbit = app
            .world_mut()
            .spawn((MoonOrbit, Transform::default()))
            .id();
        let moon = app
            .world_mut()
            .spawn((CelestialBody::Moon, Transform::from_xyz(6.0, 0.0, 0.0)))
            .id();

        let mut facings = Vec::new();
        for _ in 0..12 {
            app.update();
            let orbit_rotation = app.world().get::<Transform>(orbit).map(|t| t.rotation);
            let moon_rotation = app.world().get::<Transform>(moon).map(|t| t.rotation);
            let (Some(orbit_rotation), Some(moon_rotation)) = (orbit_rotation, moon_rotation) else {
                panic!("orbit or moon transform missing");
            };
            // Combined yaw in world space is constant under tidal lock.
            facings.push((orbit_rotation * moon_rotation) * Vec3::X);
        }
        for facing in &facings {
            assert!((*facing - facings[0]).length() < 1e-4);
        }
    }
}
