use bevy::prelude::*;

use crate::choreography::controller::{CameraPose, ViewMode};
use crate::scene::BodyPositions;

/// World up used for side vectors and height offsets.
pub const WORLD_UP: Vec3 = Vec3::Y;
/// Distance the about-view camera sits behind the moon, away from earth.
pub const MOON_ABOUT_DISTANCE: f32 = 5.0;
/// Sideways distance of the skills-view camera from the moon.
pub const MOON_SKILLS_SIDE_DISTANCE: f32 = 7.0;
/// Height of the skills-view camera above the moon.
pub const MOON_SKILLS_HEIGHT: f32 = 1.0;
/// Position follow rate per second (per-frame factor 1.5 at 60 Hz).
pub const FOLLOW_RATE: f32 = 90.0;
/// Racetrack look-at follow rate per second (per-frame factor 0.5 at 60 Hz).
pub const RACETRACK_LOOK_RATE: f32 = 30.0;
/// Offset from the earth-sun midpoint where the racetrack approach tween ends.
pub const RACETRACK_APPROACH_OFFSET: Vec3 = Vec3::new(0.0, 50.0, 150.0);
/// Ellipse semi-axis along X as a fraction of the earth-sun distance.
pub const RACETRACK_RADIUS_X_SCALE: f32 = 0.6;
/// Ellipse semi-axis along Z as a fraction of the earth-sun distance.
pub const RACETRACK_RADIUS_Z_SCALE: f32 = 0.4;
/// Angular speed of the racetrack circuit in radians per second.
pub const RACETRACK_ANGULAR_SPEED: f32 = 0.15;
/// Camera height above the midpoint plane.
pub const RACETRACK_HEIGHT: f32 = 20.0;
/// Phase lead of the look-at point along the ellipse, in radians.
pub const RACETRACK_LOOK_AHEAD: f32 = 0.4;
/// Look-at radii relative to the camera ellipse.
pub const RACETRACK_LOOK_INSET: f32 = 0.8;
/// Look-at height relative to the camera height.
pub const RACETRACK_LOOK_HEIGHT_SCALE: f32 = 0.5;

/// Frame-rate independent blend weight for exponential smoothing.
pub fn blend_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Camera position parked behind the moon as seen from earth.
pub fn moon_about_camera(earth: Vec3, moon: Vec3) -> Vec3 {
    let outward = (moon - earth).normalize_or_zero();
    moon + outward * MOON_ABOUT_DISTANCE
}

/// Camera position beside the moon, slightly raised.
pub fn moon_skills_camera(earth: Vec3, moon: Vec3) -> Vec3 {
    let outward = (moon - earth).normalize_or_zero();
    let side = outward.cross(WORLD_UP).normalize_or_zero();
    moon + side * MOON_SKILLS_SIDE_DISTANCE + WORLD_UP * MOON_SKILLS_HEIGHT
}

/// Point halfway between earth and sun.
pub fn racetrack_midpoint(earth: Vec3, sun: Vec3) -> Vec3 {
    earth.lerp(sun, 0.5)
}

/// Semi-axes `(x, z)` of the racetrack ellipse.
pub fn racetrack_radii(earth: Vec3, sun: Vec3) -> Vec2 {
    let distance = earth.distance(sun);
    Vec2::new(
        distance * RACETRACK_RADIUS_X_SCALE,
        distance * RACETRACK_RADIUS_Z_SCALE,
    )
}

/// Ideal racetrack camera and look-ahead point at `elapsed` seconds.
pub fn racetrack_pose(earth: Vec3, sun: Vec3, elapsed: f32) -> CameraPose {
    let center = racetrack_midpoint(earth, sun);
    let radii = racetrack_radii(earth, sun);
    let angle = elapsed * RACETRACK_ANGULAR_SPEED;
    let position = center
        + Vec3::new(
            angle.cos() * radii.x,
            RACETRACK_HEIGHT,
            angle.sin() * radii.y,
        );

    let ahead = angle + RACETRACK_LOOK_AHEAD;
    let look_at = center
        + Vec3::new(
            ahead.cos() * radii.x * RACETRACK_LOOK_INSET,
            RACETRACK_HEIGHT * RACETRACK_LOOK_HEIGHT_SCALE,
            ahead.sin() * radii.y * RACETRACK_LOOK_INSET,
        );
    CameraPose { position, look_at }
}

/// Draw the live pose toward the mode's ideal pose for one frame.
///
/// Modes without a moving subject hold their pose. Missing bodies hold too.
pub fn track(mode: ViewMode, pose: &mut CameraPose, bodies: &BodyPositions, elapsed: f32, dt: f32) {
    let follow = blend_factor(FOLLOW_RATE, dt);
    match mode {
        ViewMode::MoonAbout => {
            let (Some(earth), Some(moon)) = (bodies.earth, bodies.moon) else {
                return;
            };
            pose.position = pose.position.lerp(moon_about_camera(earth, moon), follow);
            pose.look_at = pose.look_at.lerp(moon, follow);
        }
        ViewMode::MoonSkills => {
            let (Some(earth), Some(moon)) = (bodies.earth, bodies.moon) else {
                return;
            };
            pose.position = pose.position.lerp(moon_skills_camera(earth, moon), follow);
        }
        ViewMode::Racetrack => {
            let (Some(earth), Some(sun)) = (bodies.earth, bodies.sun) else {
                return;
            };
            let ideal = racetrack_pose(earth, sun, elapsed);
            pose.position = pose.position.lerp(ideal.position, follow);
            pose.look_at = pose
                .look_at
                .lerp(ideal.look_at, blend_factor(RACETRACK_LOOK_RATE, dt));
        }
        ViewMode::Hero
        | ViewMode::Experience
        | ViewMode::Education
        | ViewMode::Contact => {}
    }
}
