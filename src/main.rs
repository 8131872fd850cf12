use bevy::pbr::MaterialPlugin;
use bevy::prelude::*;

mod choreography;
mod error;
mod scene;
mod viewport;

use choreography::{
    CameraChoreographer, CameraPose, SectionActivated, apply_camera_pose_system,
    camera_choreography_system,
};
use scene::{
    CmeMaterial, EarthMaterial, SoftGlowMaterial, advance_shader_time_system,
    body_rotation_system, heading_flicker_system, section_heading_system, setup_scene,
    shader_resolution_system,
};
use viewport::{
    ScrollState, SectionObserver, scroll_input_system, section_observer_system,
    viewport_resize_system,
};

// World-space center of the sun.
const SUN_POSITION: Vec3 = Vec3::new(-100.0, 0.0, -400.0);
// World-space center of the earth (and the moon's orbit).
const EARTH_POSITION: Vec3 = Vec3::new(7.0, -3.0, -5.0);
// Radius of the sun sphere.
const SUN_RADIUS: f32 = 10.0;
// Flare shell radius relative to the sun.
const CME_RADIUS_SCALE: f32 = 1.01;
// Halo shell radius relative to the sun.
const SOFT_GLOW_RADIUS_SCALE: f32 = 1.3;
// Radius of the earth sphere.
const EARTH_RADIUS: f32 = 2.5;
// Gap between the earth's surface and its cloud shell.
const CLOUD_OFFSET: f32 = 0.05;
// Opacity of the additive cloud shell.
const CLOUD_OPACITY: f32 = 0.6;
// Axial tilt of earth and clouds, in radians.
const EARTH_TILT: f32 = 0.0;
// Earth yaw at time zero.
const EARTH_INITIAL_YAW: f32 = 0.0;
// Earth spin in radians per second.
const EARTH_SPIN_SPEED: f32 = 0.05;
// Cloud spin in radians per second; a touch faster than the earth.
const CLOUD_SPIN_SPEED: f32 = EARTH_SPIN_SPEED + 0.01;
// Radius of the moon sphere.
const MOON_RADIUS: f32 = 0.35;
// Distance from the earth's center to the moon's center.
const MOON_ORBIT_RADIUS: f32 = 6.0;
// Moon revolution in radians per second.
const MOON_REVOLUTION_SPEED: f32 = 0.1;
// Radius of the star sphere around the scene.
const STARFIELD_RADIUS: f32 = 500.0;
// Opacity of the star sphere.
const STARFIELD_OPACITY: f32 = 0.2;
// Sunlight illuminance at the earth, in lux.
const SUN_ILLUMINANCE: f32 = 12_000.0;
// Ambient fill so night sides are not pitch black.
const AMBIENT_BRIGHTNESS: f32 = 80.0;
// Longitudinal segments of every sphere mesh.
const SPHERE_SECTORS: u32 = 64;
// Latitudinal segments of every sphere mesh.
const SPHERE_STACKS: u32 = 64;
// Vertical field of view in degrees.
const CAMERA_FOV_DEGREES: f32 = 50.0;
// Near clip plane.
const CAMERA_NEAR: f32 = 0.1;
// Far clip plane; beyond the star sphere.
const CAMERA_FAR: f32 = 1000.0;
// Camera position before the first section trigger.
const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

// App entry point and system registration.
fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbit backdrop".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            MaterialPlugin::<CmeMaterial>::default(),
            MaterialPlugin::<SoftGlowMaterial>::default(),
            MaterialPlugin::<EarthMaterial>::default(),
        ))
        .add_message::<SectionActivated>()
        .init_resource::<ScrollState>()
        .init_resource::<SectionObserver>()
        .insert_resource(CameraChoreographer::new(CameraPose {
            position: INITIAL_CAMERA_POSITION,
            look_at: SUN_POSITION,
        }))
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                viewport_resize_system,
                scroll_input_system,
                section_observer_system,
                camera_choreography_system,
                apply_camera_pose_system,
                advance_shader_time_system,
                body_rotation_system,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                shader_resolution_system,
                section_heading_system,
                heading_flicker_system,
            ),
        )
        .run();
}
