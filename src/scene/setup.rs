use bevy::ecs::system::SystemParam;
use bevy::light::NotShadowCaster;
use bevy::mesh::Mesh3d;
use bevy::pbr::MeshMaterial3d;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy::window::PrimaryWindow;

use crate::choreography::ChoreographedCamera;
use crate::error::SceneError;
use crate::scene::effects::{CmeMaterial, EarthMaterial, SoftGlowMaterial};
use crate::scene::overlay::spawn_heading_overlay;
use crate::scene::{CelestialBody, MoonOrbit};
use crate::viewport::ScrollState;
use crate::{
    AMBIENT_BRIGHTNESS, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CLOUD_OFFSET, CLOUD_OPACITY,
    CME_RADIUS_SCALE, EARTH_POSITION, EARTH_RADIUS, INITIAL_CAMERA_POSITION, MOON_ORBIT_RADIUS,
    MOON_RADIUS, SOFT_GLOW_RADIUS_SCALE, SPHERE_SECTORS, SPHERE_STACKS, STARFIELD_OPACITY,
    STARFIELD_RADIUS, SUN_ILLUMINANCE, SUN_POSITION, SUN_RADIUS,
};

/// Background behind the starfield.
const SPACE_COLOR: Color = Color::BLACK;
/// Sun light color.
const SUN_COLOR: Color = Color::WHITE;
/// Texture paths under `assets/`, listed in `assets/textures/README.md`.
const STARFIELD_TEXTURE: &str = "textures/2k_stars_milky_way.jpg";
const SUN_TEXTURE: &str = "textures/8k_sun.jpg";
const EARTH_DAY_TEXTURE: &str = "textures/2k_earth_daymap.jpg";
const EARTH_NIGHT_TEXTURE: &str = "textures/2k_earth_nightmap.jpg";
const CLOUD_TEXTURE: &str = "textures/2k_earth_clouds.jpg";
const MOON_TEXTURE: &str = "textures/2k_moon.jpg";
/// Surface roughness of the moon.
const MOON_ROUGHNESS: f32 = 0.9;

/// Asset stores and loader used while building the scene.
#[derive(SystemParam)]
pub struct SceneAssets<'w> {
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    cme_materials: ResMut<'w, Assets<CmeMaterial>>,
    glow_materials: ResMut<'w, Assets<SoftGlowMaterial>>,
    earth_materials: ResMut<'w, Assets<EarthMaterial>>,
    asset_server: Res<'w, AssetServer>,
}

impl SceneAssets<'_> {
    /// UV sphere mesh of `radius` at the shared tessellation.
    fn sphere(&mut self, radius: f32) -> Handle<Mesh> {
        self.meshes
            .add(Sphere::new(radius).mesh().uv(SPHERE_SECTORS, SPHERE_STACKS))
    }

    /// Start an asynchronous texture load; the texture pops in when ready.
    fn texture(&self, path: &'static str) -> Handle<Image> {
        self.asset_server.load(path)
    }
}

/// Build the backdrop. Any failure is logged once and leaves the scene partial.
pub fn setup_scene(
    mut commands: Commands,
    mut assets: SceneAssets,
    mut scroll: ResMut<ScrollState>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    if let Err(err) = build_scene(&mut commands, &mut assets, &mut scroll, &window_query) {
        error!("backdrop setup failed, scene left static: {err}");
    }
}

/// Spawn every body, light, the camera and the heading overlay.
fn build_scene(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    scroll: &mut ScrollState,
    window_query: &Query<&Window, With<PrimaryWindow>>,
) -> Result<(), SceneError> {
    let window = window_query
        .single()
        .map_err(|_| SceneError::NoPrimaryWindow)?;
    let resolution = Vec2::new(window.width(), window.height());

    setup_environment(commands);
    spawn_starfield(commands, assets);
    spawn_sun(commands, assets, resolution);
    spawn_earth(commands, assets);
    spawn_moon(commands, assets);
    spawn_camera(commands);
    spawn_heading_overlay(commands);

    scroll.set_viewport_height(resolution.y);
    info!(
        "backdrop ready: {}x{} viewport, {:.0}px page",
        resolution.x,
        resolution.y,
        scroll.page_height()
    );
    Ok(())
}

/// Insert background and ambient-light resources.
fn setup_environment(commands: &mut Commands) {
    commands.insert_resource(ClearColor(SPACE_COLOR));
    commands.insert_resource(bevy::light::GlobalAmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });
}

/// Spawn the dim star sphere surrounding everything, textured on the inside.
fn spawn_starfield(commands: &mut Commands, assets: &mut SceneAssets) {
    let texture = assets.texture(STARFIELD_TEXTURE);
    let material = assets.materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(STARFIELD_OPACITY),
        base_color_texture: Some(texture),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: Some(Face::Front),
        ..default()
    });
    let mesh = assets.sphere(STARFIELD_RADIUS);
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        NotShadowCaster,
    ));
}

/// Spawn the sun sphere, its two shader shells and the light it casts.
fn spawn_sun(commands: &mut Commands, assets: &mut SceneAssets, resolution: Vec2) {
    commands.spawn((
        bevy::light::DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            color: SUN_COLOR,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(EARTH_POSITION, Vec3::Y),
    ));

    let texture = assets.texture(SUN_TEXTURE);
    let material = assets.materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        unlit: true,
        ..default()
    });
    let mesh = assets.sphere(SUN_RADIUS);
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(SUN_POSITION),
        NotShadowCaster,
        CelestialBody::Sun,
    ));

    let cme_radius = SUN_RADIUS * CME_RADIUS_SCALE;
    let cme_mesh = assets.sphere(cme_radius);
    let cme_material = assets
        .cme_materials
        .add(CmeMaterial::new(cme_radius, resolution));
    commands.spawn((
        Mesh3d(cme_mesh),
        MeshMaterial3d(cme_material),
        Transform::from_translation(SUN_POSITION),
        NotShadowCaster,
    ));

    let glow_mesh = assets.sphere(SUN_RADIUS * SOFT_GLOW_RADIUS_SCALE);
    let glow_material = assets.glow_materials.add(SoftGlowMaterial::new());
    commands.spawn((
        Mesh3d(glow_mesh),
        MeshMaterial3d(glow_material),
        Transform::from_translation(SUN_POSITION),
        NotShadowCaster,
    ));
}

/// Spawn the earth with day/night maps and its additive cloud shell.
fn spawn_earth(commands: &mut Commands, assets: &mut SceneAssets) {
    let day = assets.texture(EARTH_DAY_TEXTURE);
    let night = assets.texture(EARTH_NIGHT_TEXTURE);
    let clouds = assets.texture(CLOUD_TEXTURE);

    let earth_material = assets
        .earth_materials
        .add(EarthMaterial::new(SUN_POSITION, day, night));
    let earth_mesh = assets.sphere(EARTH_RADIUS);
    commands.spawn((
        Mesh3d(earth_mesh),
        MeshMaterial3d(earth_material),
        Transform::from_translation(EARTH_POSITION),
        CelestialBody::Earth,
    ));

    let cloud_material = assets.materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(CLOUD_OPACITY),
        base_color_texture: Some(clouds),
        alpha_mode: AlphaMode::Add,
        ..default()
    });
    let cloud_mesh = assets.sphere(EARTH_RADIUS + CLOUD_OFFSET);
    commands.spawn((
        Mesh3d(cloud_mesh),
        MeshMaterial3d(cloud_material),
        Transform::from_translation(EARTH_POSITION),
        NotShadowCaster,
        CelestialBody::Clouds,
    ));
}

/// Spawn the moon on a pivot centered on the earth.
fn spawn_moon(commands: &mut Commands, assets: &mut SceneAssets) {
    let texture = assets.texture(MOON_TEXTURE);
    let material = assets.materials.add(StandardMaterial {
        base_color_texture: Some(texture),
        perceptual_roughness: MOON_ROUGHNESS,
        ..default()
    });
    let mesh = assets.sphere(MOON_RADIUS);
    commands
        .spawn((
            MoonOrbit,
            Transform::from_translation(EARTH_POSITION),
            Visibility::default(),
        ))
        .with_children(|orbit| {
            orbit.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_xyz(MOON_ORBIT_RADIUS, 0.0, 0.0),
                CelestialBody::Moon,
            ));
        });
}

/// Spawn the choreographed perspective camera looking at the sun.
fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        bevy::camera::Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(INITIAL_CAMERA_POSITION).looking_at(SUN_POSITION, Vec3::Y),
        ChoreographedCamera,
    ));
}
