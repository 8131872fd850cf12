use bevy::pbr::Material;
use bevy::prelude::*;
use bevy::render::render_resource::AsBindGroup;
use bevy::shader::ShaderRef;
use bevy::window::WindowResized;

/// Procedural flare shell drawn just outside the sun's surface.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct CmeMaterial {
    /// `[0]` = (time, noise scale, flare speed, shell radius),
    /// `[1]` = (viewport width, viewport height, unused, unused).
    #[uniform(0)]
    params: [Vec4; 2],
}

impl CmeMaterial {
    /// Spatial frequency of the flare noise.
    const NOISE_SCALE: f32 = 1.5;
    /// Multiplier from elapsed seconds to noise time.
    const FLARE_SPEED: f32 = 0.05;

    /// Build the shell material for a sphere of `radius`.
    pub fn new(radius: f32, resolution: Vec2) -> Self {
        Self {
            params: [
                Vec4::new(0.0, Self::NOISE_SCALE, Self::FLARE_SPEED, radius),
                Vec4::new(resolution.x, resolution.y, 0.0, 0.0),
            ],
        }
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.params[0].x = seconds;
    }

    pub fn set_resolution(&mut self, resolution: Vec2) {
        self.params[1].x = resolution.x;
        self.params[1].y = resolution.y;
    }
}

impl Material for CmeMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/cme.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

/// Fresnel halo around the sun.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SoftGlowMaterial {
    /// (time, opacity, falloff exponent, unused).
    #[uniform(0)]
    params: Vec4,
}

impl SoftGlowMaterial {
    const OPACITY: f32 = 0.3;
    const FALLOFF: f32 = 3.5;

    pub fn new() -> Self {
        Self {
            params: Vec4::new(0.0, Self::OPACITY, Self::FALLOFF, 0.0),
        }
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.params.x = seconds;
    }
}

impl Default for SoftGlowMaterial {
    fn default() -> Self {
        Self::new()
    }
}

impl Material for SoftGlowMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/soft_glow.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

/// Earth surface blending the day and night maps across the terminator.
///
/// The night map shows only where the sun's light falls off, so city lights
/// never glow on the day side.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct EarthMaterial {
    /// (sun position xyz, terminator width in N·L units).
    #[uniform(0)]
    params: Vec4,
    #[texture(1)]
    #[sampler(2)]
    day: Option<Handle<Image>>,
    #[texture(3)]
    #[sampler(4)]
    night: Option<Handle<Image>>,
}

impl EarthMaterial {
    /// N·L range over which night fades into day.
    const TERMINATOR_WIDTH: f32 = 0.25;

    pub fn new(sun_position: Vec3, day: Handle<Image>, night: Handle<Image>) -> Self {
        Self {
            params: sun_position.extend(Self::TERMINATOR_WIDTH),
            day: Some(day),
            night: Some(night),
        }
    }
}

impl Material for EarthMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/earth.wgsl".into()
    }
}

/// Set both sun shader clocks to the elapsed time in seconds.
pub fn advance_shader_time_system(
    time: Res<Time>,
    mut cme_materials: ResMut<Assets<CmeMaterial>>,
    mut glow_materials: ResMut<Assets<SoftGlowMaterial>>,
) {
    let seconds = time.elapsed_secs();
    for (_, material) in cme_materials.iter_mut() {
        material.set_time(seconds);
    }
    for (_, material) in glow_materials.iter_mut() {
        material.set_time(seconds);
    }
}

/// Keep the flare shader's resolution uniform in step with the window.
pub fn shader_resolution_system(
    mut resized: MessageReader<WindowResized>,
    mut cme_materials: ResMut<Assets<CmeMaterial>>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    let resolution = Vec2::new(last.width, last.height);
    for (_, material) in cme_materials.iter_mut() {
        material.set_resolution(resolution);
    }
}
