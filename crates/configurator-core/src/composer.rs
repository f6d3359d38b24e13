//! Scene composition: a pure function from the current configuration and mesh
//! view state to the scene the render host draws.

use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

use crate::color::parse_hex_linear;
use crate::config::{Configuration, Shape};
use crate::constants::{
    AMBIENT_INTENSITY, BACKGROUND_COLOR, DIRECTIONAL_INTENSITY, MESH_LIGHT_POSITION,
    SCENE_LIGHT_POSITION, WHITE_RGB,
};
use crate::material::{build_shader_params, fallback_params, ShaderParams};
use crate::orbit::OrbitSettings;
use crate::registry::{resolve_geometry, resolve_material, GeometryDescriptor, MaterialDescriptor};
use crate::texture_cache::TextureLookup;
use crate::view::MeshView;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional { position: Vec3, cast_shadow: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: WHITE_RGB,
            intensity,
        }
    }

    pub fn directional(position: [f32; 3], intensity: f32, cast_shadow: bool) -> Self {
        Self {
            kind: LightKind::Directional {
                position: Vec3::from(position),
                cast_shadow,
            },
            color: WHITE_RGB,
            intensity,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshNode {
    pub shape: Shape,
    pub geometry: &'static GeometryDescriptor,
    pub shader: ShaderParams,
    /// True when the configured material was replaced by the flat fallback.
    pub used_fallback: bool,
    pub rotation_y: f32,
    pub scale: f32,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshNode {
    pub fn model_matrix(&self) -> Mat4 {
        mesh_transform(self.rotation_y, self.scale)
    }
}

/// Object transform: uniform scale, then spin about +Y, at the origin.
pub fn mesh_transform(rotation_y: f32, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        Quat::from_rotation_y(rotation_y),
        Vec3::ZERO,
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneGraph {
    /// Linear RGB clear color.
    pub background: [f32; 3],
    pub lights: SmallVec<[Light; 4]>,
    pub controls: OrbitSettings,
    pub mesh: MeshNode,
    /// Maps of the active material that are not loaded yet.
    pub texture_requests: SmallVec<[&'static str; 5]>,
}

/// Lights contributed by the scene around the configured object.
pub fn scene_lights() -> [Light; 2] {
    [
        Light::ambient(AMBIENT_INTENSITY),
        Light::directional(SCENE_LIGHT_POSITION, DIRECTIONAL_INTENSITY, false),
    ]
}

/// Lights that travel with the configured object.
pub fn mesh_lights() -> [Light; 2] {
    [
        Light::ambient(AMBIENT_INTENSITY),
        Light::directional(MESH_LIGHT_POSITION, DIRECTIONAL_INTENSITY, true),
    ]
}

/// Resolves the configured material, substituting the fallback on an unknown
/// identifier or a build failure. The second value reports the substitution.
pub fn resolve_shader(
    config: &Configuration,
    geometry: &GeometryDescriptor,
    textures: &impl TextureLookup,
) -> (ShaderParams, bool) {
    let Some(descriptor) = resolve_material(&config.material) else {
        log::warn!("unknown material type {:?}, using fallback", config.material);
        return (fallback_params(config), true);
    };
    match build_shader_params(
        descriptor,
        config.color_hex(),
        config.metalness,
        config.roughness,
        geometry.uv_scale,
        textures,
    ) {
        Ok(params) => (params, false),
        Err(e) => {
            log::error!("error building material {:?}: {}", config.material, e);
            (fallback_params(config), true)
        }
    }
}

pub fn compose_scene(
    config: &Configuration,
    mesh_view: &MeshView,
    textures: &impl TextureLookup,
) -> SceneGraph {
    let geometry = resolve_geometry(&config.shape);
    let (shader, used_fallback) = resolve_shader(config, geometry, textures);

    let texture_requests = match resolve_material(&config.material) {
        Some(MaterialDescriptor::Textured(set)) => set
            .maps
            .iter()
            .filter(|m| !textures.is_ready(m.path))
            .map(|m| m.path)
            .collect(),
        _ => SmallVec::new(),
    };

    let mut lights: SmallVec<[Light; 4]> = SmallVec::new();
    lights.extend(scene_lights());
    lights.extend(mesh_lights());

    SceneGraph {
        background: parse_hex_linear(BACKGROUND_COLOR).unwrap_or([0.0; 3]),
        lights,
        controls: OrbitSettings::default(),
        mesh: MeshNode {
            shape: geometry.shape,
            geometry,
            shader,
            used_fallback,
            rotation_y: mesh_view.rotation_y(),
            scale: mesh_view.scale(),
            cast_shadow: true,
            receive_shadow: true,
        },
        texture_requests,
    }
}
