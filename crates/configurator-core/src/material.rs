//! Shading parameters derived from a material descriptor.
//!
//! [`build_shader_params`] is independent of any GPU binding; the renderer maps
//! the result onto uniforms and texture bindings.

use glam::Vec2;
use thiserror::Error;

use crate::color::{parse_hex_linear, ColorError};
use crate::config::Configuration;
use crate::constants::{TEXTURE_ANISOTROPY, WHITE_RGB};
use crate::registry::{MapSlot, MaterialDescriptor, TextureSet};
use crate::texture_cache::TextureLookup;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MaterialError {
    #[error("invalid material color: {0}")]
    Color(#[from] ColorError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
}

/// A texture bound to a shader channel with its sampling setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledMap {
    pub path: &'static str,
    pub repeat: Vec2,
    pub wrap: WrapMode,
    pub anisotropy: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaterialMaps {
    pub color: Option<SampledMap>,
    pub normal: Option<SampledMap>,
    pub roughness: Option<SampledMap>,
    pub metalness: Option<SampledMap>,
    pub occlusion: Option<SampledMap>,
    /// Loaded with the wall stone set; the mesh shader does not displace.
    pub height: Option<SampledMap>,
}

impl MaterialMaps {
    fn slot_mut(&mut self, slot: MapSlot) -> &mut Option<SampledMap> {
        match slot {
            MapSlot::Color => &mut self.color,
            MapSlot::Normal => &mut self.normal,
            MapSlot::Roughness => &mut self.roughness,
            MapSlot::Metalness => &mut self.metalness,
            MapSlot::AmbientOcclusion => &mut self.occlusion,
            MapSlot::Height => &mut self.height,
        }
    }

    pub fn bound_count(&self) -> usize {
        [
            self.color,
            self.normal,
            self.roughness,
            self.metalness,
            self.occlusion,
            self.height,
        ]
        .iter()
        .filter(|m| m.is_some())
        .count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderParams {
    /// Linear RGB tint.
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub maps: MaterialMaps,
}

impl ShaderParams {
    pub fn flat(base_color: [f32; 3], metalness: f32, roughness: f32) -> Self {
        Self {
            base_color,
            metalness: unit(metalness),
            roughness: unit(roughness),
            maps: MaterialMaps::default(),
        }
    }
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn resolve_color(color: Option<&str>) -> Result<[f32; 3], MaterialError> {
    match color {
        Some(hex) => Ok(parse_hex_linear(hex)?),
        None => Ok(WHITE_RGB),
    }
}

/// Per-map repeat for a texture set on a shape with the given UV scale.
pub fn texture_repeat(set: &TextureSet, uv_scale: Vec2) -> Vec2 {
    uv_scale * set.repeat_multiplier
}

/// Builds shading parameters. Only maps whose texture is already loaded are
/// bound; a missing map leaves its channel unset.
pub fn build_shader_params(
    descriptor: &MaterialDescriptor,
    color: Option<&str>,
    metalness: f32,
    roughness: f32,
    uv_scale: Vec2,
    textures: &impl TextureLookup,
) -> Result<ShaderParams, MaterialError> {
    let base_color = resolve_color(color)?;
    match descriptor {
        MaterialDescriptor::Standard => Ok(ShaderParams::flat(base_color, metalness, roughness)),
        MaterialDescriptor::Textured(set) => {
            let repeat = texture_repeat(set, uv_scale);
            let mut maps = MaterialMaps::default();
            for m in set.maps.iter().filter(|m| textures.is_ready(m.path)) {
                *maps.slot_mut(m.slot) = Some(SampledMap {
                    path: m.path,
                    repeat,
                    wrap: WrapMode::Repeat,
                    anisotropy: TEXTURE_ANISOTROPY,
                });
            }
            // Metalness and roughness come from the maps; the factors only scale them.
            let metalness = if maps.metalness.is_some() { 1.0 } else { 0.0 };
            Ok(ShaderParams {
                base_color,
                metalness,
                roughness: 1.0,
                maps,
            })
        }
    }
}

/// Flat color material used whenever the configured one cannot be resolved or
/// built. A malformed color degrades to white.
pub fn fallback_params(config: &Configuration) -> ShaderParams {
    let base_color = resolve_color(config.color_hex()).unwrap_or(WHITE_RGB);
    ShaderParams::flat(base_color, config.metalness, config.roughness)
}
