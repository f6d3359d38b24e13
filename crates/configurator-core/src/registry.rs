//! Static shape and material tables.
//!
//! Lookups are total: an unknown shape resolves to the sphere entry, and an
//! unknown material resolves to `None` so the composer can substitute its
//! fallback material.

use glam::Vec2;

use crate::config::{MaterialKind, Shape};

/// Construction recipe for one primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// Capped cylinder along +Y; a cone has `radius_top == 0`.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryDescriptor {
    pub shape: Shape,
    pub primitive: Primitive,
    /// Texture repeat factor that keeps tiled maps from stretching.
    pub uv_scale: Vec2,
    pub target_scale: f32,
}

static GEOMETRIES: [GeometryDescriptor; 5] = [
    GeometryDescriptor {
        shape: Shape::Sphere,
        primitive: Primitive::Sphere {
            radius: 1.0,
            width_segments: 64,
            height_segments: 64,
        },
        uv_scale: Vec2::new(1.0, 1.0),
        target_scale: 1.0,
    },
    GeometryDescriptor {
        shape: Shape::Cube,
        primitive: Primitive::Cuboid {
            width: 1.5,
            height: 1.5,
            depth: 1.5,
        },
        uv_scale: Vec2::new(1.0, 1.0),
        target_scale: 1.0,
    },
    GeometryDescriptor {
        shape: Shape::Torus,
        primitive: Primitive::Torus {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 32,
            tubular_segments: 64,
        },
        uv_scale: Vec2::new(2.0, 1.0),
        target_scale: 1.0,
    },
    GeometryDescriptor {
        shape: Shape::Cone,
        primitive: Primitive::Cylinder {
            radius_top: 0.0,
            radius_bottom: 1.0,
            height: 2.0,
            radial_segments: 64,
        },
        uv_scale: Vec2::new(1.0, 1.5),
        target_scale: 1.0,
    },
    GeometryDescriptor {
        shape: Shape::Cylinder,
        primitive: Primitive::Cylinder {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 2.0,
            radial_segments: 64,
        },
        uv_scale: Vec2::new(1.0, 1.5),
        target_scale: 1.0,
    },
];

pub fn geometry_for(shape: Shape) -> &'static GeometryDescriptor {
    let idx = Shape::ALL.iter().position(|s| *s == shape).unwrap_or(0);
    &GEOMETRIES[idx]
}

/// Looks up the geometry for a shape identifier, falling back to the sphere.
pub fn resolve_geometry(shape_id: &str) -> &'static GeometryDescriptor {
    match Shape::from_id(shape_id) {
        Some(shape) => geometry_for(shape),
        None => {
            log::warn!("unknown shape {:?}, using sphere", shape_id);
            geometry_for(Shape::Sphere)
        }
    }
}

/// Which shader channel a texture feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapSlot {
    Color,
    Normal,
    Roughness,
    Metalness,
    AmbientOcclusion,
    Height,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureMap {
    pub slot: MapSlot,
    pub path: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureSet {
    pub maps: &'static [TextureMap],
    /// Extra tiling on top of the shape's UV scale.
    pub repeat_multiplier: f32,
}

impl TextureSet {
    pub fn path_for(&self, slot: MapSlot) -> Option<&'static str> {
        self.maps.iter().find(|m| m.slot == slot).map(|m| m.path)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialDescriptor {
    /// Flat color with configured metalness and roughness.
    Standard,
    Textured(TextureSet),
}

const fn map(slot: MapSlot, path: &'static str) -> TextureMap {
    TextureMap { slot, path }
}

static ABSTRACT_MAPS: [TextureMap; 4] = [
    map(MapSlot::Color, "textures/abstract/color.jpg"),
    map(MapSlot::Normal, "textures/abstract/normal.jpg"),
    map(MapSlot::Roughness, "textures/abstract/roughness.jpg"),
    map(MapSlot::AmbientOcclusion, "textures/abstract/ao.jpg"),
];

static METAL_MAPS: [TextureMap; 4] = [
    map(MapSlot::Color, "textures/metal/color.png"),
    map(MapSlot::Normal, "textures/metal/normal.png"),
    map(MapSlot::Metalness, "textures/metal/metallic.png"),
    map(MapSlot::Roughness, "textures/metal/roughness.png"),
];

static WOOD_MAPS: [TextureMap; 4] = [
    map(MapSlot::Color, "textures/wood/color.png"),
    map(MapSlot::Normal, "textures/wood/normal.png"),
    map(MapSlot::Roughness, "textures/wood/roughness.png"),
    map(MapSlot::AmbientOcclusion, "textures/wood/ao.png"),
];

static WALL_STONE_MAPS: [TextureMap; 5] = [
    map(MapSlot::Color, "textures/wallstone/color.png"),
    map(MapSlot::Normal, "textures/wallstone/normal.png"),
    map(MapSlot::Roughness, "textures/wallstone/roughness.png"),
    map(MapSlot::Height, "textures/wallstone/height.png"),
    map(MapSlot::AmbientOcclusion, "textures/wallstone/ao.png"),
];

static MATERIALS: [MaterialDescriptor; 5] = [
    MaterialDescriptor::Standard,
    MaterialDescriptor::Textured(TextureSet {
        maps: &ABSTRACT_MAPS,
        repeat_multiplier: 1.0,
    }),
    MaterialDescriptor::Textured(TextureSet {
        maps: &METAL_MAPS,
        repeat_multiplier: 1.0,
    }),
    MaterialDescriptor::Textured(TextureSet {
        maps: &WOOD_MAPS,
        repeat_multiplier: 1.0,
    }),
    // high-frequency pattern, tiled twice as densely
    MaterialDescriptor::Textured(TextureSet {
        maps: &WALL_STONE_MAPS,
        repeat_multiplier: 2.0,
    }),
];

pub fn material_for(kind: MaterialKind) -> &'static MaterialDescriptor {
    let idx = MaterialKind::ALL
        .iter()
        .position(|m| *m == kind)
        .unwrap_or(0);
    &MATERIALS[idx]
}

/// Looks up a material identifier. `None` means the caller must use the
/// fallback material.
pub fn resolve_material(material_id: &str) -> Option<&'static MaterialDescriptor> {
    MaterialKind::from_id(material_id).map(material_for)
}

/// Thumbnail shown on the panel swatch; `None` for the flat standard material.
pub fn swatch_image(kind: MaterialKind) -> Option<&'static str> {
    match material_for(kind) {
        MaterialDescriptor::Standard => None,
        MaterialDescriptor::Textured(set) => set.path_for(MapSlot::Color),
    }
}

/// Channel a registered texture path feeds, across every material.
pub fn slot_for_path(path: &str) -> Option<MapSlot> {
    MATERIALS.iter().find_map(|m| match m {
        MaterialDescriptor::Standard => None,
        MaterialDescriptor::Textured(set) => {
            set.maps.iter().find(|t| t.path == path).map(|t| t.slot)
        }
    })
}

impl MapSlot {
    /// Color maps carry sRGB-encoded texels; every other channel is linear data.
    pub fn is_srgb(self) -> bool {
        matches!(self, MapSlot::Color)
    }
}
