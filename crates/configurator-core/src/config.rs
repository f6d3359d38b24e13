//! The shared configuration record and its partial-update merge.
//!
//! Shape and material are stored as identifiers rather than enums so that an
//! unrecognized value can live in the record and degrade when it is read by the
//! registry, never when it is written.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLOR, DEFAULT_MATERIAL, DEFAULT_METALNESS, DEFAULT_ROUGHNESS, DEFAULT_SHAPE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Sphere,
    Cube,
    Torus,
    Cone,
    Cylinder,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Sphere,
        Shape::Cube,
        Shape::Torus,
        Shape::Cone,
        Shape::Cylinder,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Cube => "cube",
            Shape::Torus => "torus",
            Shape::Cone => "cone",
            Shape::Cylinder => "cylinder",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shape::Sphere => "Sphere",
            Shape::Cube => "Cube",
            Shape::Torus => "Torus",
            Shape::Cone => "Cone",
            Shape::Cylinder => "Cylinder",
        }
    }

    pub fn from_id(id: &str) -> Option<Shape> {
        Shape::ALL.into_iter().find(|s| s.id() == id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialKind {
    Standard,
    Abstract,
    Metal,
    Wood,
    WallStone,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 5] = [
        MaterialKind::Standard,
        MaterialKind::Abstract,
        MaterialKind::Metal,
        MaterialKind::Wood,
        MaterialKind::WallStone,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MaterialKind::Standard => "standard",
            MaterialKind::Abstract => "abstract",
            MaterialKind::Metal => "metal",
            MaterialKind::Wood => "wood",
            MaterialKind::WallStone => "wallStone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaterialKind::Standard => "Standard",
            MaterialKind::Abstract => "Abstract",
            MaterialKind::Metal => "Metal",
            MaterialKind::Wood => "Wood",
            MaterialKind::WallStone => "Wall Stone",
        }
    }

    pub fn from_id(id: &str) -> Option<MaterialKind> {
        MaterialKind::ALL.into_iter().find(|m| m.id() == id)
    }
}

/// The active configuration driving the preview.
///
/// `color` is `None` when unset; an empty string is treated the same way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub shape: String,
    pub material: String,
    pub color: Option<String>,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            shape: DEFAULT_SHAPE.to_string(),
            material: DEFAULT_MATERIAL.to_string(),
            color: Some(DEFAULT_COLOR.to_string()),
            metalness: DEFAULT_METALNESS,
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

impl Configuration {
    /// Returns a copy with every field present in `update` overwritten.
    pub fn merged(&self, update: &ConfigUpdate) -> Configuration {
        let mut next = self.clone();
        if let Some(shape) = &update.shape {
            next.shape = shape.clone();
        }
        if let Some(material) = &update.material {
            next.material = material.clone();
        }
        if let Some(color) = &update.color {
            next.color = Some(color.clone());
        }
        if let Some(metalness) = update.metalness {
            next.metalness = metalness;
        }
        if let Some(roughness) = update.roughness {
            next.roughness = roughness;
        }
        next
    }

    /// The configured color, or `None` when unset or empty.
    pub fn color_hex(&self) -> Option<&str> {
        self.color.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_standard_material(&self) -> bool {
        self.material == MaterialKind::Standard.id()
    }
}

/// A partial configuration; absent fields are left untouched by a merge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub shape: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub metalness: Option<f32>,
    pub roughness: Option<f32>,
}

impl ConfigUpdate {
    pub fn shape(id: impl Into<String>) -> Self {
        Self {
            shape: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn material(id: impl Into<String>) -> Self {
        Self {
            material: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn color(hex: impl Into<String>) -> Self {
        Self {
            color: Some(hex.into()),
            ..Default::default()
        }
    }

    pub fn metalness(value: f32) -> Self {
        Self {
            metalness: Some(value),
            ..Default::default()
        }
    }

    pub fn roughness(value: f32) -> Self {
        Self {
            roughness: Some(value),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_none()
            && self.material.is_none()
            && self.color.is_none()
            && self.metalness.is_none()
            && self.roughness.is_none()
    }
}

/// Owner of the current configuration.
///
/// `revision` increases whenever an update changes the record, which is how the
/// frame loop and the panel learn that they need to re-derive their output.
#[derive(Clone, Debug, Default)]
pub struct ConfigState {
    current: Configuration,
    revision: u64,
}

impl ConfigState {
    pub fn new(initial: Configuration) -> Self {
        Self {
            current: initial,
            revision: 0,
        }
    }

    pub fn current(&self) -> &Configuration {
        &self.current
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Shallow-merges `update` into the current record. Never fails.
    pub fn update_configuration(&mut self, update: &ConfigUpdate) -> &Configuration {
        let next = self.current.merged(update);
        if next != self.current {
            self.current = next;
            self.revision += 1;
        }
        &self.current
    }
}
