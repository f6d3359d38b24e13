//! Control panel model: local open/expand state, the actions a user can take,
//! and a render-ready view of the panel for the current configuration.
//!
//! Actions translate into [`ConfigUpdate`]s; the panel itself never writes the
//! configuration except through that path.

use smallvec::SmallVec;

use crate::config::{ConfigUpdate, Configuration, MaterialKind, Shape};
use crate::constants::{PANEL_DEFAULT_COLOR, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP};
use crate::registry::swatch_image;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Shape,
    Material,
    Color,
    Properties,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Shape,
        Section::Material,
        Section::Color,
        Section::Properties,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Shape => "shape",
            Section::Material => "material",
            Section::Color => "color",
            Section::Properties => "properties",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Shape => "Shape",
            Section::Material => "Material",
            Section::Color => "Color",
            Section::Properties => "Material Properties",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPreset {
    pub hex: &'static str,
    pub name: &'static str,
}

pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset { hex: "#ffffff", name: "White" },
    ColorPreset { hex: "#3498db", name: "Blue" },
    ColorPreset { hex: "#2ecc71", name: "Green" },
    ColorPreset { hex: "#e74c3c", name: "Red" },
    ColorPreset { hex: "#9b59b6", name: "Purple" },
    ColorPreset { hex: "#f1c40f", name: "Yellow" },
];

#[derive(Clone, Debug, PartialEq)]
pub enum PanelAction {
    ToggleOpen,
    ToggleSection(Section),
    SelectShape(String),
    SelectMaterial(String),
    SelectColor(String),
    CustomColor(String),
    SetMetalness(f32),
    SetRoughness(f32),
}

impl PanelAction {
    /// Decodes an action name and its value as carried on panel elements.
    pub fn decode(action: &str, value: Option<&str>) -> Option<PanelAction> {
        let slider = |v: Option<&str>| v.and_then(|s| s.trim().parse::<f32>().ok());
        Some(match action {
            "toggle-panel" => PanelAction::ToggleOpen,
            "toggle-section" => PanelAction::ToggleSection(Section::from_id(value?)?),
            "shape" => PanelAction::SelectShape(value?.to_string()),
            "material" => PanelAction::SelectMaterial(value?.to_string()),
            "color" => PanelAction::SelectColor(value?.to_string()),
            "custom-color" => PanelAction::CustomColor(value?.to_string()),
            "metalness" => PanelAction::SetMetalness(slider(value)?),
            "roughness" => PanelAction::SetRoughness(slider(value)?),
            _ => return None,
        })
    }
}

/// Keys that press a focused `role="button"` control.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

/// Clamps to the slider range and snaps to its step.
pub fn quantize_slider(raw: f32) -> f32 {
    if !raw.is_finite() {
        return SLIDER_MIN;
    }
    // divide by the step count per unit so 0.1 steps land on the nearest f32 decimals
    let per_unit = (1.0 / SLIDER_STEP).round();
    let steps = ((raw.clamp(SLIDER_MIN, SLIDER_MAX) - SLIDER_MIN) * per_unit).round();
    (SLIDER_MIN + steps / per_unit).clamp(SLIDER_MIN, SLIDER_MAX)
}

pub fn slider_label(value: f32) -> String {
    format!("{:.1}", value)
}

/// Metalness/roughness only apply to the flat standard material.
pub fn properties_visible(config: &Configuration) -> bool {
    config.is_standard_material()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionFlags {
    pub shape: bool,
    pub material: bool,
    pub color: bool,
    pub properties: bool,
}

impl SectionFlags {
    pub fn get(&self, section: Section) -> bool {
        match section {
            Section::Shape => self.shape,
            Section::Material => self.material,
            Section::Color => self.color,
            Section::Properties => self.properties,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut bool {
        match section {
            Section::Shape => &mut self.shape,
            Section::Material => &mut self.material,
            Section::Color => &mut self.color,
            Section::Properties => &mut self.properties,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelState {
    pub open: bool,
    pub sections: SectionFlags,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            open: true,
            sections: SectionFlags::default(),
        }
    }
}

impl PanelState {
    pub fn is_expanded(&self, section: Section) -> bool {
        self.sections.get(section)
    }

    /// Seeds a white color when the configuration has none.
    pub fn on_mount(&self, config: &Configuration) -> Option<ConfigUpdate> {
        match config.color_hex() {
            Some(_) => None,
            None => Some(ConfigUpdate::color(PANEL_DEFAULT_COLOR)),
        }
    }

    /// Applies a user action. Local toggles return `None`; configuration edits
    /// return the partial update to merge, or `None` if it would change nothing.
    pub fn apply(&mut self, action: PanelAction, config: &Configuration) -> Option<ConfigUpdate> {
        match action {
            PanelAction::ToggleOpen => {
                self.open = !self.open;
                None
            }
            PanelAction::ToggleSection(section) => {
                let flag = self.sections.get_mut(section);
                *flag = !*flag;
                None
            }
            PanelAction::SelectShape(id) => {
                log::info!("shape changed to: {}", id);
                Some(ConfigUpdate::shape(id))
            }
            PanelAction::SelectMaterial(id) => {
                log::info!("material changed to: {}", id);
                Some(ConfigUpdate::material(id))
            }
            PanelAction::SelectColor(hex) => {
                log::info!("color preset changed to: {}", hex);
                Some(ConfigUpdate::color(hex))
            }
            PanelAction::CustomColor(hex) => {
                log::info!("custom color changed to: {}", hex);
                Some(ConfigUpdate::color(hex))
            }
            PanelAction::SetMetalness(raw) => {
                let v = quantize_slider(raw);
                (v != config.metalness).then(|| ConfigUpdate::metalness(v))
            }
            PanelAction::SetRoughness(raw) => {
                let v = quantize_slider(raw);
                (v != config.roughness).then(|| ConfigUpdate::roughness(v))
            }
        }
    }

    /// Sections shown for `config`, in display order.
    pub fn visible_sections(&self, config: &Configuration) -> SmallVec<[Section; 4]> {
        Section::ALL
            .into_iter()
            .filter(|s| *s != Section::Properties || properties_visible(config))
            .collect()
    }

    pub fn view(&self, config: &Configuration) -> PanelView {
        let sections = self
            .visible_sections(config)
            .into_iter()
            .map(|section| SectionView {
                section,
                expanded: self.is_expanded(section),
                body: section_body(section, config),
            })
            .collect();
        PanelView {
            open: self.open,
            toggle_label: if self.open { "Close sidebar" } else { "Open sidebar" },
            sections,
        }
    }
}

// ---------------- Render-ready view ----------------

#[derive(Clone, Debug, PartialEq)]
pub struct OptionView {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwatchView {
    pub id: &'static str,
    pub label: &'static str,
    pub image: Option<&'static str>,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderView {
    pub action: &'static str,
    pub label: &'static str,
    pub value: f32,
    pub display: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SectionBody {
    Shapes(Vec<OptionView>),
    Materials(Vec<SwatchView>),
    Colors {
        presets: Vec<SwatchView>,
        custom: String,
    },
    Properties {
        metalness: SliderView,
        roughness: SliderView,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionView {
    pub section: Section,
    pub expanded: bool,
    pub body: SectionBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
    pub open: bool,
    pub toggle_label: &'static str,
    pub sections: Vec<SectionView>,
}

impl PanelView {
    pub fn section(&self, section: Section) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.section == section)
    }
}

fn section_body(section: Section, config: &Configuration) -> SectionBody {
    match section {
        Section::Shape => SectionBody::Shapes(
            Shape::ALL
                .into_iter()
                .map(|s| OptionView {
                    id: s.id(),
                    label: s.label(),
                    active: config.shape == s.id(),
                })
                .collect(),
        ),
        Section::Material => SectionBody::Materials(
            MaterialKind::ALL
                .into_iter()
                .map(|m| SwatchView {
                    id: m.id(),
                    label: m.label(),
                    image: swatch_image(m),
                    active: config.material == m.id(),
                })
                .collect(),
        ),
        Section::Color => SectionBody::Colors {
            presets: COLOR_PRESETS
                .iter()
                .map(|p| SwatchView {
                    id: p.hex,
                    label: p.name,
                    image: None,
                    active: config.color.as_deref() == Some(p.hex),
                })
                .collect(),
            custom: config.color.clone().unwrap_or_default(),
        },
        Section::Properties => SectionBody::Properties {
            metalness: SliderView {
                action: "metalness",
                label: "Metalness",
                value: config.metalness,
                display: slider_label(config.metalness),
            },
            roughness: SliderView {
                action: "roughness",
                label: "Roughness",
                value: config.roughness,
                display: slider_label(config.roughness),
            },
        },
    }
}
