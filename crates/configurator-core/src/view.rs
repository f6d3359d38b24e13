//! UI-only state kept apart from [`Configuration`](crate::Configuration).

use std::f32::consts::TAU;

use crate::constants::AUTO_ROTATE_RAD_PER_SEC;
use crate::panel::PanelState;
use crate::spring::{Spring, SpringConfig};

/// Auto-rotation state of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationMode {
    Rotating,
    Paused,
}

/// Per-mesh state owned by the scene: rotation, the click-to-pause toggle and
/// the scale spring. Survives configuration changes.
#[derive(Clone, Debug)]
pub struct MeshView {
    mode: RotationMode,
    rotation_y: f32,
    scale: Spring,
}

impl Default for MeshView {
    fn default() -> Self {
        Self {
            mode: RotationMode::Rotating,
            rotation_y: 0.0,
            scale: Spring::new(1.0, SpringConfig::default()),
        }
    }
}

impl MeshView {
    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    pub fn auto_rotate(&self) -> bool {
        self.mode == RotationMode::Rotating
    }

    pub fn toggle_auto_rotate(&mut self) -> RotationMode {
        self.mode = match self.mode {
            RotationMode::Rotating => RotationMode::Paused,
            RotationMode::Paused => RotationMode::Rotating,
        };
        log::info!("[mesh] auto-rotate {:?}", self.mode);
        self.mode
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Per-frame update: spin while rotating and ease the scale toward
    /// `target_scale`.
    pub fn advance(&mut self, dt_sec: f32, target_scale: f32) {
        let dt = dt_sec.max(0.0);
        if self.auto_rotate() {
            self.rotation_y = (self.rotation_y + dt * AUTO_ROTATE_RAD_PER_SEC) % TAU;
        }
        if self.scale.target() != target_scale {
            self.scale.set_target(target_scale);
        }
        self.scale.step(dt);
    }
}

/// All view-local state handed to the frame and panel passes.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub mesh: MeshView,
    pub panel: PanelState,
}
