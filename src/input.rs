use configurator_core::is_click;
use glam::Vec2;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Primary button orbits, secondary pans; a modifier turns the primary into pan.
/// The middle button is reserved for dolly, which stays off with zoom.
#[inline]
pub fn drag_mode_for(button: i16, shift: bool, ctrl: bool, meta: bool) -> Option<DragMode> {
    match button {
        0 if shift || ctrl || meta => Some(DragMode::Pan),
        0 => Some(DragMode::Rotate),
        2 => Some(DragMode::Pan),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub active: Option<DragMode>,
    pub pointer_id: i32,
    pub button: i16,
    pub down_at: Vec2,
    pub last: Vec2,
}

/// How a press ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    pub mode: DragMode,
    pub button: i16,
    pub down_at: Vec2,
    pub up_at: Vec2,
}

impl Release {
    /// A primary-button press that barely moved, whatever the modifiers.
    pub fn is_primary_click(&self) -> bool {
        self.button == 0 && is_click(self.down_at, self.up_at)
    }
}

impl PointerState {
    pub fn begin(&mut self, pointer_id: i32, button: i16, pos: Vec2, mode: DragMode) {
        self.active = Some(mode);
        self.pointer_id = pointer_id;
        self.button = button;
        self.down_at = pos;
        self.last = pos;
    }

    /// Movement since the previous sample while a drag is active.
    pub fn move_to(&mut self, pointer_id: i32, pos: Vec2) -> Option<(DragMode, Vec2)> {
        let mode = self.active?;
        if pointer_id != self.pointer_id {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some((mode, delta))
    }

    pub fn end(&mut self, pointer_id: i32, pos: Vec2) -> Option<Release> {
        if pointer_id != self.pointer_id {
            return None;
        }
        let mode = self.active.take()?;
        Some(Release {
            mode,
            button: self.button,
            down_at: self.down_at,
            up_at: pos,
        })
    }
}

// ---------------- Pointer helpers ----------------
/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

#[inline]
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}
