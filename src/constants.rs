/// Front-end wiring and interaction tuning constants.
///
/// Domain defaults (initial configuration, scene recipe, camera) live in the
/// core crate; these cover the DOM and the GPU host only.
// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const PANEL_ROOT_ID: &str = "panel-root";

// Depth buffer
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

// Largest frame delta fed to animation (seconds); longer gaps are clamped
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Texture fetches are relative to the page
pub const TEXTURE_BASE_URL: &str = "/";
