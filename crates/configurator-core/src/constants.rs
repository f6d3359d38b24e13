// Shared defaults and scene recipe constants used by the core and the web frontend.

// Initial configuration
pub const DEFAULT_SHAPE: &str = "sphere";
pub const DEFAULT_MATERIAL: &str = "standard";
pub const DEFAULT_COLOR: &str = "#ff6600";
pub const DEFAULT_METALNESS: f32 = 0.6;
pub const DEFAULT_ROUGHNESS: f32 = 0.4;

// Color the panel writes on mount when none is set, and the material default
pub const PANEL_DEFAULT_COLOR: &str = "#ffffff";
pub const WHITE_RGB: [f32; 3] = [1.0, 1.0, 1.0];

// Scene
pub const BACKGROUND_COLOR: &str = "#15151a";
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const SCENE_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 5.0]; // outer scene key light
pub const MESH_LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 5.0]; // composer's shadow-casting light
pub const DIRECTIONAL_INTENSITY: f32 = 1.0;

// Mesh motion
pub const AUTO_ROTATE_RAD_PER_SEC: f32 = 0.5; // around +Y
pub const SPRING_MASS: f32 = 1.0;
pub const SPRING_TENSION: f32 = 170.0;
pub const SPRING_FRICTION: f32 = 26.0;
pub const SPRING_PRECISION: f32 = 0.001;

// Texture sampling
pub const TEXTURE_ANISOTROPY: u16 = 16;

// Panel sliders
pub const SLIDER_MIN: f32 = 0.0;
pub const SLIDER_MAX: f32 = 1.0;
pub const SLIDER_STEP: f32 = 0.1;

// Camera
pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 5.0];
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6;
