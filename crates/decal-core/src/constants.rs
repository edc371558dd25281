// Shared scene and interaction tuning constants used by both web and native frontends.

// Target cone
pub const CONE_RADIUS: f32 = 10.0;
pub const CONE_HEIGHT: f32 = 10.0;
pub const CONE_RADIAL_SEGMENTS: u32 = 32;
pub const CONE_HEIGHT_SEGMENTS: u32 = 100;
pub const CONE_OPEN_ENDED: bool = true;
pub const CONE_THETA_START: f32 = 0.0;
pub const CONE_THETA_LENGTH: f32 = std::f32::consts::TAU;
pub const CONE_WIREFRAME_COLOR: u32 = 0x00ff00;

// Axes gizmo (x, y, z colors)
pub const AXIS_LENGTH: f32 = 100.0;
pub const AXIS_COLORS: [u32; 3] = [0x0000ff, 0x00ff00, 0xff0000];

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 120.0;

// Orbit controls
pub const ORBIT_MIN_DISTANCE: f32 = 50.0;
pub const ORBIT_MAX_DISTANCE: f32 = 200.0;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0; // full turn per viewport height of drag
pub const ORBIT_ZOOM_SPEED: f32 = 0.05; // fractional distance change per wheel step

// Lights
pub const AMBIENT_LIGHT_COLOR: u32 = 0x666666;
pub const KEY_LIGHT_COLOR: u32 = 0xffddcc;
pub const KEY_LIGHT_DIRECTION: [f32; 3] = [1.0, 0.75, 0.5];
pub const FILL_LIGHT_COLOR: u32 = 0xccccff;
pub const FILL_LIGHT_DIRECTION: [f32; 3] = [-1.0, 0.75, -0.5];
pub const DIRECTIONAL_LIGHT_INTENSITY: f32 = 3.0;

// Placement defaults
pub const DEFAULT_MIN_SCALE: f32 = 10.0;
pub const DEFAULT_MAX_SCALE: f32 = 20.0;
pub const DEFAULT_ROTATE: bool = true;

// Panel slider range for min/max scale
pub const PANEL_SCALE_MIN: f32 = 1.0;
pub const PANEL_SCALE_MAX: f32 = 30.0;

// Pointer helper (hidden box that tracks the surface normal) and debug segment
pub const HELPER_BOX_SIZE: [f32; 3] = [1.0, 1.0, 10.0];
pub const HELPER_NORMAL_LENGTH: f32 = 10.0;
pub const DEBUG_LINE_COLOR: u32 = 0xffffff;

// Decal material
pub const DECAL_SPECULAR: u32 = 0x444444;
pub const DECAL_SHININESS: f32 = 30.0;
pub const DECAL_POLYGON_OFFSET_FACTOR: f32 = -4.0;
pub const DECAL_TEXTURE_SIZE: u32 = 256;

// Background
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
