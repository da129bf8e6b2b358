/// Scene, camera and interaction tuning constants.
///
/// These constants express intended behavior (durations, clamp limits,
/// framing) and keep magic numbers out of the code.
use glam::Vec3;

// Camera
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(0.0, 1.6, 3.0);
pub const CAMERA_START_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Focus tween
pub const FOCUS_STANDOFF: f32 = 1.5; // distance kept from the target
pub const FOCUS_LIFT: f32 = 0.2; // vertical offset added to the end position
pub const FOCUS_FOV_DEG: f32 = 45.0; // narrower than the start fov -> dolly zoom
pub const FOCUS_DURATION_MS: f64 = 1000.0;
// Approach direction used when camera and target coincide
pub const FALLBACK_APPROACH_DIR: Vec3 = Vec3::Z;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;
pub const ORBIT_MIN_POLAR: f32 = 0.0;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2; // never below the floor
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly scale per wheel notch

// Pointer: presses that travel further than this are drags, not clicks
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0;

// Timers (milliseconds)
pub const HIGHLIGHT_RESET_MS: f64 = 2000.0;
pub const INFO_AUTO_HIDE_MS: f64 = 5000.0;
pub const MAGAZINE_OPEN_DELAY_MS: f64 = 800.0;

// Highlight emissive values (linear rgb)
pub const HIGHLIGHT_FLASH: [f32; 3] = [0.2, 0.2, 0.2]; // 0x333333
pub const HIGHLIGHT_NEUTRAL: [f32; 3] = [0.0, 0.0, 0.0];

// Models
pub const TV_MODEL_SCALE: f32 = 0.5;
pub const TV_DEFAULT_COLOR: [f32; 3] = [0.2, 0.2, 0.2]; // 0x333333
pub const PLACEHOLDER_HEIGHT_OFFSET: f32 = 0.5;
pub const FLOOR_SIZE: f32 = 10.0;
pub const FLOOR_COLOR: [f32; 3] = [0.933, 0.933, 0.933]; // 0xeeeeee

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const SUN_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const SUN_INTENSITY: f32 = 1.0;

// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const INFO_PANEL_ID: &str = "info";
pub const MAGAZINE_MODAL_ID: &str = "magazine-modal";
pub const MAGAZINE_CLOSE_ID: &str = "close-magazine";
