use glam::Vec3;

// Shared motion/visual tuning constants used by the core and the web frontend.

// Smooth scroll
pub const SCROLL_DURATION_SEC: f64 = 1.4; // wheel/touch/keyboard smoothing window
pub const SCROLL_TO_DURATION_SEC: f64 = 1.8; // programmatic scroll-to (anchor links)
pub const SCROLL_TO_OFFSET_PX: f64 = -80.0; // keeps anchored sections clear of the nav
pub const SCROLL_SETTLE_EPSILON_PX: f64 = 0.01;
pub const KEY_LINE_STEP_PX: f64 = 40.0; // arrow keys
pub const KEY_PAGE_FRACTION: f64 = 0.9; // page up/down and space, fraction of viewport

// Pointer and cursor smoothing (per-frame low-pass factors)
pub const POINTER_SMOOTHING: f32 = 0.05;
pub const CURSOR_FOLLOW_SMOOTHING: f32 = 0.1;
pub const MAGNETIC_STRENGTH: f32 = 0.35;

// Particle field
pub const PARTICLE_COUNT: usize = 3000;
pub const FIELD_HALF_EXTENTS: Vec3 = Vec3::new(9.0, 6.0, 4.0); // ±x, ±y, ±z box
pub const PARTICLE_SIZE_MIN: f32 = 0.5;
pub const PARTICLE_SIZE_MAX: f32 = 3.0;

// Default palette (#7c3aed, #06b6d4, #a78bfa, #38bdf8, #ffffff)
pub const PARTICLE_PALETTE: [[f32; 3]; 5] = [
    [0.486, 0.227, 0.929],
    [0.024, 0.714, 0.831],
    [0.655, 0.545, 0.980],
    [0.220, 0.741, 0.973],
    [1.0, 1.0, 1.0],
];

// Repulsion field (mirrored in shaders/particles.wgsl)
pub const POINTER_SCALE: [f32; 2] = [9.0, 6.0]; // NDC pointer -> field units
pub const REPEL_RADIUS: f32 = 2.5;
pub const REPEL_STRENGTH: f32 = 0.8;
pub const DRIFT_Y_AMPLITUDE: f32 = 0.08;
pub const DRIFT_X_AMPLITUDE: f32 = 0.05;

// Ambient field rotation (radians per second)
pub const ROTATION_RATE_X: f32 = 0.015;
pub const ROTATION_RATE_Y: f32 = 0.04;

// Sprite sizing
pub const POINT_SIZE_SCALE: f32 = 280.0; // perspective attenuation numerator
pub const SPRITE_ALPHA: f32 = 0.75;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
