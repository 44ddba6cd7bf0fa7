//! Visual-side state types shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! feeds them raw input and reads back camera matrices and smoothed pointer
//! positions.

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z, CURSOR_FOLLOW_SMOOTHING, MAX_PIXEL_RATIO,
    POINTER_SMOOTHING,
};
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_viewport(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }
}

/// CSS-pixel viewport plus the device pixel ratio used for the backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: device_pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Backing-store size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            ((self.width * self.pixel_ratio) as u32).max(1),
            ((self.height * self.pixel_ratio) as u32).max(1),
        )
    }
}

/// Pointer in normalized device coordinates, raw and low-pass filtered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub raw: Vec2,
    pub smoothed: Vec2,
}

impl PointerState {
    pub fn set_raw(&mut self, ndc: Vec2) {
        if ndc.is_finite() {
            self.raw = ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        }
    }

    /// One frame of exponential smoothing toward the raw sample.
    pub fn smooth(&mut self) {
        self.smooth_by(POINTER_SMOOTHING);
    }

    pub fn smooth_by(&mut self, factor: f32) {
        self.smoothed += (self.raw - self.smoothed) * factor.clamp(0.0, 1.0);
    }
}

/// Custom cursor: the dot tracks the pointer exactly, the ring trails it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorFollower {
    pub pointer_px: Vec2,
    pub follower_px: Vec2,
}

impl CursorFollower {
    pub fn step(&mut self) {
        self.follower_px += (self.pointer_px - self.follower_px) * CURSOR_FOLLOW_SMOOTHING;
    }
}

/// Map a client-space pointer position to NDC (+y up).
#[inline]
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}
