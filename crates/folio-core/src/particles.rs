//! Particle field: a fixed point cloud whose motion is computed on the GPU.
//!
//! Per-particle attributes are generated once and never change. Each frame
//! only the uniforms move (elapsed time and the smoothed pointer). `displace`
//! mirrors the vertex stage of `shaders/particles.wgsl` so the field's
//! behaviour can be checked on the host.

use crate::constants::{
    DRIFT_X_AMPLITUDE, DRIFT_Y_AMPLITUDE, FIELD_HALF_EXTENTS, PARTICLE_COUNT, PARTICLE_PALETTE,
    PARTICLE_SIZE_MAX, PARTICLE_SIZE_MIN, POINTER_SCALE, POINT_SIZE_SCALE, REPEL_RADIUS,
    REPEL_STRENGTH, ROTATION_RATE_X, ROTATION_RATE_Y, SPRITE_ALPHA,
};
use crate::error::MotionError;
use crate::state::{Camera, Viewport};
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// Per-instance vertex attributes (slot 1 of the particle pipeline).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

/// Uniform block shared by the vertex and fragment stages.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FieldUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub pointer: [f32; 2],
    pub time: f32,
    pub pixel_ratio: f32,
    pub resolution: [f32; 2],
    pub point_scale: f32,
    pub alpha: f32,
}

#[derive(Clone, Debug)]
pub struct ParticleConfig {
    pub count: usize,
    pub half_extents: Vec3,
    pub palette: Vec<[f32; 3]>,
    pub size_min: f32,
    pub size_max: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            half_extents: FIELD_HALF_EXTENTS,
            palette: PARTICLE_PALETTE.to_vec(),
            size_min: PARTICLE_SIZE_MIN,
            size_max: PARTICLE_SIZE_MAX,
        }
    }
}

pub struct ParticleField {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    sizes: Vec<f32>,
    time: f32,
    pointer: Vec2,
    enabled: bool,
}

impl ParticleField {
    /// Scatter `count` points uniformly inside `±half_extents`, each with a
    /// palette colour and a size in `[PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX)`.
    pub fn init<R: Rng>(
        count: usize,
        half_extents: Vec3,
        palette: &[[f32; 3]],
        rng: &mut R,
    ) -> Self {
        Self::generate(
            count,
            half_extents,
            palette,
            PARTICLE_SIZE_MIN,
            PARTICLE_SIZE_MAX,
            rng,
        )
    }

    pub fn from_config<R: Rng>(config: &ParticleConfig, rng: &mut R) -> Self {
        Self::generate(
            config.count,
            config.half_extents,
            &config.palette,
            config.size_min,
            config.size_max,
            rng,
        )
    }

    fn generate<R: Rng>(
        count: usize,
        half_extents: Vec3,
        palette: &[[f32; 3]],
        size_min: f32,
        size_max: f32,
        rng: &mut R,
    ) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        let span = half_extents * 2.0;
        for _ in 0..count {
            positions.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * span.x,
                (rng.gen::<f32>() - 0.5) * span.y,
                (rng.gen::<f32>() - 0.5) * span.z,
            ));
            let color = if palette.is_empty() {
                [1.0, 1.0, 1.0]
            } else {
                palette[rng.gen_range(0..palette.len())]
            };
            colors.push(color);
            sizes.push(size_min + rng.gen::<f32>() * (size_max - size_min));
        }
        log::info!("[particles] initialized {} points", count);
        Self {
            positions,
            colors,
            sizes,
            time: 0.0,
            pointer: Vec2::ZERO,
            enabled: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stop drawing the field; everything else keeps running.
    pub fn disable(&mut self, reason: &MotionError) {
        if self.enabled {
            log::error!("[particles] disabled: {}", reason);
        }
        self.enabled = false;
    }

    /// Update the per-frame uniforms. Time never runs backwards.
    pub fn tick(&mut self, elapsed_sec: f32, pointer_smoothed: Vec2) {
        if elapsed_sec.is_finite() {
            self.time = self.time.max(elapsed_sec);
        }
        if pointer_smoothed.is_finite() {
            self.pointer = pointer_smoothed;
        }
    }

    /// Slow ambient rotation about x and y.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.time * ROTATION_RATE_X)
            * Mat4::from_rotation_y(self.time * ROTATION_RATE_Y)
    }

    /// Object-space position of particle `i` after displacement.
    pub fn displaced(&self, i: usize) -> Option<Vec3> {
        self.positions
            .get(i)
            .map(|p| displace(*p, self.time, self.pointer))
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.positions
            .iter()
            .zip(&self.colors)
            .zip(&self.sizes)
            .map(|((p, c), s)| ParticleInstance {
                position: p.to_array(),
                color: *c,
                size: *s,
            })
            .collect()
    }

    pub fn uniforms(&self, camera: &Camera, viewport: &Viewport) -> FieldUniforms {
        let (w, h) = viewport.physical_size();
        FieldUniforms {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: self.model_matrix().to_cols_array_2d(),
            pointer: self.pointer.to_array(),
            time: self.time,
            pixel_ratio: viewport.pixel_ratio,
            resolution: [w as f32, h as f32],
            point_scale: POINT_SIZE_SCALE,
            alpha: SPRITE_ALPHA,
        }
    }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Repulsion strength: 1 at the pointer, 0 at `REPEL_RADIUS` and beyond.
#[inline]
pub fn repulsion(dist: f32) -> f32 {
    1.0 - smoothstep(0.0, REPEL_RADIUS, dist)
}

/// Vertex-stage displacement: push away from the pointer, then drift.
pub fn displace(position: Vec3, time: f32, pointer: Vec2) -> Vec3 {
    let mut pos = position;
    let anchor = pointer * Vec2::from(POINTER_SCALE);
    let xy = Vec2::new(pos.x, pos.y);
    let strength = repulsion(xy.distance(anchor));
    let dir = (xy - anchor + Vec2::splat(0.001)).normalize_or_zero();
    let pushed = xy + dir * strength * REPEL_STRENGTH;
    pos.x = pushed.x;
    pos.y = pushed.y;
    pos.y += (time * 0.3 + pos.x * 0.4).sin() * DRIFT_Y_AMPLITUDE;
    pos.x += (time * 0.2 + pos.z * 0.3).cos() * DRIFT_X_AMPLITUDE;
    pos
}

/// Sprite diameter in physical pixels for a point at view-space depth `view_z`.
#[inline]
pub fn point_size_px(size: f32, pixel_ratio: f32, view_z: f32) -> f32 {
    size * pixel_ratio * (POINT_SIZE_SCALE / (-view_z).max(1e-3))
}

/// Fragment alpha at distance `d` from the sprite centre (sprite radius 0.5).
#[inline]
pub fn sprite_alpha(d: f32) -> Option<f32> {
    if d > 0.5 {
        return None;
    }
    Some((1.0 - smoothstep(0.2, 0.5, d)) * SPRITE_ALPHA)
}
