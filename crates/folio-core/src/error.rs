use crate::scene::TargetId;
use thiserror::Error;

/// Failure modes of the motion layer.
///
/// None of these are fatal: each one degrades a single visual effect and the
/// rest of the frame pipeline keeps running.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("target {0:?} is not present in the scene")]
    MissingTarget(TargetId),
    #[error("scroll target {requested} outside [0, {max}]")]
    InvalidRange { requested: f64, max: f64 },
    #[error("particle shader failed to compile: {0}")]
    ShaderCompile(String),
    #[error("render surface unavailable: {0}")]
    Surface(String),
}
