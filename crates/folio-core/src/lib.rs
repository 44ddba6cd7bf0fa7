pub mod constants;
pub mod easing;
pub mod error;
pub mod frame;
pub mod input;
pub mod page;
pub mod particles;
pub mod scene;
pub mod scroll;
pub mod state;
pub mod timeline;
pub mod trigger;
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use easing::Ease;
pub use error::MotionError;
pub use frame::{FieldRenderer, FrameDriver, MotionConfig, MotionState};
pub use input::*;
pub use page::{PageHandles, PageTargets, SkillCard, SplitText};
pub use particles::*;
pub use scene::*;
pub use scroll::*;
pub use state::*;
pub use timeline::*;
pub use trigger::*;
