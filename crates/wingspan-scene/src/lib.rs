//! Scene state for the animated curve demos.
//!
//! A [`Scene`] is built once from a [`SceneConfig`], then driven by an
//! [`AnimationClock`]: each tick produces a phase, [`Scene::update`] re-poses
//! the animated control points, and [`Scene::draw`] streams the result into a
//! vertex sink.

pub mod animation;
pub mod config;
pub mod display;
pub mod scene;

pub use animation::{AnimationClock, AnimationPhase, DEFAULT_CYCLE_MS};
pub use config::{AnimationConfig, CurveConfig, MotionConfig, SceneConfig, SphereConfig};
pub use display::DisplayOptions;
pub use scene::{MotionBinding, Scene};
