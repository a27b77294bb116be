//! Centralized constants used across the engine.
//!
//! Placement tuning values here are the defaults for [`crate::config::PlacementSettings`];
//! the config file can override them at runtime.

/// Default window width in pixels for the desktop simulator
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels for the desktop simulator
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// NDC depth used when unprojecting a screen point to build a ray (far-plane proxy)
pub const RAY_UNPROJECT_DEPTH: f32 = 1.0;

/// Full opening angle of the feature point search cone, in degrees
pub const FEATURE_CONE_ANGLE_DEGREES: f32 = 18.0;

/// Closest a feature point's foot on the ray may be to the ray origin (meters)
pub const FEATURE_MIN_DISTANCE: f32 = 0.2;

/// Farthest a feature point's foot on the ray may be from the ray origin (meters)
pub const FEATURE_MAX_DISTANCE: f32 = 2.0;

/// Number of cone search results kept by placement resolution
pub const FEATURE_MAX_RESULTS: usize = 1;

/// A ray whose normalized Y component is above this value is "facing the horizon"
/// and never intersects the infinite horizontal plane.
pub const HORIZON_RAY_THRESHOLD: f32 = -0.03;

/// Height of the box used for a procedural plane shape (meters)
pub const PLANE_SHAPE_HEIGHT: f32 = 0.1;

/// Half-extent assumed for a loaded model until the renderer reports real bounds (meters)
pub const DEFAULT_MODEL_HALF_EXTENT: f32 = 0.1;

/// File extensions accepted for external model assets
pub const SUPPORTED_MODEL_EXTENSIONS: &[&str] = &["glb", "gltf", "obj", "usdz", "scn"];
