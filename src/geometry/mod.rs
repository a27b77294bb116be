//! Spatial math for screen-to-world queries.
//!
//! - [`CameraPose`] - per-frame camera snapshot with project/unproject
//! - [`Ray`] - screen ray construction and ray/plane intersection
//! - [`FeaturePointMatcher`] - cone and closest-miss searches over feature points
//! - [`BoundingBox`] - ray tests against oriented object bounds

mod bounds;
mod camera;
mod features;
mod ray;

pub use bounds::BoundingBox;
pub use camera::CameraPose;
pub use features::{ConeSearch, FeatureHit, FeaturePointMatcher};
pub use ray::Ray;
