use crate::core::geometry::*;

pub use crate::core::base::Float;

pub type Vector2f = Vector2<Float>;
pub type Point2f = Vector2<Float>;

pub type Vector3f = Vector3<Float>;
