pub mod types;

pub use types::*;

pub use super::base::*;
pub use super::distribution::*;
pub use super::error::*;
pub use super::geometry::*;
pub use super::microsurface::*;
pub use super::misc::*;
pub use super::options::*;
pub use super::reflection::*;
pub use super::rng::*;
pub use super::sampling::*;
