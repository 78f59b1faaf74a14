pub mod conductor;
pub mod create_material;
pub mod dielectric;
pub mod diffuse;

pub use conductor::*;
pub use create_material::*;
pub use dielectric::*;
pub use diffuse::*;
