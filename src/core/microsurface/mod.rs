pub mod material;
pub mod surface;

pub use material::*;
pub use surface::*;
