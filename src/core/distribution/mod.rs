pub mod beckmann;
pub mod height;
pub mod microfacet;
pub mod trowbridge_reitz;

pub use beckmann::*;
pub use height::*;
pub use microfacet::*;
pub use trowbridge_reitz::*;
