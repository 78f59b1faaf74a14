pub mod fresnel;
pub mod functions;

pub use fresnel::*;
pub use functions::*;
