pub mod microsurface_options;

pub use microsurface_options::*;
