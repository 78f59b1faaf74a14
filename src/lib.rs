pub mod core;
pub mod materials;
