pub mod base;
pub mod distribution;
pub mod error;
pub mod geometry;
pub mod microsurface;
pub mod misc;
pub mod options;
pub mod pbrt;
pub mod reflection;
pub mod rng;
pub mod sampling;
