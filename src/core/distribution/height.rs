use crate::core::pbrt::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Marginal distribution of microsurface heights.
pub trait MicrosurfaceHeight: Send + Sync {
    /// Height density.
    fn p1(&self, h: Float) -> Float;
    /// Height CDF.
    fn c1(&self, h: Float) -> Float;
    /// Generalized inverse of the height CDF, for `u` in [0, 1).
    fn inv_c1(&self, u: Float) -> Float;

    fn get_type(&self) -> HeightDistributionType;
}

/// Uniform heights on [-1, 1].
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformHeight {}

impl UniformHeight {
    pub fn new() -> Self {
        UniformHeight {}
    }
}

impl MicrosurfaceHeight for UniformHeight {
    fn p1(&self, h: Float) -> Float {
        return if (-1.0..=1.0).contains(&h) { 0.5 } else { 0.0 };
    }

    fn c1(&self, h: Float) -> Float {
        return Float::clamp(0.5 * (h + 1.0), 0.0, 1.0);
    }

    fn inv_c1(&self, u: Float) -> Float {
        return Float::clamp(2.0 * u - 1.0, -1.0, 1.0);
    }

    fn get_type(&self) -> HeightDistributionType {
        HeightDistributionType::Uniform
    }
}

/// Standard normal heights N(0, 1).
#[derive(Debug, Default, Clone, Copy)]
pub struct GaussianHeight {}

impl GaussianHeight {
    pub fn new() -> Self {
        GaussianHeight {}
    }
}

impl MicrosurfaceHeight for GaussianHeight {
    fn p1(&self, h: Float) -> Float {
        return INV_SQRT_2_PI * Float::exp(-0.5 * h * h);
    }

    fn c1(&self, h: Float) -> Float {
        return 0.5 + 0.5 * erf(INV_SQRT_2 * h);
    }

    fn inv_c1(&self, u: Float) -> Float {
        return SQRT_2 * erf_inv(2.0 * u - 1.0);
    }

    fn get_type(&self) -> HeightDistributionType {
        HeightDistributionType::Gaussian
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightDistributionType {
    Uniform,
    #[default]
    Gaussian,
}

impl FromStr for HeightDistributionType {
    type Err = MicrosurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(HeightDistributionType::Uniform),
            "gaussian" | "normal" => Ok(HeightDistributionType::Gaussian),
            _ => Err(MicrosurfaceError::unknown_name("Height distribution", s)),
        }
    }
}

impl std::fmt::Display for HeightDistributionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeightDistributionType::Uniform => write!(f, "uniform"),
            HeightDistributionType::Gaussian => write!(f, "gaussian"),
        }
    }
}

pub fn create_height_distribution(t: HeightDistributionType) -> Arc<dyn MicrosurfaceHeight> {
    match t {
        HeightDistributionType::Uniform => Arc::new(UniformHeight::new()),
        HeightDistributionType::Gaussian => Arc::new(GaussianHeight::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_equal(a: Float, b: Float, e: Float) -> bool {
        (a - b).abs() < e
    }

    #[test]
    fn test_001() {
        let h = UniformHeight::new();
        assert_eq!(h.p1(0.3), 0.5);
        assert_eq!(h.p1(1.5), 0.0);
        assert_eq!(h.c1(-3.0), 0.0);
        assert_eq!(h.c1(3.0), 1.0);
        assert_eq!(h.c1(0.0), 0.5);
        assert_eq!(h.inv_c1(0.75), 0.5);
    }

    #[test]
    fn test_002() {
        let h = GaussianHeight::new();
        assert!(near_equal(h.p1(0.0), 0.39894228, 1e-6));
        assert!(near_equal(h.c1(0.0), 0.5, 1e-6));
        assert!(near_equal(h.c1(1.0), 0.8413447, 1e-5));
        assert!(near_equal(h.inv_c1(0.975), 1.959964, 1e-3));
        // Start height of a random walk sits above almost all of the surface.
        assert!(h.c1(1.0 + h.inv_c1(0.999)) > 0.9999);
    }

    #[test]
    fn test_003() {
        assert_eq!(
            "Uniform".parse::<HeightDistributionType>(),
            Ok(HeightDistributionType::Uniform)
        );
        assert!("box".parse::<HeightDistributionType>().is_err());
        assert_eq!(
            create_height_distribution(HeightDistributionType::Gaussian).get_type(),
            HeightDistributionType::Gaussian
        );
    }
}
