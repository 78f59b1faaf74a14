use crate::core::pbrt::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scalar parameters of a microsurface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicrosurfaceParams {
    pub material: MaterialKind,
    pub height: HeightDistributionType,
    pub slope: SlopeDistributionType,
    pub alpha_u: Float,
    pub alpha_v: Float,
    pub eta: Float,
    pub max_scattering_order: u32,
}

impl Default for MicrosurfaceParams {
    fn default() -> Self {
        MicrosurfaceParams {
            material: MaterialKind::Dielectric,
            height: HeightDistributionType::Gaussian,
            slope: SlopeDistributionType::Ggx,
            alpha_u: 0.1,
            alpha_v: 0.1,
            eta: 1.5,
            max_scattering_order: DEFAULT_MAX_SCATTERING_ORDER,
        }
    }
}

impl MicrosurfaceParams {
    pub fn new() -> Self {
        MicrosurfaceParams::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self, MicrosurfaceError> {
        let params: MicrosurfaceParams = serde_json::from_str(s)?;
        params.validate()?;
        return Ok(params);
    }

    pub fn from_json_file(path: &Path) -> Result<Self, MicrosurfaceError> {
        let s = std::fs::read_to_string(path)?;
        return Self::from_json_str(&s);
    }

    pub fn validate(&self) -> Result<(), MicrosurfaceError> {
        for (name, alpha) in [("alpha_u", self.alpha_u), ("alpha_v", self.alpha_v)] {
            if !alpha.is_finite() || alpha < 0.0 {
                return Err(MicrosurfaceError::invalid_parameter(
                    name,
                    &format!("roughness must be finite and non-negative, got {}", alpha),
                ));
            }
        }
        if !self.eta.is_finite() || self.eta <= 0.0 {
            return Err(MicrosurfaceError::invalid_parameter(
                "eta",
                &format!("index of refraction must be finite and positive, got {}", self.eta),
            ));
        }
        if self.max_scattering_order == 0 {
            return Err(MicrosurfaceError::invalid_parameter(
                "max_scattering_order",
                "must be at least 1",
            ));
        }
        return Ok(());
    }
}
