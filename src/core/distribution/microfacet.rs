use super::beckmann::*;
use super::trowbridge_reitz::*;
use crate::core::pbrt::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Slope distribution of an anisotropic microsurface.
///
/// Implementors provide the distribution of slopes for unit roughness plus
/// its Smith `lambda` and projected area; the normal distribution and the
/// visible-normal sampler are derived from those through stretching.
pub trait MicrosurfaceSlope: Send + Sync {
    /// Density of slopes, stretched by `(alpha_x, alpha_y)`.
    fn p22(&self, slope_x: Float, slope_y: Float, alpha_x: Float, alpha_y: Float) -> Float;

    /// Smith lambda for the direction `wi`.
    fn lambda(&self, wi: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float;

    /// Projected area towards `wi` of a unit area of microsurface.
    fn projected_area(&self, wi: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float;

    /// Samples the slopes visible from `theta_i` for unit roughness.
    fn sample_p22_11(&self, theta_i: Float, u1: Float, u2: Float) -> Vector2f;

    fn get_type(&self) -> SlopeDistributionType;

    /// Roughness seen along the azimuth of `wi`.
    fn alpha_i(&self, wi: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float {
        let inv_sin_theta_2 = 1.0 / sin_2_theta(wi);
        let cos_phi_2 = wi.x * wi.x * inv_sin_theta_2;
        let sin_phi_2 = wi.y * wi.y * inv_sin_theta_2;
        return Float::sqrt(cos_phi_2 * alpha_x * alpha_x + sin_phi_2 * alpha_y * alpha_y);
    }

    /// Distribution of normals.
    fn d(&self, wm: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float {
        if wm.z <= 0.0 {
            return 0.0;
        }

        // slope of wm
        let slope_x = -wm.x / wm.z;
        let slope_y = -wm.y / wm.z;

        let cos_2 = wm.z * wm.z;
        return self.p22(slope_x, slope_y, alpha_x, alpha_y) / (cos_2 * cos_2);
    }

    /// Distribution of normals visible from `wi`.
    fn d_wi(&self, wi: &Vector3f, wm: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float {
        if wm.z <= 0.0 {
            return 0.0;
        }

        let projected_area = self.projected_area(wi, alpha_x, alpha_y);
        if projected_area == 0.0 {
            return 0.0;
        }
        let c = 1.0 / projected_area;
        return c * Float::max(0.0, wi.dot(wm)) * self.d(wm, alpha_x, alpha_y);
    }

    /// Samples a normal from `d_wi`.
    fn sample_d_wi(
        &self,
        wi: &Vector3f,
        u1: Float,
        u2: Float,
        alpha_x: Float,
        alpha_y: Float,
    ) -> Vector3f {
        // stretch to match configuration with alpha=1.0
        let wi_11 = Vector3f::new(alpha_x * wi.x, alpha_y * wi.y, wi.z).normalize();

        // sample visible slope with alpha=1.0
        let theta_i = Float::acos(Float::clamp(wi_11.z, -1.0, 1.0));
        let slope_11 = self.sample_p22_11(theta_i, u1, u2);

        // align with view direction
        let phi = Float::atan2(wi_11.y, wi_11.x);
        let slope = slope_11.rotate(Float::cos(phi), Float::sin(phi));

        // stretch back
        let slope = Vector2f::new(alpha_x * slope.x, alpha_y * slope.y);

        if !slope.is_finite() {
            if wi.z > 0.0 {
                return Vector3f::up();
            } else {
                return Vector3f::new(wi.x, wi.y, 0.0).normalize();
            }
        }

        return Vector3f::new(-slope.x, -slope.y, 1.0).normalize();
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlopeDistributionType {
    Beckmann,
    #[default]
    #[serde(alias = "trowbridgereitz")]
    Ggx,
}

impl FromStr for SlopeDistributionType {
    type Err = MicrosurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beckmann" => Ok(SlopeDistributionType::Beckmann),
            "ggx" | "trowbridgereitz" => Ok(SlopeDistributionType::Ggx),
            _ => Err(MicrosurfaceError::unknown_name("Slope distribution", s)),
        }
    }
}

impl std::fmt::Display for SlopeDistributionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlopeDistributionType::Beckmann => write!(f, "beckmann"),
            SlopeDistributionType::Ggx => write!(f, "ggx"),
        }
    }
}

pub fn create_slope_distribution(t: SlopeDistributionType) -> Arc<dyn MicrosurfaceSlope> {
    match t {
        SlopeDistributionType::Beckmann => Arc::new(BeckmannSlope::new()),
        SlopeDistributionType::Ggx => Arc::new(TrowbridgeReitzSlope::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_equal(a: Float, b: Float, e: Float) -> bool {
        (a - b).abs() < e
    }

    fn slopes() -> Vec<Arc<dyn MicrosurfaceSlope>> {
        vec![
            create_slope_distribution(SlopeDistributionType::Beckmann),
            create_slope_distribution(SlopeDistributionType::Ggx),
        ]
    }

    #[test]
    fn test_001() {
        // Stretching keeps the isotropic roughness for any azimuth.
        for slope in slopes() {
            let wi = spherical_direction(0.6, 0.8, 1.1);
            assert!(near_equal(slope.alpha_i(&wi, 0.3, 0.3), 0.3, 1e-5));
            let wx = spherical_direction(0.6, 0.8, 0.0);
            assert!(near_equal(slope.alpha_i(&wx, 0.3, 0.7), 0.3, 1e-5));
            let wy = spherical_direction(0.6, 0.8, PI_OVER_2);
            assert!(near_equal(slope.alpha_i(&wy, 0.3, 0.7), 0.7, 1e-5));
        }
    }

    #[test]
    fn test_002() {
        // Projected area towards the normal is one, and matches (1 + lambda) cos.
        for slope in slopes() {
            let up = Vector3f::up();
            assert!(near_equal(slope.projected_area(&up, 0.5, 0.5), 1.0, 1e-4));
            for i in 1..8 {
                let theta = (i as Float) * 0.18;
                let wi = spherical_direction(theta.sin(), theta.cos(), 0.4);
                let a = slope.projected_area(&wi, 0.4, 0.6);
                let l = slope.lambda(&wi, 0.4, 0.6);
                assert!(near_equal(a, (1.0 + l) * wi.z, 1e-4));
            }
        }
    }

    #[test]
    fn test_003() {
        // Downward directions: lambda(-w) = -1 - lambda(w).
        for slope in slopes() {
            let w = spherical_direction(0.8, 0.6, 0.3);
            let wd = -w;
            let l = slope.lambda(&w, 0.5, 0.5);
            let ld = slope.lambda(&wd, 0.5, 0.5);
            assert!(near_equal(ld, -1.0 - l, 1e-4));
            assert_eq!(slope.lambda(&Vector3f::up(), 0.5, 0.5), 0.0);
            assert_eq!(slope.lambda(&-Vector3f::up(), 0.5, 0.5), -1.0);
        }
    }

    #[test]
    fn test_004() {
        for slope in slopes() {
            assert_eq!(slope.d(&Vector3f::new(0.0, 0.6, -0.8), 0.5, 0.5), 0.0);
            let wi = spherical_direction(0.6, 0.8, 0.0);
            let wm = Vector3f::new(-0.8, 0.0, 0.6);
            assert_eq!(slope.d_wi(&wi, &wm, 0.5, 0.5), 0.0);
        }
    }

    #[test]
    fn test_005() {
        // Sampled visible normals face the viewer and the upper hemisphere.
        let mut rng = RNG::new();
        for slope in slopes() {
            for i in 0..4 {
                let theta = 0.35 * (i as Float);
                let wi = spherical_direction(theta.sin(), theta.cos(), 0.7);
                for _ in 0..500 {
                    let u = rng.uniform_2d();
                    let wm = slope.sample_d_wi(&wi, u.x, u.y, 0.3, 0.8);
                    assert!(near_equal(wm.length(), 1.0, 1e-3));
                    assert!(wm.z >= 0.0);
                    assert!(wi.dot(&wm) >= -1e-3);
                }
            }
        }
    }

    #[test]
    fn test_006() {
        assert_eq!(
            "TrowbridgeReitz".parse::<SlopeDistributionType>(),
            Ok(SlopeDistributionType::Ggx)
        );
        assert_eq!(
            "beckmann".parse::<SlopeDistributionType>(),
            Ok(SlopeDistributionType::Beckmann)
        );
        assert!("phong".parse::<SlopeDistributionType>().is_err());
        let t: SlopeDistributionType = serde_json::from_str("\"ggx\"").unwrap();
        assert_eq!(t, SlopeDistributionType::Ggx);
    }
}
