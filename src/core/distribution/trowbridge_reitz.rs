use super::microfacet::*;
use crate::core::pbrt::*;

/// GGX slopes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrowbridgeReitzSlope {}

impl TrowbridgeReitzSlope {
    pub fn new() -> Self {
        TrowbridgeReitzSlope {}
    }
}

impl MicrosurfaceSlope for TrowbridgeReitzSlope {
    fn p22(&self, slope_x: Float, slope_y: Float, alpha_x: Float, alpha_y: Float) -> Float {
        let x = slope_x / alpha_x;
        let y = slope_y / alpha_y;
        let tmp = 1.0 + x * x + y * y;
        return 1.0 / (PI * alpha_x * alpha_y) / (tmp * tmp);
    }

    fn lambda(&self, wi: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float {
        if wi.z > NORMAL_INCIDENCE_COS {
            return 0.0;
        }
        if wi.z < -NORMAL_INCIDENCE_COS {
            return -1.0;
        }

        // a = cot(theta_i) / alpha_i
        let alpha_i = self.alpha_i(wi, alpha_x, alpha_y);
        let a = wi.z / (sin_theta(wi) * alpha_i);
        return 0.5 * (-1.0 + sign(a) * Float::sqrt(1.0 + 1.0 / (a * a)));
    }

    fn projected_area(&self, wi: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float {
        if wi.z > NORMAL_INCIDENCE_COS {
            return 1.0;
        }
        if wi.z < -NORMAL_INCIDENCE_COS {
            return 0.0;
        }

        let alpha_i = self.alpha_i(wi, alpha_x, alpha_y);
        let sin_theta_i = sin_theta(wi);
        return 0.5
            * (wi.z + Float::sqrt(wi.z * wi.z + sin_theta_i * sin_theta_i * alpha_i * alpha_i));
    }

    fn sample_p22_11(&self, theta_i: Float, u: Float, u_2: Float) -> Vector2f {
        /* Special case (normal incidence) */
        if theta_i < NORMAL_INCIDENCE_THETA {
            let r = Float::sqrt(u / (1.0 - u));
            let phi = 2.0 * PI * u_2;
            return Vector2f::new(r * Float::cos(phi), r * Float::sin(phi));
        }

        let sin_theta_i = Float::sin(theta_i);
        let cos_theta_i = Float::cos(theta_i);
        let tan_theta_i = sin_theta_i / cos_theta_i;

        // projected area
        let projected_area = 0.5 * (cos_theta_i + 1.0);
        if projected_area < 0.0001 || projected_area.is_nan() {
            return Vector2f::zero();
        }
        let c = 1.0 / projected_area;

        /* sample slope_x */
        let a = 2.0 * u / cos_theta_i / c - 1.0;
        let tmp = 1.0 / (a * a - 1.0);
        let tmp = if tmp.is_infinite() { -1e7 } else { tmp };
        let b = tan_theta_i;
        let d = Float::sqrt(Float::max(b * b * tmp * tmp - (a * a - b * b) * tmp, 0.0));
        let slope_x_1 = b * tmp - d;
        let slope_x_2 = b * tmp + d;
        let slope_x = if a < 0.0 || slope_x_2 > 1.0 / tan_theta_i {
            slope_x_1
        } else {
            slope_x_2
        };

        /* sample slope_y */
        let (s, u_2) = if u_2 > 0.5 {
            (1.0, 2.0 * (u_2 - 0.5))
        } else {
            (-1.0, 2.0 * (0.5 - u_2))
        };
        let z = (u_2 * (u_2 * (u_2 * 0.27385 - 0.73369) + 0.46341))
            / (u_2 * (u_2 * (u_2 * 0.093073 + 0.309420) - 1.000000) + 0.597999);
        let slope_y = s * z * Float::sqrt(1.0 + slope_x * slope_x);

        return Vector2f::new(slope_x, slope_y);
    }

    fn get_type(&self) -> SlopeDistributionType {
        SlopeDistributionType::Ggx
    }
}
