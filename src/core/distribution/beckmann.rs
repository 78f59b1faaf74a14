use super::microfacet::*;
use crate::core::pbrt::*;

/// Iteration cap for the visible-slope inversion.
pub const BECKMANN_MAX_ITERATIONS: usize = 64;

#[derive(Debug, Default, Clone, Copy)]
pub struct BeckmannSlope {}

impl BeckmannSlope {
    pub fn new() -> Self {
        BeckmannSlope {}
    }
}

impl MicrosurfaceSlope for BeckmannSlope {
    fn p22(&self, slope_x: Float, slope_y: Float, alpha_x: Float, alpha_y: Float) -> Float {
        let x = slope_x / alpha_x;
        let y = slope_y / alpha_y;
        return INV_PI / (alpha_x * alpha_y) * Float::exp(-x * x - y * y);
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
        return 0.5 * (erf(a) - 1.0) + INV_2_SQRT_PI / a * Float::exp(-a * a);
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
        let a = wi.z / (sin_theta_i * alpha_i);
        return 0.5 * (erf(a) + 1.0) * wi.z
            + INV_2_SQRT_PI * alpha_i * sin_theta_i * Float::exp(-a * a);
    }

    fn sample_p22_11(&self, theta_i: Float, u: Float, u_2: Float) -> Vector2f {
        /* Special case (normal incidence) */
        if theta_i < NORMAL_INCIDENCE_THETA {
            let r = Float::sqrt(-Float::ln(1.0 - u));
            let phi = 2.0 * PI * u_2;
            return Vector2f::new(r * Float::cos(phi), r * Float::sin(phi));
        }

        let sin_theta_i = Float::sin(theta_i);
        let cos_theta_i = Float::cos(theta_i);

        // slope associated to theta_i
        let slope_i = cos_theta_i / sin_theta_i;

        let projected_area = 0.5 * (erf(slope_i) + 1.0) * cos_theta_i
            + INV_2_SQRT_PI * sin_theta_i * Float::exp(-slope_i * slope_i);
        if projected_area < 0.0001 || projected_area.is_nan() {
            return Vector2f::zero();
        }
        let c = 1.0 / projected_area;

        /* Search interval -- everything is parameterized
        in the erf() domain */
        let mut erf_min: Float = -0.9999;
        let mut erf_max = Float::max(erf_min, erf(slope_i));
        let mut erf_current = 0.5 * (erf_min + erf_max);

        let mut iterations = 0;
        while erf_max - erf_min > 0.00001 && iterations < BECKMANN_MAX_ITERATIONS {
            iterations += 1;

            // Falls back to bisection when Newton leaves the bracket or turns NaN.
            if !(erf_current >= erf_min && erf_current <= erf_max) {
                erf_current = 0.5 * (erf_min + erf_max);
            }

            // evaluate slope
            let slope = erf_inv(erf_current);

            // CDF
            let cdf = if slope >= slope_i {
                1.0
            } else {
                c * (INV_2_SQRT_PI * sin_theta_i * Float::exp(-slope * slope)
                    + cos_theta_i * (0.5 + 0.5 * erf(slope)))
            };
            let diff = cdf - u;

            // test estimate
            if Float::abs(diff) < 0.00001 {
                break;
            }

            // update bounds
            if diff > 0.0 {
                if erf_max == erf_current {
                    break;
                }
                erf_max = erf_current;
            } else {
                if erf_min == erf_current {
                    break;
                }
                erf_min = erf_current;
            }

            // Newton step in the erf() domain
            let derivative = 0.5 * c * cos_theta_i - 0.5 * c * sin_theta_i * slope;
            erf_current -= diff / derivative;
        }

        let slope_x = erf_inv(Float::min(erf_max, Float::max(erf_min, erf_current)));
        let slope_y = erf_inv(2.0 * u_2 - 1.0);
        return Vector2f::new(slope_x, slope_y);
    }

    fn get_type(&self) -> SlopeDistributionType {
        SlopeDistributionType::Beckmann
    }
}
