use crate::core::pbrt::*;

/// Smooth dielectric microfacets that reflect or refract.
#[derive(Debug, Clone)]
pub struct MicrosurfaceDielectric {
    microsurface: Microsurface,
    eta: Float,
}

impl MicrosurfaceDielectric {
    pub fn new(
        height: HeightDistributionType,
        slope: SlopeDistributionType,
        alpha_u: Float,
        alpha_v: Float,
        eta: Float,
    ) -> Self {
        MicrosurfaceDielectric {
            microsurface: Microsurface::new(height, slope, alpha_u, alpha_v),
            eta,
        }
    }

    pub fn from_microsurface(microsurface: Microsurface, eta: Float) -> Self {
        MicrosurfaceDielectric { microsurface, eta }
    }

    pub fn eta(&self) -> Float {
        self.eta
    }

    /// Reflection plus transmission for a direction arriving from outside.
    pub fn eval_phase_function_both(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        return self.eval_reflection(wi, wo, true) + self.eval_transmission(wi, wo, true);
    }

    fn eval_reflection(&self, wi: &Vector3f, wo: &Vector3f, wi_outside: bool) -> Float {
        let eta = if wi_outside { self.eta } else { 1.0 / self.eta };

        // half vector, seen from the side of wi
        let wh = (*wi + *wo).normalize();
        let (wi, wh) = if wi_outside { (*wi, wh) } else { (-*wi, -wh) };

        let cos_theta_h = wi.dot(&wh);
        if cos_theta_h <= 0.0 {
            return 0.0;
        }
        return 0.25 * self.microsurface.d_wi(&wi, &wh) / cos_theta_h
            * fresnel_dielectric(&wi, &wh, eta);
    }

    fn eval_transmission(&self, wi: &Vector3f, wo: &Vector3f, wi_outside: bool) -> Float {
        let eta = if wi_outside { self.eta } else { 1.0 / self.eta };

        let wh = -(*wi + *wo * eta).normalize();
        let wh = if wi_outside {
            wh * sign(wh.z)
        } else {
            wh * -sign(wh.z)
        };

        if wh.dot(wi) < 0.0 {
            return 0.0;
        }

        // mirror the inside configuration to the outside one
        let (wi, wo, wh) = if wi_outside {
            (*wi, *wo, wh)
        } else {
            (-*wi, -*wo, -wh)
        };

        let denom = wi.dot(&wh) + eta * wo.dot(&wh);
        return eta * eta
            * (1.0 - fresnel_dielectric(&wi, &wh, eta))
            * self.microsurface.d_wi(&wi, &wh)
            * Float::max(0.0, -wo.dot(&wh))
            / (denom * denom);
    }
}

impl MicrosurfaceMaterial for MicrosurfaceDielectric {
    fn microsurface(&self) -> &Microsurface {
        &self.microsurface
    }

    fn microsurface_mut(&mut self) -> &mut Microsurface {
        &mut self.microsurface
    }

    fn get_type(&self) -> MaterialKind {
        MaterialKind::Dielectric
    }

    fn is_transmissive(&self) -> bool {
        true
    }

    fn eval_phase_function(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        wi_outside: bool,
        wo_outside: bool,
        _rng: &mut RNG,
    ) -> Float {
        if wi_outside == wo_outside {
            return self.eval_reflection(wi, wo, wi_outside);
        } else {
            return self.eval_transmission(wi, wo, wi_outside);
        }
    }

    fn sample_phase_function(
        &self,
        wi: &Vector3f,
        wi_outside: bool,
        rng: &mut RNG,
    ) -> (Vector3f, bool) {
        let u = rng.uniform_2d();
        let eta = if wi_outside { self.eta } else { 1.0 / self.eta };

        let wm = if wi_outside {
            self.microsurface.sample_d_wi(wi, &u)
        } else {
            -self.microsurface.sample_d_wi(&-*wi, &u)
        };

        let f = fresnel_dielectric(wi, &wm, eta);
        if rng.uniform_float() < f {
            return (reflect(wi, &wm), wi_outside);
        } else {
            return (refract(wi, &wm, eta).normalize(), !wi_outside);
        }
    }

    fn eval_single_scattering(&self, wi: &Vector3f, wo: &Vector3f, _rng: &mut RNG) -> Float {
        if wi.z < 0.0 && wo.z < 0.0 {
            return 0.0;
        }
        let (wi, wo) = if wi.z < 0.0 { (*wo, *wi) } else { (*wi, *wo) };
        if wi.z <= 0.0 || wo.z == 0.0 {
            return 0.0;
        }
        let eta = self.eta;
        let microsurface = &self.microsurface;

        if wo.z > 0.0 {
            // reflection
            let wh = (wi + wo).normalize();
            let d = microsurface.d(&wh);

            let lambda_i = microsurface.lambda(&wi);
            let lambda_o = microsurface.lambda(&wo);
            let g2 = 1.0 / (1.0 + lambda_i + lambda_o);

            let value = fresnel_dielectric(&wi, &wh, eta) * d * g2 / (4.0 * wi.z);
            return if value.is_finite() { value } else { 0.0 };
        } else {
            // refraction
            let wh = -(wi + wo * eta).normalize();
            let wh = if eta < 1.0 { -wh } else { wh };
            let d = microsurface.d(&wh);

            let lambda_i = microsurface.lambda(&wi);
            let lambda_o = microsurface.lambda(&-wo);
            let g2 = beta(1.0 + lambda_i as f64, 1.0 + lambda_o as f64) as Float;

            let denom = wi.dot(&wh) + eta * wo.dot(&wh);
            let value = Float::max(0.0, wi.dot(&wh)) * Float::max(0.0, -wo.dot(&wh)) / wi.z
                * eta
                * eta
                * (1.0 - fresnel_dielectric(&wi, &wh, eta))
                * g2
                * d
                / (denom * denom);
            return if value.is_finite() { value } else { 0.0 };
        }
    }
}

pub fn create_dielectric_material(
    params: &MicrosurfaceParams,
) -> Result<Box<dyn MicrosurfaceMaterial>, MicrosurfaceError> {
    let mut microsurface =
        Microsurface::new(params.height, params.slope, params.alpha_u, params.alpha_v);
    microsurface.set_max_scattering_order(params.max_scattering_order);
    return Ok(Box::new(MicrosurfaceDielectric::from_microsurface(
        microsurface,
        params.eta,
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_equal(a: Float, b: Float, e: Float) -> bool {
        (a - b).abs() < e
    }

    fn glass(alpha: Float) -> MicrosurfaceDielectric {
        MicrosurfaceDielectric::new(
            HeightDistributionType::Gaussian,
            SlopeDistributionType::Ggx,
            alpha,
            alpha,
            1.5,
        )
    }

    #[test]
    fn test_001() {
        // Refraction flips the side, reflection keeps it.
        let m = glass(0.3);
        let mut rng = RNG::new_sequence(2);
        let wi = spherical_direction(0.5, Float::sqrt(0.75), 0.0);
        for _ in 0..1000 {
            let (wo, outside) = m.sample_phase_function(&wi, true, &mut rng);
            assert!(wo.is_finite());
            assert!(near_equal(wo.length(), 1.0, 1e-3));
            if !outside {
                assert!(wo.dot(&wi) < 0.0);
            }
        }
    }

    #[test]
    fn test_002() {
        // Low roughness at normal incidence: nearly all energy splits as the smooth interface.
        let m = glass(0.05);
        let mut rng = RNG::new_sequence(3);
        let wi = Vector3f::up();
        let n = 20000;
        let mut reflected = 0;
        for _ in 0..n {
            let (wo, _) = m.sample(&wi, &mut rng);
            if wo.z > 0.0 {
                reflected += 1;
            }
        }
        let r = reflected as Float / n as Float;
        assert!(near_equal(r, 0.04, 0.01));
    }

    #[test]
    fn test_003() {
        // Walks entering from below start inside; a nearly smooth interface
        // reflects F(0) back down.
        let m = glass(0.01);
        let mut rng = RNG::new_sequence(4);
        let wi = Vector3f::new(0.0, 0.0, -1.0);
        let mut below = 0;
        let n = 5000;
        for _ in 0..n {
            let (wo, _) = m.sample(&wi, &mut rng);
            assert!(wo.is_finite());
            if wo.z < 0.0 {
                below += 1;
            }
        }
        let r = below as Float / n as Float;
        assert!(near_equal(r, 0.04, 0.01));
    }

    #[test]
    fn test_004() {
        let m = glass(0.3);
        let mut rng = RNG::new();
        assert_eq!(
            m.eval_single_scattering(
                &Vector3f::new(0.0, 0.6, -0.8),
                &Vector3f::new(0.0, -0.6, -0.8),
                &mut rng
            ),
            0.0
        );
        assert!(m.is_transmissive());
        let wi = spherical_direction(0.3, Float::sqrt(0.91), 0.0);
        let wt = spherical_direction(0.2, -Float::sqrt(0.96), PI);
        assert!(m.eval_single_scattering(&wi, &wt, &mut rng) > 0.0);
        assert!(m.eval_phase_function_both(&wi, &wt) > 0.0);
    }

    #[test]
    fn test_005() {
        // Grazing configurations give large lambdas; the result stays finite.
        let mut rng = RNG::new_sequence(5);
        for alpha in [0.05 as Float, 0.3, 1.0] {
            for slope in [SlopeDistributionType::Beckmann, SlopeDistributionType::Ggx] {
                let m = MicrosurfaceDielectric::new(
                    HeightDistributionType::Gaussian,
                    slope,
                    alpha,
                    alpha,
                    1.5,
                );
                for i in 0..=40 {
                    let cos_o = -0.002 + 0.0001 * i as Float;
                    let wo = spherical_direction(Float::sqrt(1.0 - cos_o * cos_o), cos_o, 1.3);
                    for _ in 0..50 {
                        let wi = uniform_sample_sphere(&rng.uniform_2d());
                        for (a, b) in [(wi, wo), (wo, wi)] {
                            let v = m.eval_single_scattering(&a, &b, &mut rng);
                            assert!(v.is_finite() && v >= 0.0, "{:?} {:?}: {}", a, b, v);
                        }
                    }
                }
                let wi = Vector3f::new(0.6, 0.0, 0.8);
                let horizontal = Vector3f::new(0.0, 1.0, 0.0);
                assert_eq!(m.eval_single_scattering(&wi, &horizontal, &mut rng), 0.0);
                assert_eq!(m.eval_single_scattering(&horizontal, &wi, &mut rng), 0.0);
            }
        }
    }
}
