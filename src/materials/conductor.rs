use crate::core::pbrt::*;

/// Perfectly specular microfacets.
#[derive(Debug, Clone)]
pub struct MicrosurfaceConductor {
    microsurface: Microsurface,
}

impl MicrosurfaceConductor {
    pub fn new(
        height: HeightDistributionType,
        slope: SlopeDistributionType,
        alpha_u: Float,
        alpha_v: Float,
    ) -> Self {
        MicrosurfaceConductor {
            microsurface: Microsurface::new(height, slope, alpha_u, alpha_v),
        }
    }

    pub fn from_microsurface(microsurface: Microsurface) -> Self {
        MicrosurfaceConductor { microsurface }
    }
}

impl MicrosurfaceMaterial for MicrosurfaceConductor {
    fn microsurface(&self) -> &Microsurface {
        &self.microsurface
    }

    fn microsurface_mut(&mut self) -> &mut Microsurface {
        &mut self.microsurface
    }

    fn get_type(&self) -> MaterialKind {
        MaterialKind::Conductor
    }

    fn eval_phase_function(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        _wi_outside: bool,
        _wo_outside: bool,
        _rng: &mut RNG,
    ) -> Float {
        // half vector
        let wh = (*wi + *wo).normalize();
        let cos_theta_h = wi.dot(&wh);
        if wh.z < 0.0 || cos_theta_h <= 0.0 {
            return 0.0;
        }
        return 0.25 * self.microsurface.d_wi(wi, &wh) / cos_theta_h;
    }

    fn sample_phase_function(
        &self,
        wi: &Vector3f,
        _wi_outside: bool,
        rng: &mut RNG,
    ) -> (Vector3f, bool) {
        let wm = self.microsurface.sample_d_wi(wi, &rng.uniform_2d());
        return (reflect(wi, &wm), true);
    }

    fn eval_single_scattering(&self, wi: &Vector3f, wo: &Vector3f, _rng: &mut RNG) -> Float {
        if wi.z <= 0.0 || wo.z <= 0.0 {
            return 0.0;
        }

        // half-vector
        let wh = (*wi + *wo).normalize();
        let d = self.microsurface.d(&wh);

        // masking-shadowing
        let g2 = 1.0 / (1.0 + self.microsurface.lambda(wi) + self.microsurface.lambda(wo));

        // BRDF * cos
        return d * g2 / (4.0 * wi.z);
    }
}

pub fn create_conductor_material(
    params: &MicrosurfaceParams,
) -> Result<Box<dyn MicrosurfaceMaterial>, MicrosurfaceError> {
    let mut microsurface =
        Microsurface::new(params.height, params.slope, params.alpha_u, params.alpha_v);
    microsurface.set_max_scattering_order(params.max_scattering_order);
    return Ok(Box::new(MicrosurfaceConductor::from_microsurface(
        microsurface,
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_equal(a: Float, b: Float, e: Float) -> bool {
        (a - b).abs() < e
    }

    #[test]
    fn test_001() {
        // Every scattered direction leaves upward.
        let m = MicrosurfaceConductor::new(
            HeightDistributionType::Gaussian,
            SlopeDistributionType::Beckmann,
            0.8,
            0.4,
        );
        let mut rng = RNG::new_sequence(1);
        let wi = spherical_direction(0.8, 0.6, 0.5);
        for _ in 0..2000 {
            let (wo, order) = m.sample(&wi, &mut rng);
            assert!(wo.z > 0.0);
            assert!(order >= 1);
            assert!(near_equal(wo.length(), 1.0, 1e-3));
        }
    }

    #[test]
    fn test_002() {
        // Single scattering is reciprocal once the outgoing cosine is divided out.
        let m = MicrosurfaceConductor::new(
            HeightDistributionType::Uniform,
            SlopeDistributionType::Ggx,
            0.4,
            0.4,
        );
        let mut rng = RNG::new();
        let wi = spherical_direction(0.3, Float::sqrt(0.91), 0.0);
        let wo = spherical_direction(0.7, Float::sqrt(0.51), 2.0);
        let a = m.eval_single_scattering(&wi, &wo, &mut rng) / wo.z;
        let b = m.eval_single_scattering(&wo, &wi, &mut rng) / wi.z;
        assert!(near_equal(a, b, 1e-4 * a.max(1.0)));
    }

    #[test]
    fn test_003() {
        let m = MicrosurfaceConductor::new(
            HeightDistributionType::Gaussian,
            SlopeDistributionType::Ggx,
            0.3,
            0.3,
        );
        let mut rng = RNG::new();
        let wi = Vector3f::up();
        let below = Vector3f::new(0.0, 0.6, -0.8);
        assert_eq!(m.eval(&wi, &below, ScatteringOrder::All, &mut rng), 0.0);
        assert_eq!(m.eval_single_scattering(&wi, &below, &mut rng), 0.0);
        assert!(m.is_transmissive() == false);
    }
}
