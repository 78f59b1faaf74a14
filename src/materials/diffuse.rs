use crate::core::pbrt::*;

/// Lambertian microfacets.
///
/// The phase function is itself estimated stochastically, by drawing one
/// visible normal per evaluation.
#[derive(Debug, Clone)]
pub struct MicrosurfaceDiffuse {
    microsurface: Microsurface,
}

impl MicrosurfaceDiffuse {
    pub fn new(
        height: HeightDistributionType,
        slope: SlopeDistributionType,
        alpha_u: Float,
        alpha_v: Float,
    ) -> Self {
        MicrosurfaceDiffuse {
            microsurface: Microsurface::new(height, slope, alpha_u, alpha_v),
        }
    }

    pub fn from_microsurface(microsurface: Microsurface) -> Self {
        MicrosurfaceDiffuse { microsurface }
    }
}

/// Cosine-distributed direction around the unit normal `wm`.
pub fn cosine_sample_around(wm: &Vector3f, u: &Point2f) -> Vector3f {
    let (w1, w2) = build_orthonormal_basis(wm);
    let d = cosine_sample_hemisphere(u);
    return w1 * d.x + w2 * d.y + *wm * d.z;
}

impl MicrosurfaceMaterial for MicrosurfaceDiffuse {
    fn microsurface(&self) -> &Microsurface {
        &self.microsurface
    }

    fn microsurface_mut(&mut self) -> &mut Microsurface {
        &mut self.microsurface
    }

    fn get_type(&self) -> MaterialKind {
        MaterialKind::Diffuse
    }

    fn eval_phase_function(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        _wi_outside: bool,
        _wo_outside: bool,
        rng: &mut RNG,
    ) -> Float {
        let wm = self.microsurface.sample_d_wi(wi, &rng.uniform_2d());
        return INV_PI * Float::max(0.0, wo.dot(&wm));
    }

    fn sample_phase_function(
        &self,
        wi: &Vector3f,
        _wi_outside: bool,
        rng: &mut RNG,
    ) -> (Vector3f, bool) {
        let wm = self.microsurface.sample_d_wi(wi, &rng.uniform_2d());
        return (cosine_sample_around(&wm, &rng.uniform_2d()), true);
    }

    fn eval_single_scattering(&self, wi: &Vector3f, wo: &Vector3f, rng: &mut RNG) -> Float {
        if wi.z <= 0.0 || wo.z <= 0.0 {
            return 0.0;
        }

        // sample visible microfacet
        let wm = self.microsurface.sample_d_wi(wi, &rng.uniform_2d());

        // shadowing given masking
        let lambda_i = self.microsurface.lambda(wi);
        let lambda_o = self.microsurface.lambda(wo);
        let g2_given_g1 = (1.0 + lambda_i) / (1.0 + lambda_i + lambda_o);

        return INV_PI * Float::max(0.0, wm.dot(wo)) * g2_given_g1;
    }
}

pub fn create_diffuse_material(
    params: &MicrosurfaceParams,
) -> Result<Box<dyn MicrosurfaceMaterial>, MicrosurfaceError> {
    let mut microsurface =
        Microsurface::new(params.height, params.slope, params.alpha_u, params.alpha_v);
    microsurface.set_max_scattering_order(params.max_scattering_order);
    return Ok(Box::new(MicrosurfaceDiffuse::from_microsurface(microsurface)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_equal(a: Float, b: Float, e: Float) -> bool {
        (a - b).abs() < e
    }

    #[test]
    fn test_001() {
        // Cosine samples stay in the hemisphere of their normal.
        let mut rng = RNG::new_sequence(9);
        for _ in 0..2000 {
            let wm = uniform_sample_sphere(&rng.uniform_2d());
            let wo = cosine_sample_around(&wm, &rng.uniform_2d());
            assert!(wo.dot(&wm) >= -1e-3);
            assert!(near_equal(wo.length(), 1.0, 1e-2));
        }
    }

    #[test]
    fn test_002() {
        // Samples are always finite over the full roughness range.
        let mut rng = RNG::new_sequence(10);
        for alpha in [0.01 as Float, 0.5, 1.0, 2.0] {
            let m = MicrosurfaceDiffuse::new(
                HeightDistributionType::Gaussian,
                SlopeDistributionType::Beckmann,
                alpha,
                alpha,
            );
            for i in 0..5 {
                let cos_theta = 1.0 - 0.24 * (i as Float);
                let wi = spherical_direction(Float::sqrt(1.0 - cos_theta * cos_theta), cos_theta, 0.3);
                for _ in 0..200 {
                    let (wo, _) = m.sample(&wi, &mut rng);
                    assert!(wo.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_003() {
        let m = MicrosurfaceDiffuse::new(
            HeightDistributionType::Uniform,
            SlopeDistributionType::Ggx,
            0.5,
            0.5,
        );
        let mut rng = RNG::new();
        let wi = Vector3f::up();
        let wo = spherical_direction(0.6, 0.8, 1.0);
        let v = m.eval_single_scattering(&wi, &wo, &mut rng);
        assert!(v >= 0.0 && v <= INV_PI);
        assert_eq!(m.eval_single_scattering(&wi, &-wo, &mut rng), 0.0);
    }
}
