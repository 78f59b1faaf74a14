use crate::core::pbrt::*;

// Shading-frame inline functions; z is the macroscopic normal.
#[inline]
pub fn cos_2_theta(w: &Vector3f) -> Float {
    return w.z * w.z;
}

#[inline]
pub fn sin_2_theta(w: &Vector3f) -> Float {
    return Float::max(0.0, 1.0 - cos_2_theta(w));
}

#[inline]
pub fn sin_theta(w: &Vector3f) -> Float {
    return Float::sqrt(sin_2_theta(w));
}

#[inline]
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    return Vector3f::new(
        Float::clamp(sin_theta, -1.0, 1.0) * Float::cos(phi),
        Float::clamp(sin_theta, -1.0, 1.0) * Float::sin(phi),
        Float::clamp(cos_theta, -1.0, 1.0),
    );
}

/// Mirror `wi` about the microfacet normal `wm`; both point away from the surface.
#[inline]
pub fn reflect(wi: &Vector3f, wm: &Vector3f) -> Vector3f {
    return -*wi + 2.0 * wi.dot(wm) * *wm;
}

/// Refract `wi` through the microfacet `wm` with relative index `eta`.
///
/// Total internal reflection is not detected here: callers rule it out with
/// `fresnel_dielectric` first, and the transmitted cosine is clamped to zero.
#[inline]
pub fn refract(wi: &Vector3f, wm: &Vector3f, eta: Float) -> Vector3f {
    let cos_theta_i = wi.dot(wm);
    let cos_theta_t2 = 1.0 - (1.0 - cos_theta_i * cos_theta_i) / (eta * eta);
    let cos_theta_t = -Float::sqrt(Float::max(0.0, cos_theta_t2));
    return *wm * (cos_theta_i / eta + cos_theta_t) - *wi / eta;
}
