use crate::core::pbrt::*;

/// Unpolarized Fresnel reflectance of a dielectric interface.
///
/// `eta` is the index ratio transmitted/incident seen from `wi`. Returns 1 under
/// total internal reflection.
pub fn fresnel_dielectric(wi: &Vector3f, wm: &Vector3f, eta: Float) -> Float {
    let cos_theta_i = wi.dot(wm);
    let cos_theta_t2 = 1.0 - (1.0 - cos_theta_i * cos_theta_i) / (eta * eta);

    // Handle total internal reflection
    if cos_theta_t2 <= 0.0 {
        return 1.0;
    }

    let cos_theta_t = Float::sqrt(cos_theta_t2);
    let rs = (cos_theta_i - eta * cos_theta_t) / (cos_theta_i + eta * cos_theta_t);
    let rp = (eta * cos_theta_i - cos_theta_t) / (eta * cos_theta_i + cos_theta_t);

    return 0.5 * (rs * rs + rp * rp);
}
