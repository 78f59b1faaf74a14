use crate::core::pbrt::*;

pub fn uniform_sample_hemisphere(u: &Point2f) -> Vector3f {
    let z = u[0];
    let r = Float::sqrt(Float::max(0.0, 1.0 - z * z));
    let phi = 2.0 * PI * u[1];
    return Vector3f::new(r * Float::cos(phi), r * Float::sin(phi), z);
}

#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    return INV_2_PI;
}

#[inline]
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = Float::sqrt(Float::max(0.0, 1.0 - z * z));
    let phi = 2.0 * PI * u[1];
    return Vector3f::new(r * Float::cos(phi), r * Float::sin(phi), z);
}

#[inline]
pub fn uniform_sphere_pdf() -> Float {
    return INV_4_PI;
}

pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to $[-1,1]^2$
    let ux = 2.0 * u.x - 1.0;
    let uy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin
    if ux == 0.0 && uy == 0.0 {
        return Point2f::zero();
    }

    // Apply concentric mapping to point
    if ux * ux > uy * uy {
        let r = ux;
        let theta = PI_OVER_4 * (uy / ux);
        return Point2f::new(r * Float::cos(theta), r * Float::sin(theta));
    } else {
        let r = uy;
        let theta = PI_OVER_2 - PI_OVER_4 * (ux / uy);
        return Point2f::new(r * Float::cos(theta), r * Float::sin(theta));
    }
}

pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = Float::sqrt(Float::max(0.0, 1.0 - d.x * d.x - d.y * d.y));
    return Vector3f::new(d.x, d.y, z);
}

/// Tangent frame around a unit vector without normalization (Frisvad 2012).
///
/// Returns `(t, b)` so that `(t, b, n)` is orthonormal.
pub fn build_orthonormal_basis(n: &Vector3f) -> (Vector3f, Vector3f) {
    if n.z < -0.9999999 {
        return (Vector3f::new(0.0, -1.0, 0.0), Vector3f::new(-1.0, 0.0, 0.0));
    }
    let a = 1.0 / (1.0 + n.z);
    let b = -n.x * n.y * a;
    let t = Vector3f::new(1.0 - n.x * n.x * a, b, -n.x);
    let bt = Vector3f::new(b, 1.0 - n.y * n.y * a, -n.y);
    return (t, bt);
}
