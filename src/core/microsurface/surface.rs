use crate::core::pbrt::*;

use std::sync::Arc;

/// Roughness floor; smaller values make the slope densities degenerate.
pub const MIN_ALPHA: Float = 1e-4;
/// Bounce budget of a single random walk.
pub const DEFAULT_MAX_SCATTERING_ORDER: u32 = 1024;

/// Which bounces of a random walk contribute to an evaluation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScatteringOrder {
    #[default]
    All,
    Order(u32),
}

impl ScatteringOrder {
    /// `0` selects every order, `k > 0` selects the k-th bounce only.
    pub fn from_index(k: u32) -> Self {
        if k == 0 {
            ScatteringOrder::All
        } else {
            ScatteringOrder::Order(k)
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            ScatteringOrder::All => 0,
            ScatteringOrder::Order(k) => *k,
        }
    }

    #[inline]
    pub fn includes(&self, order: u32) -> bool {
        match self {
            ScatteringOrder::All => true,
            ScatteringOrder::Order(k) => *k == order,
        }
    }

    /// Nothing past `order` can contribute.
    #[inline]
    pub fn is_last(&self, order: u32) -> bool {
        match self {
            ScatteringOrder::All => false,
            ScatteringOrder::Order(k) => order >= *k,
        }
    }
}

/// A random height field with a given height and slope statistics.
#[derive(Clone)]
pub struct Microsurface {
    height: Arc<dyn MicrosurfaceHeight>,
    slope: Arc<dyn MicrosurfaceSlope>,
    alpha_x: Float,
    alpha_y: Float,
    max_scattering_order: u32,
}

impl Microsurface {
    pub fn new(
        height: HeightDistributionType,
        slope: SlopeDistributionType,
        alpha_x: Float,
        alpha_y: Float,
    ) -> Self {
        Self::from_distributions(
            create_height_distribution(height),
            create_slope_distribution(slope),
            alpha_x,
            alpha_y,
        )
    }

    pub fn from_distributions(
        height: Arc<dyn MicrosurfaceHeight>,
        slope: Arc<dyn MicrosurfaceSlope>,
        alpha_x: Float,
        alpha_y: Float,
    ) -> Self {
        Microsurface {
            height,
            slope,
            alpha_x: Float::max(MIN_ALPHA, alpha_x),
            alpha_y: Float::max(MIN_ALPHA, alpha_y),
            max_scattering_order: DEFAULT_MAX_SCATTERING_ORDER,
        }
    }

    pub fn height(&self) -> &dyn MicrosurfaceHeight {
        self.height.as_ref()
    }

    pub fn slope(&self) -> &dyn MicrosurfaceSlope {
        self.slope.as_ref()
    }

    pub fn alpha_x(&self) -> Float {
        self.alpha_x
    }

    pub fn alpha_y(&self) -> Float {
        self.alpha_y
    }

    pub fn max_scattering_order(&self) -> u32 {
        self.max_scattering_order
    }

    pub fn set_max_scattering_order(&mut self, n: u32) {
        self.max_scattering_order = u32::max(1, n);
    }

    pub fn refresh_alpha(&mut self, alpha_x: Float, alpha_y: Float) {
        self.alpha_x = Float::max(MIN_ALPHA, alpha_x);
        self.alpha_y = Float::max(MIN_ALPHA, alpha_y);
    }

    /// Height where every walk begins, above almost all of the surface.
    pub fn start_height(&self) -> Float {
        return 1.0 + self.height.inv_c1(0.999);
    }

    #[inline]
    pub fn lambda(&self, w: &Vector3f) -> Float {
        return self.slope.lambda(w, self.alpha_x, self.alpha_y);
    }

    #[inline]
    pub fn d(&self, wm: &Vector3f) -> Float {
        return self.slope.d(wm, self.alpha_x, self.alpha_y);
    }

    #[inline]
    pub fn d_wi(&self, wi: &Vector3f, wm: &Vector3f) -> Float {
        return self.slope.d_wi(wi, wm, self.alpha_x, self.alpha_y);
    }

    #[inline]
    pub fn projected_area(&self, wi: &Vector3f) -> Float {
        return self.slope.projected_area(wi, self.alpha_x, self.alpha_y);
    }

    pub fn sample_d_wi(&self, wi: &Vector3f, u: &Point2f) -> Vector3f {
        return self
            .slope
            .sample_d_wi(wi, u.x, u.y, self.alpha_x, self.alpha_y);
    }

    /// Masking at the mean surface level.
    pub fn g_1(&self, wi: &Vector3f) -> Float {
        if wi.z > NORMAL_INCIDENCE_COS {
            return 1.0;
        }
        if wi.z <= 0.0 {
            return 0.0;
        }
        return 1.0 / (1.0 + self.lambda(wi));
    }

    /// Masking of a ray leaving from height `h0`.
    pub fn g_1_at(&self, wi: &Vector3f, h0: Float) -> Float {
        if wi.z > NORMAL_INCIDENCE_COS {
            return 1.0;
        }
        if wi.z <= 0.0 {
            return 0.0;
        }
        let c1 = Float::clamp(self.height.c1(h0), 0.0, 1.0);
        return Float::powf(c1, self.lambda(wi));
    }

    /// Next intersection height along `wr` from `hr`, or `None` once the ray escapes.
    pub fn sample_height(&self, wr: &Vector3f, hr: Float, u: Float) -> Option<Float> {
        if wr.z > NORMAL_INCIDENCE_COS {
            return None;
        }
        if wr.z < -NORMAL_INCIDENCE_COS {
            return Some(self.height.inv_c1(u * self.height.c1(hr)));
        }
        if Float::abs(wr.z) < GRAZING_COS {
            return Some(hr);
        }

        // probability of intersection
        let g_1 = self.g_1_at(wr, hr);
        if u > 1.0 - g_1 {
            // leave the microsurface
            return None;
        }

        let h = self.height.inv_c1(
            self.height.c1(hr) / Float::powf(1.0 - u, 1.0 / self.lambda(wr)),
        );
        return Some(h);
    }

    /// `sample_height` for either side of the surface; inside, the height field is mirrored.
    pub fn sample_height_oriented(
        &self,
        wr: &Vector3f,
        hr: Float,
        outside: bool,
        u: Float,
    ) -> Option<Float> {
        if outside {
            return self.sample_height(wr, hr, u);
        } else {
            return self.sample_height(&-*wr, -hr, u).map(|h| -h);
        }
    }
}

impl std::fmt::Debug for Microsurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Microsurface")
            .field("height", &self.height.get_type())
            .field("slope", &self.slope.get_type())
            .field("alpha_x", &self.alpha_x)
            .field("alpha_y", &self.alpha_y)
            .field("max_scattering_order", &self.max_scattering_order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_equal(a: Float, b: Float, e: Float) -> bool {
        (a - b).abs() < e
    }

    #[test]
    fn test_001() {
        assert_eq!(ScatteringOrder::from_index(0), ScatteringOrder::All);
        assert_eq!(ScatteringOrder::from_index(3), ScatteringOrder::Order(3));
        assert_eq!(ScatteringOrder::Order(3).index(), 3);
        assert!(ScatteringOrder::All.includes(17));
        assert!(!ScatteringOrder::Order(2).includes(1));
        assert!(ScatteringOrder::Order(2).is_last(2));
        assert!(!ScatteringOrder::All.is_last(1000));
    }

    #[test]
    fn test_002() {
        let mut m = Microsurface::new(
            HeightDistributionType::Gaussian,
            SlopeDistributionType::Ggx,
            0.0,
            0.3,
        );
        assert_eq!(m.alpha_x(), MIN_ALPHA);
        assert_eq!(m.alpha_y(), 0.3);
        m.refresh_alpha(0.5, 0.6);
        assert_eq!(m.alpha_x(), 0.5);
        assert_eq!(m.alpha_y(), 0.6);
        assert_eq!(m.max_scattering_order(), DEFAULT_MAX_SCATTERING_ORDER);
    }

    #[test]
    fn test_003() {
        let m = Microsurface::new(
            HeightDistributionType::Uniform,
            SlopeDistributionType::Beckmann,
            0.5,
            0.5,
        );
        let up = Vector3f::up();
        let down = -up;
        let grazing = Vector3f::new(1.0, 0.0, 0.0);
        assert_eq!(m.sample_height(&up, 0.0, 0.5), None);
        assert_eq!(m.sample_height(&grazing, 0.25, 0.5), Some(0.25));
        // Straight down from h = 1 on a uniform field: invC1(u).
        let h = m.sample_height(&down, 1.0, 0.5);
        assert!(near_equal(h.unwrap_or(Float::NAN), 0.0, 1e-6));
        assert_eq!(m.g_1(&up), 1.0);
        assert_eq!(m.g_1(&down), 0.0);
    }

    #[test]
    fn test_004() {
        // Escape frequency from the top of the field matches G_1(wr, h).
        let m = Microsurface::new(
            HeightDistributionType::Gaussian,
            SlopeDistributionType::Ggx,
            0.6,
            0.6,
        );
        let wr = spherical_direction(0.8, 0.6, 0.0);
        let h0 = 0.3;
        let g = m.g_1_at(&wr, h0);
        let mut rng = RNG::new_sequence(5);
        let n = 20000;
        let escaped = (0..n)
            .filter(|_| m.sample_height(&wr, h0, rng.uniform_float()).is_none())
            .count();
        let f = escaped as Float / n as Float;
        assert!(near_equal(f, g, 0.02));
        // And every hit lies above the starting height.
        for _ in 0..1000 {
            if let Some(h) = m.sample_height(&wr, h0, rng.uniform_float()) {
                assert!(h >= h0 - 1e-4);
            }
        }
    }

    #[test]
    fn test_005() {
        // Inside, the walk sees the mirrored field.
        let m = Microsurface::new(
            HeightDistributionType::Uniform,
            SlopeDistributionType::Ggx,
            0.5,
            0.5,
        );
        assert_eq!(
            m.sample_height_oriented(&Vector3f::new(0.0, 0.0, -1.0), -0.5, false, 0.3),
            None
        );
        let h = m.sample_height_oriented(&Vector3f::up(), -1.0, false, 0.5);
        assert!(near_equal(h.unwrap_or(Float::NAN), 0.0, 1e-6));
        assert!(m.start_height() > 1.9);
    }
}
