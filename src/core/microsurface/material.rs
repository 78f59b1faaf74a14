use crate::core::pbrt::*;

use log::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A microsurface together with the local scattering of its microfacets.
///
/// Implementors supply the phase function; the random walk through the
/// height field is shared. Directions live in the local frame with `z` along
/// the macroscopic normal and point away from the surface.
pub trait MicrosurfaceMaterial: Send + Sync {
    fn microsurface(&self) -> &Microsurface;
    fn microsurface_mut(&mut self) -> &mut Microsurface;

    fn get_type(&self) -> MaterialKind;

    /// Whether walks may cross to the lower side.
    fn is_transmissive(&self) -> bool {
        false
    }

    /// Density of scattering from `wi` into `wo` at one microfacet.
    fn eval_phase_function(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        wi_outside: bool,
        wo_outside: bool,
        rng: &mut RNG,
    ) -> Float;

    /// Scatters `wi` at one microfacet; returns the new direction and its side.
    fn sample_phase_function(
        &self,
        wi: &Vector3f,
        wi_outside: bool,
        rng: &mut RNG,
    ) -> (Vector3f, bool);

    /// Single-scattering BSDF times the outgoing cosine.
    fn eval_single_scattering(&self, wi: &Vector3f, wo: &Vector3f, rng: &mut RNG) -> Float;

    /// Stochastic estimate of the BSDF times `|wo.z|`.
    fn eval(&self, wi: &Vector3f, wo: &Vector3f, order: ScatteringOrder, rng: &mut RNG) -> Float {
        if wi.z == 0.0 {
            return 0.0;
        }
        if !self.is_transmissive() && (wi.z < 0.0 || wo.z < 0.0) {
            return 0.0;
        }

        let microsurface = self.microsurface();
        let max_order = microsurface.max_scattering_order();

        // init
        let mut wr = -*wi;
        let mut outside = wi.z > 0.0;
        let mut hr = if outside {
            microsurface.start_height()
        } else {
            -microsurface.start_height()
        };
        let wo_outside = wo.z > 0.0;

        let mut sum = 0.0;

        // random walk
        let mut current_order = 0;
        loop {
            // next height
            let u = rng.uniform_float();
            hr = match microsurface.sample_height_oriented(&wr, hr, outside, u) {
                Some(h) => h,
                None => break,
            };
            if current_order >= max_order {
                debug!("Random walk stopped at the scattering limit {}.", max_order);
                break;
            }
            current_order += 1;

            // next event estimation
            let phase = self.eval_phase_function(&-wr, wo, outside, wo_outside, rng);
            let shadowing = if wo_outside {
                microsurface.g_1_at(wo, hr)
            } else {
                microsurface.g_1_at(&-*wo, -hr)
            };
            let value = phase * shadowing;
            if value.is_finite() && order.includes(current_order) {
                sum += value;
            }
            if order.is_last(current_order) {
                break;
            }

            // next direction
            let (w, o) = self.sample_phase_function(&-wr, outside, rng);
            wr = w;
            outside = o;

            if hr.is_nan() || wr.has_nans() {
                debug!("Random walk aborted at order {}: NaN state.", current_order);
                return 0.0;
            }
        }

        return sum;
    }

    /// Samples an outgoing direction; also returns the number of bounces.
    ///
    /// A walk that would exceed the scattering limit returns the normal.
    fn sample(&self, wi: &Vector3f, rng: &mut RNG) -> (Vector3f, u32) {
        let microsurface = self.microsurface();
        let max_order = microsurface.max_scattering_order();

        // init
        let mut wr = -*wi;
        let mut outside = !self.is_transmissive() || wi.z > 0.0;
        let mut hr = if outside {
            microsurface.start_height()
        } else {
            -microsurface.start_height()
        };

        // random walk
        let mut order = 0;
        loop {
            // next height
            let u = rng.uniform_float();
            hr = match microsurface.sample_height_oriented(&wr, hr, outside, u) {
                Some(h) => h,
                None => break,
            };
            if order >= max_order {
                debug!("Random walk stopped at the scattering limit {}.", max_order);
                return (Vector3f::up(), order);
            }
            order += 1;

            // next direction
            let (w, o) = self.sample_phase_function(&-wr, outside, rng);
            wr = w;
            outside = o;

            if hr.is_nan() || wr.has_nans() {
                debug!("Random walk aborted at order {}: NaN state.", order);
                return (Vector3f::up(), order);
            }
        }

        return (wr, order);
    }

    fn refresh_alpha(&mut self, alpha_u: Float, alpha_v: Float) {
        self.microsurface_mut().refresh_alpha(alpha_u, alpha_v);
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Conductor,
    #[default]
    Dielectric,
    Diffuse,
}

impl FromStr for MaterialKind {
    type Err = MicrosurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conductor" | "metal" => Ok(MaterialKind::Conductor),
            "dielectric" | "glass" => Ok(MaterialKind::Dielectric),
            "diffuse" => Ok(MaterialKind::Diffuse),
            _ => Err(MicrosurfaceError::unknown_name("Material", s)),
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Conductor => write!(f, "conductor"),
            MaterialKind::Dielectric => write!(f, "dielectric"),
            MaterialKind::Diffuse => write!(f, "diffuse"),
        }
    }
}
