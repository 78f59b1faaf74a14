use super::conductor::*;
use super::dielectric::*;
use super::diffuse::*;
use crate::core::pbrt::*;

use log::*;

pub fn create_microsurface_material(
    params: &MicrosurfaceParams,
) -> Result<Box<dyn MicrosurfaceMaterial>, MicrosurfaceError> {
    params.validate()?;
    if params.alpha_u < MIN_ALPHA || params.alpha_v < MIN_ALPHA {
        warn!(
            "Roughness ({}, {}) is below {}. Clamping.",
            params.alpha_u, params.alpha_v, MIN_ALPHA
        );
    }

    let material = match params.material {
        MaterialKind::Conductor => create_conductor_material(params)?,
        MaterialKind::Dielectric => create_dielectric_material(params)?,
        MaterialKind::Diffuse => create_diffuse_material(params)?,
    };
    info!(
        "Created {} microsurface: {} heights, {} slopes, alpha = ({}, {}).",
        material.get_type(),
        params.height,
        params.slope,
        material.microsurface().alpha_x(),
        material.microsurface().alpha_y()
    );
    return Ok(material);
}

/// Creates a material from its name, with every other parameter taken from `params`.
pub fn create_material(
    name: &str,
    params: &MicrosurfaceParams,
) -> Result<Box<dyn MicrosurfaceMaterial>, MicrosurfaceError> {
    let material: MaterialKind = name.parse()?;
    let params = MicrosurfaceParams {
        material,
        ..params.clone()
    };
    return create_microsurface_material(&params);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let params = MicrosurfaceParams::default();
        let m = create_microsurface_material(&params).unwrap();
        assert_eq!(m.get_type(), MaterialKind::Dielectric);
        assert!(m.is_transmissive());
        let m = create_material("conductor", &params).unwrap();
        assert_eq!(m.get_type(), MaterialKind::Conductor);
        assert!(matches!(
            create_material("velvet", &params),
            Err(MicrosurfaceError::UnknownName { .. })
        ));
    }

    #[test]
    fn test_002() {
        let params = MicrosurfaceParams {
            material: MaterialKind::Diffuse,
            alpha_u: 0.0,
            max_scattering_order: 8,
            ..Default::default()
        };
        let m = create_microsurface_material(&params).unwrap();
        assert_eq!(m.microsurface().alpha_x(), MIN_ALPHA);
        assert_eq!(m.microsurface().max_scattering_order(), 8);

        let params = MicrosurfaceParams {
            alpha_v: Float::NAN,
            ..Default::default()
        };
        assert!(create_microsurface_material(&params).is_err());
        let params = MicrosurfaceParams {
            eta: 0.0,
            ..Default::default()
        };
        assert!(create_microsurface_material(&params).is_err());
    }
}
