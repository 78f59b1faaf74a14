use crate::core::base::*;

#[inline]
pub fn sign(a: Float) -> Float {
    return if a >= 0.0 { 1.0 } else { -1.0 };
}

#[inline]
pub fn erf_inv(x: Float) -> Float {
    let x = Float::clamp(x, -0.99999, 0.99999);
    let mut w = -Float::ln((1.0 - x) * (1.0 + x));
    let mut p;
    if w < 5.0 {
        w -= 2.5;
        p = 2.81022636e-08;
        p = 3.43273939e-07 + p * w;
        p = -3.5233877e-06 + p * w;
        p = -4.39150654e-06 + p * w;
        p = 0.00021858087 + p * w;
        p = -0.00125372503 + p * w;
        p = -0.00417768164 + p * w;
        p = 0.246640727 + p * w;
        p = 1.50140941 + p * w;
    } else {
        w = Float::sqrt(w) - 3.0;
        p = -0.000200214257;
        p = 0.000100950558 + p * w;
        p = 0.00134934322 + p * w;
        p = -0.00367342844 + p * w;
        p = 0.00573950773 + p * w;
        p = -0.0076224613 + p * w;
        p = 0.00943887047 + p * w;
        p = 1.00167406 + p * w;
        p = 2.83297682 + p * w;
    }
    return p * x;
}

/// Abramowitz & Stegun 7.1.26, evaluated in double precision.
#[inline]
pub fn erf(x: Float) -> Float {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let x = x as f64;
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = f64::abs(x);

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * f64::exp(-x * x);

    return (sign * y) as Float;
}

/// ln(Gamma(x)) for x >= 5 from Stirling's series in continued-fraction form.
pub fn log_gamma_stirling(x: f64) -> f64 {
    const G0: f64 = 1.0 / 12.0;
    const G1: f64 = 1.0 / 30.0;
    const G2: f64 = 53.0 / 210.0;
    const G3: f64 = 195.0 / 371.0;
    const G4: f64 = 22999.0 / 22737.0;
    const G5: f64 = 29944523.0 / 19733142.0;
    const G6: f64 = 109535241009.0 / 48264275462.0;

    let series = G0 / (x + G1 / (x + G2 / (x + G3 / (x + G4 / (x + G5 / (x + G6 / x))))));
    return 0.5 * f64::ln(2.0 * std::f64::consts::PI) - x + (x - 0.5) * f64::ln(x) + series;
}

/// ln(Gamma(x)) for x > 0, shifted by five before applying Stirling's series.
pub fn log_gamma(x: f64) -> f64 {
    return log_gamma_stirling(x + 5.0)
        - f64::ln(x * (x + 1.0) * (x + 2.0) * (x + 3.0) * (x + 4.0));
}

/// Gamma function for x > 0. Overflows to infinity past x ~ 171.
pub fn gamma_fn(x: f64) -> f64 {
    return f64::exp(log_gamma(x));
}

/// Euler's Beta function B(m, n) = Gamma(m) Gamma(n) / Gamma(m + n), evaluated in log space.
pub fn beta(m: f64, n: f64) -> f64 {
    return f64::exp(log_gamma(m) + log_gamma(n) - log_gamma(m + n));
}
