//! Atmospheric refraction constants.
//!
//! The observed-place transforms model refraction as
//! `Δζ = refa·tan(ζ) + refb·tan³(ζ)` for zenith distance ζ, which holds to
//! a few hundredths of an arcsecond above roughly 15° altitude. The two
//! constants come from the local weather via the Crane (radio) and
//! Green/Hohenkerk (optical/IR) formulations.

use serde::{Deserialize, Serialize};

use crate::constants::Radian;

/// Meteorological conditions at the observer plus the observing wavelength.
///
/// A wavelength above 100 μm selects the radio regime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Pressure at the observer, hPa.
    pub pressure: f64,
    /// Ambient temperature, degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, 0..1.
    pub humidity: f64,
    /// Observing wavelength, micrometers.
    pub wavelength: f64,
}

impl Weather {
    pub fn new(pressure: f64, temperature: f64, humidity: f64, wavelength: f64) -> Self {
        Weather {
            pressure,
            temperature,
            humidity,
            wavelength,
        }
    }
}

/// Refraction constants A and B for the tanZ + tan³Z model, in radians.
///
/// Out-of-range inputs are clamped to the model's documented domain rather
/// than rejected; the constants degrade gracefully toward the domain
/// edges.
pub fn refco(weather: &Weather) -> (Radian, Radian) {
    let t = weather.temperature.clamp(-150.0, 200.0);
    let p = weather.pressure.clamp(0.0, 10000.0);
    let r = weather.humidity.clamp(0.0, 1.0);
    let w = weather.wavelength.clamp(0.1, 1e6);

    // Water vapour pressure at the observer.
    let pw = if p > 0.0 {
        let ps = 10f64.powf((0.7859 + 0.03477 * t) / (1.0 + 0.00412 * t))
            * (1.0 + p * (4.5e-6 + 6e-10 * t * t));
        r * ps / (1.0 - (1.0 - r) * ps / p)
    } else {
        0.0
    };

    let tk = t + 273.15;
    let optic = w <= 100.0;

    // Refractive index minus 1 at the observer.
    let gamma = if optic {
        let wlsq = w * w;
        ((77.53484e-6 + (4.39108e-7 + 3.666e-9 / wlsq) / wlsq) * p - 11.2684e-6 * pw) / tk
    } else {
        (77.6890e-6 * p - (6.3938e-6 - 0.375463 / tk) * pw) / tk
    };

    // Formula for beta from Stone, with empirical adjustments.
    let mut beta = 4.4474e-6 * tk;
    if !optic {
        beta -= 0.0074 * pw * beta;
    }

    (gamma * (1.0 - beta), -gamma * (beta - gamma / 2.0))
}

#[cfg(test)]
mod refraction_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_refco_optical() {
        let (refa, refb) = refco(&Weather::new(800.0, 10.0, 0.9, 0.4));
        assert_relative_eq!(refa, 0.2264949956241415009e-3, epsilon = 1e-15);
        assert_relative_eq!(refb, -0.2598658261729343970e-6, epsilon = 1e-18);
    }

    #[test]
    fn test_refco_radio() {
        let (refa, refb) = refco(&Weather::new(800.0, 10.0, 0.9, 3000.0));
        // The radio constants differ from the optical ones but stay in the
        // same regime.
        assert!(refa > 1e-4 && refa < 4e-4);
        assert!(refb < 0.0 && refb > -1e-6);
    }

    #[test]
    fn test_refco_vacuum() {
        let (refa, refb) = refco(&Weather::new(0.0, 10.0, 0.0, 0.55));
        assert_eq!(refa, 0.0);
        assert_eq!(refb, 0.0);
    }

    #[test]
    fn test_refco_clamps_inputs() {
        let wild = Weather::new(-50.0, -500.0, 3.0, 0.0);
        let tame = Weather::new(0.0, -150.0, 1.0, 0.1);
        assert_eq!(refco(&wild), refco(&tame));
    }
}
