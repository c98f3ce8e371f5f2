use approx::assert_relative_eq;
use siderea::astrometry::ObservedPlace;
use siderea::earth::site::ObservingSite;
use siderea::refraction::Weather;

/// 2013 April 2, 23h 15m 43.6s UTC as a two-part quasi-JD.
pub const UTC1: f64 = 2456384.5;
pub const UTC2: f64 = 0.969254051;
pub const DUT1: f64 = 0.1550675;

/// IERS pole coordinates for the test epoch, radians.
pub const XP: f64 = 2.47230737e-7;
pub const YP: f64 = 1.82640464e-6;

pub fn test_site() -> ObservingSite {
    ObservingSite::new(-0.527800806, -1.2345856, 2738.0)
}

pub fn test_weather() -> Weather {
    Weather::new(731.0, 12.8, 0.59, 0.55)
}

#[allow(dead_code)]
pub fn assert_place_close(actual: &ObservedPlace, expected: &ObservedPlace, epsilon: f64) {
    assert_relative_eq!(actual.azimuth, expected.azimuth, epsilon = epsilon);
    assert_relative_eq!(
        actual.zenith_distance,
        expected.zenith_distance,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.hour_angle, expected.hour_angle, epsilon = epsilon);
    assert_relative_eq!(actual.dec, expected.dec, epsilon = epsilon);
    assert_relative_eq!(actual.ra, expected.ra, epsilon = epsilon);
}
