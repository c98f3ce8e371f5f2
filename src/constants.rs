//! # Constants and type definitions for Siderea
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `siderea` library.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, au ↔ meters)
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the time-scale codecs, the
//! astrometric context builders and the per-star transforms.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in meters (IAU 2012)
pub const AU_M: f64 = 149_597_870_700.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Julian Date of the J2000.0 epoch
pub const DJ00: f64 = 2451545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Days per Julian year
pub const DJY: f64 = 365.25;

/// Days per Julian century
pub const DJC: f64 = 36525.0;

/// TT minus TAI, in seconds (fixed by definition)
pub const TTMTAI: f64 = 32.184;

/// Gaussian gravitational constant, radians per day at 1 au
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Radians → arcseconds
pub const ARCSEC_PER_RAD: f64 = 648000.0 / std::f64::consts::PI;

/// Earth equatorial radius in meters (WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth flattening (WGS84)
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257223563;

/// Speed of light in meters per second
pub const VLIGHT_MS: f64 = 299_792_458.0;

/// Light time for one astronomical unit, in seconds
pub const AU_LIGHT_TIME: f64 = AU_M / VLIGHT_MS;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = SECONDS_PER_DAY / AU_LIGHT_TIME;

/// Schwarzschild radius of the Sun (au), 2·G·M☉/(c²·au), for gravitational light bending
pub const SUN_SCHWARZSCHILD: f64 = 1.97412574336e-8;

/// Ratio of the mean solar day to the stellar day (IAU 2000 Earth rotation rate)
pub const EARTH_ROTATION_RATE: f64 = 1.00273781191135448;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
