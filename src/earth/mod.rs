//! Earth models: rotation angle and intermediate frames, precession and
//! nutation, station geometry, and the Earth ephemeris provider.

pub mod ephemeris;
pub mod orientation;
pub mod rotation;
pub mod site;

pub use ephemeris::{EarthEphemeris, EarthState, FixedEarth, KeplerianEphemeris};
pub use orientation::{nutn80, obleq, prec, rnut80, Iau80Npb, PrecessionNutation};
pub use rotation::{cirs_matrix, eors, era00, sp00};
pub use site::{geodetic_to_geocentric, observer_pv, polar_motion_matrix, ObservingSite};
