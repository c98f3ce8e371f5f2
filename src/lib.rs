pub mod astrometry;
pub mod constants;
pub mod deflection;
pub mod earth;
pub mod errors;
pub mod ref_frames;
pub mod refraction;
pub mod star;
pub mod time;

pub use astrometry::{Astrom, ObservedCoord, ObservedPlace};
pub use errors::{SidereaError, TimeStatus};
pub use star::CatalogStar;
