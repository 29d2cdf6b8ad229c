pub mod length;
pub mod mass;
pub mod time;

#[cfg(test)]
mod length_test;
#[cfg(test)]
mod time_test;

pub use length::{Length, AU_M, EARTH_RADIUS_M, SOLAR_RADIUS_M};
pub use mass::{Mass, EARTH_MASS_KG, SOLAR_MASS_KG};
pub use time::{Time, SECONDS_PER_DAY, SECONDS_PER_YEAR};
