// src/math/geometry/sphere/mod.rs

// Kugel-spezifische Funktionalität
pub mod coordinates;

pub use self::coordinates::{cartesian_to_latlon, latlon_to_cartesian, look_at_origin};
