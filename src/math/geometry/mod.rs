// src/math/geometry/mod.rs
pub mod sphere;
