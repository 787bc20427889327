// src/math/types/mod.rs

// Re-export häufig verwendete externe Typen
pub use bevy::math::{Quat, Rect, UVec2, Vec2, Vec3};

// Einheitliche Typen für das gesamte Modul
pub type Point3D = Vec3;
