// src/math/geometry/sphere/coordinates.rs

use crate::math::{types::*, utils::*};
use bevy::math::Mat3;

/// Konvertiert geografische Koordinaten (Breitengrad, Längengrad) in kartesische 3D-Koordinaten.
/// Die Y-Achse ist die Rotationsachse der Kugel (zeigt zum Nordpol).
/// Die X-Achse geht durch den Punkt (lat=0, lon=0).
/// Die Z-Achse geht durch den Punkt (lat=0, lon=90 Grad).
///
/// Die Winkel werden nicht geklemmt: Breitengrade jenseits von ±π/2 laufen
/// über den Pol hinweg weiter, das Ergebnis bleibt auf der Kugel.
///
/// # Arguments
/// * `latitude_rad` - Breitengrad (Elevation) in Radiant.
/// * `longitude_rad` - Längengrad (Azimut) in Radiant.
/// * `radius` - Der Radius der Kugel.
pub fn latlon_to_cartesian(latitude_rad: f32, longitude_rad: f32, radius: f32) -> Point3D {
    let cos_lat = latitude_rad.cos();
    let x = radius * cos_lat * longitude_rad.cos();
    let y = radius * latitude_rad.sin();
    let z = radius * cos_lat * longitude_rad.sin();
    Point3D::new(x, y, z)
}

/// Konvertiert kartesische 3D-Koordinaten in geografische Koordinaten.
///
/// # Returns
/// Ein Tupel `(latitude_rad, longitude_rad)`. Für den Nullvektor `(0.0, 0.0)`.
pub fn cartesian_to_latlon(point: Point3D) -> (f32, f32) {
    let length = point.length();
    if comparison::nearly_zero(length) {
        return (0.0, 0.0);
    }
    let p_norm = point / length;
    let latitude_rad = p_norm.y.clamp(-1.0, 1.0).asin();
    let longitude_rad = p_norm.z.atan2(p_norm.x);
    (latitude_rad, longitude_rad)
}

/// Orientierung einer Kamera an `position`, die auf den Ursprung blickt.
///
/// Kamerakonvention wie in Bevy: lokale -Z ist die Blickrichtung, +Y ist oben.
/// An den Polen (Blickrichtung parallel zu Y) wird +Z als Oben-Referenz verwendet.
pub fn look_at_origin(position: Point3D) -> Quat {
    let back = position.normalize_or_zero();
    if back == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let mut right = Vec3::Y.cross(back);
    if right.length_squared() < constants::EPSILON {
        right = Vec3::Z.cross(back);
    }
    let right = right.normalize();
    let up = back.cross(right);

    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_latlon_cartesian_conversion() {
        let radius = 100.0;
        // Nordpol
        let cart_np = latlon_to_cartesian(FRAC_PI_2, 0.0, radius);
        assert_abs_diff_eq!(cart_np.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cart_np.y, radius, epsilon = 1e-4);
        assert_abs_diff_eq!(cart_np.z, 0.0, epsilon = 1e-4);

        // Äquator bei lon=PI/2 (positiv Z)
        let cart_eq_z = latlon_to_cartesian(0.0, FRAC_PI_2, radius);
        assert_abs_diff_eq!(cart_eq_z.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cart_eq_z.z, radius, epsilon = 1e-4);

        let (lat, lon) = cartesian_to_latlon(cart_eq_z);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(lon, FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn test_latitude_past_pole_stays_on_sphere() {
        // 120° Elevation: über den Nordpol hinweg auf die Rückseite
        let p = latlon_to_cartesian(2.0 * PI / 3.0, 0.0, 1.0);
        assert_abs_diff_eq!(p.length(), 1.0, epsilon = 1e-6);
        assert!(p.x < 0.0);
        assert!(p.y > 0.0);
    }

    #[test]
    fn test_cartesian_to_latlon_zero_vector() {
        assert_eq!(cartesian_to_latlon(Vec3::ZERO), (0.0, 0.0));
    }

    #[test]
    fn test_look_at_origin_points_forward_to_center() {
        let positions = [
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, -5.0, 0.0),
        ];
        for position in positions {
            let rotation = look_at_origin(position);
            let forward = rotation * Vec3::NEG_Z;
            let expected = -position.normalize();
            assert_abs_diff_eq!(forward.x, expected.x, epsilon = 1e-5);
            assert_abs_diff_eq!(forward.y, expected.y, epsilon = 1e-5);
            assert_abs_diff_eq!(forward.z, expected.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_look_at_origin_keeps_horizon_level() {
        let rotation = look_at_origin(Vec3::new(0.0, 0.0, 4.0));
        let right = rotation * Vec3::X;
        assert_abs_diff_eq!(right.y, 0.0, epsilon = 1e-6);
    }
}
