// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const TAU: f32 = std::f32::consts::TAU;
    pub const PI: f32 = std::f32::consts::PI;
    pub const PI_OVER_2: f32 = std::f32::consts::FRAC_PI_2;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f32) -> bool {
        a.abs() < EPSILON
    }
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::PI;

    /// Konvertiert Grad zu Radiant
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * PI / 180.0
    }

    /// Konvertiert Radiant zu Grad
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * 180.0 / PI
    }
}

/// Ganzzahl-Hilfsfunktionen für Raster und Atlanten
pub mod grid {
    /// Kleinste Seitenlänge `n` eines quadratischen Rasters mit `n * n >= count`.
    ///
    /// Arbeitet rein ganzzahlig, damit große Zählwerte nicht an der
    /// f32-Genauigkeit scheitern.
    pub fn ceil_sqrt(count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let mut n = (count as f64).sqrt() as usize;
        // Rundungsfehler der Gleitkomma-Wurzel in beide Richtungen korrigieren
        while n * n > count {
            n -= 1;
        }
        while n * n < count {
            n += 1;
        }
        n
    }
}
