// src/impostor/config.rs

use crate::math::error::{MathError, MathResult};
use bevy::prelude::{Reflect, Resource};
use serde::{Deserialize, Serialize};

/// Anordnung der Blickpunkte auf der Kugel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum GridType {
    /// Gleichmäßiges Längen-/Breitengrad-Raster, jeder Ring hat `longitude_samples` Punkte.
    #[default]
    UniformGrid,
    /// Ringe mit elevationsabhängiger Punktzahl (weniger Punkte zu den Polen hin).
    PseudoFibonacci,
}

/// Obergrenze für die Anzahl der Blickpunkte: ein Atlas-Raster von höchstens 4096 x 4096 Zellen.
pub const MAX_SAMPLE_COUNT: u64 = 1 << 24;

/// Konfiguration für die Erzeugung der Kamerapositionen eines Impostors.
///
/// Reiner Werttyp: zwei Konfigurationen sind genau dann gleich, wenn alle
/// Felder gleich sind. Der Solver vergleicht darüber, ob er neu rechnen muss.
/// Winkel sind in Grad angegeben.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub grid_type: GridType,
    /// Anzahl der Breitenkreise oberhalb bzw. unterhalb des Äquators.
    pub latitude_samples: u32,
    /// Index-Versatz beim Auswählen der Breitengrad-Vielfachen.
    pub latitude_offset: i32,
    /// Abstand zwischen Breitenkreisen (Grad, > 0).
    pub latitude_angular_step: f32,
    /// Punkte pro Ring (UniformGrid) bzw. Basis-Auflösung am Äquator (PseudoFibonacci).
    pub longitude_samples: u32,
    /// Azimutale Drehung des gesamten Rasters (Grad).
    pub longitude_offset: f32,
    /// Abstand zwischen Längengraden (Grad, > 0).
    pub longitude_angular_step: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            grid_type: GridType::UniformGrid,
            latitude_samples: 2,
            latitude_offset: 0,
            latitude_angular_step: 30.0,
            longitude_samples: 12,
            longitude_offset: 0.0,
            longitude_angular_step: 30.0,
        }
    }
}

impl SamplingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid_type(mut self, grid_type: GridType) -> Self {
        self.grid_type = grid_type;
        self
    }

    pub fn with_latitude(mut self, samples: u32, angular_step: f32) -> Self {
        self.latitude_samples = samples;
        self.latitude_angular_step = angular_step;
        self
    }

    pub fn with_latitude_offset(mut self, offset: i32) -> Self {
        self.latitude_offset = offset;
        self
    }

    pub fn with_longitude(mut self, samples: u32, angular_step: f32) -> Self {
        self.longitude_samples = samples;
        self.longitude_angular_step = angular_step;
        self
    }

    pub fn with_longitude_offset(mut self, offset: f32) -> Self {
        self.longitude_offset = offset;
        self
    }

    /// Verteilt `samples` Punkte gleichmäßig über einen vollen Ring (360° / samples).
    pub fn with_full_ring(mut self, samples: u32) -> Self {
        self.longitude_samples = samples;
        if samples > 0 {
            self.longitude_angular_step = 360.0 / samples as f32;
        }
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.longitude_samples == 0 {
            return Err(MathError::invalid_config(
                "longitude_samples must be greater than 0.",
            ));
        }
        if !(self.latitude_angular_step.is_finite() && self.latitude_angular_step > 0.0) {
            return Err(MathError::invalid_config(format!(
                "latitude_angular_step must be a positive, finite angle, got {}.",
                self.latitude_angular_step
            )));
        }
        if !(self.longitude_angular_step.is_finite() && self.longitude_angular_step > 0.0) {
            return Err(MathError::invalid_config(format!(
                "longitude_angular_step must be a positive, finite angle, got {}.",
                self.longitude_angular_step
            )));
        }
        match self.sample_count_bound() {
            Some(count) if count <= MAX_SAMPLE_COUNT => {}
            _ => {
                return Err(MathError::invalid_config(format!(
                    "{} longitude samples on {} latitude rings exceed the maximum of {} samples.",
                    self.longitude_samples,
                    u64::from(self.latitude_samples) * 2 + 1,
                    MAX_SAMPLE_COUNT
                )));
            }
        }
        if !self.longitude_offset.is_finite() {
            return Err(MathError::invalid_config(format!(
                "longitude_offset must be finite, got {}.",
                self.longitude_offset
            )));
        }
        Ok(())
    }

    /// `longitude_samples * (1 + 2 * latitude_samples)`, `None` bei Überlauf.
    ///
    /// Im UniformGrid-Modus exakt die Punktzahl, im PseudoFibonacci-Modus eine
    /// obere Schranke, da kein Ring mehr als `longitude_samples` Punkte hat.
    pub fn sample_count_bound(&self) -> Option<u64> {
        let rings = u64::from(self.latitude_samples)
            .checked_mul(2)?
            .checked_add(1)?;
        u64::from(self.longitude_samples).checked_mul(rings)
    }

    /// Validiert und gibt die Konfiguration zurück, z.B. am Ende einer `with_*`-Kette.
    pub fn validated(self) -> MathResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Liest eine Konfiguration aus JSON. Fehlende Felder fallen auf `Default` zurück.
    pub fn from_json_str(json: &str) -> MathResult<Self> {
        let config: SamplingConfig = serde_json::from_str(json).map_err(|e| {
            MathError::invalid_config(format!("Could not parse sampling config: {}", e))
        })?;
        config.validated()
    }

    pub fn to_json_string(&self) -> MathResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            MathError::invalid_config(format!("Could not serialize sampling config: {}", e))
        })
    }
}

/// Vorgefertigte Konfigurationen für typische Impostor-Arten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum SamplingPreset {
    /// Volle Kugel, 5 Ringe zu je 16 Blickpunkten.
    Spherical,
    /// Nur obere Halbkugel, z.B. für Objekte auf dem Boden.
    Hemispherical,
    /// Ein einzelner Ring am Äquator (klassischer Billboard-Ring).
    HorizontalRing,
    /// Volle Kugel mit zu den Polen hin ausgedünnten Ringen.
    FibonacciSphere,
}

impl SamplingPreset {
    pub fn config(self) -> SamplingConfig {
        match self {
            SamplingPreset::Spherical => SamplingConfig::new()
                .with_grid_type(GridType::UniformGrid)
                .with_latitude(2, 30.0)
                .with_full_ring(16),
            // Offset == latitude_samples verschiebt die Ringe auf 0° bis 90°
            SamplingPreset::Hemispherical => SamplingConfig::new()
                .with_grid_type(GridType::UniformGrid)
                .with_latitude(2, 22.5)
                .with_latitude_offset(2)
                .with_full_ring(16),
            SamplingPreset::HorizontalRing => SamplingConfig::new()
                .with_grid_type(GridType::UniformGrid)
                .with_latitude(0, 10.0)
                .with_full_ring(8),
            SamplingPreset::FibonacciSphere => SamplingConfig::new()
                .with_grid_type(GridType::PseudoFibonacci)
                .with_latitude(4, 18.0)
                .with_full_ring(16),
        }
    }
}

impl From<SamplingPreset> for SamplingConfig {
    fn from(preset: SamplingPreset) -> Self {
        preset.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SamplingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_longitude_samples_rejected() {
        let config = SamplingConfig::new().with_longitude(0, 90.0);
        assert!(matches!(
            config.validate(),
            Err(MathError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_non_positive_angular_steps_rejected() {
        for step in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let lat = SamplingConfig::new().with_latitude(1, step);
            assert!(lat.validated().is_err(), "latitude step {} accepted", step);

            let lon = SamplingConfig::new().with_longitude(4, step);
            assert!(lon.validated().is_err(), "longitude step {} accepted", step);
        }
    }

    #[test]
    fn test_non_finite_longitude_offset_rejected() {
        let config = SamplingConfig::new().with_longitude_offset(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_count_limit() {
        let at_limit = SamplingConfig::new()
            .with_latitude(0, 10.0)
            .with_longitude(MAX_SAMPLE_COUNT as u32, 1.0);
        assert_eq!(at_limit.sample_count_bound(), Some(MAX_SAMPLE_COUNT));
        assert!(at_limit.validate().is_ok());

        let above_limit = at_limit.with_longitude(MAX_SAMPLE_COUNT as u32 + 1, 1.0);
        assert!(matches!(
            above_limit.validate(),
            Err(MathError::InvalidConfiguration { .. })
        ));

        let many_rings = SamplingConfig::new()
            .with_latitude(u32::MAX, 1.0)
            .with_longitude(1, 1.0);
        assert!(many_rings.validate().is_err());

        let huge = SamplingConfig::new()
            .with_latitude(u32::MAX, 1.0)
            .with_longitude(u32::MAX, 1.0);
        assert_eq!(huge.sample_count_bound(), None);
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_structural_equality() {
        let a = SamplingConfig::new().with_longitude(4, 90.0);
        let b = SamplingConfig::new().with_longitude(4, 90.0);
        assert_eq!(a, b);
        assert_ne!(a, b.with_latitude_offset(1));
        assert_ne!(a, b.with_grid_type(GridType::PseudoFibonacci));
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [
            SamplingPreset::Spherical,
            SamplingPreset::Hemispherical,
            SamplingPreset::HorizontalRing,
            SamplingPreset::FibonacciSphere,
        ] {
            assert!(preset.config().validate().is_ok(), "{:?}", preset);
        }
    }

    #[test]
    fn test_full_ring_step() {
        let config = SamplingConfig::new().with_full_ring(8);
        assert_eq!(config.longitude_samples, 8);
        assert_eq!(config.longitude_angular_step, 45.0);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config =
            SamplingConfig::from_json_str(r#"{ "grid_type": "PseudoFibonacci", "longitude_samples": 8 }"#)
                .unwrap();
        assert_eq!(config.grid_type, GridType::PseudoFibonacci);
        assert_eq!(config.longitude_samples, 8);
        assert_eq!(config.latitude_samples, SamplingConfig::default().latitude_samples);
    }

    #[test]
    fn test_from_json_validates() {
        let result = SamplingConfig::from_json_str(r#"{ "longitude_samples": 0 }"#);
        assert!(matches!(result, Err(MathError::InvalidConfiguration { .. })));

        let garbage = SamplingConfig::from_json_str("not json");
        assert!(matches!(garbage, Err(MathError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_json_keeps_config_equal() {
        let config = SamplingPreset::FibonacciSphere.config();
        let json = config.to_json_string().unwrap();
        assert_eq!(SamplingConfig::from_json_str(&json).unwrap(), config);
    }
}
