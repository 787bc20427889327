// src/impostor/solver.rs

use crate::math::{
    error::MathResult,
    geometry::sphere::{latlon_to_cartesian, look_at_origin},
    types::*,
    utils::{angles, constants, grid},
};
use bevy::log::debug;
use bevy::prelude::Resource;

use super::atlas::AtlasGrid;
use super::config::{GridType, MAX_SAMPLE_COUNT, SamplingConfig};

/// Ein einzelner Blickpunkt mit allem, was eine Capture-Pipeline zum Platzieren der Kamera braucht.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSample {
    pub index: usize,
    /// Zelle im Atlas-Raster.
    pub cell: UVec2,
    /// Einheitsvektor vom Zentrum zur Kamera.
    pub direction: Point3D,
    /// `direction * radius`.
    pub position: Point3D,
    /// Kamera-Orientierung mit Blick auf den Ursprung.
    pub rotation: Quat,
}

/// Aus einer validierten Konfiguration abgeleitete, unveränderliche Verteilung der Blickpunkte.
///
/// Kann direkt verwendet werden, wenn pro Konfiguration ein frisches Layout
/// gebaut wird; der [`SphereSamplingSolver`] cached genau dieses Layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingLayout {
    config: SamplingConfig,
    total_sample_count: usize,
    subdivision_factor: usize,
    /// Nur im PseudoFibonacci-Modus befüllt, Länge `2 * latitude_samples + 1`.
    latitude_cluster_sizes: Vec<usize>,
}

impl SamplingLayout {
    pub fn build(config: &SamplingConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self::build_validated(config))
    }

    /// Setzt eine validierte Konfiguration voraus: `validate()` begrenzt
    /// `longitude_samples * (1 + 2 * latitude_samples)` auf `MAX_SAMPLE_COUNT`,
    /// damit bleiben Ringanzahl, Punktzahl und `subdivision_factor²` im Wertebereich.
    fn build_validated(config: &SamplingConfig) -> Self {
        let latitude_samples = config.latitude_samples as usize;
        let longitude_samples = config.longitude_samples as usize;

        let (latitude_cluster_sizes, total_sample_count) = match config.grid_type {
            GridType::UniformGrid => {
                let total = config.sample_count_bound().unwrap_or(MAX_SAMPLE_COUNT);
                (Vec::new(), total as usize)
            }
            GridType::PseudoFibonacci => {
                let clusters = Self::fibonacci_clusters(latitude_samples, longitude_samples);
                let total = clusters.iter().sum();
                (clusters, total)
            }
        };

        Self {
            config: *config,
            total_sample_count,
            subdivision_factor: grid::ceil_sqrt(total_sample_count),
            latitude_cluster_sizes,
        }
    }

    /// Punktzahl pro Ring, symmetrisch um den Äquator (Index `latitude_samples`).
    fn fibonacci_clusters(latitude_samples: usize, longitude_samples: usize) -> Vec<usize> {
        let mut clusters = vec![0; 2 * latitude_samples + 1];
        let denominator = 2.0 * (latitude_samples as f32 + 1.0);

        for i in 0..=latitude_samples {
            let ring_angle = i as f32 * constants::PI / denominator;
            let size = (ring_angle.cos() * longitude_samples as f32)
                .round_ties_even()
                .max(0.0) as usize;
            clusters[latitude_samples + i] = size;
            clusters[latitude_samples - i] = size;
        }
        clusters
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn total_sample_count(&self) -> usize {
        self.total_sample_count
    }

    /// `ceil(sqrt(total_sample_count))`: Seitenlänge des Atlas-Rasters.
    pub fn subdivision_factor(&self) -> usize {
        self.subdivision_factor
    }

    pub fn latitude_cluster_sizes(&self) -> &[usize] {
        &self.latitude_cluster_sizes
    }

    pub fn atlas_grid(&self) -> AtlasGrid {
        AtlasGrid::from_subdivision(self.subdivision_factor)
    }

    /// Bricht einen beliebigen Index modulo `subdivision_factor²` um.
    ///
    /// Der Umbruch ist gewollt: Aufrufer kacheln Indizes über mehrere
    /// Instanzen im selben Raster.
    pub fn wrap_index(&self, index: usize) -> usize {
        index % (self.subdivision_factor * self.subdivision_factor)
    }

    /// Elevation und Azimut (Radiant) für einen bereits umgebrochenen Index.
    fn angles_for(&self, m: usize) -> (f32, f32) {
        let config = &self.config;
        let latitude_samples = config.latitude_samples as i64;

        match config.grid_type {
            GridType::UniformGrid => {
                let longitude_samples = config.longitude_samples as usize;
                let column = (m % longitude_samples) as f32;
                let row = (m / longitude_samples) as i64;

                let azimuth_deg = column * config.longitude_angular_step + config.longitude_offset;
                let elevation_deg = (row - latitude_samples + config.latitude_offset as i64) as f32
                    * config.latitude_angular_step;
                (angles::deg_to_rad(elevation_deg), angles::deg_to_rad(azimuth_deg))
            }
            GridType::PseudoFibonacci => {
                // Indizes zwischen total_sample_count und subdivision² haben keinen eigenen Ring
                let m = m % self.total_sample_count;

                let mut running_total = 0;
                for (ring, &size) in self.latitude_cluster_sizes.iter().enumerate() {
                    if running_total + size > m {
                        let elevation_deg =
                            (ring as i64 - latitude_samples) as f32 * config.latitude_angular_step;
                        let azimuth =
                            (m - running_total) as f32 / size as f32 * constants::TAU;
                        return (angles::deg_to_rad(elevation_deg), azimuth);
                    }
                    running_total += size;
                }
                // m < total_sample_count == Summe aller Cluster
                unreachable!("sample index {} outside of fibonacci clusters", m)
            }
        }
    }

    /// Einheitsvektor für den Blickpunkt `index` (beliebiger Index, wird umgebrochen).
    pub fn direction(&self, index: usize) -> Point3D {
        let (elevation, azimuth) = self.angles_for(self.wrap_index(index));
        latlon_to_cartesian(elevation, azimuth, 1.0)
    }

    /// Alle Richtungen in Index-Reihenfolge, `total_sample_count` Stück.
    pub fn directions(&self) -> Vec<Point3D> {
        (0..self.total_sample_count)
            .map(|i| self.direction(i))
            .collect()
    }

    pub fn scaled_position(&self, index: usize, radius: f32) -> Point3D {
        self.direction(index) * radius
    }

    pub fn view_rotation(&self, index: usize) -> Quat {
        look_at_origin(self.direction(index))
    }

    pub fn sample(&self, index: usize, radius: f32) -> ViewSample {
        let direction = self.direction(index);
        ViewSample {
            index,
            cell: self.atlas_grid().cell(index),
            direction,
            position: direction * radius,
            rotation: look_at_origin(direction),
        }
    }

    pub fn samples(&self, radius: f32) -> Vec<ViewSample> {
        (0..self.total_sample_count)
            .map(|i| self.sample(i, radius))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SolverState {
    Dirty,
    Clean(SamplingLayout),
}

/// Berechnet die Kamerapositionen für das Backen von Impostors.
///
/// Das abgeleitete Layout wird lazy gebaut: beim ersten Zugriff und immer
/// dann, wenn sich die gehaltene Konfiguration strukturell von der zuletzt
/// verwendeten unterscheidet. Jeder öffentliche Zugriff ruft zuerst
/// [`rebuild_if_dirty`](Self::rebuild_if_dirty) auf.
#[derive(Debug, Clone, Resource)]
pub struct SphereSamplingSolver {
    config: SamplingConfig,
    state: SolverState,
}

impl Default for SphereSamplingSolver {
    fn default() -> Self {
        Self {
            config: SamplingConfig::default(),
            state: SolverState::Dirty,
        }
    }
}

impl SphereSamplingSolver {
    pub fn new(config: SamplingConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: SolverState::Dirty,
        })
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Ersetzt die Konfiguration. Ungültige Konfigurationen werden abgelehnt,
    /// der Solver behält dann die bisherige.
    pub fn set_config(&mut self, config: SamplingConfig) -> MathResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// `true`, solange das Layout nicht zur gehaltenen Konfiguration passt.
    pub fn is_dirty(&self) -> bool {
        match &self.state {
            SolverState::Clean(layout) => layout.config != self.config,
            SolverState::Dirty => true,
        }
    }

    /// Baut das Layout neu, falls nötig. Gibt zurück, ob neu gebaut wurde.
    pub fn rebuild_if_dirty(&mut self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        let layout = SamplingLayout::build_validated(&self.config);
        debug!(
            "SphereSamplingSolver: rebuilt layout for {:?}: {} samples, subdivision {}",
            self.config.grid_type, layout.total_sample_count, layout.subdivision_factor
        );
        self.state = SolverState::Clean(layout);
        true
    }

    /// Aktuelles Layout (nach evtl. Neuaufbau).
    pub fn layout(&mut self) -> &SamplingLayout {
        self.rebuild_if_dirty();
        match &self.state {
            SolverState::Clean(layout) => layout,
            SolverState::Dirty => unreachable!("layout is rebuilt before access"),
        }
    }

    pub fn total_sample_count(&mut self) -> usize {
        self.layout().total_sample_count()
    }

    pub fn subdivision_factor(&mut self) -> usize {
        self.layout().subdivision_factor()
    }

    pub fn latitude_cluster_sizes(&mut self) -> &[usize] {
        self.layout().latitude_cluster_sizes()
    }

    pub fn direction(&mut self, index: usize) -> Point3D {
        self.layout().direction(index)
    }

    pub fn directions(&mut self) -> Vec<Point3D> {
        self.layout().directions()
    }

    pub fn scaled_position(&mut self, index: usize, radius: f32) -> Point3D {
        self.layout().scaled_position(index, radius)
    }

    pub fn view_rotation(&mut self, index: usize) -> Quat {
        self.layout().view_rotation(index)
    }

    pub fn sample(&mut self, index: usize, radius: f32) -> ViewSample {
        self.layout().sample(index, radius)
    }

    pub fn samples(&mut self, radius: f32) -> Vec<ViewSample> {
        self.layout().samples(radius)
    }
}
