// src/impostor/atlas.rs

use crate::math::{
    error::{MathError, MathResult},
    types::{Rect, UVec2, Vec2},
};

use super::solver::SphereSamplingSolver;

/// Quadratisches Atlas-Raster, in das die Blickpunkte eines Impostors gelegt werden.
///
/// Zelle `index` liegt in Spalte `index mod n` und Zeile `index / n`, wobei
/// Indizes wie beim Solver modulo `n²` umgebrochen werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasGrid {
    subdivision: u32,
}

impl AtlasGrid {
    pub fn new(subdivision: u32) -> MathResult<Self> {
        if subdivision == 0 {
            return Err(MathError::invalid_config(
                "Atlas subdivision must be greater than 0.",
            ));
        }
        Ok(Self { subdivision })
    }

    /// Raster passend zur aktuellen Konfiguration des Solvers.
    pub fn from_solver(solver: &mut SphereSamplingSolver) -> Self {
        solver.layout().atlas_grid()
    }

    /// Nur für bereits validierte Unterteilungen: `validate()` begrenzt sie auf
    /// 4096, Werte außerhalb von `1..=u32::MAX` werden geklemmt statt abgeschnitten.
    pub(crate) fn from_subdivision(subdivision: usize) -> Self {
        Self {
            subdivision: u32::try_from(subdivision.max(1)).unwrap_or(u32::MAX),
        }
    }

    pub fn subdivision(&self) -> u32 {
        self.subdivision
    }

    /// Anzahl der Zellen (`n²`).
    pub fn capacity(&self) -> usize {
        let n = self.subdivision as usize;
        n * n
    }

    /// Spalte (x) und Zeile (y) der Zelle für `index`.
    pub fn cell(&self, index: usize) -> UVec2 {
        let n = self.subdivision as usize;
        let m = index % self.capacity();
        UVec2::new((m % n) as u32, (m / n) as u32)
    }

    /// Normalisierte UV-Grenzen der Zelle in `[0, 1]²`.
    pub fn uv_rect(&self, index: usize) -> Rect {
        let cell = self.cell(index);
        let size = 1.0 / self.subdivision as f32;
        let min = Vec2::new(cell.x as f32 * size, cell.y as f32 * size);
        Rect::from_corners(min, min + Vec2::splat(size))
    }

    /// Pixelgröße einer Zelle bei gegebener Atlas-Auflösung.
    pub fn frame_resolution(&self, atlas_resolution: u32) -> u32 {
        atlas_resolution / self.subdivision
    }
}
