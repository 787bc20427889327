// src/impostor/mod.rs

// Kamerapositionen für das Backen von Impostors
pub mod atlas;
pub mod config;
pub mod events;
pub mod plugin;
pub mod solver;

pub use self::atlas::AtlasGrid;
pub use self::config::{GridType, MAX_SAMPLE_COUNT, SamplingConfig, SamplingPreset};
pub use self::events::SamplingConfigChangedEvent;
pub use self::plugin::ImpostorSamplingPlugin;
pub use self::solver::{SamplingLayout, SphereSamplingSolver, ViewSample};
