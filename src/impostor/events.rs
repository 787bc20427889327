use bevy::prelude::*;

use super::config::SamplingConfig;

/// Fordert an, die aktive Sampling-Konfiguration zu ersetzen.
#[derive(Event, Debug, Clone)]
pub struct SamplingConfigChangedEvent {
    pub new_config: SamplingConfig,
}
