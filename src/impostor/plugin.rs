//! Provides a Bevy `Plugin` that keeps a `SphereSamplingSolver` in sync with
//! the active `SamplingConfig`.

use super::{config::SamplingConfig, events::SamplingConfigChangedEvent, solver::SphereSamplingSolver};
use bevy::prelude::*;

/// A Bevy `Plugin` responsible for the impostor sampling resources.
///
/// - Initializes `SamplingConfig` (default unless already inserted).
/// - Inserts a `SphereSamplingSolver` built from that config.
/// - Registers `SamplingConfigChangedEvent` and a system applying it.
///
/// An invalid config inserted before the plugin is replaced by the default.
pub struct ImpostorSamplingPlugin;

impl Plugin for ImpostorSamplingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SamplingConfig>();

        let config = *app.world.resource::<SamplingConfig>();
        let solver = match SphereSamplingSolver::new(config) {
            Ok(solver) => solver,
            Err(e) => {
                warn!("ImpostorSamplingPlugin: {}. Falling back to default config.", e);
                app.insert_resource(SamplingConfig::default());
                SphereSamplingSolver::default()
            }
        };

        app.insert_resource(solver)
            .add_event::<SamplingConfigChangedEvent>()
            .add_systems(Update, sampling_config_changed_event_handler);
    }
}

/// Applies every `SamplingConfigChangedEvent` in order.
///
/// Valid configs replace both the `SamplingConfig` resource and the solver's
/// config; the solver rebuilds lazily on its next access. Invalid configs are
/// logged and dropped.
fn sampling_config_changed_event_handler(
    mut events: EventReader<SamplingConfigChangedEvent>,
    mut config: ResMut<SamplingConfig>,
    mut solver: ResMut<SphereSamplingSolver>,
) {
    for event in events.read() {
        match solver.set_config(event.new_config) {
            Ok(()) => {
                info!(
                    "SphereSamplingSolver config updated due to SamplingConfigChangedEvent: {:?}",
                    event.new_config
                );
                *config = event.new_config;
            }
            Err(e) => warn!("Ignoring SamplingConfigChangedEvent: {}", e),
        }
    }
}
