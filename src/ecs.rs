//! Bevy adapter: lifecycle signals arrive as messages and are handled against
//! world and registry resources.

use bevy_app::{App, Plugin, Update};
use bevy_ecs::message::{Message, MessageReader};
use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use crate::config::GenerationConfig;
use crate::generator::SweepReport;
use crate::lifecycle::{LifecycleSignal, RandomFactions};
use crate::model::World;
use crate::registry::InMemoryRegistry;

#[derive(Message, Clone, Copy, Debug)]
pub struct LifecycleMessage(pub LifecycleSignal);

/// The currently loaded world, if any.
#[derive(Resource, Debug)]
pub struct WorldResource(pub World);

#[derive(Resource, Debug, Default)]
pub struct RegistryResource(pub InMemoryRegistry);

#[derive(Resource, Debug, Default)]
pub struct RandomFactionsHost(pub RandomFactions);

/// Report from the most recent world-loaded sweep.
#[derive(Resource, Debug, Default)]
pub struct LastSweep(pub Option<SweepReport>);

pub fn handle_lifecycle_messages(
    mut messages: MessageReader<LifecycleMessage>,
    mut host: ResMut<RandomFactionsHost>,
    mut world: Option<ResMut<WorldResource>>,
    mut registry: ResMut<RegistryResource>,
    mut last: ResMut<LastSweep>,
) {
    for LifecycleMessage(signal) in messages.read() {
        let world = world.as_deref_mut().map(|w| &mut w.0);
        if let Some(report) = host.0.handle(*signal, world, &mut registry.0) {
            last.0 = Some(report);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RandomFactionsPlugin {
    pub config: GenerationConfig,
}

impl Plugin for RandomFactionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LifecycleMessage>();
        app.insert_resource(RandomFactionsHost(RandomFactions::new(self.config)));
        app.init_resource::<RegistryResource>();
        app.init_resource::<LastSweep>();
        app.add_systems(Update, handle_lifecycle_messages);
    }
}
