//! Simulation engine: the interaction core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the gesture recognizer, the
//! selection slot and the lifecycle registries. It processes player
//! commands, runs the ship systems and produces `InteractionSnapshot`s.
//! Completely headless; every outside collaborator comes in through
//! `Services`.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use armada_core::commands::{GameEvent, PlayerCommand};
use armada_core::config::SimConfig;
use armada_core::error::ConfigError;
use armada_core::events::SimEvent;
use armada_core::state::InteractionSnapshot;
use armada_core::types::{EntityId, Position, Ray, SimTime};

use crate::capabilities;
use crate::dispatch::{self, DispatchContext};
use crate::gesture::GestureRecognizer;
use crate::ids::entity_id;
use crate::lifecycle::LifecycleManager;
use crate::selection::SelectionController;
use crate::services::Services;
use crate::systems;

/// The simulation engine. Owns the ECS world and all interaction state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
    gestures: GestureRecognizer,
    selection: SelectionController,
    lifecycle: LifecycleManager,
    services: Services,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create an engine. Fails when the config holds values the engine
    /// cannot run with (e.g. a non-positive double-tap threshold).
    pub fn new(config: SimConfig, services: Services) -> Result<Self, ConfigError> {
        config.validate()?;
        let gestures = GestureRecognizer::new(config.double_tap_threshold)?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut world = World::new();
        let lifecycle = LifecycleManager::new(&mut world, &config, rng)?;

        debug!(
            threshold = gestures.threshold(),
            player_team = config.player_team,
            seed = ?config.seed,
            "engine created"
        );
        Ok(Self {
            world,
            time: SimTime::default(),
            selection: SelectionController::new(config.player_team),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            gestures,
            lifecycle,
            services,
            config,
            despawn_buffer: Vec::new(),
        })
    }

    /// Create an engine wired to the in-process headless services.
    pub fn headless(config: SimConfig) -> Result<Self, ConfigError> {
        let services = Services::headless(&config);
        Self::new(config, services)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> InteractionSnapshot {
        let now = self.time.elapsed_secs;
        self.gestures.update(now);
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.selection,
            &self.lifecycle,
            events,
        )
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    /// Squadron ids still aboard the selected ship. Empty without one.
    pub fn squadron_ids(&self) -> Vec<u32> {
        self.selection
            .entity()
            .map(|e| capabilities::squadron_ids(&self.world, e))
            .unwrap_or_default()
    }

    /// Spawn a battleship immediately, outside the command queue.
    pub fn spawn_ship(&mut self, x: f64, z: f64, team: u8, controlled_by_ai: bool) -> EntityId {
        let entity = self.lifecycle.spawn(
            &mut self.world,
            Position::new(x, 0.0, z),
            team,
            controlled_by_ai,
            &mut self.events,
        );
        entity_id(entity)
    }

    /// Mutable world access for tests that need to stage damage directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run destruction side effects for a ship directly (for tests).
    #[cfg(test)]
    pub fn destroy_ship(
        &mut self,
        entity: EntityId,
        explosion: Option<&crate::lifecycle::ExplosionDescriptor>,
    ) -> bool {
        let Some(entity) = crate::ids::entity_from_id(entity) else {
            return false;
        };
        self.lifecycle.on_destroyed(
            &mut self.world,
            self.services.physics.as_mut(),
            entity,
            explosion,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Tap { ray, over_ui } => self.handle_tap(&ray, over_ui),
            PlayerCommand::Event { event } => self.dispatch_event(event),
            PlayerCommand::NamedEvent { name } => {
                let mut ctx = self.dispatch_context();
                dispatch::dispatch_named(&mut ctx, &name);
            }
            PlayerCommand::SpawnShip {
                x,
                z,
                team,
                controlled_by_ai,
            } => {
                self.spawn_ship(x, z, team, controlled_by_ai);
            }
        }
    }

    fn dispatch_event(&mut self, event: GameEvent) {
        let mut ctx = self.dispatch_context();
        dispatch::dispatch(&mut ctx, event);
    }

    fn dispatch_context(&mut self) -> DispatchContext<'_> {
        DispatchContext {
            world: &mut self.world,
            selection: &mut self.selection,
            ui: self.services.ui.as_mut(),
            squadrons: self.services.squadrons.as_ref(),
            events: &mut self.events,
        }
    }

    /// Route one tap: attack, reselect, camera focus or move order.
    fn handle_tap(&mut self, ray: &Ray, over_ui: bool) {
        if over_ui {
            trace!("tap over ui dropped");
            return;
        }
        let Some(hit) = self.services.raycaster.raycast(&self.world, ray) else {
            trace!("tap hit nothing");
            return;
        };

        let kind = self.gestures.classify(self.time.elapsed_secs);

        let Some(target) = hit.entity else {
            let destination = hit.point.on_plane(self.config.ship_plane_y);
            self.selection
                .try_move_to(&mut self.world, destination, &mut self.events);
            return;
        };

        if self
            .selection
            .try_interact(&mut self.world, target, &mut self.events)
        {
            return;
        }

        if !self.selection.is_same_entity(target) {
            self.reselect(target);
        } else if kind.is_double() {
            self.focus_camera(target);
        }
    }

    fn reselect(&mut self, target: Entity) {
        self.selection
            .init_selection(&mut self.world, target, &mut self.events);
        dispatch::show_selection_controls(self.services.ui.as_mut(), &self.selection);
        self.events.push(SimEvent::SelectionChanged {
            entity: self.selection.entity().map(entity_id),
        });
    }

    fn focus_camera(&mut self, target: Entity) {
        let entity = entity_id(target);
        self.services.camera.focus_on(entity);
        self.events.push(SimEvent::CameraFocused { entity });
        debug!(?entity, "camera focus");
    }

    /// Run all per-tick systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        systems::movement::run(&mut self.world, dt);
        systems::gunnery::run(&mut self.world, dt);

        let selection_lost = systems::destruction::run(
            &mut self.world,
            &mut self.lifecycle,
            &mut self.selection,
            self.services.physics.as_mut(),
            &mut self.events,
        );
        if selection_lost {
            dispatch::show_selection_controls(self.services.ui.as_mut(), &self.selection);
            self.events.push(SimEvent::SelectionChanged { entity: None });
        }

        systems::cleanup::run(
            &mut self.world,
            &mut self.lifecycle,
            dt,
            &mut self.despawn_buffer,
        );
    }
}
