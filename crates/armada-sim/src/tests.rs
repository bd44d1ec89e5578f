//! Tests for the interaction engine: tap routing, selection, dispatch,
//! lifecycle and the ship systems.

use std::cell::RefCell;
use std::rc::Rc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use armada_core::commands::{GameEvent, PlayerCommand};
use armada_core::components::{Collider, Damageable, Debris, Parent, RigidBody, Selectable};
use armada_core::config::SimConfig;
use armada_core::enums::{FireMode, PopupId};
use armada_core::error::ConfigError;
use armada_core::events::SimEvent;
use armada_core::state::{InteractionSnapshot, ShipView};
use armada_core::types::{EntityId, Position, Ray};

use crate::capabilities;
use crate::engine::SimulationEngine;
use crate::headless::{ChaseCamera, HeadlessPhysics, HeadlessRaycaster, PopupBoard, SquadronCatalog};
use crate::ids::entity_from_id;
use crate::lifecycle::{ExplosionDescriptor, LifecycleManager};
use crate::services::{PhysicsService, RayHit, Raycaster, Services};

// ---- Fakes ----

#[derive(Debug, Clone, Copy, PartialEq)]
struct Impulse {
    body: Entity,
    upward_bias: f64,
}

/// Headless physics that records every impulse it applies.
#[derive(Clone, Default)]
struct RecordingPhysics {
    impulses: Rc<RefCell<Vec<Impulse>>>,
}

impl RecordingPhysics {
    fn impulses(&self) -> Vec<Impulse> {
        self.impulses.borrow().clone()
    }
}

impl PhysicsService for RecordingPhysics {
    fn bodies_within_radius(&self, world: &World, center: Position, radius: f64) -> Vec<Entity> {
        HeadlessPhysics.bodies_within_radius(world, center, radius)
    }

    fn apply_impulse(
        &mut self,
        world: &mut World,
        body: Entity,
        force: f64,
        position: Position,
        radius: f64,
        upward_bias: f64,
    ) {
        self.impulses.borrow_mut().push(Impulse { body, upward_bias });
        HeadlessPhysics.apply_impulse(world, body, force, position, radius, upward_bias);
    }
}

/// Raycaster returning whatever hit the test scripted last.
#[derive(Clone, Default)]
struct ScriptedRaycaster {
    hit: Rc<RefCell<Option<RayHit>>>,
}

impl ScriptedRaycaster {
    fn set(&self, hit: Option<RayHit>) {
        *self.hit.borrow_mut() = hit;
    }
}

impl Raycaster for ScriptedRaycaster {
    fn raycast(&self, _world: &World, _ray: &Ray) -> Option<RayHit> {
        *self.hit.borrow()
    }
}

struct Harness {
    engine: SimulationEngine,
    ui: PopupBoard,
    camera: ChaseCamera,
    physics: RecordingPhysics,
}

fn test_config() -> SimConfig {
    SimConfig {
        seed: Some(7),
        ..Default::default()
    }
}

fn harness_with(config: SimConfig, raycaster: Box<dyn Raycaster>) -> Harness {
    let ui = PopupBoard::new();
    let camera = ChaseCamera::new();
    let physics = RecordingPhysics::default();
    let services = Services {
        raycaster,
        ui: Box::new(ui.clone()),
        squadrons: Box::new(SquadronCatalog::new(&config.squadrons)),
        physics: Box::new(physics.clone()),
        camera: Box::new(camera.clone()),
    };
    let engine = SimulationEngine::new(config, services).unwrap();
    Harness {
        engine,
        ui,
        camera,
        physics,
    }
}

fn harness() -> Harness {
    let config = test_config();
    let raycaster = Box::new(HeadlessRaycaster::new(config.ship_plane_y));
    harness_with(config, raycaster)
}

// ---- Helpers ----

fn tap(engine: &mut SimulationEngine, x: f64, z: f64) -> InteractionSnapshot {
    engine.queue_command(PlayerCommand::Tap {
        ray: Ray::straight_down(x, z),
        over_ui: false,
    });
    engine.tick()
}

fn named(engine: &mut SimulationEngine, name: &str) -> InteractionSnapshot {
    engine.queue_command(PlayerCommand::NamedEvent {
        name: name.to_string(),
    });
    engine.tick()
}

fn send(engine: &mut SimulationEngine, event: GameEvent) -> InteractionSnapshot {
    engine.queue_command(PlayerCommand::Event { event });
    engine.tick()
}

fn entity(id: EntityId) -> Entity {
    entity_from_id(id).unwrap()
}

fn ship(snap: &InteractionSnapshot, id: EntityId) -> &ShipView {
    snap.ships.iter().find(|s| s.entity == id).unwrap()
}

fn count(snap: &InteractionSnapshot, pred: impl Fn(&SimEvent) -> bool) -> usize {
    snap.events.iter().filter(|e| pred(e)).count()
}

fn set_hull(engine: &mut SimulationEngine, id: EntityId, hull: f64) {
    let damageable = engine
        .world_mut()
        .query_one_mut::<&mut Damageable>(entity(id))
        .unwrap();
    damageable.hull = hull;
}

fn selected(engine: &SimulationEngine) -> Option<EntityId> {
    engine.selection().entity().map(crate::ids::entity_id)
}

// ---- Configuration ----

#[test]
fn test_engine_rejects_zero_threshold() {
    let config = SimConfig {
        double_tap_threshold: 0.0,
        ..Default::default()
    };
    let err = SimulationEngine::headless(config).err();
    assert!(matches!(
        err,
        Some(ConfigError::NonPositiveThreshold {
            name: "double_tap_threshold",
            ..
        })
    ));
}

#[test]
fn test_engine_rejects_negative_upward_modifier() {
    let config = SimConfig {
        upward_explosion_modifier: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        SimulationEngine::headless(config).err(),
        Some(ConfigError::NegativeValue { .. })
    ));
}

#[test]
fn test_engine_rejects_unbounded_upward_modifier() {
    let config = SimConfig {
        upward_explosion_modifier: 1e308,
        ..test_config()
    };
    assert!(matches!(
        SimulationEngine::headless(config).err(),
        Some(ConfigError::OutOfRange {
            name: "upward_explosion_modifier",
            ..
        })
    ));
}

#[test]
fn test_lifecycle_rejects_infinite_upward_modifier() {
    let config = SimConfig {
        upward_explosion_modifier: f64::INFINITY,
        ..test_config()
    };
    let mut world = World::new();
    let lifecycle = LifecycleManager::new(&mut world, &config, ChaCha8Rng::seed_from_u64(1));
    assert!(matches!(
        lifecycle.err(),
        Some(ConfigError::NegativeValue { .. })
    ));
}

#[test]
fn test_huge_upward_modifier_still_sinks_ship() {
    let config = SimConfig {
        upward_explosion_modifier: 1e300,
        ..test_config()
    };
    let mut engine = SimulationEngine::headless(config).unwrap();
    let a = engine.spawn_ship(0.0, 0.0, 1, false);
    set_hull(&mut engine, a, 0.0);

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ShipDestroyed { entity, .. } if *entity == a)));
    assert_eq!(snap.debris_count, 4);
}

#[test]
fn test_headless_engine_starts_empty() {
    let mut engine = SimulationEngine::headless(test_config()).unwrap();
    let snap = engine.tick();
    assert!(snap.selection.is_none());
    assert!(snap.ships.is_empty());
    assert_eq!(snap.debris_count, 0);
    assert_eq!(snap.time.tick, 1);
}

// ---- Tap scenario ----

#[test]
fn test_select_then_double_tap_focus_then_move() {
    let mut h = harness();
    let a = h.engine.spawn_ship(-19.0, 5.0, 1, false);

    let snap = tap(&mut h.engine, -19.0, 5.0);
    assert_eq!(selected(&h.engine), Some(a));
    assert_eq!(count(&snap, |e| *e == SimEvent::Selected { entity: a }), 1);
    assert!(snap
        .events
        .contains(&SimEvent::SelectionChanged { entity: Some(a) }));
    assert!(h.ui.is_open(PopupId::ShipControl));
    assert!(ship(&snap, a).selected);
    assert_eq!(snap.selection.as_ref().map(|s| s.entity), Some(a));

    // Next tick is 1/30 s later: well inside the threshold.
    let snap = tap(&mut h.engine, -19.0, 5.0);
    assert_eq!(h.camera.target(), Some(a));
    assert!(snap.events.contains(&SimEvent::CameraFocused { entity: a }));
    assert_eq!(count(&snap, |e| matches!(e, SimEvent::Selected { .. })), 0);
    assert_eq!(count(&snap, |e| matches!(e, SimEvent::SelectionChanged { .. })), 0);
    assert_eq!(selected(&h.engine), Some(a));

    let snap = tap(&mut h.engine, 10.0, 10.0);
    let destination = Position::new(10.0, 0.0, 10.0);
    assert!(snap.events.contains(&SimEvent::MoveOrdered {
        entity: a,
        destination
    }));
    assert_eq!(ship(&snap, a).destination, Some(destination));
    assert_eq!(selected(&h.engine), Some(a));
}

#[test]
fn test_slow_second_tap_does_not_focus_camera() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);

    for _ in 0..10 {
        h.engine.tick();
    }
    let snap = tap(&mut h.engine, 0.0, 0.0);
    assert!(h.camera.target().is_none());
    assert!(snap.events.is_empty());
    assert_eq!(selected(&h.engine), Some(a));
}

#[test]
fn test_tap_over_ui_is_dropped() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    h.engine.tick();

    h.engine.queue_command(PlayerCommand::Tap {
        ray: Ray::straight_down(0.0, 0.0),
        over_ui: true,
    });
    let snap = h.engine.tick();
    assert!(snap.events.is_empty());
    assert!(!h.engine.selection().is_active());
    assert!(h.engine.gestures().last_tap().is_none());
}

#[test]
fn test_tap_hitting_nothing_is_dropped() {
    let config = test_config();
    let raycaster = ScriptedRaycaster::default();
    let mut h = harness_with(config, Box::new(raycaster.clone()));

    raycaster.set(None);
    let snap = tap(&mut h.engine, 0.0, 0.0);
    assert!(snap.events.is_empty());
    assert!(h.engine.gestures().last_tap().is_none());
}

#[test]
fn test_sea_tap_without_selection_only_advances_tap_clock() {
    let mut h = harness();
    let snap = tap(&mut h.engine, 30.0, 30.0);
    assert!(snap.events.is_empty());
    assert_eq!(h.engine.gestures().last_tap(), Some(0.0));
}

#[test]
fn test_move_target_is_clamped_to_ship_plane() {
    let config = SimConfig {
        ship_plane_y: 2.5,
        ..test_config()
    };
    let raycaster = ScriptedRaycaster::default();
    let mut h = harness_with(config, Box::new(raycaster.clone()));
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);

    raycaster.set(Some(RayHit {
        entity: Some(entity(a)),
        point: Position::new(0.0, 5.5, 0.0),
    }));
    tap(&mut h.engine, 0.0, 0.0);
    assert_eq!(selected(&h.engine), Some(a));

    raycaster.set(Some(RayHit {
        entity: None,
        point: Position::new(4.0, 9.0, -2.0),
    }));
    let snap = tap(&mut h.engine, 4.0, -2.0);
    assert!(snap.events.contains(&SimEvent::MoveOrdered {
        entity: a,
        destination: Position::new(4.0, 2.5, -2.0),
    }));
}

#[test]
fn test_tap_reset_timer_clears_parity() {
    let mut h = harness();
    tap(&mut h.engine, 30.0, 30.0);
    assert_eq!(h.engine.gestures().parity(), 1);
    assert!(h.engine.gestures().reset_pending());

    // 10 ticks = 0.33 s > 0.3 s threshold.
    for _ in 0..10 {
        h.engine.tick();
    }
    assert_eq!(h.engine.gestures().parity(), 0);
    assert!(!h.engine.gestures().reset_pending());
}

// ---- Selection ----

#[test]
fn test_reselect_unselects_previous_first() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let b = h.engine.spawn_ship(20.0, 0.0, 1, false);

    tap(&mut h.engine, 0.0, 0.0);
    let snap = tap(&mut h.engine, 20.0, 0.0);

    let unselected = snap
        .events
        .iter()
        .position(|e| *e == SimEvent::Unselected { entity: a })
        .unwrap();
    let selected_b = snap
        .events
        .iter()
        .position(|e| *e == SimEvent::Selected { entity: b })
        .unwrap();
    assert!(unselected < selected_b);
    assert_eq!(selected(&h.engine), Some(b));
    assert!(!ship(&snap, a).selected);
    assert!(ship(&snap, b).selected);
    assert_eq!(snap.ships.iter().filter(|s| s.selected).count(), 1);
}

#[test]
fn test_ai_ship_cannot_be_selected() {
    let mut h = harness();
    let enemy = h.engine.spawn_ship(0.0, 0.0, 2, true);

    let snap = tap(&mut h.engine, 0.0, 0.0);
    assert!(!h.engine.selection().is_active());
    assert!(!ship(&snap, enemy).selected);
    assert!(snap
        .events
        .contains(&SimEvent::SelectionChanged { entity: None }));
    assert!(!h.ui.is_open(PopupId::ShipControl));
}

#[test]
fn test_hostile_player_controlled_ship_cannot_be_selected() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 2, false);

    let snap = tap(&mut h.engine, 0.0, 0.0);
    assert!(!h.engine.selection().is_active());
    assert_eq!(count(&snap, |e| matches!(e, SimEvent::Selected { .. })), 0);
}

#[test]
fn test_tapping_enemy_with_selection_orders_attack() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let enemy = h.engine.spawn_ship(10.0, 0.0, 2, true);

    tap(&mut h.engine, 0.0, 0.0);
    let snap = tap(&mut h.engine, 10.0, 0.0);

    assert!(snap.events.contains(&SimEvent::AttackOrdered {
        attacker: a,
        target: enemy
    }));
    assert_eq!(count(&snap, |e| matches!(e, SimEvent::Unselected { .. })), 0);
    assert_eq!(selected(&h.engine), Some(a));
    assert_eq!(ship(&snap, a).target, Some(enemy));
    // Both batteries reach 10 units, so the enemy already took fire.
    assert!(ship(&snap, enemy).hull < ship(&snap, enemy).max_hull);
}

#[test]
fn test_tapping_wrecked_enemy_does_not_attack() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let enemy = h.engine.spawn_ship(10.0, 0.0, 2, false);
    tap(&mut h.engine, 0.0, 0.0);

    set_hull(&mut h.engine, enemy, 0.0);
    let snap = tap(&mut h.engine, 10.0, 0.0);

    assert_eq!(count(&snap, |e| matches!(e, SimEvent::AttackOrdered { .. })), 0);
    // Not consumed as an attack: the reselect path ran and refused the hostile.
    assert!(snap.events.contains(&SimEvent::Unselected { entity: a }));
    assert!(snap
        .events
        .contains(&SimEvent::SelectionChanged { entity: None }));
    assert!(!h.engine.selection().is_active());
}

#[test]
fn test_tapping_friend_with_selection_reselects() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let b = h.engine.spawn_ship(10.0, 0.0, 1, false);

    tap(&mut h.engine, 0.0, 0.0);
    let snap = tap(&mut h.engine, 10.0, 0.0);
    assert_eq!(count(&snap, |e| matches!(e, SimEvent::AttackOrdered { .. })), 0);
    assert_eq!(selected(&h.engine), Some(b));
    assert!(snap.events.contains(&SimEvent::Unselected { entity: a }));
}

#[test]
fn test_non_ship_selection_gets_no_ship_controls() {
    let mut h = harness();
    let buoy = h.engine.world_mut().spawn((
        Position::new(0.0, 0.0, 0.0),
        Collider { radius: 1.0 },
        Selectable {
            enabled: true,
            selected: false,
        },
    ));

    let snap = tap(&mut h.engine, 0.0, 0.0);
    assert_eq!(h.engine.selection().entity(), Some(buoy));
    assert!(!h.ui.is_open(PopupId::ShipControl));
    let view = snap.selection.unwrap();
    assert!(!view.can_move);
    assert!(!view.can_attack);
    assert!(!view.is_damageable);

    // Ship-only events are dropped for a non-ship selection.
    let snap = named(&mut h.engine, "Ship_CFM_Panel");
    assert!(snap.events.is_empty());
    assert!(!h.ui.is_open(PopupId::ChangeFireMode));

    // Sea tap: the buoy cannot move, so no order.
    let snap = tap(&mut h.engine, 30.0, 30.0);
    assert!(snap.events.is_empty());
}

// ---- Dispatch ----

#[test]
fn test_fire_mode_panel_shows_current_mode() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);

    named(&mut h.engine, "Ship_CFM_Panel");
    assert!(h.ui.is_open(PopupId::ChangeFireMode));
    assert!(!h.ui.is_open(PopupId::ShipControl));
    assert_eq!(
        h.ui.selected_option(PopupId::ChangeFireMode),
        Some(FireMode::AllGuns.option_index())
    );
}

#[test]
fn test_only_main_guns_event() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);
    named(&mut h.engine, "Ship_CFM_Panel");

    let snap = named(&mut h.engine, "Ship_CFM_OnlyMainGuns");
    assert!(snap.events.contains(&SimEvent::FireModeChanged {
        entity: a,
        mode: FireMode::OnlyMain
    }));
    assert_eq!(ship(&snap, a).fire_mode, FireMode::OnlyMain);
    assert!(!h.ui.is_open(PopupId::ChangeFireMode));
    assert!(h.ui.is_open(PopupId::ShipControl));
    assert_eq!(h.ui.selected_option(PopupId::ChangeFireMode), Some(2));
}

#[test]
fn test_ship_events_without_selection_are_ignored() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    h.engine.tick();

    for name in ["Ship_CFM_Panel", "Ship_CFM_StopAllGuns", "Ship_LS_Panel", "Ship_LS_Launch"] {
        let snap = named(&mut h.engine, name);
        assert!(snap.events.is_empty(), "{name} produced events");
    }
    assert!(!h.ui.is_open(PopupId::ChangeFireMode));
    assert!(!h.ui.is_open(PopupId::LaunchSquadron));
}

#[test]
fn test_unknown_event_name_is_ignored() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);

    let snap = named(&mut h.engine, "Ship_CFM_Everything");
    assert!(snap.events.is_empty());
    let snap = named(&mut h.engine, "cancelselection");
    assert!(snap.events.is_empty());
    assert!(h.engine.selection().is_active());
}

#[test]
fn test_launch_squadron_flow() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);
    assert_eq!(h.engine.squadron_ids(), vec![0, 1, 2]);

    named(&mut h.engine, "Ship_LS_Panel");
    assert!(h.ui.is_open(PopupId::LaunchSquadron));
    assert!(!h.ui.is_open(PopupId::ShipControl));

    h.ui.press_option(PopupId::LaunchSquadron, 1);
    let snap = named(&mut h.engine, "Ship_LS_Launch");
    assert!(snap.events.contains(&SimEvent::SquadronLaunched {
        entity: a,
        squadron: 1
    }));
    assert_eq!(h.engine.squadron_ids(), vec![0, 2]);
    assert_eq!(snap.selection.unwrap().squadrons, vec![0, 2]);

    // Already launched: no-op.
    let snap = named(&mut h.engine, "Ship_LS_Launch");
    assert!(snap.events.is_empty());

    named(&mut h.engine, "Ship_LS_Close");
    assert!(!h.ui.is_open(PopupId::LaunchSquadron));
    assert!(h.ui.is_open(PopupId::ShipControl));
}

#[test]
fn test_launch_requires_open_launch_panel() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);

    h.ui.press_option(PopupId::LaunchSquadron, 0);
    let snap = named(&mut h.engine, "Ship_LS_Launch");
    assert!(snap.events.is_empty());
    assert_eq!(h.engine.squadron_ids(), vec![0, 1, 2]);
}

#[test]
fn test_launch_with_unknown_option_is_ignored() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);
    named(&mut h.engine, "Ship_LS_Panel");

    h.ui.press_option(PopupId::LaunchSquadron, 9);
    let snap = named(&mut h.engine, "Ship_LS_Launch");
    assert!(snap.events.is_empty());
}

#[test]
fn test_squadron_ids_empty_without_selection() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    assert!(h.engine.squadron_ids().is_empty());
}

#[test]
fn test_stop_all_actions_cancels_orders() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let enemy = h.engine.spawn_ship(100.0, 0.0, 2, true);
    tap(&mut h.engine, 0.0, 0.0);
    tap(&mut h.engine, 100.0, 0.0);
    let snap = tap(&mut h.engine, -40.0, -40.0);
    assert_eq!(ship(&snap, a).target, Some(enemy));
    assert!(ship(&snap, a).destination.is_some());

    let snap = send(&mut h.engine, GameEvent::StopAllActions);
    assert!(snap.events.contains(&SimEvent::OrdersCancelled { entity: a }));
    assert!(ship(&snap, a).destination.is_none());
    assert!(ship(&snap, a).target.is_none());
    assert_eq!(selected(&h.engine), Some(a));
}

#[test]
fn test_cancel_selection_hides_controls() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);
    named(&mut h.engine, "Ship_CFM_Panel");

    let snap = named(&mut h.engine, "CancelSelection");
    assert_eq!(snap.events, vec![SimEvent::Unselected { entity: a }]);
    assert!(!h.engine.selection().is_active());
    for popup in PopupId::CONTROLS {
        assert!(!h.ui.is_open(popup));
    }

    // Cancelling again is a no-op.
    let snap = named(&mut h.engine, "CancelSelection");
    assert!(snap.events.is_empty());
}

// ---- Lifecycle ----

#[test]
fn test_on_destroyed_runs_once() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let explosion = ExplosionDescriptor {
        position: Position::new(0.0, 0.0, 0.0),
        radius: 20.0,
        force: 800.0,
        debris: Vec::new(),
    };

    assert!(h.engine.destroy_ship(a, Some(&explosion)));
    let applied = h.physics.impulses().len();
    assert!(applied > 0);
    assert!(!h.engine.lifecycle().is_live_ship(entity(a)));

    assert!(!h.engine.destroy_ship(a, Some(&explosion)));
    assert_eq!(h.physics.impulses().len(), applied);
}

#[test]
fn test_on_destroyed_without_explosion_applies_no_force() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    assert!(h.engine.destroy_ship(a, None));
    assert!(h.physics.impulses().is_empty());
    assert!(h.engine.lifecycle().live_ships().is_empty());
}

#[test]
fn test_explosion_pushes_only_bodies_in_radius() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let near = h.engine.spawn_ship(5.0, 0.0, 1, false);
    let far = h.engine.spawn_ship(50.0, 0.0, 1, false);
    let explosion = ExplosionDescriptor {
        position: Position::new(0.0, 0.0, 0.0),
        radius: 20.0,
        force: 800.0,
        debris: Vec::new(),
    };

    h.engine.destroy_ship(a, Some(&explosion));
    let bodies: Vec<Entity> = h.physics.impulses().iter().map(|i| i.body).collect();
    assert_eq!(bodies.len(), 2);
    assert!(bodies.contains(&entity(a)));
    assert!(bodies.contains(&entity(near)));
    assert!(!bodies.contains(&entity(far)));

    for impulse in h.physics.impulses() {
        assert!(impulse.upward_bias.abs() <= 1.0);
    }

    let body = h.engine.world().get::<&RigidBody>(entity(near)).unwrap();
    assert!(body.velocity[0] > 0.0, "near ship should be pushed away");
    let body = h.engine.world().get::<&RigidBody>(entity(far)).unwrap();
    assert_eq!(body.velocity, [0.0; 3]);
}

#[test]
fn test_explosion_bias_is_deterministic_with_seed() {
    let run = || {
        let mut h = harness();
        let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
        h.engine.spawn_ship(3.0, 3.0, 1, false);
        h.engine.spawn_ship(-4.0, 1.0, 1, false);
        let explosion = ExplosionDescriptor {
            position: Position::new(0.0, 0.0, 0.0),
            radius: 20.0,
            force: 800.0,
            debris: Vec::new(),
        };
        h.engine.destroy_ship(a, Some(&explosion));
        h.physics
            .impulses()
            .iter()
            .map(|i| i.upward_bias)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_spawn_ship_command() {
    let mut h = harness();
    h.engine.queue_command(PlayerCommand::SpawnShip {
        x: 4.0,
        z: -6.0,
        team: 2,
        controlled_by_ai: false,
    });
    let snap = h.engine.tick();
    assert_eq!(snap.ships.len(), 1);
    let view = &snap.ships[0];
    assert_eq!(view.team, 2);
    assert!(!view.ai_controlled);
    assert_eq!(view.position, Position::new(4.0, 0.0, -6.0));
    assert!(snap.events.contains(&SimEvent::ShipSpawned {
        entity: view.entity,
        team: 2
    }));
    assert_eq!(h.engine.lifecycle().live_ships().len(), 1);
}

// ---- Systems ----

#[test]
fn test_move_order_arrives_and_clears() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);
    tap(&mut h.engine, 10.0, 0.0);
    assert!(!capabilities::is_reached_destination(h.engine.world(), entity(a)));

    // 6 units/s: 10 units takes 50 ticks.
    let mut snap = h.engine.tick();
    for _ in 0..60 {
        snap = h.engine.tick();
    }
    let view = ship(&snap, a);
    assert_eq!(view.position, Position::new(10.0, 0.0, 0.0));
    assert!(view.destination.is_none());
    assert!(capabilities::is_reached_destination(h.engine.world(), entity(a)));
}

#[test]
fn test_no_guns_mode_holds_fire() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    let enemy = h.engine.spawn_ship(10.0, 0.0, 2, true);
    tap(&mut h.engine, 0.0, 0.0);
    send(&mut h.engine, GameEvent::FireModeNoGuns);

    tap(&mut h.engine, 10.0, 0.0);
    let snap = h.engine.tick();
    assert_eq!(ship(&snap, enemy).hull, ship(&snap, enemy).max_hull);
}

#[test]
fn test_main_guns_reach_beyond_onboard_range() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    let enemy = h.engine.spawn_ship(40.0, 0.0, 2, true);
    tap(&mut h.engine, 0.0, 0.0);
    send(&mut h.engine, GameEvent::FireModeOnlyOnboard);
    tap(&mut h.engine, 40.0, 0.0);
    let snap = h.engine.tick();
    assert_eq!(ship(&snap, enemy).hull, ship(&snap, enemy).max_hull);

    send(&mut h.engine, GameEvent::FireModeOnlyMain);
    let snap = h.engine.tick();
    assert!(ship(&snap, enemy).hull < ship(&snap, enemy).max_hull);
}

#[test]
fn test_sunk_enemy_leaves_reparented_debris() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    let enemy = h.engine.spawn_ship(10.0, 0.0, 2, true);
    set_hull(&mut h.engine, enemy, 1.0);

    tap(&mut h.engine, 0.0, 0.0);
    let snap = tap(&mut h.engine, 10.0, 0.0);

    let debris = snap
        .events
        .iter()
        .find_map(|e| match e {
            SimEvent::ShipDestroyed { entity, debris, .. } if *entity == enemy => {
                Some(debris.clone())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(debris.len(), 4);
    assert_eq!(snap.debris_count, 4);
    assert_eq!(snap.ships.len(), 1);
    assert!(!h.engine.world().contains(entity(enemy)));

    let container = crate::ids::entity_id(h.engine.lifecycle().debris_container());
    for piece in debris {
        let parent = *h.engine.world().get::<&Parent>(entity(piece)).unwrap();
        assert_eq!(parent, Parent(container));
    }

    // Attacker, the wreck and its debris were all in the blast.
    assert_eq!(h.physics.impulses().len(), 6);

    // The order on the vanished target is dropped.
    let snap = h.engine.tick();
    assert!(ship(&snap, a).target.is_none());
}

#[test]
fn test_sunk_selected_ship_is_deselected() {
    let mut h = harness();
    let a = h.engine.spawn_ship(0.0, 0.0, 1, false);
    tap(&mut h.engine, 0.0, 0.0);
    assert!(h.ui.is_open(PopupId::ShipControl));

    set_hull(&mut h.engine, a, 0.0);
    let snap = h.engine.tick();
    assert!(snap.events.contains(&SimEvent::Unselected { entity: a }));
    assert!(snap
        .events
        .contains(&SimEvent::SelectionChanged { entity: None }));
    assert!(!h.engine.selection().is_active());
    assert!(snap.selection.is_none());
    assert!(!h.ui.is_open(PopupId::ShipControl));
    assert!(snap.ships.is_empty());
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut h = harness();
    h.engine.spawn_ship(0.0, 0.0, 1, false);
    let snap = tap(&mut h.engine, 0.0, 0.0);
    let json = serde_json::to_string(&snap).unwrap();
    let back: InteractionSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.ships.len(), 1);
    assert_eq!(back.events, snap.events);
}

#[test]
fn test_expired_debris_is_removed() {
    let mut config = test_config();
    config.ship.debris_lifetime_secs = 0.5;
    let mut engine = SimulationEngine::headless(config).unwrap();
    let a = engine.spawn_ship(0.0, 0.0, 1, false);
    set_hull(&mut engine, a, 0.0);

    let snap = engine.tick();
    assert_eq!(snap.debris_count, 4);

    // 0.5 s = 15 ticks.
    for _ in 0..20 {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(snap.debris_count, 0);
    assert!(engine.lifecycle().live_debris().is_empty());
    assert_eq!(engine.world().query::<&Debris>().iter().count(), 0);
}

#[test]
fn test_debris_registry_drops_despawned_pieces() {
    let mut engine = SimulationEngine::headless(test_config()).unwrap();
    let a = engine.spawn_ship(0.0, 0.0, 1, false);
    set_hull(&mut engine, a, 0.0);
    engine.tick();

    let piece = engine.lifecycle().live_debris()[0];
    engine.world_mut().despawn(piece).unwrap();
    let snap = engine.tick();

    assert_eq!(snap.debris_count, 3);
    assert!(!engine.lifecycle().live_debris().contains(&piece));
}
