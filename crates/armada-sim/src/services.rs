//! Contracts for the external collaborators the engine consumes.
//!
//! Rendering, physics internals, UI widgets and the camera live outside the
//! interaction layer. The engine receives implementations of these traits at
//! construction and never looks them up globally.

use hecs::{Entity, World};

use armada_core::config::SimConfig;
use armada_core::enums::PopupId;
use armada_core::types::{EntityId, Position, Ray};

use crate::headless::{ChaseCamera, HeadlessPhysics, HeadlessRaycaster, PopupBoard, SquadronCatalog};

/// Result of a world raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The entity whose collider was hit; `None` for the open sea.
    pub entity: Option<Entity>,
    pub point: Position,
}

/// What the UI reports about its topmost open popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupView {
    pub id: PopupId,
    /// Option the player highlighted in this popup, if any.
    pub selected_option: Option<usize>,
}

/// Opaque squadron handle produced by the registry and forwarded to ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquadronRef(pub u32);

pub trait Raycaster {
    fn raycast(&self, world: &World, ray: &Ray) -> Option<RayHit>;
}

pub trait UiSurface {
    fn activate_popup(&mut self, popup: PopupId, active: bool);
    fn change_selected_option(&mut self, popup: PopupId, option: usize);
    fn current_open_popup(&self) -> Option<PopupView>;

    /// Close every selection control popup.
    fn hide_all_controls(&mut self) {
        for popup in PopupId::CONTROLS {
            self.activate_popup(popup, false);
        }
    }
}

pub trait SquadronRegistry {
    /// Resolve the option picked in the launch popup to a squadron.
    fn resolve(&self, selection_id: usize) -> Option<SquadronRef>;
}

pub trait PhysicsService {
    fn bodies_within_radius(&self, world: &World, center: Position, radius: f64) -> Vec<Entity>;

    /// Push one body away from an explosion at `position`.
    /// `upward_bias` lowers the apparent explosion origin, lifting the body.
    fn apply_impulse(
        &mut self,
        world: &mut World,
        body: Entity,
        force: f64,
        position: Position,
        radius: f64,
        upward_bias: f64,
    );
}

pub trait CameraController {
    fn focus_on(&mut self, entity: EntityId);
}

/// The collaborator set handed to the engine.
pub struct Services {
    pub raycaster: Box<dyn Raycaster>,
    pub ui: Box<dyn UiSurface>,
    pub squadrons: Box<dyn SquadronRegistry>,
    pub physics: Box<dyn PhysicsService>,
    pub camera: Box<dyn CameraController>,
}

impl Services {
    /// In-process implementations suitable for headless runs and tests.
    pub fn headless(config: &SimConfig) -> Self {
        Self {
            raycaster: Box::new(HeadlessRaycaster::new(config.ship_plane_y)),
            ui: Box::new(PopupBoard::new()),
            squadrons: Box::new(SquadronCatalog::new(&config.squadrons)),
            physics: Box::new(HeadlessPhysics),
            camera: Box::new(ChaseCamera::new()),
        }
    }
}
