//! Headless implementations of the collaborator services.
//!
//! `PopupBoard` and `ChaseCamera` are shared handles: cloning one gives the
//! driver a view of the same state the engine mutates.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::DVec3;
use hecs::{Entity, World};

use armada_core::components::{Collider, RigidBody};
use armada_core::config::SquadronDef;
use armada_core::enums::PopupId;
use armada_core::types::{EntityId, Position, Ray};

use crate::services::{
    CameraController, PhysicsService, PopupView, RayHit, Raycaster, SquadronRef,
    SquadronRegistry, UiSurface,
};

/// Raycasts against sphere colliders and the flat sea plane.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRaycaster {
    plane_y: f64,
}

impl HeadlessRaycaster {
    pub fn new(plane_y: f64) -> Self {
        Self { plane_y }
    }
}

impl Raycaster for HeadlessRaycaster {
    fn raycast(&self, world: &World, ray: &Ray) -> Option<RayHit> {
        let dir = ray.direction.normalize_or_zero();
        if dir == DVec3::ZERO {
            return None;
        }

        let mut best: Option<(f64, Option<Entity>)> = plane_hit(ray.origin, dir, self.plane_y)
            .map(|t| (t, None));

        for (entity, (pos, collider)) in world.query::<(&Position, &Collider)>().iter() {
            if let Some(t) = sphere_hit(ray.origin, dir, pos.to_dvec3(), collider.radius) {
                if best.map_or(true, |(best_t, _)| t < best_t) {
                    best = Some((t, Some(entity)));
                }
            }
        }

        best.map(|(t, entity)| RayHit {
            entity,
            point: Position::from(ray.origin + dir * t),
        })
    }
}

/// Distance along a normalized ray to the horizontal plane `y = plane_y`.
fn plane_hit(origin: DVec3, dir: DVec3, plane_y: f64) -> Option<f64> {
    if dir.y.abs() < 1e-12 {
        return None;
    }
    let t = (plane_y - origin.y) / dir.y;
    (t >= 0.0).then_some(t)
}

/// Distance along a normalized ray to the first sphere surface in front of it.
fn sphere_hit(origin: DVec3, dir: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

#[derive(Debug, Default)]
struct PopupState {
    /// Open popups, oldest first.
    open: Vec<PopupId>,
    selected: HashMap<PopupId, usize>,
}

/// Popup bookkeeping standing in for the UI layer.
#[derive(Debug, Clone, Default)]
pub struct PopupBoard {
    state: Rc<RefCell<PopupState>>,
}

impl PopupBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, popup: PopupId) -> bool {
        self.state.borrow().open.contains(&popup)
    }

    pub fn selected_option(&self, popup: PopupId) -> Option<usize> {
        self.state.borrow().selected.get(&popup).copied()
    }

    /// The player pressing an option button inside a popup.
    pub fn press_option(&self, popup: PopupId, option: usize) {
        self.state.borrow_mut().selected.insert(popup, option);
    }
}

impl UiSurface for PopupBoard {
    fn activate_popup(&mut self, popup: PopupId, active: bool) {
        let mut state = self.state.borrow_mut();
        state.open.retain(|p| *p != popup);
        if active {
            state.open.push(popup);
        }
    }

    fn change_selected_option(&mut self, popup: PopupId, option: usize) {
        self.state.borrow_mut().selected.insert(popup, option);
    }

    fn current_open_popup(&self) -> Option<PopupView> {
        let state = self.state.borrow();
        state.open.last().map(|&id| PopupView {
            id,
            selected_option: state.selected.get(&id).copied(),
        })
    }
}

/// Squadron registry backed by the configured catalog.
#[derive(Debug, Clone, Default)]
pub struct SquadronCatalog {
    ids: Vec<u32>,
}

impl SquadronCatalog {
    pub fn new(defs: &[SquadronDef]) -> Self {
        Self {
            ids: defs.iter().map(|d| d.id).collect(),
        }
    }
}

impl SquadronRegistry for SquadronCatalog {
    fn resolve(&self, selection_id: usize) -> Option<SquadronRef> {
        let id = u32::try_from(selection_id).ok()?;
        self.ids.contains(&id).then_some(SquadronRef(id))
    }
}

/// Explosion impulses on `RigidBody` components.
///
/// Force falls off linearly to zero at `radius`. The bias lowers the
/// explosion origin, so a positive bias throws bodies upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPhysics;

impl PhysicsService for HeadlessPhysics {
    fn bodies_within_radius(&self, world: &World, center: Position, radius: f64) -> Vec<Entity> {
        world
            .query::<(&Position, &RigidBody)>()
            .iter()
            .filter(|(_, (pos, _))| pos.distance_to(&center) <= radius)
            .map(|(entity, _)| entity)
            .collect()
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
        let Ok((pos, rb)) = world.query_one_mut::<(&Position, &mut RigidBody)>(body) else {
            return;
        };
        if rb.mass <= 0.0 || radius <= 0.0 {
            return;
        }

        let distance = pos.distance_to(&position);
        let falloff = (1.0 - distance / radius).clamp(0.0, 1.0);
        let origin = position.to_dvec3() - DVec3::Y * upward_bias;
        let dir = (pos.to_dvec3() - origin).normalize_or_zero();
        let dv = dir * (force * falloff / rb.mass);

        rb.velocity[0] += dv.x;
        rb.velocity[1] += dv.y;
        rb.velocity[2] += dv.z;
    }
}

/// Camera that chases whatever it was last asked to focus on.
#[derive(Debug, Clone, Default)]
pub struct ChaseCamera {
    target: Rc<RefCell<Option<EntityId>>>,
}

impl ChaseCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<EntityId> {
        *self.target.borrow()
    }
}

impl CameraController for ChaseCamera {
    fn focus_on(&mut self, entity: EntityId) {
        *self.target.borrow_mut() = Some(entity);
    }
}
