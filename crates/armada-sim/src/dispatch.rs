//! Command dispatcher: routes named UI events to the selection and to the
//! selected ship's behavior set.
//!
//! Dispatch never fails. Events that need a selection (or a selected ship)
//! are dropped when there is none.

use hecs::{Entity, World};
use tracing::debug;

use armada_core::commands::GameEvent;
use armada_core::enums::{FireMode, PopupId};
use armada_core::events::SimEvent;

use crate::capabilities;
use crate::selection::SelectionController;
use crate::services::{SquadronRegistry, UiSurface};

/// Borrowed view of everything a dispatched event may touch.
pub struct DispatchContext<'a> {
    pub world: &'a mut World,
    pub selection: &'a mut SelectionController,
    pub ui: &'a mut dyn UiSurface,
    pub squadrons: &'a dyn SquadronRegistry,
    pub events: &'a mut Vec<SimEvent>,
}

pub fn dispatch(ctx: &mut DispatchContext<'_>, event: GameEvent) {
    if !event.is_ship_event() {
        handle_general_event(ctx, event);
        return;
    }

    let ship = ctx
        .selection
        .active()
        .filter(|active| active.capabilities.ship)
        .map(|active| active.entity);
    let Some(ship) = ship else {
        debug!(%event, "ship event without a selected ship");
        return;
    };

    match event {
        GameEvent::OpenFireModePanel => open_fire_mode_panel(ctx, ship, true),
        GameEvent::FireModeNoGuns => change_fire_mode(ctx, ship, FireMode::NoGuns),
        GameEvent::FireModeOnlyOnboard => change_fire_mode(ctx, ship, FireMode::OnlyOnboard),
        GameEvent::FireModeOnlyMain => change_fire_mode(ctx, ship, FireMode::OnlyMain),
        GameEvent::FireModeAllGuns => change_fire_mode(ctx, ship, FireMode::AllGuns),
        GameEvent::OpenLaunchPanel => open_launch_panel(ctx, true),
        GameEvent::CloseLaunchPanel => open_launch_panel(ctx, false),
        GameEvent::LaunchSquadron => launch_squadron(ctx, ship),
        GameEvent::CancelSelection | GameEvent::StopAllActions => {}
    }
}

/// Dispatch by UI name. Unknown names are ignored.
pub fn dispatch_named(ctx: &mut DispatchContext<'_>, name: &str) {
    match name.parse::<GameEvent>() {
        Ok(event) => dispatch(ctx, event),
        Err(err) => debug!(%err, "ignoring event"),
    }
}

fn handle_general_event(ctx: &mut DispatchContext<'_>, event: GameEvent) {
    match event {
        GameEvent::CancelSelection => {
            ctx.selection.uninit_selection(ctx.world, ctx.events);
            ctx.ui.hide_all_controls();
        }
        GameEvent::StopAllActions => {
            if let Some(entity) = ctx.selection.entity() {
                capabilities::stop_all_actions(ctx.world, entity, ctx.events);
            }
        }
        _ => {}
    }
}

/// Close every control popup, then open the ship strip if a ship is selected.
pub fn show_selection_controls(ui: &mut dyn UiSurface, selection: &SelectionController) {
    ui.hide_all_controls();
    if selection.active().is_some_and(|a| a.capabilities.ship) {
        ui.activate_popup(PopupId::ShipControl, true);
    }
}

fn open_fire_mode_panel(ctx: &mut DispatchContext<'_>, ship: Entity, open: bool) {
    ctx.ui.activate_popup(PopupId::ShipControl, !open);
    ctx.ui.activate_popup(PopupId::ChangeFireMode, open);

    if let Some(mode) = capabilities::fire_mode(ctx.world, ship) {
        ctx.ui
            .change_selected_option(PopupId::ChangeFireMode, mode.option_index());
    }
}

fn change_fire_mode(ctx: &mut DispatchContext<'_>, ship: Entity, mode: FireMode) {
    open_fire_mode_panel(ctx, ship, false);
    capabilities::switch_fire_mode(ctx.world, ship, mode, ctx.events);
    ctx.ui
        .change_selected_option(PopupId::ChangeFireMode, mode.option_index());
}

fn open_launch_panel(ctx: &mut DispatchContext<'_>, open: bool) {
    ctx.ui.activate_popup(PopupId::ShipControl, !open);
    ctx.ui.activate_popup(PopupId::LaunchSquadron, open);
}

fn launch_squadron(ctx: &mut DispatchContext<'_>, ship: Entity) {
    let Some(popup) = ctx
        .ui
        .current_open_popup()
        .filter(|p| p.id == PopupId::LaunchSquadron)
    else {
        debug!("launch without the launch panel open");
        return;
    };
    let Some(option) = popup.selected_option else {
        debug!("launch without a squadron picked");
        return;
    };
    let Some(squadron) = ctx.squadrons.resolve(option) else {
        debug!(option, "squadron option did not resolve");
        return;
    };
    capabilities::launch_squadron(ctx.world, ship, squadron, ctx.events);
}
