//! Per-actor corner selection for prospective claims.
//!
//! Each actor has two independent slots (first and second corner). Selecting
//! into a slot overwrites it; nothing expires on its own. The host calls
//! `deselect_all` on disconnect if it wants stale selections cleaned up.
//!
//! World interactions arrive as `SelectPointEvent`s: a left click selects
//! the first corner, a right click the second. Deciding *which* interactions
//! qualify (held item, permission) is up to the host emitting the events.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// State
// =============================================================================

/// One selected corner. Positions are floored to block coordinates at
/// selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPoint {
    pub point: IVec3,
    pub world: String,
}

/// Selection slots for every actor, keyed by actor name.
#[derive(Resource, Debug, Default)]
pub struct SelectionState {
    first: HashMap<String, SelectedPoint>,
    second: HashMap<String, SelectedPoint>,
}

/// Why a selection cannot be turned into a claim yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no corners are selected")]
    NothingSelected,
    #[error("the first corner is not selected")]
    MissingFirst,
    #[error("the second corner is not selected")]
    MissingSecond,
    #[error("the selected corners are in different worlds")]
    WorldMismatch,
}

impl SelectionState {
    /// Set an actor's first corner, overwriting any previous one.
    pub fn select_first(&mut self, actor: &str, world: &str, pos: Vec3) {
        self.first
            .insert(actor.to_string(), Self::entry(world, pos));
    }

    /// Set an actor's second corner, overwriting any previous one.
    pub fn select_second(&mut self, actor: &str, world: &str, pos: Vec3) {
        self.second
            .insert(actor.to_string(), Self::entry(world, pos));
    }

    fn entry(world: &str, pos: Vec3) -> SelectedPoint {
        SelectedPoint {
            point: pos.floor().as_ivec3(),
            world: world.to_string(),
        }
    }

    pub fn deselect_first(&mut self, actor: &str) {
        self.first.remove(actor);
    }

    pub fn deselect_second(&mut self, actor: &str) {
        self.second.remove(actor);
    }

    pub fn deselect_all(&mut self, actor: &str) {
        self.deselect_first(actor);
        self.deselect_second(actor);
    }

    pub fn has_first(&self, actor: &str) -> bool {
        self.first.contains_key(actor)
    }

    pub fn has_second(&self, actor: &str) -> bool {
        self.second.contains_key(actor)
    }

    pub fn has_any(&self, actor: &str) -> bool {
        self.has_first(actor) || self.has_second(actor)
    }

    pub fn first(&self, actor: &str) -> Option<&SelectedPoint> {
        self.first.get(actor)
    }

    pub fn second(&self, actor: &str) -> Option<&SelectedPoint> {
        self.second.get(actor)
    }

    /// Both corners of a complete, same-world selection.
    ///
    /// The error distinguishes which corner is missing so the caller can
    /// tell the actor exactly what to do next.
    pub fn selected_pair(
        &self,
        actor: &str,
    ) -> Result<(&SelectedPoint, &SelectedPoint), SelectionError> {
        match (self.first(actor), self.second(actor)) {
            (None, None) => Err(SelectionError::NothingSelected),
            (None, Some(_)) => Err(SelectionError::MissingFirst),
            (Some(_), None) => Err(SelectionError::MissingSecond),
            (Some(first), Some(second)) => {
                if first.world != second.world {
                    return Err(SelectionError::WorldMismatch);
                }
                Ok((first, second))
            }
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Which kind of click produced a selection interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Selects the first corner.
    Left,
    /// Selects the second corner.
    Right,
}

/// A world interaction that selects a claim corner.
#[derive(Event, Debug, Clone)]
pub struct SelectPointEvent {
    pub actor: String,
    pub world: String,
    pub point: Vec3,
    pub kind: ClickKind,
}

pub fn apply_select_events(
    mut events: EventReader<SelectPointEvent>,
    mut selection: ResMut<SelectionState>,
) {
    for event in events.read() {
        let corner = event.point.floor().as_ivec3();
        match event.kind {
            ClickKind::Left => {
                selection.select_first(&event.actor, &event.world, event.point);
                info!(
                    "{} selected first corner ({}, {}, {}) in {}",
                    event.actor, corner.x, corner.y, corner.z, event.world
                );
            }
            ClickKind::Right => {
                selection.select_second(&event.actor, &event.world, event.point);
                info!(
                    "{} selected second corner ({}, {}, {}) in {}",
                    event.actor, corner.x, corner.y, corner.z, event.world
                );
            }
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionState>()
            .add_event::<SelectPointEvent>()
            .add_systems(Update, apply_select_events);
    }
}

// =============================================================================
// Tests
// =============================================================================
