use bevy::math::{IVec3, Vec3};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::region::Region;

/// A named, owned cuboid claim in one world.
///
/// Identity fields (name, owner, region, world) are fixed at construction;
/// only the spawn point is mutable afterwards. The registry owns the
/// canonical copy of every claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    name: String,
    owner: String,
    region: Region,
    world: String,
    spawn: Option<Vec3>,
    created_at: DateTime<Utc>,
}

/// Spawn-point validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpawnError {
    #[error("spawn point ({}, {}, {}) is outside the claim bounds", pos.x, pos.y, pos.z)]
    OutOfBounds { pos: Vec3 },
}

impl Claim {
    /// Create a claim from two opposite corners, in any order.
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        p1: IVec3,
        p2: IVec3,
        world: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            region: Region::new(p1, p2),
            world: world.into(),
            spawn: None,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn spawn(&self) -> Option<Vec3> {
        self.spawn
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether a position in the given world lies inside this claim.
    pub fn contains(&self, world: &str, pos: Vec3) -> bool {
        self.world == world && self.region.contains(pos)
    }

    /// Whether this claim overlaps another. Claims in different worlds never
    /// intersect.
    pub fn intersects(&self, other: &Claim) -> bool {
        self.world == other.world && self.region.intersects(&other.region)
    }

    /// Set the spawn point, rejecting positions outside the claim. The
    /// previous spawn is kept on failure.
    pub fn set_spawn(&mut self, pos: Vec3) -> Result<(), SpawnError> {
        if !self.region.contains(pos) {
            return Err(SpawnError::OutOfBounds { pos });
        }
        self.spawn = Some(pos);
        Ok(())
    }

    /// Clear the spawn point. Idempotent.
    pub fn clear_spawn(&mut self) {
        self.spawn = None;
    }

    /// Format the creation instant with a strftime pattern in the given
    /// timezone. The claim itself only stores the UTC instant.
    pub fn format_created_at(&self, fmt: &str, tz: FixedOffset) -> String {
        self.created_at.with_timezone(&tz).format(fmt).to_string()
    }

    pub fn length(&self) -> u64 {
        self.region.length()
    }

    pub fn width(&self) -> u64 {
        self.region.width()
    }

    pub fn height(&self) -> u64 {
        self.region.height()
    }

    pub fn area(&self) -> u64 {
        self.region.area()
    }

    pub fn volume(&self) -> u64 {
        self.region.volume()
    }
}
