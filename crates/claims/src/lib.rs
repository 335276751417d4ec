//! Land-claim core for a shared voxel world: cuboid claim registry, per-actor
//! corner selection, and the permission-scoped admission policy between them.
//!
//! Everything stateful is a resource owned by the host `App`; there are no
//! process-wide singletons. The host's sequential schedule serializes all
//! registry and selection access; admission runs its uniqueness check and
//! insert under one `&mut` borrow, so it stays safe for embedders that drive
//! it from their own locking.

use bevy::prelude::*;

pub mod access;
pub mod admission;
pub mod claim;
pub mod config;
pub mod permissions;
pub mod region;
pub mod registry;
pub mod selection;


pub use access::{ClaimAccess, GlobalAllowList};
pub use admission::{
    admit, claim_from_selection, evaluate, AdmissionError, AdmissionOutcome, ClaimRequest,
    CreateClaimError, IntersectedClaim,
};
pub use claim::{Claim, SpawnError};
pub use config::ClaimsConfig;
pub use permissions::{Limit, LimitFamily, PermissionSet};
pub use region::Region;
pub use registry::{ClaimRegistry, RegistryError};
pub use selection::{
    ClickKind, SelectPointEvent, SelectedPoint, SelectionError, SelectionPlugin, SelectionState,
};

/// Registers every claim resource and the selection event flow.
///
/// The host composes this into its `App`; nothing here assumes a renderer or
/// a window.
pub struct ClaimsPlugin;

impl Plugin for ClaimsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClaimsConfig>()
            .init_resource::<ClaimRegistry>()
            .init_resource::<GlobalAllowList>()
            .add_plugins(SelectionPlugin);
    }
}
