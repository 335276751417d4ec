//! Claim admission: the checks between "I want this claim" and it existing.
//!
//! Checks run in a fixed order and stop at the first failure, because the
//! order decides which error a user sees first: name uniqueness, then the
//! count limit, then the area limit, then cross-owner intersection. Claims
//! owned by the requester never block admission; intersecting your own
//! land is always allowed.

use bevy::math::IVec3;
use thiserror::Error;

use crate::claim::Claim;
use crate::config::ClaimsConfig;
use crate::permissions::{self, resolve_limit, Limit, LimitFamily, PermissionSet};
use crate::registry::ClaimRegistry;
use crate::selection::{SelectionError, SelectionState};

// =============================================================================
// Request / outcome types
// =============================================================================

/// A prospective claim, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub name: String,
    pub owner: String,
    pub first: IVec3,
    pub second: IVec3,
    pub world: String,
}

/// Just enough of a blocking/bypassed claim to present it to the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectedClaim {
    pub name: String,
    pub owner: String,
}

impl std::fmt::Display for IntersectedClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` (owned by {})", self.name, self.owner)
    }
}

/// Side information about a successful admission the caller should surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionOutcome {
    /// Set when this admission brings the owner to their claim count limit;
    /// the caller should warn them that `limit` is now reached.
    pub near_count_limit: Option<u32>,
    /// Cross-owner claims the candidate intersects, admitted anyway because
    /// the requester holds the bypass permission. The caller should notify
    /// the requester which claims are affected.
    pub bypassed: Vec<IntersectedClaim>,
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("a claim named `{0}` already exists")]
    NameExists(String),
    #[error("the claim count limit of {limit} is reached")]
    CountLimitExceeded { limit: u32 },
    #[error("the claim area of {area} blocks exceeds the limit of {limit}")]
    AreaLimitExceeded { limit: u32, area: u64 },
    #[error("the claim would intersect {}", list_claims(claims))]
    Intersects { claims: Vec<IntersectedClaim> },
}

/// Failure of the selection-to-claim flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateClaimError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Admission(#[from] AdmissionError),
}

fn list_claims(claims: &[IntersectedClaim]) -> String {
    match claims {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => {
            let init = init
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{init} and {last}")
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Run every admission check against a registry snapshot without modifying
/// it. Returns the canonicalized claim and the outcome notes on success.
pub fn evaluate(
    registry: &ClaimRegistry,
    config: &ClaimsConfig,
    perms: &PermissionSet,
    request: &ClaimRequest,
) -> Result<(Claim, AdmissionOutcome), AdmissionError> {
    if registry.exists(&request.name) {
        return Err(AdmissionError::NameExists(request.name.clone()));
    }

    let claim = Claim::new(
        &request.name,
        &request.owner,
        request.first,
        request.second,
        &request.world,
    );
    let mut outcome = AdmissionOutcome::default();

    if config.enforce_count_limit {
        if let Limit::Finite(limit) =
            resolve_limit(perms, LimitFamily::Count, config.default_count_limit)
        {
            let owned = registry.count_owned_by(&request.owner);
            if owned >= limit as usize {
                return Err(AdmissionError::CountLimitExceeded { limit });
            }
            if config.warn_on_count_limit && owned + 1 == limit as usize {
                outcome.near_count_limit = Some(limit);
            }
        }
    }

    if config.enforce_area_limit {
        if let Limit::Finite(limit) =
            resolve_limit(perms, LimitFamily::Area, config.default_area_limit)
        {
            let area = claim.area();
            if area > u64::from(limit) {
                return Err(AdmissionError::AreaLimitExceeded { limit, area });
            }
        }
    }

    // Intersections with the requester's own claims are filtered out; only
    // other owners' land can block. Exact owner match, like ownership checks
    // elsewhere in the command surface.
    let intersected: Vec<IntersectedClaim> = registry
        .intersecting(&request.world, claim.region())
        .into_iter()
        .filter(|c| c.owner() != request.owner)
        .map(|c| IntersectedClaim {
            name: c.name().to_string(),
            owner: c.owner().to_string(),
        })
        .collect();
    if !intersected.is_empty() {
        if perms.has(permissions::BYPASS_INTERSECT) {
            outcome.bypassed = intersected;
        } else {
            return Err(AdmissionError::Intersects {
                claims: intersected,
            });
        }
    }

    Ok((claim, outcome))
}

/// Evaluate a request and register the claim on success.
///
/// Evaluation and insertion happen under the same `&mut` borrow, so no other
/// admission can slip in between the uniqueness check and the insert.
pub fn admit(
    registry: &mut ClaimRegistry,
    config: &ClaimsConfig,
    perms: &PermissionSet,
    request: &ClaimRequest,
) -> Result<AdmissionOutcome, AdmissionError> {
    let (claim, outcome) = evaluate(registry, config, perms, request)?;
    registry
        .register(claim)
        .map_err(|_| AdmissionError::NameExists(request.name.clone()))?;
    Ok(outcome)
}

/// Create a claim from an actor's current corner selection.
///
/// Requires both corners in one world, admits the claim with the actor as
/// owner, and clears the actor's selection once the claim is registered.
pub fn claim_from_selection(
    registry: &mut ClaimRegistry,
    selection: &mut SelectionState,
    config: &ClaimsConfig,
    perms: &PermissionSet,
    actor: &str,
    name: &str,
) -> Result<AdmissionOutcome, CreateClaimError> {
    let (first, second) = selection.selected_pair(actor)?;
    let request = ClaimRequest {
        name: name.to_string(),
        owner: actor.to_string(),
        first: first.point,
        second: second.point,
        world: first.world.clone(),
    };
    let outcome = admit(registry, config, perms, &request)?;
    selection.deselect_all(actor);
    Ok(outcome)
}

// =============================================================================
// Tests
// =============================================================================
