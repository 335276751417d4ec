//! The claim registry: the single source of truth for registered claims.
//!
//! The registry is a host-owned resource, so every mutation goes through one
//! `&mut` borrow: `register`'s name check and insert cannot be interleaved
//! with another admission attempt. Embedders that share a registry across
//! threads wrap it in a single lock and keep check-and-insert inside it.

use std::collections::BTreeMap;

use bevy::math::Vec3;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::claim::Claim;
use crate::region::Region;

/// Name-keyed claim storage.
///
/// Iteration order is claim-name order; listings are deterministic, but
/// callers must not attach meaning to the order itself.
#[derive(Resource, Debug, Default, Serialize, Deserialize)]
pub struct ClaimRegistry {
    claims: BTreeMap<String, Claim>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a claim named `{0}` already exists")]
    NameExists(String),
    #[error("no claim named `{0}` is registered")]
    NotFound(String),
}

impl ClaimRegistry {
    /// Insert a claim under its name. Fails without modifying the registry
    /// if the name is taken; names are case-sensitive.
    pub fn register(&mut self, claim: Claim) -> Result<(), RegistryError> {
        if self.claims.contains_key(claim.name()) {
            return Err(RegistryError::NameExists(claim.name().to_string()));
        }
        self.claims.insert(claim.name().to_string(), claim);
        Ok(())
    }

    /// Remove a claim by name, returning it. Removing an unknown name is a
    /// no-op, not an error.
    pub fn unregister(&mut self, name: &str) -> Option<Claim> {
        self.claims.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Claim> {
        self.claims.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Claim> {
        self.claims.get_mut(name)
    }

    /// Like `get`, for callers that treat absence as a failure.
    pub fn require(&self, name: &str) -> Result<&Claim, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Like `get_mut`, for callers that treat absence as a failure.
    pub fn require_mut(&mut self, name: &str) -> Result<&mut Claim, RegistryError> {
        self.claims
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    /// All claims containing a position in a world.
    pub fn claims_at(&self, world: &str, pos: Vec3) -> Vec<&Claim> {
        self.iter().filter(|c| c.contains(world, pos)).collect()
    }

    /// The first claim containing a position, for callers that only need to
    /// know whether the spot is claimed at all.
    pub fn first_claim_at(&self, world: &str, pos: Vec3) -> Option<&Claim> {
        self.iter().find(|c| c.contains(world, pos))
    }

    /// All claims in a world whose region overlaps `region`.
    pub fn intersecting(&self, world: &str, region: &Region) -> Vec<&Claim> {
        self.iter()
            .filter(|c| c.world() == world && c.region().intersects(region))
            .collect()
    }

    /// All claims of an owner. Owner names match case-insensitively.
    pub fn owned_by(&self, owner: &str) -> Vec<&Claim> {
        self.iter()
            .filter(|c| c.owner().eq_ignore_ascii_case(owner))
            .collect()
    }

    pub fn count_owned_by(&self, owner: &str) -> usize {
        self.iter()
            .filter(|c| c.owner().eq_ignore_ascii_case(owner))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::IVec3;

    fn claim(name: &str, owner: &str, lo: i32, hi: i32) -> Claim {
        Claim::new(
            name,
            owner,
            IVec3::splat(lo),
            IVec3::splat(hi),
            "overworld",
        )
    }

    #[test]
    fn test_register_enforces_unique_names() {
        let mut registry = ClaimRegistry::default();
        registry.register(claim("base", "Bob", 0, 10)).unwrap();
        assert!(registry.exists("base"));

        let err = registry.register(claim("base", "Eve", 50, 60)).unwrap_err();
        assert_eq!(err, RegistryError::NameExists("base".to_string()));
        // The original claim is untouched.
        assert_eq!(registry.get("base").unwrap().owner(), "Bob");

        registry.unregister("base");
        assert!(!registry.exists("base"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = ClaimRegistry::default();
        registry.register(claim("Base", "Bob", 0, 10)).unwrap();
        registry.register(claim("base", "Bob", 20, 30)).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let mut registry = ClaimRegistry::default();
        assert!(registry.unregister("ghost").is_none());
    }

    #[test]
    fn test_require_reports_not_found() {
        let registry = ClaimRegistry::default();
        assert_eq!(
            registry.require("ghost").unwrap_err(),
            RegistryError::NotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_claims_at_scans_world_and_bounds() {
        let mut registry = ClaimRegistry::default();
        registry.register(claim("a", "Bob", 0, 10)).unwrap();
        registry.register(claim("b", "Eve", 5, 20)).unwrap();
        registry
            .register(Claim::new(
                "c",
                "Eve",
                IVec3::splat(0),
                IVec3::splat(10),
                "nether",
            ))
            .unwrap();

        let here = registry.claims_at("overworld", Vec3::splat(7.0));
        let names: Vec<_> = here.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(
            registry.first_claim_at("overworld", Vec3::splat(7.0)).unwrap().name(),
            "a"
        );
        assert!(registry.first_claim_at("overworld", Vec3::splat(100.0)).is_none());
    }

    #[test]
    fn test_intersecting_ignores_other_worlds() {
        let mut registry = ClaimRegistry::default();
        registry.register(claim("a", "Bob", 0, 10)).unwrap();
        registry
            .register(Claim::new(
                "b",
                "Eve",
                IVec3::splat(0),
                IVec3::splat(10),
                "nether",
            ))
            .unwrap();

        let region = Region::new(IVec3::splat(5), IVec3::splat(30));
        let hits = registry.intersecting("overworld", &region);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "a");
    }

    #[test]
    fn test_owned_by_matches_case_insensitively() {
        let mut registry = ClaimRegistry::default();
        registry.register(claim("a", "Bob", 0, 10)).unwrap();
        registry.register(claim("b", "BOB", 20, 30)).unwrap();
        registry.register(claim("c", "Eve", 40, 50)).unwrap();

        assert_eq!(registry.owned_by("bob").len(), 2);
        assert_eq!(registry.count_owned_by("bob"), 2);
        assert_eq!(registry.count_owned_by("eve"), 1);
    }
}
