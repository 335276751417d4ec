use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::claim::Claim;

/// Decides who may act inside a claim besides being stopped at the border.
///
/// Contract: the owner is always authorized; implementations add their own
/// notion of an allow-list on top. Whether that list is global or per-claim
/// is left to the implementation.
pub trait ClaimAccess: Send + Sync {
    fn is_authorized(&self, claim: &Claim, actor: &str) -> bool;
}

/// One process-wide allow-list applying to every claim.
///
/// Insertion-ordered and deduplicated; names match exactly.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalAllowList {
    players: Vec<String>,
}

impl GlobalAllowList {
    /// Add a player. Returns false if they were already listed.
    pub fn add(&mut self, player: impl Into<String>) -> bool {
        let player = player.into();
        if self.players.contains(&player) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Remove a player. Returns false if they were not listed.
    pub fn remove(&mut self, player: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p != player);
        self.players.len() != before
    }

    pub fn contains(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }
}

impl ClaimAccess for GlobalAllowList {
    fn is_authorized(&self, claim: &Claim, actor: &str) -> bool {
        claim.owner() == actor || self.contains(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::IVec3;

    fn claim() -> Claim {
        Claim::new("base", "Bob", IVec3::ZERO, IVec3::splat(10), "overworld")
    }

    #[test]
    fn test_owner_is_always_authorized() {
        let list = GlobalAllowList::default();
        assert!(list.is_authorized(&claim(), "Bob"));
        assert!(!list.is_authorized(&claim(), "Eve"));
    }

    #[test]
    fn test_listed_player_is_authorized() {
        let mut list = GlobalAllowList::default();
        list.add("Eve");
        assert!(list.is_authorized(&claim(), "Eve"));
        list.remove("Eve");
        assert!(!list.is_authorized(&claim(), "Eve"));
    }

    #[test]
    fn test_add_deduplicates() {
        let mut list = GlobalAllowList::default();
        assert!(list.add("Eve"));
        assert!(!list.add("Eve"));
        assert_eq!(list.players(), &["Eve".to_string()]);
        assert!(list.remove("Eve"));
        assert!(!list.remove("Eve"));
    }
}
