//! Permission snapshots and limit-family resolution.
//!
//! The host's permission system (storage, groups, inheritance) is external;
//! admission only sees a flat snapshot of an actor's effective grants. Limit
//! permissions encode their value as a trailing suffix
//! (`palisade.command.claim.count_limit.10`, `...area_limit.unlimited`) and
//! are parsed into structured grants before any policy math happens.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Create and manage claims.
pub const CLAIM: &str = "palisade.command.claim";
/// Select claim corners with the selection tool.
pub const SELECTION: &str = "palisade.command.selection";
/// Create claims that intersect claims of other owners.
pub const BYPASS_INTERSECT: &str = "palisade.command.claim.bypass_intersect";
/// Prefix of the claim-count limit family.
pub const COUNT_LIMIT_PREFIX: &str = "palisade.command.claim.count_limit.";
/// Prefix of the claim-area limit family.
pub const AREA_LIMIT_PREFIX: &str = "palisade.command.claim.area_limit.";

/// Snapshot of an actor's effective permission grants.
///
/// Entries map a permission string to its granted value; a missing entry
/// counts as not granted.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    grants: HashMap<String, bool>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a permission.
    pub fn grant(&mut self, permission: impl Into<String>) {
        self.set(permission, true);
    }

    /// Record a permission with an explicit value (group systems can assign
    /// `false` to mask an inherited grant).
    pub fn set(&mut self, permission: impl Into<String>, value: bool) {
        self.grants.insert(permission.into(), value);
    }

    /// Whether a permission is granted.
    pub fn has(&self, permission: &str) -> bool {
        self.grants.get(permission).copied().unwrap_or(false)
    }

    /// All granted permission strings.
    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.grants
            .iter()
            .filter(|(_, &value)| value)
            .map(|(permission, _)| permission.as_str())
    }
}

/// A limit value. `Unlimited` is a sentinel, never a large integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Limit {
    Finite(u32),
    Unlimited,
}

impl Limit {
    pub fn is_unlimited(self) -> bool {
        matches!(self, Limit::Unlimited)
    }
}

/// The limit families admission evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitFamily {
    Count,
    Area,
}

impl LimitFamily {
    fn prefix(self) -> &'static str {
        match self {
            LimitFamily::Count => COUNT_LIMIT_PREFIX,
            LimitFamily::Area => AREA_LIMIT_PREFIX,
        }
    }
}

/// A limit permission parsed into its structured form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitGrant {
    pub family: LimitFamily,
    pub limit: Limit,
}

/// Parse a permission string into a limit grant, or `None` if it does not
/// belong to a limit family. Malformed suffixes are ignored rather than
/// treated as zero.
pub fn parse_limit_grant(permission: &str) -> Option<LimitGrant> {
    for family in [LimitFamily::Count, LimitFamily::Area] {
        if let Some(suffix) = permission.strip_prefix(family.prefix()) {
            let limit = if suffix == "unlimited" {
                Limit::Unlimited
            } else {
                Limit::Finite(suffix.parse().ok()?)
            };
            return Some(LimitGrant { family, limit });
        }
    }
    None
}

/// Resolve the effective limit of one family from an actor's grants.
///
/// Group inheritance can hand an actor several grants of the same family;
/// the most permissive wins: any `unlimited` grant removes the limit, and
/// among finite grants the maximum applies. Holding any grant of the family
/// overrides the default entirely, so a granted limit may be lower than the
/// default. Only with no grant of the family does `default` apply.
pub fn resolve_limit(perms: &PermissionSet, family: LimitFamily, default: Limit) -> Limit {
    let mut best: Option<u32> = None;
    for grant in perms.granted().filter_map(parse_limit_grant) {
        if grant.family != family {
            continue;
        }
        match grant.limit {
            Limit::Unlimited => return Limit::Unlimited,
            Limit::Finite(value) => best = Some(best.map_or(value, |b| b.max(value))),
        }
    }
    match best {
        Some(value) => Limit::Finite(value),
        None => default,
    }
}
