use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::permissions::Limit;

/// Claim policy settings.
///
/// Held as a plain resource; loading it from a config file (and migrating
/// old versions) is the host's job. Admission reads the enforce toggles and
/// default limits, presentation code reads the date format.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsConfig {
    /// Check the per-owner claim count on admission.
    pub enforce_count_limit: bool,
    /// Check the candidate claim area on admission.
    pub enforce_area_limit: bool,
    /// Count limit for actors without a count-limit permission.
    pub default_count_limit: Limit,
    /// Area limit for actors without an area-limit permission.
    pub default_area_limit: Limit,
    /// Tell the caller to warn the owner when the claim that was just
    /// admitted is their last one under the count limit.
    pub warn_on_count_limit: bool,
    /// strftime pattern for presenting claim creation dates.
    pub date_format: String,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            enforce_count_limit: true,
            enforce_area_limit: true,
            default_count_limit: Limit::Finite(5),
            default_area_limit: Limit::Finite(10_000),
            warn_on_count_limit: true,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enforce_limits() {
        let config = ClaimsConfig::default();
        assert!(config.enforce_count_limit);
        assert!(config.enforce_area_limit);
        assert_eq!(config.default_count_limit, Limit::Finite(5));
        assert_eq!(config.default_area_limit, Limit::Finite(10_000));
    }
}
