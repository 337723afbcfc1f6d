//! Builder and query configuration

use serde::{Deserialize, Serialize};

/// Default bound on the number of edges in an enumerated path
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// How administrators are sorted into tiers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TierMatching {
    /// Size/intersection heuristic applied to every tier independently.
    /// An administrator may land in several tiers, or in none.
    Heuristic,
    /// Exact rights-set equality first, heuristic second; each administrator
    /// ends up in exactly one tier or in the unclassified bucket.
    #[default]
    ExactFirst,
}

/// How `DependsOn` edges are drawn between roles
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoleChaining {
    /// Link adjacent roles only when the level strictly increases
    #[default]
    Adjacent,
    /// Link every role to the nearest following role with a higher level
    SkipAhead,
}

/// Configuration shared by the builder and the path finder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    /// Maximum number of edges in a path found by depth-first search
    pub max_depth: usize,
    pub tier_matching: TierMatching,
    pub role_chaining: RoleChaining,
    /// Validate input before building instead of falling back to defaults
    pub strict: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            tier_matching: TierMatching::default(),
            role_chaining: RoleChaining::default(),
            strict: false,
        }
    }
}
