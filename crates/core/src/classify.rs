//! Sorting administrators into administrative tiers
//!
//! Tiers are defined by the caller as canonical rights lists. An
//! administrator's personal rights rarely line up with those lists exactly, so
//! membership is decided in one of two ways (see [`TierMatching`]):
//!
//! - **Heuristic**: each tier independently accepts administrators by rights
//!   count and overlap. The top tier takes anyone with no personal rights
//!   (read as unrestricted) or at least as many rights as the tier defines;
//!   lower tiers take anyone sharing a right with the tier while holding
//!   strictly fewer rights than it defines.
//! - **Exact first**: an administrator whose rights set equals a tier's set
//!   belongs to that tier. Otherwise the first tier the heuristic accepts
//!   wins. Anyone left over is reported as unclassified rather than guessed.

use std::collections::HashSet;

use crate::config::TierMatching;
use crate::input::{AdminTier, EmployeeInput};
use crate::model::TOP_TIER_LEVEL;

/// Tier membership for one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Matched administrator uids, index-aligned with the tiers passed in
    pub members: Vec<Vec<String>>,
    /// Administrators no tier accepted
    pub unclassified: Vec<String>,
}

/// True when `rights` shares at least one permission with `tier`
fn overlaps(tier: &AdminTier, rights: &[String]) -> bool {
    tier.rights.iter().any(|right| rights.contains(right))
}

/// The legacy size/intersection rule
pub fn heuristic_accepts(tier: &AdminTier, rights: &[String]) -> bool {
    if tier.level == TOP_TIER_LEVEL {
        return rights.is_empty() || rights.len() >= tier.rights.len();
    }
    overlaps(tier, rights) && !rights.is_empty() && rights.len() < tier.rights.len()
}

/// Order-insensitive set equality; empty personal rights equal the top tier
pub fn exactly_matches(tier: &AdminTier, rights: &[String]) -> bool {
    if rights.is_empty() {
        return tier.level == TOP_TIER_LEVEL;
    }
    let personal: HashSet<&str> = rights.iter().map(String::as_str).collect();
    let canonical: HashSet<&str> = tier.rights.iter().map(String::as_str).collect();
    personal == canonical
}

/// Classify administrators into `tiers`
///
/// `tiers` must already be in ascending level order; "first" below means the
/// lowest level. `administrators` pairs each administrator's uid with its
/// record. Non-administrators are the caller's business and must not be
/// passed in.
pub fn classify(
    tiers: &[&AdminTier],
    administrators: &[(String, &EmployeeInput)],
    matching: TierMatching,
) -> Classification {
    let mut members = vec![Vec::new(); tiers.len()];
    let mut unclassified = Vec::new();

    for (uid, employee) in administrators {
        match matching {
            TierMatching::Heuristic => {
                let mut placed = false;
                for (slot, tier) in tiers.iter().enumerate() {
                    if heuristic_accepts(tier, &employee.rights) {
                        members[slot].push(uid.clone());
                        placed = true;
                    }
                }
                if !placed {
                    unclassified.push(uid.clone());
                }
            }
            TierMatching::ExactFirst => {
                let slot = tiers
                    .iter()
                    .position(|tier| exactly_matches(tier, &employee.rights))
                    .or_else(|| {
                        tiers
                            .iter()
                            .position(|tier| heuristic_accepts(tier, &employee.rights))
                    });
                match slot {
                    Some(slot) => members[slot].push(uid.clone()),
                    None => unclassified.push(uid.clone()),
                }
            }
        }
    }

    Classification {
        members,
        unclassified,
    }
}
