//! Input records for the graph builder
//!
//! These mirror the collections the surrounding application already keeps:
//! work roles, staff records and the administrative rights hierarchy. Every
//! optional field has a default so the builder itself never fails on missing
//! data; [`validate`] is available for callers who prefer to reject
//! incomplete records up front.

use std::collections::HashSet;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// One work role / position type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    pub worker_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub color1: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub assigned_employees: Vec<EmployeeRef>,
}

/// Reference to an employee from a role's assignment list
///
/// Accepts either a bare id string or a record carrying `uid` and/or `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EmployeeRef {
    Id(String),
    Record {
        #[serde(default)]
        uid: Option<String>,
        #[serde(default)]
        id: Option<String>,
    },
}

impl EmployeeRef {
    /// The referenced uid, preferring `uid` over `id`; empty strings count as absent
    pub fn uid(&self) -> Option<&str> {
        match self {
            EmployeeRef::Id(id) => non_empty(Some(id)),
            EmployeeRef::Record { uid, id } => non_empty(uid.as_ref()).or(non_empty(id.as_ref())),
        }
    }
}

impl From<&str> for EmployeeRef {
    fn from(id: &str) -> Self {
        EmployeeRef::Id(id.to_string())
    }
}

/// One staff or administrator record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub rights: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl EmployeeInput {
    /// The employee's natural key, preferring `uid` over `id`; empty strings count as absent
    pub fn key(&self) -> Option<&str> {
        non_empty(self.uid.as_ref()).or(non_empty(self.id.as_ref()))
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// One administrative tier definition, owned by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminTier {
    pub level: u32,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub rights: Vec<String>,
}

/// The three collections the builder consumes, as one document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrgInput {
    #[serde(default)]
    pub roles: Vec<RoleInput>,
    #[serde(default)]
    pub employees: Vec<EmployeeInput>,
    #[serde(default)]
    pub admin_rights_hierarchy: Vec<AdminTier>,
}

/// Reject records that the builder would otherwise paper over
///
/// # Errors
/// Returns the first problem found: a role with a blank `workerType`, a tier
/// with a blank `name`, an employee without `uid`/`id`, or two records of the
/// same collection sharing a natural key.
pub fn validate(roles: &[RoleInput], employees: &[EmployeeInput], tiers: &[AdminTier]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for (position, role) in roles.iter().enumerate() {
        if role.worker_type.trim().is_empty() {
            bail!("role #{} has an empty workerType", position);
        }
        if !seen.insert(role.worker_type.as_str()) {
            bail!("duplicate role workerType '{}'", role.worker_type);
        }
    }

    let mut seen = HashSet::new();
    for (position, tier) in tiers.iter().enumerate() {
        if tier.name.trim().is_empty() {
            bail!("admin tier #{} (level {}) has an empty name", position, tier.level);
        }
        if !seen.insert(tier.name.as_str()) {
            bail!("duplicate admin tier name '{}'", tier.name);
        }
    }

    let mut seen = HashSet::new();
    for (position, employee) in employees.iter().enumerate() {
        let Some(key) = employee.key().filter(|key| !key.trim().is_empty()) else {
            bail!("employee #{} has neither uid nor id", position);
        };
        if !seen.insert(key) {
            bail!("duplicate employee uid '{}'", key);
        }
    }

    Ok(())
}
