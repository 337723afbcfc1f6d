//! Node and edge types for the organigram graph
//!
//! Every node carries a kind-specific payload ([`NodeDetail`]) and every edge a
//! kind-specific relation ([`Relation`]). The flat [`NodeKind`] and [`EdgeKind`]
//! tags are derived from those payloads, so a node can never claim one kind
//! while holding another kind's metadata.

use serde::{Deserialize, Serialize};

/// Default hierarchy level for roles that do not declare one
pub const DEFAULT_ROLE_LEVEL: i64 = 999;

/// Level of the broadest administrative tier
pub const TOP_TIER_LEVEL: u32 = 0;

/// Kinds of nodes in the organigram
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A work role / position type
    Role,
    /// An administrative permission tier
    AdminLevel,
    /// A staff or administrator record
    Employee,
}

/// Kinds of relationships between nodes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Role hierarchy: earlier Role → later Role
    DependsOn,
    /// Rights flow: AdminLevel → next AdminLevel
    Inherits,
    /// Role membership: Employee → Role
    AssignedTo,
    /// Administrative linkage: Employee → AdminLevel
    HasRight,
}

/// A node in the organigram graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphNode {
    /// Deterministic identifier: `role:{workerType}`, `admin:{name}` or `employee:{uid}`
    pub id: String,
    /// Display name
    pub name: String,
    /// Kind tag plus kind-specific metadata
    #[serde(flatten)]
    pub detail: NodeDetail,
}

impl GraphNode {
    /// The kind of this node, derived from its payload
    pub fn kind(&self) -> NodeKind {
        match self.detail {
            NodeDetail::Role(_) => NodeKind::Role,
            NodeDetail::AdminLevel(_) => NodeKind::AdminLevel,
            NodeDetail::Employee(_) => NodeKind::Employee,
        }
    }

    pub fn as_role(&self) -> Option<&RoleMeta> {
        match &self.detail {
            NodeDetail::Role(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn as_admin_level(&self) -> Option<&AdminLevelMeta> {
        match &self.detail {
            NodeDetail::AdminLevel(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn as_employee(&self) -> Option<&EmployeeMeta> {
        match &self.detail {
            NodeDetail::Employee(meta) => Some(meta),
            _ => None,
        }
    }
}

/// Kind-specific node metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "metadata", rename_all = "snake_case")]
pub enum NodeDetail {
    Role(RoleMeta),
    AdminLevel(AdminLevelMeta),
    Employee(EmployeeMeta),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleMeta {
    pub worker_type: String,
    /// Lower levels come first in the hierarchy
    pub hierarchy_level: i64,
    pub color: Option<String>,
    pub color1: Option<String>,
    pub quantity: Option<u32>,
    /// Employee uids listed as holding this role
    pub assigned_employees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminLevelMeta {
    /// Tier key, as used in the node id
    pub tier: String,
    /// 0 is the broadest tier
    pub level: u32,
    /// Canonical rights of the tier, in caller order
    pub rights: Vec<String>,
    pub rights_count: usize,
    pub color: Option<String>,
    /// Uids of the administrators classified into this tier
    pub matched_employees: Vec<String>,
}

impl AdminLevelMeta {
    pub fn is_top_tier(&self) -> bool {
        self.level == TOP_TIER_LEVEL
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMeta {
    pub uid: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub is_administrator: bool,
    /// Personal permission ids; empty means unrestricted for administrators
    pub rights: Vec<String>,
    pub roles: Vec<String>,
}

/// A directed, typed edge between two node ids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Kind tag plus kind-specific metadata
    #[serde(flatten)]
    pub relation: Relation,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, relation: Relation) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation,
        }
    }

    /// The kind of this edge, derived from its relation
    pub fn kind(&self) -> EdgeKind {
        match self.relation {
            Relation::DependsOn { .. } => EdgeKind::DependsOn,
            Relation::Inherits { .. } => EdgeKind::Inherits,
            Relation::AssignedTo => EdgeKind::AssignedTo,
            Relation::HasRight { .. } => EdgeKind::HasRight,
        }
    }
}

/// Kind-specific edge metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "metadata", rename_all = "snake_case")]
pub enum Relation {
    DependsOn {
        dependency: Dependency,
    },
    #[serde(rename_all = "camelCase")]
    Inherits {
        /// Rights shared by both tiers, in the later tier's order
        rights_inherited: Vec<String>,
    },
    AssignedTo,
    HasRight {
        /// The employee's personal rights
        rights: Vec<String>,
        /// Level of the tier the employee links to
        level: u32,
    },
}

/// How a `DependsOn` edge was derived
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Dependency {
    /// Adjacent roles in level order
    Hierarchical,
    /// A role linked past same-level neighbours to the next distinct level
    SkipAhead,
}

/// Build the node id for a role
pub fn role_id(worker_type: &str) -> String {
    format!("role:{}", worker_type)
}

/// Build the node id for an administrative tier
pub fn admin_id(tier: &str) -> String {
    format!("admin:{}", tier)
}

/// Build the node id for an employee
pub fn employee_id(uid: &str) -> String {
    format!("employee:{}", uid)
}
