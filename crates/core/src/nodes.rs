//! Node factories
//!
//! Each factory turns one input collection into graph nodes. Records sharing a
//! natural key collapse into one node: the later record wins but keeps the
//! earlier record's position, so ids stay unique within a build.

use std::collections::{HashMap, HashSet};

use crate::classify::{self, Classification};
use crate::config::TierMatching;
use crate::input::{AdminTier, EmployeeInput, RoleInput};
use crate::model::{
    admin_id, employee_id, role_id, AdminLevelMeta, EmployeeMeta, GraphNode, NodeDetail, RoleMeta,
    DEFAULT_ROLE_LEVEL,
};

/// Admin-level nodes together with the administrators no tier accepted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminNodes {
    pub nodes: Vec<GraphNode>,
    pub unclassified: Vec<String>,
}

/// Collapse records sharing a key, later record winning at the earlier slot
fn collapse_by_key<'a, T>(items: &'a [T], key: impl Fn(usize, &T) -> String) -> Vec<(String, &'a T)> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<(String, &'a T)> = Vec::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
        let k = key(position, item);
        match slots.get(&k) {
            Some(&slot) => out[slot].1 = item,
            None => {
                slots.insert(k.clone(), out.len());
                out.push((k, item));
            }
        }
    }

    out
}

/// Uids for every employee, index-aligned with the input
///
/// Records without a usable `uid`/`id` get a positional placeholder
/// (`unknown-{position}`), suffixed until it clashes with no real uid, so a
/// placeholder never merges with a real employee.
pub fn employee_uids(employees: &[EmployeeInput]) -> Vec<String> {
    let real: HashSet<&str> = employees.iter().filter_map(EmployeeInput::key).collect();

    employees
        .iter()
        .enumerate()
        .map(|(position, employee)| match employee.key() {
            Some(key) => key.to_string(),
            None => {
                let mut placeholder = format!("unknown-{}", position);
                while real.contains(placeholder.as_str()) {
                    placeholder.push('_');
                }
                placeholder
            }
        })
        .collect()
}

fn collapse_employees(employees: &[EmployeeInput]) -> Vec<(String, &EmployeeInput)> {
    let uids = employee_uids(employees);
    collapse_by_key(employees, |position, _| uids[position].clone())
}

/// One node per role, sorted by hierarchy level (stable on ties)
pub fn build_role_nodes(roles: &[RoleInput]) -> Vec<GraphNode> {
    let mut nodes: Vec<GraphNode> = collapse_by_key(roles, |_, role| role.worker_type.clone())
        .into_iter()
        .map(|(worker_type, role)| GraphNode {
            id: role_id(&worker_type),
            name: non_blank(&role.title).unwrap_or_else(|| worker_type.clone()),
            detail: NodeDetail::Role(RoleMeta {
                hierarchy_level: role.level.unwrap_or(DEFAULT_ROLE_LEVEL),
                color: role.color.clone(),
                color1: role.color1.clone(),
                quantity: role.quantity,
                assigned_employees: role
                    .assigned_employees
                    .iter()
                    .filter_map(|r| r.uid().map(str::to_string))
                    .collect(),
                worker_type,
            }),
        })
        .collect();

    nodes.sort_by_key(role_level);
    nodes
}

/// One node per tier, sorted by level, with administrators classified into it
pub fn build_admin_nodes(tiers: &[AdminTier], employees: &[EmployeeInput], matching: TierMatching) -> AdminNodes {
    let mut tiers: Vec<(String, &AdminTier)> = collapse_by_key(tiers, |_, tier| tier.name.clone());
    tiers.sort_by_key(|(_, tier)| tier.level);

    let administrators: Vec<(String, &EmployeeInput)> = collapse_employees(employees)
        .into_iter()
        .filter(|(_, employee)| employee.is_admin)
        .collect();

    let ordered: Vec<&AdminTier> = tiers.iter().map(|(_, tier)| *tier).collect();
    let Classification {
        members,
        unclassified,
    } = classify::classify(&ordered, &administrators, matching);

    let nodes = tiers
        .into_iter()
        .zip(members)
        .map(|((name, tier), matched_employees)| GraphNode {
            id: admin_id(&name),
            name: non_blank(&tier.label).unwrap_or_else(|| name.clone()),
            detail: NodeDetail::AdminLevel(AdminLevelMeta {
                tier: name,
                level: tier.level,
                rights: tier.rights.clone(),
                rights_count: tier.rights.len(),
                color: tier.color.clone(),
                matched_employees,
            }),
        })
        .collect();

    AdminNodes {
        nodes,
        unclassified,
    }
}

/// One node per employee, in input order
pub fn build_employee_nodes(employees: &[EmployeeInput]) -> Vec<GraphNode> {
    collapse_employees(employees)
        .into_iter()
        .map(|(uid, employee)| GraphNode {
            id: employee_id(&uid),
            name: display_name(employee),
            detail: NodeDetail::Employee(EmployeeMeta {
                uid,
                first_name: employee.first_name.clone(),
                last_name: employee.last_name.clone(),
                email: employee.email.clone(),
                photo_url: employee.photo_url.clone(),
                is_administrator: employee.is_admin,
                rights: employee.rights.clone(),
                roles: employee.roles.clone(),
            }),
        })
        .collect()
}

fn display_name(employee: &EmployeeInput) -> String {
    let full = format!(
        "{} {}",
        employee.first_name.as_deref().unwrap_or(""),
        employee.last_name.as_deref().unwrap_or("")
    );
    match full.trim() {
        "" => "Unknown".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

fn role_level(node: &GraphNode) -> i64 {
    node.as_role()
        .map(|meta| meta.hierarchy_level)
        .unwrap_or(DEFAULT_ROLE_LEVEL)
}
