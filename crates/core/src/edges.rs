//! Edge derivation passes
//!
//! Four independent passes, each reading already-built node lists and
//! returning the edges it derives. A pass never mutates nodes and never
//! fails: when nothing matches it simply returns no edges. Nodes of the wrong
//! kind in an input list are skipped.

use crate::config::RoleChaining;
use crate::model::{AdminLevelMeta, Dependency, Edge, EmployeeMeta, GraphNode, Relation, RoleMeta};

fn roles(nodes: &[GraphNode]) -> Vec<(&GraphNode, &RoleMeta)> {
    nodes.iter().filter_map(|n| n.as_role().map(|m| (n, m))).collect()
}

fn admin_levels(nodes: &[GraphNode]) -> Vec<(&GraphNode, &AdminLevelMeta)> {
    nodes
        .iter()
        .filter_map(|n| n.as_admin_level().map(|m| (n, m)))
        .collect()
}

fn employees(nodes: &[GraphNode]) -> impl Iterator<Item = (&GraphNode, &EmployeeMeta)> {
    nodes.iter().filter_map(|n| n.as_employee().map(|m| (n, m)))
}

/// `DependsOn` edges along the role hierarchy
///
/// `role_nodes` must be sorted by level. With [`RoleChaining::Adjacent`] only
/// neighbouring roles whose level strictly increases are linked, so a run of
/// same-level roles breaks the chain. With [`RoleChaining::SkipAhead`] every
/// role links to the nearest following role of a higher level.
pub fn role_dependencies(role_nodes: &[GraphNode], chaining: RoleChaining) -> Vec<Edge> {
    let roles = roles(role_nodes);
    let mut edges = Vec::new();

    for (i, (node, meta)) in roles.iter().enumerate() {
        let next = match chaining {
            RoleChaining::Adjacent => roles
                .get(i + 1)
                .filter(|(_, next)| meta.hierarchy_level < next.hierarchy_level)
                .map(|next| (i + 1, next)),
            RoleChaining::SkipAhead => roles
                .iter()
                .enumerate()
                .skip(i + 1)
                .find(|(_, (_, next))| meta.hierarchy_level < next.hierarchy_level),
        };

        if let Some((j, (target, _))) = next {
            let dependency = if j == i + 1 {
                Dependency::Hierarchical
            } else {
                Dependency::SkipAhead
            };
            edges.push(Edge::new(&node.id, &target.id, Relation::DependsOn { dependency }));
        }
    }

    edges
}

/// `Inherits` edges between consecutive admin levels
///
/// `admin_nodes` must be sorted by level. The edge records which canonical
/// rights the two tiers share; neither tier is modified.
pub fn admin_inheritance(admin_nodes: &[GraphNode]) -> Vec<Edge> {
    admin_levels(admin_nodes)
        .windows(2)
        .map(|pair| {
            let (current, current_meta) = pair[0];
            let (next, next_meta) = pair[1];
            let rights_inherited = next_meta
                .rights
                .iter()
                .filter(|right| current_meta.rights.contains(right))
                .cloned()
                .collect();
            Edge::new(&current.id, &next.id, Relation::Inherits { rights_inherited })
        })
        .collect()
}

/// `AssignedTo` edges from employees to the roles listing them
///
/// Administrators never receive role assignments, even when a role lists
/// them.
pub fn role_assignments(employee_nodes: &[GraphNode], role_nodes: &[GraphNode]) -> Vec<Edge> {
    let roles = roles(role_nodes);
    let mut edges = Vec::new();

    for (employee, employee_meta) in employees(employee_nodes) {
        if employee_meta.is_administrator {
            continue;
        }
        for (role, role_meta) in &roles {
            if role_meta.assigned_employees.contains(&employee_meta.uid) {
                edges.push(Edge::new(&employee.id, &role.id, Relation::AssignedTo));
            }
        }
    }

    edges
}

/// `HasRight` edges from administrators to admin levels
///
/// An administrator links to every level sharing one of its rights. An
/// administrator without personal rights links to the top tier only.
pub fn admin_rights(employee_nodes: &[GraphNode], admin_nodes: &[GraphNode]) -> Vec<Edge> {
    let levels = admin_levels(admin_nodes);
    let mut edges = Vec::new();

    for (employee, employee_meta) in employees(employee_nodes) {
        if !employee_meta.is_administrator {
            continue;
        }
        for (level, level_meta) in &levels {
            let linked = if employee_meta.rights.is_empty() {
                level_meta.is_top_tier()
            } else {
                level_meta
                    .rights
                    .iter()
                    .any(|right| employee_meta.rights.contains(right))
            };

            if linked {
                edges.push(Edge::new(
                    &employee.id,
                    &level.id,
                    Relation::HasRight {
                        rights: employee_meta.rights.clone(),
                        level: level_meta.level,
                    },
                ));
            }
        }
    }

    edges
}
