//! Graph construction
//!
//! [`GraphBuilder`] runs the node factories and then the edge passes in a
//! fixed order:
//!
//! 1. Role nodes, admin-level nodes, employee nodes
//! 2. Role dependencies, admin inheritance, role assignments, admin rights
//!
//! The builder holds nothing but its [`GraphConfig`]; every build returns a
//! fresh [`OrgGraph`], so one builder can serve any number of builds.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GraphConfig;
use crate::edges;
use crate::input::{self, AdminTier, EmployeeInput, OrgInput, RoleInput};
use crate::model::{Edge, EdgeKind, GraphNode, NodeKind};
use crate::nodes::{self, AdminNodes};
use crate::path::PathFinder;

/// The result of one build
///
/// `nodes` holds every node (roles, then admin levels, then employees), and
/// the typed lists hold the same nodes in their sorted order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrgGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
    pub role_nodes: Vec<GraphNode>,
    pub admin_nodes: Vec<GraphNode>,
    pub employee_nodes: Vec<GraphNode>,
    /// Administrator uids that no tier accepted
    pub unclassified: Vec<String>,
}

impl OrgGraph {
    /// Find a node by its id
    ///
    /// **Note**: linear scan, fine for organigrams of a few hundred nodes.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_by_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    pub fn edges_by_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind() == kind)
    }

    /// Edges pointing at `id`
    pub fn incoming_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.target == id)
    }

    /// Edges leaving `id`
    pub fn outgoing_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index this graph for path queries, bounded by `max_depth` edges
    pub fn path_finder(&self, max_depth: usize) -> PathFinder {
        PathFinder::from_graph(self, max_depth)
    }
}

/// Builds [`OrgGraph`]s from roles, employees and the admin rights hierarchy
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: GraphConfig,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build a graph, falling back to defaults for anything missing
    ///
    /// Never fails; empty inputs produce an empty graph. `strict` is ignored
    /// here, use [`GraphBuilder::try_build`] to honour it.
    #[instrument(skip_all, fields(roles = roles.len(), employees = employees.len(), tiers = tiers.len()))]
    pub fn build(&self, roles: &[RoleInput], employees: &[EmployeeInput], tiers: &[AdminTier]) -> OrgGraph {
        let role_nodes = nodes::build_role_nodes(roles);
        let AdminNodes {
            nodes: admin_nodes,
            unclassified,
        } = nodes::build_admin_nodes(tiers, employees, self.config.tier_matching);
        let employee_nodes = nodes::build_employee_nodes(employees);

        let mut edges = edges::role_dependencies(&role_nodes, self.config.role_chaining);
        edges.extend(edges::admin_inheritance(&admin_nodes));
        edges.extend(edges::role_assignments(&employee_nodes, &role_nodes));
        edges.extend(edges::admin_rights(&employee_nodes, &admin_nodes));

        let nodes: Vec<GraphNode> = role_nodes
            .iter()
            .chain(&admin_nodes)
            .chain(&employee_nodes)
            .cloned()
            .collect();

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            unclassified = unclassified.len(),
            "built organigram graph"
        );

        OrgGraph {
            nodes,
            edges,
            role_nodes,
            admin_nodes,
            employee_nodes,
            unclassified,
        }
    }

    /// Build a graph, validating the input first when the config is strict
    ///
    /// # Errors
    /// Returns the validation error when `strict` is set and the input has
    /// records the lenient build would have to guess about.
    pub fn try_build(
        &self,
        roles: &[RoleInput],
        employees: &[EmployeeInput],
        tiers: &[AdminTier],
    ) -> anyhow::Result<OrgGraph> {
        if self.config.strict {
            input::validate(roles, employees, tiers)?;
        }
        Ok(self.build(roles, employees, tiers))
    }

    /// [`GraphBuilder::try_build`] over a whole input document
    pub fn build_input(&self, input: &OrgInput) -> anyhow::Result<OrgGraph> {
        self.try_build(&input.roles, &input.employees, &input.admin_rights_hierarchy)
    }
}

/// Build a graph with the default configuration
pub fn build_graph(roles: &[RoleInput], employees: &[EmployeeInput], tiers: &[AdminTier]) -> OrgGraph {
    GraphBuilder::default().build(roles, employees, tiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<RoleInput>, Vec<EmployeeInput>, Vec<AdminTier>) {
        let roles = vec![
            RoleInput {
                worker_type: "doctor".to_string(),
                level: Some(1),
                assigned_employees: vec!["e1".into()],
                ..Default::default()
            },
            RoleInput {
                worker_type: "nurse".to_string(),
                level: Some(2),
                assigned_employees: vec!["e2".into()],
                ..Default::default()
            },
        ];
        let employees = vec![
            EmployeeInput {
                uid: Some("e1".to_string()),
                ..Default::default()
            },
            EmployeeInput {
                uid: Some("e2".to_string()),
                ..Default::default()
            },
            EmployeeInput {
                uid: Some("root".to_string()),
                is_admin: true,
                ..Default::default()
            },
        ];
        let tiers = vec![
            AdminTier {
                level: 0,
                name: "owner".to_string(),
                rights: vec!["a".to_string()],
                ..Default::default()
            },
            AdminTier {
                level: 1,
                name: "manager".to_string(),
                rights: vec!["a".to_string()],
                ..Default::default()
            },
        ];
        (roles, employees, tiers)
    }

    #[test]
    fn test_build_counts() {
        let (roles, employees, tiers) = sample();
        let graph = build_graph(&roles, &employees, &tiers);

        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.role_nodes.len(), 2);
        assert_eq!(graph.admin_nodes.len(), 2);
        assert_eq!(graph.employee_nodes.len(), 3);
        // doctor→nurse, owner→manager, e1→doctor, e2→nurse, root→owner
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.edges_by_kind(EdgeKind::AssignedTo).count(), 2);
    }

    #[test]
    fn test_combined_list_order() {
        let (roles, employees, tiers) = sample();
        let graph = build_graph(&roles, &employees, &tiers);

        let kinds: Vec<NodeKind> = graph.nodes.iter().map(GraphNode::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Role,
                NodeKind::Role,
                NodeKind::AdminLevel,
                NodeKind::AdminLevel,
                NodeKind::Employee,
                NodeKind::Employee,
                NodeKind::Employee,
            ]
        );
        assert_eq!(graph.nodes_by_kind(NodeKind::AdminLevel).count(), 2);
    }

    #[test]
    fn test_incoming_and_outgoing() {
        let (roles, employees, tiers) = sample();
        let graph = build_graph(&roles, &employees, &tiers);

        let incoming: Vec<&str> = graph
            .incoming_edges("role:nurse")
            .map(|e| e.source.as_str())
            .collect();
        assert_eq!(incoming, vec!["role:doctor", "employee:e2"]);

        let outgoing: Vec<&str> = graph
            .outgoing_edges("employee:root")
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(outgoing, vec!["admin:owner"]);
        assert_eq!(graph.outgoing_edges("missing").count(), 0);
    }

    #[test]
    fn test_builder_is_reusable() {
        let builder = GraphBuilder::default();
        let (roles, employees, tiers) = sample();

        let full = builder.build(&roles, &employees, &tiers);
        let empty = builder.build(&[], &[], &[]);
        let again = builder.build(&roles, &employees, &tiers);

        assert!(empty.is_empty());
        assert!(empty.edges.is_empty());
        assert_eq!(full, again);
    }

    #[test]
    fn test_strict_build_rejects_bad_input() {
        let builder = GraphBuilder::new(GraphConfig {
            strict: true,
            ..Default::default()
        });
        let employees = vec![EmployeeInput::default()];

        assert!(builder.try_build(&[], &employees, &[]).is_err());
        assert!(GraphBuilder::default().try_build(&[], &employees, &[]).is_ok());
    }

    #[test]
    fn test_node_lookup() {
        let (roles, employees, tiers) = sample();
        let graph = build_graph(&roles, &employees, &tiers);

        assert_eq!(graph.node("admin:manager").map(GraphNode::kind), Some(NodeKind::AdminLevel));
        assert!(graph.node("role:unknown").is_none());
    }
}
