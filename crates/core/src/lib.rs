//! Organigram Core Library
//!
//! This library turns an organization's work roles, staff records and
//! administrative rights tiers into a directed graph of typed nodes and
//! edges, and answers path queries over it.
//!
//! Everything here is a pure, synchronous transformation: no I/O, no shared
//! state between builds.
//!
//! # Example
//!
//! ```
//! use organigram_core::{build_graph, RoleInput};
//!
//! let roles = vec![
//!     RoleInput { worker_type: "doctor".into(), level: Some(1), ..Default::default() },
//!     RoleInput { worker_type: "nurse".into(), level: Some(2), ..Default::default() },
//! ];
//! let graph = build_graph(&roles, &[], &[]);
//!
//! let finder = graph.path_finder(organigram_core::DEFAULT_MAX_DEPTH);
//! assert_eq!(
//!     finder.shortest_path("role:doctor", "role:nurse"),
//!     Some(vec!["role:doctor".to_string(), "role:nurse".to_string()])
//! );
//! ```

pub mod builder;
pub mod classify;
pub mod config;
pub mod edges;
pub mod input;
pub mod model;
pub mod nodes;
pub mod path;

// Re-export commonly used types
pub use builder::{build_graph, GraphBuilder, OrgGraph};
pub use config::{GraphConfig, RoleChaining, TierMatching, DEFAULT_MAX_DEPTH};
pub use input::{AdminTier, EmployeeInput, EmployeeRef, OrgInput, RoleInput};
pub use model::{Edge, EdgeKind, GraphNode, NodeDetail, NodeKind, Relation};
pub use path::PathFinder;
