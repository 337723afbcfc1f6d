//! Structural properties of built graphs over generated inputs

use std::collections::HashSet;

use organigram_core::{
    AdminTier, EmployeeInput, EmployeeRef, GraphBuilder, GraphConfig, RoleChaining, RoleInput,
    TierMatching,
};
use proptest::prelude::*;

const RIGHTS: &[&str] = &["a", "b", "c", "d", "e"];

fn rights_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(RIGHTS, 0..=RIGHTS.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

fn roles_strategy() -> impl Strategy<Value = Vec<RoleInput>> {
    prop::collection::vec(
        (
            0..6usize,
            prop::option::of(0..5i64),
            prop::collection::vec(0..8usize, 0..4),
        ),
        0..8,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(key, level, assigned)| RoleInput {
                worker_type: format!("r{}", key),
                level,
                assigned_employees: assigned
                    .into_iter()
                    .map(|uid| EmployeeRef::Id(format!("u{}", uid)))
                    .collect(),
                ..Default::default()
            })
            .collect()
    })
}

fn employees_strategy() -> impl Strategy<Value = Vec<EmployeeInput>> {
    prop::collection::vec(
        (prop::option::of(0..8usize), any::<bool>(), rights_strategy()),
        0..10,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(uid, is_admin, rights)| EmployeeInput {
                uid: uid.map(|u| format!("u{}", u)),
                is_admin,
                rights,
                ..Default::default()
            })
            .collect()
    })
}

fn tiers_strategy() -> impl Strategy<Value = Vec<AdminTier>> {
    prop::collection::vec((0..4usize, 0..4u32, rights_strategy()), 0..5).prop_map(|raw| {
        raw.into_iter()
            .map(|(key, level, rights)| AdminTier {
                level,
                name: format!("t{}", key),
                rights,
                ..Default::default()
            })
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = GraphConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(heuristic, skip_ahead)| GraphConfig {
        tier_matching: if heuristic {
            TierMatching::Heuristic
        } else {
            TierMatching::ExactFirst
        },
        role_chaining: if skip_ahead {
            RoleChaining::SkipAhead
        } else {
            RoleChaining::Adjacent
        },
        ..Default::default()
    })
}

proptest! {
    #[test]
    fn edges_reference_existing_nodes(
        roles in roles_strategy(),
        employees in employees_strategy(),
        tiers in tiers_strategy(),
        config in config_strategy(),
    ) {
        let graph = GraphBuilder::new(config).build(&roles, &employees, &tiers);
        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

        for edge in &graph.edges {
            prop_assert!(ids.contains(edge.source.as_str()));
            prop_assert!(ids.contains(edge.target.as_str()));
        }
    }

    #[test]
    fn node_ids_are_unique(
        roles in roles_strategy(),
        employees in employees_strategy(),
        tiers in tiers_strategy(),
    ) {
        let graph = GraphBuilder::default().build(&roles, &employees, &tiers);
        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

        prop_assert_eq!(ids.len(), graph.nodes.len());
    }

    #[test]
    fn typed_lists_are_sorted(
        roles in roles_strategy(),
        tiers in tiers_strategy(),
    ) {
        let graph = GraphBuilder::default().build(&roles, &[], &tiers);

        let role_levels: Vec<i64> = graph
            .role_nodes
            .iter()
            .filter_map(|n| n.as_role().map(|m| m.hierarchy_level))
            .collect();
        prop_assert!(role_levels.windows(2).all(|w| w[0] <= w[1]));

        let admin_levels: Vec<u32> = graph
            .admin_nodes
            .iter()
            .filter_map(|n| n.as_admin_level().map(|m| m.level))
            .collect();
        prop_assert!(admin_levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn builds_are_idempotent(
        roles in roles_strategy(),
        employees in employees_strategy(),
        tiers in tiers_strategy(),
        config in config_strategy(),
    ) {
        let builder = GraphBuilder::new(config);
        prop_assert_eq!(
            builder.build(&roles, &employees, &tiers),
            builder.build(&roles, &employees, &tiers)
        );
    }

    #[test]
    fn exact_first_places_each_admin_once(
        employees in employees_strategy(),
        tiers in tiers_strategy(),
    ) {
        let graph = GraphBuilder::default().build(&[], &employees, &tiers);

        let admins: Vec<String> = graph
            .employee_nodes
            .iter()
            .filter_map(|n| n.as_employee())
            .filter(|m| m.is_administrator)
            .map(|m| m.uid.clone())
            .collect();

        for uid in &admins {
            let placements = graph
                .admin_nodes
                .iter()
                .filter_map(|n| n.as_admin_level())
                .filter(|m| m.matched_employees.contains(uid))
                .count()
                + usize::from(graph.unclassified.contains(uid));
            prop_assert_eq!(placements, 1);
        }
    }

    #[test]
    fn enumerated_paths_are_simple(
        roles in roles_strategy(),
        employees in employees_strategy(),
        tiers in tiers_strategy(),
    ) {
        let graph = GraphBuilder::new(GraphConfig {
            role_chaining: RoleChaining::SkipAhead,
            ..Default::default()
        })
        .build(&roles, &employees, &tiers);
        let finder = graph.path_finder(6);

        if let (Some(first), Some(last)) = (graph.nodes.first(), graph.nodes.last()) {
            for path in finder.all_paths(&first.id, &last.id) {
                let unique: HashSet<&String> = path.iter().collect();
                prop_assert_eq!(unique.len(), path.len());
                prop_assert!(path.len() <= 7);
            }
        }
    }
}
