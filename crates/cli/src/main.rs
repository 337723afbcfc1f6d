use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use organigram_core::{
    EdgeKind, GraphBuilder, GraphConfig, NodeKind, OrgInput, RoleChaining, TierMatching,
    DEFAULT_MAX_DEPTH,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Organigram - Organizational hierarchy graphs from roles, staff and admin tiers
#[derive(Parser)]
#[command(name = "organigram")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Build and query organizational hierarchy graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Maximum number of edges in an enumerated path
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// How administrators are sorted into tiers
    #[arg(long, global = true, value_enum, default_value_t = TierMatchingArg::ExactFirst)]
    tier_matching: TierMatchingArg,

    /// How same-level roles are chained
    #[arg(long, global = true, value_enum, default_value_t = RoleChainingArg::Adjacent)]
    role_chaining: RoleChainingArg,

    /// Reject incomplete or duplicate input records
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print the full graph as JSON
    Build {
        /// Input document with roles, employees and adminRightsHierarchy
        input: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print node and edge counts per kind
    Summary {
        /// Input document with roles, employees and adminRightsHierarchy
        input: PathBuf,
    },
    /// Print the shortest path between two node ids
    Path {
        /// Input document with roles, employees and adminRightsHierarchy
        input: PathBuf,
        /// Node id to start from (e.g. employee:e1)
        from: String,
        /// Node id to reach (e.g. role:nurse)
        to: String,
        /// Print every simple path instead of the shortest one
        #[arg(long)]
        all: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TierMatchingArg {
    Heuristic,
    ExactFirst,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleChainingArg {
    Adjacent,
    SkipAhead,
}

impl Cli {
    fn config(&self) -> GraphConfig {
        GraphConfig {
            max_depth: self.max_depth,
            tier_matching: match self.tier_matching {
                TierMatchingArg::Heuristic => TierMatching::Heuristic,
                TierMatchingArg::ExactFirst => TierMatching::ExactFirst,
            },
            role_chaining: match self.role_chaining {
                RoleChainingArg::Adjacent => RoleChaining::Adjacent,
                RoleChainingArg::SkipAhead => RoleChaining::SkipAhead,
            },
            strict: self.strict,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_input(path: &Path) -> anyhow::Result<OrgInput> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    let builder = GraphBuilder::new(config.clone());

    match &cli.command {
        Command::Build { input, pretty } => {
            let graph = builder.build_input(&load_input(input)?)?;
            let json = if *pretty {
                serde_json::to_string_pretty(&graph)?
            } else {
                serde_json::to_string(&graph)?
            };
            println!("{}", json);
        }
        Command::Summary { input } => {
            let graph = builder.build_input(&load_input(input)?)?;
            println!("nodes: {}", graph.node_count());
            for kind in [NodeKind::Role, NodeKind::AdminLevel, NodeKind::Employee] {
                println!("  {:?}: {}", kind, graph.nodes_by_kind(kind).count());
            }
            println!("edges: {}", graph.edge_count());
            for kind in [
                EdgeKind::DependsOn,
                EdgeKind::Inherits,
                EdgeKind::AssignedTo,
                EdgeKind::HasRight,
            ] {
                println!("  {:?}: {}", kind, graph.edges_by_kind(kind).count());
            }
            if !graph.unclassified.is_empty() {
                println!("unclassified administrators: {}", graph.unclassified.join(", "));
            }
        }
        Command::Path { input, from, to, all } => {
            let graph = builder.build_input(&load_input(input)?)?;
            let finder = graph.path_finder(config.max_depth);
            let paths = if *all {
                finder.all_paths(from, to)
            } else {
                finder.shortest_path(from, to).into_iter().collect()
            };

            info!(from = %from, to = %to, found = paths.len(), "path query");
            if paths.is_empty() {
                println!("no path from {} to {} within {} edges", from, to, config.max_depth);
            }
            for path in &paths {
                println!("{}", render_path(path, finder.edge_kinds_along(path)));
            }
        }
    }

    Ok(())
}

/// `a -[kind]-> b -[kind]-> c`, or plain arrows when the kinds are unknown
fn render_path(path: &[String], kinds: Option<Vec<EdgeKind>>) -> String {
    let mut out = String::new();
    for (i, id) in path.iter().enumerate() {
        if i > 0 {
            match kinds.as_ref().and_then(|k| k.get(i - 1)) {
                Some(kind) => out.push_str(&format!(" -[{:?}]-> ", kind)),
                None => out.push_str(" -> "),
            }
        }
        out.push_str(id);
    }
    out
}
