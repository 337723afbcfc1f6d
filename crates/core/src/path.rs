//! Path queries over a built graph
//!
//! [`PathFinder`] indexes the edge list into a `petgraph::StableGraph` keyed
//! by node id. Enumeration is a bounded depth-first search that tracks the
//! nodes on the current path, so cycles in the edge set cannot trap it: a
//! node is marked before descending and unmarked on the way back up.
//!
//! Enumerating every simple path is exponential in the worst case. That is
//! fine for organigram-sized graphs; for anything much larger use
//! [`PathFinder::shortest_path_bfs`].

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::{debug, instrument};

use crate::builder::OrgGraph;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::model::{Edge, EdgeKind};

/// Path queries over one graph's edges
#[derive(Debug, Clone)]
pub struct PathFinder {
    inner: StableGraph<String, EdgeKind>,
    /// Node id to index, so lookups avoid a scan
    index: HashMap<String, NodeIndex>,
    max_depth: usize,
}

impl PathFinder {
    fn empty(max_depth: usize) -> Self {
        Self {
            inner: StableGraph::new(),
            index: HashMap::new(),
            max_depth,
        }
    }

    /// Index every node and edge of a built graph
    pub fn from_graph(graph: &OrgGraph, max_depth: usize) -> Self {
        let mut finder = Self::empty(max_depth);
        for node in &graph.nodes {
            finder.ensure_node(&node.id);
        }
        finder.add_edges(&graph.edges);
        finder
    }

    /// Index a bare edge list; the known nodes are the edge endpoints
    pub fn from_edges(edges: &[Edge], max_depth: usize) -> Self {
        let mut finder = Self::empty(max_depth);
        finder.add_edges(edges);
        finder
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.inner.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    fn add_edges(&mut self, edges: &[Edge]) {
        for edge in edges {
            let source = self.ensure_node(&edge.source);
            let target = self.ensure_node(&edge.target);
            self.inner.add_edge(source, target, edge.kind());
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Successors of `idx` in edge insertion order
    fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<_> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        out.sort_by_key(|(edge, _)| *edge);
        out.into_iter().map(|(_, target)| target).collect()
    }

    fn ids(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter().map(|&idx| self.inner[idx].clone()).collect()
    }

    /// Every simple path from `source` to `target` with at most `max_depth` edges
    ///
    /// Paths include both endpoints and come out in depth-first order,
    /// following outgoing edges in the order they were added. Unknown ids
    /// yield no paths.
    #[instrument(skip(self))]
    pub fn find_paths(&self, source: &str, target: &str, max_depth: usize) -> Vec<Vec<String>> {
        let (Some(&start), Some(&goal)) = (self.index.get(source), self.index.get(target)) else {
            return Vec::new();
        };

        let mut search = Search {
            finder: self,
            goal,
            max_depth,
            path: Vec::new(),
            on_path: HashSet::new(),
            found: Vec::new(),
        };
        search.visit(start, 0);

        debug!(paths = search.found.len(), "path enumeration finished");
        search.found
    }

    /// [`PathFinder::find_paths`] with this finder's depth bound
    pub fn all_paths(&self, source: &str, target: &str) -> Vec<Vec<String>> {
        self.find_paths(source, target, self.max_depth)
    }

    /// The path with the fewest nodes among those [`PathFinder::all_paths`] finds
    ///
    /// Ties go to the path found first. `None` when no path exists within the
    /// depth bound or either id is unknown.
    pub fn shortest_path(&self, source: &str, target: &str) -> Option<Vec<String>> {
        self.all_paths(source, target)
            .into_iter()
            .reduce(|best, path| if path.len() < best.len() { path } else { best })
    }

    /// Breadth-first shortest path, with no depth bound
    #[instrument(skip(self))]
    pub fn shortest_path_bfs(&self, source: &str, target: &str) -> Option<Vec<String>> {
        let start = *self.index.get(source)?;
        let goal = *self.index.get(target)?;

        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut seen: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                let mut path = vec![current];
                let mut cursor = current;
                while let Some(&prev) = parent.get(&cursor) {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return Some(self.ids(&path));
            }
            for next in self.successors(current) {
                if seen.insert(next) {
                    parent.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Kinds of the edges walked by `path`, taking the first matching edge per hop
    ///
    /// `None` if some consecutive pair is not joined by an edge.
    pub fn edge_kinds_along(&self, path: &[String]) -> Option<Vec<EdgeKind>> {
        path.windows(2)
            .map(|hop| {
                let from = *self.index.get(&hop[0])?;
                let to = *self.index.get(&hop[1])?;
                self.inner
                    .edges_directed(from, Direction::Outgoing)
                    .filter(|e| e.target() == to)
                    .min_by_key(|e| e.id())
                    .map(|e| *e.weight())
            })
            .collect()
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::empty(DEFAULT_MAX_DEPTH)
    }
}

/// State of one depth-first enumeration
struct Search<'a> {
    finder: &'a PathFinder,
    goal: NodeIndex,
    max_depth: usize,
    path: Vec<NodeIndex>,
    on_path: HashSet<NodeIndex>,
    found: Vec<Vec<String>>,
}

impl Search<'_> {
    fn visit(&mut self, current: NodeIndex, depth: usize) {
        if depth > self.max_depth {
            return;
        }

        self.path.push(current);
        if current == self.goal {
            self.found.push(self.finder.ids(&self.path));
            self.path.pop();
            return;
        }

        self.on_path.insert(current);
        for next in self.finder.successors(current) {
            if !self.on_path.contains(&next) {
                self.visit(next, depth + 1);
            }
        }
        self.on_path.remove(&current);
        self.path.pop();
    }
}
