//! petgraph-based directed view over a normalized node/edge set.
//!
//! Unlike the parsers' output, this view must accept structurally odd
//! graphs: an edge endpoint that names no node gets a placeholder vertex
//! (`known == false`) instead of failing the build.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};

use crate::model::{Edge, ParsedNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub id: String,
    /// False for ids that only appear as edge endpoints.
    pub known: bool,
}

pub struct FlowGraph {
    pub graph: DiGraph<Vertex, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl FlowGraph {
    /// One vertex per distinct id, nodes first (document order), then
    /// dangling endpoints in edge order. Never fails.
    pub fn build(nodes: &[ParsedNode], edges: &[Edge]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in nodes {
            if !node_indices.contains_key(&node.id) {
                let idx = graph.add_node(Vertex {
                    id: node.id.clone(),
                    known: true,
                });
                node_indices.insert(node.id.clone(), idx);
            }
        }

        for edge in edges {
            let s = Self::ensure_vertex(&mut graph, &mut node_indices, &edge.from_node_id);
            let t = Self::ensure_vertex(&mut graph, &mut node_indices, &edge.to_node_id);
            graph.add_edge(s, t, ());
        }

        FlowGraph {
            graph,
            node_indices,
        }
    }

    fn ensure_vertex(
        graph: &mut DiGraph<Vertex, ()>,
        node_indices: &mut HashMap<String, NodeIndex>,
        id: &str,
    ) -> NodeIndex {
        if let Some(&idx) = node_indices.get(id) {
            return idx;
        }
        let idx = graph.add_node(Vertex {
            id: id.to_string(),
            known: false,
        });
        node_indices.insert(id.to_string(), idx);
        idx
    }

    /// Vertex ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].id.as_str())
    }

    pub fn is_known(&self, node_id: &str) -> bool {
        self.node_indices
            .get(node_id)
            .is_some_and(|&idx| self.graph[idx].known)
    }

    /// Ids referenced by edges that name no node.
    pub fn dangling_ids(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| !self.graph[idx].known)
            .map(|idx| self.graph[idx].id.as_str())
            .collect()
    }

    /// Targets of `node_id`, in edge insertion order. Parallel edges repeat.
    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        self.neighbors(node_id, Direction::Outgoing)
    }

    /// Sources pointing at `node_id`, in edge insertion order.
    pub fn predecessors(&self, node_id: &str) -> Vec<&str> {
        self.neighbors(node_id, Direction::Incoming)
    }

    fn neighbors(&self, node_id: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        // petgraph walks adjacency newest-first; restore insertion order.
        let mut edges: Vec<_> = self.graph.edges_directed(idx, direction).collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                self.graph[other].id.as_str()
            })
            .collect()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.predecessors(node_id).len()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.successors(node_id).len()
    }

    /// Vertices without incoming edges, in insertion order.
    pub fn roots(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx].id.as_str())
            .collect()
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Every vertex reachable from any of `starts` (inclusive).
    pub fn reachable_from<'a>(&self, starts: impl IntoIterator<Item = &'a str>) -> HashSet<&str> {
        let mut reachable = HashSet::new();
        for start in starts {
            let Some(&idx) = self.node_indices.get(start) else {
                continue;
            };
            let mut bfs = Bfs::new(&self.graph, idx);
            while let Some(nx) = bfs.next(&self.graph) {
                reachable.insert(self.graph[nx].id.as_str());
            }
        }
        reachable
    }
}
