/*!
# Hyperstar Graph Types

This module defines the directed multigraph used by the routing engines. The
`Graph` struct is a wrapper around petgraph's `StableGraph` that adds stable,
insertion-ordered integer indices and string identifiers for vertices and
edges, so that callers can address the graph by external ids while the
algorithms work on dense index arrays.

Vertex and edge storage is owned exclusively by the `Graph`; engines hold a
shared reference and address vertices and edges through the `VertexId` and
`EdgeId` handles.

# Examples

```rust
use hyperstar::core::types::Graph;

let mut g = Graph::with_capacity(3, 2);
g.add_edge("e1", "v1", "v2");
g.add_edge("e2", "v2", "v3");

assert_eq!(g.vertex_count(), 3);
assert_eq!(g.edge_count(), 2);

let v2 = g.vertex("v2").unwrap();
assert_eq!(v2.index(), 1);
assert_eq!(g.in_edges(v2).count(), 1);
assert_eq!(g.out_edges(v2).count(), 1);
```
*/

use petgraph::Directed;
use petgraph::Direction;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph as PetGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use crate::core::error::{HyperstarError, Result};

/// Handle to a vertex, wrapping petgraph's `NodeIndex`.
///
/// Indices are dense in `[0, n)` and assigned in insertion order; they stay
/// stable for the lifetime of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) NodeIndex);

impl VertexId {
    /// Returns the dense insertion-order index of the vertex.
    pub fn index(&self) -> usize {
        self.0.index()
    }

    pub(crate) fn new(index: NodeIndex) -> Self {
        Self(index)
    }
}

/// Handle to an edge, wrapping petgraph's `EdgeIndex`.
///
/// Indices are dense in `[0, m)` and assigned in insertion order; they stay
/// stable for the lifetime of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) EdgeIndex);

impl EdgeId {
    /// Returns the dense insertion-order index of the edge.
    pub fn index(&self) -> usize {
        self.0.index()
    }

    pub(crate) fn new(index: EdgeIndex) -> Self {
        Self(index)
    }
}

/// Directed multigraph with string-identified, densely indexed vertices and
/// edges.
///
/// The graph is append-only: vertices and edges can be added but never
/// removed, which keeps the petgraph indices dense and insertion-ordered.
/// Parallel edges between the same endpoints are permitted as long as their
/// ids differ.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: PetGraph<String, String, Directed>,
    vertex_index: HashMap<String, VertexId>,
    edge_index: HashMap<String, EdgeId>,
}

impl Graph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            inner: PetGraph::with_capacity(0, 0),
            vertex_index: HashMap::new(),
            edge_index: HashMap::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity for `n` vertices and
    /// `m` edges.
    ///
    /// The capacities are hints for the dense storage; exceeding them is
    /// allowed but reallocates.
    pub fn with_capacity(n: usize, m: usize) -> Self {
        Self {
            inner: PetGraph::with_capacity(n, m),
            vertex_index: HashMap::with_capacity(n),
            edge_index: HashMap::with_capacity(m),
        }
    }

    /// Builds a graph from `(edge id, from id, to id)` triples, creating
    /// vertices on first mention.
    ///
    /// Duplicate edge ids follow the usual no-op rule: only the first
    /// occurrence is inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hyperstar::core::types::Graph;
    ///
    /// let g = Graph::from_edges(&[("e1", "v1", "v2"), ("e2", "v2", "v3")]);
    /// assert_eq!(g.vertex_count(), 3);
    /// assert_eq!(g.edge_count(), 2);
    /// ```
    pub fn from_edges(edges: &[(&str, &str, &str)]) -> Self {
        let (n, m) = crate::core::builders::describe_edges(edges);
        let mut graph = Graph::with_capacity(n, m);
        for (id, from, to) in edges {
            graph.add_edge(id, from, to);
        }
        graph
    }

    /// Returns the number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns true if the graph contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Adds a vertex with the given id and returns its handle.
    ///
    /// Adding an id that already exists is a no-op returning the existing
    /// handle.
    pub fn add_vertex(&mut self, id: &str) -> VertexId {
        if let Some(&v) = self.vertex_index.get(id) {
            return v;
        }
        let v = VertexId::new(self.inner.add_node(id.to_string()));
        self.vertex_index.insert(id.to_string(), v);
        v
    }

    /// Adds a directed edge between two vertex ids, creating the endpoint
    /// vertices when they do not exist yet.
    ///
    /// Adding an edge id that already exists is a no-op returning the
    /// existing handle.
    pub fn add_edge(&mut self, id: &str, from_id: &str, to_id: &str) -> EdgeId {
        if let Some(&e) = self.edge_index.get(id) {
            return e;
        }
        let from = self.add_vertex(from_id);
        let to = self.add_vertex(to_id);
        let e = EdgeId::new(self.inner.add_edge(from.0, to.0, id.to_string()));
        self.edge_index.insert(id.to_string(), e);
        e
    }

    /// Adds a directed edge between two existing vertex handles.
    ///
    /// Adding an edge id that already exists is a no-op returning the
    /// existing handle.
    pub fn add_edge_between(&mut self, id: &str, from: VertexId, to: VertexId) -> EdgeId {
        if let Some(&e) = self.edge_index.get(id) {
            return e;
        }
        let e = EdgeId::new(self.inner.add_edge(from.0, to.0, id.to_string()));
        self.edge_index.insert(id.to_string(), e);
        e
    }

    /// Looks up a vertex handle by id.
    ///
    /// # Errors
    ///
    /// Returns `HyperstarError::VertexNotFound` when no vertex carries the
    /// given id.
    pub fn vertex(&self, id: &str) -> Result<VertexId> {
        self.vertex_index
            .get(id)
            .copied()
            .ok_or_else(|| HyperstarError::vertex_not_found(id))
    }

    /// Looks up a vertex handle by dense index.
    pub fn vertex_by_index(&self, idx: usize) -> Option<VertexId> {
        let v = NodeIndex::new(idx);
        self.inner.node_weight(v).map(|_| VertexId::new(v))
    }

    /// Returns the string id of a vertex.
    pub fn vertex_id(&self, v: VertexId) -> &str {
        &self.inner[v.0]
    }

    /// Looks up an edge handle by id.
    ///
    /// # Errors
    ///
    /// Returns `HyperstarError::EdgeNotFound` when no edge carries the given
    /// id.
    pub fn edge(&self, id: &str) -> Result<EdgeId> {
        self.edge_index
            .get(id)
            .copied()
            .ok_or_else(|| HyperstarError::edge_not_found(id))
    }

    /// Looks up an edge handle by dense index.
    pub fn edge_by_index(&self, idx: usize) -> Option<EdgeId> {
        let e = EdgeIndex::new(idx);
        self.inner.edge_weight(e).map(|_| EdgeId::new(e))
    }

    /// Finds and returns the first edge from `from` to `to`, if any.
    ///
    /// With parallel edges present, which of them is returned is
    /// unspecified.
    pub fn edge_between(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.inner
            .edges_directed(from.0, Direction::Outgoing)
            .find(|edge| edge.target() == to.0)
            .map(|edge| EdgeId::new(edge.id()))
    }

    /// Returns the string id of an edge.
    pub fn edge_id(&self, e: EdgeId) -> &str {
        &self.inner[e.0]
    }

    /// Returns the `(from, to)` vertex handles of an edge.
    pub fn endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        let (a, b) = self
            .inner
            .edge_endpoints(e.0)
            .expect("edge handles of an append-only graph stay valid");
        (VertexId::new(a), VertexId::new(b))
    }

    /// Returns the tail (from) vertex of an edge.
    pub fn source(&self, e: EdgeId) -> VertexId {
        self.endpoints(e).0
    }

    /// Returns the head (to) vertex of an edge.
    pub fn target(&self, e: EdgeId) -> VertexId {
        self.endpoints(e).1
    }

    /// Returns an iterator over the outgoing edges of a vertex.
    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.inner
            .edges_directed(v.0, Direction::Outgoing)
            .map(|edge| EdgeId::new(edge.id()))
    }

    /// Returns an iterator over the incoming edges of a vertex.
    pub fn in_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.inner
            .edges_directed(v.0, Direction::Incoming)
            .map(|edge| EdgeId::new(edge.id()))
    }

    /// Returns an iterator over all vertices as `(handle, id)` pairs, in
    /// index order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &str)> + '_ {
        self.inner
            .node_indices()
            .map(|idx| (VertexId::new(idx), self.inner[idx].as_str()))
    }

    /// Returns an iterator over all edges as `(handle, from, to)` triples,
    /// in index order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, VertexId, VertexId)> + '_ {
        self.inner.edge_indices().map(|idx| {
            let (a, b) = self
                .inner
                .edge_endpoints(idx)
                .expect("edge handles of an append-only graph stay valid");
            (EdgeId::new(idx), VertexId::new(a), VertexId::new(b))
        })
    }

    /// Returns an independent graph with the same edge ids and swapped
    /// endpoints.
    ///
    /// Vertex and edge insertion order are both preserved, so the dense
    /// indices of the reversed graph line up with the original. This keeps
    /// potentials computed on the reversed graph index-aligned with the
    /// forward graph.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hyperstar::core::types::Graph;
    ///
    /// let mut g = Graph::with_capacity(2, 1);
    /// g.add_edge("e1", "v1", "v2");
    ///
    /// let r = g.reverse();
    /// let e = r.edge("e1").unwrap();
    /// assert_eq!(r.vertex_id(r.source(e)), "v2");
    /// assert_eq!(r.vertex_id(r.target(e)), "v1");
    /// ```
    pub fn reverse(&self) -> Graph {
        let mut reversed = Graph::with_capacity(self.vertex_count(), self.edge_count());
        for (_, id) in self.vertices() {
            reversed.add_vertex(id);
        }
        for (e, from, to) in self.edges() {
            reversed.add_edge(self.edge_id(e), self.vertex_id(to), self.vertex_id(from));
        }
        reversed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut g = Graph::new();
        let a = g.add_vertex("v1");
        let b = g.add_vertex("v1");
        assert_eq!(a, b);
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_index_stability() {
        let mut g = Graph::with_capacity(4, 3);
        g.add_edge("e1", "v1", "v2");
        g.add_edge("e2", "v2", "v3");
        g.add_edge("e3", "v1", "v3");

        for (i, id) in ["v1", "v2", "v3"].iter().enumerate() {
            assert_eq!(g.vertex(id).unwrap().index(), i);
        }
        for (i, id) in ["e1", "e2", "e3"].iter().enumerate() {
            assert_eq!(g.edge(id).unwrap().index(), i);
        }
    }

    #[test]
    fn test_parallel_edges() {
        let mut g = Graph::new();
        let a = g.add_edge("e1", "v1", "v2");
        let b = g.add_edge("e2", "v1", "v2");
        assert_ne!(a, b);
        assert_eq!(g.edge_count(), 2);

        let v1 = g.vertex("v1").unwrap();
        assert_eq!(g.out_edges(v1).count(), 2);
    }

    #[test]
    fn test_missing_lookup_errors() {
        let g = Graph::new();
        assert!(g.vertex("nope").is_err());
        assert!(g.edge("nope").is_err());
        assert!(g.vertex_by_index(0).is_none());
    }

    #[test]
    fn test_from_edges_ignores_duplicate_edge_ids() {
        let g = Graph::from_edges(&[("e1", "v1", "v2"), ("e1", "v2", "v3")]);
        assert_eq!(g.edge_count(), 1);
        let e = g.edge("e1").unwrap();
        assert_eq!(g.vertex_id(g.source(e)), "v1");
    }
}
