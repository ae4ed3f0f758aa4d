/*!
# Graph Builders

This module provides a fluent builder for assembling a [`Graph`]
incrementally, plus a capacity probe for flat `(edge id, from id, to id)`
triple lists, the row format produced by typical network exports. For
one-shot construction from a triple list, see [`Graph::from_edges`].
*/

use std::collections::HashSet;

use crate::core::types::Graph;

/// Computes the `(vertex, edge)` counts an edge list will produce, usable
/// as capacity hints for [`Graph::with_capacity`].
pub fn describe_edges(edges: &[(&str, &str, &str)]) -> (usize, usize) {
    let mut vertices = HashSet::new();
    for (_, from, to) in edges {
        vertices.insert(*from);
        vertices.insert(*to);
    }
    (vertices.len(), edges.len())
}

/// Fluent builder for constructing graphs.
///
/// Vertices mentioned only as edge endpoints are created at build time, so
/// explicit `add_vertex` calls are needed only for isolated vertices or to
/// pin their insertion order.
///
/// # Example
///
/// ```rust
/// use hyperstar::core::builders::GraphBuilder;
///
/// let graph = GraphBuilder::new()
///     .with_capacity(3, 2)
///     .add_vertex("v1")
///     .add_edge("e1", "v1", "v2")
///     .add_edge("e2", "v2", "v3")
///     .build();
///
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    capacity_vertices: usize,
    capacity_edges: usize,
    vertices: Vec<String>,
    edges: Vec<(String, String, String)>,
}

impl GraphBuilder {
    /// Creates a new `GraphBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pre-allocated capacity for vertices and edges.
    pub fn with_capacity(mut self, vertices: usize, edges: usize) -> Self {
        self.capacity_vertices = vertices;
        self.capacity_edges = edges;
        self
    }

    /// Adds a vertex to the builder.
    pub fn add_vertex(mut self, id: &str) -> Self {
        self.vertices.push(id.to_string());
        self
    }

    /// Adds a directed edge to the builder.
    pub fn add_edge(mut self, id: &str, from_id: &str, to_id: &str) -> Self {
        self.edges
            .push((id.to_string(), from_id.to_string(), to_id.to_string()));
        self
    }

    /// Adds multiple edges from a triple list.
    pub fn add_edges(mut self, edges: &[(&str, &str, &str)]) -> Self {
        for (id, from, to) in edges {
            self.edges
                .push((id.to_string(), from.to_string(), to.to_string()));
        }
        self
    }

    /// Consumes the builder and constructs the graph.
    ///
    /// Duplicate ids follow the usual no-op rule: only the first occurrence
    /// of a vertex or edge id is inserted.
    pub fn build(self) -> Graph {
        let mut graph = Graph::with_capacity(
            self.capacity_vertices.max(self.vertices.len()),
            self.capacity_edges.max(self.edges.len()),
        );
        for id in &self.vertices {
            graph.add_vertex(id);
        }
        for (id, from, to) in &self.edges {
            graph.add_edge(id, from, to);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_edges() {
        let edges = [("e1", "v1", "v2"), ("e2", "v2", "v3"), ("e3", "v3", "v1")];
        assert_eq!(describe_edges(&edges), (3, 3));
    }

    #[test]
    fn test_builder_pins_vertex_order() {
        let graph = GraphBuilder::new()
            .add_vertex("b")
            .add_vertex("a")
            .add_edge("e1", "a", "b")
            .build();
        assert_eq!(graph.vertex("b").unwrap().index(), 0);
        assert_eq!(graph.vertex("a").unwrap().index(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_builder_add_edges_batch() {
        let graph = GraphBuilder::new()
            .add_edges(&[("e1", "v1", "v2"), ("e2", "v2", "v3")])
            .add_edge("e3", "v3", "v1")
            .build();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_builder_ignores_duplicate_ids() {
        let graph = GraphBuilder::new()
            .add_vertex("v1")
            .add_vertex("v1")
            .add_edge("e1", "v1", "v2")
            .add_edge("e1", "v2", "v1")
            .build();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let e = graph.edge("e1").unwrap();
        assert_eq!(graph.vertex_id(graph.source(e)), "v1");
    }
}
