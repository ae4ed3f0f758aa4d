/*!
# Dijkstra Engine

Single-source shortest paths over non-negative edge costs, producing
per-vertex potentials and a predecessor tree rooted at the origin. The
engine pairs with the monotone [`RadixHeap`](crate::core::heap::RadixHeap):
labels handed to the queue never go below the last settled potential, which
is exactly the radix contract.

Working arrays are sized once at construction and reset in place by
[`Dijkstra::recover`], so one engine can serve many runs over the same
graph.

# Examples

```rust
use hyperstar::core::dijkstra::Dijkstra;
use hyperstar::core::types::Graph;

let mut g = Graph::with_capacity(3, 2);
g.add_edge("e1", "v1", "v2");
g.add_edge("e2", "v2", "v3");

let mut engine = Dijkstra::new(&g);
engine.set_weights(&[1.5, 0.7]).unwrap();
engine.run("v1").unwrap();

assert_eq!(engine.potentials(), &[0.0, 1.5, 2.2]);
assert_eq!(engine.path("v1", "v3").unwrap(), vec!["v1", "v2", "v3"]);
```
*/

use tracing::debug;

use crate::core::error::{HyperstarError, Result};
use crate::core::heap::{Heap, RadixHeap};
use crate::core::types::{Graph, VertexId};
use crate::core::validation;

/// Single-source shortest-path engine over a borrowed graph.
///
/// The engine holds a non-owning reference to its graph; the graph must not
/// be mutated while the engine is alive. One engine is single-threaded;
/// run several engines over the same graph for concurrent queries.
#[derive(Debug)]
pub struct Dijkstra<'g> {
    graph: &'g Graph,
    weights: Vec<f64>,
    max_weight: f64,
    potentials: Vec<f64>,
    predecessors: Vec<Option<usize>>,
    open: Vec<bool>,
    close: Vec<bool>,
    weights_set: bool,
    ran: bool,
}

impl<'g> Dijkstra<'g> {
    /// Creates an engine bound to `graph`, sizing all working arrays to the
    /// graph's current vertex and edge counts.
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.vertex_count();
        let m = graph.edge_count();
        Self {
            graph,
            weights: vec![0.0; m],
            max_weight: 0.0,
            potentials: vec![f64::INFINITY; n],
            predecessors: vec![None; n],
            open: vec![false; n],
            close: vec![false; n],
            weights_set: false,
            ran: false,
        }
    }

    /// Sets the edge weights, indexed by insertion-order edge index.
    ///
    /// # Errors
    ///
    /// Returns `HyperstarError::InvalidWeights` when the length differs from
    /// the graph's edge count or any weight is negative or non-finite.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        validation::check_edge_weights(self.graph, weights)?;
        self.weights.copy_from_slice(weights);
        self.max_weight = weights.iter().fold(0.0, |acc: f64, &w| acc.max(w));
        self.weights_set = true;
        Ok(())
    }

    /// Runs label-setting from the given origin, filling potentials and the
    /// predecessor tree.
    ///
    /// # Errors
    ///
    /// - `HyperstarError::WeightsNotSet` when no weights were provided.
    /// - `HyperstarError::NotRecovered` when the engine already ran and
    ///   `recover()` has not been called since.
    /// - `HyperstarError::VertexNotFound` for an unknown origin id.
    pub fn run(&mut self, origin_id: &str) -> Result<()> {
        if !self.weights_set {
            return Err(HyperstarError::weights_not_set(
                "Dijkstra::run called before set_weights",
            ));
        }
        if self.ran {
            return Err(HyperstarError::not_recovered(
                "Dijkstra::run called twice without recover",
            ));
        }
        let graph = self.graph;
        let origin = graph.vertex(origin_id)?;

        // The frontier spread never exceeds the largest edge weight, which
        // bounds the radix key range.
        let key_bound = self.max_weight.ceil().max(1.0) as u64;
        let mut heap = RadixHeap::with_max_key(graph.vertex_count(), key_bound);
        self.potentials[origin.index()] = 0.0;
        heap.insert(origin.index(), 0.0);
        self.open[origin.index()] = true;

        let mut settled = 0usize;
        while let Some(v) = heap.delete_min() {
            self.close[v] = true;
            self.open[v] = false;
            settled += 1;

            let vertex = graph
                .vertex_by_index(v)
                .expect("heap items are valid vertex indices");
            for edge in graph.out_edges(vertex) {
                let y = graph.target(edge).index();
                if self.close[y] {
                    continue;
                }
                let candidate = self.potentials[v] + self.weights[edge.index()];
                if candidate < self.potentials[y] {
                    self.potentials[y] = candidate;
                    self.predecessors[y] = Some(v);
                    if self.open[y] {
                        heap.decrease_key(y, candidate);
                    } else {
                        heap.insert(y, candidate);
                        self.open[y] = true;
                    }
                }
            }
        }

        self.ran = true;
        debug!(origin = origin_id, settled, "dijkstra run finished");
        Ok(())
    }

    /// Returns the potentials computed by the last run, indexed by vertex
    /// index. Unreached vertices hold `f64::INFINITY`.
    pub fn potentials(&self) -> &[f64] {
        &self.potentials
    }

    /// Returns the predecessor of a vertex in the shortest-path tree of the
    /// last run, if it has one.
    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.predecessors[v.index()]
            .and_then(|idx| self.graph.vertex_by_index(idx))
    }

    /// Reconstructs the shortest path as a list of vertex ids, origin
    /// first.
    ///
    /// # Errors
    ///
    /// - `HyperstarError::VertexNotFound` for unknown endpoint ids.
    /// - `HyperstarError::NotReachable` when the predecessor chain from the
    ///   destination does not terminate at the requested origin.
    pub fn path(&self, origin_id: &str, destination_id: &str) -> Result<Vec<String>> {
        let graph = self.graph;
        let origin = graph.vertex(origin_id)?;
        let destination = graph.vertex(destination_id)?;

        let mut chain = vec![destination.index()];
        let mut current = destination.index();
        while let Some(prev) = self.predecessors[current] {
            chain.push(prev);
            current = prev;
        }
        chain.reverse();

        if chain[0] != origin.index() {
            return Err(HyperstarError::not_reachable(format!(
                "destination '{}' is not reachable from origin '{}'",
                destination_id, origin_id
            )));
        }

        Ok(chain
            .into_iter()
            .map(|idx| {
                let v = graph
                    .vertex_by_index(idx)
                    .expect("predecessor indices reference existing vertices");
                graph.vertex_id(v).to_string()
            })
            .collect())
    }

    /// Re-initializes potentials, predecessors and visit flags in place so
    /// the engine can run again. Weights are retained.
    pub fn recover(&mut self) {
        self.potentials.fill(f64::INFINITY);
        self.predecessors.fill(None);
        self.open.fill(false);
        self.close.fill(false);
        self.ran = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> Graph {
        let mut g = Graph::with_capacity(3, 2);
        g.add_edge("e1", "v1", "v2");
        g.add_edge("e2", "v2", "v3");
        g
    }

    #[test]
    fn test_two_edge_chain() {
        let g = chain_graph();
        let mut engine = Dijkstra::new(&g);
        engine.set_weights(&[1.5, 0.7]).unwrap();
        engine.run("v1").unwrap();
        assert_eq!(engine.potentials(), &[0.0, 1.5, 2.2]);
        assert_eq!(engine.path("v1", "v3").unwrap(), vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn test_run_requires_weights() {
        let g = chain_graph();
        let mut engine = Dijkstra::new(&g);
        let err = engine.run("v1").unwrap_err();
        assert!(matches!(err, HyperstarError::WeightsNotSet(_)));
    }

    #[test]
    fn test_rerun_requires_recover() {
        let g = chain_graph();
        let mut engine = Dijkstra::new(&g);
        engine.set_weights(&[1.0, 1.0]).unwrap();
        engine.run("v1").unwrap();
        let err = engine.run("v1").unwrap_err();
        assert!(matches!(err, HyperstarError::NotRecovered(_)));

        engine.recover();
        engine.run("v1").unwrap();
    }

    #[test]
    fn test_negative_weight_rejected() {
        let g = chain_graph();
        let mut engine = Dijkstra::new(&g);
        let err = engine.set_weights(&[1.0, -0.5]).unwrap_err();
        assert!(matches!(err, HyperstarError::InvalidWeights(_)));
    }

    #[test]
    fn test_unreachable_destination() {
        let mut g = Graph::new();
        g.add_edge("e1", "v1", "v2");
        g.add_edge("e2", "v4", "v3");
        let mut engine = Dijkstra::new(&g);
        engine.set_weights(&[1.0, 1.0]).unwrap();
        engine.run("v1").unwrap();
        let err = engine.path("v1", "v3").unwrap_err();
        assert!(matches!(err, HyperstarError::NotReachable(_)));
    }
}
