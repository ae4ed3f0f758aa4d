/*!
# Hyperpath Engine

Optimal-hyperpath computation after Ma, Fukuda and Schmöcker (2013),
"Faster hyperpath generating algorithms for vehicle navigation",
Transportmetrica A: Transport Science 9, 925-948.

Each edge cost is uncertain within a known interval `[wmin, wmax]` and is
assumed uniformly distributed, observed just-in-time by the traveler. The
engine computes a routing policy between an origin and a destination: an
acyclic set of edges together with, at every branching vertex, the choice
probability over its outgoing edges that minimizes expected travel cost.

The algorithm runs two passes:

1. A **backward pass** that label-sets over *edges* (not vertices) with a
   Fibonacci-heap frontier keyed by the lower-bound edge label
   `u(to) + wmin + h(from)`, where `h` are admissible vertex potentials
   (typically Dijkstra potentials on `wmin` over the reversed graph, used
   like an A* heuristic). Each settled edge that can still lie on an
   optimal policy is absorbed into its tail vertex's expected-cost label by
   the combining rule, and collected into the potential-optimal edge set.
   The pass stops early once no remaining edge can improve the origin
   label.
2. A **forward pass** that sorts the collected edges by decreasing
   `u(to) + wmin` and propagates choice probabilities from the origin
   through the policy graph.

The Fibonacci heap is required here: an edge label may be decreased below
keys that were already deleted, so the monotone radix discipline does not
hold.
*/

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::debug;

use crate::core::error::{HyperstarError, Result};
use crate::core::heap::{FibonacciHeap, Heap};
use crate::core::types::{EdgeId, Graph};
use crate::core::validation;

/// Stand-in for `1 / (wmax - wmin)` on degenerate (zero-width) intervals,
/// i.e. a deterministic edge behaves like an arbitrarily dense interval.
pub const DEGENERATE_DENSITY: f64 = 9_999_999_999.0;

/// Optimal-hyperpath engine over a borrowed graph.
///
/// The engine holds a non-owning reference to its graph; the graph must not
/// be mutated while the engine is alive.
///
/// # Examples
///
/// ```rust
/// use hyperstar::core::hyperpath::Hyperpath;
/// use hyperstar::core::types::Graph;
///
/// let mut g = Graph::with_capacity(3, 2);
/// g.add_edge("e1", "v1", "v2");
/// g.add_edge("e2", "v2", "v3");
///
/// let mut engine = Hyperpath::new(&g);
/// engine.set_weights(&[1.2, 0.2], &[1.5, 0.4]).unwrap();
/// engine.run("v1", "v3").unwrap();
///
/// // A single chain carries all flow.
/// for (_, probability) in engine.hyperpath() {
///     assert_eq!(*probability, 1.0);
/// }
/// ```
#[derive(Debug)]
pub struct Hyperpath<'g> {
    graph: &'g Graph,
    /// Expected cost from each vertex to the destination under the policy.
    node_label: Vec<f64>,
    /// Accumulated interval densities of the absorbed out-edges per vertex.
    density_sum: Vec<f64>,
    /// Probability of reaching each vertex under the policy.
    node_flow: Vec<f64>,
    /// Lower-bound label per edge (the backward-pass heap key).
    edge_label: Vec<f64>,
    /// Choice probability assigned to each edge by the forward pass.
    edge_flow: Vec<f64>,
    open: Vec<bool>,
    close: Vec<bool>,
    wmin: Vec<f64>,
    wmax: Vec<f64>,
    potentials: Vec<f64>,
    weights_set: bool,
    ran: bool,
    hyperpath: Vec<(String, f64)>,
}

impl<'g> Hyperpath<'g> {
    /// Creates an engine bound to `graph`, sizing all working arrays to the
    /// graph's current vertex and edge counts. Vertex potentials default to
    /// zero, which is trivially admissible.
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.vertex_count();
        let m = graph.edge_count();
        Self {
            graph,
            node_label: vec![f64::INFINITY; n],
            density_sum: vec![0.0; n],
            node_flow: vec![0.0; n],
            edge_label: vec![f64::INFINITY; m],
            edge_flow: vec![0.0; m],
            open: vec![false; m],
            close: vec![false; m],
            wmin: vec![0.0; m],
            wmax: vec![0.0; m],
            potentials: vec![0.0; n],
            weights_set: false,
            ran: false,
            hyperpath: Vec::new(),
        }
    }

    /// Sets the cost interval bounds, both indexed by insertion-order edge
    /// index.
    ///
    /// # Errors
    ///
    /// Returns `HyperstarError::InvalidWeights` when the lengths differ from
    /// the graph's edge count, any bound is negative or non-finite, or
    /// `wmax < wmin` for some edge.
    pub fn set_weights(&mut self, wmin: &[f64], wmax: &[f64]) -> Result<()> {
        validation::check_cost_intervals(self.graph, wmin, wmax)?;
        self.wmin.copy_from_slice(wmin);
        self.wmax.copy_from_slice(wmax);
        self.weights_set = true;
        Ok(())
    }

    /// Sets admissible vertex potentials: lower bounds on the remaining
    /// cost to the destination under `wmin`, typically Dijkstra potentials
    /// computed on the reversed graph. Infinite potentials are accepted and
    /// mark vertices that cannot reach the destination; edges out of such
    /// vertices are never expanded.
    ///
    /// # Errors
    ///
    /// Returns `HyperstarError::InvalidWeights` when the length differs from
    /// the graph's vertex count or any potential is negative or `NaN`.
    pub fn set_potentials(&mut self, potentials: &[f64]) -> Result<()> {
        validation::check_vertex_potentials(self.graph, potentials)?;
        self.potentials.copy_from_slice(potentials);
        Ok(())
    }

    /// Computes the optimal hyperpath between two vertex ids.
    ///
    /// When the destination is unreachable from the origin the run succeeds
    /// with an empty hyperpath.
    ///
    /// # Errors
    ///
    /// - `HyperstarError::WeightsNotSet` when no interval bounds were
    ///   provided.
    /// - `HyperstarError::NotRecovered` when the engine already ran and
    ///   `recover()` has not been called since.
    /// - `HyperstarError::VertexNotFound` for unknown endpoint ids.
    pub fn run(&mut self, origin_id: &str, destination_id: &str) -> Result<()> {
        if !self.weights_set {
            return Err(HyperstarError::weights_not_set(
                "Hyperpath::run called before set_weights",
            ));
        }
        if self.ran {
            return Err(HyperstarError::not_recovered(
                "Hyperpath::run called twice without recover",
            ));
        }
        let graph = self.graph;
        let origin = graph.vertex(origin_id)?.index();
        let destination = graph.vertex(destination_id)?;

        let mut heap = FibonacciHeap::new(graph.edge_count());
        let mut policy_edges: Vec<EdgeId> = Vec::new();

        self.node_label[destination.index()] = 0.0;
        self.node_flow[origin] = 1.0;

        // Backward pass: expand incoming edges of the current vertex, then
        // settle the globally cheapest open edge.
        let mut expanding = destination;
        loop {
            for edge in graph.in_edges(expanding) {
                let a = edge.index();
                let tail = graph.source(edge).index();
                let bound =
                    self.node_label[expanding.index()] + self.wmin[a] + self.potentials[tail];
                if bound < self.edge_label[a] {
                    self.edge_label[a] = bound;
                    if !self.close[a] {
                        if self.open[a] {
                            heap.decrease_key(a, bound);
                        } else {
                            heap.insert(a, bound);
                            self.open[a] = true;
                        }
                    }
                }
            }

            let Some(a) = heap.delete_min() else { break };
            self.open[a] = false;
            self.close[a] = true;

            let settled = graph
                .edge_by_index(a)
                .expect("heap items are valid edge indices");
            let (from, to) = graph.endpoints(settled);
            let (i, j) = (from.index(), to.index());
            let (w_min, w_max) = (self.wmin[a], self.wmax[a]);

            // Combining rule: absorb the settled edge into its tail label
            // when the edge can still lie on an optimal policy.
            if self.node_label[i] >= self.node_label[j] + w_min {
                let density = if w_max == w_min {
                    DEGENERATE_DENSITY
                } else {
                    1.0 / (w_max - w_min)
                };
                let share = density / (self.density_sum[i] + density);

                if self.density_sum[i] == 0.0 {
                    self.node_label[i] = self.node_label[j] + w_max;
                } else {
                    let blended = (1.0 - share) * self.node_label[i]
                        + share * (self.node_label[j] + w_min);
                    if blended < self.node_label[i] {
                        self.node_label[i] = blended;
                    }
                }
                self.density_sum[i] += density;
                policy_edges.push(settled);
            }

            // No remaining open edge can improve the origin label.
            if self.node_label[j] + w_min + self.potentials[i] > self.node_label[origin] {
                break;
            }
            expanding = from;
        }

        // Forward pass: propagate flow from the origin through the policy
        // edges in decreasing order of their head label plus lower bound, a
        // topological-ish order over the policy graph.
        policy_edges.sort_by_key(|&edge| {
            let a = edge.index();
            let j = graph.target(edge).index();
            Reverse(OrderedFloat(self.node_label[j] + self.wmin[a]))
        });

        for &edge in &policy_edges {
            let a = edge.index();
            let (from, to) = graph.endpoints(edge);
            let (i, j) = (from.index(), to.index());
            let (w_min, w_max) = (self.wmin[a], self.wmax[a]);
            let density = if w_max == w_min {
                DEGENERATE_DENSITY
            } else {
                1.0 / (w_max - w_min)
            };
            let share = density / self.density_sum[i];
            self.edge_flow[a] = share * self.node_flow[i];
            self.node_flow[j] += self.edge_flow[a];
        }

        let result: Vec<(String, f64)> = policy_edges
            .iter()
            .filter(|edge| self.edge_flow[edge.index()] != 0.0)
            .map(|&edge| (graph.edge_id(edge).to_string(), self.edge_flow[edge.index()]))
            .collect();
        self.hyperpath = result;

        self.ran = true;
        debug!(
            origin = origin_id,
            destination = destination_id,
            edges = self.hyperpath.len(),
            "hyperpath run finished"
        );
        Ok(())
    }

    /// Returns the hyperpath of the last run as `(edge id, choice
    /// probability)` pairs, ordered as propagated by the forward pass.
    /// Empty when the destination is unreachable.
    pub fn hyperpath(&self) -> &[(String, f64)] {
        &self.hyperpath
    }

    /// Returns the expected-cost labels of the last run, indexed by vertex
    /// index. Vertices outside the policy hold `f64::INFINITY`.
    pub fn node_labels(&self) -> &[f64] {
        &self.node_label
    }

    /// Re-initializes labels, flows and visit flags in place so the engine
    /// can run again. Interval bounds and potentials are retained.
    pub fn recover(&mut self) {
        self.node_label.fill(f64::INFINITY);
        self.density_sum.fill(0.0);
        self.node_flow.fill(0.0);
        self.edge_label.fill(f64::INFINITY);
        self.edge_flow.fill(0.0);
        self.open.fill(false);
        self.close.fill(false);
        self.hyperpath.clear();
        self.ran = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_intervals_reduce_to_shortest_path() {
        let mut g = Graph::with_capacity(3, 2);
        g.add_edge("e1", "v1", "v2");
        g.add_edge("e2", "v2", "v3");

        let mut engine = Hyperpath::new(&g);
        engine.set_weights(&[1.5, 0.7], &[1.5, 0.7]).unwrap();
        engine.run("v1", "v3").unwrap();

        let result = engine.hyperpath();
        assert_eq!(result.len(), 2);
        for (_, probability) in result {
            assert_eq!(*probability, 1.0);
        }
        let mut ids: Vec<&str> = result.iter().map(|(id, _)| id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_diamond_splits_flow_toward_tighter_interval() {
        let mut g = Graph::with_capacity(4, 4);
        g.add_edge("e1", "v1", "v2");
        g.add_edge("e2", "v1", "v3");
        g.add_edge("e3", "v2", "v4");
        g.add_edge("e4", "v3", "v4");

        let mut engine = Hyperpath::new(&g);
        engine
            .set_weights(&[1.0, 1.0, 1.0, 1.0], &[2.0, 3.0, 2.0, 3.0])
            .unwrap();
        engine.run("v1", "v4").unwrap();

        let flow = |id: &str| {
            engine
                .hyperpath()
                .iter()
                .find(|(eid, _)| eid == id)
                .map(|(_, p)| *p)
                .unwrap_or(0.0)
        };
        let upper = flow("e1");
        let lower = flow("e2");
        assert!(upper > lower, "tighter interval should attract more flow");
        assert!((upper + lower - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreachable_destination_yields_empty_hyperpath() {
        let mut g = Graph::new();
        g.add_edge("e1", "v1", "v2");
        g.add_edge("e2", "v3", "v4");

        let mut engine = Hyperpath::new(&g);
        engine.set_weights(&[1.0, 1.0], &[2.0, 2.0]).unwrap();
        engine.run("v1", "v4").unwrap();
        assert!(engine.hyperpath().is_empty());
    }

    #[test]
    fn test_interval_ordering_is_validated() {
        let mut g = Graph::new();
        g.add_edge("e1", "v1", "v2");

        let mut engine = Hyperpath::new(&g);
        let err = engine.set_weights(&[2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, HyperstarError::InvalidWeights(_)));
    }
}
