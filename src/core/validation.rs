/*!
# Input Validation Utilities

Centralized precondition checks for the weight and potential arrays fed to
the routing engines. Keeping the checks here ensures every engine rejects
malformed input before touching any of its working state, so an engine
remains recoverable after a validation error.
*/

use crate::core::error::{HyperstarError, Result};
use crate::core::types::Graph;

/// Checks a Dijkstra weight array: one finite, non-negative weight per
/// edge.
pub fn check_edge_weights(graph: &Graph, weights: &[f64]) -> Result<()> {
    if weights.len() != graph.edge_count() {
        return Err(HyperstarError::invalid_weights(format!(
            "expected {} edge weights, got {}",
            graph.edge_count(),
            weights.len()
        )));
    }
    for (idx, &w) in weights.iter().enumerate() {
        if !w.is_finite() {
            return Err(HyperstarError::invalid_weights(format!(
                "weight of edge {} is not finite: {}",
                idx, w
            )));
        }
        if w < 0.0 {
            return Err(HyperstarError::invalid_weights(format!(
                "weight of edge {} is negative: {}",
                idx, w
            )));
        }
    }
    Ok(())
}

/// Checks a pair of cost-interval arrays: one finite interval
/// `0 <= wmin <= wmax` per edge.
pub fn check_cost_intervals(graph: &Graph, wmin: &[f64], wmax: &[f64]) -> Result<()> {
    check_edge_weights(graph, wmin)?;
    if wmax.len() != graph.edge_count() {
        return Err(HyperstarError::invalid_weights(format!(
            "expected {} upper bounds, got {}",
            graph.edge_count(),
            wmax.len()
        )));
    }
    for (idx, (&lo, &hi)) in wmin.iter().zip(wmax.iter()).enumerate() {
        if !hi.is_finite() {
            return Err(HyperstarError::invalid_weights(format!(
                "upper bound of edge {} is not finite: {}",
                idx, hi
            )));
        }
        if hi < lo {
            return Err(HyperstarError::invalid_weights(format!(
                "edge {} has wmax {} below wmin {}",
                idx, hi, lo
            )));
        }
    }
    Ok(())
}

/// Checks a vertex potential array: one non-negative lower bound per
/// vertex.
///
/// `+∞` is accepted — it is the natural (and trivially admissible)
/// potential of a vertex that cannot reach the destination, and exactly
/// what a reverse-graph Dijkstra run produces for such vertices.
pub fn check_vertex_potentials(graph: &Graph, potentials: &[f64]) -> Result<()> {
    if potentials.len() != graph.vertex_count() {
        return Err(HyperstarError::invalid_weights(format!(
            "expected {} vertex potentials, got {}",
            graph.vertex_count(),
            potentials.len()
        )));
    }
    for (idx, &h) in potentials.iter().enumerate() {
        if h.is_nan() || h < 0.0 {
            return Err(HyperstarError::invalid_weights(format!(
                "potential of vertex {} is invalid: {}",
                idx, h
            )));
        }
    }
    Ok(())
}
