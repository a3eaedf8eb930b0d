//! Full solve pipeline: explore, label, mark.

use tracing::info;

use crate::board::{Board, Slide};
use crate::distance::{label_distances, Distance, DistanceMap};
use crate::graph::{explore, StateGraph, VertexId};
use crate::optimal::{mark_optimal, principal_variation, OptimalSet};

/// Result of solving one start board.
///
/// Holds the reachable graph, the distance of every vertex, and the
/// vertices that lie on some shortest solution. Immutable once built.
#[derive(Debug, Clone)]
pub struct Solution {
    graph: StateGraph,
    distances: DistanceMap,
    optimal: OptimalSet,
}

impl Solution {
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    pub fn optimal(&self) -> &OptimalSet {
        &self.optimal
    }

    pub fn start(&self) -> Board {
        self.graph.start()
    }

    /// Distance of the start board.
    pub fn moves(&self) -> Distance {
        self.distances.get(StateGraph::START)
    }

    /// Distance of an arbitrary board, if it was reached at all.
    pub fn distance_of(&self, board: &Board) -> Option<Distance> {
        self.graph.id_of(board).map(|id| self.distances.get(id))
    }

    pub fn is_optimal(&self, id: VertexId) -> bool {
        self.optimal.contains(id)
    }

    /// One shortest move sequence from the start.
    pub fn principal_variation(&self) -> Vec<Slide> {
        principal_variation(&self.graph, &self.distances, StateGraph::START)
    }
}

/// Solve a start board.
///
/// Never fails: a board with no way to the center yields an unreachable
/// start distance and a marked set holding only the start.
pub fn solve(start: Board) -> Solution {
    let graph = explore(start);
    let distances = label_distances(&graph);
    let optimal = mark_optimal(&graph, &distances, StateGraph::START);

    info!(
        start = %start,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        moves = %distances.get(StateGraph::START),
        optimal = optimal.len(),
        "solved"
    );

    Solution {
        graph,
        distances,
        optimal,
    }
}
