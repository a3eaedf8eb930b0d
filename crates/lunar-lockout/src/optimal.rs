//! Vertices on shortest solution paths.
//!
//! A vertex is on some optimal path exactly when it can be reached from the
//! start using only moves that strictly decrease the distance label.

use std::collections::VecDeque;

use tracing::debug;

use crate::board::Slide;
use crate::distance::DistanceMap;
use crate::graph::{StateGraph, VertexId};

/// Membership set over the vertices of a [`StateGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalSet {
    marked: Vec<bool>,
    count: usize,
}

impl OptimalSet {
    pub fn contains(&self, id: VertexId) -> bool {
        self.marked.get(id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Marked vertex ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.marked
            .iter()
            .enumerate()
            .filter_map(|(id, &m)| m.then_some(id))
    }
}

/// Mark every vertex reachable from `start` along distance-decreasing edges.
pub fn mark_optimal(graph: &StateGraph, distances: &DistanceMap, start: VertexId) -> OptimalSet {
    let mut marked = vec![false; graph.vertex_count()];
    marked[start] = true;
    let mut count = 1;

    let outgoing = graph.outgoing();
    let edges = graph.edges();

    let mut queue: VecDeque<VertexId> = VecDeque::new();
    queue.push_back(start);

    while let Some(id) = queue.pop_front() {
        let here = distances.get(id);
        for &e in &outgoing[id] {
            let target = edges[e].target;
            if !marked[target] && distances.get(target) < here {
                marked[target] = true;
                count += 1;
                queue.push_back(target);
            }
        }
    }

    debug!(marked = count, start_distance = %distances.get(start), "marked optimal vertices");

    OptimalSet { marked, count }
}

/// One concrete shortest move sequence from `start`.
///
/// At every step the first edge (in discovery order) that lowers the
/// distance by one is taken. Empty when `start` is solved or unreachable.
pub fn principal_variation(
    graph: &StateGraph,
    distances: &DistanceMap,
    start: VertexId,
) -> Vec<Slide> {
    let outgoing = graph.outgoing();
    let edges = graph.edges();

    let mut line = Vec::new();
    let mut current = start;
    while let Some(d) = distances.get(current).moves() {
        if d == 0 {
            break;
        }
        let step = outgoing[current]
            .iter()
            .map(|&e| &edges[e])
            .find(|edge| distances.get(edge.target).moves() == Some(d - 1));
        match step {
            Some(edge) => {
                line.push(edge.slide);
                current = edge.target;
            }
            None => break,
        }
    }
    line
}
