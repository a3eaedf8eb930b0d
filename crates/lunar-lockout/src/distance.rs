//! Distance-to-solution labeling.
//!
//! Every vertex gets the minimum number of slides needed to reach any solved
//! board, computed with a breadth-first sweep backwards from all solved
//! vertices at once.

use std::collections::VecDeque;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::graph::{StateGraph, VertexId};

/// Minimum number of moves to a solved board.
///
/// `Unreachable` orders after every finite distance and is not less than
/// itself, so "strictly closer" comparisons stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distance {
    Moves(u32),
    Unreachable,
}

impl Distance {
    pub fn moves(self) -> Option<u32> {
        match self {
            Distance::Moves(n) => Some(n),
            Distance::Unreachable => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Moves(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Moves(n) => write!(f, "{}", n),
            Distance::Unreachable => f.write_str("inf"),
        }
    }
}

// Serialized as a number, or null when unreachable.
impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.moves().serialize(serializer)
    }
}

/// Distance label for every vertex of a [`StateGraph`], indexed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    labels: Vec<Distance>,
}

impl DistanceMap {
    pub fn get(&self, id: VertexId) -> Distance {
        self.labels[id]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Distance)> + '_ {
        self.labels.iter().copied().enumerate()
    }

    /// Number of vertices from which a solution can be reached.
    pub fn finite_count(&self) -> usize {
        self.labels.iter().filter(|d| d.is_finite()).count()
    }

    /// Largest finite distance in the graph.
    pub fn max_finite(&self) -> Option<u32> {
        self.labels.iter().filter_map(|d| d.moves()).max()
    }
}

/// Label every vertex with its distance to the nearest solved vertex.
pub fn label_distances(graph: &StateGraph) -> DistanceMap {
    let mut labels = vec![Distance::Unreachable; graph.vertex_count()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    for (id, board) in graph.vertices().iter().enumerate() {
        if board.is_solved() {
            labels[id] = Distance::Moves(0);
            queue.push_back(id);
        }
    }

    let incoming = graph.incoming();
    let edges = graph.edges();

    while let Some(id) = queue.pop_front() {
        let Distance::Moves(d) = labels[id] else {
            continue;
        };
        for &e in &incoming[id] {
            let source = edges[e].source;
            if labels[source] == Distance::Unreachable {
                labels[source] = Distance::Moves(d + 1);
                queue.push_back(source);
            }
        }
    }

    let map = DistanceMap { labels };
    debug!(
        vertices = map.len(),
        solvable = map.finite_count(),
        max_distance = ?map.max_finite(),
        "labeled distances"
    );
    map
}
