//! Reachable state graph.
//!
//! Starting from a single board, every legal slide is applied until no new
//! board turns up. Vertices are kept in discovery order and indexed by
//! [`VertexId`]; edges refer to vertices by id.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::board::{Board, Slide};

/// Position of a board in [`StateGraph::vertices`].
pub type VertexId = usize;

/// A directed edge: applying `slide` to `source` yields `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub slide: Slide,
}

/// Every board reachable from a start board, with every move between them.
#[derive(Debug, Clone)]
pub struct StateGraph {
    vertices: Vec<Board>,
    index: HashMap<Board, VertexId>,
    edges: Vec<Edge>,
}

impl StateGraph {
    /// The start board is always the first vertex.
    pub const START: VertexId = 0;

    fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Look up or insert a board. The flag is true for a new vertex.
    fn intern(&mut self, board: Board) -> (VertexId, bool) {
        if let Some(&id) = self.index.get(&board) {
            return (id, false);
        }
        let id = self.vertices.len();
        self.vertices.push(board);
        self.index.insert(board, id);
        (id, true)
    }

    pub fn start(&self) -> Board {
        self.vertices[Self::START]
    }

    pub fn vertices(&self) -> &[Board] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Board {
        self.vertices[id]
    }

    pub fn id_of(&self, board: &Board) -> Option<VertexId> {
        self.index.get(board).copied()
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.index.contains_key(board)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Indices into [`edges`](Self::edges) leaving each vertex.
    pub fn outgoing(&self) -> Vec<Vec<usize>> {
        let mut outgoing = vec![Vec::new(); self.vertices.len()];
        for (i, edge) in self.edges.iter().enumerate() {
            outgoing[edge.source].push(i);
        }
        outgoing
    }

    /// Indices into [`edges`](Self::edges) entering each vertex.
    pub fn incoming(&self) -> Vec<Vec<usize>> {
        let mut incoming = vec![Vec::new(); self.vertices.len()];
        for (i, edge) in self.edges.iter().enumerate() {
            incoming[edge.target].push(i);
        }
        incoming
    }
}

/// Build the graph of every board reachable from `start`.
///
/// Pending boards are expanded depth-first; the resulting vertex and edge
/// sets do not depend on that order, and the order itself is deterministic.
pub fn explore(start: Board) -> StateGraph {
    let mut graph = StateGraph::new();
    graph.intern(start);

    let mut pending: VecDeque<VertexId> = VecDeque::new();
    pending.push_back(StateGraph::START);

    // Each id is pushed exactly once, when first interned.
    while let Some(source) = pending.pop_back() {
        let board = graph.vertex(source);

        for (slide, next) in board.moves() {
            let (target, is_new) = graph.intern(next);
            if is_new {
                pending.push_back(target);
            }
            graph.edges.push(Edge {
                source,
                target,
                slide,
            });
        }
    }

    debug!(
        start = %start,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "explored state graph"
    );

    graph
}

/// Build the graph over symmetry classes, seeded with `boards`.
///
/// Each vertex is the [canonical](Board::canonical) form of a board and
/// stands for its whole orbit. Slides are applied to that representative and
/// their results reduced the same way. A source keeps one edge per target
/// class, and the target may be the source itself. Seeds come first, in the
/// order given; boards first met while expanding are appended after them.
pub fn explore_classes(boards: impl IntoIterator<Item = Board>) -> StateGraph {
    let mut graph = StateGraph::new();
    for board in boards {
        graph.intern(board.canonical());
    }

    let mut source = 0;
    while source < graph.vertex_count() {
        let board = graph.vertex(source);
        let mut targets: SmallVec<[VertexId; 16]> = SmallVec::new();

        for (slide, next) in board.moves() {
            let (target, _) = graph.intern(next.canonical());
            if targets.contains(&target) {
                continue;
            }
            targets.push(target);
            graph.edges.push(Edge {
                source,
                target,
                slide,
            });
        }
        source += 1;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "explored symmetry classes"
    );

    graph
}
