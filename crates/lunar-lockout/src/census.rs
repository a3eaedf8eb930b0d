//! Whole-space analysis for a fixed number of blockers.
//!
//! Every placement of the goal piece and `n` identical blockers is generated,
//! boards are folded into symmetry classes, and the class graph is labeled
//! with distances. The classes furthest from a solution are the hardest
//! puzzles with that many blockers.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::info;

use crate::board::{Board, Piece, CELLS, SIZE};
use crate::distance::{label_distances, DistanceMap};
use crate::graph::{explore_classes, StateGraph};

/// Most blockers that fit next to the goal piece.
pub const MAX_BLOCKERS: usize = CELLS - 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CensusError {
    #[error("{requested} blockers do not fit next to the goal piece, at most {max} do")]
    TooManyBlockers { requested: usize, max: usize },
}

/// Every symmetry class of boards with the goal piece and `blockers`
/// blockers, as canonical boards in ascending order.
pub fn enumerate_boards(blockers: usize) -> Result<Vec<Board>, CensusError> {
    if blockers > MAX_BLOCKERS {
        return Err(CensusError::TooManyBlockers {
            requested: blockers,
            max: MAX_BLOCKERS,
        });
    }

    let mut classes = BTreeSet::new();
    let mut chosen = Vec::with_capacity(blockers);
    for_each_subset(0, blockers, &mut chosen, &mut |cells| {
        let base = cells.iter().fold(Board::empty(), |board, &index| {
            board.with_piece(index / SIZE, index % SIZE, Piece::BLOCKER)
        });
        for goal in (0..CELLS).filter(|index| !cells.contains(index)) {
            let board = base.with_piece(goal / SIZE, goal % SIZE, Piece::GOAL);
            classes.insert(board.canonical());
        }
    });

    Ok(classes.into_iter().collect())
}

/// Visit every `k`-element subset of `first..CELLS` in lexicographic order.
fn for_each_subset(
    first: usize,
    k: usize,
    chosen: &mut Vec<usize>,
    f: &mut impl FnMut(&[usize]),
) {
    if k == 0 {
        f(chosen);
        return;
    }
    for cell in first..=CELLS - k {
        chosen.push(cell);
        for_each_subset(cell + 1, k - 1, chosen, f);
        chosen.pop();
    }
}

/// Labeled class graph for one blocker count.
#[derive(Debug, Clone)]
pub struct Census {
    blockers: usize,
    graph: StateGraph,
    distances: DistanceMap,
}

impl Census {
    pub fn blockers(&self) -> usize {
        self.blockers
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    /// Largest finite distance over all classes.
    pub fn max_distance(&self) -> Option<u32> {
        self.distances.max_finite()
    }

    /// Canonical boards at the largest finite distance, in ascending order.
    pub fn hardest(&self) -> Vec<Board> {
        let Some(max) = self.max_distance() else {
            return Vec::new();
        };
        self.distances
            .iter()
            .filter(|&(_, d)| d.moves() == Some(max))
            .map(|(id, _)| self.graph.vertex(id))
            .collect()
    }
}

/// Enumerate, connect and label every class with `blockers` blockers.
pub fn census(blockers: usize) -> Result<Census, CensusError> {
    let boards = enumerate_boards(blockers)?;
    let graph = explore_classes(boards);
    let distances = label_distances(&graph);

    let census = Census {
        blockers,
        graph,
        distances,
    };
    info!(
        blockers,
        vertices = census.graph.vertex_count(),
        edges = census.graph.edge_count(),
        max_distance = ?census.max_distance(),
        hardest = census.hardest().len(),
        "census complete"
    );
    Ok(census)
}
