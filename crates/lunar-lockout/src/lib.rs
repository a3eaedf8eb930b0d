//! Exhaustive solver for Lunar Lockout puzzles.
//!
//! Given a start board, this crate builds the graph of every reachable
//! board, labels each one with its distance to a solution, and marks the
//! boards lying on shortest solutions. The result can be written out as a
//! Graphviz graph or summarized as JSON.
//!
//! [`census()`] runs the same labeling over every board with a given number of
//! blockers, folded by symmetry, to find the hardest puzzles of that size.

pub mod board;
pub mod census;
pub mod distance;
pub mod graph;
pub mod optimal;
pub mod problem;
pub mod render;
pub mod report;
pub mod solver;
pub mod symmetry;

// Re-export main types
pub use board::{Board, BoardError, Direction, Piece, Slide, SIZE};
pub use census::{census, enumerate_boards, Census, CensusError, MAX_BLOCKERS};
pub use distance::{label_distances, Distance, DistanceMap};
pub use graph::{explore, explore_classes, Edge, StateGraph, VertexId};
pub use optimal::{mark_optimal, principal_variation, OptimalSet};
pub use problem::{parse_problems, read_problems, Problem, ProblemError};
pub use render::{rasterize, render_dot, write_dot, DotStats, RenderConfig, RenderError};
pub use report::{CensusReport, GraphOutput, SolutionReport};
pub use solver::{solve, Solution};
