//! Property-based invariant tests for the solve pipeline.
//!
//! Random boards with two to four pieces (one of them the goal piece) are
//! solved and checked against:
//!
//! 1. Closure: every legal slide from a vertex leads to a vertex, via an edge.
//! 2. No self loops and no zero-distance slides.
//! 3. Distance zero exactly on solved boards.
//! 4. Every finite d > 0 vertex has a successor at d - 1 and none below it.
//! 5. Marked vertices are finite and no further than the start.
//! 6. Breadth-first labels match the layered edge-rescan fixed point.
//! 7. Solving twice gives identical results.
//! 8. Canonical forms are shared by the whole orbit, and every image of a
//!    board is as far from a solution as the board itself.

use std::collections::HashSet;

use lunar_lockout::{
    explore_classes, label_distances, solve, Board, Distance, Piece, Solution, StateGraph,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const OTHERS: [char; 3] = ['a', 'b', 'c'];

fn board_strategy() -> impl Strategy<Value = Board> {
    proptest::sample::subsequence((0..25).collect::<Vec<usize>>(), 2..=4)
        .prop_shuffle()
        .prop_map(|cells| {
            let mut board = Board::empty();
            for (i, &cell) in cells.iter().enumerate() {
                let piece = if i == 0 {
                    Piece::GOAL
                } else {
                    Piece::new(OTHERS[i - 1]).unwrap()
                };
                board = board.with_piece(cell / 5, cell % 5, piece);
            }
            board
        })
}

fn rescan_labels(graph: &StateGraph) -> Vec<Distance> {
    let mut labels: Vec<Option<u32>> = graph
        .vertices()
        .iter()
        .map(|b| b.is_solved().then_some(0))
        .collect();

    let mut layer = 0;
    loop {
        let mut changed = false;
        for edge in graph.edges() {
            if labels[edge.source].is_none() && labels[edge.target] == Some(layer) {
                labels[edge.source] = Some(layer + 1);
                changed = true;
            }
        }
        if !changed {
            break;
        }
        layer += 1;
    }

    labels
        .into_iter()
        .map(|l| l.map_or(Distance::Unreachable, Distance::Moves))
        .collect()
}

fn successor_distances(solution: &Solution, outgoing: &[Vec<usize>], id: usize) -> Vec<Distance> {
    let edges = solution.graph().edges();
    outgoing[id]
        .iter()
        .map(|&e| solution.distances().get(edges[e].target))
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Graph structure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn graph_is_closed_under_slides(start in board_strategy()) {
        let solution = solve(start);
        let graph = solution.graph();
        let edges: HashSet<(Board, Board, String)> = graph
            .edges()
            .iter()
            .map(|e| (graph.vertex(e.source), graph.vertex(e.target), e.slide.to_string()))
            .collect();

        prop_assert_eq!(edges.len(), graph.edge_count(), "duplicate edges");
        for &board in graph.vertices() {
            for (slide, next) in board.moves() {
                prop_assert!(graph.contains(&next));
                prop_assert!(edges.contains(&(board, next, slide.to_string())));
            }
        }
    }

    #[test]
    fn no_self_loops_or_adjacent_slides(start in board_strategy()) {
        let solution = solve(start);
        let graph = solution.graph();

        for edge in graph.edges() {
            prop_assert_ne!(edge.source, edge.target);

            // The moved piece left exactly one cell and the cell next to it
            // in the slide direction was empty.
            let from = graph.vertex(edge.source);
            let to = graph.vertex(edge.target);
            let vacated: Vec<usize> = (0..25)
                .filter(|&i| from.get(i).is_some() && to.get(i).is_none())
                .collect();
            prop_assert_eq!(vacated.len(), 1);

            let index = vacated[0];
            let (dx, dy) = edge.slide.direction.delta();
            let nx = (index % 5) as i32 + dx;
            let ny = (index / 5) as i32 + dy;
            prop_assert!((0..5).contains(&nx) && (0..5).contains(&ny));
            prop_assert!(from.get(ny as usize * 5 + nx as usize).is_none());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Distance labels
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn distance_zero_iff_solved(start in board_strategy()) {
        let solution = solve(start);
        for (id, d) in solution.distances().iter() {
            prop_assert_eq!(
                d == Distance::Moves(0),
                solution.graph().vertex(id).is_solved()
            );
        }
    }

    #[test]
    fn distances_are_locally_consistent(start in board_strategy()) {
        let solution = solve(start);
        let outgoing = solution.graph().outgoing();

        for (id, d) in solution.distances().iter() {
            let Distance::Moves(d) = d else {
                continue;
            };
            let next = successor_distances(&solution, &outgoing, id);
            if d > 0 {
                prop_assert!(next.contains(&Distance::Moves(d - 1)));
            }
            for n in next {
                if let Distance::Moves(n) = n {
                    prop_assert!(n + 1 >= d, "edge skips a layer: {} -> {}", d, n);
                }
            }
        }
    }

    #[test]
    fn unreachable_vertices_have_no_finite_successor(start in board_strategy()) {
        let solution = solve(start);
        let outgoing = solution.graph().outgoing();

        for (id, d) in solution.distances().iter() {
            if d == Distance::Unreachable {
                prop_assert!(successor_distances(&solution, &outgoing, id)
                    .iter()
                    .all(|n| *n == Distance::Unreachable));
            }
        }
    }

    #[test]
    fn queue_labels_match_layered_rescan(start in board_strategy()) {
        let solution = solve(start);
        let expected = rescan_labels(solution.graph());
        let actual: Vec<Distance> = solution.distances().iter().map(|(_, d)| d).collect();
        prop_assert_eq!(actual, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-7. Optimal set and determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn marked_vertices_stay_within_start_distance(start in board_strategy()) {
        let solution = solve(start);
        let start_distance = solution.moves();

        prop_assert!(solution.optimal().contains(StateGraph::START));
        if start_distance == Distance::Unreachable {
            prop_assert_eq!(solution.optimal().len(), 1);
        }
        for id in solution.optimal().iter() {
            let d = solution.distances().get(id);
            if id != StateGraph::START {
                prop_assert!(d.is_finite());
            }
            prop_assert!(d <= start_distance);
        }
    }

    #[test]
    fn principal_variation_solves(start in board_strategy()) {
        let solution = solve(start);
        let line = solution.principal_variation();

        match solution.moves() {
            Distance::Moves(d) => prop_assert_eq!(line.len() as u32, d),
            Distance::Unreachable => prop_assert!(line.is_empty()),
        }

        let mut board = start;
        for slide in &line {
            let next = board.moves().into_iter().find(|(s, _)| s == slide).map(|(_, b)| b);
            prop_assert!(next.is_some());
            board = next.unwrap();
        }
        prop_assert_eq!(board.is_solved(), solution.moves().is_finite());
    }

    #[test]
    fn solving_is_deterministic(start in board_strategy()) {
        let a = solve(start);
        let b = solve(start);

        prop_assert_eq!(a.graph().vertices(), b.graph().vertices());
        prop_assert_eq!(a.graph().edges(), b.graph().edges());
        prop_assert_eq!(a.distances(), b.distances());
        prop_assert_eq!(a.optimal(), b.optimal());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn canonical_is_invariant_under_symmetries(start in board_strategy()) {
        let canonical = start.canonical();
        for image in start.symmetries() {
            prop_assert_eq!(image.canonical(), canonical);
            prop_assert!(canonical <= image);
            prop_assert_eq!(image.is_solved(), start.is_solved());
        }
    }

    #[test]
    fn images_have_equal_distance(start in board_strategy()) {
        let moves = solve(start).moves();
        prop_assert_eq!(solve(start.rotate()).moves(), moves);
        prop_assert_eq!(solve(start.mirror()).moves(), moves);
    }

    #[test]
    fn class_graph_has_one_vertex_per_orbit(start in board_strategy()) {
        let solution = solve(start);
        let orbits: HashSet<Board> = solution
            .graph()
            .vertices()
            .iter()
            .map(Board::canonical)
            .collect();
        let classes = explore_classes([start]);

        prop_assert_eq!(classes.vertex_count(), orbits.len());
        prop_assert_eq!(label_distances(&classes).get(StateGraph::START), solution.moves());
    }
}
