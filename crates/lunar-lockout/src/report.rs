//! JSON summaries of solved problems and blocker censuses.

use std::path::PathBuf;

use serde::Serialize;

use crate::board::Board;
use crate::census::Census;
use crate::problem::Problem;
use crate::render::DotStats;
use crate::solver::Solution;

/// Summary of one problem, as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionReport {
    pub name: String,
    pub number: u32,
    pub level: String,
    pub start: Board,
    pub vertices: usize,
    pub edges: usize,
    /// `None` when the center cannot be reached
    pub moves: Option<u32>,
    pub solvable_vertices: usize,
    pub optimal_vertices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<u32>,
    pub solution: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphOutput>,
}

/// Files produced for a problem's graph.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOutput {
    pub dot: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl GraphOutput {
    pub fn new(dot: PathBuf, stats: DotStats) -> Self {
        Self {
            dot,
            nodes: stats.nodes,
            edges: stats.edges,
            image: None,
        }
    }
}

impl SolutionReport {
    pub fn new(problem: &Problem, solution: &Solution) -> Self {
        let graph = solution.graph();
        let distances = solution.distances();

        Self {
            name: problem.name(),
            number: problem.number,
            level: problem.level.clone(),
            start: problem.start,
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            moves: solution.moves().moves(),
            solvable_vertices: distances.finite_count(),
            optimal_vertices: solution.optimal().len(),
            max_distance: distances.max_finite(),
            solution: solution
                .principal_variation()
                .iter()
                .map(ToString::to_string)
                .collect(),
            graph: None,
        }
    }

    pub fn with_graph(mut self, graph: GraphOutput) -> Self {
        self.graph = Some(graph);
        self
    }
}

/// Summary of one blocker count, as printed by `hardest --json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CensusReport {
    pub blockers: usize,
    pub vertices: usize,
    pub edges: usize,
    pub solvable_vertices: usize,
    pub max_distance: Option<u32>,
    pub hardest: Vec<Board>,
}

impl CensusReport {
    pub fn new(census: &Census) -> Self {
        Self {
            blockers: census.blockers(),
            vertices: census.graph().vertex_count(),
            edges: census.graph().edge_count(),
            solvable_vertices: census.distances().finite_count(),
            max_distance: census.max_distance(),
            hardest: census.hardest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::census;
    use crate::solver::solve;

    #[test]
    fn test_report_for_two_move_problem() {
        let start = Board::from_rows(&["x..a.", ".....", ".....", "..b..", "....."]).unwrap();
        let problem = Problem::new(1, "beginner", start);
        let report = SolutionReport::new(&problem, &solve(start));

        assert_eq!(report.name, "problem_01");
        assert_eq!(report.vertices, 5);
        assert_eq!(report.edges, 4);
        assert_eq!(report.moves, Some(2));
        assert_eq!(report.optimal_vertices, 3);
        assert_eq!(report.solution, vec!["xR", "xD"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["start"], "x..a.............b.......");
        assert_eq!(json["optimalVertices"], 3);
        assert!(json.get("graph").is_none());
    }

    #[test]
    fn test_report_for_unsolvable_problem() {
        let start = Board::from_rows(&["x....", ".....", ".....", ".....", "....a"]).unwrap();
        let problem = Problem::new(2, "none", start);
        let report = SolutionReport::new(&problem, &solve(start))
            .with_graph(GraphOutput::new(PathBuf::from("problem_02.dot"), DotStats::default()));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["moves"].is_null());
        assert!(json.get("maxDistance").is_none());
        assert_eq!(json["solution"], serde_json::json!([]));
        assert_eq!(json["graph"]["dot"], "problem_02.dot");
        assert!(json["graph"].get("image").is_none());
    }

    #[test]
    fn test_census_report() {
        let report = CensusReport::new(&census(1).unwrap());

        assert_eq!(report.vertices, 85);
        assert_eq!(report.edges, 36);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["solvableVertices"], 7);
        assert_eq!(json["maxDistance"], 1);
        assert_eq!(
            json["hardest"],
            serde_json::json!(["...........a..x..........", "...........a.x..........."])
        );
    }
}
