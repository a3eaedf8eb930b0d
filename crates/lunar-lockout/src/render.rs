//! Graphviz output for solved problems.
//!
//! Only vertices that can still reach a solution are drawn, together with
//! the edges between them. Vertices are colored by their role: the start,
//! solved boards, and boards on an optimal path.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::board::SIZE;
use crate::graph::VertexId;
use crate::problem::Problem;
use crate::solver::Solution;

/// Where and how graph files are produced.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Directory receiving `.dot` files and images
    pub output_dir: PathBuf,
    /// Run the drawing program after writing the `.dot` file
    pub rasterize: bool,
    /// Output format passed to the drawing program as `-T<format>`
    pub format: String,
    /// Graphviz executable
    pub dot_program: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            rasterize: false,
            format: "pdf".to_string(),
            dot_program: "dot".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {program:?}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program:?} exited with {status} while rendering {path:?}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        path: PathBuf,
    },
}

/// Role of a drawn vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexClass {
    Start,
    SolvedOnPath,
    Solved,
    OnPath,
    Other,
}

impl VertexClass {
    pub fn fill_color(self) -> &'static str {
        match self {
            VertexClass::Start => "dodgerblue",
            VertexClass::SolvedOnPath => "green",
            VertexClass::Solved => "darkseagreen1",
            VertexClass::OnPath => "cyan",
            VertexClass::Other => "beige",
        }
    }
}

/// Classify a vertex, or `None` if it cannot reach a solution and is not drawn.
pub fn classify(solution: &Solution, id: VertexId) -> Option<VertexClass> {
    if !solution.distances().get(id).is_finite() {
        return None;
    }

    let board = solution.graph().vertex(id);
    let on_path = solution.is_optimal(id);
    let class = if board == solution.start() {
        VertexClass::Start
    } else if board.is_solved() && on_path {
        VertexClass::SolvedOnPath
    } else if board.is_solved() {
        VertexClass::Solved
    } else if on_path {
        VertexClass::OnPath
    } else {
        VertexClass::Other
    };
    Some(class)
}

/// Number of nodes and edges written to a graph file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotStats {
    pub nodes: usize,
    pub edges: usize,
}

fn attributes_string(attributes: &[(&str, String)]) -> String {
    if attributes.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = attributes
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect();
    format!(" [{}]", pairs.join("; "))
}

fn node_id(solution: &Solution, id: VertexId) -> String {
    solution.graph().vertex(id).to_string().replace('.', "_")
}

/// Write the graph description of `solution` to `out`.
pub fn render_dot<W: Write>(
    out: &mut W,
    problem: &Problem,
    solution: &Solution,
) -> io::Result<DotStats> {
    let graph = solution.graph();
    let distances = solution.distances();
    let mut stats = DotStats::default();

    writeln!(out, "digraph {} {{", problem.name())?;
    writeln!(
        out,
        "    node{};",
        attributes_string(&[("shape", "circle".to_string())])
    )?;
    writeln!(
        out,
        "    graph{};",
        attributes_string(&[
            ("overlap", "no".to_string()),
            (
                "label",
                format!("problem {} ({})", problem.number, problem.level)
            ),
        ])
    )?;

    for id in 0..graph.vertex_count() {
        let Some(class) = classify(solution, id) else {
            continue;
        };
        let board = graph.vertex(id);
        let rows: Vec<String> = (0..SIZE).map(|r| board.row(r)).collect();
        let label = format!("{}\\n\\n({})", rows.join("\\n"), distances.get(id));

        let attributes = [
            ("label", label),
            ("fillcolor", class.fill_color().to_string()),
            ("style", "filled".to_string()),
        ];
        writeln!(
            out,
            "    {}{};",
            node_id(solution, id),
            attributes_string(&attributes)
        )?;
        stats.nodes += 1;
    }

    for edge in graph.edges() {
        let from = distances.get(edge.source);
        let to = distances.get(edge.target);
        if !(from.is_finite() && to.is_finite()) {
            continue;
        }

        let mut attributes = vec![("label", edge.slide.to_string())];
        if to < from {
            attributes.push(("color", "green".to_string()));
        }
        writeln!(
            out,
            "    {} -> {}{};",
            node_id(solution, edge.source),
            node_id(solution, edge.target),
            attributes_string(&attributes)
        )?;
        stats.edges += 1;
    }

    writeln!(out, "}}")?;
    Ok(stats)
}

/// Write `<output_dir>/<name>.dot` and return its path.
pub fn write_dot(
    problem: &Problem,
    solution: &Solution,
    config: &RenderConfig,
) -> Result<(PathBuf, DotStats), RenderError> {
    let path = config.output_dir.join(format!("{}.dot", problem.name()));
    let write_err = |source: io::Error| RenderError::Write {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(&config.output_dir).map_err(write_err)?;
    let file = File::create(&path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    let stats = render_dot(&mut out, problem, solution).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    debug!(path = %path.display(), nodes = stats.nodes, edges = stats.edges, "wrote graph");
    Ok((path, stats))
}

/// Run the drawing program on a `.dot` file, producing an image next to it.
pub fn rasterize(dot_path: &Path, config: &RenderConfig) -> Result<PathBuf, RenderError> {
    let image = dot_path.with_extension(&config.format);
    let status = Command::new(&config.dot_program)
        .arg(format!("-T{}", config.format))
        .arg(dot_path)
        .arg("-o")
        .arg(&image)
        .status()
        .map_err(|source| RenderError::Spawn {
            program: config.dot_program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(RenderError::Failed {
            program: config.dot_program.clone(),
            status,
            path: dot_path.to_path_buf(),
        });
    }

    debug!(image = %image.display(), "rasterized graph");
    Ok(image)
}
