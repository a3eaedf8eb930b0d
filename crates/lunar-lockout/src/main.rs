//! CLI entry point for the Lunar Lockout solver.
//!
//! Usage:
//!   lunar-lockout solve [FILE] [options]
//!   lunar-lockout board <CELLS> [options]
//!   lunar-lockout hardest <N> [--all] [--json]
//!
//! Options:
//!   --output-dir <dir>      Directory for graph files (default: .)
//!   --no-render             Do not write graph files
//!   --rasterize             Run the drawing program on each graph file
//!   --format <fmt>          Image format for --rasterize (default: pdf)
//!   --dot-program <path>    Graphviz executable (default: dot)
//!   --json                  Print a JSON report instead of text
//!
//! Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lunar_lockout::{
    census, rasterize, read_problems, solve, write_dot, Board, CensusReport, GraphOutput, Problem,
    RenderConfig, SolutionReport, SIZE,
};

#[derive(Parser)]
#[command(name = "lunar-lockout")]
#[command(about = "Exhaustive state-graph solver for Lunar Lockout puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every problem in a problem file
    Solve {
        /// Path to the problem file
        #[arg(value_name = "FILE", default_value = "lunar_lockout.txt")]
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Solve a single board given as 25 row-major characters
    Board {
        /// Board cells: '.' for empty, a-h for pieces, x for the goal piece
        #[arg(value_name = "CELLS")]
        cells: String,

        /// Problem number used for output names
        #[arg(long, default_value = "0")]
        number: u32,

        /// Level shown in the graph title
        #[arg(long, default_value = "custom")]
        level: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Find the hardest boards with N blockers by searching every placement
    Hardest {
        /// Number of blockers besides the goal piece
        #[arg(value_name = "N")]
        blockers: usize,

        /// Also report every smaller blocker count, starting from zero
        #[arg(long)]
        all: bool,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Directory for graph files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Do not write graph files
    #[arg(long)]
    no_render: bool,

    /// Run the drawing program on each graph file
    #[arg(long, conflicts_with = "no_render")]
    rasterize: bool,

    /// Image format for --rasterize
    #[arg(long, default_value = "pdf")]
    format: String,

    /// Graphviz executable
    #[arg(long, default_value = "dot")]
    dot_program: String,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

impl OutputArgs {
    fn render_config(&self) -> Option<RenderConfig> {
        if self.no_render {
            return None;
        }
        Some(RenderConfig {
            output_dir: self.output_dir.clone(),
            rasterize: self.rasterize,
            format: self.format.clone(),
            dot_program: self.dot_program.clone(),
        })
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Solve { file, output } => {
            let problems = read_problems(&file)?;
            solve_all(&problems, &output)
        }
        Commands::Board {
            cells,
            number,
            level,
            output,
        } => {
            let start: Board = cells
                .parse()
                .with_context(|| format!("invalid board {:?}", cells))?;
            solve_all(&[Problem::new(number, level, start)], &output)
        }
        Commands::Hardest {
            blockers,
            all,
            json,
        } => {
            let first = if all { 0 } else { blockers };
            hardest(first..=blockers, json)
        }
    }
}

fn hardest(counts: std::ops::RangeInclusive<usize>, json: bool) -> Result<()> {
    let mut reports = Vec::new();

    for blockers in counts {
        let census = census(blockers)?;
        let report = CensusReport::new(&census);

        if !json {
            println!(
                "blockers: {} vertices: {} edges: {}",
                blockers, report.vertices, report.edges
            );
            match report.max_distance {
                Some(d) => println!(
                    "blockers: {} max distance: {} boards: {}",
                    blockers,
                    d,
                    report.hardest.len()
                ),
                None => println!("blockers: {} max distance: inf", blockers),
            }
            for board in &report.hardest {
                println!();
                for row in 0..SIZE {
                    println!("{}", board.row(row));
                }
            }
            println!();
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn solve_all(problems: &[Problem], output: &OutputArgs) -> Result<()> {
    let render = output.render_config();
    let mut reports = Vec::with_capacity(problems.len());

    for problem in problems {
        let name = problem.name();
        let solution = solve(problem.start);
        let mut report = SolutionReport::new(problem, &solution);

        if !output.json {
            println!(
                "name: {} vertices: {} edges: {}",
                name, report.vertices, report.edges
            );
        }

        if let Some(config) = &render {
            let (dot, stats) = write_dot(problem, &solution, config)
                .with_context(|| format!("failed to render {}", name))?;
            let mut graph = GraphOutput::new(dot, stats);
            if config.rasterize {
                graph.image = Some(rasterize(&graph.dot, config)?);
            }
            if !output.json {
                println!(
                    "name: {} graphviz file vertices: {} edges: {}",
                    name, stats.nodes, stats.edges
                );
            }
            report = report.with_graph(graph);
        }

        if !output.json {
            println!("problem: {} nmoves: {}", problem.number, solution.moves());
            if !report.solution.is_empty() {
                println!("solution: {}", report.solution.join(" "));
            }
        }
        reports.push(report);
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
