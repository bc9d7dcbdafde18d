//! A* shortest-path search over lazily generated graphs
//!
//! This crate provides a best-first search engine and the priority queue it
//! is built on:
//!
//! - **Indexed min-heap** ([`heap::ArrayHeapMinPq`]): maps each item to its
//!   slot in a binary heap, so membership tests are O(1) and a queued item's
//!   priority can be changed in O(log n)
//! - **A\* solver** ([`solver::AStarSolver`]): shortest path from a start to a
//!   goal vertex under a wall-clock budget, reporting the outcome, path, cost
//!   and number of settled vertices
//! - **Graph interface** ([`graph::AStarGraph`]): neighbors are produced on
//!   demand, so graphs never have to be stored in full
//! - **Seam carving** ([`seam::SeamCarver`]): minimum-energy seams of a
//!   picture found as shortest paths through [`seam::SeamGraph`]
//!
//! # Example
//!
//! ```rust
//! use rust_astar_search::graph::WeightedDirectedGraph;
//! use rust_astar_search::solver::{AStarSolver, SolverOutcome};
//!
//! // Grid corner to corner, with Manhattan distance as the heuristic.
//! let mut graph = WeightedDirectedGraph::new();
//! for x in 0..4i32 {
//!     for y in 0..4i32 {
//!         if x < 3 {
//!             graph.add_undirected_edge((x, y), (x + 1, y), 1u32);
//!         }
//!         if y < 3 {
//!             graph.add_undirected_edge((x, y), (x, y + 1), 1u32);
//!         }
//!     }
//! }
//! let graph = graph.with_heuristic(|a: &(i32, i32), b: &(i32, i32)| {
//!     a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
//! });
//!
//! let solver = AStarSolver::solve(&graph, (0, 0), (3, 3), 1.0).unwrap();
//! assert_eq!(solver.outcome(), SolverOutcome::Solved);
//! assert_eq!(solver.solution_weight(), 6);
//! assert_eq!(solver.solution().len(), 7);
//! ```

pub mod error;
pub mod graph;
pub mod heap;
pub mod naive;
pub mod seam;
pub mod solver;
pub mod traits;

// Re-export the main types for convenience
pub use error::{GraphError, QueueError, SeamError, SolveError};
pub use graph::{AStarGraph, WeightedEdge};
pub use solver::{solve, AStarSolver, SolverOutcome, SolverResult};
pub use traits::{Cost, MinPriorityQueue};
