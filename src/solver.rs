//! A* shortest-path search with a wall-clock budget
//!
//! [`AStarSolver::solve`] runs one complete search from `start` to `goal` over
//! an [`AStarGraph`] and caches everything the caller can ask about it: the
//! [`SolverOutcome`], the path, its weight, how many vertices were settled
//! and how long it took. All accessors are plain reads afterwards.
//!
//! # Design
//!
//! Only lightweight indices are stored in the queue rather than full vertex
//! data. A hash map assigns each discovered vertex an index the first time it
//! is seen, and a per-index [`VisitRecord`] holds its best known distance and
//! predecessor. Relaxation replaces the record and, if the vertex is still
//! queued, lowers its priority in place with
//! [`change_priority`](MinPriorityQueue::change_priority).
//!
//! A vertex that has already been extracted is never put back. With a
//! consistent heuristic (including the zero heuristic, which makes this
//! Dijkstra's algorithm) its distance is final when it is extracted. With an
//! inconsistent heuristic the returned path may be longer than optimal; the
//! solver does not detect this. A cheaper route to a settled vertex still
//! replaces its predecessor, so the reconstructed path can follow the new
//! route while the goal keeps the distance it was reached with. In that case
//! `solution_weight` no longer equals the sum of the edges along `solution`.
//!
//! The deadline is checked once per extracted vertex, before the goal test.
//! A timeout of zero therefore always ends as [`SolverOutcome::TimedOut`].
//!
//! # Example
//!
//! ```rust
//! use rust_astar_search::graph::WeightedDirectedGraph;
//! use rust_astar_search::solver::{solve, SolverOutcome};
//!
//! //   0 --10-> 1 --1-> 3
//! //   |        ^
//! //   1        5
//! //   v        |
//! //   2 -------+
//! let mut graph = WeightedDirectedGraph::new();
//! graph.add_edge(0, 1, 10u32);
//! graph.add_edge(0, 2, 1);
//! graph.add_edge(2, 1, 5);
//! graph.add_edge(1, 3, 1);
//!
//! let result = solve(&graph, 0, 3, 5.0).unwrap().into_result();
//! assert_eq!(result.outcome, SolverOutcome::Solved);
//! assert_eq!(result.solution, vec![0, 2, 1, 3]);
//! assert_eq!(result.solution_weight, 7);
//! ```

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::SolveError;
use crate::graph::AStarGraph;
use crate::heap::ArrayHeapMinPq;
use crate::traits::{Cost, MinPriorityQueue};

/// How a search run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverOutcome {
    /// The goal was extracted from the queue; a path is available
    Solved,
    /// The queue ran dry before the goal was reached
    Unsolvable,
    /// The deadline passed while vertices were still queued
    TimedOut,
}

/// Everything a finished search reports
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult<V, C> {
    /// How the run ended
    pub outcome: SolverOutcome,
    /// Vertices from start to goal inclusive; empty unless solved
    pub solution: Vec<V>,
    /// Distance at which the goal was reached; zero unless solved.
    ///
    /// Equals the sum of edge weights along `solution` when the heuristic is
    /// consistent. Under an inconsistent heuristic the two may differ.
    pub solution_weight: C,
    /// Number of non-goal vertices extracted from the queue
    pub states_explored: usize,
    /// Wall-clock time spent in the search
    pub elapsed: Duration,
}

/// Internal index type for discovered vertices.
type NodeIndex = usize;

/// Best known route to a discovered vertex.
#[derive(Debug, Clone, Copy)]
struct VisitRecord<C> {
    /// Cost from start (g-score)
    distance: C,
    /// Previous vertex on the best path; `None` only for the start
    predecessor: Option<NodeIndex>,
}

/// Per-run bookkeeping. Dropped when the run ends.
struct SearchState<V, C> {
    /// Maps vertex state to its index (for fast lookups)
    index_of: FxHashMap<V, NodeIndex>,
    /// Vertex for each index
    vertices: Vec<V>,
    /// Visit record for each index
    records: Vec<VisitRecord<C>>,
}

impl<V, C> SearchState<V, C>
where
    V: Clone + Eq + std::hash::Hash,
    C: Cost,
{
    fn new() -> Self {
        SearchState {
            index_of: FxHashMap::default(),
            vertices: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Records a vertex seen for the first time and returns its index.
    fn discover(&mut self, vertex: V, distance: C, predecessor: Option<NodeIndex>) -> NodeIndex {
        let index = self.vertices.len();
        self.index_of.insert(vertex.clone(), index);
        self.vertices.push(vertex);
        self.records.push(VisitRecord {
            distance,
            predecessor,
        });
        index
    }

    /// Reconstructs the path from start to the given index.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<V> {
        let mut path = vec![self.vertices[current].clone()];
        while let Some(prev) = self.records[current].predecessor {
            path.push(self.vertices[prev].clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// The cached result of one A* run
///
/// Construct with [`AStarSolver::solve`]; a solver is never re-run.
#[derive(Debug, Clone)]
pub struct AStarSolver<V, C> {
    result: SolverResult<V, C>,
}

impl<V, C> AStarSolver<V, C>
where
    V: Clone + Eq + std::hash::Hash,
    C: Cost,
{
    /// Searches `graph` for a cheapest path from `start` to `goal`, giving up
    /// once `timeout_secs` seconds have elapsed.
    ///
    /// `f64::INFINITY` disables the deadline.
    ///
    /// # Errors
    /// - [`SolveError::InvalidArgument`] if `timeout_secs` is negative or NaN
    /// - [`SolveError::Graph`] if the graph fails to enumerate neighbors
    ///
    /// Not finding a path is not an error; check [`outcome`](Self::outcome).
    pub fn solve<G>(graph: &G, start: V, goal: V, timeout_secs: f64) -> Result<Self, SolveError>
    where
        G: AStarGraph<Vertex = V, Cost = C> + ?Sized,
    {
        let deadline = deadline_from_secs(timeout_secs)?;
        let started = Instant::now();

        let mut queue: ArrayHeapMinPq<NodeIndex, C> = ArrayHeapMinPq::new();
        let mut state: SearchState<V, C> = SearchState::new();
        let mut states_explored = 0usize;

        let initial_h = graph.estimated_distance_to_goal(&start, &goal);
        let start_index = state.discover(start, C::default(), None);
        queue.insert(start_index, C::default() + initial_h)?;

        let reached = loop {
            if queue.is_empty() {
                break Err(SolverOutcome::Unsolvable);
            }
            if deadline.is_some_and(|limit| started.elapsed() >= limit) {
                break Err(SolverOutcome::TimedOut);
            }

            let current = queue.extract_min()?;
            if state.vertices[current] == goal {
                break Ok(current);
            }
            states_explored += 1;

            let current_g = state.records[current].distance;
            for edge in graph.neighbors(&state.vertices[current])? {
                let tentative_g = current_g + edge.weight;

                let known = state.index_of.get(&edge.to).copied();
                let Some(neighbor) = known else {
                    let h = graph.estimated_distance_to_goal(&edge.to, &goal);
                    let neighbor = state.discover(edge.to, tentative_g, Some(current));
                    queue.insert(neighbor, tentative_g + h)?;
                    continue;
                };

                if tentative_g < state.records[neighbor].distance {
                    state.records[neighbor] = VisitRecord {
                        distance: tentative_g,
                        predecessor: Some(current),
                    };
                    if queue.contains(&neighbor) {
                        let h = graph.estimated_distance_to_goal(&state.vertices[neighbor], &goal);
                        queue.change_priority(&neighbor, tentative_g + h)?;
                        trace!(neighbor, from = current, "lowered queued priority");
                    }
                }
            }
        };

        let result = match reached {
            Ok(goal_index) => SolverResult {
                outcome: SolverOutcome::Solved,
                solution: state.reconstruct_path(goal_index),
                solution_weight: state.records[goal_index].distance,
                states_explored,
                elapsed: started.elapsed(),
            },
            Err(outcome) => SolverResult {
                outcome,
                solution: Vec::new(),
                solution_weight: C::default(),
                states_explored,
                elapsed: started.elapsed(),
            },
        };

        debug!(
            outcome = ?result.outcome,
            states_explored = result.states_explored,
            discovered = state.vertices.len(),
            elapsed_secs = result.elapsed.as_secs_f64(),
            "A* search finished"
        );

        Ok(AStarSolver { result })
    }

    pub fn outcome(&self) -> SolverOutcome {
        self.result.outcome
    }

    /// Vertices from start to goal; empty unless solved.
    pub fn solution(&self) -> &[V] {
        &self.result.solution
    }

    /// Distance of the goal; see [`SolverResult::solution_weight`].
    pub fn solution_weight(&self) -> C {
        self.result.solution_weight
    }

    /// Number of vertices settled before the search ended, excluding the goal.
    pub fn num_states_explored(&self) -> usize {
        self.result.states_explored
    }

    /// Wall-clock seconds spent in the search.
    pub fn exploration_time(&self) -> f64 {
        self.result.elapsed.as_secs_f64()
    }

    pub fn into_result(self) -> SolverResult<V, C> {
        self.result
    }
}

/// Runs A* from `start` to `goal`. See [`AStarSolver::solve`].
pub fn solve<G>(
    graph: &G,
    start: G::Vertex,
    goal: G::Vertex,
    timeout_secs: f64,
) -> Result<AStarSolver<G::Vertex, G::Cost>, SolveError>
where
    G: AStarGraph + ?Sized,
{
    AStarSolver::solve(graph, start, goal, timeout_secs)
}

/// `None` means no deadline.
fn deadline_from_secs(timeout_secs: f64) -> Result<Option<Duration>, SolveError> {
    if timeout_secs == f64::INFINITY {
        return Ok(None);
    }
    Duration::try_from_secs_f64(timeout_secs)
        .map(Some)
        .map_err(|_| {
            SolveError::InvalidArgument(format!(
                "timeout must be a non-negative number of seconds, got {timeout_secs}"
            ))
        })
}
