//! Graph interface consumed by the solver
//!
//! Graphs are never materialized for the solver. It asks an [`AStarGraph`]
//! for the outgoing edges of one vertex at a time and for a heuristic
//! estimate toward the goal, so a graph may compute its edges on demand
//! (see [`SeamGraph`](crate::seam::SeamGraph)).
//!
//! [`WeightedDirectedGraph`] is a plain adjacency-list graph for the cases
//! where the edges really are stored.
//!
//! # Example
//!
//! ```rust
//! use rust_astar_search::graph::WeightedDirectedGraph;
//! use rust_astar_search::solver::{AStarSolver, SolverOutcome};
//!
//! let mut graph = WeightedDirectedGraph::new();
//! graph.add_edge('A', 'B', 1u32);
//! graph.add_edge('B', 'C', 2);
//! graph.add_edge('A', 'C', 5);
//!
//! let solver = AStarSolver::solve(&graph, 'A', 'C', 1.0).unwrap();
//! assert_eq!(solver.outcome(), SolverOutcome::Solved);
//! assert_eq!(solver.solution(), &['A', 'B', 'C']);
//! assert_eq!(solver.solution_weight(), 3);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::GraphError;
use crate::traits::Cost;

/// A directed edge to `to` with a non-negative `weight`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightedEdge<V, C> {
    pub to: V,
    pub weight: C,
}

impl<V, C> WeightedEdge<V, C> {
    pub fn new(to: V, weight: C) -> Self {
        WeightedEdge { to, weight }
    }
}

/// Trait for graphs that can be searched with A*.
///
/// Implementations decide what a vertex is and how its edges are found; the
/// solver only hashes and compares vertices.
pub trait AStarGraph {
    /// The vertex type. Cloned into the solver's bookkeeping.
    type Vertex: Clone + Eq + Hash;
    /// Edge weight and heuristic type
    type Cost: Cost;

    /// Returns every outgoing edge of `v`, computed fresh on each call.
    ///
    /// Weights must be non-negative. An edge the graph cannot produce
    /// correctly should be reported as an error, which the solver passes
    /// through to its caller.
    fn neighbors(
        &self,
        v: &Self::Vertex,
    ) -> Result<Vec<WeightedEdge<Self::Vertex, Self::Cost>>, GraphError>;

    /// Estimated cost from `v` to `goal`.
    ///
    /// Must be zero when `v == goal`. For the returned path to be optimal it
    /// must also be consistent: `h(v) <= w(v, u) + h(u)` for every edge. The
    /// solver does not check either property.
    fn estimated_distance_to_goal(&self, v: &Self::Vertex, goal: &Self::Vertex) -> Self::Cost;
}

type Heuristic<V, C> = Box<dyn Fn(&V, &V) -> C + Send + Sync>;

/// Directed graph stored as adjacency lists
///
/// The heuristic is zero unless one is supplied with
/// [`with_heuristic`](WeightedDirectedGraph::with_heuristic), which makes the
/// search behave like Dijkstra's algorithm.
pub struct WeightedDirectedGraph<V, C> {
    adjacency: FxHashMap<V, Vec<WeightedEdge<V, C>>>,
    heuristic: Option<Heuristic<V, C>>,
}

impl<V, C> WeightedDirectedGraph<V, C>
where
    V: Clone + Eq + Hash,
    C: Cost,
{
    /// Creates a graph with no edges.
    pub fn new() -> Self {
        WeightedDirectedGraph {
            adjacency: FxHashMap::default(),
            heuristic: None,
        }
    }

    /// Replaces the heuristic used by
    /// [`estimated_distance_to_goal`](AStarGraph::estimated_distance_to_goal).
    pub fn with_heuristic(mut self, h: impl Fn(&V, &V) -> C + Send + Sync + 'static) -> Self {
        self.heuristic = Some(Box::new(h));
        self
    }

    pub fn add_edge(&mut self, from: V, to: V, weight: C) {
        self.adjacency
            .entry(from)
            .or_default()
            .push(WeightedEdge::new(to, weight));
    }

    pub fn add_undirected_edge(&mut self, a: V, b: V, weight: C) {
        self.add_edge(a.clone(), b.clone(), weight);
        self.add_edge(b, a, weight);
    }

    /// Number of stored edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

impl<V, C> Default for WeightedDirectedGraph<V, C>
where
    V: Clone + Eq + Hash,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> AStarGraph for WeightedDirectedGraph<V, C>
where
    V: Clone + Eq + Hash,
    C: Cost,
{
    type Vertex = V;
    type Cost = C;

    fn neighbors(&self, v: &V) -> Result<Vec<WeightedEdge<V, C>>, GraphError> {
        Ok(self.adjacency.get(v).cloned().unwrap_or_default())
    }

    fn estimated_distance_to_goal(&self, v: &V, goal: &V) -> C {
        match &self.heuristic {
            Some(h) => h(v, goal),
            None => C::default(),
        }
    }
}
