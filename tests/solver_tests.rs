//! Comprehensive tests for the A* solver
//!
//! Tests cover:
//! - Basic functionality with and without a heuristic
//! - Edge cases (start equals goal, unreachable goals, cycles, timeouts)
//! - Correctness (optimal paths that need a priority decrease)
//! - Optimality against exhaustive search on small graphs
//! - Independent solves on several threads

use rust_astar_search::graph::{AStarGraph, WeightedDirectedGraph, WeightedEdge};
use rust_astar_search::solver::{solve, AStarSolver, SolverOutcome};
use rust_astar_search::{GraphError, SolveError};

// ============================================================================
// Test Graph Types
// ============================================================================

/// Numbers 0..=limit where each vertex steps to the next at cost 1
struct LineGraph {
    limit: u32,
}

impl AStarGraph for LineGraph {
    type Vertex = u32;
    type Cost = u32;

    fn neighbors(&self, v: &u32) -> Result<Vec<WeightedEdge<u32, u32>>, GraphError> {
        if *v < self.limit {
            Ok(vec![WeightedEdge::new(v + 1, 1)])
        } else {
            Ok(vec![])
        }
    }

    fn estimated_distance_to_goal(&self, _v: &u32, _goal: &u32) -> u32 {
        0
    }
}

/// Bounded 4-connected grid, optionally guided by Manhattan distance
struct Grid2D {
    size: i32,
    manhattan: bool,
}

impl Grid2D {
    fn dijkstra(size: i32) -> Self {
        Grid2D {
            size,
            manhattan: false,
        }
    }

    fn astar(size: i32) -> Self {
        Grid2D {
            size,
            manhattan: true,
        }
    }
}

impl AStarGraph for Grid2D {
    type Vertex = (i32, i32);
    type Cost = u32;

    fn neighbors(&self, &(x, y): &(i32, i32)) -> Result<Vec<WeightedEdge<(i32, i32), u32>>, GraphError> {
        let directions = [(0, 1), (0, -1), (1, 0), (-1, 0)];
        Ok(directions
            .iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| nx >= 0 && nx < self.size && ny >= 0 && ny < self.size)
            .map(|p| WeightedEdge::new(p, 1))
            .collect())
    }

    fn estimated_distance_to_goal(&self, v: &(i32, i32), goal: &(i32, i32)) -> u32 {
        if self.manhattan {
            v.0.abs_diff(goal.0) + v.1.abs_diff(goal.1)
        } else {
            0
        }
    }
}

fn char_graph(edges: &[(char, char, u32)]) -> WeightedDirectedGraph<char, u32> {
    let mut graph = WeightedDirectedGraph::new();
    for &(from, to, weight) in edges {
        graph.add_edge(from, to, weight);
    }
    graph
}

// ============================================================================
// Grid Tests - With and Without Heuristic
// ============================================================================

macro_rules! test_grid_search {
    ($constructor:ident, $test_name:ident) => {
        mod $test_name {
            use super::*;

            #[test]
            fn corner_to_corner() {
                let solver = solve(&Grid2D::$constructor(10), (0, 0), (9, 9), 10.0).unwrap();
                assert_eq!(solver.outcome(), SolverOutcome::Solved);
                assert_eq!(solver.solution_weight(), 18);
                assert_eq!(solver.solution().len(), 19);
                assert_eq!(solver.solution()[0], (0, 0));
                assert_eq!(*solver.solution().last().unwrap(), (9, 9));
            }

            #[test]
            fn same_start_and_goal() {
                let solver = solve(&Grid2D::$constructor(10), (5, 5), (5, 5), 10.0).unwrap();
                assert_eq!(solver.outcome(), SolverOutcome::Solved);
                assert_eq!(solver.solution(), &[(5, 5)]);
                assert_eq!(solver.solution_weight(), 0);
            }

            #[test]
            fn adjacent_vertices() {
                let solver = solve(&Grid2D::$constructor(10), (5, 5), (6, 5), 10.0).unwrap();
                assert_eq!(solver.solution(), &[(5, 5), (6, 5)]);
                assert_eq!(solver.solution_weight(), 1);
            }

            #[test]
            fn goal_outside_grid() {
                let solver = solve(&Grid2D::$constructor(4), (0, 0), (7, 7), 10.0).unwrap();
                assert_eq!(solver.outcome(), SolverOutcome::Unsolvable);
                assert!(solver.solution().is_empty());
                assert_eq!(solver.num_states_explored(), 16);
            }

            #[test]
            fn path_is_contiguous() {
                let solver = solve(&Grid2D::$constructor(8), (0, 7), (7, 0), 10.0).unwrap();
                for pair in solver.solution().windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
                }
            }
        }
    };
}

test_grid_search!(dijkstra, grid_dijkstra);
test_grid_search!(astar, grid_astar);

#[test]
fn test_heuristic_reduces_exploration() {
    let blind = solve(&Grid2D::dijkstra(30), (0, 0), (29, 0), 10.0).unwrap();
    let guided = solve(&Grid2D::astar(30), (0, 0), (29, 0), 10.0).unwrap();
    assert_eq!(blind.solution_weight(), guided.solution_weight());
    assert!(guided.num_states_explored() < blind.num_states_explored());
}

// ============================================================================
// Outcome Tests
// ============================================================================

#[test]
fn test_line_graph_path() {
    let graph = char_graph(&[('A', 'B', 1), ('B', 'C', 1), ('C', 'D', 1)]);
    let result = solve(&graph, 'A', 'D', 10.0).unwrap().into_result();
    assert_eq!(result.outcome, SolverOutcome::Solved);
    assert_eq!(result.solution, vec!['A', 'B', 'C', 'D']);
    assert_eq!(result.solution_weight, 3);
}

#[test]
fn test_disconnected_three_vertices() {
    let graph = char_graph(&[('A', 'B', 1), ('C', 'B', 1)]);
    let solver = solve(&graph, 'A', 'C', 10.0).unwrap();
    assert_eq!(solver.outcome(), SolverOutcome::Unsolvable);
    assert!(solver.solution().is_empty());
    assert_eq!(solver.num_states_explored(), 2);
}

#[test]
fn test_zero_timeout_never_unsolvable() {
    let graph = char_graph(&[('A', 'B', 1)]);
    let solver = solve(&graph, 'A', 'B', 0.0).unwrap();
    assert!(matches!(
        solver.outcome(),
        SolverOutcome::Solved | SolverOutcome::TimedOut
    ));
}

#[test]
fn test_timeout_on_unbounded_graph() {
    let graph = LineGraph { limit: u32::MAX };
    let solver = solve(&graph, 0, u32::MAX, 0.05).unwrap();
    assert_eq!(solver.outcome(), SolverOutcome::TimedOut);
    assert!(solver.solution().is_empty());
    assert!(solver.num_states_explored() > 0);
    assert!(solver.exploration_time() >= 0.05);
}

#[test]
fn test_negative_timeout_is_rejected() {
    let graph = LineGraph { limit: 10 };
    let err = AStarSolver::solve(&graph, 0, 5, -0.5).unwrap_err();
    assert!(matches!(err, SolveError::InvalidArgument(_)));
}

#[test]
fn test_large_linear_graph() {
    let graph = LineGraph { limit: 1000 };
    let solver = solve(&graph, 0, 999, 10.0).unwrap();
    assert_eq!(solver.solution_weight(), 999);
    assert_eq!(solver.solution().len(), 1000);
    assert_eq!(solver.num_states_explored(), 999);
}

// ============================================================================
// Priority Decrease Correctness Tests
// ============================================================================

//     0 --100--> 2
//     |          ^
//     1          10
//     v          |
//     1 ---------+
//     |
//     1
//     v
//     3 ---1---> 4
fn decrease_graph() -> WeightedDirectedGraph<u32, u32> {
    let mut graph = WeightedDirectedGraph::new();
    graph.add_edge(0, 1, 1);
    graph.add_edge(0, 2, 100);
    graph.add_edge(1, 2, 10);
    graph.add_edge(1, 3, 1);
    graph.add_edge(3, 4, 1);
    graph
}

#[test]
fn test_decrease_optimal_path() {
    let solver = solve(&decrease_graph(), 0, 2, 10.0).unwrap();
    // Optimal is 0->1->2 = 11, not 0->2 = 100
    assert_eq!(solver.solution_weight(), 11);
    assert_eq!(solver.solution(), &[0, 1, 2]);
}

#[test]
fn test_decrease_longer_optimal_path() {
    let solver = solve(&decrease_graph(), 0, 4, 10.0).unwrap();
    assert_eq!(solver.solution_weight(), 3);
    assert_eq!(solver.solution(), &[0, 1, 3, 4]);
}

#[test]
fn test_cycle_in_graph() {
    let graph = char_graph(&[
        ('A', 'B', 1),
        ('B', 'C', 1),
        ('C', 'A', 1),
        ('C', 'D', 1),
    ]);
    let solver = solve(&graph, 'A', 'D', 10.0).unwrap();
    assert_eq!(solver.solution_weight(), 3);
    assert_eq!(solver.solution(), &['A', 'B', 'C', 'D']);
}

#[test]
fn test_multiple_paths_same_cost() {
    let graph = char_graph(&[('A', 'B', 1), ('A', 'C', 1), ('B', 'D', 1), ('C', 'D', 1)]);
    let solver = solve(&graph, 'A', 'D', 10.0).unwrap();
    assert_eq!(solver.solution_weight(), 2);
    assert_eq!(solver.solution().len(), 3);
}

#[test]
fn test_inconsistent_heuristic_is_not_corrected() {
    // h(B) overestimates, so the goal is reached through the expensive edge
    // before the cheaper route through B is ever expanded.
    let graph = char_graph(&[('A', 'B', 1), ('A', 'C', 4), ('B', 'C', 1), ('C', 'D', 1)])
        .with_heuristic(|v: &char, _goal: &char| if *v == 'B' { 10 } else { 0 });
    let solver = solve(&graph, 'A', 'D', 10.0).unwrap();
    assert_eq!(solver.outcome(), SolverOutcome::Solved);
    assert_eq!(solver.solution(), &['A', 'C', 'D']);
    assert_eq!(solver.solution_weight(), 5);
}

#[test]
fn test_settled_vertex_record_is_rewired_without_requeue() {
    // C is settled at distance 5 before B (h = 5) is expanded. Relaxing
    // B -> C then rewires C's predecessor to B, but C is not queued again,
    // so D keeps the distance it got through the old route.
    let graph = char_graph(&[('A', 'B', 1), ('A', 'C', 5), ('B', 'C', 1), ('C', 'D', 10)])
        .with_heuristic(|v: &char, _goal: &char| if *v == 'B' { 5 } else { 0 });
    let solver = solve(&graph, 'A', 'D', 10.0).unwrap();

    assert_eq!(solver.outcome(), SolverOutcome::Solved);
    assert_eq!(solver.num_states_explored(), 3);
    assert_eq!(solver.solution(), &['A', 'B', 'C', 'D']);
    assert_eq!(solver.solution_weight(), 15);

    let walked: u32 = [1, 1, 10].iter().sum();
    assert_ne!(walked, solver.solution_weight());
}

// ============================================================================
// Optimality Against Exhaustive Search
// ============================================================================

/// Cheapest simple path by trying every one. Only for tiny graphs.
fn exhaustive_shortest(edges: &[(u8, u8, u32)], start: u8, goal: u8) -> Option<u32> {
    fn walk(edges: &[(u8, u8, u32)], at: u8, goal: u8, seen: &mut Vec<u8>, cost: u32, best: &mut Option<u32>) {
        if at == goal {
            *best = Some(best.map_or(cost, |b| b.min(cost)));
            return;
        }
        for &(from, to, weight) in edges {
            if from == at && !seen.contains(&to) {
                seen.push(to);
                walk(edges, to, goal, seen, cost + weight, best);
                seen.pop();
            }
        }
    }
    let mut best = None;
    walk(edges, start, goal, &mut vec![start], 0, &mut best);
    best
}

#[test]
fn test_matches_exhaustive_search_on_fixed_graphs() {
    let graphs: [&[(u8, u8, u32)]; 3] = [
        &[(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 1), (2, 3, 5)],
        &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (0, 3, 2), (3, 4, 7), (2, 4, 3)],
        &[(0, 1, 0), (1, 0, 0), (1, 2, 9), (0, 2, 9), (2, 3, 0)],
    ];
    for edges in graphs {
        let mut graph = WeightedDirectedGraph::new();
        for &(from, to, weight) in edges {
            graph.add_edge(from, to, weight);
        }
        for goal in 0..5u8 {
            let solver = solve(&graph, 0, goal, 10.0).unwrap();
            match exhaustive_shortest(edges, 0, goal) {
                Some(cost) => {
                    assert_eq!(solver.outcome(), SolverOutcome::Solved);
                    assert_eq!(solver.solution_weight(), cost);
                }
                None => assert_eq!(solver.outcome(), SolverOutcome::Unsolvable),
            }
        }
    }
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_independent_solves_on_threads() {
    let graph = Grid2D::astar(20);
    let costs: Vec<u32> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let graph = &graph;
                s.spawn(move || solve(graph, (0, 0), (19, i * 5), 10.0).unwrap().solution_weight())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(costs, vec![19, 24, 29, 34]);
}

// ============================================================================
// Error Propagation
// ============================================================================

struct DanglingGraph;

impl AStarGraph for DanglingGraph {
    type Vertex = u32;
    type Cost = u32;

    fn neighbors(&self, v: &u32) -> Result<Vec<WeightedEdge<u32, u32>>, GraphError> {
        if *v < 3 {
            Ok(vec![WeightedEdge::new(v + 1, 1)])
        } else {
            Err(GraphError::Malformed(format!("edge out of {v} has no target")))
        }
    }

    fn estimated_distance_to_goal(&self, _v: &u32, _goal: &u32) -> u32 {
        0
    }
}

#[test]
fn test_graph_error_is_returned_unchanged() {
    let err = solve(&DanglingGraph, 0, 10, 10.0).unwrap_err();
    assert_eq!(
        err,
        SolveError::Graph(GraphError::Malformed("edge out of 3 has no target".into()))
    );
}
