//! Error types for queue, graph, solver and seam operations
//!
//! Every failure here is local and synchronous: it is reported to the caller
//! of the offending operation and never retried. Search outcomes such as
//! "no path" or "ran out of time" are not errors; see
//! [`SolverOutcome`](crate::solver::SolverOutcome).

use thiserror::Error;

use crate::solver::SolverOutcome;

/// Error type for priority queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The item is already present in the queue
    #[error("item is already present in the queue")]
    DuplicateItem,
    /// The item is not present in the queue
    #[error("item is not present in the queue")]
    ItemNotFound,
    /// The queue holds no items
    #[error("queue is empty")]
    EmptyQueue,
}

/// Errors raised by a graph while enumerating neighbors or computing weights.
///
/// These are contract violations of the graph collaborator. The solver does
/// not interpret them, it hands them back to its caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A pixel coordinate outside the picture was requested
    #[error("coordinate ({x}, {y}) is outside a {width}x{height} picture")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    /// The graph produced an edge it cannot describe
    #[error("malformed graph: {0}")]
    Malformed(String),
}

/// Errors returned by [`AStarSolver::solve`](crate::solver::AStarSolver::solve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The solver misused its own queue. Indicates a bug, not bad input.
    #[error("internal queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Errors returned by [`SeamCarver`](crate::seam::SeamCarver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeamError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Energy(#[from] GraphError),
    /// The seam search finished without reaching the far edge
    #[error("seam search ended as {0:?}")]
    Unsolved(SolverOutcome),
    #[error("invalid seam: {0}")]
    InvalidSeam(String),
}
