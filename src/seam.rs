//! Seam carving as a shortest-path problem
//!
//! A seam is a connected line of pixels crossing the picture, one pixel per
//! row (vertical seam) or per column (horizontal seam), where consecutive
//! pixels are at most one position apart. The lowest-energy seam is found by
//! searching [`SeamGraph`], a virtual graph over the pixel grid with a
//! [`SeamVertex::Source`] before the first row/column and a
//! [`SeamVertex::Sink`] after the last one:
//!
//! ```text
//!          Source
//!        /   |   \          edges into a pixel weigh that pixel's energy
//!   (0,0)  (1,0)  (2,0)
//!     | \  / | \  / |
//!   (0,1)  (1,1)  (2,1)
//!        \   |   /          edges into Sink weigh 0
//!           Sink
//! ```
//!
//! The heuristic is zero everywhere, so the search is Dijkstra's algorithm.
//! Edges are computed on demand; nothing proportional to the graph is stored
//! outside the solver.

use std::fmt;

use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::error::{GraphError, SeamError};
use crate::graph::{AStarGraph, WeightedEdge};
use crate::solver::{AStarSolver, SolverOutcome};

/// Time budget for a single seam search.
pub const DEFAULT_SEAM_TIMEOUT_SECS: f64 = 30.0;

/// Read access to an RGB raster
pub trait Picture {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Color at column `x`, row `y`. Callers stay within bounds.
    fn rgb(&self, x: usize, y: usize) -> [u8; 3];
}

/// Row-major RGB picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbPicture {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl RgbPicture {
    /// Creates an all-black picture.
    pub fn new(width: usize, height: usize) -> Self {
        RgbPicture {
            width,
            height,
            pixels: vec![[0; 3]; width * height],
        }
    }

    /// Creates a picture by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        RgbPicture {
            width,
            height,
            pixels,
        }
    }

    pub fn set(&mut self, x: usize, y: usize, rgb: [u8; 3]) -> Result<(), GraphError> {
        self.check_bounds(x, y)?;
        self.pixels[y * self.width + x] = rgb;
        Ok(())
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), GraphError> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(out_of_bounds(self, x as i64, y as i64))
        }
    }
}

impl Picture for RgbPicture {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.width + x]
    }
}

fn out_of_bounds<P: Picture + ?Sized>(picture: &P, x: i64, y: i64) -> GraphError {
    GraphError::OutOfBounds {
        x,
        y,
        width: picture.width(),
        height: picture.height(),
    }
}

fn gradient_squared(a: [u8; 3], b: [u8; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| {
            let d = f64::from(p) - f64::from(q);
            d * d
        })
        .sum()
}

/// Dual-gradient energy of the pixel at `(x, y)`.
///
/// `sqrt(Δx² + Δy²)`, where `Δx²` sums the squared R, G and B differences of
/// the left and right neighbors, and `Δy²` those of the top and bottom
/// neighbors. Neighbors wrap around the picture borders.
pub fn energy<P: Picture + ?Sized>(picture: &P, x: usize, y: usize) -> Result<f64, GraphError> {
    let (width, height) = (picture.width(), picture.height());
    if x >= width || y >= height {
        return Err(out_of_bounds(picture, x as i64, y as i64));
    }
    let left = (x + width - 1) % width;
    let right = (x + 1) % width;
    let top = (y + height - 1) % height;
    let bottom = (y + 1) % height;

    let dx = gradient_squared(picture.rgb(left, y), picture.rgb(right, y));
    let dy = gradient_squared(picture.rgb(x, top), picture.rgb(x, bottom));
    Ok((dx + dy).sqrt())
}

/// Direction a seam runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Top to bottom; one pixel per row, indexed by column
    Vertical,
    /// Left to right; one pixel per column, indexed by row
    Horizontal,
}

impl Orientation {
    /// Number of pixels in a seam of this orientation
    fn length<P: Picture + ?Sized>(self, picture: &P) -> usize {
        match self {
            Orientation::Vertical => picture.height(),
            Orientation::Horizontal => picture.width(),
        }
    }

    /// Number of positions a seam pixel can take
    fn breadth<P: Picture + ?Sized>(self, picture: &P) -> usize {
        match self {
            Orientation::Vertical => picture.width(),
            Orientation::Horizontal => picture.height(),
        }
    }

    /// `(x, y)` of the pixel at `step` along the seam and `offset` across it
    fn coords(self, step: usize, offset: usize) -> (usize, usize) {
        match self {
            Orientation::Vertical => (offset, step),
            Orientation::Horizontal => (step, offset),
        }
    }

    /// Inverse of [`coords`](Self::coords): `(step, offset)`
    fn split(self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Orientation::Vertical => (y, x),
            Orientation::Horizontal => (x, y),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Vertex of a [`SeamGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeamVertex {
    /// Virtual vertex before the first row (or column)
    Source,
    Pixel { x: usize, y: usize },
    /// Virtual vertex after the last row (or column)
    Sink,
}

type SeamEdge = WeightedEdge<SeamVertex, OrderedFloat<f64>>;

/// Lazily generated seam graph over a picture
pub struct SeamGraph<'a, P: ?Sized> {
    picture: &'a P,
    orientation: Orientation,
}

impl<'a, P: Picture + ?Sized> SeamGraph<'a, P> {
    pub fn new(picture: &'a P, orientation: Orientation) -> Self {
        SeamGraph {
            picture,
            orientation,
        }
    }

    /// Edge into the pixel at `step`, `offset`, weighted by its energy.
    fn edge_to(&self, step: usize, offset: usize) -> Result<SeamEdge, GraphError> {
        let (x, y) = self.orientation.coords(step, offset);
        let weight = energy(self.picture, x, y)?;
        Ok(WeightedEdge::new(SeamVertex::Pixel { x, y }, OrderedFloat(weight)))
    }
}

impl<P: Picture + ?Sized> AStarGraph for SeamGraph<'_, P> {
    type Vertex = SeamVertex;
    type Cost = OrderedFloat<f64>;

    fn neighbors(&self, v: &SeamVertex) -> Result<Vec<SeamEdge>, GraphError> {
        let length = self.orientation.length(self.picture);
        let breadth = self.orientation.breadth(self.picture);

        match *v {
            SeamVertex::Source if length == 0 => Ok(Vec::new()),
            SeamVertex::Source => (0..breadth).map(|offset| self.edge_to(0, offset)).collect(),
            SeamVertex::Sink => Ok(Vec::new()),
            SeamVertex::Pixel { x, y } => {
                if x >= self.picture.width() || y >= self.picture.height() {
                    return Err(out_of_bounds(self.picture, x as i64, y as i64));
                }
                let (step, offset) = self.orientation.split(x, y);
                if step + 1 == length {
                    return Ok(vec![WeightedEdge::new(SeamVertex::Sink, OrderedFloat(0.0))]);
                }
                let lo = offset.saturating_sub(1);
                let hi = (offset + 1).min(breadth - 1);
                (lo..=hi).map(|o| self.edge_to(step + 1, o)).collect()
            }
        }
    }

    fn estimated_distance_to_goal(&self, _v: &SeamVertex, _goal: &SeamVertex) -> OrderedFloat<f64> {
        OrderedFloat(0.0)
    }
}

/// A minimum-energy seam
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    pub orientation: Orientation,
    /// Column of each row (vertical) or row of each column (horizontal)
    pub indices: Vec<usize>,
    /// Sum of the energies of the seam's pixels
    pub total_energy: f64,
}

/// Finds and removes minimum-energy seams
#[derive(Debug, Clone)]
pub struct SeamCarver<P> {
    picture: P,
    timeout_secs: f64,
}

impl<P: Picture> SeamCarver<P> {
    pub fn new(picture: P) -> Self {
        SeamCarver {
            picture,
            timeout_secs: DEFAULT_SEAM_TIMEOUT_SECS,
        }
    }

    /// Sets the time budget of each seam search.
    pub fn with_timeout(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn picture(&self) -> &P {
        &self.picture
    }

    pub fn into_picture(self) -> P {
        self.picture
    }

    pub fn width(&self) -> usize {
        self.picture.width()
    }

    pub fn height(&self) -> usize {
        self.picture.height()
    }

    pub fn energy(&self, x: usize, y: usize) -> Result<f64, GraphError> {
        energy(&self.picture, x, y)
    }

    /// Finds the lowest-energy seam running in `orientation`.
    ///
    /// # Errors
    /// [`SeamError::Unsolved`] if the search timed out or the picture is
    /// empty, [`SeamError::Solve`] if the timeout is invalid.
    pub fn find_seam(&self, orientation: Orientation) -> Result<Seam, SeamError> {
        let graph = SeamGraph::new(&self.picture, orientation);
        let solver = AStarSolver::solve(
            &graph,
            SeamVertex::Source,
            SeamVertex::Sink,
            self.timeout_secs,
        )?;

        if solver.outcome() != SolverOutcome::Solved {
            warn!(%orientation, outcome = ?solver.outcome(), "seam search did not finish");
            return Err(SeamError::Unsolved(solver.outcome()));
        }

        let indices = solver
            .solution()
            .iter()
            .filter_map(|v| match *v {
                SeamVertex::Pixel { x, y } => Some(orientation.split(x, y).1),
                _ => None,
            })
            .collect::<Vec<_>>();
        let total_energy = solver.solution_weight().into_inner();

        debug!(
            %orientation,
            total_energy,
            states_explored = solver.num_states_explored(),
            "found seam"
        );

        Ok(Seam {
            orientation,
            indices,
            total_energy,
        })
    }

    /// Column index of each row, top to bottom.
    pub fn find_vertical_seam(&self) -> Result<Vec<usize>, SeamError> {
        self.find_seam(Orientation::Vertical).map(|seam| seam.indices)
    }

    /// Row index of each column, left to right.
    pub fn find_horizontal_seam(&self) -> Result<Vec<usize>, SeamError> {
        self.find_seam(Orientation::Horizontal).map(|seam| seam.indices)
    }

    /// Checks that `seam` is a connected seam of `orientation` that can be
    /// removed from the current picture.
    pub fn validate_seam(&self, orientation: Orientation, seam: &[usize]) -> Result<(), SeamError> {
        let length = orientation.length(&self.picture);
        let breadth = orientation.breadth(&self.picture);

        if breadth <= 1 {
            return Err(SeamError::InvalidSeam(format!(
                "picture is too small to remove a {orientation} seam"
            )));
        }
        if seam.len() != length {
            return Err(SeamError::InvalidSeam(format!(
                "expected {length} entries, got {}",
                seam.len()
            )));
        }
        if let Some(&bad) = seam.iter().find(|&&i| i >= breadth) {
            return Err(SeamError::InvalidSeam(format!(
                "index {bad} is outside 0..{breadth}"
            )));
        }
        if let Some(w) = seam.windows(2).find(|w| w[0].abs_diff(w[1]) > 1) {
            return Err(SeamError::InvalidSeam(format!(
                "entries {} and {} are not adjacent",
                w[0], w[1]
            )));
        }
        Ok(())
    }
}

impl SeamCarver<RgbPicture> {
    /// Removes one pixel from every row, narrowing the picture by one.
    pub fn remove_vertical_seam(&mut self, seam: &[usize]) -> Result<(), SeamError> {
        self.remove_seam(Orientation::Vertical, seam)
    }

    /// Removes one pixel from every column, shortening the picture by one.
    pub fn remove_horizontal_seam(&mut self, seam: &[usize]) -> Result<(), SeamError> {
        self.remove_seam(Orientation::Horizontal, seam)
    }

    fn remove_seam(&mut self, orientation: Orientation, seam: &[usize]) -> Result<(), SeamError> {
        self.validate_seam(orientation, seam)?;
        let old = &self.picture;
        let carved = match orientation {
            Orientation::Vertical => RgbPicture::from_fn(old.width - 1, old.height, |x, y| {
                let skip = usize::from(x >= seam[y]);
                old.rgb(x + skip, y)
            }),
            Orientation::Horizontal => RgbPicture::from_fn(old.width, old.height - 1, |x, y| {
                let skip = usize::from(y >= seam[x]);
                old.rgb(x, y + skip)
            }),
        };
        self.picture = carved;
        Ok(())
    }
}
