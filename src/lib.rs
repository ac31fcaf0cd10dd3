//! # Hullkit
//!
//! Convex hulls of 2D and 3D point sets stored in flat coordinate buffers,
//! computed with the Quickhull algorithm.
//!
//! - [`planar_hull`] takes `[x0, y0, x1, y1, ...]` and returns the indices of the hull
//!   vertices in counterclockwise order.
//! - [`spatial_hull`] takes `[x0, y0, z0, x1, ...]` and returns a flat triangle index
//!   buffer whose triangles are counterclockwise when seen from outside.
//!
//! [`ConvexHull2d`] and [`ConvexHull3d`] expose the same algorithms over [`glam`] vectors,
//! along with a few queries on the resulting hulls.
//!
//! ## Numeric policy
//!
//! All geometric tests use the absolute tolerance [`EPSILON`]. A point must be more than
//! `EPSILON` away from an edge or face to count as outside it, so points on or very near
//! the boundary never become hull vertices. The tolerance does not scale with the
//! input, so very large or very small coordinates may want normalizing first.
//!
//! Degenerate point sets are not errors. Too few points, or points that are all on one
//! line or plane, produce an empty 3D hull, see [`ConvexHull3d::degeneracy`].
//!
//! ## References
//!
//! - C. Bradford Barber et al. 1996. [The Quickhull Algorithm for Convex Hulls](https://www.cise.ufl.edu/~ungor/courses/fall06/papers/QuickHull.pdf) (the original paper)
//! - Dirk Gregorius. GDC 2014. [Physics for Game Programmers: Implementing Quickhull](https://archive.org/details/GDC2014Gregorius)

#![warn(missing_docs)]

mod buffer;
mod dim2;
mod dim3;
mod fixed_hasher;
pub mod predicates;

pub use buffer::HullError;
pub use dim2::ConvexHull2d;
pub use dim3::{ConvexHull3d, DegenerateInput};

/// The absolute tolerance used by every geometric test.
pub const EPSILON: f64 = 1e-12;

/// The tolerance for ray casts against the triangles of a hull.
pub const RAY_EPSILON: f64 = 1e-8;

/// Computes the 2D convex hull of a flat buffer `[x0, y0, x1, y1, ...]`.
///
/// Returns the indices of the hull vertices in counterclockwise order, starting at
/// the point with the smallest `x` coordinate. Fewer than three points are returned
/// as they are, and points that all share one `x` coordinate collapse to a single index.
///
/// # Errors
///
/// Returns a [`HullError`] if the buffer length is odd or the buffer holds
/// more points than `u32` can index.
///
/// # Example
///
/// ```
/// let points = [0.0, 0.0, 1.0, 0.0, 2.0, 0.0];
/// assert_eq!(hullkit::planar_hull(&points), Ok(vec![0, 2]));
/// ```
pub fn planar_hull(points: &[f64]) -> Result<Vec<u32>, HullError> {
    ConvexHull2d::try_from_flat(points).map(ConvexHull2d::into_indices)
}

/// Computes the 3D convex hull of a flat buffer `[x0, y0, z0, x1, ...]`.
///
/// Returns a flat index buffer where every three indices form a triangle,
/// counterclockwise when seen from outside the hull. The buffer is empty
/// if the points do not span a volume.
///
/// # Errors
///
/// Returns a [`HullError`] if the buffer length is not a multiple of three or
/// the buffer holds more points than `u32` can index.
///
/// # Example
///
/// ```
/// let points = [
///     0.0, 0.0, 0.0,
///     1.0, 0.0, 0.0,
///     0.0, 1.0, 0.0,
///     0.0, 0.0, 1.0,
/// ];
/// let indices = hullkit::spatial_hull(&points).unwrap();
/// assert_eq!(indices.len(), 12);
///
/// assert_eq!(hullkit::spatial_hull(&points[..9]), Ok(vec![]));
/// ```
pub fn spatial_hull(points: &[f64]) -> Result<Vec<u32>, HullError> {
    ConvexHull3d::try_from_flat(points, None).map(|hull| hull.flat_indices())
}
