//! Flat coordinate buffers, `[x0, y0, x1, y1, ...]` or `[x0, y0, z0, x1, ...]`.

use glam::{DVec2, DVec3};
use thiserror::Error;

/// An error returned when a flat coordinate buffer cannot be read as a point set.
///
/// Degenerate geometry is never an error; see [`ConvexHull3d::degeneracy`](crate::ConvexHull3d::degeneracy).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HullError {
    /// The buffer length is not a multiple of the point stride.
    #[error("buffer of length {len} does not hold a whole number of {stride}D points")]
    RaggedBuffer {
        /// The length of the buffer.
        len: usize,
        /// The number of coordinates per point.
        stride: usize,
    },
    /// The buffer holds more points than a `u32` index can address.
    #[error("{0} points cannot be addressed with 32-bit indices")]
    TooManyPoints(usize),
}

/// Checks that `buffer` holds a whole number of points with `stride` coordinates
/// each and returns the number of points.
fn point_count(buffer: &[f64], stride: usize) -> Result<usize, HullError> {
    if buffer.len() % stride != 0 {
        return Err(HullError::RaggedBuffer {
            len: buffer.len(),
            stride,
        });
    }

    let count = buffer.len() / stride;
    if u32::try_from(count).is_err() {
        return Err(HullError::TooManyPoints(count));
    }

    Ok(count)
}

/// Reads a flat buffer with stride 2 as 2D points.
pub(crate) fn points_2d(buffer: &[f64]) -> Result<Vec<DVec2>, HullError> {
    let count = point_count(buffer, 2)?;
    let mut points = Vec::with_capacity(count);
    points.extend(buffer.chunks_exact(2).map(DVec2::from_slice));
    Ok(points)
}

/// Reads a flat buffer with stride 3 as 3D points.
pub(crate) fn points_3d(buffer: &[f64]) -> Result<Vec<DVec3>, HullError> {
    let count = point_count(buffer, 3)?;
    let mut points = Vec::with_capacity(count);
    points.extend(buffer.chunks_exact(3).map(DVec3::from_slice));
    Ok(points)
}
