use glam::DVec2;

use crate::{
    buffer::{self, HullError},
    predicates::{distance_to_line, orient2d},
    EPSILON,
};

/// A 2D [convex hull] representing the smallest convex set containing
/// all input points in a given point set.
///
/// The hull is stored as indices into the input point set, in counterclockwise
/// order (with the y-axis pointing up), starting at the leftmost point.
///
/// [convex hull]: https://en.wikipedia.org/wiki/Convex_hull
///
/// # Example
///
/// ```
/// use hullkit::ConvexHull2d;
/// use glam::DVec2;
///
/// let points = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(0.0, 1.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.5, 0.5),
/// ];
///
/// // Create the convex hull.
/// let hull = ConvexHull2d::from_points(&points);
///
/// // The interior point is not part of the hull.
/// assert_eq!(hull.indices(), &[0, 1, 3, 2]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHull2d {
    indices: Vec<u32>,
    points: Vec<DVec2>,
}

/// A sub-problem of the subdivision: the points strictly outside the directed
/// hull edge `p1 -> p2`, and where a new vertex between them goes in the hull.
struct Frame {
    p1: u32,
    p2: u32,
    candidates: Vec<u32>,
    insert_at: usize,
}

impl ConvexHull2d {
    /// Computes a [`ConvexHull2d`] for the given set of 2D points.
    ///
    /// - Fewer than 3 points are returned as they are, in input order.
    /// - If all points share the same `x` coordinate (within [`EPSILON`]),
    ///   the hull collapses to the single leftmost point.
    /// - Points on a hull edge (within [`EPSILON`]) are not hull vertices.
    pub fn from_points(points: &[DVec2]) -> Self {
        debug_assert!(u32::try_from(points.len()).is_ok());

        if points.len() < 3 {
            return Self::trivial_hull(points);
        }

        // Find the points with minimum and maximum `x` coordinates.
        // The first point wins ties. Non-finite points are never extremes.
        let (left, right) = {
            let first = points.iter().position(|point| point.is_finite()).unwrap_or(0);
            let (mut min_index, mut max_index) = (first, first);
            for (i, point) in points.iter().enumerate().skip(first + 1) {
                if !point.is_finite() {
                    continue;
                }
                if point.x < points[min_index].x {
                    min_index = i;
                }
                if point.x > points[max_index].x {
                    max_index = i;
                }
            }
            (min_index, max_index)
        };

        if left == right || (points[right].x - points[left].x).abs() < EPSILON {
            log::debug!("all {} points share the same x, collapsing the hull", points.len());
            return Self::with_indices(points, vec![left as u32]);
        }

        // Split the rest by the side of the line `left, right` they lie on.
        // Points on the line can never be hull vertices.
        let mut upper = Vec::new();
        let mut lower = Vec::new();
        for (i, point) in points.iter().enumerate() {
            if i == left || i == right {
                continue;
            }
            let orientation = orient2d(points[left], points[right], *point);
            if orientation > EPSILON {
                upper.push(i as u32);
            } else if orientation < -EPSILON {
                lower.push(i as u32);
            }
        }

        // Walk counterclockwise: below the line from left to right, then back above it.
        let mut hull = vec![left as u32];
        Self::hull_chain(points, left as u32, right as u32, lower, &mut hull);
        hull.push(right as u32);
        Self::hull_chain(points, right as u32, left as u32, upper, &mut hull);

        Self::with_indices(points, hull)
    }

    /// Computes a [`ConvexHull2d`] for a flat buffer of 2D points, `[x0, y0, x1, y1, ...]`.
    ///
    /// # Errors
    ///
    /// Returns a [`HullError`] if the buffer does not hold a whole number of points.
    pub fn try_from_flat(points: &[f64]) -> Result<Self, HullError> {
        let points = buffer::points_2d(points)?;
        Ok(Self::from_points(&points))
    }

    /// Returns the indices of the hull vertices in counterclockwise order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the indices of the hull vertices in counterclockwise order.
    ///
    /// This consumes the convex hull.
    #[inline]
    pub fn into_indices(self) -> Vec<u32> {
        self.indices
    }

    /// Returns the hull vertices in counterclockwise order.
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Returns the number of hull vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the hull has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Computes the area enclosed by the hull.
    ///
    /// Hulls with fewer than 3 vertices have no area.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }

        let twice_area: f64 = self
            .points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| a.perp_dot(*b))
            .sum();

        0.5 * twice_area
    }

    fn trivial_hull(points: &[DVec2]) -> Self {
        Self::with_indices(points, (0..points.len() as u32).collect())
    }

    fn with_indices(points: &[DVec2], indices: Vec<u32>) -> Self {
        let points = indices.iter().map(|&i| points[i as usize]).collect();
        Self { indices, points }
    }

    /// Finds the hull vertices strictly outside the directed edge `p1 -> p2`
    /// and splices them into `hull`, in order, after the current end of `hull`.
    ///
    /// The subdivision uses an explicit stack of frames instead of recursion.
    fn hull_chain(points: &[DVec2], p1: u32, p2: u32, candidates: Vec<u32>, hull: &mut Vec<u32>) {
        if candidates.is_empty() {
            return;
        }

        let mut stack = vec![Frame {
            p1,
            p2,
            candidates,
            insert_at: hull.len(),
        }];

        while let Some(Frame {
            p1,
            p2,
            candidates,
            insert_at,
        }) = stack.pop()
        {
            let a = points[p1 as usize];
            let b = points[p2 as usize];

            let Some(apex) = furthest_from_line(points, a, b, &candidates) else {
                continue;
            };
            let c = points[apex as usize];

            // Whatever is outside neither new edge is inside the triangle `a, c, b`.
            let mut left = Vec::new();
            let mut right = Vec::new();
            for &i in &candidates {
                if i == apex {
                    continue;
                }
                let point = points[i as usize];
                if orient2d(a, c, point) < -EPSILON {
                    left.push(i);
                } else if orient2d(c, b, point) < -EPSILON {
                    right.push(i);
                }
            }

            hull.insert(insert_at, apex);

            // The right side is resolved first. It only inserts after `apex`,
            // so `insert_at` stays valid for the left side.
            if !left.is_empty() {
                stack.push(Frame {
                    p1,
                    p2: apex,
                    candidates: left,
                    insert_at,
                });
            }
            if !right.is_empty() {
                stack.push(Frame {
                    p1: apex,
                    p2,
                    candidates: right,
                    insert_at: insert_at + 1,
                });
            }
        }
    }
}

/// Returns the candidate furthest from the line through `a` and `b`,
/// or `None` if no candidate is more than [`EPSILON`] away from it.
/// The first candidate wins ties.
fn furthest_from_line(points: &[DVec2], a: DVec2, b: DVec2, candidates: &[u32]) -> Option<u32> {
    let mut furthest = None;
    let mut max_distance = EPSILON;

    for &i in candidates {
        let distance = distance_to_line(a, b, points[i as usize]);
        if distance > max_distance {
            max_distance = distance;
            furthest = Some(i);
        }
    }

    furthest
}
