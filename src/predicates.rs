//! Geometric predicates shared by the hull builders.
//!
//! All of these are pure functions of their arguments. Classification against
//! [`EPSILON`](crate::EPSILON) happens at the call sites, not here.

use approx::relative_eq;
use glam::{DVec2, DVec3};

use crate::EPSILON;

/// Gives the orientation of the triangle formed by `a`, `b`, `c`.
///
/// This is twice the signed area of the triangle, `(b - a) × (c - a)`.
///
/// - `orientation > 0`: counterclockwise
/// - `orientation < 0`: clockwise
/// - `orientation == 0`: collinear
#[inline]
pub fn orient2d(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    use robust::Coord;
    robust::orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// Returns the unsigned perpendicular distance from `p` to the line through `a` and `b`.
///
/// Returns `0.0` if `a` and `b` are closer than [`EPSILON`] to each other.
#[inline]
pub fn distance_to_line(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    let length = (b - a).length();
    if length < EPSILON {
        return 0.0;
    }
    orient2d(a, b, p).abs() / length
}

/// Returns the squared distance from `p` to the infinite line through `a` and `b`.
///
/// If the line is degenerate, this is the squared distance from `p` to `a`.
#[inline]
pub fn squared_distance_to_line(a: DVec3, b: DVec3, p: DVec3) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let ab_length_squared = ab.length_squared();

    if ab_length_squared < EPSILON {
        return ap.length_squared();
    }

    ap.cross(ab).length_squared() / ab_length_squared
}

/// An oriented plane `dot(normal, p) + offset == 0` with a unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// The unit normal of the plane.
    pub normal: DVec3,
    /// The offset of the plane, such that `dot(normal, p) + offset == 0` for points on it.
    pub offset: f64,
}

impl Plane {
    /// Computes the plane through the counterclockwise triangle `a`, `b`, `c`.
    ///
    /// The normal follows the right-hand rule. Returns `None` if the triangle
    /// has (almost) no area.
    #[inline]
    pub fn from_triangle(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let scaled_normal = (b - a).cross(c - a);
        let length = scaled_normal.length();

        if relative_eq!(length, 0.0, epsilon = EPSILON) {
            return None;
        }

        let normal = scaled_normal / length;
        Some(Self {
            normal,
            offset: -normal.dot(a),
        })
    }

    /// Returns the signed distance from the plane to `point`.
    ///
    /// The distance is positive on the side the normal points to.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.offset
    }
}
