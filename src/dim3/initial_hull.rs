use glam::DVec3;

use crate::{
    dim3::face::{Face, PointId},
    predicates::{squared_distance_to_line, Plane},
    EPSILON,
};

/// The reason a point set has no 3D convex hull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DegenerateInput {
    /// There are fewer than four points.
    TooFewPoints,
    /// The input points are approximately equal.
    Coincident,
    /// The input points are approximately on the same line.
    Collinear,
    /// The input points are approximately on the same plane.
    Coplanar,
}

impl core::fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DegenerateInput::TooFewPoints => write!(f, "fewer than four points"),
            DegenerateInput::Coincident => write!(f, "coincident points"),
            DegenerateInput::Collinear => write!(f, "collinear points"),
            DegenerateInput::Coplanar => write!(f, "coplanar points"),
        }
    }
}

/// Returns the indices of the points with the minimum and maximum `x`, `y` and `z`
/// coordinates, in the order `[min_x, max_x, min_y, max_y, min_z, max_z]`.
///
/// The first point wins ties. Non-finite points are skipped, and if no point
/// is finite every extreme is the first point.
fn compute_extremes(points: &[DVec3]) -> [usize; 6] {
    let first = points.iter().position(|point| point.is_finite()).unwrap_or(0);
    let mut extremes = [first; 6];

    for (i, point) in points.iter().enumerate().skip(first + 1) {
        if !point.is_finite() {
            continue;
        }
        for axis in 0..3 {
            if point[axis] < points[extremes[2 * axis]][axis] {
                extremes[2 * axis] = i;
            }
            if point[axis] > points[extremes[2 * axis + 1]][axis] {
                extremes[2 * axis + 1] = i;
            }
        }
    }

    extremes
}

/// Computes the indices of the initial tetrahedron.
///
/// 1. The two axis-extreme points furthest apart.
/// 2. The point furthest from the line through them.
/// 3. The point furthest from the plane through all three.
pub fn init_tetrahedron_indices(points: &[DVec3]) -> Result<[usize; 4], DegenerateInput> {
    if points.len() < 4 {
        return Err(DegenerateInput::TooFewPoints);
    }

    let extremes = compute_extremes(points);

    let (mut v0, mut v1) = (0, 1);
    let mut max_distance = 0.0;
    for (i, &a) in extremes.iter().enumerate() {
        for &b in &extremes[i + 1..] {
            let distance = points[a].distance_squared(points[b]);
            if distance > max_distance {
                max_distance = distance;
                (v0, v1) = (a, b);
            }
        }
    }

    if max_distance < EPSILON {
        return Err(DegenerateInput::Coincident);
    }

    let mut v2 = None;
    let mut max_distance = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i == v0 || i == v1 {
            continue;
        }
        let distance = squared_distance_to_line(points[v0], points[v1], *point);
        if distance > max_distance {
            max_distance = distance;
            v2 = Some(i);
        }
    }

    let Some(v2) = v2.filter(|_| max_distance >= EPSILON) else {
        return Err(DegenerateInput::Collinear);
    };

    let Some(plane) = Plane::from_triangle(points[v0], points[v1], points[v2]) else {
        return Err(DegenerateInput::Collinear);
    };

    let mut v3 = None;
    let mut max_distance = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i == v0 || i == v1 || i == v2 {
            continue;
        }
        let distance = plane.signed_distance(*point).abs();
        if distance > max_distance {
            max_distance = distance;
            v3 = Some(i);
        }
    }

    let Some(v3) = v3.filter(|_| max_distance >= EPSILON) else {
        return Err(DegenerateInput::Coplanar);
    };

    Ok([v0, v1, v2, v3])
}

/// Builds the four outward-facing faces of the initial tetrahedron and
/// distributes the remaining points among their outside sets.
///
/// Each point goes to the first face it is strictly in front of.
/// Points in front of no face are inside the tetrahedron and dropped.
pub fn init_tetrahedron(points: &[DVec3]) -> Result<Vec<Face>, DegenerateInput> {
    let [v0, v1, v2, v3] = init_tetrahedron_indices(points)?;

    let plane = Plane::from_triangle(points[v0], points[v1], points[v2])
        .ok_or(DegenerateInput::Collinear)?;

    // Wind every face so that its normal points away from the opposite vertex.
    let triangles = if plane.signed_distance(points[v3]) < 0.0 {
        [[v0, v1, v2], [v3, v1, v0], [v3, v2, v1], [v3, v0, v2]]
    } else {
        [[v0, v2, v1], [v3, v0, v1], [v3, v1, v2], [v3, v2, v0]]
    };

    let mut faces: Vec<Face> = triangles
        .iter()
        .map(|triangle| Face::from_triangle(points, triangle.map(|i| PointId(i as u32))))
        .collect();

    for i in 0..points.len() {
        if i == v0 || i == v1 || i == v2 || i == v3 {
            continue;
        }

        let id = PointId(i as u32);
        for face in faces.iter_mut() {
            if face.try_add_outside_point(id, points) {
                break;
            }
        }
    }

    Ok(faces)
}
