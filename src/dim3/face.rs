use glam::DVec3;

use crate::{predicates::Plane, EPSILON};

/// The index of a point in the input point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u32);

impl PointId {
    /// Returns the underlying index of the point as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The index of a [`Face`] in the face arena of a hull under construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub u32);

impl FaceId {
    /// Returns the underlying index of the face as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A triangular face of a [`ConvexHull3d`](crate::ConvexHull3d) under construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Whether the face is still part of the hull (not deleted).
    pub(crate) valid: bool,
    /// The points of the face, counterclockwise when seen from outside.
    pub(crate) points: [PointId; 3],
    /// The outward unit normal, or zero if the face is affinely dependent.
    pub(crate) normal: DVec3,
    /// The plane offset, such that `normal.dot(p) + offset == 0` on the face plane.
    pub(crate) offset: f64,
    /// Whether the points of the face lie on a single line or point.
    pub(crate) affinely_dependent: bool,
    /// The points strictly in front of the face plane that no other face owns.
    pub(crate) outside_points: Vec<PointId>,
    /// The identifier and distance of the furthest outside point, if any.
    pub(crate) furthest_outside_point: Option<(PointId, f64)>,
}

impl Face {
    /// Creates a [`Face`] using the `points` with the given `indices`.
    #[inline]
    pub fn from_triangle(points: &[DVec3], indices: [PointId; 3]) -> Self {
        let [a, b, c] = indices.map(|id| points[id.index()]);
        let plane = Plane::from_triangle(a, b, c);

        Self {
            valid: true,
            points: indices,
            normal: plane.map_or(DVec3::ZERO, |plane| plane.normal),
            offset: plane.map_or(0.0, |plane| plane.offset),
            affinely_dependent: plane.is_none(),
            outside_points: Vec::new(),
            furthest_outside_point: None,
        }
    }

    /// Returns the directed edges of the face, `v0 -> v1`, `v1 -> v2` and `v2 -> v0`.
    #[inline]
    pub fn edges(&self) -> [(PointId, PointId); 3] {
        let [a, b, c] = self.points;
        [(a, b), (b, c), (c, a)]
    }

    /// Returns the signed distance from the face plane to the given point.
    #[inline]
    pub fn distance_to_point(&self, point_id: PointId, points: &[DVec3]) -> f64 {
        self.normal.dot(points[point_id.index()]) + self.offset
    }

    /// Returns the distance to the given point if it is strictly in front of the face.
    #[inline]
    pub fn distance_to_visible_point(&self, point_id: PointId, points: &[DVec3]) -> Option<f64> {
        // A degenerate face has no meaningful plane, so it cannot see any points.
        if self.affinely_dependent {
            return None;
        }

        let distance = self.distance_to_point(point_id, points);
        (distance > EPSILON).then_some(distance)
    }

    /// Determines whether the face can be "seen" from the given point.
    #[inline]
    pub fn is_visible_from(&self, point_id: PointId, points: &[DVec3]) -> bool {
        self.distance_to_visible_point(point_id, points).is_some()
    }

    /// Adds the given point to the outside points of the face if it is strictly
    /// in front of the face. Returns whether the point was added.
    ///
    /// The furthest outside point is tracked as points are added. Ties go to the lowest index.
    #[inline]
    pub fn try_add_outside_point(&mut self, point_id: PointId, points: &[DVec3]) -> bool {
        if self.points.contains(&point_id) {
            return false;
        }

        let Some(distance) = self.distance_to_visible_point(point_id, points) else {
            return false;
        };

        let is_furthest = self
            .furthest_outside_point
            .is_none_or(|(id, d)| distance > d || (distance == d && point_id < id));
        if is_furthest {
            self.furthest_outside_point = Some((point_id, distance));
        }

        self.outside_points.push(point_id);
        true
    }

    /// Removes and returns the outside points of the face.
    #[inline]
    pub fn take_outside_points(&mut self) -> Vec<PointId> {
        self.furthest_outside_point = None;
        core::mem::take(&mut self.outside_points)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::dvec3;

    use super::*;

    fn unit_triangle() -> Vec<DVec3> {
        vec![
            dvec3(1.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(0.0, 0.0, 1.0),
            dvec3(0.0, 0.0, 10.0),
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(10.0, 10.0, 10.0),
        ]
    }

    #[test]
    fn inner_outer_test() {
        let points = unit_triangle();
        let face = Face::from_triangle(&points, [PointId(0), PointId(1), PointId(2)]);
        assert!(!face.affinely_dependent);
        assert_relative_eq!(face.normal, DVec3::ONE.normalize());

        // Outer, inner and on-plane points.
        assert!(face.is_visible_from(PointId(3), &points));
        assert!(!face.is_visible_from(PointId(4), &points));
        assert!(!face.is_visible_from(PointId(5), &points));
        assert_relative_eq!(
            face.distance_to_point(PointId(4), &points),
            -(1.0 / 3.0_f64).sqrt()
        );
    }

    #[test]
    fn furthest_point_tracking() {
        let points = unit_triangle();
        let mut face = Face::from_triangle(&points, [PointId(0), PointId(1), PointId(2)]);

        assert!(!face.try_add_outside_point(PointId(4), &points));
        assert!(!face.try_add_outside_point(PointId(0), &points));
        assert!(face.try_add_outside_point(PointId(3), &points));
        assert!(face.try_add_outside_point(PointId(6), &points));
        assert_eq!(face.outside_points, vec![PointId(3), PointId(6)]);
        assert_eq!(face.furthest_outside_point.map(|(id, _)| id), Some(PointId(6)));

        assert_eq!(face.take_outside_points(), vec![PointId(3), PointId(6)]);
        assert!(face.furthest_outside_point.is_none());
    }

    #[test]
    fn furthest_point_ties_go_to_lowest_index() {
        let points = vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(5.0, 5.0, 2.0),
            dvec3(-5.0, 5.0, 2.0),
        ];
        let mut face = Face::from_triangle(&points, [PointId(0), PointId(1), PointId(2)]);
        assert!(face.try_add_outside_point(PointId(4), &points));
        assert!(face.try_add_outside_point(PointId(3), &points));
        assert_eq!(face.furthest_outside_point, Some((PointId(3), 2.0)));
    }

    #[test]
    fn degenerate_face_sees_nothing() {
        let points = vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 1.0, 1.0),
            dvec3(2.0, 2.0, 2.0),
            dvec3(0.0, 0.0, 5.0),
        ];
        let mut face = Face::from_triangle(&points, [PointId(0), PointId(1), PointId(2)]);
        assert!(face.affinely_dependent);
        assert_eq!(face.normal, DVec3::ZERO);
        assert!(!face.try_add_outside_point(PointId(3), &points));
    }
}
