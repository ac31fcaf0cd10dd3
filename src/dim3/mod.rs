mod adjacency;
mod face;
mod initial_hull;
mod validation;

pub use initial_hull::DegenerateInput;

use std::collections::VecDeque;

use glam::DVec3;

use crate::{
    buffer::{self, HullError},
    dim3::{
        adjacency::EdgeMap,
        face::{Face, FaceId, PointId},
        initial_hull::init_tetrahedron,
    },
    fixed_hasher::{FixedHashSet, FixedHasher},
};

/// A 3D [convex hull] representing the smallest convex set containing
/// all input points in a given point set.
///
/// The hull is a closed triangle mesh. Triangles index into the input points
/// and are counterclockwise when seen from outside, so their normals point away
/// from the interior.
///
/// [convex hull]: https://en.wikipedia.org/wiki/Convex_hull
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use hullkit::ConvexHull3d;
///
/// // A tetrahedron with one point inside it.
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(0.1, 0.1, 0.1),
/// ];
///
/// // No limit on the number of iterations.
/// let hull = ConvexHull3d::from_points(&points, None);
/// assert_eq!(hull.triangles().len(), 4);
///
/// // Drop the interior point and remap the triangles.
/// let (vertices, triangles) = hull.vertices_indices();
/// assert_eq!(vertices.len(), 4);
/// assert_eq!(triangles.len(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHull3d {
    /// The input points.
    points: Vec<DVec3>,
    /// The faces of the convex hull.
    triangles: Vec<[u32; 3]>,
    /// Why the point set has no hull, if it has none.
    degeneracy: Option<DegenerateInput>,
}

impl ConvexHull3d {
    /// Computes a [`ConvexHull3d`] for the given set of points.
    ///
    /// `max_iter` specifies the maximum number of points to add to the initial
    /// tetrahedron. If `None`, the algorithm will run until completion. A capped
    /// hull is still closed, but may leave some input points outside.
    ///
    /// Point sets with fewer than 4 points, or with all points approximately
    /// on a single plane, line or point, produce an empty hull.
    /// [`degeneracy`](Self::degeneracy) reports which case was hit.
    pub fn from_points(points: &[DVec3], max_iter: Option<usize>) -> Self {
        let mut faces = match init_tetrahedron(points) {
            Ok(faces) => faces,
            Err(degeneracy) => {
                log::debug!("no 3D hull for {} points: {degeneracy}", points.len());
                return Self {
                    points: points.to_vec(),
                    triangles: Vec::new(),
                    degeneracy: Some(degeneracy),
                };
            }
        };

        let mut edges = EdgeMap::with_face_capacity(faces.len());
        for (i, face) in faces.iter().enumerate() {
            edges.insert_face(FaceId(i as u32), face);
        }

        Self::update(points, &mut faces, &mut edges, max_iter);

        if cfg!(debug_assertions) {
            if let Some((a, b)) = validation::find_open_edge(&faces) {
                log::warn!("hull is not a closed manifold at edge {} -> {}", a.0, b.0);
            }
        }

        let triangles: Vec<[u32; 3]> = faces
            .iter()
            .filter(|face| face.valid)
            .map(|face| face.points.map(|id| id.0))
            .collect();

        log::debug!(
            "built 3D hull with {} triangles from {} points",
            triangles.len(),
            points.len()
        );

        Self {
            points: points.to_vec(),
            triangles,
            degeneracy: None,
        }
    }

    /// Computes a [`ConvexHull3d`] for a flat coordinate buffer `[x0, y0, z0, x1, ...]`.
    ///
    /// # Errors
    ///
    /// Returns a [`HullError`] if the buffer does not hold a whole number of 3D points,
    /// or too many points to index with `u32`.
    pub fn try_from_flat(points: &[f64], max_iter: Option<usize>) -> Result<Self, HullError> {
        let points = buffer::points_3d(points)?;
        Ok(Self::from_points(&points, max_iter))
    }

    /// Returns the input points.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns the triangles of the convex hull, indexing into [`points`](Self::points).
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the triangles as a flat index buffer `[a0, b0, c0, a1, ...]`.
    #[inline]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.as_flattened().to_vec()
    }

    /// Returns why the point set has no hull, or `None` if it has one.
    #[inline]
    pub fn degeneracy(&self) -> Option<DegenerateInput> {
        self.degeneracy
    }

    /// Returns `true` if the hull has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the vertices and triangles of the convex hull.
    ///
    /// Points that are not a vertex of the hull are removed, and the triangles
    /// are remapped to the remaining vertices, which keep their input order.
    /// This consumes the convex hull.
    pub fn vertices_indices(self) -> (Vec<DVec3>, Vec<[u32; 3]>) {
        let Self {
            points,
            mut triangles,
            ..
        } = self;

        let mut remap = vec![u32::MAX; points.len()];
        for &i in triangles.as_flattened() {
            remap[i as usize] = 0;
        }

        let mut vertices = Vec::new();
        for (i, point) in points.into_iter().enumerate() {
            if remap[i] == 0 {
                remap[i] = vertices.len() as u32;
                vertices.push(point);
            }
        }

        for index in triangles.as_flattened_mut() {
            *index = remap[*index as usize];
        }

        (vertices, triangles)
    }

    /// Computes the volume of the convex hull.
    ///
    /// Sums the tetrahedra spanned by each triangle and the first hull vertex.
    /// Every tetrahedron is clamped at zero, so round-off can never make the volume negative.
    pub fn volume(&self) -> f64 {
        let Some(first) = self.triangles.first() else {
            return 0.0;
        };
        let reference = self.points[first[0] as usize];

        self.triangles
            .iter()
            .map(|triangle| {
                let [a, b, c] = triangle.map(|i| self.points[i as usize] - reference);
                (a.dot(b.cross(c)) / 6.0).max(0.0)
            })
            .sum()
    }

    /// Computes the hull vertex that is furthest in the given direction.
    ///
    /// Returns `None` if the hull is empty. The first vertex in triangle order wins ties.
    pub fn support_point(&self, direction: DVec3) -> Option<DVec3> {
        let mut support = None;
        let mut max_dot = f64::NEG_INFINITY;

        for &i in self.triangles.as_flattened() {
            let point = self.points[i as usize];
            let dot = point.dot(direction);
            if dot > max_dot {
                max_dot = dot;
                support = Some(point);
            }
        }

        support
    }

    /// The main quickhull algorithm.
    fn update(
        points: &[DVec3],
        faces: &mut Vec<Face>,
        edges: &mut EdgeMap,
        max_iter: Option<usize>,
    ) {
        let max_iter = max_iter.unwrap_or(usize::MAX);

        let mut pending: Vec<FaceId> = (0..faces.len() as u32).map(FaceId).collect();
        let mut visible: Vec<FaceId> = Vec::new();
        let mut visited: FixedHashSet<FaceId> = FixedHashSet::with_hasher(FixedHasher);
        let mut queue: VecDeque<FaceId> = VecDeque::new();
        let mut horizon: Vec<(PointId, PointId)> = Vec::new();
        let mut orphans: Vec<PointId> = Vec::new();

        // While some face still has outside points:
        //
        // 1. Pick the outside point furthest from its face, the "apex".
        // 2. Flood the faces visible from the apex, starting from the face that owns it.
        // 3. Find the horizon, the edges between visible and hidden faces.
        // 4. Replace the visible faces with a fan connecting the apex to the horizon.
        // 5. Hand the outside points of the removed faces to the new faces.
        let mut iterations = 0;
        while let Some((seed, apex)) = select_apex(faces, &mut pending) {
            if iterations >= max_iter {
                log::debug!("stopping after {iterations} iterations with outside points left");
                break;
            }
            iterations += 1;

            collect_visible_faces(
                seed,
                apex,
                points,
                faces,
                edges,
                &mut visible,
                &mut visited,
                &mut queue,
            );
            compute_horizon(&visible, faces, edges, &mut horizon);

            if horizon.is_empty() {
                // Round-off made the visible region swallow the whole hull.
                for id in &visible {
                    faces[id.index()].valid = true;
                }
                log::error!(
                    "could not compute the horizon of point {}, stopping early",
                    apex.0
                );
                break;
            }

            orphans.clear();
            for &id in &visible {
                let face = &mut faces[id.index()];
                orphans.extend(
                    face.take_outside_points()
                        .into_iter()
                        .filter(|&point| point != apex),
                );
                edges.remove_face(id, face);
            }

            let first_new = faces.len();
            for &(a, b) in &horizon {
                let id = FaceId(faces.len() as u32);
                let face = Face::from_triangle(points, [a, b, apex]);
                if !edges.insert_face(id, &face) {
                    log::warn!("edge {} -> {} is owned by more than one face", a.0, b.0);
                }
                faces.push(face);
            }

            // Every orphan goes to the first new face that can see it.
            // Orphans that no new face can see are inside the hull.
            for &point in &orphans {
                for face in &mut faces[first_new..] {
                    if face.try_add_outside_point(point, points) {
                        break;
                    }
                }
            }

            pending.extend((first_new..faces.len()).map(|i| FaceId(i as u32)));

            log::trace!(
                "added point {}: {} visible faces, {} horizon edges, {} orphans",
                apex.0,
                visible.len(),
                horizon.len(),
                orphans.len()
            );
        }
    }
}

/// Finds the outside point furthest from its face among all live faces,
/// along with the face that owns it.
///
/// Ties go to the lowest point index. Faces that are deleted or have no
/// outside points are dropped from `pending`.
fn select_apex(faces: &[Face], pending: &mut Vec<FaceId>) -> Option<(FaceId, PointId)> {
    pending.retain(|id| {
        let face = &faces[id.index()];
        face.valid && face.furthest_outside_point.is_some()
    });

    let mut best: Option<(FaceId, PointId, f64)> = None;
    for &id in pending.iter() {
        let Some((point, distance)) = faces[id.index()].furthest_outside_point else {
            continue;
        };
        let is_better = best.is_none_or(|(_, best_point, best_distance)| {
            distance > best_distance || (distance == best_distance && point < best_point)
        });
        if is_better {
            best = Some((id, point, distance));
        }
    }

    best.map(|(id, point, _)| (id, point))
}

/// Collects the connected set of faces visible from `apex`, starting at `seed`,
/// in breadth-first order. Visible faces are marked as deleted.
#[allow(clippy::too_many_arguments)]
fn collect_visible_faces(
    seed: FaceId,
    apex: PointId,
    points: &[DVec3],
    faces: &mut [Face],
    edges: &EdgeMap,
    visible: &mut Vec<FaceId>,
    visited: &mut FixedHashSet<FaceId>,
    queue: &mut VecDeque<FaceId>,
) {
    visible.clear();
    visited.clear();
    queue.clear();

    visited.insert(seed);
    queue.push_back(seed);

    while let Some(id) = queue.pop_front() {
        let face = &mut faces[id.index()];
        if !face.valid || !face.is_visible_from(apex, points) {
            continue;
        }

        face.valid = false;
        visible.push(id);

        for neighbor in edges.neighbors(face).into_iter().flatten() {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
}

/// Computes the horizon as the directed edges of visible faces whose
/// neighbor is still part of the hull, in the winding of the visible faces.
fn compute_horizon(
    visible: &[FaceId],
    faces: &[Face],
    edges: &EdgeMap,
    horizon: &mut Vec<(PointId, PointId)>,
) {
    horizon.clear();

    for id in visible {
        for (a, b) in faces[id.index()].edges() {
            let is_boundary = edges
                .across(a, b)
                .is_none_or(|neighbor| faces[neighbor.index()].valid);
            if is_boundary {
                horizon.push((a, b));
            }
        }
    }
}
