//! An index from directed edges to the faces that own them.
//!
//! Every live face owns its three directed edges. On a closed hull the face
//! across edge `a -> b` is the owner of the reversed edge `b -> a`.

use crate::{
    dim3::face::{Face, FaceId, PointId},
    fixed_hasher::{FixedHashMap, FixedHasher},
};

#[derive(Clone, Debug, Default)]
pub struct EdgeMap {
    owners: FixedHashMap<(PointId, PointId), FaceId>,
}

impl EdgeMap {
    /// Creates an empty index with room for the edges of `face_capacity` faces.
    pub fn with_face_capacity(face_capacity: usize) -> Self {
        Self {
            owners: FixedHashMap::with_capacity_and_hasher(3 * face_capacity, FixedHasher),
        }
    }

    /// Registers the edges of `face`.
    ///
    /// Returns `false` if one of the directed edges was already owned by another face,
    /// which means the surface is no longer a 2-manifold.
    pub fn insert_face(&mut self, id: FaceId, face: &Face) -> bool {
        let mut manifold = true;
        for edge in face.edges() {
            if let Some(previous) = self.owners.insert(edge, id) {
                manifold &= previous == id;
            }
        }
        manifold
    }

    /// Unregisters the edges of `face`, leaving edges owned by other faces untouched.
    pub fn remove_face(&mut self, id: FaceId, face: &Face) {
        for edge in face.edges() {
            if self.owners.get(&edge) == Some(&id) {
                self.owners.remove(&edge);
            }
        }
    }

    /// Returns the face that owns the directed edge `a -> b`.
    #[inline]
    pub fn owner(&self, a: PointId, b: PointId) -> Option<FaceId> {
        self.owners.get(&(a, b)).copied()
    }

    /// Returns the face on the other side of the edge `a -> b`.
    #[inline]
    pub fn across(&self, a: PointId, b: PointId) -> Option<FaceId> {
        self.owner(b, a)
    }

    /// Returns the faces across each edge of `face`, in edge order.
    #[inline]
    pub fn neighbors(&self, face: &Face) -> [Option<FaceId>; 3] {
        face.edges().map(|(a, b)| self.across(a, b))
    }
}

#[cfg(test)]
mod tests {
    use glam::{dvec3, DVec3};

    use super::*;

    fn tetrahedron() -> (Vec<DVec3>, Vec<Face>) {
        let points = vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(0.0, 0.0, 1.0),
        ];
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]]
            .map(|ids| Face::from_triangle(&points, ids.map(PointId)))
            .to_vec();
        (points, faces)
    }

    #[test]
    fn closed_tetrahedron_neighbors() {
        let (_, faces) = tetrahedron();
        let mut index = EdgeMap::with_face_capacity(faces.len());
        for (i, face) in faces.iter().enumerate() {
            assert!(index.insert_face(FaceId(i as u32), face));
        }

        assert_eq!(
            index.neighbors(&faces[0]),
            [Some(FaceId(3)), Some(FaceId(2)), Some(FaceId(1))]
        );
        for face in &faces {
            assert!(index.neighbors(face).iter().all(Option::is_some));
        }
    }

    #[test]
    fn remove_face_opens_edges() {
        let (_, faces) = tetrahedron();
        let mut index = EdgeMap::with_face_capacity(faces.len());
        for (i, face) in faces.iter().enumerate() {
            index.insert_face(FaceId(i as u32), face);
        }

        index.remove_face(FaceId(0), &faces[0]);
        assert_eq!(index.owner(PointId(0), PointId(2)), None);
        assert_eq!(index.across(PointId(2), PointId(0)), None);
        assert_eq!(index.neighbors(&faces[1])[0], None);
        assert_eq!(index.across(PointId(1), PointId(3)), Some(FaceId(2)));
    }

    #[test]
    fn duplicate_edge_is_reported() {
        let (_, faces) = tetrahedron();
        let mut index = EdgeMap::with_face_capacity(2);
        assert!(index.insert_face(FaceId(0), &faces[0]));
        assert!(!index.insert_face(FaceId(1), &faces[0]));
    }
}
