use crate::{
    dim3::face::{Face, PointId},
    fixed_hasher::{FixedHashMap, FixedHasher},
};

/// Checks that the live faces form a closed, consistently oriented 2-manifold.
///
/// Returns the first directed edge, in face order, that is either owned by
/// more than one live face or has no reversed twin on any live face.
pub fn find_open_edge(faces: &[Face]) -> Option<(PointId, PointId)> {
    let mut edge_counts: FixedHashMap<(PointId, PointId), u32> =
        FixedHashMap::with_capacity_and_hasher(3 * faces.len(), FixedHasher);

    let live_faces = || faces.iter().filter(|face| face.valid);

    for face in live_faces() {
        for edge in face.edges() {
            *edge_counts.entry(edge).or_default() += 1;
        }
    }

    live_faces().flat_map(Face::edges).find(|&(a, b)| {
        edge_counts.get(&(a, b)) != Some(&1) || edge_counts.get(&(b, a)) != Some(&1)
    })
}
