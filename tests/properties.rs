use glam::{dvec2, dvec3, DVec3};
use hullkit::{planar_hull, spatial_hull, ConvexHull3d, HullError};
use proptest::prelude::*;

fn flatten_2d(points: &[(f64, f64)]) -> Vec<f64> {
    points.iter().flat_map(|&(x, y)| [x, y]).collect()
}

fn flatten_3d(points: &[(f64, f64, f64)]) -> Vec<f64> {
    points.iter().flat_map(|&(x, y, z)| [x, y, z]).collect()
}

/// Counts directed edges that are missing a reversed twin or appear more than once.
fn open_edges(indices: &[u32]) -> usize {
    let edges: Vec<(u32, u32)> = indices
        .chunks_exact(3)
        .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
        .collect();
    let count = |edge: (u32, u32)| edges.iter().filter(|&&e| e == edge).count();
    edges
        .iter()
        .filter(|&&(a, b)| count((a, b)) != 1 || count((b, a)) != 1)
        .count()
}

#[test]
fn square_scenario() {
    let points = [
        -100.0, -100.0, 100.0, -100.0, 100.0, 100.0, -100.0, 100.0, 0.0, 0.0, -50.0, -50.0,
        50.0, 50.0, -25.0, 25.0,
    ];
    assert_eq!(planar_hull(&points), Ok(vec![0, 1, 2, 3]));
}

#[test]
fn collinear_scenario() {
    assert_eq!(planar_hull(&[0.0, 0.0, 1.0, 0.0, 2.0, 0.0]), Ok(vec![0, 2]));
}

#[test]
fn cube_scenario() {
    let mut points = Vec::new();
    for i in 0..8 {
        points.extend([(i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64]);
    }
    let indices = spatial_hull(&points).unwrap();
    assert_eq!(indices.len(), 36);
    assert_eq!(open_edges(&indices), 0);

    let mut vertices = indices.clone();
    vertices.sort_unstable();
    vertices.dedup();
    assert_eq!(vertices, (0..8).collect::<Vec<u32>>());
}

#[test]
fn ragged_buffers() {
    assert_eq!(
        planar_hull(&[1.0, 2.0, 3.0]),
        Err(HullError::RaggedBuffer { len: 3, stride: 2 })
    );
    assert_eq!(
        spatial_hull(&[1.0, 2.0, 3.0, 4.0, 5.0]),
        Err(HullError::RaggedBuffer { len: 5, stride: 3 })
    );
}

#[test]
fn non_finite_coordinates_do_not_panic() {
    let planar = [0.0, 0.0, f64::NAN, 1.0, 4.0, 0.0, 2.0, 3.0, 1.0, f64::NAN];
    let hull = planar_hull(&planar).unwrap();
    assert!(hull.iter().all(|&i| i < 5));

    let nan_first = [f64::NAN, 0.0, 0.0, 0.0, 4.0, 0.0, 2.0, 3.0, 1.0, -2.0];
    assert_eq!(planar_hull(&nan_first), Ok(vec![1, 4, 2, 3]));

    let nan_first = [
        f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
    ];
    let hull = spatial_hull(&nan_first).unwrap();
    assert_eq!(hull.len(), 12);
    assert!(hull.iter().all(|&i| (1..5).contains(&i)));

    let spatial = [
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, f64::NAN, 0.5, 0.5,
    ];
    let hull = spatial_hull(&spatial).unwrap();
    assert!(hull.iter().all(|&i| i < 5));
}

proptest! {
    #[test]
    fn planar_cardinality_floor(points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..3)) {
        let hull = planar_hull(&flatten_2d(&points)).unwrap();
        prop_assert_eq!(hull, (0..points.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn spatial_cardinality_floor(points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0), 0..4)) {
        prop_assert!(spatial_hull(&flatten_3d(&points)).unwrap().is_empty());
    }

    /// Every input point is on or inside every hull edge.
    #[test]
    fn planar_hull_is_convex(points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..80)) {
        let hull = planar_hull(&flatten_2d(&points)).unwrap();

        prop_assert!(hull.iter().all(|&i| (i as usize) < points.len()));
        let mut unique = hull.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), hull.len());

        if hull.len() >= 3 {
            for (k, &i) in hull.iter().enumerate() {
                let j = hull[(k + 1) % hull.len()];
                let (a, b) = (dvec2(points[i as usize].0, points[i as usize].1), dvec2(points[j as usize].0, points[j as usize].1));
                for &(x, y) in &points {
                    let orientation = (b - a).perp_dot(dvec2(x, y) - a);
                    prop_assert!(orientation >= -1e-6, "({x}, {y}) is outside edge {i} -> {j}");
                }
            }
        }
    }

    #[test]
    fn planar_hull_is_deterministic(points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..80)) {
        let flat = flatten_2d(&points);
        prop_assert_eq!(planar_hull(&flat), planar_hull(&flat));
    }

    /// The hull is a closed, outward-facing triangle mesh containing every input point.
    #[test]
    fn spatial_hull_is_closed_and_convex(points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0), 4..60)) {
        let indices = spatial_hull(&flatten_3d(&points)).unwrap();
        prop_assert!(!indices.is_empty());
        prop_assert_eq!(indices.len() % 3, 0);
        prop_assert!(indices.iter().all(|&i| (i as usize) < points.len()));
        prop_assert_eq!(open_edges(&indices), 0);

        let mut vertices = indices.clone();
        vertices.sort_unstable();
        vertices.dedup();
        let faces = indices.len() / 3;
        prop_assert_eq!(vertices.len() as i64 - (3 * faces / 2) as i64 + faces as i64, 2);

        let points: Vec<DVec3> = points.iter().map(|&(x, y, z)| dvec3(x, y, z)).collect();
        for triangle in indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| points[triangle[k] as usize]);
            let normal = (b - a).cross(c - a);
            let length = normal.length();
            if length < 1e-9 {
                continue;
            }
            for p in &points {
                prop_assert!(normal.dot(*p - a) / length <= 1e-7, "{p} is outside {triangle:?}");
            }
        }
    }

    #[test]
    fn spatial_hull_is_deterministic(points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0), 0..60)) {
        let flat = flatten_3d(&points);
        prop_assert_eq!(
            ConvexHull3d::try_from_flat(&flat, None),
            ConvexHull3d::try_from_flat(&flat, None)
        );
    }
}
