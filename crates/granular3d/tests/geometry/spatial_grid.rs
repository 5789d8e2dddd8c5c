use granular3d::bounding_volume::Aabb;
use granular3d::math::{Point, Real};
use granular3d::na;
use granular3d::partitioning::SpatialGrid;

fn random_points(rng: &mut oorandom::Rand32, n: usize, aabb: &Aabb) -> Vec<Point<Real>> {
    let extents = aabb.extents();
    (0..n)
        .map(|_| {
            // Some points fall outside of the grid bounds.
            let u = Point::new(rng.rand_float(), rng.rand_float(), rng.rand_float());
            aabb.mins + (u.coords.cast::<Real>() * 1.2).component_mul(&extents)
                - extents * 0.1
        })
        .collect()
}

#[test]
fn neighbor_queries_match_brute_force_across_rebuilds() {
    let mut rng = oorandom::Rand32::new(1234);
    let bounds = Aabb::new(Point::new(-2.0, 0.0, -1.0), Point::new(2.0, 1.0, 3.0));
    let mut grid = SpatialGrid::new(bounds, 0.25).unwrap();

    for n in [0, 1, 50, 1000] {
        let pts = random_points(&mut rng, n, &bounds);
        grid.rebuild(&pts).unwrap();

        assert_eq!(grid.len(), n);
        assert_eq!(*grid.cell_starts().last().unwrap() as usize, n);

        for _ in 0..20 {
            let center = random_points(&mut rng, 1, &bounds)[0];
            let radius = rng.rand_float() as Real;

            let mut expected: Vec<u32> = (0..n as u32)
                .filter(|i| na::distance_squared(&pts[*i as usize], &center) <= radius * radius)
                .collect();
            let mut found = grid.query_neighbors(&center, radius);
            let candidates = grid.candidates(&center, radius);

            expected.sort();
            found.sort();
            assert_eq!(found, expected);
            assert!(found.iter().all(|i| candidates.contains(i)));
        }
    }

    grid.release();
}
