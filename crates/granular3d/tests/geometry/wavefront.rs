use granular3d::math::Vector;
use granular3d::shape::TriMesh;

#[test]
fn wavefront_round_trip() {
    let mesh = TriMesh::ball(0.75, 12, 6).unwrap();
    let path = std::env::temp_dir().join("granular3d_wavefront_round_trip.obj");

    mesh.to_obj_file(&path).unwrap();
    let loaded = TriMesh::from_obj_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.indices(), mesh.indices());
    assert_eq!(loaded.vertices().len(), mesh.vertices().len());

    for (a, b) in loaded.vertices().iter().zip(mesh.vertices()) {
        assert_relative_eq!(a, b, epsilon = 1.0e-5);
    }

    assert_relative_eq!(
        loaded.local_aabb().extents(),
        Vector::repeat(1.5),
        epsilon = 1.0e-5
    );
}
