// Host-side tests for primitive mesh construction and the geometry cache.

use configurator_core::*;
use glam::Vec3;

fn mesh_for(shape: Shape) -> MeshData {
    build_primitive(&geometry_for(shape).primitive)
}

fn assert_well_formed(mesh: &MeshData) {
    assert_eq!(mesh.positions.len(), mesh.normals.len());
    assert_eq!(mesh.positions.len(), mesh.uvs.len());
    assert_eq!(mesh.indices.len() % 3, 0);
    let n = mesh.vertex_count() as u32;
    assert!(mesh.indices.iter().all(|i| *i < n));
}

/// Every face normal (from winding) points away from `center_of(triangle)`.
fn assert_outward_winding(mesh: &MeshData, center_of: impl Fn(Vec3) -> Vec3) {
    for [a, b, c] in mesh.triangles() {
        let face = (c - b).cross(a - b);
        let centroid = (a + b + c) / 3.0;
        assert!(
            face.dot(centroid - center_of(centroid)) > 0.0,
            "inward triangle at {centroid:?}"
        );
    }
}

#[test]
fn sphere_has_expected_topology() {
    let mesh = mesh_for(Shape::Sphere);
    assert_well_formed(&mesh);
    assert_eq!(mesh.vertex_count(), 65 * 65);
    assert_eq!(mesh.triangle_count(), 64 * 2 + 62 * 64 * 2);
    assert!((mesh.bounding_radius() - 1.0).abs() < 1e-5);
    assert_outward_winding(&mesh, |_| Vec3::ZERO);
}

#[test]
fn cube_has_split_faces() {
    let mesh = mesh_for(Shape::Cube);
    assert_well_formed(&mesh);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    let corner = Vec3::splat(0.75).length();
    assert!((mesh.bounding_radius() - corner).abs() < 1e-5);
    assert_outward_winding(&mesh, |_| Vec3::ZERO);
}

#[test]
fn torus_winds_away_from_its_tube_center() {
    let mesh = mesh_for(Shape::Torus);
    assert_well_formed(&mesh);
    assert_eq!(mesh.vertex_count(), 33 * 65);
    assert_eq!(mesh.triangle_count(), 32 * 64 * 2);
    assert!((mesh.bounding_radius() - 1.4).abs() < 1e-4);
    // nearest point on the ring of radius 1 in the XY plane
    assert_outward_winding(&mesh, |p| Vec3::new(p.x, p.y, 0.0).normalize_or_zero());
}

#[test]
fn cylinder_and_cone_have_caps_where_radius_is_nonzero() {
    let cylinder = mesh_for(Shape::Cylinder);
    assert_well_formed(&cylinder);
    assert_eq!(cylinder.vertex_count(), 2 * 65 + 2 * (64 + 65));
    assert_eq!(cylinder.triangle_count(), 128 + 128);
    assert_outward_winding(&cylinder, |_| Vec3::ZERO);

    let cone = mesh_for(Shape::Cone);
    assert_well_formed(&cone);
    assert_eq!(cone.vertex_count(), 2 * 65 + 64 + 65);
    assert_eq!(cone.triangle_count(), 64 + 64);
    assert_outward_winding(&cone, |_| Vec3::ZERO);
    let top = cone.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
    assert!((top - 1.0).abs() < 1e-6);
}

#[test]
fn uvs_stay_in_unit_square() {
    // sphere pole rows are shifted by half a segment
    let slack = 0.5 / 64.0 + 1e-4;
    let range = -slack..=1.0 + slack;
    for shape in Shape::ALL {
        let mesh = mesh_for(shape);
        for uv in &mesh.uvs {
            assert!(
                range.contains(&uv[0]) && range.contains(&uv[1]),
                "{:?} uv {:?}",
                shape,
                uv
            );
        }
    }
}

#[test]
fn recomputed_normals_are_unit_and_outward_on_the_sphere() {
    let mut mesh = mesh_for(Shape::Sphere);
    mesh.compute_vertex_normals();
    for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
        let n = Vec3::from(*n);
        if n == Vec3::ZERO {
            // pole vertices not referenced by any triangle
            continue;
        }
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.dot(Vec3::from(*p)) > 0.9);
    }
}

#[test]
fn recomputed_cube_normals_are_axis_aligned() {
    let mut mesh = mesh_for(Shape::Cube);
    mesh.compute_vertex_normals();
    for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
        let n = Vec3::from(*n);
        assert!((n.abs().max_element() - 1.0).abs() < 1e-5);
        assert!(n.dot(Vec3::from(*p)) > 0.0);
    }
}

#[test]
fn cache_rebuilds_only_on_shape_change() {
    let mut cache = GeometryCache::new();
    assert!(cache.mesh().is_none());
    assert!(cache.ensure(geometry_for(Shape::Torus)));
    assert_eq!(cache.shape(), Some(Shape::Torus));
    assert!(!cache.ensure(geometry_for(Shape::Torus)));
    assert!(cache.ensure(geometry_for(Shape::Cube)));
    assert_eq!(cache.mesh().map(|m| m.vertex_count()), Some(24));
}
