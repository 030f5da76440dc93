//! Integration tests for the public generator API
//!
//! Checks the properties every mesh must satisfy, across every generator.

use meshsmith::*;

const EPSILON: f32 = 1e-4;

/// One instance of every generator, with small but non-trivial parameters
fn all_shapes() -> Vec<(&'static str, Mesh)> {
    vec![
        ("box", create_box(1.0, 2.0, 3.0, 2).expect("box")),
        ("sphere", create_sphere(1.0, 12, 6).expect("sphere")),
        ("geosphere", create_geosphere(1.5, 2).expect("geosphere")),
        ("cylinder", create_cylinder(1.0, 0.5, 2.0, 10, 3).expect("cylinder")),
        ("grid", create_grid(4.0, 3.0, 5, 6).expect("grid")),
        ("quad", create_quad(-1.0, 1.0, 2.0, 2.0, 0.0).expect("quad")),
        ("cone", create_cone(1.0, 0.5).expect("cone")),
        ("wedge", create_wedge(1.0, 1.0, 1.0).expect("wedge")),
        ("pyramid", create_pyramid(1.0, 1.0, 1.0).expect("pyramid")),
        (
            "truncated_pyramid",
            create_truncated_pyramid(1.0, 1.0, 0.5, 0.5, 1.0).expect("truncated_pyramid"),
        ),
        ("diamond", create_diamond(1.25).expect("diamond")),
        (
            "triangular_prism",
            create_triangular_prism(1.0, 1.0, 1.0).expect("triangular_prism"),
        ),
        ("tetrahedron", create_tetrahedron(1.0, 1.0).expect("tetrahedron")),
    ]
}

fn is_unit(v: Vec3) -> bool {
    (v.length() - 1.0).abs() < EPSILON
}

#[test]
fn test_index_buffers_are_well_formed() {
    for (name, mesh) in all_shapes() {
        assert_eq!(mesh.indices().len() % 3, 0, "{name}: partial triangle");
        assert!(!mesh.is_empty(), "{name}: no triangles");
        for &i in mesh.indices() {
            assert!((i as usize) < mesh.vertex_count(), "{name}: index {i} out of range");
        }
    }
}

#[test]
fn test_attributes_are_finite() {
    for (name, mesh) in all_shapes() {
        for v in mesh.vertices() {
            assert!(v.position.is_finite(), "{name}: non-finite position");
            assert!(v.normal.is_finite(), "{name}: non-finite normal");
            assert!(v.tangent.is_finite(), "{name}: non-finite tangent");
            assert!(v.tex_coord.is_finite(), "{name}: non-finite uv");
        }
    }
}

#[test]
fn test_curved_surfaces_have_unit_frames() {
    let curved = [
        ("sphere", create_sphere(2.0, 16, 9).expect("sphere")),
        ("geosphere", create_geosphere(0.5, 3).expect("geosphere")),
        ("cylinder", create_cylinder(1.0, 1.0, 3.0, 16, 4).expect("cylinder")),
        ("frustum", create_cylinder(2.0, 0.25, 1.0, 7, 2).expect("frustum")),
    ];

    for (name, mesh) in &curved {
        for v in mesh.vertices() {
            assert!(is_unit(v.normal), "{name}: normal {:?}", v.normal);
            assert!(is_unit(v.tangent), "{name}: tangent {:?}", v.tangent);
        }
    }
}

#[test]
fn test_every_vertex_has_unit_normal() {
    // Flat shading on the coarse polyhedra means no zeroed normals anywhere
    for (name, mesh) in all_shapes() {
        for v in mesh.vertices() {
            assert!(is_unit(v.normal), "{name}: normal {:?}", v.normal);
        }
    }
}

#[test]
fn test_generators_are_deterministic() {
    let first = all_shapes();
    let second = all_shapes();
    for ((name, a), (_, b)) in first.iter().zip(&second) {
        assert_eq!(a.vertex_bytes(), b.vertex_bytes(), "{name}: vertices differ");
        assert_eq!(a.indices(), b.indices(), "{name}: indices differ");
    }
}

#[test]
fn test_box_reference_values() {
    let mesh = create_box(2.0, 2.0, 2.0, 0).expect("box");
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.indices().len(), 36);
    assert_eq!(mesh.vertices()[0].position, Vec3::new(-1.0, -1.0, -1.0));
}

#[test]
fn test_grid_reference_values() {
    let mesh = create_grid(2.0, 2.0, 3, 3).expect("grid");
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
    assert_eq!(mesh.indices().len(), 24);
    assert_eq!(mesh.vertices()[4].position, Vec3::ZERO);
}

#[test]
fn test_sphere_reference_values() {
    let mesh = create_sphere(1.0, 8, 4).expect("sphere");
    assert_eq!(mesh.vertex_count(), 29);

    let last = mesh.vertex_count() - 1;
    for v in &mesh.vertices()[1..last] {
        assert!((v.position.length() - 1.0).abs() < EPSILON);
    }
}

#[test]
fn test_geosphere_stays_on_radius() {
    for subdivisions in 0..=MAX_SUBDIVISIONS {
        let mesh = create_geosphere(2.5, subdivisions).expect("geosphere");
        for v in mesh.vertices() {
            assert!((v.position.length() - 2.5).abs() < EPSILON);
        }
    }
}

#[test]
fn test_subdivide_counts_and_midpoints() {
    for (name, mesh) in all_shapes() {
        let t = mesh.triangle_count();
        let out = subdivide(mesh.clone());

        assert_eq!(out.triangle_count(), 4 * t, "{name}");
        assert_eq!(out.vertex_count(), 6 * t, "{name}");

        // Per input triangle: corners copied, midpoints exactly averaged
        for (k, [a, b, c]) in mesh.triangle_positions().enumerate() {
            let v = &out.vertices()[6 * k..6 * k + 6];
            assert_eq!(v[0].position, a);
            assert_eq!(v[1].position, b);
            assert_eq!(v[2].position, c);
            assert_eq!(v[3].position, 0.5 * (a + b));
            assert_eq!(v[4].position, 0.5 * (b + c));
            assert_eq!(v[5].position, 0.5 * (a + c));
        }
    }
}

#[test]
fn test_subdivision_is_clamped_everywhere() {
    assert_eq!(
        create_box(1.0, 1.0, 1.0, 99).expect("box"),
        create_box(1.0, 1.0, 1.0, MAX_SUBDIVISIONS).expect("box")
    );
    assert_eq!(
        create_geosphere(1.0, 99).expect("geosphere"),
        create_geosphere(1.0, MAX_SUBDIVISIONS).expect("geosphere")
    );
}

#[test]
fn test_invalid_parameters_are_reported() {
    let err = create_sphere(1.0, 8, 1).expect_err("stack_count below minimum");
    assert_eq!(err.to_string(), "sphere: stack_count must be at least 2, got 1");

    let err = create_cylinder(1.0, 1.0, 0.0, 8, 2).expect_err("zero height");
    assert!(matches!(err, GeometryError::InvalidDimension { param: "height", .. }));

    assert!(create_grid(1.0, 1.0, 2, 1).is_err());
    assert!(create_geosphere(0.0, 1).is_err());
}

#[test]
fn test_narrowing_is_explicit() {
    let small = create_box(1.0, 1.0, 1.0, 2).expect("box");
    let narrow = small.indices16().expect("fits in u16");
    assert!(narrow.iter().zip(small.indices()).all(|(&n, &w)| n as u32 == w));

    let large = create_box(1.0, 1.0, 1.0, MAX_SUBDIVISIONS).expect("box");
    assert!(large.vertex_count() > u16::MAX as usize);
    assert!(matches!(
        large.indices16(),
        Err(GeometryError::IndexOverflow { .. })
    ));
}
