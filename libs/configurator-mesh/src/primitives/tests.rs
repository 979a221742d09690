//! Tests for the per-shape volume recipes.

use super::*;
use crate::catalog::default_values;
use approx::assert_relative_eq;

fn params(kind: ShapeKind, overrides: &[(&str, f64)]) -> ShapeParams {
    let mut values = default_values(kind);
    for (name, value) in overrides {
        values.set(*name, *value);
    }
    ShapeParams::from_values(kind, &values).unwrap()
}

fn lobes(volumes: &[Volume]) -> Vec<Lobe> {
    volumes.iter().map(|v| v.lobe).collect()
}

// =============================================================================
// CYLINDER
// =============================================================================

#[test]
fn test_cylinder_volumes_in_order() {
    let volumes = generate_volumes(&params(ShapeKind::CappedCylinder, &[])).unwrap();
    assert_eq!(lobes(&volumes), vec![Lobe::Body, Lobe::TopCap, Lobe::BottomCap]);
    for volume in &volumes {
        assert!(volume.mesh.validate());
        assert!(volume.mesh.is_closed());
    }
}

#[test]
fn test_cylinder_cap_extents() {
    let volumes = generate_volumes(&params(ShapeKind::CappedCylinder, &[])).unwrap();

    let (_, top_max) = volumes[1].mesh.bounding_box();
    assert_relative_eq!(top_max.y, 5.0 + 2.5);

    let (bottom_min, bottom_max) = volumes[2].mesh.bounding_box();
    assert_relative_eq!(bottom_min.y, -10.0);
    assert_relative_eq!(bottom_max.y, -5.0);
}

#[test]
fn test_cylinder_rims_coincide_with_body() {
    let p = params(
        ShapeKind::CappedCylinder,
        &[
            ("radialSegments", 12.0),
            ("sphereWidthSegments", 12.0),
            ("sphereHeightSegments", 4.0),
        ],
    );
    let volumes = generate_volumes(&p).unwrap();
    let body = volumes[0].mesh.vertices();
    let top = volumes[1].mesh.vertices();

    let top_rim: Vec<_> = top.iter().filter(|v| v.y == 5.0).collect();
    assert_eq!(top_rim.len(), 12);
    for rim_vertex in top_rim {
        assert!(body.iter().any(|b| (*b - *rim_vertex).length() < 1e-12));
    }
}

#[test]
fn test_squash_zero_puts_cap_on_top_plane() {
    let p = params(ShapeKind::CappedCylinder, &[("topSquash", 0.0)]);
    let volumes = generate_volumes(&p).unwrap();
    for v in volumes[1].mesh.vertices() {
        assert_relative_eq!(v.y, 5.0);
    }
}

#[test]
fn test_squash_one_is_full_hemisphere() {
    let p = params(ShapeKind::CappedCylinder, &[("topSquash", 1.0)]);
    let volumes = generate_volumes(&p).unwrap();
    for v in volumes[1].mesh.vertices() {
        let local = *v - glam::DVec3::new(0.0, 5.0, 0.0);
        assert_relative_eq!(local.length(), 5.0, epsilon = 1e-9);
        assert!(local.y >= 0.0);
    }
}

// =============================================================================
// OTHER SHAPES
// =============================================================================

#[test]
fn test_octagon_body_has_eight_facets() {
    let p = params(
        ShapeKind::CappedOctagon,
        &[("sphereWidthSegments", 16.0), ("sphereHeightSegments", 8.0)],
    );
    let volumes = generate_volumes(&p).unwrap();
    assert_eq!(volumes.len(), 3);
    assert_eq!(volumes[0].mesh.vertex_count(), 16);
    assert_eq!(volumes[1].mesh.vertex_count(), 16 * 8 + 1);
}

#[test]
fn test_square_is_single_open_shell() {
    let volumes = generate_volumes(&params(ShapeKind::CappedSquare, &[])).unwrap();
    assert_eq!(lobes(&volumes), vec![Lobe::Body]);

    let mesh = &volumes[0].mesh;
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 8);
    assert!(!mesh.is_closed());

    // Flat faces sit width/2 from the axis.
    let [a, b, _] = mesh.triangle_positions(0);
    let mid = (a + b) / 2.0;
    assert_relative_eq!((mid.x * mid.x + mid.z * mid.z).sqrt(), 2.5, epsilon = 1e-12);
}

#[test]
fn test_square_width_is_face_to_face_distance() {
    let volumes = generate_volumes(&params(ShapeKind::CappedSquare, &[("width", 6.0)])).unwrap();
    let mesh = &volumes[0].mesh;

    for v in mesh.vertices() {
        let radial = (v.x * v.x + v.z * v.z).sqrt();
        assert_relative_eq!(radial, 6.0 / std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    // Opposite side faces are parallel and `width` apart.
    let [a, b, c] = mesh.triangle_positions(0);
    let normal = (b - a).cross(c - a).normalize();
    let gap = mesh
        .vertices()
        .iter()
        .map(|v| (*v - a).dot(normal).abs())
        .fold(0.0, f64::max);
    assert_relative_eq!(gap, 6.0, epsilon = 1e-12);
}

#[test]
fn test_square_roundness_has_no_effect() {
    let sharp = generate_volumes(&params(ShapeKind::CappedSquare, &[("roundness", 0.0)])).unwrap();
    let round = generate_volumes(&params(ShapeKind::CappedSquare, &[("roundness", 1.0)])).unwrap();
    assert_eq!(sharp, round);
}

#[test]
fn test_custom_polygon_caps_use_overall_radius() {
    let p = params(
        ShapeKind::CustomPolygon,
        &[("radius", 3.0), ("side2Radius", 9.0), ("topSquash", 1.0)],
    );
    let volumes = generate_volumes(&p).unwrap();
    assert_eq!(lobes(&volumes), vec![Lobe::Body, Lobe::TopCap, Lobe::BottomCap]);

    let (body_min, body_max) = volumes[0].mesh.bounding_box();
    assert_relative_eq!(body_max.x, 9.0, epsilon = 1e-12);
    assert_relative_eq!(body_min.y, -5.0);

    let (_, cap_max) = volumes[1].mesh.bounding_box();
    assert_relative_eq!(cap_max.y, 8.0);
    assert_eq!(
        volumes[1].mesh.vertex_count() as u32,
        DEFAULT_SPHERE_WIDTH_SEGMENTS * DEFAULT_SPHERE_HEIGHT_SEGMENTS + 1
    );
}

// =============================================================================
// STRING BOUNDARY
// =============================================================================

#[test]
fn test_unknown_shape_yields_no_volumes() {
    let volumes = shape_volumes("hexagon", &ParameterValues::new()).unwrap();
    assert!(volumes.is_empty());
}

#[test]
fn test_named_shape_requires_parameters() {
    let err = shape_volumes("capped square", &ParameterValues::new()).unwrap_err();
    assert!(matches!(err, MeshError::MissingParameter { .. }));
}

#[test]
fn test_named_shape_builds() {
    let values = default_values(ShapeKind::CappedSquare);
    assert_eq!(shape_volumes("capped square", &values).unwrap().len(), 1);
}

#[test]
fn test_generation_is_deterministic() {
    let p = params(ShapeKind::CappedOctagon, &[("sphereHeightSegments", 6.0)]);
    assert_eq!(generate_volumes(&p).unwrap(), generate_volumes(&p).unwrap());
}
