//! End-to-end scenarios for the shape configurator pipeline.

use configurator_mesh::catalog::{default_values, ShapeKind, ShapeParams};
use configurator_mesh::mesh::Mesh;
use configurator_mesh::primitives::generate_volumes;
use configurator_mesh::uv::{apply_cylindrical_uvs, seam_straddling_triangles};
use configurator_mesh::{
    build, build_named, compose, BuildOptions, ParameterValues, RenderableMesh, TextureCache,
};
use glam::DVec3;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn cylinder_values(top_squash: f64, segments: f64, height_segments: f64) -> ParameterValues {
    [
        ("radius", 5.0),
        ("height", 10.0),
        ("topSquash", top_squash),
        ("bottomSquash", 1.0),
        ("radialSegments", segments),
        ("sphereWidthSegments", segments),
        ("sphereHeightSegments", height_segments),
    ]
    .into_iter()
    .collect()
}

/// Defaults of `kind` with every segment count it exposes lowered.
fn coarse_values(kind: ShapeKind) -> ParameterValues {
    let mut values = default_values(kind);
    for (name, count) in [
        ("radialSegments", 12.0),
        ("sphereWidthSegments", 12.0),
        ("sphereHeightSegments", 4.0),
    ] {
        if values.contains(name) {
            values.set(name, count);
        }
    }
    values
}

/// The welded surface before UV unwrapping splits it into corners.
fn composite(kind: ShapeKind, values: &ParameterValues) -> Mesh {
    let params = ShapeParams::from_values(kind, values).unwrap();
    compose(generate_volumes(&params).unwrap()).unwrap()
}

fn build_cylinder(values: &ParameterValues, mesh_scale: f64) -> RenderableMesh {
    let options = BuildOptions {
        mesh_scale,
        ..BuildOptions::default()
    };
    build_named("capped cylinder", values, &options, &TextureCache::new())
        .unwrap()
        .unwrap()
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn capped_cylinder_at_full_resolution() {
    init_tracing();

    let renderable = build_cylinder(&cylinder_values(0.5, 64.0, 32.0), 1.0);

    assert_eq!(renderable.kind, ShapeKind::CappedCylinder);
    assert_eq!(renderable.scale, 1.0);
    assert!((renderable.bounds.size.y - 17.5).abs() < 1e-6);
    assert!((renderable.bounds.max.y - 7.5).abs() < 1e-6);
    assert!((renderable.bounds.min.y + 10.0).abs() < 1e-6);
    assert!(renderable.bounds.size.x > 9.9);
    assert!(renderable.mesh.validate());

    let surface = composite(ShapeKind::CappedCylinder, &cylinder_values(0.5, 64.0, 32.0));
    assert!(surface.is_closed());
}

#[test]
fn unknown_shape_builds_nothing() {
    init_tracing();

    let built = build_named(
        "hexagon",
        &cylinder_values(0.5, 8.0, 3.0),
        &BuildOptions::default(),
        &TextureCache::new(),
    )
    .unwrap();
    assert!(built.is_none());
}

#[test]
fn zero_height_mesh_gets_flat_v() {
    let mut flat = Mesh::new();
    let a = flat.add_vertex(DVec3::new(1.0, 2.0, 0.0));
    let b = flat.add_vertex(DVec3::new(0.0, 2.0, 1.0));
    let c = flat.add_vertex(DVec3::new(-1.0, 2.0, -1.0));
    flat.add_triangle(a, b, c);

    let unwrapped = apply_cylindrical_uvs(&flat);
    for uv in unwrapped.uvs().unwrap() {
        assert!(uv.x.is_finite());
        assert_eq!(uv.y, 0.5);
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn every_shape_has_uvs_in_range() {
    init_tracing();

    for kind in ShapeKind::ALL {
        let params = ShapeParams::from_values(kind, &coarse_values(kind)).unwrap();
        let renderable = build(&params, &BuildOptions::default(), &TextureCache::new())
            .unwrap()
            .unwrap();

        let uvs = renderable.mesh.uvs().unwrap();
        assert_eq!(uvs.len(), renderable.mesh.vertex_count());
        for uv in uvs {
            assert!((0.0..1.0).contains(&uv.x), "{kind}: u = {}", uv.x);
            assert!((0.0..=1.0).contains(&uv.y), "{kind}: v = {}", uv.y);
        }
    }
}

#[test]
fn every_capped_shape_is_closed() {
    init_tracing();

    for kind in ShapeKind::ALL {
        if kind == ShapeKind::CappedSquare {
            continue;
        }
        let surface = composite(kind, &coarse_values(kind));
        assert_eq!(surface.boundary_edge_count(), 0, "{kind} has open edges");
        assert!(surface.validate(), "{kind}");
    }
}

#[test]
fn every_capped_shape_keeps_seam_on_negative_x() {
    for kind in ShapeKind::ALL {
        if kind == ShapeKind::CappedSquare {
            continue;
        }
        let params = ShapeParams::from_values(kind, &coarse_values(kind)).unwrap();
        let renderable = build(&params, &BuildOptions::default(), &TextureCache::new())
            .unwrap()
            .unwrap();
        let mesh = &renderable.mesh;

        for index in seam_straddling_triangles(mesh) {
            let corners = mesh.triangle_positions(index);
            assert!(corners.iter().all(|p| p.x <= 1e-9), "{kind}: seam off -x");
        }
    }
}

#[test]
fn octagon_with_default_domes_is_closed() {
    let kind = ShapeKind::CappedOctagon;
    let surface = composite(kind, &default_values(kind));
    assert!(surface.is_closed());
}

#[test]
fn uneven_polygon_sides_stay_closed() {
    let kind = ShapeKind::CustomPolygon;
    let mut values = default_values(kind);
    values.set("side2Radius", 8.0);
    values.set("side5Radius", 2.0);

    let surface = composite(kind, &values);
    assert!(surface.is_closed());
}

#[test]
fn cylinder_with_mismatched_segments_is_closed() {
    for (radial, width) in [(8.0, 64.0), (64.0, 8.0), (12.0, 20.0)] {
        let mut values = cylinder_values(0.5, width, 4.0);
        values.set("radialSegments", radial);

        let surface = composite(ShapeKind::CappedCylinder, &values);
        assert!(surface.is_closed(), "radial {radial}, dome {width}");
    }
}

#[test]
fn rebuilding_is_deterministic() {
    let values = cylinder_values(0.5, 12.0, 4.0);
    let first = build_cylinder(&values, 1.0);
    let second = build_cylinder(&values, 1.0);

    assert_eq!(first.mesh.vertices(), second.mesh.vertices());
    assert_eq!(first.mesh.uvs(), second.mesh.uvs());
}

#[test]
fn mesh_scale_scales_bounds_linearly() {
    let values = cylinder_values(0.5, 12.0, 4.0);
    let unit = build_cylinder(&values, 1.0);

    for k in [0.5, 2.0, 7.0] {
        let scaled = build_cylinder(&values, k);
        let expected = unit.bounds.size * k;
        assert!((scaled.bounds.size - expected).length() < 1e-9);
    }
}

#[test]
fn squash_extremes() {
    let flat = build_cylinder(&cylinder_values(0.0, 12.0, 4.0), 1.0);
    assert!((flat.bounds.max.y - 5.0).abs() < 1e-9);

    let full = build_cylinder(&cylinder_values(1.0, 12.0, 4.0), 1.0);
    assert!((full.bounds.max.y - 10.0).abs() < 1e-9);
}

#[test]
fn seam_triangles_only_on_negative_x() {
    let renderable = build_cylinder(&cylinder_values(1.0, 12.0, 4.0), 1.0);
    let mesh = &renderable.mesh;

    for index in seam_straddling_triangles(mesh) {
        let corners = mesh.triangle_positions(index);
        assert!(corners.iter().all(|p| p.x <= 1e-9));

        let min_z = corners.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
        let max_z = corners.iter().map(|p| p.z).fold(f64::NEG_INFINITY, f64::max);
        assert!(min_z <= 1e-9 && max_z >= -1e-9);
    }
}
