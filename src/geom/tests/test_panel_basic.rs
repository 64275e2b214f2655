use crate::geom::{
    CylinderSurface, FourPointSurface, GridIndex, PanelConstructionError, PanelError,
    PlaneSurface, Point3, Surface, Tolerance, Vec3, quad_panel, quad_panel_with_tolerance,
};

fn unit_plane() -> PlaneSurface {
    PlaneSurface::new(Point3::ORIGIN, Vec3::X, Vec3::Y)
}

fn warped_patch() -> FourPointSurface {
    FourPointSurface::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 1.0),
        Point3::new(0.0, 3.0, -1.0),
        Point3::new(4.0, 3.0, 2.0),
    )
}

fn bits(p: Point3) -> [u64; 3] {
    [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
}

#[test]
fn quad_panel_output_lengths_match_grid() {
    let result = quad_panel(&unit_plane(), 3, 5).unwrap();
    assert_eq!(result.panels.len(), 15);
    assert_eq!(result.polygons.len(), 15);
    assert!(result.panels.iter().all(|panel| panel.points().len() == 4));
}

#[test]
fn quad_panel_polygons_match_panel_boundaries() {
    let result = quad_panel(&warped_patch(), 4, 2).unwrap();
    for (panel, polygon) in result.panels.iter().zip(&result.polygons) {
        assert_eq!(panel.polygon(), polygon);
    }
}

#[test]
fn quad_panel_corners_follow_parameter_grid() {
    let surface = warped_patch();
    let (u, v) = (4usize, 3usize);
    let us = 1.0 / u as f64;
    let vs = 1.0 / v as f64;
    let result = quad_panel(&surface, u, v).unwrap();

    for i in 0..u {
        for j in 0..v {
            let panel = &result.panels[i * v + j];
            let (i0, i1) = (i as f64 * us, (i + 1) as f64 * us);
            let (j0, j1) = (j as f64 * vs, (j + 1) as f64 * vs);
            assert_eq!(
                panel.points(),
                &[
                    surface.point_at(i0, j0),
                    surface.point_at(i1, j0),
                    surface.point_at(i1, j1),
                    surface.point_at(i0, j1),
                ]
            );
        }
    }
}

#[test]
fn quad_panel_is_row_major_with_i_outer() {
    let result = quad_panel(&unit_plane(), 3, 2).unwrap();
    let cells: Vec<GridIndex> = result.panels.iter().filter_map(|p| p.cell()).collect();
    assert_eq!(
        cells,
        vec![
            GridIndex::new(0, 0),
            GridIndex::new(0, 1),
            GridIndex::new(1, 0),
            GridIndex::new(1, 1),
            GridIndex::new(2, 0),
            GridIndex::new(2, 1),
        ]
    );
}

#[test]
fn quad_panel_neighbors_share_exact_corners() {
    let (u, v) = (5usize, 4usize);
    let result = quad_panel(&warped_patch(), u, v).unwrap();
    let at = |i: usize, j: usize| result.panels[i * v + j].points();

    for i in 0..u {
        for j in 0..v {
            if i + 1 < u {
                // shared edge along u: B/C of (i, j) are A/D of (i+1, j)
                assert_eq!(bits(at(i, j)[1]), bits(at(i + 1, j)[0]));
                assert_eq!(bits(at(i, j)[2]), bits(at(i + 1, j)[3]));
            }
            if j + 1 < v {
                assert_eq!(bits(at(i, j)[3]), bits(at(i, j + 1)[0]));
                assert_eq!(bits(at(i, j)[2]), bits(at(i, j + 1)[1]));
            }
        }
    }
}

#[test]
fn quad_panel_tiles_the_plane_without_gaps() {
    let plane = PlaneSurface::new(Point3::ORIGIN, Vec3::new(6.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
    let result = quad_panel(&plane, 4, 4).unwrap();
    let total: f64 = result.panels.iter().map(|panel| panel.area()).sum();
    assert!((total - 12.0).abs() < 1e-9);
    assert!(
        result
            .panels
            .iter()
            .all(|panel| (panel.area() - 0.75).abs() < 1e-12)
    );
}

#[test]
fn quad_panel_is_deterministic() {
    let surface = warped_patch();
    let first = quad_panel(&surface, 7, 3).unwrap();
    let second = quad_panel(&surface, 7, 3).unwrap();

    assert_eq!(first, second);
    for (a, b) in first.panels.iter().zip(&second.panels) {
        let a_bits: Vec<_> = a.points().iter().map(|p| bits(*p)).collect();
        let b_bits: Vec<_> = b.points().iter().map(|p| bits(*p)).collect();
        assert_eq!(a_bits, b_bits);
    }
}

#[test]
fn quad_panel_rejects_zero_divisions() {
    let err = quad_panel(&unit_plane(), 0, 5).unwrap_err();
    assert!(matches!(
        err,
        PanelError::InvalidArgument {
            name: "Udivision",
            ..
        }
    ));

    let err = quad_panel(&unit_plane(), 3, 0).unwrap_err();
    assert!(matches!(
        err,
        PanelError::InvalidArgument {
            name: "Vdivision",
            ..
        }
    ));
}

/// Forwards `point_at` through a trait object boundary.
struct Reparameterized<S>(S);

impl<S: Surface> Surface for Reparameterized<S> {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.0.point_at(u, v)
    }
}

#[test]
fn quad_panel_depends_only_on_point_at() {
    let surface = warped_patch();
    let direct = quad_panel(&surface, 3, 4).unwrap();
    let wrapped = quad_panel(&Reparameterized(surface), 3, 4).unwrap();
    assert_eq!(direct, wrapped);
}

/// Collapses the whole parameter square onto a segment.
struct Collapsed;

impl Surface for Collapsed {
    fn point_at(&self, u: f64, _v: f64) -> Point3 {
        Point3::new(u, 0.0, 0.0)
    }
}

#[test]
fn degenerate_surface_fails_whole_call() {
    let err = quad_panel(&Collapsed, 2, 2).unwrap_err();
    assert!(matches!(
        err,
        PanelError::GeometryConstruction(PanelConstructionError::Degenerate { .. })
    ));
}

#[test]
fn coarse_tolerance_keeps_small_panels() {
    // 5e-4 wide panels, far above a 1e-6 tolerance
    let tiny = PlaneSurface::new(Point3::ORIGIN, Vec3::new(1e-3, 0.0, 0.0), Vec3::new(0.0, 1e-3, 0.0));
    let result = quad_panel_with_tolerance(&tiny, 2, 2, Tolerance::LOOSE).unwrap();
    assert_eq!(result.panels.len(), 4);
}

#[test]
fn coarse_tolerance_rejects_slivers() {
    let sliver = PlaneSurface::new(Point3::ORIGIN, Vec3::X, Vec3::new(0.0, 1e-7, 0.0));
    assert!(quad_panel(&sliver, 2, 2).is_ok());
    assert!(matches!(
        quad_panel_with_tolerance(&sliver, 2, 2, Tolerance::LOOSE),
        Err(PanelError::GeometryConstruction(
            PanelConstructionError::Degenerate { .. }
        ))
    ));
}

#[test]
fn cylinder_panels_close_around_the_seam() {
    let cylinder = CylinderSurface::new(Point3::ORIGIN, Vec3::new(0.0, 0.0, 3.0), 1.0).unwrap();
    let (u, v) = (8usize, 2usize);
    let result = quad_panel(&cylinder, u, v).unwrap();
    assert_eq!(result.panels.len(), 16);

    let tol = Tolerance::new(1e-9);
    let first = result.panels[0].points();
    let last = result.panels[(u - 1) * v].points();
    assert!(tol.approx_eq_point3(last[1], first[0]));
    assert!(tol.approx_eq_point3(last[2], first[3]));

    // an octagonal facet is flat, so every panel stays planar
    assert!(
        result
            .panels
            .iter()
            .all(|panel| panel.planarity_deviation() < 1e-9)
    );
}
