use crate::geom::{
    CylinderSurface, FourPointSurface, PlaneSurface, Point3, SphereSurface, Surface, Tolerance,
    Vec3,
};

#[test]
fn plane_maps_unit_square_onto_axes() {
    let plane = PlaneSurface::new(
        Point3::new(1.0, 1.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
    );
    assert_eq!(plane.point_at(0.0, 0.0), Point3::new(1.0, 1.0, 0.0));
    assert_eq!(plane.point_at(1.0, 1.0), Point3::new(3.0, 4.0, 0.0));
    assert_eq!(plane.point_at(0.5, 0.0), Point3::new(2.0, 1.0, 0.0));
}

#[test]
fn four_point_surface_interpolates_corners() {
    let surface = FourPointSurface::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
    );
    assert_eq!(surface.point_at(1.0, 1.0), Point3::new(1.0, 1.0, 1.0));
    assert_eq!(surface.point_at(0.5, 0.5), Point3::new(0.5, 0.5, 0.25));
    // parameters outside the unit square are clamped
    assert_eq!(surface.point_at(2.0, -1.0), surface.point_at(1.0, 0.0));
}

#[test]
fn flat_four_point_patch_stays_in_its_plane() {
    let flat = FourPointSurface::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(2.0, 2.0, 0.0),
    );
    let tol = Tolerance::new(1e-12);
    for (u, v) in [(0.0, 0.0), (0.25, 0.75), (0.5, 0.5), (1.0, 1.0)] {
        let p = flat.point_at(u, v);
        assert!(tol.approx_eq_f64(p.z, 0.0));
        assert!(tol.approx_eq_point3(p, Point3::new(2.0 * u, 2.0 * v, 0.0)));
    }
}

#[test]
fn cylinder_seam_is_closed() {
    let cylinder = CylinderSurface::new(Point3::ORIGIN, Vec3::new(0.0, 0.0, 2.0), 1.5).unwrap();
    let tol = Tolerance::new(1e-9);

    assert!(tol.approx_eq_point3(cylinder.point_at(0.0, 0.3), cylinder.point_at(1.0, 0.3)));
    let p = cylinder.point_at(0.25, 1.0);
    assert!(tol.approx_eq_f64(p.z, 2.0));
    assert!(tol.approx_eq_f64(p.x.hypot(p.y), 1.5));
}

#[test]
fn sphere_collapses_to_poles() {
    let sphere = SphereSurface::new(Point3::new(0.0, 0.0, 1.0), 2.0).unwrap();
    let tol = Tolerance::new(1e-9);

    assert!(tol.approx_eq_point3(sphere.point_at(0.0, 0.0), sphere.point_at(0.4, 0.0)));
    assert!(tol.approx_eq_point3(sphere.point_at(0.0, 0.0), Point3::new(0.0, 0.0, -1.0)));
    assert!(tol.approx_eq_point3(sphere.point_at(0.7, 1.0), Point3::new(0.0, 0.0, 3.0)));
    let equator = sphere.point_at(0.0, 0.5);
    assert!(tol.approx_eq_point3(equator, Point3::new(2.0, 0.0, 1.0)));
}
