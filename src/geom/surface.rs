use super::core::{Point3, Vec3};

fn wrap_unit(value: f64) -> f64 {
    let t = value % 1.0;
    if t < 0.0 { t + 1.0 } else { t }
}

fn orthogonal_unit_vector(reference: Vec3) -> Vec3 {
    let candidate = if reference.x.abs() < reference.y.abs() {
        Vec3::new(0.0, -reference.z, reference.y)
    } else {
        Vec3::new(-reference.z, 0.0, reference.x)
    };

    candidate
        .normalized()
        .unwrap_or_else(|| Vec3::new(1.0, 0.0, 0.0))
}

/// A parametric patch addressed by normalized `(u, v)` in `[0, 1]²`.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    pub origin: Point3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

impl PlaneSurface {
    #[must_use]
    pub const fn new(origin: Point3, u_axis: Vec3, v_axis: Vec3) -> Self {
        Self {
            origin,
            u_axis,
            v_axis,
        }
    }
}

impl Surface for PlaneSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin
            .add_vec(self.u_axis.mul_scalar(u))
            .add_vec(self.v_axis.mul_scalar(v))
    }
}

/// A bilinear patch through four corner points:
/// - `p00` at (u=0, v=0)
/// - `p10` at (u=1, v=0)
/// - `p01` at (u=0, v=1)
/// - `p11` at (u=1, v=1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourPointSurface {
    pub p00: Point3,
    pub p10: Point3,
    pub p01: Point3,
    pub p11: Point3,
}

impl FourPointSurface {
    #[must_use]
    pub const fn new(p00: Point3, p10: Point3, p01: Point3, p11: Point3) -> Self {
        Self { p00, p10, p01, p11 }
    }

    /// Builds the patch from 3 or 4 corners in `p00, p10, p01[, p11]` order.
    /// With 3 corners the fourth completes the parallelogram.
    pub fn from_points(points: &[Point3]) -> Result<Self, String> {
        match points {
            [p00, p10, p01] => Ok(Self::new(
                *p00,
                *p10,
                *p01,
                Point3::new(
                    p10.x + p01.x - p00.x,
                    p10.y + p01.y - p00.y,
                    p10.z + p01.z - p00.z,
                ),
            )),
            [p00, p10, p01, p11] => Ok(Self::new(*p00, *p10, *p01, *p11)),
            _ => Err(format!(
                "FourPointSurface requires 3 or 4 corner points, got {}",
                points.len()
            )),
        }
    }
}

impl Surface for FourPointSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let s = 1.0 - u;
        let t = 1.0 - v;

        Point3::new(
            s * t * self.p00.x + u * t * self.p10.x + s * v * self.p01.x + u * v * self.p11.x,
            s * t * self.p00.y + u * t * self.p10.y + s * v * self.p01.y + u * v * self.p11.y,
            s * t * self.p00.z + u * t * self.p10.z + s * v * self.p01.z + u * v * self.p11.z,
        )
    }
}

/// Cylinder side surface; `u` runs once around the axis, `v` along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSurface {
    pub base: Point3,
    pub axis: Vec3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub radius: f64,
}

impl CylinderSurface {
    pub fn new(base: Point3, axis: Vec3, radius: f64) -> Result<Self, String> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err("cylinder radius must be finite and > 0".to_string());
        }

        let axis_dir = axis
            .normalized()
            .ok_or_else(|| "cylinder axis must be non-zero".to_string())?;
        let x_axis = orthogonal_unit_vector(axis_dir);
        let y_axis = axis_dir
            .cross(x_axis)
            .normalized()
            .unwrap_or_else(|| Vec3::new(0.0, 1.0, 0.0));

        Ok(Self {
            base,
            axis,
            x_axis,
            y_axis,
            radius,
        })
    }
}

impl Surface for CylinderSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        // u = 1.0 must land on the seam, not wrap back past it
        let u = if u >= 1.0 { 1.0 } else { wrap_unit(u) };
        let angle = std::f64::consts::TAU * u;
        let radial = self
            .x_axis
            .mul_scalar(angle.cos())
            .add(self.y_axis.mul_scalar(angle.sin()))
            .mul_scalar(self.radius);

        self.base
            .add_vec(self.axis.mul_scalar(v))
            .add_vec(radial)
    }
}

/// Sphere with poles at `v = 0` and `v = 1`.
///
/// Diamond panelization always fails on a sphere: the triangles at the poles
/// collapse to zero area and are reported as degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSurface {
    pub center: Point3,
    pub radius: f64,
}

impl SphereSurface {
    pub fn new(center: Point3, radius: f64) -> Result<Self, String> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err("sphere radius must be finite and > 0".to_string());
        }

        Ok(Self { center, radius })
    }
}

impl Surface for SphereSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let u = if u >= 1.0 { 1.0 } else { wrap_unit(u) };
        let v = v.clamp(0.0, 1.0);

        let theta = std::f64::consts::TAU * u;
        let phi = std::f64::consts::PI * (v - 0.5);
        let cos_phi = phi.cos();

        self.center.add_vec(
            Vec3::new(cos_phi * theta.cos(), cos_phi * theta.sin(), phi.sin())
                .mul_scalar(self.radius),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_unit_keeps_values_in_range() {
        assert_eq!(wrap_unit(0.25), 0.25);
        assert_eq!(wrap_unit(1.25), 0.25);
        assert_eq!(wrap_unit(-0.25), 0.75);
    }

    #[test]
    fn four_point_surface_completes_parallelogram() {
        let surface = FourPointSurface::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(surface.p11, Point3::new(2.0, 1.0, 0.0));
        assert!(FourPointSurface::from_points(&[Point3::ORIGIN]).is_err());
    }

    #[test]
    fn plane_is_affine_in_both_parameters() {
        let plane = PlaneSurface::new(Point3::new(1.0, 0.0, 0.0), Vec3::X, Vec3::Y);
        assert_eq!(plane.point_at(0.3, 0.5), Point3::new(1.3, 0.5, 0.0));
        assert_eq!(plane.point_at(-1.0, 2.0), Point3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn invalid_primitives_are_rejected() {
        assert!(CylinderSurface::new(Point3::ORIGIN, Vec3::Z, 0.0).is_err());
        assert!(CylinderSurface::new(Point3::ORIGIN, Vec3::ZERO, 1.0).is_err());
        assert!(SphereSurface::new(Point3::ORIGIN, f64::NAN).is_err());
    }
}
