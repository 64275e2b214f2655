//! Surface panelization: quad grids and diamond/triangle tessellations over a
//! parametric surface.
//!
//! Both panelizers only ever call [`Surface::point_at`], so the output depends
//! on nothing but the sampled points.

use super::core::{BBox, Point3, Tolerance, Vec3};
use super::mesh::GeomMesh;
use super::surface::Surface;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelConstructionError {
    #[error("boundary loop requires at least {min} points, got {count}")]
    NotEnoughPoints { min: usize, count: usize },
    #[error("panel boundary must have 3 or 4 points, got {count}")]
    UnsupportedPointCount { count: usize },
    #[error("boundary point {index} is not finite")]
    NonFinitePoint { index: usize },
    #[error("panel boundary is degenerate (area {area})")]
    Degenerate { area: f64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    #[error("{name} must be a positive division count, got {value}")]
    InvalidArgument { name: &'static str, value: f64 },
    #[error("grid of {u_divisions}x{v_divisions} divisions is too large")]
    GridTooLarge {
        u_divisions: usize,
        v_divisions: usize,
    },
    #[error("panel construction failed: {0}")]
    GeometryConstruction(#[from] PanelConstructionError),
}

/// Grid coordinates of the cell (quad mode) or dual vertex (diamond mode)
/// a panel was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridIndex {
    pub i: usize,
    pub j: usize,
}

impl GridIndex {
    #[must_use]
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Polygon / Panel
// ─────────────────────────────────────────────────────────────────────────────

/// A closed boundary loop without fill. The closing edge is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point3>,
}

impl Polygon {
    pub fn by_points(points: Vec<Point3>) -> Result<Self, PanelConstructionError> {
        if points.len() < 3 {
            return Err(PanelConstructionError::NotEnoughPoints {
                min: 3,
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PanelConstructionError::NonFinitePoint { index });
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn is_triangle(&self) -> bool {
        self.points.len() == 3
    }

    /// Edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        let n = self.points.len();
        (0..n).map(move |k| (self.points[k], self.points[(k + 1) % n]))
    }

    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance_to(b)).sum()
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        let n = self.points.len() as f64;
        let sum = self
            .points
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc.add(p.to_vec3()));
        Point3::ORIGIN.add_vec(sum.mul_scalar(1.0 / n))
    }

    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.points)
    }

    /// Newell vector: twice the projected area, along the loop normal.
    fn newell_vector(&self) -> Vec3 {
        self.edges()
            .fold(Vec3::ZERO, |acc, (a, b)| acc.add(a.to_vec3().cross(b.to_vec3())))
    }
}

/// A filled panel: its boundary loop plus a fan-triangulated fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    polygon: Polygon,
    fill: GeomMesh,
    cell: Option<GridIndex>,
}

impl Panel {
    pub fn by_perimeter_points(points: &[Point3]) -> Result<Self, PanelConstructionError> {
        Self::by_perimeter_points_with_tolerance(points, Tolerance::default_geom())
    }

    /// Builds a panel from 3 or 4 boundary points.
    ///
    /// Planarity is not enforced. The loop is rejected when its mean width
    /// (triangulated area over the longest edge) is within `tol`.
    pub fn by_perimeter_points_with_tolerance(
        points: &[Point3],
        tol: Tolerance,
    ) -> Result<Self, PanelConstructionError> {
        if !(3..=4).contains(&points.len()) {
            return Err(PanelConstructionError::UnsupportedPointCount {
                count: points.len(),
            });
        }

        let polygon = Polygon::by_points(points.to_vec())?;
        let area = fan_area(polygon.points());
        let longest_edge = polygon
            .edges()
            .map(|(a, b)| a.distance_to(b))
            .fold(0.0, f64::max);
        if !area.is_finite() || area <= tol.eps * longest_edge {
            return Err(PanelConstructionError::Degenerate { area });
        }

        let fill = GeomMesh::fan(polygon.points());
        Ok(Self {
            polygon,
            fill,
            cell: None,
        })
    }

    #[must_use]
    fn at(mut self, cell: GridIndex) -> Self {
        self.cell = Some(cell);
        self
    }

    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        self.polygon.points()
    }

    #[must_use]
    pub fn fill(&self) -> &GeomMesh {
        &self.fill
    }

    /// Grid cell or dual vertex this panel was generated from.
    #[must_use]
    pub fn cell(&self) -> Option<GridIndex> {
        self.cell
    }

    #[must_use]
    pub fn is_triangle(&self) -> bool {
        self.polygon.is_triangle()
    }

    /// Area of the triangulated fill.
    #[must_use]
    pub fn area(&self) -> f64 {
        fan_area(self.polygon.points())
    }

    #[must_use]
    pub fn normal(&self) -> Option<Vec3> {
        self.polygon.newell_vector().normalized()
    }

    /// Largest distance of a corner from the best-fit plane through the
    /// centroid. Zero for triangles.
    #[must_use]
    pub fn planarity_deviation(&self) -> f64 {
        if self.is_triangle() {
            return 0.0;
        }
        let Some(normal) = self.normal() else {
            return 0.0;
        };
        let centroid = self.polygon.centroid();
        self.points()
            .iter()
            .map(|p| p.sub_point(centroid).dot(normal).abs())
            .fold(0.0, f64::max)
    }
}

fn fan_area(points: &[Point3]) -> f64 {
    let Some((&origin, rest)) = points.split_first() else {
        return 0.0;
    };
    rest.windows(2)
        .map(|w| w[0].sub_point(origin).cross(w[1].sub_point(origin)).length() * 0.5)
        .sum()
}

// ─────────────────────────────────────────────────────────────────────────────
// Panelizers
// ─────────────────────────────────────────────────────────────────────────────

/// Output of [`quad_panel`]: one panel and one polygon per grid cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuadPanels {
    pub panels: Vec<Panel>,
    pub polygons: Vec<Polygon>,
}

/// Output of [`diamond_panel`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiamondPanels {
    pub diamonds: Vec<Panel>,
    pub triangles: Vec<Panel>,
}

/// Initial capacity cap; larger grids grow their output vectors on demand.
const RESERVE_LIMIT: usize = 1 << 16;

/// Uniform parameter steps; every sample goes through [`ParamGrid::point`] so
/// shared corners are evaluated at bit-identical parameters.
#[derive(Debug, Clone, Copy)]
struct ParamGrid {
    u_step: f64,
    v_step: f64,
    /// Number of cells (quad mode) or dual vertices (diamond mode).
    sites: usize,
}

impl ParamGrid {
    /// Grid over the `U × V` cells.
    fn cells(u_divisions: usize, v_divisions: usize) -> Result<Self, PanelError> {
        Self::validate(u_divisions, v_divisions)?;
        let sites = u_divisions
            .checked_mul(v_divisions)
            .ok_or(PanelError::GridTooLarge {
                u_divisions,
                v_divisions,
            })?;
        Ok(Self::with_sites(u_divisions, v_divisions, sites))
    }

    /// Grid over the `(U + 1) × (V + 1)` dual vertices.
    fn vertices(u_divisions: usize, v_divisions: usize) -> Result<Self, PanelError> {
        Self::validate(u_divisions, v_divisions)?;
        let too_large = PanelError::GridTooLarge {
            u_divisions,
            v_divisions,
        };
        let sites = u_divisions
            .checked_add(1)
            .zip(v_divisions.checked_add(1))
            .and_then(|(u, v)| u.checked_mul(v))
            .ok_or(too_large)?;
        Ok(Self::with_sites(u_divisions, v_divisions, sites))
    }

    fn with_sites(u_divisions: usize, v_divisions: usize, sites: usize) -> Self {
        Self {
            u_step: 1.0 / u_divisions as f64,
            v_step: 1.0 / v_divisions as f64,
            sites,
        }
    }

    fn validate(u_divisions: usize, v_divisions: usize) -> Result<(), PanelError> {
        if u_divisions == 0 {
            return Err(PanelError::InvalidArgument {
                name: "Udivision",
                value: 0.0,
            });
        }
        if v_divisions == 0 {
            return Err(PanelError::InvalidArgument {
                name: "Vdivision",
                value: 0.0,
            });
        }
        Ok(())
    }

    fn point<S: Surface + ?Sized>(&self, surface: &S, i: usize, j: usize) -> Point3 {
        surface.point_at(i as f64 * self.u_step, j as f64 * self.v_step)
    }
}

pub fn quad_panel<S: Surface + ?Sized>(
    surface: &S,
    u_divisions: usize,
    v_divisions: usize,
) -> Result<QuadPanels, PanelError> {
    quad_panel_with_tolerance(surface, u_divisions, v_divisions, Tolerance::default_geom())
}

/// Divides the surface into `u_divisions × v_divisions` quadrilateral panels.
///
/// Cells are visited `i` outer, `j` inner; corners are emitted as
/// `(i, j)`, `(i+1, j)`, `(i+1, j+1)`, `(i, j+1)`.
pub fn quad_panel_with_tolerance<S: Surface + ?Sized>(
    surface: &S,
    u_divisions: usize,
    v_divisions: usize,
    tol: Tolerance,
) -> Result<QuadPanels, PanelError> {
    let grid = ParamGrid::cells(u_divisions, v_divisions)?;

    let reserve = grid.sites.min(RESERVE_LIMIT);
    let mut panels = Vec::with_capacity(reserve);
    let mut polygons = Vec::with_capacity(reserve);

    for i in 0..u_divisions {
        for j in 0..v_divisions {
            let corners = [
                grid.point(surface, i, j),
                grid.point(surface, i + 1, j),
                grid.point(surface, i + 1, j + 1),
                grid.point(surface, i, j + 1),
            ];

            let panel = Panel::by_perimeter_points_with_tolerance(&corners, tol)?
                .at(GridIndex::new(i, j));
            polygons.push(panel.polygon().clone());
            panels.push(panel);
        }
    }

    log::debug!(
        "quad_panel {}x{}: {} panels",
        u_divisions,
        v_divisions,
        panels.len()
    );

    Ok(QuadPanels { panels, polygons })
}

/// Position of a dual-grid vertex relative to the parametric boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualSite {
    Interior,
    /// `(0, 0)`
    CornerUStartVStart,
    /// `(0, V)`
    CornerUStartVEnd,
    /// `(U, 0)`
    CornerUEndVStart,
    /// `(U, V)`
    CornerUEndVEnd,
    /// `i = 0`, corners excluded.
    EdgeUStart,
    /// `i = U`, corners excluded.
    EdgeUEnd,
    /// `j = 0`, corners excluded.
    EdgeVStart,
    /// `j = V`, corners excluded.
    EdgeVEnd,
}

impl DualSite {
    #[must_use]
    pub fn classify(i: usize, j: usize, u_divisions: usize, v_divisions: usize) -> Self {
        let u_start = i == 0;
        let u_end = i == u_divisions;
        let v_start = j == 0;
        let v_end = j == v_divisions;

        match (u_start, u_end, v_start, v_end) {
            (true, _, true, _) => Self::CornerUStartVStart,
            (true, _, _, true) => Self::CornerUStartVEnd,
            (_, true, true, _) => Self::CornerUEndVStart,
            (_, true, _, true) => Self::CornerUEndVEnd,
            (true, _, _, _) => Self::EdgeUStart,
            (_, true, _, _) => Self::EdgeUEnd,
            (_, _, true, _) => Self::EdgeVStart,
            (_, _, _, true) => Self::EdgeVEnd,
            _ => Self::Interior,
        }
    }

    /// Boundary points in emission order. `A`, `B`, `C`, `D` are the
    /// neighbors at `i-1`, `j-1`, `i+1`, `j+1`, already collapsed onto the
    /// center where the step would leave the surface.
    #[must_use]
    pub fn boundary(self, [a, b, c, d]: [Point3; 4]) -> Vec<Point3> {
        match self {
            Self::Interior => vec![a, b, c, d],
            Self::CornerUStartVStart | Self::CornerUStartVEnd | Self::EdgeUStart => vec![b, c, d],
            Self::CornerUEndVStart => vec![c, d, a],
            Self::CornerUEndVEnd | Self::EdgeVEnd => vec![a, b, c],
            Self::EdgeUEnd => vec![a, b, d],
            Self::EdgeVStart => vec![a, c, d],
        }
    }
}

pub fn diamond_panel<S: Surface + ?Sized>(
    surface: &S,
    u_divisions: usize,
    v_divisions: usize,
) -> Result<DiamondPanels, PanelError> {
    diamond_panel_with_tolerance(surface, u_divisions, v_divisions, Tolerance::default_geom())
}

/// Tessellates the surface with diamonds centered on the even vertices of the
/// dual grid, and triangles where those diamonds are clipped by the boundary.
///
/// Dual vertices `(i, j)` with `i ∈ [0, U]`, `j ∈ [0, V]` are visited `i`
/// outer, `j` inner; only `(i + j) % 2 == 0` yields a panel.
pub fn diamond_panel_with_tolerance<S: Surface + ?Sized>(
    surface: &S,
    u_divisions: usize,
    v_divisions: usize,
    tol: Tolerance,
) -> Result<DiamondPanels, PanelError> {
    let grid = ParamGrid::vertices(u_divisions, v_divisions)?;

    let even_sites = grid.sites.div_ceil(2).min(RESERVE_LIMIT);
    let mut diamonds = Vec::with_capacity(even_sites);
    let mut triangles = Vec::new();

    for i in 0..=u_divisions {
        for j in 0..=v_divisions {
            if (i + j) % 2 != 0 {
                continue;
            }

            let center = grid.point(surface, i, j);
            let a = if i > 0 { grid.point(surface, i - 1, j) } else { center };
            let b = if j > 0 { grid.point(surface, i, j - 1) } else { center };
            let c = if i < u_divisions { grid.point(surface, i + 1, j) } else { center };
            let d = if j < v_divisions { grid.point(surface, i, j + 1) } else { center };

            let site = DualSite::classify(i, j, u_divisions, v_divisions);
            let panel =
                Panel::by_perimeter_points_with_tolerance(&site.boundary([a, b, c, d]), tol)?
                    .at(GridIndex::new(i, j));

            if site == DualSite::Interior {
                diamonds.push(panel);
            } else {
                triangles.push(panel);
            }
        }
    }

    log::debug!(
        "diamond_panel {}x{}: {} diamonds, {} triangles",
        u_divisions,
        v_divisions,
        diamonds.len(),
        triangles.len()
    );

    Ok(DiamondPanels {
        diamonds,
        triangles,
    })
}
