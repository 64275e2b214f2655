//! Basis Value-enum waarin componentwaarden en -resultaten worden
//! opgeslagen.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{
    CylinderSurface, FourPointSurface, Panel, PlaneSurface, Point3, Polygon, SphereSurface,
    Surface, Vec3,
};

/// Beschikbare waardetypes binnen de evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Een enkele numerieke waarde.
    Number(f64),
    /// Een booleaanse waarde.
    Boolean(bool),
    /// Een parametrisch oppervlak zoals de host het aanlevert.
    Surface(SurfaceValue),
    /// Een gevuld paneel als mesh (3 of 4 hoekpunten).
    Panel {
        vertices: Vec<[f64; 3]>,
        faces: Vec<Vec<u32>>,
    },
    /// Een open of gesloten polylijn.
    Polyline { points: Vec<[f64; 3]>, closed: bool },
    /// Een lijst van waarden.
    List(Vec<Value>),
}

impl Value {
    /// Geeft de variantnaam terug. Wordt gebruikt in foutmeldingen.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Surface(_) => ValueKind::Surface,
            Self::Panel { .. } => ValueKind::Panel,
            Self::Polyline { .. } => ValueKind::Polyline,
            Self::List(_) => ValueKind::List,
        }
    }

    /// Verwacht een `Number` en retourneert de f64-waarde.
    pub fn expect_number(&self) -> Result<f64, ValueError> {
        match self {
            Self::Number(value) => Ok(*value),
            _ => Err(ValueError::type_mismatch("Number", self.kind())),
        }
    }

    /// Verwacht een `Surface` en retourneert de beschrijving.
    pub fn expect_surface(&self) -> Result<&SurfaceValue, ValueError> {
        match self {
            Self::Surface(surface) => Ok(surface),
            _ => Err(ValueError::type_mismatch("Surface", self.kind())),
        }
    }

    /// Verwacht een `Panel` en retourneert de mesh-data.
    pub fn expect_panel(&self) -> Result<(&[[f64; 3]], &[Vec<u32>]), ValueError> {
        match self {
            Self::Panel { vertices, faces } => Ok((vertices, faces)),
            _ => Err(ValueError::type_mismatch("Panel", self.kind())),
        }
    }

    /// Verwacht een `Polyline` en retourneert de punten en of deze gesloten is.
    pub fn expect_polyline(&self) -> Result<(&[[f64; 3]], bool), ValueError> {
        match self {
            Self::Polyline { points, closed } => Ok((points, *closed)),
            _ => Err(ValueError::type_mismatch("Polyline", self.kind())),
        }
    }

    /// Verwacht een lijst en geeft een slice terug.
    pub fn expect_list(&self) -> Result<&[Value], ValueError> {
        match self {
            Self::List(values) => Ok(values),
            _ => Err(ValueError::type_mismatch("List", self.kind())),
        }
    }
}

impl From<&Panel> for Value {
    fn from(panel: &Panel) -> Self {
        let fill = panel.fill();
        Self::Panel {
            vertices: fill.positions.clone(),
            faces: fill.faces(),
        }
    }
}

impl From<&Polygon> for Value {
    fn from(polygon: &Polygon) -> Self {
        Self::Polyline {
            points: polygon.points().iter().map(|p| p.to_array()).collect(),
            closed: true,
        }
    }
}

/// Typefout voor wanneer een `Value` naar het verkeerde type wordt
/// geconverteerd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    expected: &'static str,
    found: ValueKind,
}

impl ValueError {
    #[must_use]
    pub fn type_mismatch(expected: &'static str, found: ValueKind) -> Self {
        Self { expected, found }
    }

    #[must_use]
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    #[must_use]
    pub fn found(&self) -> ValueKind {
        self.found
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "verwachtte type `{}` maar kreeg `{}`",
            self.expected, self.found
        )
    }
}

impl std::error::Error for ValueError {}

/// Beschrijft het soort `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Boolean,
    Surface,
    Panel,
    Polyline,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Surface => "Surface",
            Self::Panel => "Panel",
            Self::Polyline => "Polyline",
            Self::List => "List",
        };
        f.write_str(name)
    }
}

/// Beschrijving van een parametrisch oppervlak zoals die over de
/// host-grens komt. Wordt pas bij evaluatie omgezet naar een `Surface`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceValue {
    Plane {
        origin: [f64; 3],
        u_axis: [f64; 3],
        v_axis: [f64; 3],
    },
    /// Hoekpunten in de volgorde `p00, p10, p01[, p11]`.
    FourPoint { corners: Vec<[f64; 3]> },
    Cylinder {
        base: [f64; 3],
        axis: [f64; 3],
        radius: f64,
    },
    Sphere { center: [f64; 3], radius: f64 },
}

impl SurfaceValue {
    /// Bouwt het bijbehorende geometrie-oppervlak.
    pub fn to_surface(&self) -> Result<Box<dyn Surface>, String> {
        let surface: Box<dyn Surface> = match self {
            Self::Plane {
                origin,
                u_axis,
                v_axis,
            } => Box::new(PlaneSurface::new(
                Point3::from_array(*origin),
                Vec3::from_array(*u_axis),
                Vec3::from_array(*v_axis),
            )),
            Self::FourPoint { corners } => {
                let corners: Vec<Point3> = corners.iter().copied().map(Point3::from).collect();
                Box::new(FourPointSurface::from_points(&corners)?)
            }
            Self::Cylinder { base, axis, radius } => Box::new(CylinderSurface::new(
                Point3::from_array(*base),
                Vec3::from_array(*axis),
                *radius,
            )?),
            Self::Sphere { center, radius } => {
                Box::new(SphereSurface::new(Point3::from_array(*center), *radius)?)
            }
        };
        Ok(surface)
    }
}
