mod core;
mod mesh;
mod panel;
mod surface;

pub use core::{BBox, Point3, Tolerance, Vec3};
pub use mesh::GeomMesh;
pub use panel::{
    DiamondPanels, DualSite, GridIndex, Panel, PanelConstructionError, PanelError, Polygon,
    QuadPanels, diamond_panel, diamond_panel_with_tolerance, quad_panel,
    quad_panel_with_tolerance,
};
pub use surface::{CylinderSurface, FourPointSurface, PlaneSurface, SphereSurface, Surface};

#[cfg(test)]
mod tests;
