//! Componenten die een oppervlak opdelen in panelen: "Quad Panel" en
//! "Diamond Panel".

use std::collections::BTreeMap;

use log::debug;

use crate::geom::{diamond_panel_with_tolerance, quad_panel_with_tolerance};
use crate::graph::node::MetaMap;
use crate::graph::value::Value;

use super::coerce::{coerce_division_count, coerce_surface, coerce_tolerance};
use super::{Component, ComponentError, ComponentResult};

const PIN_INPUT_SURFACE: &str = "Surface";
const PIN_INPUT_U: &str = "Udivision";
const PIN_INPUT_V: &str = "Vdivision";

pub const PIN_OUTPUT_PANELS: &str = "Panels";
pub const PIN_OUTPUT_POLYGONS: &str = "Polygons";
pub const PIN_OUTPUT_DIAMONDS: &str = "DiamondPanel";
pub const PIN_OUTPUT_TRIANGLES: &str = "TrianglePanel";

const INPUT_PINS: &[&str] = &[PIN_INPUT_SURFACE, PIN_INPUT_U, PIN_INPUT_V];

/// Beschikbare panelisatiecomponenten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    QuadPanel,
    DiamondPanel,
}

/// Metadata voor registraties in de componentregistry.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub guids: &'static [&'static str],
    pub names: &'static [&'static str],
    pub kind: ComponentKind,
}

/// Registraties van alle panelisatiecomponenten.
pub const REGISTRATIONS: &[Registration] = &[
    Registration {
        guids: &["{6f4a8d2e-5c1b-4e7a-9b3d-2a8c7e1f0b41}"],
        names: &["Quad Panel", "QuadPanel"],
        kind: ComponentKind::QuadPanel,
    },
    Registration {
        guids: &["{b2d9e417-83c6-4f05-a1e8-7c3f9d20a6b5}"],
        names: &["Diamond Panel", "DiamondPanel"],
        kind: ComponentKind::DiamondPanel,
    },
];

impl Component for ComponentKind {
    fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult {
        match self {
            Self::QuadPanel => evaluate_quad_panel(inputs, meta, self.name()),
            Self::DiamondPanel => evaluate_diamond_panel(inputs, meta, self.name()),
        }
    }
}

impl ComponentKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuadPanel => "Quad Panel",
            Self::DiamondPanel => "Diamond Panel",
        }
    }

    #[must_use]
    pub fn input_pins(&self) -> &'static [&'static str] {
        INPUT_PINS
    }

    #[must_use]
    pub fn output_pins(&self) -> &'static [&'static str] {
        match self {
            Self::QuadPanel => &[PIN_OUTPUT_PANELS, PIN_OUTPUT_POLYGONS],
            Self::DiamondPanel => &[PIN_OUTPUT_DIAMONDS, PIN_OUTPUT_TRIANGLES],
        }
    }
}

fn evaluate_quad_panel(inputs: &[Value], meta: &MetaMap, component: &str) -> ComponentResult {
    if inputs.len() < 3 {
        return Err(ComponentError::new(format!(
            "{} vereist een surface en twee divisie-aantallen",
            component
        )));
    }

    let u_divisions = coerce_division_count(inputs.get(1), PIN_INPUT_U)?;
    let v_divisions = coerce_division_count(inputs.get(2), PIN_INPUT_V)?;
    let tolerance = coerce_tolerance(meta)?;
    let surface = coerce_surface(inputs.first())?;

    let result = quad_panel_with_tolerance(surface.as_ref(), u_divisions, v_divisions, tolerance)?;
    debug!(
        "{}: {}x{} -> {} panelen",
        component,
        u_divisions,
        v_divisions,
        result.panels.len()
    );

    let mut outputs = BTreeMap::new();
    outputs.insert(
        PIN_OUTPUT_PANELS.to_owned(),
        Value::List(result.panels.iter().map(Value::from).collect()),
    );
    outputs.insert(
        PIN_OUTPUT_POLYGONS.to_owned(),
        Value::List(result.polygons.iter().map(Value::from).collect()),
    );
    Ok(outputs)
}

fn evaluate_diamond_panel(inputs: &[Value], meta: &MetaMap, component: &str) -> ComponentResult {
    if inputs.len() < 3 {
        return Err(ComponentError::new(format!(
            "{} vereist een surface en twee divisie-aantallen",
            component
        )));
    }

    let u_divisions = coerce_division_count(inputs.get(1), PIN_INPUT_U)?;
    let v_divisions = coerce_division_count(inputs.get(2), PIN_INPUT_V)?;
    let tolerance = coerce_tolerance(meta)?;
    let surface = coerce_surface(inputs.first())?;

    let result =
        diamond_panel_with_tolerance(surface.as_ref(), u_divisions, v_divisions, tolerance)?;
    debug!(
        "{}: {}x{} -> {} ruiten, {} driehoeken",
        component,
        u_divisions,
        v_divisions,
        result.diamonds.len(),
        result.triangles.len()
    );

    let mut outputs = BTreeMap::new();
    outputs.insert(
        PIN_OUTPUT_DIAMONDS.to_owned(),
        Value::List(result.diamonds.iter().map(Value::from).collect()),
    );
    outputs.insert(
        PIN_OUTPUT_TRIANGLES.to_owned(),
        Value::List(result.triangles.iter().map(Value::from).collect()),
    );
    Ok(outputs)
}
