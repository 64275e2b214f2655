//! Hulpfuncties voor het converteren van `Value`-types.

use crate::geom::{PanelError, Surface, Tolerance};
use crate::graph::node::{MetaLookupExt, MetaMap};
use crate::graph::value::Value;

use super::ComponentError;

/// Meta-sleutel waarmee een node een eigen geometrische tolerantie opgeeft.
pub const META_TOLERANCE: &str = "Tolerance";

pub fn coerce_number(value: &Value) -> Result<f64, ComponentError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::List(l) if l.len() == 1 => coerce_number(&l[0]),
        other => Err(ComponentError::new(format!(
            "Verwachtte een getal, kreeg {}",
            other.kind()
        ))),
    }
}

/// Zet een pinwaarde om naar een aantal divisies.
///
/// De waarde wordt afgerond; niet-eindige waarden, alles kleiner dan 1 en
/// alles wat niet in een `usize` past leveren `PanelError::InvalidArgument` op.
pub fn coerce_division_count(
    value: Option<&Value>,
    name: &'static str,
) -> Result<usize, ComponentError> {
    let Some(value) = value else {
        return Err(ComponentError::new(format!("{} ontbreekt", name)));
    };
    let raw = coerce_number(value)?;
    let rounded = raw.round();
    // usize::MAX as f64 rounds up to 2^BITS, which no longer fits
    if !rounded.is_finite() || rounded < 1.0 || rounded >= usize::MAX as f64 {
        return Err(PanelError::InvalidArgument { name, value: raw }.into());
    }
    Ok(rounded as usize)
}

/// Bouwt het oppervlak uit een `Surface`-pin.
pub fn coerce_surface(value: Option<&Value>) -> Result<Box<dyn Surface>, ComponentError> {
    match value {
        Some(Value::Surface(description)) => description
            .to_surface()
            .map_err(|err| ComponentError::new(format!("Ongeldig oppervlak: {}", err))),
        Some(Value::List(l)) if l.len() == 1 => coerce_surface(l.first()),
        Some(other) => Err(ComponentError::new(format!(
            "Verwachtte een surface, kreeg {}",
            other.kind()
        ))),
        None => Err(ComponentError::new("Surface ontbreekt")),
    }
}

/// Leest de tolerantie uit de node-meta, met de standaardtolerantie als
/// terugvaloptie.
pub fn coerce_tolerance(meta: &MetaMap) -> Result<Tolerance, ComponentError> {
    let Some(entry) = meta.get_normalized(META_TOLERANCE) else {
        return Ok(Tolerance::default_geom());
    };
    match entry.as_number() {
        Some(eps) if eps.is_finite() && eps > 0.0 => Ok(Tolerance::new(eps)),
        _ => Err(ComponentError::new(format!(
            "Ongeldige tolerantie: {:?}",
            entry
        ))),
    }
}
