#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod geom;
pub mod graph;

use std::collections::BTreeMap;
use std::fmt;

use components::coerce::META_TOLERANCE;
use components::{ComponentError, ComponentRegistry, OutputMap, surface_panel};
use graph::node::{MetaMap, MetaValue};
use graph::value::{SurfaceValue, Value};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Beschrijving van een geregistreerd component voor de host.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ComponentInfo {
    pub name: &'static str,
    pub nickname: &'static str,
    pub guid: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
}

/// Geometrie zoals die naar de host wordt geëxporteerd.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum GeometryItem {
    Polyline {
        points: Vec<[f64; 3]>,
        closed: bool,
    },
    Mesh {
        vertices: Vec<[f64; 3]>,
        faces: Vec<Vec<u32>>,
    },
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    registry: ComponentRegistry,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            registry: ComponentRegistry::default(),
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Somt de beschikbare panelisatiecomponenten op.
    #[wasm_bindgen]
    pub fn list_components(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&Self::component_infos())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Evalueert een panelisatiecomponent op een oppervlak en geeft per
    /// outputpin de geometrie terug.
    #[wasm_bindgen]
    pub fn evaluate_panel(
        &self,
        component: &str,
        surface: JsValue,
        u: f64,
        v: f64,
        tolerance: Option<f64>,
    ) -> Result<JsValue, JsValue> {
        let surface: SurfaceValue =
            serde_wasm_bindgen::from_value(surface).map_err(to_js_error)?;
        let outputs = self
            .evaluate_component(component, surface, u, v, tolerance)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&geometry_items(&outputs))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Alle registraties, in registratievolgorde.
    #[must_use]
    pub fn component_infos() -> Vec<ComponentInfo> {
        surface_panel::REGISTRATIONS
            .iter()
            .map(|registration| ComponentInfo {
                name: registration.kind.name(),
                nickname: registration.names.last().copied().unwrap_or_default(),
                guid: registration.guids.first().copied().unwrap_or_default(),
                inputs: registration.kind.input_pins(),
                outputs: registration.kind.output_pins(),
            })
            .collect()
    }

    /// Zoekt het component op (GUID, naam of nickname) en evalueert het met
    /// de gegeven surface en divisie-aantallen.
    pub fn evaluate_component(
        &self,
        component: &str,
        surface: SurfaceValue,
        u: f64,
        v: f64,
        tolerance: Option<f64>,
    ) -> Result<OutputMap, ComponentError> {
        let kind = self
            .registry
            .lookup(component)
            .ok_or_else(|| ComponentError::new(format!("onbekend component `{component}`")))?;

        let mut meta = MetaMap::new();
        if let Some(tolerance) = tolerance {
            meta.insert(META_TOLERANCE.to_owned(), MetaValue::Number(tolerance));
        }

        debug_log!("evaluate {} ({}x{})", kind.name(), u, v);
        let inputs = [Value::Surface(surface), Value::Number(u), Value::Number(v)];
        kind.evaluate(&inputs, &meta)
    }
}

/// Zet de outputs van een component om naar exporteerbare geometrie, per pin.
#[must_use]
pub fn geometry_items(outputs: &OutputMap) -> BTreeMap<String, Vec<GeometryItem>> {
    outputs
        .iter()
        .map(|(pin, value)| {
            let mut items = Vec::new();
            append_geometry_value(value, &mut items);
            (pin.clone(), items)
        })
        .collect()
}

fn append_geometry_value(value: &Value, items: &mut Vec<GeometryItem>) {
    match value {
        Value::Polyline { points, closed } => {
            items.push(GeometryItem::Polyline {
                points: points.clone(),
                closed: *closed,
            });
        }
        Value::Panel { vertices, faces } => {
            items.push(GeometryItem::Mesh {
                vertices: vertices.clone(),
                faces: faces.clone(),
            });
        }
        Value::List(values) => {
            for entry in values {
                append_geometry_value(entry, items);
            }
        }
        Value::Number(_) | Value::Boolean(_) | Value::Surface(_) => {}
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
