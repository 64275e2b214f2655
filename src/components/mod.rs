//! Component registry en evaluatie-logica.

use std::collections::HashMap;
use std::fmt;

use crate::geom::PanelError;
use crate::graph::node::MetaMap;
use crate::graph::value::Value;

pub mod coerce;
pub mod surface_panel;

/// Output-map van een component: pinnickname → waarde.
pub type OutputMap = std::collections::BTreeMap<String, Value>;

/// Fouttype voor component-evaluaties.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// Een generieke fout met een bericht.
    Message(String),
    /// Fout uit de panelisatie (ongeldige invoer of gedegenereerde geometrie).
    Panel(PanelError),
}

impl ComponentError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Message(s) => s.clone(),
            Self::Panel(err) => err.to_string(),
        }
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(s) => f.write_str(s),
            Self::Panel(err) => write!(f, "Panelisatie mislukt: {}", err),
        }
    }
}

impl std::error::Error for ComponentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Message(_) => None,
            Self::Panel(err) => Some(err),
        }
    }
}

impl From<PanelError> for ComponentError {
    fn from(err: PanelError) -> Self {
        Self::Panel(err)
    }
}

/// Resultaat van een component-executie.
pub type ComponentResult = Result<OutputMap, ComponentError>;

/// Trait die alle componentimplementaties dienen te implementeren.
pub trait Component {
    fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult;
}

/// Beschikbare componenttypen binnen de registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    SurfacePanel(surface_panel::ComponentKind),
}

impl ComponentKind {
    pub fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult {
        match self {
            Self::SurfacePanel(component) => component.evaluate(inputs, meta),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SurfacePanel(component) => component.name(),
        }
    }

    #[must_use]
    pub fn input_pins(&self) -> &'static [&'static str] {
        match self {
            Self::SurfacePanel(component) => component.input_pins(),
        }
    }

    #[must_use]
    pub fn output_pins(&self) -> &'static [&'static str] {
        match self {
            Self::SurfacePanel(component) => component.output_pins(),
        }
    }
}

/// Registry die componentimplementaties opzoekt op GUID of naam.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    by_guid: HashMap<String, ComponentKind>,
    by_name: HashMap<String, ComponentKind>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        for registration in surface_panel::REGISTRATIONS {
            let kind = ComponentKind::SurfacePanel(registration.kind);
            for guid in registration.guids {
                registry.register_guid(guid, kind);
            }
            registry.register_names(registration.names, kind);
        }

        registry
    }
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_guid: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn register_guid(&mut self, guid: impl AsRef<str>, kind: ComponentKind) {
        let key = normalize_guid(guid.as_ref());
        self.by_guid.insert(key, kind);
    }

    pub fn register_names(&mut self, names: &[&str], kind: ComponentKind) {
        for name in names {
            let key = normalize_name(name);
            self.by_name.insert(key, kind);
        }
    }

    #[must_use]
    pub fn resolve(
        &self,
        guid: Option<&str>,
        name: Option<&str>,
        nickname: Option<&str>,
    ) -> Option<ComponentKind> {
        if let Some(guid) = guid {
            if let Some(component) = self.by_guid.get(&normalize_guid(guid)) {
                return Some(*component);
            }
        }

        if let Some(name) = name {
            if let Some(component) = self.by_name.get(&normalize_name(name)) {
                return Some(*component);
            }
        }

        if let Some(nickname) = nickname {
            if let Some(component) = self.by_name.get(&normalize_name(nickname)) {
                return Some(*component);
            }
        }

        None
    }

    /// Zoekt een component op met één sleutel: eerst als GUID, daarna als naam.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ComponentKind> {
        self.resolve(Some(key), Some(key), None)
    }
}

fn normalize_guid(guid: &str) -> String {
    guid.trim_matches(|c| c == '{' || c == '}').to_lowercase()
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
