//! Dokument-Modell: Nodes in einer geordneten Map plus Szenen-Reihenfolge.

use super::{Rect, VectorNetwork};
use glam::DVec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Eindeutige Node-ID (Dateiformat: String).
pub type NodeId = String;

/// Deklarierte Box-Größe eines Nodes.
///
/// `Auto` steht für inhaltsabhängige Größen (z.B. Text); die aufgelöste
/// Größe liefert dann nur ein externer [`GeometryQuery`](crate::app::GeometryQuery).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    Fixed(f64),
    Auto,
}

impl Dimension {
    /// Numerischer Wert, falls fest.
    pub fn fixed(&self) -> Option<f64> {
        match self {
            Dimension::Fixed(value) => Some(*value),
            Dimension::Auto => None,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Fixed(0.0)
    }
}

/// Dateiformat: Zahl oder `"auto"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Keyword(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = String;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(value) => Ok(Dimension::Fixed(value)),
            DimensionRepr::Keyword(word) if word == "auto" => Ok(Dimension::Auto),
            DimensionRepr::Keyword(word) => Err(format!("Unbekannte Größenangabe: {}", word)),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Fixed(value) => DimensionRepr::Number(value),
            Dimension::Auto => DimensionRepr::Keyword("auto".to_string()),
        }
    }
}

/// Inhalt eines Nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Vector { vector_network: VectorNetwork },
    Rectangle,
    Ellipse,
    Text { text: String },
}

/// Ein Canvas-Node mit lokalem Ursprung und deklarierter Größe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    pub left: f64,
    pub top: f64,
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub height: Dimension,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Vector-Node am Ursprung; die Box entspricht der Netz-BBox.
    pub fn vector(id: impl Into<NodeId>, vector_network: VectorNetwork) -> Self {
        let bbox = vector_network.bbox();
        Self {
            id: id.into(),
            name: String::new(),
            left: 0.0,
            top: 0.0,
            width: Dimension::Fixed(bbox.width),
            height: Dimension::Fixed(bbox.height),
            kind: NodeKind::Vector { vector_network },
        }
    }

    /// Node mit fester Box.
    pub fn with_rect(id: impl Into<NodeId>, kind: NodeKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            left: rect.x,
            top: rect.y,
            width: Dimension::Fixed(rect.width),
            height: Dimension::Fixed(rect.height),
            kind,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self.kind, NodeKind::Vector { .. })
    }

    pub fn vector_network(&self) -> Option<&VectorNetwork> {
        match &self.kind {
            NodeKind::Vector { vector_network } => Some(vector_network),
            _ => None,
        }
    }

    pub fn vector_network_mut(&mut self) -> Option<&mut VectorNetwork> {
        match &mut self.kind {
            NodeKind::Vector { vector_network } => Some(vector_network),
            _ => None,
        }
    }

    /// Lokaler Ursprung `(left, top)`.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.left, self.top)
    }

    /// Box in Elternkoordinaten, nur bei fester Breite und Höhe.
    pub fn declared_rect(&self) -> Option<Rect> {
        Some(Rect::new(
            self.left,
            self.top,
            self.width.fixed()?,
            self.height.fixed()?,
        ))
    }
}

/// Das Dokument: alle Nodes plus Z-Reihenfolge der obersten Ebene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub nodes: IndexMap<NodeId, Node>,
    #[serde(default)]
    pub scene: Vec<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Fügt einen Node ein (oder ersetzt ihn) und hängt ihn an die Szene an.
    pub fn insert_node(&mut self, node: Node) {
        let id = node.id.clone();
        if self.nodes.insert(id.clone(), node).is_none() {
            self.scene.push(id);
        }
    }

    /// Entfernt den Node samt Szenen-Eintrag.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let node = self.nodes.shift_remove(id)?;
        self.scene.retain(|entry| entry != id);
        Some(node)
    }

    /// Nächste freie ID der Form `{prefix}{n}`.
    pub fn next_id(&self, prefix: &str) -> NodeId {
        (self.nodes.len() + 1..)
            .map(|n| format!("{}{}", prefix, n))
            .find(|candidate| !self.nodes.contains_key(candidate))
            .unwrap_or_else(|| prefix.to_string())
    }

    /// Prüft Szenen-Referenzen und alle Vector Networks.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (key, node) in &self.nodes {
            if key != &node.id {
                anyhow::bail!("Node-Schlüssel {} passt nicht zur ID {}", key, node.id);
            }
            if let Some(network) = node.vector_network() {
                network
                    .validate()
                    .map_err(|e| e.context(format!("Node {}", node.id)))?;
            }
        }
        if let Some(missing) = self.scene.iter().find(|id| !self.nodes.contains_key(*id)) {
            anyhow::bail!("Szene referenziert unbekannten Node: {}", missing);
        }
        Ok(())
    }
}
