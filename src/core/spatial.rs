//! Spatial-Index (KD-Tree) über Vertex-Positionen für Toleranz-Abfragen.
//!
//! Der Tree enthält jede exakte Position nur einmal. Deckungsgleiche Vertices
//! werden in einer Gruppe gesammelt, damit beliebig viele übereinanderliegende
//! Vertices indexiert werden können.

use std::collections::HashMap;

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

/// Radius-Aufschlag, damit exakte Treffer bei Toleranz 0 gefunden werden.
const RADIUS_EPSILON: f64 = 1e-18;

/// Treffer einer Nächster-Nachbar-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMatch {
    /// Vertex-Index im indexierten Punkt-Array
    pub vertex: usize,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Alle Vertices an exakt derselben Position.
struct PositionGroup {
    position: DVec2,
    vertices: Vec<usize>,
}

/// KD-Tree über eindeutige Vertex-Positionen; Items sind Gruppen-Indizes.
pub struct VertexIndex {
    tree: KdTree<f64, 2>,
    groups: Vec<PositionGroup>,
    by_position: HashMap<(u64, u64), usize>,
    vertex_count: usize,
}

/// Bitgenauer Positionsschlüssel; `-0.0` und `0.0` gelten als gleich.
fn position_key(p: DVec2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

impl VertexIndex {
    /// Baut den Index über alle Punkte (Vertex-Index = Position im Slice).
    pub fn from_points(points: &[DVec2]) -> Self {
        let mut index = Self {
            tree: KdTree::new(),
            groups: Vec::new(),
            by_position: HashMap::new(),
            vertex_count: 0,
        };
        for (vertex, &position) in points.iter().enumerate() {
            index.insert(position, vertex);
        }
        index
    }

    /// Anzahl indexierter Vertices (inklusive Duplikate).
    pub fn len(&self) -> usize {
        self.vertex_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Anzahl eindeutiger Positionen im Tree.
    pub fn unique_positions(&self) -> usize {
        self.groups.len()
    }

    /// Fügt einen Punkt mit explizitem Vertex-Index hinzu.
    pub fn insert(&mut self, position: DVec2, vertex: usize) {
        self.vertex_count += 1;
        if let Some(&group) = self.by_position.get(&position_key(position)) {
            self.groups[group].vertices.push(vertex);
            return;
        }
        let group = self.groups.len();
        self.groups.push(PositionGroup {
            position,
            vertices: vec![vertex],
        });
        self.by_position.insert(position_key(position), group);
        self.tree.add(&[position.x, position.y], group as u64);
    }

    /// Nächster indexierter Vertex; bei Duplikaten der kleinste Vertex-Index.
    pub fn nearest(&self, query: DVec2) -> Option<VertexMatch> {
        if self.groups.is_empty() {
            return None;
        }
        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let group = self.groups.get(result.item as usize)?;
        let vertex = group.vertices.iter().copied().min()?;
        Some(VertexMatch {
            vertex,
            distance: result.distance.sqrt(),
        })
    }

    /// Alle Vertices, deren Abstand pro Achse höchstens `tolerance` beträgt,
    /// aufsteigend sortiert.
    ///
    /// Nutzt eine umschließende Kreisabfrage mit anschließender Achsen-Filterung.
    pub fn within_box(&self, query: DVec2, tolerance: f64) -> Vec<usize> {
        if self.groups.is_empty() || tolerance.is_sign_negative() {
            return Vec::new();
        }
        let radius_sq = 2.0 * tolerance * tolerance + RADIUS_EPSILON;
        let mut hits: Vec<usize> = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], radius_sq)
            .into_iter()
            .filter_map(|entry| self.groups.get(entry.item as usize))
            .filter(|group| {
                (group.position.x - query.x).abs() <= tolerance
                    && (group.position.y - query.y).abs() <= tolerance
            })
            .flat_map(|group| group.vertices.iter().copied())
            .collect();
        hits.sort_unstable();
        hits
    }
}
