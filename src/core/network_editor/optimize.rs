//! Normalisierung eines Netzes: Vertex-Merge, Segment-Deduplizierung,
//! Entfernen ungenutzter Vertices.

use crate::core::spatial::VertexIndex;
use crate::core::vector_network::{Segment, VectorNetwork};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Parameter für [`optimize_network`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizeConfig {
    /// Maximaler Abstand pro Achse, unter dem zwei Vertices als identisch gelten.
    #[serde(default)]
    pub vertex_tolerance: f64,
    /// Vertices ohne Segment entfernen.
    #[serde(default = "default_remove_unused_vertices")]
    pub remove_unused_vertices: bool,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            vertex_tolerance: 0.0,
            remove_unused_vertices: true,
        }
    }
}

fn default_remove_unused_vertices() -> bool {
    true
}

/// Liefert das optimierte Netz; die Eingabe bleibt unverändert.
///
/// Ablauf:
/// 1. Jeder Vertex wird auf den ersten behaltenen Vertex innerhalb der
///    Toleranz abgebildet (Reihenfolge bleibt stabil). Den Toleranz-Merge
///    erledigt allein die Box-Abfrage von [`VertexIndex`]; deckungsgleiche
///    Vertices bündelt der Index intern und liefert sie gemeinsam zurück.
/// 2. Segmente werden umgehängt; gerade Segmente mit `a == b` entfallen.
/// 3. Identische Segmente (Richtung und Tangenten) werden dedupliziert.
/// 4. Optional werden ungenutzte Vertices entfernt und neu nummeriert.
pub(crate) fn optimize_network(network: &VectorNetwork, config: &OptimizeConfig) -> VectorNetwork {
    let tolerance = config.vertex_tolerance.max(0.0);
    let index = VertexIndex::from_points(&network.vertices);

    // Repräsentant je Original-Vertex (Index in `vertices`)
    let mut representative: Vec<usize> = Vec::with_capacity(network.vertices.len());
    let mut kept_slot: Vec<Option<usize>> = vec![None; network.vertices.len()];
    let mut vertices = Vec::new();

    for (i, &p) in network.vertices.iter().enumerate() {
        let existing = index
            .within_box(p, tolerance)
            .into_iter()
            .filter(|&j| j < i)
            .filter_map(|j| kept_slot[j].map(|slot| (j, slot)))
            .min_by_key(|(j, _)| *j)
            .map(|(_, slot)| slot);

        let slot = existing.unwrap_or_else(|| {
            vertices.push(p);
            kept_slot[i] = Some(vertices.len() - 1);
            vertices.len() - 1
        });
        representative.push(slot);
    }

    let mut seen = HashSet::new();
    let segments: Vec<Segment> = network
        .segments
        .iter()
        .map(|s| Segment::new(representative[s.a], representative[s.b], s.ta, s.tb))
        .filter(|s| !(s.a == s.b && s.is_straight()))
        .filter(|s| seen.insert(segment_key(s)))
        .collect();

    if !config.remove_unused_vertices {
        return VectorNetwork::new(vertices, segments);
    }

    let mut used = vec![false; vertices.len()];
    for s in &segments {
        used[s.a] = true;
        used[s.b] = true;
    }
    let mut remap = vec![0usize; vertices.len()];
    let mut packed = Vec::with_capacity(vertices.len());
    for (i, p) in vertices.into_iter().enumerate() {
        if used[i] {
            remap[i] = packed.len();
            packed.push(p);
        }
    }
    let segments = segments
        .into_iter()
        .map(|s| Segment::new(remap[s.a], remap[s.b], s.ta, s.tb))
        .collect();
    VectorNetwork::new(packed, segments)
}

/// Bitgenauer Schlüssel eines Segments; `-0.0` und `0.0` gelten als gleich.
fn segment_key(s: &Segment) -> (usize, usize, [u64; 4]) {
    let bits = |x: f64| (x + 0.0).to_bits();
    (
        s.a,
        s.b,
        [bits(s.ta.x), bits(s.ta.y), bits(s.tb.x), bits(s.tb.y)],
    )
}
