//! Editor-Operationen auf einem Vector Network.
//!
//! Der Editor hält genau ein Netz und verändert es in-place. Jede Operation
//! hinterlässt ein konsistentes Netz: alle Segment-Endpunkte bleiben gültige
//! Vertex-Indizes. Ungültige Indizes sind Programmierfehler und lösen einen
//! Panic aus (`assert!`), sie werden nirgends abgefangen.

mod optimize;
mod planarize;
mod tangents;

pub use optimize::OptimizeConfig;
pub use tangents::infer_mirroring_mode;

use super::bezier;
use super::vector_network::{PointOnSegment, Segment, SegmentEnd, TangentControl, VectorNetwork};
use super::Rect;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optionen für [`VectorNetworkEditor::split_segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Gerade Segmente bleiben nach dem Teilen gerade (Null-Tangenten).
    #[serde(default)]
    pub preserve_zero: bool,
}

/// Eingefrorener Segmentzustand zu Beginn einer Biege-Geste.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrozenSegment {
    pub a: DVec2,
    pub b: DVec2,
    pub ta: DVec2,
    pub tb: DVec2,
}

/// Auswahl innerhalb eines Netzes (Content-Edit-Modus).
///
/// Tangenten werden als `(Segment-Index, Ende)` adressiert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkSelection {
    #[serde(default)]
    pub vertices: Vec<usize>,
    #[serde(default)]
    pub segments: Vec<usize>,
    #[serde(default)]
    pub tangents: Vec<(usize, TangentControl)>,
}

impl NetworkSelection {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.segments.is_empty() && self.tangents.is_empty()
    }
}

/// Transformiert ein einzelnes [`VectorNetwork`].
#[derive(Debug, Clone, Default)]
pub struct VectorNetworkEditor {
    network: VectorNetwork,
}

impl VectorNetworkEditor {
    /// Übernimmt das Netz zur Bearbeitung.
    pub fn new(network: VectorNetwork) -> Self {
        Self { network }
    }

    /// Read-only Sicht auf das aktuelle Netz.
    pub fn network(&self) -> &VectorNetwork {
        &self.network
    }

    /// Gibt das bearbeitete Netz zurück.
    pub fn into_network(self) -> VectorNetwork {
        self.network
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.network.vertices
    }

    pub fn segments(&self) -> &[Segment] {
        &self.network.segments
    }

    fn check_vertex(&self, index: usize) {
        assert!(
            index < self.network.vertices.len(),
            "Ungültiger Vertex-Index: {} ({} Vertices)",
            index,
            self.network.vertices.len()
        );
    }

    fn check_segment(&self, index: usize) {
        assert!(
            index < self.network.segments.len(),
            "Ungültiger Segment-Index: {} ({} Segmente)",
            index,
            self.network.segments.len()
        );
    }

    // === Abfragen ===

    /// Index des ersten Vertex an exakt dieser Position.
    pub fn find_vertex(&self, position: DVec2) -> Option<usize> {
        self.network.vertices.iter().position(|v| *v == position)
    }

    /// Segmente, die `vertex` in der angegebenen Rolle nutzen (aufsteigend).
    pub fn find_segments(&self, vertex: usize, role: SegmentEnd) -> Vec<usize> {
        self.network
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| match role {
                SegmentEnd::A => s.a == vertex,
                SegmentEnd::B => s.b == vertex,
                SegmentEnd::Any => s.touches(vertex),
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Direkt verbundene Nachbar-Vertices (ohne `vertex` selbst, sortiert).
    pub fn neighboring_vertices(&self, vertex: usize) -> Vec<usize> {
        let neighbours: BTreeSet<usize> = self
            .network
            .segments
            .iter()
            .filter_map(|s| {
                if s.a == vertex {
                    Some(s.b)
                } else if s.b == vertex {
                    Some(s.a)
                } else {
                    None
                }
            })
            .filter(|&n| n != vertex)
            .collect();
        neighbours.into_iter().collect()
    }

    /// Sehnenlänge eines Segments (Abstand der Endpunkte).
    pub fn segment_length(&self, segment: usize) -> f64 {
        self.check_segment(segment);
        let seg = &self.network.segments[segment];
        self.network.vertices[seg.a].distance(self.network.vertices[seg.b])
    }

    /// Vertex, dem die Tangente `control` des Segments gehört.
    pub fn tangent_vertex(&self, segment: usize, control: TangentControl) -> usize {
        self.check_segment(segment);
        self.network.segments[segment].vertex_of(control)
    }

    /// Prüft, ob die Segmente in dieser Reihenfolge eine geschlossene Kette bilden.
    pub fn is_loop_closed(&self, segments: &[usize]) -> bool {
        if segments.is_empty() {
            return false;
        }
        segments.iter().enumerate().all(|(i, &si)| {
            let next = segments[(i + 1) % segments.len()];
            match (self.network.segments.get(si), self.network.segments.get(next)) {
                (Some(current), Some(next)) => current.b == next.a,
                _ => false,
            }
        })
    }

    /// Alle geschlossenen Schleifen als Punktlisten (gerichtet `a -> b` verfolgt).
    pub fn loops(&self) -> Vec<Vec<DVec2>> {
        let segments = &self.network.segments;
        let mut visited = vec![false; segments.len()];
        let mut regions = Vec::new();

        for start in 0..segments.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let first = segments[start].a;
            let mut chain = vec![first];
            let mut current = segments[start].b;

            let closed = loop {
                if current == first {
                    break true;
                }
                chain.push(current);
                let next = (0..segments.len()).find(|&i| !visited[i] && segments[i].a == current);
                match next {
                    Some(i) => {
                        visited[i] = true;
                        current = segments[i].b;
                    }
                    None => break false,
                }
            };

            if closed {
                regions.push(chain.iter().map(|&v| self.network.vertices[v]).collect());
            }
        }
        regions
    }

    /// AABB über die Vertex-Positionen (Tangenten werden ignoriert).
    pub fn get_bbox(&self) -> Rect {
        self.network.bbox()
    }

    /// Gepacktes Teilnetz aus den gewählten Vertices und Segmenten.
    ///
    /// Endpunkte gewählter Segmente werden automatisch übernommen, explizit
    /// gewählte Vertices bleiben auch ohne Segment erhalten.
    pub fn copy(&self, selection: &NetworkSelection) -> VectorNetwork {
        let mut vertex_set: BTreeSet<usize> = BTreeSet::new();
        for &v in &selection.vertices {
            self.check_vertex(v);
            vertex_set.insert(v);
        }
        let mut segments = Vec::with_capacity(selection.segments.len());
        for &si in &selection.segments {
            self.check_segment(si);
            let seg = self.network.segments[si];
            vertex_set.insert(seg.a);
            vertex_set.insert(seg.b);
            segments.push(seg);
        }

        let order: Vec<usize> = vertex_set.into_iter().collect();
        let remap = |v: usize| order.binary_search(&v).unwrap_or_default();
        let packed = VectorNetwork::new(
            order.iter().map(|&v| self.network.vertices[v]).collect(),
            segments
                .into_iter()
                .map(|s| Segment::new(remap(s.a), remap(s.b), s.ta, s.tb))
                .collect(),
        );
        optimize::optimize_network(
            &packed,
            &OptimizeConfig {
                vertex_tolerance: 0.0,
                remove_unused_vertices: false,
            },
        )
    }

    // === Vertices ===

    /// Hängt einen Vertex an; mit `from_vertex` entsteht zusätzlich ein Segment
    /// `from_vertex -> neu` mit `outgoing_tangent` als `ta`.
    pub fn add_vertex(
        &mut self,
        position: DVec2,
        from_vertex: Option<usize>,
        outgoing_tangent: Option<DVec2>,
    ) -> usize {
        if let Some(origin) = from_vertex {
            self.check_vertex(origin);
        }
        self.network.vertices.push(position);
        let index = self.network.vertices.len() - 1;
        if let Some(origin) = from_vertex {
            self.network.segments.push(Segment::new(
                origin,
                index,
                outgoing_tangent.unwrap_or(DVec2::ZERO),
                DVec2::ZERO,
            ));
        }
        index
    }

    /// Entfernt den Vertex samt aller anliegenden Segmente und nummeriert
    /// die übrigen Endpunkte `> index` um eins herunter.
    pub fn delete_vertex(&mut self, index: usize) {
        self.check_vertex(index);
        self.network.vertices.remove(index);
        self.network.segments.retain(|s| !s.touches(index));
        for seg in &mut self.network.segments {
            if seg.a > index {
                seg.a -= 1;
            }
            if seg.b > index {
                seg.b -= 1;
            }
        }
    }

    /// Entfernt den Vertex nur, wenn kein Segment ihn nutzt.
    pub fn remove_unused_vertex(&mut self, index: usize) -> bool {
        self.check_vertex(index);
        if self.network.segments.iter().any(|s| s.touches(index)) {
            return false;
        }
        self.delete_vertex(index);
        true
    }

    /// Setzt die absolute Position eines Vertex.
    pub fn move_vertex(&mut self, index: usize, position: DVec2) {
        self.check_vertex(index);
        self.network.vertices[index] = position;
    }

    pub fn translate_vertex(&mut self, index: usize, delta: DVec2) {
        self.check_vertex(index);
        self.network.vertices[index] += delta;
    }

    /// Verschiebt beide Endpunkte eines Segments.
    pub fn translate_segment(&mut self, index: usize, delta: DVec2) {
        self.check_segment(index);
        let Segment { a, b, .. } = self.network.segments[index];
        self.network.vertices[a] += delta;
        if b != a {
            self.network.vertices[b] += delta;
        }
    }

    /// Starre Verschiebung aller Vertices.
    pub fn translate(&mut self, delta: DVec2) {
        for v in &mut self.network.vertices {
            *v += delta;
        }
    }

    /// Skaliert Vertices und Tangenten komponentenweise.
    pub fn scale(&mut self, factor: DVec2) {
        for v in &mut self.network.vertices {
            *v *= factor;
        }
        for seg in &mut self.network.segments {
            seg.ta *= factor;
            seg.tb *= factor;
        }
    }

    /// Verschiebt die Auswahl: Vertices und Endpunkte gewählter Segmente,
    /// dazu gewählte Tangenten, deren Vertex nicht ohnehin bewegt wird.
    pub fn translate_selection(&mut self, selection: &NetworkSelection, delta: DVec2) {
        let mut moved: BTreeSet<usize> = BTreeSet::new();
        for &si in &selection.segments {
            self.check_segment(si);
            let seg = &self.network.segments[si];
            moved.insert(seg.a);
            moved.insert(seg.b);
        }
        for &v in &selection.vertices {
            self.check_vertex(v);
            moved.insert(v);
        }
        for &v in &moved {
            self.network.vertices[v] += delta;
        }
        for &(si, control) in &selection.tangents {
            self.check_segment(si);
            let seg = &mut self.network.segments[si];
            if !moved.contains(&seg.vertex_of(control)) {
                *seg.tangent_mut(control) += delta;
            }
        }
    }

    // === Segmente ===

    /// Hängt ein Segment an und gibt seinen Index zurück.
    pub fn add_segment(&mut self, a: usize, b: usize, ta: DVec2, tb: DVec2) -> usize {
        self.check_vertex(a);
        self.check_vertex(b);
        self.network.segments.push(Segment::new(a, b, ta, tb));
        self.network.segments.len() - 1
    }

    /// Entfernt nur das Segment; Vertices bleiben (auch ungenutzt) erhalten.
    pub fn delete_segment(&mut self, index: usize) {
        self.check_segment(index);
        self.network.segments.remove(index);
    }

    /// Teilt ein Segment am Parameter `t` in zwei deckungsgleiche Segmente.
    ///
    /// Der neue Vertex wird angehängt, das Segment an seiner Position durch
    /// `a -> neu` und `neu -> b` ersetzt. Die Tangenten stammen aus der
    /// De-Casteljau-Teilung, sodass die Kurve exakt erhalten bleibt.
    pub fn split_segment(&mut self, point: PointOnSegment, options: SplitOptions) -> usize {
        self.check_segment(point.segment);
        assert!(
            (0.0..=1.0).contains(&point.t),
            "Split-Parameter außerhalb von [0, 1]: {}",
            point.t
        );

        let seg = self.network.segments[point.segment];
        let (left, right) = self.network.curve(point.segment).split(point.t);
        self.network.vertices.push(left.p3);
        let vertex = self.network.vertices.len() - 1;

        let (first, second) = if options.preserve_zero && seg.is_straight() {
            (Segment::straight(seg.a, vertex), Segment::straight(vertex, seg.b))
        } else {
            (
                Segment::new(seg.a, vertex, left.ta(), left.tb()),
                Segment::new(vertex, seg.b, right.ta(), right.tb()),
            )
        };
        self.network
            .segments
            .splice(point.segment..=point.segment, [first, second]);
        vertex
    }

    /// Biegt ein Segment so, dass es bei `t` durch `target` verläuft.
    ///
    /// Gerechnet wird auf dem eingefrorenen Zustand vom Gestenbeginn; ein
    /// seither verschobener Startpunkt wird auf `target` gegengerechnet.
    pub fn bend_segment(&mut self, segment: usize, t: f64, frozen: &FrozenSegment, target: DVec2) {
        self.check_segment(segment);
        let current_a = self.network.vertices[self.network.segments[segment].a];
        let adjusted = target - (current_a - frozen.a);
        let (ta, tb) =
            bezier::solve_tangents_for_point(frozen.a, frozen.b, frozen.ta, frozen.tb, t, adjusted);
        let seg = &mut self.network.segments[segment];
        seg.ta = ta;
        seg.tb = tb;
    }

    // === Netz-weite Operationen ===

    /// Führt nahe Vertices zusammen und entfernt degenerierte sowie doppelte
    /// Segmente. Idempotent.
    pub fn optimize(&mut self, config: &OptimizeConfig) {
        self.network = optimize::optimize_network(&self.network, config);
    }

    /// Zerlegt alle Schnitt- und Selbstschnittpunkte in eigene Vertices.
    pub fn planarize(&mut self, tolerance: f64) {
        self.network = planarize::planarize_network(&self.network, tolerance);
    }

    /// Vereinigt zwei Netze. Ohne `config` reine Verkettung mit
    /// Index-Versatz, sonst anschließend [`optimize`](Self::optimize).
    pub fn union(
        a: &VectorNetwork,
        b: &VectorNetwork,
        config: Option<&OptimizeConfig>,
    ) -> VectorNetwork {
        let offset = a.vertices.len();
        let mut joined = a.clone();
        joined.vertices.extend_from_slice(&b.vertices);
        joined.segments.extend(
            b.segments
                .iter()
                .map(|s| Segment::new(s.a + offset, s.b + offset, s.ta, s.tb)),
        );
        match config {
            Some(config) => optimize::optimize_network(&joined, config),
            None => joined,
        }
    }

    // === Zeichen-Werkzeuge ===

    /// Bleistift: hängt einen Punkt an die (geordnete) Polylinie an.
    pub fn extend_polyline(&mut self, position: DVec2) {
        let mut points = std::mem::take(&mut self.network.vertices);
        points.push(position);
        self.network = VectorNetwork::polyline(&points);
    }

    /// Linien-Werkzeug: Ersetzt das Netz durch eine Strecke vom ersten Vertex
    /// zu `position`.
    pub fn extend_line(&mut self, position: DVec2) {
        let start = self.network.vertices.first().copied().unwrap_or(position);
        self.network = VectorNetwork::polyline(&[start, position]);
    }
}
