//! Planarisierung: Schnittpunkte zwischen Segmenten (und Selbstschnitte)
//! werden zu eigenen Vertices, die betroffenen Segmente dort geteilt.

use crate::core::bezier::{self, CubicBezier};
use crate::core::spatial::VertexIndex;
use crate::core::vector_network::{Segment, VectorNetwork};
use glam::DVec2;
use std::collections::HashMap;

/// Parameterabstand zum Segment-Ende, ab dem ein Treffer als Endpunkt gilt.
const ENDPOINT_T_EPSILON: f64 = 1e-6;

/// Geplanter Teilungspunkt auf einem Segment.
#[derive(Debug, Clone, Copy)]
struct Cut {
    t: f64,
    vertex: usize,
}

/// Sammelt Vertices und Schnitte während der Planarisierung.
struct Planarizer {
    vertices: Vec<DVec2>,
    index: VertexIndex,
    snap: f64,
    cuts: HashMap<usize, Vec<Cut>>,
}

impl Planarizer {
    fn new(network: &VectorNetwork, tolerance: f64) -> Self {
        Self {
            vertices: network.vertices.clone(),
            index: VertexIndex::from_points(&network.vertices),
            snap: tolerance.max(1e-9),
            cuts: HashMap::new(),
        }
    }

    /// Vertex an `position`: vorhandener innerhalb der Toleranz oder neu angelegt.
    fn vertex_at(&mut self, position: DVec2) -> usize {
        if let Some(hit) = self.index.nearest(position) {
            if hit.distance <= self.snap {
                return hit.vertex;
            }
        }
        self.vertices.push(position);
        let vertex = self.vertices.len() - 1;
        self.index.insert(position, vertex);
        vertex
    }

    fn cut(&mut self, segment: usize, t: f64, vertex: usize) {
        self.cuts.entry(segment).or_default().push(Cut { t, vertex });
    }
}

fn near_end(curve: &CubicBezier, t: f64, snap: f64) -> Option<bool> {
    let p = curve.eval(t);
    if t <= ENDPOINT_T_EPSILON || p.distance(curve.p0) <= snap {
        Some(false)
    } else if t >= 1.0 - ENDPOINT_T_EPSILON || p.distance(curve.p3) <= snap {
        Some(true)
    } else {
        None
    }
}

/// Liefert das planarisierte Netz. Segmente ohne Schnitt bleiben unverändert,
/// gerade Segmente werden in gerade Teilstücke zerlegt.
pub(crate) fn planarize_network(network: &VectorNetwork, tolerance: f64) -> VectorNetwork {
    let curves: Vec<CubicBezier> = (0..network.segments.len())
        .map(|i| network.curve(i))
        .collect();
    let mut state = Planarizer::new(network, tolerance);

    // Selbstschnitte
    for (i, curve) in curves.iter().enumerate() {
        if let Some((s, r)) = curve.self_intersection() {
            let vertex = state.vertex_at(curve.eval(s));
            state.cut(i, s, vertex);
            state.cut(i, r, vertex);
        }
    }

    // Paarweise Schnitte
    for i in 0..curves.len() {
        for j in (i + 1)..curves.len() {
            let (ci, cj) = (&curves[i], &curves[j]);
            if !ci.hull_bbox().intersects(&cj.hull_bbox()) {
                continue;
            }
            for (ti, tj) in bezier::intersections(ci, cj, state.snap) {
                let end_i = near_end(ci, ti, state.snap);
                let end_j = near_end(cj, tj, state.snap);
                let seg_i = network.segments[i];
                let seg_j = network.segments[j];
                match (end_i, end_j) {
                    // Endpunkt trifft Endpunkt: kein Kreuzungspunkt
                    (Some(_), Some(_)) => {}
                    // T-Kreuzung: Endpunkt von i liegt im Inneren von j
                    (Some(at_end), None) => {
                        let vertex = if at_end { seg_i.b } else { seg_i.a };
                        state.cut(j, tj, vertex);
                    }
                    (None, Some(at_end)) => {
                        let vertex = if at_end { seg_j.b } else { seg_j.a };
                        state.cut(i, ti, vertex);
                    }
                    (None, None) => {
                        let position = (ci.eval(ti) + cj.eval(tj)) * 0.5;
                        let vertex = state.vertex_at(position);
                        state.cut(i, ti, vertex);
                        state.cut(j, tj, vertex);
                    }
                }
            }
        }
    }

    let Planarizer {
        vertices, mut cuts, ..
    } = state;

    let mut segments = Vec::with_capacity(network.segments.len());
    for (i, seg) in network.segments.iter().enumerate() {
        let Some(mut seg_cuts) = cuts.remove(&i) else {
            segments.push(*seg);
            continue;
        };
        let curve = &curves[i];
        if seg.is_straight() {
            // Gerade Segmente nach Projektion auf die Sehne ordnen
            let chord = vertices[seg.b] - vertices[seg.a];
            seg_cuts.sort_by(|x, y| {
                let kx = (vertices[x.vertex] - vertices[seg.a]).dot(chord);
                let ky = (vertices[y.vertex] - vertices[seg.a]).dot(chord);
                kx.total_cmp(&ky)
            });
        } else {
            seg_cuts.sort_by(|x, y| x.t.total_cmp(&y.t));
        }

        let mut chain: Vec<Cut> = vec![Cut { t: 0.0, vertex: seg.a }];
        for cut in seg_cuts {
            if cut.vertex == seg.b && cut.vertex != seg.a {
                continue;
            }
            let last = chain[chain.len() - 1];
            if cut.vertex == last.vertex && (cut.t - last.t).abs() <= ENDPOINT_T_EPSILON {
                continue;
            }
            chain.push(cut);
        }
        chain.push(Cut { t: 1.0, vertex: seg.b });

        for pair in chain.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if seg.is_straight() {
                if from.vertex != to.vertex {
                    segments.push(Segment::straight(from.vertex, to.vertex));
                }
            } else {
                let piece = curve.subsegment(from.t, to.t);
                segments.push(Segment::new(from.vertex, to.vertex, piece.ta(), piece.tb()));
            }
        }
    }

    VectorNetwork::new(vertices, segments)
}
