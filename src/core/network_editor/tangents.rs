//! Tangenten-Operationen: Setzen mit Spiegelung, Ecken glätten/schärfen.

use super::VectorNetworkEditor;
use crate::core::vector_network::{SegmentEnd, TangentControl, TangentMirroringMode, KAPPA};
use glam::DVec2;

/// Maximale normierte Kreuzprodukt-Abweichung, unter der zwei Tangenten als
/// kollinear gelten.
const ANGLE_EPSILON: f64 = 1e-3;

/// Leitet den Spiegelungsmodus aus zwei Tangenten am selben Vertex ab.
///
/// Null-Tangenten haben keine Richtung und ergeben `None`. Entgegengesetzt
/// kollineare Tangenten gleicher Länge ergeben `All`, sonst `Angle`.
pub fn infer_mirroring_mode(ta: DVec2, tb: DVec2) -> TangentMirroringMode {
    if ta == DVec2::ZERO || tb == DVec2::ZERO {
        return TangentMirroringMode::None;
    }
    let la = ta.length();
    let lb = tb.length();
    let cross_norm = ta.perp_dot(tb) / (la * lb);
    if cross_norm.abs() > ANGLE_EPSILON || ta.dot(tb) >= 0.0 {
        return TangentMirroringMode::None;
    }
    if (la - lb).abs() < f64::EPSILON {
        TangentMirroringMode::All
    } else {
        TangentMirroringMode::Angle
    }
}

impl VectorNetworkEditor {
    /// Die beiden Tangenten an einem Vertex mit genau zwei Segmenten:
    /// `[(Segment, Ende), (Segment, Ende)]`.
    fn corner_controls(&self, vertex: usize) -> Option<[(usize, TangentControl); 2]> {
        let segs = self.find_segments(vertex, SegmentEnd::Any);
        if segs.len() != 2 {
            return None;
        }
        let control = |si: usize| (si, self.network.segments[si].control_at(vertex));
        Some([control(segs[0]), control(segs[1])])
    }

    /// `true`, wenn genau zwei Segmente am Vertex anliegen.
    pub fn is_exact_corner(&self, vertex: usize) -> bool {
        self.find_segments(vertex, SegmentEnd::Any).len() == 2
    }

    /// Setzt eine Tangente auf null.
    pub fn delete_tangent(&mut self, segment: usize, control: TangentControl) {
        self.check_segment(segment);
        *self.network.segments[segment].tangent_mut(control) = DVec2::ZERO;
    }

    /// Vorschlag für `ta` eines neuen Segments ab `origin`: das negierte `tb`
    /// des einzigen anliegenden Segments, sonst null.
    pub fn next_mirrored_tangent(&self, origin: usize) -> DVec2 {
        match self.find_segments(origin, SegmentEnd::Any).as_slice() {
            [only] => -self.network.segments[*only].tb,
            _ => DVec2::ZERO,
        }
    }

    /// Setzt eine Tangente und spiegelt sie optional auf das Gegenstück.
    ///
    /// Gespiegelt wird nur, wenn am Vertex genau ein weiteres Segment anliegt.
    /// `Auto` bestimmt den Modus aus der Beziehung vor der Änderung.
    pub fn update_tangent(
        &mut self,
        segment: usize,
        control: TangentControl,
        value: DVec2,
        mirroring: TangentMirroringMode,
    ) {
        self.check_segment(segment);
        let seg = self.network.segments[segment];
        let vertex = seg.vertex_of(control);

        let connected: Vec<usize> = self
            .find_segments(vertex, SegmentEnd::Any)
            .into_iter()
            .filter(|&i| i != segment)
            .collect();

        let counterpart = match connected.as_slice() {
            [other] => Some((*other, self.network.segments[*other].control_at(vertex))),
            _ => None,
        };

        let effective = match (mirroring, counterpart) {
            (_, None) => TangentMirroringMode::None,
            (TangentMirroringMode::Auto, Some((other, other_control))) => infer_mirroring_mode(
                seg.tangent(control),
                self.network.segments[other].tangent(other_control),
            ),
            (mode, Some(_)) => mode,
        };

        *self.network.segments[segment].tangent_mut(control) = value;

        let Some((other, other_control)) = counterpart else {
            return;
        };
        let target = self.network.segments[other].tangent_mut(other_control);
        match effective {
            TangentMirroringMode::All => *target = -value,
            TangentMirroringMode::Angle => {
                let length = target.length();
                *target = -value.normalize_or_zero() * length;
            }
            TangentMirroringMode::None | TangentMirroringMode::Auto => {}
        }
    }

    /// Setzt beide Tangenten einer Ecke: `value` auf der ersten Seite, `-value`
    /// auf der zweiten. `None` (oder null) löscht beide.
    pub fn set_corner_tangents(&mut self, vertex: usize, value: Option<DVec2>) {
        self.check_vertex(vertex);
        let Some([(sa, ca), (sb, cb)]) = self.corner_controls(vertex) else {
            return;
        };
        let value = value.unwrap_or(DVec2::ZERO);
        *self.network.segments[sa].tangent_mut(ca) = value;
        *self.network.segments[sb].tangent_mut(cb) = -value;
    }

    /// Schaltet eine Ecke zwischen spitz und glatt um.
    ///
    /// - beide Tangenten gesetzt: beide löschen
    /// - genau eine gesetzt: negiert auf die andere Seite spiegeln
    /// - keine gesetzt: gespiegelte Tangenten senkrecht zur Winkelhalbierenden
    ///   erzeugen, Länge `KAPPA · len/2` (Länge je Segment, oder die des
    ///   Segments auf Seite `preferred_side`)
    ///
    /// Vertices ohne genau zwei Segmente und gerade Durchgänge bleiben unverändert.
    pub fn bend_corner(&mut self, vertex: usize, preferred_side: Option<TangentControl>) {
        self.check_vertex(vertex);
        let Some([(sa, ca), (sb, cb)]) = self.corner_controls(vertex) else {
            return;
        };
        let ta = self.network.segments[sa].tangent(ca);
        let tb = self.network.segments[sb].tangent(cb);

        match (ta != DVec2::ZERO, tb != DVec2::ZERO) {
            (true, true) => {
                *self.network.segments[sa].tangent_mut(ca) = DVec2::ZERO;
                *self.network.segments[sb].tangent_mut(cb) = DVec2::ZERO;
            }
            (true, false) => *self.network.segments[sb].tangent_mut(cb) = -ta,
            (false, true) => *self.network.segments[sa].tangent_mut(ca) = -tb,
            (false, false) => self.synthesize_corner_tangents(vertex, [(sa, ca), (sb, cb)], preferred_side),
        }
    }

    fn synthesize_corner_tangents(
        &mut self,
        vertex: usize,
        controls: [(usize, TangentControl); 2],
        preferred_side: Option<TangentControl>,
    ) {
        let origin = self.network.vertices[vertex];
        let sides = controls.map(|(si, control)| {
            let seg = self.network.segments[si];
            let other = if seg.a == vertex { seg.b } else { seg.a };
            let offset = self.network.vertices[other] - origin;
            let len = offset.length();
            (control, offset.normalize_or_zero(), len)
        });

        let bisector = sides[0].1 + sides[1].1;
        if bisector == DVec2::ZERO {
            return;
        }
        // Winkelhalbierende um 90° gedreht
        let base = DVec2::new(-bisector.y, bisector.x);
        let cross = bisector.perp_dot(sides[0].1);

        let reference = preferred_side.and_then(|side| sides.iter().find(|s| s.0 == side));
        let scale = |own_len: f64| {
            let len = reference.map_or(own_len, |r| r.2);
            len / 2.0 * KAPPA
        };
        let (scale_a, scale_b) = (scale(sides[0].2), scale(sides[1].2));

        let (first, second) = if cross < 0.0 {
            (-base * scale_a, base * scale_b)
        } else {
            (base * scale_a, -base * scale_b)
        };
        let [(sa, ca), (sb, cb)] = controls;
        *self.network.segments[sa].tangent_mut(ca) = first;
        *self.network.segments[sb].tangent_mut(cb) = second;
    }
}
