//! Datenmodell eines Vector Networks: Vertices und kubische Segmente.
//!
//! Reine Daten plus Invarianten. Bearbeitende Operationen liegen im
//! [`VectorNetworkEditor`](super::VectorNetworkEditor).

use super::bezier::CubicBezier;
use super::Rect;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Bezier-Konstante für die Viertelkreis-Näherung.
pub const KAPPA: f64 = 0.5522847498;

/// Segment zwischen zwei Vertices mit relativen Tangenten.
///
/// Null-Tangenten auf beiden Seiten ergeben eine gerade Strecke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Index des Start-Vertex
    pub a: usize,
    /// Index des End-Vertex
    pub b: usize,
    /// Tangente relativ zu `a`
    #[serde(default)]
    pub ta: DVec2,
    /// Tangente relativ zu `b`
    #[serde(default)]
    pub tb: DVec2,
}

impl Segment {
    /// Gerades Segment ohne Tangenten.
    pub fn straight(a: usize, b: usize) -> Self {
        Self::new(a, b, DVec2::ZERO, DVec2::ZERO)
    }

    pub fn new(a: usize, b: usize, ta: DVec2, tb: DVec2) -> Self {
        Self { a, b, ta, tb }
    }

    /// `true`, wenn beide Tangenten null sind.
    pub fn is_straight(&self) -> bool {
        self.ta == DVec2::ZERO && self.tb == DVec2::ZERO
    }

    /// Prüft, ob das Segment den Vertex als Endpunkt nutzt.
    pub fn touches(&self, vertex: usize) -> bool {
        self.a == vertex || self.b == vertex
    }

    /// Tangente an einem Ende.
    pub fn tangent(&self, control: TangentControl) -> DVec2 {
        match control {
            TangentControl::Ta => self.ta,
            TangentControl::Tb => self.tb,
        }
    }

    /// Veränderbare Referenz auf die Tangente an einem Ende.
    pub fn tangent_mut(&mut self, control: TangentControl) -> &mut DVec2 {
        match control {
            TangentControl::Ta => &mut self.ta,
            TangentControl::Tb => &mut self.tb,
        }
    }

    /// Vertex-Index, dem die Tangente gehört.
    pub fn vertex_of(&self, control: TangentControl) -> usize {
        match control {
            TangentControl::Ta => self.a,
            TangentControl::Tb => self.b,
        }
    }

    /// Ende des Segments, an dem `vertex` liegt (bei Schleifen `Ta`).
    pub fn control_at(&self, vertex: usize) -> TangentControl {
        if self.a == vertex {
            TangentControl::Ta
        } else {
            TangentControl::Tb
        }
    }
}

/// Benennt ein Segment-Ende bzw. seine Tangente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TangentControl {
    Ta,
    Tb,
}

/// Rolle eines Vertex an einem Segment für Abfragen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentEnd {
    A,
    B,
    #[default]
    Any,
}

/// Spiegelungsmodus beim Ändern einer Tangente.
///
/// Beschrieben für `ta` (gilt umgekehrt für `tb`):
/// - `None`: das Gegenstück bleibt unverändert
/// - `Angle`: nur die (invertierte) Richtung wird gespiegelt, Länge bleibt
/// - `All`: Richtung und Länge werden gespiegelt (C1-stetig)
/// - `Auto`: leitet den Modus aus der aktuellen Beziehung der Tangenten ab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TangentMirroringMode {
    None,
    Angle,
    All,
    #[default]
    Auto,
}

/// Parametrische Position auf einem Segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointOnSegment {
    pub segment: usize,
    pub t: f64,
}

/// Editierbarer Pfad-Graph eines Vector-Nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorNetwork {
    #[serde(default)]
    pub vertices: Vec<DVec2>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl VectorNetwork {
    pub fn new(vertices: Vec<DVec2>, segments: Vec<Segment>) -> Self {
        Self { vertices, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.segments.is_empty()
    }

    /// Kubische Kurve eines Segments mit absoluten Kontrollpunkten.
    pub fn curve(&self, segment: usize) -> CubicBezier {
        let seg = &self.segments[segment];
        CubicBezier::from_segment(self.vertices[seg.a], self.vertices[seg.b], seg.ta, seg.tb)
    }

    /// Prüft die Index-Invariante (für geladene, nicht vertrauenswürdige Daten).
    pub fn validate(&self) -> anyhow::Result<()> {
        let count = self.vertices.len();
        for (i, seg) in self.segments.iter().enumerate() {
            if seg.a >= count || seg.b >= count {
                anyhow::bail!(
                    "Segment {} referenziert ungültigen Vertex ({} -> {}, {} Vertices)",
                    i,
                    seg.a,
                    seg.b,
                    count
                );
            }
        }
        if let Some(p) = self.vertices.iter().find(|p| !p.is_finite()) {
            anyhow::bail!("Vertex mit nicht-endlicher Position: {:?}", p);
        }
        Ok(())
    }

    /// AABB nur über die Vertex-Positionen; leeres Netz ergibt ein Null-Rechteck.
    pub fn bbox(&self) -> Rect {
        Rect::from_points(self.vertices.iter().copied()).unwrap_or_default()
    }

    /// Exakte BBox über die Extrema aller Segmentkurven.
    ///
    /// Ohne Segmente fällt sie auf die Vertex-BBox zurück.
    pub fn bbox_exact(&self) -> Rect {
        (0..self.segments.len())
            .map(|i| self.curve(i).extrema_bbox())
            .reduce(|acc, r| acc.union(&r))
            .unwrap_or_else(|| self.bbox())
    }

    // ── Konstruktoren ───────────────────────────────────────────

    /// Offene Polylinie durch die Punkte.
    pub fn polyline(points: &[DVec2]) -> Self {
        let segments = (1..points.len()).map(|i| Segment::straight(i - 1, i)).collect();
        Self::new(points.to_vec(), segments)
    }

    /// Geschlossenes Polygon durch die Punkte.
    pub fn polygon(points: &[DVec2]) -> Self {
        let mut network = Self::polyline(points);
        if points.len() > 1 {
            network.segments.push(Segment::straight(points.len() - 1, 0));
        }
        network
    }

    /// Rechteck im Uhrzeigersinn ab der linken oberen Ecke.
    pub fn from_rect(rect: Rect) -> Self {
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        Self::polygon(&[
            DVec2::new(x, y),
            DVec2::new(x + width, y),
            DVec2::new(x + width, y + height),
            DVec2::new(x, y + height),
        ])
    }

    /// Ellipse aus vier kubischen Segmenten (oben, rechts, unten, links).
    pub fn from_ellipse(rect: Rect) -> Self {
        let c = rect.center();
        let rx = rect.width / 2.0;
        let ry = rect.height / 2.0;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        let vertices = vec![
            DVec2::new(c.x, c.y - ry),
            DVec2::new(c.x + rx, c.y),
            DVec2::new(c.x, c.y + ry),
            DVec2::new(c.x - rx, c.y),
        ];
        let segments = vec![
            Segment::new(0, 1, DVec2::new(kx, 0.0), DVec2::new(0.0, -ky)),
            Segment::new(1, 2, DVec2::new(0.0, ky), DVec2::new(kx, 0.0)),
            Segment::new(2, 3, DVec2::new(-kx, 0.0), DVec2::new(0.0, ky)),
            Segment::new(3, 0, DVec2::new(0.0, -ky), DVec2::new(-kx, 0.0)),
        ];
        Self::new(vertices, segments)
    }

    /// Regelmäßiges Polygon mit `points` Ecken, eingeschrieben in 90% der Box.
    pub fn from_regular_polygon(width: f64, height: f64, points: usize) -> Self {
        let step = std::f64::consts::TAU / points.max(1) as f64;
        let radius = DVec2::new(width, height) * 0.45;
        let pts: Vec<DVec2> = (0..points)
            .map(|i| ellipse_point(width, height, radius, i as f64 * step))
            .collect();
        Self::polygon(&pts)
    }

    /// Stern mit `points` Zacken; `inner_radius` ist relativ zum Außenradius.
    pub fn from_star_polygon(width: f64, height: f64, points: usize, inner_radius: f64) -> Self {
        let step = std::f64::consts::PI / points.max(1) as f64;
        let outer = DVec2::new(width, height) * 0.45;
        let inner = outer * inner_radius;
        let pts: Vec<DVec2> = (0..points * 2)
            .map(|i| {
                let radius = if i % 2 == 0 { outer } else { inner };
                ellipse_point(width, height, radius, i as f64 * step)
            })
            .collect();
        Self::polygon(&pts)
    }
}

/// Punkt auf der Ellipse um die Box-Mitte; Winkel 0 zeigt nach oben.
fn ellipse_point(width: f64, height: f64, radius: DVec2, angle: f64) -> DVec2 {
    let angle = angle - std::f64::consts::FRAC_PI_2;
    DVec2::new(
        width / 2.0 + radius.x * angle.cos(),
        height / 2.0 + radius.y * angle.sin(),
    )
}
