//! Kubische Bezier-Mathematik: Auswertung, De-Casteljau-Teilung, Extrema-BBox,
//! Biege-Inversion und Schnittpunktsuche.
//!
//! Ein Segment `{a, b, ta, tb}` wird immer als Kubik `a, a+ta, b+tb, b`
//! ausgewertet. Auch gerade Segmente (Null-Tangenten) sind damit kubisch
//! parametrisiert, `t = 0.25` liegt also nicht bei einem Viertel der Strecke.

use super::Rect;
use glam::DVec2;

/// Numerische Toleranz für Parameter-Grenzen und Null-Tests.
const EPSILON: f64 = 1e-12;

/// Abstand, unter dem ein gezogener Punkt auf einer geraden Strecke keine Kurve erzeugt.
pub const BEND_STRAIGHT_THRESHOLD: f64 = 0.1;

/// Maximale Rekursionstiefe der Schnittpunktsuche.
const INTERSECTION_MAX_DEPTH: u32 = 48;
/// Maximale Anzahl untersuchter Teilkurven-Paare pro Kurvenpaar.
const INTERSECTION_BUDGET: usize = 1 << 14;
/// Parameterabstand, unter dem zwei Treffer als derselbe gelten.
const INTERSECTION_DEDUP_T: f64 = 1e-5;

/// Kubische Bezierkurve mit absoluten Kontrollpunkten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl CubicBezier {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Baut die Kurve aus Segment-Endpunkten und relativen Tangenten.
    pub fn from_segment(a: DVec2, b: DVec2, ta: DVec2, tb: DVec2) -> Self {
        Self::new(a, a + ta, b + tb, b)
    }

    /// Relative Tangente am Startpunkt.
    pub fn ta(&self) -> DVec2 {
        self.p1 - self.p0
    }

    /// Relative Tangente am Endpunkt.
    pub fn tb(&self) -> DVec2 {
        self.p2 - self.p3
    }

    /// Gerade Strecke, wenn beide Kontrollpunkte auf ihren Endpunkten liegen.
    pub fn is_straight(&self) -> bool {
        self.p1 == self.p0 && self.p2 == self.p3
    }

    /// Punkt auf der Kurve bei Parameter `t` (Bernstein-Form).
    pub fn eval(&self, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        self.p0 * (mt2 * mt) + self.p1 * (3.0 * mt2 * t) + self.p2 * (3.0 * mt * t2) + self.p3 * (t2 * t)
    }

    /// Teilt die Kurve bei `t` per De Casteljau in zwei exakt deckungsgleiche Hälften.
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let mid = p012.lerp(p123, t);
        (
            CubicBezier::new(self.p0, p01, p012, mid),
            CubicBezier::new(mid, p123, p23, self.p3),
        )
    }

    /// Teilkurve zwischen `t0` und `t1` (reparametrisiert auf `[0, 1]`).
    pub fn subsegment(&self, t0: f64, t1: f64) -> CubicBezier {
        if t0 <= EPSILON && t1 >= 1.0 - EPSILON {
            return *self;
        }
        let (_, right) = self.split(t0);
        if t0 >= 1.0 - EPSILON {
            return right;
        }
        let local = (t1 - t0) / (1.0 - t0);
        right.split(local).0
    }

    /// BBox über die Kontrollpunkte (konservativ, umschließt die Kurve).
    pub fn hull_bbox(&self) -> Rect {
        let min = self.p0.min(self.p1).min(self.p2).min(self.p3);
        let max = self.p0.max(self.p1).max(self.p2).max(self.p3);
        Rect::from_corners(min, max)
    }

    /// Exakte BBox über Endpunkte und Extrema der Kurve.
    pub fn extrema_bbox(&self) -> Rect {
        let mut min = self.p0.min(self.p3);
        let mut max = self.p0.max(self.p3);
        for t in self.extrema() {
            let p = self.eval(t);
            min = min.min(p);
            max = max.max(p);
        }
        Rect::from_corners(min, max)
    }

    /// Parameter der achsenparallelen Extrema im offenen Intervall `(0, 1)`.
    fn extrema(&self) -> Vec<f64> {
        let a = (-self.p0 + 3.0 * self.p1 - 3.0 * self.p2 + self.p3) * 3.0;
        let b = (self.p0 - 2.0 * self.p1 + self.p2) * 6.0;
        let c = (self.p1 - self.p0) * 3.0;
        let mut roots = Vec::with_capacity(4);
        for axis in 0..2 {
            solve_quadratic(a[axis], b[axis], c[axis], &mut roots);
        }
        roots.retain(|t| *t > 0.0 && *t < 1.0);
        roots
    }

    /// Parameterpaar `(s, r)` mit `s < r` und `B(s) == B(r)`, falls die Kurve
    /// sich selbst schneidet.
    ///
    /// Löst analytisch in Potenzbasis `B(t) = P0 + c1·t + c2·t² + c3·t³`:
    /// mit `u = s + r`, `v = s·r` gilt `c1 + c2·u + c3·(u² − v) = 0`.
    pub fn self_intersection(&self) -> Option<(f64, f64)> {
        let c1 = 3.0 * (self.p1 - self.p0);
        let c2 = 3.0 * (self.p0 - 2.0 * self.p1 + self.p2);
        let c3 = self.p3 - self.p0 + 3.0 * (self.p1 - self.p2);

        let c2_x_c3 = c2.perp_dot(c3);
        if c2_x_c3.abs() < EPSILON || c3.length_squared() < EPSILON {
            return None;
        }
        let u = -c1.perp_dot(c3) / c2_x_c3;
        // Komponente mit größerem |c3| für numerische Stabilität
        let w = if c3.x.abs() >= c3.y.abs() {
            -(c1.x + c2.x * u) / c3.x
        } else {
            -(c1.y + c2.y * u) / c3.y
        };
        let v = u * u - w;

        let disc = u * u - 4.0 * v;
        if disc <= EPSILON {
            return None;
        }
        let root = disc.sqrt();
        let s = (u - root) * 0.5;
        let r = (u + root) * 0.5;
        let inside = |t: f64| t > 1e-9 && t < 1.0 - 1e-9;
        (inside(s) && inside(r)).then_some((s, r))
    }
}

/// Reelle Nullstellen von `a·t² + b·t + c` (degeneriert linear, wenn `a ≈ 0`).
fn solve_quadratic(a: f64, b: f64, c: f64, out: &mut Vec<f64>) {
    if a.abs() < EPSILON {
        if b.abs() > EPSILON {
            out.push(-c / b);
        }
        return;
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return;
    }
    let root = disc.sqrt();
    out.push((-b + root) / (2.0 * a));
    out.push((-b - root) / (2.0 * a));
}

/// Berechnet neue Tangenten, sodass die Kurve bei `t` durch `target` verläuft.
///
/// Die Abweichung `d = target − B(t)` wird hälftig auf beide Kontrollpunkte
/// verteilt: `ta += (d/2) / (3·t·(1−t)²)` und `tb += (d/2) / (3·(1−t)·t²)`.
/// An den Parameter-Enden (`t ≤ 0`, `t ≥ 1`) bleiben die Tangenten unverändert.
/// Liegt `target` bei einer geraden Strecke höchstens
/// [`BEND_STRAIGHT_THRESHOLD`] vom Sehnenpunkt entfernt, bleibt sie gerade.
pub fn solve_tangents_for_point(
    a: DVec2,
    b: DVec2,
    ta: DVec2,
    tb: DVec2,
    t: f64,
    target: DVec2,
) -> (DVec2, DVec2) {
    if t <= EPSILON || t >= 1.0 - EPSILON {
        return (ta, tb);
    }
    if ta == DVec2::ZERO
        && tb == DVec2::ZERO
        && a.lerp(b, t).distance(target) <= BEND_STRAIGHT_THRESHOLD
    {
        return (DVec2::ZERO, DVec2::ZERO);
    }

    let current = CubicBezier::from_segment(a, b, ta, tb).eval(t);
    let half = (target - current) * 0.5;
    let mt = 1.0 - t;
    let weight_a = 3.0 * t * mt * mt;
    let weight_b = 3.0 * mt * t * t;
    (ta + half / weight_a, tb + half / weight_b)
}

/// Schnittpunkt zweier Strecken als Parameterpaar `(t, u)` in `[0, 1]²`.
/// Parallele und kollineare Strecken liefern `None`.
pub fn line_intersection(p0: DVec2, p1: DVec2, q0: DVec2, q1: DVec2) -> Option<(f64, f64)> {
    let d1 = p1 - p0;
    let d2 = q1 - q0;
    let denom = d1.perp_dot(d2);
    if denom.abs() < EPSILON {
        return None;
    }
    let offset = q0 - p0;
    let t = offset.perp_dot(d2) / denom;
    let u = offset.perp_dot(d1) / denom;
    let range = -EPSILON..=1.0 + EPSILON;
    (range.contains(&t) && range.contains(&u)).then(|| (t.clamp(0.0, 1.0), u.clamp(0.0, 1.0)))
}

/// Kurvenparameter `t` einer geraden Kubik (Null-Tangenten), deren Punkt
/// beim Sehnenanteil `s` liegt. Umkehrung von `3t² - 2t³ = s`.
fn straight_parameter(s: f64) -> f64 {
    let s = s.clamp(0.0, 1.0);
    (0.5 - ((1.0 - 2.0 * s).asin() / 3.0).sin()).clamp(0.0, 1.0)
}

/// Alle Schnittpunkte zweier Kurven als Parameterpaare `(t1, t2)`, sortiert nach `t1`.
///
/// Gerade/Gerade wird exakt gelöst, alles andere per rekursiver
/// BBox-Subdivision bis zur Toleranz `tolerance`. Die Parameter sind immer
/// Kurvenparameter, auch für gerade Segmente.
pub fn intersections(c1: &CubicBezier, c2: &CubicBezier, tolerance: f64) -> Vec<(f64, f64)> {
    if c1.is_straight() && c2.is_straight() {
        return line_intersection(c1.p0, c1.p3, c2.p0, c2.p3)
            .map(|(t, u)| (straight_parameter(t), straight_parameter(u)))
            .into_iter()
            .collect();
    }

    let mut hits = Vec::new();
    let mut budget = INTERSECTION_BUDGET;
    subdivide_intersections(
        c1,
        (0.0, 1.0),
        c2,
        (0.0, 1.0),
        tolerance.max(EPSILON),
        0,
        &mut budget,
        &mut hits,
    );

    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut unique: Vec<(f64, f64)> = Vec::with_capacity(hits.len());
    for hit in hits {
        let duplicate = unique.iter().any(|u| {
            (u.0 - hit.0).abs() < INTERSECTION_DEDUP_T && (u.1 - hit.1).abs() < INTERSECTION_DEDUP_T
        });
        if !duplicate {
            unique.push(hit);
        }
    }
    unique
}

#[allow(clippy::too_many_arguments)]
fn subdivide_intersections(
    c1: &CubicBezier,
    r1: (f64, f64),
    c2: &CubicBezier,
    r2: (f64, f64),
    tolerance: f64,
    depth: u32,
    budget: &mut usize,
    out: &mut Vec<(f64, f64)>,
) {
    if *budget == 0 {
        return;
    }
    *budget -= 1;

    let b1 = c1.hull_bbox();
    let b2 = c2.hull_bbox();
    if !b1.intersects(&b2) {
        return;
    }

    let small = |r: &Rect| r.width.max(r.height) <= tolerance;
    if depth >= INTERSECTION_MAX_DEPTH || (small(&b1) && small(&b2)) {
        out.push(((r1.0 + r1.1) * 0.5, (r2.0 + r2.1) * 0.5));
        return;
    }

    let m1 = (r1.0 + r1.1) * 0.5;
    let m2 = (r2.0 + r2.1) * 0.5;
    let (c1l, c1r) = c1.split(0.5);
    let (c2l, c2r) = c2.split(0.5);
    let halves1 = [(c1l, (r1.0, m1)), (c1r, (m1, r1.1))];
    let halves2 = [(c2l, (r2.0, m2)), (c2r, (m2, r2.1))];
    for (h1, range1) in &halves1 {
        for (h2, range2) in &halves2 {
            subdivide_intersections(h1, *range1, h2, *range2, tolerance, depth + 1, budget, out);
        }
    }
}
