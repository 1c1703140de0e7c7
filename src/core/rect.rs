//! Achsenparalleles Rechteck (Bounding-Box) im Canvas-Raum.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Achsenparalleles Rechteck mit Ursprung oben links.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Erstellt ein Rechteck aus Ursprung und Größe.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Erstellt ein Rechteck aus zwei Eckpunkten (Reihenfolge egal).
    pub fn from_corners(p: DVec2, q: DVec2) -> Self {
        let min = p.min(q);
        let max = p.max(q);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Kleinstes Rechteck um alle Punkte. `None` bei leerer Eingabe.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::from_corners(min, max))
    }

    /// Linke obere Ecke.
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Rechte untere Ecke.
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn center(&self) -> DVec2 {
        self.min() + self.size() * 0.5
    }

    /// Vereinigung zweier Rechtecke.
    pub fn union(&self, other: &Rect) -> Rect {
        Self::from_corners(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Prüft Überlappung inklusive Berührung an den Kanten.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}
