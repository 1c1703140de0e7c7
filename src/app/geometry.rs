//! Geometrie-Abfragen, die der Core nicht selbst beantwortet.
//!
//! Deklarierte Größen können nicht-numerisch sein (`auto`, z.B. Text). Die
//! aufgelöste absolute Box liefert daher ein externer Kollaborateur.

use crate::core::{Document, Rect};

/// Liefert die absolute Bounding-Box eines Nodes im Canvas-Raum.
pub trait GeometryQuery {
    fn absolute_bounding_rect(&self, document: &Document, node_id: &str) -> Option<Rect>;
}

/// Löst nur deklarierte, feste Größen auf; `auto` ergibt `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredGeometry;

impl GeometryQuery for DeclaredGeometry {
    fn absolute_bounding_rect(&self, document: &Document, node_id: &str) -> Option<Rect> {
        document.node(node_id)?.declared_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dimension, Node, NodeKind};

    #[test]
    fn declared_geometry_resolves_fixed_sizes_only() {
        let mut doc = Document::new();
        doc.insert_node(Node::with_rect(
            "r1",
            NodeKind::Rectangle,
            Rect::new(5.0, 6.0, 10.0, 20.0),
        ));
        let mut text = Node::with_rect(
            "t1",
            NodeKind::Text {
                text: "x".into(),
            },
            Rect::default(),
        );
        text.height = Dimension::Auto;
        doc.insert_node(text);

        let geometry = DeclaredGeometry;
        assert_eq!(
            geometry.absolute_bounding_rect(&doc, "r1"),
            Some(Rect::new(5.0, 6.0, 10.0, 20.0))
        );
        assert_eq!(geometry.absolute_bounding_rect(&doc, "t1"), None);
        assert_eq!(geometry.absolute_bounding_rect(&doc, "missing"), None);
    }
}
