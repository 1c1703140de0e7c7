//! Use-Case: Selektion skalieren.
//!
//! Die absoluten Boxen liefert der Geometrie-Kollaborateur, da deklarierte
//! Größen `auto` sein können. Skaliert wird um die linke obere Ecke der
//! gemeinsamen Box.

use super::vector::edit_vector_network;
use crate::app::AppState;
use crate::core::{Dimension, Node, NodeId, NodeKind, Rect};
use glam::DVec2;

/// Skaliert alle selektierten Nodes um `factor`.
///
/// Nodes ohne auflösbare Box werden mit Warnung übersprungen.
pub fn scale_selection(state: &mut AppState, factor: f64) -> anyhow::Result<()> {
    if !factor.is_finite() || factor <= 0.0 {
        log::warn!("scale_selection: ungültiger Faktor {}", factor);
        return Ok(());
    }

    let mut targets: Vec<(NodeId, Rect)> = Vec::new();
    for node_id in &state.editor.selection.nodes {
        match state
            .geometry
            .absolute_bounding_rect(state.document(), node_id)
        {
            Some(rect) => targets.push((node_id.clone(), rect)),
            None => log::warn!("scale_selection: keine Bounding-Box für {}", node_id),
        }
    }
    let Some(bounds) = targets
        .iter()
        .map(|(_, rect)| *rect)
        .reduce(|acc, rect| acc.union(&rect))
    else {
        log::debug!("scale_selection: nichts zu skalieren");
        return Ok(());
    };
    let origin = bounds.min();

    state.apply_transition("scale_selection", |s| {
        for (node_id, rect) in &targets {
            let Some(node) = s.document.node_mut(node_id) else {
                continue;
            };
            lock_auto_dimensions(node, rect);
            let moved = origin + (rect.min() - origin) * factor;
            node.left += moved.x - rect.x;
            node.top += moved.y - rect.y;

            if node.is_vector() {
                edit_vector_network(&mut s.document, node_id, |editor, _| {
                    editor.scale(DVec2::splat(factor))
                });
            } else {
                node.width = scaled(node.width, factor);
                node.height = scaled(node.height, factor);
            }
        }
    })?;
    log::info!(
        "{} Nodes um Faktor {} skaliert (Ursprung {:?})",
        targets.len(),
        factor,
        origin
    );
    Ok(())
}

/// Ersetzt `auto`-Größen durch die aufgelöste Größe (Text aufgerundet).
fn lock_auto_dimensions(node: &mut Node, rect: &Rect) {
    let is_text = matches!(node.kind, NodeKind::Text { .. });
    let lock = |value: f64| if is_text { value.ceil() } else { value.round() };
    if node.width == Dimension::Auto {
        node.width = Dimension::Fixed(lock(rect.width));
    }
    if node.height == Dimension::Auto {
        node.height = Dimension::Fixed(lock(rect.height));
    }
}

fn scaled(dimension: Dimension, factor: f64) -> Dimension {
    match dimension {
        Dimension::Fixed(value) => Dimension::Fixed(value * factor),
        Dimension::Auto => Dimension::Auto,
    }
}
