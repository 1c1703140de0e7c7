//! Application Controller für zentrale Command-Verarbeitung.

use super::state::EditorState;
use super::{AppCommand, AppState};
use std::sync::Arc;

/// Dispatcht Commands an die Feature-Handler und liefert den neuen Zustand.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Führt einen Command auf dem AppState aus.
    ///
    /// Liefert den resultierenden Editor-Zustand; bei abgelehnten oder
    /// wirkungslosen Commands ist es derselbe `Arc` wie vorher.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<Arc<EditorState>> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Vector Network ===
            AppCommand::AddVertex {
                node_id,
                position,
                from_vertex,
                outgoing_tangent,
            } => handlers::vector::add_vertex(
                state,
                &node_id,
                position,
                from_vertex,
                outgoing_tangent,
            )?,
            AppCommand::DeleteVertex { node_id, vertex } => {
                handlers::vector::delete_vertex(state, &node_id, vertex)?
            }
            AppCommand::DeleteSegment { node_id, segment } => {
                handlers::vector::delete_segment(state, &node_id, segment)?
            }
            AppCommand::SplitSegment { node_id, point } => {
                handlers::vector::split_segment(state, &node_id, point)?
            }
            AppCommand::TranslateVertex {
                node_id,
                vertex,
                delta,
            } => handlers::vector::translate_vertex(state, &node_id, vertex, delta)?,
            AppCommand::TranslateSegment {
                node_id,
                segment,
                delta,
            } => handlers::vector::translate_segment(state, &node_id, segment, delta)?,
            AppCommand::TranslateVectorSelection { delta } => {
                handlers::vector::translate_selection(state, delta)?
            }
            AppCommand::DeleteVectorSelection => handlers::vector::delete_selection(state)?,
            AppCommand::DuplicateVectorSelection => handlers::vector::duplicate_selection(state)?,
            AppCommand::BeginBendSegment { node_id, segment } => {
                handlers::vector::begin_bend_segment(state, &node_id, segment)?
            }
            AppCommand::BendSegment { t, target } => {
                handlers::vector::bend_segment(state, t, target)?
            }
            AppCommand::UpdateTangent {
                node_id,
                segment,
                control,
                value,
                mirroring,
            } => handlers::vector::update_tangent(
                state, &node_id, segment, control, value, mirroring,
            )?,
            AppCommand::DeleteTangent {
                node_id,
                segment,
                control,
            } => handlers::vector::delete_tangent(state, &node_id, segment, control)?,
            AppCommand::SetCornerTangents {
                node_id,
                vertex,
                value,
            } => handlers::vector::set_corner_tangents(state, &node_id, vertex, value)?,
            AppCommand::BendCorner {
                node_id,
                vertex,
                preferred_side,
            } => handlers::vector::bend_corner(state, &node_id, vertex, preferred_side)?,
            AppCommand::Planarize { node_id } => handlers::vector::planarize(state, &node_id)?,
            AppCommand::Optimize { node_id } => handlers::vector::optimize(state, &node_id)?,
            AppCommand::UnionNetworks { target, source } => {
                handlers::vector::union(state, &target, &source)?
            }

            // === Zeichnen ===
            AppCommand::BeginDraw { tool, position } => {
                handlers::vector::begin_draw(state, tool, position)?
            }
            AppCommand::DrawTo { position } => handlers::vector::draw_to(state, position)?,
            AppCommand::EndGesture => handlers::vector::end_gesture(state)?,

            // === Node-Graph ===
            AppCommand::InsertNode { node } => handlers::node_graph::insert(state, node)?,
            AppCommand::RemoveNode { node_id } => handlers::node_graph::remove(state, &node_id)?,
            AppCommand::TranslateNode { node_id, delta } => {
                handlers::node_graph::translate(state, &node_id, delta)?
            }
            AppCommand::ConvertToVector { node_id } => {
                handlers::node_graph::convert_to_vector(state, &node_id)?
            }
            AppCommand::ScaleSelection { factor } => {
                handlers::node_graph::scale_selection(state, factor)?
            }

            // === Selektion & Hover ===
            AppCommand::SelectNodes { node_ids, additive } => {
                handlers::selection::select_nodes(state, &node_ids, additive)?
            }
            AppCommand::ClearSelection => handlers::selection::clear(state)?,
            AppCommand::EnterContentEdit { node_id } => {
                handlers::selection::enter_content_edit(state, &node_id)?
            }
            AppCommand::ExitContentEdit => handlers::selection::exit_content_edit(state)?,
            AppCommand::SelectVectorItems {
                selection,
                additive,
            } => handlers::selection::select_vector_items(state, selection, additive)?,
            AppCommand::Hover { node_id } => handlers::selection::hover(state, node_id)?,
            AppCommand::HoverVertex { vertex } => {
                handlers::selection::hover_vertex(state, vertex)?
            }

            // === History ===
            AppCommand::Undo => handlers::history::undo(state)?,
            AppCommand::Redo => handlers::history::redo(state)?,
            AppCommand::ClearHistory => handlers::history::clear(state),

            // === Datei-I/O & Optionen ===
            AppCommand::LoadDocument { path } => handlers::file_io::load(state, &path)?,
            AppCommand::SaveDocument { path } => handlers::file_io::save(state, path)?,
            AppCommand::ImportSvg { path } => handlers::file_io::import_svg(state, &path)?,
            AppCommand::ExportSvg { path } => handlers::file_io::export_svg(state, &path)?,
            AppCommand::ApplyOptions { options } => {
                handlers::file_io::apply_options(state, *options)?
            }
        }

        Ok(Arc::clone(&state.editor))
    }

    /// Führt mehrere Commands nacheinander aus (Replay).
    ///
    /// Bricht beim ersten Fehler ab; bereits ausgeführte Commands bleiben wirksam.
    pub fn replay(
        &mut self,
        state: &mut AppState,
        commands: impl IntoIterator<Item = AppCommand>,
    ) -> anyhow::Result<Arc<EditorState>> {
        for command in commands {
            self.handle_command(state, command)?;
        }
        Ok(Arc::clone(&state.editor))
    }
}
