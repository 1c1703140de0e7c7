//! Vector Canvas Editor (Headless-Treiber).
//!
//! Spielt eine Command-Datei (JSON-Array von `AppCommand`) auf ein Dokument
//! ab und schreibt das Ergebnis als JSON oder SVG.
//!
//! Aufruf: `Vector-Canvas-Editor <dokument.json> <commands.json> [ausgabe.json|ausgabe.svg]`

use anyhow::Context;
use vector_canvas_editor::{AppCommand, AppController, AppState, EditorOptions};

fn main() {
    if let Err(e) = AppRunner::run() {
        log::error!("Replay fehlgeschlagen: {:#}", e);
        std::process::exit(1);
    }
}

/// Kommandozeilen-Argumente des Replay-Treibers
struct ReplayArgs {
    document: String,
    commands: String,
    output: Option<String>,
}

impl ReplayArgs {
    fn from_env() -> anyhow::Result<Self> {
        let mut args = std::env::args().skip(1);
        let usage = "Aufruf: <dokument.json> <commands.json> [ausgabe.json|ausgabe.svg]";
        let document = args.next().context(usage)?;
        let commands = args.next().context(usage)?;
        let output = args.next();
        if args.next().is_some() {
            anyhow::bail!("Zu viele Argumente. {}", usage);
        }
        Ok(Self {
            document,
            commands,
            output,
        })
    }
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Vector Canvas Editor v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let args = ReplayArgs::from_env()?;

        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let options = EditorOptions::load_from_file(&config_path);

        let mut state = AppState::with_options(options);
        let mut controller = AppController::new();

        let commands = Self::read_commands(&args.commands)?;
        log::info!("{} Commands aus {} gelesen", commands.len(), args.commands);

        let mut script = Vec::with_capacity(commands.len() + 2);
        script.push(AppCommand::LoadDocument {
            path: args.document.clone(),
        });
        script.extend(commands);
        match args.output {
            Some(path) if path.to_ascii_lowercase().ends_with(".svg") => {
                script.push(AppCommand::ExportSvg { path });
            }
            Some(path) => script.push(AppCommand::SaveDocument { path: Some(path) }),
            None => {}
        }

        let editor = controller.replay(&mut state, script)?;
        log::info!(
            "Replay abgeschlossen: {} Nodes, {} Undo-Schritte, {} Redo-Schritte",
            editor.document.node_count(),
            state.history.past().len(),
            state.history.future().len()
        );
        Ok(())
    }

    fn read_commands(path: &str) -> anyhow::Result<Vec<AppCommand>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Command-Datei nicht lesbar: {}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Command-Datei ungültig: {}", path))
    }
}
