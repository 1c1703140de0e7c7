//! Parser für SVG-Dokumente: liest alle `<path d="...">`.

use super::path_data;
use crate::core::VectorNetwork;
use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Ein gelesener Pfad mit absoluten Koordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub id: Option<String>,
    pub network: VectorNetwork,
}

/// Liest alle Pfade eines SVG-Dokuments in Dokument-Reihenfolge.
///
/// Ungültige Pfaddaten brechen den Import mit Fehler ab; `transform`-Attribute
/// werden nicht ausgewertet.
pub fn parse_svg(content: &str) -> Result<Vec<SvgPath>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut paths = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"path" {
                    if let Some(path) = read_path(&reader, e)? {
                        paths.push(path);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des SVG"),
            _ => {}
        }
        buffer.clear();
    }

    log::info!("SVG gelesen: {} Pfade", paths.len());
    Ok(paths)
}

fn read_path(reader: &Reader<&[u8]>, element: &BytesStart) -> Result<Option<SvgPath>> {
    let mut id = None;
    let mut d = None;
    for attr in element.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?;
        match key.as_ref() {
            "id" => id = Some(attr.unescape_value()?.into_owned()),
            "d" => d = Some(attr.unescape_value()?.into_owned()),
            "transform" => log::warn!("SVG-Import: transform-Attribut wird ignoriert"),
            _ => {}
        }
    }

    let Some(d) = d else {
        log::debug!("SVG-Import: <path> ohne d-Attribut übersprungen");
        return Ok(None);
    };
    let network = path_data::decode(&d)
        .with_context(|| format!("Ungültige Pfaddaten in <path id={:?}>", id))?;
    Ok(Some(SvgPath { id, network }))
}
