#![no_main]

use libfuzzer_sys::fuzz_target;
use vector_canvas_editor::svg::path_data;

fuzz_target!(|data: &[u8]| {
    let Ok(d) = std::str::from_utf8(data) else {
        return;
    };
    // Gültige Pfaddaten müssen ein konsistentes Netz liefern
    if let Ok(network) = path_data::decode(d) {
        assert!(network.validate().is_ok() || network.vertices.iter().any(|p| !p.is_finite()));
    }
});
