use airdeck::payload::{Airbeam, Geometry, Loads, MaterialDef, Plates, Straps};
use airdeck::DeckPayload;

/// Demonstration deck: an 8 m span, 1.5 m wide steel deck on a 300 mm airbeam
/// at 100 kPa, carrying a 1.5 kN/m² pedestrian live load.
///
/// The straps are described but not engaged, so the deck spans on plate
/// bending and membrane tension alone.
pub fn demonstration_payload() -> DeckPayload {
    DeckPayload {
        geometry: Geometry {
            span: Some(8_000.0),
            clear_width: Some(1_500.0),
        },
        plates: Plates {
            top_thickness: Some(50.0),
            bottom_thickness: Some(50.0),
            material_id: Some("S355".into()),
        },
        materials: vec![MaterialDef {
            id: "S355".into(),
            elastic_modulus: Some(210_000.0),
        }],
        airbeam: Airbeam {
            height: Some(300.0),
            pressure: Some(100.0),
        },
        straps: Some(Straps {
            enabled: false,
            ..Straps::default()
        }),
        loads: Loads {
            uniform_area: Some(1.5),
            ..Loads::default()
        },
        n_nodes: None,
    }
}
