#![warn(clippy::pedantic)]

use airdeck::{
    approximate, approximate_with, ApproximationOptions, DeckPayload, Scheme, SolverKind, Status,
    Warning,
};
use airdeck::parameters::MAX_STRAP_LINES;
use airdeck::payload::{Axle, PointLoad, Vehicle};
use airdeck::ResultRecord;
use approx::assert_relative_eq;

#[derive(Debug, Clone, Copy)]
struct DeckProperties {
    span: f64,
    width: f64,
    plate_thickness: f64,
    plate_modulus: f64,
    airbeam_height: f64,
    pressure_kpa: f64,
    area_load_kn_m2: f64,
}

impl Default for DeckProperties {
    fn default() -> Self {
        Self {
            span: 8_000.0,
            width: 1_500.0,
            plate_thickness: 50.0,
            plate_modulus: 210_000.0,
            airbeam_height: 300.0,
            pressure_kpa: 100.0,
            area_load_kn_m2: 1.5,
        }
    }
}

impl DeckProperties {
    fn line_load(&self) -> f64 {
        self.area_load_kn_m2 * self.width / 1_000.0
    }

    fn flexural_rigidity(&self) -> f64 {
        self.plate_modulus * 2.0 * self.plate_thickness.powi(3) / 12.0 * self.width
    }

    /// Midspan deflection of a simply supported beam under uniform load.
    fn beam_theory_deflection(&self) -> f64 {
        5.0 * self.line_load() * self.span.powi(4) / (384.0 * self.flexural_rigidity())
    }
}

fn build_payload(properties: &DeckProperties, straps: &str) -> DeckPayload {
    let text = format!(
        r#"{{
            "geometry": {{"span": {span}, "clear_width": {width}}},
            "plates": {{"top_thickness": {t}, "bottom_thickness": {t}, "material_id": "steel"}},
            "materials": [{{"id": "steel", "E": {modulus}}}],
            "airbeam": {{"height": {height}, "pressure": {pressure}}},
            "straps": {straps},
            "loads": {{"uniform_load_kN_per_m2": {load}}}
        }}"#,
        span = properties.span,
        width = properties.width,
        t = properties.plate_thickness,
        modulus = properties.plate_modulus,
        height = properties.airbeam_height,
        pressure = properties.pressure_kpa,
        load = properties.area_load_kn_m2,
    );
    DeckPayload::from_json_str(&text).expect("deck payload parses")
}

fn consistent(nodes: usize) -> ApproximationOptions {
    ApproximationOptions {
        nodes: Some(nodes),
        scheme: Scheme::Consistent,
        ..ApproximationOptions::default()
    }
}

fn tensionless_unstrapped() -> (DeckProperties, DeckPayload) {
    let properties = DeckProperties {
        pressure_kpa: 0.0,
        ..DeckProperties::default()
    };
    let payload = build_payload(&properties, r#"{"enabled": false}"#);
    (properties, payload)
}

#[test]
fn scenario_deck_sags_smoothly_and_symmetrically() {
    let properties = DeckProperties::default();
    let payload = build_payload(&properties, r#"{"enabled": false}"#);
    let result = approximate_with(&payload, &consistent(201));

    assert_eq!(result.status(), Status::Ok);
    assert_eq!(result.deflection.len(), 201);
    assert!(result.max_deflection > 0.0);
    assert_eq!(result.strap_forces.len(), 5);
    assert_relative_eq!(result.diagnostics.tension, 15.0, max_relative = 1e-12);
    assert_eq!(result.diagnostics.distributed_stiffness, 0.0);

    // Smooth: the sag grows monotonically from each support to midspan.
    let mid = 100;
    for i in 0..mid {
        assert!(result.deflection[i] < result.deflection[i + 1]);
    }
    assert_relative_eq!(result.deflection[mid], result.max_deflection);

    let scale = result.max_deflection;
    for i in 0..result.deflection.len() {
        let mirrored = result.deflection[result.deflection.len() - 1 - i];
        assert!((result.deflection[i] - mirrored).abs() <= 1e-8 * scale);
    }
}

#[test]
fn scenario_deck_is_singular_under_the_legacy_scheme() {
    let payload = build_payload(&DeckProperties::default(), r#"{"enabled": false}"#);
    let result = approximate(&payload);

    assert!(result.deflection.iter().all(|value| *value == 0.0));
    assert_eq!(result.max_deflection, 0.0);
    assert!(matches!(
        result.diagnostics.warnings.as_slice(),
        [Warning::SingularSystem { .. }]
    ));
    assert_eq!(result.strap_forces, vec![0.0; 5]);
    assert_eq!(result.diagnostics.solved_nodes, 201);
}

#[test]
fn supports_never_move() {
    let properties = DeckProperties::default();
    let payloads = [
        build_payload(&properties, r#"{"enabled": false}"#),
        build_payload(&properties, r#"{"enabled": true, "spacing": 250}"#),
    ];
    for payload in &payloads {
        for scheme in [Scheme::Legacy, Scheme::Consistent] {
            for solver in [SolverKind::Dense, SolverKind::Banded] {
                for nodes in [5, 6, 51, 200] {
                    let options = ApproximationOptions {
                        nodes: Some(nodes),
                        scheme,
                        solver,
                        ..ApproximationOptions::default()
                    };
                    let result = approximate_with(payload, &options);
                    assert_eq!(result.deflection.len(), nodes);
                    assert_eq!(result.deflection[0], 0.0);
                    assert_eq!(result.deflection[nodes - 1], 0.0);
                }
            }
        }
    }
}

#[test]
fn strapped_deck_is_symmetric_under_both_schemes() {
    let payload = build_payload(
        &DeckProperties::default(),
        r#"{"enabled": true, "spacing": 300}"#,
    );
    for scheme in [Scheme::Legacy, Scheme::Consistent] {
        let options = ApproximationOptions {
            scheme,
            ..ApproximationOptions::default()
        };
        let result = approximate_with(&payload, &options);
        assert!(result.max_deflection > 0.0);
        let n = result.deflection.len();
        for i in 0..n {
            let difference = result.deflection[i] - result.deflection[n - 1 - i];
            assert!(difference.abs() <= 1e-8 * result.max_deflection);
        }
    }
}

#[test]
fn matches_beam_theory_without_tension_or_straps() {
    let (properties, payload) = tensionless_unstrapped();
    let expected = properties.beam_theory_deflection();
    for nodes in [101, 201, 401] {
        let result = approximate_with(&payload, &consistent(nodes));
        assert_eq!(result.diagnostics.tension, 0.0);
        assert_relative_eq!(result.max_deflection, expected, max_relative = 0.03);
    }
}

#[test]
fn refining_the_grid_does_not_increase_the_error() {
    let (properties, payload) = tensionless_unstrapped();
    let expected = properties.beam_theory_deflection();
    let errors: Vec<f64> = [26, 51, 101, 201, 401]
        .iter()
        .map(|nodes| (approximate_with(&payload, &consistent(*nodes)).max_deflection - expected).abs())
        .collect();
    for pair in errors.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9 * expected);
    }
}

#[test]
fn midspan_point_load_matches_beam_theory() {
    let payload = DeckPayload::from_json_str(
        r#"{
            "geometry": {"span": 8000, "clear_width": 1500},
            "plates": {"top_thickness": 50, "bottom_thickness": 50, "material_id": "steel"},
            "materials": [{"id": "steel", "E": 210000}],
            "loads": {"point_loads": [{"position": 4000, "magnitude_kN": 10}]}
        }"#,
    )
    .expect("payload parses");
    let result = approximate_with(&payload, &consistent(201));
    let ei = result.diagnostics.flexural_rigidity;
    let expected = 10_000.0 * 8_000.0_f64.powi(3) / (48.0 * ei);
    assert_relative_eq!(result.max_deflection, expected, max_relative = 0.01);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let payload = build_payload(
        &DeckProperties::default(),
        r#"{"enabled": true, "pretension": 1.5}"#,
    );
    let first = approximate(&payload);
    let second = approximate(&payload);
    assert_eq!(first, second);
    let first_bits: Vec<u64> = first.deflection.iter().map(|value| value.to_bits()).collect();
    let second_bits: Vec<u64> = second.deflection.iter().map(|value| value.to_bits()).collect();
    assert_eq!(first_bits, second_bits);
}

#[test]
fn degenerate_section_returns_zero_field() {
    let properties = DeckProperties {
        plate_modulus: 0.0,
        pressure_kpa: 0.0,
        ..DeckProperties::default()
    };
    let payload = build_payload(&properties, r#"{"enabled": false}"#);
    for scheme in [Scheme::Legacy, Scheme::Consistent] {
        for solver in [SolverKind::Dense, SolverKind::Banded] {
            let options = ApproximationOptions {
                scheme,
                solver,
                ..ApproximationOptions::default()
            };
            let result = approximate_with(&payload, &options);
            assert_eq!(result.diagnostics.flexural_rigidity, 0.0);
            assert_eq!(result.diagnostics.tension, 0.0);
            assert_eq!(result.diagnostics.distributed_stiffness, 0.0);
            assert!(result.deflection.iter().all(|value| *value == 0.0));
            assert!(result.strap_forces.iter().all(|value| value.is_finite()));
            assert_eq!(result.max_deflection, 0.0);
            assert!(matches!(
                result.status(),
                Status::Warning([Warning::SingularSystem { row: 0 }])
            ));
        }
    }
}

#[test]
fn pretension_shifts_every_strap_force() {
    let properties = DeckProperties::default();
    let low = approximate(&build_payload(
        &properties,
        r#"{"enabled": true, "pretension": 2.0}"#,
    ));
    let high = approximate(&build_payload(
        &properties,
        r#"{"enabled": true, "pretension": 5.5}"#,
    ));

    assert_eq!(low.deflection, high.deflection);
    assert_eq!(low.strap_forces.len(), high.strap_forces.len());
    for (before, after) in low.strap_forces.iter().zip(&high.strap_forces) {
        assert_relative_eq!(after - before, 3_500.0, epsilon = 1e-6);
    }
}

#[test]
fn output_record_uses_the_documented_field_names() {
    let payload = build_payload(&DeckProperties::default(), r#"{"enabled": true}"#);
    let json = serde_json::to_value(approximate(&payload)).expect("record serializes");

    assert!(json["maxDeflection_mm"].is_f64());
    assert_eq!(json["deflection_mm"].as_array().map(Vec::len), Some(201));
    assert_eq!(json["strapForces_N"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["diagnostics"]["solvedNodes"], 201);
    assert!(json["diagnostics"]["EI"].is_f64());
    assert!(json["diagnostics"]["T"].is_f64());
    assert!(json["diagnostics"]["k_dist"].is_f64());
    assert_eq!(json["diagnostics"]["scheme"], "legacy");
    assert_eq!(json["diagnostics"]["solver"], "dense");
    assert_eq!(json["diagnostics"]["warnings"], serde_json::json!([]));
}

fn all_configurations() -> Vec<ApproximationOptions> {
    let mut configurations = Vec::new();
    for scheme in [Scheme::Legacy, Scheme::Consistent] {
        for solver in [SolverKind::Dense, SolverKind::Banded] {
            configurations.push(ApproximationOptions {
                nodes: Some(51),
                scheme,
                solver,
                ..ApproximationOptions::default()
            });
        }
    }
    configurations
}

fn assert_usable(result: &ResultRecord, nodes: usize) {
    assert_eq!(result.deflection.len(), nodes);
    assert_eq!(result.deflection[0], 0.0);
    assert_eq!(result.deflection[nodes - 1], 0.0);
    assert!(result.deflection.iter().all(|value| value.is_finite()));
    assert!(result.max_deflection.is_finite());
    assert!(!result.strap_forces.is_empty());
    assert!(result.strap_forces.len() <= MAX_STRAP_LINES);
    assert!(result.strap_forces.iter().all(|value| value.is_finite()));
}

#[test]
fn far_away_concentrated_loads_are_dropped() {
    let mut payload = build_payload(&DeckProperties::default(), r#"{"enabled": true}"#);
    payload.loads.point_loads = vec![
        PointLoad {
            position: -1e21,
            magnitude: 1.0,
        },
        PointLoad {
            position: 1e21,
            magnitude: 1.0,
        },
    ];
    payload.loads.vehicle = Some(Vehicle {
        axles: vec![Axle {
            offset: -1e300,
            load: 40.0,
        }],
    });
    for options in all_configurations() {
        let result = approximate_with(&payload, &options);
        assert_usable(&result, 51);
        let dropped = result
            .diagnostics
            .warnings
            .iter()
            .filter(|warning| matches!(warning, Warning::OutOfRangeLoadPosition { .. }))
            .count();
        assert_eq!(dropped, 3);
    }
}

#[test]
fn tiny_strap_spacing_is_bounded() {
    let payload = build_payload(
        &DeckProperties::default(),
        r#"{"enabled": true, "spacing": 1e-15}"#,
    );
    for options in all_configurations() {
        let result = approximate_with(&payload, &options);
        assert_usable(&result, 51);
        assert_eq!(result.strap_forces.len(), MAX_STRAP_LINES);
        assert!(result
            .diagnostics
            .warnings
            .iter()
            .any(|warning| matches!(warning, Warning::StrapLinesClamped { .. })));
    }
}

#[test]
fn extreme_geometry_still_yields_a_record() {
    let huge_span = DeckProperties {
        span: 1e15,
        ..DeckProperties::default()
    };
    let negative_width = DeckProperties {
        width: -1_500.0,
        ..DeckProperties::default()
    };
    let negative_span = DeckProperties {
        span: -8_000.0,
        ..DeckProperties::default()
    };
    for properties in [huge_span, negative_width, negative_span] {
        for straps in [r#"{"enabled": false}"#, r#"{"enabled": true}"#] {
            let payload = build_payload(&properties, straps);
            for options in all_configurations() {
                assert_usable(&approximate_with(&payload, &options), 51);
            }
        }
    }

    let payload = build_payload(&negative_span, r#"{"enabled": true}"#);
    let result = approximate(&payload);
    assert!(matches!(
        result.diagnostics.warnings.as_slice(),
        [Warning::InvalidSpan { .. }]
    ));
}

#[test]
fn oversized_node_request_is_clamped() {
    let mut payload = build_payload(&DeckProperties::default(), r#"{"enabled": true}"#);
    payload.n_nodes = Some(usize::MAX);
    let options = ApproximationOptions {
        solver: SolverKind::Banded,
        ..ApproximationOptions::default()
    };
    let result = approximate_with(&payload, &options);
    assert_usable(&result, options.max_nodes);
    assert!(matches!(
        result.diagnostics.warnings.as_slice(),
        [Warning::NodeCountClamped { used: 2_001, .. }]
    ));
}
