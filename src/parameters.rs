//! Resolution of a raw [`DeckPayload`] into consistent physical quantities.
//!
//! All unit handling lives here. Downstream stages only ever see millimetres,
//! newtons and N/mm², so the matrix code never has to know what the form sent.
//! A value that is absent, zero or NaN counts as missing and falls back to the
//! documented default; a missing plate material falls back to the first entry
//! of the material library and then to structural steel.

use serde::Serialize;
use uom::si::f64::{Force, Length, Pressure};
use uom::si::force::{kilonewton, newton};
use uom::si::length::{meter, millimeter};
use uom::si::pressure::{kilopascal, megapascal};

use crate::errors::Warning;
use crate::payload::DeckPayload;

/// Plate modulus used when no material can be resolved, in N/mm².
pub const DEFAULT_PLATE_MODULUS: f64 = 210_000.0;
/// Strap modulus used when none is given, in N/mm².
pub const DEFAULT_STRAP_MODULUS: f64 = 200_000.0;
/// Top plate thickness used when none is given, in millimetres.
pub const DEFAULT_TOP_THICKNESS: f64 = 8.0;
/// Clear width used when none is given, in millimetres.
pub const DEFAULT_CLEAR_WIDTH: f64 = 1_500.0;
/// Airbeam height used when none is given, in millimetres.
pub const DEFAULT_AIRBEAM_HEIGHT: f64 = 300.0;
/// Strap spacing used when none is given, in millimetres.
pub const DEFAULT_STRAP_SPACING: f64 = 300.0;
/// Strap area used when none is given, in mm².
pub const DEFAULT_STRAP_AREA: f64 = 100.0;

/// Most strap lines a result reports forces for.
pub const MAX_STRAP_LINES: usize = 1_000;

/// Shortest lever length the strap model accepts, in millimetres.
const MIN_LEVER_LENGTH: f64 = 5.0;
/// Allowance added to the airbeam radius and top plate for the strap lever, in millimetres.
const LEVER_ALLOWANCE: f64 = 10.0;

/// Treat absent, zero and NaN values as missing.
fn given(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Convert a force in kN to newtons.
fn kilonewtons_to_newtons(value: f64) -> f64 {
    Force::new::<kilonewton>(value).get::<newton>()
}

/// Convert a line load in kN/m to N/mm.
fn line_load_to_newtons_per_mm(value: f64) -> f64 {
    kilonewtons_to_newtons(value) / Length::new::<meter>(1.0).get::<millimeter>()
}

/// Deck geometry and plate stiffness.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StructureParameters {
    /// Span between the supports in millimetres.
    pub span: f64,
    /// Clear deck width in millimetres.
    pub width: f64,
    /// Top plate thickness in millimetres.
    pub top_thickness: f64,
    /// Bottom plate thickness in millimetres.
    pub bottom_thickness: f64,
    /// Plate Young's modulus in N/mm².
    pub plate_modulus: f64,
}

impl StructureParameters {
    /// Effective flexural rigidity of both plates over the full width, in N·mm².
    ///
    /// Each plate contributes `t³/12` per millimetre of width; the plates are
    /// not treated as a composite section.
    #[must_use]
    pub fn flexural_rigidity(&self) -> f64 {
        let inertia_per_width =
            self.top_thickness.powi(3) / 12.0 + self.bottom_thickness.powi(3) / 12.0;
        self.plate_modulus * inertia_per_width * self.width
    }
}

/// Inflated airbeam providing membrane tension.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AirbeamParameters {
    /// Airbeam height (diameter) in millimetres.
    pub height: f64,
    /// Operating pressure in kPa.
    pub pressure_kpa: f64,
}

impl AirbeamParameters {
    /// Airbeam radius in millimetres.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.height / 2.0
    }

    /// Operating pressure in N/mm².
    #[must_use]
    pub fn pressure(&self) -> f64 {
        Pressure::new::<kilopascal>(self.pressure_kpa).get::<megapascal>()
    }

    /// Equivalent axial membrane tension `p·r`.
    #[must_use]
    pub fn tension(&self) -> f64 {
        self.pressure() * self.radius()
    }
}

/// Discrete strap supports across the deck width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StrapParameters {
    /// Whether the straps contribute support stiffness.
    pub enabled: bool,
    /// Spacing between strap lines in millimetres.
    pub spacing: f64,
    /// Cross-sectional area in mm².
    pub area: f64,
    /// Young's modulus in N/mm².
    pub modulus: f64,
    /// Pretension in kN.
    pub pretension_kn: f64,
}

impl StrapParameters {
    /// Axial stiffness `E·A` in newtons.
    #[must_use]
    pub fn axial_rigidity(&self) -> f64 {
        self.modulus * self.area
    }

    /// Pretension in newtons.
    #[must_use]
    pub fn pretension(&self) -> f64 {
        kilonewtons_to_newtons(self.pretension_kn)
    }

    /// Strap lines implied by `width` over the spacing, before any bound.
    #[must_use]
    pub fn fitted_lines(&self, width: f64) -> f64 {
        (width / self.spacing).floor()
    }

    /// Number of strap lines that fit across `width`, in `1..=MAX_STRAP_LINES`.
    #[must_use]
    pub fn line_count(&self, width: f64) -> usize {
        let lines = self.fitted_lines(width);
        if lines.is_nan() || lines < 1.0 {
            1
        } else if lines > MAX_STRAP_LINES as f64 {
            MAX_STRAP_LINES
        } else {
            lines as usize
        }
    }

    /// Vertical support stiffness per unit span length, in N/mm².
    ///
    /// Disabled straps give no support.
    #[must_use]
    pub fn distributed_stiffness(&self, lever_length: f64) -> f64 {
        if self.enabled {
            self.axial_rigidity() / lever_length / self.spacing
        } else {
            0.0
        }
    }
}

/// A concentrated load in consistent units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConcentratedLoad {
    /// Distance from the left support in millimetres.
    pub position: f64,
    /// Load in newtons.
    pub magnitude: f64,
}

/// All loads in consistent units.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LoadSet {
    /// Uniform line load in N/mm.
    pub uniform: f64,
    /// Point loads.
    pub point_loads: Vec<ConcentratedLoad>,
    /// Vehicle axle loads.
    pub axles: Vec<ConcentratedLoad>,
}

/// Stiffness quantities the operator assembler consumes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SectionProperties {
    /// Flexural rigidity `EI` in N·mm².
    pub flexural_rigidity: f64,
    /// Axial membrane tension `T`.
    pub tension: f64,
    /// Strap support stiffness per unit length `k_dist` in N/mm².
    pub distributed_stiffness: f64,
    /// Strap lever length `L_eff` in millimetres.
    pub lever_length: f64,
}

/// A payload resolved into one typed, unit-consistent value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedParameters {
    /// Geometry and plates.
    pub structure: StructureParameters,
    /// Airbeam.
    pub airbeam: AirbeamParameters,
    /// Straps.
    pub straps: StrapParameters,
    /// Loads.
    pub loads: LoadSet,
    /// Derived stiffness quantities.
    pub section: SectionProperties,
    /// Node count requested by the payload.
    pub requested_nodes: Option<usize>,
    /// Fallbacks taken while resolving.
    pub warnings: Vec<Warning>,
}

impl ResolvedParameters {
    /// Resolve a payload, substituting defaults for anything missing.
    ///
    /// # Examples
    /// ```
    /// use airdeck::{DeckPayload, ResolvedParameters};
    ///
    /// let payload = DeckPayload::from_json_str(
    ///     r#"{"geometry": {"span": 8000}, "airbeam": {"pressure": 100}}"#,
    /// )
    /// .expect("valid payload");
    /// let resolved = ResolvedParameters::from_payload(&payload);
    /// assert_eq!(resolved.structure.width, 1500.0);
    /// assert!((resolved.section.tension - 15.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn from_payload(payload: &DeckPayload) -> Self {
        let mut warnings = Vec::new();

        let width = given(payload.geometry.clear_width).unwrap_or(DEFAULT_CLEAR_WIDTH);
        let plate_modulus = resolve_plate_modulus(payload, &mut warnings);
        let structure = StructureParameters {
            span: payload.geometry.span.unwrap_or(0.0),
            width,
            top_thickness: given(payload.plates.top_thickness).unwrap_or(DEFAULT_TOP_THICKNESS),
            bottom_thickness: given(payload.plates.bottom_thickness).unwrap_or(0.0),
            plate_modulus,
        };

        let airbeam = AirbeamParameters {
            height: given(payload.airbeam.height).unwrap_or(DEFAULT_AIRBEAM_HEIGHT),
            pressure_kpa: given(payload.airbeam.pressure).unwrap_or(0.0),
        };

        let strap_section = payload.straps.clone().unwrap_or_default();
        let straps = StrapParameters {
            enabled: payload.straps.is_some() && strap_section.enabled,
            spacing: given(strap_section.spacing).unwrap_or(DEFAULT_STRAP_SPACING),
            area: given(strap_section.area).unwrap_or(DEFAULT_STRAP_AREA),
            modulus: given(strap_section.elastic_modulus).unwrap_or(DEFAULT_STRAP_MODULUS),
            pretension_kn: given(strap_section.pretension).unwrap_or(0.0),
        };

        let fitted_lines = straps.fitted_lines(width);
        if fitted_lines > MAX_STRAP_LINES as f64 {
            warnings.push(Warning::StrapLinesClamped {
                requested: fitted_lines,
                used: MAX_STRAP_LINES,
            });
        }

        let loads = resolve_loads(payload, width);

        let lever_length =
            MIN_LEVER_LENGTH.max(airbeam.radius() + structure.top_thickness + LEVER_ALLOWANCE);
        let section = SectionProperties {
            flexural_rigidity: structure.flexural_rigidity(),
            tension: airbeam.tension(),
            distributed_stiffness: straps.distributed_stiffness(lever_length),
            lever_length,
        };

        log::debug!(
            "resolved deck: span={} mm, EI={:.4e} N·mm², T={:.4} N/mm, k_dist={:.4} N/mm²",
            structure.span,
            section.flexural_rigidity,
            section.tension,
            section.distributed_stiffness
        );

        Self {
            structure,
            airbeam,
            straps,
            loads,
            section,
            requested_nodes: payload.n_nodes.filter(|n| *n != 0),
            warnings,
        }
    }
}

/// Look up the plate modulus, recording every fallback taken.
fn resolve_plate_modulus(payload: &DeckPayload, warnings: &mut Vec<Warning>) -> f64 {
    let requested = payload.plates.material_id.clone();
    let named = requested
        .as_deref()
        .and_then(|id| payload.materials.iter().find(|material| material.id == id));
    let material = named.or_else(|| payload.materials.first());

    match material.and_then(|material| material.elastic_modulus) {
        Some(modulus) if named.is_some() => modulus,
        Some(modulus) => {
            warnings.push(Warning::MissingMaterial {
                requested,
                substituted: modulus,
            });
            modulus
        }
        None => {
            warnings.push(Warning::MissingMaterial {
                requested,
                substituted: DEFAULT_PLATE_MODULUS,
            });
            DEFAULT_PLATE_MODULUS
        }
    }
}

/// Convert the loads section, spreading an area load over the clear width.
fn resolve_loads(payload: &DeckPayload, width: f64) -> LoadSet {
    let section = &payload.loads;
    let uniform_kn_per_m = given(section.uniform_line)
        .or_else(|| {
            given(section.uniform_area)
                .map(|area_load| area_load * Length::new::<millimeter>(width).get::<meter>())
        })
        .unwrap_or(0.0);

    let point_loads = section
        .point_loads
        .iter()
        .map(|load| ConcentratedLoad {
            position: load.position,
            magnitude: kilonewtons_to_newtons(load.magnitude),
        })
        .collect();
    let axles = section
        .vehicle
        .iter()
        .flat_map(|vehicle| vehicle.axles.iter())
        .map(|axle| ConcentratedLoad {
            position: axle.offset,
            magnitude: kilonewtons_to_newtons(axle.load),
        })
        .collect();

    LoadSet {
        uniform: line_load_to_newtons_per_mm(uniform_kn_per_m),
        point_loads,
        axles,
    }
}
