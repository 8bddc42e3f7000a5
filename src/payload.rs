//! Raw deck payload as supplied by the project form.
//!
//! Every section is optional and every field inside a section is optional; the
//! [`parameters`](crate::parameters) module decides what a missing value means.
//! Field aliases accept both the short names used by the approximation form and
//! the unit-suffixed names used by stored project files.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::PayloadError;

/// Structured input record for one deck approximation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeckPayload {
    /// Span and clear width.
    pub geometry: Geometry,
    /// Deck plate thicknesses and material reference.
    pub plates: Plates,
    /// Material library the plates refer to.
    pub materials: Vec<MaterialDef>,
    /// Airbeam dimensions and operating pressure.
    pub airbeam: Airbeam,
    /// Strap support configuration; `None` means no straps are fitted.
    pub straps: Option<Straps>,
    /// Applied loads.
    pub loads: Loads,
    /// Requested number of grid nodes.
    #[serde(rename = "nNodes", alias = "n_nodes")]
    pub n_nodes: Option<usize>,
}

/// Geometry section.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Geometry {
    /// Span length in millimetres.
    #[serde(alias = "span_mm")]
    pub span: Option<f64>,
    /// Clear deck width in millimetres.
    #[serde(alias = "bridge_clear_width_mm")]
    pub clear_width: Option<f64>,
}

/// Plates section.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Plates {
    /// Top plate thickness in millimetres.
    #[serde(alias = "top_thickness_mm")]
    pub top_thickness: Option<f64>,
    /// Bottom plate thickness in millimetres.
    #[serde(alias = "bottom_thickness_mm")]
    pub bottom_thickness: Option<f64>,
    /// Identifier of the plate material in [`DeckPayload::materials`].
    #[serde(alias = "material_name")]
    pub material_id: Option<String>,
}

/// Entry of the material library.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MaterialDef {
    /// Material identifier.
    #[serde(alias = "name")]
    pub id: String,
    /// Young's modulus in N/mm².
    #[serde(rename = "E", alias = "E_MPa")]
    pub elastic_modulus: Option<f64>,
}

/// Airbeam section.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Airbeam {
    /// Airbeam height (diameter) in millimetres.
    #[serde(alias = "height_mm")]
    pub height: Option<f64>,
    /// Operating pressure in kPa.
    #[serde(alias = "operating_pressure_kPa")]
    pub pressure: Option<f64>,
}

/// Straps section.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Straps {
    /// Whether the straps act as supports.
    pub enabled: bool,
    /// Spacing between strap lines across the width, in millimetres.
    pub spacing: Option<f64>,
    /// Strap cross-sectional area in mm².
    pub area: Option<f64>,
    /// Strap modulus in N/mm².
    #[serde(rename = "E")]
    pub elastic_modulus: Option<f64>,
    /// Strap pretension in kN.
    pub pretension: Option<f64>,
}

impl Default for Straps {
    fn default() -> Self {
        Self {
            enabled: true,
            spacing: None,
            area: None,
            elastic_modulus: None,
            pretension: None,
        }
    }
}

/// Loads section.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Loads {
    /// Uniform line load in kN/m.
    #[serde(rename = "uniform_load_kN_per_m")]
    pub uniform_line: Option<f64>,
    /// Uniform area load in kN/m², spread over the clear width.
    #[serde(
        rename = "uniform_load_kN_per_m2",
        alias = "live_load_uniform_kN_m2"
    )]
    pub uniform_area: Option<f64>,
    /// Concentrated loads along the span.
    #[serde(alias = "concentrated_loads")]
    pub point_loads: Vec<PointLoad>,
    /// Vehicle axle set.
    pub vehicle: Option<Vehicle>,
}

/// Concentrated load at a position along the span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PointLoad {
    /// Distance from the left support in millimetres.
    #[serde(alias = "x_mm")]
    pub position: f64,
    /// Load in kN.
    #[serde(rename = "magnitude_kN", alias = "value_kN")]
    pub magnitude: f64,
}

/// Vehicle described by its axles.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Vehicle {
    /// Axles in travel order.
    pub axles: Vec<Axle>,
}

/// Single vehicle axle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Axle {
    /// Distance from the left support in millimetres.
    pub offset: f64,
    /// Axle load in kN.
    #[serde(rename = "load_kN")]
    pub load: f64,
}

impl DeckPayload {
    /// Parse a payload from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Json`] when the text is not a deck record.
    ///
    /// # Examples
    /// ```
    /// use airdeck::DeckPayload;
    ///
    /// let payload = DeckPayload::from_json_str(r#"{"geometry": {"span": 8000}}"#)
    ///     .expect("valid payload");
    /// assert_eq!(payload.geometry.span, Some(8000.0));
    /// assert!(payload.straps.is_none());
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a payload from any reader producing JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when reading fails or the JSON is not a deck record.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PayloadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse a payload file.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Io`] when the file cannot be opened and
    /// [`PayloadError::Json`] when its contents are not a deck record.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PayloadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}
