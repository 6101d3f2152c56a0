//! Run parameters for the launcher.

use std::path::Path;

use serde::{Deserialize, Serialize};

use flood_pipeline::{ClassificationScheme, PipelineCase};

/// Parameters of one pipeline run, loaded from a JSON file.
///
/// Every field except `floodmap` has a default, so a minimal parameter
/// file is just `{"floodmap": "event_FM.ngr"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    /// Input classification grid product name. Required.
    pub floodmap: String,

    /// Interpret the input as three-state {0,2,3} rather than two-state
    /// {0,1}.
    pub three_state: bool,

    /// Remove permanent water from the composited output.
    pub remove_permanent_water: bool,

    /// Sentinel value assigned to permanent-water cells in the output.
    pub permanent_water_nodata: f64,

    /// Delete the converted flood map after the run.
    pub delete_converted_file: bool,

    /// Generate a DEM when none is supplied.
    pub generate_dem: bool,

    /// Resolution identifier passed to the DEM extractor.
    pub dem_resolution: String,

    /// Pre-existing DEM product name; skips DEM generation when set.
    pub dem: Option<String>,

    /// Output name for a generated DEM; defaults to `<base>_DEM.ngr`.
    pub dem_output: Option<String>,

    /// Delete a generated DEM after the run.
    pub delete_dem_file: bool,

    /// Output name for the water-depth composite; defaults to
    /// `<base>_WDM.ngr`.
    pub output_water_depth: Option<String>,

    /// Also produce the water-surface-elevation composite.
    pub produce_wsem: bool,

    /// Output name for the water-surface composite; defaults to
    /// `<base>_WSEM.ngr`.
    pub output_water_surface: Option<String>,

    /// Skip hydraulic-model execution and post-process pre-existing
    /// outputs. For testing.
    pub simulate_model: bool,

    /// Collection (visualization style) the converted flood map is
    /// registered under.
    pub converted_style: String,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            floodmap: String::new(),
            three_state: true,
            remove_permanent_water: true,
            permanent_water_nodata: -9999.0,
            delete_converted_file: true,
            generate_dem: true,
            dem_resolution: "DEM_30M".to_string(),
            dem: None,
            dem_output: None,
            delete_dem_file: true,
            output_water_depth: None,
            produce_wsem: false,
            output_water_surface: None,
            simulate_model: false,
            converted_style: "wd_0_0.5m_YGB".to_string(),
        }
    }
}

impl RunParameters {
    /// Load parameters from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let params: Self = serde_json::from_str(&content)?;
        Ok(params)
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.floodmap.trim().is_empty() {
            return Err("floodmap parameter is required".to_string());
        }
        Ok(())
    }

    /// Classification scheme selected by the `three_state` flag.
    pub fn scheme(&self) -> ClassificationScheme {
        if self.three_state {
            ClassificationScheme::ThreeState
        } else {
            ClassificationScheme::TwoState
        }
    }

    /// The pipeline case selected by this run's flags.
    pub fn case(&self) -> PipelineCase {
        PipelineCase::from_flags(self.scheme(), self.remove_permanent_water)
    }
}

/// Base name of an event product: the part of the file stem before the
/// first underscore (`event42_FM.ngr` → `event42`).
pub fn base_name(product: &str) -> String {
    let stem = Path::new(product)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| product.to_string());
    match stem.split_once('_') {
        Some((base, _)) => base.to_string(),
        None => stem,
    }
}
