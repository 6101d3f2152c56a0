//! End-to-end run orchestration.
//!
//! Drives one pipeline invocation: read the input flood map, classify it,
//! provision a permanent-water mask when the case needs one, delegate DEM
//! extraction and the hydraulic model to remote processors, post-process
//! every model output per the pipeline case, and clean up intermediates.
//! Everything runs synchronously on the calling thread; remote jobs are
//! awaited with blocking `wait` calls.

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use flood_pipeline::classifier::FLOODED;
use flood_pipeline::{
    classify_flood_map, composite, generate_external_mask, load_aligned_mask, open_flood_map,
    save_composite, ClassificationOutcome, ClassificationScheme, FloodExtent, FloodMapInfo,
    PipelineCase, PipelineError, Result,
};
use platform::{FileCatalog, JobRunner, PlatformError};
use raster_codec::{CodecError, Dataset};
use raster_core::Mask;

use crate::config::{base_name, RunParameters};
use crate::payload::RunPayload;

/// Processor name of the DEM extraction collaborator.
pub const DEM_PROCESSOR: &str = "dem_extractor";
/// Processor name of the hydraulic model collaborator.
pub const MODEL_PROCESSOR: &str = "hydrothresholds";

/// Payload key under which the model reports its output products.
const MODEL_OUTPUT_KEY: &str = "Output";
/// Model output label for the water-depth product.
const WATER_DEPTH_LABEL: &str = "WaterDepth";
/// Model output label for the water-surface-elevation product.
const WATER_SURFACE_LABEL: &str = "WaterSurfaceElevation";

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Full pipeline executed; the payload describes what was produced.
    Completed(RunPayload),
    /// The input map contains no water; nothing was launched.
    NoWater,
}

/// Execute one complete pipeline run.
///
/// `NoWater` is a successful early exit. Every other shortfall (failed
/// remote job, unreadable grid, classification failure) aborts the run
/// with an error; there are no partial retries.
pub fn execute_run(
    params: &RunParameters,
    runner: &dyn JobRunner,
    catalog: &dyn FileCatalog,
) -> Result<RunOutcome> {
    params.validate().map_err(PipelineError::Validation)?;

    let case = params.case();
    info!(floodmap = %params.floodmap, case = %case, "Starting flood composer run");
    let mut payload = RunPayload::new(params.clone());

    // Single read of the input map; every later stage works off this.
    let info = open_flood_map(catalog.local_path(&params.floodmap))?;
    let base = base_name(&params.floodmap);

    // The external mask is provisioned before the model runs so a failing
    // land-cover extraction aborts early.
    let mut external_mask: Option<String> = None;
    if case.needs_external_mask() {
        info!("Two-state map with permanent water removal; generating external mask");
        external_mask = Some(generate_external_mask(runner, catalog, &info.bbox, &base)?);
    }

    let outcome = classify_flood_map(
        &params.floodmap,
        &info,
        params.scheme(),
        catalog,
        Some(&params.converted_style),
    );
    let (flood_map, permanent_water) = match outcome {
        ClassificationOutcome::NoWater => {
            info!("No water detected in the input map; hydraulic model not launched");
            return Ok(RunOutcome::NoWater);
        }
        ClassificationOutcome::Failed => {
            return Err(PipelineError::Classification(
                "flood map pre-processing failed".to_string(),
            ));
        }
        ClassificationOutcome::Ready {
            flood_map,
            permanent_water,
        } => (flood_map, permanent_water),
    };

    let supplied_dem = params.dem.clone().filter(|d| !d.trim().is_empty());
    let (dem_name, generated_dem) = match supplied_dem {
        Some(name) => {
            info!(dem = %name, "Using supplied DEM; extraction skipped");
            (name, None)
        }
        None if params.generate_dem => {
            let name = extract_dem(params, &info, &base, runner, &mut payload)?;
            (name.clone(), Some(name))
        }
        None => {
            return Err(PipelineError::Validation(
                "no DEM supplied and DEM generation is disabled".to_string(),
            ));
        }
    };

    let water_depth = params
        .output_water_depth
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("{base}_WDM.ngr"));
    let water_surface = if params.produce_wsem {
        Some(
            params
                .output_water_surface
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| format!("{base}_WSEM.ngr")),
        )
    } else {
        None
    };

    let final_outputs = if params.simulate_model {
        info!("Simulation enabled; skipping hydraulic model execution");
        let mut outputs = vec![(WATER_DEPTH_LABEL.to_string(), water_depth)];
        if let Some(ws) = water_surface {
            outputs.push((WATER_SURFACE_LABEL.to_string(), ws));
        }
        outputs
    } else {
        run_model(
            &flood_map,
            &dem_name,
            &water_depth,
            water_surface.as_deref(),
            runner,
            &mut payload,
        )?
    };

    info!("Starting final output post-processing");
    for (label, product) in &final_outputs {
        post_process_output(
            case,
            catalog,
            &info,
            permanent_water.as_ref(),
            external_mask.as_deref(),
            product,
            params.permanent_water_nodata,
        )?;
        payload.final_output.insert(label.clone(), product.clone());
    }

    if params.delete_converted_file && case.scheme() == ClassificationScheme::ThreeState {
        catalog.delete(&flood_map)?;
        info!(product = %flood_map, "Deleted converted flood map");
    }
    if params.delete_dem_file {
        if let Some(name) = generated_dem {
            catalog.delete(&name)?;
            info!(product = %name, "Deleted generated DEM");
        }
    }

    payload.completed_at = Utc::now();
    info!("Flood composer run completed successfully");
    Ok(RunOutcome::Completed(payload))
}

/// Delegate DEM extraction to the remote processor and return the product
/// name it reports.
fn extract_dem(
    params: &RunParameters,
    info: &FloodMapInfo,
    base: &str,
    runner: &dyn JobRunner,
    payload: &mut RunPayload,
) -> Result<String> {
    let output = params
        .dem_output
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("{base}_DEM.ngr"));

    let job_params = json!({
        "BBOX": info.bbox.to_corners(),
        "DEM_RES": params.dem_resolution,
        "OUTPUT": output,
        "DELETE": true,
    });

    info!(processor = DEM_PROCESSOR, output = %output, "Starting DEM extraction");
    let job = runner.execute(DEM_PROCESSOR, &job_params)?;
    let status = runner.wait(&job)?;
    if !status.is_done() {
        return Err(PipelineError::RemoteJob {
            processor: DEM_PROCESSOR.to_string(),
            status,
        });
    }

    let job_payload = runner.output_payload(&job)?;
    let name = job_payload
        .get("output")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PlatformError::Payload {
            job_id: job.to_string(),
            message: "DEM extractor payload carries no 'output' entry".to_string(),
        })?
        .to_string();

    payload.runs.dem_proc_id = Some(job.to_string());
    info!(dem = %name, "DEM extraction completed");
    Ok(name)
}

/// Launch the hydraulic model and return its labeled output products.
fn run_model(
    flood_map: &str,
    dem: &str,
    water_depth: &str,
    water_surface: Option<&str>,
    runner: &dyn JobRunner,
    payload: &mut RunPayload,
) -> Result<Vec<(String, String)>> {
    let mut model_params = json!({
        "FLOODMAP": flood_map,
        "DEM": dem,
        "OUTPUT_WATER_DEPTH": water_depth,
    });
    if let Some(ws) = water_surface {
        model_params["OUTPUT_WATER_SURFACE"] = json!(ws);
    }

    info!(processor = MODEL_PROCESSOR, "Launching hydraulic model");
    let job = runner.execute(MODEL_PROCESSOR, &model_params)?;
    let status = runner.wait(&job)?;
    if !status.is_done() {
        return Err(PipelineError::RemoteJob {
            processor: MODEL_PROCESSOR.to_string(),
            status,
        });
    }
    payload.runs.model_proc_id = Some(job.to_string());

    let job_payload = runner.output_payload(&job)?;
    let outputs = job_payload
        .get(MODEL_OUTPUT_KEY)
        .and_then(|v| v.as_object())
        .ok_or_else(|| PlatformError::Payload {
            job_id: job.to_string(),
            message: format!("model payload carries no '{MODEL_OUTPUT_KEY}' map"),
        })?;

    Ok(outputs
        .iter()
        .filter_map(|(label, v)| v.as_str().map(|s| (label.clone(), s.to_string())))
        .collect())
}

/// Composite one model output in place, per the pipeline case.
///
/// Three-state removal uses masks from the original input grid; two-state
/// removal aligns the external mask product onto this output's grid. The
/// keep cases composite with the all-valid flood fallback and no mask.
fn post_process_output(
    case: PipelineCase,
    catalog: &dyn FileCatalog,
    info: &FloodMapInfo,
    permanent_water: Option<&Mask>,
    external_mask: Option<&str>,
    product: &str,
    sentinel: f64,
) -> Result<()> {
    let path = catalog.local_path(product);
    let raw = Dataset::open(&path)?.grid;

    let composited = match case {
        PipelineCase::ThreeStateRemoval => {
            let flooded = info.grid.mask_where(|v| v == FLOODED);
            composite(&raw, permanent_water, FloodExtent::Mask(&flooded), sentinel)?
        }
        PipelineCase::TwoStateRemoval => match external_mask {
            Some(name) => match load_aligned_mask(catalog, name, &raw) {
                Ok(mask) => composite(&raw, Some(&mask), FloodExtent::AllValid, sentinel)?,
                Err(PipelineError::Codec(CodecError::NotFound(_))) => {
                    warn!(mask = %name, "Permanent water mask product missing; skipping removal");
                    composite(&raw, None, FloodExtent::AllValid, sentinel)?
                }
                Err(e) => return Err(e),
            },
            None => {
                warn!("External mask not generated; skipping removal");
                composite(&raw, None, FloodExtent::AllValid, sentinel)?
            }
        },
        PipelineCase::ThreeStateKeep | PipelineCase::TwoStateKeep => {
            composite(&raw, None, FloodExtent::AllValid, sentinel)?
        }
    };

    save_composite(&path, &composited, sentinel)?;
    info!(product = %product, "Saved post-processed output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::JobStatus;
    use serde_json::Value;
    use test_utils::{model_output_grid, ScriptedJobRunner, Workspace};

    fn params(floodmap: &str) -> RunParameters {
        RunParameters {
            floodmap: floodmap.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_floodmap_parameter_is_validation_error() {
        let ws = Workspace::new();
        let runner = ScriptedJobRunner::new();
        let err = execute_run(&RunParameters::default(), &runner, ws.catalog()).unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[test]
    fn test_missing_input_file_is_not_found() {
        let ws = Workspace::new();
        let runner = ScriptedJobRunner::new();
        let err = execute_run(&params("ghost_FM.ngr"), &runner, ws.catalog()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Codec(CodecError::NotFound(_))
        ));
    }

    #[test]
    fn test_no_dem_and_generation_disabled_fails() {
        let ws = Workspace::new();
        let grid = test_utils::classification_grid(vec![0.0, 2.0, 3.0, 0.0], 2, 2);
        ws.write_grid("event_FM.ngr", &grid);

        let mut p = params("event_FM.ngr");
        p.generate_dem = false;
        let runner = ScriptedJobRunner::new();
        let err = execute_run(&p, &runner, ws.catalog()).unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[test]
    fn test_dem_payload_without_output_entry_fails() {
        let ws = Workspace::new();
        let grid = test_utils::classification_grid(vec![0.0, 2.0, 3.0, 0.0], 2, 2);
        ws.write_grid("event_FM.ngr", &grid);

        let runner = ScriptedJobRunner::new();
        runner.script(DEM_PROCESSOR, JobStatus::Done, serde_json::json!({}));

        let err = execute_run(&params("event_FM.ngr"), &runner, ws.catalog()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Platform(PlatformError::Payload { .. })
        ));
    }

    #[test]
    fn test_simulate_mode_skips_model_job() {
        let ws = Workspace::new();
        let grid = test_utils::classification_grid(vec![0.0, 2.0, 3.0, 0.0], 2, 2);
        ws.write_grid("event_FM.ngr", &grid);
        // Pre-existing model output, as a prior real run would leave it.
        ws.write_grid("event_WDM.ngr", &model_output_grid(vec![0.5; 4], 2, 2, None));

        let mut p = params("event_FM.ngr");
        p.simulate_model = true;
        p.dem = Some("prior_DEM.ngr".to_string());

        let runner = ScriptedJobRunner::new();
        let outcome = execute_run(&p, &runner, ws.catalog()).unwrap();

        assert!(runner.never_executed(MODEL_PROCESSOR));
        assert!(runner.never_executed(DEM_PROCESSOR));
        match outcome {
            RunOutcome::Completed(payload) => {
                assert_eq!(payload.final_output["WaterDepth"], "event_WDM.ngr");
                assert!(payload.runs.model_proc_id.is_none());
            }
            RunOutcome::NoWater => panic!("expected completion"),
        }
    }

    #[test]
    fn test_model_params_carry_converted_map_and_dem() {
        let ws = Workspace::new();
        let grid = test_utils::classification_grid(vec![0.0, 2.0, 3.0, 0.0], 2, 2);
        ws.write_grid("event_FM.ngr", &grid);
        ws.write_grid("event_WDM.ngr", &model_output_grid(vec![0.5; 4], 2, 2, None));

        let runner = ScriptedJobRunner::new();
        runner.script(
            DEM_PROCESSOR,
            JobStatus::Done,
            serde_json::json!({"output": "event_DEM.ngr"}),
        );
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Value::Null));
        let seen_clone = std::sync::Arc::clone(&seen);
        runner.script_full(
            MODEL_PROCESSOR,
            JobStatus::Done,
            serde_json::json!({"Output": {"WaterDepth": "event_WDM.ngr"}}),
            move |p| {
                *seen_clone.lock().unwrap() = p.clone();
            },
        );

        execute_run(&params("event_FM.ngr"), &runner, ws.catalog()).unwrap();

        let model_params = seen.lock().unwrap().clone();
        assert_eq!(model_params["FLOODMAP"], "event_FM_converted.ngr");
        assert_eq!(model_params["DEM"], "event_DEM.ngr");
        assert_eq!(model_params["OUTPUT_WATER_DEPTH"], "event_WDM.ngr");
        assert!(model_params.get("OUTPUT_WATER_SURFACE").is_none());
    }
}
