use clap::Parser;
use detfilter::{CenterBox, Detections, Pipeline, PipelineConfig, PredictionFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Detection post-processing (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Log per-stage survivor counts.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FilterConfigJson {
    conf_thresh: Option<f32>,
    iou_thresh: Option<f32>,
    max_dets: Option<usize>,
    class_agnostic: bool,
    parallel: bool,
}

impl Default for FilterConfigJson {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            conf_thresh: cfg.conf_thresh,
            iou_thresh: cfg.iou_thresh,
            max_dets: cfg.max_dets,
            class_agnostic: cfg.class_agnostic,
            parallel: cfg.parallel,
        }
    }
}

impl From<&FilterConfigJson> for PipelineConfig {
    fn from(value: &FilterConfigJson) -> Self {
        Self {
            conf_thresh: value.conf_thresh,
            iou_thresh: value.iou_thresh,
            max_dets: value.max_dets,
            class_agnostic: value.class_agnostic,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: Option<String>,
    /// `[height, width]` in pixels; corners are reported in pixels when set.
    image_size: Option<[f32; 2]>,
    filter: FilterConfigJson,
}

/// Detector output: three co-indexed arrays, boxes in center-extent form.
#[derive(Debug, Deserialize)]
struct InputDetections {
    confidences: Vec<f32>,
    classes: Vec<i32>,
    boxes: Vec<[f32; 4]>,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    confidence: f32,
    class_id: i32,
    ijhw: [f32; 4],
    corners: [f32; 4],
}

#[derive(Debug, Serialize)]
struct Output {
    input_count: usize,
    stages: Vec<&'static str>,
    detections: Vec<DetectionRecord>,
}

fn records(dets: &Detections, image_size: Option<[f32; 2]>) -> Vec<DetectionRecord> {
    dets.confidences()
        .iter()
        .zip(dets.classes())
        .zip(dets.boxes())
        .map(|((&confidence, &class_id), bbox)| {
            let corner = bbox.to_corner();
            let corner = match image_size {
                Some([height, width]) => corner.scale(height, width),
                None => corner,
            };
            DetectionRecord {
                confidence,
                class_id,
                ijhw: bbox.to_array(),
                corners: corner.to_array(),
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detfilter=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.input_path.is_empty() {
        return Err("input_path must be set in the config".into());
    }
    if let Some([height, width]) = config.image_size {
        if !(height > 0.0 && width > 0.0) {
            return Err("image_size must be positive".into());
        }
    }

    let input_text = fs::read_to_string(&config.input_path)?;
    let input: InputDetections = serde_json::from_str(&input_text)?;
    let boxes: Vec<CenterBox> = input.boxes.into_iter().map(CenterBox::from).collect();
    let dets = Detections::new(input.confidences, input.classes, boxes)?;

    let pipeline = Pipeline::from_config(&PipelineConfig::from(&config.filter))?;
    let filtered = pipeline.filter(&dets)?;

    let output = Output {
        input_count: dets.len(),
        stages: pipeline.stage_names(),
        detections: records(&filtered, config.image_size),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
