//! End-to-end runs of the standard pipeline on a JSON detection fixture.

use detfilter::{CenterBox, Detections, Pipeline, PipelineConfig, PredictionFilter};
use serde::Deserialize;

/// Raw detector output as produced by an inference step.
#[derive(Debug, Deserialize)]
struct RawDetections {
    confidences: Vec<f32>,
    classes: Vec<i32>,
    boxes: Vec<[f32; 4]>,
}

const FIXTURE: &str = r#"{
    "confidences": [0.92, 0.88, 0.15, 0.75, 0.71, 0.40, 0.66],
    "classes":     [0,    0,    0,    3,    3,    0,    0],
    "boxes": [
        [0.30, 0.30, 0.20, 0.20],
        [0.31, 0.30, 0.20, 0.20],
        [0.30, 0.31, 0.20, 0.20],
        [0.70, 0.70, 0.25, 0.25],
        [0.71, 0.69, 0.25, 0.25],
        [0.70, 0.70, 0.20, 0.20],
        [0.80, 0.20, 0.10, 0.10]
    ]
}"#;

fn load_fixture() -> Detections {
    let raw: RawDetections = serde_json::from_str(FIXTURE).unwrap();
    let boxes = raw.boxes.into_iter().map(CenterBox::from).collect();
    Detections::new(raw.confidences, raw.classes, boxes).unwrap()
}

#[test]
fn default_pipeline_filters_fixture() {
    let pipeline = Pipeline::from_config(&PipelineConfig::default()).unwrap();
    let out = pipeline.filter(&load_fixture()).unwrap();

    // 0.15 and 0.40 fall below the threshold; 0.88 and 0.71 are duplicates.
    assert_eq!(out.confidences(), &[0.92, 0.66, 0.75]);
    assert_eq!(out.classes(), &[0, 0, 3]);
    assert_eq!(out.boxes()[1], CenterBox::new(0.80, 0.20, 0.10, 0.10));
}

#[test]
fn class_agnostic_pipeline_with_max_dets() {
    let cfg = PipelineConfig {
        conf_thresh: Some(0.1),
        iou_thresh: Some(0.5),
        max_dets: Some(2),
        class_agnostic: true,
        parallel: false,
    };
    let pipeline = Pipeline::from_config(&cfg).unwrap();
    assert_eq!(pipeline.stage_names(), vec!["confidence", "nms", "max_det"]);

    let out = pipeline.filter(&load_fixture()).unwrap();
    assert_eq!(out.confidences(), &[0.92, 0.75]);
    assert_eq!(out.classes(), &[0, 3]);
}

#[test]
fn disabled_stages_are_skipped() {
    let cfg = PipelineConfig {
        conf_thresh: None,
        iou_thresh: None,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::from_config(&cfg).unwrap();
    assert!(pipeline.is_empty());

    let input = load_fixture();
    assert_eq!(pipeline.filter(&input).unwrap(), input);
}
