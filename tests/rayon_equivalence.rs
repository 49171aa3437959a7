#![cfg(feature = "rayon")]

use detfilter::{
    compute_ious, compute_ious_par, CenterBox, ClasswiseFilter, Detections, NmsFilter, Pipeline,
    PipelineConfig, PredictionFilter,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_detections(seed: u64, n: usize, num_classes: i32) -> Detections {
    let mut rng = StdRng::seed_from_u64(seed);
    let confs = (0..n).map(|_| rng.random_range(0.0..1.0)).collect();
    let classes = (0..n).map(|_| rng.random_range(0..num_classes)).collect();
    let boxes = (0..n)
        .map(|_| {
            CenterBox::new(
                rng.random_range(0.0..1.0),
                rng.random_range(0.0..1.0),
                rng.random_range(0.05..0.5),
                rng.random_range(0.05..0.5),
            )
        })
        .collect();
    Detections::new(confs, classes, boxes).unwrap()
}

#[test]
fn parallel_ious_match_sequential() {
    let dets = make_detections(41, 257, 1);
    let seq = compute_ious(dets.boxes(), &dets.boxes()[..100]);
    let par = compute_ious_par(dets.boxes(), &dets.boxes()[..100]);
    assert_eq!(seq, par);

    let empty = compute_ious_par(&[], dets.boxes());
    assert_eq!((empty.rows(), empty.cols()), (0, 257));
}

#[test]
fn parallel_nms_matches_sequential() {
    let dets = make_detections(42, 600, 12);
    let seq = NmsFilter::new(0.45).filter(&dets).unwrap();
    let par = NmsFilter::new(0.45)
        .with_parallel(true)
        .filter(&dets)
        .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn parallel_classwise_pipeline_matches_sequential() {
    let dets = make_detections(43, 400, 7);
    let seq = ClasswiseFilter::new(Pipeline::from_config(&PipelineConfig::default()).unwrap());
    let par = ClasswiseFilter::new(
        Pipeline::from_config(&PipelineConfig {
            parallel: true,
            ..PipelineConfig::default()
        })
        .unwrap(),
    )
    .with_parallel(true);
    assert_eq!(seq.filter(&dets).unwrap(), par.filter(&dets).unwrap());
}
