//! End-to-end pipeline tests: write a recording, read it back, evaluate
//! distances, analyze clearance, and render the chart.

use nalgebra::{Isometry3, Vector3};
use parry3d_f64::shape::SharedShape;
use tempfile::TempDir;

use antara::{
    CollisionGeometry, CollisionModel, ClearanceChart, ClearanceReport, ChartStyle,
    DistanceEvaluator, GeometrySet, Joint, JointConfiguration, KinematicChain, LogReader,
    LogWriter, PairRegistry, Timestamped, WORLD_FRAME,
};

/// A single revolute boom swinging a ball (r=0.1) on a 1 m arm past a
/// fixed ball (r=0.1) at (1.25, 0, 0). At boom angle 0 the separation is
/// 0.05 m; swinging away opens the gap quickly.
fn boom_model() -> CollisionModel {
    let chain = KinematicChain::new(vec![Joint::revolute(
        "boom",
        Isometry3::identity(),
        Vector3::z_axis(),
    )]);
    let boom = chain.frame_id("boom").unwrap();

    let mut geometries = GeometrySet::new();
    geometries
        .attach(CollisionGeometry::new(
            "tip",
            boom,
            Isometry3::translation(1.0, 0.0, 0.0),
            SharedShape::ball(0.1),
        ))
        .unwrap();
    geometries
        .attach(CollisionGeometry::new(
            "post",
            WORLD_FRAME,
            Isometry3::translation(1.25, 0.0, 0.0),
            SharedShape::ball(0.1),
        ))
        .unwrap();

    let mut pairs = PairRegistry::new();
    pairs
        .register_named(&geometries, "tip", "post", "Boom tip")
        .unwrap();
    CollisionModel::new(chain, geometries, pairs).unwrap()
}

/// Record a sweep of the boom from -1 rad to +1 rad at 50 Hz, with a
/// synthetic latency sample every 10th frame.
fn record_sweep(path: &std::path::Path) {
    let mut writer = LogWriter::create(path).unwrap();
    let start_us = 1_000_000u64;
    let n = 101;
    for i in 0..n {
        let t = start_us + i as u64 * 20_000;
        let angle = -1.0 + 2.0 * i as f64 / (n - 1) as f64;
        writer
            .record_joint_state(&Timestamped::new(
                JointConfiguration::new(vec![angle]),
                t,
            ))
            .unwrap();
        if i % 10 == 0 {
            writer
                .record_latency(&Timestamped::new(0.4 + 0.02 * (i / 10) as f64, t))
                .unwrap();
        }
    }
    writer.finish().unwrap();
}

#[test]
fn test_full_pipeline_detects_threshold_dip() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("sweep.tlog");
    record_sweep(&log_path);

    // Read back.
    let mut reader = LogReader::open(&log_path).unwrap();
    let streams = reader.load_streams().unwrap();
    assert_eq!(streams.trajectory.len(), 101);
    assert_eq!(streams.latency.len(), 11);

    // Evaluate.
    let model = boom_model();
    let mut evaluator = DistanceEvaluator::new(&model);
    let table = evaluator.evaluate_trajectory(&streams.trajectory).unwrap();
    assert_eq!(table.len(), 101);
    assert_eq!(table.pair_names(), &["Boom tip".to_string()]);

    // The closest approach is at boom angle 0 (the middle frame).
    let report = ClearanceReport::compute(&table, 0.1);
    let pair = &report.pairs[0];
    assert!(pair.min_distance > 0.0);
    assert!(pair.min_distance < 0.1);
    assert!((pair.time_of_min_s - 1.0).abs() < 0.05);
    assert!(!report.all_clear());
    assert_eq!(pair.intervals.len(), 1);

    // The first and last frames are well clear.
    let column = table.column(0);
    assert!(column[0] > 0.1);
    assert!(column[100] > 0.1);

    // Render the chart with the latency panel.
    let svg_path = dir.path().join("sweep.svg");
    let chart = ClearanceChart::new(ChartStyle::default());
    chart
        .save(&svg_path, &table, Some(streams.latency.as_slice()), 0.1)
        .unwrap();
    let svg_text = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg_text.contains("<polyline"));
    assert!(svg_text.contains("Computation Time (ms)"));
}

#[test]
fn test_crop_window_narrows_analysis() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("sweep.tlog");
    record_sweep(&log_path);

    let mut reader = LogReader::open(&log_path).unwrap();
    let streams = reader.load_streams().unwrap();

    let model = boom_model();
    let mut evaluator = DistanceEvaluator::new(&model);
    let table = evaluator.evaluate_trajectory(&streams.trajectory).unwrap();

    // Keep only the first half-second: the boom never reaches the post.
    let cropped = table.crop(0.0, 0.5);
    assert!(cropped.len() < table.len());
    let report = ClearanceReport::compute(&cropped, 0.1);
    assert!(report.all_clear());
}

#[test]
fn test_panda_model_smoke() {
    let model = antara::panda_with_obstacle().unwrap();
    let mut evaluator = DistanceEvaluator::new(&model);

    let q = JointConfiguration::new(vec![0.0, -0.4, 0.0, -1.8, 0.0, 1.5, 0.8]);
    let distances = evaluator.evaluate_frame(&q).unwrap();

    assert_eq!(distances.len(), 4);
    assert!(distances.iter().all(|d| d.is_finite()));

    // Two independent evaluators over the same model agree exactly.
    let mut other = DistanceEvaluator::new(&model);
    assert_eq!(other.evaluate_frame(&q).unwrap(), distances);
}

#[test]
fn test_load_dir_sorted() {
    let dir = TempDir::new().unwrap();
    record_sweep(&dir.path().join("b_run.tlog"));
    record_sweep(&dir.path().join("a_run.tlog"));
    std::fs::write(dir.path().join("notes.txt"), "not a log").unwrap();

    let recordings = antara::load_dir(dir.path()).unwrap();
    assert_eq!(recordings.len(), 2);
    assert_eq!(recordings[0].0, "a_run");
    assert_eq!(recordings[1].0, "b_run");
}
