//! Distance evaluation benchmarks.
//!
//! Benchmarks the per-frame narrow-phase loop and a whole-trajectory
//! batch over the fixed arm-plus-obstacle model.
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use antara::{panda_with_obstacle, DistanceEvaluator, JointConfiguration, Timestamped, Trajectory};

/// A slow sweep of joint 1 around a nominal elbow-down posture.
fn sweep_trajectory(n_frames: usize) -> Trajectory {
    let frames = (0..n_frames)
        .map(|i| {
            let phase = i as f64 / n_frames as f64;
            let mut coords = vec![0.0, -0.4, 0.0, -1.8, 0.0, 1.5, 0.8];
            coords[0] = -0.5 + phase;
            Timestamped::new(JointConfiguration::new(coords), i as u64 * 10_000)
        })
        .collect();
    Trajectory::new(frames).expect("valid trajectory")
}

fn bench_evaluate_frame(c: &mut Criterion) {
    let model = panda_with_obstacle().expect("model");
    let mut evaluator = DistanceEvaluator::new(&model);
    let q = JointConfiguration::new(vec![0.0, -0.4, 0.0, -1.8, 0.0, 1.5, 0.8]);

    c.bench_function("evaluate_frame", |b| {
        b.iter(|| {
            let distances = evaluator.evaluate_frame(black_box(&q)).expect("frame");
            black_box(distances);
        })
    });
}

fn bench_evaluate_trajectory(c: &mut Criterion) {
    let model = panda_with_obstacle().expect("model");
    let mut evaluator = DistanceEvaluator::new(&model);
    let trajectory = sweep_trajectory(500);

    c.bench_function("evaluate_trajectory_500", |b| {
        b.iter(|| {
            let table = evaluator
                .evaluate_trajectory(black_box(&trajectory))
                .expect("trajectory");
            black_box(table);
        })
    });
}

criterion_group!(benches, bench_evaluate_frame, bench_evaluate_trajectory);
criterion_main!(benches);
