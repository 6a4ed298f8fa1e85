//! Recompute collision clearances for a recorded run and chart them.
//!
//! Loads a trajectory recording, rebuilds the fixed arm-plus-obstacle
//! collision model, evaluates the minimum distance of every registered
//! pair per frame, logs clearance and latency statistics, and writes the
//! two-panel SVG chart.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use antara::{
    load_dir, panda_with_obstacle, ChartStyle, ClearanceChart, ClearanceReport,
    DistanceEvaluator, LatencyStats, LogReader, LogStreams, RunConfig, Timestamped,
};

#[derive(Parser)]
#[command(name = "clearance-report")]
#[command(about = "Recompute collision clearances for a recorded run and chart them")]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "antara.toml")]
    config: String,

    /// Recording to analyze (overrides the config's input section)
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Output SVG path (overrides the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Safety threshold in meters (overrides the config)
    #[arg(long)]
    threshold: Option<f64>,

    /// Window start in seconds (overrides the config)
    #[arg(long)]
    t_min: Option<f64>,

    /// Window end in seconds (overrides the config)
    #[arg(long)]
    t_max: Option<f64>,

    /// Also export the distance table as CSV next to the SVG
    #[arg(long)]
    export_csv: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::load(&args.config);
    if let Some(log) = args.log {
        config.input.log = Some(log);
    }
    if let Some(output) = args.output {
        config.chart.output = output;
    }
    if let Some(threshold) = args.threshold {
        config.clearance.threshold = threshold;
    }
    if args.t_min.is_some() {
        config.window.t_min = args.t_min;
    }
    if args.t_max.is_some() {
        config.window.t_max = args.t_max;
    }

    let (name, streams) = select_recording(&config)?;
    log::info!(
        "Analyzing {}: {} frames over {:.1}s, {} latency samples",
        name,
        streams.trajectory.len(),
        streams.trajectory.duration_secs(),
        streams.latency.len()
    );

    let model = panda_with_obstacle()?;
    let mut evaluator = DistanceEvaluator::new(&model);
    let table = evaluator.evaluate_trajectory(&streams.trajectory)?;

    // Apply the analysis window to both streams.
    let t_min = config.window.t_min.unwrap_or(f64::NEG_INFINITY);
    let t_max = config.window.t_max.unwrap_or(f64::INFINITY);
    let table = if config.window.t_min.is_some() || config.window.t_max.is_some() {
        let cropped = table.crop(t_min, t_max);
        log::info!(
            "Window {:.1}s..{:.1}s keeps {} of {} frames",
            t_min,
            t_max,
            cropped.len(),
            table.len()
        );
        cropped
    } else {
        table
    };
    let latency = crop_latency(&streams, t_min, t_max);

    let threshold = config.clearance.threshold;
    let clearance = ClearanceReport::compute(&table, threshold);
    clearance.log_summary();
    if let Some(stats) = LatencyStats::compute(&latency) {
        stats.log_summary();
    }

    let style = ChartStyle {
        width: config.chart.width,
        height: config.chart.height,
        ..ChartStyle::default()
    };
    let chart = ClearanceChart::new(style);
    let latency_panel = if config.chart.show_latency && !latency.is_empty() {
        Some(latency.as_slice())
    } else {
        None
    };
    chart.save(&config.chart.output, &table, latency_panel, threshold)?;
    log::info!("Wrote {}", config.chart.output.display());

    if args.export_csv {
        let csv_path = config.chart.output.with_extension("csv");
        let mut file = std::fs::File::create(&csv_path)?;
        table.write_csv(&mut file)?;
        log::info!("Wrote {}", csv_path.display());
    }

    Ok(())
}

/// Pick the recording: an explicit file, or the first in the directory.
fn select_recording(config: &RunConfig) -> Result<(String, LogStreams), Box<dyn Error>> {
    if let Some(path) = &config.input.log {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut reader = LogReader::open(path)?;
        return Ok((name, reader.load_streams()?));
    }
    if let Some(dir) = &config.input.log_dir {
        let mut recordings = load_dir(dir)?;
        if recordings.is_empty() {
            return Err(format!("no .tlog recordings in {}", dir.display()).into());
        }
        return Ok(recordings.remove(0));
    }
    Err("no input: set --log, or [input] log / log_dir in the config".into())
}

/// Keep the latency samples inside the analysis window.
fn crop_latency(streams: &LogStreams, t_min: f64, t_max: f64) -> Vec<Timestamped<f64>> {
    let start = streams
        .latency
        .first()
        .map(|s| s.timestamp_us)
        .unwrap_or(0);
    streams
        .latency
        .iter()
        .filter(|s| {
            let t = s.timestamp_us.saturating_sub(start) as f64 / 1_000_000.0;
            t > t_min && t < t_max
        })
        .cloned()
        .collect()
}
