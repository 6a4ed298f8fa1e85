//! Convert CSV interchange files into a trajectory log.
//!
//! Joint CSV rows are `time,q1,...,qN` (seconds, radians); the optional
//! latency CSV carries `time,latency_ms`. Both streams are validated at
//! import and written as one `.tlog` recording.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use antara::{import_joint_csv, import_latency_csv, LogWriter};

#[derive(Parser)]
#[command(name = "log-import")]
#[command(about = "Convert CSV trajectory data into a .tlog recording")]
struct Args {
    /// Joint-state CSV file (time,q1,...,qN)
    #[arg(short, long)]
    joints: PathBuf,

    /// Optional latency CSV file (time,latency_ms)
    #[arg(short = 'l', long)]
    latency: Option<PathBuf>,

    /// Output .tlog path
    #[arg(short, long)]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let trajectory = import_joint_csv(&args.joints)?;
    log::info!(
        "Imported {} frames ({} DOF) from {}",
        trajectory.len(),
        trajectory.dof(),
        args.joints.display()
    );

    let latency = match &args.latency {
        Some(path) => {
            let samples = import_latency_csv(path)?;
            log::info!("Imported {} latency samples from {}", samples.len(), path.display());
            samples
        }
        None => Vec::new(),
    };

    // Merge both streams by timestamp so the log stays time-ordered.
    let mut writer = LogWriter::create(&args.output)?;
    let mut latency_iter = latency.iter().peekable();
    for frame in trajectory.iter() {
        while let Some(sample) = latency_iter.peek() {
            if sample.timestamp_us <= frame.timestamp_us {
                writer.record_latency(sample)?;
                latency_iter.next();
            } else {
                break;
            }
        }
        writer.record_joint_state(frame)?;
    }
    for sample in latency_iter {
        writer.record_latency(sample)?;
    }

    let info = writer.finish()?;
    log::info!(
        "Wrote {} ({} records, {:.2}s, {} bytes)",
        info.path.display(),
        info.record_count,
        info.duration_secs(),
        info.file_size_bytes
    );
    Ok(())
}
