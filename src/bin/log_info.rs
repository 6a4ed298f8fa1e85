//! CLI tool for inspecting trajectory log files.
//!
//! Displays metadata and statistics about recorded log files.
//!
//! # Usage
//!
//! ```bash
//! log_info run.tlog
//! log_info --verbose run.tlog
//! ```

use std::env;

use antara::LogReader;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct Config {
    log_path: String,
    verbose: bool,
    scan_records: bool,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut log_path = None;
    let mut verbose = false;
    let mut scan_records = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--scan" | "-s" => {
                scan_records = true;
            }
            "--help" | "-h" => {
                return Err("Help requested".to_string());
            }
            arg if !arg.starts_with('-') => {
                if log_path.is_some() {
                    return Err("Multiple log files specified".to_string());
                }
                log_path = Some(arg.to_string());
            }
            _ => {
                return Err(format!("Unknown argument: {}", args[i]));
            }
        }
        i += 1;
    }

    let log_path = log_path.ok_or("Missing log file argument")?;

    Ok(Config {
        log_path,
        verbose,
        scan_records,
    })
}

fn print_usage(program: &str) {
    eprintln!(
        r#"Usage: {} [OPTIONS] <LOG_FILE>

Inspect a trajectory log (.tlog) file.

Options:
    -v, --verbose    Print per-stream timing detail
    -s, --scan       Walk every record and recount (detects truncation)
    -h, --help       Print this help
"#,
        program
    );
}

fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = LogReader::open(&config.log_path)?;
    let header = reader.header().clone();

    println!("Log file: {}", config.log_path);
    println!("  Version:        {}", header.version);
    println!("  Duration:       {:.2} s", header.duration_secs());
    println!("  Joint frames:   {}", header.joint_count);
    println!("  Latency samples:{}", header.latency_count);
    println!("  Total records:  {}", header.record_count());

    if config.verbose {
        println!();
        println!("  Start time:     {} us", header.start_time_us);
        println!("  End time:       {} us", header.end_time_us);
        if header.duration_us() > 0 {
            println!(
                "  Joint rate:     {:.1} Hz",
                header.joint_count as f64 / header.duration_secs()
            );
            println!(
                "  Latency rate:   {:.1} Hz",
                header.latency_count as f64 / header.duration_secs()
            );
        }
    }

    if config.scan_records {
        println!();
        println!("Scanning records...");
        let info = reader.scan_info()?;
        println!("  Joint frames:   {}", info.joint_count);
        println!("  Latency samples:{}", info.latency_count);
        println!("  File size:      {} bytes", info.file_size_bytes);
        if info.joint_count != header.joint_count || info.latency_count != header.latency_count
        {
            println!("  WARNING: counts differ from header (truncated file?)");
        }
    }

    Ok(())
}
