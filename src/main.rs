//! Workout form analysis: one video in, one JSON report line out on stdout.

use anyhow::Result;
use clap::Parser;
use formcheck::app::FormCheckApp;
use formcheck::config::Config;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Workout video to analyze
    video: PathBuf,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger; diagnostics go to stderr, stdout stays reserved
    // for the report line
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Workout Form Check");

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Any failure up to here exits nonzero with no report; once a report
    // exists it is printed and the exit code is 0, "error" verdicts included
    let mut app = FormCheckApp::new(&args.video, config)?;
    let report = app.run()?;
    println!("{}", report.to_json()?);

    Ok(())
}
