//! Heatmap render CLI.
//!
//! Renders a point-density heatmap PNG for a map extent from a JSON points
//! file.

use clap::Parser;
use heatmap_render::{is_input_failure, RenderJob};
use renderer::HeatmapConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "heatmap-render")]
#[command(about = "Render a point-density heatmap PNG for a map extent")]
struct Args {
    /// Extent as "xmin,ymin,xmax,ymax"
    #[arg(long, env = "HEATMAP_BBOX", allow_hyphen_values = true)]
    bbox: Option<String>,

    /// Canvas size as "width,height"
    #[arg(long, env = "HEATMAP_SIZE")]
    size: Option<String>,

    /// Export request JSON supplying "bbox" and "size"
    #[arg(long, env = "HEATMAP_REQUEST")]
    request: Option<PathBuf>,

    /// JSON array of points
    #[arg(short, long, env = "HEATMAP_POINTS")]
    points: PathBuf,

    /// Output PNG path
    #[arg(short, long, env = "HEATMAP_OUTPUT", default_value = "heatmap.png")]
    output: PathBuf,

    /// Opacity of the heat layer (0.0 - 1.0)
    #[arg(long, env = "HEATMAP_OPACITY", default_value_t = renderer::heatmap::DEFAULT_OPACITY)]
    opacity: f32,

    /// Log level, overridden by RUST_LOG
    #[arg(long, env = "HEATMAP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "HEATMAP_JSON_LOGS")]
    json_logs: bool,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let result = RenderJob::resolve(
        args.request.as_deref(),
        args.bbox.as_deref(),
        args.size.as_deref(),
        args.points,
        args.output,
        HeatmapConfig {
            opacity: args.opacity,
        },
    )
    .and_then(|job| job.run());

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if is_input_failure(&e) => {
            warn!(error = %format!("{e:#}"), "Heatmap request rejected");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Heatmap render failed");
            ExitCode::FAILURE
        }
    }
}
