use clap::Parser;
use lbm_convert::paths::DefaultPaths;
use lbm_convert::{convert_batch, BatchConfig, Brightness, ConvertError, ConvertOptions, GrayLevel};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

/// Convert jpg, jpeg, bmp and png images into LBM grayscale framebuffers.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Image file or directory. Defaults to the directory of this executable.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output directory. Relative paths are placed under the default output
    /// directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Gray levels per pixel: 2, 4 or 16.
    #[arg(short, long)]
    gray: GrayLevel,
    /// Brightness adjustment in percent, -100 to 100.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    brightness: i32,
    /// Worker threads used for directory conversion.
    #[arg(short, long)]
    jobs: Option<usize>,
    /// Also write a PNG rendering of each converted image.
    #[arg(long)]
    preview: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let defaults = match DefaultPaths::beside_executable() {
        Ok(defaults) => defaults,
        Err(e) => {
            error!("Cannot locate the executable directory: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if run(&args, &defaults) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Set up paths and convert. Every failure is logged here; the return value
/// only tells whether everything converted.
fn run(args: &Args, defaults: &DefaultPaths) -> bool {
    match defaults.create_dirs() {
        Ok(()) => {}
        Err(ConvertError::PermissionDenied { path, .. }) => {
            error!(
                "Cannot create default directory {}. Grant storage access first (on Termux: termux-setup-storage)",
                path.display()
            );
            return false;
        }
        Err(e) => {
            error!("Cannot create default directories: {}", e);
            return false;
        }
    }

    let input = match defaults.resolve_input(args.input.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            error!("{}", e);
            return false;
        }
    };
    let config = BatchConfig {
        input,
        output_root: defaults.resolve_output(args.output.as_deref()),
        options: ConvertOptions {
            gray_level: args.gray,
            brightness: Brightness(args.brightness),
            preview: args.preview,
        },
        jobs: args.jobs,
    };

    let report = match convert_batch(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("Conversion failed: {}", e);
            return false;
        }
    };
    info!(
        "Done: {} converted, {} failed",
        report.converted.len(),
        report.failed.len()
    );
    report.is_success()
}
