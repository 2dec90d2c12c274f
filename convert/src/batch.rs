//! Converting a single file or a whole directory tree. Every file is
//! converted on its own; a failure is logged and recorded, and the batch
//! moves on.

use crate::display_constants::{INPUT_EXTENSIONS, LBM_EXTENSION};
use crate::error::ConvertError;
use crate::{convert, ConvertOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// A single image or a directory searched recursively.
    pub input: PathBuf,
    pub output_root: PathBuf,
    pub options: ConvertOptions,
    /// Worker threads. `None` lets the pool decide, `Some(1)` runs in order on
    /// the calling thread.
    pub jobs: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConversionJob>,
    pub failed: Vec<(ConversionJob, ConvertError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| INPUT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// `<output_dir>/<stem>.lbm`
pub fn output_file(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(LBM_EXTENSION);
    output_dir.join(name)
}

fn walk_images(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    // DirEntry::file_type does not follow symlinks, so linked directories
    // are never descended into.
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?.is_dir()))))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    for (path, is_dir) in entries {
        if is_dir {
            if let Err(e) = walk_images(&path, found) {
                warn!("Skipping unreadable directory {}: {}", path.display(), e);
            }
        } else if is_supported_image(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// List the conversions for `input`. Directory inputs have their relative
/// layout mirrored under `output_root`.
pub fn plan_jobs(input: &Path, output_root: &Path) -> io::Result<Vec<ConversionJob>> {
    if !input.is_dir() {
        if !is_supported_image(input) {
            warn!("Skipping {}: not a jpg, jpeg, bmp or png file", input.display());
            return Ok(Vec::new());
        }
        return Ok(vec![ConversionJob {
            input: input.to_path_buf(),
            output: output_file(input, output_root),
        }]);
    }

    let mut images = Vec::new();
    walk_images(input, &mut images)?;
    Ok(images
        .into_iter()
        .map(|file| {
            let relative_dir = file
                .strip_prefix(input)
                .ok()
                .and_then(Path::parent)
                .unwrap_or(Path::new(""));
            let output = output_file(&file, &output_root.join(relative_dir));
            ConversionJob {
                input: file,
                output,
            }
        })
        .collect())
}

fn run_job(job: &ConversionJob, options: &ConvertOptions) -> Result<(), ConvertError> {
    if let Some(dir) = job.output.parent() {
        fs::create_dir_all(dir)?;
    }
    convert(&job.input, &job.output, options)?;
    Ok(())
}

#[cfg(feature = "parallel")]
fn run_all(jobs: &[ConversionJob], config: &BatchConfig) -> Vec<Result<(), ConvertError>> {
    use rayon::prelude::*;

    if config.jobs == Some(1) {
        return jobs.iter().map(|job| run_job(job, &config.options)).collect();
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs.unwrap_or(0))
        .build();
    match pool {
        Ok(pool) => pool.install(|| {
            jobs.par_iter()
                .map(|job| run_job(job, &config.options))
                .collect()
        }),
        Err(e) => {
            warn!("Could not start worker pool, converting sequentially: {}", e);
            jobs.iter().map(|job| run_job(job, &config.options)).collect()
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all(jobs: &[ConversionJob], config: &BatchConfig) -> Vec<Result<(), ConvertError>> {
    jobs.iter().map(|job| run_job(job, &config.options)).collect()
}

/// Convert everything `config.input` names. Only failing to list the input
/// is an error; per-file failures end up in the report.
pub fn convert_batch(config: &BatchConfig) -> Result<BatchReport, ConvertError> {
    if !config.input.exists() {
        return Err(ConvertError::InputNotFound(config.input.clone()));
    }
    let jobs = plan_jobs(&config.input, &config.output_root)?;
    info!(
        "Converting {} image(s) from {} at {} gray levels",
        jobs.len(),
        config.input.display(),
        config.options.gray_level
    );

    let results = run_all(&jobs, config);
    let mut report = BatchReport::default();
    for (job, result) in jobs.into_iter().zip(results) {
        match result {
            Ok(()) => report.converted.push(job),
            Err(e) => {
                error!("Failed to process {}: {}", job.input.display(), e);
                report.failed.push((job, e));
            }
        }
    }
    Ok(report)
}
