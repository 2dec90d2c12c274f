//! Conversion of ordinary images into LBM files: 1, 2 or 4 bit grayscale
//! framebuffers for small e-paper panels.

pub mod batch;
pub mod display_constants;
mod error;
pub mod gray;
pub mod lbm;
pub mod pack;
pub mod paths;
pub mod source;

pub use crate::batch::{convert_batch, BatchConfig, BatchReport};
pub use crate::error::ConvertError;
pub use crate::gray::{Brightness, GrayLevel, PackingMode, QuantizedBuffer};
pub use crate::pack::PackedImage;

use crate::gray::quantize;
use crate::lbm::save_lbm;
use crate::pack::pack;
use crate::source::load_grayscale;
use image::GrayImage;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub gray_level: GrayLevel,
    pub brightness: Brightness,
    /// Also save a PNG rendering of the quantized levels next to the output.
    pub preview: bool,
}

impl ConvertOptions {
    pub fn new(gray_level: GrayLevel) -> Self {
        Self {
            gray_level,
            brightness: Brightness::default(),
            preview: false,
        }
    }
}

/// Brightness, quantization and packing of an already decoded image.
pub fn quantize_adjusted(mut gray: GrayImage, options: &ConvertOptions) -> QuantizedBuffer {
    options.brightness.apply(&mut gray);
    quantize(&gray, options.gray_level)
}

pub fn encode(gray: GrayImage, options: &ConvertOptions) -> Result<PackedImage, ConvertError> {
    pack(&quantize_adjusted(gray, options))
}

pub fn preview_path(out_file: &Path) -> PathBuf {
    out_file.with_extension("preview.png")
}

pub fn convert(
    file: &Path,
    out_file: &Path,
    options: &ConvertOptions,
) -> Result<PackedImage, ConvertError> {
    let gray = load_grayscale(file)?;
    info!("Opened image {}", file.display());
    let quantized = quantize_adjusted(gray, options);
    if options.preview {
        let preview = preview_path(out_file);
        quantized.preview().save(&preview)?;
        info!("Saved preview {}", preview.display());
    }
    let packed = pack(&quantized)?;
    save_lbm(out_file, &packed)?;
    info!("Success: {} -> {}", file.display(), out_file.display());
    Ok(packed)
}
