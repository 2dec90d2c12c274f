use crate::display_constants::{MAX_PIXEL_HEIGHT, MAX_PIXEL_WIDTH};
use crate::error::ConvertError;
use image::imageops::{resize, FilterType};
use image::{DynamicImage, GrayImage, ImageDecoder, ImageReader, Luma, RgbImage};
use std::path::Path;
use tracing::info;

/// Size of a `width`x`height` image scaled down to fit inside the box,
/// keeping the aspect ratio. Images that already fit keep their size.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let ratio = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    if ratio < 1.0 {
        (
            ((width as f64 * ratio) as u32).max(1),
            ((height as f64 * ratio) as u32).max(1),
        )
    } else {
        (width, height)
    }
}

/// ITU-R 601-2 luma in 16-bit fixed point, rounded to nearest.
pub fn luma_601(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let l = (r as u32 * 19_595 + g as u32 * 38_470 + b as u32 * 7_471 + 0x8000) >> 16;
        Luma([l as u8])
    })
}

/// Scale an image to fit the panel and reduce it to 8-bit luminance.
pub fn fit_to_display(img: DynamicImage) -> GrayImage {
    let (width, height) = fit_within(img.width(), img.height(), MAX_PIXEL_WIDTH, MAX_PIXEL_HEIGHT);
    let rgb = img.into_rgb8();
    if (width, height) == rgb.dimensions() {
        return luma_601(&rgb);
    }
    luma_601(&resize(&rgb, width, height, FilterType::Lanczos3))
}

pub fn open_oriented(file: &Path) -> Result<DynamicImage, ConvertError> {
    let mut decoder = ImageReader::open(file)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Decode `file` and return its grayscale samples sized for the panel.
pub fn load_grayscale(file: &Path) -> Result<GrayImage, ConvertError> {
    let img = open_oriented(file)?;
    let (orig_width, orig_height) = (img.width(), img.height());
    if orig_width == 0 || orig_height == 0 {
        return Err(ConvertError::EmptyImage);
    }
    let gray = fit_to_display(img);
    if gray.dimensions() != (orig_width, orig_height) {
        info!(
            "Resized {} from {}x{} to {}x{}",
            file.display(),
            orig_width,
            orig_height,
            gray.width(),
            gray.height()
        );
    }
    Ok(gray)
}

/// Wrap raw row-major samples, checking the length against the size.
pub fn gray_from_samples(width: u32, height: u32, samples: Vec<u8>) -> Result<GrayImage, ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyImage);
    }
    let expected = width as usize * height as usize;
    let actual = samples.len();
    if actual != expected {
        return Err(ConvertError::SampleCount { expected, actual });
    }
    GrayImage::from_raw(width, height, samples).ok_or(ConvertError::SampleCount { expected, actual })
}
