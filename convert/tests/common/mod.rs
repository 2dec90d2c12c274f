#![allow(dead_code)]

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::Path;

/// Horizontal ramp from black to white.
pub fn gradient_gray(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| {
        Luma([(x * 255 / (width - 1).max(1)) as u8])
    })
}

pub fn save_gradient_png(path: &Path, width: u32, height: u32) {
    gradient_gray(width, height).save(path).unwrap();
}

pub fn save_solid_rgb(path: &Path, width: u32, height: u32, value: u8) {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
        .save(path)
        .unwrap();
}

/// Bytes that look like a PNG by name but hold no image.
pub fn write_corrupt_png(path: &Path) {
    std::fs::write(path, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();
}
