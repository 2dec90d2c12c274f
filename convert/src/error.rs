use image::ImageError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("unsupported gray level {0}, expected 2, 4 or 16")]
    UnsupportedGrayLevel(u8),
    #[error("input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("permission denied creating {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("image has no pixels")]
    EmptyImage,
    #[error("image of {width}x{height} does not fit the 16-bit header fields")]
    DimensionsTooLarge { width: u32, height: u32 },
    #[error("expected {expected} samples for the image size, got {actual}")]
    SampleCount { expected: usize, actual: usize },
}
