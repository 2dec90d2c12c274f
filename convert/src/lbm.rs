//! LBM container: a fixed 6-byte little-endian header followed by the packed
//! rows of a [`PackedImage`].
//!
//! | offset | size | field          |
//! |--------|------|----------------|
//! | 0      | 1    | reserved (0)   |
//! | 1      | 1    | bits per pixel |
//! | 2      | 2    | width          |
//! | 4      | 2    | height         |
//! | 6      | ..   | payload        |

use crate::display_constants::LBM_HEADER_LEN;
use crate::pack::PackedImage;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LbmHeader {
    pub bits_per_pixel: u8,
    pub width: u16,
    pub height: u16,
}

impl LbmHeader {
    pub fn for_image(image: &PackedImage) -> Self {
        Self {
            bits_per_pixel: image.bits_per_pixel(),
            width: image.width(),
            height: image.height(),
        }
    }

    pub fn to_bytes(self) -> [u8; LBM_HEADER_LEN] {
        let [w0, w1] = self.width.to_le_bytes();
        let [h0, h1] = self.height.to_le_bytes();
        [0, self.bits_per_pixel, w0, w1, h0, h1]
    }
}

pub fn write_lbm<W: Write>(writer: &mut W, image: &PackedImage) -> io::Result<()> {
    writer.write_all(&LbmHeader::for_image(image).to_bytes())?;
    for row in image.rows() {
        writer.write_all(row)?;
    }
    Ok(())
}

pub fn encode_lbm(image: &PackedImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(LBM_HEADER_LEN + image.payload().len());
    out.extend_from_slice(&LbmHeader::for_image(image).to_bytes());
    out.extend_from_slice(image.payload());
    out
}

pub fn save_lbm(path: &Path, image: &PackedImage) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_lbm(&mut writer, image)?;
    writer.flush()
}
