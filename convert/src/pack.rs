use crate::error::ConvertError;
use crate::gray::{PackingMode, QuantizedBuffer};

/// Bit-packed rows ready to be written after an LBM header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedImage {
    width: u16,
    height: u16,
    mode: PackingMode,
    data: Vec<u8>,
}

impl PackedImage {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn mode(&self) -> PackingMode {
        self.mode
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.mode.bits_per_pixel()
    }

    pub fn padded_width(&self) -> u32 {
        self.mode.padded_width(self.width as u32)
    }

    pub fn row_bytes(&self) -> usize {
        self.mode.row_bytes(self.width as u32)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.row_bytes())
    }

    /// All rows back to back, top to bottom.
    pub fn payload(&self) -> &[u8] {
        &self.data
    }
}

/// Pack one row of level indices into `out`, MSB first. Columns past the end
/// of `row` up to the alignment boundary are written as zero.
pub fn pack_row(row: &[u8], mode: PackingMode, out: &mut Vec<u8>) {
    let per_byte = mode.samples_per_byte() as usize;
    let bits = mode.bits_per_pixel();
    let mask = mode.mask();
    for group in row.chunks(per_byte) {
        let byte = group.iter().enumerate().fold(0u8, |byte, (j, index)| {
            byte | (index & mask) << (8 - bits * (j as u8 + 1))
        });
        out.push(byte);
    }
}

pub fn pack(quantized: &QuantizedBuffer) -> Result<PackedImage, ConvertError> {
    let (width, height) = (quantized.width(), quantized.height());
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyImage);
    }
    let too_large = || ConvertError::DimensionsTooLarge { width, height };
    let packed_width = u16::try_from(width).map_err(|_| too_large())?;
    let packed_height = u16::try_from(height).map_err(|_| too_large())?;

    let mode = quantized.level().packing_mode();
    let mut data = Vec::with_capacity(mode.row_bytes(width) * height as usize);
    for y in 0..height {
        pack_row(quantized.row(y), mode, &mut data);
    }

    Ok(PackedImage {
        width: packed_width,
        height: packed_height,
        mode,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gray::{quantize, GrayLevel};
    use image::GrayImage;

    fn packed(row: &[u8], mode: PackingMode) -> Vec<u8> {
        let mut out = Vec::new();
        pack_row(row, mode, &mut out);
        out
    }

    /// Read indices back out of a packed row, bit by bit.
    fn unpack_row(bytes: &[u8], mode: PackingMode, width: usize) -> Vec<u8> {
        let bits = mode.bits_per_pixel() as usize;
        (0..width)
            .map(|x| {
                let bit_offset = x * bits;
                let byte = bytes[bit_offset / 8];
                let shift = 8 - bits - bit_offset % 8;
                (byte >> shift) & ((1u8 << bits) - 1)
            })
            .collect()
    }

    #[test]
    fn one_bit_is_msb_first() {
        assert_eq!(packed(&[1, 0, 0, 0, 0, 0, 0, 0], PackingMode::OneBit), [0x80]);
        assert_eq!(packed(&[0, 0, 0, 0, 0, 0, 0, 1], PackingMode::OneBit), [0x01]);
        assert_eq!(
            packed(&[1, 0, 1, 1, 0, 0, 1, 0, 1, 1], PackingMode::OneBit),
            [0b1011_0010, 0b1100_0000]
        );
    }

    #[test]
    fn two_bit_is_msb_first() {
        assert_eq!(packed(&[3, 0, 1, 2], PackingMode::TwoBit), [0b11_00_01_10]);
        assert_eq!(packed(&[2, 1, 3], PackingMode::TwoBit), [0b10_01_11_00]);
    }

    #[test]
    fn four_bit_puts_first_pixel_in_high_nibble() {
        assert_eq!(packed(&[0xA, 0x5, 0xF], PackingMode::FourBit), [0xA5, 0xF0]);
    }

    #[test]
    fn stray_high_bits_are_masked() {
        assert_eq!(packed(&[0xFF; 2], PackingMode::FourBit), [0xFF]);
        assert_eq!(packed(&[0x02, 0x03], PackingMode::OneBit), [0b0100_0000]);
    }

    #[test]
    fn rows_have_uniform_length() {
        for level in GrayLevel::ALL {
            for width in [1u32, 2, 3, 7, 8, 9, 15, 17, 296] {
                let img = GrayImage::from_fn(width, 3, |x, y| image::Luma([(x * 7 + y * 31) as u8]));
                let image = pack(&quantize(&img, level)).unwrap();
                let row_bytes = level.packing_mode().row_bytes(width);
                assert_eq!(image.rows().len(), 3);
                assert!(image.rows().all(|row| row.len() == row_bytes));
                assert_eq!(image.payload().len(), 3 * row_bytes);
            }
        }
    }

    #[test]
    fn unpacking_recovers_indices() {
        for level in GrayLevel::ALL {
            let mode = level.packing_mode();
            let width = 37;
            let img = GrayImage::from_fn(width, 4, |x, y| image::Luma([(x * 13 + y * 59) as u8]));
            let quantized = quantize(&img, level);
            let image = pack(&quantized).unwrap();
            for (y, row) in image.rows().enumerate() {
                assert_eq!(
                    unpack_row(row, mode, width as usize),
                    quantized.row(y as u32),
                    "level {level} row {y}"
                );
                let padded = unpack_row(row, mode, image.padded_width() as usize);
                assert!(padded[width as usize..].iter().all(|&i| i == 0));
            }
        }
    }

    #[test]
    fn rejects_oversized_images() {
        let img = GrayImage::new(70_000, 1);
        let err = pack(&quantize(&img, GrayLevel::Two)).unwrap_err();
        assert!(matches!(err, ConvertError::DimensionsTooLarge { width: 70_000, height: 1 }));
    }

    #[test]
    fn rejects_empty_images() {
        let img = GrayImage::new(0, 0);
        assert!(matches!(
            pack(&quantize(&img, GrayLevel::Two)),
            Err(ConvertError::EmptyImage)
        ));
    }
}
