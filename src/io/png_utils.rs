/* Copyright 2020 @TwoCookingMice */

use crate::core::film::{RenderError, RgbImageSink, RowSink};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use std::io::Write;

/// Buffers rows and encodes an 8-bit RGB PNG into `W` on `finish`.
pub struct PngRowWriter<W: Write> {
    rows: RgbImageSink,
    out: Option<W>,
}

impl<W: Write> PngRowWriter<W> {
    pub fn new(out: W) -> Self {
        Self { rows: RgbImageSink::new(), out: Some(out) }
    }
}

impl<W: Write> RowSink for PngRowWriter<W> {
    fn begin(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        self.rows.begin(width, height)
    }

    fn write_row(&mut self, row: &[u8]) -> Result<(), RenderError> {
        self.rows.write_row(row)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.rows.finish()?;
        let image = match self.rows.image() {
            Some(image) => image,
            None => return Err(RenderError::RowCount { expected: 0, actual: 0 }),
        };
        let mut out = match self.out.take() {
            Some(out) => out,
            None => return Ok(()),
        };

        log::info!("Encoding {}x{} PNG.", image.width(), image.height());
        PngEncoder::new(&mut out).write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip_through_decoder() {
        let mut bytes = Vec::new();
        {
            let mut writer = PngRowWriter::new(&mut bytes);
            writer.begin(2, 1).unwrap();
            writer.write_row(&[255, 0, 0, 0, 0, 255]).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255]);
    }
}
