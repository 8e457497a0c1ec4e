// Copyright @yucwang 2026

use image::RgbImage;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("i/o error while writing image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("row {row} has {actual} bytes, expected {expected}")]
    RowWidth { row: usize, expected: usize, actual: usize },
    #[error("image of {width}x{height} cannot be represented")]
    Dimensions { width: usize, height: usize },
}

/// Consumer of 8-bit RGB rows, top to bottom: `begin`, exactly `height`
/// calls to `write_row` with `width * 3` bytes each, then `finish`.
pub trait RowSink {
    fn begin(&mut self, width: usize, height: usize) -> Result<(), RenderError>;
    fn write_row(&mut self, row: &[u8]) -> Result<(), RenderError>;
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Collects rows into an in-memory `RgbImage`.
#[derive(Debug, Default)]
pub struct RgbImageSink {
    image: Option<RgbImage>,
    rows_written: usize,
    finished: bool,
}

impl RgbImageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected image, once `finish` has succeeded.
    pub fn image(&self) -> Option<&RgbImage> {
        if self.finished {
            self.image.as_ref()
        } else {
            None
        }
    }

    pub fn into_image(self) -> Option<RgbImage> {
        if self.finished {
            self.image
        } else {
            None
        }
    }
}

impl RowSink for RgbImageSink {
    fn begin(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(RenderError::Dimensions { width, height }),
        };
        self.image = Some(RgbImage::new(w, h));
        self.rows_written = 0;
        self.finished = false;
        Ok(())
    }

    fn write_row(&mut self, row: &[u8]) -> Result<(), RenderError> {
        let image = self.image.as_mut().ok_or(RenderError::RowCount { expected: 0, actual: 1 })?;
        let stride = image.width() as usize * 3;
        let height = image.height() as usize;
        if self.rows_written >= height {
            return Err(RenderError::RowCount { expected: height, actual: self.rows_written + 1 });
        }
        if row.len() != stride {
            return Err(RenderError::RowWidth { row: self.rows_written, expected: stride, actual: row.len() });
        }
        let start = self.rows_written * stride;
        let buffer: &mut [u8] = image;
        buffer[start..start + stride].copy_from_slice(row);
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        let expected = self.image.as_ref().map_or(0, |image| image.height() as usize);
        if self.rows_written != expected {
            return Err(RenderError::RowCount { expected, actual: self.rows_written });
        }
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_land_in_order() {
        let mut sink = RgbImageSink::new();
        sink.begin(2, 2).unwrap();
        sink.write_row(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert!(sink.image().is_none());
        sink.write_row(&[7, 8, 9, 10, 11, 12]).unwrap();
        sink.finish().unwrap();

        let image = sink.into_image().expect("finished image");
        assert_eq!(image.get_pixel(1, 0).0, [4, 5, 6]);
        assert_eq!(image.get_pixel(0, 1).0, [7, 8, 9]);
    }

    #[test]
    fn test_row_count_enforced() {
        let mut sink = RgbImageSink::new();
        sink.begin(1, 2).unwrap();
        sink.write_row(&[0, 0, 0]).unwrap();
        assert!(matches!(sink.finish(), Err(RenderError::RowCount { expected: 2, actual: 1 })));
        assert!(matches!(sink.write_row(&[0, 0]), Err(RenderError::RowWidth { .. })));
    }
}
