//! Encode a [`Picture`] into the column based picture format.

use binrw::BinWrite;
use bon::Builder;
use std::io::{Cursor, Write};
use tracing::{debug, instrument};

use crate::{
    error::{Error, Result},
    palette::Palette,
    picture::Picture,
    types::{ColumnPointer, PictureHeader, SpanHeader, COLUMN_END, MAX_SPAN_PIXELS},
};

/// Where the offsets stored in the column pointer table are counted from
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PointerBase {
    /// Offsets start at the first byte after the pointer table
    #[default]
    ColumnData,

    /// Offsets start at the first byte of the picture
    Absolute,
}

/// Options for how pictures should be encoded
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct EncodeOptions {
    /// Reject source pixels whose alpha is neither 0 nor 255 instead of treating them as
    /// transparent
    #[builder(default)]
    pub strict_alpha: bool,

    /// How column pointers are written
    #[builder(default)]
    pub pointer_base: PointerBase,
}

/// Encode `picture` with default options
pub fn encode(picture: &Picture, palette: &Palette) -> Result<Vec<u8>> {
    encode_with_options(picture, palette, &EncodeOptions::default())
}

/// Encode `picture`, mapping every opaque pixel to the nearest color of `palette`
#[instrument(skip_all, err, fields(width = picture.width(), height = picture.height()))]
pub fn encode_with_options(
    picture: &Picture,
    palette: &Palette,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let too_large = || Error::PictureTooLarge {
        width: picture.width(),
        height: picture.height(),
    };
    let header = PictureHeader {
        width: i16::try_from(picture.width()).map_err(|_| too_large())?,
        height: i16::try_from(picture.height()).map_err(|_| too_large())?,
        offset_x: picture.offset_x,
        offset_y: picture.offset_y,
    };

    let table_end = PictureHeader::SIZE + picture.width() as usize * ColumnPointer::SIZE;
    let data_start = match options.pointer_base {
        PointerBase::ColumnData => 0,
        PointerBase::Absolute => table_end,
    };

    let mut column_data = Cursor::new(Vec::new());
    let mut pointers = Vec::with_capacity(picture.width() as usize);
    let mut spans = 0usize;
    for x in 0..picture.width() {
        pointers.push(ColumnPointer {
            offset: (data_start + column_data.get_ref().len()) as u32,
        });

        let mut column = ColumnEncoder::new(&mut column_data);
        for (row, pixel) in picture.column(x).enumerate() {
            column.push(row, pixel.map(|rgb| palette.nearest_index(rgb)))?;
        }
        spans += column.finish()?;
    }

    let column_data = column_data.into_inner();
    debug!(spans, bytes = column_data.len(), "encoded columns");

    let mut output = Cursor::new(Vec::with_capacity(table_end + column_data.len()));
    header.write(&mut output)?;
    for pointer in &pointers {
        pointer.write(&mut output)?;
    }
    output.write_all(&column_data)?;

    Ok(output.into_inner())
}

/// Splits a single column into spans
///
/// Every emitted span stores its start row relative to the start row of the previously emitted
/// span, the first one relative to the top of the column. Gaps too large for the one byte row
/// offset are bridged with empty spans.
struct ColumnEncoder<'a> {
    output: &'a mut Cursor<Vec<u8>>,
    span_start: Option<usize>,
    indices: Vec<u8>,
    row_base: usize,
    spans: usize,
}

impl<'a> ColumnEncoder<'a> {
    fn new(output: &'a mut Cursor<Vec<u8>>) -> Self {
        ColumnEncoder {
            output,
            span_start: None,
            indices: Vec::with_capacity(MAX_SPAN_PIXELS),
            row_base: 0,
            spans: 0,
        }
    }

    fn push(&mut self, row: usize, pixel: Option<u8>) -> Result<()> {
        match (self.span_start, pixel) {
            (None, None) => {}
            (Some(_), None) => self.emit()?,
            (Some(_), Some(index)) if self.indices.len() < MAX_SPAN_PIXELS => {
                self.indices.push(index)
            }
            (Some(_), Some(index)) => {
                self.emit()?;
                self.start(row, index);
            }
            (None, Some(index)) => self.start(row, index),
        }
        Ok(())
    }

    /// Emit any open span and terminate the column, returns the number of spans written
    fn finish(mut self) -> Result<usize> {
        if self.span_start.is_some() {
            self.emit()?;
        }
        self.output.write_all(&[COLUMN_END])?;
        Ok(self.spans)
    }

    fn start(&mut self, row: usize, index: u8) {
        self.span_start = Some(row);
        self.indices.push(index);
    }

    fn emit(&mut self) -> Result<()> {
        let Some(start) = self.span_start.take() else {
            return Ok(());
        };

        let mut delta = start - self.row_base;
        while delta >= COLUMN_END as usize {
            let step = COLUMN_END - 1;
            SpanHeader {
                row_offset: step,
                pixel_count: 0,
            }
            .write(&mut *self.output)?;
            delta -= step as usize;
        }

        SpanHeader {
            row_offset: delta as u8,
            pixel_count: self.indices.len() as u8,
        }
        .write(&mut *self.output)?;
        self.output.write_all(&self.indices)?;

        self.row_base = start;
        self.indices.clear();
        self.spans += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::decode::decode;
    use crate::encode::{encode, encode_with_options, EncodeOptions, PointerBase};
    use crate::error::{Error, Result};
    use crate::palette::{Palette, Rgb};
    use crate::picture::Picture;

    const RED: Rgb = Rgb(255, 0, 0);
    const GREEN: Rgb = Rgb(0, 255, 0);

    fn palette() -> Palette {
        Palette::from_hex_strings(["000000", "FF0000", "00FF00"]).unwrap()
    }

    fn single_column(pixels: &[Option<Rgb>]) -> Picture {
        let mut picture = Picture::new(1, pixels.len() as u32);
        for (y, pixel) in pixels.iter().enumerate() {
            picture.set(0, y as u32, *pixel);
        }
        picture
    }

    #[traced_test]
    #[test]
    fn encode_two_by_two() -> Result<()> {
        let mut picture = Picture::new(2, 2);
        picture.set(0, 0, Some(RED));
        picture.set(0, 1, Some(RED));
        picture.set(1, 0, Some(GREEN));
        picture.set(1, 1, Some(RED));

        #[rustfmt::skip]
        let expected = vec![
            // Header
            0x02, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
            // Pointers
            0x00, 0x00, 0x00, 0x00,
            0x06, 0x00, 0x00, 0x00,
            // Column 0
            0x00, 0x02, 0x00, 0x01, 0x01, 0xFF,
            // Column 1
            0x00, 0x02, 0x00, 0x02, 0x01, 0xFF,
        ];

        let actual = encode(&picture, &palette())?;
        assert_eq!(actual, expected);
        assert_eq!(decode(&actual, &palette())?, picture);

        Ok(())
    }

    #[test]
    fn encode_empty_column() -> Result<()> {
        let picture = single_column(&[None, None, None]);

        let actual = encode(&picture, &palette())?;
        assert_eq!(&actual[12..], &[0xFF]);

        let decoded = decode(&actual, &palette())?;
        assert!(decoded.column(0).all(|p| p.is_none()));

        Ok(())
    }

    #[test]
    fn encode_row_offsets_relative_to_previous_span() -> Result<()> {
        let picture = single_column(&[
            Some(RED),
            Some(RED),
            None,
            None,
            None,
            Some(GREEN),
            None,
            None,
            Some(GREEN),
        ]);

        #[rustfmt::skip]
        let expected = [
            0x00, 0x02, 0x00, 0x01, 0x01,
            0x05, 0x01, 0x00, 0x02,
            0x03, 0x01, 0x00, 0x02,
            0xFF,
        ];

        let actual = encode(&picture, &palette())?;
        assert_eq!(&actual[12..], &expected);
        assert_eq!(decode(&actual, &palette())?, picture);

        Ok(())
    }

    #[test]
    fn encode_first_span_below_top() -> Result<()> {
        let picture = single_column(&[None, None, Some(RED)]);

        let actual = encode(&picture, &palette())?;
        assert_eq!(&actual[12..], &[0x02, 0x01, 0x00, 0x01, 0xFF]);

        Ok(())
    }

    #[test]
    fn encode_caps_spans_at_128_pixels() -> Result<()> {
        let picture = single_column(&vec![Some(RED); 300]);

        let actual = encode(&picture, &palette())?;
        let data = &actual[12..];

        assert_eq!(&data[0..3], &[0x00, 0x80, 0x00]);
        let second = 3 + 128;
        assert_eq!(&data[second..second + 3], &[0x80, 0x80, 0x00]);
        let third = second + 3 + 128;
        assert_eq!(&data[third..third + 3], &[0x80, 0x2C, 0x00]);
        assert_eq!(data.len(), 3 * 3 + 300 + 1);
        assert_eq!(data.last(), Some(&0xFF));

        assert_eq!(decode(&actual, &palette())?, picture);

        Ok(())
    }

    #[test]
    fn encode_bridges_large_gaps() -> Result<()> {
        let mut pixels = vec![None; 600];
        pixels[0] = Some(RED);
        pixels[599] = Some(GREEN);
        let picture = single_column(&pixels);

        #[rustfmt::skip]
        let expected = [
            0x00, 0x01, 0x00, 0x01,
            0xFE, 0x00, 0x00,
            0xFE, 0x00, 0x00,
            0x5B, 0x01, 0x00, 0x02,
            0xFF,
        ];

        let actual = encode(&picture, &palette())?;
        assert_eq!(&actual[12..], &expected);
        assert_eq!(decode(&actual, &palette())?, picture);

        Ok(())
    }

    #[test]
    fn encode_quantizes_to_nearest_color() -> Result<()> {
        let picture = single_column(&[Some(Rgb(250, 10, 10)), Some(Rgb(10, 10, 10))]);

        let actual = encode(&picture, &palette())?;
        assert_eq!(&actual[12..], &[0x00, 0x02, 0x00, 0x01, 0x00, 0xFF]);

        Ok(())
    }

    #[test]
    fn encode_keeps_offsets() -> Result<()> {
        let mut picture = single_column(&[Some(RED)]);
        picture.offset_x = -3;
        picture.offset_y = 7;

        let actual = encode(&picture, &palette())?;
        assert_eq!(&actual[4..8], &[0xFD, 0xFF, 0x07, 0x00]);

        Ok(())
    }

    #[test]
    fn encode_absolute_pointers() -> Result<()> {
        let mut picture = Picture::new(2, 1);
        picture.set(1, 0, Some(GREEN));

        let options = EncodeOptions::builder()
            .pointer_base(PointerBase::Absolute)
            .build();
        let actual = encode_with_options(&picture, &palette(), &options)?;

        assert_eq!(&actual[8..16], &[0x10, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00]);
        assert_eq!(decode(&actual, &palette())?, picture);

        Ok(())
    }

    #[test]
    fn encode_too_large() {
        let picture = Picture::new(40_000, 1);
        assert!(matches!(
            encode(&picture, &palette()),
            Err(Error::PictureTooLarge { width: 40_000, .. })
        ));
    }
}
