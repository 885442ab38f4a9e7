//! Fixed layout records of the picture format.

use binrw::{BinRead, BinWrite};

/// Picture header
///
/// Stored at the start of every picture lump. The offsets position the picture relative to its
/// origin when the engine draws it and are not needed to reconstruct the pixels.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct PictureHeader {
    /// Number of columns, and therefore of entries in the pointer table
    pub width: i16,

    /// Number of rows in every column
    pub height: i16,

    /// Horizontal origin offset
    pub offset_x: i16,

    /// Vertical origin offset
    pub offset_y: i16,
}

impl PictureHeader {
    pub const SIZE: usize = 8;
}

/// Column pointer table entry
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct ColumnPointer {
    /// Offset of the first span record of the column
    pub offset: u32,
}

impl ColumnPointer {
    pub const SIZE: usize = 4;
}

/// Header of a single span record, followed by `pixel_count` palette indices
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct SpanHeader {
    /// Start row of the span relative to the start row of the previous span in the column
    pub row_offset: u8,

    /// Number of palette indices that follow the header
    #[brw(pad_after = 1)]
    pub pixel_count: u8,
}

impl SpanHeader {
    pub const SIZE: usize = 3;
}

/// Marks the end of the span records of a column
pub const COLUMN_END: u8 = 0xFF;

/// Maximum number of pixels emitted in a single span
pub const MAX_SPAN_PIXELS: usize = 128;

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{ColumnPointer, PictureHeader, SpanHeader};

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x40, 0x01,
            0xC8, 0x00,
            0xFB, 0xFF,
            0x03, 0x00,
        ]);

        let expected = PictureHeader {
            width: 320,
            height: 200,
            offset_x: -5,
            offset_y: 3,
        };

        assert_eq!(PictureHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x02, 0x00,
            0x02, 0x00,
            0x00, 0x00,
            0x00, 0x00,
        ];

        let header = PictureHeader {
            width: 2,
            height: 2,
            ..Default::default()
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);
        assert_eq!(actual.len(), PictureHeader::SIZE);

        Ok(())
    }

    #[test]
    fn write_column_pointer() -> Result<()> {
        let mut actual = Vec::new();
        ColumnPointer { offset: 0x0102 }.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, vec![0x02, 0x01, 0x00, 0x00]);

        Ok(())
    }

    #[test]
    fn span_header_reserved_byte_is_zero() -> Result<()> {
        let mut actual = Vec::new();
        SpanHeader {
            row_offset: 5,
            pixel_count: 128,
        }
        .write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, vec![0x05, 0x80, 0x00]);
        assert_eq!(actual.len(), SpanHeader::SIZE);

        Ok(())
    }

    #[test]
    fn read_span_header_ignores_reserved_byte() -> Result<()> {
        let mut input = Cursor::new(vec![0x00, 0x03, 0x7F]);

        let expected = SpanHeader {
            row_offset: 0,
            pixel_count: 3,
        };

        assert_eq!(SpanHeader::read(&mut input)?, expected);
        assert_eq!(input.position(), 3);

        Ok(())
    }
}
