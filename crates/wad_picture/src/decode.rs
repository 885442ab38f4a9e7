//! Reconstruct a [`Picture`] from an encoded picture lump.

use binrw::BinRead;
use std::io::Cursor;
use tracing::{instrument, trace};

use crate::{
    error::{Error, Result},
    palette::Palette,
    picture::Picture,
    types::{ColumnPointer, PictureHeader, SpanHeader, COLUMN_END},
};

/// Read the header of an encoded picture
pub fn read_header(blob: &[u8]) -> Result<PictureHeader> {
    if blob.len() < PictureHeader::SIZE {
        return Err(Error::InvalidHeader(format!(
            "picture is {} bytes, shorter than its header",
            blob.len()
        )));
    }

    let header = PictureHeader::read(&mut Cursor::new(blob))?;
    if header.width < 0 || header.height < 0 {
        return Err(Error::InvalidHeader(format!(
            "negative dimensions {}x{}",
            header.width, header.height
        )));
    }
    Ok(header)
}

/// Decode an encoded picture using `palette` to resolve the palette indices
///
/// Column pointers are accepted both relative to the column data region (as written by
/// [`crate::encode()`]) and as absolute offsets into `blob`. Pointers that point into the header
/// or pointer table can only be relative ones, so the table as a whole is treated as relative
/// whenever one of its entries does.
#[instrument(skip_all, err, fields(size = blob.len()))]
pub fn decode(blob: &[u8], palette: &Palette) -> Result<Picture> {
    let header = read_header(blob)?;
    let width = header.width as usize;
    let height = header.height as usize;

    let table_end = PictureHeader::SIZE + width * ColumnPointer::SIZE;
    if blob.len() < table_end {
        return Err(Error::InvalidHeader(format!(
            "pointer table for {width} columns needs {table_end} bytes, picture has {}",
            blob.len()
        )));
    }

    let mut cursor = Cursor::new(&blob[PictureHeader::SIZE..table_end]);
    let pointers = (0..width)
        .map(|_| ColumnPointer::read(&mut cursor))
        .collect::<binrw::BinResult<Vec<_>>>()?;

    let base = match pointers.iter().map(|p| p.offset as usize).min() {
        Some(min) if min < table_end => table_end,
        _ => 0,
    };
    trace!(width, height, base, "decoding columns");

    let mut picture = Picture::new(width as u32, height as u32);
    picture.offset_x = header.offset_x;
    picture.offset_y = header.offset_y;

    for (column, pointer) in pointers.iter().enumerate() {
        let start = base as u64 + pointer.offset as u64;
        if start >= blob.len() as u64 {
            return Err(Error::PointerOutOfBounds {
                column,
                offset: start,
                len: blob.len(),
            });
        }
        decode_column(blob, start as usize, column, palette, &mut picture)?;
    }

    Ok(picture)
}

fn decode_column(
    blob: &[u8],
    start: usize,
    column: usize,
    palette: &Palette,
    picture: &mut Picture,
) -> Result<()> {
    let height = picture.height() as usize;
    let truncated = |offset| Error::TruncatedSpan { column, offset };

    let mut offset = start;
    let mut row_base = 0usize;
    loop {
        let marker = *blob.get(offset).ok_or(truncated(offset))?;
        if marker == COLUMN_END {
            return Ok(());
        }

        let span_bytes = blob
            .get(offset..offset + SpanHeader::SIZE)
            .ok_or(truncated(offset))?;
        let span = SpanHeader::read(&mut Cursor::new(span_bytes))?;
        offset += SpanHeader::SIZE;

        let count = span.pixel_count as usize;
        let indices = blob
            .get(offset..offset + count)
            .ok_or(truncated(offset))?;

        row_base += span.row_offset as usize;
        let end = row_base + count;
        if end > height {
            return Err(Error::SpanOutOfBounds {
                column,
                end,
                height,
            });
        }

        for (row, index) in (row_base..end).zip(indices) {
            let color = palette.color_at(*index as usize)?;
            picture.set(column as u32, row as u32, Some(color));
        }
        offset += count;
    }
}
