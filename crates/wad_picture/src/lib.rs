//! This library encodes and decodes the column based **picture** format stored inside *WAD* files.
//!
//! # Picture Format Documentation
//!
//! Pictures are palette indexed images stored column by column. Each column is a list of spans
//! of opaque pixels, every row not covered by a span is transparent.
//!
//! ## File Structure
//!
//! A picture consists of a header, a column pointer table and the column data.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Width                  | 2 bytes: Signed number of columns                          |
//! | 0x0002         | Height                 | 2 bytes: Signed number of rows                             |
//! | 0x0004         | Offset X               | 2 bytes: Signed horizontal origin offset                   |
//! | 0x0006         | Offset Y               | 2 bytes: Signed vertical origin offset                     |
//! | 0x0008         | Column Pointers        | 4 bytes per column: Offset of the column's span records    |
//!
//! ### Column Pointers
//!
//! The pointer table holds one entry per column. Pictures written by this crate store the offset
//! relative to the first byte after the pointer table, see [`PointerBase`]. When reading, offsets
//! relative to the start of the picture are accepted as well.
//!
//! ### Column Data
//!
//! Every column is a sequence of span records terminated by a single `0xFF` byte. Each span record
//! has the following structure:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Row Offset             | 1 byte: Start row relative to the previous span's start |
//! | 0x0001         | Pixel Count            | 1 byte: Number of pixels in the span, at most 128       |
//! | 0x0002         | Reserved               | 1 byte: Always 0                                        |
//! | 0x0003         | Pixels                 | (Pixel Count) bytes: Palette indices                    |
//!
//! - **Row Offset**: The first span of a column is relative to the top of the column, every
//!   following span is relative to the start row of the span before it. A row offset can never be
//!   `0xFF`, gaps of 255 rows or more are bridged with spans that have no pixels.
//! - **Pixel Count**: The encoder splits longer runs of opaque pixels into several spans.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Transparency**: Binary, a pixel is either opaque or fully transparent
//! - **Colors**: Resolved through a [`Palette`] of at most 256 colors
//!

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod palette;
pub mod picture;
pub mod raster;
pub mod types;

pub use codec::PictureCodec;
pub use decode::decode;
pub use encode::{encode, encode_with_options, EncodeOptions, PointerBase};
pub use palette::{Palette, Rgb};
pub use picture::Picture;
