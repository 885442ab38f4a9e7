//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`serde_json::Error`]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// Transparent wrapper for [`png::DecodingError`]
    #[error(transparent)]
    PngDecodingError(#[from] png::DecodingError),

    /// Transparent wrapper for [`png::EncodingError`]
    #[error(transparent)]
    PngEncodingError(#[from] png::EncodingError),

    /// png color type {0:?} can not be converted to rgba
    #[error("png color type {0:?} can not be converted to rgba")]
    UnsupportedColorType(png::ColorType),

    /// palette color {0:?} is not a 6 digit hex string
    #[error("palette color {0:?} is not a 6 digit hex string")]
    #[diagnostic(help("palette entries are written as \"RRGGBB\""))]
    InvalidColor(String),

    /// palette has {0} entries, expected between 1 and 256
    #[error("palette has {0} entries, expected between 1 and 256")]
    InvalidPaletteSize(usize),

    /// palette index {index} is out of range for a palette of {len} colors
    #[error("palette index {index} is out of range for a palette of {len} colors")]
    PaletteIndexOutOfRange { index: usize, len: usize },

    /// picture header is invalid
    #[error("picture header is invalid: {0}")]
    InvalidHeader(String),

    /// column {column} starts at offset {offset} which is outside of the {len} byte picture
    #[error("column {column} starts at offset {offset} which is outside of the {len} byte picture")]
    PointerOutOfBounds {
        column: usize,
        offset: u64,
        len: usize,
    },

    /// span data of column {column} runs past the end of the picture at offset {offset}
    #[error("span data of column {column} runs past the end of the picture at offset {offset}")]
    TruncatedSpan { column: usize, offset: usize },

    /// span in column {column} covers rows up to {end} but the picture is only {height} rows high
    #[error(
        "span in column {column} covers rows up to {end} but the picture is only {height} rows high"
    )]
    SpanOutOfBounds {
        column: usize,
        end: usize,
        height: usize,
    },

    /// pixel ({x}, {y}) has partial alpha {alpha}
    #[error("pixel ({x}, {y}) has partial alpha {alpha}")]
    #[diagnostic(help("only fully opaque (255) or fully transparent (0) pixels can be encoded"))]
    UnsupportedPixel { x: u32, y: u32, alpha: u8 },

    /// picture of {width}x{height} does not fit into a picture header
    #[error("picture of {width}x{height} does not fit into a picture header")]
    PictureTooLarge { width: u32, height: u32 },

    /// pixel buffer has {actual} bytes, expected {expected}
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
