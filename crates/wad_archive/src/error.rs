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

    /// Transparent wrapper for [`wad_picture::error::Error`]
    #[error(transparent)]
    #[diagnostic(transparent)]
    PictureError(#[from] wad_picture::error::Error),

    /// file is an invalid wad archive
    #[error("file is an invalid wad archive")]
    #[diagnostic(help("wad archives start with the magic `IWAD` or `PWAD`"))]
    InvalidArchive,

    /// unable to find requested lump
    #[error("unable to find requested lump")]
    LumpNotFound(#[from] LumpNotFoundError),

    /// lump name {0:?} can not be stored in a wad archive
    #[error("lump name {0:?} can not be stored in a wad archive")]
    #[diagnostic(help("lump names may only contain latin-1 characters"))]
    InvalidLumpName(String),

    /// no codec named {0:?} is registered
    #[error("no codec named {0:?} is registered")]
    #[diagnostic(help("pictures need the `image` codec, which requires a palette"))]
    UnknownCodec(String),

    /// ran out of file names for template {0:?}
    #[error("ran out of file names for template {0:?}")]
    FilenamesExhausted(String),

    /// manifest entry for lump {0:?} has no file name
    #[error("manifest entry for lump {0:?} has no file name")]
    MissingFilename(String),

    /// file name {filename:?} of lump {name:?} points outside of the files directory
    #[error("file name {filename:?} of lump {name:?} points outside of the files directory")]
    #[diagnostic(help("file names in content.json are relative paths below `files/`"))]
    UnsafeFilename { name: String, filename: String },

    /// unable to convert lump {name}
    #[error("unable to convert lump {name}")]
    Resource {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// {0}
    #[error("{0}")]
    CustomError(String),
}

/// Error type to provide further information when a lump has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested lump")]
pub enum LumpNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
