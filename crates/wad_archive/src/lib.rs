//! This library handles reading, creating and unpacking **WAD** files used by *Doom* engine games.
//!
//! # WAD Archive Format Documentation
//!
//! A WAD file is a flat list of named blobs of data called lumps. Lump names are at most 8
//! characters and do not have to be unique, the order of the lumps carries meaning. Lumps without
//! data are markers that start a section, for example `E1M1` followed by the lumps of that level.
//!
//! ## File Structure
//!
//! A WAD file consists of a header, a directory and the lump data.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "IWAD" or "PWAD"                                  |
//! | 0x0004         | Lump Count             | 4 bytes: Number of entries in the directory                |
//! | 0x0008         | Directory Offset       | 4 bytes: Offset of the directory from the start of file    |
//!
//! ### Header
//!
//! - **Magic Number**: `IWAD` for archives holding the complete game data and `PWAD` for archives
//!   patching lumps of another archive, see [`WadKind`].
//! - **Lump Count**: A 4-byte integer indicating the number of directory entries.
//! - **Directory Offset**: A 4-byte integer specifying where the directory starts. Archives written
//!   by this crate place the directory directly after the header.
//!
//! ### Directory
//!
//! The directory holds one entry per lump, in order:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Data Offset            | 4 bytes: Offset of the lump data from the start of file |
//! | 0x0004         | Size                   | 4 bytes: Size of the lump data                          |
//! | 0x0008         | Name                   | 8 bytes: Latin-1 name, padded with zeros                |
//!
//! ### Lump Data
//!
//! The data of the lumps is stored without any framing, only the directory says where a lump
//! starts and how long it is. Pictures inside the lumps are handled by the [`wad_picture`] crate.
//!
//! ## Directory Trees
//!
//! [`Wad::write_to_directory`] unpacks an archive into a directory with one file per lump and a
//! `content.json` manifest, [`Wad::read_from_directory`] builds it again. Pictures can be
//! converted to PNG on the way through a [`CodecRegistry`].
//!
//! ## Additional Information
//!
//! - **File Extension**: `.wad`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod codec;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod read;
pub mod tree;
pub mod types;
pub mod wad;
pub mod write;

pub use codec::{CodecRegistry, ResourceCodec};
pub use read::WadArchive;
pub use tree::ExportOptions;
pub use types::WadKind;
pub use wad::{Lump, Wad};
pub use write::WadWriter;
