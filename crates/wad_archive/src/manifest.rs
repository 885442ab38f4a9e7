//! The `content.json` manifest describing an exported archive.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::instrument;

use crate::error::Result;

/// File name of the manifest inside an exported directory
pub const MANIFEST_NAME: &str = "content.json";

/// Directory holding the lump files inside an exported directory
pub const FILES_DIR: &str = "files";

/// One lump of the archive, in directory order
///
/// Fields are declared alphabetically so the serialized keys come out sorted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Codec the file was decoded with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,

    /// Path of the lump's file, relative to the files directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    pub name: String,

    /// Marker lumps have no data and no file
    #[serde(
        default,
        rename = "virtual",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_virtual: bool,
}

impl ManifestEntry {
    pub fn marker(name: impl Into<String>) -> ManifestEntry {
        ManifestEntry {
            name: name.into(),
            is_virtual: true,
            ..Default::default()
        }
    }

    pub fn file(name: impl Into<String>, filename: impl Into<String>) -> ManifestEntry {
        ManifestEntry {
            name: name.into(),
            filename: Some(filename.into()),
            ..Default::default()
        }
    }
}

/// Parse a manifest
pub fn read_manifest<R: Read>(reader: R) -> Result<Vec<ManifestEntry>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Serialize a manifest with an indentation of four spaces
pub fn write_manifest<W: Write>(writer: W, entries: &[ManifestEntry]) -> Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    entries.serialize(&mut serializer)?;
    Ok(())
}

#[instrument(err)]
pub fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    read_manifest(BufReader::new(File::open(path)?))
}

#[instrument(skip(entries), err, fields(entries = entries.len()))]
pub fn save_manifest(path: &Path, entries: &[ManifestEntry]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_manifest(&mut writer, entries)?;
    writer.flush()?;
    Ok(())
}
