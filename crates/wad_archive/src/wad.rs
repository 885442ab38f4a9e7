//! In memory representation of a WAD archive.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};
use tracing::{info, instrument};

use crate::{
    error::Result,
    read::WadArchive,
    types::WadKind,
    write::{WadWriter, WadWriterOptions},
};

/// A named blob of data stored in a WAD archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lump {
    pub name: String,
    pub data: Vec<u8>,
}

impl Lump {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Lump {
        Lump {
            name: name.into(),
            data,
        }
    }

    /// Zero sized lumps mark the start of a section
    pub fn is_marker(&self) -> bool {
        self.data.is_empty()
    }
}

/// An ordered list of lumps
///
/// Unlike [`WadArchive`] the whole archive is held in memory, which is what conversions to and
/// from a directory tree operate on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wad {
    kind: WadKind,
    lumps: Vec<Lump>,
}

impl Wad {
    pub fn new(kind: WadKind) -> Wad {
        Wad {
            kind,
            lumps: Vec::new(),
        }
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: WadKind) {
        self.kind = kind;
    }

    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    /// Append a lump, keeping any existing lump with the same name
    pub fn add_lump(&mut self, lump: Lump) {
        self.lumps.push(lump);
    }

    /// Iterate over every lump with the given name
    pub fn by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Lump> + 'a {
        self.lumps.iter().filter(move |lump| lump.name == name)
    }

    /// Load every lump of an archive into memory
    #[instrument(skip_all, err)]
    pub fn read_from<R: Read + Seek>(reader: R) -> Result<Wad> {
        let mut archive = WadArchive::new(reader)?;

        let mut wad = Wad::new(archive.kind());
        for index in 0..archive.len() {
            let data = archive.read_lump(index)?;
            let name = archive.name_for_index(index).unwrap_or_default();
            wad.add_lump(Lump::new(name, data));
        }

        info!(kind = %wad.kind, lumps = wad.len(), "read wad");
        Ok(wad)
    }

    /// Write the archive, returning the writer once everything has been written
    #[instrument(skip_all, err)]
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut wad = WadWriter::new(
            writer,
            WadWriterOptions::builder().kind(self.kind).build(),
        );

        for lump in &self.lumps {
            wad.start_lump(&lump.name)?;
            wad.write_all(&lump.data)?;
        }

        wad.finish()
    }

    /// Read the archive at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Wad> {
        Wad::read_from(BufReader::new(File::open(path)?))
    }

    /// Write the archive to `path`, replacing an existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write_to(BufWriter::new(File::create(path)?))?.flush()?;
        Ok(())
    }
}
