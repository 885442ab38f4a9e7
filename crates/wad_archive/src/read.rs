//! Types for reading WAD archives
//!

use binrw::BinRead;
use indexmap::IndexMap;
use std::{
    fmt::{self, Debug},
    io::{self, Read, Seek, SeekFrom},
};
use tracing::{debug, instrument};

use crate::{
    error::{Error, LumpNotFoundError, Result},
    types::{decode_name, DirectoryEntry, WadHeader, WadKind},
};

/// A struct for reading a lump from a WAD file
pub struct WadLump<'a, R: Read + Seek> {
    data: &'a LumpData,
    reader: io::Take<&'a mut R>,
}

impl<'a, R: Read + Seek> Debug for WadLump<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WadLump({:#?})", self.data)
    }
}

/// Methods for retrieving information on WAD lump entries
impl<'a, R: Read + Seek> WadLump<'a, R> {
    /// Get the name of the lump
    ///
    /// # Warnings
    ///
    /// Lump names are arbitrary latin-1 strings. They may contain path separators or be `..`,
    /// never use them directly as a file name when extracting an archive.
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Get the name of the lump as stored in the directory
    pub fn name_raw(&self) -> &[u8] {
        &self.data.name_raw
    }

    /// Get the size of the lump, in bytes
    pub fn size(&self) -> u64 {
        self.data.size
    }

    /// Get the starting offset of the lump's data
    pub fn data_start(&self) -> u64 {
        self.data.offset
    }

    /// Whether the lump is a zero sized marker
    pub fn is_marker(&self) -> bool {
        self.data.size == 0
    }
}

impl<R: Read + Seek> Read for WadLump<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

/// Structure representing a WAD directory entry.
#[derive(Debug, Clone, Default)]
pub struct LumpData {
    /// Name of the lump
    pub name: Box<str>,
    /// Raw name, as stored in the directory
    pub name_raw: [u8; 8],
    /// Specifies where the data of the lump starts
    pub offset: u64,
    /// Size of the lump's data
    pub size: u64,
}

#[derive(Debug)]
struct Shared {
    header: WadHeader,
    lumps: Vec<LumpData>,
    indices: IndexMap<Box<str>, Vec<usize>>,
}

/// WAD archive reader
///
/// Lumps are kept in directory order. Names are not unique, level lumps such as `THINGS` appear
/// once per level.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_wad_contents(reader: impl Read + Seek) -> wad_archive::error::Result<()> {
///     let mut wad = wad_archive::WadArchive::new(reader)?;
///
///     for i in 0..wad.len() {
///         let mut lump = wad.by_index(i)?;
///         println!("Lump: {} ({} bytes)", lump.name(), lump.size());
///         std::io::copy(&mut lump, &mut std::io::sink())?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct WadArchive<R> {
    reader: R,
    shared: Shared,
}

impl<R> WadArchive<R> {
    /// Total size of all lumps in the archive
    pub fn data_size(&self) -> u64 {
        self.shared.lumps.iter().map(|lump| lump.size).sum()
    }
}

impl<R: Read + Seek> WadArchive<R> {
    /// Read a WAD archive collecting the lumps it contains.
    #[instrument(skip_all, err)]
    pub fn new(mut reader: R) -> Result<WadArchive<R>> {
        match Self::get_metadata(&mut reader) {
            Ok(shared) => Ok(WadArchive { reader, shared }),
            Err(error) => {
                debug!(%error, "unable to read wad metadata");
                Err(Error::InvalidArchive)
            }
        }
    }

    /// Number of lumps contained in this WAD.
    pub fn len(&self) -> usize {
        self.shared.lumps.len()
    }

    /// Whether this WAD archive contains no lumps
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether this is an `IWAD` or a `PWAD`
    pub fn kind(&self) -> WadKind {
        self.shared.header.kind
    }

    /// Returns an iterator over all lump names in directory order, duplicates included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shared.lumps.iter().map(|lump| lump.name.as_ref())
    }

    /// Returns the directory entries in order
    pub fn lumps(&self) -> &[LumpData] {
        &self.shared.lumps
    }

    /// Get the index of the first lump with the given name, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.indices_for_name(name).first().copied()
    }

    /// Get the indices of every lump with the given name
    pub fn indices_for_name(&self, name: &str) -> &[usize] {
        self.shared
            .indices
            .get(name)
            .map(|indices| indices.as_slice())
            .unwrap_or_default()
    }

    /// Get the name of a lump, if it's present.
    #[inline(always)]
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.shared.lumps.get(index).map(|lump| lump.name.as_ref())
    }

    /// Search for the first lump with the given name
    pub fn by_name(&mut self, name: &str) -> Result<WadLump<'_, R>> {
        let Some(index) = self.index_for_name(name) else {
            return Err(Error::LumpNotFound(LumpNotFoundError::Name(
                name.to_owned(),
            )));
        };
        self.by_index(index)
    }

    /// Get a contained lump by index
    pub fn by_index(&mut self, lump_number: usize) -> Result<WadLump<'_, R>> {
        let data = self
            .shared
            .lumps
            .get(lump_number)
            .ok_or(Error::LumpNotFound(LumpNotFoundError::Index(lump_number)))?;

        self.reader.seek(SeekFrom::Start(data.offset))?;

        Ok(WadLump {
            data,
            reader: (&mut self.reader).take(data.size),
        })
    }

    /// Read the full contents of a lump
    pub fn read_lump(&mut self, lump_number: usize) -> Result<Vec<u8>> {
        let mut lump = self.by_index(lump_number)?;
        let mut buffer = Vec::with_capacity(lump.size() as usize);
        lump.read_to_end(&mut buffer)?;

        if (buffer.len() as u64) < lump.size() {
            return Err(Error::CustomError(format!(
                "lump {} is truncated, expected {} bytes but read {}",
                lump.name(),
                lump.size(),
                buffer.len()
            )));
        }

        Ok(buffer)
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn get_directory(reader: &mut R, header: &WadHeader) -> Result<Vec<DirectoryEntry>> {
        reader.seek(SeekFrom::Start(header.directory_offset as u64))?;

        (0..header.lumps)
            .map(|_| DirectoryEntry::read(reader).map_err(Error::from))
            .collect()
    }

    fn get_metadata(reader: &mut R) -> Result<Shared> {
        let length = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = WadHeader::read(reader)?;
        let directory_end =
            header.directory_offset as u64 + header.lumps as u64 * DirectoryEntry::SIZE as u64;
        if directory_end > length {
            return Err(Error::CustomError(format!(
                "directory ends at {directory_end} but the file is only {length} bytes"
            )));
        }

        let entries = Self::get_directory(reader, &header)?;

        let mut lumps = Vec::with_capacity(entries.len());
        let mut indices: IndexMap<Box<str>, Vec<usize>> = IndexMap::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let lump = LumpData {
                name: decode_name(&entry.name).into(),
                name_raw: entry.name,
                offset: entry.offset as u64,
                size: entry.size as u64,
            };

            if lump.offset + lump.size > length {
                return Err(Error::CustomError(format!(
                    "lump {} at {} with {} bytes lies outside of the file",
                    lump.name, lump.offset, lump.size
                )));
            }

            indices.entry(lump.name.clone()).or_default().push(index);
            lumps.push(lump);
        }

        Ok(Shared {
            header,
            lumps,
            indices,
        })
    }
}
