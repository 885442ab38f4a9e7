//! Types for writing WAD archives
//!

use binrw::BinWrite;
use bon::Builder;
use std::io::{self, Cursor, Seek, Write};
use tracing::{instrument, Level};

use crate::error::{Error, Result};
use crate::types::{encode_name, DirectoryEntry, WadHeader, WadKind};

/// Options for how the WAD file should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct WadWriterOptions {
    /// The magic written to the header
    #[builder(default)]
    pub kind: WadKind,
}

/// WAD archive generator
///
/// The directory is written directly after the header, followed by the lump data in the order
/// the lumps were started.
///
/// ```
/// # fn doit() -> wad_archive::error::Result<()>
/// # {
/// # use wad_archive::WadWriter;
/// use std::io::Write;
/// use wad_archive::{write::WadWriterOptions, WadKind};
///
/// // We use a buffer here, though you'd normally use a `File`
/// let mut wad = WadWriter::new(
///     std::io::Cursor::new(Vec::new()),
///     WadWriterOptions::builder().kind(WadKind::Patch).build(),
/// );
///
/// wad.start_lump("MAP01")?;
/// wad.start_lump("THINGS")?;
/// wad.write_all(b"Hello, World!")?;
///
/// // Apply the changes you've made.
/// wad.finish()?;
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct WadWriter<W: Write + Seek> {
    inner: W,
    writing_to_lump: bool,
    data_block: Cursor<Vec<u8>>,
    entries: Vec<DirectoryEntry>,
    header: WadHeader,
}

impl<W: Write + Seek> WadWriter<W> {
    /// Initializes the archive.
    ///
    /// Before writing to this object, the [`WadWriter::start_lump`] function should be called.
    pub fn new(inner: W, options: WadWriterOptions) -> WadWriter<W> {
        WadWriter {
            inner,
            writing_to_lump: false,
            data_block: Cursor::new(Vec::new()),
            entries: Vec::new(),
            header: WadHeader {
                kind: options.kind,
                lumps: 0,
                directory_offset: WadHeader::SIZE,
            },
        }
    }

    /// Returns true if a lump is currently open for writing.
    pub const fn is_writing_lump(&self) -> bool {
        self.writing_to_lump
    }

    /// Start a new lump, finishing the previous one
    ///
    /// A lump nothing is written to becomes a zero sized marker.
    #[instrument(skip(self, name), fields(name = name.as_ref()), err)]
    pub fn start_lump(&mut self, name: impl AsRef<str>) -> Result<()> {
        if self.writing_to_lump {
            self.finish_lump()?;
        }

        let offset = u32::try_from(self.data_block.position())
            .map_err(|_| too_large())?;

        self.entries.push(DirectoryEntry {
            offset,
            size: 0,
            name: encode_name(name.as_ref())?,
        });

        self.header.lumps += 1;
        self.writing_to_lump = true;

        Ok(())
    }

    #[instrument(skip(self), err)]
    fn finish_lump(&mut self) -> Result<()> {
        let end = u32::try_from(self.data_block.position())
            .map_err(|_| too_large())?;

        if let Some(entry) = self.entries.last_mut() {
            entry.size = end - entry.offset;
        }

        self.writing_to_lump = false;

        Ok(())
    }

    /// Finish the last lump and write all WAD structures
    ///
    /// This will return the writer, but one should normally not append any data to the end of the file.
    #[instrument(skip(self), err)]
    pub fn finish(mut self) -> Result<W> {
        if self.writing_to_lump {
            self.finish_lump()?;
        }

        let data_start = data_start(self.header.lumps)?;

        self.header.write(&mut self.inner)?;
        for entry in &self.entries {
            DirectoryEntry {
                offset: data_start.checked_add(entry.offset).ok_or_else(too_large)?,
                ..*entry
            }
            .write(&mut self.inner)?;
        }
        self.inner.write_all(self.data_block.get_ref())?;

        Ok(self.inner)
    }
}

/// Absolute offset of the lump data, which follows the header and `lumps` directory entries
fn data_start(lumps: u32) -> Result<u32> {
    lumps
        .checked_mul(DirectoryEntry::SIZE)
        .and_then(|directory| directory.checked_add(WadHeader::SIZE))
        .ok_or_else(too_large)
}

fn too_large() -> Error {
    Error::CustomError("wad archives are limited to 4 GiB".into())
}

impl<W: Write + Seek> Write for WadWriter<W> {
    #[instrument(skip_all, err, ret(level = Level::TRACE), fields(size=buf.len()) )]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.writing_to_lump {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "No lump has been started",
            ));
        }
        self.data_block.write(buf)
    }

    #[instrument(skip(self), err)]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
