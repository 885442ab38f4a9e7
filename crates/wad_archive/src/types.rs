//! Base types for structure of WAD file.

use binrw::{BinRead, BinWrite};
use std::fmt;
use tracing::warn;

use crate::error::{Error, Result};

/// Kind of archive, stored as the 4 byte magic at the start of the file
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum WadKind {
    /// A complete game data archive
    #[default]
    #[brw(magic = b"IWAD")]
    Internal,

    /// An archive patching lumps of another archive
    #[brw(magic = b"PWAD")]
    Patch,
}

impl fmt::Display for WadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WadKind::Internal => f.write_str("IWAD"),
            WadKind::Patch => f.write_str("PWAD"),
        }
    }
}

/// WAD file header
///
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct WadHeader {
    /// Magic identifying the kind of archive
    pub kind: WadKind,

    /// The number of entries in the directory
    pub lumps: u32,

    /// The offset from the beginning of the file where the directory starts
    pub directory_offset: u32,
}

impl WadHeader {
    pub const SIZE: u32 = 12;
}

/// WAD directory entry
///
/// Defines a lump in the WAD file
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct DirectoryEntry {
    /// The offset to the data for this lump from the start of the file
    pub offset: u32,

    /// The size of this lump's data
    pub size: u32,

    /// Name of the lump, padded with zeros
    pub name: [u8; 8],
}

impl DirectoryEntry {
    pub const SIZE: u32 = 16;
}

/// Longest name a lump can have
pub const MAX_NAME_LENGTH: usize = 8;

/// Decode a raw directory name
///
/// Trailing zero bytes are removed and every remaining byte is read as a latin-1 character, so
/// [`encode_name`] reproduces the exact bytes.
pub fn decode_name(raw: &[u8]) -> String {
    let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    raw[..end].iter().map(|b| char::from(*b)).collect()
}

/// Encode a lump name into its zero padded directory representation
///
/// Names longer than [`MAX_NAME_LENGTH`] characters are truncated.
pub fn encode_name(name: &str) -> Result<[u8; MAX_NAME_LENGTH]> {
    let mut raw = [0u8; MAX_NAME_LENGTH];

    let bytes = name
        .chars()
        .map(|c| u8::try_from(c).map_err(|_| Error::InvalidLumpName(name.to_owned())))
        .collect::<Result<Vec<_>>>()?;

    if bytes.len() > MAX_NAME_LENGTH {
        warn!(lump = name, "lump name is longer than {MAX_NAME_LENGTH} characters, truncating");
    }

    let length = bytes.len().min(MAX_NAME_LENGTH);
    raw[..length].copy_from_slice(&bytes[..length]);
    Ok(raw)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::error::{Error, Result};
    use crate::types::{decode_name, encode_name, DirectoryEntry, WadHeader, WadKind};

    #[test]
    fn read_internal_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x49, 0x57, 0x41, 0x44,
            0x02, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
        ]);

        let expected = WadHeader {
            kind: WadKind::Internal,
            lumps: 2,
            directory_offset: 12,
        };

        assert_eq!(WadHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_patch_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x50, 0x57, 0x41, 0x44,
            0x00, 0x00, 0x00, 0x00,
            0x20, 0x01, 0x00, 0x00,
        ]);

        let header = WadHeader::read(&mut input)?;
        assert_eq!(header.kind, WadKind::Patch);
        assert_eq!(header.directory_offset, 0x120);

        Ok(())
    }

    #[test]
    fn read_invalid_magic() {
        let mut input = Cursor::new(b"ZWAD\0\0\0\0\x0C\0\0\0".to_vec());
        assert!(WadHeader::read(&mut input).is_err());
    }

    #[test]
    fn write_header() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x50, 0x57, 0x41, 0x44,
            0x03, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
        ];

        let header = WadHeader {
            kind: WadKind::Patch,
            lumps: 3,
            directory_offset: WadHeader::SIZE,
        };

        let mut output = Cursor::new(Vec::new());
        header.write(&mut output)?;
        assert_eq!(output.into_inner(), expected);

        Ok(())
    }

    #[test]
    fn read_directory_entry() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x1C, 0x00, 0x00, 0x00,
            0x0B, 0x00, 0x00, 0x00,
            0x50, 0x4C, 0x41, 0x59, 0x50, 0x41, 0x4C, 0x00,
        ]);

        let entry = DirectoryEntry::read(&mut input)?;
        assert_eq!(entry.offset, 28);
        assert_eq!(entry.size, 11);
        assert_eq!(decode_name(&entry.name), "PLAYPAL");

        Ok(())
    }

    #[test]
    fn write_directory_entry() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x2C, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x45, 0x31, 0x4D, 0x31, 0x00, 0x00, 0x00, 0x00,
        ];

        let entry = DirectoryEntry {
            offset: 44,
            size: 0,
            name: encode_name("E1M1")?,
        };

        let mut output = Cursor::new(Vec::new());
        entry.write(&mut output)?;
        assert_eq!(output.into_inner(), expected);

        Ok(())
    }

    #[test]
    fn decode_keeps_inner_bytes() {
        assert_eq!(decode_name(b"AB\0CD\0\0\0"), "AB\0CD");
        assert_eq!(decode_name(b"\0\0\0\0\0\0\0\0"), "");
        assert_eq!(decode_name(b"CAF\xC9\0\0\0\0"), "CAF\u{C9}");
        assert_eq!(decode_name(b"FULLNAME"), "FULLNAME");
    }

    #[test]
    fn encode_latin1_name() -> Result<()> {
        assert_eq!(&encode_name("CAF\u{C9}")?, b"CAF\xC9\0\0\0\0");
        assert_eq!(&encode_name("AB\0CD")?, b"AB\0CD\0\0\0");
        Ok(())
    }

    #[test]
    fn encode_rejects_wide_characters() {
        assert!(matches!(
            encode_name("SNOW\u{2603}"),
            Err(Error::InvalidLumpName(name)) if name == "SNOW\u{2603}"
        ));
    }

    #[traced_test]
    #[test]
    fn encode_truncates_long_names() -> Result<()> {
        assert_eq!(&encode_name("TOOLONGNAME")?, b"TOOLONGN");
        assert!(logs_contain("truncating"));
        Ok(())
    }
}
