//! Resource level entry points converting between picture lumps and PNG files.

use std::{io::Cursor, sync::Arc};
use tracing::instrument;

use crate::{
    decode::decode,
    encode::{encode_with_options, EncodeOptions},
    error::Result,
    palette::Palette,
    raster::{read_png, write_png},
};

/// Converts picture lumps to PNG images and back
///
/// The codec holds a shared reference to the palette, cloning it is cheap.
#[derive(Debug, Clone)]
pub struct PictureCodec {
    palette: Arc<Palette>,
    options: EncodeOptions,
}

impl PictureCodec {
    /// Name the codec is registered under in archive manifests
    pub const NAME: &'static str = "image";

    pub fn new(palette: Arc<Palette>) -> PictureCodec {
        Self::with_options(palette, EncodeOptions::default())
    }

    pub fn with_options(palette: Arc<Palette>, options: EncodeOptions) -> PictureCodec {
        PictureCodec { palette, options }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Decode the picture lump `bytes` into a PNG image
    #[instrument(skip(self, bytes), err, fields(size = bytes.len()))]
    pub fn decode_resource(&self, name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        let picture = decode(bytes, &self.palette)?;

        let mut png = Vec::new();
        write_png(&picture, &mut png)?;
        Ok(png)
    }

    /// Encode the PNG image `bytes` into a picture lump
    #[instrument(skip(self, bytes), err, fields(size = bytes.len()))]
    pub fn encode_resource(&self, name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        let picture = read_png(Cursor::new(bytes), self.options.strict_alpha)?;
        encode_with_options(&picture, &self.palette, &self.options)
    }
}
