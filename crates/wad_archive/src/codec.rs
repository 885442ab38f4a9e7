//! Named converters between lump data and editable files.

use indexmap::IndexMap;
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};
use wad_picture::{Palette, PictureCodec};

use crate::error::{Error, Result};

/// Converts the data of a lump into a file an editor understands and back
pub trait ResourceCodec: Send + Sync {
    /// Name recorded in the manifest for lumps converted by this codec
    fn name(&self) -> &str;

    /// Convert lump data into file contents
    fn decode_resource(&self, name: &str, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Convert file contents back into lump data
    fn encode_resource(&self, name: &str, bytes: &[u8]) -> Result<Vec<u8>>;
}

impl ResourceCodec for PictureCodec {
    fn name(&self) -> &str {
        PictureCodec::NAME
    }

    fn decode_resource(&self, name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(PictureCodec::decode_resource(self, name, bytes)?)
    }

    fn encode_resource(&self, name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(PictureCodec::encode_resource(self, name, bytes)?)
    }
}

/// Lookup table of codecs by name
#[derive(Default)]
pub struct CodecRegistry {
    codecs: IndexMap<String, Box<dyn ResourceCodec>>,
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.codecs.keys()).finish()
    }
}

impl CodecRegistry {
    /// A registry without any codec, lumps can only be copied verbatim
    pub fn new() -> CodecRegistry {
        CodecRegistry::default()
    }

    /// A registry holding the picture codec for `palette`
    pub fn with_defaults(palette: Arc<Palette>) -> CodecRegistry {
        let mut registry = CodecRegistry::new();
        registry.register(PictureCodec::new(palette));
        registry
    }

    /// Add a codec, replacing any codec registered under the same name
    pub fn register(&mut self, codec: impl ResourceCodec + 'static) -> &mut Self {
        debug!(codec = codec.name(), "registering codec");
        self.codecs.insert(codec.name().to_owned(), Box::new(codec));
        self
    }

    pub fn contains(&self, codec: &str) -> bool {
        self.codecs.contains_key(codec)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(|name| name.as_str())
    }

    pub fn get(&self, codec: &str) -> Result<&dyn ResourceCodec> {
        self.codecs
            .get(codec)
            .map(|codec| codec.as_ref())
            .ok_or_else(|| Error::UnknownCodec(codec.to_owned()))
    }

    /// Decode lump `name` with `codec`
    ///
    /// Failures are wrapped in [`Error::Resource`] naming the lump.
    #[instrument(skip(self, bytes), err)]
    pub fn decode_resource(&self, codec: &str, name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        self.get(codec)?
            .decode_resource(name, bytes)
            .map_err(|source| Error::Resource {
                name: name.to_owned(),
                source: Box::new(source),
            })
    }

    /// Encode the file contents of lump `name` with `codec`
    ///
    /// Failures are wrapped in [`Error::Resource`] naming the lump.
    #[instrument(skip(self, bytes), err)]
    pub fn encode_resource(&self, codec: &str, name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        self.get(codec)?
            .encode_resource(name, bytes)
            .map_err(|source| Error::Resource {
                name: name.to_owned(),
                source: Box::new(source),
            })
    }
}
