//! Conversion between a [`Wad`] and an editable directory tree.
//!
//! An exported archive looks like this:
//!
//! ```text
//! outdir/
//! ├── content.json
//! └── files/
//!     ├── nosection/playpal
//!     ├── level/E1M1/things
//!     └── gfx/titlepic.png
//! ```
//!
//! `content.json` lists every lump in directory order, so building the archive again reproduces
//! the original lump order and duplicate names.

use bon::Builder;
use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Component, Path},
};
use tracing::{debug, info, instrument};

use crate::{
    codec::CodecRegistry,
    error::{Error, Result},
    manifest::{load_manifest, save_manifest, ManifestEntry, FILES_DIR, MANIFEST_NAME},
    naming::{Classifier, Filenames},
    types::WadKind,
    wad::{Lump, Wad},
};

/// Options for how an archive is exported
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct ExportOptions {
    /// Convert pictures to PNG images
    #[builder(default)]
    pub decode: bool,

    /// Replace files already present in the output directory
    #[builder(default)]
    pub overwrite: bool,
}

impl Wad {
    /// Export every lump into `outdir` and describe them in `content.json`
    ///
    /// The first lump that fails to convert aborts the export.
    #[instrument(skip_all, err, fields(outdir = %outdir.as_ref().display(), decode = options.decode))]
    pub fn write_to_directory(
        &self,
        outdir: impl AsRef<Path>,
        registry: &CodecRegistry,
        options: &ExportOptions,
    ) -> Result<()> {
        let outdir = outdir.as_ref();
        let files_dir = outdir.join(FILES_DIR);
        fs::create_dir_all(outdir)?;

        let manifest = outdir.join(MANIFEST_NAME);
        if !options.overwrite && manifest.exists() {
            return Err(Error::CustomError(format!(
                "{} already exists",
                manifest.display()
            )));
        }

        let mut classifier = Classifier::new();
        let mut filenames = Filenames::new();
        let mut entries = Vec::with_capacity(self.len());

        for lump in self.lumps() {
            if lump.is_marker() {
                classifier.enter_section(&lump.name);
                entries.push(ManifestEntry::marker(&lump.name));
                continue;
            }

            let placement = classifier.classify(&lump.name, options.decode);
            let filename = filenames.generate(&placement.template, placement.extension)?;
            debug!(lump = %lump.name, %filename, "exporting lump");

            let mut entry = ManifestEntry::file(&lump.name, &filename);
            let decoded;
            let data = match placement.codec {
                Some(codec) => {
                    decoded = registry.decode_resource(codec, &lump.name, &lump.data)?;
                    entry.encoder = Some(codec.to_owned());
                    &decoded
                }
                None => &lump.data,
            };

            let path = files_dir.join(&filename);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            create_file(&path, options.overwrite)?.write_all(data)?;

            entries.push(entry);
        }

        save_manifest(&manifest, &entries)?;

        info!(lumps = entries.len(), "exported wad");
        Ok(())
    }

    /// Build an archive from a directory previously written by [`Wad::write_to_directory`]
    ///
    /// Lumps with an `encoder` are converted back through `registry`. The archive kind is not
    /// part of the manifest, the result is an `IWAD`.
    #[instrument(skip_all, err, fields(dir = %dir.as_ref().display()))]
    pub fn read_from_directory(dir: impl AsRef<Path>, registry: &CodecRegistry) -> Result<Wad> {
        let dir = dir.as_ref();
        let entries = load_manifest(&dir.join(MANIFEST_NAME))?;
        let files_dir = dir.join(FILES_DIR);

        let mut wad = Wad::new(WadKind::Internal);
        for entry in entries {
            let data = if entry.is_virtual {
                Vec::new()
            } else {
                let filename = entry
                    .filename
                    .as_deref()
                    .ok_or_else(|| Error::MissingFilename(entry.name.clone()))?;
                let path = files_dir.join(checked_filename(&entry.name, filename)?);
                fs::read(path).map_err(|source| Error::Resource {
                    name: entry.name.clone(),
                    source: Box::new(source.into()),
                })?
            };

            let data = match entry.encoder.as_deref() {
                Some(codec) if !data.is_empty() => {
                    registry.encode_resource(codec, &entry.name, &data)?
                }
                _ => data,
            };

            wad.add_lump(Lump::new(entry.name, data));
        }

        info!(lumps = wad.len(), "imported wad");
        Ok(wad)
    }
}

fn create_file(path: &Path, overwrite: bool) -> Result<File> {
    let file = if overwrite {
        File::create(path)?
    } else {
        OpenOptions::new().write(true).create_new(true).open(path)?
    };
    Ok(file)
}

/// Manifest file names must stay inside the `files` directory
fn checked_filename<'a>(lump: &str, filename: &'a str) -> Result<&'a Path> {
    let path = Path::new(filename);
    if path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
        Ok(path)
    } else {
        Err(Error::UnsafeFilename {
            name: lump.to_owned(),
            filename: filename.to_owned(),
        })
    }
}
