use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};
use tracing::{info, warn};
use wad_archive::{CodecRegistry, Wad, WadKind};

use crate::commands::{create_output, PaletteArgs};

#[derive(Args)]
pub struct BuildArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target WAD file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    #[command(flatten)]
    palette: PaletteArgs,

    /// Write a PWAD instead of an IWAD
    #[arg(long, default_value_t = false)]
    pwad: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl BuildArgs {
    pub fn handle(&self) -> Result<()> {
        let registry = if self.palette.path().exists() {
            CodecRegistry::with_defaults(self.palette.load()?)
        } else {
            warn!(
                "palette {} not found, pictures can not be encoded",
                self.palette.path().display()
            );
            CodecRegistry::new()
        };

        let mut wad = Wad::read_from_directory(&self.directory, &registry)
            .context(format!("reading {}", self.directory.display()))?;
        if self.pwad {
            wad.set_kind(WadKind::Patch);
        }

        info!("creating {}", &self.file.display());
        let out = create_output(&self.file, self.overwrite)?;
        wad.write_to(BufWriter::new(out))
            .context("finalizing wad file")?
            .flush()
            .into_diagnostic()?;

        Ok(())
    }
}
