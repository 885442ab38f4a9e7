use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;
use wad_picture::{EncodeOptions, PictureCodec, PointerBase};

use crate::commands::{create_output, picture::lump_name, PaletteArgs};

#[derive(Args)]
pub struct EncodeArgs {
    /// An input PNG image
    #[arg(short, long, value_name = "PNG")]
    input: PathBuf,

    /// A target picture lump
    #[arg(short, long, value_name = "LUMP")]
    output: PathBuf,

    #[command(flatten)]
    palette: PaletteArgs,

    /// Reject pixels that are neither opaque nor fully transparent
    #[arg(long, default_value_t = false)]
    strict_alpha: bool,

    /// Store column pointers relative to the start of the lump
    #[arg(long, default_value_t = false)]
    absolute_pointers: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl EncodeArgs {
    pub fn handle(&self) -> Result<()> {
        let png = std::fs::read(&self.input)
            .into_diagnostic()
            .context(format!("path: {}", &self.input.display()))?;

        let options = EncodeOptions::builder()
            .strict_alpha(self.strict_alpha)
            .pointer_base(if self.absolute_pointers {
                PointerBase::Absolute
            } else {
                PointerBase::ColumnData
            })
            .build();
        let codec = PictureCodec::with_options(self.palette.load()?, options);

        let lump = codec
            .encode_resource(&lump_name(&self.input), &png)
            .context(format!("encoding {}", self.input.display()))?;

        info!("writing {} bytes to {}", lump.len(), self.output.display());
        create_output(&self.output, self.overwrite)?
            .write_all(&lump)
            .into_diagnostic()?;

        Ok(())
    }
}
