use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;
use wad_picture::PictureCodec;

use crate::commands::{create_output, picture::lump_name, PaletteArgs};

#[derive(Args)]
pub struct DecodeArgs {
    /// An input picture lump
    #[arg(short, long, value_name = "LUMP")]
    input: PathBuf,

    /// A target PNG image
    #[arg(short, long, value_name = "PNG")]
    output: PathBuf,

    #[command(flatten)]
    palette: PaletteArgs,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecodeArgs {
    pub fn handle(&self) -> Result<()> {
        let lump = std::fs::read(&self.input)
            .into_diagnostic()
            .context(format!("path: {}", &self.input.display()))?;

        let codec = PictureCodec::new(self.palette.load()?);
        let png = codec
            .decode_resource(&lump_name(&self.input), &lump)
            .context(format!("decoding {}", self.input.display()))?;

        info!("writing {}", self.output.display());
        create_output(&self.output, self.overwrite)?
            .write_all(&png)
            .into_diagnostic()?;

        Ok(())
    }
}
