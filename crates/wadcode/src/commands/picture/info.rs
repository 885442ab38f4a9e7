use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use wad_picture::decode::read_header;

#[derive(Args)]
pub struct InfoArgs {
    /// An input picture lump
    #[arg(short, long, value_name = "LUMP")]
    input: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let lump = std::fs::read(&self.input)
            .into_diagnostic()
            .context(format!("path: {}", &self.input.display()))?;

        let header = read_header(&lump).context(format!("reading {}", self.input.display()))?;
        println!(
            "{}x{} picture, offset {},{}, {} bytes",
            header.width.bold(),
            header.height.bold(),
            header.offset_x,
            header.offset_y,
            lump.len()
        );

        Ok(())
    }
}
