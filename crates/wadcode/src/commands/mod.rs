use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::Path, path::PathBuf, sync::Arc};
use tracing::info;
use wad_picture::Palette;

pub mod picture;
pub mod wad;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle WAD files
    Wad {
        #[command(subcommand)]
        command: wad::WadCommands,
    },
    /// Handle single picture lumps
    Picture {
        #[command(subcommand)]
        command: picture::PictureCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Wad { command } => command.handle(),
            Commands::Picture { command } => command.handle(),
        }
    }
}

/// Where the colors of pictures come from
#[derive(Args)]
pub struct PaletteArgs {
    /// A JSON array of "RRGGBB" colors
    #[arg(
        long,
        value_name = "FILE",
        env = "WADCODE_PALETTE",
        default_value = "palette.json"
    )]
    palette: PathBuf,
}

impl PaletteArgs {
    pub fn path(&self) -> &Path {
        &self.palette
    }

    pub fn load(&self) -> Result<Arc<Palette>> {
        info!("loading palette {}", self.palette.display());
        let palette = Palette::from_json_file(&self.palette)
            .context(format!("loading palette {}", self.palette.display()))?;
        Ok(Arc::new(palette))
    }
}

/// Create `path`, failing if it exists unless `overwrite` is set
pub fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    }
}
