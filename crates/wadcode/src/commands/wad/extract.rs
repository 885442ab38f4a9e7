use clap::Args;
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use wad_archive::{CodecRegistry, ExportOptions, Wad};

use crate::commands::PaletteArgs;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input WAD file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Convert pictures to PNG images
    #[arg(long, default_value_t = false)]
    decode: bool,

    #[command(flatten)]
    palette: PaletteArgs,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let wad = Wad::open(&self.file).context(format!("path: {}", &self.file.display()))?;

        let registry = if self.decode {
            CodecRegistry::with_defaults(self.palette.load()?)
        } else {
            CodecRegistry::new()
        };

        info!(
            "extracting {} lumps into {}",
            wad.len(),
            self.directory.display()
        );
        wad.write_to_directory(
            &self.directory,
            &registry,
            &ExportOptions::builder()
                .decode(self.decode)
                .overwrite(self.overwrite)
                .build(),
        )
        .context(format!("extracting into {}", self.directory.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use std::path::Path;

    use crate::commands::{test::TestCli, wad::WadCommands, Commands};

    #[test]
    fn parse_extract() {
        let cli = TestCli::parse_from([
            "wadcode", "wad", "extract", "-f", "doom.wad", "-d", "out", "--decode",
            "--palette", "doom.json",
        ]);

        let Commands::Wad {
            command: WadCommands::Extract(args),
        } = cli.command
        else {
            panic!("expected wad extract");
        };
        assert!(args.decode);
        assert!(!args.overwrite);
        assert_eq!(args.file, Path::new("doom.wad"));
        assert_eq!(args.palette.path(), Path::new("doom.json"));
    }
}
