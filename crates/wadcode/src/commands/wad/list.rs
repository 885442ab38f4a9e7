use clap::Args;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, io::BufReader, path::PathBuf};
use wad_archive::{naming::is_level_marker, WadArchive};

#[derive(Args)]
pub struct ListArgs {
    /// An input WAD file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let wad = WadArchive::new(BufReader::new(f))?;

        println!(
            "{} with {} lumps, {} bytes of data",
            wad.kind().bold(),
            wad.len(),
            wad.data_size()
        );

        for (index, lump) in wad.lumps().iter().enumerate() {
            let name = format!("{:<8}", lump.name);
            if lump.size == 0 && is_level_marker(&lump.name) {
                println!("{index:>5} {}", name.green());
            } else if lump.size == 0 {
                println!("{index:>5} {}", name.yellow());
            } else {
                println!(
                    "{index:>5} {name} {:>10} {:>10}",
                    lump.offset, lump.size
                );
            }
        }

        let duplicates = wad.names().duplicates().sorted().join(", ");
        if !duplicates.is_empty() {
            println!("duplicate names: {}", duplicates.blue());
        }

        Ok(())
    }
}
