pub mod build;
pub mod extract;
pub mod list;

#[derive(clap::Subcommand)]
pub enum WadCommands {
    /// Extract a WAD file into a directory
    Extract(extract::ExtractArgs),
    /// Build a WAD file from an extracted directory
    Build(build::BuildArgs),
    /// List the lumps of a WAD file
    List(list::ListArgs),
}

impl WadCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            WadCommands::Extract(extract) => extract.handle(),
            WadCommands::Build(build) => build.handle(),
            WadCommands::List(list) => list.handle(),
        }
    }
}
