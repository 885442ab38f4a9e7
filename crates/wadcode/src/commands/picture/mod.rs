pub mod decode;
pub mod encode;
pub mod info;

#[derive(clap::Subcommand)]
pub enum PictureCommands {
    /// Convert a picture lump into a PNG image
    Decode(decode::DecodeArgs),
    /// Convert a PNG image into a picture lump
    Encode(encode::EncodeArgs),
    /// Show the header of a picture lump
    Info(info::InfoArgs),
}

impl PictureCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            PictureCommands::Decode(decode) => decode.handle(),
            PictureCommands::Encode(encode) => encode.handle(),
            PictureCommands::Info(info) => info.handle(),
        }
    }
}

/// Name used for a lump read from a loose file
fn lump_name(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use crate::commands::picture::lump_name;

    #[test]
    fn lump_names_come_from_the_file_stem() {
        assert_eq!(lump_name(Path::new("gfx/titlepic.png")), "TITLEPIC");
        assert_eq!(lump_name(Path::new("STFST01.lmp")), "STFST01");
        assert_eq!(lump_name(Path::new("")), "");
    }
}
