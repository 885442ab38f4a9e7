//! File naming for lumps exported into a directory tree.
//!
//! Lumps are sorted into sub directories by a few heuristics on their name and the section
//! marker preceding them. Since lump names repeat, every generated name is made unique.

use indexmap::IndexSet;
use wad_picture::PictureCodec;

use crate::error::{Error, Result};

const LEVEL_LUMPS: [&str; 10] = [
    "things", "linedefs", "sidedefs", "vertexes", "segs", "ssectors", "nodes", "sectors",
    "reject", "blockmap",
];

const FACE_PREFIXES: [&str; 6] = ["stfdead", "stfkill", "stfouch", "stfst", "stftl", "stftr"];

const GRAPHIC_PREFIXES: [&str; 1] = ["titlepic"];

/// Number of suffixed names tried after the plain template
const MAX_SUFFIX: usize = 999;

/// Hands out unique file names
#[derive(Debug, Default)]
pub struct Filenames {
    names: IndexSet<String>,
}

impl Filenames {
    pub fn new() -> Filenames {
        Filenames::default()
    }

    /// Return `template` + `extension`, or the first free `template_NNN` + `extension`
    pub fn generate(&mut self, template: &str, extension: &str) -> Result<String> {
        let candidates = std::iter::once(format!("{template}{extension}")).chain(
            (1..=MAX_SUFFIX).map(|i| format!("{template}_{i:03}{extension}")),
        );

        for name in candidates {
            if !self.names.contains(&name) {
                self.names.insert(name.clone());
                return Ok(name);
            }
        }

        Err(Error::FilenamesExhausted(format!("{template}{extension}")))
    }

    /// Names handed out so far, in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| name.as_str())
    }
}

/// Where a lump ends up in the tree and whether it goes through a codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Relative file name without extension
    pub template: String,
    pub extension: &'static str,
    pub codec: Option<&'static str>,
}

/// Tracks the current section while walking lumps in directory order
#[derive(Debug, Default)]
pub struct Classifier {
    section: Option<String>,
}

impl Classifier {
    pub fn new() -> Classifier {
        Classifier::default()
    }

    /// A marker lump starts a new section
    pub fn enter_section(&mut self, marker: &str) {
        self.section = Some(marker.to_owned());
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Pick the placement of a lump with data
    ///
    /// Pictures are only routed to a codec when `decode` is set.
    pub fn classify(&self, name: &str, decode: bool) -> Placement {
        let template = file_stem(name);
        let placement =
            |directory: &str, extension: &'static str, codec: Option<&'static str>| Placement {
                template: format!("{directory}/{template}"),
                extension,
                codec,
            };

        if template.starts_with("stcfn") {
            return placement("font_small", "", None);
        }

        if let Some(section) = self.section.as_deref().filter(|s| is_level_marker(s)) {
            if LEVEL_LUMPS.contains(&template.as_str()) {
                return placement(&format!("level/{}", file_stem_keep_case(section)), "", None);
            }
        }

        if decode && FACE_PREFIXES.iter().any(|p| template.starts_with(p)) {
            return placement("face", ".png", Some(PictureCodec::NAME));
        }

        if decode && GRAPHIC_PREFIXES.iter().any(|p| template.starts_with(p)) {
            return placement("gfx", ".png", Some(PictureCodec::NAME));
        }

        match self.section {
            None => placement("nosection", "", None),
            Some(_) => placement("other", "", None),
        }
    }
}

/// `ExMy` and `MAPxx` markers start the lumps of a level
pub fn is_level_marker(marker: &str) -> bool {
    match marker.as_bytes() {
        [b'E', episode, b'M', map] => episode.is_ascii_digit() && map.is_ascii_digit(),
        [b'M', b'A', b'P', tens, ones] => tens.is_ascii_digit() && ones.is_ascii_digit(),
        _ => false,
    }
}

/// Lower cased lump name usable as a single path component
fn file_stem(name: &str) -> String {
    file_stem_keep_case(&name.to_lowercase())
}

/// Characters that could escape the output directory are replaced with `_`
fn file_stem_keep_case(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' | ':' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        "_".to_owned()
    } else {
        stem
    }
}
