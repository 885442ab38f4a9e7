//! Palette used to map between picture pixels and palette indices.

use derive_more::{Display, From};
use std::{collections::HashMap, fs::File, io::BufReader, io::Read, path::Path, str::FromStr};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// A color without alpha
#[derive(Display, From, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[display("{_0:02X}{_1:02X}{_2:02X}")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Squared euclidean distance between two colors
    pub fn distance(self, other: Rgb) -> u32 {
        let channel = |a: u8, b: u8| (a as i32 - b as i32).pow(2) as u32;
        channel(self.0, other.0) + channel(self.1, other.1) + channel(self.2, other.2)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parses an `RRGGBB` hex string
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 6 || !s.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_owned()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|_| Error::InvalidColor(s.to_owned()))
        };

        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Ordered set of colors that palette indices refer to
///
/// A palette never changes after construction, so a single instance can be shared between any
/// number of encoders and decoders.
///
/// ```
/// use wad_picture::palette::{Palette, Rgb};
///
/// let palette = Palette::from_hex_strings(["000000", "FFFFFF"])?;
/// assert_eq!(palette.nearest_index(Rgb(10, 10, 10)), 0);
/// assert_eq!(palette.color_at(1)?, Rgb(255, 255, 255));
/// # Ok::<(), wad_picture::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
    index_by_color: HashMap<Rgb, u8>,
}

impl Palette {
    /// Largest palette whose indices still fit into a span
    pub const MAX_COLORS: usize = 256;

    /// Create a palette from a list of colors
    pub fn new(colors: Vec<Rgb>) -> Result<Palette> {
        if colors.is_empty() || colors.len() > Self::MAX_COLORS {
            return Err(Error::InvalidPaletteSize(colors.len()));
        }

        let mut index_by_color = HashMap::with_capacity(colors.len());
        for (index, color) in colors.iter().enumerate() {
            index_by_color.entry(*color).or_insert(index as u8);
        }

        Ok(Palette {
            colors,
            index_by_color,
        })
    }

    /// Create a palette from `RRGGBB` strings
    pub fn from_hex_strings<I>(colors: I) -> Result<Palette>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let colors = colors
            .into_iter()
            .map(|c| Rgb::from_str(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Read a palette from a JSON array of `RRGGBB` strings
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Palette> {
        let colors: Vec<String> = serde_json::from_reader(reader)?;
        Self::from_hex_strings(colors)
    }

    /// Load a palette from a JSON file
    #[instrument(skip_all, err, fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Palette> {
        let palette = Self::from_json_reader(BufReader::new(File::open(path.as_ref())?))?;
        debug!("loaded {} colors", palette.len());
        Ok(palette)
    }

    /// Number of colors in the palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, a palette holds at least one color
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors in index order
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Get the color stored at `index`
    pub fn color_at(&self, index: usize) -> Result<Rgb> {
        self.colors
            .get(index)
            .copied()
            .ok_or(Error::PaletteIndexOutOfRange {
                index,
                len: self.colors.len(),
            })
    }

    /// Get the index of the color closest to `rgb`
    ///
    /// Exact matches resolve to the lowest index holding that color. Any other color resolves to
    /// the entry with the smallest euclidean distance, preferring the lowest index on ties.
    pub fn nearest_index(&self, rgb: Rgb) -> u8 {
        if let Some(index) = self.index_by_color.get(&rgb) {
            return *index;
        }

        let mut best_index = 0;
        let mut best_error = rgb.distance(self.colors[0]);
        for (index, color) in self.colors.iter().enumerate().skip(1) {
            let error = rgb.distance(*color);
            if error < best_error {
                best_error = error;
                best_index = index;
            }
        }
        best_index as u8
    }
}
