//! Conversion between [`Picture`] and PNG images.

use png::{BitDepth, ColorType, Transformations};
use std::io::{Read, Write};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    picture::Picture,
};

/// Read a PNG image of any color type
///
/// Images are normalized to 8 bit RGBA first, see [`Picture::from_rgba`] for how alpha is
/// interpreted.
#[instrument(skip_all, err)]
pub fn read_png<R: Read>(reader: R, strict_alpha: bool) -> Result<Picture> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    let data = &buffer[..info.buffer_size()];

    let rgba = expand_to_rgba(info.color_type, data)?;
    Picture::from_rgba(info.width, info.height, &rgba, strict_alpha)
}

/// Convert 8 bit pixel data of a non indexed color type to RGBA
fn expand_to_rgba(color_type: ColorType, data: &[u8]) -> Result<Vec<u8>> {
    let rgba = match color_type {
        ColorType::Rgba => data.to_vec(),
        ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 0xFF])
            .collect(),
        ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        ColorType::Grayscale => data.iter().flat_map(|g| [*g, *g, *g, 0xFF]).collect(),
        ColorType::Indexed => return Err(Error::UnsupportedColorType(color_type)),
    };
    Ok(rgba)
}

/// Write `picture` as an 8 bit RGBA PNG image
#[instrument(skip_all, err, fields(width = picture.width(), height = picture.height()))]
pub fn write_png<W: Write>(picture: &Picture, writer: W) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, picture.width(), picture.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&picture.to_rgba())?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    use crate::error::{Error, Result};
    use crate::palette::Rgb;
    use crate::picture::Picture;
    use crate::raster::{expand_to_rgba, read_png, write_png};

    #[test]
    fn png_round_trip() -> Result<()> {
        let mut picture = Picture::new(3, 2);
        picture.set(0, 0, Some(Rgb(1, 2, 3)));
        picture.set(2, 1, Some(Rgb(200, 100, 50)));

        let mut encoded = Vec::new();
        write_png(&picture, &mut encoded)?;
        assert_eq!(&encoded[1..4], b"PNG");

        assert_eq!(read_png(Cursor::new(encoded), true)?, picture);

        Ok(())
    }

    #[test]
    fn read_rgb_png_is_opaque() -> Result<()> {
        let mut encoded = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut encoded, 2, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&[10, 20, 30, 40, 50, 60])?;
        }

        let picture = read_png(Cursor::new(encoded), false)?;
        assert_eq!(picture.get(0, 0), Some(Rgb(10, 20, 30)));
        assert_eq!(picture.get(1, 0), Some(Rgb(40, 50, 60)));

        Ok(())
    }

    #[test]
    fn read_grayscale_alpha_png() -> Result<()> {
        let mut encoded = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut encoded, 2, 1);
            encoder.set_color(png::ColorType::GrayscaleAlpha);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&[77, 255, 99, 0])?;
        }

        let picture = read_png(Cursor::new(encoded), false)?;
        assert_eq!(picture.get(0, 0), Some(Rgb(77, 77, 77)));
        assert_eq!(picture.get(1, 0), None);

        Ok(())
    }

    #[test]
    fn indexed_pixels_are_not_expanded() -> Result<()> {
        assert!(matches!(
            expand_to_rgba(png::ColorType::Indexed, &[0, 1]),
            Err(Error::UnsupportedColorType(png::ColorType::Indexed))
        ));
        assert_eq!(
            expand_to_rgba(png::ColorType::Grayscale, &[9])?,
            [9, 9, 9, 0xFF]
        );

        Ok(())
    }
}
