//! PNG image format support

use crate::{ImageFormat, ImageHeader, IoError, IoResult};
use folio_core::Raster;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into a normalized raster
///
/// Palette, low bit depth and 16-bit images are normalized to 8-bit
/// samples first; color is reduced to luminance and alpha is dropped.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let samples = match (output_info.color_type, output_info.bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let mut gray = Vec::with_capacity(width as usize * height as usize);
    let mut rgb = Vec::new();
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize * samples];
        match samples {
            1 => gray.extend_from_slice(row),
            2 => gray.extend(row.chunks_exact(2).map(|p| p[0])),
            _ => rgb.extend(row.chunks_exact(samples).flat_map(|p| [p[0], p[1], p[2]])),
        }
    }

    let raster = if samples <= 2 {
        Raster::from_gray8(width, height, &gray)?
    } else {
        Raster::from_rgb8(width, height, &rgb)?
    };
    Ok(raster)
}

/// Read the dimensions of a PNG image without decoding pixel data
pub fn read_header_png<R: BufRead + Seek>(reader: R) -> IoResult<ImageHeader> {
    let reader = Decoder::new(reader)
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;
    let info = reader.info();
    Ok(ImageHeader {
        width: info.width,
        height: info.height,
        format: ImageFormat::Png,
    })
}

/// Write a raster as an 8-bit grayscale PNG image
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(&raster.to_gray8())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let samples: Vec<u8> = (0..100).map(|i| (i * 2) as u8).collect();
        let raster = Raster::from_gray8(10, 10, &samples).unwrap();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();

        let raster2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(raster2.dimensions(), (10, 10));
        assert_eq!(raster2.to_gray8(), samples);
    }

    #[test]
    fn test_png_rgb_reduced_to_luminance() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 0, 0, 255, 255, 255]).unwrap();
        }

        let raster = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(raster.get_pixel(0, 0).unwrap(), 0.0);
        assert!((raster.get_pixel(1, 0).unwrap() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_png_header() {
        let raster = Raster::new_with_value(7, 3, 1.0).unwrap();
        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();

        let header = read_header_png(Cursor::new(buffer)).unwrap();
        assert_eq!((header.width, header.height), (7, 3));
        assert_eq!(header.format, ImageFormat::Png);
    }
}
