//! PGM (portable graymap) format support
//!
//! Reads ASCII (`P2`) and binary (`P5`) graymaps with a maxval up to 255,
//! and writes binary `P5` files.

use crate::{ImageFormat, ImageHeader, IoError, IoResult};
use folio_core::Raster;
use std::io::{BufRead, Read, Write};

/// Largest sample count accepted from a PGM header
pub const MAX_PIXELS: usize = 1 << 28;

struct PgmHeader {
    magic: [u8; 2],
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read the next whitespace-delimited token, skipping `#` comments
fn next_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        let c = byte[0];
        if c == b'#' && token.is_empty() {
            let mut comment = Vec::new();
            reader.read_until(b'\n', &mut comment)?;
            continue;
        }
        if c.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(c as char);
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("unexpected end of PGM header".into()));
    }
    Ok(token)
}

fn parse_u32<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = next_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PGM {}: {:?}", what, token)))
}

fn read_pgm_header<R: BufRead>(reader: &mut R) -> IoResult<PgmHeader> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;
    if &magic != b"P2" && &magic != b"P5" {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM variant: {}",
            String::from_utf8_lossy(&magic)
        )));
    }
    let width = parse_u32(reader, "width")?;
    let height = parse_u32(reader, "height")?;
    let maxval = parse_u32(reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PGM maxval {} not supported",
            maxval
        )));
    }
    let in_range = (width as usize)
        .checked_mul(height as usize)
        .is_some_and(|n| n > 0 && n <= MAX_PIXELS);
    if !in_range {
        return Err(IoError::InvalidData(format!(
            "PGM dimensions {}x{} out of range",
            width, height
        )));
    }
    Ok(PgmHeader {
        magic,
        width,
        height,
        maxval,
    })
}

/// Read a PGM image into a normalized raster
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Raster> {
    let header = read_pgm_header(&mut reader)?;
    let count = header.width as usize * header.height as usize;

    let raw = if &header.magic == b"P5" {
        let mut raw = Vec::new();
        reader.by_ref().take(count as u64).read_to_end(&mut raw)?;
        if raw.len() < count {
            return Err(IoError::InvalidData(format!(
                "PGM data truncated: {} of {} samples",
                raw.len(),
                count
            )));
        }
        raw
    } else {
        let mut raw = Vec::with_capacity(count);
        for _ in 0..count {
            let value = parse_u32(&mut reader, "sample")?;
            raw.push(value.min(header.maxval) as u8);
        }
        raw
    };

    let data = raw
        .iter()
        .map(|&v| v as f32 / header.maxval as f32)
        .collect();
    Ok(Raster::from_data(header.width, header.height, data)?)
}

/// Read the dimensions of a PGM image without decoding pixel data
pub fn read_header_pnm<R: BufRead>(mut reader: R) -> IoResult<ImageHeader> {
    let header = read_pgm_header(&mut reader)?;
    Ok(ImageHeader {
        width: header.width,
        height: header.height,
        format: ImageFormat::Pnm,
    })
}

/// Write a raster as a binary (`P5`) PGM image
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", raster.width(), raster.height())?;
    writer.write_all(&raster.to_gray8())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pgm_binary_roundtrip() {
        let samples: Vec<u8> = (0..12).map(|i| (i * 20) as u8).collect();
        let raster = Raster::from_gray8(4, 3, &samples).unwrap();

        let mut buffer = Vec::new();
        write_pnm(&raster, &mut buffer).unwrap();
        let raster2 = read_pnm(Cursor::new(buffer)).unwrap();
        assert_eq!(raster2.to_gray8(), samples);
    }

    #[test]
    fn test_pgm_ascii_with_comment() {
        let text = b"P2\n# scanned folio\n3 1\n4\n0 2 4\n";
        let raster = read_pnm(Cursor::new(&text[..])).unwrap();
        assert_eq!(raster.dimensions(), (3, 1));
        assert_eq!(raster.get_pixel(1, 0).unwrap(), 0.5);
        assert_eq!(raster.get_pixel(2, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_pgm_rejects_oversized_header() {
        let text = b"P5\n4294967295 4294967295\n255\n\0\0";
        assert!(matches!(
            read_pnm(Cursor::new(&text[..])),
            Err(IoError::InvalidData(_))
        ));
        let text = b"P2\n70000 70000\n255\n0 0\n";
        assert!(matches!(
            read_header_pnm(Cursor::new(&text[..])),
            Err(IoError::InvalidData(_))
        ));
        let text = b"P5\n0 10\n255\n";
        assert!(read_pnm(Cursor::new(&text[..])).is_err());
    }

    #[test]
    fn test_pgm_truncated_data() {
        let text = b"P5\n4 4\n255\n\0\0\0";
        assert!(matches!(
            read_pnm(Cursor::new(&text[..])),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_pgm_rejects_ppm() {
        let text = b"P6\n1 1\n255\n\0\0\0";
        assert!(read_pnm(Cursor::new(&text[..])).is_err());
    }
}
