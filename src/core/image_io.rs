//! Image I/O

use crate::core::common::{clamp, Float};
use crate::core::geometry::Vector2i;
use crate::core::spectrum::Spectrum;
use byteorder::{LittleEndian, WriteBytesExt};
use image::codecs::hdr::HdrEncoder;
use image::Rgb;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Size of the BMP file header plus the BITMAPINFOHEADER.
const BMP_HEADER_SIZE: u32 = 14 + 40;

/// Gamma applied when quantizing linear radiance to 8 bits.
const BMP_GAMMA: Float = 2.2;

/// Writes pixels as a 24-bit uncompressed BMP. Rows are stored bottom-up as
/// the format requires; linear values are gamma encoded.
///
/// * `path`       - Output file path.
/// * `pixels`     - Pixel data in row-major order, top row first.
/// * `resolution` - Image resolution.
pub fn write_bmp(path: &Path, pixels: &[Spectrum], resolution: Vector2i) -> io::Result<()> {
    let (width, height) = (resolution.x as u32, resolution.y as u32);
    debug_assert_eq!(pixels.len(), (width * height) as usize);

    let row_size = (width * 3 + 3) & !3;
    let image_size = row_size * height;
    let padding = vec![0_u8; (row_size - width * 3) as usize];

    let mut file = BufWriter::new(File::create(path)?);

    // BITMAPFILEHEADER
    file.write_all(b"BM")?;
    file.write_u32::<LittleEndian>(BMP_HEADER_SIZE + image_size)?;
    file.write_u16::<LittleEndian>(0)?;
    file.write_u16::<LittleEndian>(0)?;
    file.write_u32::<LittleEndian>(BMP_HEADER_SIZE)?;

    // BITMAPINFOHEADER
    file.write_u32::<LittleEndian>(40)?;
    file.write_i32::<LittleEndian>(width as i32)?;
    file.write_i32::<LittleEndian>(height as i32)?;
    file.write_u16::<LittleEndian>(1)?;
    file.write_u16::<LittleEndian>(24)?;
    file.write_u32::<LittleEndian>(0)?;
    file.write_u32::<LittleEndian>(image_size)?;
    file.write_i32::<LittleEndian>(2835)?;
    file.write_i32::<LittleEndian>(2835)?;
    file.write_u32::<LittleEndian>(0)?;
    file.write_u32::<LittleEndian>(0)?;

    let inv_gamma = 1.0 / BMP_GAMMA;
    for y in (0..height).rev() {
        for x in 0..width {
            let pixel = pixels[(y * width + x) as usize];
            for channel in [pixel.b(), pixel.g(), pixel.r()] {
                let quantized = clamp(channel, 0.0, 1.0).powf(inv_gamma) * 255.0 + 0.5;
                file.write_u8(quantized as u8)?;
            }
        }
        file.write_all(&padding)?;
    }

    file.flush()
}

/// Writes pixels as a Radiance RGBE image with linear values.
///
/// * `path`       - Output file path.
/// * `pixels`     - Pixel data in row-major order, top row first.
/// * `resolution` - Image resolution.
pub fn write_hdr(path: &Path, pixels: &[Spectrum], resolution: Vector2i) -> io::Result<()> {
    let (width, height) = (resolution.x as usize, resolution.y as usize);
    debug_assert_eq!(pixels.len(), width * height);

    let data: Vec<Rgb<f32>> = pixels.iter().map(|p| Rgb([p.r(), p.g(), p.b()])).collect();

    let file = BufWriter::new(File::create(path)?);
    HdrEncoder::new(file)
        .encode(&data, width, height)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn bmp_header_and_size() {
        let resolution = Vector2i::new(3, 2);
        let pixels = vec![Spectrum::new(0.5); 6];
        let path = std::env::temp_dir().join("raybox_header_test.bmp");

        write_bmp(&path, &pixels, resolution).unwrap();

        let mut bytes = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
        std::fs::remove_file(&path).ok();

        // Rows of 3 pixels pad to 12 bytes; 54 byte header + 2 rows.
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(bytes.len(), 54 + 24);
        assert_eq!(u32::from_le_bytes(bytes[2..6].try_into().unwrap()), 78);
        assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 54);
        assert_eq!(u16::from_le_bytes(bytes[28..30].try_into().unwrap()), 24);
    }

    #[test]
    fn bmp_rows_are_bottom_up() {
        let resolution = Vector2i::new(1, 2);
        // Top pixel white, bottom pixel black.
        let pixels = vec![Spectrum::ONE, Spectrum::ZERO];
        let path = std::env::temp_dir().join("raybox_bottom_up_test.bmp");

        write_bmp(&path, &pixels, resolution).unwrap();

        let mut bytes = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
        std::fs::remove_file(&path).ok();

        // First stored row is the bottom (black) one.
        assert_eq!(bytes[54], 0);
        assert_eq!(bytes[58], 255);
    }
}
