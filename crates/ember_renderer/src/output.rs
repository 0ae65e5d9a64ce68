//! Image output writers.
//!
//! The averaged linear colors in an [`ImageBuffer`] are gamma-2 corrected
//! (square root) and quantized with `floor(255.99 * sqrt(c))` on the way
//! out, either as a PPM "P3" text stream or as a PNG file.

use crate::renderer::ImageBuffer;
use crate::Color;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Quantize an averaged linear color to 8-bit RGB.
///
/// Gamma-2 approximation via square root. Non-finite channels quantize to
/// zero rather than erroring.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.99 * c.max(0.0).sqrt()) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Write the image as a PPM "P3" ASCII stream.
///
/// Header `P3\n<width> <height>\n255\n`, then one `R G B` triple per pixel,
/// one pixel per line, rows top to bottom.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

/// Save the image as a PPM file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Save the image as a PNG file.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let mut out = image::RgbImage::new(image.width, image.height);
    for y in 0..image.height {
        for x in 0..image.width {
            out.put_pixel(x, y, image::Rgb(color_to_rgb(image.get(x, y))));
        }
    }
    out.save(path)?;
    Ok(())
}
