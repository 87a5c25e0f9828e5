//! Plain-text PPM (`P3`) output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::ImageBuffer;

/// Write an image as ASCII PPM, top scanline first, one pixel per line.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for row in image.rows() {
        for [r, g, b] in row {
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}

/// Save an image to a PPM file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)
}
