//! PNG output of the tone-mapped preview.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::PreviewError;

/// Write RGBA8 pixels as a PNG, creating the parent directory if needed.
pub fn write_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<(), PreviewError> {
    let write_error = |source| PreviewError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let file = File::create(path).map_err(write_error)?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sky.png");
        let rgba: Vec<u8> = (0..2 * 3 * 4).map(|i| i as u8).collect();
        write_png(&path, 2, 3, &rgba).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (2, 3));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&buf[..info.buffer_size()], rgba.as_slice());
    }

    #[test]
    fn test_wrong_buffer_size_is_an_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.png");
        let result = write_png(&path, 4, 4, &[0; 8]);
        assert!(matches!(result, Err(PreviewError::EncodeError(_))));
    }
}
