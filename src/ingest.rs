use std::sync::Arc;

use crate::{
    error::{ScreencraftError, ScreencraftResult},
    raster,
};

/// Upload size cap in bytes (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Decoded source bitmap handed to the compositor.
///
/// Owned by the ingestion side; the compositor reads it and never retains it
/// beyond one render call.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
    pub file_name: String,
}

impl SourceImage {
    /// Build a source from straight-alpha RGBA8 pixels, premultiplying in
    /// place. Intended for hosts that already hold decoded pixels, and for
    /// tests.
    pub fn from_rgba8(
        width: u32,
        height: u32,
        mut rgba: Vec<u8>,
        file_name: impl Into<String>,
    ) -> ScreencraftResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScreencraftError::ingest("image dimensions must be > 0"));
        }
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(ScreencraftError::ingest("rgba byte length mismatch"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
            file_name: file_name.into(),
        })
    }

    pub(crate) fn paint(&self) -> ScreencraftResult<vello_cpu::Image> {
        raster::image_paint_from_premul(self.rgba8_premul.as_slice(), self.width, self.height)
    }
}

/// Validate and decode an uploaded file.
///
/// Only PNG and JPEG content is accepted (sniffed from the bytes, not the
/// file name) and files above [`MAX_UPLOAD_BYTES`] are rejected. The render
/// pipeline is never invoked with an image that failed here; the error
/// strings are the user-facing messages.
pub fn decode_source(bytes: &[u8], file_name: &str) -> ScreencraftResult<SourceImage> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ScreencraftError::ingest("Image must be smaller than 10MB"));
    }

    let format = image::guess_format(bytes)
        .map_err(|_| ScreencraftError::ingest("Please upload a PNG or JPG image"))?;
    if !matches!(format, image::ImageFormat::Png | image::ImageFormat::Jpeg) {
        return Err(ScreencraftError::ingest("Please upload a PNG or JPG image"));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|_| ScreencraftError::ingest("Failed to load image"))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ScreencraftError::ingest("Failed to load image"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
        file_name: file_name.to_string(),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        let raw = px.repeat((width * height) as usize);
        let img = image::RgbaImage::from_raw(width, height, raw).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decodes_png_and_premultiplies() {
        let bytes = png_bytes(1, 1, [100, 50, 200, 128]);
        let src = decode_source(&bytes, "shot.png").unwrap();
        assert_eq!((src.width, src.height), (1, 1));
        assert_eq!(src.file_name, "shot.png");
        assert_eq!(
            src.rgba8_premul.as_slice(),
            &[
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128,
            ]
        );
    }

    #[test]
    fn rejects_unsupported_content() {
        let err = decode_source(b"GIF89a not really", "shot.gif").unwrap_err();
        assert!(err.to_string().contains("PNG or JPG"));
    }

    #[test]
    fn rejects_oversized_upload() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = decode_source(&bytes, "big.png").unwrap_err();
        assert!(err.to_string().contains("smaller than 10MB"));
    }

    #[test]
    fn rejects_truncated_png() {
        let mut bytes = png_bytes(2, 2, [1, 2, 3, 255]);
        bytes.truncate(16);
        let err = decode_source(&bytes, "broken.png").unwrap_err();
        assert!(err.to_string().contains("Failed to load image"));
    }

    #[test]
    fn from_rgba8_validates_shape() {
        assert!(SourceImage::from_rgba8(0, 1, vec![], "x").is_err());
        assert!(SourceImage::from_rgba8(1, 1, vec![0u8; 3], "x").is_err());
        let src = SourceImage::from_rgba8(1, 1, vec![255, 255, 255, 0], "x").unwrap();
        assert_eq!(src.rgba8_premul.as_slice(), &[0, 0, 0, 0]);
    }
}
