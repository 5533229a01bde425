use std::io::Cursor;

use crate::{
    error::{ScreencraftError, ScreencraftResult},
    render::RenderedFrame,
};

/// PNG-encode a rendered frame.
///
/// Premultiplied pixels are converted back to straight alpha first; PNG
/// stores unassociated alpha. Encode failures surface as `Encode` errors and
/// no partial artifact is produced.
pub fn encode_png(frame: &RenderedFrame) -> ScreencraftResult<Vec<u8>> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }

    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| ScreencraftError::encode("frame byte length mismatch"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| ScreencraftError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// Timestamped download name, e.g. `screencraft-1724999999999.png`.
pub fn export_file_name(epoch_ms: u64) -> String {
    format!("screencraft-{epoch_ms}.png")
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((u16::from(px[0]) * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((u16::from(px[1]) * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((u16::from(px[2]) * 255 + a / 2) / a).min(255) as u8;
    }
}
