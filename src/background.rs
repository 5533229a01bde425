use crate::{
    blur,
    color::{self, Rgba8},
    error::{ScreencraftError, ScreencraftResult},
    ingest::SourceImage,
    raster,
    settings::{BackgroundType, CanvasSettings},
};

/// 30%-opacity black wash over blurred backgrounds for content contrast.
const WASH_ALPHA: u8 = 77;

/// Fully overwrite the canvas before any frame or image drawing.
///
/// `blurred` without a source image falls back to the gradient variant with
/// the same start/end colors so the canvas is never blank before upload.
pub fn paint(
    ctx: &mut vello_cpu::RenderContext,
    settings: &CanvasSettings,
    source: Option<&SourceImage>,
) -> ScreencraftResult<()> {
    match settings.background_type {
        BackgroundType::Solid => {
            let c = color::parse_hex(&settings.background_color)?;
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(c.to_peniko());
            ctx.fill_rect(&canvas_rect(settings));
            Ok(())
        }
        BackgroundType::Gradient => paint_gradient(ctx, settings),
        BackgroundType::Blurred => match source {
            Some(image) => paint_blurred_cover(ctx, settings, image),
            None => paint_gradient(ctx, settings),
        },
    }
}

/// Linear gradient axis endpoint: the direction angle projected onto the
/// canvas extents as `(w*cos, h*sin)`. Not an edge-to-edge diagonal; the
/// projection is part of the visual contract.
pub fn gradient_axis(width: u32, height: u32, direction_deg: f64) -> (f64, f64) {
    let rad = direction_deg.to_radians();
    (f64::from(width) * rad.cos(), f64::from(height) * rad.sin())
}

fn paint_gradient(
    ctx: &mut vello_cpu::RenderContext,
    settings: &CanvasSettings,
) -> ScreencraftResult<()> {
    let start = color::parse_hex(&settings.gradient_start)?;
    let end = color::parse_hex(&settings.gradient_end)?;
    let paint = gradient_paint(
        settings.width,
        settings.height,
        start,
        end,
        settings.gradient_direction,
    )?;
    raster::fill_canvas_with_paint(ctx, paint, settings.width, settings.height);
    Ok(())
}

/// Raster the gradient into a canvas-sized premul buffer. Each pixel center
/// is projected onto the axis vector and clamped to the [0,1] stop range.
fn gradient_paint(
    width: u32,
    height: u32,
    start: Rgba8,
    end: Rgba8,
    direction_deg: f64,
) -> ScreencraftResult<vello_cpu::Image> {
    let (dx, dy) = gradient_axis(width, height, direction_deg);
    let len2 = dx * dx + dy * dy;

    let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
    for y in 0..height {
        for x in 0..width {
            let t = if len2 <= f64::EPSILON {
                0.0
            } else {
                let px = f64::from(x) + 0.5;
                let py = f64::from(y) + 0.5;
                ((px * dx + py * dy) / len2).clamp(0.0, 1.0)
            };
            let c = start.lerp(end, t as f32).premul();
            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    raster::image_paint_from_premul(&bytes, width, height)
}

/// Cover-fit the source over the canvas (may crop), blur it, then wash.
fn paint_blurred_cover(
    ctx: &mut vello_cpu::RenderContext,
    settings: &CanvasSettings,
    image: &SourceImage,
) -> ScreencraftResult<()> {
    let (w16, h16) = raster::surface_extent(settings.width, settings.height)?;
    let canvas_w = f64::from(settings.width);
    let canvas_h = f64::from(settings.height);

    let scale = (canvas_w / f64::from(image.width)).max(canvas_h / f64::from(image.height));
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ScreencraftError::render("cover-fit scale is degenerate"));
    }
    let draw_w = f64::from(image.width) * scale;
    let draw_h = f64::from(image.height) * scale;
    let offset_x = (canvas_w - draw_w) / 2.0;
    let offset_y = (canvas_h - draw_h) / 2.0;

    let src_paint = image.paint()?;
    let covered = raster::rasterize(w16, h16, |scratch| {
        let tr = kurbo::Affine::translate((offset_x, offset_y)) * kurbo::Affine::scale(scale);
        scratch.set_transform(raster::affine_to_cpu(tr));
        scratch.set_paint(src_paint);
        scratch.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    })?;

    let radius = settings.blur_amount.max(0.0).round() as u32;
    let blurred = blur::blur_premul_rgba8(
        covered.data_as_u8_slice(),
        settings.width,
        settings.height,
        radius,
        blur::sigma_for_radius(radius),
    )?;
    let paint = raster::image_paint_from_premul(&blurred, settings.width, settings.height)?;
    raster::fill_canvas_with_paint(ctx, paint, settings.width, settings.height);

    // Contrast wash on top.
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, WASH_ALPHA));
    ctx.fill_rect(&canvas_rect(settings));
    Ok(())
}

fn canvas_rect(settings: &CanvasSettings) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(settings.width),
        f64::from(settings.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_axis_matches_direction_projection() {
        let (dx, dy) = gradient_axis(100, 200, 135.0);
        let rad = 135.0f64.to_radians();
        assert!((dx - 100.0 * rad.cos()).abs() < 1e-9);
        assert!((dy - 200.0 * rad.sin()).abs() < 1e-9);
        assert!(dx < 0.0, "135 degrees projects a negative x component");
        assert!(dy > 0.0);
    }

    #[test]
    fn gradient_axis_at_zero_degrees_is_horizontal() {
        let (dx, dy) = gradient_axis(640, 480, 0.0);
        assert!((dx - 640.0).abs() < 1e-9);
        assert!(dy.abs() < 1e-9);
    }

    #[test]
    fn horizontal_gradient_raster_interpolates_left_to_right() {
        let start = Rgba8::rgb(0, 0, 0);
        let end = Rgba8::rgb(255, 255, 255);
        let paint = gradient_paint(8, 2, start, end, 0.0).unwrap();
        let vello_cpu::ImageSource::Pixmap(pm) = &paint.image else {
            panic!("gradient paint must be a pixmap");
        };
        let data = pm.data_as_u8_slice();
        let first = data[0];
        let last = data[(7 * 4) as usize];
        assert!(first < last, "left edge {first} should be darker than {last}");
        // Rows are identical for a horizontal axis.
        assert_eq!(&data[0..8 * 4], &data[8 * 4..16 * 4]);
    }
}
